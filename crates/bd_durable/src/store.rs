//! 存储特征与配置

use async_trait::async_trait;
use uuid::Uuid;

use bd_core::{Result, Stats, UserId};

use crate::record::{Account, NewAccount, StatsRecord};

/// 存储配置
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// 数据库 URL
    pub database_url: String,
    /// 连接池上限
    pub max_connections: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite://brain_dashboard.db".to_string(),
            max_connections: 5,
        }
    }
}

impl StoreConfig {
    /// 内存数据库 (单连接，否则每个连接各自一份库)
    pub fn in_memory() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            max_connections: 1,
        }
    }

    pub fn is_in_memory(&self) -> bool {
        self.database_url.contains(":memory:")
    }
}

/// 统计记录存储：每个用户一条
#[async_trait]
pub trait StatsStore: Send + Sync + 'static {
    /// 不存在则创建，存在则替换；保留创建时间
    async fn upsert(&self, user_id: UserId, stats: Stats) -> Result<StatsRecord>;

    /// 读取用户最近的记录
    async fn latest(&self, user_id: UserId) -> Result<Option<StatsRecord>>;

    /// 记录总数
    async fn count(&self) -> Result<u64>;
}

/// 账户存储
#[async_trait]
pub trait AccountStore: Send + Sync + 'static {
    /// 创建账户，邮箱重复时返回 Conflict
    async fn insert(&self, account: NewAccount) -> Result<Account>;

    /// 按邮箱查找 (大小写不敏感)
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>>;

    /// 按 ID 查找
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>>;
}
