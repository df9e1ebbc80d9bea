//! 持久化记录类型

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bd_core::{Stats, UserId};

/// 用户最近一次的统计记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsRecord {
    /// 所属用户
    pub user_id: UserId,
    /// 统计值 (平铺到记录顶层)
    #[serde(flatten)]
    pub stats: Stats,
    /// 首次写入时间
    pub created_at: DateTime<Utc>,
    /// 最近更新时间
    pub updated_at: DateTime<Utc>,
}

impl StatsRecord {
    /// 创建新记录
    pub fn new(user_id: UserId, stats: Stats) -> Self {
        let now = Utc::now();
        Self {
            user_id,
            stats,
            created_at: now,
            updated_at: now,
        }
    }

    /// 替换统计值，保留创建时间
    pub fn replace(&mut self, stats: Stats) {
        self.stats = stats;
        self.updated_at = Utc::now();
    }
}

/// 待创建的账户
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub salt: String,
}

/// 账户
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    /// 账户 ID (即用户 ID)
    pub id: Uuid,
    /// 显示名称
    pub name: String,
    /// 邮箱 (小写，唯一)
    pub email: String,
    /// 密码哈希 (hex)
    pub password_hash: String,
    /// 盐 (hex)
    pub salt: String,
    /// 创建时间
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// 从待创建账户生成
    pub fn from_new(new: NewAccount) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: new.name,
            email: normalize_email(&new.email),
            password_hash: new.password_hash,
            salt: new.salt,
            created_at: Utc::now(),
        }
    }
}

/// 邮箱统一为去空白的小写形式
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
