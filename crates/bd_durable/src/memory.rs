//! 内存存储

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use bd_core::{BrainDashError, Result, Stats, UserId};

use crate::record::{normalize_email, Account, NewAccount, StatsRecord};
use crate::store::{AccountStore, StatsStore};

/// 基于 RwLock<HashMap> 的内存存储，克隆后共享同一份数据
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    stats: Arc<RwLock<HashMap<UserId, StatsRecord>>>,
    accounts: Arc<RwLock<HashMap<Uuid, Account>>>,
}

impl MemoryStore {
    /// 创建空存储
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StatsStore for MemoryStore {
    async fn upsert(&self, user_id: UserId, stats: Stats) -> Result<StatsRecord> {
        stats.validate()?;

        let mut records = self.stats.write().await;
        let record = records
            .entry(user_id)
            .and_modify(|record| record.replace(stats))
            .or_insert_with(|| StatsRecord::new(user_id, stats));

        Ok(record.clone())
    }

    async fn latest(&self, user_id: UserId) -> Result<Option<StatsRecord>> {
        Ok(self.stats.read().await.get(&user_id).cloned())
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.stats.read().await.len() as u64)
    }
}

#[async_trait]
impl AccountStore for MemoryStore {
    async fn insert(&self, account: NewAccount) -> Result<Account> {
        let account = Account::from_new(account);

        let mut accounts = self.accounts.write().await;
        if accounts.values().any(|a| a.email == account.email) {
            return Err(BrainDashError::Conflict(format!(
                "Account already exists: {}",
                account.email
            )));
        }

        accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>> {
        let email = normalize_email(email);
        Ok(self
            .accounts
            .read()
            .await
            .values()
            .find(|a| a.email == email)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>> {
        Ok(self.accounts.read().await.get(&id).cloned())
    }
}
