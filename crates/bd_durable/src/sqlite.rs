//! SQLite 存储引擎

use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;
use uuid::Uuid;

use bd_core::{BrainDashError, Result, Stats, UserId};

use crate::record::{normalize_email, Account, NewAccount, StatsRecord};
use crate::store::{AccountStore, StatsStore, StoreConfig};

const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS brain_stats (
        user_id           TEXT PRIMARY KEY,
        focus_level       REAL NOT NULL,
        logic_power       REAL NOT NULL,
        bug_count         INTEGER NOT NULL,
        coffee_dependency REAL NOT NULL,
        brain_ram_usage   REAL NOT NULL,
        created_at        TEXT NOT NULL,
        updated_at        TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS accounts (
        id            TEXT PRIMARY KEY,
        name          TEXT NOT NULL,
        email         TEXT NOT NULL UNIQUE,
        password_hash TEXT NOT NULL,
        salt          TEXT NOT NULL,
        created_at    TEXT NOT NULL
    )",
];

const STATS_COLUMNS: &str = "user_id, focus_level, logic_power, bug_count, \
     coffee_dependency, brain_ram_usage, created_at, updated_at";

const ACCOUNT_COLUMNS: &str = "id, name, email, password_hash, salt, created_at";

fn db_err(e: sqlx::Error) -> BrainDashError {
    BrainDashError::Database(e.to_string())
}

/// SQLite 存储
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// 打开数据库并建表
    pub async fn open(config: &StoreConfig) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(&config.database_url)
            .map_err(db_err)?
            .create_if_missing(true);

        let mut pool_options = SqlitePoolOptions::new().max_connections(config.max_connections);
        if config.is_in_memory() {
            // 连接被回收时内存库随之消失
            pool_options = pool_options.idle_timeout(None).max_lifetime(None);
        }

        let pool = pool_options.connect_with(options).await.map_err(db_err)?;
        let store = Self { pool };
        store.migrate().await?;

        tracing::info!(url = %config.database_url, "SQLite store opened");
        Ok(store)
    }

    /// 建表 (幂等)
    pub async fn migrate(&self) -> Result<()> {
        for statement in SCHEMA {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(db_err)?;
        }
        Ok(())
    }

    /// 关闭连接池
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

fn parse_uuid(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw).map_err(|e| BrainDashError::Database(format!("invalid uuid {raw}: {e}")))
}

fn parse_time(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| BrainDashError::Database(format!("invalid timestamp {raw}: {e}")))
}

fn stats_record_from_row(row: &SqliteRow) -> Result<StatsRecord> {
    let user_id: String = row.try_get("user_id").map_err(db_err)?;
    let bug_count: i64 = row.try_get("bug_count").map_err(db_err)?;
    let created_at: String = row.try_get("created_at").map_err(db_err)?;
    let updated_at: String = row.try_get("updated_at").map_err(db_err)?;

    Ok(StatsRecord {
        user_id: parse_uuid(&user_id)?,
        stats: Stats {
            focus_level: row.try_get("focus_level").map_err(db_err)?,
            logic_power: row.try_get("logic_power").map_err(db_err)?,
            bug_count: u32::try_from(bug_count).map_err(|_| {
                BrainDashError::Database(format!("bug_count out of range: {bug_count}"))
            })?,
            coffee_dependency: row.try_get("coffee_dependency").map_err(db_err)?,
            brain_ram_usage: row.try_get("brain_ram_usage").map_err(db_err)?,
        },
        created_at: parse_time(&created_at)?,
        updated_at: parse_time(&updated_at)?,
    })
}

fn account_from_row(row: &SqliteRow) -> Result<Account> {
    let id: String = row.try_get("id").map_err(db_err)?;
    let created_at: String = row.try_get("created_at").map_err(db_err)?;

    Ok(Account {
        id: parse_uuid(&id)?,
        name: row.try_get("name").map_err(db_err)?,
        email: row.try_get("email").map_err(db_err)?,
        password_hash: row.try_get("password_hash").map_err(db_err)?,
        salt: row.try_get("salt").map_err(db_err)?,
        created_at: parse_time(&created_at)?,
    })
}

#[async_trait]
impl StatsStore for SqliteStore {
    async fn upsert(&self, user_id: UserId, stats: Stats) -> Result<StatsRecord> {
        stats.validate()?;

        let now = Utc::now().to_rfc3339();
        let sql = format!(
            "INSERT INTO brain_stats ({STATS_COLUMNS})
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)
             ON CONFLICT(user_id) DO UPDATE SET
                focus_level = excluded.focus_level,
                logic_power = excluded.logic_power,
                bug_count = excluded.bug_count,
                coffee_dependency = excluded.coffee_dependency,
                brain_ram_usage = excluded.brain_ram_usage,
                updated_at = excluded.updated_at
             RETURNING {STATS_COLUMNS}"
        );

        let row = sqlx::query(&sql)
            .bind(user_id.to_string())
            .bind(stats.focus_level)
            .bind(stats.logic_power)
            .bind(i64::from(stats.bug_count))
            .bind(stats.coffee_dependency)
            .bind(stats.brain_ram_usage)
            .bind(&now)
            .bind(&now)
            .fetch_one(&self.pool)
            .await
            .map_err(db_err)?;

        tracing::debug!(%user_id, "Stats record upserted");
        stats_record_from_row(&row)
    }

    async fn latest(&self, user_id: UserId) -> Result<Option<StatsRecord>> {
        let sql = format!("SELECT {STATS_COLUMNS} FROM brain_stats WHERE user_id = ?");
        let row = sqlx::query(&sql)
            .bind(user_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;

        row.as_ref().map(stats_record_from_row).transpose()
    }

    async fn count(&self) -> Result<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM brain_stats")
            .fetch_one(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(count.max(0) as u64)
    }
}

#[async_trait]
impl AccountStore for SqliteStore {
    async fn insert(&self, account: NewAccount) -> Result<Account> {
        let account = Account::from_new(account);

        let sql = format!("INSERT INTO accounts ({ACCOUNT_COLUMNS}) VALUES (?, ?, ?, ?, ?, ?)");
        sqlx::query(&sql)
            .bind(account.id.to_string())
            .bind(&account.name)
            .bind(&account.email)
            .bind(&account.password_hash)
            .bind(&account.salt)
            .bind(account.created_at.to_rfc3339())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                let duplicate = e
                    .as_database_error()
                    .is_some_and(|db| db.is_unique_violation());
                if duplicate {
                    BrainDashError::Conflict(format!("Account already exists: {}", account.email))
                } else {
                    db_err(e)
                }
            })?;

        tracing::info!(account_id = %account.id, "Account created");
        Ok(account)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>> {
        let sql = format!("SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE email = ?");
        let row = sqlx::query(&sql)
            .bind(normalize_email(email))
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;

        row.as_ref().map(account_from_row).transpose()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>> {
        let sql = format!("SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE id = ?");
        let row = sqlx::query(&sql)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;

        row.as_ref().map(account_from_row).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn memory_store() -> SqliteStore {
        SqliteStore::open(&StoreConfig::in_memory()).await.unwrap()
    }

    fn stats(focus_level: f64) -> Stats {
        Stats {
            focus_level,
            logic_power: 100.0,
            bug_count: 0,
            coffee_dependency: 25.0,
            brain_ram_usage: 1.9,
        }
    }

    #[tokio::test]
    async fn test_upsert_then_latest() {
        let store = memory_store().await;
        let user = Uuid::new_v4();

        assert!(store.latest(user).await.unwrap().is_none());

        let first = store.upsert(user, stats(80.0)).await.unwrap();
        let second = store.upsert(user, stats(100.0)).await.unwrap();

        assert_eq!(store.count().await.unwrap(), 1);
        assert_eq!(second.created_at, first.created_at);

        let latest = store.latest(user).await.unwrap().unwrap();
        assert_eq!(latest.stats, stats(100.0));
        assert_eq!(latest.user_id, user);
    }

    #[tokio::test]
    async fn test_records_are_per_user() {
        let store = memory_store().await;
        store.upsert(Uuid::new_v4(), stats(10.0)).await.unwrap();
        store.upsert(Uuid::new_v4(), stats(20.0)).await.unwrap();
        assert_eq!(store.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_account_unique_email() {
        let store = memory_store().await;
        let new = NewAccount {
            name: "Grace".to_string(),
            email: "Grace@Example.com".to_string(),
            password_hash: "ab".to_string(),
            salt: "cd".to_string(),
        };

        let created = store.insert(new.clone()).await.unwrap();
        assert_eq!(created.email, "grace@example.com");

        let dup = store.insert(new).await;
        assert!(matches!(dup, Err(BrainDashError::Conflict(_))));

        let by_email = store.find_by_email("GRACE@example.com").await.unwrap().unwrap();
        assert_eq!(by_email.id, created.id);
        let by_id = store.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(by_id.name, "Grace");
    }
}
