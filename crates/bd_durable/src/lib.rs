//! # bd_durable - Brain Dashboard Durable Storage
//!
//! 持久化底座：每个用户一条统计记录 (Upsert 语义)，以及账户记录。
//! 提供 SQLite 与内存两种实现，引擎本身从不读写存储。

pub mod memory;
pub mod record;
pub mod sqlite;
pub mod store;

pub use memory::MemoryStore;
pub use record::{Account, NewAccount, StatsRecord};
pub use sqlite::SqliteStore;
pub use store::{AccountStore, StatsStore, StoreConfig};
