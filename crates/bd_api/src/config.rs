//! 服务器配置

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use chrono::Duration;

use bd_auth::TokenConfig;
use bd_core::{BrainDashError, Result};
use bd_durable::StoreConfig;

/// 默认端口
pub const DEFAULT_PORT: u16 = 5000;

/// 令牌有效期上限 (一年)
pub const MAX_TOKEN_TTL_HOURS: i64 = 24 * 365;

/// 服务器配置
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// 监听地址
    pub addr: SocketAddr,
    /// 存储配置
    pub store: StoreConfig,
    /// 令牌配置
    pub token: TokenConfig,
}

impl ServerConfig {
    /// 使用给定密钥与默认值创建配置
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), DEFAULT_PORT),
            store: StoreConfig::default(),
            token: TokenConfig::new(jwt_secret),
        }
    }

    /// 从环境变量读取: HOST, PORT, DATABASE_URL, JWT_SECRET (必需), TOKEN_TTL_HOURS
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 从任意键值来源读取
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let secret = lookup("JWT_SECRET")
            .filter(|s| !s.is_empty())
            .ok_or_else(|| BrainDashError::Config("JWT_SECRET not defined".to_string()))?;

        let mut config = Self::new(secret);

        if let Some(host) = lookup("HOST") {
            config.addr.set_ip(
                host.parse()
                    .map_err(|e| BrainDashError::Config(format!("invalid HOST {host}: {e}")))?,
            );
        }
        if let Some(port) = lookup("PORT") {
            config.addr.set_port(
                port.parse()
                    .map_err(|e| BrainDashError::Config(format!("invalid PORT {port}: {e}")))?,
            );
        }
        if let Some(url) = lookup("DATABASE_URL") {
            config.store.database_url = url;
            if config.store.is_in_memory() {
                config.store.max_connections = 1;
            }
        }
        if let Some(hours) = lookup("TOKEN_TTL_HOURS") {
            let invalid = |reason: String| {
                BrainDashError::Config(format!("invalid TOKEN_TTL_HOURS {hours}: {reason}"))
            };
            let parsed: i64 = hours.parse::<i64>().map_err(|e| invalid(e.to_string()))?;
            if !(1..=MAX_TOKEN_TTL_HOURS).contains(&parsed) {
                return Err(invalid(format!("must be within 1-{MAX_TOKEN_TTL_HOURS}")));
            }
            config.token.ttl =
                Duration::try_hours(parsed).ok_or_else(|| invalid("out of range".to_string()))?;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_secret_required() {
        let result = ServerConfig::from_lookup(lookup(&[("PORT", "8080")]));
        assert!(matches!(result, Err(BrainDashError::Config(_))));
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[("JWT_SECRET", "s3cret")])).unwrap();
        assert_eq!(config.addr.port(), DEFAULT_PORT);
        assert_eq!(config.token.ttl, Duration::days(7));
        assert_eq!(config.store.database_url, StoreConfig::default().database_url);
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("JWT_SECRET", "s3cret"),
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("DATABASE_URL", "sqlite::memory:"),
            ("TOKEN_TTL_HOURS", "2"),
        ]))
        .unwrap();
        assert_eq!(config.addr.to_string(), "127.0.0.1:8080");
        assert!(config.store.is_in_memory());
        assert_eq!(config.token.ttl, Duration::hours(2));
    }

    #[test]
    fn test_token_ttl_out_of_range() {
        for hours in ["9223372036854775807", "0", "-3", "8761"] {
            let result = ServerConfig::from_lookup(lookup(&[
                ("JWT_SECRET", "s"),
                ("TOKEN_TTL_HOURS", hours),
            ]));
            assert!(matches!(result, Err(BrainDashError::Config(_))), "hours: {hours}");
        }
    }

    #[test]
    fn test_invalid_port() {
        let result = ServerConfig::from_lookup(lookup(&[("JWT_SECRET", "s"), ("PORT", "http")]));
        assert!(matches!(result, Err(BrainDashError::Config(_))));
    }
}
