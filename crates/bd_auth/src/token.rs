//! JWT 签发与校验 (HS256)

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bd_core::{BrainDashError, Identity, Result};

/// 令牌配置
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// HMAC 密钥
    pub secret: String,
    /// 有效期
    pub ttl: Duration,
}

impl TokenConfig {
    /// 默认有效期 7 天
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ttl: Duration::days(7),
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

/// JWT 载荷
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Claims {
    /// 用户 ID
    sub: String,
    /// 显示名称
    name: String,
    /// 签发时间 (秒)
    iat: i64,
    /// 过期时间 (秒)
    exp: i64,
}

/// 令牌签发器
pub struct TokenIssuer {
    config: TokenConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenIssuer {
    /// 创建新签发器
    pub fn new(config: TokenConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());
        Self {
            config,
            encoding_key,
            decoding_key,
            validation: Validation::new(Algorithm::HS256),
        }
    }

    /// 为身份签发令牌
    pub fn issue(&self, identity: &Identity) -> Result<String> {
        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(self.config.ttl)
            .ok_or_else(|| BrainDashError::Token("token ttl out of range".to_string()))?;
        let claims = Claims {
            sub: identity.user_id.to_string(),
            name: identity.name.clone(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| BrainDashError::Token(e.to_string()))
    }

    /// 校验令牌并还原身份
    pub fn verify(&self, token: &str) -> Result<Identity> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| BrainDashError::Token(e.to_string()))?;

        let user_id = Uuid::parse_str(&data.claims.sub)
            .map_err(|e| BrainDashError::Token(format!("invalid subject: {e}")))?;

        Ok(Identity::new(user_id, data.claims.name))
    }

    /// 获取配置
    pub fn config(&self) -> &TokenConfig {
        &self.config
    }
}

/// 从 `Authorization` 头取出 Bearer 令牌
pub fn bearer_token(header: Option<&str>) -> Result<&str> {
    header
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| BrainDashError::Unauthorized("No token provided".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issuer() -> TokenIssuer {
        TokenIssuer::new(TokenConfig::new("test-secret"))
    }

    #[test]
    fn test_issue_and_verify() {
        let issuer = issuer();
        let identity = Identity::new(Uuid::new_v4(), "Ada");

        let token = issuer.issue(&identity).unwrap();
        assert_eq!(issuer.verify(&token).unwrap(), identity);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let identity = Identity::new(Uuid::new_v4(), "Ada");
        let token = issuer().issue(&identity).unwrap();

        let other = TokenIssuer::new(TokenConfig::new("another-secret"));
        assert!(matches!(other.verify(&token), Err(BrainDashError::Token(_))));
    }

    #[test]
    fn test_expired_token_rejected() {
        // 超出默认 60 秒的时钟偏差容忍
        let ttl = Duration::hours(-1);
        let issuer = TokenIssuer::new(TokenConfig::new("test-secret").with_ttl(ttl));
        let token = issuer.issue(&Identity::new(Uuid::new_v4(), "Ada")).unwrap();
        assert!(matches!(issuer.verify(&token), Err(BrainDashError::Token(_))));
    }

    #[test]
    fn test_overflowing_ttl_is_an_error() {
        let ttl = Duration::seconds(i64::MAX / 1000);
        let issuer = TokenIssuer::new(TokenConfig::new("test-secret").with_ttl(ttl));
        let result = issuer.issue(&Identity::new(Uuid::new_v4(), "Ada"));
        assert!(matches!(result, Err(BrainDashError::Token(_))));
    }

    #[test]
    fn test_garbage_token_rejected() {
        assert!(issuer().verify("not-a-jwt").is_err());
    }

    #[test]
    fn test_bearer_token_parsing() {
        assert_eq!(bearer_token(Some("Bearer abc.def")).unwrap(), "abc.def");
        assert!(matches!(bearer_token(None), Err(BrainDashError::Unauthorized(_))));
        assert!(bearer_token(Some("Basic abc")).is_err());
        assert!(bearer_token(Some("Bearer ")).is_err());
    }
}
