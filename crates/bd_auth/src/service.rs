//! 账户注册与登录

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use bd_core::{BrainDashError, Identity, Result};
use bd_durable::{AccountStore, NewAccount};

use crate::password::{generate_salt, hash_password, verify_password};
use crate::token::{bearer_token, TokenIssuer};

/// 密码最短长度
pub const MIN_PASSWORD_LEN: usize = 6;

/// 注册/登录成功后的响应
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub user_id: String,
    pub name: String,
    pub message: String,
}

/// 身份服务
pub struct AuthService {
    accounts: Arc<dyn AccountStore>,
    issuer: TokenIssuer,
}

impl AuthService {
    /// 创建新身份服务
    pub fn new(accounts: Arc<dyn AccountStore>, issuer: TokenIssuer) -> Self {
        Self { accounts, issuer }
    }

    /// 注册新账户并签发令牌
    pub async fn signup(&self, name: &str, email: &str, password: &str) -> Result<AuthResponse> {
        let name = name.trim();
        let email = email.trim();

        if name.is_empty() {
            return Err(BrainDashError::InvalidInput("Name is required".to_string()));
        }
        if !email.contains('@') {
            return Err(BrainDashError::InvalidInput("A valid email is required".to_string()));
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(BrainDashError::InvalidInput(format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }

        let salt = generate_salt();
        let password_hash = hash_password(&salt, password)?;
        let account = self
            .accounts
            .insert(NewAccount {
                name: name.to_string(),
                email: email.to_string(),
                password_hash,
                salt,
            })
            .await?;

        let identity = Identity::new(account.id, account.name);
        tracing::info!(user_id = %identity.user_id, "User registered");
        self.respond(&identity, "User registered successfully")
    }

    /// 登录并签发令牌
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse> {
        let invalid = || BrainDashError::Unauthorized("Invalid credentials".to_string());

        let account = self.accounts.find_by_email(email).await?.ok_or_else(invalid)?;
        if !verify_password(&account.salt, password, &account.password_hash) {
            tracing::warn!(user_id = %account.id, "Login rejected: wrong password");
            return Err(invalid());
        }

        let identity = Identity::new(account.id, account.name);
        tracing::info!(user_id = %identity.user_id, "User logged in");
        self.respond(&identity, "Login successful")
    }

    /// 校验 `Authorization` 头并还原身份
    pub fn authenticate(&self, authorization: Option<&str>) -> Result<Identity> {
        let token = bearer_token(authorization)?;
        self.issuer.verify(token)
    }

    fn respond(&self, identity: &Identity, message: &str) -> Result<AuthResponse> {
        Ok(AuthResponse {
            token: self.issuer.issue(identity)?,
            user_id: identity.user_id.to_string(),
            name: identity.name.clone(),
            message: message.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenConfig;
    use bd_durable::MemoryStore;

    fn service() -> AuthService {
        AuthService::new(
            Arc::new(MemoryStore::new()),
            TokenIssuer::new(TokenConfig::new("test-secret")),
        )
    }

    #[tokio::test]
    async fn test_signup_then_login() {
        let auth = service();

        let signup = auth.signup("Ada", "Ada@Example.com", "lovelace").await.unwrap();
        assert_eq!(signup.name, "Ada");

        let login = auth.login("ada@example.com", "lovelace").await.unwrap();
        assert_eq!(login.user_id, signup.user_id);

        let header = format!("Bearer {}", login.token);
        let identity = auth.authenticate(Some(&header)).unwrap();
        assert_eq!(identity.user_id.to_string(), signup.user_id);
    }

    #[tokio::test]
    async fn test_signup_validation() {
        let auth = service();
        assert!(matches!(
            auth.signup(" ", "a@b.c", "secret1").await,
            Err(BrainDashError::InvalidInput(_))
        ));
        assert!(matches!(
            auth.signup("Ada", "not-an-email", "secret1").await,
            Err(BrainDashError::InvalidInput(_))
        ));
        assert!(matches!(
            auth.signup("Ada", "a@b.c", "short").await,
            Err(BrainDashError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn test_duplicate_signup_conflicts() {
        let auth = service();
        auth.signup("Ada", "ada@example.com", "lovelace").await.unwrap();
        assert!(matches!(
            auth.signup("Ada Again", "ADA@example.com", "lovelace").await,
            Err(BrainDashError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn test_login_rejects_bad_credentials() {
        let auth = service();
        auth.signup("Ada", "ada@example.com", "lovelace").await.unwrap();

        assert!(matches!(
            auth.login("ada@example.com", "babbage").await,
            Err(BrainDashError::Unauthorized(_))
        ));
        assert!(matches!(
            auth.login("nobody@example.com", "lovelace").await,
            Err(BrainDashError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_authenticate_missing_header() {
        assert!(matches!(
            service().authenticate(None),
            Err(BrainDashError::Unauthorized(_))
        ));
        assert!(matches!(
            service().authenticate(Some("Bearer garbage")),
            Err(BrainDashError::Token(_))
        ));
    }
}
