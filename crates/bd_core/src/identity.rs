//! 显式身份上下文
//!
//! 引擎本身不接收身份；只有面向持久化的调用方通过 [`Session`] 获取调用者身份。

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{BrainDashError, Result};

/// 用户 ID 类型别名
pub type UserId = Uuid;

/// 已认证的调用者身份
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    /// 用户 ID
    pub user_id: UserId,
    /// 显示名称
    pub name: String,
}

impl Identity {
    /// 创建新身份
    pub fn new(user_id: UserId, name: impl Into<String>) -> Self {
        Self {
            user_id,
            name: name.into(),
        }
    }
}

/// 会话上下文
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Session {
    /// 匿名调用 (仅计算，不落盘)
    #[default]
    Anonymous,
    /// 已认证调用
    Authenticated(Identity),
}

impl Session {
    /// 获取身份 (若已认证)
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Session::Anonymous => None,
            Session::Authenticated(identity) => Some(identity),
        }
    }

    /// 要求已认证，否则返回 Unauthorized
    pub fn require(&self) -> Result<&Identity> {
        self.identity()
            .ok_or_else(|| BrainDashError::Unauthorized("No identity in session".to_string()))
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated(_))
    }
}

impl From<Option<Identity>> for Session {
    fn from(identity: Option<Identity>) -> Self {
        identity.map_or(Session::Anonymous, Session::Authenticated)
    }
}
