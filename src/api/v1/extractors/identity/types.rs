/*
 * Responsibility
 * - Handler から見える「認証済みコンテキスト」の型
 * - token gate が検証して request extensions に格納し、handler はこの型だけを受け取る
 */
use std::fmt;

use uuid::Uuid;

use crate::services::auth::{Role, token_service::VerifiedToken};

/// Principal derived from a validated access token. Lives for one request.
///
/// `role` is `None` when the token carried a role outside the registry;
/// such identities pass no role gate.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: Uuid,
    pub email: String,
    pub role: Option<Role>,
    pub expires_at: i64,
}

impl From<VerifiedToken> for Identity {
    fn from(token: VerifiedToken) -> Self {
        Self {
            user_id: token.user_id,
            email: token.email,
            role: token.role,
            expires_at: token.expires_at,
        }
    }
}

/// The raw bearer credential as presented by the client.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print the token
        f.write_str("Credential(..)")
    }
}
