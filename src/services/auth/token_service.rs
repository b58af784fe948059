use std::{error::Error as StdError, fmt};

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::services::auth::Role;

// Errors returned by token issuance + strict claim validation.
#[derive(Debug)]
pub enum TokenError {
    Jwt(jsonwebtoken::errors::Error),
    EmptyClaim(&'static str),
    InvalidSubUuid,
    WrongPurpose,
}

impl fmt::Display for TokenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Jwt(e) => write!(f, "jwt verification failed: {}", e),
            Self::EmptyClaim(name) => write!(f, "empty '{}' claim", name),
            Self::InvalidSubUuid => write!(f, "invalid 'sub' (expected UUID)"),
            Self::WrongPurpose => write!(f, "token was issued for another purpose"),
        }
    }
}

impl StdError for TokenError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Jwt(e) => Some(e),
            _ => None,
        }
    }
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        Self::Jwt(e)
    }
}

/// What a token may be used for. A verification link can never act as an
/// access token and vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenPurpose {
    Access,
    Verify,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TokenClaims {
    iss: String,
    aud: String,
    sub: String,
    email: String,
    // Kept as a raw string: unknown roles must survive decoding and be denied later.
    role: String,
    purpose: TokenPurpose,
    iat: i64,
    exp: i64,
    jti: String,
}

/// TokenService が返す「検証済み・アプリ側で使う型」
#[derive(Debug, Clone)]
pub struct VerifiedToken {
    pub user_id: Uuid,
    pub email: String,
    pub role: Option<Role>,
    pub expires_at: i64,
}

#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: i64,
}

/// HS256 token issuer/verifier.
///
/// - Key material is intentionally not printable via Debug.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    issuer: String,
    audience: String,
    access_ttl_seconds: u64,
    verify_ttl_seconds: u64,
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("access_ttl_seconds", &self.access_ttl_seconds)
            .field("verify_ttl_seconds", &self.verify_ttl_seconds)
            .finish()
    }
}

impl TokenService {
    pub fn new(
        secret: &[u8],
        issuer: &str,
        audience: &str,
        access_ttl_seconds: u64,
        verify_ttl_seconds: u64,
        leeway_seconds: u64,
    ) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[issuer]);
        validation.set_audience(&[audience]);
        validation.leeway = leeway_seconds;

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            issuer: issuer.to_string(),
            audience: audience.to_string(),
            access_ttl_seconds,
            verify_ttl_seconds,
        }
    }

    pub fn issue(
        &self,
        user_id: Uuid,
        email: &str,
        role: &str,
        purpose: TokenPurpose,
    ) -> Result<IssuedToken, TokenError> {
        let ttl = match purpose {
            TokenPurpose::Access => self.access_ttl_seconds,
            TokenPurpose::Verify => self.verify_ttl_seconds,
        };
        let now = chrono::Utc::now().timestamp();
        let exp = now + ttl as i64;

        let claims = TokenClaims {
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            sub: user_id.to_string(),
            email: email.to_string(),
            role: role.to_string(),
            purpose,
            iat: now,
            exp,
            jti: Uuid::new_v4().to_string(),
        };

        Ok(IssuedToken {
            token: self.sign(&claims)?,
            expires_at: exp,
        })
    }

    /// Seconds past `exp` during which `verify` still accepts a token.
    pub fn leeway_seconds(&self) -> u64 {
        self.validation.leeway
    }

    /// Verify signature, `iss`/`aud`/`exp`, then the claims this API relies on.
    pub fn verify(&self, token: &str, purpose: TokenPurpose) -> Result<VerifiedToken, TokenError> {
        let data =
            jsonwebtoken::decode::<TokenClaims>(token, &self.decoding_key, &self.validation)?;
        let claims = data.claims;

        if claims.sub.trim().is_empty() {
            return Err(TokenError::EmptyClaim("sub"));
        }
        if claims.email.trim().is_empty() {
            return Err(TokenError::EmptyClaim("email"));
        }
        if claims.purpose != purpose {
            return Err(TokenError::WrongPurpose);
        }

        let user_id = Uuid::parse_str(&claims.sub).map_err(|_| TokenError::InvalidSubUuid)?;

        Ok(VerifiedToken {
            user_id,
            email: claims.email,
            role: Role::parse(&claims.role),
            expires_at: claims.exp,
        })
    }

    fn sign(&self, claims: &TokenClaims) -> Result<String, TokenError> {
        let mut header = Header::new(Algorithm::HS256);
        header.typ = Some("JWT".to_string());
        Ok(jsonwebtoken::encode(&header, claims, &self.encoding_key)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"0123456789abcdef0123456789abcdef";

    fn service() -> TokenService {
        TokenService::new(SECRET, "barefoot-nomad", "barefoot-nomad-api", 3600, 600, 0)
    }

    #[test]
    fn issued_access_token_verifies() {
        let svc = service();
        let user_id = Uuid::new_v4();
        let issued = svc
            .issue(user_id, "jane@example.com", "TRAVEL_ADMIN", TokenPurpose::Access)
            .unwrap();

        let verified = svc.verify(&issued.token, TokenPurpose::Access).unwrap();
        assert_eq!(verified.user_id, user_id);
        assert_eq!(verified.email, "jane@example.com");
        assert_eq!(verified.role, Some(Role::TravelAdmin));
        assert_eq!(verified.expires_at, issued.expires_at);
    }

    #[test]
    fn unknown_role_survives_decoding_as_none() {
        let svc = service();
        let issued = svc
            .issue(Uuid::new_v4(), "x@example.com", "GALACTIC_EMPEROR", TokenPurpose::Access)
            .unwrap();

        let verified = svc.verify(&issued.token, TokenPurpose::Access).unwrap();
        assert_eq!(verified.role, None);
    }

    #[test]
    fn purpose_is_enforced() {
        let svc = service();
        let issued = svc
            .issue(Uuid::new_v4(), "x@example.com", "REQUESTER", TokenPurpose::Verify)
            .unwrap();

        assert!(matches!(
            svc.verify(&issued.token, TokenPurpose::Access),
            Err(TokenError::WrongPurpose)
        ));
        assert!(svc.verify(&issued.token, TokenPurpose::Verify).is_ok());
    }

    #[test]
    fn token_signed_with_another_secret_is_rejected() {
        let other = TokenService::new(
            b"ffffffffffffffffffffffffffffffff",
            "barefoot-nomad",
            "barefoot-nomad-api",
            3600,
            600,
            0,
        );
        let issued = other
            .issue(Uuid::new_v4(), "x@example.com", "REQUESTER", TokenPurpose::Access)
            .unwrap();

        assert!(matches!(
            service().verify(&issued.token, TokenPurpose::Access),
            Err(TokenError::Jwt(_))
        ));
    }

    #[test]
    fn expired_token_is_rejected() {
        let svc = service();
        let now = chrono::Utc::now().timestamp();
        let claims = TokenClaims {
            iss: "barefoot-nomad".into(),
            aud: "barefoot-nomad-api".into(),
            sub: Uuid::new_v4().to_string(),
            email: "x@example.com".into(),
            role: "REQUESTER".into(),
            purpose: TokenPurpose::Access,
            iat: now - 7200,
            exp: now - 3600,
            jti: Uuid::new_v4().to_string(),
        };
        let token = svc.sign(&claims).unwrap();

        assert!(matches!(
            svc.verify(&token, TokenPurpose::Access),
            Err(TokenError::Jwt(_))
        ));
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(service().verify("not.a.jwt", TokenPurpose::Access).is_err());
    }
}
