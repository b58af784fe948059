//! Shared fixtures for router-level tests: the real route table wired to
//! in-memory repositories, cache and mailer.
use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use serde_json::Value;
use tower::ServiceExt;
use url::Url;
use uuid::Uuid;

use crate::app::api_router;
use crate::repos::{
    accommodation_repo::{AccommodationRepo, AccommodationRow, NewAccommodation},
    memory::{MemoryAccommodationRepo, MemoryUserRepo},
    user_repo::{NewUser, UserRepo, UserRow},
};
use crate::services::{
    auth::{Role, TokenPurpose, TokenService, password},
    blacklist::{BlacklistStore, CacheBlacklistStore},
    cache::memory::{MemoryCache, UnavailableCache},
    mailer::recording::RecordingMailer,
};
use crate::state::AppState;

pub const TEST_SECRET: &[u8] = b"test-secret-test-secret-test-secret!";
pub const TEST_PASSWORD: &str = "pa$$w0rd1";

pub fn token_service() -> TokenService {
    TokenService::new(TEST_SECRET, "barefoot-nomad", "barefoot-nomad-api", 3600, 3600, 0)
}

fn memory_blacklist() -> Arc<dyn BlacklistStore> {
    Arc::new(CacheBlacklistStore::new_with_cache(
        Arc::new(MemoryCache::default()),
        "blacklist",
    ))
}

pub struct TestApp {
    pub users: Arc<MemoryUserRepo>,
    pub accommodations: Arc<MemoryAccommodationRepo>,
    pub mailer: Arc<RecordingMailer>,
    pub tokens: Arc<TokenService>,
    pub blacklist: Arc<dyn BlacklistStore>,
    router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_tokens(token_service())
    }

    /// Memory-backed blacklist with a custom token service (short TTLs, leeway).
    pub fn with_tokens(tokens: TokenService) -> Self {
        Self::build(tokens, memory_blacklist())
    }

    pub fn with_unavailable_blacklist() -> Self {
        Self::build(
            token_service(),
            Arc::new(CacheBlacklistStore::new_with_cache(
                Arc::new(UnavailableCache),
                "blacklist",
            )),
        )
    }

    fn build(tokens: TokenService, blacklist: Arc<dyn BlacklistStore>) -> Self {
        let users = Arc::new(MemoryUserRepo::default());
        let accommodations = Arc::new(MemoryAccommodationRepo::default());
        let mailer = Arc::new(RecordingMailer::default());
        let tokens = Arc::new(tokens);

        let state = AppState {
            users: users.clone(),
            accommodations: accommodations.clone(),
            tokens: tokens.clone(),
            blacklist: blacklist.clone(),
            mailer: mailer.clone(),
            public_base_url: Url::parse("http://localhost:3000/").unwrap(),
        };
        let router = api_router(state).expect("route table");

        Self {
            users,
            accommodations,
            mailer,
            tokens,
            blacklist,
            router,
        }
    }

    /// Access token for a user that only exists inside the token.
    pub fn token_for(&self, role: Role) -> String {
        self.token_with_role(role.as_str())
    }

    pub fn token_with_role(&self, role: &str) -> String {
        self.tokens
            .issue(Uuid::new_v4(), "someone@example.com", role, TokenPurpose::Access)
            .unwrap()
            .token
    }

    pub async fn revoke(&self, token: &str) {
        self.blacklist.revoke(token, 3600).await.unwrap();
    }

    /// Stored user (password `TEST_PASSWORD`) plus an access token for it.
    pub async fn seed_user(&self, role: Role) -> (UserRow, String) {
        let n = Uuid::new_v4().as_u128() % 1_000_000_000;
        let user = self
            .users
            .create(NewUser {
                first_name: "Test".to_string(),
                last_name: "Traveller".to_string(),
                email: format!("user{n}@example.com"),
                phone_no: Some(format!("+250{n:09}")),
                password_hash: password::hash(TEST_PASSWORD.to_string()).await.unwrap(),
                role,
            })
            .await
            .unwrap();
        let token = self
            .tokens
            .issue(user.id, &user.email, &user.role, TokenPurpose::Access)
            .unwrap()
            .token;
        (user, token)
    }

    pub async fn seed_accommodation(&self) -> AccommodationRow {
        self.accommodations
            .create(NewAccommodation {
                owner_id: Uuid::new_v4(),
                country: "Rwanda".to_string(),
                city: "Kigali".to_string(),
                address: "KN 3 Rd".to_string(),
                accommodation: "Hill View".to_string(),
                accommodation_type: "hotel".to_string(),
                room_type: vec!["single".to_string(), "double".to_string()],
                num_of_rooms: 10,
                description: None,
                facilities: vec!["wifi".to_string()],
            })
            .await
            .unwrap()
    }

    pub async fn send(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let body = match body {
            Some(json) => Body::from(json.to_string()),
            None => Body::empty(),
        };
        self.dispatch(method, path, token, body).await
    }

    pub async fn send_raw(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        raw: impl Into<Body>,
    ) -> (StatusCode, Value) {
        self.dispatch(method, path, token, raw.into()).await
    }

    async fn dispatch(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Body,
    ) -> (StatusCode, Value) {
        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            req = req.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let res = self
            .router
            .clone()
            .oneshot(req.body(body).unwrap())
            .await
            .unwrap();
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }
}
