/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - repos, token service, blacklist store, mailer
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 * - 起動後は read-only (request 間で共有される mutable state は外部 store のみ)
 */
use std::sync::Arc;

use url::Url;

use crate::repos::{accommodation_repo::AccommodationRepo, user_repo::UserRepo};
use crate::services::{auth::TokenService, blacklist::BlacklistStore, mailer::Mailer};

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepo>,
    pub accommodations: Arc<dyn AccommodationRepo>,
    pub tokens: Arc<TokenService>,
    pub blacklist: Arc<dyn BlacklistStore>,
    pub mailer: Arc<dyn Mailer>,
    pub public_base_url: Url,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("tokens", &self.tokens)
            .field("public_base_url", &self.public_base_url.as_str())
            .finish_non_exhaustive()
    }
}
