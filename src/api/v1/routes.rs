/*
 * Responsibility
 * - v1 の URL 構造と route ごとの gate pipeline を定義
 * - gate の順序違反は Router 構築時 (起動時) に PipelineError で失敗させる
 */
use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::api::v1::handlers::{
    accommodations::{book_accommodation, create_accommodation, like_accommodation},
    health::health,
    root::api_v1_welcome,
    users::{logout, sign_in, sign_up, verify_email},
};
use crate::api::v1::schemas;
use crate::middleware::{
    Pipeline, PipelineError,
    auth::{authorize, check_blacklist, check_token},
    exists::check_accommodation_id,
    validate::validate,
};
use crate::services::auth::Role;
use crate::state::AppState;

/// Roles allowed to list new accommodation.
pub const ACCOMMODATION_MANAGERS: &[Role] =
    &[Role::TravelAdmin, Role::SuperAdmin, Role::AccommodationSupplier];

pub fn routes(state: &AppState) -> Result<Router<AppState>, PipelineError> {
    let router = Router::new()
        .route("/", get(api_v1_welcome))
        .route("/health", get(health))
        // users
        .route(
            "/user/signup",
            Pipeline::new([validate(&schemas::SIGN_UP)])?.wrap(post(sign_up), state),
        )
        .route(
            "/user/signin",
            Pipeline::new([validate(&schemas::SIGN_IN)])?.wrap(post(sign_in), state),
        )
        .route(
            "/user/logout",
            Pipeline::new([check_blacklist()])?.wrap(post(logout), state),
        )
        .route("/user/verify/{token}", get(verify_email))
        // accommodations
        .route(
            "/accommodation",
            Pipeline::new([
                check_token(),
                check_blacklist(),
                authorize(ACCOMMODATION_MANAGERS),
                validate(&schemas::ACCOMMODATION),
            ])?
            .wrap(post(create_accommodation), state),
        )
        .route(
            "/book/accommodation/{accommodationId}",
            Pipeline::new([
                check_token(),
                check_blacklist(),
                validate(&schemas::BOOK_ACCOMMODATION),
            ])?
            .wrap(post(book_accommodation), state),
        )
        .route(
            "/accommodations/{accommodationId}/like",
            Pipeline::new([
                check_token(),
                check_blacklist(),
                validate(&schemas::ACCOMMODATION_ID),
                check_accommodation_id(),
            ])?
            .wrap(patch(like_accommodation), state),
        );

    Ok(router)
}
