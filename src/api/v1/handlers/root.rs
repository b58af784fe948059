/*
 * Responsibility
 * - GET / と GET /api/v1 の welcome
 * - 未定義 route の 404 (fallback)
 */
use axum::Json;

use crate::error::{AppError, Envelope};
use crate::messages;

pub async fn welcome() -> Json<Envelope<&'static str>> {
    Json(Envelope::success(messages::WELCOME))
}

pub async fn api_v1_welcome() -> Json<Envelope<&'static str>> {
    Json(Envelope::success(messages::API_V1_WELCOME))
}

pub async fn not_found() -> AppError {
    AppError::NotFound(messages::NOT_FOUND)
}
