/*
 * Responsibility
 * - GET /health (疎通用, gate なし)
 */
use axum::Json;

use crate::error::Envelope;

pub async fn health() -> Json<Envelope<&'static str>> {
    Json(Envelope::success("ok"))
}
