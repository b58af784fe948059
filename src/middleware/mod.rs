/*
 * Responsibility
 * - middleware の公開インターフェース (re-export)
 * - 外側: cors / http / security_headers (Router 全体)
 * - 内側: route 単位の gate pipeline (auth / validate / exists)
 */
pub mod auth;
pub mod cors;
pub mod exists;
pub mod http;
pub mod pipeline;
pub mod security_headers;
pub mod validate;

pub use pipeline::{Pipeline, PipelineError};
