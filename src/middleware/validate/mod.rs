//! Schema validation gate.
//!
//! Checks body and path parameters against a route's `Schema` before anything touches
//! storage. The first violation, in declared field order, is reported.
mod rules;
mod schema;

pub use rules::{Inputs, validate_request};
pub use schema::{FieldKind, FieldRule, Location, Schema};

use serde_json::{Map, Value};

use crate::error::AppError;
use crate::messages;
use crate::middleware::pipeline::{Gate, RequestCtx};

pub fn validate(schema: &'static Schema) -> Gate {
    Gate::Validate(schema)
}

pub(crate) async fn check(schema: &Schema, ctx: &mut RequestCtx) -> Result<(), AppError> {
    let body = if schema.reads_body() {
        Some(parse_body(ctx)?)
    } else {
        None
    };
    let path = if schema.reads(Location::Path) {
        Some(string_map(ctx.path_params().await.unwrap_or_default()))
    } else {
        None
    };

    let inputs = Inputs {
        body: body.as_ref(),
        path: path.as_ref(),
    };

    validate_request(schema, &inputs).map_err(|message| {
        tracing::debug!(schema = schema.name, %message, "validation failed");
        AppError::Validation(message)
    })
}

fn parse_body(ctx: &RequestCtx) -> Result<Map<String, Value>, AppError> {
    let bytes = ctx
        .body()
        .ok_or_else(|| AppError::validation(messages::INVALID_BODY))?;
    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Object(map)) => Ok(map),
        _ => Err(AppError::validation(messages::INVALID_BODY)),
    }
}

fn string_map(raw: std::collections::HashMap<String, String>) -> Map<String, Value> {
    raw.into_iter().map(|(k, v)| (k, Value::String(v))).collect()
}
