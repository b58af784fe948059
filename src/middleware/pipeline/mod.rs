//! Per-route gate pipeline.
//!
//! Each route declares the ordered gates it needs; one middleware runs them
//! in order and stops at the first failure, so the handler only ever sees
//! requests that passed every gate.
//!
//! Order is checked when the route table is built:
//! token → blacklist → authorize → validate → exists.
//! A route may skip stages, but never reorder or repeat them.
//!
//! ```ignore
//! let pipeline = Pipeline::new([check_token(), check_blacklist(), validate(&BOOK)])?;
//! router.route("/book/{id}", pipeline.wrap(post(book), &state));
//! ```
mod context;

use std::sync::Arc;

use axum::{
    body::{self, Body},
    extract::{Request, State},
    middleware::{self, Next},
    response::Response,
    routing::MethodRouter,
};
use thiserror::Error;

pub use context::RequestCtx;

use crate::error::AppError;
use crate::messages;
use crate::middleware::auth::{authorize, blacklist, token};
use crate::middleware::auth::authorize::RolePolicy;
use crate::middleware::exists::{self, Resource};
use crate::middleware::validate::{self, Schema};
use crate::state::AppState;

/// Upper bound for bodies buffered by the pipeline.
const MAX_BUFFERED_BODY: usize = 1024 * 1024;

/// One stage of a route pipeline.
#[derive(Debug, Clone)]
pub enum Gate {
    CheckToken,
    CheckBlacklist,
    Authorize(RolePolicy),
    Validate(&'static Schema),
    CheckExists(Resource),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Stage {
    Authentication,
    Revocation,
    Authorization,
    Validation,
    Existence,
}

impl Gate {
    pub fn name(&self) -> &'static str {
        match self {
            Gate::CheckToken => "check_token",
            Gate::CheckBlacklist => "check_blacklist",
            Gate::Authorize(_) => "authorize",
            Gate::Validate(_) => "validate",
            Gate::CheckExists(_) => "check_exists",
        }
    }

    fn stage(&self) -> Stage {
        match self {
            Gate::CheckToken => Stage::Authentication,
            Gate::CheckBlacklist => Stage::Revocation,
            Gate::Authorize(_) => Stage::Authorization,
            Gate::Validate(_) => Stage::Validation,
            Gate::CheckExists(_) => Stage::Existence,
        }
    }

    fn needs_body(&self) -> bool {
        matches!(self, Gate::Validate(schema) if schema.reads_body())
    }

    async fn run(&self, state: &AppState, ctx: &mut RequestCtx) -> Result<(), AppError> {
        match self {
            Gate::CheckToken => token::check(state, ctx),
            Gate::CheckBlacklist => blacklist::check(state, ctx).await,
            Gate::Authorize(policy) => authorize::check(policy, ctx),
            Gate::Validate(schema) => validate::check(schema, ctx).await,
            Gate::CheckExists(resource) => exists::check(*resource, state, ctx).await,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PipelineError {
    #[error("pipeline has no gates")]
    Empty,
    #[error("gate `{later}` cannot run after `{earlier}`")]
    OutOfOrder {
        earlier: &'static str,
        later: &'static str,
    },
}

#[derive(Debug, Clone)]
pub struct Pipeline {
    gates: Arc<[Gate]>,
}

impl Pipeline {
    pub fn new(gates: impl IntoIterator<Item = Gate>) -> Result<Self, PipelineError> {
        let gates: Vec<Gate> = gates.into_iter().collect();
        if gates.is_empty() {
            return Err(PipelineError::Empty);
        }

        // strictly increasing stages: no reordering, no repeats
        for pair in gates.windows(2) {
            if pair[0].stage() >= pair[1].stage() {
                return Err(PipelineError::OutOfOrder {
                    earlier: pair[0].name(),
                    later: pair[1].name(),
                });
            }
        }

        Ok(Self {
            gates: gates.into(),
        })
    }

    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    /// Put the pipeline in front of `route`'s handlers.
    ///
    /// Only matched methods pass through it; other methods still get 405.
    pub fn wrap(self, route: MethodRouter<AppState>, state: &AppState) -> MethodRouter<AppState> {
        let names: Vec<&str> = self.gates().iter().map(Gate::name).collect();
        tracing::debug!(gates = ?names, "pipeline bound");

        let bound = BoundPipeline {
            pipeline: self,
            state: state.clone(),
        };
        route.route_layer(middleware::from_fn_with_state(bound, run_pipeline))
    }
}

#[derive(Clone)]
struct BoundPipeline {
    pipeline: Pipeline,
    state: AppState,
}

async fn run_pipeline(
    State(bound): State<BoundPipeline>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (parts, body) = req.into_parts();
    let mut ctx = RequestCtx::new(parts);
    // streamed until the first gate that reads it, so earlier gates decide first
    let mut unread = Some(body);

    for gate in bound.pipeline.gates.iter() {
        if gate.needs_body()
            && let Some(body) = unread.take()
        {
            let bytes = body::to_bytes(body, MAX_BUFFERED_BODY).await.map_err(|_| {
                tracing::debug!(gate = gate.name(), "request body unreadable or too large");
                AppError::validation(messages::INVALID_BODY)
            })?;
            ctx.set_body(bytes);
        }

        if let Err(err) = gate.run(&bound.state, &mut ctx).await {
            tracing::debug!(gate = gate.name(), status = %err.status(), "request halted");
            return Err(err);
        }
    }

    let body = match unread {
        Some(body) => body,
        None => Body::from(ctx.body().cloned().unwrap_or_default()),
    };
    let req = Request::from_parts(ctx.into_parts(), body);
    Ok(next.run(req).await)
}
