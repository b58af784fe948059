//! Resource existence gate.
//!
//! Runs last in a pipeline: the id in the path is already known to be well
//! formed (or is rejected here with 400), and the loaded row is handed to the
//! handler through the request extensions (`Loaded<T>`).
use crate::api::v1::extractors::resource_id::AccommodationId;
use crate::error::AppError;
use crate::messages;
use crate::middleware::pipeline::{Gate, RequestCtx};
use crate::state::AppState;

/// Resource kinds the existence gate knows how to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Accommodation,
}

pub fn check_accommodation_id() -> Gate {
    Gate::CheckExists(Resource::Accommodation)
}

pub(crate) async fn check(
    resource: Resource,
    state: &AppState,
    ctx: &mut RequestCtx,
) -> Result<(), AppError> {
    match resource {
        Resource::Accommodation => {
            let id = AccommodationId::from_parts(ctx.parts_mut()).await?.id;

            let row = state.accommodations.find_by_id(id).await?.ok_or_else(|| {
                tracing::debug!(accommodation_id = %id, "accommodation not found");
                AppError::NotFound(messages::NOT_EXIST_ACCOMMODATION)
            })?;

            ctx.extensions_mut().insert(row);
            Ok(())
        }
    }
}
