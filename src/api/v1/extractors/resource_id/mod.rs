/**
 * Responsibility
 *  - core と types を束ねる
 *  - 外部（handlers, gates）に公開する型・機能を制御する
 */
mod core;
mod types;

pub use self::core::{ResourceId, ResourceTag};
pub use types::*;
