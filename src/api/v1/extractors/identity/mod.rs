/*!
 * Authenticated identity extractor
 *
 * Responsibility:
 * - gate が request extensions に載せた Identity / Credential を handler に渡す
 * - 型定義は types、axum 依存は core
 */

mod core;
mod types;

pub use self::core::{CurrentCredential, CurrentIdentity};
pub use types::{Credential, Identity};
