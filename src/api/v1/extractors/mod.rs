/*
 * Responsibility
 * - handler / gate が共有する extractor 群
 *   - identity: 認証済み主体 (Identity) と提示された credential
 *   - resource_id: path の id を型付きで受ける (不正形式は 400)
 *   - json: envelope 付きで reject する Json
 *   - loaded: existence gate が読み込んだ resource
 */
pub mod identity;
pub mod json;
pub mod loaded;
pub mod resource_id;

pub use identity::{Credential, CurrentCredential, CurrentIdentity, Identity};
pub use json::ValidJson;
pub use loaded::Loaded;
