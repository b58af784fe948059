/*
 * Responsibility
 * - 認証/認可系 gate
 *   - token: Bearer 検証 → Identity を extensions へ
 *   - blacklist: revoke 済み credential の拒否
 *   - authorize: role gate
 */
pub mod authorize;
pub mod blacklist;
pub mod token;

pub use authorize::authorize;
pub use blacklist::check_blacklist;
pub use token::check_token;
