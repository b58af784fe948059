pub mod cache_store;
pub mod store;

pub use cache_store::CacheBlacklistStore;
pub use store::{BlacklistError, BlacklistStore};
