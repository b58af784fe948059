pub mod password;
pub mod roles;
pub mod token_service;

pub use roles::Role;
pub use token_service::{TokenPurpose, TokenService};
