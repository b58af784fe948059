/*
 * Responsibility
 * - 永続化 (PostgreSQL / sqlx) の窓口
 * - handler からは trait 経由で使う (test では memory 実装に差し替え)
 */
pub mod accommodation_repo;
pub mod error;
#[cfg(test)]
pub mod memory;
pub mod user_repo;
