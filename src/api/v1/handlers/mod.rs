/*
 * Responsibility
 * - v1 の handler 群
 * - gate を通過した request だけがここに届く (Identity / Loaded は extensions 経由)
 */
pub mod accommodations;
pub mod health;
pub mod root;
pub mod users;
