/*
 * Responsibility
 * - handler / middleware から使うドメイン外のサービス群
 *   - auth: roles, token 発行/検証, password hash
 *   - cache: Valkey/Redis client
 *   - blacklist: revoked credential store
 *   - mailer: verification mail
 */
pub mod auth;
pub mod blacklist;
pub mod cache;
pub mod mailer;
