/*
 * Responsibility
 * - request / response DTO (camelCase で外部に出す)
 * - 形式チェックは schema gate が済ませているので DTO は型変換のみ
 */
pub mod accommodations;
pub mod users;
