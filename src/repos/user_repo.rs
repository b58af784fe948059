/*
 * Responsibility
 * - users テーブル向け SQLx 操作
 * - DB エラーは RepoError に変換して返す
 */
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::repos::error::RepoError;
use crate::services::auth::Role;

#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    #[sqlx(rename = "userId")]
    pub id: Uuid,
    #[sqlx(rename = "firstName")]
    pub first_name: String,
    #[sqlx(rename = "lastName")]
    pub last_name: String,
    pub email: String,
    #[sqlx(rename = "phoneNo")]
    pub phone_no: Option<String>,
    #[sqlx(rename = "password")]
    pub password_hash: String,
    pub role: String,
    #[sqlx(rename = "isVerified")]
    pub is_verified: bool,
    #[sqlx(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl UserRow {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_no: Option<String>,
    pub password_hash: String,
    pub role: Role,
}

#[async_trait]
pub trait UserRepo: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRow>, RepoError>;
    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<UserRow>, RepoError>;
    async fn phone_exists(&self, phone_no: &str) -> Result<bool, RepoError>;
    async fn create(&self, user: NewUser) -> Result<UserRow, RepoError>;
    // Returns false when no such user exists.
    async fn mark_verified(&self, user_id: Uuid) -> Result<bool, RepoError>;
}

#[derive(Clone, Debug)]
pub struct PgUserRepo {
    pool: PgPool,
}

impl PgUserRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepo for PgUserRepo {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRow>, RepoError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT "userId", "firstName", "lastName", email, "phoneNo", password, role,
                   "isVerified", "createdAt"
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<UserRow>, RepoError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT "userId", "firstName", "lastName", email, "phoneNo", password, role,
                   "isVerified", "createdAt"
            FROM users
            WHERE "userId" = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn phone_exists(&self, phone_no: &str) -> Result<bool, RepoError> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (SELECT 1 FROM users WHERE "phoneNo" = $1)
            "#,
        )
        .bind(phone_no)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn create(&self, user: NewUser) -> Result<UserRow, RepoError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users ("firstName", "lastName", email, "phoneNo", password, role)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING "userId", "firstName", "lastName", email, "phoneNo", password, role,
                      "isVerified", "createdAt"
            "#,
        )
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(user.phone_no.as_deref())
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .fetch_one(&self.pool)
        .await
        // email/phone の一意制約違反は Conflict
        .map_err(RepoError::from_sqlx)?;

        Ok(row)
    }

    async fn mark_verified(&self, user_id: Uuid) -> Result<bool, RepoError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET "isVerified" = true, "updatedAt" = now()
            WHERE "userId" = $1
            "#,
        )
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
