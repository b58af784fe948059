/*
 * Responsibility
 * - accommodations / bookings / accommodation_likes 向け SQLx 操作
 * - like は (userId, accommodationId) 単位の toggle (upsert 1 文で原子的に反転)
 */
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::repos::error::RepoError;

#[derive(Debug, Clone, FromRow)]
pub struct AccommodationRow {
    #[sqlx(rename = "accommodationId")]
    pub id: Uuid,
    #[sqlx(rename = "ownerId")]
    pub owner_id: Uuid,
    pub country: String,
    pub city: String,
    pub address: String,
    pub accommodation: String,
    #[sqlx(rename = "accommodationType")]
    pub accommodation_type: String,
    #[sqlx(rename = "roomType")]
    pub room_type: Vec<String>,
    #[sqlx(rename = "numOfRooms")]
    pub num_of_rooms: i32,
    pub description: Option<String>,
    pub facilities: Vec<String>,
    #[sqlx(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[sqlx(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewAccommodation {
    pub owner_id: Uuid,
    pub country: String,
    pub city: String,
    pub address: String,
    pub accommodation: String,
    pub accommodation_type: String,
    pub room_type: Vec<String>,
    pub num_of_rooms: i32,
    pub description: Option<String>,
    pub facilities: Vec<String>,
}

#[derive(Debug, Clone, FromRow)]
pub struct BookingRow {
    #[sqlx(rename = "bookingId")]
    pub id: Uuid,
    #[sqlx(rename = "userId")]
    pub user_id: Uuid,
    #[sqlx(rename = "accommodationId")]
    pub accommodation_id: Uuid,
    #[sqlx(rename = "fullName")]
    pub full_name: String,
    #[sqlx(rename = "tripRequestId")]
    pub trip_request_id: Option<Uuid>,
    #[sqlx(rename = "typeOfRoom")]
    pub type_of_room: Vec<String>,
    #[sqlx(rename = "numOfRooms")]
    pub num_of_rooms: i32,
    #[sqlx(rename = "checkIn")]
    pub check_in: NaiveDate,
    #[sqlx(rename = "checkOut")]
    pub check_out: NaiveDate,
    pub adults: i32,
    pub children: i32,
    #[sqlx(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[sqlx(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewBooking {
    pub user_id: Uuid,
    pub accommodation_id: Uuid,
    pub full_name: String,
    pub trip_request_id: Option<Uuid>,
    pub type_of_room: Vec<String>,
    pub num_of_rooms: i32,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub adults: i32,
    pub children: i32,
}

#[derive(Debug, Clone, FromRow)]
pub struct LikeRow {
    #[sqlx(rename = "likeId")]
    pub id: Uuid,
    #[sqlx(rename = "userId")]
    pub user_id: Uuid,
    #[sqlx(rename = "accommodationId")]
    pub accommodation_id: Uuid,
    pub liked: bool,
    #[sqlx(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[sqlx(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

#[async_trait]
pub trait AccommodationRepo: Send + Sync {
    async fn create(&self, accommodation: NewAccommodation) -> Result<AccommodationRow, RepoError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<AccommodationRow>, RepoError>;
    async fn create_booking(&self, booking: NewBooking) -> Result<BookingRow, RepoError>;
    // First call creates a liked row; every further call flips it.
    async fn toggle_like(&self, user_id: Uuid, accommodation_id: Uuid)
    -> Result<LikeRow, RepoError>;
}

#[derive(Clone, Debug)]
pub struct PgAccommodationRepo {
    pool: PgPool,
}

impl PgAccommodationRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccommodationRepo for PgAccommodationRepo {
    async fn create(&self, a: NewAccommodation) -> Result<AccommodationRow, RepoError> {
        let row = sqlx::query_as::<_, AccommodationRow>(
            r#"
            INSERT INTO accommodations (
                "ownerId", country, city, address, accommodation, "accommodationType",
                "roomType", "numOfRooms", description, facilities
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING
                "accommodationId", "ownerId", country, city, address, accommodation,
                "accommodationType", "roomType", "numOfRooms", description, facilities,
                "createdAt", "updatedAt"
            "#,
        )
        .bind(a.owner_id)
        .bind(&a.country)
        .bind(&a.city)
        .bind(&a.address)
        .bind(&a.accommodation)
        .bind(&a.accommodation_type)
        .bind(&a.room_type)
        .bind(a.num_of_rooms)
        .bind(a.description.as_deref())
        .bind(&a.facilities)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<AccommodationRow>, RepoError> {
        let row = sqlx::query_as::<_, AccommodationRow>(
            r#"
            SELECT
                "accommodationId", "ownerId", country, city, address, accommodation,
                "accommodationType", "roomType", "numOfRooms", description, facilities,
                "createdAt", "updatedAt"
            FROM accommodations
            WHERE "accommodationId" = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn create_booking(&self, b: NewBooking) -> Result<BookingRow, RepoError> {
        let row = sqlx::query_as::<_, BookingRow>(
            r#"
            INSERT INTO bookings (
                "userId", "accommodationId", "fullName", "tripRequestId", "typeOfRoom",
                "numOfRooms", "checkIn", "checkOut", adults, children
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING
                "bookingId", "userId", "accommodationId", "fullName", "tripRequestId",
                "typeOfRoom", "numOfRooms", "checkIn", "checkOut", adults, children,
                "createdAt", "updatedAt"
            "#,
        )
        .bind(b.user_id)
        .bind(b.accommodation_id)
        .bind(&b.full_name)
        .bind(b.trip_request_id)
        .bind(&b.type_of_room)
        .bind(b.num_of_rooms)
        .bind(b.check_in)
        .bind(b.check_out)
        .bind(b.adults)
        .bind(b.children)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn toggle_like(
        &self,
        user_id: Uuid,
        accommodation_id: Uuid,
    ) -> Result<LikeRow, RepoError> {
        let row = sqlx::query_as::<_, LikeRow>(
            r#"
            INSERT INTO accommodation_likes ("userId", "accommodationId", liked)
            VALUES ($1, $2, true)
            ON CONFLICT ("userId", "accommodationId") DO UPDATE
            SET liked = NOT accommodation_likes.liked, "updatedAt" = now()
            RETURNING "likeId", "userId", "accommodationId", liked, "createdAt", "updatedAt"
            "#,
        )
        .bind(user_id)
        .bind(accommodation_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }
}
