/*
 * Responsibility
 * - accommodation / booking / like の request/response DTO
 */
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::repos::accommodation_repo::{AccommodationRow, BookingRow, LikeRow};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccommodationRequest {
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

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccommodationResponse {
    pub id: Uuid,
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
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<AccommodationRow> for AccommodationResponse {
    fn from(a: AccommodationRow) -> Self {
        Self {
            id: a.id,
            owner_id: a.owner_id,
            country: a.country,
            city: a.city,
            address: a.address,
            accommodation: a.accommodation,
            accommodation_type: a.accommodation_type,
            room_type: a.room_type,
            num_of_rooms: a.num_of_rooms,
            description: a.description,
            facilities: a.facilities,
            created_at: a.created_at,
            updated_at: a.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookAccommodationRequest {
    pub trip_request_id: Option<Uuid>,
    pub type_of_room: Vec<String>,
    pub num_of_rooms: i32,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub adults: i32,
    #[serde(default)]
    pub children: i32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub id: Uuid,
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
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<BookingRow> for BookingResponse {
    fn from(b: BookingRow) -> Self {
        Self {
            id: b.id,
            user_id: b.user_id,
            accommodation_id: b.accommodation_id,
            full_name: b.full_name,
            trip_request_id: b.trip_request_id,
            type_of_room: b.type_of_room,
            num_of_rooms: b.num_of_rooms,
            check_in: b.check_in,
            check_out: b.check_out,
            adults: b.adults,
            children: b.children,
            created_at: b.created_at,
            updated_at: b.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeResponse {
    pub id: Uuid,
    pub accommodation_id: Uuid,
    pub liked: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<LikeRow> for LikeResponse {
    fn from(l: LikeRow) -> Self {
        Self {
            id: l.id,
            accommodation_id: l.accommodation_id,
            liked: l.liked,
            created_at: l.created_at,
            updated_at: l.updated_at,
        }
    }
}
