//! In-memory repositories used by the HTTP-level tests.
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::repos::{
    accommodation_repo::{
        AccommodationRepo, AccommodationRow, BookingRow, LikeRow, NewAccommodation, NewBooking,
    },
    error::RepoError,
    user_repo::{NewUser, UserRepo, UserRow},
};

#[derive(Default)]
pub struct MemoryUserRepo {
    rows: Mutex<Vec<UserRow>>,
}

impl MemoryUserRepo {
    pub fn get(&self, user_id: Uuid) -> Option<UserRow> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == user_id)
            .cloned()
    }
}

#[async_trait]
impl UserRepo for MemoryUserRepo {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRow>, RepoError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<UserRow>, RepoError> {
        Ok(self.get(user_id))
    }

    async fn phone_exists(&self, phone_no: &str) -> Result<bool, RepoError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .any(|u| u.phone_no.as_deref() == Some(phone_no)))
    }

    async fn create(&self, user: NewUser) -> Result<UserRow, RepoError> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|u| {
            u.email == user.email || (user.phone_no.is_some() && u.phone_no == user.phone_no)
        }) {
            return Err(RepoError::Conflict);
        }
        let row = UserRow {
            id: Uuid::new_v4(),
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            phone_no: user.phone_no,
            password_hash: user.password_hash,
            role: user.role.as_str().to_string(),
            is_verified: false,
            created_at: Utc::now(),
        };
        rows.push(row.clone());
        Ok(row)
    }

    async fn mark_verified(&self, user_id: Uuid) -> Result<bool, RepoError> {
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|u| u.id == user_id) {
            Some(row) => {
                row.is_verified = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[derive(Default)]
pub struct MemoryAccommodationRepo {
    accommodations: Mutex<Vec<AccommodationRow>>,
    bookings: Mutex<Vec<BookingRow>>,
    likes: Mutex<Vec<LikeRow>>,
}

impl MemoryAccommodationRepo {
    pub fn accommodation_count(&self) -> usize {
        self.accommodations.lock().unwrap().len()
    }

    pub fn booking_count(&self) -> usize {
        self.bookings.lock().unwrap().len()
    }

    pub fn like_count(&self) -> usize {
        self.likes.lock().unwrap().len()
    }
}

#[async_trait]
impl AccommodationRepo for MemoryAccommodationRepo {
    async fn create(&self, a: NewAccommodation) -> Result<AccommodationRow, RepoError> {
        let now = Utc::now();
        let row = AccommodationRow {
            id: Uuid::new_v4(),
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
            created_at: now,
            updated_at: now,
        };
        self.accommodations.lock().unwrap().push(row.clone());
        Ok(row)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<AccommodationRow>, RepoError> {
        Ok(self
            .accommodations
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id == id)
            .cloned())
    }

    async fn create_booking(&self, b: NewBooking) -> Result<BookingRow, RepoError> {
        let now = Utc::now();
        let row = BookingRow {
            id: Uuid::new_v4(),
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
            created_at: now,
            updated_at: now,
        };
        self.bookings.lock().unwrap().push(row.clone());
        Ok(row)
    }

    async fn toggle_like(
        &self,
        user_id: Uuid,
        accommodation_id: Uuid,
    ) -> Result<LikeRow, RepoError> {
        let mut likes = self.likes.lock().unwrap();
        let now = Utc::now();
        if let Some(row) = likes
            .iter_mut()
            .find(|l| l.user_id == user_id && l.accommodation_id == accommodation_id)
        {
            row.liked = !row.liked;
            row.updated_at = now;
            return Ok(row.clone());
        }
        let row = LikeRow {
            id: Uuid::new_v4(),
            user_id,
            accommodation_id,
            liked: true,
            created_at: now,
            updated_at: now,
        };
        likes.push(row.clone());
        Ok(row)
    }
}
