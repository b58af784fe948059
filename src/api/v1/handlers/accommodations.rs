/*
 * Responsibility
 * - accommodation 作成 / 予約 / like toggle
 * - 作成は role gate、like は existence gate 通過後にのみ呼ばれる
 */
use axum::{Json, extract::State, http::StatusCode};

use crate::{
    api::v1::{
        dto::accommodations::{
            AccommodationResponse, BookAccommodationRequest, BookingResponse,
            CreateAccommodationRequest, LikeResponse,
        },
        extractors::{CurrentIdentity, Identity, Loaded, ValidJson, resource_id::AccommodationId},
    },
    error::{AppError, Envelope},
    messages,
    repos::{
        accommodation_repo::{AccommodationRow, NewAccommodation, NewBooking},
        user_repo::UserRow,
    },
    state::AppState,
};

pub async fn create_accommodation(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    ValidJson(req): ValidJson<CreateAccommodationRequest>,
) -> Result<(StatusCode, Json<Envelope<AccommodationResponse>>), AppError> {
    let owner = current_user(&state, &identity).await?;
    let row = state
        .accommodations
        .create(NewAccommodation {
            owner_id: owner.id,
            country: req.country.trim().to_string(),
            city: req.city.trim().to_string(),
            address: req.address.trim().to_string(),
            accommodation: req.accommodation.trim().to_string(),
            accommodation_type: req.accommodation_type.trim().to_string(),
            room_type: req.room_type,
            num_of_rooms: req.num_of_rooms,
            description: req.description,
            facilities: req.facilities,
        })
        .await?;
    tracing::info!(accommodation_id = %row.id, owner_id = %row.owner_id, "accommodation created");

    Ok((StatusCode::CREATED, Json(Envelope::success(row.into()))))
}

pub async fn book_accommodation(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    accommodation_id: AccommodationId,
    ValidJson(req): ValidJson<BookAccommodationRequest>,
) -> Result<(StatusCode, Json<Envelope<BookingResponse>>), AppError> {
    let accommodation = state
        .accommodations
        .find_by_id(accommodation_id.id)
        .await?
        .ok_or(AppError::NotFound(messages::NOT_EXIST_ACCOMMODATION))?;

    check_rooms(&accommodation, &req)?;

    let user = current_user(&state, &identity).await?;

    let booking = state
        .accommodations
        .create_booking(NewBooking {
            user_id: user.id,
            accommodation_id: accommodation.id,
            full_name: user.full_name(),
            trip_request_id: req.trip_request_id,
            type_of_room: req.type_of_room,
            num_of_rooms: req.num_of_rooms,
            check_in: req.check_in,
            check_out: req.check_out,
            adults: req.adults,
            children: req.children,
        })
        .await?;
    tracing::info!(booking_id = %booking.id, accommodation_id = %accommodation.id, "accommodation booked");

    Ok((StatusCode::CREATED, Json(Envelope::success(booking.into()))))
}

pub async fn like_accommodation(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    Loaded(accommodation): Loaded<AccommodationRow>,
) -> Result<Json<Envelope<LikeResponse>>, AppError> {
    let user = current_user(&state, &identity).await?;
    let like = state
        .accommodations
        .toggle_like(user.id, accommodation.id)
        .await?;

    Ok(Json(Envelope::success(like.into())))
}

// token は有効でも user 行が消えている場合がある (FK 違反の 500 にしない)
async fn current_user(state: &AppState, identity: &Identity) -> Result<UserRow, AppError> {
    state
        .users
        .find_by_id(identity.user_id)
        .await?
        .ok_or_else(|| {
            tracing::debug!(user_id = %identity.user_id, "token subject no longer exists");
            AppError::NotFound(messages::USER_NOT_FOUND_ID)
        })
}

fn check_rooms(
    accommodation: &AccommodationRow,
    req: &BookAccommodationRequest,
) -> Result<(), AppError> {
    if let Some(room) = req
        .type_of_room
        .iter()
        .find(|room| !accommodation.room_type.contains(room))
    {
        return Err(AppError::validation(messages::invalid_room(room)));
    }
    if req.num_of_rooms > accommodation.num_of_rooms {
        return Err(AppError::validation(messages::NOT_ENOUGH_ROOMS));
    }
    Ok(())
}
