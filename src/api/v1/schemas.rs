/*
 * Responsibility
 * - route ごとの入力 schema (static data)
 * - 解釈は middleware::validate のみ
 */
use crate::messages;
use crate::middleware::validate::{FieldKind, FieldRule, Schema};

const SHORT_TEXT: FieldKind = FieldKind::Text { min: 1, max: 255 };
const LONG_TEXT: FieldKind = FieldKind::Text { min: 1, max: 2000 };
const AT_LEAST_ONE: FieldKind = FieldKind::Integer { min: 1, max: None };
const ROOM_TYPES: FieldKind = FieldKind::TextList {
    min_items: 1,
    lowercase: true,
};

pub static SIGN_UP: Schema = Schema::new(
    "sign_up",
    &[
        FieldRule::body("firstName", FieldKind::Name).with_message(messages::VALID_NAME),
        FieldRule::body("lastName", FieldKind::Name).with_message(messages::VALID_NAME),
        FieldRule::body("email", FieldKind::Email).with_message(messages::VALID_EMAIL),
        FieldRule::body("password", FieldKind::Password).with_message(messages::VALID_PASSWORD),
        FieldRule::body("phoneNo", FieldKind::Phone).optional(),
    ],
);

pub static SIGN_IN: Schema = Schema::new(
    "sign_in",
    &[
        FieldRule::body("email", FieldKind::Email).with_message(messages::VALID_EMAIL),
        FieldRule::body("password", FieldKind::Text { min: 1, max: 128 }),
    ],
);

pub static ACCOMMODATION: Schema = Schema::new(
    "accommodation",
    &[
        FieldRule::body("country", SHORT_TEXT),
        FieldRule::body("city", SHORT_TEXT),
        FieldRule::body("address", SHORT_TEXT),
        FieldRule::body("accommodation", SHORT_TEXT),
        FieldRule::body("accommodationType", SHORT_TEXT),
        FieldRule::body("roomType", ROOM_TYPES).with_message(messages::LOWERCASE),
        FieldRule::body("numOfRooms", AT_LEAST_ONE),
        FieldRule::body("description", LONG_TEXT).optional(),
        FieldRule::body(
            "facilities",
            FieldKind::TextList {
                min_items: 1,
                lowercase: false,
            },
        ),
    ],
);

pub static BOOK_ACCOMMODATION: Schema = Schema::new(
    "book_accommodation",
    &[
        FieldRule::path("accommodationId", FieldKind::Uuid)
            .with_message(messages::INVALID_ACCOMMODATION_ID),
        FieldRule::body("tripRequestId", FieldKind::Uuid).optional(),
        FieldRule::body("typeOfRoom", ROOM_TYPES).with_message(messages::LOWERCASE),
        FieldRule::body("numOfRooms", AT_LEAST_ONE),
        FieldRule::body("checkIn", FieldKind::Date { after: None }),
        FieldRule::body(
            "checkOut",
            FieldKind::Date {
                after: Some("checkIn"),
            },
        ),
        FieldRule::body("adults", AT_LEAST_ONE),
        FieldRule::body("children", FieldKind::Integer { min: 0, max: None }).optional(),
    ],
);

pub static ACCOMMODATION_ID: Schema = Schema::new(
    "accommodation_id",
    &[FieldRule::path("accommodationId", FieldKind::Uuid)
        .with_message(messages::INVALID_ACCOMMODATION_ID)],
);
