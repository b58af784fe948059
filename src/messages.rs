//! User-facing message strings.
//!
//! Loaded once as static data and shared read-only by every request.

pub const WELCOME: &str = "Welcome to Barefoot Nomad";
pub const API_V1_WELCOME: &str = "Welcome to Barefoot Nomad API (version 1)";
pub const NOT_FOUND: &str = "Sorry, we cannot find this endpoint";

pub const EMAIL_EXISTS: &str = "Email address already in use";
pub const PHONE_EXISTS: &str = "Phone number already in use";
pub const ALREADY_EXISTS: &str = "Resource already exists";
pub const USER_NOT_FOUND: &str = "User not found, please check your email address";
pub const USER_NOT_FOUND_ID: &str = "User not found";
pub const INCORRECT_PASSWORD: &str = "Incorrect password";

pub const VALID_EMAIL: &str = "Enter a valid email address";
pub const VALID_NAME: &str = "Name must be alphabet without number";
pub const VALID_PASSWORD: &str = "Minimum of 6 letters, a character and number required";
pub const LOWERCASE: &str = "Room types should be in lower case";
pub const INVALID_BODY: &str = "Request body must be a valid JSON object";
pub const INVALID_ACCOMMODATION_ID: &str = "accommodationId provided is not a valid uuid string";

pub const NO_TOKEN: &str = "Token missing, you need a token to have access";
pub const INVALID_TOKEN: &str = "Token you provided is invalid";
pub const BLACKLISTED: &str = "The token has been blacklisted";
pub const LOGGED_OUT: &str = "Logged out successfully";
pub const EMAIL_VERIFIED: &str = "Email verified successfully";

pub const FORBIDDEN: &str = "You are not authorized to perform this operation";
pub const UNAUTHORIZED: &str = "You do not have authorization";

pub const SERVER_ERROR: &str = "Internal server error";
pub const REQUEST_TIMEOUT: &str = "Request timed out";

pub const NOT_EXIST_ACCOMMODATION: &str = "Accommodation not found";

pub fn invalid_room(room_type: &str) -> String {
    format!("{room_type} not present in accommodation")
}
pub const NOT_ENOUGH_ROOMS: &str = "Requested rooms exceed the rooms available in this accommodation";
