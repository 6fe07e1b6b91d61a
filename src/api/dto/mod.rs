//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization and validator
//! for input validation.

pub mod general_settings;
pub mod health;
pub mod regex_settings;
pub mod test_url;
