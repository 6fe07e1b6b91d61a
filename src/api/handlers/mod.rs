//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod general_settings;
pub mod health;
pub mod regex_settings;
pub mod test_url;

pub use general_settings::{get_general_settings_handler, update_general_settings_handler};
pub use health::health_handler;
pub use regex_settings::{get_regex_settings_handler, update_regex_settings_handler};
pub use test_url::{test_rewrite_handler, test_url_handler};
