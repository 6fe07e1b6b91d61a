//! Business logic services for the application layer.

pub mod settings_service;
pub mod url_test_service;

pub use settings_service::SettingsService;
pub use url_test_service::UrlTestService;
