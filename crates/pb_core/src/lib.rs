pub mod config;
pub mod error;
pub mod formatting;
pub mod logging;
pub mod organization;
pub mod persistence;

pub use config::ExportConfig;
pub use error::{ErrorCategory, ExportError};
pub use formatting::{format_address, format_phone, format_postal_code, is_valid_postal_code};
pub use organization::{ContactDetail, ContactDetailList, Organization, Source};
pub use persistence::Database;
