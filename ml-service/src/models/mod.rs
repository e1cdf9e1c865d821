//! Request and response bodies

pub mod anomaly;
pub mod prediction;
pub mod status;

pub use anomaly::*;
pub use prediction::*;
pub use status::*;

use chrono::{DateTime, NaiveDate};
use validator::ValidationError;

/// Longest accepted description, in characters
pub const MAX_DESCRIPTION_CHARS: u64 = 500;

/// `YYYY-MM-DD` or RFC 3339
pub(crate) fn validate_date(date: &str) -> Result<(), ValidationError> {
    let date = date.trim();
    if NaiveDate::parse_from_str(date, "%Y-%m-%d").is_ok() || DateTime::parse_from_rfc3339(date).is_ok() {
        return Ok(());
    }
    let mut err = ValidationError::new("date");
    err.message = Some("expected YYYY-MM-DD or RFC 3339".into());
    Err(err)
}
