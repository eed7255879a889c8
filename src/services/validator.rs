//! Plate format checks, run before any browser work

use crate::error::ValidationError;
use crate::models::plate::{PlateQuery, MAX_PLATE_LEN};

/// Validate and normalise a raw plate string
///
/// Rules are applied in order: reject empty input, strip every whitespace
/// character (edges and interior), reject anything longer than
/// [`MAX_PLATE_LEN`], reject non ASCII letters/digits. The result is
/// upper-cased.
pub fn validate(raw: &str) -> Result<PlateQuery, ValidationError> {
    if raw.is_empty() {
        return Err(ValidationError::Empty);
    }

    let stripped: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    if stripped.is_empty() {
        return Err(ValidationError::Empty);
    }

    let len = stripped.chars().count();
    if len > MAX_PLATE_LEN {
        return Err(ValidationError::TooLong { len });
    }

    if let Some(found) = stripped.chars().find(|c| !c.is_ascii_alphanumeric()) {
        return Err(ValidationError::NotAlphanumeric { found });
    }

    Ok(PlateQuery::from_validated(stripped.to_ascii_uppercase()))
}
