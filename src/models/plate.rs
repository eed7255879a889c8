use std::fmt::{self, Display};

/// Longest plate the portal accepts
pub const MAX_PLATE_LEN: usize = 7;

/// A plate number that passed validation
///
/// Always non-empty, upper-cased ASCII letters and digits, at most
/// [`MAX_PLATE_LEN`] characters. Only [`crate::services::validator::validate`]
/// builds one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlateQuery(String);

impl PlateQuery {
    pub(crate) fn from_validated(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for PlateQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PlateQuery {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
