use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// Outcome of one plate query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Available,
    Unavailable,
    Unknown,
    Error,
    Invalid,
}

impl Status {
    pub const ALL: [Status; 5] = [
        Status::Available,
        Status::Unavailable,
        Status::Unknown,
        Status::Error,
        Status::Invalid,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Available => "available",
            Status::Unavailable => "unavailable",
            Status::Unknown => "unknown",
            Status::Error => "error",
            Status::Invalid => "invalid",
        }
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the result text says about a plate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    Available,
    Unavailable,
    Unknown,
}

impl From<Availability> for Status {
    fn from(value: Availability) -> Self {
        match value {
            Availability::Available => Status::Available,
            Availability::Unavailable => Status::Unavailable,
            Availability::Unknown => Status::Unknown,
        }
    }
}

/// One row of the result set, immutable after creation
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    plate_number: String,
    status: Status,
    message: String,
    timestamp: DateTime<Local>,
}

impl SearchResult {
    pub fn new(plate_number: impl Into<String>, status: Status, message: impl Into<String>) -> Self {
        Self {
            plate_number: plate_number.into(),
            status,
            message: message.into(),
            timestamp: Local::now(),
        }
    }

    pub fn error(plate_number: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(plate_number, Status::Error, message)
    }

    pub fn invalid(plate_number: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(plate_number, Status::Invalid, message)
    }

    pub fn plate_number(&self) -> &str {
        &self.plate_number
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }
}

/// Results in query order
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    results: Vec<SearchResult>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, result: SearchResult) {
        self.results.push(result);
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SearchResult> {
        self.results.iter()
    }

    pub fn get(&self, index: usize) -> Option<&SearchResult> {
        self.results.get(index)
    }

    pub fn count(&self, status: Status) -> usize {
        self.results.iter().filter(|r| r.status == status).count()
    }

    pub fn available_plates(&self) -> impl Iterator<Item = &str> {
        self.results
            .iter()
            .filter(|r| r.status == Status::Available)
            .map(|r| r.plate_number.as_str())
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a SearchResult;
    type IntoIter = std::slice::Iter<'a, SearchResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}

impl FromIterator<SearchResult> for ResultSet {
    fn from_iter<I: IntoIterator<Item = SearchResult>>(iter: I) -> Self {
        Self {
            results: iter.into_iter().collect(),
        }
    }
}
