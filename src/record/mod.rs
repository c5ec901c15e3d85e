//! Record Module
//!
//! The student record and the in-memory collection that holds them.
//!
//! ## Responsibilities
//! - Define the persisted shape of a single student
//! - Parse raw console text into typed fields
//! - Resolve blank-means-keep update overrides before any mutation
//!
//! ## Data Structure Choice
//! `RecordCollection` is a vector of `(id, record)` pairs:
//! - Insertion order is the display and persistence order
//! - Collections are small, so lookups are linear scans
//! - Serde drives it directly, so document order survives a round-trip

mod collection;

pub use collection::RecordCollection;

use serde::{Deserialize, Serialize};

use crate::error::{Result, RosterError};

/// A single student as stored in the backing file
///
/// `age` is an `i64`. A document holding an age outside that range does not
/// parse, so the whole file loads as corrupt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StudentRecord {
    pub name: String,
    pub age: i64,
    pub grade: String,
}

impl StudentRecord {
    pub fn new(name: impl Into<String>, age: i64, grade: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            age,
            grade: grade.into(),
        }
    }

    /// Build a record from console input, validating the age first
    pub fn from_input(name: &str, age_text: &str, grade: &str) -> Result<Self> {
        let age = parse_age(age_text)?;
        Ok(Self::new(name, age, grade))
    }
}

/// Per-field overrides for an update
///
/// `None` keeps the current value of that field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordUpdate {
    pub name: Option<String>,
    pub age: Option<i64>,
    pub grade: Option<String>,
}

impl RecordUpdate {
    /// Resolve raw console input into overrides
    ///
    /// Blank input means "keep". A non-blank age that does not parse fails
    /// the whole update, so nothing is applied.
    pub fn from_input(name: &str, age_text: &str, grade: &str) -> Result<Self> {
        let age = if is_blank(age_text) {
            None
        } else {
            Some(parse_age(age_text)?)
        };

        Ok(Self {
            name: non_blank(name),
            age,
            grade: non_blank(grade),
        })
    }

    /// True when every field keeps its current value
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.age.is_none() && self.grade.is_none()
    }

    /// Build the replacement record from `current` and these overrides
    pub fn apply_to(&self, current: &StudentRecord) -> StudentRecord {
        StudentRecord {
            name: self.name.clone().unwrap_or_else(|| current.name.clone()),
            age: self.age.unwrap_or(current.age),
            grade: self.grade.clone().unwrap_or_else(|| current.grade.clone()),
        }
    }
}

/// Parse an age typed at the console ("  21 " → 21)
pub fn parse_age(text: &str) -> Result<i64> {
    let trimmed = text.trim();
    trimmed
        .parse::<i64>()
        .map_err(|_| RosterError::InvalidAge(trimmed.to_string()))
}

fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

fn non_blank(text: &str) -> Option<String> {
    if is_blank(text) {
        None
    } else {
        Some(text.to_string())
    }
}
