//! Storage Module
//!
//! Persistence for the record collection as a single JSON document.
//!
//! ## Responsibilities
//! - Load the whole collection at startup
//! - Tell an absent file apart from a corrupt one
//! - Rewrite the whole document after every mutation
//!
//! ## File Format
//! ```text
//! {
//!     "S1": {
//!         "name": "Ana",
//!         "age": 20,
//!         "grade": "A"
//!     },
//!     ...                (one entry per student, insertion order)
//! }
//! ```

mod json_file;

pub use json_file::{JsonFileStorage, LoadOutcome};
