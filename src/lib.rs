//! # Roster
//!
//! An interactive student record manager with:
//! - One JSON document as the whole database
//! - Full rewrite (atomic by default) after every mutation
//! - Explicit handling of missing vs. corrupt data files
//! - A numbered console menu for add/view/search/update/delete
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       Session                               │
//! │              (menu loop over stdin/stdout)                  │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ &mut
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                     RecordStore                             │
//! │        (validate → stage → save → commit)                   │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌──────────────────┐     ┌─────────────────┐
//!   │ RecordCollection │     │ JsonFileStorage │
//!   │ (insertion order)│     │ (students.json) │
//!   └──────────────────┘     └─────────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod record;
pub mod storage;
pub mod command;
pub mod store;
pub mod session;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{RosterError, Result};
pub use config::Config;
pub use record::{RecordCollection, RecordUpdate, StudentRecord};
pub use store::{DeleteOutcome, RecordStore};
pub use session::Session;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of Roster
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
