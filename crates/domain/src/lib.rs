//! # Miqat Domain
//!
//! Business domain types and models for Miqat.
//!
//! This crate contains:
//! - Domain data types (PrayerTimes, TimeBlock, Task, etc.)
//! - Domain error types and Result definitions
//! - Configuration structures
//! - Domain constants and localization tables
//!
//! ## Architecture
//! - No dependencies on other Miqat crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod l10n;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use l10n::Language;
pub use types::*;
