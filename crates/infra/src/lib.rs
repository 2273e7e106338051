//! # Miqat Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - The fixed prayer schedule provider (fallback schedule source)
//! - The day-cycle ticker driving periodic clock evaluation
//! - Configuration loading from environment variables and files
//!
//! ## Architecture
//! - Implements traits defined in `miqat-core`
//! - Depends on `miqat-domain` and `miqat-core`
//! - Contains all "impure" code (wall clock, timers, env, files)

pub mod clock;
pub mod config;
pub mod schedule;

// Re-export commonly used items
pub use clock::DayCycleTicker;
pub use schedule::FixedScheduleProvider;
