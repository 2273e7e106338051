//! # Miqat Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Day partitioning over prayer times
//! - Maghrib-to-maghrib day-cycle arithmetic
//! - Block status evaluation against a clock instant
//! - The application state store and its commands
//!
//! ## Architecture Principles
//! - Only depends on `miqat-domain`
//! - No database, HTTP, or platform code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod cycle;
pub mod partition;
pub mod store;
pub mod timeline;

// Infrastructure ports
pub mod schedule_ports;

// Re-export specific items to avoid ambiguity
pub use cycle::{day_label, evaluate, qiyam_time, with_derived_qiyam};
pub use partition::BlockPartitioner;
pub use schedule_ports::PrayerScheduleSource;
pub use store::{reduce, AppState, Command, Store, TaskPatch};
pub use timeline::{active_block, block_status, next_block, remaining_minutes, BlockStatus};
