//! Prayer schedule sources

pub mod fixed;

pub use fixed::FixedScheduleProvider;
