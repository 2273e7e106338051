//! Maghrib-to-maghrib day cycle

pub mod clock;

pub use clock::*;
