//! Periodic day-cycle clock

pub mod ticker;

pub use ticker::DayCycleTicker;
