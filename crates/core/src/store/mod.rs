//! Application state store

pub mod service;
pub mod state;

pub use service::*;
pub use state::*;
