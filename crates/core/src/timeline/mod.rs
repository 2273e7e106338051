//! Block status evaluation

pub mod status;

pub use status::*;
