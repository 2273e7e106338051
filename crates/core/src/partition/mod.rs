//! Day partition domain

pub mod builder;

pub use builder::*;
