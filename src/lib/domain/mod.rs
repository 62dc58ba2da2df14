//! The vocabulary shared by every layer: build targets, flags and errors

pub mod error;
pub mod flags;
pub mod target;
