//! Shared utility functions

pub mod duration;
pub mod validation;
