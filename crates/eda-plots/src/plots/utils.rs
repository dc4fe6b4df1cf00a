//! Shared helpers for the plot builders

pub mod colors;
pub mod levels;
pub mod stats;
