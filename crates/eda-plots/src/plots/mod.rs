//! Plot builders
//!
//! Chart builders turn dataset columns into figure panels; the plotters
//! combine them into grids and show the results.

// Single-column charts
pub mod histogram;
pub mod count;
pub mod box_plot;
pub mod scatter;

// Grid plotters
pub mod distribution;
pub mod correlation;

// Utilities
pub mod utils;
