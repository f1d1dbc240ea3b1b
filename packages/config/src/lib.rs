// ABOUTME: Configuration constants shared across Pulse packages
// ABOUTME: Environment variable names and their default values

pub mod constants;

pub use constants::*;
