//! Pinchmouse Common Utilities
//!
//! Shared infrastructure for all Pinchmouse crates:
//! - Error types and result aliases
//! - Filter, motion, gesture and screen configuration with validation
//! - Tuning presets
//! - Frame-rate measurement and session clock
//! - Tracing/logging initialization

pub mod clock;
pub mod config;
pub mod error;
pub mod logging;

pub use clock::*;
pub use config::*;
pub use error::*;
