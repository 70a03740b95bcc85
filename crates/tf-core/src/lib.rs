//! tf-core: shared types, errors, and configuration.
//!
//! This crate is the foundational dependency for all other tf-* crates,
//! providing the unified error type, the stream-type enum used by the title
//! engine, and the application configuration.

pub mod config;
pub mod error;
pub mod media;

// Re-export the most commonly used items at the crate root.
pub use error::{Error, Result};
pub use media::*;
