//! # tf-probe
//!
//! The probe-side data model consumed by the title engine.
//!
//! A prober turns a media file into a [`MediaInfo`]: the container-level
//! title plus the ordered list of [`StreamRecord`]s. This crate defines those
//! types and the [`Prober`] trait; concrete probers live in `tf-av`.

pub mod prober;
pub mod types;

// Re-export key types at crate root for convenience.
pub use prober::{has_extension, Prober};
pub use types::{MediaInfo, StreamRecord};
