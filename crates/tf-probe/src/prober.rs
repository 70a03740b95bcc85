//! The [`Prober`] trait defining the interface for media file probing.

use std::path::Path;

use crate::types::MediaInfo;

/// A media file prober capable of extracting stream metadata.
///
/// Implementations must be safe to share across threads (`Send + Sync`) so a
/// single prober can serve parallel file evaluations.
pub trait Prober: Send + Sync {
    /// Human-readable name identifying this prober implementation.
    fn name(&self) -> &'static str;

    /// Probe a media file at the given path and extract metadata.
    ///
    /// Returns [`tf_core::Error::ProbeFailed`] if the file cannot be read or
    /// is not a recognized media container.
    fn probe(&self, path: &Path) -> tf_core::Result<MediaInfo>;

    /// Check whether this prober supports the given file path.
    ///
    /// A return value of `true` does not guarantee that [`Prober::probe`]
    /// will succeed.
    fn supports(&self, path: &Path) -> bool;
}

/// Whether `path` has one of `extensions` (lowercase, without the dot).
pub fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .is_some_and(|ext| extensions.iter().any(|allowed| *allowed == ext))
}
