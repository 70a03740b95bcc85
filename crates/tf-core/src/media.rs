//! Media-domain enums shared by the prober and the title engine.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// StreamType
// ---------------------------------------------------------------------------

/// Type of media stream the title engine processes.
///
/// Probers report other codec types too (data, attachment); those have no
/// `StreamType` and are ignored by classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamType {
    Video,
    Audio,
    Subtitle,
}

impl StreamType {
    /// Classify a prober-reported codec type. Case-insensitive.
    pub fn from_codec_type(codec_type: &str) -> Option<Self> {
        match codec_type.trim().to_lowercase().as_str() {
            "video" => Some(Self::Video),
            "audio" => Some(Self::Audio),
            "subtitle" => Some(Self::Subtitle),
            _ => None,
        }
    }

    /// The ffmpeg stream-specifier letter (`v`, `a`, `s`).
    pub fn letter(self) -> char {
        match self {
            Self::Video => 'v',
            Self::Audio => 'a',
            Self::Subtitle => 's',
        }
    }
}

impl fmt::Display for StreamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Video => write!(f, "video"),
            Self::Audio => write!(f, "audio"),
            Self::Subtitle => write!(f, "subtitle"),
        }
    }
}
