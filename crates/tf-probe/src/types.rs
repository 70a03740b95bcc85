//! Core types for media probe results.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tf_core::StreamType;

/// Title-relevant media file information extracted by probing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MediaInfo {
    /// Path to the probed file.
    pub file_path: PathBuf,
    /// Container-level (global) title, if tagged.
    pub container_title: Option<String>,
    /// Streams in prober order.
    pub streams: Vec<StreamRecord>,
}

impl MediaInfo {
    /// The container title, treating an empty tag as absent.
    pub fn global_title(&self) -> Option<&str> {
        self.container_title.as_deref().filter(|t| !t.is_empty())
    }
}

/// One stream as reported by the prober.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamRecord {
    /// Prober-assigned index, unique within the file.
    pub index: u32,
    /// Raw codec type as reported (`video`, `Audio`, `data`, ...).
    pub codec_type: String,
    /// Stream title tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl StreamRecord {
    /// Build a record; an empty title is kept as reported.
    pub fn new(index: u32, codec_type: impl Into<String>, title: Option<&str>) -> Self {
        Self {
            index,
            codec_type: codec_type.into(),
            title: title.map(str::to_string),
        }
    }

    /// The processed stream type, or `None` for data/attachment streams.
    pub fn stream_type(&self) -> Option<StreamType> {
        StreamType::from_codec_type(&self.codec_type)
    }

    /// The title tag, treating an empty tag as absent.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref().filter(|t| !t.is_empty())
    }
}
