//! FFprobe-based [`tf_probe::Prober`] implementation.
//!
//! Shells out to `ffprobe -v quiet -print_format json -show_format -show_streams`
//! and maps the JSON output into [`tf_probe::MediaInfo`].

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tf_probe::{has_extension, MediaInfo, Prober, StreamRecord};

use crate::command::{ToolCommand, DEFAULT_TIMEOUT};

/// A prober backed by the `ffprobe` CLI.
#[derive(Debug, Clone)]
pub struct FfprobeProber {
    /// Path to the ffprobe binary.
    ffprobe_path: PathBuf,
    timeout: Duration,
    /// Lowercase extensions this prober accepts.
    extensions: Vec<String>,
}

impl FfprobeProber {
    /// Create a new prober using the given ffprobe path.
    pub fn new(ffprobe_path: PathBuf, extensions: Vec<String>) -> Self {
        Self {
            ffprobe_path,
            timeout: DEFAULT_TIMEOUT,
            extensions,
        }
    }

    /// Set the per-file ffprobe timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn probe_async(&self, path: &Path) -> tf_core::Result<MediaInfo> {
        let output = ToolCommand::new(self.ffprobe_path.clone())
            .args([
                "-v",
                "quiet",
                "-print_format",
                "json",
                "-show_format",
                "-show_streams",
            ])
            .arg(path.to_string_lossy().as_ref())
            .timeout(self.timeout)
            .execute()
            .await?;

        parse_ffprobe_json(path, &output.stdout)
    }
}

impl Prober for FfprobeProber {
    fn name(&self) -> &'static str {
        "ffprobe"
    }

    fn probe(&self, path: &Path) -> tf_core::Result<MediaInfo> {
        // The Prober trait is sync, but ToolCommand is async.
        let result = match tokio::runtime::Handle::try_current() {
            Ok(handle) => tokio::task::block_in_place(|| handle.block_on(self.probe_async(path))),
            Err(_) => tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .map_err(|e| tf_core::Error::tool("ffprobe", format!("failed to create tokio runtime: {e}")))
                .and_then(|rt| rt.block_on(self.probe_async(path))),
        };

        result.map_err(|e| match e {
            tf_core::Error::ProbeFailed { .. } => e,
            other => tf_core::Error::probe_failed(path, other.to_string()),
        })
    }

    fn supports(&self, path: &Path) -> bool {
        has_extension(path, &self.extensions)
    }
}

// ---------------------------------------------------------------------------
// JSON structures
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    format: Option<FfprobeFormat>,
    #[serde(default)]
    streams: Vec<FfprobeStream>,
}

#[derive(Debug, Deserialize)]
struct FfprobeFormat {
    #[serde(default)]
    tags: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct FfprobeStream {
    index: Option<u32>,
    codec_type: Option<String>,
    #[serde(default)]
    tags: BTreeMap<String, serde_json::Value>,
}

// ---------------------------------------------------------------------------
// Parsing helpers
// ---------------------------------------------------------------------------

/// Map ffprobe's `-print_format json -show_format -show_streams` output.
///
/// Output without a `format` section is not a recognized media container and
/// yields [`tf_core::Error::ProbeFailed`].
pub fn parse_ffprobe_json(path: &Path, json: &str) -> tf_core::Result<MediaInfo> {
    let output: FfprobeOutput = serde_json::from_str(json)
        .map_err(|e| tf_core::Error::probe_failed(path, format!("ffprobe JSON parse error: {e}")))?;

    let format = output
        .format
        .ok_or_else(|| tf_core::Error::probe_failed(path, "not a recognized media container"))?;

    let streams = output
        .streams
        .into_iter()
        .enumerate()
        .map(|(position, stream)| StreamRecord {
            index: stream.index.unwrap_or(position as u32),
            codec_type: stream.codec_type.unwrap_or_default(),
            title: title_tag(&stream.tags),
        })
        .collect();

    Ok(MediaInfo {
        file_path: path.to_path_buf(),
        container_title: title_tag(&format.tags),
        streams,
    })
}

/// Matroska reports `TITLE`, MP4 reports `title`; prefer the exact key.
fn title_tag(tags: &BTreeMap<String, serde_json::Value>) -> Option<String> {
    tags.get("title")
        .or_else(|| {
            tags.iter()
                .find(|(key, _)| key.eq_ignore_ascii_case("title"))
                .map(|(_, value)| value)
        })
        .and_then(|value| value.as_str())
        .map(str::to_string)
}
