//! # tf-av
//!
//! External tool integration for titleforged.
//!
//! This crate provides:
//!
//! - **Tool discovery** ([`ToolRegistry`]) -- find ffmpeg and ffprobe from
//!   config overrides or `PATH`.
//! - **Command execution** ([`ToolCommand`]) -- async builder with timeout
//!   support for running external processes.
//! - **Probing** ([`FfprobeProber`]) -- implements [`tf_probe::Prober`] by
//!   shelling out to ffprobe and mapping its JSON output.
//! - **Transcoder invocation** ([`TranscodeCommand`]) -- builds the ffmpeg
//!   command line that applies a title plan.

pub mod command;
pub mod ffmpeg;
pub mod probe;
pub mod tools;

// ---- Re-exports for convenience ----

pub use command::{ToolCommand, ToolOutput};
pub use ffmpeg::{default_output_path, TranscodeCommand};
pub use probe::{parse_ffprobe_json, FfprobeProber};
pub use tools::{ToolInfo, ToolRegistry};
