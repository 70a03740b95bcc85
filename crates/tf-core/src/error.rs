//! Unified error type for titleforged.
//!
//! All crates funnel their failures into [`Error`]. Only the CLI surface
//! treats these as fatal; inside the title engine every variant is recovered
//! locally (empty rule set, skipped rule, skipped file).

use std::path::PathBuf;

/// Unified error type covering all failure modes in titleforged.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The title rule configuration is not valid JSON or not the expected shape.
    #[error("Invalid rule configuration: {0}")]
    ConfigInvalid(String),

    /// The prober could not read the file.
    #[error("Probe failed for {}: {message}", path.display())]
    ProbeFailed {
        /// The file that was probed.
        path: PathBuf,
        /// Human-readable error description.
        message: String,
    },

    /// A single title rule could not be compiled or applied.
    #[error("Rule pattern {pattern:?} is invalid: {message}")]
    RuleApplication {
        /// The offending pattern, as configured.
        pattern: String,
        /// Human-readable error description.
        message: String,
    },

    /// An external tool (ffmpeg, ffprobe) returned an error.
    #[error("Tool error [{tool}]: {message}")]
    Tool {
        /// Name of the tool that failed.
        tool: String,
        /// Human-readable error description.
        message: String,
    },

    /// An I/O operation failed.
    #[error("IO error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Configuration or input failed validation.
    #[error("Validation error: {0}")]
    Validation(String),
}

impl Error {
    /// Convenience constructor for [`Error::ProbeFailed`].
    pub fn probe_failed(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Error::ProbeFailed {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Convenience constructor for [`Error::RuleApplication`].
    pub fn rule_application(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Error::RuleApplication {
            pattern: pattern.into(),
            message: message.into(),
        }
    }

    /// Convenience constructor for [`Error::Tool`].
    pub fn tool(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Tool {
            tool: tool.into(),
            message: message.into(),
        }
    }

    /// Whether the title engine recovers from this error on its own.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::ConfigInvalid(_) | Error::ProbeFailed { .. } | Error::RuleApplication { .. }
        )
    }
}

/// Result alias using the crate-level [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
