//! Final ffmpeg argument assembly.
//!
//! ffmpeg applies metadata options left to right and the last one written
//! for a stream wins. Deletion overrides therefore precede the per-stream
//! rewrites, which lets an explicit rewrite replace a blanket deletion of the
//! same stream.

use serde::Serialize;
use tf_core::config::AdvancedConfig;
use tf_core::StreamType;

use crate::evaluation::{StreamRewrite, TitlePlan};

/// User-written ffmpeg options, already tokenized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UserOptions {
    /// Placed before every metadata edit (stream-copy and map directives).
    pub main: Vec<String>,
    /// Placed after every metadata edit.
    pub advanced: Vec<String>,
}

impl UserOptions {
    /// Tokenize the advanced-mode options; empty when advanced mode is off.
    pub fn from_config(config: &AdvancedConfig) -> Self {
        Self {
            main: config.main_args(),
            advanced: config.advanced_args(),
        }
    }
}

/// Concatenate a plan into ffmpeg arguments.
///
/// Order: user main options, the global title, the single-stream deletions,
/// each rewrite followed by its disposition, and the user advanced options.
pub fn assemble(plan: &TitlePlan, user: &UserOptions) -> Vec<String> {
    let mut args = user.main.clone();

    if let Some(title) = &plan.global_title {
        args.push("-metadata".to_string());
        args.push(format!("title={title}"));
    }

    for &stream_type in &plan.deletions {
        args.push(stream_metadata_flag(stream_type, 0));
        args.push("title=".to_string());
    }

    for rewrite in &plan.rewrites {
        push_rewrite(&mut args, rewrite);
    }

    args.extend(user.advanced.iter().cloned());
    args
}

fn push_rewrite(args: &mut Vec<String>, rewrite: &StreamRewrite) {
    args.push(stream_metadata_flag(rewrite.stream_type, rewrite.type_index));
    args.push(format!("title={}", rewrite.title));

    if let Some(disposition) = &rewrite.disposition {
        args.push(format!(
            "-disposition:{}:{}",
            rewrite.stream_type.letter(),
            rewrite.type_index
        ));
        args.push(disposition.clone());
    }
}

fn stream_metadata_flag(stream_type: StreamType, index: usize) -> String {
    format!("-metadata:s:{}:{}", stream_type.letter(), index)
}
