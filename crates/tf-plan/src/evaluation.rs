//! Per-file title decision.
//!
//! [`evaluate`] walks the classified streams once, then applies the
//! single-stream deletion policy against the final tallies. The three
//! reasons a file may need processing are computed as independent steps and
//! only combined at the end.

use serde::Serialize;
use tf_core::StreamType;
use tf_probe::MediaInfo;
use tf_rules::RuleEngine;

use crate::classifier::{classify, ClassifiedStream, StreamTally};

/// Deletion policy evaluation order.
const DELETION_ORDER: [StreamType; 3] = [StreamType::Subtitle, StreamType::Audio, StreamType::Video];

/// Feature flags for one evaluation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EvaluationOptions {
    /// Propagate a video stream title to an untitled container.
    pub copy_video_to_global: bool,
    /// Blank the title of a stream that is the only one of its type.
    pub delete_singles: bool,
}

/// A stream whose title the rule cascade changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StreamRewrite {
    pub stream_type: StreamType,
    /// Ordinal within the stream type.
    pub type_index: usize,
    /// Prober-assigned stream index.
    pub source_index: u32,
    pub original_title: String,
    pub title: String,
    /// Disposition tokens to apply, if any rule supplied one.
    pub disposition: Option<String>,
}

/// Everything decided about one file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TitlePlan {
    /// Title to copy to the container, if propagation fired.
    pub global_title: Option<String>,
    /// Stream types whose single stream gets its title blanked, in policy
    /// evaluation order.
    pub deletions: Vec<StreamType>,
    /// Rule-engine rewrites in stream encounter order.
    pub rewrites: Vec<StreamRewrite>,
    /// Final per-type tallies.
    pub tally: StreamTally,
}

impl TitlePlan {
    /// Whether any stream title was rewritten by the rule cascade.
    pub fn streams_need_processing(&self) -> bool {
        !self.rewrites.is_empty()
    }

    /// Whether the file needs to be reprocessed at all.
    pub fn needs_processing(&self) -> bool {
        self.streams_need_processing() | self.global_title.is_some() | !self.deletions.is_empty()
    }
}

/// Evaluate one file.
///
/// Every call builds its own tallies and argument state, so a single engine
/// can evaluate many files concurrently.
pub fn evaluate(info: &MediaInfo, engine: &RuleEngine, options: &EvaluationOptions) -> TitlePlan {
    let (streams, tally) = classify(&info.streams);

    let rewrites = rewrite_streams(&streams, engine);
    let global_title = propagate_global_title(info, &streams, options);
    let deletions = single_stream_deletions(&tally, options);

    TitlePlan {
        global_title,
        deletions,
        rewrites,
        tally,
    }
}

fn rewrite_streams(streams: &[ClassifiedStream<'_>], engine: &RuleEngine) -> Vec<StreamRewrite> {
    streams
        .iter()
        .filter_map(|stream| {
            let original = stream.title()?;
            let rewrite = engine.apply(original);
            if !rewrite.matched {
                tracing::debug!(
                    stream = stream.record.index,
                    title = %original,
                    "stream title does not match any rule"
                );
                return None;
            }

            tracing::debug!(
                stream = stream.record.index,
                from = %original,
                to = %rewrite.title,
                disposition = %rewrite.disposition,
                "stream title rewritten"
            );
            Some(StreamRewrite {
                stream_type: stream.stream_type,
                type_index: stream.type_index,
                source_index: stream.record.index,
                original_title: original.to_string(),
                title: rewrite.title,
                disposition: Some(rewrite.disposition).filter(|d| !d.is_empty()),
            })
        })
        .collect()
}

/// First titled video stream wins, and only while the container is untitled.
fn propagate_global_title(
    info: &MediaInfo,
    streams: &[ClassifiedStream<'_>],
    options: &EvaluationOptions,
) -> Option<String> {
    if !options.copy_video_to_global || info.global_title().is_some() {
        return None;
    }

    let title = streams
        .iter()
        .filter(|s| s.stream_type == StreamType::Video)
        .find_map(|s| s.title())?;

    tracing::debug!(title = %title, "copying video stream title to container");
    Some(title.to_string())
}

/// Must run after classification: it reads the final counts.
fn single_stream_deletions(tally: &StreamTally, options: &EvaluationOptions) -> Vec<StreamType> {
    if !options.delete_singles {
        return Vec::new();
    }

    DELETION_ORDER
        .into_iter()
        .filter(|&ty| {
            let t = tally.get(ty);
            t.count == 1 && t.title_seen
        })
        .inspect(|ty| tracing::debug!(stream_type = %ty, "blanking title of single stream"))
        .collect()
}
