//! Shared fixtures for integration tests.
//!
//! Builders for probe results and planners so each test states only the
//! streams and settings it cares about.

#![allow(dead_code)]

use std::path::PathBuf;

use tf_core::config::{Config, TitleMode};
use tf_plan::TitlePlanner;
use tf_probe::{MediaInfo, StreamRecord};

/// Rules used throughout the integration tests: tag commentary tracks and
/// normalize channel layouts.
pub const COMMENTARY_RULES: &str = r#"[
    {"pattern": "(?i)^.*commentary.*$", "replace": "Commentary", "disposition": "+comment"},
    {"pattern": "(?i)\\b5\\.1\\b", "replace": "Surround 5.1"},
    {"pattern": "(?i)\\bforced\\b", "replace": "Forced", "disposition": "+forced"}
]"#;

/// A probe result for `/movies/<name>` with the given streams.
pub fn media(name: &str, container_title: Option<&str>, streams: Vec<StreamRecord>) -> MediaInfo {
    MediaInfo {
        file_path: PathBuf::from("/movies").join(name),
        container_title: container_title.map(str::to_string),
        streams,
    }
}

/// Streams in prober order, indexed by position.
pub fn streams(specs: &[(&str, Option<&str>)]) -> Vec<StreamRecord> {
    specs
        .iter()
        .enumerate()
        .map(|(i, (codec_type, title))| StreamRecord::new(i as u32, *codec_type, *title))
        .collect()
}

/// Config in rules mode with `rules` and both feature flags as given.
pub fn rules_config(rules: &str, copy_video_to_global: bool, delete_singles: bool) -> Config {
    let mut config = Config::default();
    config.title.mode = TitleMode::Rules;
    config.title.rules = rules.to_string();
    config.title.copy_video_to_global = copy_video_to_global;
    config.title.delete_singles = delete_singles;
    config
}

pub fn planner(rules: &str, copy_video_to_global: bool, delete_singles: bool) -> TitlePlanner {
    TitlePlanner::from_config(&rules_config(rules, copy_video_to_global, delete_singles))
}

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/probe")
        .join(name)
}
