//! Title planning integration tests.
//!
//! Drives the full probe-result -> rule cascade -> argument pipeline through
//! [`TitlePlanner`], checking the argument grammar and ordering that ffmpeg
//! relies on.

mod common;

use assert_matches::assert_matches;
use common::{media, planner, streams, COMMENTARY_RULES};
use tf_core::config::{AdvancedConfig, Config, TitleMode};
use tf_core::{Error, StreamType};
use tf_plan::TitlePlanner;
use tf_rules::{RuleEngine, RuleSet, TitleRule};

fn engine(rules: Vec<TitleRule>) -> RuleEngine {
    RuleEngine::new(RuleSet::new(rules))
}

// ---------------------------------------------------------------------------
// Rule cascade
// ---------------------------------------------------------------------------

#[test]
fn cascade_is_idempotent_on_rewritten_title() {
    let engine = RuleEngine::new(RuleSet::parse(COMMENTARY_RULES));

    let first = engine.apply("Director's commentary with Nolan");
    assert!(first.matched);
    assert_eq!(first.title, "Commentary");

    let second = engine.apply(&first.title);
    assert_eq!(second.title, first.title);
}

#[test]
fn rules_chain_in_order() {
    let forward = engine(vec![TitleRule::new("A", "B"), TitleRule::new("B", "C")]);
    assert_eq!(forward.apply("A").title, "C");

    let reversed = engine(vec![TitleRule::new("B", "C"), TitleRule::new("A", "B")]);
    assert_eq!(reversed.apply("A").title, "B");
}

#[test]
fn dispositions_accumulate_in_rule_order() {
    let engine = engine(vec![
        TitleRule::new("(?i)commentary", "Commentary").with_disposition("+comment"),
        TitleRule::new("(?i)main", "Main").with_disposition("+default"),
        TitleRule::new("never", "x").with_disposition("+forced"),
    ]);

    let rewrite = engine.apply("main commentary");
    assert!(rewrite.matched);
    assert_eq!(rewrite.title, "Main Commentary");
    assert_eq!(rewrite.disposition, "+comment +default");
}

#[test]
fn invalid_pattern_is_skipped_and_cascade_continues() {
    let engine = engine(vec![
        TitleRule::new("(unclosed", "x").with_disposition("+forced"),
        TitleRule::new("Stereo", "2.0"),
    ]);

    let rewrite = engine.apply("Stereo");
    assert!(rewrite.matched);
    assert_eq!(rewrite.title, "2.0");
    assert_eq!(rewrite.disposition, "");

    let invalid = engine.invalid_rules();
    assert_eq!(invalid.len(), 1);
    assert_matches!(&invalid[0], Error::RuleApplication { pattern, .. } if pattern == "(unclosed");
}

#[test]
fn python_style_backreferences_are_honoured() {
    let rules = r#"[{"pattern": "^(\\w+) Audio$", "replace": "\\1"},
                    {"pattern": "(?P<lang>[A-Z]{3}) Track", "replace": "\\g<lang>"}]"#;
    let engine = RuleEngine::new(RuleSet::parse(rules));

    assert_eq!(engine.apply("English Audio").title, "English");
    assert_eq!(engine.apply("ENG Track").title, "ENG");
}

// ---------------------------------------------------------------------------
// File plans
// ---------------------------------------------------------------------------

#[test]
fn no_op_file_has_no_arguments() {
    let planner = planner(COMMENTARY_RULES, true, true);
    let info = media(
        "clean.mkv",
        Some("Clean Movie"),
        streams(&[("video", None), ("audio", None), ("audio", Some("English"))]),
    );

    let plan = planner.plan(&info);
    assert!(!plan.needs_processing);
    assert!(plan.arguments.is_empty());
}

#[test]
fn rewrite_uses_ordinal_within_type() {
    let planner = planner(COMMENTARY_RULES, false, false);
    let info = media(
        "movie.mkv",
        None,
        streams(&[
            ("video", None),
            ("audio", Some("English")),
            ("subtitle", Some("English")),
            ("audio", Some("Commentary by the director")),
            ("attachment", Some("font.ttf")),
            ("subtitle", Some("English forced")),
        ]),
    );

    let plan = planner.plan(&info);
    assert!(plan.needs_processing);
    assert_eq!(
        plan.arguments,
        vec![
            "-metadata:s:a:1",
            "title=Commentary",
            "-disposition:a:1",
            "+comment",
            "-metadata:s:s:1",
            "title=English Forced",
            "-disposition:s:1",
            "+forced",
        ]
    );
    assert_eq!(plan.plan.tally.get(StreamType::Audio).count, 2);
    assert_eq!(plan.plan.tally.get(StreamType::Subtitle).count, 2);
}

#[test]
fn deletion_precedes_rewrite_of_same_stream() {
    let planner = planner(COMMENTARY_RULES, false, true);
    let info = media(
        "movie.mkv",
        None,
        streams(&[("video", None), ("audio", Some("Commentary"))]),
    );

    let plan = planner.plan(&info);
    assert_eq!(plan.plan.deletions, vec![StreamType::Audio]);

    let args = &plan.arguments;
    let deletion = args
        .windows(2)
        .position(|w| w[0] == "-metadata:s:a:0" && w[1] == "title=")
        .unwrap();
    let rewrite = args
        .windows(2)
        .position(|w| w[0] == "-metadata:s:a:0" && w[1] == "title=Commentary")
        .unwrap();
    assert!(deletion < rewrite);
}

#[test]
fn deletions_follow_subtitle_audio_video_order() {
    let planner = planner("", false, true);
    let info = media(
        "movie.mkv",
        None,
        streams(&[
            ("video", Some("Main")),
            ("audio", Some("English")),
            ("subtitle", Some("English")),
        ]),
    );

    let plan = planner.plan(&info);
    assert!(plan.needs_processing);
    assert_eq!(
        plan.arguments,
        vec![
            "-metadata:s:s:0",
            "title=",
            "-metadata:s:a:0",
            "title=",
            "-metadata:s:v:0",
            "title=",
        ]
    );
}

#[test]
fn deletion_needs_a_single_titled_stream() {
    let planner = planner("", false, true);

    // Two audio streams: not a single.
    let info = media(
        "two.mkv",
        None,
        streams(&[("audio", Some("English")), ("audio", None)]),
    );
    assert!(!planner.plan(&info).needs_processing);

    // One audio stream without a title: nothing to delete.
    let info = media("untitled.mkv", None, streams(&[("audio", None)]));
    assert!(!planner.plan(&info).needs_processing);
}

// ---------------------------------------------------------------------------
// Global title propagation
// ---------------------------------------------------------------------------

#[test]
fn global_title_requires_all_preconditions() {
    let video_titled = streams(&[("video", Some("Inception (2010)")), ("audio", None)]);

    // Flag on, container untitled, video titled: propagates.
    let plan = planner("", true, false).plan(&media("a.mkv", None, video_titled.clone()));
    assert!(plan.needs_processing);
    assert_eq!(plan.arguments, vec!["-metadata", "title=Inception (2010)"]);

    // Empty container title counts as absent.
    let plan = planner("", true, false).plan(&media("a.mkv", Some(""), video_titled.clone()));
    assert_eq!(plan.plan.global_title.as_deref(), Some("Inception (2010)"));

    // Flag off.
    let plan = planner("", false, false).plan(&media("a.mkv", None, video_titled.clone()));
    assert!(!plan.needs_processing);

    // Container already titled.
    let plan = planner("", true, false).plan(&media("a.mkv", Some("Inception"), video_titled));
    assert!(!plan.needs_processing);

    // Only an audio stream is titled.
    let plan = planner("", true, false).plan(&media(
        "a.mkv",
        None,
        streams(&[("video", None), ("audio", Some("English"))]),
    ));
    assert!(!plan.needs_processing);
}

#[test]
fn first_titled_video_wins_with_original_title() {
    let rules = r#"[{"pattern": "Feature", "replace": "Film"}]"#;
    let planner = planner(rules, true, false);
    let info = media(
        "a.mkv",
        None,
        streams(&[
            ("video", None),
            ("video", Some("Main Feature")),
            ("video", Some("Bonus Angle")),
        ]),
    );

    let plan = planner.plan(&info);
    assert_eq!(
        plan.arguments,
        vec![
            "-metadata",
            "title=Main Feature",
            "-metadata:s:v:1",
            "title=Main Film",
        ]
    );
}

// ---------------------------------------------------------------------------
// Modes and configuration
// ---------------------------------------------------------------------------

#[test]
fn malformed_rules_behave_like_empty_set() {
    let info = media(
        "a.mkv",
        None,
        streams(&[("video", None), ("audio", Some("Commentary"))]),
    );

    let broken = planner("{not json", false, false).plan(&info);
    let empty = planner("[]", false, false).plan(&info);
    assert_eq!(broken, empty);
    assert!(!broken.needs_processing);
}

#[test]
fn strip_mode_blanks_every_title() {
    let mut config = Config::default();
    config.title.mode = TitleMode::Strip;
    config.title.rules = COMMENTARY_RULES.to_string();
    let planner = TitlePlanner::from_config(&config);

    let info = media(
        "a.mkv",
        Some("Movie"),
        streams(&[
            ("video", Some("x264 1080p")),
            ("audio", None),
            ("audio", Some("Commentary")),
        ]),
    );

    let plan = planner.plan(&info);
    assert_eq!(
        plan.arguments,
        vec!["-metadata:s:v:0", "title=", "-metadata:s:a:1", "title="]
    );
}

#[test]
fn user_options_wrap_metadata_edits() {
    let mut config = common::rules_config(COMMENTARY_RULES, true, true);
    config.advanced = AdvancedConfig {
        enabled: true,
        main_options: "-map 0 -c copy".to_string(),
        advanced_options: "-max_muxing_queue_size 1024".to_string(),
    };
    let planner = TitlePlanner::from_config(&config);

    let info = media(
        "a.mkv",
        None,
        streams(&[("video", Some("Main")), ("audio", Some("Commentary"))]),
    );

    let plan = planner.plan(&info);
    assert_eq!(
        plan.arguments,
        vec![
            "-map",
            "0",
            "-c",
            "copy",
            "-metadata",
            "title=Main",
            "-metadata:s:a:0",
            "title=",
            "-metadata:s:v:0",
            "title=",
            "-metadata:s:a:0",
            "title=Commentary",
            "-disposition:a:0",
            "+comment",
            "-max_muxing_queue_size",
            "1024",
        ]
    );
}

#[test]
fn disabled_advanced_mode_drops_user_options() {
    let mut config = common::rules_config(COMMENTARY_RULES, false, false);
    config.advanced.main_options = "-map 0".to_string();
    let planner = TitlePlanner::from_config(&config);

    let info = media("a.mkv", None, streams(&[("audio", Some("commentary"))]));
    let plan = planner.plan(&info);
    assert_eq!(plan.arguments[0], "-metadata:s:a:0");
}

#[test]
fn planner_is_shareable_across_threads() {
    let planner = planner(COMMENTARY_RULES, false, false);
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let planner = planner.clone();
            std::thread::spawn(move || {
                let title = format!("Commentary {i}");
                let info = media("a.mkv", None, streams(&[("audio", Some(title.as_str()))]));
                planner.plan(&info)
            })
        })
        .collect();

    for handle in handles {
        let plan = handle.join().unwrap();
        assert_eq!(plan.arguments[1], "title=Commentary");
    }
}
