//! # tf-plan
//!
//! The stream-title decision engine.
//!
//! Given a probed [`tf_probe::MediaInfo`] and a compiled
//! [`tf_rules::RuleEngine`], this crate decides whether a file's title
//! metadata needs rewriting and produces the ordered ffmpeg arguments that
//! perform the rewrite.
//!
//! The work is split into three passes:
//!
//! - [`classifier`] -- folds the stream list into per-type tallies.
//! - [`evaluation`] -- runs the rule cascade per stream, the global-title
//!   propagation, and the single-stream deletion policy.
//! - [`assembler`] -- concatenates everything in a fixed precedence order.
//!
//! [`TitlePlanner`] ties the passes together for one file at a time.

pub mod assembler;
pub mod classifier;
pub mod evaluation;
pub mod planner;

pub use assembler::{assemble, UserOptions};
pub use classifier::{classify, ClassifiedStream, StreamTally, TypeTally};
pub use evaluation::{evaluate, EvaluationOptions, StreamRewrite, TitlePlan};
pub use planner::{FilePlan, TitlePlanner};
