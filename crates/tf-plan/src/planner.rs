//! [`TitlePlanner`]: the configured engine, applied one file at a time.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tf_core::config::{Config, TitleMode};
use tf_probe::{MediaInfo, Prober};
use tf_rules::{RuleEngine, RuleSet};

use crate::assembler::{assemble, UserOptions};
use crate::evaluation::{evaluate, EvaluationOptions, TitlePlan};

/// Decision and arguments for one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilePlan {
    pub file_path: PathBuf,
    pub needs_processing: bool,
    /// ffmpeg arguments; empty when no processing is needed.
    pub arguments: Vec<String>,
    pub plan: TitlePlan,
}

impl FilePlan {
    /// The "nothing to do" result for a file that could not be evaluated.
    pub fn skipped(path: &Path) -> Self {
        Self {
            file_path: path.to_path_buf(),
            needs_processing: false,
            arguments: Vec::new(),
            plan: TitlePlan::default(),
        }
    }
}

/// An immutable, shareable title engine configuration.
///
/// `plan` owns all per-file state, so one planner can serve many worker
/// threads at once.
#[derive(Debug, Clone, Default)]
pub struct TitlePlanner {
    engine: RuleEngine,
    options: EvaluationOptions,
    user: UserOptions,
}

impl TitlePlanner {
    pub fn new(engine: RuleEngine, options: EvaluationOptions, user: UserOptions) -> Self {
        Self {
            engine,
            options,
            user,
        }
    }

    /// Build a planner from application config.
    ///
    /// The title mode only selects which rule set is injected; both modes run
    /// through the same engine.
    pub fn from_config(config: &Config) -> Self {
        let rules = match config.title.mode {
            TitleMode::Rules => RuleSet::parse(&config.title.rules),
            TitleMode::Strip => RuleSet::strip_all(),
        };
        tracing::debug!(mode = ?config.title.mode, rules = rules.len(), "title planner configured");

        Self::new(
            RuleEngine::new(rules),
            EvaluationOptions {
                copy_video_to_global: config.title.copy_video_to_global,
                delete_singles: config.title.delete_singles,
            },
            UserOptions::from_config(&config.advanced),
        )
    }

    pub fn engine(&self) -> &RuleEngine {
        &self.engine
    }

    pub fn user_options(&self) -> &UserOptions {
        &self.user
    }

    /// Decide and assemble arguments for an already-probed file.
    pub fn plan(&self, info: &MediaInfo) -> FilePlan {
        let plan = evaluate(info, &self.engine, &self.options);
        let needs_processing = plan.needs_processing();
        let arguments = if needs_processing {
            assemble(&plan, &self.user)
        } else {
            Vec::new()
        };

        if needs_processing {
            tracing::debug!(
                file = %info.file_path.display(),
                "file should be added to task list; streams require processing"
            );
        } else {
            tracing::debug!(
                file = %info.file_path.display(),
                "file does not contain streams that require processing"
            );
        }

        FilePlan {
            file_path: info.file_path.clone(),
            needs_processing,
            arguments,
            plan,
        }
    }

    /// Probe `path` and plan it. A probe failure means "no processing".
    pub fn plan_path(&self, prober: &dyn Prober, path: &Path) -> FilePlan {
        match prober.probe(path) {
            Ok(info) => self.plan(&info),
            Err(e) => {
                tracing::debug!(
                    file = %path.display(),
                    prober = prober.name(),
                    error = %e,
                    "probe failed; skipping file"
                );
                FilePlan::skipped(path)
            }
        }
    }
}
