//! Library scanner.
//!
//! Walks a directory tree for video files and runs the title planner on each
//! of them. Files are evaluated independently on the rayon pool; the report
//! keeps the sorted path order regardless of completion order.

use anyhow::Result;
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tf_plan::{FilePlan, TitlePlanner};
use tf_probe::{has_extension, Prober};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Outcome of scanning one directory tree.
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub root: PathBuf,
    /// One plan per candidate file, sorted by path.
    pub files: Vec<FilePlan>,
}

impl ScanReport {
    /// Files that should be queued for processing.
    pub fn pending(&self) -> impl Iterator<Item = &FilePlan> {
        self.files.iter().filter(|f| f.needs_processing)
    }

    pub fn pending_count(&self) -> usize {
        self.pending().count()
    }
}

/// Collect every file under `root` whose extension is in `extensions`,
/// sorted by path.
pub fn find_candidates(root: &Path, extensions: &[String]) -> Result<Vec<PathBuf>> {
    if !root.exists() {
        anyhow::bail!("Scan path does not exist: {:?}", root);
    }
    if !root.is_dir() {
        anyhow::bail!("Scan path is not a directory: {:?}", root);
    }

    let mut candidates: Vec<PathBuf> = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Error walking directory: {}", e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| has_extension(path, extensions))
        .collect();

    candidates.sort();
    Ok(candidates)
}

/// Plan every candidate file under `root`.
pub fn scan_library(
    root: &Path,
    extensions: &[String],
    planner: &TitlePlanner,
    prober: &dyn Prober,
) -> Result<ScanReport> {
    info!("Scanning directory: {:?}", root);
    let candidates = find_candidates(root, extensions)?;
    debug!(count = candidates.len(), "candidate files found");

    let files: Vec<FilePlan> = candidates
        .par_iter()
        .map(|path| planner.plan_path(prober, path))
        .collect();

    let report = ScanReport {
        root: root.to_path_buf(),
        files,
    };
    info!(
        scanned = report.files.len(),
        pending = report.pending_count(),
        "scan complete"
    );
    Ok(report)
}
