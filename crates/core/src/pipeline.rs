//! Two-stage cleaning pipeline
//!
//! Runs the corpus sorter and then the alphabet reviser on the sorter's
//! output. The reviser starts only after the sorter output has been
//! committed.

use crate::paths::same_path;
use crate::progress::Progress;
use crate::reviser::{revise_alphabet_with_progress, ReviseConfig, ReviseStats};
use crate::sorter::{sort_corpus_with_progress, SortConfig, SortStats};
use crate::{Error, Result};
use serde::Serialize;
use tracing::info;

/// Pipeline stage identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Sort,
    Revise,
}

/// Pipeline statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PipelineStats {
    pub sort: SortStats,
    pub revise: ReviseStats,
}

impl PipelineStats {
    /// Percentage of raw input lines that survive both stages
    pub fn retention_rate(&self) -> f64 {
        if self.sort.lines_read > 0 {
            (self.revise.accepted as f64 / self.sort.lines_read as f64) * 100.0
        } else {
            0.0
        }
    }
}

/// Check that the two stage configurations chain together
///
/// Paths are compared with [`same_path`], so `./a.txt` and `a.txt` match.
pub fn validate(sort: &SortConfig, revise: &ReviseConfig) -> Result<()> {
    if !same_path(&revise.input_path, &sort.output_path) {
        return Err(Error::InvalidConfig(format!(
            "reviser input {:?} must be the sorter output {:?}",
            revise.input_path, sort.output_path
        )));
    }
    if sort.dry_run || revise.dry_run {
        return Err(Error::InvalidConfig(
            "dry runs are not supported in a pipeline; run the stages separately".to_string(),
        ));
    }
    if same_path(&revise.output_path, &sort.input_path)
        || same_path(&revise.output_path, &sort.output_path)
    {
        return Err(Error::InvalidConfig(format!(
            "reviser output {:?} would overwrite a pipeline input",
            revise.output_path
        )));
    }
    Ok(())
}

/// Run both stages in order
pub fn run_pipeline(sort: &SortConfig, revise: &ReviseConfig) -> Result<PipelineStats> {
    run_pipeline_with_progress(sort, revise, |_, _| {})
}

/// Run both stages in order, forwarding progress tagged with its stage
pub fn run_pipeline_with_progress<F>(
    sort: &SortConfig,
    revise: &ReviseConfig,
    mut on_progress: F,
) -> Result<PipelineStats>
where
    F: FnMut(Stage, &Progress),
{
    validate(sort, revise)?;

    info!("Running cleaning pipeline");
    let sort_stats = sort_corpus_with_progress(sort, |p| on_progress(Stage::Sort, p))?;
    let revise_stats = revise_alphabet_with_progress(revise, |p| on_progress(Stage::Revise, p))?;

    let stats = PipelineStats {
        sort: sort_stats,
        revise: revise_stats,
    };
    info!(
        "Pipeline complete: {} of {} lines retained ({:.1}%)",
        stats.revise.accepted,
        stats.sort.lines_read,
        stats.retention_rate()
    );

    Ok(stats)
}
