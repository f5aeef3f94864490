//! Pipeline - load once, score every frame against frame 0, time both.

use std::path::Path;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{info, info_span};

use crate::config::VoxdiffConfig;
use crate::errors::RunError;
use crate::nifti::NiftiSource;
use crate::ssd::{ScoreEngine, ScoreSequence, Strategy};
use crate::timing::{time_repeated, TimingStats};
use crate::traits::VolumeSource;
use crate::volume::{VolumeMetadata, VolumeShape};

/// Everything a run produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreReport {
    pub path: String,
    pub shape: VolumeShape,
    pub metadata: VolumeMetadata,
    pub strategy: Strategy,
    pub threads: usize,
    pub scores: ScoreSequence,
    pub load_timing: TimingStats,
    pub score_timing: TimingStats,
}

/// Score the NIfTI file at `path` with the configured source and engine.
pub fn run(path: &Path, config: &VoxdiffConfig) -> Result<ScoreReport, RunError> {
    let source = NiftiSource::new(config.source.effective_offset_policy());
    run_with(&source, path, config)
}

/// Score a volume from any source.
pub fn run_with(
    source: &dyn VolumeSource,
    path: &Path,
    config: &VoxdiffConfig,
) -> Result<ScoreReport, RunError> {
    let strategy = config.engine.effective_strategy();
    let threads = config.engine.effective_threads();
    let repeat = config.engine.effective_repeat();

    let (loaded, load_timing) = {
        let _span = info_span!("load", source = source.name(), path = %path.display()).entered();
        let start = Instant::now();
        let loaded = source.load(path)?;
        (loaded, TimingStats::single(start.elapsed()))
    };
    let shape = loaded.volume.shape();
    info!(
        %shape,
        datatype = %loaded.metadata.datatype,
        elapsed_ms = load_timing.total.as_secs_f64() * 1000.0,
        "volume loaded"
    );

    let (scores, score_timing) = {
        let _span = info_span!("score", %strategy, threads, repeat).entered();
        let engine = ScoreEngine::new(strategy, threads)?;
        time_repeated(repeat, || engine.score(&loaded.volume))?
    };
    info!(
        frames = scores.len(),
        runs = score_timing.runs,
        mean_ms = score_timing.mean().as_secs_f64() * 1000.0,
        "scores computed"
    );

    Ok(ScoreReport {
        path: path.display().to_string(),
        shape,
        metadata: loaded.metadata,
        strategy,
        threads,
        scores,
        load_timing,
        score_timing,
    })
}
