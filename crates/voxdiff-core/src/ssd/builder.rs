//! ScoreListBuilder - reference frame 0 against every later frame.

use rayon::prelude::*;
use rayon::ThreadPool;
use tracing::{debug, debug_span, trace};

use super::frame::extract_frame;
use super::pairwise::{nested_ssd, pairwise_ssd};
use super::types::{ScoreSequence, Strategy};
use crate::errors::SsdError;
use crate::volume::{AnyVolume, Volume, Voxel};

/// Builds the [`ScoreSequence`] for one volume.
///
/// The first failing frame aborts the whole build; no partial sequence is
/// ever returned.
#[derive(Debug, Clone, Copy)]
pub struct ScoreListBuilder<'a, T: Voxel> {
    volume: &'a Volume<T>,
    strategy: Strategy,
    threads: usize,
    pool: Option<&'a ThreadPool>,
}

impl<'a, T: Voxel> ScoreListBuilder<'a, T> {
    pub fn new(volume: &'a Volume<T>) -> Self {
        Self {
            volume,
            strategy: Strategy::default(),
            threads: 0,
            pool: None,
        }
    }

    pub fn strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Worker count for [`Strategy::Parallel`]; 0 uses rayon's global pool.
    /// Ignored when a pool is supplied.
    pub fn threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Run [`Strategy::Parallel`] on an existing pool instead of building one.
    pub fn pool(mut self, pool: &'a ThreadPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn build(&self) -> Result<ScoreSequence, SsdError> {
        let frames = self.volume.frames();
        if frames < 2 {
            return Err(SsdError::TooFewFrames { frames });
        }

        let _span = debug_span!("score_list", strategy = %self.strategy, frames).entered();
        let scores = match self.strategy {
            Strategy::Flattened => self.build_flattened(frames)?,
            Strategy::Nested => self.build_nested(frames)?,
            Strategy::Parallel => self.build_parallel(frames)?,
        };
        debug_assert_eq!(scores.len(), frames - 1);
        Ok(ScoreSequence::from(scores))
    }

    fn build_flattened(&self, frames: usize) -> Result<Vec<i64>, SsdError> {
        let reference = extract_frame(self.volume, 0)?;
        let mut scores = Vec::with_capacity(frames - 1);
        for t in 1..frames {
            let frame = extract_frame(self.volume, t)?;
            let score = pairwise_ssd(&reference, &frame)?;
            trace!(t, score, "frame scored");
            scores.push(score);
        }
        Ok(scores)
    }

    fn build_nested(&self, frames: usize) -> Result<Vec<i64>, SsdError> {
        let data = self.volume.view();
        (1..frames).map(|t| nested_ssd(&data, t)).collect()
    }

    fn build_parallel(&self, frames: usize) -> Result<Vec<i64>, SsdError> {
        let reference = extract_frame(self.volume, 0)?;
        // Indexed collect: scores land at t - 1 whatever order workers finish.
        let score_all = || {
            (1..frames)
                .into_par_iter()
                .map(|t| {
                    let frame = extract_frame(self.volume, t)?;
                    pairwise_ssd(&reference, &frame)
                })
                .collect::<Result<Vec<i64>, SsdError>>()
        };

        if let Some(pool) = self.pool {
            return pool.install(score_all);
        }
        match build_pool(self.threads)? {
            Some(pool) => pool.install(score_all),
            None => score_all(),
        }
    }
}

/// A dedicated pool of `threads` workers, or `None` for rayon's global pool.
fn build_pool(threads: usize) -> Result<Option<ThreadPool>, SsdError> {
    if threads == 0 {
        return Ok(None);
    }
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .map(Some)
        .map_err(|e| SsdError::ThreadPool(e.to_string()))
}

/// Scores runtime-typed volumes with one strategy, reusing a single worker
/// pool across calls.
#[derive(Debug)]
pub struct ScoreEngine {
    strategy: Strategy,
    threads: usize,
    pool: Option<ThreadPool>,
}

impl ScoreEngine {
    /// Builds the dedicated pool up front when `strategy` is parallel and
    /// `threads > 0`.
    pub fn new(strategy: Strategy, threads: usize) -> Result<Self, SsdError> {
        let pool = match strategy {
            Strategy::Parallel => build_pool(threads)?,
            Strategy::Flattened | Strategy::Nested => None,
        };
        if let Some(pool) = &pool {
            debug!(threads = pool.current_num_threads(), "built scoring pool");
        }
        Ok(Self {
            strategy,
            threads,
            pool,
        })
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Workers in the dedicated pool, `None` when none was built.
    pub fn pool_threads(&self) -> Option<usize> {
        self.pool.as_ref().map(ThreadPool::current_num_threads)
    }

    pub fn score(&self, volume: &AnyVolume) -> Result<ScoreSequence, SsdError> {
        match volume {
            AnyVolume::UInt8(v) => self.score_volume(v),
            AnyVolume::Int16(v) => self.score_volume(v),
            AnyVolume::Int8(v) => self.score_volume(v),
            AnyVolume::UInt16(v) => self.score_volume(v),
        }
    }

    fn score_volume<T: Voxel>(&self, volume: &Volume<T>) -> Result<ScoreSequence, SsdError> {
        let builder = ScoreListBuilder::new(volume)
            .strategy(self.strategy)
            .threads(self.threads);
        match &self.pool {
            Some(pool) => builder.pool(pool).build(),
            None => builder.build(),
        }
    }
}

/// Score a runtime-typed volume once. Repeated scoring should hold a
/// [`ScoreEngine`] so the pool is built only once.
pub fn score_any(
    volume: &AnyVolume,
    strategy: Strategy,
    threads: usize,
) -> Result<ScoreSequence, SsdError> {
    ScoreEngine::new(strategy, threads)?.score(volume)
}
