//! SSD engine - frame-to-reference sum of squared differences.
//!
//! - FrameExtractor: flattened, layout-independent frame views
//! - PairwiseSSD: single-pass `i64` accumulation, no temporaries
//! - ScoreListBuilder: reference frame 0 against every later frame, with
//!   flattened, nested-coordinate, and rayon-parallel strategies

mod builder;
mod frame;
mod pairwise;
mod types;

pub use builder::{score_any, ScoreEngine, ScoreListBuilder};
pub use frame::extract_frame;
pub use pairwise::{nested_ssd, pairwise_ssd};
pub use types::{ScoreSequence, Strategy};
