//! Score types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// How the per-frame loop is executed. Every strategy yields bit-identical
/// scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Flatten each frame once, then a single fused pass per frame.
    #[default]
    Flattened,
    /// Triple loop over (x, y, z) coordinates of the 4D array.
    Nested,
    /// Flattened kernel with frames spread over a rayon pool.
    Parallel,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Self::Flattened, Self::Nested, Self::Parallel];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Flattened => "flattened",
            Self::Nested => "nested",
            Self::Parallel => "parallel",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "flattened" => Ok(Self::Flattened),
            "nested" => Ok(Self::Nested),
            "parallel" => Ok(Self::Parallel),
            _ => Err(ConfigError::InvalidValue {
                field: "strategy".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// Scores of every non-reference frame against frame 0.
///
/// `scores[i]` compares the reference with frame `t = i + 1`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreSequence {
    scores: Vec<i64>,
}

impl ScoreSequence {
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn first(&self) -> Option<i64> {
        self.scores.first().copied()
    }

    pub fn last(&self) -> Option<i64> {
        self.scores.last().copied()
    }

    /// Score for time index `t` (1-based against the reference).
    pub fn for_frame(&self, t: usize) -> Option<i64> {
        t.checked_sub(1).and_then(|i| self.scores.get(i).copied())
    }

    /// `(t, score)` pairs in ascending frame order.
    pub fn frames(&self) -> impl Iterator<Item = (usize, i64)> + '_ {
        self.scores.iter().enumerate().map(|(i, &s)| (i + 1, s))
    }

    pub fn as_slice(&self) -> &[i64] {
        &self.scores
    }

    pub fn into_vec(self) -> Vec<i64> {
        self.scores
    }
}

impl From<Vec<i64>> for ScoreSequence {
    fn from(scores: Vec<i64>) -> Self {
        Self { scores }
    }
}
