//! Timing harness for repeated runs.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// Wall-clock statistics over one or more runs of the same work.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimingStats {
    pub runs: u32,
    #[serde(with = "duration_millis")]
    pub total: Duration,
    #[serde(with = "duration_millis")]
    pub min: Duration,
    #[serde(with = "duration_millis")]
    pub max: Duration,
}

impl TimingStats {
    /// Stats for a single measured run.
    pub fn single(elapsed: Duration) -> Self {
        Self {
            runs: 1,
            total: elapsed,
            min: elapsed,
            max: elapsed,
        }
    }

    pub fn mean(&self) -> Duration {
        if self.runs == 0 {
            Duration::ZERO
        } else {
            self.total / self.runs
        }
    }

    fn record(&mut self, elapsed: Duration) {
        self.runs += 1;
        self.total += elapsed;
        self.min = self.min.min(elapsed);
        self.max = self.max.max(elapsed);
    }
}

/// Run `f` `runs` times (at least once), returning the last result and the
/// timing of every run. The first error aborts the remaining runs.
pub fn time_repeated<T, E, F>(runs: u32, mut f: F) -> Result<(T, TimingStats), E>
where
    F: FnMut() -> Result<T, E>,
{
    let start = Instant::now();
    let mut last = f()?;
    let mut stats = TimingStats::single(start.elapsed());

    for _ in 1..runs {
        let start = Instant::now();
        last = f()?;
        stats.record(start.elapsed());
    }
    Ok((last, stats))
}

// Durations as fractional milliseconds; sub-millisecond runs are common.
mod duration_millis {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        (duration.as_secs_f64() * 1000.0).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = f64::deserialize(deserializer)?;
        Ok(Duration::from_secs_f64(millis.max(0.0) / 1000.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runs_requested_number_of_times() {
        let mut calls = 0;
        let (last, stats) = time_repeated(4, || {
            calls += 1;
            Ok::<_, ()>(calls)
        })
        .unwrap();
        assert_eq!(last, 4);
        assert_eq!(stats.runs, 4);
        assert!(stats.min <= stats.mean());
        assert!(stats.mean() <= stats.max);
    }

    #[test]
    fn zero_runs_still_runs_once() {
        let (value, stats) = time_repeated(0, || Ok::<_, ()>(7)).unwrap();
        assert_eq!(value, 7);
        assert_eq!(stats.runs, 1);
    }

    #[test]
    fn error_stops_repetition() {
        let mut calls = 0;
        let result = time_repeated(5, || {
            calls += 1;
            if calls == 2 {
                Err("boom")
            } else {
                Ok(calls)
            }
        });
        assert_eq!(result.unwrap_err(), "boom");
        assert_eq!(calls, 2);
    }
}
