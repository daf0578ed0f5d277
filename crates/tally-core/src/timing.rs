//! Wall-clock timing and speedup figures

use std::time::{Duration, Instant};

use serde::Serialize;

use crate::pipeline::RunReport;

/// A value together with the time it took to produce
#[derive(Debug, Clone)]
pub struct Timed<T> {
    pub value: T,
    pub elapsed: Duration,
}

/// Run `op` and measure it
pub fn timed<T>(op: impl FnOnce() -> T) -> Timed<T> {
    let start = Instant::now();
    let value = op();
    Timed {
        value,
        elapsed: start.elapsed(),
    }
}

/// Sequential and concurrent runs over the same samples
#[derive(Debug, Clone)]
pub struct Benchmark {
    pub sequential: RunReport,
    pub concurrent: RunReport,
    pub sequential_elapsed: Duration,
    pub concurrent_elapsed: Duration,
    /// Worker threads in the pool both runs used
    pub workers: usize,
}

impl Benchmark {
    /// Sequential time divided by concurrent time
    ///
    /// `None` when the concurrent run was too fast to measure.
    pub fn speedup(&self) -> Option<f64> {
        speedup(self.sequential_elapsed, self.concurrent_elapsed)
    }

    /// Speedup per worker, in percent
    pub fn efficiency(&self) -> Option<f64> {
        efficiency(self.speedup()?, self.workers)
    }

    pub fn performance(&self) -> Performance {
        Performance {
            sequential_ms: self.sequential_elapsed.as_secs_f64() * 1e3,
            concurrent_ms: self.concurrent_elapsed.as_secs_f64() * 1e3,
            workers: self.workers,
            speedup: self.speedup(),
            efficiency_percent: self.efficiency(),
        }
    }
}

/// Serializable performance summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Performance {
    pub sequential_ms: f64,
    pub concurrent_ms: f64,
    pub workers: usize,
    pub speedup: Option<f64>,
    pub efficiency_percent: Option<f64>,
}

/// `sequential / concurrent`, or `None` for a zero concurrent time
pub fn speedup(sequential: Duration, concurrent: Duration) -> Option<f64> {
    if concurrent.is_zero() {
        return None;
    }
    Some(sequential.as_secs_f64() / concurrent.as_secs_f64())
}

/// `speedup / workers * 100`, or `None` without workers
pub fn efficiency(speedup: f64, workers: usize) -> Option<f64> {
    if workers == 0 {
        return None;
    }
    Some(speedup / workers as f64 * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speedup() {
        let s = speedup(Duration::from_millis(120), Duration::from_millis(40)).unwrap();
        assert!((s - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_speedup_zero_concurrent() {
        assert_eq!(speedup(Duration::from_millis(5), Duration::ZERO), None);
    }

    #[test]
    fn test_efficiency() {
        assert!((efficiency(3.0, 4).unwrap() - 75.0).abs() < 1e-12);
        assert_eq!(efficiency(3.0, 0), None);
    }

    #[test]
    fn test_timed() {
        let result = timed(|| 6 * 7);
        assert_eq!(result.value, 42);
    }
}
