//! Best-of-trials reduction over repeated timings of one workload.
//!
//! The minimum over trials is the number the original scripts report: system
//! noise only ever adds time, so the best run is the closest estimate of the
//! workload's real cost.

/// Reduction of one workload's trial durations (seconds).
#[derive(Debug, Clone)]
pub struct TrialStats {
    pub best: f64,
    pub mean: f64,
    pub worst: f64,
    pub runs: usize,
}

impl TrialStats {
    /// Panics on an empty slice; a workload always runs at least one trial.
    pub fn from_samples(samples: &[f64]) -> Self {
        if samples.is_empty() {
            panic!("Cannot compute statistics from empty samples");
        }
        let best = samples.iter().copied().fold(f64::INFINITY, f64::min);
        let worst = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean = samples.iter().sum::<f64>() / samples.len() as f64;
        Self {
            best,
            mean,
            worst,
            runs: samples.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::TrialStats;

    #[test]
    fn reduces_to_best_mean_worst() {
        let stats = TrialStats::from_samples(&[0.3, 0.1, 0.2]);
        assert_eq!(stats.best, 0.1);
        assert_eq!(stats.worst, 0.3);
        assert!((stats.mean - 0.2).abs() < 1e-12);
        assert_eq!(stats.runs, 3);
    }

    #[test]
    fn single_sample_is_its_own_best_and_worst() {
        let stats = TrialStats::from_samples(&[0.5]);
        assert_eq!(stats.best, 0.5);
        assert_eq!(stats.worst, 0.5);
        assert_eq!(stats.mean, 0.5);
        assert_eq!(stats.runs, 1);
    }

    #[test]
    #[should_panic]
    fn empty_samples_panic() {
        TrialStats::from_samples(&[]);
    }
}
