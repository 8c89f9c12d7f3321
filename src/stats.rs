//! Aggregate statistics over a snapshot of samples.
//!
//! Every function is pure and works on a borrowed slice, typically the copy
//! returned by [`crate::Recorder::snapshot`]. Functions that need ordering sort
//! their own copy.
//!
//! Contracts:
//! - `median` is the standard median: the middle element for odd lengths, the
//!   mean of the two middle elements for even lengths.
//! - `percentile` is nearest-rank: `rank = ceil(p / 100 * n)` clamped to
//!   `[1, n]`, so `percentile(0)` is the minimum and `percentile(100)` the
//!   maximum.
//! - `variance` is the population variance (divides by `n`).

use crate::error::StatsError;

/// Number of samples. Zero for empty input.
pub fn count(samples: &[f64]) -> usize {
    samples.len()
}

/// Arithmetic mean.
pub fn mean(samples: &[f64]) -> Result<f64, StatsError> {
    if samples.is_empty() {
        return Err(StatsError::EmptyInput);
    }
    Ok(samples.iter().sum::<f64>() / samples.len() as f64)
}

/// Standard median.
pub fn median(samples: &[f64]) -> Result<f64, StatsError> {
    let sorted = sorted_copy(samples)?;
    Ok(median_of_sorted(&sorted))
}

/// Nearest-rank percentile for `p` in `[0, 100]`.
pub fn percentile(samples: &[f64], p: f64) -> Result<f64, StatsError> {
    check_percentile(p)?;
    let sorted = sorted_copy(samples)?;
    Ok(percentile_of_sorted(&sorted, p))
}

/// Smallest sample.
pub fn min(samples: &[f64]) -> Result<f64, StatsError> {
    samples
        .iter()
        .copied()
        .min_by(f64::total_cmp)
        .ok_or(StatsError::EmptyInput)
}

/// Largest sample.
pub fn max(samples: &[f64]) -> Result<f64, StatsError> {
    samples
        .iter()
        .copied()
        .max_by(f64::total_cmp)
        .ok_or(StatsError::EmptyInput)
}

/// Population variance: mean squared deviation from the mean.
pub fn variance(samples: &[f64]) -> Result<f64, StatsError> {
    let mean = mean(samples)?;
    let sum_sq = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>();
    Ok(sum_sq / samples.len() as f64)
}

/// Population standard deviation.
pub fn std_dev(samples: &[f64]) -> Result<f64, StatsError> {
    variance(samples).map(f64::sqrt)
}

/// Summary of one tag, computed from a single sorted copy.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub min: f64,
    pub median: f64,
    pub p99: f64,
    pub max: f64,
    pub mean: f64,
    pub variance: f64,
}

impl Summary {
    /// Summarize `samples`, or `None` if there are none.
    pub fn from_samples(samples: &[f64]) -> Option<Self> {
        let sorted = sorted_copy(samples).ok()?;
        let n = sorted.len();
        let mean = sorted.iter().sum::<f64>() / n as f64;
        let variance = sorted.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n as f64;

        Some(Self {
            count: n,
            min: sorted[0],
            median: median_of_sorted(&sorted),
            p99: percentile_of_sorted(&sorted, 99.0),
            max: sorted[n - 1],
            mean,
            variance,
        })
    }

    pub fn std_dev(&self) -> f64 {
        self.variance.sqrt()
    }
}

fn check_percentile(p: f64) -> Result<(), StatsError> {
    if (0.0..=100.0).contains(&p) {
        Ok(())
    } else {
        Err(StatsError::PercentileOutOfRange(p))
    }
}

fn sorted_copy(samples: &[f64]) -> Result<Vec<f64>, StatsError> {
    if samples.is_empty() {
        return Err(StatsError::EmptyInput);
    }
    let mut sorted = samples.to_vec();
    sorted.sort_by(f64::total_cmp);
    Ok(sorted)
}

fn median_of_sorted(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}

fn percentile_of_sorted(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    // n * p first: p / 100 * n rounds 0.7 * 10 up to rank 8.
    let rank = (n as f64 * p / 100.0).ceil() as usize;
    sorted[rank.clamp(1, n) - 1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_of_empty_is_zero() {
        assert_eq!(count(&[]), 0);
        assert_eq!(count(&[1.0, 2.0]), 2);
    }

    #[test]
    fn test_empty_input_errors() {
        assert_eq!(mean(&[]), Err(StatsError::EmptyInput));
        assert_eq!(median(&[]), Err(StatsError::EmptyInput));
        assert_eq!(percentile(&[], 50.0), Err(StatsError::EmptyInput));
        assert_eq!(min(&[]), Err(StatsError::EmptyInput));
        assert_eq!(max(&[]), Err(StatsError::EmptyInput));
        assert_eq!(variance(&[]), Err(StatsError::EmptyInput));
        assert!(Summary::from_samples(&[]).is_none());
    }

    #[test]
    fn test_median_odd_and_even() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), Ok(2.0));
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Ok(2.5));
    }

    #[test]
    fn test_population_variance() {
        let samples = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_eq!(variance(&samples), Ok(4.0));
        assert_eq!(std_dev(&samples), Ok(2.0));
        assert_eq!(variance(&[42.0]), Ok(0.0));
    }

    #[test]
    fn test_nearest_rank_percentile() {
        let samples: Vec<f64> = (1..=10).map(f64::from).collect();
        assert_eq!(percentile(&samples, 0.0), Ok(1.0));
        assert_eq!(percentile(&samples, 10.0), Ok(1.0));
        assert_eq!(percentile(&samples, 11.0), Ok(2.0));
        assert_eq!(percentile(&samples, 70.0), Ok(7.0));
        assert_eq!(percentile(&samples, 99.0), Ok(10.0));
        assert_eq!(percentile(&samples, 100.0), Ok(10.0));
    }

    #[test]
    fn test_percentile_single_sample() {
        for p in [0.0, 1.0, 50.0, 99.9, 100.0] {
            assert_eq!(percentile(&[7.5], p), Ok(7.5));
        }
    }

    #[test]
    fn test_percentile_out_of_range() {
        assert_eq!(
            percentile(&[1.0], 100.5),
            Err(StatsError::PercentileOutOfRange(100.5))
        );
        assert!(percentile(&[1.0], -1.0).is_err());
        assert!(percentile(&[1.0], f64::NAN).is_err());
    }

    #[test]
    fn test_min_max_ignore_order() {
        let samples = [5.0, 0.5, 9.0, 3.0];
        assert_eq!(min(&samples), Ok(0.5));
        assert_eq!(max(&samples), Ok(9.0));
    }

    #[test]
    fn test_summary_matches_functions() {
        let samples = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let summary = Summary::from_samples(&samples).unwrap();
        assert_eq!(summary.count, 8);
        assert_eq!(summary.min, 2.0);
        assert_eq!(summary.median, 4.5);
        assert_eq!(summary.p99, 9.0);
        assert_eq!(summary.max, 9.0);
        assert_eq!(summary.mean, 5.0);
        assert_eq!(summary.variance, 4.0);
        assert_eq!(summary.std_dev(), 2.0);
    }
}
