//! Summary statistics used to clip and annotate spectrum plots.
//!
//! - `percentile` matches numpy's default (linear interpolation between the
//!   two closest ranks, `rank = q / 100 * (n - 1)`).
//! - `mean` / `std_dev` are population definitions (divide by `n`).
use serde::{Deserialize, Serialize};

use crate::telemetry::TelemetryError;

/// Axis display range derived from two percentiles of the data.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DisplayBounds {
    pub lower: f64,
    pub upper: f64,
}
impl DisplayBounds {
    pub fn from_percentiles(
        values: &[f64],
        lower_q: f64,
        upper_q: f64,
    ) -> Result<Self, TelemetryError> {
        let sorted = sorted_copy(values)?;
        Ok(Self {
            lower: percentile_sorted(&sorted, lower_q),
            upper: percentile_sorted(&sorted, upper_q),
        })
    }
    /// Range safe to hand to a chart: ordered, and widened when both ends coincide.
    pub fn drawable(&self) -> (f64, f64) {
        let (lo, hi) = if self.lower <= self.upper {
            (self.lower, self.upper)
        } else {
            (self.upper, self.lower)
        };
        if (hi - lo).abs() < f64::EPSILON || !(hi - lo).is_finite() {
            let pad = if lo.is_finite() && lo != 0.0 {
                lo.abs() * 0.05
            } else {
                0.05
            };
            let center = if lo.is_finite() { lo } else { 0.0 };
            (center - pad, center + pad)
        } else {
            (lo, hi)
        }
    }
}
/// Mean and population standard deviation of a spectrum.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpectrumSummary {
    pub mean: f64,
    pub std_dev: f64,
}
impl SpectrumSummary {
    pub fn of(values: &[f64]) -> Result<Self, TelemetryError> {
        if values.is_empty() {
            return Err(TelemetryError::EmptyInput);
        }
        Ok(Self {
            mean: mean(values),
            std_dev: std_dev(values),
        })
    }
}
pub fn percentile(values: &[f64], q: f64) -> Result<f64, TelemetryError> {
    let sorted = sorted_copy(values)?;
    Ok(percentile_sorted(&sorted, q))
}
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}
pub fn std_dev(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let mean = mean(data);
    let variance = data
        .iter()
        .map(|v| {
            let delta = v - mean;
            delta * delta
        })
        .sum::<f64>()
        / data.len() as f64;
    variance.sqrt()
}
fn sorted_copy(values: &[f64]) -> Result<Vec<f64>, TelemetryError> {
    if values.is_empty() {
        return Err(TelemetryError::EmptyInput);
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    Ok(sorted)
}
fn percentile_sorted(sorted: &[f64], q: f64) -> f64 {
    let rank = q.clamp(0.0, 100.0) / 100.0 * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn percentile_interpolates_linearly() {
        let values = [4.0, 1.0, 3.0, 2.0, 5.0];
        assert_eq!(percentile(&values, 0.0).unwrap(), 1.0);
        assert_eq!(percentile(&values, 100.0).unwrap(), 5.0);
        assert_eq!(percentile(&values, 50.0).unwrap(), 3.0);
        // rank 0.1 * 4 = 0.4 -> 1.0 + 0.4 * (2.0 - 1.0)
        assert!((percentile(&values, 10.0).unwrap() - 1.4).abs() < 1e-12);
    }
    #[test]
    fn out_of_range_quantiles_clamp_to_extremes() {
        let values = [4.0, 1.0, 3.0, 2.0, 5.0];
        assert_eq!(percentile(&values, 150.0).unwrap(), 5.0);
        assert_eq!(percentile(&values, -3.0).unwrap(), 1.0);
        let inverted = DisplayBounds::from_percentiles(&values, 150.0, -3.0).unwrap();
        assert_eq!((inverted.lower, inverted.upper), (5.0, 1.0));
        assert_eq!(inverted.drawable(), (1.0, 5.0));
    }
    #[test]
    fn nan_sorts_after_every_number() {
        let values = [2.0, f64::NAN, 1.0];
        assert_eq!(percentile(&values, 0.0).unwrap(), 1.0);
        assert_eq!(percentile(&values, 50.0).unwrap(), 2.0);
        assert!(percentile(&values, 100.0).unwrap().is_nan());
    }
    #[test]
    fn bounds_are_ordered_for_increasing_quantiles() {
        let values: Vec<f64> = (0..200).map(|i| ((i * 37) % 101) as f64).collect();
        for (lo, hi) in [(0.05, 99.95), (10.0, 90.0), (49.0, 51.0)] {
            let bounds = DisplayBounds::from_percentiles(&values, lo, hi).unwrap();
            assert!(bounds.lower <= bounds.upper);
        }
        let same = DisplayBounds::from_percentiles(&values, 42.0, 42.0).unwrap();
        assert_eq!(same.lower, same.upper);
    }
    #[test]
    fn drawable_widens_degenerate_ranges() {
        let flat = DisplayBounds {
            lower: 0.0,
            upper: 0.0,
        };
        let (lo, hi) = flat.drawable();
        assert!(lo < 0.0 && hi > 0.0);
        let inverted = DisplayBounds {
            lower: 3.0,
            upper: 1.0,
        };
        assert_eq!(inverted.drawable(), (1.0, 3.0));
    }
    #[test]
    fn summary_uses_population_std() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let summary = SpectrumSummary::of(&values).unwrap();
        assert_eq!(summary.mean, 5.0);
        assert!((summary.std_dev - 2.0).abs() < 1e-12);
    }
    #[test]
    fn empty_input_is_rejected() {
        assert!(matches!(percentile(&[], 50.0), Err(TelemetryError::EmptyInput)));
        assert!(SpectrumSummary::of(&[]).is_err());
    }
}
