use rustfft::{num_complex::Complex64, FftPlanner};

use crate::telemetry::TelemetryError;

/// Single-sided amplitude spectrum of a real signal.
///
/// Runs a full-length forward FFT, keeps the first `N / 2` bins and scales the
/// magnitudes by `2 / N` so a unit sine shows up with amplitude ~1.0 in its bin.
pub fn single_sided_amplitude(signal: &[f64]) -> Result<Vec<f64>, TelemetryError> {
    if signal.is_empty() {
        return Err(TelemetryError::EmptyInput);
    }
    let n = signal.len();
    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(n);
    let mut buffer: Vec<Complex64> = signal.iter().map(|&v| Complex64::new(v, 0.0)).collect();
    fft.process(&mut buffer);
    let scale = 2.0 / n as f64;
    Ok(buffer.iter().take(n / 2).map(|c| c.norm() * scale).collect())
}
#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;
    #[test]
    fn spectrum_has_half_length_and_is_non_negative() {
        let signal: Vec<f64> = (0..64).map(|i| ((i * 7) % 11) as f64 - 5.0).collect();
        let spectrum = single_sided_amplitude(&signal).unwrap();
        assert_eq!(spectrum.len(), 32);
        assert!(spectrum.iter().all(|a| *a >= 0.0));
    }
    #[test]
    fn odd_length_rounds_down() {
        let spectrum = single_sided_amplitude(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert_eq!(spectrum.len(), 2);
    }
    #[test]
    fn sine_peaks_in_its_bin() {
        let n = 128;
        let k = 9;
        let signal: Vec<f64> = (0..n)
            .map(|i| (2.0 * PI * k as f64 * i as f64 / n as f64).sin())
            .collect();
        let spectrum = single_sided_amplitude(&signal).unwrap();
        let peak = spectrum
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(idx, _)| idx)
            .unwrap();
        assert_eq!(peak, k);
        assert!((spectrum[k] - 1.0).abs() < 1e-9);
    }
    #[test]
    fn empty_signal_is_rejected() {
        assert!(matches!(
            single_sided_amplitude(&[]),
            Err(TelemetryError::EmptyInput)
        ));
    }
}
