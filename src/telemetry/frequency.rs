use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::telemetry::plot::{render_frequency_png, write_png, PlotStyle};
use crate::telemetry::spectrum::single_sided_amplitude;
use crate::telemetry::stats::{DisplayBounds, SpectrumSummary};
use crate::telemetry::{ObservationTable, TelemetryError};

/// Inputs of the speed/acceleration frequency plot.
///
/// Percentiles are in `[0, 100]` and only shape the y-axis ranges; the full
/// spectrum is still drawn and summarized. Passing `lower >= upper` is accepted
/// and yields a flat or reordered axis.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrequencyPlotOptions {
    pub speed_column: String,
    pub accel_column: String,
    pub output_path: PathBuf,
    pub speed_lower_percentile: f64,
    pub speed_upper_percentile: f64,
    pub accel_lower_percentile: f64,
    pub accel_upper_percentile: f64,
}
impl Default for FrequencyPlotOptions {
    fn default() -> Self {
        Self {
            speed_column: "speed".into(),
            accel_column: "acc".into(),
            output_path: PathBuf::from("frequency_analysis.png"),
            speed_lower_percentile: 0.05,
            speed_upper_percentile: 99.95,
            accel_lower_percentile: 0.05,
            accel_upper_percentile: 99.95,
        }
    }
}
/// Spectrum of one signal together with its display range and summary.
#[derive(Clone, Debug, Serialize)]
pub struct SignalSpectrum {
    pub label: String,
    pub amplitudes: Vec<f64>,
    pub bounds: DisplayBounds,
    pub summary: SpectrumSummary,
}
impl SignalSpectrum {
    fn compute(
        label: &str,
        signal: &[f64],
        lower_q: f64,
        upper_q: f64,
    ) -> Result<Self, TelemetryError> {
        let amplitudes = single_sided_amplitude(signal)?;
        let bounds = DisplayBounds::from_percentiles(&amplitudes, lower_q, upper_q)?;
        let summary = SpectrumSummary::of(&amplitudes)?;
        log::debug!(
            "{label}: {} bins, bounds [{:.4}, {:.4}], mean {:.4}, std {:.4}",
            amplitudes.len(),
            bounds.lower,
            bounds.upper,
            summary.mean,
            summary.std_dev
        );
        Ok(Self {
            label: label.to_owned(),
            amplitudes,
            bounds,
            summary,
        })
    }
    pub fn axis_label(&self) -> String {
        format!("Amplitude ({})", self.label)
    }
    pub fn annotation_lines(&self) -> [String; 2] {
        [
            format!("{} Mean Amplitude: {:.2}", self.label, self.summary.mean),
            format!("{} Amplitude Std Dev: {:.2}", self.label, self.summary.std_dev),
        ]
    }
    /// Bin index holding the largest amplitude.
    pub fn peak_bin(&self) -> Option<usize> {
        self.amplitudes
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(idx, _)| idx)
    }
}
#[derive(Clone, Debug, Serialize)]
pub struct FrequencyAnalysis {
    pub speed: SignalSpectrum,
    pub accel: SignalSpectrum,
}
/// Computes both spectra without touching any graphics backend.
pub fn analyze_frequency(
    table: &ObservationTable,
    options: &FrequencyPlotOptions,
) -> Result<FrequencyAnalysis, TelemetryError> {
    let speed = table.numeric(&options.speed_column)?;
    let accel = table.numeric(&options.accel_column)?;
    if table.is_empty() {
        return Err(TelemetryError::EmptyInput);
    }
    Ok(FrequencyAnalysis {
        speed: SignalSpectrum::compute(
            "Speed",
            speed,
            options.speed_lower_percentile,
            options.speed_upper_percentile,
        )?,
        accel: SignalSpectrum::compute(
            "Accel",
            accel,
            options.accel_lower_percentile,
            options.accel_upper_percentile,
        )?,
    })
}
/// Renders the dual-axis amplitude chart and writes it to `options.output_path`.
pub fn plot_frequency_analysis(
    table: &ObservationTable,
    options: &FrequencyPlotOptions,
) -> Result<(), TelemetryError> {
    let analysis = analyze_frequency(table, options)?;
    let png = render_frequency_png(&analysis, &PlotStyle::default())?;
    write_png(&options.output_path, &png)
}
#[cfg(test)]
mod tests {
    use super::*;
    fn periodic_table() -> ObservationTable {
        let speed: Vec<f64> = [0.0, 1.0, 0.0, -1.0]
            .iter()
            .copied()
            .cycle()
            .take(40)
            .collect();
        ObservationTable::new()
            .with_column("speed", speed)
            .unwrap()
            .with_column("acc", vec![0.0; 40])
            .unwrap()
    }
    #[test]
    fn periodic_speed_peaks_at_quarter_length() {
        let analysis = analyze_frequency(&periodic_table(), &FrequencyPlotOptions::default())
            .unwrap();
        assert_eq!(analysis.speed.amplitudes.len(), 20);
        assert_eq!(analysis.speed.peak_bin(), Some(10));
        assert!((analysis.speed.amplitudes[10] - 1.0).abs() < 1e-9);
        assert!(analysis.accel.amplitudes.iter().all(|a| *a == 0.0));
        assert_eq!(
            analysis.accel.annotation_lines(),
            [
                "Accel Mean Amplitude: 0.00".to_string(),
                "Accel Amplitude Std Dev: 0.00".to_string()
            ]
        );
    }
    #[test]
    fn summary_matches_independent_computation() {
        let analysis = analyze_frequency(&periodic_table(), &FrequencyPlotOptions::default())
            .unwrap();
        let amps = &analysis.speed.amplitudes;
        let mean = amps.iter().sum::<f64>() / amps.len() as f64;
        let var = amps.iter().map(|a| (a - mean).powi(2)).sum::<f64>() / amps.len() as f64;
        assert!((analysis.speed.summary.mean - mean).abs() < 1e-12);
        assert!((analysis.speed.summary.std_dev - var.sqrt()).abs() < 1e-12);
        assert!(analysis.speed.bounds.lower <= analysis.speed.bounds.upper);
    }
    #[test]
    fn missing_or_empty_columns_fail() {
        let options = FrequencyPlotOptions {
            accel_column: "acceleration".into(),
            ..Default::default()
        };
        assert!(matches!(
            analyze_frequency(&periodic_table(), &options),
            Err(TelemetryError::MissingColumn { .. })
        ));
        let empty = ObservationTable::new()
            .with_column("speed", Vec::<f64>::new())
            .unwrap()
            .with_column("acc", Vec::<f64>::new())
            .unwrap();
        assert!(matches!(
            analyze_frequency(&empty, &FrequencyPlotOptions::default()),
            Err(TelemetryError::EmptyInput)
        ));
    }
    #[test]
    fn options_fill_defaults_from_partial_json() {
        let options: FrequencyPlotOptions =
            serde_json::from_str(r#"{"speed_column": "Speed", "speed_upper_percentile": 99.0}"#)
                .unwrap();
        assert_eq!(options.speed_column, "Speed");
        assert_eq!(options.speed_upper_percentile, 99.0);
        assert_eq!(options.accel_column, "acc");
        assert_eq!(options.output_path, PathBuf::from("frequency_analysis.png"));
    }
    #[test]
    fn plot_writes_png_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let options = FrequencyPlotOptions {
            output_path: temp_dir.path().join("frequency_analysis.png"),
            ..Default::default()
        };
        plot_frequency_analysis(&periodic_table(), &options).unwrap();
        let bytes = std::fs::read(&options.output_path).unwrap();
        assert!(bytes.starts_with(&[0x89, b'P', b'N', b'G']));
    }
}
