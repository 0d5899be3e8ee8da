use std::io::Cursor;
use std::path::Path;

use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
use plotters::prelude::LineSeries;
use plotters::prelude::*;

use crate::telemetry::error::TelemetryError;
use crate::telemetry::frequency::FrequencyAnalysis;
use crate::telemetry::stats::DisplayBounds;
use crate::telemetry::trajectory::{TrajectoryOptions, TrajectorySample};

/// Figure size of the trajectory grid, in display units (100 px each).
pub const TRAJECTORY_FIGURE_UNITS: (u32, u32) = (16, 48);
const PIXELS_PER_UNIT: u32 = 100;
const SPEED_OPACITY: f64 = 0.9;
const ACCEL_OPACITY: f64 = 0.3;
#[derive(Clone, Debug)]
pub struct PlotStyle {
    pub width: u32,
    pub height: u32,
    pub background: RGBColor,
    pub speed_color: RGBColor,
    pub accel_color: RGBColor,
    pub trace_color: RGBColor,
}
impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            width: 900,
            height: 600,
            background: WHITE,
            speed_color: RED,
            accel_color: BLUE,
            trace_color: RGBColor(31, 119, 180),
        }
    }
}
pub fn render_frequency_png(
    analysis: &FrequencyAnalysis,
    style: &PlotStyle,
) -> Result<Vec<u8>, TelemetryError> {
    let speed = &analysis.speed;
    let accel = &analysis.accel;
    let bins = speed.amplitudes.len().max(accel.amplitudes.len());
    if bins == 0 {
        return Err(TelemetryError::EmptyInput);
    }
    let x_max = (bins.saturating_sub(1)).max(1) as f64;
    let (speed_lo, speed_hi) = speed.bounds.drawable();
    let (accel_lo, accel_hi) = accel.bounds.drawable();
    let mut buffer = vec![0u8; (style.width * style.height * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (style.width, style.height))
            .into_drawing_area();
        root.fill(&style.background)?;
        let mut chart = ChartBuilder::on(&root)
            .margin(10)
            .set_label_area_size(LabelAreaPosition::Left, 60)
            .set_label_area_size(LabelAreaPosition::Right, 60)
            .set_label_area_size(LabelAreaPosition::Bottom, 40)
            .build_cartesian_2d(0f64..x_max, speed_lo..speed_hi)?
            .set_secondary_coord(0f64..x_max, accel_lo..accel_hi);
        chart
            .configure_mesh()
            .light_line_style(&BLACK.mix(0.05))
            .x_desc("Frequency")
            .y_desc(speed.axis_label())
            .axis_desc_style(("sans-serif", 15).into_font().color(&style.speed_color))
            .draw()?;
        chart
            .configure_secondary_axes()
            .y_desc(accel.axis_label())
            .axis_desc_style(("sans-serif", 15).into_font().color(&style.accel_color))
            .draw()?;
        chart.draw_series(LineSeries::new(
            bin_points(&speed.amplitudes),
            style.speed_color.mix(SPEED_OPACITY).stroke_width(1),
        ))?;
        chart.draw_secondary_series(LineSeries::new(
            bin_points(&accel.amplitudes),
            style.accel_color.mix(ACCEL_OPACITY).stroke_width(1),
        ))?;
        // Annotations sit at fixed fractions of the plot area, in speed-axis coordinates.
        let at = |fx: f64, fy: f64| {
            (
                fx * x_max,
                speed_hi - fy * (speed_hi - speed_lo),
            )
        };
        let line_gap = 0.06;
        for (signal, top, color) in [
            (speed, 0.10, style.speed_color),
            (accel, 0.30, style.accel_color),
        ] {
            let font = ("sans-serif", 14).into_font().color(&color);
            let [first, second] = signal.annotation_lines();
            chart.draw_series(std::iter::once(Text::new(first, at(0.05, top), font.clone())))?;
            chart.draw_series(std::iter::once(Text::new(
                second,
                at(0.05, top + line_gap),
                font,
            )))?;
        }
        root.present()?;
    }
    encode_png(buffer, style.width, style.height)
}
pub fn render_trajectory_grid_png(
    sample: &TrajectorySample,
    options: &TrajectoryOptions,
    style: &PlotStyle,
) -> Result<Vec<u8>, TelemetryError> {
    if sample.vehicles.is_empty() || options.channel_names.is_empty() {
        return Err(TelemetryError::InvalidShape(
            "trajectory grid needs at least one row and one column".into(),
        ));
    }
    let width = TRAJECTORY_FIGURE_UNITS.0 * PIXELS_PER_UNIT;
    let height = TRAJECTORY_FIGURE_UNITS.1 * PIXELS_PER_UNIT;
    let rows = sample.vehicles.len();
    let cols = options.channel_names.len();
    let mut buffer = vec![0u8; (width * height * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        root.fill(&style.background)?;
        let panels = root.split_evenly((rows, cols));
        for (i, vehicle) in sample.vehicles.iter().enumerate() {
            let time = vehicle.rows.numeric(&options.time_column)?;
            for (j, (name, title)) in options
                .channel_names
                .iter()
                .zip(&options.channel_titles)
                .enumerate()
            {
                let values = vehicle.rows.numeric(name)?;
                let (t_lo, t_hi) = data_range(time);
                let (y_lo, y_hi) = data_range(values);
                let mut builder = ChartBuilder::on(&panels[i * cols + j]);
                builder
                    .margin(8)
                    .set_label_area_size(LabelAreaPosition::Left, 55)
                    .set_label_area_size(LabelAreaPosition::Bottom, 35);
                if i == 0 {
                    builder.caption(title, ("sans-serif", 18));
                }
                let mut chart = builder.build_cartesian_2d(t_lo..t_hi, y_lo..y_hi)?;
                chart
                    .configure_mesh()
                    .light_line_style(&BLACK.mix(0.05))
                    .x_desc("Time")
                    .y_desc(title.as_str())
                    .draw()?;
                chart.draw_series(LineSeries::new(
                    time.iter().copied().zip(values.iter().copied()),
                    &style.trace_color,
                ))?;
            }
        }
        root.present()?;
    }
    encode_png(buffer, width, height)
}
pub(crate) fn write_png(path: &Path, png: &[u8]) -> Result<(), TelemetryError> {
    std::fs::write(path, png)?;
    log::info!("wrote {} bytes to {}", png.len(), path.display());
    Ok(())
}
fn bin_points(amplitudes: &[f64]) -> impl Iterator<Item = (f64, f64)> + '_ {
    amplitudes.iter().enumerate().map(|(i, a)| (i as f64, *a))
}
fn data_range(values: &[f64]) -> (f64, f64) {
    let lower = values.iter().copied().fold(f64::INFINITY, f64::min);
    let upper = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    DisplayBounds { lower, upper }.drawable()
}
/// Wraps a rendered RGB canvas and encodes it as PNG bytes.
fn encode_png(canvas: Vec<u8>, width: u32, height: u32) -> Result<Vec<u8>, TelemetryError> {
    let rgb = ImageBuffer::<Rgb<u8>, _>::from_raw(width, height, canvas).ok_or_else(|| {
        TelemetryError::Plot(format!("canvas does not match a {width}x{height} RGB image"))
    })?;
    let mut png = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(rgb).write_to(&mut png, ImageFormat::Png)?;
    Ok(png.into_inner())
}
