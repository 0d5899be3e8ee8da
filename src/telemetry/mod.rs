// src/telemetry/mod.rs
pub mod error;
pub mod frequency;
pub mod plot;
pub mod spectrum;
pub mod stats;
pub mod table;
pub mod trajectory;
pub use error::TelemetryError;
pub use frequency::{
    analyze_frequency, plot_frequency_analysis, FrequencyAnalysis, FrequencyPlotOptions,
    SignalSpectrum,
};
pub use plot::{render_frequency_png, render_trajectory_grid_png, PlotStyle};
pub use spectrum::single_sided_amplitude;
pub use stats::{DisplayBounds, SpectrumSummary};
pub use table::{Column, ObservationTable};
pub use trajectory::{
    plot_trajectories, sample_trajectories, sample_vehicle_ids, TrajectoryOptions,
    TrajectorySample, VehicleTrajectory,
};
