use std::collections::HashMap;
use std::path::PathBuf;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::telemetry::plot::{render_trajectory_grid_png, write_png, PlotStyle};
use crate::telemetry::{ObservationTable, TelemetryError};

/// Layout and column names of the per-vehicle trajectory grid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrajectoryOptions {
    pub id_column: String,
    pub time_column: String,
    /// Vehicles to sample, one grid row each.
    pub rows: usize,
    /// Channels per vehicle; must equal both list lengths below.
    pub cols: usize,
    pub channel_titles: Vec<String>,
    pub channel_names: Vec<String>,
    pub output_path: PathBuf,
}
impl Default for TrajectoryOptions {
    fn default() -> Self {
        Self {
            id_column: "id".into(),
            time_column: "time".into(),
            rows: 3,
            cols: 4,
            channel_titles: vec![
                "Vehicle Velocity".into(),
                "Vehicle Acceleration".into(),
                "Vehicle Angular Velocity Z".into(),
                "Vehicle Control Steer".into(),
            ],
            channel_names: vec![
                "Speed".into(),
                "ACC".into(),
                "angular_velocity_z".into(),
                "control_steer".into(),
            ],
            output_path: PathBuf::from("vehicle_plots.png"),
        }
    }
}
impl TrajectoryOptions {
    fn validate(&self) -> Result<(), TelemetryError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(TelemetryError::InvalidShape(format!(
                "grid must be at least 1x1, got {}x{}",
                self.rows, self.cols
            )));
        }
        if self.channel_titles.len() != self.cols || self.channel_names.len() != self.cols {
            return Err(TelemetryError::InvalidShape(format!(
                "expected {} channels, got {} titles and {} names",
                self.cols,
                self.channel_titles.len(),
                self.channel_names.len()
            )));
        }
        Ok(())
    }
}
/// Rows of a single vehicle, in table order.
#[derive(Clone, Debug)]
pub struct VehicleTrajectory {
    pub id: String,
    pub rows: ObservationTable,
}
/// Sampled vehicles in sampling order.
#[derive(Clone, Debug)]
pub struct TrajectorySample {
    pub vehicles: Vec<VehicleTrajectory>,
    pub channels: usize,
}
impl TrajectorySample {
    pub fn panel_count(&self) -> usize {
        self.vehicles.len() * self.channels
    }
    pub fn last(&self) -> Option<&VehicleTrajectory> {
        self.vehicles.last()
    }
}
/// Draws `count` distinct ids uniformly without replacement.
pub fn sample_vehicle_ids<R: Rng + ?Sized>(
    table: &ObservationTable,
    id_column: &str,
    count: usize,
    rng: &mut R,
) -> Result<Vec<String>, TelemetryError> {
    let ids = table.unique_labels(id_column)?;
    if count > ids.len() {
        return Err(TelemetryError::InvalidShape(format!(
            "cannot sample {count} vehicles from {} distinct ids",
            ids.len()
        )));
    }
    let picked: Vec<String> = rand::seq::index::sample(rng, ids.len(), count)
        .into_iter()
        .map(|idx| ids[idx].clone())
        .collect();
    log::debug!("sampled vehicles {picked:?}");
    Ok(picked)
}
/// Samples vehicles and splits the table into one subset per sampled id.
pub fn sample_trajectories<R: Rng + ?Sized>(
    table: &ObservationTable,
    options: &TrajectoryOptions,
    rng: &mut R,
) -> Result<TrajectorySample, TelemetryError> {
    options.validate()?;
    let ids = sample_vehicle_ids(table, &options.id_column, options.rows, rng)?;
    let mut rows_by_id: HashMap<&str, Vec<usize>> =
        ids.iter().map(|id| (id.as_str(), Vec::new())).collect();
    for (row, label) in table.labels(&options.id_column)?.iter().enumerate() {
        if let Some(rows) = rows_by_id.get_mut(label.as_str()) {
            rows.push(row);
        }
    }
    let mut vehicles = Vec::with_capacity(ids.len());
    for id in &ids {
        let rows = table.select_rows(&rows_by_id[id.as_str()]);
        rows.numeric(&options.time_column)?;
        for name in &options.channel_names {
            rows.numeric(name)?;
        }
        vehicles.push(VehicleTrajectory {
            id: id.clone(),
            rows,
        });
    }
    Ok(TrajectorySample {
        vehicles,
        channels: options.cols,
    })
}
/// Renders the sampled grid to `options.output_path` and returns the rows of the
/// last sampled vehicle.
pub fn plot_trajectories<R: Rng + ?Sized>(
    table: &ObservationTable,
    options: &TrajectoryOptions,
    rng: &mut R,
) -> Result<ObservationTable, TelemetryError> {
    let sample = sample_trajectories(table, options, rng)?;
    let png = render_trajectory_grid_png(&sample, options, &PlotStyle::default())?;
    write_png(&options.output_path, &png)?;
    sample
        .vehicles
        .into_iter()
        .last()
        .map(|vehicle| vehicle.rows)
        .ok_or_else(|| TelemetryError::InvalidShape("no vehicles sampled".into()))
}
