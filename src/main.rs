// src/main.rs
// Demo entry: builds a synthetic fleet and renders both plots into the working directory.
use std::f64::consts::PI;

use rand::rngs::StdRng;
use rand::SeedableRng;
use vehicle_telemetry_plots::{
    plot_frequency_analysis, plot_trajectories, FrequencyPlotOptions, ObservationTable,
    TrajectoryOptions,
};

const VEHICLES: usize = 6;
const STEPS: usize = 400;
const DT_SECONDS: f64 = 0.1;

fn synthetic_fleet() -> anyhow::Result<ObservationTable> {
    let n = VEHICLES * STEPS;
    let mut ids = Vec::with_capacity(n);
    let mut time = Vec::with_capacity(n);
    let mut speed = Vec::with_capacity(n);
    let mut acc = Vec::with_capacity(n);
    let mut yaw_rate = Vec::with_capacity(n);
    let mut steer = Vec::with_capacity(n);
    for v in 0..VEHICLES {
        let cruise = 8.0 + 2.0 * v as f64;
        let period = 12.0 + 3.0 * v as f64;
        for step in 0..STEPS {
            let t = step as f64 * DT_SECONDS;
            let phase = 2.0 * PI * t / period;
            ids.push(format!("veh-{v:02}"));
            time.push(t);
            speed.push(cruise + 1.5 * phase.sin());
            acc.push(1.5 * 2.0 * PI / period * phase.cos());
            yaw_rate.push(0.05 * (0.5 * phase).sin());
            steer.push(0.2 * (0.5 * phase).sin());
        }
    }
    let table = ObservationTable::new()
        .with_column("id", ids)?
        .with_column("time", time)?
        .with_column("speed", speed.clone())?
        .with_column("acc", acc.clone())?
        .with_column("Speed", speed)?
        .with_column("ACC", acc)?
        .with_column("angular_velocity_z", yaw_rate)?
        .with_column("control_steer", steer)?;
    Ok(table)
}
fn main() -> anyhow::Result<()> {
    env_logger::init();
    let table = synthetic_fleet()?;
    log::info!("synthetic fleet: {} rows", table.len());

    let frequency = FrequencyPlotOptions::default();
    log::debug!("frequency options: {}", serde_json::to_string(&frequency)?);
    plot_frequency_analysis(&table, &frequency)?;

    let trajectories = TrajectoryOptions::default();
    log::debug!("trajectory options: {}", serde_json::to_string(&trajectories)?);
    let mut rng = StdRng::from_entropy();
    let last = plot_trajectories(&table, &trajectories, &mut rng)?;
    log::info!("last sampled vehicle has {} rows", last.len());
    Ok(())
}
