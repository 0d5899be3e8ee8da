//! Frequency and trajectory plots for vehicle telemetry tables.
pub mod telemetry;
pub use telemetry::*;
