//! Tick-driven scheduling engine and run metrics.
//!
//! [`Simulator`] replays a process set under one discipline, one logical
//! tick at a time, over a single CPU and a single IO device.
//! [`RunMetrics`] aggregates the completed-process list into averages,
//! utilization, and throughput.

mod metrics;
mod simulator;

pub use metrics::RunMetrics;
pub use simulator::{SimulationRun, Simulator, DEFAULT_QUANTUM};
