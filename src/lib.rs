//! Discrete-event CPU/IO scheduling simulator.
//!
//! Replays a set of processes — each with an arrival time, a total CPU
//! demand, and optional periodic IO bursts — tick by tick over a single
//! CPU and a single IO device, under one of four disciplines:
//! shortest-job-first (`sjf`), shortest-remaining-time-first (`srtf`),
//! round-robin (`rr`), or virtual round-robin (`vrr`). The engine
//! returns data (completed processes, per-tick timelines, aggregate
//! metrics); rendering belongs to the caller.
//!
//! # Modules
//!
//! - **`models`**: `Process` timing state machine, `Discipline` selection
//! - **`queue`**: the three ready-queue orderings behind one interface
//! - **`engine`**: the tick loop and run metrics
//! - **`loader`**: semicolon-delimited process file parsing
//! - **`validation`**: pre-run structural checks on a process set
//!
//! # Example
//!
//! ```
//! use procsim::{Discipline, Process, Simulator};
//!
//! let procs = vec![
//!     Process::new("A", 0, 5),
//!     Process::new("B", 0, 4).with_io(2, 2),
//! ];
//! let mut sim = Simulator::new();
//! let run = sim.run(&procs, Discipline::Srtf);
//! assert_eq!(run.completed.len(), 2);
//! assert!(run.metrics.cpu_utilization <= 100.0);
//! ```

pub mod engine;
pub mod loader;
pub mod models;
pub mod queue;
pub mod validation;

pub use engine::{RunMetrics, SimulationRun, Simulator, DEFAULT_QUANTUM};
pub use models::{Discipline, ParseDisciplineError, Process, ProcessState};
pub use queue::ReadyQueue;
