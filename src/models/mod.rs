//! Simulation domain models.
//!
//! Provides the core data types for describing a workload: the
//! [`Process`] timing state machine and the [`Discipline`] under which
//! the engine replays it.

mod discipline;
mod process;

pub use discipline::{Discipline, ParseDisciplineError};
pub use process::{Process, ProcessState};
