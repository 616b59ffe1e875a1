//! The tick loop.
//!
//! # Per-tick order
//!
//! 1. **Arrivals** — pending processes whose arrival equals the clock
//!    enter the ready queue.
//! 2. **CPU step** — the running process executes one tick; on
//!    termination it moves to the completed list, on an IO trigger it
//!    moves to the IO queue with its unused quantum recorded.
//! 3. **IO step** — the IO-active burst advances; a finished process
//!    re-enters the ready queue (the auxiliary queue under VRR) and the
//!    next blocked process starts its burst.
//! 4. **Reschedule** — the discipline predicate decides whether to
//!    dispatch, preempting the running process if one is present.
//!
//! The order is a correctness requirement: arrivals must be visible to
//! the same tick's reschedule decision, and a process freed by IO must be
//! eligible for immediate redispatch.

use std::collections::VecDeque;
use std::num::NonZeroU64;

use serde::Serialize;

use crate::engine::RunMetrics;
use crate::models::{Discipline, Process, ProcessState};
use crate::queue::ReadyQueue;

/// Time quantum applied to RR/VRR when none is configured.
pub const DEFAULT_QUANTUM: u64 = 5;

/// Everything a finished run exposes: the caller renders, the engine
/// only returns data.
///
/// The timelines are indexed by tick: entry `t` names the process that
/// executed on (CPU) or occupied (IO) the device during tick `t`, or
/// `None` if the device was idle. Their length is `total_ticks + 1`
/// because tick 0 is always an admission/dispatch tick.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationRun {
    /// Discipline the run was replayed under.
    pub discipline: Discipline,
    /// Terminated processes, in completion order.
    pub completed: Vec<Process>,
    /// Aggregate performance metrics.
    pub metrics: RunMetrics,
    /// CPU occupancy per tick.
    pub cpu_timeline: Vec<Option<String>>,
    /// IO device occupancy per tick.
    pub io_timeline: Vec<Option<String>>,
}

impl SimulationRun {
    /// Looks up a completed process by name.
    pub fn completed_process(&self, name: &str) -> Option<&Process> {
        self.completed.iter().find(|p| p.name == name)
    }
}

/// Discrete-event simulator of one CPU and one IO device.
///
/// The simulator owns at most one running process and at most one
/// IO-active process at any tick; every other live process sits in
/// exactly one of the pending list, the ready queue, the IO queue, or
/// (VRR) the auxiliary resume queue. [`Simulator::run`] resets all of
/// that state, so one simulator can replay the same process set under
/// several disciplines with independent results.
///
/// # Example
///
/// ```
/// use procsim::models::{Discipline, Process};
/// use procsim::engine::Simulator;
///
/// let procs = vec![Process::new("A", 0, 5), Process::new("B", 2, 3)];
/// let mut sim = Simulator::new();
/// let run = sim.run(&procs, Discipline::Sjf);
/// assert_eq!(run.completed.len(), 2);
/// assert_eq!(run.completed_process("A").and_then(|p| p.completion_time()), Some(5));
/// ```
#[derive(Debug)]
pub struct Simulator {
    quantum: i64,
    discipline: Discipline,
    clock: u64,
    /// Ticks elapsed since the last dispatch, offset so that the RR/VRR
    /// predicate is `quantum_clock + 1 >= quantum`. A fresh dispatch sets
    /// it to -1; resuming from the auxiliary queue sets it to the saved
    /// consumed count minus one, so only the remainder must elapse.
    quantum_clock: i64,
    pending: Vec<Process>,
    ready: ReadyQueue,
    io_queue: VecDeque<Process>,
    aux_queue: VecDeque<Process>,
    running: Option<Process>,
    io_active: Option<Process>,
    io_elapsed: u64,
    busy_ticks: u64,
    last_completion: u64,
    completed: Vec<Process>,
    cpu_timeline: Vec<Option<String>>,
    io_timeline: Vec<Option<String>>,
}

impl Simulator {
    /// Creates a simulator with the default quantum.
    pub fn new() -> Self {
        Self {
            quantum: DEFAULT_QUANTUM as i64,
            discipline: Discipline::Sjf,
            clock: 0,
            quantum_clock: 0,
            pending: Vec::new(),
            ready: ReadyQueue::new(Discipline::Sjf),
            io_queue: VecDeque::new(),
            aux_queue: VecDeque::new(),
            running: None,
            io_active: None,
            io_elapsed: 0,
            busy_ticks: 0,
            last_completion: 0,
            completed: Vec::new(),
            cpu_timeline: Vec::new(),
            io_timeline: Vec::new(),
        }
    }

    /// Sets the RR/VRR time quantum.
    pub fn with_quantum(mut self, quantum: NonZeroU64) -> Self {
        self.quantum = quantum.get() as i64;
        self
    }

    /// The configured time quantum.
    pub fn quantum(&self) -> u64 {
        self.quantum as u64
    }

    /// Replays `processes` under `discipline` until every process has
    /// terminated, and returns the run report.
    ///
    /// The input set is cloned and its runtime state reset, so the same
    /// slice can be passed to consecutive runs.
    pub fn run(&mut self, processes: &[Process], discipline: Discipline) -> SimulationRun {
        self.reset(discipline);
        self.pending = processes.to_vec();
        for p in &mut self.pending {
            p.reset_runtime();
        }
        let total = self.pending.len();

        while self.completed.len() < total {
            self.cpu_timeline.push(None);
            self.io_timeline.push(None);

            self.admit_arrivals();
            self.step_cpu();
            self.step_io();
            if self.should_dispatch() {
                self.dispatch();
            }

            self.clock += 1;
            self.quantum_clock += 1;
        }

        // Total ticks is the tick index of the last recorded completion;
        // the loop's final iteration is not an extra simulated tick.
        let total_ticks = self.last_completion;
        SimulationRun {
            discipline,
            metrics: RunMetrics::calculate(&self.completed, total_ticks, self.busy_ticks),
            completed: std::mem::take(&mut self.completed),
            cpu_timeline: std::mem::take(&mut self.cpu_timeline),
            io_timeline: std::mem::take(&mut self.io_timeline),
        }
    }

    fn reset(&mut self, discipline: Discipline) {
        self.discipline = discipline;
        self.clock = 0;
        self.quantum_clock = 0;
        self.pending.clear();
        self.ready = ReadyQueue::new(discipline);
        self.io_queue.clear();
        self.aux_queue.clear();
        self.running = None;
        self.io_active = None;
        self.io_elapsed = 0;
        self.busy_ticks = 0;
        self.last_completion = 0;
        self.completed.clear();
        self.cpu_timeline.clear();
        self.io_timeline.clear();
    }

    /// Moves every pending process whose arrival time equals the current
    /// tick into the ready queue. Stable partition: same-tick arrivals
    /// keep their input order.
    fn admit_arrivals(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let clock = self.clock;
        let pending = std::mem::take(&mut self.pending);
        let (arrived, waiting): (Vec<_>, Vec<_>) =
            pending.into_iter().partition(|p| p.arrival == clock);
        self.pending = waiting;
        for mut p in arrived {
            p.admit();
            log::trace!("t={} arrive {}", clock, p.name);
            self.ready.push(p);
        }
    }

    fn step_cpu(&mut self) {
        let Some(mut proc) = self.running.take() else {
            return;
        };
        self.busy_ticks += 1;
        if let Some(slot) = self.cpu_timeline.last_mut() {
            *slot = Some(proc.name.clone());
        }
        match proc.exec_tick() {
            ProcessState::Terminated => {
                proc.mark_completed(self.clock);
                self.last_completion = self.clock;
                log::trace!("t={} complete {}", self.clock, proc.name);
                self.completed.push(proc);
            }
            ProcessState::Blocked => {
                let consumed = (self.quantum_clock + 1) % self.quantum;
                proc.save_quantum(consumed);
                log::trace!(
                    "t={} block {} (remaining {})",
                    self.clock,
                    proc.name,
                    proc.remaining()
                );
                self.io_queue.push_back(proc);
            }
            _ => self.running = Some(proc),
        }
    }

    fn step_io(&mut self) {
        if let Some(mut proc) = self.io_active.take() {
            self.io_elapsed += 1;
            if let Some(slot) = self.io_timeline.last_mut() {
                *slot = Some(proc.name.clone());
            }
            if self.io_elapsed >= proc.io_burst {
                proc.mark_ready();
                log::trace!("t={} io complete {}", self.clock, proc.name);
                if self.discipline == Discipline::Vrr {
                    self.aux_queue.push_back(proc);
                } else {
                    self.ready.push(proc);
                }
            } else {
                self.io_active = Some(proc);
            }
        }
        if self.io_active.is_none() {
            if let Some(next) = self.io_queue.pop_front() {
                log::trace!("t={} io start {}", self.clock, next.name);
                self.io_elapsed = 0;
                self.io_active = Some(next);
            }
        }
    }

    /// The discipline-specific reschedule predicate.
    fn should_dispatch(&self) -> bool {
        let quantum_expired =
            self.running.is_none() || self.quantum_clock + 1 >= self.quantum;
        match self.discipline {
            Discipline::Sjf => self.running.is_none() && !self.ready.is_empty(),
            Discipline::Srtf => match (&self.running, self.ready.peek()) {
                (_, None) => false,
                (None, Some(_)) => true,
                (Some(run), Some(head)) => head.remaining() < run.remaining(),
            },
            Discipline::Rr => !self.ready.is_empty() && quantum_expired,
            Discipline::Vrr => {
                (!self.ready.is_empty() || !self.aux_queue.is_empty()) && quantum_expired
            }
        }
    }

    /// Picks the next process to run, preempting the current one.
    ///
    /// The auxiliary resume queue wins over the ready queue: a process
    /// returning from IO continues its interrupted quantum rather than
    /// starting a fresh one.
    fn dispatch(&mut self) {
        let mut next = if let Some(p) = self.aux_queue.pop_front() {
            self.quantum_clock = p.saved_quantum() - 1;
            p
        } else if let Some(p) = self.ready.pop() {
            self.quantum_clock = -1;
            p
        } else {
            return;
        };
        if let Some(mut prev) = self.running.take() {
            prev.mark_ready();
            self.ready.push(prev);
        }
        next.mark_dispatched(self.clock);
        log::trace!("t={} dispatch {}", self.clock, next.name);
        self.running = Some(next);
    }
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new()
    }
}
