//! Process model.
//!
//! A process is one schedulable unit of work: a total CPU demand that is
//! consumed one tick at a time, optionally interrupted by IO bursts at a
//! fixed rate. The struct carries both the static description (arrival,
//! burst lengths, IO rate) and the runtime timing state the engine mutates
//! while replaying a discipline.

use serde::Serialize;

/// Lifecycle state of a process.
///
/// `Created` covers the span between load time and the arrival tick;
/// everything after admission alternates between `Ready`, `Running`, and
/// `Blocked` until the remaining CPU burst reaches zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum ProcessState {
    /// Loaded but not yet arrived.
    #[default]
    Created,
    /// Waiting in the ready queue (or the VRR auxiliary queue).
    Ready,
    /// Occupying the CPU.
    Running,
    /// Waiting for, or occupying, the IO device.
    Blocked,
    /// Remaining CPU burst reached zero; never scheduled again.
    Terminated,
}

/// One schedulable process and its timing state machine.
///
/// The remaining CPU burst decreases by exactly 1 per executed tick and
/// never below zero; [`Process::exec_tick`] is the only operation that
/// changes state during CPU execution. Turnaround, waiting, and response
/// times are derived from the stored timestamps, never stored themselves.
///
/// # Example
///
/// ```
/// use procsim::models::Process;
///
/// // Arrives at tick 3, needs 10 CPU ticks, blocks for a 2-tick IO burst
/// // after every 4 ticks of execution.
/// let p = Process::new("A", 3, 10).with_io(2, 4);
/// assert_eq!(p.remaining(), 10);
/// assert_eq!(p.turnaround_time(), None);
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct Process {
    /// Process identifier.
    pub name: String,
    /// Tick at which the process becomes ready.
    pub arrival: u64,
    /// Total CPU demand in ticks.
    pub cpu_burst: u64,
    /// Length of one IO burst in ticks.
    pub io_burst: u64,
    /// CPU ticks executed between forced IO bursts. `0` disables IO.
    pub io_rate: u64,
    remaining: u64,
    #[serde(skip)]
    ticks_since_io: u64,
    start: Option<u64>,
    completion: Option<u64>,
    #[serde(skip)]
    saved_quantum: i64,
    state: ProcessState,
}

impl Process {
    /// Creates a process that never blocks for IO.
    pub fn new(name: impl Into<String>, arrival: u64, cpu_burst: u64) -> Self {
        Self {
            name: name.into(),
            arrival,
            cpu_burst,
            io_burst: 0,
            io_rate: 0,
            remaining: cpu_burst,
            ticks_since_io: 0,
            start: None,
            completion: None,
            saved_quantum: 0,
            state: ProcessState::Created,
        }
    }

    /// Sets the IO burst length and the IO trigger rate.
    ///
    /// A rate of `0` leaves IO disabled regardless of the burst length.
    pub fn with_io(mut self, io_burst: u64, io_rate: u64) -> Self {
        self.io_burst = io_burst;
        self.io_rate = io_rate;
        self
    }

    /// Remaining CPU demand in ticks.
    #[inline]
    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    /// Current lifecycle state.
    #[inline]
    pub fn state(&self) -> ProcessState {
        self.state
    }

    /// Tick of first dispatch, if the process was ever scheduled.
    #[inline]
    pub fn start_time(&self) -> Option<u64> {
        self.start
    }

    /// Tick at which the remaining burst reached zero.
    #[inline]
    pub fn completion_time(&self) -> Option<u64> {
        self.completion
    }

    /// Completion minus arrival.
    pub fn turnaround_time(&self) -> Option<u64> {
        Some(self.completion? - self.arrival)
    }

    /// Turnaround minus total CPU burst.
    pub fn waiting_time(&self) -> Option<u64> {
        Some(self.turnaround_time()? - self.cpu_burst)
    }

    /// First dispatch minus arrival.
    pub fn response_time(&self) -> Option<u64> {
        Some(self.start? - self.arrival)
    }

    /// Executes one CPU tick and returns the resulting state.
    ///
    /// Decrements the remaining burst by 1. At zero the process is
    /// `Terminated`; otherwise the since-IO counter advances and, once it
    /// reaches the IO rate, resets and the process is `Blocked`. This is
    /// an atomic per-tick step and the only place state changes during
    /// CPU execution.
    pub fn exec_tick(&mut self) -> ProcessState {
        self.state = ProcessState::Running;
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.state = ProcessState::Terminated;
        } else {
            self.ticks_since_io += 1;
            if self.io_rate > 0 && self.ticks_since_io >= self.io_rate {
                self.ticks_since_io = 0;
                self.state = ProcessState::Blocked;
            }
        }
        self.state
    }

    /// Marks the process ready at its arrival tick.
    pub(crate) fn admit(&mut self) {
        self.state = ProcessState::Ready;
    }

    /// Returns the process to the ready state after preemption or IO.
    pub(crate) fn mark_ready(&mut self) {
        self.state = ProcessState::Ready;
    }

    /// Records a dispatch at `clock`.
    ///
    /// The start time is the minimum clock value observed across every
    /// dispatch; since the clock is monotone this is the first one.
    pub(crate) fn mark_dispatched(&mut self, clock: u64) {
        self.state = ProcessState::Running;
        self.start = Some(self.start.map_or(clock, |s| s.min(clock)));
    }

    /// Records the completion tick. Called exactly once, by the engine.
    pub(crate) fn mark_completed(&mut self, clock: u64) {
        self.completion = Some(clock);
    }

    /// Quantum ticks already consumed when the process blocked (VRR).
    #[inline]
    pub(crate) fn saved_quantum(&self) -> i64 {
        self.saved_quantum
    }

    pub(crate) fn save_quantum(&mut self, consumed: i64) {
        self.saved_quantum = consumed;
    }

    /// Restores the load-time state so a process set can be replayed
    /// under a different discipline without cross-contamination.
    pub(crate) fn reset_runtime(&mut self) {
        self.remaining = self.cpu_burst;
        self.ticks_since_io = 0;
        self.start = None;
        self.completion = None;
        self.saved_quantum = 0;
        self.state = ProcessState::Created;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_process() {
        let p = Process::new("A", 2, 7).with_io(3, 4);
        assert_eq!(p.name, "A");
        assert_eq!(p.arrival, 2);
        assert_eq!(p.cpu_burst, 7);
        assert_eq!(p.io_burst, 3);
        assert_eq!(p.io_rate, 4);
        assert_eq!(p.remaining(), 7);
        assert_eq!(p.state(), ProcessState::Created);
        assert_eq!(p.start_time(), None);
        assert_eq!(p.completion_time(), None);
    }

    #[test]
    fn test_exec_tick_decrements_by_one() {
        let mut p = Process::new("A", 0, 3);
        assert_eq!(p.exec_tick(), ProcessState::Running);
        assert_eq!(p.remaining(), 2);
        assert_eq!(p.exec_tick(), ProcessState::Running);
        assert_eq!(p.exec_tick(), ProcessState::Terminated);
        assert_eq!(p.remaining(), 0);
    }

    #[test]
    fn test_exec_tick_blocks_at_rate() {
        let mut p = Process::new("A", 0, 10).with_io(2, 3);
        assert_eq!(p.exec_tick(), ProcessState::Running);
        assert_eq!(p.exec_tick(), ProcessState::Running);
        assert_eq!(p.exec_tick(), ProcessState::Blocked);
        // Counter reset: three more ticks before the next block.
        assert_eq!(p.exec_tick(), ProcessState::Running);
        assert_eq!(p.exec_tick(), ProcessState::Running);
        assert_eq!(p.exec_tick(), ProcessState::Blocked);
    }

    #[test]
    fn test_termination_wins_over_io() {
        // Remaining hits zero on the same tick the IO rate would trigger.
        let mut p = Process::new("A", 0, 3).with_io(2, 3);
        p.exec_tick();
        p.exec_tick();
        assert_eq!(p.exec_tick(), ProcessState::Terminated);
    }

    #[test]
    fn test_zero_rate_never_blocks() {
        let mut p = Process::new("A", 0, 100).with_io(5, 0);
        for _ in 0..99 {
            assert_eq!(p.exec_tick(), ProcessState::Running);
        }
        assert_eq!(p.exec_tick(), ProcessState::Terminated);
    }

    #[test]
    fn test_exec_tick_saturates_at_zero() {
        let mut p = Process::new("A", 0, 1);
        assert_eq!(p.exec_tick(), ProcessState::Terminated);
        assert_eq!(p.exec_tick(), ProcessState::Terminated);
        assert_eq!(p.remaining(), 0);
    }

    #[test]
    fn test_derived_times() {
        let mut p = Process::new("A", 2, 4);
        assert_eq!(p.turnaround_time(), None);
        assert_eq!(p.waiting_time(), None);
        assert_eq!(p.response_time(), None);

        p.mark_dispatched(3);
        p.mark_completed(10);
        assert_eq!(p.response_time(), Some(1));
        assert_eq!(p.turnaround_time(), Some(8));
        assert_eq!(p.waiting_time(), Some(4));
    }

    #[test]
    fn test_start_time_set_once() {
        let mut p = Process::new("A", 0, 4);
        p.mark_dispatched(5);
        p.mark_dispatched(9);
        assert_eq!(p.start_time(), Some(5));
    }

    #[test]
    fn test_reset_runtime() {
        let mut p = Process::new("A", 0, 4).with_io(1, 2);
        p.admit();
        p.mark_dispatched(0);
        p.exec_tick();
        p.save_quantum(2);
        p.reset_runtime();
        assert_eq!(p.remaining(), 4);
        assert_eq!(p.state(), ProcessState::Created);
        assert_eq!(p.start_time(), None);
        assert_eq!(p.saved_quantum(), 0);
    }
}
