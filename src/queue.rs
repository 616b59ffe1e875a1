//! Ready-queue disciplines.
//!
//! Three interchangeable ordered containers behind one interface, selected
//! once at engine reset from the active [`Discipline`]:
//!
//! - **FIFO** — insertion order (round-robin and virtual round-robin).
//! - **Shortest total burst** — total CPU burst ascending (SJF).
//! - **Shortest remaining burst** — remaining CPU burst ascending (SRTF).
//!
//! Both priority orderings break ties by earlier arrival time, then by
//! insertion order, so a run is fully deterministic.

use std::collections::{BinaryHeap, VecDeque};

use crate::models::{Discipline, Process};

/// Ordered container of ready processes.
///
/// # Example
///
/// ```
/// use procsim::models::{Discipline, Process};
/// use procsim::queue::ReadyQueue;
///
/// let mut q = ReadyQueue::new(Discipline::Sjf);
/// q.push(Process::new("long", 0, 9));
/// q.push(Process::new("short", 1, 2));
/// assert_eq!(q.pop().map(|p| p.name), Some("short".to_string()));
/// ```
#[derive(Debug)]
pub struct ReadyQueue {
    inner: Inner,
    seq: u64,
}

#[derive(Debug)]
enum Inner {
    Fifo(VecDeque<Process>),
    TotalBurst(BinaryHeap<ByTotalBurst>),
    RemainingBurst(BinaryHeap<ByRemainingBurst>),
}

impl ReadyQueue {
    /// Creates the queue variant the given discipline requires.
    pub fn new(discipline: Discipline) -> Self {
        let inner = match discipline {
            Discipline::Sjf => Inner::TotalBurst(BinaryHeap::new()),
            Discipline::Srtf => Inner::RemainingBurst(BinaryHeap::new()),
            Discipline::Rr | Discipline::Vrr => Inner::Fifo(VecDeque::new()),
        };
        Self { inner, seq: 0 }
    }

    /// Inserts a process.
    pub fn push(&mut self, process: Process) {
        let seq = self.seq;
        self.seq += 1;
        match &mut self.inner {
            Inner::Fifo(q) => q.push_back(process),
            Inner::TotalBurst(q) => q.push(ByTotalBurst { seq, process }),
            Inner::RemainingBurst(q) => q.push(ByRemainingBurst { seq, process }),
        }
    }

    /// Removes and returns the highest-priority process.
    pub fn pop(&mut self) -> Option<Process> {
        match &mut self.inner {
            Inner::Fifo(q) => q.pop_front(),
            Inner::TotalBurst(q) => q.pop().map(|e| e.process),
            Inner::RemainingBurst(q) => q.pop().map(|e| e.process),
        }
    }

    /// The process `pop` would return, without removing it.
    pub fn peek(&self) -> Option<&Process> {
        match &self.inner {
            Inner::Fifo(q) => q.front(),
            Inner::TotalBurst(q) => q.peek().map(|e| &e.process),
            Inner::RemainingBurst(q) => q.peek().map(|e| &e.process),
        }
    }

    /// Whether the queue holds no processes.
    pub fn is_empty(&self) -> bool {
        match &self.inner {
            Inner::Fifo(q) => q.is_empty(),
            Inner::TotalBurst(q) => q.is_empty(),
            Inner::RemainingBurst(q) => q.is_empty(),
        }
    }

    /// Number of queued processes.
    pub fn len(&self) -> usize {
        match &self.inner {
            Inner::Fifo(q) => q.len(),
            Inner::TotalBurst(q) => q.len(),
            Inner::RemainingBurst(q) => q.len(),
        }
    }

    /// Removes every queued process.
    pub fn clear(&mut self) {
        match &mut self.inner {
            Inner::Fifo(q) => q.clear(),
            Inner::TotalBurst(q) => q.clear(),
            Inner::RemainingBurst(q) => q.clear(),
        }
        self.seq = 0;
    }
}

/// Heap entry ordered by total CPU burst ascending, then arrival, then
/// insertion order. `Ord` is reversed so `BinaryHeap` pops the smallest key.
#[derive(Debug)]
struct ByTotalBurst {
    seq: u64,
    process: Process,
}

impl ByTotalBurst {
    fn key(&self) -> (u64, u64, u64) {
        (self.process.cpu_burst, self.process.arrival, self.seq)
    }
}

impl PartialEq for ByTotalBurst {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for ByTotalBurst {}

impl PartialOrd for ByTotalBurst {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ByTotalBurst {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        other.key().cmp(&self.key())
    }
}

/// Heap entry ordered by remaining CPU burst ascending, then arrival, then
/// insertion order.
#[derive(Debug)]
struct ByRemainingBurst {
    seq: u64,
    process: Process,
}

impl ByRemainingBurst {
    fn key(&self) -> (u64, u64, u64) {
        (self.process.remaining(), self.process.arrival, self.seq)
    }
}

impl PartialEq for ByRemainingBurst {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for ByRemainingBurst {}

impl PartialOrd for ByRemainingBurst {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ByRemainingBurst {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        other.key().cmp(&self.key())
    }
}
