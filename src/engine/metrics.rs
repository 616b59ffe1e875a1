//! Aggregate run metrics.
//!
//! Computed once, over the completed-process list, after a run ends.
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Avg Waiting | mean(turnaround − total CPU burst) |
//! | Avg Turnaround | mean(completion − arrival) |
//! | Avg Response | mean(first dispatch − arrival) |
//! | CPU Utilization | busy ticks / total ticks × 100 |
//! | Throughput | completed count / total ticks |
//!
//! Total ticks is the tick index of the last recorded completion. Every
//! division is guarded, so a degenerate run (no processes, or none
//! completed) yields zeros instead of NaN.

use serde::Serialize;

use crate::models::Process;

/// Aggregate performance indicators for one finished run.
#[derive(Debug, Clone, Serialize)]
pub struct RunMetrics {
    /// Mean waiting time over completed processes (ticks).
    pub avg_waiting: f64,
    /// Mean turnaround time over completed processes (ticks).
    pub avg_turnaround: f64,
    /// Mean response time over completed processes (ticks).
    pub avg_response: f64,
    /// Percentage of simulated ticks the CPU executed a process (0..=100).
    pub cpu_utilization: f64,
    /// Completed processes per simulated tick.
    pub throughput: f64,
    /// Tick index of the last recorded completion.
    pub total_ticks: u64,
    /// Ticks in which the CPU executed a process.
    pub busy_ticks: u64,
}

impl RunMetrics {
    /// Computes the metrics from the completed list and the tick counts
    /// the engine recorded.
    pub fn calculate(completed: &[Process], total_ticks: u64, busy_ticks: u64) -> Self {
        let count = completed.len();
        let mut waiting = 0.0;
        let mut turnaround = 0.0;
        let mut response = 0.0;
        for p in completed {
            waiting += p.waiting_time().unwrap_or(0) as f64;
            turnaround += p.turnaround_time().unwrap_or(0) as f64;
            response += p.response_time().unwrap_or(0) as f64;
        }

        let mean = |sum: f64| if count == 0 { 0.0 } else { sum / count as f64 };
        let (cpu_utilization, throughput) = if total_ticks == 0 {
            (0.0, 0.0)
        } else {
            (
                busy_ticks as f64 / total_ticks as f64 * 100.0,
                count as f64 / total_ticks as f64,
            )
        };

        Self {
            avg_waiting: mean(waiting),
            avg_turnaround: mean(turnaround),
            avg_response: mean(response),
            cpu_utilization,
            throughput,
            total_ticks,
            busy_ticks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn completed(name: &str, arrival: u64, burst: u64, start: u64, end: u64) -> Process {
        let mut p = Process::new(name, arrival, burst);
        p.mark_dispatched(start);
        p.mark_completed(end);
        p
    }

    #[test]
    fn test_averages() {
        let procs = vec![
            // turnaround 5, waiting 0, response 0
            completed("A", 0, 5, 0, 5),
            // turnaround 7, waiting 4, response 3
            completed("B", 2, 3, 5, 9),
        ];
        let m = RunMetrics::calculate(&procs, 9, 8);
        assert!((m.avg_turnaround - 6.0).abs() < 1e-10);
        assert!((m.avg_waiting - 2.0).abs() < 1e-10);
        assert!((m.avg_response - 1.5).abs() < 1e-10);
    }

    #[test]
    fn test_utilization_and_throughput() {
        let procs = vec![completed("A", 0, 4, 0, 4)];
        let m = RunMetrics::calculate(&procs, 8, 4);
        assert!((m.cpu_utilization - 50.0).abs() < 1e-10);
        assert!((m.throughput - 0.125).abs() < 1e-10);
    }

    #[test]
    fn test_empty_run_yields_zeros() {
        let m = RunMetrics::calculate(&[], 0, 0);
        assert_eq!(m.avg_waiting, 0.0);
        assert_eq!(m.avg_turnaround, 0.0);
        assert_eq!(m.avg_response, 0.0);
        assert_eq!(m.cpu_utilization, 0.0);
        assert_eq!(m.throughput, 0.0);
    }

    #[test]
    fn test_utilization_bounded() {
        let procs = vec![completed("A", 0, 5, 0, 5)];
        let m = RunMetrics::calculate(&procs, 5, 5);
        assert!(m.cpu_utilization >= 0.0 && m.cpu_utilization <= 100.0);
        assert!((m.cpu_utilization - 100.0).abs() < 1e-10);
    }
}
