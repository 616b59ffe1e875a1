//! Scheduling discipline selection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The four supported scheduling disciplines.
///
/// The set is closed: each variant fixes the ready-queue ordering and the
/// reschedule predicate the engine applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Discipline {
    /// Shortest job first: non-preemptive, ordered by total CPU burst.
    Sjf,
    /// Shortest remaining time first: preemptive, ordered by remaining burst.
    Srtf,
    /// Round-robin: FIFO with a fixed time quantum.
    Rr,
    /// Virtual round-robin: round-robin where a process resuming after IO
    /// continues its interrupted quantum instead of receiving a fresh one.
    Vrr,
}

/// Unrecognized discipline token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown scheduling discipline {token:?} (expected sjf, srtf, rr, or vrr)")]
pub struct ParseDisciplineError {
    /// The rejected token.
    pub token: String,
}

impl Discipline {
    /// The command-line token for this discipline.
    pub fn token(&self) -> &'static str {
        match self {
            Discipline::Sjf => "sjf",
            Discipline::Srtf => "srtf",
            Discipline::Rr => "rr",
            Discipline::Vrr => "vrr",
        }
    }

    /// Whether the discipline preempts on quantum expiry.
    pub fn uses_quantum(&self) -> bool {
        matches!(self, Discipline::Rr | Discipline::Vrr)
    }
}

impl fmt::Display for Discipline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for Discipline {
    type Err = ParseDisciplineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sjf" => Ok(Discipline::Sjf),
            "srtf" => Ok(Discipline::Srtf),
            "rr" => Ok(Discipline::Rr),
            "vrr" => Ok(Discipline::Vrr),
            other => Err(ParseDisciplineError {
                token: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tokens() {
        assert_eq!("sjf".parse(), Ok(Discipline::Sjf));
        assert_eq!("srtf".parse(), Ok(Discipline::Srtf));
        assert_eq!("rr".parse(), Ok(Discipline::Rr));
        assert_eq!("vrr".parse(), Ok(Discipline::Vrr));
    }

    #[test]
    fn test_parse_unknown_token() {
        let err = "fcfs".parse::<Discipline>().unwrap_err();
        assert_eq!(err.token, "fcfs");
        assert!(err.to_string().contains("fcfs"));
    }

    #[test]
    fn test_display_round_trip() {
        for d in [
            Discipline::Sjf,
            Discipline::Srtf,
            Discipline::Rr,
            Discipline::Vrr,
        ] {
            assert_eq!(d.to_string().parse::<Discipline>(), Ok(d));
        }
    }

    #[test]
    fn test_uses_quantum() {
        assert!(!Discipline::Sjf.uses_quantum());
        assert!(!Discipline::Srtf.uses_quantum());
        assert!(Discipline::Rr.uses_quantum());
        assert!(Discipline::Vrr.uses_quantum());
    }
}
