//! Process-set validation.
//!
//! Structural checks over a loaded process set, run before simulation
//! starts. Detects:
//! - Duplicate process names
//! - Zero-length CPU bursts (a process that could never execute a tick)
//!
//! All findings are collected and returned together rather than stopping
//! at the first one.

use std::collections::HashSet;
use std::fmt;

use crate::models::Process;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Finding category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two processes share a name.
    DuplicateName,
    /// A process has a CPU burst of zero ticks.
    ZeroCpuBurst,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Validates a process set.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with every detected issue.
pub fn validate_processes(processes: &[Process]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut names = HashSet::new();

    for p in processes {
        if !names.insert(p.name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateName,
                format!("duplicate process name: {}", p.name),
            ));
        }
        if p.cpu_burst == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::ZeroCpuBurst,
                format!("process '{}' has a zero-length CPU burst", p.name),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_set() {
        let procs = vec![Process::new("A", 0, 5), Process::new("B", 1, 3)];
        assert!(validate_processes(&procs).is_ok());
    }

    #[test]
    fn test_duplicate_name() {
        let procs = vec![Process::new("A", 0, 5), Process::new("A", 1, 3)];
        let errors = validate_processes(&procs).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::DuplicateName);
    }

    #[test]
    fn test_zero_cpu_burst() {
        let procs = vec![Process::new("A", 0, 0)];
        let errors = validate_processes(&procs).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::ZeroCpuBurst);
    }

    #[test]
    fn test_all_findings_collected() {
        let procs = vec![
            Process::new("A", 0, 0),
            Process::new("A", 1, 3),
            Process::new("B", 0, 0),
        ];
        let errors = validate_processes(&procs).unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_empty_set_is_valid() {
        assert!(validate_processes(&[]).is_ok());
    }
}
