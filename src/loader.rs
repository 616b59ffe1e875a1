//! Process file loading.
//!
//! One process per line, five semicolon-delimited fields:
//!
//! ```text
//! name;arrival;cpu_burst;io_burst;io_rate
//! ```
//!
//! Blank lines are ignored. Any malformed line is a fatal error reported
//! before simulation starts; no partial process set is ever returned.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::models::Process;

/// Number of semicolon-delimited fields per record.
const FIELDS_PER_RECORD: usize = 5;

/// Failure to read or parse a process file.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be read at all.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path that was opened.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
    /// A record did not have exactly five fields.
    #[error("line {line}: expected 5 ';'-separated fields, found {found}")]
    FieldCount {
        /// 1-based line number.
        line: usize,
        /// Fields actually present.
        found: usize,
    },
    /// The process name field was empty.
    #[error("line {line}: empty process name")]
    EmptyName {
        /// 1-based line number.
        line: usize,
    },
    /// A numeric field did not parse.
    #[error("line {line}: invalid {field} {value:?}")]
    InvalidNumber {
        /// 1-based line number.
        line: usize,
        /// Which field was malformed.
        field: &'static str,
        /// The rejected text.
        value: String,
    },
}

/// Reads and parses a process file.
pub fn load_processes(path: &Path) -> Result<Vec<Process>, LoadError> {
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_processes(&text)
}

/// Parses the contents of a process file.
pub fn parse_processes(input: &str) -> Result<Vec<Process>, LoadError> {
    let mut processes = Vec::new();
    for (idx, raw) in input.lines().enumerate() {
        let line = idx + 1;
        let record = raw.trim();
        if record.is_empty() {
            continue;
        }

        let fields: Vec<&str> = record.split(';').map(str::trim).collect();
        if fields.len() != FIELDS_PER_RECORD {
            return Err(LoadError::FieldCount {
                line,
                found: fields.len(),
            });
        }
        if fields[0].is_empty() {
            return Err(LoadError::EmptyName { line });
        }

        let arrival = parse_field(fields[1], "arrival time", line)?;
        let cpu_burst = parse_field(fields[2], "CPU burst", line)?;
        let io_burst = parse_field(fields[3], "IO burst", line)?;
        let io_rate = parse_field(fields[4], "IO rate", line)?;

        processes.push(Process::new(fields[0], arrival, cpu_burst).with_io(io_burst, io_rate));
    }
    Ok(processes)
}

fn parse_field(value: &str, field: &'static str, line: usize) -> Result<u64, LoadError> {
    value.parse().map_err(|_| LoadError::InvalidNumber {
        line,
        field,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_records() {
        let procs = parse_processes("A;0;5;2;3\nB;1;4;0;0\n").unwrap();
        assert_eq!(procs.len(), 2);
        assert_eq!(procs[0].name, "A");
        assert_eq!(procs[0].arrival, 0);
        assert_eq!(procs[0].cpu_burst, 5);
        assert_eq!(procs[0].io_burst, 2);
        assert_eq!(procs[0].io_rate, 3);
        assert_eq!(procs[1].name, "B");
        assert_eq!(procs[1].io_rate, 0);
    }

    #[test]
    fn test_blank_lines_and_padding_ignored() {
        let procs = parse_processes("\n  A ; 0 ; 5 ; 2 ; 3 \n\n").unwrap();
        assert_eq!(procs.len(), 1);
        assert_eq!(procs[0].name, "A");
        assert_eq!(procs[0].io_rate, 3);
    }

    #[test]
    fn test_missing_field_is_fatal() {
        let err = parse_processes("A;0;5;2\n").unwrap_err();
        match err {
            LoadError::FieldCount { line, found } => {
                assert_eq!(line, 1);
                assert_eq!(found, 4);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_bad_number_names_field_and_line() {
        let err = parse_processes("A;0;5;2;3\nB;zero;4;0;0\n").unwrap_err();
        match err {
            LoadError::InvalidNumber { line, field, value } => {
                assert_eq!(line, 2);
                assert_eq!(field, "arrival time");
                assert_eq!(value, "zero");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_name_is_fatal() {
        assert!(matches!(
            parse_processes(";0;5;2;3\n"),
            Err(LoadError::EmptyName { line: 1 })
        ));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = load_processes(Path::new("no/such/file.proc")).unwrap_err();
        assert!(err.to_string().contains("no/such/file.proc"));
    }

    #[test]
    fn test_empty_input_is_empty_set() {
        assert!(parse_processes("").unwrap().is_empty());
    }
}
