//! Per-match event logger
//!
//! Every zone move and phase transition goes through here, so a match leaves
//! an auditable trail. Entries use owned strings; output can go to stdout,
//! an in-memory buffer (for tests), or both.

use serde::{Deserialize, Serialize};
use std::cell::{Ref, RefCell};

/// Verbosity level for match output
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum VerbosityLevel {
    /// Silent - no output
    Silent = 0,
    /// Minimal - only match outcome events
    Minimal = 1,
    /// Normal - phase transitions and key actions (default)
    #[default]
    Normal = 2,
    /// Verbose - every zone move
    Verbose = 3,
}

/// Output destination for log messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Output only to stdout (default)
    #[default]
    Stdout,
    /// Capture only to the in-memory buffer (no stdout)
    Memory,
    /// Both stdout and the in-memory buffer
    Both,
}

/// A captured log entry
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub level: VerbosityLevel,
    pub message: String,
}

/// Centralized per-match logger
#[derive(Debug, Clone)]
pub struct MatchLog {
    verbosity: VerbosityLevel,
    output_mode: OutputMode,
    buffer: RefCell<Vec<LogEntry>>,
}

impl MatchLog {
    pub fn new() -> Self {
        MatchLog {
            verbosity: VerbosityLevel::default(),
            output_mode: OutputMode::default(),
            buffer: RefCell::new(Vec::new()),
        }
    }

    pub fn with_verbosity(verbosity: VerbosityLevel) -> Self {
        MatchLog {
            verbosity,
            ..MatchLog::new()
        }
    }

    pub fn verbosity(&self) -> VerbosityLevel {
        self.verbosity
    }

    pub fn set_verbosity(&mut self, verbosity: VerbosityLevel) {
        self.verbosity = verbosity;
    }

    pub fn set_output_mode(&mut self, mode: OutputMode) {
        self.output_mode = mode;
    }

    /// Log at a specific level; filtered by the configured verbosity.
    pub fn log(&self, level: VerbosityLevel, message: &str) {
        if level > self.verbosity {
            return;
        }
        if matches!(self.output_mode, OutputMode::Stdout | OutputMode::Both) {
            println!("{message}");
        }
        if matches!(self.output_mode, OutputMode::Memory | OutputMode::Both) {
            self.buffer.borrow_mut().push(LogEntry {
                level,
                message: message.to_string(),
            });
        }
    }

    pub fn minimal(&self, message: &str) {
        self.log(VerbosityLevel::Minimal, message);
    }

    pub fn normal(&self, message: &str) {
        self.log(VerbosityLevel::Normal, message);
    }

    pub fn verbose(&self, message: &str) {
        self.log(VerbosityLevel::Verbose, message);
    }

    /// Read-only view of the captured entries (OutputMode::Memory or Both)
    pub fn entries(&self) -> Ref<'_, Vec<LogEntry>> {
        self.buffer.borrow()
    }
}

impl Default for MatchLog {
    fn default() -> Self {
        MatchLog::new()
    }
}
