//! Data models for scopelog: severities and per-line options.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ScopelogError;

/// Severity of a single emitted line.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Info,
    Warn,
    #[default]
    Error,
}

impl Severity {
    /// Maps a raw level code (0 = info, 1 = warn, 2 = error).
    ///
    /// Any code that is not warn or error falls back to `Info`, so a stray
    /// value still produces a readable line instead of a failure.
    pub fn from_code(code: i32) -> Self {
        match code {
            1 => Severity::Warn,
            2 => Severity::Error,
            _ => Severity::Info,
        }
    }

    pub fn code(self) -> i32 {
        match self {
            Severity::Info => 0,
            Severity::Warn => 1,
            Severity::Error => 2,
        }
    }

    /// The fixed label written in front of the message.
    pub fn label(self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Severity {
    type Err = ScopelogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "info" => Ok(Severity::Info),
            "warn" | "warning" => Ok(Severity::Warn),
            "error" => Ok(Severity::Error),
            _ => Err(ScopelogError::UnknownSeverity(s.to_string())),
        }
    }
}

/// Construction-time settings for one [`LogLine`](crate::LogLine).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct LineOptions {
    /// Severity label of the line (default: error)
    #[serde(default)]
    pub severity: Severity,
    /// Prefix the line with `[YYYY-MM-DD HH:MM:SS] ` (default: true)
    #[serde(default = "enabled")]
    pub timestamp: bool,
    /// Hold the process-wide stderr lock for the life of the line (default: true)
    #[serde(default = "enabled")]
    pub locking: bool,
}

fn enabled() -> bool {
    true
}

impl LineOptions {
    pub fn new(severity: Severity) -> Self {
        Self {
            severity,
            ..Default::default()
        }
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn with_timestamp(mut self, timestamp: bool) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn with_locking(mut self, locking: bool) -> Self {
        self.locking = locking;
        self
    }
}

impl Default for LineOptions {
    fn default() -> Self {
        Self {
            severity: Severity::default(),
            timestamp: true,
            locking: true,
        }
    }
}
