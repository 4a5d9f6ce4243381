// SPDX-License-Identifier: Apache-2.0

//! Debug levels and the verbosity gate that decides whether a level is
//! enabled.
//!
//! Levels are ordered from most severe (`Crit`) to least severe (`Debug`). A
//! gate with a given threshold enables that level and every level more severe
//! than it.

use serde::{Deserialize, Serialize};

use crate::debug_equiv_error::DebugEquivError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DebugLevel {
    Crit = 1,
    Error = 2,
    Warn = 3,
    Notice = 4,
    Diag = 5,
    Info = 6,
    Trace = 7,
    Debug = 8,
}

impl DebugLevel {
    pub const ALL: [DebugLevel; 8] = [
        DebugLevel::Crit,
        DebugLevel::Error,
        DebugLevel::Warn,
        DebugLevel::Notice,
        DebugLevel::Diag,
        DebugLevel::Info,
        DebugLevel::Trace,
        DebugLevel::Debug,
    ];

    pub fn as_number(self) -> u8 {
        self as u8
    }

    pub fn from_number(number: i64) -> Option<DebugLevel> {
        DebugLevel::ALL
            .iter()
            .copied()
            .find(|level| i64::from(level.as_number()) == number)
    }

    pub fn name(self) -> &'static str {
        match self {
            DebugLevel::Crit => "crit",
            DebugLevel::Error => "error",
            DebugLevel::Warn => "warn",
            DebugLevel::Notice => "notice",
            DebugLevel::Diag => "diag",
            DebugLevel::Info => "info",
            DebugLevel::Trace => "trace",
            DebugLevel::Debug => "debug",
        }
    }

    /// Level used when a diagnostic at this debug level is forwarded to the
    /// `log` facade.
    pub fn log_level(self) -> log::Level {
        match self {
            DebugLevel::Crit | DebugLevel::Error => log::Level::Error,
            DebugLevel::Warn => log::Level::Warn,
            DebugLevel::Notice | DebugLevel::Diag | DebugLevel::Info => log::Level::Info,
            DebugLevel::Trace => log::Level::Trace,
            DebugLevel::Debug => log::Level::Debug,
        }
    }
}

impl std::fmt::Display for DebugLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Accepts either a level name (case-insensitive) or its number.
impl std::str::FromStr for DebugLevel {
    type Err = DebugEquivError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(number) = trimmed.parse::<i64>() {
            return DebugLevel::from_number(number).ok_or_else(|| {
                DebugEquivError(format!("debug level number out of range 1..=8: {}", number))
            });
        }
        DebugLevel::ALL
            .iter()
            .copied()
            .find(|level| level.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| DebugEquivError(format!("invalid debug level: {:?}", s)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerbosityGate {
    threshold: DebugLevel,
}

impl VerbosityGate {
    pub fn new(threshold: DebugLevel) -> Self {
        VerbosityGate { threshold }
    }

    pub fn threshold(&self) -> DebugLevel {
        self.threshold
    }

    pub fn is_enabled(&self, level: DebugLevel) -> bool {
        level <= self.threshold
    }
}

impl Default for VerbosityGate {
    fn default() -> Self {
        VerbosityGate::new(DebugLevel::Notice)
    }
}
