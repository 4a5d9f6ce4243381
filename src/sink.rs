// SPDX-License-Identifier: Apache-2.0

//! Destinations for the diagnostics emitted by a guarded skip. What a sink
//! does with a message never influences the count.

use crate::debug_level::DebugLevel;

pub trait DiagnosticSink {
    fn emit(&mut self, level: DebugLevel, message: &str);
}

/// Forwards diagnostics to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn emit(&mut self, level: DebugLevel, message: &str) {
        log::log!(level.log_level(), "[{}] {}", level, message);
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn emit(&mut self, _level: DebugLevel, _message: &str) {}
}

/// Keeps every diagnostic in memory, in emission order.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    pub records: Vec<(DebugLevel, String)>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<&str> {
        self.records.iter().map(|(_, m)| m.as_str()).collect()
    }
}

impl DiagnosticSink for RecordingSink {
    fn emit(&mut self, level: DebugLevel, message: &str) {
        self.records.push((level, message.to_string()));
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &mut S {
    fn emit(&mut self, level: DebugLevel, message: &str) {
        (**self).emit(level, message)
    }
}
