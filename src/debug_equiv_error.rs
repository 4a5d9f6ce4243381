// SPDX-License-Identifier: Apache-2.0

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebugEquivError(pub String);

impl std::fmt::Display for DebugEquivError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "debug-equiv error: {}", self.0)
    }
}

impl std::error::Error for DebugEquivError {}
