// SPDX-License-Identifier: Apache-2.0

//! Predicates that decide whether a guarded skip is allowed to fire.

use crate::debug_level::{DebugLevel, VerbosityGate};

pub trait SkipGuard {
    /// Whether the guarded skip fires when its loop condition holds.
    fn is_armed(&self) -> bool;

    /// Short human readable description used in logs and reports.
    fn describe(&self) -> String;
}

/// Armed when `level` is enabled by `gate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelGuard {
    level: DebugLevel,
    gate: VerbosityGate,
}

impl LevelGuard {
    pub fn new(level: DebugLevel, gate: VerbosityGate) -> Self {
        LevelGuard { level, gate }
    }

    pub fn level(&self) -> DebugLevel {
        self.level
    }

    pub fn gate(&self) -> VerbosityGate {
        self.gate
    }
}

impl Default for LevelGuard {
    fn default() -> Self {
        LevelGuard::new(DebugLevel::Notice, VerbosityGate::default())
    }
}

impl SkipGuard for LevelGuard {
    fn is_armed(&self) -> bool {
        self.gate.is_enabled(self.level)
    }

    fn describe(&self) -> String {
        format!(
            "level guard ({} against threshold {})",
            self.level,
            self.gate.threshold()
        )
    }
}

/// Value the arithmetic mapping must produce for the skip to fire; this is
/// the number of `DebugLevel::Notice`.
const ARITHMETIC_NOTICE: i32 = 4;

/// Maps a raw level to a verbosity with `(5 % (3 * level)) + 2`.
///
/// Remainder follows the sign of the dividend. Returns `None` for a zero
/// level or when `3 * level` overflows.
pub fn arithmetic_verbosity(raw_level: i32) -> Option<i32> {
    3i32.checked_mul(raw_level)
        .and_then(|divisor| 5i32.checked_rem(divisor))
        .map(|rem| rem + 2)
}

/// The legacy modular-arithmetic guard. Only raw levels for which the mapping
/// happens to land on `ARITHMETIC_NOTICE` arm it, so it is kept solely to
/// audit code that still relies on it against the reference loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArithmeticGuard {
    raw_level: i32,
}

impl ArithmeticGuard {
    pub fn new(raw_level: i32) -> Self {
        ArithmeticGuard { raw_level }
    }

    pub fn raw_level(&self) -> i32 {
        self.raw_level
    }
}

impl SkipGuard for ArithmeticGuard {
    fn is_armed(&self) -> bool {
        arithmetic_verbosity(self.raw_level) == Some(ARITHMETIC_NOTICE)
    }

    fn describe(&self) -> String {
        format!("arithmetic guard (raw level {})", self.raw_level)
    }
}

impl SkipGuard for bool {
    fn is_armed(&self) -> bool {
        *self
    }

    fn describe(&self) -> String {
        format!("constant guard ({})", self)
    }
}

impl<G: SkipGuard + ?Sized> SkipGuard for &G {
    fn is_armed(&self) -> bool {
        (**self).is_armed()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

impl<G: SkipGuard + ?Sized> SkipGuard for Box<G> {
    fn is_armed(&self) -> bool {
        (**self).is_armed()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(1, Some(4))]
    #[test_case(2, Some(7))]
    #[test_case(3, Some(7))]
    #[test_case(-1, Some(4))]
    #[test_case(0, None)]
    #[test_case(i32::MAX, None)]
    fn test_arithmetic_verbosity(raw_level: i32, want: Option<i32>) {
        assert_eq!(arithmetic_verbosity(raw_level), want);
    }

    #[test]
    fn test_arithmetic_guard_armed_only_for_level_one_among_positive() {
        let armed: Vec<i32> = (1..=64)
            .filter(|raw| ArithmeticGuard::new(*raw).is_armed())
            .collect();
        assert_eq!(armed, vec![1]);
        assert!(!ArithmeticGuard::new(0).is_armed());
    }

    #[test]
    fn test_level_guard_follows_gate() {
        assert!(LevelGuard::default().is_armed());
        let quiet = LevelGuard::new(DebugLevel::Notice, VerbosityGate::new(DebugLevel::Warn));
        assert!(!quiet.is_armed());
        let verbose = LevelGuard::new(DebugLevel::Trace, VerbosityGate::new(DebugLevel::Debug));
        assert!(verbose.is_armed());
    }

    #[test]
    fn test_describe() {
        assert_eq!(
            LevelGuard::default().describe(),
            "level guard (notice against threshold notice)"
        );
        assert_eq!(
            ArithmeticGuard::new(2).describe(),
            "arithmetic guard (raw level 2)"
        );
        let boxed: Box<dyn SkipGuard> = Box::new(false);
        assert_eq!(boxed.describe(), "constant guard (false)");
        assert!(!boxed.is_armed());
    }
}
