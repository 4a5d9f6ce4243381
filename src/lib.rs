// SPDX-License-Identifier: Apache-2.0

pub mod debug_equiv_error;
pub mod debug_level;
pub mod equiv;
pub mod guard;
pub mod locale;
pub mod loops;
pub mod sink;

pub use debug_equiv_error::DebugEquivError;
pub use debug_level::{DebugLevel, VerbosityGate};
pub use equiv::{
    check_equivalence, Counterexample, EquivChecker, EquivReport, EquivResult,
    EquivalenceViolation, InputStrategy,
};
pub use guard::{ArithmeticGuard, LevelGuard, SkipGuard};
pub use locale::{describe_error, translate};
pub use loops::{count_guarded, count_reference, ITERATION_SPAN};
pub use sink::{DiagnosticSink, LogSink, NullSink, RecordingSink};
