// SPDX-License-Identifier: Apache-2.0

//! Checks that the guarded counting loop agrees with the reference loop.
//!
//! Inputs come from an `InputStrategy`: a single value, an exhaustive sweep
//! over a range, seeded random samples, or the fixed set of boundary inputs
//! that characterizes both behavior classes (inside the iteration span the
//! count is 99, outside it is 100).
//!
//! The first disagreeing input is returned as a `Counterexample`.

use std::time::Instant;

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use serde::Serialize;

use crate::debug_equiv_error::DebugEquivError;
use crate::guard::SkipGuard;
use crate::loops::{count_guarded, count_reference, ITERATION_SPAN};
use crate::sink::DiagnosticSink;

pub const DEFAULT_MESSAGE: &str = "foo";

/// Inputs on both sides of, and at the edges of, the iteration span.
pub const BOUNDARY_INPUTS: [i32; 11] = [
    i32::MIN,
    -5,
    -1,
    0,
    1,
    42,
    ITERATION_SPAN - 2,
    ITERATION_SPAN - 1,
    ITERATION_SPAN,
    1000,
    i32::MAX,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Counterexample {
    pub input: i32,
    pub reference: u32,
    pub modified: u32,
}

impl std::fmt::Display for Counterexample {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "input {}: reference counted {}, modified counted {}",
            self.input, self.reference, self.modified
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EquivResult {
    Proved { inputs_checked: u64 },
    Disproved(Counterexample),
}

impl EquivResult {
    pub fn into_result(self) -> Result<u64, EquivalenceViolation> {
        match self {
            EquivResult::Proved { inputs_checked } => Ok(inputs_checked),
            EquivResult::Disproved(cex) => Err(EquivalenceViolation(cex)),
        }
    }

    pub fn counterexample(&self) -> Option<Counterexample> {
        match self {
            EquivResult::Proved { .. } => None,
            EquivResult::Disproved(cex) => Some(*cex),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EquivalenceViolation(pub Counterexample);

impl std::fmt::Display for EquivalenceViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "equivalence violation at {}", self.0)
    }
}

impl std::error::Error for EquivalenceViolation {}

/// Compares `reference` and `modified` on every input, stopping at the first
/// disagreement.
pub fn check_equivalence<R, M, I>(mut reference: R, mut modified: M, inputs: I) -> EquivResult
where
    R: FnMut(i32) -> u32,
    M: FnMut(i32) -> u32,
    I: IntoIterator<Item = i32>,
{
    let mut inputs_checked: u64 = 0;
    for input in inputs {
        let want = reference(input);
        let got = modified(input);
        inputs_checked += 1;
        if want != got {
            return EquivResult::Disproved(Counterexample {
                input,
                reference: want,
                modified: got,
            });
        }
    }
    EquivResult::Proved { inputs_checked }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputStrategy {
    Single(i32),
    /// Every input in `[lo, hi)`.
    Exhaustive { lo: i32, hi: i32 },
    /// Every `i32`, `i32::MAX` included.
    Full,
    Sampled { seed: u64, count: usize },
    Boundary,
}

impl InputStrategy {
    pub fn exhaustive(lo: i32, hi: i32) -> Result<Self, DebugEquivError> {
        if lo >= hi {
            return Err(DebugEquivError(format!(
                "exhaustive range is empty: [{}, {})",
                lo, hi
            )));
        }
        Ok(InputStrategy::Exhaustive { lo, hi })
    }

    pub fn inputs(&self) -> Box<dyn Iterator<Item = i32>> {
        match *self {
            InputStrategy::Single(x) => Box::new(std::iter::once(x)),
            InputStrategy::Exhaustive { lo, hi } => Box::new(lo..hi),
            InputStrategy::Full => Box::new(i32::MIN..=i32::MAX),
            InputStrategy::Sampled { seed, count } => Box::new(sample_inputs_iter(seed, count)),
            InputStrategy::Boundary => Box::new(BOUNDARY_INPUTS.into_iter()),
        }
    }
}

impl std::fmt::Display for InputStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputStrategy::Single(x) => write!(f, "single({})", x),
            InputStrategy::Exhaustive { lo, hi } => write!(f, "exhaustive([{}, {}))", lo, hi),
            InputStrategy::Sampled { seed, count } => {
                write!(f, "sampled(seed={}, count={})", seed, count)
            }
            InputStrategy::Full => write!(f, "full"),
            InputStrategy::Boundary => write!(f, "boundary"),
        }
    }
}

/// Lazily draws `count` inputs: even draws land within one span of the
/// iteration range on either side, odd draws anywhere in `i32`.
pub fn sample_inputs_iter(seed: u64, count: usize) -> impl Iterator<Item = i32> {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    (0..count).map(move |i| {
        if i % 2 == 0 {
            rng.gen_range(-ITERATION_SPAN..2 * ITERATION_SPAN)
        } else {
            rng.gen::<i32>()
        }
    })
}

pub fn sample_inputs(seed: u64, count: usize) -> Vec<i32> {
    sample_inputs_iter(seed, count).collect()
}

/// Checks `count_guarded` with a given guard against `count_reference`.
pub struct EquivChecker<G: SkipGuard> {
    guard: G,
    message: String,
}

impl<G: SkipGuard> EquivChecker<G> {
    pub fn new(guard: G) -> Self {
        EquivChecker {
            guard,
            message: DEFAULT_MESSAGE.to_string(),
        }
    }

    pub fn with_message(mut self, message: &str) -> Self {
        self.message = message.to_string();
        self
    }

    pub fn guard(&self) -> &G {
        &self.guard
    }

    pub fn modified<S: DiagnosticSink + ?Sized>(&self, x: i32, sink: &mut S) -> u32 {
        count_guarded(x, &self.guard, sink, &self.message)
    }

    pub fn check<S: DiagnosticSink + ?Sized>(
        &self,
        strategy: &InputStrategy,
        sink: &mut S,
    ) -> EquivResult {
        log::info!(
            "equiv check; strategy: {}; guard: {}",
            strategy,
            self.guard.describe()
        );
        let start = Instant::now();
        let result = check_equivalence(
            count_reference,
            |x| count_guarded(x, &self.guard, &mut *sink, &self.message),
            strategy.inputs(),
        );
        let elapsed = start.elapsed();
        match &result {
            EquivResult::Proved { inputs_checked } => log::info!(
                "equiv check; proved over {} input(s) in {:?}",
                inputs_checked,
                elapsed
            ),
            EquivResult::Disproved(cex) => {
                log::warn!("equiv check; counterexample after {:?}: {}", elapsed, cex)
            }
        }
        result
    }

    pub fn report<S: DiagnosticSink + ?Sized>(
        &self,
        strategy: &InputStrategy,
        sink: &mut S,
    ) -> EquivReport {
        let result = self.check(strategy, sink);
        EquivReport::new(strategy, &self.guard, &result)
    }
}

/// Serializable summary of one checker run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EquivReport {
    pub strategy: String,
    pub guard: String,
    pub guard_armed: bool,
    pub proved: bool,
    pub inputs_checked: Option<u64>,
    pub counterexample: Option<Counterexample>,
}

impl EquivReport {
    pub fn new<G: SkipGuard + ?Sized>(
        strategy: &InputStrategy,
        guard: &G,
        result: &EquivResult,
    ) -> Self {
        let inputs_checked = match result {
            EquivResult::Proved { inputs_checked } => Some(*inputs_checked),
            EquivResult::Disproved(_) => None,
        };
        EquivReport {
            strategy: strategy.to_string(),
            guard: guard.describe(),
            guard_armed: guard.is_armed(),
            proved: inputs_checked.is_some(),
            inputs_checked,
            counterexample: result.counterexample(),
        }
    }
}

#[cfg(kani)]
mod verification {
    use super::*;
    use crate::guard::LevelGuard;
    use crate::sink::NullSink;

    #[kani::proof]
    #[kani::unwind(101)]
    fn guarded_skip_matches_reference() {
        let x: i32 = kani::any();
        let guard = LevelGuard::default();
        assert_eq!(count_reference(x), count_guarded(x, &guard, &mut NullSink, ""));
    }
}
