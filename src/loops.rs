// SPDX-License-Identifier: Apache-2.0

//! The two counting loops being compared: a reference loop with a bare skip
//! and the same loop with the skip wrapped in `debug_continue!`.

use crate::guard::SkipGuard;
use crate::sink::DiagnosticSink;

/// Both loops iterate `0..ITERATION_SPAN`.
pub const ITERATION_SPAN: i32 = 100;

/// Skips the current loop iteration when `guard` is armed and `condition`
/// holds, emitting the formatted message at `DebugLevel::Notice` first.
///
/// Must be used directly inside a loop body.
#[macro_export]
macro_rules! debug_continue {
    ($guard:expr, $sink:expr, $condition:expr, $($arg:tt)+) => {{
        #[allow(unused_imports)]
        use $crate::guard::SkipGuard as _;
        #[allow(unused_imports)]
        use $crate::sink::DiagnosticSink as _;
        if $guard.is_armed() && ($condition) {
            $sink.emit($crate::debug_level::DebugLevel::Notice, &format!($($arg)+));
            continue;
        }
    }};
}

/// Counts the iterations whose loop variable differs from `x`.
pub fn count_reference(x: i32) -> u32 {
    let mut count = 0;
    for i in 0..ITERATION_SPAN {
        if i == x {
            continue;
        }
        count += 1;
    }
    count
}

/// Same as `count_reference`, but the skip only fires when `guard` is armed.
pub fn count_guarded<G, S>(x: i32, guard: &G, sink: &mut S, message: &str) -> u32
where
    G: SkipGuard + ?Sized,
    S: DiagnosticSink + ?Sized,
{
    let mut count = 0;
    for i in 0..ITERATION_SPAN {
        debug_continue!(guard, sink, i == x, "{}", message);
        count += 1;
    }
    count
}
