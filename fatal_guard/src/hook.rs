//! # Process-Wide Panic Hook
//!
//! Install-once complement to the scoped guard: after [`install`], a panic
//! on *any* thread terminates the process, whether or not the panicking
//! code was guarded. The previously installed hook keeps running first, so
//! the usual diagnostics (message, origin, backtrace if enabled) still
//! reach stderr before the process ends.
//!
//! The scoped [`FatalGuard`](crate::guard::FatalGuard) remains useful with
//! the hook installed — it scopes the policy to chosen regions and carries
//! a per-region exit code — but programs that want the blanket behavior
//! can call [`install`] once at startup and be done.
//!
//! `install` mutates global process state and its observable effect is
//! process death, so it is exercised by the `guard_probe` integration
//! tests rather than in-process unit tests.

use std::panic;

use tracing::error;

use crate::guard::{exit_now, nonzero_code};

/// Install a chaining panic hook that terminates the process with
/// `exit_code` after the previous hook has reported the panic. A zero
/// `exit_code` is replaced by [`DEFAULT_EXIT_CODE`](crate::DEFAULT_EXIT_CODE).
///
/// Calling this more than once stacks hooks; every link in the chain still
/// ends in termination, so the first installed code wins.
pub fn install(exit_code: i32) {
    let code = nonzero_code(exit_code);
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        previous(info);
        error!(exit_code = code, "unhandled panic; terminating process");
        exit_now(code);
    }));
}
