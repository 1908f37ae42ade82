//! # Scoped Fatal Guard
//!
//! [`FatalGuard`] brackets a region of code. Dropped normally it does
//! nothing; dropped while the thread is unwinding it terminates the whole
//! process with a non-zero exit status.
//!
//! Ordering on the fatal path: the standard panic hook runs at `panic!`
//! time, before unwinding starts, so the message and origin are already on
//! stderr by the time the guard's `Drop` fires. The guard then logs the
//! failing thread's identity and calls `_exit`.
//!
//! The guard holds no shared state and needs no locking; every instance is
//! local to the thread that created it. If two threads hit the fatal path
//! at once, whichever reaches `_exit` first wins — the outcome is the same
//! either way.

use std::fmt::Display;
use std::thread;

use tracing::error;

/// Exit status used when the caller does not pick one.
pub const DEFAULT_EXIT_CODE: i32 = 1;

/// Terminate the process immediately.
///
/// Uses `_exit(2)` rather than `std::process::exit` so that atexit
/// handlers and the cleanup of every other thread are skipped: once a
/// guarded region has failed, nothing else in this process is trusted to
/// run.
pub(crate) fn exit_now(code: i32) -> ! {
    // SAFETY: _exit is async-signal-safe and takes no pointers.
    unsafe { libc::_exit(code) }
}

/// Report an escalated error on stderr and in the log, then terminate.
pub(crate) fn report_and_exit(message: &str, code: i32) -> ! {
    let current = thread::current();
    let name = current.name().unwrap_or("<unnamed>");
    eprintln!("fatal error in thread '{name}': {message}");
    error!(thread = name, exit_code = code, "error escalated; terminating process");
    exit_now(code)
}

/// Coerce a requested exit code onto the non-zero contract.
pub(crate) fn nonzero_code(code: i32) -> i32 {
    // A zero status would turn a fatal failure into an apparent success.
    if code == 0 { DEFAULT_EXIT_CODE } else { code }
}

/// Scoped guard that turns an escaping panic into process termination.
///
/// Hold the guard for the duration of the region to protect. On a clean
/// exit the drop is free of side effects; on an unwinding exit the process
/// ends with this guard's exit code. Panic payloads are not inspected and
/// never filtered by type — any escaping failure is fatal.
#[derive(Debug)]
pub struct FatalGuard {
    exit_code: i32,
}

/// Create a guard with the default exit code. Entry point for the scoped
/// form:
///
/// ```no_run
/// use fatal_guard::fatal_guard;
///
/// let _guard = fatal_guard();
/// risky_work();
/// # fn risky_work() {}
/// ```
pub fn fatal_guard() -> FatalGuard {
    FatalGuard::new()
}

impl FatalGuard {
    pub fn new() -> Self {
        Self::with_exit_code(DEFAULT_EXIT_CODE)
    }

    /// Guard that terminates with `code` instead of [`DEFAULT_EXIT_CODE`].
    /// A zero `code` is replaced by the default.
    pub fn with_exit_code(code: i32) -> Self {
        Self {
            exit_code: nonzero_code(code),
        }
    }

    /// Exit status this guard will terminate with on the fatal path.
    #[inline]
    pub fn exit_code(&self) -> i32 {
        self.exit_code
    }

    /// Escalate an error directly: report it on stderr and in the log,
    /// then terminate the process.
    ///
    /// This is the `Result` counterpart of the panic path, for routines
    /// that surface failures as error values rather than by unwinding.
    pub fn escalate<E: Display>(&self, err: E) -> ! {
        report_and_exit(&err.to_string(), self.exit_code)
    }

    /// Unwrap `Ok`, [`escalate`](Self::escalate) `Err`.
    pub fn check<T, E: Display>(&self, result: Result<T, E>) -> T {
        match result {
            Ok(value) => value,
            Err(err) => self.escalate(err),
        }
    }
}

impl Default for FatalGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for FatalGuard {
    fn drop(&mut self) {
        if thread::panicking() {
            // The panic hook already printed the message and origin.
            let current = thread::current();
            error!(
                thread = current.name().unwrap_or("<unnamed>"),
                exit_code = self.exit_code,
                "panic escaped a guarded region; terminating process"
            );
            exit_now(self.exit_code);
        }
    }
}

static_assertions::assert_impl_all!(FatalGuard: Send);

#[cfg(test)]
mod tests {
    use super::*;

    // The fatal path ends the test process and is covered by the
    // guard_probe integration tests. These cover everything that can be
    // observed in-process.

    #[test]
    fn clean_drop_has_no_effect() {
        let guard = fatal_guard();
        assert_eq!(guard.exit_code(), DEFAULT_EXIT_CODE);
        drop(guard);
    }

    #[test]
    fn custom_exit_code_is_kept() {
        assert_eq!(FatalGuard::with_exit_code(7).exit_code(), 7);
    }

    #[test]
    fn zero_exit_code_is_coerced() {
        assert_eq!(FatalGuard::with_exit_code(0).exit_code(), DEFAULT_EXIT_CODE);
        assert_eq!(nonzero_code(0), DEFAULT_EXIT_CODE);
        assert_eq!(nonzero_code(-1), -1);
    }

    #[test]
    fn check_passes_ok_through() {
        let guard = fatal_guard();
        let value: u32 = guard.check(Ok::<_, std::io::Error>(42));
        assert_eq!(value, 42);
    }

    #[test]
    fn guard_survives_a_caught_panic_elsewhere() {
        // catch_unwind between the panic and the guard means the guard's
        // region never unwound; dropping it afterwards must be a no-op.
        let guard = fatal_guard();
        let result = std::panic::catch_unwind(|| panic!("contained"));
        assert!(result.is_err());
        drop(guard);
    }
}
