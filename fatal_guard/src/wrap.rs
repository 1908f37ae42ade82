//! # Decorator Forms
//!
//! Adapters that take a worker routine and return the same routine with
//! its entire body bracketed by a [`FatalGuard`]. Wrapping a routine this
//! way is observably equivalent to opening the guard manually on its first
//! line; the decorator exists so the guard cannot be forgotten at the
//! `thread::spawn` call site.

use std::fmt::Display;

use crate::guard::FatalGuard;

/// Wrap a routine so that any panic escaping it terminates the process.
///
/// ```no_run
/// use std::thread;
///
/// use fatal_guard::fatal_on_panic;
///
/// let handle = thread::spawn(fatal_on_panic(|| {
///     do_stuff();
/// }));
/// # fn do_stuff() {}
/// # let _ = handle.join();
/// ```
pub fn fatal_on_panic<F, R>(f: F) -> impl FnOnce() -> R
where
    F: FnOnce() -> R,
{
    move || {
        let _guard = FatalGuard::new();
        f()
    }
}

/// Wrap a fallible routine so that both an escaping panic and an `Err`
/// return terminate the process. On success the `Ok` value is passed
/// through.
pub fn fatal_on_error<F, T, E>(f: F) -> impl FnOnce() -> T
where
    F: FnOnce() -> Result<T, E>,
    E: Display,
{
    move || {
        let guard = FatalGuard::new();
        guard.check(f())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrapped_routine_passes_its_result_through() {
        let wrapped = fatal_on_panic(|| 6 * 7);
        assert_eq!(wrapped(), 42);
    }

    #[test]
    fn wrapped_routine_can_capture_state() {
        let base = String::from("report");
        let wrapped = fatal_on_panic(move || format!("{base}-ok"));
        assert_eq!(wrapped(), "report-ok");
    }

    #[test]
    fn fallible_routine_unwraps_ok() {
        let wrapped = fatal_on_error(|| Ok::<_, std::io::Error>(7u8));
        assert_eq!(wrapped(), 7);
    }

    #[test]
    fn wrapped_routine_is_spawnable() {
        let handle = std::thread::spawn(fatal_on_panic(|| 1 + 1));
        assert_eq!(handle.join().unwrap(), 2);
    }
}
