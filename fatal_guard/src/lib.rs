//! # Fatal Guard
//!
//! When a worker thread panics, Rust's default behavior is to unwind and
//! discard that one thread while the rest of the process keeps running.
//! For supervisor-style programs this is the worst possible default: the
//! failure is printed once and then the process limps on, half-alive,
//! until something downstream blocks forever on a value that will never
//! arrive.
//!
//! This crate escalates such a thread-local failure into whole-process
//! termination with a non-zero exit status, after the failure has been
//! reported through the normal channels.
//!
//! # Module Structure
//!
//! - [`guard`] - The scoped [`FatalGuard`](guard::FatalGuard) and error escalation
//! - [`wrap`] - Decorator forms for worker routines
//! - [`hook`] - Process-wide panic hook installation
//! - [`prelude`] - Common re-exports for convenience
//!
//! # Usage
//!
//! ```no_run
//! use std::thread;
//!
//! use fatal_guard::prelude::*;
//!
//! fn worker() {
//!     let _guard = fatal_guard();
//!     // Any panic past this point takes the whole process down.
//!     do_stuff();
//! }
//!
//! # fn do_stuff() {}
//! let handle = thread::spawn(worker);
//! # let _ = handle.join();
//! ```

pub mod guard;
pub mod hook;
pub mod prelude;
pub mod wrap;

pub use guard::{DEFAULT_EXIT_CODE, FatalGuard, fatal_guard};
pub use wrap::{fatal_on_error, fatal_on_panic};
