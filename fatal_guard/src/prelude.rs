//! Prelude module for common re-exports.
//!
//! # Usage
//!
//! ```rust
//! use fatal_guard::prelude::*;
//! ```

// ─── Scoped guard ───────────────────────────────────────────────────
pub use crate::guard::{DEFAULT_EXIT_CODE, FatalGuard, fatal_guard};

// ─── Decorators ─────────────────────────────────────────────────────
pub use crate::wrap::{fatal_on_error, fatal_on_panic};
