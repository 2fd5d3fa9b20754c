//! Test utilities for dinetap services.
//!
//! Provides fixed role secrets and bearer-header builders for tests.
//! Import in `#[cfg(test)]` blocks and `tests/` targets only — never in
//! production code.

pub mod auth;
