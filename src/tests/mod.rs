//! Tests for the series and parallel composers.
//!
//! ## Test Organization
//!
//! - `common`: Shared fixtures, the `Probe` step and error type
//! - `series`: Sequential piping, ordering, and short-circuit tests
//! - `parallel`: Fan-out, ordered collection, and join tests
//! - `collect_all`: Collect-all mode outcome tagging tests
//! - `nesting`: Implicit parallel shorthand and composed-step nesting tests
//!
//! ## Fixtures
//!
//! Most tests drive a composed function one poll at a time against `Probe`
//! steps, which record every invocation's argument list and settle only when
//! the test says so. That makes invocation order and short-circuiting
//! observable without sleeps or races.

mod common;
