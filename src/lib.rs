#![deny(missing_docs)]

//! Stepchain, combinators for composing async steps into pipelines.
//!
//! # Design Goals
//!
//! Two operators, freely nestable:
//!
//! - **Series**: each step's resolved value is piped as the sole argument of
//!   the next step; the first rejection short-circuits the rest
//! - **Parallel**: every branch receives the same argument list and the
//!   results are collected in branch order
//!
//! A composed function is itself a [`Step`], so a parallel group can sit
//! inside a series and a pre-composed series can be a parallel branch.
//! Collect-all mode ([`series_all`], [`chain_all!`]) rewrites continuation
//! rejections into tagged values so a chain always runs to its end.
//!
//! # Core Concepts
//!
//! - [`Step`]: an async operation over an ordered argument list
//! - [`Series`]: sequential composition with an initiator and continuations
//! - [`Parallel`]: concurrent fan-out joined by an injectable [`Join`]
//! - [`ChainValue`]: the conversions a chain needs from its value type,
//!   provided out of the box for `serde_json::Value`
//!
//! The library settles whatever its steps settle: rejection reasons are
//! opaque and surface unchanged, and no retries, timeouts, or cancellation
//! are imposed.

// Modules
mod macros;
pub mod parallel;
pub mod series;
pub mod step;
pub mod value;

// Re-exports for convenience
pub use parallel::{parallel, FirstFailure, Join, Parallel};
pub use series::{series, series_all, Series, SeriesOptions};
pub use step::{shared, unary, Args, SharedStep, Step, StepFuture};
pub use value::ChainValue;

#[cfg(test)]
mod tests;
