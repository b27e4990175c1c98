//! Series composition: pipe each step's resolved value into the next.
//!
//! A series has an initiator, which alone receives the composed function's
//! actual call arguments, followed by continuations that each receive a
//! single argument: the resolved value of their predecessor. A rejection
//! short-circuits the chain unless collect-all mode rewrites it into a
//! tagged value and keeps going.

use serde::{Deserialize, Serialize};

use crate::parallel::Parallel;
use crate::step::{shared, Args, SharedStep, Step};
use crate::value::ChainValue;

/// Options recognized by a series composition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesOptions {
    /// Collect-all mode: continuation outcomes are tagged values instead of
    /// chain-aborting rejections. The initiator is never wrapped.
    pub all: bool,
}

/// A sequential chain of steps, itself a step.
///
/// Built once, immutable thereafter, and invocable any number of times;
/// invocations share nothing beyond the step references.
pub struct Series<V, E>
where
    V: Send + 'static,
    E: Send + 'static,
{
    initiator: SharedStep<V, E>,
    links: Vec<SharedStep<V, E>>,
    options: SeriesOptions,
}

impl<V, E> Series<V, E>
where
    V: Send + 'static,
    E: Send + 'static,
{
    /// Start a series at the given initiator with the given options.
    pub fn with_options(initiator: impl Step<V, E> + 'static, options: SeriesOptions) -> Self {
        Self {
            initiator: shared(initiator),
            links: Vec::new(),
            options,
        }
    }

    /// Append a continuation step.
    ///
    /// The continuation receives exactly one argument, the resolved value
    /// of whatever precedes it, and runs only after that value settles.
    pub fn then(mut self, step: impl Step<V, E> + 'static) -> Self {
        self.links.push(shared(step));
        self
    }

    /// Append an implicit parallel group as the next continuation.
    ///
    /// The group is built here, at composition time; at call time every
    /// branch receives the predecessor's resolved value and the ordered
    /// branch results become the value handed to the following step.
    pub fn fan_out(mut self, branches: impl IntoIterator<Item = SharedStep<V, E>>) -> Self
    where
        V: ChainValue<E>,
    {
        self.links.push(shared(Parallel::new(branches)));
        self
    }

    /// Switch this series into collect-all mode.
    pub fn collect_all(mut self) -> Self {
        self.options.all = true;
        self
    }

    /// The options this series was composed with.
    pub fn options(&self) -> SeriesOptions {
        self.options
    }

    /// Number of steps in the chain, initiator included.
    pub fn len(&self) -> usize {
        1 + self.links.len()
    }

    /// A series is never empty; the initiator is always present.
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl<V, E> Clone for Series<V, E>
where
    V: Send + 'static,
    E: Send + 'static,
{
    fn clone(&self) -> Self {
        Self {
            initiator: self.initiator.clone(),
            links: self.links.clone(),
            options: self.options,
        }
    }
}

#[async_trait::async_trait]
impl<V, E> Step<V, E> for Series<V, E>
where
    V: ChainValue<E>,
    E: Send + 'static,
{
    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    async fn call(&self, args: Args<V>) -> Result<V, E> {
        let mut value = match self.initiator.call(args).await {
            Ok(v) => v,
            Err(e) => {
                #[cfg(feature = "tracing")]
                tracing::error!(link = 0_usize, outcome = "rejected", "link.end");

                // The initiator escapes collect-all wrapping.
                return Err(e);
            }
        };

        for (index, link) in self.links.iter().enumerate() {
            #[cfg(feature = "tracing")]
            tracing::info!(link = index + 1, "link.start");

            // The predecessor's resolved value is the continuation's sole
            // argument. The continuation is not invoked at all once an
            // earlier rejection has escaped.
            let outcome = link.call(vec![value]).await;

            value = if self.options.all {
                match outcome {
                    Ok(v) => {
                        #[cfg(feature = "tracing")]
                        tracing::info!(link = index + 1, outcome = "resolved", "link.end");

                        V::tag_result(v)
                    }
                    Err(e) => {
                        #[cfg(feature = "tracing")]
                        tracing::info!(link = index + 1, outcome = "captured", "link.end");

                        V::tag_error(e)
                    }
                }
            } else {
                match outcome {
                    Ok(v) => {
                        #[cfg(feature = "tracing")]
                        tracing::info!(link = index + 1, outcome = "resolved", "link.end");

                        v
                    }
                    Err(e) => {
                        #[cfg(feature = "tracing")]
                        tracing::error!(link = index + 1, outcome = "rejected", "link.end");

                        return Err(e);
                    }
                }
            };
        }

        Ok(value)
    }
}

/// Start a series at the given initiator.
///
/// This is the library's entry point; continuations are appended with
/// [`Series::then`] and [`Series::fan_out`], or written as literals with
/// [`chain!`](crate::chain). A single-step series is the initiator
/// re-wrapped as a composed function.
pub fn series<V, E>(initiator: impl Step<V, E> + 'static) -> Series<V, E>
where
    V: Send + 'static,
    E: Send + 'static,
{
    Series::with_options(initiator, SeriesOptions::default())
}

/// Start a series in collect-all mode.
///
/// Sugar for `series(initiator).collect_all()`. With no continuations the
/// mode has no effect: the initiator's outcome is returned untagged.
pub fn series_all<V, E>(initiator: impl Step<V, E> + 'static) -> Series<V, E>
where
    V: Send + 'static,
    E: Send + 'static,
{
    Series::with_options(initiator, SeriesOptions { all: true })
}
