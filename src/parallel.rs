//! Parallel composition: fan one argument list out to every branch and
//! collect the results in branch order.

use std::sync::Arc;

use futures::future;

use crate::step::{Args, SharedStep, Step, StepFuture};
use crate::value::ChainValue;

/// Strategy for joining the branch futures of a parallel group.
///
/// The join decides how concurrent branches settle into one outcome. It is
/// injected per composer rather than read from process-wide state, so a
/// parallel group is independently testable and re-entrant.
pub trait Join<V, E>: Send + Sync {
    /// Join the branch futures into one future of the ordered results.
    ///
    /// Must preserve branch order in the resolved list and reject with the
    /// first branch rejection it observes.
    fn join_all<'a>(&self, branches: Vec<StepFuture<'a, V, E>>) -> StepFuture<'a, Vec<V>, E>;
}

/// Default join: all branches polled concurrently, first rejection wins.
///
/// Sibling branches are not cancelled when one rejects; their eventual
/// outcomes are discarded.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstFailure;

impl<V, E> Join<V, E> for FirstFailure
where
    V: Send + 'static,
    E: Send + 'static,
{
    fn join_all<'a>(&self, branches: Vec<StepFuture<'a, V, E>>) -> StepFuture<'a, Vec<V>, E> {
        Box::pin(future::try_join_all(branches))
    }
}

/// A parallel group of steps, itself a step.
///
/// Invoking the group invokes every branch with the same argument list,
/// creating all branch futures before awaiting any of them, and resolves to
/// [`ChainValue::collect`] of the results in branch order regardless of
/// settlement order.
pub struct Parallel<V, E>
where
    V: Send + 'static,
    E: Send + 'static,
{
    branches: Vec<SharedStep<V, E>>,
    join: Arc<dyn Join<V, E>>,
}

impl<V, E> Parallel<V, E>
where
    V: Send + 'static,
    E: Send + 'static,
{
    /// Create a parallel group over the given branches.
    ///
    /// A group wants at least one branch; an empty group is degenerate and
    /// resolves to an empty collection.
    pub fn new(branches: impl IntoIterator<Item = SharedStep<V, E>>) -> Self {
        Self {
            branches: branches.into_iter().collect(),
            join: Arc::new(FirstFailure),
        }
    }

    /// Replace the join strategy for this group.
    pub fn with_join(mut self, join: impl Join<V, E> + 'static) -> Self {
        self.join = Arc::new(join);
        self
    }

    /// Number of branches in this group.
    pub fn len(&self) -> usize {
        self.branches.len()
    }

    /// Whether this group has no branches.
    pub fn is_empty(&self) -> bool {
        self.branches.is_empty()
    }
}

impl<V, E> Clone for Parallel<V, E>
where
    V: Send + 'static,
    E: Send + 'static,
{
    fn clone(&self) -> Self {
        Self {
            branches: self.branches.clone(),
            join: Arc::clone(&self.join),
        }
    }
}

#[async_trait::async_trait]
impl<V, E> Step<V, E> for Parallel<V, E>
where
    V: ChainValue<E>,
    E: Send + 'static,
{
    async fn call(&self, args: Args<V>) -> Result<V, E> {
        #[cfg(feature = "tracing")]
        tracing::info!(branches = self.branches.len(), "parallel.fan_out");

        // Every branch future is created before any is awaited, so no
        // branch is artificially serialized behind a sibling.
        let branches: Vec<_> = self
            .branches
            .iter()
            .map(|branch| branch.call(args.clone()))
            .collect();

        match self.join.join_all(branches).await {
            Ok(results) => {
                #[cfg(feature = "tracing")]
                tracing::info!(outcome = "resolved", "parallel.join");

                Ok(V::collect(results))
            }
            Err(e) => {
                #[cfg(feature = "tracing")]
                tracing::error!(outcome = "rejected", "parallel.join");

                Err(e)
            }
        }
    }
}

/// Combine steps into a parallel group with the default join.
///
/// The group is an ordinary step: it can stand alone, appear as a series
/// continuation, or nest inside another group via a pre-composed series.
pub fn parallel<V, E>(branches: impl IntoIterator<Item = SharedStep<V, E>>) -> Parallel<V, E>
where
    V: Send + 'static,
    E: Send + 'static,
{
    Parallel::new(branches)
}
