//! The `Step` contract and adapters for turning ordinary values into steps.
//!
//! A `Step` is an asynchronous operation over an ordered argument list.
//! Everything in this crate (closures, parallel groups, whole series)
//! satisfies the same contract, which is what makes composition nest freely.

use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;

use crate::value::ChainValue;

/// Ordered argument list handed to a step.
///
/// The list is owned by the invocation; the library never mutates a list it
/// has already handed out, and each invocation gets its own.
pub type Args<V> = Vec<V>;

/// Boxed future of a step outcome.
pub type StepFuture<'a, T, E> = BoxFuture<'a, Result<T, E>>;

/// A step that is shared by reference.
///
/// Composers store steps as `SharedStep`, so the same step value can appear
/// in any number of compositions without being copied.
pub type SharedStep<V, E> = Arc<dyn Step<V, E>>;

/// An asynchronous operation from an argument list to a value.
///
/// `V` is the value type flowing through a chain and `E` the opaque
/// rejection reason. Implementations must be safe to invoke any number of
/// times, including concurrently with themselves; the composers rely on
/// that for re-entrancy.
#[async_trait::async_trait]
pub trait Step<V, E>: Send + Sync
where
    V: Send + 'static,
    E: Send + 'static,
{
    /// Invoke the step with the given arguments.
    async fn call(&self, args: Args<V>) -> Result<V, E>;
}

/// Any async closure over an argument list is a step.
#[async_trait::async_trait]
impl<V, E, F, Fut> Step<V, E> for F
where
    V: Send + 'static,
    E: Send + 'static,
    F: Fn(Args<V>) -> Fut + Send + Sync,
    Fut: Future<Output = Result<V, E>> + Send,
{
    async fn call(&self, args: Args<V>) -> Result<V, E> {
        (self)(args).await
    }
}

/// Steps behind an `Arc` are steps, which lets composed functions and test
/// fixtures be held by the caller and by a composition at the same time.
#[async_trait::async_trait]
impl<V, E, S> Step<V, E> for Arc<S>
where
    V: Send + 'static,
    E: Send + 'static,
    S: Step<V, E> + ?Sized,
{
    async fn call(&self, args: Args<V>) -> Result<V, E> {
        (**self).call(args).await
    }
}

/// Erase a concrete step into a [`SharedStep`].
pub fn shared<V, E, S>(step: S) -> SharedStep<V, E>
where
    V: Send + 'static,
    E: Send + 'static,
    S: Step<V, E> + 'static,
{
    Arc::new(step)
}

/// Lift a single-argument async function into a step.
///
/// Continuation steps in a series always receive exactly one argument, so
/// most of them are more naturally written over a value than over a list.
/// When the supplied list is shorter than the declared arity the parameter
/// is unbound and receives [`ChainValue::absent`].
pub fn unary<V, E, F, Fut>(f: F) -> impl Step<V, E>
where
    V: ChainValue<E>,
    E: Send + 'static,
    F: Fn(V) -> Fut + Send + Sync,
    Fut: Future<Output = Result<V, E>> + Send,
{
    move |mut args: Args<V>| {
        let value = if args.is_empty() {
            V::absent()
        } else {
            args.remove(0)
        };
        f(value)
    }
}
