//! Shared fixtures for composer tests.
//!
//! This module contains:
//! - `PipeError`: the rejection reason used across tests
//! - `Probe`: a step that records invocations and settles on command
//! - `resolved` / `rejected`: immediately-settling step constructors

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use serde::Serialize;
use serde_json::Value;
use tokio::sync::oneshot;

use crate::{Args, Step};

/// Rejection reasons for test pipelines.
#[derive(thiserror::Error, Clone, Debug, PartialEq, Serialize)]
pub enum PipeError {
    /// Generic failure.
    #[error("boom")]
    Boom,

    /// A named stage refused to run.
    #[error("stage {0} unavailable")]
    Unavailable(String),
}

struct ProbeInner {
    calls: Mutex<Vec<Args<Value>>>,
    pending: Mutex<VecDeque<oneshot::Sender<Result<Value, PipeError>>>>,
}

/// A step whose settlement the test controls.
///
/// Every invocation records its argument list and parks on a oneshot until
/// the test calls [`Probe::resolve`] or [`Probe::reject`]. Settlement is
/// first-invoked, first-settled, which mirrors how the tests invoke them.
#[derive(Clone)]
pub struct Probe {
    inner: Arc<ProbeInner>,
}

impl Probe {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(ProbeInner {
                calls: Mutex::new(Vec::new()),
                pending: Mutex::new(VecDeque::new()),
            }),
        }
    }

    /// Number of invocations observed so far.
    pub fn calls(&self) -> usize {
        self.inner.calls.lock().unwrap().len()
    }

    /// Argument list of the invocation at `index`.
    pub fn args(&self, index: usize) -> Args<Value> {
        self.inner.calls.lock().unwrap()[index].clone()
    }

    /// Resolve the oldest pending invocation.
    pub fn resolve(&self, value: Value) {
        self.settle(Ok(value));
    }

    /// Reject the oldest pending invocation.
    pub fn reject(&self, error: PipeError) {
        self.settle(Err(error));
    }

    fn settle(&self, outcome: Result<Value, PipeError>) {
        let sender = self
            .inner
            .pending
            .lock()
            .unwrap()
            .pop_front()
            .expect("no pending invocation to settle");
        sender.send(outcome).expect("invocation future was dropped");
    }
}

#[async_trait::async_trait]
impl Step<Value, PipeError> for Probe {
    async fn call(&self, args: Args<Value>) -> Result<Value, PipeError> {
        let (tx, rx) = oneshot::channel();
        self.inner.calls.lock().unwrap().push(args);
        self.inner.pending.lock().unwrap().push_back(tx);
        rx.await.expect("probe dropped before settling")
    }
}

/// A step that immediately resolves to `value` on every invocation.
pub fn resolved(value: Value) -> impl Step<Value, PipeError> {
    move |_args: Args<Value>| {
        let value = value.clone();
        async move { Ok::<Value, PipeError>(value) }
    }
}

/// A step that immediately rejects with `error` on every invocation.
pub fn rejected(error: PipeError) -> impl Step<Value, PipeError> {
    move |_args: Args<Value>| {
        let error = error.clone();
        async move { Err::<Value, PipeError>(error) }
    }
}
