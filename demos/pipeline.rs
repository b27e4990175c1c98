//! Report pipeline demo showing happy and unhappy paths.
//!
//! Run with: cargo run --example pipeline

use std::time::Duration;

use serde::Serialize;
use serde_json::{json, Value};
use stepchain::{chain, chain_all, unary, Args, Step};
use thiserror::Error;

// ============================================================================
// Error type
// ============================================================================

#[derive(Debug, Clone, Error, Serialize)]
enum ReportError {
    #[error("account {0} not found")]
    AccountNotFound(String),
    #[error("scoring backend down")]
    ScoringDown,
}

// ============================================================================
// Steps
// ============================================================================

/// Initiator: looks an account up by the id passed to the composed function.
async fn fetch_account(args: Args<Value>) -> Result<Value, ReportError> {
    let id = args
        .first()
        .and_then(Value::as_str)
        .unwrap_or("unknown")
        .to_owned();
    println!("  [fetch_account] looking up {id}");
    tokio::time::sleep(Duration::from_millis(50)).await;

    if id == "missing" {
        return Err(ReportError::AccountNotFound(id));
    }
    Ok(json!({ "id": id, "balance": 1250 }))
}

/// Branch: annotates the account with a risk score.
async fn score(account: Value) -> Result<Value, ReportError> {
    println!("  [score] scoring {}", account["id"]);
    tokio::time::sleep(Duration::from_millis(80)).await;
    Ok(json!({ "score": 0.87 }))
}

/// Branch: fetches the recent activity summary.
async fn activity(account: Value) -> Result<Value, ReportError> {
    println!("  [activity] summarizing {}", account["id"]);
    tokio::time::sleep(Duration::from_millis(30)).await;
    Ok(json!({ "recent_transfers": 3 }))
}

/// Final step: folds the branch results into one report.
async fn summarize(parts: Value) -> Result<Value, ReportError> {
    println!("  [summarize] combining {parts}");
    Ok(json!({ "report": parts }))
}

/// A branch that is down, for the collect-all run.
async fn flaky_score(_account: Value) -> Result<Value, ReportError> {
    Err(ReportError::ScoringDown)
}

#[tokio::main]
async fn main() {
    let report = chain!(
        fetch_account,
        [unary(score), unary(activity)],
        unary(summarize)
    );

    println!("--- happy path ---");
    match report.call(vec![json!("acct-42")]).await {
        Ok(v) => println!("resolved: {v}"),
        Err(e) => println!("rejected: {e}"),
    }

    println!("--- missing account rejects the chain ---");
    match report.call(vec![json!("missing")]).await {
        Ok(v) => println!("resolved: {v}"),
        Err(e) => println!("rejected: {e}"),
    }

    // Collect-all: the broken scorer is captured as a tagged value instead
    // of aborting the chain.
    println!("--- collect-all keeps going ---");
    let tolerant = chain_all!(fetch_account, unary(flaky_score), unary(summarize));
    match tolerant.call(vec![json!("acct-42")]).await {
        Ok(v) => println!("resolved: {v}"),
        Err(e) => println!("rejected: {e}"),
    }
}
