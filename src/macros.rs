//! Literal syntax for compositions.
//!
//! - `chain!`: series literal; a bracketed list after the first position is
//!   an implicit parallel group
//! - `chain_all!`: series literal in collect-all mode
//! - `parallel!`: parallel group literal

/// Compose steps into a series.
///
/// The first expression is the initiator; every following expression is a
/// continuation. A bracketed list of steps anywhere after the first position
/// is shorthand for a parallel group over those steps, built at composition
/// time:
///
/// ```
/// use serde_json::{json, Value};
/// use stepchain::{chain, unary, Args, Step};
///
/// # futures::executor::block_on(async {
/// let greet = |args: Args<Value>| async move { Ok::<Value, Value>(args[0].clone()) };
/// let upper = unary(|v: Value| async move {
///     Ok::<Value, Value>(json!(v.as_str().unwrap_or("").to_uppercase()))
/// });
/// let excited = unary(|v: Value| async move {
///     Ok::<Value, Value>(json!(format!("{}!", v.as_str().unwrap_or(""))))
/// });
///
/// let f = chain!(greet, [upper, excited]);
/// let out = f.call(vec![json!("hey")]).await.unwrap();
/// assert_eq!(out, json!(["HEY", "hey!"]));
/// # });
/// ```
#[macro_export]
macro_rules! chain {
    ($initiator:expr $(,)?) => {
        $crate::series($initiator)
    };
    ($initiator:expr, $($rest:tt)+) => {
        $crate::chain!(@link $crate::series($initiator), $($rest)+)
    };

    // Bracketed list: implicit parallel group.
    (@link $acc:expr, [$($branch:expr),+ $(,)?], $($rest:tt)+) => {
        $crate::chain!(@link $acc.fan_out([$($crate::shared($branch)),+]), $($rest)+)
    };
    (@link $acc:expr, [$($branch:expr),+ $(,)?] $(,)?) => {
        $acc.fan_out([$($crate::shared($branch)),+])
    };

    // Plain continuation step.
    (@link $acc:expr, $step:expr, $($rest:tt)+) => {
        $crate::chain!(@link $acc.then($step), $($rest)+)
    };
    (@link $acc:expr, $step:expr $(,)?) => {
        $acc.then($step)
    };
}

/// Compose steps into a collect-all series.
///
/// Same syntax as [`chain!`]; continuation outcomes are tagged values and
/// the composed function only rejects if the initiator rejects.
#[macro_export]
macro_rules! chain_all {
    ($($tokens:tt)+) => {
        $crate::chain!($($tokens)+).collect_all()
    };
}

/// Compose steps into a parallel group.
///
/// Every branch receives the composed function's argument list; the result
/// is the ordered collection of branch results.
#[macro_export]
macro_rules! parallel {
    ($($branch:expr),+ $(,)?) => {
        $crate::parallel([$($crate::shared($branch)),+])
    };
}
