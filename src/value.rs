//! The value model for chains.
//!
//! Composers are generic over the value type flowing between steps. The
//! handful of conversions they need (unbound parameters, collecting parallel
//! branch results, tagging collect-all outcomes) live on [`ChainValue`], and
//! a ready-made implementation is provided for [`serde_json::Value`] as the
//! dynamic-value rendition.

use serde_json::Value;

/// Conversions a chain needs from its value type.
///
/// `E` is the rejection reason type of the steps the value flows between;
/// it only appears in [`ChainValue::tag_error`], which embeds a captured
/// rejection into the value domain for collect-all mode.
pub trait ChainValue<E>: Clone + Send + Sync + Sized + 'static {
    /// The value an unbound step parameter receives.
    fn absent() -> Self;

    /// Fold the ordered results of a parallel group into a single value.
    fn collect(branches: Vec<Self>) -> Self;

    /// Tag a successful continuation outcome in collect-all mode.
    fn tag_result(value: Self) -> Self;

    /// Tag a captured continuation rejection in collect-all mode.
    fn tag_error(error: E) -> Self;
}

/// Dynamic JSON values: unbound parameters are `null`, parallel groups
/// collect into arrays, and collect-all outcomes are one-key objects
/// (`{"result": ...}` or `{"error": ...}`).
impl<E> ChainValue<E> for Value
where
    E: serde::Serialize + Send + 'static,
{
    fn absent() -> Self {
        Value::Null
    }

    fn collect(branches: Vec<Self>) -> Self {
        Value::Array(branches)
    }

    fn tag_result(value: Self) -> Self {
        serde_json::json!({ "result": value })
    }

    fn tag_error(error: E) -> Self {
        // Reasons that do not serialize degrade to null rather than abort
        // a chain that collect-all promised would keep going.
        let reason = serde_json::to_value(&error).unwrap_or(Value::Null);
        serde_json::json!({ "error": reason })
    }
}
