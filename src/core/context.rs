// LogWeave - core/context.rs
//
// The data that travels alongside a message. Keys and their meaning are
// private to the mutators/filters that understand them; the pipeline only
// copies and forwards the map.

use serde_json::Value;

/// Context mapping passed with every message.
///
/// An absent context is represented by an empty map.
pub type Context = serde_json::Map<String, Value>;

/// Build a context from key/value pairs.
///
/// ```
/// use logweave::core::context::context_from;
/// let ctx = context_from([("user", "ada"), ("request", "42")]);
/// assert_eq!(ctx["user"], "ada");
/// ```
pub fn context_from<I, K, V>(pairs: I) -> Context
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Value>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

/// Render a context value for embedding in message text.
/// Strings are inserted without JSON quotes.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_context_from_pairs() {
        let ctx = context_from([("a", json!(1)), ("b", json!("two"))]);
        assert_eq!(ctx.len(), 2);
        assert_eq!(ctx["a"], json!(1));
    }

    #[test]
    fn test_render_value_unquotes_strings() {
        assert_eq!(render_value(&json!("plain")), "plain");
        assert_eq!(render_value(&json!(7)), "7");
        assert_eq!(render_value(&json!(true)), "true");
        assert_eq!(render_value(&json!(null)), "null");
    }
}
