// LogWeave - core/mutator.rs
//
// Mutator capability: a pipeline stage that rewrites message text.
// Core layer: trait only, stock implementations live in plugins/.

use crate::core::context::Context;

/// Transforms a message before it is filtered and delivered.
///
/// Strategies apply their mutators in registration order, feeding each one
/// the previous one's output, so one mutator can build on another's work.
///
/// `context` is the per-call copy owned by the pipeline: a mutator may add or
/// rewrite keys and later mutators, the filters, and the delivery step of the
/// same `log` call will see the change. The caller's map is never touched.
///
/// Implementations must be total: every text/context pair (including an empty
/// text and an empty context) yields a string.
pub trait Mutator: Send + Sync {
    fn mutate(&self, text: &str, context: &mut Context) -> String;
}

/// Fold `text` through `mutators` in order.
pub(crate) fn apply_all<'a, I>(mutators: I, text: &str, context: &mut Context) -> String
where
    I: IntoIterator<Item = &'a std::sync::Arc<dyn Mutator>>,
{
    let mut message = text.to_string();
    for mutator in mutators {
        message = mutator.mutate(&message, context);
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;

    struct Append(&'static str);

    impl Mutator for Append {
        fn mutate(&self, text: &str, _context: &mut Context) -> String {
            format!("{text}{}", self.0)
        }
    }

    struct CountCalls;

    impl Mutator for CountCalls {
        fn mutate(&self, text: &str, context: &mut Context) -> String {
            let n = context.get("calls").and_then(|v| v.as_u64()).unwrap_or(0);
            context.insert("calls".to_string(), json!(n + 1));
            text.to_string()
        }
    }

    #[test]
    fn test_apply_all_in_order() {
        let mutators: Vec<Arc<dyn Mutator>> = vec![Arc::new(Append("1")), Arc::new(Append("2"))];
        let mut ctx = Context::new();
        assert_eq!(apply_all(&mutators, "x", &mut ctx), "x12");
    }

    #[test]
    fn test_apply_all_without_mutators_returns_input() {
        let none: [Arc<dyn Mutator>; 0] = [];
        let mut ctx = Context::new();
        assert_eq!(apply_all(&none, "unchanged", &mut ctx), "unchanged");
    }

    #[test]
    fn test_mutators_share_the_evolving_context() {
        let counter: Arc<dyn Mutator> = Arc::new(CountCalls);
        let other: Arc<dyn Mutator> = Arc::new(CountCalls);
        let mut ctx = Context::new();
        apply_all(&[counter, other], "", &mut ctx);
        assert_eq!(ctx["calls"], json!(2));
    }
}
