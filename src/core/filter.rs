// LogWeave - core/filter.rs
//
// Filter capability: decides whether an already-mutated message is dropped.
// Filters are OR-combined with short-circuit: the first one that suppresses
// wins and the rest are not consulted.
// Core layer: trait only, stock implementations live in plugins/.

use crate::core::context::Context;
use std::sync::Arc;

/// Blocks messages from being delivered based on the filter's criteria.
///
/// Every strategy may carry different filters. `should_suppress` returns
/// `true` when the message must NOT be delivered. It receives the text after
/// all mutators ran, and the context as the mutators left it.
pub trait Filter: Send + Sync {
    fn should_suppress(&self, text: &str, context: &Context) -> bool;
}

/// Position of the first filter that suppresses `text`, if any.
///
/// Filters after the suppressing one are never invoked.
pub(crate) fn first_suppressing<'a, I>(filters: I, text: &str, context: &Context) -> Option<usize>
where
    I: IntoIterator<Item = &'a Arc<dyn Filter>>,
{
    filters
        .into_iter()
        .position(|filter| filter.should_suppress(text, context))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Fixed(bool);

    impl Filter for Fixed {
        fn should_suppress(&self, _text: &str, _context: &Context) -> bool {
            self.0
        }
    }

    #[derive(Default)]
    struct Recording {
        calls: AtomicUsize,
    }

    impl Filter for Recording {
        fn should_suppress(&self, _text: &str, _context: &Context) -> bool {
            self.calls.fetch_add(1, Ordering::SeqCst);
            false
        }
    }

    #[test]
    fn test_no_filters_never_suppress() {
        let none: [Arc<dyn Filter>; 0] = [];
        assert_eq!(first_suppressing(&none, "anything", &Context::new()), None);
    }

    #[test]
    fn test_first_suppressing_short_circuits() {
        let recorder = Arc::new(Recording::default());
        let filters: Vec<Arc<dyn Filter>> = vec![
            Arc::new(Fixed(false)),
            Arc::new(Fixed(true)),
            recorder.clone(),
        ];
        assert_eq!(first_suppressing(&filters, "msg", &Context::new()), Some(1));
        assert_eq!(recorder.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_all_filters_consulted_when_none_suppress() {
        let recorder = Arc::new(Recording::default());
        let filters: Vec<Arc<dyn Filter>> = vec![Arc::new(Fixed(false)), recorder.clone()];
        assert_eq!(first_suppressing(&filters, "msg", &Context::new()), None);
        assert_eq!(recorder.calls.load(Ordering::SeqCst), 1);
    }
}
