//! Composite progress notifier — delegates to multiple notifiers.
//!
//! Used to fan out settlement events to both the terminal progress
//! display and the JSONL event log simultaneously.

use chorus_domain::ProviderId;

use super::progress::{AdapterEvent, ProgressNotifier};

/// A progress notifier that delegates to multiple inner notifiers.
///
/// Uses borrowed references with a lifetime parameter so both owned and
/// borrowed notifiers can be composed without wrapper types.
pub struct CompositeNotifier<'a> {
    delegates: Vec<&'a dyn ProgressNotifier>,
}

impl<'a> CompositeNotifier<'a> {
    pub fn new(delegates: Vec<&'a dyn ProgressNotifier>) -> Self {
        Self { delegates }
    }
}

/// Macro to delegate a method call to all inner notifiers.
macro_rules! delegate {
    ($self:ident, $method:ident $(, $arg:expr)*) => {
        for d in &$self.delegates {
            d.$method($($arg),*);
        }
    };
}

impl ProgressNotifier for CompositeNotifier<'_> {
    fn on_fan_out_start(&self, providers: &[ProviderId]) {
        delegate!(self, on_fan_out_start, providers);
    }

    fn on_adapter_settled(&self, event: &AdapterEvent) {
        delegate!(self, on_adapter_settled, event);
    }

    fn on_fan_out_complete(&self, succeeded: usize, queried: usize, elapsed_ms: u64) {
        delegate!(self, on_fan_out_complete, succeeded, queried, elapsed_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::progress::AdapterOutcome;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingNotifier {
        start_count: AtomicUsize,
        settled_count: AtomicUsize,
        complete_count: AtomicUsize,
    }

    impl ProgressNotifier for CountingNotifier {
        fn on_fan_out_start(&self, _providers: &[ProviderId]) {
            self.start_count.fetch_add(1, Ordering::Relaxed);
        }
        fn on_adapter_settled(&self, _event: &AdapterEvent) {
            self.settled_count.fetch_add(1, Ordering::Relaxed);
        }
        fn on_fan_out_complete(&self, _succeeded: usize, _queried: usize, _elapsed_ms: u64) {
            self.complete_count.fetch_add(1, Ordering::Relaxed);
        }
    }

    #[test]
    fn test_composite_delegates_to_all_notifiers() {
        let n1 = CountingNotifier::default();
        let n2 = CountingNotifier::default();

        let composite = CompositeNotifier::new(vec![&n1, &n2]);

        composite.on_fan_out_start(&[ProviderId::OpenAi, ProviderId::Gemini]);
        composite.on_adapter_settled(&AdapterEvent {
            provider: ProviderId::OpenAi,
            outcome: AdapterOutcome::Ok,
            elapsed_ms: 12,
        });
        composite.on_adapter_settled(&AdapterEvent {
            provider: ProviderId::Gemini,
            outcome: AdapterOutcome::Ok,
            elapsed_ms: 30,
        });
        composite.on_fan_out_complete(2, 2, 31);

        for n in [&n1, &n2] {
            assert_eq!(n.start_count.load(Ordering::Relaxed), 1);
            assert_eq!(n.settled_count.load(Ordering::Relaxed), 2);
            assert_eq!(n.complete_count.load(Ordering::Relaxed), 1);
        }
    }

    #[test]
    fn test_empty_composite_is_a_no_op() {
        let composite = CompositeNotifier::new(vec![]);
        composite.on_fan_out_start(&[]);
        composite.on_fan_out_complete(0, 0, 0);
    }
}
