//! Progress reporting.

use kcport_types::ProcessedItem;

/// Receives one record per created or published entity.
///
/// Records arrive in completion order; within a stage that order is not
/// deterministic.
pub trait ProgressReporter: Send + Sync {
    fn process_item(&self, item: &ProcessedItem);
}

impl<F> ProgressReporter for F
where
    F: Fn(&ProcessedItem) + Send + Sync,
{
    fn process_item(&self, item: &ProcessedItem) {
        self(item)
    }
}

/// Discards progress records.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopProgress;

impl ProgressReporter for NoopProgress {
    fn process_item(&self, _item: &ProcessedItem) {}
}
