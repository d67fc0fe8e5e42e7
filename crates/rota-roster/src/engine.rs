use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::error::Result;
use crate::pattern::{cycle_label, CYCLE_LEN};
use crate::store::ShiftStore;
use crate::types::{GenerationReport, ShiftRecord};

/// Staged rows are flushed once this many accumulate; whatever remains is
/// flushed at the end of the walk.
const BATCH_SIZE: usize = 100;

/// Fills a date range with pattern assignments, one day at a time.
#[derive(Clone)]
pub struct RosterEngine {
    store: Arc<ShiftStore>,
}

impl RosterEngine {
    pub fn new(store: Arc<ShiftStore>) -> Self {
        Self { store }
    }

    /// Fill `[start, end]` inclusive. A `start` after `end` fills nothing.
    pub fn generate(&self, start: NaiveDate, end: NaiveDate) -> Result<GenerationReport> {
        let never = AtomicBool::new(false);
        self.generate_with_cancel(start, end, &never)
    }

    /// Range fill with a cancellation flag checked between dates.
    ///
    /// The cycle position is the calendar-day offset from `start`, not the
    /// count of rows created: a date that already has a record consumes a
    /// cycle slot without producing a row. Reruns therefore land the same
    /// label on the same date no matter which records already exist.
    ///
    /// Cancellation is best-effort; batches flushed before the flag was seen
    /// stay durable.
    pub fn generate_with_cancel(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        cancel: &AtomicBool,
    ) -> Result<GenerationReport> {
        let mut cursor = 0usize;
        let mut staged: Vec<ShiftRecord> = Vec::new();
        let mut generated = 0u64;
        let mut current = start;

        while current <= end {
            if cancel.load(Ordering::Relaxed) {
                warn!(date = %current, "range fill cancelled");
                break;
            }

            if self.store.get(current)?.is_none() {
                staged.push(ShiftRecord::new(current, cycle_label(cursor)));
            }
            cursor = (cursor + 1) % CYCLE_LEN;

            if staged.len() == BATCH_SIZE {
                generated += self.store.insert_missing(&staged)?;
                staged.clear();
            }

            current = match current.succ_opt() {
                Some(next) => next,
                // end of representable time
                None => break,
            };
        }

        generated += self.store.insert_missing(&staged)?;

        info!(start = %start, end = %end, generated, "range fill complete");
        Ok(GenerationReport {
            start_date: start,
            end_date: end,
            generated,
        })
    }
}
