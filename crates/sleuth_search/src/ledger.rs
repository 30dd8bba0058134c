//! Per-area record of resolved search attempts.
//!
//! The ledger outlives scenes and is only used to compute diminishing
//! returns. Counts only go up; [`SearchLedger::reset`] is the single way
//! down and exists for tests and debug tooling.

use std::collections::HashMap;

use crate::area::AreaId;

/// Count of resolved attempts per area.
#[derive(Clone, Debug, Default)]
pub struct SearchLedger {
    counts: HashMap<AreaId, u32>,
}

impl SearchLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of resolved attempts recorded for an area.
    #[inline]
    #[must_use]
    pub fn count(&self, area: AreaId) -> u32 {
        self.counts.get(&area).copied().unwrap_or(0)
    }

    /// Records one resolved attempt and returns the new count.
    pub fn record(&mut self, area: AreaId) -> u32 {
        let count = self.counts.entry(area).or_insert(0);
        *count = count.saturating_add(1);
        *count
    }

    /// Total attempts across all areas.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts.values().map(|&c| u64::from(c)).sum()
    }

    /// Number of distinct areas searched so far.
    #[must_use]
    pub fn areas_searched(&self) -> usize {
        self.counts.len()
    }

    /// Forgets every recorded attempt.
    pub fn reset(&mut self) {
        self.counts.clear();
        tracing::debug!("search ledger reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_area_counts_zero() {
        let ledger = SearchLedger::new();
        assert_eq!(ledger.count(42), 0);
        assert_eq!(ledger.total(), 0);
    }

    #[test]
    fn test_record_is_per_area() {
        let mut ledger = SearchLedger::new();
        assert_eq!(ledger.record(1), 1);
        assert_eq!(ledger.record(1), 2);
        assert_eq!(ledger.record(2), 1);
        assert_eq!(ledger.count(1), 2);
        assert_eq!(ledger.count(2), 1);
        assert_eq!(ledger.total(), 3);
        assert_eq!(ledger.areas_searched(), 2);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut ledger = SearchLedger::new();
        ledger.record(7);
        ledger.reset();
        assert_eq!(ledger.count(7), 0);
        assert_eq!(ledger.areas_searched(), 0);
    }
}
