//! Assertion helpers for `TestCity` integration tests.

use crate::production::BlockReason;
use crate::walkers::WalkerKind;
use crate::warehouse::ResourceKind;

use super::TestCity;

impl TestCity {
    // -----------------------------------------------------------------------
    // Assertions
    // -----------------------------------------------------------------------

    pub fn assert_walker_count(&mut self, kind: WalkerKind, expected: usize) {
        let count = self.walker_count(kind);
        assert_eq!(count, expected, "Expected {expected} {kind:?} walkers, got {count}");
    }

    pub fn assert_house_level(&self, x: usize, y: usize, expected: u8) {
        let level = self.house_level(x, y);
        assert_eq!(
            level, expected,
            "Expected house at ({x}, {y}) at level {expected}, got {level}"
        );
    }

    pub fn assert_stock_at_least(&self, x: usize, y: usize, resource: ResourceKind, min: u32) {
        let have = self.stock_at(x, y, resource);
        assert!(
            have >= min,
            "Expected at least {min} {resource:?} at ({x}, {y}), got {have}"
        );
    }

    /// Assert the building at (x, y) reports `reason` on some stream.
    pub fn assert_blocked_by(&self, x: usize, y: usize, reason: BlockReason) {
        let reasons = self
            .report(x, y)
            .map(|r| r.block_reasons())
            .unwrap_or_default();
        assert!(
            reasons.contains(&reason),
            "Expected ({x}, {y}) blocked by {reason:?}, got {reasons:?}"
        );
    }

    pub fn assert_no_invariant_violations(&self) {
        let v = self.violations();
        assert_eq!(v.warehouse_over_capacity, 0, "warehouse over capacity");
        assert_eq!(v.house_level, 0, "house level out of range");
        assert_eq!(v.production_progress, 0, "production progress out of range");
    }
}
