// SPDX-FileCopyrightText: 2026 Crewplan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Running cost against a budget ceiling.
//!
//! The tracker keeps the cost of the assignments made so far in one
//! allocation. `check` reports `CrewplanError::BudgetExceeded` when one more
//! assignment would push the total over the ceiling. Callers decide whether
//! that is fatal; the balanced strategy treats it as a soft signal and picks
//! the cheapest candidate instead.

use crewplan_core::CrewplanError;
use tracing::debug;

/// Share of the ceiling after which `check` logs that the budget is nearly used.
const NEAR_CEILING: f64 = 0.8;

/// Running cost of one allocation.
#[derive(Debug, Clone)]
pub struct BudgetTracker {
    ceiling: f64,
    spent: f64,
}

impl BudgetTracker {
    /// A tracker with nothing spent.
    pub fn new(ceiling: f64) -> Self {
        Self {
            ceiling,
            spent: 0.0,
        }
    }

    /// Whether spending `cost` more stays within the ceiling.
    pub fn check(&self, cost: f64) -> Result<(), CrewplanError> {
        let projected = self.spent + cost;
        if projected > self.ceiling {
            return Err(CrewplanError::BudgetExceeded {
                ceiling: self.ceiling,
                projected,
            });
        }
        if projected >= self.ceiling * NEAR_CEILING {
            debug!(
                projected,
                ceiling = self.ceiling,
                "approaching budget ceiling (80%+)"
            );
        }
        Ok(())
    }

    pub fn fits(&self, cost: f64) -> bool {
        self.spent + cost <= self.ceiling
    }

    pub fn record(&mut self, cost: f64) {
        self.spent += cost;
    }

    pub fn spent(&self) -> f64 {
        self.spent
    }

    pub fn ceiling(&self) -> f64 {
        self.ceiling
    }

    /// Spent share of the ceiling, `0.0` for a zero ceiling.
    pub fn utilization(&self) -> f64 {
        if self.ceiling > 0.0 {
            self.spent / self.ceiling
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_ok_when_under_ceiling() {
        let mut tracker = BudgetTracker::new(10.0);
        tracker.record(5.0);
        assert!(tracker.check(5.0).is_ok());
        assert!(tracker.fits(5.0));
    }

    #[test]
    fn check_fails_past_ceiling() {
        let mut tracker = BudgetTracker::new(10.0);
        tracker.record(8.0);
        let err = tracker.check(3.0).unwrap_err();
        match err {
            CrewplanError::BudgetExceeded { ceiling, projected } => {
                assert_eq!(ceiling, 10.0);
                assert_eq!(projected, 11.0);
            }
            other => panic!("expected BudgetExceeded, got {other:?}"),
        }
        assert!(!tracker.fits(3.0));
    }

    #[test]
    fn record_accumulates() {
        let mut tracker = BudgetTracker::new(100.0);
        tracker.record(5.0);
        tracker.record(3.0);
        assert!((tracker.spent() - 8.0).abs() < f64::EPSILON);
        assert!((tracker.utilization() - 0.08).abs() < 1e-12);
    }

    #[test]
    fn zero_ceiling_reports_zero_utilization() {
        let tracker = BudgetTracker::new(0.0);
        assert_eq!(tracker.utilization(), 0.0);
        assert!(tracker.check(0.0).is_ok());
    }

    #[test]
    #[tracing_test::traced_test]
    fn near_ceiling_is_logged() {
        let mut tracker = BudgetTracker::new(10.0);
        tracker.record(8.0);
        assert!(tracker.check(0.5).is_ok());
        assert!(logs_contain("approaching budget ceiling"));
    }
}
