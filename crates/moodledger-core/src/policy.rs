//! Policy tables
//!
//! Window constants and per-insight count gates are policy data, not
//! behavior: they live here as auditable lookup tables so they can be
//! reviewed and tested independently of the linker and generator logic
//! that consumes them.

use chrono::Duration;

use crate::insights::InsightKind;

/// Time window for inferred mood-to-transaction matching.
///
/// A candidate mood satisfies `-after_max <= (txn - mood) <= before_max`:
/// a mood up to 2 hours after the transaction, or up to 6 hours before
/// it, may explain it.
#[derive(Debug, Clone)]
pub struct LinkWindow {
    /// How long before the transaction a mood may occur
    pub before_max: Duration,
    /// How long after the transaction a mood may occur
    pub after_max: Duration,
}

impl Default for LinkWindow {
    fn default() -> Self {
        Self {
            before_max: Duration::hours(6),
            after_max: Duration::hours(2),
        }
    }
}

/// Late-night band: local hour >= 22 or <= 2
pub const LATE_NIGHT_START_HOUR: u32 = 22;
pub const LATE_NIGHT_END_HOUR: u32 = 2;

/// Ceiling for a purchase to count as a "small leak"
pub const SMALL_PURCHASE_CEILING: f64 = 15.0;

/// Lookback window for the small-frequent-leaks insight
pub const SMALL_LEAK_WINDOW_DAYS: i64 = 30;

/// Direct-tagging confidence thresholds
pub const DIRECT_MED_COUNT: usize = 10;
pub const DIRECT_HIGH_COUNT: usize = 20;

/// Minimum counts for Med and High per-insight confidence
#[derive(Debug, Clone, Copy)]
pub struct CountGate {
    pub min_med: usize,
    pub min_high: usize,
}

/// The per-insight `(min_med, min_high)` pair, where the insight's
/// confidence is count-gated. Pairs are declared per index
/// specification, not generalized; kinds judged by the global dataset
/// model (heatmap, unlinked share) or by direct-tag counts (trigger
/// tags) have no gate.
pub fn count_gate(kind: InsightKind) -> Option<CountGate> {
    match kind {
        InsightKind::LateNightLeak => Some(CountGate {
            min_med: 30,
            min_high: 60,
        }),
        InsightKind::ImpulseRisk => Some(CountGate {
            min_med: 15,
            min_high: 40,
        }),
        InsightKind::SmallFrequentLeaks => Some(CountGate {
            min_med: 12,
            min_high: 30,
        }),
        InsightKind::ReplacementWins => Some(CountGate {
            min_med: 8,
            min_high: 20,
        }),
        InsightKind::WorthItAnchors => Some(CountGate {
            min_med: 10,
            min_high: 20,
        }),
        InsightKind::MoodSpendHeatmap
        | InsightKind::TopTriggerTags
        | InsightKind::UnlinkedShare => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_window() {
        let window = LinkWindow::default();
        assert_eq!(window.before_max, Duration::hours(6));
        assert_eq!(window.after_max, Duration::hours(2));
    }

    #[test]
    fn test_gates_are_consistent() {
        for kind in [
            InsightKind::LateNightLeak,
            InsightKind::ImpulseRisk,
            InsightKind::SmallFrequentLeaks,
            InsightKind::ReplacementWins,
            InsightKind::WorthItAnchors,
        ] {
            let gate = count_gate(kind).unwrap();
            assert!(gate.min_med < gate.min_high, "{}", kind);
        }
        assert!(count_gate(InsightKind::MoodSpendHeatmap).is_none());
        assert!(count_gate(InsightKind::TopTriggerTags).is_none());
    }

    #[test]
    fn test_specified_gates() {
        let small = count_gate(InsightKind::SmallFrequentLeaks).unwrap();
        assert_eq!((small.min_med, small.min_high), (12, 30));
        let worth = count_gate(InsightKind::WorthItAnchors).unwrap();
        assert_eq!((worth.min_med, worth.min_high), (10, 20));
        let late = count_gate(InsightKind::LateNightLeak).unwrap();
        assert_eq!((late.min_med, late.min_high), (30, 60));
    }
}
