//! Late-night leak insight
//!
//! Reports the share of known-time outflow landing between 22:00 and
//! 02:00 local. Records with a defaulted time of day are excluded from
//! both sides of the ratio, and a high unknown-time share forces the
//! whole finding down to Low confidence regardless of the count gate.

use crate::confidence::confidence_from_count;
use crate::policy::{count_gate, LATE_NIGHT_END_HOUR, LATE_NIGHT_START_HOUR};

use super::engine::{Insight, InsightContext};
use super::types::{InsightCard, InsightKind, VizSpec};

/// Unknown-time share above which the finding is forced Low
const TIME_UNKNOWN_OVERRIDE: f64 = 0.35;

pub struct LateNightLeakInsight;

impl LateNightLeakInsight {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LateNightLeakInsight {
    fn default() -> Self {
        Self::new()
    }
}

fn is_late(hour: u32) -> bool {
    hour >= LATE_NIGHT_START_HOUR || hour <= LATE_NIGHT_END_HOUR
}

impl Insight for LateNightLeakInsight {
    fn kind(&self) -> InsightKind {
        InsightKind::LateNightLeak
    }

    fn name(&self) -> &'static str {
        "Late-Night Leak"
    }

    fn compute(&self, ctx: &InsightContext<'_>) -> InsightCard {
        let timed: Vec<_> = ctx
            .transactions
            .iter()
            .filter(|t| t.time_known && t.outflow > 0.0)
            .collect();

        let total_outflow: f64 = timed.iter().map(|t| t.outflow).sum();
        let late_outflow: f64 = timed
            .iter()
            .filter(|t| is_late(t.local_hour()))
            .map(|t| t.outflow)
            .sum();
        let pct = if total_outflow > 0.0 {
            late_outflow / total_outflow
        } else {
            0.0
        };

        let gate = count_gate(self.kind()).expect("late-night gate is in the policy table");
        let mut confidence =
            confidence_from_count(timed.len(), gate.min_med, gate.min_high, "timed transactions");
        if ctx.stats.time_unknown_pct > TIME_UNKNOWN_OVERRIDE {
            confidence = confidence.degrade("Too many transactions lack a time of day");
        }

        // Hourly outflow series for the display layer
        let mut hourly = vec![0.0f64; 24];
        for t in &timed {
            hourly[t.local_hour() as usize] += t.outflow;
        }

        let narrative = if timed.is_empty() {
            "No timed spending recorded yet, so the late-night share is unknown.".to_string()
        } else {
            format!(
                "{:.0}% of your timed spending (${:.0}) lands between 22:00 and 02:00.",
                pct * 100.0,
                late_outflow
            )
        };

        let data = serde_json::json!({
            "timed_count": timed.len(),
            "late_outflow": late_outflow,
            "total_outflow": total_outflow,
            "late_share": pct,
        });

        InsightCard::new(
            self.kind(),
            "Late-Night Leak",
            narrative,
            VizSpec::Bars {
                labels: (0..24).map(|h| format!("{:02}", h)).collect(),
                values: hourly,
            },
            "Park late-night purchases in a wishlist until morning",
            confidence,
            (0.3 + pct).min(1.0),
        )
        .with_data(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ConfidenceTier;
    use crate::test_utils::{txn_with, Dataset};

    #[test]
    fn test_band_membership() {
        assert!(is_late(22));
        assert!(is_late(23));
        assert!(is_late(0));
        assert!(is_late(2));
        assert!(!is_late(3));
        assert!(!is_late(21));
    }

    #[test]
    fn test_unknown_time_records_excluded() {
        let mut untimed = txn_with("t1", "2026-03-10T23:00:00-08:00", "Games", 50.0);
        untimed.time_known = false;
        let timed = txn_with("t2", "2026-03-10T12:00:00-08:00", "Dining", 50.0);

        let dataset = Dataset::new(vec![untimed, timed], vec![], vec![]);
        let card = LateNightLeakInsight::new().compute(&dataset.context("2026-03-15T12:00:00-08:00"));
        // The untimed late-night record contributes to neither side
        assert_eq!(card.data["late_share"], 0.0);
        assert_eq!(card.data["timed_count"], 1);
    }

    #[test]
    fn test_share_computation() {
        let dataset = Dataset::new(
            vec![
                txn_with("t1", "2026-03-10T23:30:00-08:00", "Delivery", 30.0),
                txn_with("t2", "2026-03-10T12:00:00-08:00", "Groceries", 70.0),
            ],
            vec![],
            vec![],
        );
        let card = LateNightLeakInsight::new().compute(&dataset.context("2026-03-15T12:00:00-08:00"));
        let share = card.data["late_share"].as_f64().unwrap();
        assert!((share - 0.3).abs() < 1e-9);
        assert!(card.narrative.contains("30%"));
    }

    #[test]
    fn test_time_unknown_override_forces_low() {
        // 60 timed late transactions would normally gate to High, but
        // half the dataset has no time of day.
        let mut transactions = vec![];
        for i in 0..60 {
            transactions.push(txn_with(
                &format!("t{}", i),
                "2026-03-10T23:00:00-08:00",
                "Delivery",
                10.0,
            ));
        }
        for i in 60..120 {
            let mut t = txn_with(&format!("t{}", i), "2026-03-10T00:00:00-08:00", "Misc", 5.0);
            t.time_known = false;
            transactions.push(t);
        }
        let dataset = Dataset::new(transactions, vec![], vec![]);
        let card = LateNightLeakInsight::new().compute(&dataset.context("2026-03-15T12:00:00-08:00"));
        assert_eq!(card.confidence.tier, ConfidenceTier::Low);
        assert!(card
            .confidence
            .reasons
            .iter()
            .any(|r| r.contains("time of day")));
    }

    #[test]
    fn test_empty_dataset_placeholder() {
        let dataset = Dataset::new(vec![], vec![], vec![]);
        let card = LateNightLeakInsight::new().compute(&dataset.context("2026-03-15T12:00:00-08:00"));
        assert_eq!(card.confidence.tier, ConfidenceTier::Low);
        assert!(card.narrative.contains("No timed spending"));
    }
}
