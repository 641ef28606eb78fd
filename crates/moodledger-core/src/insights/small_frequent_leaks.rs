//! Small frequent leaks insight
//!
//! Adds up sub-$15 outflows over the trailing 30 days. Under the count
//! gate it emits a data-gap prompt to import more history instead of a
//! shaky total.

use chrono::Duration;

use crate::confidence::confidence_from_count;
use crate::policy::{count_gate, SMALL_LEAK_WINDOW_DAYS, SMALL_PURCHASE_CEILING};

use super::engine::{Insight, InsightContext};
use super::types::{Gap, InsightCard, InsightKind, VizSpec};

pub struct SmallFrequentLeaksInsight;

impl SmallFrequentLeaksInsight {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SmallFrequentLeaksInsight {
    fn default() -> Self {
        Self::new()
    }
}

impl Insight for SmallFrequentLeaksInsight {
    fn kind(&self) -> InsightKind {
        InsightKind::SmallFrequentLeaks
    }

    fn name(&self) -> &'static str {
        "Small Frequent Leaks"
    }

    fn compute(&self, ctx: &InsightContext<'_>) -> InsightCard {
        let window_start = ctx.now - Duration::days(SMALL_LEAK_WINDOW_DAYS);
        let small: Vec<_> = ctx
            .transactions
            .iter()
            .filter(|t| {
                t.outflow > 0.0
                    && t.outflow <= SMALL_PURCHASE_CEILING
                    && t.occurred_at > window_start
                    && t.occurred_at <= ctx.now
            })
            .collect();

        let total: f64 = small.iter().map(|t| t.outflow).sum();

        // Daily totals, oldest day first
        let mut daily = vec![0.0f64; SMALL_LEAK_WINDOW_DAYS as usize];
        for t in &small {
            let days_ago = (ctx.now - t.occurred_at).num_days();
            let index = SMALL_LEAK_WINDOW_DAYS - 1 - days_ago;
            if (0..SMALL_LEAK_WINDOW_DAYS).contains(&index) {
                daily[index as usize] += t.outflow;
            }
        }

        let gate = count_gate(self.kind()).expect("small-leaks gate is in the policy table");
        let confidence =
            confidence_from_count(small.len(), gate.min_med, gate.min_high, "small purchases");

        let narrative = if small.is_empty() {
            format!(
                "No purchases under ${:.0} in the last {} days.",
                SMALL_PURCHASE_CEILING, SMALL_LEAK_WINDOW_DAYS
            )
        } else {
            format!(
                "{} purchases under ${:.0} in the last {} days add up to ${:.0}.",
                small.len(),
                SMALL_PURCHASE_CEILING,
                SMALL_LEAK_WINDOW_DAYS,
                total
            )
        };

        let data = serde_json::json!({
            "count": small.len(),
            "total": total,
            "ceiling": SMALL_PURCHASE_CEILING,
            "window_days": SMALL_LEAK_WINDOW_DAYS,
        });

        let mut card = InsightCard::new(
            self.kind(),
            "Small Frequent Leaks",
            narrative,
            VizSpec::Sparkline { points: daily },
            "Pick one recurring small purchase to drop this week",
            confidence,
            if small.is_empty() {
                0.2
            } else {
                (total / 150.0).clamp(0.3, 0.9)
            },
        )
        .with_data(data);

        if small.len() < gate.min_med {
            card = card.with_gap(Gap::new(
                format!(
                    "Only {} small purchases on record for the last {} days",
                    small.len(),
                    SMALL_LEAK_WINDOW_DAYS
                ),
                "Import more history",
                "/import",
            ));
        }

        card
    }
}
