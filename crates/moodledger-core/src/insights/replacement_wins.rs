//! Replacement wins insight
//!
//! Surfaces purchases the user flagged "not worth it" while in a
//! negative mood. Those are the cheapest wins: spending that neither
//! felt good at the time nor in retrospect.

use std::collections::HashMap;

use crate::confidence::confidence_from_count;
use crate::policy::count_gate;

use super::engine::{Insight, InsightContext};
use super::types::{Gap, InsightCard, InsightKind, VizSpec};

pub struct ReplacementWinsInsight;

impl ReplacementWinsInsight {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ReplacementWinsInsight {
    fn default() -> Self {
        Self::new()
    }
}

impl Insight for ReplacementWinsInsight {
    fn kind(&self) -> InsightKind {
        InsightKind::ReplacementWins
    }

    fn name(&self) -> &'static str {
        "Replacement Wins"
    }

    fn compute(&self, ctx: &InsightContext<'_>) -> InsightCard {
        let regretted: Vec<_> = ctx
            .linked
            .iter()
            .filter(|r| {
                r.record.felt_worth_it == Some(false)
                    && r.mood.as_ref().is_some_and(|m| m.snapshot.valence < 0.0)
            })
            .collect();

        let total: f64 = regretted.iter().map(|r| r.record.outflow).sum();

        let mut by_category: HashMap<&str, f64> = HashMap::new();
        for r in &regretted {
            *by_category.entry(r.record.category.as_str()).or_insert(0.0) += r.record.outflow;
        }
        let mut series: Vec<(&str, f64)> = by_category.into_iter().collect();
        series.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.cmp(b.0))
        });

        let gate = count_gate(self.kind()).expect("replacement gate is in the policy table");
        let confidence = confidence_from_count(
            regretted.len(),
            gate.min_med,
            gate.min_high,
            "flagged purchases",
        );

        let narrative = if regretted.is_empty() {
            "No low-mood purchases flagged as not worth it yet.".to_string()
        } else {
            format!(
                "You flagged {} low-mood purchases as not worth it, totaling ${:.0}. \
                 Swapping the top category alone frees ${:.0}.",
                regretted.len(),
                total,
                series.first().map(|(_, v)| *v).unwrap_or(0.0)
            )
        };

        let data = serde_json::json!({
            "count": regretted.len(),
            "total": total,
        });

        let mut card = InsightCard::new(
            self.kind(),
            "Replacement Wins",
            narrative,
            VizSpec::Bars {
                labels: series.iter().map(|(c, _)| c.to_string()).collect(),
                values: series.iter().map(|(_, v)| *v).collect(),
            },
            "Plan a cheaper stand-in for your most-regretted category",
            confidence,
            if regretted.is_empty() { 0.3 } else { 0.7 },
        )
        .with_data(data);

        if regretted.len() < gate.min_med {
            card = card.with_gap(Gap::new(
                format!(
                    "Only {} purchases carry a worth-it verdict and a mood",
                    regretted.len()
                ),
                "Review recent purchases",
                "/history/worth-it",
            ));
        }

        card
    }
}
