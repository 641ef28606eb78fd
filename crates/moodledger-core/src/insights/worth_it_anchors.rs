//! Worth-it anchors insight
//!
//! The positive mirror of replacement wins: purchases the user affirmed
//! in retrospect. Anchor categories are spending worth protecting when
//! trimming a budget.

use std::collections::HashMap;

use crate::confidence::confidence_from_count;
use crate::policy::count_gate;

use super::engine::{Insight, InsightContext};
use super::types::{Gap, InsightCard, InsightKind, VizSpec};

pub struct WorthItAnchorsInsight;

impl WorthItAnchorsInsight {
    pub fn new() -> Self {
        Self
    }
}

impl Default for WorthItAnchorsInsight {
    fn default() -> Self {
        Self::new()
    }
}

impl Insight for WorthItAnchorsInsight {
    fn kind(&self) -> InsightKind {
        InsightKind::WorthItAnchors
    }

    fn name(&self) -> &'static str {
        "Worth-It Anchors"
    }

    fn compute(&self, ctx: &InsightContext<'_>) -> InsightCard {
        let affirmed: Vec<_> = ctx
            .transactions
            .iter()
            .filter(|t| t.felt_worth_it == Some(true))
            .collect();

        let total: f64 = affirmed.iter().map(|t| t.outflow).sum();

        let mut by_category: HashMap<&str, (f64, usize)> = HashMap::new();
        for t in &affirmed {
            let slot = by_category.entry(t.category.as_str()).or_insert((0.0, 0));
            slot.0 += t.outflow;
            slot.1 += 1;
        }
        let mut series: Vec<(&str, f64)> = by_category
            .iter()
            .map(|(c, (sum, _))| (*c, *sum))
            .collect();
        series.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.cmp(b.0))
        });

        let gate = count_gate(self.kind()).expect("worth-it gate is in the policy table");
        let confidence = confidence_from_count(
            affirmed.len(),
            gate.min_med,
            gate.min_high,
            "worth-it purchases",
        );

        let narrative = match series.first() {
            Some((category, outflow)) => format!(
                "{} purchases felt worth it (${:.0} total); {} leads at ${:.0}.",
                affirmed.len(),
                total,
                category,
                outflow
            ),
            None => "No purchases marked worth it yet.".to_string(),
        };

        let data = serde_json::json!({
            "count": affirmed.len(),
            "total": total,
        });

        let mut card = InsightCard::new(
            self.kind(),
            "Worth-It Anchors",
            narrative,
            VizSpec::Bars {
                labels: series.iter().map(|(c, _)| c.to_string()).collect(),
                values: series.iter().map(|(_, v)| *v).collect(),
            },
            "Protect your anchor categories when trimming the budget",
            confidence,
            if affirmed.is_empty() { 0.25 } else { 0.6 },
        )
        .with_data(data);

        if affirmed.len() < gate.min_med {
            card = card.with_gap(Gap::new(
                format!("Only {} purchases carry a worth-it verdict", affirmed.len()),
                "Mark purchases that felt worth it",
                "/history/worth-it",
            ));
        }

        card
    }
}
