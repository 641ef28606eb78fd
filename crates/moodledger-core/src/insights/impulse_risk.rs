//! Impulse risk insight
//!
//! Looks at purchases made while in a negative, activated mood
//! (valence < -0.3, arousal > 0.3) and reports the mean outflow of
//! that subset.

use std::collections::HashMap;

use crate::confidence::confidence_from_count;
use crate::policy::count_gate;

use super::engine::{Insight, InsightContext};
use super::types::{InsightCard, InsightKind, VizSpec};

const VALENCE_CUTOFF: f64 = -0.3;
const AROUSAL_CUTOFF: f64 = 0.3;

pub struct ImpulseRiskInsight;

impl ImpulseRiskInsight {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ImpulseRiskInsight {
    fn default() -> Self {
        Self::new()
    }
}

impl Insight for ImpulseRiskInsight {
    fn kind(&self) -> InsightKind {
        InsightKind::ImpulseRisk
    }

    fn name(&self) -> &'static str {
        "Impulse Risk"
    }

    fn compute(&self, ctx: &InsightContext<'_>) -> InsightCard {
        let risky: Vec<_> = ctx
            .linked
            .iter()
            .filter(|r| {
                r.mood.as_ref().is_some_and(|m| {
                    m.snapshot.valence < VALENCE_CUTOFF && m.snapshot.arousal > AROUSAL_CUTOFF
                })
            })
            .collect();

        let total: f64 = risky.iter().map(|r| r.record.outflow).sum();
        let mean = if risky.is_empty() {
            0.0
        } else {
            total / risky.len() as f64
        };

        let gate = count_gate(self.kind()).expect("impulse gate is in the policy table");
        let confidence =
            confidence_from_count(risky.len(), gate.min_med, gate.min_high, "tense-mood purchases");

        let mut by_category: HashMap<&str, f64> = HashMap::new();
        for r in &risky {
            *by_category.entry(r.record.category.as_str()).or_insert(0.0) += r.record.outflow;
        }
        let mut series: Vec<(&str, f64)> = by_category.into_iter().collect();
        series.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.cmp(b.0))
        });

        let narrative = if risky.is_empty() {
            "No purchases linked to tense, low moods yet.".to_string()
        } else {
            format!(
                "While tense or upset you average ${:.2} per purchase, across {} purchases \
                 (${:.0} total).",
                mean,
                risky.len(),
                total
            )
        };

        let data = serde_json::json!({
            "matched_count": risky.len(),
            "mean_outflow": mean,
            "total_outflow": total,
        });

        InsightCard::new(
            self.kind(),
            "Impulse Risk",
            narrative,
            VizSpec::Bars {
                labels: series.iter().map(|(c, _)| c.to_string()).collect(),
                values: series.iter().map(|(_, v)| *v).collect(),
            },
            "Add a 10-minute pause before buying when you feel keyed up",
            confidence,
            if risky.is_empty() { 0.3 } else { 0.75 },
        )
        .with_data(data)
    }
}
