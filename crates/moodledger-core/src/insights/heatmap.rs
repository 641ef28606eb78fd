//! Mood x spend heatmap insight
//!
//! Buckets linked-with-mood outflow into the user's 5 highest-outflow
//! categories crossed with the mood labels actually present. Without
//! both linked records and moods it returns a fixed placeholder rather
//! than an empty grid.

use std::collections::HashMap;

use crate::confidence::Confidence;
use crate::models::ConfidenceTier;

use super::engine::{Insight, InsightContext};
use super::types::{Gap, InsightCard, InsightKind, VizSpec};

const MAX_CATEGORIES: usize = 5;

pub struct MoodSpendHeatmapInsight;

impl MoodSpendHeatmapInsight {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MoodSpendHeatmapInsight {
    fn default() -> Self {
        Self::new()
    }
}

impl Insight for MoodSpendHeatmapInsight {
    fn kind(&self) -> InsightKind {
        InsightKind::MoodSpendHeatmap
    }

    fn name(&self) -> &'static str {
        "Mood x Spend Heatmap"
    }

    fn compute(&self, ctx: &InsightContext<'_>) -> InsightCard {
        let with_mood: Vec<_> = ctx.linked.iter().filter(|r| r.has_mood()).collect();

        if with_mood.is_empty() || ctx.moods.is_empty() {
            return InsightCard::new(
                self.kind(),
                "Mood x Spend",
                "Not enough linked data to map moods against spending yet.",
                VizSpec::Heatmap {
                    rows: vec![],
                    cols: vec![],
                    cells: vec![],
                },
                "Check in with a mood around your next few purchases",
                Confidence::new(ConfidenceTier::Low)
                    .with_reason("Link moods to purchases to unlock this view"),
                0.2,
            )
            .with_gap(Gap::new(
                "No purchases have a linked mood yet",
                "Check in now",
                "/checkin",
            ));
        }

        // Top categories by total outflow among linked records
        let mut category_totals: HashMap<&str, f64> = HashMap::new();
        for record in &with_mood {
            *category_totals
                .entry(record.record.category.as_str())
                .or_insert(0.0) += record.record.outflow;
        }
        let mut categories: Vec<(&str, f64)> = category_totals.into_iter().collect();
        categories.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.cmp(b.0))
        });
        categories.truncate(MAX_CATEGORIES);
        let cols: Vec<String> = categories.iter().map(|(c, _)| c.to_string()).collect();

        // Distinct mood labels present, in stable (alphabetical) order
        let mut rows: Vec<String> = with_mood
            .iter()
            .filter_map(|r| r.mood.as_ref())
            .map(|m| m.snapshot.label.as_str().to_string())
            .collect();
        rows.sort_unstable();
        rows.dedup();

        let mut cells = vec![vec![0.0; cols.len()]; rows.len()];
        for record in &with_mood {
            let Some(mood) = record.mood.as_ref() else {
                continue;
            };
            let Some(row) = rows.iter().position(|l| l == mood.snapshot.label.as_str()) else {
                continue;
            };
            let Some(col) = cols.iter().position(|c| c == &record.record.category) else {
                continue;
            };
            cells[row][col] += record.record.outflow;
        }

        // Peak cell drives the narrative
        let mut peak = (0usize, 0usize, 0.0f64);
        for (r, row) in cells.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                if *value > peak.2 {
                    peak = (r, c, *value);
                }
            }
        }
        let narrative = format!(
            "Your biggest mood/spend pairing is {} while {}: ${:.0} across {} linked purchases.",
            cols[peak.1],
            rows[peak.0],
            peak.2,
            with_mood.len()
        );

        let data = serde_json::json!({
            "linked_count": with_mood.len(),
            "peak_category": cols[peak.1],
            "peak_mood": rows[peak.0],
            "peak_outflow": peak.2,
        });

        InsightCard::new(
            self.kind(),
            "Mood x Spend",
            narrative,
            VizSpec::Heatmap { rows, cols, cells },
            "Glance at the hottest cell before your next discretionary purchase",
            ctx.dataset_confidence.clone(),
            0.6,
        )
        .with_data(data)
    }
}
