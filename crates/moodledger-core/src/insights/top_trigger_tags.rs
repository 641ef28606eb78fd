//! Top trigger tags insight
//!
//! Sums outflow per free-form mood tag across linked records. Trust in
//! the ranking comes from how many purchases carry a user-asserted
//! (DIRECT) mood, not from raw volume, so this insight is judged by the
//! direct-tag confidence model.

use std::collections::HashMap;

use crate::confidence::direct_confidence;
use crate::policy::DIRECT_MED_COUNT;

use super::engine::{Insight, InsightContext};
use super::types::{Gap, InsightCard, InsightKind, VizSpec};

const MAX_TAGS: usize = 5;

pub struct TopTriggerTagsInsight;

impl TopTriggerTagsInsight {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TopTriggerTagsInsight {
    fn default() -> Self {
        Self::new()
    }
}

impl Insight for TopTriggerTagsInsight {
    fn kind(&self) -> InsightKind {
        InsightKind::TopTriggerTags
    }

    fn name(&self) -> &'static str {
        "Top Trigger Tags"
    }

    fn compute(&self, ctx: &InsightContext<'_>) -> InsightCard {
        let mut by_tag: HashMap<String, f64> = HashMap::new();
        for record in ctx.linked {
            let Some(mood) = record.mood.as_ref() else {
                continue;
            };
            for tag in &mood.snapshot.tags {
                if tag.is_empty() {
                    continue;
                }
                *by_tag.entry(tag.to_lowercase()).or_insert(0.0) += record.record.outflow;
            }
        }

        let mut ranked: Vec<(String, f64)> = by_tag.into_iter().collect();
        ranked.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        ranked.truncate(MAX_TAGS);

        let confidence = direct_confidence(ctx.stats.direct_count);

        let narrative = match ranked.first() {
            Some((tag, outflow)) => format!(
                "'{}' is your top spending trigger tag, next to ${:.0} of purchases.",
                tag, outflow
            ),
            None => "No mood tags sit next to your spending yet.".to_string(),
        };

        let data = serde_json::json!({
            "tag_count": ranked.len(),
            "direct_count": ctx.stats.direct_count,
        });

        let mut card = InsightCard::new(
            self.kind(),
            "Top Trigger Tags",
            narrative,
            VizSpec::Donut {
                labels: ranked.iter().map(|(t, _)| t.clone()).collect(),
                values: ranked.iter().map(|(_, v)| *v).collect(),
            },
            "Note the situation, not just the mood, at your next check-in",
            confidence,
            if ranked.is_empty() { 0.25 } else { 0.5 },
        )
        .with_data(data);

        if ctx.stats.direct_count < DIRECT_MED_COUNT {
            card = card.with_gap(Gap::new(
                format!(
                    "Only {} purchases carry a mood you chose yourself",
                    ctx.stats.direct_count
                ),
                "Tag a purchase with how you felt",
                "/annotate",
            ));
        }

        card
    }
}
