//! Unlinked share insight
//!
//! Reports how much of the dataset has no mood context at all,
//! independent of value thresholds. A coverage report on the link layer
//! itself: the higher the unlinked share, the more the other insights
//! are flying blind.

use crate::models::LinkSource;

use super::engine::{Insight, InsightContext};
use super::types::{Gap, InsightCard, InsightKind, VizSpec};

/// Unlinked share above which the check-in prompt is emitted
const GAP_THRESHOLD: f64 = 0.5;

pub struct UnlinkedShareInsight;

impl UnlinkedShareInsight {
    pub fn new() -> Self {
        Self
    }
}

impl Default for UnlinkedShareInsight {
    fn default() -> Self {
        Self::new()
    }
}

impl Insight for UnlinkedShareInsight {
    fn kind(&self) -> InsightKind {
        InsightKind::UnlinkedShare
    }

    fn name(&self) -> &'static str {
        "Unlinked Share"
    }

    fn compute(&self, ctx: &InsightContext<'_>) -> InsightCard {
        let total = ctx.linked.len();
        let direct = ctx
            .linked
            .iter()
            .filter(|r| {
                r.mood
                    .as_ref()
                    .is_some_and(|m| m.source == LinkSource::Direct)
            })
            .count();
        let inferred = ctx
            .linked
            .iter()
            .filter(|r| {
                r.mood
                    .as_ref()
                    .is_some_and(|m| m.source == LinkSource::Inferred)
            })
            .count();
        let unlinked = total - direct - inferred;
        let share = if total == 0 {
            0.0
        } else {
            unlinked as f64 / total as f64
        };

        let narrative = if total == 0 {
            "No transactions on record yet.".to_string()
        } else {
            format!(
                "{:.0}% of your transactions ({} of {}) have no mood attached.",
                share * 100.0,
                unlinked,
                total
            )
        };

        let data = serde_json::json!({
            "total": total,
            "direct": direct,
            "inferred": inferred,
            "unlinked": unlinked,
            "unlinked_share": share,
        });

        let mut card = InsightCard::new(
            self.kind(),
            "Unlinked Share",
            narrative,
            VizSpec::Donut {
                labels: vec!["direct".into(), "inferred".into(), "unlinked".into()],
                values: vec![direct as f64, inferred as f64, unlinked as f64],
            },
            "Check in within a couple hours of spending to improve coverage",
            ctx.dataset_confidence.clone(),
            0.2 + 0.6 * share,
        )
        .with_data(data);

        if total > 0 && share > GAP_THRESHOLD {
            card = card.with_gap(Gap::new(
                "Most of your spending has no mood context",
                "Check in after you buy",
                "/checkin",
            ));
        }

        card
    }
}
