//! Confidence model
//!
//! Two independent computations coexist: a global judgment over the whole
//! dataset (sample size, missingness, time-unknown share) and a simple
//! per-insight count gate. Both produce a [`Confidence`]: a tier plus
//! human-readable reasons explaining what would raise it.

use serde::{Deserialize, Serialize};

use crate::models::ConfidenceTier;
use crate::policy::{DIRECT_HIGH_COUNT, DIRECT_MED_COUNT};

/// A trust judgment: coarse tier plus reasons. Produced fresh on every
/// computation; never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Confidence {
    pub tier: ConfidenceTier,
    /// What would raise the tier, in user-readable terms
    #[serde(default)]
    pub reasons: Vec<String>,
}

impl Confidence {
    pub fn new(tier: ConfidenceTier) -> Self {
        Self {
            tier,
            reasons: Vec::new(),
        }
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reasons.push(reason.into());
        self
    }

    /// Force the tier down to Low, keeping existing reasons and adding one
    pub fn degrade(mut self, reason: impl Into<String>) -> Self {
        self.tier = ConfidenceTier::Low;
        self.reasons.push(reason.into());
        self
    }
}

/// Global dataset confidence.
///
/// Reason emission uses its own gates (sample < 20, missingness > 0.25,
/// time-unknown > 0.35) which overlap but do not equal the tier gates;
/// a reason may appear on any tier.
pub fn dataset_confidence(sample_size: usize, missingness: f64, time_unknown_pct: f64) -> Confidence {
    let tier = if sample_size >= 50 && missingness <= 0.15 && time_unknown_pct <= 0.20 {
        ConfidenceTier::High
    } else if sample_size < 20 || missingness > 0.35 || time_unknown_pct > 0.45 {
        ConfidenceTier::Low
    } else {
        ConfidenceTier::Med
    };

    let mut confidence = Confidence::new(tier);
    if sample_size < 20 {
        confidence = confidence.with_reason("Small sample size");
    }
    if missingness > 0.25 {
        confidence = confidence.with_reason("Many transactions lack a linked mood");
    }
    if time_unknown_pct > 0.35 {
        confidence = confidence.with_reason("Many transactions have no time of day");
    }
    confidence
}

/// Per-insight count confidence. Each insight kind supplies its own
/// `(min_med, min_high)` pair from the policy table.
pub fn confidence_from_count(
    count: usize,
    min_med: usize,
    min_high: usize,
    label: &str,
) -> Confidence {
    if count < min_med {
        Confidence::new(ConfidenceTier::Low).with_reason(format!(
            "Only {} {} so far; {} needed for a reliable estimate",
            count, label, min_med
        ))
    } else if count >= min_high {
        Confidence::new(ConfidenceTier::High)
    } else {
        Confidence::new(ConfidenceTier::Med)
    }
}

/// Confidence in estimates driven by directly-tagged purchases
pub fn direct_confidence(direct_count: usize) -> Confidence {
    if direct_count >= DIRECT_HIGH_COUNT {
        Confidence::new(ConfidenceTier::High)
    } else if direct_count >= DIRECT_MED_COUNT {
        Confidence::new(ConfidenceTier::Med).with_reason("tag 20 for high confidence")
    } else {
        Confidence::new(ConfidenceTier::Low)
            .with_reason("tag 10 purchases to estimate this reliably")
    }
}
