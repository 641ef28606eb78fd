//! Core types for insight cards

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::confidence::Confidence;

/// The catalog of insight kinds the engine can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    /// Mood x category outflow heatmap
    MoodSpendHeatmap,
    /// Share of known-time outflow between 22:00 and 02:00
    LateNightLeak,
    /// Mean outflow while in a negative, activated mood
    ImpulseRisk,
    /// Purchases under the small-purchase ceiling in the last 30 days
    SmallFrequentLeaks,
    /// Low-mood purchases flagged "not worth it"
    ReplacementWins,
    /// Mood tags with the largest attached outflow
    TopTriggerTags,
    /// Purchases flagged "worth it" and what they have in common
    WorthItAnchors,
    /// Fraction of transactions with no linked mood
    UnlinkedShare,
}

impl InsightKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MoodSpendHeatmap => "mood_spend_heatmap",
            Self::LateNightLeak => "late_night_leak",
            Self::ImpulseRisk => "impulse_risk",
            Self::SmallFrequentLeaks => "small_frequent_leaks",
            Self::ReplacementWins => "replacement_wins",
            Self::TopTriggerTags => "top_trigger_tags",
            Self::WorthItAnchors => "worth_it_anchors",
            Self::UnlinkedShare => "unlinked_share",
        }
    }
}

impl fmt::Display for InsightKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InsightKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mood_spend_heatmap" => Ok(Self::MoodSpendHeatmap),
            "late_night_leak" => Ok(Self::LateNightLeak),
            "impulse_risk" => Ok(Self::ImpulseRisk),
            "small_frequent_leaks" => Ok(Self::SmallFrequentLeaks),
            "replacement_wins" => Ok(Self::ReplacementWins),
            "top_trigger_tags" => Ok(Self::TopTriggerTags),
            "worth_it_anchors" => Ok(Self::WorthItAnchors),
            "unlinked_share" => Ok(Self::UnlinkedShare),
            _ => Err(format!("Unknown insight kind: {}", s)),
        }
    }
}

/// Visualization descriptor handed to the display layer. The engine
/// never renders; it only describes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "viz", rename_all = "snake_case")]
pub enum VizSpec {
    /// Grid of cells: rows x cols, `cells[row][col]`
    Heatmap {
        rows: Vec<String>,
        cols: Vec<String>,
        cells: Vec<Vec<f64>>,
    },
    /// Labeled bar series
    Bars { labels: Vec<String>, values: Vec<f64> },
    /// Unlabeled point series (e.g. daily totals)
    Sparkline { points: Vec<f64> },
    /// Share-of-whole breakdown
    Donut { labels: Vec<String>, values: Vec<f64> },
}

/// A finding's declaration that it lacks sufficient data, plus the user
/// action that would close the gap
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Gap {
    pub message: String,
    pub cta_label: String,
    /// Navigation target for the display layer
    pub cta_href: String,
}

impl Gap {
    pub fn new(
        message: impl Into<String>,
        cta_label: impl Into<String>,
        cta_href: impl Into<String>,
    ) -> Self {
        Self {
            message: message.into(),
            cta_label: cta_label.into(),
            cta_href: cta_href.into(),
        }
    }
}

/// One user-facing finding produced by a generator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightCard {
    pub kind: InsightKind,
    /// Short display title (e.g. "Late-Night Leak")
    pub title: String,
    /// Rendered insight sentence
    pub narrative: String,
    /// Generator-specific structured payload for detail/debug views
    pub data: serde_json::Value,
    pub viz: VizSpec,
    /// Suggested micro-action
    pub action: String,
    pub confidence: Confidence,
    /// Generator-defined priority, used only for ranking
    pub relevance: f64,
    /// Present when the generator decided its minimum data bar was
    /// not met
    pub gap: Option<Gap>,
}

impl InsightCard {
    pub fn new(
        kind: InsightKind,
        title: impl Into<String>,
        narrative: impl Into<String>,
        viz: VizSpec,
        action: impl Into<String>,
        confidence: Confidence,
        relevance: f64,
    ) -> Self {
        Self {
            kind,
            title: title.into(),
            narrative: narrative.into(),
            data: serde_json::Value::Null,
            viz,
            action: action.into(),
            confidence,
            relevance,
            gap: None,
        }
    }

    /// Attach a structured data payload
    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = data;
        self
    }

    /// Attach a data-gap call to action
    pub fn with_gap(mut self, gap: Gap) -> Self {
        self.gap = Some(gap);
        self
    }

    /// Ranking score: confidence weight x relevance
    pub fn rank_score(&self) -> f64 {
        self.confidence.tier.weight() * self.relevance
    }
}
