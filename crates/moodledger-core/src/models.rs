//! Domain models for moodledger
//!
//! Record types are supplied by an external record store (the CLI, or the
//! full product's on-device database) as already-materialized collections.
//! The engine treats them as immutable; linking produces a derived
//! [`LinkedFinancialRecord`] view and never mutates the inputs.

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Mood labels form a fixed catalog. Each label carries a canonical
/// valence (roughly -2..+2) and arousal (0..2) score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoodLabel {
    Stressed,
    Anxious,
    Frustrated,
    Sad,
    Tired,
    Bored,
    Calm,
    Content,
    Happy,
    Excited,
}

impl MoodLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stressed => "stressed",
            Self::Anxious => "anxious",
            Self::Frustrated => "frustrated",
            Self::Sad => "sad",
            Self::Tired => "tired",
            Self::Bored => "bored",
            Self::Calm => "calm",
            Self::Content => "content",
            Self::Happy => "happy",
            Self::Excited => "excited",
        }
    }

    /// Pleasantness of the mood, negative = unpleasant.
    pub fn valence(&self) -> f64 {
        match self {
            Self::Stressed => -1.5,
            Self::Anxious => -1.2,
            Self::Frustrated => -1.4,
            Self::Sad => -1.5,
            Self::Tired => -0.8,
            Self::Bored => -0.6,
            Self::Calm => 1.0,
            Self::Content => 1.2,
            Self::Happy => 1.6,
            Self::Excited => 1.4,
        }
    }

    /// Activation level of the mood, 0 = flat, 2 = highly activated.
    pub fn arousal(&self) -> f64 {
        match self {
            Self::Stressed => 1.6,
            Self::Anxious => 1.4,
            Self::Frustrated => 1.5,
            Self::Sad => 0.4,
            Self::Tired => 0.2,
            Self::Bored => 0.3,
            Self::Calm => 0.3,
            Self::Content => 0.6,
            Self::Happy => 1.2,
            Self::Excited => 1.8,
        }
    }
}

impl std::str::FromStr for MoodLabel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "stressed" => Ok(Self::Stressed),
            "anxious" => Ok(Self::Anxious),
            "frustrated" => Ok(Self::Frustrated),
            "sad" => Ok(Self::Sad),
            "tired" => Ok(Self::Tired),
            "bored" => Ok(Self::Bored),
            "calm" => Ok(Self::Calm),
            "content" => Ok(Self::Content),
            "happy" => Ok(Self::Happy),
            "excited" => Ok(Self::Excited),
            _ => Err(format!("Unknown mood label: {}", s)),
        }
    }
}

impl std::fmt::Display for MoodLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A financial transaction produced by the import pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialRecord {
    pub id: String,
    /// Local occurrence time. The embedded offset is the record's local
    /// time; "same local calendar day" comparisons use it directly.
    pub occurred_at: DateTime<FixedOffset>,
    /// IANA timezone name, carried for display only
    pub timezone: String,
    /// Signed amount: negative = money out
    pub amount: f64,
    pub merchant: String,
    pub description: String,
    pub category: String,
    pub currency: Option<String>,
    /// Non-negative; exactly one of outflow/inflow is zero
    pub outflow: f64,
    pub inflow: f64,
    /// False when the statement carried only a date and the time-of-day
    /// was defaulted
    pub time_known: bool,
    pub import_batch_id: String,
    /// Directly-chosen mood record, set when the user picked a mood at
    /// purchase time
    pub mood_id: Option<String>,
    /// Manual retrospective "was this worth it?" flag
    pub felt_worth_it: Option<bool>,
}

impl FinancialRecord {
    /// Calendar date in the record's local time
    pub fn local_date(&self) -> NaiveDate {
        self.occurred_at.date_naive()
    }

    /// Local hour of day (only meaningful when `time_known`)
    pub fn local_hour(&self) -> u32 {
        use chrono::Timelike;
        self.occurred_at.hour()
    }
}

/// A mood check-in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodRecord {
    pub id: String,
    pub occurred_at: DateTime<FixedOffset>,
    pub timezone: String,
    pub label: MoodLabel,
    /// Up to two free-form tags (e.g. "work", "argument")
    #[serde(default)]
    pub tags: Vec<String>,
    pub note: Option<String>,
}

impl MoodRecord {
    pub fn valence(&self) -> f64 {
        self.label.valence()
    }

    pub fn arousal(&self) -> f64 {
        self.label.arousal()
    }
}

/// Self-reported memory confidence on a retrospective annotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemoryConfidence {
    High,
    Medium,
    Low,
}

impl MemoryConfidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl std::str::FromStr for MemoryConfidence {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            _ => Err(format!("Unknown memory confidence: {}", s)),
        }
    }
}

impl std::fmt::Display for MemoryConfidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A user's explicit, retrospective mood tag on one financial record.
/// At most one annotation per financial record; always outranks
/// automatic linking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManualLinkAnnotation {
    pub id: String,
    pub financial_record_id: String,
    pub created_at: DateTime<Utc>,
    pub label: MoodLabel,
    /// Valence/arousal copied from the catalog at annotation time, so a
    /// later catalog change cannot rewrite history
    pub valence: f64,
    pub arousal: f64,
    #[serde(default)]
    pub tags: Vec<String>,
    pub memory_confidence: Option<MemoryConfidence>,
    pub note: Option<String>,
}

/// How a mood got attached to a financial record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkSource {
    /// User-asserted: manual annotation or direct mood foreign key
    Direct,
    /// Automatically selected nearest-in-time mood
    Inferred,
}

impl LinkSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::Inferred => "inferred",
        }
    }
}

impl std::fmt::Display for LinkSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Coarse trust label used for both per-link and per-finding judgments
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceTier {
    Low,
    Med,
    High,
}

impl ConfidenceTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Med => "med",
            Self::High => "high",
        }
    }

    /// Ranking weight (higher = more trusted)
    pub fn weight(&self) -> f64 {
        match self {
            Self::Low => 1.0,
            Self::Med => 2.0,
            Self::High => 3.0,
        }
    }
}

impl std::str::FromStr for ConfidenceTier {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "med" | "medium" => Ok(Self::Med),
            "high" => Ok(Self::High),
            _ => Err(format!("Unknown confidence tier: {}", s)),
        }
    }
}

impl std::fmt::Display for ConfidenceTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// By-value copy of the mood attached to a record. A copy, not a live
/// reference: the source mood record may change after linking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodSnapshot {
    pub label: MoodLabel,
    pub valence: f64,
    pub arousal: f64,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl MoodSnapshot {
    pub fn from_mood(mood: &MoodRecord) -> Self {
        Self {
            label: mood.label,
            valence: mood.valence(),
            arousal: mood.arousal(),
            tags: mood.tags.clone(),
        }
    }

    pub fn from_annotation(annotation: &ManualLinkAnnotation) -> Self {
        Self {
            label: annotation.label,
            valence: annotation.valence,
            arousal: annotation.arousal,
            tags: annotation.tags.clone(),
        }
    }
}

/// A resolved mood attachment. Constructed only by the linker, which
/// upholds: `source == Direct` implies `confidence == High`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodLink {
    pub snapshot: MoodSnapshot,
    pub source: LinkSource,
    pub confidence: ConfidenceTier,
}

/// A financial record plus its (possibly absent) linked mood. Derived on
/// every computation pass; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkedFinancialRecord {
    pub record: FinancialRecord,
    pub mood: Option<MoodLink>,
}

impl LinkedFinancialRecord {
    pub fn has_mood(&self) -> bool {
        self.mood.is_some()
    }

    pub fn is_direct(&self) -> bool {
        matches!(
            self.mood,
            Some(MoodLink {
                source: LinkSource::Direct,
                ..
            })
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_mood_label_round_trip() {
        assert_eq!(MoodLabel::Stressed.as_str(), "stressed");
        assert_eq!(MoodLabel::from_str("EXCITED").unwrap(), MoodLabel::Excited);
        assert!(MoodLabel::from_str("grumpy").is_err());
    }

    #[test]
    fn test_catalog_score_ranges() {
        let labels = [
            MoodLabel::Stressed,
            MoodLabel::Anxious,
            MoodLabel::Frustrated,
            MoodLabel::Sad,
            MoodLabel::Tired,
            MoodLabel::Bored,
            MoodLabel::Calm,
            MoodLabel::Content,
            MoodLabel::Happy,
            MoodLabel::Excited,
        ];
        for label in labels {
            assert!((-2.0..=2.0).contains(&label.valence()), "{}", label);
            assert!((0.0..=2.0).contains(&label.arousal()), "{}", label);
        }
    }

    #[test]
    fn test_tier_weights_ordered() {
        assert!(ConfidenceTier::High.weight() > ConfidenceTier::Med.weight());
        assert!(ConfidenceTier::Med.weight() > ConfidenceTier::Low.weight());
    }

    #[test]
    fn test_tier_parses_medium_alias() {
        assert_eq!(
            ConfidenceTier::from_str("medium").unwrap(),
            ConfidenceTier::Med
        );
    }
}
