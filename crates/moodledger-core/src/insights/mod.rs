//! Insight card generators and the engine that runs them
//!
//! Each generator is an independent, stateless computation over the
//! shared linked dataset. The engine links once, computes global stats
//! once, runs every generator with the same read-only context, and
//! ranks the findings by confidence-weighted relevance.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use moodledger_core::insights::InsightEngine;
//!
//! let engine = InsightEngine::new()?;
//! let cards = engine.compute_insights_now(&transactions, &moods, &annotations);
//! ```

pub mod engine;
pub mod heatmap;
pub mod impulse_risk;
pub mod late_night_leak;
pub mod replacement_wins;
pub mod small_frequent_leaks;
pub mod top_trigger_tags;
pub mod types;
pub mod unlinked_share;
pub mod worth_it_anchors;

pub use engine::{DatasetStats, Insight, InsightContext, InsightEngine};
pub use heatmap::MoodSpendHeatmapInsight;
pub use impulse_risk::ImpulseRiskInsight;
pub use late_night_leak::LateNightLeakInsight;
pub use replacement_wins::ReplacementWinsInsight;
pub use small_frequent_leaks::SmallFrequentLeaksInsight;
pub use top_trigger_tags::TopTriggerTagsInsight;
pub use types::{Gap, InsightCard, InsightKind, VizSpec};
pub use unlinked_share::UnlinkedShareInsight;
pub use worth_it_anchors::WorthItAnchorsInsight;
