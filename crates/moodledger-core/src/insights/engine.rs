//! Insight engine - orchestrates linking, confidence, and generators

use chrono::{DateTime, FixedOffset, Utc};

use crate::confidence::{dataset_confidence, Confidence};
use crate::error::Result;
use crate::linker;
use crate::models::{FinancialRecord, LinkedFinancialRecord, ManualLinkAnnotation, MoodRecord};
use crate::registry::SpecRegistry;

use super::types::{InsightCard, InsightKind};
use super::{
    ImpulseRiskInsight, LateNightLeakInsight, MoodSpendHeatmapInsight, ReplacementWinsInsight,
    SmallFrequentLeaksInsight, TopTriggerTagsInsight, UnlinkedShareInsight, WorthItAnchorsInsight,
};

/// Global statistics over one computation pass, computed once and shared
#[derive(Debug, Clone)]
pub struct DatasetStats {
    pub sample_size: usize,
    /// Fraction of transactions with no linked mood
    pub missingness: f64,
    /// Fraction of transactions whose time of day was defaulted
    pub time_unknown_pct: f64,
    /// Transactions with a user-asserted (DIRECT) mood link
    pub direct_count: usize,
}

impl DatasetStats {
    pub fn from_linked(linked: &[LinkedFinancialRecord]) -> Self {
        let sample_size = linked.len();
        if sample_size == 0 {
            return Self {
                sample_size: 0,
                missingness: 0.0,
                time_unknown_pct: 0.0,
                direct_count: 0,
            };
        }
        let unlinked = linked.iter().filter(|r| !r.has_mood()).count();
        let time_unknown = linked.iter().filter(|r| !r.record.time_known).count();
        let direct_count = linked.iter().filter(|r| r.is_direct()).count();
        Self {
            sample_size,
            missingness: unlinked as f64 / sample_size as f64,
            time_unknown_pct: time_unknown as f64 / sample_size as f64,
            direct_count,
        }
    }
}

/// Read-only context shared by every generator in one pass
pub struct InsightContext<'a> {
    pub transactions: &'a [FinancialRecord],
    pub moods: &'a [MoodRecord],
    pub linked: &'a [LinkedFinancialRecord],
    pub stats: DatasetStats,
    pub dataset_confidence: Confidence,
    /// Computation time, injected so relative windows are testable
    pub now: DateTime<FixedOffset>,
}

/// One insight generator. Infallible: too little data is a first-class
/// result (placeholder narrative, Low confidence, optional gap), never
/// an error.
pub trait Insight: Send + Sync {
    /// Unique identifier, matching the registered index specification
    fn kind(&self) -> InsightKind;

    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Produce this generator's finding from the shared context
    fn compute(&self, ctx: &InsightContext<'_>) -> InsightCard;
}

/// The main engine: validated spec registry plus the generator list in
/// registration order
pub struct InsightEngine {
    registry: SpecRegistry,
    insights: Vec<Box<dyn Insight>>,
}

impl InsightEngine {
    /// Build the engine with the built-in generators. Registry validation
    /// runs here and must succeed before anything is computed; a
    /// malformed built-in spec is a developer defect and fails
    /// construction.
    pub fn new() -> Result<Self> {
        let registry = SpecRegistry::builtin()?;
        let mut engine = Self {
            registry,
            insights: vec![],
        };

        engine.register(Box::new(MoodSpendHeatmapInsight::new()));
        engine.register(Box::new(LateNightLeakInsight::new()));
        engine.register(Box::new(ImpulseRiskInsight::new()));
        engine.register(Box::new(SmallFrequentLeaksInsight::new()));
        engine.register(Box::new(ReplacementWinsInsight::new()));
        engine.register(Box::new(TopTriggerTagsInsight::new()));
        engine.register(Box::new(WorthItAnchorsInsight::new()));
        engine.register(Box::new(UnlinkedShareInsight::new()));

        Ok(engine)
    }

    /// Register a generator. Registration order is the tie-break order
    /// in the ranked output.
    pub fn register(&mut self, insight: Box<dyn Insight>) {
        self.insights.push(insight);
    }

    pub fn registry(&self) -> &SpecRegistry {
        &self.registry
    }

    pub fn insight_kinds(&self) -> Vec<InsightKind> {
        self.insights.iter().map(|i| i.kind()).collect()
    }

    /// Run one full computation pass: link once, compute global stats
    /// once, invoke every generator with the same read-only context, and
    /// rank. Deterministic for fixed inputs and a fixed `now`.
    pub fn compute_insights(
        &self,
        transactions: &[FinancialRecord],
        moods: &[MoodRecord],
        annotations: &[ManualLinkAnnotation],
        now: DateTime<FixedOffset>,
    ) -> Vec<InsightCard> {
        let linked = linker::link(transactions, moods, annotations);
        let stats = DatasetStats::from_linked(&linked);
        let confidence =
            dataset_confidence(stats.sample_size, stats.missingness, stats.time_unknown_pct);

        tracing::debug!(
            sample = stats.sample_size,
            missingness = stats.missingness,
            time_unknown = stats.time_unknown_pct,
            tier = %confidence.tier,
            "Computed dataset stats"
        );

        let ctx = InsightContext {
            transactions,
            moods,
            linked: &linked,
            stats,
            dataset_confidence: confidence,
            now,
        };

        let mut cards: Vec<InsightCard> = self
            .insights
            .iter()
            .map(|insight| {
                let card = insight.compute(&ctx);
                tracing::debug!(
                    insight = insight.kind().as_str(),
                    tier = %card.confidence.tier,
                    relevance = card.relevance,
                    gap = card.gap.is_some(),
                    "Insight computed"
                );
                card
            })
            .collect();

        // Stable sort: ties keep generator registration order
        cards.sort_by(|a, b| {
            b.rank_score()
                .partial_cmp(&a.rank_score())
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        cards
    }

    /// Convenience wrapper using the current wall-clock time. Several
    /// generators read relative windows, so results are
    /// time-of-computation dependent and must not be cached across days.
    pub fn compute_insights_now(
        &self,
        transactions: &[FinancialRecord],
        moods: &[MoodRecord],
        annotations: &[ManualLinkAnnotation],
    ) -> Vec<InsightCard> {
        self.compute_insights(transactions, moods, annotations, Utc::now().fixed_offset())
    }
}
