//! Moodledger Core Library
//!
//! The insight computation engine for moodledger, a mood/spend journal:
//! - Mood-transaction linking under time-window ambiguity
//! - Confidence scoring for every derived pattern
//! - A validated registry of self-documenting index specifications
//! - Ranked, confidence-qualified insight cards with data-gap prompts
//!
//! The engine is pure and synchronous: record collections come in,
//! ranked findings come out. Storage, import, transport, and rendering
//! are external collaborators.

pub mod confidence;
pub mod error;
pub mod evidence;
pub mod insights;
pub mod linker;
pub mod models;
pub mod policy;
pub mod registry;

/// Test utilities for building record fixtures
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use confidence::{confidence_from_count, dataset_confidence, direct_confidence, Confidence};
pub use error::{Error, Result};
pub use evidence::{Citation, EvidenceCatalog, SourceType};
pub use insights::{
    DatasetStats, Gap, Insight, InsightCard, InsightContext, InsightEngine, InsightKind, VizSpec,
};
pub use linker::link;
pub use models::{
    ConfidenceTier, FinancialRecord, LinkSource, LinkedFinancialRecord, ManualLinkAnnotation,
    MemoryConfidence, MoodLabel, MoodLink, MoodRecord, MoodSnapshot,
};
pub use registry::{ConfidenceSpec, IndexSpecification, SpecRegistry};
