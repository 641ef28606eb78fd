//! Test fixtures for building records without ceremony

use chrono::{DateTime, FixedOffset, Utc};

use crate::models::{FinancialRecord, ManualLinkAnnotation, MoodLabel, MoodRecord};

pub fn at(rfc3339: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(rfc3339).unwrap()
}

/// A timed $12.50 dining transaction
pub fn txn(id: &str, occurred_at: &str) -> FinancialRecord {
    FinancialRecord {
        id: id.to_string(),
        occurred_at: at(occurred_at),
        timezone: "America/Los_Angeles".to_string(),
        amount: -12.50,
        merchant: "CORNER CAFE".to_string(),
        description: "card purchase".to_string(),
        category: "Dining".to_string(),
        currency: Some("USD".to_string()),
        outflow: 12.50,
        inflow: 0.0,
        time_known: true,
        import_batch_id: "batch-1".to_string(),
        mood_id: None,
        felt_worth_it: None,
    }
}

pub fn txn_with(
    id: &str,
    occurred_at: &str,
    category: &str,
    outflow: f64,
) -> FinancialRecord {
    let mut record = txn(id, occurred_at);
    record.category = category.to_string();
    record.outflow = outflow;
    record.amount = -outflow;
    record
}

pub fn mood(id: &str, occurred_at: &str, label: MoodLabel) -> MoodRecord {
    MoodRecord {
        id: id.to_string(),
        occurred_at: at(occurred_at),
        timezone: "America/Los_Angeles".to_string(),
        label,
        tags: vec![],
        note: None,
    }
}

pub fn annotation(id: &str, record_id: &str, label: MoodLabel) -> ManualLinkAnnotation {
    ManualLinkAnnotation {
        id: id.to_string(),
        financial_record_id: record_id.to_string(),
        created_at: Utc::now(),
        label,
        valence: label.valence(),
        arousal: label.arousal(),
        tags: vec![],
        memory_confidence: None,
        note: None,
    }
}

/// Owns one computation pass worth of data so generator tests can borrow
/// a ready-made [`InsightContext`]
pub struct Dataset {
    pub transactions: Vec<FinancialRecord>,
    pub moods: Vec<MoodRecord>,
    pub annotations: Vec<ManualLinkAnnotation>,
    linked: Vec<crate::models::LinkedFinancialRecord>,
}

impl Dataset {
    pub fn new(
        transactions: Vec<FinancialRecord>,
        moods: Vec<MoodRecord>,
        annotations: Vec<ManualLinkAnnotation>,
    ) -> Self {
        let linked = crate::linker::link(&transactions, &moods, &annotations);
        Self {
            transactions,
            moods,
            annotations,
            linked,
        }
    }

    pub fn context(&self, now: &str) -> crate::insights::InsightContext<'_> {
        let stats = crate::insights::DatasetStats::from_linked(&self.linked);
        let dataset_confidence = crate::confidence::dataset_confidence(
            stats.sample_size,
            stats.missingness,
            stats.time_unknown_pct,
        );
        crate::insights::InsightContext {
            transactions: &self.transactions,
            moods: &self.moods,
            linked: &self.linked,
            stats,
            dataset_confidence,
            now: at(now),
        }
    }
}
