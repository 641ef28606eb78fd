//! End-to-end tests for the insight engine

use chrono::{DateTime, FixedOffset, Utc};

use moodledger_core::insights::{Insight, InsightContext};
use moodledger_core::{
    Confidence, ConfidenceTier, FinancialRecord, InsightCard, InsightEngine, InsightKind,
    LinkSource, ManualLinkAnnotation, MoodLabel, MoodRecord, VizSpec,
};

fn at(rfc3339: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(rfc3339).unwrap()
}

fn txn(id: &str, occurred_at: &str, category: &str, outflow: f64) -> FinancialRecord {
    FinancialRecord {
        id: id.to_string(),
        occurred_at: at(occurred_at),
        timezone: "America/Los_Angeles".to_string(),
        amount: -outflow,
        merchant: "MERCHANT".to_string(),
        description: "card purchase".to_string(),
        category: category.to_string(),
        currency: Some("USD".to_string()),
        outflow,
        inflow: 0.0,
        time_known: true,
        import_batch_id: "batch-1".to_string(),
        mood_id: None,
        felt_worth_it: None,
    }
}

fn mood(id: &str, occurred_at: &str, label: MoodLabel) -> MoodRecord {
    MoodRecord {
        id: id.to_string(),
        occurred_at: at(occurred_at),
        timezone: "America/Los_Angeles".to_string(),
        label,
        tags: vec![],
        note: None,
    }
}

fn annotation(id: &str, record_id: &str, label: MoodLabel) -> ManualLinkAnnotation {
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

const NOW: &str = "2026-03-31T12:00:00-08:00";

#[test]
fn empty_inputs_yield_full_sorted_placeholder_set() {
    let engine = InsightEngine::new().unwrap();
    let cards = engine.compute_insights(&[], &[], &[], at(NOW));

    // Every generator still returns something
    assert_eq!(cards.len(), 8);

    // Fully sorted by confidence-weighted relevance
    for pair in cards.windows(2) {
        assert!(pair[0].rank_score() >= pair[1].rank_score());
    }

    // No card claims more than the data supports
    for card in &cards {
        assert!(!card.narrative.is_empty(), "{} has no narrative", card.kind);
        assert_eq!(card.confidence.tier, ConfidenceTier::Low, "{}", card.kind);
    }
}

#[test]
fn identical_inputs_at_same_instant_are_idempotent() {
    // Small-frequent-leaks and the stats read `now`; freezing it makes
    // the whole pass a pure function.
    let engine = InsightEngine::new().unwrap();
    let transactions = vec![
        txn("t1", "2026-03-20T23:30:00-08:00", "Delivery", 32.0),
        txn("t2", "2026-03-21T09:00:00-08:00", "Coffee", 4.5),
        txn("t3", "2026-03-22T13:00:00-08:00", "Groceries", 80.0),
    ];
    let moods = vec![mood("m1", "2026-03-20T22:00:00-08:00", MoodLabel::Stressed)];
    let annotations = vec![annotation("a1", "t3", MoodLabel::Content)];

    let first = engine.compute_insights(&transactions, &moods, &annotations, at(NOW));
    let second = engine.compute_insights(&transactions, &moods, &annotations, at(NOW));

    let a = serde_json::to_value(&first).unwrap();
    let b = serde_json::to_value(&second).unwrap();
    assert_eq!(a, b);
}

#[test]
fn annotation_outranks_any_window_mood() {
    let transactions = vec![txn("t1", "2026-03-20T14:00:00-08:00", "Dining", 20.0)];
    // A mood five minutes away would win inference
    let moods = vec![mood("m1", "2026-03-20T13:55:00-08:00", MoodLabel::Sad)];
    let annotations = vec![annotation("a1", "t1", MoodLabel::Happy)];

    let linked = moodledger_core::link(&transactions, &moods, &annotations);
    let link = linked[0].mood.as_ref().unwrap();
    assert_eq!(link.source, LinkSource::Direct);
    assert_eq!(link.confidence, ConfidenceTier::High);
    assert_eq!(link.snapshot.label, MoodLabel::Happy);
}

struct StubInsight {
    kind: InsightKind,
    tier: ConfidenceTier,
    relevance: f64,
}

impl Insight for StubInsight {
    fn kind(&self) -> InsightKind {
        self.kind
    }

    fn name(&self) -> &'static str {
        "Stub"
    }

    fn compute(&self, _ctx: &InsightContext<'_>) -> InsightCard {
        InsightCard::new(
            self.kind,
            "Stub",
            "stub",
            VizSpec::Sparkline { points: vec![] },
            "none",
            Confidence::new(self.tier),
            self.relevance,
        )
    }
}

#[test]
fn ranking_is_weight_times_relevance_with_stable_ties() {
    let mut engine = InsightEngine::new().unwrap();
    // Registered after the built-ins: Med/0.5 first, then High/0.5.
    // High/0.5 (1.5) must rank above Med/0.5 (1.0) despite later
    // registration.
    engine.register(Box::new(StubInsight {
        kind: InsightKind::ImpulseRisk,
        tier: ConfidenceTier::Med,
        relevance: 0.5,
    }));
    engine.register(Box::new(StubInsight {
        kind: InsightKind::LateNightLeak,
        tier: ConfidenceTier::High,
        relevance: 0.5,
    }));

    let cards = engine.compute_insights(&[], &[], &[], at(NOW));
    let stub_positions: Vec<(usize, ConfidenceTier)> = cards
        .iter()
        .enumerate()
        .filter(|(_, c)| c.title == "Stub")
        .map(|(i, c)| (i, c.confidence.tier))
        .collect();
    assert_eq!(stub_positions.len(), 2);
    assert_eq!(stub_positions[0].1, ConfidenceTier::High);
    assert_eq!(stub_positions[1].1, ConfidenceTier::Med);
}

#[test]
fn stable_ties_keep_registration_order() {
    let mut engine = InsightEngine::new().unwrap();
    engine.register(Box::new(StubInsight {
        kind: InsightKind::ImpulseRisk,
        tier: ConfidenceTier::High,
        relevance: 0.5,
    }));
    engine.register(Box::new(StubInsight {
        kind: InsightKind::LateNightLeak,
        tier: ConfidenceTier::High,
        relevance: 0.5,
    }));

    let cards = engine.compute_insights(&[], &[], &[], at(NOW));
    let stubs: Vec<InsightKind> = cards
        .iter()
        .filter(|c| c.title == "Stub")
        .map(|c| c.kind)
        .collect();
    assert_eq!(stubs, vec![InsightKind::ImpulseRisk, InsightKind::LateNightLeak]);
}

#[test]
fn realistic_dataset_produces_ranked_mixed_confidence() {
    let engine = InsightEngine::new().unwrap();

    let mut transactions = vec![];
    let mut moods = vec![];
    // Three weeks of a daily coffee plus a weekly stressed late-night
    // delivery order
    for day in 1..=21 {
        transactions.push(txn(
            &format!("coffee{}", day),
            &format!("2026-03-{:02}T08:30:00-08:00", day),
            "Coffee",
            4.75,
        ));
        if day % 7 == 0 {
            transactions.push(txn(
                &format!("night{}", day),
                &format!("2026-03-{:02}T23:15:00-08:00", day),
                "Delivery",
                34.0,
            ));
            moods.push(mood(
                &format!("m{}", day),
                &format!("2026-03-{:02}T22:30:00-08:00", day),
                MoodLabel::Stressed,
            ));
        }
    }

    let cards = engine.compute_insights(&transactions, &moods, &[], at(NOW));
    assert_eq!(cards.len(), 8);
    for pair in cards.windows(2) {
        assert!(pair[0].rank_score() >= pair[1].rank_score());
    }

    // 21 small coffees clear the 12-count gate
    let leaks = cards
        .iter()
        .find(|c| c.kind == InsightKind::SmallFrequentLeaks)
        .unwrap();
    assert_eq!(leaks.confidence.tier, ConfidenceTier::Med);
    assert!(leaks.gap.is_none());

    // The stressed deliveries show up as impulse spend, but only three
    // of them: under the 15-count gate
    let impulse = cards
        .iter()
        .find(|c| c.kind == InsightKind::ImpulseRisk)
        .unwrap();
    assert_eq!(impulse.confidence.tier, ConfidenceTier::Low);
    assert_eq!(impulse.relevance, 0.75);
}

#[test]
fn registry_is_served_alongside_insights() {
    let engine = InsightEngine::new().unwrap();
    for kind in engine.insight_kinds() {
        let spec = engine.registry().get(kind.as_str()).unwrap();
        assert!(!spec.limitations.is_empty());
        for citation in &spec.citations {
            assert!(engine.registry().evidence().contains(citation));
        }
    }
}
