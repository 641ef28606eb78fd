//! Mood-transaction linker
//!
//! Pairs each financial record with at most one mood via an ordered
//! chain of matching strategies, first success wins:
//!
//! 1. Manual annotation for the record id (user-asserted, outranks all)
//! 2. Direct mood foreign key on the record
//! 3. Windowed nearest-neighbor over mood timestamps
//!
//! The output is a derived view, one entry per input transaction in
//! input order. Caller-owned collections are never mutated.

use std::collections::HashMap;

use crate::models::{
    ConfidenceTier, FinancialRecord, LinkSource, LinkedFinancialRecord, ManualLinkAnnotation,
    MoodLink, MoodRecord, MoodSnapshot,
};
use crate::policy::LinkWindow;

/// Link every transaction to its most likely mood
pub fn link(
    transactions: &[FinancialRecord],
    moods: &[MoodRecord],
    annotations: &[ManualLinkAnnotation],
) -> Vec<LinkedFinancialRecord> {
    let window = LinkWindow::default();

    // At most one annotation per financial record; keep the first if the
    // store ever hands us more.
    let mut by_record: HashMap<&str, &ManualLinkAnnotation> = HashMap::new();
    for annotation in annotations {
        by_record
            .entry(annotation.financial_record_id.as_str())
            .or_insert(annotation);
    }

    let mood_by_id: HashMap<&str, &MoodRecord> =
        moods.iter().map(|m| (m.id.as_str(), m)).collect();

    transactions
        .iter()
        .map(|txn| {
            let mood = annotation_link(txn, &by_record)
                .or_else(|| direct_link(txn, &mood_by_id))
                .or_else(|| inferred_link(txn, moods, &window));
            LinkedFinancialRecord {
                record: txn.clone(),
                mood,
            }
        })
        .collect()
}

/// Strategy 1: a manual annotation always wins, at High confidence.
fn annotation_link(
    txn: &FinancialRecord,
    annotations: &HashMap<&str, &ManualLinkAnnotation>,
) -> Option<MoodLink> {
    annotations.get(txn.id.as_str()).map(|annotation| MoodLink {
        snapshot: MoodSnapshot::from_annotation(annotation),
        source: LinkSource::Direct,
        confidence: ConfidenceTier::High,
    })
}

/// Strategy 2: a resolving direct mood foreign key, at High confidence.
fn direct_link(txn: &FinancialRecord, moods: &HashMap<&str, &MoodRecord>) -> Option<MoodLink> {
    let mood_id = txn.mood_id.as_deref()?;
    moods.get(mood_id).map(|mood| MoodLink {
        snapshot: MoodSnapshot::from_mood(mood),
        source: LinkSource::Direct,
        confidence: ConfidenceTier::High,
    })
}

/// Strategy 3: windowed nearest neighbor.
///
/// A candidate mood satisfies `-after_max <= (txn - mood) <= before_max`.
/// When the transaction's time of day is unknown the window rule is
/// replaced entirely by same-local-calendar-day equality. Smallest |delta|
/// wins; the comparison is strict, so ties keep the earliest mood in
/// input order.
fn inferred_link(
    txn: &FinancialRecord,
    moods: &[MoodRecord],
    window: &LinkWindow,
) -> Option<MoodLink> {
    let mut best: Option<(&MoodRecord, chrono::Duration)> = None;

    for mood in moods {
        let delta = txn.occurred_at.signed_duration_since(mood.occurred_at);
        let qualifies = if txn.time_known {
            delta >= -window.after_max && delta <= window.before_max
        } else {
            txn.local_date() == mood.occurred_at.date_naive()
        };
        if !qualifies {
            continue;
        }
        let distance = delta.abs();
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((mood, distance)),
        }
    }

    best.map(|(mood, _)| MoodLink {
        snapshot: MoodSnapshot::from_mood(mood),
        source: LinkSource::Inferred,
        confidence: inferred_tier(txn, mood),
    })
}

/// Secondary confidence for an inferred link: Med when any mood tag
/// appears in the transaction's category/merchant/description text,
/// else Low.
fn inferred_tier(txn: &FinancialRecord, mood: &MoodRecord) -> ConfidenceTier {
    let haystack = format!("{}{}{}", txn.category, txn.merchant, txn.description).to_lowercase();
    let tagged = mood
        .tags
        .iter()
        .filter(|t| !t.is_empty())
        .any(|t| haystack.contains(&t.to_lowercase()));
    if tagged {
        ConfidenceTier::Med
    } else {
        ConfidenceTier::Low
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MoodLabel;
    use chrono::{DateTime, Duration, FixedOffset, Utc};

    fn at(rfc3339: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(rfc3339).unwrap()
    }

    fn txn(id: &str, occurred_at: &str) -> FinancialRecord {
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

    fn mood(id: &str, occurred_at: &str, label: crate::models::MoodLabel) -> MoodRecord {
        MoodRecord {
            id: id.to_string(),
            occurred_at: at(occurred_at),
            timezone: "America/Los_Angeles".to_string(),
            label,
            tags: vec![],
            note: None,
        }
    }

    fn annotation(id: &str, record_id: &str) -> ManualLinkAnnotation {
        ManualLinkAnnotation {
            id: id.to_string(),
            financial_record_id: record_id.to_string(),
            created_at: Utc::now(),
            label: crate::models::MoodLabel::Stressed,
            valence: crate::models::MoodLabel::Stressed.valence(),
            arousal: crate::models::MoodLabel::Stressed.arousal(),
            tags: vec!["work".to_string()],
            memory_confidence: Some(crate::models::MemoryConfidence::High),
            note: None,
        }
    }

    #[test]
    fn test_annotation_outranks_window_match() {
        let transactions = vec![txn("t1", "2026-03-10T14:00:00-08:00")];
        // A mood 10 minutes away would otherwise win the window match
        let moods = vec![mood("m1", "2026-03-10T13:50:00-08:00", MoodLabel::Happy)];
        let annotations = vec![annotation("a1", "t1")];

        let linked = link(&transactions, &moods, &annotations);
        let mood_link = linked[0].mood.as_ref().unwrap();
        assert_eq!(mood_link.source, LinkSource::Direct);
        assert_eq!(mood_link.confidence, ConfidenceTier::High);
        assert_eq!(mood_link.snapshot.label, MoodLabel::Stressed);
    }

    #[test]
    fn test_direct_foreign_key_resolves() {
        let mut t = txn("t1", "2026-03-10T14:00:00-08:00");
        t.mood_id = Some("m2".to_string());
        let moods = vec![
            mood("m1", "2026-03-10T13:59:00-08:00", MoodLabel::Sad),
            mood("m2", "2026-03-09T08:00:00-08:00", MoodLabel::Calm),
        ];

        let linked = link(&[t], &moods, &[]);
        let mood_link = linked[0].mood.as_ref().unwrap();
        assert_eq!(mood_link.source, LinkSource::Direct);
        assert_eq!(mood_link.confidence, ConfidenceTier::High);
        assert_eq!(mood_link.snapshot.label, MoodLabel::Calm);
    }

    #[test]
    fn test_unresolvable_foreign_key_falls_through_to_window() {
        let mut t = txn("t1", "2026-03-10T14:00:00-08:00");
        t.mood_id = Some("gone".to_string());
        let moods = vec![mood("m1", "2026-03-10T13:00:00-08:00", MoodLabel::Bored)];

        let linked = link(&[t], &moods, &[]);
        let mood_link = linked[0].mood.as_ref().unwrap();
        assert_eq!(mood_link.source, LinkSource::Inferred);
    }

    #[test]
    fn test_window_boundaries() {
        // Mood 1h50m before the transaction: within +6h, links
        let t = txn("t1", "2026-03-10T14:00:00-08:00");
        let inside = vec![mood("m1", "2026-03-10T12:10:00-08:00", MoodLabel::Tired)];
        assert!(link(&[t.clone()], &inside, &[])[0].has_mood());

        // Mood 2h10m after the transaction: outside -2h, does not link
        let outside = vec![mood("m1", "2026-03-10T16:10:00-08:00", MoodLabel::Tired)];
        assert!(!link(&[t], &outside, &[])[0].has_mood());
    }

    #[test]
    fn test_mood_before_bound_is_six_hours() {
        // The 2h bound applies to moods after the transaction only; a
        // mood 2h10m before it is well inside the 6h look-back
        let t = txn("t1", "2026-03-10T14:00:00-08:00");
        let before = vec![mood("m1", "2026-03-10T11:50:00-08:00", MoodLabel::Anxious)];
        assert!(link(&[t.clone()], &before, &[])[0].has_mood());

        // 6h10m before is past the look-back, does not link
        let too_early = vec![mood("m1", "2026-03-10T07:50:00-08:00", MoodLabel::Anxious)];
        assert!(!link(&[t], &too_early, &[])[0].has_mood());
    }

    #[test]
    fn test_mood_after_within_two_hours_links() {
        let t = txn("t1", "2026-03-10T14:00:00-08:00");
        let moods = vec![mood("m1", "2026-03-10T15:50:00-08:00", MoodLabel::Content)];
        let linked = link(&[t], &moods, &[]);
        assert!(linked[0].has_mood());
    }

    #[test]
    fn test_unknown_time_uses_calendar_day() {
        let mut t = txn("t1", "2026-03-10T00:00:00-08:00");
        t.time_known = false;

        // 23 hours away but same local day: links
        let same_day = vec![mood("m1", "2026-03-10T23:00:00-08:00", MoodLabel::Happy)];
        assert!(link(&[t.clone()], &same_day, &[])[0].has_mood());

        // 1 hour away on the next local day: does not link
        let next_day = vec![mood("m1", "2026-03-11T01:00:00-08:00", MoodLabel::Happy)];
        assert!(!link(&[t], &next_day, &[])[0].has_mood());
    }

    #[test]
    fn test_nearest_wins_and_ties_keep_first() {
        let t = txn("t1", "2026-03-10T14:00:00-08:00");
        let moods = vec![
            mood("far", "2026-03-10T09:00:00-08:00", MoodLabel::Sad),
            mood("near", "2026-03-10T13:30:00-08:00", MoodLabel::Calm),
            // Same 30m distance on the other side; strict comparison keeps "near"
            mood("tied", "2026-03-10T14:30:00-08:00", MoodLabel::Excited),
        ];
        let linked = link(&[t], &moods, &[]);
        assert_eq!(
            linked[0].mood.as_ref().unwrap().snapshot.label,
            MoodLabel::Calm
        );
    }

    #[test]
    fn test_tag_match_raises_tier_to_med() {
        let t = txn("t1", "2026-03-10T14:00:00-08:00");
        let mut tagged = mood("m1", "2026-03-10T13:00:00-08:00", MoodLabel::Stressed);
        tagged.tags = vec!["cafe".to_string()];
        let linked = link(&[t.clone()], &[tagged], &[]);
        assert_eq!(
            linked[0].mood.as_ref().unwrap().confidence,
            ConfidenceTier::Med
        );

        let mut untagged = mood("m1", "2026-03-10T13:00:00-08:00", MoodLabel::Stressed);
        untagged.tags = vec!["gym".to_string()];
        let linked = link(&[t], &[untagged], &[]);
        assert_eq!(
            linked[0].mood.as_ref().unwrap().confidence,
            ConfidenceTier::Low
        );
    }

    #[test]
    fn test_no_moods_yields_unlinked() {
        let t = txn("t1", "2026-03-10T14:00:00-08:00");
        let linked = link(&[t], &[], &[]);
        assert_eq!(linked.len(), 1);
        assert!(!linked[0].has_mood());
    }

    #[test]
    fn test_order_preserved_and_mood_reuse() {
        let transactions = vec![
            txn("t1", "2026-03-10T14:00:00-08:00"),
            txn("t2", "2026-03-10T15:00:00-08:00"),
        ];
        let moods = vec![mood("m1", "2026-03-10T13:30:00-08:00", MoodLabel::Anxious)];
        let linked = link(&transactions, &moods, &[]);
        assert_eq!(linked[0].record.id, "t1");
        assert_eq!(linked[1].record.id, "t2");
        // Both transactions may link to the same mood
        assert!(linked[0].has_mood() && linked[1].has_mood());
    }

    #[test]
    fn test_delta_abs_behaves() {
        // Sanity on the distance math the matcher relies on
        let a = at("2026-03-10T14:00:00-08:00");
        let b = at("2026-03-10T15:00:00-08:00");
        assert_eq!(a.signed_duration_since(b).abs(), Duration::hours(1));
    }
}
