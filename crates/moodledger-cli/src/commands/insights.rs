//! The `insights` command: load records, run the engine, print the
//! ranked cards

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

use moodledger_core::{
    FinancialRecord, InsightCard, InsightEngine, ManualLinkAnnotation, MoodRecord,
};

use super::load_records;

pub fn cmd_insights(
    transactions_path: &Path,
    moods_path: &Path,
    annotations_path: Option<&Path>,
    now: Option<&str>,
    json: bool,
    limit: Option<usize>,
) -> Result<()> {
    let transactions: Vec<FinancialRecord> = load_records(transactions_path, "transactions")?;
    let moods: Vec<MoodRecord> = load_records(moods_path, "moods")?;
    let annotations: Vec<ManualLinkAnnotation> = match annotations_path {
        Some(path) => load_records(path, "annotations")?,
        None => vec![],
    };

    let now = match now {
        Some(text) => DateTime::parse_from_rfc3339(text)
            .with_context(|| format!("Invalid --now timestamp: {}", text))?,
        None => Utc::now().fixed_offset(),
    };

    tracing::debug!(
        transactions = transactions.len(),
        moods = moods.len(),
        annotations = annotations.len(),
        "Loaded record collections"
    );

    let engine = InsightEngine::new().context("Insight engine failed to start")?;
    let mut cards = engine.compute_insights(&transactions, &moods, &annotations, now);
    if let Some(limit) = limit {
        cards.truncate(limit);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&cards)?);
        return Ok(());
    }

    println!(
        "Insights for {} transactions, {} moods, {} annotations\n",
        transactions.len(),
        moods.len(),
        annotations.len()
    );
    for (index, card) in cards.iter().enumerate() {
        print_card(index + 1, card);
    }

    Ok(())
}

fn print_card(position: usize, card: &InsightCard) {
    println!(
        "{}. {} [{}]",
        position,
        card.title,
        card.confidence.tier.as_str().to_uppercase()
    );
    println!("   {}", card.narrative);
    println!("   Try: {}", card.action);
    for reason in &card.confidence.reasons {
        println!("   Note: {}", reason);
    }
    if let Some(gap) = &card.gap {
        println!("   Gap: {} -> {} ({})", gap.message, gap.cta_label, gap.cta_href);
    }
    println!();
}
