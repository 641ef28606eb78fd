//! The `specs` and `check` commands: inspect and validate the index
//! specification registry

use anyhow::{bail, Context, Result};

use moodledger_core::SpecRegistry;

use super::truncate;

pub fn cmd_specs_list() -> Result<()> {
    let registry = SpecRegistry::builtin().context("Specification registry failed validation")?;

    println!("{:<24} {:<24} QUESTION", "ID", "NAME");
    for spec in registry.all() {
        println!(
            "{:<24} {:<24} {}",
            spec.id,
            truncate(&spec.name, 22),
            truncate(&spec.question, 60)
        );
    }
    Ok(())
}

pub fn cmd_specs_show(id: &str) -> Result<()> {
    let registry = SpecRegistry::builtin().context("Specification registry failed validation")?;
    let Some(spec) = registry.get(id) else {
        bail!("No index specification with id '{}'", id);
    };

    println!("{} ({}) v{}", spec.name, spec.id, spec.schema_version);
    println!("\nQuestion:      {}", spec.question);
    println!("Construct:     {}", spec.construct);
    println!("Matching rule: {}", spec.matching_rule);
    println!("Formula:       {}", spec.formula);
    println!("Unit:          {}", spec.unit);
    println!("Normalization: {}", spec.normalization);
    println!("Minimum data:  {}", spec.min_data);
    println!("\nConfidence:    {}", spec.confidence.mapping_function);
    println!("  low:  {}", spec.confidence.low);
    println!("  med:  {}", spec.confidence.med);
    println!("  high: {}", spec.confidence.high);

    println!("\nInputs:");
    for input in &spec.inputs {
        println!("  - {}", input);
    }
    println!("\nLimitations:");
    for limitation in &spec.limitations {
        println!("  - {}", limitation);
    }
    println!("\nCitations:");
    for citation_id in &spec.citations {
        // Registry validation guarantees these resolve
        if let Some(citation) = registry.evidence().get(citation_id) {
            println!(
                "  - {} ({}). {}. {}",
                citation.authors, citation.year, citation.title, citation.url
            );
        }
    }
    println!("\nChange log:");
    for entry in &spec.changelog {
        println!("  - {} ({}): {}", entry.version, entry.date, entry.note);
    }
    Ok(())
}

pub fn cmd_check() -> Result<()> {
    let registry = SpecRegistry::builtin().context("Specification registry failed validation")?;
    println!(
        "OK: {} index specifications validated against {} citations",
        registry.all().len(),
        registry.evidence().all().len()
    );
    Ok(())
}
