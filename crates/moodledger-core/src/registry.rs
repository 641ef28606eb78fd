//! Index specification registry
//!
//! Every insight kind ships with a self-documenting "index
//! specification": the question it answers, the inputs and formula it
//! uses, its minimum-data thresholds, how counts map to confidence, its
//! limitations, and the evidence it cites. The registry validates the
//! full built-in set at engine construction and refuses to start on any
//! malformed spec. Validation failures are developer-facing defects,
//! never user-facing errors.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::evidence::EvidenceCatalog;

/// Spec schema version this engine understands
pub const SCHEMA_VERSION: u32 = 1;

/// Prose mapping from evidence volume to confidence tiers, plus what
/// each tier means for this particular index
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfidenceSpec {
    /// How counts/ratios map to tiers, in auditable prose
    pub mapping_function: String,
    pub low: String,
    pub med: String,
    pub high: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeLogEntry {
    pub version: String,
    pub date: String,
    pub note: String,
}

/// A versioned, immutable descriptor of one insight type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexSpecification {
    pub id: String,
    pub name: String,
    pub schema_version: u32,
    /// The user-facing question this index answers
    pub question: String,
    /// What the index claims to measure
    pub construct: String,
    /// Named inputs the computation reads
    pub inputs: Vec<String>,
    pub matching_rule: String,
    pub formula: String,
    pub unit: String,
    /// Must declare either "within-user" or "absolute" scale
    pub normalization: String,
    pub min_data: String,
    pub confidence: ConfidenceSpec,
    pub limitations: Vec<String>,
    /// Ids resolving in the evidence catalog
    pub citations: Vec<String>,
    pub validation_plan: Vec<String>,
    pub changelog: Vec<ChangeLogEntry>,
}

/// Registry of validated index specifications, iteration in
/// registration order
pub struct SpecRegistry {
    catalog: EvidenceCatalog,
    specs: Vec<IndexSpecification>,
}

impl SpecRegistry {
    pub fn new(catalog: EvidenceCatalog) -> Self {
        Self {
            catalog,
            specs: Vec::new(),
        }
    }

    /// Validate and register one specification
    pub fn register(&mut self, spec: IndexSpecification) -> Result<()> {
        self.validate(&spec)?;
        tracing::debug!(spec = spec.id, "Index specification registered");
        self.specs.push(spec);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&IndexSpecification> {
        self.specs.iter().find(|s| s.id == id)
    }

    pub fn all(&self) -> &[IndexSpecification] {
        &self.specs
    }

    pub fn evidence(&self) -> &EvidenceCatalog {
        &self.catalog
    }

    fn validate(&self, spec: &IndexSpecification) -> Result<()> {
        let fail = |reason: &str| {
            Err(Error::SpecValidation {
                spec_id: spec.id.clone(),
                reason: reason.to_string(),
            })
        };

        if spec.id.trim().is_empty() {
            return Err(Error::SpecValidation {
                spec_id: "<blank>".to_string(),
                reason: "id is empty".to_string(),
            });
        }
        if self.specs.iter().any(|s| s.id == spec.id) {
            return Err(Error::DuplicateSpec(spec.id.clone()));
        }
        if spec.schema_version != SCHEMA_VERSION {
            return fail(&format!(
                "unsupported schema version {} (expected {})",
                spec.schema_version, SCHEMA_VERSION
            ));
        }

        let required_strings = [
            ("name", &spec.name),
            ("question", &spec.question),
            ("construct", &spec.construct),
            ("matching_rule", &spec.matching_rule),
            ("formula", &spec.formula),
            ("unit", &spec.unit),
            ("normalization", &spec.normalization),
            ("min_data", &spec.min_data),
        ];
        for (field, value) in required_strings {
            if value.trim().is_empty() {
                return fail(&format!("{} is empty", field));
            }
        }

        // Loose guard, not semantic validation: the statement just has to
        // declare one of the two scales.
        let normalization = spec.normalization.to_lowercase();
        if !normalization.contains("within-user") && !normalization.contains("absolute") {
            return fail("normalization must declare a within-user or absolute scale");
        }

        if spec.confidence.mapping_function.trim().is_empty() {
            return fail("confidence.mapping_function is blank");
        }
        for (tier, text) in [
            ("low", &spec.confidence.low),
            ("med", &spec.confidence.med),
            ("high", &spec.confidence.high),
        ] {
            if text.trim().is_empty() {
                return fail(&format!("confidence.{} description is empty", tier));
            }
        }

        let required_lists = [
            ("inputs", spec.inputs.len()),
            ("limitations", spec.limitations.len()),
            ("citations", spec.citations.len()),
            ("validation_plan", spec.validation_plan.len()),
            ("changelog", spec.changelog.len()),
        ];
        for (field, len) in required_lists {
            if len == 0 {
                return fail(&format!("{} list is empty", field));
            }
        }

        for citation_id in &spec.citations {
            if !self.catalog.contains(citation_id) {
                return Err(Error::UnknownCitation {
                    spec_id: spec.id.clone(),
                    citation_id: citation_id.clone(),
                });
            }
        }

        Ok(())
    }

    /// Build the registry with the full built-in spec set. Called once at
    /// engine construction; any failure here is fatal to the caller.
    pub fn builtin() -> Result<Self> {
        let mut registry = Self::new(EvidenceCatalog::builtin());
        for spec in builtin_specs() {
            registry.register(spec)?;
        }
        tracing::info!(count = registry.specs.len(), "Index specifications validated");
        Ok(registry)
    }
}

fn entry(version: &str, date: &str, note: &str) -> ChangeLogEntry {
    ChangeLogEntry {
        version: version.into(),
        date: date.into(),
        note: note.into(),
    }
}

fn builtin_specs() -> Vec<IndexSpecification> {
    vec![
        IndexSpecification {
            id: "mood_spend_heatmap".into(),
            name: "Mood x Spend Heatmap".into(),
            schema_version: SCHEMA_VERSION,
            question: "Which moods and spending categories go together?".into(),
            construct: "Co-occurrence of mood states and category outflow".into(),
            inputs: vec![
                "linked financial records with a mood".into(),
                "mood check-ins".into(),
            ],
            matching_rule: "Uses the shared linker output; only records with a linked mood \
                            contribute to cells."
                .into(),
            formula: "Cell(category, mood) = sum of outflow for linked records in that category \
                      carrying that mood label, over the top 5 categories by total outflow."
                .into(),
            unit: "currency per cell".into(),
            normalization: "Within-user scale: cells are comparable across this user's own \
                            categories, not across users."
                .into(),
            min_data: "At least one linked record and one mood check-in; below that a \
                       placeholder is shown."
                .into(),
            confidence: ConfidenceSpec {
                mapping_function: "Global dataset confidence: High at sample >= 50, \
                                   missingness <= 0.15, time-unknown <= 0.20; Low under \
                                   sample < 20, missingness > 0.35, or time-unknown > 0.45; \
                                   Med otherwise."
                    .into(),
                low: "Sparse or poorly linked data; treat cells as anecdotes.".into(),
                med: "Patterns are indicative but cells may shift week to week.".into(),
                high: "Cell ordering is stable for this user.".into(),
            },
            limitations: vec![
                "Inferred links inherit the linker's time-window ambiguity.".into(),
                "Says nothing about causation; a mood may follow spending or precede it.".into(),
            ],
            citations: vec![
                "russell-1980-circumplex".into(),
                "cryder-lerner-gross-dahl-2008".into(),
            ],
            validation_plan: vec![
                "Cell totals equal the sum of member record outflows.".into(),
                "Categories beyond the top 5 by outflow never appear.".into(),
            ],
            changelog: vec![entry("1.0.0", "2026-04-02", "Initial release.")],
        },
        IndexSpecification {
            id: "late_night_leak".into(),
            name: "Late-Night Leak".into(),
            schema_version: SCHEMA_VERSION,
            question: "How much of my spending happens late at night?".into(),
            construct: "Share of outflow in the 22:00-02:00 local band".into(),
            inputs: vec!["financial records with a known time of day".into()],
            matching_rule: "Only records whose time of day is known qualify; late means local \
                            hour >= 22 or <= 2."
                .into(),
            formula: "Late-night outflow divided by total known-time outflow.".into(),
            unit: "percent of known-time outflow".into(),
            normalization: "Within-user scale.".into(),
            min_data: "30 known-time transactions for Med confidence, 60 for High.".into(),
            confidence: ConfidenceSpec {
                mapping_function: "Count gate 30/60 on known-time transactions; forced Low \
                                   whenever more than 35% of records have no time of day."
                    .into(),
                low: "Too few timed records, or too many untimed ones, to trust the share."
                    .into(),
                med: "The share is roughly right; the trend is usable.".into(),
                high: "The share is stable and worth acting on.".into(),
            },
            limitations: vec![
                "Statement imports often default the time of day; those records are excluded \
                 and can bias the share."
                    .into(),
                "Night-shift schedules make the 22:00-02:00 band a poor proxy for impulse."
                    .into(),
            ],
            citations: vec!["baumeister-2002-selfcontrol".into()],
            validation_plan: vec![
                "Records with unknown time never contribute to either numerator or \
                 denominator."
                    .into(),
                "Band membership at hours 22, 2, and 3 matches the rule.".into(),
            ],
            changelog: vec![entry("1.0.0", "2026-04-02", "Initial release.")],
        },
        IndexSpecification {
            id: "impulse_risk".into(),
            name: "Impulse Risk".into(),
            schema_version: SCHEMA_VERSION,
            question: "Do I spend more when I'm upset and keyed up?".into(),
            construct: "Mean outflow under negative, activated moods".into(),
            inputs: vec!["linked financial records with a mood".into()],
            matching_rule: "Linked records where mood valence < -0.3 and arousal > 0.3.".into(),
            formula: "Mean outflow over the qualifying subset.".into(),
            unit: "currency per transaction".into(),
            normalization: "Within-user scale.".into(),
            min_data: "15 qualifying records for Med confidence, 40 for High.".into(),
            confidence: ConfidenceSpec {
                mapping_function: "Count gate 15/40 on qualifying linked records.".into(),
                low: "A handful of moments; the mean is noise.".into(),
                med: "A pattern is forming; watch it.".into(),
                high: "The mean is a fair summary of your upset-spending.".into(),
            },
            limitations: vec![
                "Valence and arousal come from a fixed label catalog, not per-moment ratings."
                    .into(),
                "Descriptive only; this is not a clinical impulsivity measure.".into(),
            ],
            citations: vec![
                "verplanken-herabadi-2001".into(),
                "cryder-lerner-gross-dahl-2008".into(),
            ],
            validation_plan: vec![
                "Boundary moods (valence -0.3, arousal 0.3) are excluded by the strict \
                 comparisons."
                    .into(),
            ],
            changelog: vec![entry("1.0.0", "2026-04-02", "Initial release.")],
        },
        IndexSpecification {
            id: "small_frequent_leaks".into(),
            name: "Small Frequent Leaks".into(),
            schema_version: SCHEMA_VERSION,
            question: "How much do small purchases add up to?".into(),
            construct: "Aggregate of sub-$15 outflows over the last 30 days".into(),
            inputs: vec!["financial records in the trailing 30-day window".into()],
            matching_rule: "Outflow > 0 and <= $15, occurrence within 30 days of computation \
                            time."
                .into(),
            formula: "Count and sum of qualifying outflows; daily totals for the trend line."
                .into(),
            unit: "currency over 30 days".into(),
            normalization: "Absolute scale: the $15 ceiling is fixed, not user-relative.".into(),
            min_data: "12 qualifying purchases for Med confidence, 30 for High.".into(),
            confidence: ConfidenceSpec {
                mapping_function: "Count gate 12/30 on qualifying purchases.".into(),
                low: "Too few small purchases to call a leak.".into(),
                med: "The running total is roughly right.".into(),
                high: "The leak estimate is dependable.".into(),
            },
            limitations: vec![
                "A fixed $15 ceiling misclassifies small-but-planned purchases.".into(),
                "The 30-day window makes the figure time-of-computation dependent.".into(),
            ],
            citations: vec!["rick-cryder-loewenstein-2008".into()],
            validation_plan: vec![
                "Purchases dated outside the trailing window never qualify.".into(),
                "The sparkline day count matches the window length.".into(),
            ],
            changelog: vec![entry("1.0.0", "2026-04-02", "Initial release.")],
        },
        IndexSpecification {
            id: "replacement_wins".into(),
            name: "Replacement Wins".into(),
            schema_version: SCHEMA_VERSION,
            question: "Which low-mood purchases would I happily swap for something cheaper?"
                .into(),
            construct: "Regretted spending under negative moods".into(),
            inputs: vec![
                "linked financial records with a mood".into(),
                "manual worth-it flags".into(),
            ],
            matching_rule: "Linked records with mood valence < 0 whose worth-it flag is \
                            explicitly false."
                .into(),
            formula: "Count and sum of qualifying outflows, grouped by category.".into(),
            unit: "currency".into(),
            normalization: "Within-user scale.".into(),
            min_data: "8 flagged purchases for Med confidence, 20 for High.".into(),
            confidence: ConfidenceSpec {
                mapping_function: "Count gate 8/20 on flagged low-mood purchases.".into(),
                low: "Flag more purchases to surface swaps.".into(),
                med: "The candidate list is usable.".into(),
                high: "The swap candidates are well supported.".into(),
            },
            limitations: vec![
                "Depends entirely on manual worth-it flags, which skew toward memorable \
                 purchases."
                    .into(),
            ],
            citations: vec!["dunn-gilbert-wilson-2011".into()],
            validation_plan: vec![
                "Purchases without an explicit worth-it = false flag never qualify.".into(),
            ],
            changelog: vec![entry("1.0.0", "2026-04-02", "Initial release.")],
        },
        IndexSpecification {
            id: "top_trigger_tags".into(),
            name: "Top Trigger Tags".into(),
            schema_version: SCHEMA_VERSION,
            question: "Which situations show up next to my spending?".into(),
            construct: "Outflow attached to each free-form mood tag".into(),
            inputs: vec!["linked financial records with a mood".into()],
            matching_rule: "Every tag on a linked record's mood snapshot attributes that \
                            record's outflow to the tag."
                .into(),
            formula: "Sum of outflow per tag; top 5 tags by total.".into(),
            unit: "currency per tag".into(),
            normalization: "Within-user scale.".into(),
            min_data: "10 directly-tagged purchases for Med confidence, 20 for High.".into(),
            confidence: ConfidenceSpec {
                mapping_function: "Direct-tag gate: High at >= 20 directly-tagged purchases, \
                                   Med at >= 10, else Low. Inferred links contribute spend but \
                                   not confidence."
                    .into(),
                low: "Tag attribution rests mostly on inferred links.".into(),
                med: "Tag ranking is indicative.".into(),
                high: "Tag ranking reflects your own annotations.".into(),
            },
            limitations: vec![
                "Tags are free-form; 'work' and 'job' count separately.".into(),
                "A record's full outflow is attributed to each of its tags, so tag totals \
                 overlap."
                    .into(),
            ],
            citations: vec!["robinson-clore-2002".into()],
            validation_plan: vec![
                "Records without a linked mood never contribute to any tag.".into(),
            ],
            changelog: vec![entry("1.0.0", "2026-04-02", "Initial release.")],
        },
        IndexSpecification {
            id: "worth_it_anchors".into(),
            name: "Worth-It Anchors".into(),
            schema_version: SCHEMA_VERSION,
            question: "Which purchases reliably feel worth it?".into(),
            construct: "Spending the user affirmed in retrospect".into(),
            inputs: vec![
                "financial records".into(),
                "manual worth-it flags".into(),
            ],
            matching_rule: "Records whose worth-it flag is explicitly true.".into(),
            formula: "Count, total, and per-category mean of affirmed outflows.".into(),
            unit: "currency".into(),
            normalization: "Within-user scale.".into(),
            min_data: "10 affirmed purchases for Med confidence, 20 for High.".into(),
            confidence: ConfidenceSpec {
                mapping_function: "Count gate 10/20 on affirmed purchases.".into(),
                low: "Mark more purchases to find your anchors.".into(),
                med: "Anchor categories are emerging.".into(),
                high: "Anchor categories are well established.".into(),
            },
            limitations: vec![
                "Retrospective affirmation drifts with current mood.".into(),
                "Absence of a flag is not evidence a purchase wasn't worth it.".into(),
            ],
            citations: vec![
                "dunn-gilbert-wilson-2011".into(),
                "kahneman-deaton-2010".into(),
            ],
            validation_plan: vec![
                "Unflagged and false-flagged purchases never qualify.".into(),
            ],
            changelog: vec![entry("1.0.0", "2026-04-02", "Initial release.")],
        },
        IndexSpecification {
            id: "unlinked_share".into(),
            name: "Unlinked Share".into(),
            schema_version: SCHEMA_VERSION,
            question: "How much of my spending has no mood context at all?".into(),
            construct: "Coverage of the mood-link layer itself".into(),
            inputs: vec!["linked financial records".into()],
            matching_rule: "Counts every transaction; value thresholds play no part.".into(),
            formula: "Unlinked transactions divided by all transactions; direct and inferred \
                      shares reported alongside."
                .into(),
            unit: "percent of transactions".into(),
            normalization: "Absolute scale: a coverage ratio, comparable across datasets."
                .into(),
            min_data: "Any transaction count; the share is always computable.".into(),
            confidence: ConfidenceSpec {
                mapping_function: "Global dataset confidence applied to the coverage figure."
                    .into(),
                low: "Coverage figure itself rests on little data.".into(),
                med: "Coverage figure is roughly right.".into(),
                high: "Coverage figure is dependable.".into(),
            },
            limitations: vec![
                "Says nothing about the quality of the links that do exist.".into(),
            ],
            citations: vec!["robinson-clore-2002".into()],
            validation_plan: vec![
                "Direct, inferred, and unlinked counts always sum to the transaction count."
                    .into(),
            ],
            changelog: vec![entry("1.0.0", "2026-04-02", "Initial release.")],
        },
    ]
}
