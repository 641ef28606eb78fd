//! Evidence catalog
//!
//! An immutable table of citation records referenced by index
//! specifications. The registry validates that every citation id a spec
//! declares resolves here; rendering the citations is a display-layer
//! concern.

use serde::{Deserialize, Serialize};

/// Where a citation comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    PeerReviewed,
    Book,
    WorkingPaper,
    Article,
}

/// A single citation record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Citation {
    pub id: &'static str,
    pub title: &'static str,
    pub authors: &'static str,
    pub year: u16,
    pub source_type: SourceType,
    pub url: &'static str,
}

/// The built-in evidence catalog
pub struct EvidenceCatalog {
    citations: Vec<Citation>,
}

impl EvidenceCatalog {
    pub fn builtin() -> Self {
        Self {
            citations: vec![
                Citation {
                    id: "rick-cryder-loewenstein-2008",
                    title: "Tightwads and Spendthrifts",
                    authors: "Rick, Cryder & Loewenstein",
                    year: 2008,
                    source_type: SourceType::PeerReviewed,
                    url: "https://doi.org/10.1086/523570",
                },
                Citation {
                    id: "cryder-lerner-gross-dahl-2008",
                    title: "Misery Is Not Miserly: Sad and Self-Focused Individuals Spend More",
                    authors: "Cryder, Lerner, Gross & Dahl",
                    year: 2008,
                    source_type: SourceType::PeerReviewed,
                    url: "https://doi.org/10.1111/j.1467-9280.2008.02118.x",
                },
                Citation {
                    id: "russell-1980-circumplex",
                    title: "A Circumplex Model of Affect",
                    authors: "Russell",
                    year: 1980,
                    source_type: SourceType::PeerReviewed,
                    url: "https://doi.org/10.1037/h0077714",
                },
                Citation {
                    id: "dunn-gilbert-wilson-2011",
                    title: "If Money Doesn't Make You Happy, Then You Probably Aren't Spending It Right",
                    authors: "Dunn, Gilbert & Wilson",
                    year: 2011,
                    source_type: SourceType::PeerReviewed,
                    url: "https://doi.org/10.1016/j.jcps.2011.02.002",
                },
                Citation {
                    id: "verplanken-herabadi-2001",
                    title: "Individual Differences in Impulse Buying Tendency",
                    authors: "Verplanken & Herabadi",
                    year: 2001,
                    source_type: SourceType::PeerReviewed,
                    url: "https://doi.org/10.1002/per.423",
                },
                Citation {
                    id: "baumeister-2002-selfcontrol",
                    title: "Yielding to Temptation: Self-Control Failure, Impulsive Purchasing, and Consumer Behavior",
                    authors: "Baumeister",
                    year: 2002,
                    source_type: SourceType::PeerReviewed,
                    url: "https://doi.org/10.1086/338209",
                },
                Citation {
                    id: "kahneman-deaton-2010",
                    title: "High Income Improves Evaluation of Life but Not Emotional Well-Being",
                    authors: "Kahneman & Deaton",
                    year: 2010,
                    source_type: SourceType::PeerReviewed,
                    url: "https://doi.org/10.1073/pnas.1011492107",
                },
                Citation {
                    id: "robinson-clore-2002",
                    title: "Belief and Feeling: Evidence for an Accessibility Model of Emotional Self-Report",
                    authors: "Robinson & Clore",
                    year: 2002,
                    source_type: SourceType::PeerReviewed,
                    url: "https://doi.org/10.1037/0033-2909.128.6.934",
                },
            ],
        }
    }

    /// Look up a citation by id
    pub fn get(&self, id: &str) -> Option<&Citation> {
        self.citations.iter().find(|c| c.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn all(&self) -> &[Citation] {
        &self.citations
    }
}
