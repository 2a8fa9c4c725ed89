use serde::{Deserialize, Serialize};

/// A reference passage for the mini retrieval demo. Loaded once at startup
/// and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusDocument {
    pub id: String,
    pub title: String,
    pub body: String,
}

impl CorpusDocument {
    pub fn new(id: &str, title: &str, body: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            body: body.to_string(),
        }
    }
}

/// One retrieval result; produced per query, never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredHit {
    pub document: CorpusDocument,
    pub score: f64,
}

/// The four built-in passages the foundations lesson searches over.
pub fn builtin_corpus() -> Vec<CorpusDocument> {
    vec![
        CorpusDocument::new(
            "a",
            "Brook trout habitat",
            "Cold, shaded streams with dissolved oxygen and groundwater inputs.",
        ),
        CorpusDocument::new(
            "b",
            "Grant timeline",
            "Outline roles, milestones, and a clear budget with community partners.",
        ),
        CorpusDocument::new(
            "c",
            "Sensors and alerts",
            "Conductivity spikes may indicate road salt or discharge; verify in field.",
        ),
        CorpusDocument::new(
            "d",
            "Mapping with care",
            "Buffer sensitive sites and consider hex binning on public maps.",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_corpus_has_four_unique_ids() {
        let corpus = builtin_corpus();
        assert_eq!(corpus.len(), 4);
        let mut ids: Vec<&str> = corpus.iter().map(|d| d.id.as_str()).collect();
        ids.dedup();
        assert_eq!(ids.len(), 4);
    }
}
