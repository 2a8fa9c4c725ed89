use std::cmp::Ordering;

use tracing::debug;

use crate::config::SimilaritySettings;
use crate::models::{builtin_corpus, CorpusDocument, ScoredHit};
use crate::utils::{cosine_similarity, jaccard_similarity};

/// Ranks a small fixed corpus against free-text queries and answers
/// phrase-similarity questions for the demos.
#[derive(Clone)]
pub struct RetrievalService {
    corpus: Vec<CorpusDocument>,
    settings: SimilaritySettings,
}

impl RetrievalService {
    pub fn new(settings: SimilaritySettings) -> Self {
        Self::with_corpus(builtin_corpus(), settings)
    }

    pub fn with_corpus(corpus: Vec<CorpusDocument>, settings: SimilaritySettings) -> Self {
        Self { corpus, settings }
    }

    pub fn corpus(&self) -> &[CorpusDocument] {
        &self.corpus
    }

    /// Scores every document by token overlap with the query and returns the
    /// best `top_k`. The sort is stable, so equal scores keep corpus order;
    /// a `top_k` beyond the corpus just returns everything.
    pub fn rank(&self, query: &str, top_k: usize) -> Vec<ScoredHit> {
        let mut hits: Vec<ScoredHit> = self
            .corpus
            .iter()
            .map(|document| ScoredHit {
                document: document.clone(),
                score: jaccard_similarity(query, &document.body),
            })
            .collect();

        hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        hits.truncate(top_k);

        debug!(query, hits = hits.len(), "ranked corpus");
        hits
    }

    /// Character n-gram cosine between two phrases, with the configured
    /// window length.
    pub fn phrase_similarity(&self, a: &str, b: &str) -> f64 {
        cosine_similarity(a, b, self.settings.ngram_len)
    }

    /// Whether two phrasings are near duplicates under the configured cosine
    /// threshold.
    pub fn near_duplicate(&self, a: &str, b: &str) -> bool {
        self.phrase_similarity(a, b) > self.settings.cosine_threshold
    }
}
