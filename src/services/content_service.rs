use anyhow::Result;
use tracing::info;

use crate::config::SimilaritySettings;
use crate::models::{builtin_track, QuizItem, Track, TrackContent};
use crate::utils::{collapse_whitespace, jaccard_similarity, tokenize};

/// How full a context window is after pasting some text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenWindowUsage {
    pub approx_tokens: usize,
    pub window: usize,
    pub percent: u32,
}

/// Serves the built-in curriculum (validated once at load) and the small
/// interactive checks the lessons run.
#[derive(Clone)]
pub struct ContentService {
    tracks: Vec<TrackContent>,
    settings: SimilaritySettings,
}

impl ContentService {
    pub fn load_builtin(settings: SimilaritySettings) -> Result<Self> {
        let mut tracks = Vec::with_capacity(Track::ALL.len());
        for track in Track::ALL {
            let content = builtin_track(track);
            content.validate_schema()?;
            tracks.push(content);
        }
        info!(tracks = tracks.len(), "loaded built-in curriculum");
        Ok(Self { tracks, settings })
    }

    pub fn track(&self, track: Track) -> &TrackContent {
        self.tracks
            .iter()
            .find(|content| content.track == track)
            .expect("all tracks are loaded at construction")
    }

    /// Ad hoc answer check: containment over collapsed lower-cased text,
    /// with token overlap as a fallback for paraphrased answers. No
    /// correctness guarantee beyond "good enough for a self-check".
    pub fn quiz_answer_matches(&self, item: &QuizItem, response: &str) -> bool {
        let expected = collapse_whitespace(&item.answer);
        let given = collapse_whitespace(response);
        let expected = expected.trim();
        let given = given.trim();

        if expected.is_empty() || given.is_empty() {
            return false;
        }
        if given.contains(expected) || expected.contains(given) {
            return true;
        }

        jaccard_similarity(&item.answer, response) >= self.settings.jaccard_threshold
    }

    /// Token-explorer estimate: word count scaled by 1.3, floored at one
    /// token, and the share of a context window that uses (capped at 100%).
    pub fn token_window_usage(&self, text: &str, window: usize) -> TokenWindowUsage {
        let window = window.max(1);
        let words = tokenize(text).len();
        let approx_tokens = ((words as f64 * 1.3).round() as usize).max(1);
        let percent = ((approx_tokens as f64 / window as f64) * 100.0).round() as u32;

        TokenWindowUsage {
            approx_tokens,
            window,
            percent: percent.min(100),
        }
    }
}
