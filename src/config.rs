use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub similarity: SimilaritySettings,
    pub storage: StorageSettings,
    pub workbench: WorkbenchSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilaritySettings {
    /// N-gram window length for the character cosine measure.
    pub ngram_len: usize,
    /// Cosine score above which two phrases count as near duplicates.
    /// Chosen empirically; configurable rather than derived.
    pub cosine_threshold: f64,
    /// Jaccard overlap accepted as a "close enough" quiz answer.
    pub jaccard_threshold: f64,
    /// How many retrieval hits the demos show.
    pub top_k: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Path to the sqlite state file. Empty string selects the in-memory
    /// backend.
    pub sqlite_path: String,
    pub memory_cache_entries: usize,
    /// Memory entry TTL in seconds; 0 means entries never expire.
    pub memory_ttl_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkbenchSettings {
    pub ph_threshold: f64,
    pub min_consecutive: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            similarity: SimilaritySettings {
                ngram_len: 3,
                cosine_threshold: 0.35,
                jaccard_threshold: 0.3,
                top_k: 2,
            },
            storage: StorageSettings {
                sqlite_path: String::new(),
                memory_cache_entries: 256,
                memory_ttl_seconds: 0,
            },
            workbench: WorkbenchSettings {
                ph_threshold: 7.6,
                min_consecutive: 2,
            },
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();

        let mut config = Config::default();

        // Similarity configuration
        if let Ok(ngram_len) = env::var("NGRAM_LEN") {
            config.similarity.ngram_len = ngram_len.parse()?;
        }
        if let Ok(cosine_threshold) = env::var("COSINE_THRESHOLD") {
            config.similarity.cosine_threshold = cosine_threshold.parse()?;
        }
        if let Ok(jaccard_threshold) = env::var("JACCARD_THRESHOLD") {
            config.similarity.jaccard_threshold = jaccard_threshold.parse()?;
        }
        if let Ok(top_k) = env::var("TOP_K") {
            config.similarity.top_k = top_k.parse()?;
        }

        // Storage configuration
        if let Ok(sqlite_path) = env::var("SQLITE_PATH") {
            config.storage.sqlite_path = sqlite_path;
        }
        if let Ok(memory_cache_entries) = env::var("MEMORY_CACHE_ENTRIES") {
            config.storage.memory_cache_entries = memory_cache_entries.parse()?;
        }
        if let Ok(memory_ttl_seconds) = env::var("MEMORY_TTL_SECONDS") {
            config.storage.memory_ttl_seconds = memory_ttl_seconds.parse()?;
        }

        // Workbench configuration
        if let Ok(ph_threshold) = env::var("PH_THRESHOLD") {
            config.workbench.ph_threshold = ph_threshold.parse()?;
        }
        if let Ok(min_consecutive) = env::var("MIN_CONSECUTIVE") {
            config.workbench.min_consecutive = min_consecutive.parse()?;
        }

        Ok(config)
    }
}
