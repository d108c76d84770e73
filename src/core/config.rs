use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::error::{Result, ScoutError};
use crate::explorer::RediscoveryPolicy;


#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoutConfig {

    pub requests_limit: usize,
    pub max_depth: u32,
    pub top_n: usize,
    pub search_results: usize,
    pub rediscovery_policy: RediscoveryPolicy,
    /// Overrides the curated seed list when non-empty.
    pub seeds: Vec<String>,


    pub catalogue_path: PathBuf,
    pub output_dir: PathBuf,


    pub wiki_api_url: String,
    pub user_agent: String,
    pub timeout: u64,
    pub max_continuations: usize,


    pub embedding_provider: String,
    pub embedding_model: String,
    pub embedding_url: String,
    pub embedding_api_key: Option<String>,
    pub embedding_cache_size: usize,
}

impl ScoutConfig {

    pub fn new(requests_limit: usize, max_depth: u32, top_n: usize) -> Self {
        Self {
            requests_limit,
            max_depth,
            top_n,
            search_results: 10,
            rediscovery_policy: RediscoveryPolicy::default(),
            seeds: Vec::new(),

            catalogue_path: PathBuf::from("en.tsv"),
            output_dir: PathBuf::from("output"),

            wiki_api_url: crate::DEFAULT_WIKI_API_URL.to_string(),
            user_agent: format!("wikiscout/{}", env!("CARGO_PKG_VERSION")),
            timeout: 30,
            max_continuations: 10,

            embedding_provider: "ollama".to_string(),
            embedding_model: crate::DEFAULT_EMBEDDING_MODEL.to_string(),
            embedding_url: crate::DEFAULT_OLLAMA_URL.to_string(),
            embedding_api_key: None,
            embedding_cache_size: crate::DEFAULT_CACHE_SIZE,
        }
    }


    /// Layers an optional config file and `WIKISCOUT_*` environment
    /// variables over the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }
        let settings = builder
            .add_source(
                config::Environment::with_prefix("WIKISCOUT")
                    .prefix_separator("_")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| ScoutError::Config(e.to_string()))?;

        let config: Self = settings
            .try_deserialize()
            .map_err(|e| ScoutError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }


    pub fn validate(&self) -> Result<()> {
        if self.requests_limit == 0 {
            return Err(ScoutError::Config("requests_limit must be positive".to_string()));
        }
        if self.top_n == 0 {
            return Err(ScoutError::Config("top_n must be positive".to_string()));
        }
        if self.search_results == 0 {
            return Err(ScoutError::Config("search_results must be positive".to_string()));
        }
        Ok(())
    }


    pub fn seed_topics(&self) -> Vec<String> {
        if self.seeds.is_empty() {
            crate::explorer::seeds::default_seeds()
        } else {
            self.seeds.clone()
        }
    }
}

impl Default for ScoutConfig {
    fn default() -> Self {
        Self::new(
            crate::DEFAULT_REQUESTS_LIMIT,
            crate::DEFAULT_MAX_DEPTH,
            crate::DEFAULT_TOP_N,
        )
    }
}
