

pub mod core;
pub mod explorer;
pub mod export;
pub mod knowledge;
pub mod llm;
pub mod utils;

pub use utils::{safe_truncate, safe_truncate_ellipsis};


pub use crate::core::config::ScoutConfig;
pub use crate::core::error::{Result, ScoutError};
pub use explorer::{CrawlController, CrawlReport, CrawlStatus, Frontier, RediscoveryPolicy};
pub use knowledge::{KnowledgeBase, LegalCatalogue, TopicCatalogue, WikipediaClient};
pub use llm::embeddings::{EmbeddingGenerator, EmbeddingProvider};


pub const DEFAULT_WIKI_API_URL: &str = "https://en.wikipedia.org/w/api.php";


pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";


pub const DEFAULT_EMBEDDING_MODEL: &str = "all-minilm";


pub const DEFAULT_REQUESTS_LIMIT: usize = 6500;


pub const DEFAULT_MAX_DEPTH: u32 = 3;


pub const DEFAULT_TOP_N: usize = 5000;


pub const DEFAULT_CACHE_SIZE: usize = 1000;
