use std::collections::hash_map::DefaultHasher;
use std::collections::{HashMap, HashSet};
use std::hash::{Hash, Hasher};

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::knowledge::{FetchError, KnowledgeBase, LegalCatalogue, PageContent, SearchError};
use crate::llm::{EmbeddingError, EmbeddingProvider};

const FAKE_DIMS: usize = 32;


pub fn catalogue(names: &[&str]) -> LegalCatalogue {
    LegalCatalogue::from_names(names.iter().copied())
}


#[derive(Default)]
pub struct FakeEmbedder {
    vectors: HashMap<String, Vec<f32>>,
    failing: HashSet<String>,
}

impl FakeEmbedder {
    pub fn with(mut self, name: &str, vector: Vec<f32>) -> Self {
        self.vectors.insert(name.to_string(), vector);
        self
    }

    pub fn failing(mut self, name: &str) -> Self {
        self.failing.insert(name.to_string());
        self
    }
}

// Pseudo-random but stable vector per name, so unrelated names are far apart.
fn hashed_vector(text: &str) -> Vec<f32> {
    (0..FAKE_DIMS)
        .map(|i| {
            let mut hasher = DefaultHasher::new();
            (text, i).hash(&mut hasher);
            (hasher.finish() % 2001) as f32 / 1000.0 - 1.0
        })
        .collect()
}

#[async_trait]
impl EmbeddingProvider for FakeEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        if self.failing.contains(text) {
            return Err(EmbeddingError::InvalidResponse("fake failure".to_string()));
        }
        Ok(self
            .vectors
            .get(text)
            .cloned()
            .unwrap_or_else(|| hashed_vector(text)))
    }

    fn model_name(&self) -> &str {
        "fake"
    }
}


/// Scripted knowledge base. Unscripted searches return nothing; unscripted
/// fetches fail remotely.
#[derive(Default)]
pub struct FakeKnowledgeBase {
    searches: HashMap<String, Vec<String>>,
    failing_searches: HashSet<String>,
    pages: HashMap<String, PageContent>,
    illegal: HashSet<String>,
    empty: HashSet<String>,
    pub search_log: Mutex<Vec<String>>,
    pub fetch_log: Mutex<Vec<String>>,
}

impl FakeKnowledgeBase {
    pub fn search_result(mut self, query: &str, names: &[&str]) -> Self {
        self.searches
            .insert(query.to_string(), names.iter().map(|n| n.to_string()).collect());
        self
    }

    pub fn failing_search(mut self, query: &str) -> Self {
        self.failing_searches.insert(query.to_string());
        self
    }

    pub fn page(mut self, name: &str, links: &[&str]) -> Self {
        self.pages.insert(
            name.to_string(),
            PageContent {
                title: name.to_string(),
                body: format!("{} is a topic. ", name).repeat(20),
                url: format!("https://example.org/wiki/{}", name.replace(' ', "_")),
                links: links.iter().map(|l| l.to_string()).collect(),
                categories: vec![format!("{} topics", name)],
            },
        );
        self
    }

    pub fn illegal(mut self, name: &str) -> Self {
        self.illegal.insert(name.to_string());
        self
    }

    pub fn empty(mut self, name: &str) -> Self {
        self.empty.insert(name.to_string());
        self
    }

    pub fn fetched(&self) -> Vec<String> {
        self.fetch_log.lock().clone()
    }
}

#[async_trait]
impl KnowledgeBase for FakeKnowledgeBase {
    async fn search(&self, query: &str) -> Result<Vec<String>, SearchError> {
        self.search_log.lock().push(query.to_string());
        if self.failing_searches.contains(query) {
            return Err(SearchError::Timeout);
        }
        Ok(self.searches.get(query).cloned().unwrap_or_default())
    }

    async fn fetch(&self, name: &str) -> Result<PageContent, FetchError> {
        self.fetch_log.lock().push(name.to_string());
        if self.illegal.contains(name) {
            return Err(FetchError::IllegalRequest(name.to_string()));
        }
        if self.empty.contains(name) {
            return Ok(PageContent {
                title: name.to_string(),
                ..PageContent::default()
            });
        }
        self.pages
            .get(name)
            .cloned()
            .ok_or_else(|| FetchError::Remote(format!("no page {}", name)))
    }
}
