use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;


#[derive(Error, Debug)]
pub enum SearchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Search timed out")]
    Timeout,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}


#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Remote call failed: {0}")]
    Remote(String),

    #[error("Fetch timed out")]
    Timeout,

    #[error("Page has no content: {0}")]
    EmptyContent(String),

    /// The name was never discovered or is not on the allow-list.
    #[error("Illegal request: {0}")]
    IllegalRequest(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else {
            Self::Remote(e.to_string())
        }
    }
}


#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageContent {
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub url: String,
    pub links: Vec<String>,
    pub categories: Vec<String>,
}

impl PageContent {
    pub fn is_empty(&self) -> bool {
        self.body.trim().is_empty()
    }
}


/// Remote hyperlinked knowledge base. One call to either method is one
/// unit of request budget; implementations never retry.
#[async_trait]
pub trait KnowledgeBase: Send + Sync {

    async fn search(&self, query: &str) -> Result<Vec<String>, SearchError>;


    async fn fetch(&self, name: &str) -> Result<PageContent, FetchError>;
}


#[async_trait]
impl KnowledgeBase for Arc<dyn KnowledgeBase> {
    async fn search(&self, query: &str) -> Result<Vec<String>, SearchError> {
        (**self).search(query).await
    }

    async fn fetch(&self, name: &str) -> Result<PageContent, FetchError> {
        (**self).fetch(name).await
    }
}


/// Static allow-list of page names that may be admitted and fetched.
pub trait TopicCatalogue: Send + Sync {

    fn is_known_legal(&self, name: &str) -> bool;


    fn quality(&self, name: &str) -> Option<f64>;
}
