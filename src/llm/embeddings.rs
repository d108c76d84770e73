use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use lru::LruCache;
use parking_lot::Mutex;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};


#[derive(Error, Debug)]
pub enum EmbeddingError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Empty text")]
    EmptyText,

    #[error("Provider not implemented: {0}")]
    NotImplemented(String),
}


/// Turns a piece of text into a fixed-length vector. Callers normalize.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {

    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;


    fn model_name(&self) -> &str;
}


#[async_trait]
impl EmbeddingProvider for Arc<dyn EmbeddingProvider> {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        (**self).embed(text).await
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }
}


#[derive(Serialize)]
struct OllamaEmbeddingRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

#[derive(Deserialize)]
struct OllamaEmbeddingResponse {
    embedding: Vec<f32>,
}

#[derive(Serialize)]
struct OpenAIEmbeddingRequest<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Deserialize)]
struct OpenAIEmbeddingResponse {
    data: Vec<OpenAIEmbeddingData>,
}

#[derive(Deserialize)]
struct OpenAIEmbeddingData {
    embedding: Vec<f32>,
}


pub struct EmbeddingGenerator {
    provider: String,
    url: String,
    model: String,
    api_key: Option<String>,
    client: Client,
    cache: Mutex<LruCache<String, Vec<f32>>>,
}

impl EmbeddingGenerator {

    pub fn new(
        provider: impl Into<String>,
        url: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
        timeout_secs: u64,
        cache_size: usize,
    ) -> Result<Self, EmbeddingError> {
        let provider = provider.into().to_lowercase();
        let model = model.into();
        let capacity = NonZeroUsize::new(cache_size).unwrap_or(NonZeroUsize::MIN);

        info!(
            "EmbeddingGenerator initialized: provider={}, model={}, cache={}",
            provider, model, capacity
        );

        Ok(Self {
            provider,
            url: url.into().trim_end_matches('/').to_string(),
            model,
            api_key,
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()?,
            cache: Mutex::new(LruCache::new(capacity)),
        })
    }


    pub fn from_config(config: &crate::ScoutConfig) -> Result<Self, EmbeddingError> {
        Self::new(
            config.embedding_provider.clone(),
            config.embedding_url.clone(),
            config.embedding_model.clone(),
            config.embedding_api_key.clone(),
            config.timeout,
            config.embedding_cache_size,
        )
    }

    async fn generate_ollama(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let request = OllamaEmbeddingRequest {
            model: &self.model,
            prompt: text,
        };

        let response = self
            .client
            .post(format!("{}/api/embeddings", self.url))
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json::<OllamaEmbeddingResponse>()
            .await?;

        Ok(response.embedding)
    }

    async fn generate_openai(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| EmbeddingError::InvalidResponse("API key required".to_string()))?;

        let request = OpenAIEmbeddingRequest {
            model: &self.model,
            input: text,
        };

        let response = self
            .client
            .post(format!("{}/embeddings", self.url))
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json::<OpenAIEmbeddingResponse>()
            .await?;

        response
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| EmbeddingError::InvalidResponse("No embedding in response".to_string()))
    }


    pub fn cache_size(&self) -> usize {
        self.cache.lock().len()
    }


    pub fn provider(&self) -> &str {
        &self.provider
    }
}

#[async_trait]
impl EmbeddingProvider for EmbeddingGenerator {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        if text.trim().is_empty() {
            return Err(EmbeddingError::EmptyText);
        }

        if let Some(cached) = self.cache.lock().get(text) {
            debug!("Cache HIT for: {}", crate::safe_truncate(text, 50));
            return Ok(cached.clone());
        }

        let embedding = match self.provider.as_str() {
            "ollama" => self.generate_ollama(text).await?,
            "openai" => self.generate_openai(text).await?,
            other => return Err(EmbeddingError::NotImplemented(other.to_string())),
        };

        if embedding.is_empty() {
            return Err(EmbeddingError::InvalidResponse("empty embedding".to_string()));
        }

        self.cache.lock().put(text.to_string(), embedding.clone());
        Ok(embedding)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generator(provider: &str) -> EmbeddingGenerator {
        EmbeddingGenerator::new(provider, "http://localhost:11434/", "nomic-embed-text", None, 5, 8)
            .unwrap()
    }

    #[test]
    fn test_generator_normalizes_settings() {
        let generator = generator("Ollama");
        assert_eq!(generator.provider(), "ollama");
        assert_eq!(generator.url, "http://localhost:11434");
        assert_eq!(generator.model_name(), "nomic-embed-text");
        assert_eq!(generator.cache_size(), 0);
    }

    #[tokio::test]
    async fn test_empty_text_rejected() {
        let generator = generator("ollama");
        assert!(matches!(generator.embed("   ").await, Err(EmbeddingError::EmptyText)));
    }

    #[tokio::test]
    async fn test_unknown_provider() {
        let generator = generator("cohere");
        assert!(matches!(
            generator.embed("Mathematics").await,
            Err(EmbeddingError::NotImplemented(p)) if p == "cohere"
        ));
    }

    #[tokio::test]
    async fn test_openai_requires_key() {
        let generator = generator("openai");
        assert!(matches!(
            generator.embed("Mathematics").await,
            Err(EmbeddingError::InvalidResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_cache_hit_skips_provider() {
        let generator = generator("cohere");
        generator.cache.lock().put("Physics".to_string(), vec![1.0, 0.0]);
        assert_eq!(generator.embed("Physics").await.unwrap(), vec![1.0, 0.0]);
    }
}
