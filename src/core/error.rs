use thiserror::Error;

use crate::explorer::FrontierError;
use crate::export::ExportError;
use crate::knowledge::CatalogueError;
use crate::llm::embeddings::EmbeddingError;


#[derive(Error, Debug)]
pub enum ScoutError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Catalogue error: {0}")]
    Catalogue(#[from] CatalogueError),

    /// A fetch was attempted for a name the explorer never discovered or
    /// the catalogue does not allow. Always a bug in the caller.
    #[error("Illegal request: {0}")]
    IllegalRequest(String),

    #[error("Frontier error: {0}")]
    Frontier(#[from] FrontierError),

    #[error("Embedding generation error: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}


pub type Result<T> = std::result::Result<T, ScoutError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{EmbeddingGenerator, EmbeddingProvider};

    fn setup_catalogue() -> Result<crate::LegalCatalogue> {
        Ok(crate::LegalCatalogue::load(std::path::Path::new("/nonexistent/wikiscout/en.tsv"))?)
    }

    #[test]
    fn test_catalogue_error_converts() {
        let Err(err) = setup_catalogue() else {
            panic!("missing catalogue file loaded");
        };
        assert!(matches!(err, ScoutError::Catalogue(CatalogueError::Io(_))));
        assert!(err.to_string().starts_with("Catalogue error"));
    }

    #[tokio::test]
    async fn test_embedding_error_converts() {
        let mut config = crate::ScoutConfig::default();
        config.embedding_provider = "unknown".to_string();
        let generator = EmbeddingGenerator::from_config(&config).unwrap();

        let result: Result<Vec<f32>> = generator.embed("Algebra").await.map_err(ScoutError::from);
        assert!(matches!(
            result,
            Err(ScoutError::Embedding(EmbeddingError::NotImplemented(p))) if p == "unknown"
        ));
    }

    #[test]
    fn test_export_error_converts() {
        let err: ScoutError = ExportError::MissingPage("Algebra".to_string()).into();
        assert!(matches!(err, ScoutError::Export(ExportError::MissingPage(_))));
    }
}
