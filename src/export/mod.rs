

pub mod dataset;
pub mod diversity;

use thiserror::Error;

pub use dataset::{DatasetExporter, DatasetRecord, DatasetScores, ExportSummary};
pub use diversity::DiversityScores;


#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Page '{0}' not found in fetched pages")]
    MissingPage(String),

    #[error("Titles missing from the catalogue: {0:?}")]
    Uncatalogued(Vec<String>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
