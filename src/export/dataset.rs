use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::diversity::{diversity_scores, DiversityScores};
use super::ExportError;
use crate::explorer::RetrievedPage;
use crate::knowledge::TopicCatalogue;
use crate::llm::EmbeddingProvider;

const DATASET_FILE: &str = "dataset.json";
const SCORES_FILE: &str = "scores.json";
const EMBED_CONCURRENCY: usize = 4;


#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetRecord {
    pub title: String,
    pub content: String,
    pub url: String,
    pub links: Vec<String>,
    pub categories: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub embedding: Vec<f32>,
}


#[derive(Debug, Clone, Serialize)]
pub struct DatasetScores {
    pub dataset_size: usize,
    pub catalogue_quality: f64,
    pub diversity: DiversityScores,
    pub final_score: f64,
    pub generated_at: DateTime<Utc>,
}


#[derive(Debug, Clone)]
pub struct ExportSummary {
    pub dataset_path: PathBuf,
    pub scores_path: PathBuf,
    pub scores: DatasetScores,
}


/// Resolves top-set titles back to fetched pages. Records carry the name the
/// page was discovered under, which is what the catalogue knows.
pub fn build_records(
    titles: &[String],
    pages: &[RetrievedPage],
) -> Result<Vec<DatasetRecord>, ExportError> {
    let mut by_title: HashMap<&str, &RetrievedPage> = HashMap::new();
    for page in pages {
        by_title.entry(page.title()).or_insert(page);
    }

    titles
        .iter()
        .map(|title| {
            let page = by_title
                .get(title.as_str())
                .ok_or_else(|| ExportError::MissingPage(title.clone()))?;
            Ok(DatasetRecord {
                title: page.name.clone(),
                content: page.content.body.clone(),
                url: page.content.url.clone(),
                links: page.content.links.clone(),
                categories: page.content.categories.clone(),
                embedding: Vec::new(),
            })
        })
        .collect()
}


pub fn catalogue_quality(
    records: &[DatasetRecord],
    catalogue: &dyn TopicCatalogue,
) -> Result<f64, ExportError> {
    if records.is_empty() {
        return Ok(0.0);
    }
    let mut missing = Vec::new();
    let mut total = 0.0;
    for record in records {
        match catalogue.quality(&record.title) {
            Some(q) => total += q,
            None => missing.push(record.title.clone()),
        }
    }
    if !missing.is_empty() {
        return Err(ExportError::Uncatalogued(missing));
    }
    Ok(total / records.len() as f64)
}


pub struct DatasetExporter {
    embedder: Arc<dyn EmbeddingProvider>,
    catalogue: Arc<dyn TopicCatalogue>,
    output_dir: PathBuf,
}

impl DatasetExporter {
    pub fn new(
        embedder: Arc<dyn EmbeddingProvider>,
        catalogue: Arc<dyn TopicCatalogue>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            embedder,
            catalogue,
            output_dir: output_dir.into(),
        }
    }

    /// Embeds record contents in place. Records whose embedding fails keep
    /// an empty vector and are left out of semantic diversity.
    pub async fn embed_records(&self, records: &mut [DatasetRecord]) {
        let embedder = &self.embedder;
        let embeddings: Vec<Option<Vec<f32>>> = stream::iter(records.iter())
            .map(|record| async move {
                match embedder.embed(&record.content).await {
                    Ok(embedding) => Some(embedding),
                    Err(e) => {
                        warn!("Embedding failed for '{}': {}", record.title, e);
                        None
                    }
                }
            })
            .buffered(EMBED_CONCURRENCY)
            .collect()
            .await;

        for (record, embedding) in records.iter_mut().zip(embeddings) {
            record.embedding = embedding.unwrap_or_default();
        }
    }


    pub fn score(&self, records: &[DatasetRecord]) -> Result<DatasetScores, ExportError> {
        let documents: Vec<&str> = records.iter().map(|r| r.content.as_str()).collect();
        let embeddings: Vec<Vec<f32>> = records
            .iter()
            .filter(|r| !r.embedding.is_empty())
            .map(|r| r.embedding.clone())
            .collect();
        let categories: Vec<Vec<String>> = records.iter().map(|r| r.categories.clone()).collect();

        let diversity = diversity_scores(&documents, &embeddings, &categories);
        let catalogue_quality = catalogue_quality(records, self.catalogue.as_ref())?;

        Ok(DatasetScores {
            dataset_size: records.len(),
            catalogue_quality,
            diversity,
            final_score: (catalogue_quality + 100.0 * diversity.overall) / 2.0,
            generated_at: Utc::now(),
        })
    }


    pub async fn export(
        &self,
        titles: &[String],
        pages: &[RetrievedPage],
    ) -> Result<ExportSummary, ExportError> {
        let mut records = build_records(titles, pages)?;
        self.embed_records(&mut records).await;
        let scores = self.score(&records)?;

        tokio::fs::create_dir_all(&self.output_dir).await?;
        let dataset_path = self.output_dir.join(DATASET_FILE);
        let scores_path = self.output_dir.join(SCORES_FILE);
        write_json(&dataset_path, &records).await?;
        write_json(&scores_path, &scores).await?;

        info!(
            "Exported {} records to {} (final score {:.2})",
            records.len(),
            dataset_path.display(),
            scores.final_score
        );

        Ok(ExportSummary {
            dataset_path,
            scores_path,
            scores,
        })
    }
}

async fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), ExportError> {
    let bytes = serde_json::to_vec_pretty(value)?;
    tokio::fs::write(path, bytes).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::explorer::testing::{FakeEmbedder, catalogue};
    use crate::knowledge::{LegalCatalogue, PageContent};

    fn page(name: &str, title: &str, categories: &[&str]) -> RetrievedPage {
        RetrievedPage {
            name: name.to_string(),
            depth: 0,
            content: PageContent {
                title: title.to_string(),
                body: format!("{} body text", title),
                url: format!("https://example.org/{}", title),
                links: vec!["Other".to_string()],
                categories: categories.iter().map(|c| c.to_string()).collect(),
            },
        }
    }

    #[test]
    fn test_build_records_uses_discovered_name() {
        let pages = vec![page("Maths", "Mathematics", &["Fields"]), page("Physics", "Physics", &[])];
        let records = build_records(&["Mathematics".to_string()], &pages).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Maths");
        assert_eq!(records[0].categories, vec!["Fields"]);
    }

    #[test]
    fn test_build_records_missing_title() {
        let result = build_records(&["Nope".to_string()], &[]);
        assert!(matches!(result, Err(ExportError::MissingPage(t)) if t == "Nope"));
    }

    #[test]
    fn test_catalogue_quality() {
        let pages = vec![page("A", "A", &[]), page("B", "B", &[])];
        let records = build_records(&["A".to_string(), "B".to_string()], &pages).unwrap();

        let scored = LegalCatalogue::from_scores([("A", 40.0), ("B", 60.0)]);
        assert!((catalogue_quality(&records, &scored).unwrap() - 50.0).abs() < 1e-9);

        let partial = LegalCatalogue::from_scores([("A", 40.0)]);
        assert!(matches!(
            catalogue_quality(&records, &partial),
            Err(ExportError::Uncatalogued(m)) if m == vec!["B".to_string()]
        ));
    }

    #[tokio::test]
    async fn test_export_writes_files() {
        let dir = std::env::temp_dir().join(format!("wikiscout-export-{}", uuid::Uuid::new_v4()));
        let embedder = FakeEmbedder::default()
            .with("A body text", vec![1.0, 0.0])
            .with("B body text", vec![0.0, 1.0]);
        let exporter = DatasetExporter::new(
            Arc::new(embedder),
            Arc::new(LegalCatalogue::from_scores([("A", 80.0), ("B", 20.0)])),
            &dir,
        );
        let pages = vec![page("A", "A", &["X"]), page("B", "B", &["Y"])];

        let summary = exporter
            .export(&["A".to_string(), "B".to_string()], &pages)
            .await
            .unwrap();

        assert_eq!(summary.scores.dataset_size, 2);
        assert!((summary.scores.catalogue_quality - 50.0).abs() < 1e-9);
        assert!((summary.scores.diversity.semantic - 1.0).abs() < 1e-6);
        assert!((summary.scores.diversity.category - 1.0).abs() < 1e-9);

        let written: Vec<DatasetRecord> =
            serde_json::from_slice(&std::fs::read(&summary.dataset_path).unwrap()).unwrap();
        assert_eq!(written.len(), 2);
        assert_eq!(written[0].embedding, vec![1.0, 0.0]);
        assert!(summary.scores_path.exists());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn test_failed_embedding_left_empty() {
        let exporter = DatasetExporter::new(
            Arc::new(FakeEmbedder::default().failing("A body text")),
            Arc::new(catalogue(&["A"])),
            std::env::temp_dir(),
        );
        let mut records = build_records(&["A".to_string()], &[page("A", "A", &[])]).unwrap();
        exporter.embed_records(&mut records).await;
        assert!(records[0].embedding.is_empty());
    }
}
