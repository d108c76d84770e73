use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;

use thiserror::Error;
use tracing::{info, warn};

use super::base::TopicCatalogue;

const NAME_COLUMN: &str = "page_name";
const QUALITY_COLUMN: &str = "wikirank_quality";


#[derive(Debug, Error)]
pub enum CatalogueError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Catalogue is empty")]
    Empty,
    #[error("Missing column: {0}")]
    MissingColumn(String),
}


/// Page-name to quality-score table, loaded once from a TSV export.
#[derive(Debug, Default, Clone)]
pub struct LegalCatalogue {
    scores: HashMap<String, f64>,
}

impl LegalCatalogue {

    pub fn load(path: &Path) -> Result<Self, CatalogueError> {
        let file = std::fs::File::open(path)?;
        let catalogue = Self::from_reader(std::io::BufReader::new(file))?;
        info!("Loaded {} catalogue entries from {}", catalogue.len(), path.display());
        Ok(catalogue)
    }


    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, CatalogueError> {
        let mut lines = reader.lines();
        let header = lines.next().ok_or(CatalogueError::Empty)??;
        let columns: Vec<&str> = header.split('\t').map(str::trim).collect();

        let name_idx = columns
            .iter()
            .position(|c| *c == NAME_COLUMN)
            .ok_or_else(|| CatalogueError::MissingColumn(NAME_COLUMN.to_string()))?;
        let quality_idx = columns
            .iter()
            .position(|c| *c == QUALITY_COLUMN)
            .or_else(|| (0..columns.len()).find(|i| *i != name_idx))
            .ok_or_else(|| CatalogueError::MissingColumn(QUALITY_COLUMN.to_string()))?;

        let mut scores = HashMap::new();
        let mut malformed = 0usize;
        for line in lines {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let cells: Vec<&str> = line.split('\t').collect();
            let Some(name) = cells.get(name_idx).map(|n| n.trim()).filter(|n| !n.is_empty()) else {
                malformed += 1;
                continue;
            };
            let quality = match cells.get(quality_idx).and_then(|q| q.trim().parse::<f64>().ok()) {
                Some(q) => q,
                None => {
                    malformed += 1;
                    0.0
                }
            };
            scores.insert(name.to_string(), quality);
        }

        if malformed > 0 {
            warn!("{} catalogue rows had missing or malformed cells", malformed);
        }

        Ok(Self { scores })
    }


    pub fn from_scores<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        Self {
            scores: entries.into_iter().map(|(n, q)| (n.into(), q)).collect(),
        }
    }


    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_scores(names.into_iter().map(|n| (n, 0.0)))
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

impl TopicCatalogue for LegalCatalogue {
    fn is_known_legal(&self, name: &str) -> bool {
        self.scores.contains_key(name)
    }

    fn quality(&self, name: &str) -> Option<f64> {
        self.scores.get(name).copied()
    }
}
