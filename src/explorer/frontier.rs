use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};
use thiserror::Error;
use tracing::debug;

use super::novelty::{normalize, NoveltyIndex};
use super::ranking::name_rank;
use crate::knowledge::TopicCatalogue;
use crate::llm::{EmbeddingError, EmbeddingProvider};

const META_MARKERS: &[&str] = &["disambiguation", "outline"];
const LIST_PREFIX: &str = "List of";


#[derive(Debug, Error)]
pub enum FrontierError {
    #[error("Frontier exhausted: no pending candidates")]
    Exhausted,

    #[error("Embedding failed for '{name}': {source}")]
    Embedding {
        name: String,
        #[source]
        source: EmbeddingError,
    },
}


/// What happens to the cached weight when a pending name is linked again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, EnumString, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum RediscoveryPolicy {
    /// Recompute the weight from the updated link count.
    #[default]
    Recompute,
    /// Bump the link count only; the weight keeps its admission value.
    Stale,
}


#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum RejectReason {
    Retired,
    NotInCatalogue,
    MetaPage,
    ListPage,
}


#[derive(Debug, Clone, PartialEq)]
pub enum Admission {
    Admitted { novelty: f64, weight: f64 },
    Rediscovered { link_count: u32, weight: f64 },
    Rejected(RejectReason),
}


#[derive(Debug, Clone)]
pub struct Candidate {
    pub name: String,
    pub depth: u32,
    pub embedding: Arc<[f32]>,
    pub novelty: f64,
    pub weight: f64,
}


/// Static part of the admission filter. Pending/retired checks live on the
/// frontier itself.
pub fn reject_reason(name: &str, catalogue: &dyn TopicCatalogue) -> Option<RejectReason> {
    if !catalogue.is_known_legal(name) {
        return Some(RejectReason::NotInCatalogue);
    }
    let lower = name.to_lowercase();
    if META_MARKERS.iter().any(|m| lower.contains(m)) {
        return Some(RejectReason::MetaPage);
    }
    if name.starts_with(LIST_PREFIX) {
        return Some(RejectReason::ListPage);
    }
    None
}


pub fn candidate_weight(name: &str, depth: u32, novelty: f64, link_count: u32) -> f64 {
    name_rank(name, depth) * novelty / (1.0 + f64::from(link_count))
}


fn rediscover(
    candidate: &mut Candidate,
    link_counts: &mut HashMap<String, u32>,
    policy: RediscoveryPolicy,
) -> Admission {
    let count = link_counts.entry(candidate.name.clone()).or_insert(1);
    *count += 1;
    let link_count = *count;

    if policy == RediscoveryPolicy::Recompute {
        candidate.weight =
            candidate_weight(&candidate.name, candidate.depth, candidate.novelty, link_count);
    }

    Admission::Rediscovered {
        link_count,
        weight: candidate.weight,
    }
}


/// Pending candidates plus the state needed to admit and select them.
///
/// Candidates live in an arena in admission order; `pending` holds arena
/// slots that have not been selected yet, so a linear scan with a strict
/// comparison gives first-admitted-wins tie breaking.
pub struct Frontier {
    embedder: Arc<dyn EmbeddingProvider>,
    catalogue: Arc<dyn TopicCatalogue>,
    policy: RediscoveryPolicy,
    index: NoveltyIndex,
    arena: Vec<Option<Candidate>>,
    pending: Vec<usize>,
    slots: HashMap<String, usize>,
    link_counts: HashMap<String, u32>,
    retired: HashSet<String>,
}

impl Frontier {
    pub fn new(
        embedder: Arc<dyn EmbeddingProvider>,
        catalogue: Arc<dyn TopicCatalogue>,
        policy: RediscoveryPolicy,
    ) -> Self {
        Self {
            embedder,
            catalogue,
            policy,
            index: NoveltyIndex::new(),
            arena: Vec::new(),
            pending: Vec::new(),
            slots: HashMap::new(),
            link_counts: HashMap::new(),
            retired: HashSet::new(),
        }
    }


    pub async fn admit(&mut self, name: &str, depth: u32) -> Result<Admission, FrontierError> {
        if self.retired.contains(name) {
            return Ok(Admission::Rejected(RejectReason::Retired));
        }

        let pending = self.slots.get(name).and_then(|&slot| self.arena[slot].as_mut());
        if let Some(candidate) = pending {
            return Ok(rediscover(candidate, &mut self.link_counts, self.policy));
        }

        if let Some(reason) = reject_reason(name, self.catalogue.as_ref()) {
            debug!("Rejected '{}': {}", name, <&str>::from(reason));
            return Ok(Admission::Rejected(reason));
        }

        let mut embedding = self
            .embedder
            .embed(name)
            .await
            .map_err(|source| FrontierError::Embedding {
                name: name.to_string(),
                source,
            })?;
        normalize(&mut embedding);
        let embedding: Arc<[f32]> = embedding.into();

        let novelty = self.index.score_and_insert(Arc::clone(&embedding));
        let link_count = 1;
        let weight = candidate_weight(name, depth, novelty, link_count);

        let slot = self.arena.len();
        self.arena.push(Some(Candidate {
            name: name.to_string(),
            depth,
            embedding,
            novelty,
            weight,
        }));
        self.pending.push(slot);
        self.slots.insert(name.to_string(), slot);
        self.link_counts.insert(name.to_string(), link_count);

        debug!(
            "Admitted '{}' depth={} novelty={:.3} weight={:.3}",
            crate::safe_truncate_ellipsis(name, 60),
            depth,
            novelty,
            weight
        );
        Ok(Admission::Admitted { novelty, weight })
    }

    /// Removes and returns the highest-weight pending candidate. The name is
    /// retired immediately, whatever the outcome of its fetch.
    pub fn select_best(&mut self) -> Result<Candidate, FrontierError> {
        let mut best: Option<(usize, f64)> = None;
        for (position, &slot) in self.pending.iter().enumerate() {
            let Some(candidate) = self.arena[slot].as_ref() else {
                continue;
            };
            match best {
                Some((_, weight)) if candidate.weight <= weight => {}
                _ => best = Some((position, candidate.weight)),
            }
        }

        let (position, _) = best.ok_or(FrontierError::Exhausted)?;
        let slot = self.pending.remove(position);
        let candidate = self.arena[slot].take().ok_or(FrontierError::Exhausted)?;

        self.slots.remove(&candidate.name);
        self.link_counts.remove(&candidate.name);
        self.retired.insert(candidate.name.clone());
        Ok(candidate)
    }


    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn is_pending(&self, name: &str) -> bool {
        self.slots.contains_key(name)
    }

    pub fn is_retired(&self, name: &str) -> bool {
        self.retired.contains(name)
    }


    pub fn candidate(&self, name: &str) -> Option<&Candidate> {
        self.slots
            .get(name)
            .and_then(|&slot| self.arena.get(slot))
            .and_then(Option::as_ref)
    }

    pub fn link_count(&self, name: &str) -> Option<u32> {
        self.link_counts.get(name).copied()
    }


    pub fn indexed(&self) -> usize {
        self.index.len()
    }

    pub fn policy(&self) -> RediscoveryPolicy {
        self.policy
    }
}
