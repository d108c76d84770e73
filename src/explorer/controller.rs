use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use strum::{Display, IntoStaticStr};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::budget::{Budget, BudgetSnapshot, RequestKind};
use super::frontier::{Admission, Frontier, FrontierError};
use super::selector::{top_set, RetrievedPage};
use crate::core::{Result, ScoutError};
use crate::knowledge::{FetchError, KnowledgeBase};


#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, IntoStaticStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CrawlStatus {
    BudgetExhausted,
    /// Budget left over but nothing pending. Partial results are still valid.
    FrontierExhausted,
}


#[derive(Debug, Clone, Serialize)]
pub struct CrawlReport {
    pub run_id: Uuid,
    pub status: CrawlStatus,
    pub retrieved: usize,
    pub failed_fetches: usize,
    pub frontier_remaining: usize,
    pub budget: BudgetSnapshot,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}


enum FetchOutcome {
    Retrieved,
    Failed,
}


/// Drives seed searches and the select-fetch-expand loop under a shared
/// request budget.
pub struct CrawlController {
    kb: Arc<dyn KnowledgeBase>,
    frontier: Frontier,
    budget: Arc<Budget>,
    max_depth: u32,
    retrieved: Vec<RetrievedPage>,
    failed_fetches: usize,
    run_id: Uuid,
}

impl CrawlController {
    pub fn new(
        kb: Arc<dyn KnowledgeBase>,
        frontier: Frontier,
        budget: Arc<Budget>,
        max_depth: u32,
    ) -> Self {
        let run_id = Uuid::new_v4();
        info!("CrawlController initialized: run={}, max_depth={}", run_id, max_depth);

        Self {
            kb,
            frontier,
            budget,
            max_depth,
            retrieved: Vec::new(),
            failed_fetches: 0,
            run_id,
        }
    }


    pub async fn explore(&mut self, seeds: &[String]) -> Result<CrawlReport> {
        let started_at = Utc::now();
        self.seed(seeds).await;
        let status = self.run().await?;
        Ok(self.report(status, started_at))
    }

    /// One search per seed topic, every hit admitted at depth 0. Stops early
    /// if the budget runs out mid-list.
    pub async fn seed(&mut self, seeds: &[String]) -> usize {
        let mut searched = 0;
        for query in seeds {
            if !self.budget.try_charge(RequestKind::Search) {
                warn!("Budget exhausted after {} of {} seed searches", searched, seeds.len());
                break;
            }
            searched += 1;

            let names = match self.kb.search(query).await {
                Ok(names) => names,
                Err(e) => {
                    warn!("Search failed for '{}': {}", query, e);
                    Vec::new()
                }
            };
            debug!("Seed '{}' returned {} names", query, names.len());
            self.admit_all(&names, 0).await;
        }

        info!(
            "Seeding finished: {} searches, {} pending candidates",
            searched,
            self.frontier.len()
        );
        searched
    }


    pub async fn run(&mut self) -> Result<CrawlStatus> {
        loop {
            if self.budget.is_exhausted() {
                info!("Request budget exhausted with {} pages retrieved", self.retrieved.len());
                return Ok(CrawlStatus::BudgetExhausted);
            }

            let candidate = match self.frontier.select_best() {
                Ok(candidate) => candidate,
                Err(FrontierError::Exhausted) => {
                    warn!(
                        "Frontier exhausted before budget: {} requests left",
                        self.budget.remaining()
                    );
                    return Ok(CrawlStatus::FrontierExhausted);
                }
                Err(e) => return Err(e.into()),
            };

            if !self.budget.try_charge(RequestKind::Fetch) {
                warn!("Budget taken before '{}' could be fetched", candidate.name);
                return Ok(CrawlStatus::BudgetExhausted);
            }

            debug!(
                "Selected '{}' depth={} weight={:.3} ({} left)",
                candidate.name,
                candidate.depth,
                candidate.weight,
                self.budget.remaining()
            );

            match self.fetch(&candidate.name, candidate.depth).await? {
                FetchOutcome::Retrieved => {}
                FetchOutcome::Failed => self.failed_fetches += 1,
            }
        }
    }

    async fn fetch(&mut self, name: &str, depth: u32) -> Result<FetchOutcome> {
        let content = match self.kb.fetch(name).await {
            Ok(content) if !content.is_empty() => content,
            Ok(_) => {
                self.budget.refund_fetch();
                debug!("Discarding '{}': empty content", name);
                return Ok(FetchOutcome::Failed);
            }
            Err(FetchError::IllegalRequest(reason)) => {
                self.budget.refund_fetch();
                return Err(ScoutError::IllegalRequest(reason));
            }
            Err(e) => {
                self.budget.refund_fetch();
                warn!("Failed to fetch '{}': {}", name, e);
                return Ok(FetchOutcome::Failed);
            }
        };

        info!("Page retrieved: {} (depth {})", name, depth);
        let page = RetrievedPage {
            name: name.to_string(),
            depth,
            content,
        };

        if depth < self.max_depth {
            let links = page.content.links.clone();
            self.retrieved.push(page);
            self.admit_all(&links, depth + 1).await;
        } else {
            self.retrieved.push(page);
        }

        Ok(FetchOutcome::Retrieved)
    }

    async fn admit_all(&mut self, names: &[String], depth: u32) {
        let mut admitted = 0;
        for name in names {
            match self.frontier.admit(name, depth).await {
                Ok(Admission::Admitted { .. }) => admitted += 1,
                Ok(_) => {}
                Err(e) => warn!("Skipping '{}': {}", name, e),
            }
        }
        debug!("Admitted {} of {} names at depth {}", admitted, names.len(), depth);
    }


    pub fn top_set(&self, n: usize) -> Vec<String> {
        top_set(&self.retrieved, n)
    }

    pub fn retrieved(&self) -> &[RetrievedPage] {
        &self.retrieved
    }

    pub fn into_retrieved(self) -> Vec<RetrievedPage> {
        self.retrieved
    }

    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    pub fn budget(&self) -> &Budget {
        &self.budget
    }

    pub fn report(&self, status: CrawlStatus, started_at: DateTime<Utc>) -> CrawlReport {
        CrawlReport {
            run_id: self.run_id,
            status,
            retrieved: self.retrieved.len(),
            failed_fetches: self.failed_fetches,
            frontier_remaining: self.frontier.len(),
            budget: self.budget.snapshot(),
            started_at,
            finished_at: Utc::now(),
        }
    }
}
