pub mod budget;
pub mod controller;
pub mod frontier;
pub mod novelty;
pub mod ranking;
pub mod seeds;
pub mod selector;

#[cfg(test)]
pub(crate) mod testing;

pub use budget::{Budget, BudgetSnapshot, RequestKind};
pub use controller::{CrawlController, CrawlReport, CrawlStatus};
pub use frontier::{Admission, Candidate, Frontier, FrontierError, RediscoveryPolicy, RejectReason};
pub use novelty::NoveltyIndex;
pub use ranking::{content_rank, name_rank};
pub use selector::{top_set, RetrievedPage};
