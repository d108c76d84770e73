

pub mod base;
pub mod catalogue;
pub mod wikipedia;

pub use base::{FetchError, KnowledgeBase, PageContent, SearchError, TopicCatalogue};
pub use catalogue::{CatalogueError, LegalCatalogue};
pub use wikipedia::WikipediaClient;
