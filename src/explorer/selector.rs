use std::cmp::Ordering;
use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::ranking::content_rank;
use crate::knowledge::PageContent;


#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievedPage {
    pub name: String,
    pub depth: u32,
    pub content: PageContent,
}

impl RetrievedPage {
    pub fn title(&self) -> &str {
        &self.content.title
    }

    pub fn rank(&self) -> f64 {
        content_rank(&self.name, self.depth, &self.content)
    }
}


/// Titles of the `n` best pages by content rank, best first. Equal ranks
/// keep retrieval order. A title reached under several names (redirects)
/// appears once, at its best rank.
pub fn top_set(pages: &[RetrievedPage], n: usize) -> Vec<String> {
    let mut ranked: Vec<(f64, &RetrievedPage)> = pages.iter().map(|p| (p.rank(), p)).collect();
    ranked.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));

    let mut seen = HashSet::new();
    ranked
        .into_iter()
        .map(|(_, page)| page.title())
        .filter(|title| seen.insert(*title))
        .take(n)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(name: &str, body_len: usize) -> RetrievedPage {
        RetrievedPage {
            name: name.to_string(),
            depth: 1,
            content: PageContent {
                title: format!("{} (title)", name),
                body: "x".repeat(body_len),
                url: String::new(),
                links: Vec::new(),
                categories: Vec::new(),
            },
        }
    }

    #[test]
    fn test_top_set_truncates_and_orders() {
        let pages: Vec<RetrievedPage> = (1..=7)
            .map(|i| {
                let mut p = page("Page", i * 1000);
                p.content.title = format!("P{}", i);
                p
            })
            .collect();

        assert_eq!(top_set(&pages, 5), vec!["P7", "P6", "P5", "P4", "P3"]);
        assert_eq!(top_set(&pages, 50).len(), 7);
    }

    #[test]
    fn test_top_set_returns_titles_highest_first() {
        let pages = vec![page("Short", 10), page("Long", 50_000), page("Medium", 2_000)];
        assert_eq!(
            top_set(&pages, 5),
            vec!["Long (title)", "Medium (title)", "Short (title)"]
        );
    }

    #[test]
    fn test_top_set_stable_on_ties() {
        let mut pages = vec![page("Same", 100), page("Same", 100), page("Same", 100)];
        pages[0].content.title = "first".to_string();
        pages[1].content.title = "second".to_string();
        pages[2].content.title = "third".to_string();
        assert_eq!(top_set(&pages, 2), vec!["first", "second"]);
    }

    #[test]
    fn test_top_set_collapses_redirected_titles() {
        let mut pages = vec![page("Page", 3_000), page("Page", 2_000), page("Page", 1_000)];
        pages[0].content.title = "Mathematics".to_string();
        pages[1].content.title = "Physics".to_string();
        pages[2].content.title = "Mathematics".to_string();

        assert_eq!(top_set(&pages, 5), vec!["Mathematics", "Physics"]);
        assert_eq!(top_set(&pages, 1), vec!["Mathematics"]);
    }

    #[test]
    fn test_top_set_empty() {
        assert!(top_set(&[], 5).is_empty());
    }
}
