use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::RwLock;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};
use url::Url;

use super::base::{FetchError, KnowledgeBase, PageContent, SearchError, TopicCatalogue};

const CATEGORY_PREFIX: &str = "Category:";


#[derive(Deserialize)]
struct SearchResponse {
    query: Option<SearchQuery>,
}

#[derive(Deserialize)]
struct SearchQuery {
    #[serde(default)]
    search: Vec<SearchHit>,
}

#[derive(Deserialize)]
struct SearchHit {
    title: String,
}

#[derive(Deserialize)]
struct PageResponse {
    query: Option<PageQuery>,
    #[serde(rename = "continue")]
    continuation: Option<Map<String, Value>>,
}

#[derive(Deserialize)]
struct PageQuery {
    #[serde(default)]
    pages: Vec<RawPage>,
}

#[derive(Deserialize)]
struct RawPage {
    title: String,
    #[serde(default)]
    missing: bool,
    #[serde(default)]
    invalid: bool,
    extract: Option<String>,
    fullurl: Option<String>,
    #[serde(default)]
    links: Vec<RawTitle>,
    #[serde(default)]
    categories: Vec<RawTitle>,
}

#[derive(Deserialize)]
struct RawTitle {
    title: String,
}


/// MediaWiki action API client. Tracks every name it has reported so that
/// fetches of undiscovered names can be refused.
pub struct WikipediaClient {
    client: Client,
    api_url: Url,
    search_results: usize,
    max_continuations: usize,
    catalogue: Arc<dyn TopicCatalogue>,
    known: RwLock<HashSet<String>>,
}

impl WikipediaClient {

    pub fn new(
        api_url: &str,
        user_agent: &str,
        timeout_secs: u64,
        search_results: usize,
        max_continuations: usize,
        catalogue: Arc<dyn TopicCatalogue>,
    ) -> crate::Result<Self> {
        let api_url = Url::parse(api_url)
            .map_err(|e| crate::ScoutError::Config(format!("invalid wiki API url: {}", e)))?;
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        info!("WikipediaClient created for {}", api_url);

        Ok(Self {
            client,
            api_url,
            search_results,
            max_continuations,
            catalogue,
            known: RwLock::new(HashSet::new()),
        })
    }


    pub fn from_config(
        config: &crate::ScoutConfig,
        catalogue: Arc<dyn TopicCatalogue>,
    ) -> crate::Result<Self> {
        Self::new(
            &config.wiki_api_url,
            &config.user_agent,
            config.timeout,
            config.search_results,
            config.max_continuations,
            catalogue,
        )
    }


    pub fn known_count(&self) -> usize {
        self.known.read().len()
    }

    fn remember<'a>(&self, names: impl IntoIterator<Item = &'a String>) {
        let mut known = self.known.write();
        for name in names {
            known.insert(name.clone());
        }
    }

    fn check_legal_request(&self, name: &str) -> Result<(), FetchError> {
        if !self.known.read().contains(name) {
            return Err(FetchError::IllegalRequest(format!("{} is not known", name)));
        }
        if !self.catalogue.is_known_legal(name) {
            return Err(FetchError::IllegalRequest(format!(
                "{} is not in the catalogue",
                name
            )));
        }
        Ok(())
    }

    fn search_url(&self, query: &str) -> Url {
        let limit = self.search_results.to_string();
        let mut url = self.api_url.clone();
        url.query_pairs_mut()
            .append_pair("action", "query")
            .append_pair("list", "search")
            .append_pair("srsearch", query)
            .append_pair("srlimit", &limit)
            .append_pair("srprop", "")
            .append_pair("format", "json")
            .append_pair("formatversion", "2");
        url
    }

    fn page_url(&self, name: &str, continuation: Option<&Map<String, Value>>) -> Url {
        let mut url = self.api_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("action", "query")
                .append_pair("prop", "extracts|links|categories|info")
                .append_pair("titles", name)
                .append_pair("explaintext", "1")
                .append_pair("inprop", "url")
                .append_pair("plnamespace", "0")
                .append_pair("pllimit", "max")
                .append_pair("cllimit", "max")
                .append_pair("redirects", "1")
                .append_pair("format", "json")
                .append_pair("formatversion", "2");
            if let Some(continuation) = continuation {
                for (key, value) in continuation {
                    let value = match value {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    };
                    pairs.append_pair(key, &value);
                }
            }
        }
        url
    }
}

#[async_trait]
impl KnowledgeBase for WikipediaClient {
    async fn search(&self, query: &str) -> Result<Vec<String>, SearchError> {
        let response = self
            .client
            .get(self.search_url(query))
            .send()
            .await
            .map_err(search_error)?
            .error_for_status()
            .map_err(search_error)?
            .json::<SearchResponse>()
            .await
            .map_err(search_error)?;

        let titles: Vec<String> = response
            .query
            .ok_or_else(|| SearchError::InvalidResponse("missing query block".to_string()))?
            .search
            .into_iter()
            .map(|hit| hit.title)
            .collect();

        self.remember(&titles);
        debug!("Search '{}' returned {} titles", query, titles.len());
        Ok(titles)
    }

    async fn fetch(&self, name: &str) -> Result<PageContent, FetchError> {
        self.check_legal_request(name)?;

        let mut content = PageContent::default();
        let mut continuation: Option<Map<String, Value>> = None;

        for round in 0..=self.max_continuations {
            let response = self
                .client
                .get(self.page_url(name, continuation.as_ref()))
                .send()
                .await?
                .error_for_status()?
                .json::<PageResponse>()
                .await?;

            let page = response
                .query
                .and_then(|q| q.pages.into_iter().next())
                .ok_or_else(|| FetchError::EmptyContent(name.to_string()))?;
            if page.missing || page.invalid {
                return Err(FetchError::EmptyContent(name.to_string()));
            }

            if content.title.is_empty() {
                content.title = page.title;
            }
            if content.body.is_empty() {
                content.body = page.extract.unwrap_or_default();
            }
            if content.url.is_empty() {
                content.url = page.fullurl.unwrap_or_default();
            }
            content.links.extend(page.links.into_iter().map(|l| l.title));
            content.categories.extend(page.categories.into_iter().map(|c| {
                c.title
                    .strip_prefix(CATEGORY_PREFIX)
                    .map(str::to_string)
                    .unwrap_or(c.title)
            }));

            match response.continuation {
                Some(next) => {
                    if round == self.max_continuations {
                        warn!("Truncating links of '{}' after {} continuations", name, round);
                    }
                    continuation = Some(next);
                }
                None => break,
            }
        }

        if content.is_empty() {
            return Err(FetchError::EmptyContent(name.to_string()));
        }

        self.remember(&content.links);
        Ok(content)
    }
}

fn search_error(e: reqwest::Error) -> SearchError {
    if e.is_timeout() {
        SearchError::Timeout
    } else {
        SearchError::Http(e)
    }
}
