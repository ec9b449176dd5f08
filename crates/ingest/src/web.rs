//! Web ingestion — search provider and page fetcher.
//!
//! Both capabilities sit behind traits so the router can be exercised with
//! mocks. The production implementation, [`WebClient`], searches the
//! DuckDuckGo HTML endpoint and fetches pages with a bounded-timeout GET,
//! flattening the markup to whitespace-joined text with `script`/`style`/
//! `noscript` subtrees removed.
//!
//! Result parsing and HTML flattening are pure functions over markup.

use async_trait::async_trait;
use scraper::{Html, Selector};
use sportello_core::{WebError, WebSource};
use std::time::Duration;
use tracing::debug;

const USER_AGENT: &str = "Mozilla/5.0 (Sportello; +web-read)";
const SEARCH_ENDPOINT: &str = "https://html.duckduckgo.com/html/";

/// Ranked text search: query → ordered result list.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Return up to `max_results` hits. An empty query yields an empty
    /// list without touching the network; results lacking a URL are
    /// dropped.
    async fn search(&self, query: &str, max_results: usize)
    -> Result<Vec<WebSource>, WebError>;
}

/// URL → sanitized page text.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// GET the URL (bounded timeout), fail on non-success status, and
    /// flatten the HTML to plain text. The caller clips the result.
    async fn fetch_text(&self, url: &str) -> Result<String, WebError>;
}

/// The production web client: DuckDuckGo search + reqwest fetch.
pub struct WebClient {
    client: reqwest::Client,
}

impl WebClient {
    /// Build a client with the given request timeout — the only operation
    /// in the whole assistant with an explicit deadline.
    pub fn new(timeout: Duration) -> Result<Self, WebError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| WebError::Network(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl SearchProvider for WebClient {
    fn name(&self) -> &str {
        "duckduckgo"
    }

    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<WebSource>, WebError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let response = self
            .client
            .get(SEARCH_ENDPOINT)
            .query(&[("q", query)])
            .send()
            .await
            .map_err(|e| WebError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(WebError::Status(status.as_u16()));
        }

        let html = response
            .text()
            .await
            .map_err(|e| WebError::Network(e.to_string()))?;

        let results = parse_search_results(&html, max_results);
        debug!(query, results = results.len(), "search complete");
        Ok(results)
    }
}

#[async_trait]
impl PageFetcher for WebClient {
    async fn fetch_text(&self, url: &str) -> Result<String, WebError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| WebError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(WebError::Status(status.as_u16()));
        }

        let html = response
            .text()
            .await
            .map_err(|e| WebError::Network(e.to_string()))?;

        Ok(html_to_text(&html))
    }
}

/// Parse the DuckDuckGo HTML result page into ordered hits.
///
/// Each `div.result` contributes one hit; entries without a usable link
/// are dropped, and a hit with an empty title falls back to its URL.
pub fn parse_search_results(html: &str, max_results: usize) -> Vec<WebSource> {
    let Ok(result_sel) = Selector::parse("div.result") else {
        return Vec::new();
    };
    let Ok(link_sel) = Selector::parse("a.result__a") else {
        return Vec::new();
    };
    let Ok(snippet_sel) = Selector::parse("a.result__snippet, div.result__snippet") else {
        return Vec::new();
    };

    let doc = Html::parse_document(html);
    let mut out = Vec::new();

    for result in doc.select(&result_sel) {
        if out.len() >= max_results {
            break;
        }
        let Some(link) = result.select(&link_sel).next() else {
            continue;
        };
        let Some(href) = link.value().attr("href") else {
            continue;
        };
        let url = resolve_redirect(href);
        if url.is_empty() {
            continue;
        }

        let title = link.text().collect::<String>().trim().to_string();
        let excerpt = result
            .select(&snippet_sel)
            .next()
            .map(|s| s.text().collect::<String>().trim().to_string())
            .unwrap_or_default();

        out.push(WebSource {
            title: if title.is_empty() { url.clone() } else { title },
            url,
            excerpt,
        });
    }
    out
}

/// DuckDuckGo wraps result links in a `/l/?uddg=<target>` redirect;
/// unwrap it to the real destination. Non-redirect links pass through;
/// unparsable ones are dropped (empty return).
fn resolve_redirect(href: &str) -> String {
    let absolute = if let Some(rest) = href.strip_prefix("//") {
        format!("https://{rest}")
    } else {
        href.to_string()
    };

    match reqwest::Url::parse(&absolute) {
        Ok(url) => {
            let is_ddg_redirect = url
                .domain()
                .is_some_and(|d| d.ends_with("duckduckgo.com"))
                && url.path().starts_with("/l/");
            if is_ddg_redirect {
                for (key, target) in url.query_pairs() {
                    if key == "uddg" {
                        return target.into_owned();
                    }
                }
                return String::new();
            }
            url.to_string()
        }
        Err(_) => String::new(),
    }
}

/// Flatten HTML to whitespace-joined text, skipping text that lives under
/// `script`, `style`, or `noscript`.
pub fn html_to_text(html: &str) -> String {
    let doc = Html::parse_document(html);
    let mut parts: Vec<String> = Vec::new();

    for node in doc.tree.nodes() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        let hidden = node.ancestors().any(|a| {
            a.value()
                .as_element()
                .is_some_and(|e| matches!(e.name(), "script" | "style" | "noscript"))
        });
        if hidden {
            continue;
        }
        let trimmed = text.trim();
        if !trimmed.is_empty() {
            parts.push(trimmed.to_string());
        }
    }
    parts.join(" ")
}
