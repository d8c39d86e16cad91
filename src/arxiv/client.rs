//! arXiv export API client
//!
//! `GET http://export.arxiv.org/api/query`

use crate::{
    arxiv::feed::{Feed, PaperSummary},
    error::{Error, Result},
    search::PaperIndex,
};
use reqwest::{Client, StatusCode};
use std::time::Duration;

static APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

const BASE_URL: &str = "http://export.arxiv.org/api/query";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct ArxivClient {
    client: Client,
}

impl Default for ArxivClient {
    fn default() -> Self {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }
}

impl ArxivClient {
    /// Create a client with a custom request timeout. A timed-out request
    /// surfaces as a transport failure.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .user_agent(APP_USER_AGENT)
                .build()
                .unwrap(),
        }
    }

    async fn fetch_feed(&self, url: &str) -> Result<Feed> {
        tracing::debug!(%url, "fetching arXiv feed");
        let resp = self.client.get(url).send().await?;
        match resp.status() {
            StatusCode::OK => {
                let body = resp.text().await?;
                quick_xml::de::from_str(&body).map_err(|e| Error::ParseFailed(e.to_string()))
            }
            _ => Err(Error::RequestFailed(resp.text().await?)),
        }
    }
}

/// Join terms into an arXiv full-text query: `all:<term>` clauses, multi-word
/// terms quoted, OR'd together.
pub fn build_search_query(terms: &[String]) -> String {
    terms
        .iter()
        .map(|term| {
            if term.contains(char::is_whitespace) {
                format!("all:\"{}\"", term)
            } else {
                format!("all:{}", term)
            }
        })
        .collect::<Vec<_>>()
        .join("+OR+")
}

impl PaperIndex for ArxivClient {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<PaperSummary>> {
        let encoded = query.replace(' ', "+").replace('"', "%22");
        let url = format!(
            "{}?search_query={}&start=0&sortBy=submittedDate&sortOrder=descending&max_results={}",
            BASE_URL, encoded, limit
        );
        let feed = self.fetch_feed(&url).await?;
        Ok(feed.entries.into_iter().map(PaperSummary::from).collect())
    }

    async fn fetch_by_id(&self, id: &str) -> Result<Option<PaperSummary>> {
        let url = format!("{}?id_list={}&max_results=1", BASE_URL, id);
        let feed = self.fetch_feed(&url).await?;
        Ok(feed.entries.into_iter().next().map(PaperSummary::from))
    }
}
