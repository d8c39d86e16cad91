use std::time::Duration;

use crate::{
    error::Result,
    search::CitationGraph,
    ss::{CitationsParam, CitingPaper, TitleLookupParam},
};
use reqwest::{Client, RequestBuilder};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct SemanticScholar {
    api_key: Option<String>,
    client: Client,
}

impl Default for SemanticScholar {
    fn default() -> Self {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }
}

impl SemanticScholar {
    /// Create a client with a custom request timeout.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            api_key: None,
            client: Client::builder().timeout(timeout).build().unwrap(),
        }
    }

    pub fn with_api_key(api_key: &str) -> Self {
        Self {
            api_key: Some(api_key.to_owned()),
            ..Self::default()
        }
    }

    /// Create a new client from the environment variable `SEMANTIC_SCHOLAR_API_KEY`
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("SEMANTIC_SCHOLAR_API_KEY")?;
        Ok(Self::with_api_key(&api_key))
    }

    pub(crate) fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    pub(crate) fn client(&self) -> &Client {
        &self.client
    }

    pub async fn query<Q: Query>(&self, query: &Q) -> Result<Q::Response> {
        query.query(self).await
    }
}

pub trait Query {
    type Response;

    fn query(
        &self,
        client: &SemanticScholar,
    ) -> impl std::future::Future<Output = Result<Self::Response>> + Send;
}

pub(crate) fn build_request(client: &SemanticScholar, url: &str) -> RequestBuilder {
    let mut req_builder = client.client().get(url);
    if let Some(api_key) = client.api_key() {
        req_builder = req_builder.header("x-api-key", api_key);
    }
    req_builder
}

impl CitationGraph for SemanticScholar {
    async fn match_title(&self, title: &str) -> Result<Option<String>> {
        let param = TitleLookupParam::new(title);
        Ok(self.query(&param).await?.map(|matched| matched.paper_id))
    }

    async fn citations_of(&self, graph_id: &str, limit: usize) -> Result<Vec<CitingPaper>> {
        let param = CitationsParam::new(graph_id, limit.min(u8::MAX as usize) as u8);
        self.query(&param).await
    }
}
