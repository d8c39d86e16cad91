//! Best-effort title lookup
//!
//! `GET /paper/search`
//!
//! `/paper/search?query={title}&limit=1&fields=paperId,title`
//!
//! Used to recover a Semantic Scholar paper ID for a title resolved from
//! arXiv. The result cap is fixed at 1; only the top relevance match matters.

use crate::{
    error::{Error, Result},
    ss::{
        BASE_URL,
        client::{Query, SemanticScholar, build_request},
    },
};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

/// Query parameters for the title lookup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TitleLookupParam {
    query: String,
    limit: u8,
    fields: &'static str,
}

impl TitleLookupParam {
    pub fn new(title: &str) -> Self {
        Self {
            query: title.to_owned(),
            limit: 1,
            fields: "paperId,title",
        }
    }
}

impl Query for TitleLookupParam {
    type Response = Option<MatchedPaper>;

    async fn query(&self, client: &SemanticScholar) -> Result<Self::Response> {
        let url = format!("{}/paper/search", BASE_URL);
        let resp = build_request(client, &url).query(self).send().await?;
        match resp.status() {
            StatusCode::OK => {
                let body = resp.json::<TitleLookupResponse>().await?;
                Ok(body.data.unwrap_or_default().into_iter().next())
            }
            StatusCode::NOT_FOUND => Ok(None),
            _ => Err(Error::RequestFailed(resp.text().await?)),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct TitleLookupResponse {
    data: Option<Vec<MatchedPaper>>,
}

/// Minimal paper record recovered by the lookup.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchedPaper {
    /// Semantic Scholar's primary unique identifier for the paper.
    pub paper_id: String,
    pub title: Option<String>,
}
