//! Citations of a paper
//!
//! `GET /paper/{paperId}/citations`
//!
//! `/paper/{paperId}/citations?fields={fields}&limit={limit}`
//!
//! Entries whose `citingPaper` payload is absent are filtered out; missing
//! fields on surviving payloads are filled with sentinel defaults instead.

use crate::{
    error::{Error, Result},
    ss::{
        BASE_URL,
        client::{Query, SemanticScholar, build_request},
    },
};
use reqwest::StatusCode;
use serde::Deserialize;

const CITATION_FIELDS: &str = "paperId,title,abstract,authors,year,url,venue";

/// Query parameters for the citations listing.
#[derive(Debug, Clone, PartialEq)]
pub struct CitationsParam {
    paper_id: String,
    limit: u8,
}

impl CitationsParam {
    pub fn new(paper_id: &str, limit: u8) -> Self {
        Self {
            paper_id: paper_id.to_owned(),
            limit,
        }
    }

    pub(crate) fn query_string(&self) -> String {
        format!("fields={}&limit={}", CITATION_FIELDS, self.limit)
    }
}

impl Query for CitationsParam {
    type Response = Vec<CitingPaper>;

    async fn query(&self, client: &SemanticScholar) -> Result<Self::Response> {
        let url = format!(
            "{}/paper/{}/citations?{}",
            BASE_URL,
            self.paper_id,
            self.query_string()
        );
        let resp = build_request(client, &url).send().await?;
        match resp.status() {
            StatusCode::OK => {
                let body = resp.json::<CitationsResponse>().await?;
                Ok(collect_citing_papers(body))
            }
            _ => Err(Error::RequestFailed(resp.text().await?)),
        }
    }
}

/// One citation record. Missing wire fields are replaced with the sentinels
/// below; treat those strings as "field absent", not as real values.
#[derive(Debug, Clone, PartialEq)]
pub struct CitingPaper {
    /// Semantic Scholar's primary unique identifier; empty when absent.
    pub paper_id: String,
    /// "Unknown Title" when absent.
    pub title: String,
    /// "No abstract available" when absent.
    pub abstract_: String,
    /// Author names; a nameless author becomes "Unknown".
    pub authors: Vec<String>,
    pub year: Option<u32>,
    /// Semantic Scholar URL; empty when absent.
    pub url: String,
    /// "Unknown Venue" when absent.
    pub venue: String,
}

#[derive(Debug, Clone, Deserialize)]
struct CitationsResponse {
    #[serde(default)]
    data: Vec<CitationEntry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CitationEntry {
    citing_paper: Option<RawCitingPaper>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCitingPaper {
    paper_id: Option<String>,
    title: Option<String>,
    #[serde(rename = "abstract")]
    abstract_: Option<String>,
    authors: Option<Vec<RawAuthor>>,
    year: Option<u32>,
    url: Option<String>,
    venue: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct RawAuthor {
    name: Option<String>,
}

impl From<RawCitingPaper> for CitingPaper {
    fn from(raw: RawCitingPaper) -> Self {
        CitingPaper {
            paper_id: raw.paper_id.unwrap_or_default(),
            title: raw.title.unwrap_or_else(|| "Unknown Title".to_owned()),
            abstract_: raw
                .abstract_
                .unwrap_or_else(|| "No abstract available".to_owned()),
            authors: raw
                .authors
                .unwrap_or_default()
                .into_iter()
                .map(|author| author.name.unwrap_or_else(|| "Unknown".to_owned()))
                .collect(),
            year: raw.year,
            url: raw.url.unwrap_or_default(),
            venue: raw.venue.unwrap_or_else(|| "Unknown Venue".to_owned()),
        }
    }
}

fn collect_citing_papers(body: CitationsResponse) -> Vec<CitingPaper> {
    body.data
        .into_iter()
        .filter_map(|entry| entry.citing_paper)
        .map(CitingPaper::from)
        .collect()
}
