//! Models for the arXiv Atom feed

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Internal representation of the arXiv API's Atom feed response.
#[derive(Debug, Deserialize)]
pub(crate) struct Feed {
    #[serde(rename = "entry", default)]
    pub(crate) entries: Vec<Entry>,
}

/// One paper entry from the feed.
#[derive(Debug, Deserialize)]
pub(crate) struct Entry {
    /// arXiv URL, e.g. `http://arxiv.org/abs/2303.08774v4`.
    pub(crate) id: String,
    pub(crate) title: String,
    pub(crate) summary: String,
    pub(crate) published: DateTime<Utc>,
    #[serde(rename = "author", default)]
    pub(crate) authors: Vec<FeedAuthor>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FeedAuthor {
    pub(crate) name: String,
}

/// One arXiv record, as produced per search. Read-only after parsing.
#[derive(Debug, Clone, PartialEq)]
pub struct PaperSummary {
    /// Canonical arXiv ID taken from the entry URL; a trailing version
    /// suffix (`v2`) is retained.
    pub id: String,
    pub title: String,
    pub summary: String,
    pub authors: Vec<String>,
    pub published: DateTime<Utc>,
    /// Link to the arXiv abstract page.
    pub link: String,
}

impl From<Entry> for PaperSummary {
    fn from(entry: Entry) -> Self {
        PaperSummary {
            id: id_from_entry_url(&entry.id),
            title: normalize_whitespace(&entry.title),
            summary: normalize_whitespace(&entry.summary),
            authors: entry.authors.into_iter().map(|author| author.name).collect(),
            published: entry.published,
            link: entry.id,
        }
    }
}

/// Everything after the `/abs/` segment; entry IDs that are not abs URLs are
/// passed through unchanged.
fn id_from_entry_url(url: &str) -> String {
    url.rsplit_once("/abs/")
        .map(|(_, id)| id.to_owned())
        .unwrap_or_else(|| url.to_owned())
}

/// arXiv titles and abstracts wrap lines with embedded newlines and padding.
fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
