//! Google Scholar lookup-link construction

use reqwest::Url;

const SCHOLAR_BASE_URL: &str = "https://scholar.google.com/scholar";

/// Build a Google Scholar search URL for `title`, restricted to the first
/// author's last name when one is available. Pure string construction; always
/// succeeds, even for empty inputs.
pub fn scholar_search_url(title: &str, authors: &[String]) -> String {
    let mut query = format!("intitle:\"{}\"", title);
    if let Some(first) = authors.first()
        && let Some(last_name) = first.split_whitespace().last()
    {
        query.push_str(&format!(" author:{}", last_name));
    }
    Url::parse_with_params(SCHOLAR_BASE_URL, [("q", query.as_str())])
        .expect("scholar base URL is valid")
        .to_string()
}
