//! Result state owned by the search engine

use crate::{arxiv::PaperSummary, ss::CitingPaper, terms::WeightedTerm};

/// Which orchestration path runs. The two modes are mutually exclusive;
/// starting a run in either mode resets the state accumulated by the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMode {
    #[default]
    Keyword,
    Citation,
}

/// Main pipeline status.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SearchStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed(String),
}

/// Status of the citation fetch, tracked independently of the main pipeline:
/// it can fail or still be loading after the main pipeline has succeeded.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CitationStatus {
    #[default]
    Idle,
    /// No Semantic Scholar ID could be recovered; no citation data available.
    Unavailable,
    Loading,
    Ready,
    Failed(String),
}

/// The resolved identity of a citation-mode query's subject.
#[derive(Debug, Clone, PartialEq)]
pub struct SourcePaperInfo {
    pub title: String,
    /// Canonical arXiv ID.
    pub id: String,
    pub authors: Vec<String>,
    /// Absent when the best-effort title lookup found no match.
    pub semantic_scholar_id: Option<String>,
}

/// Everything a search run produces. Fresh per invocation; a newer run
/// replaces the whole struct before it starts writing.
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    pub mode: SearchMode,
    pub status: SearchStatus,
    /// Keyword results, or related papers in citation mode.
    pub papers: Vec<PaperSummary>,
    pub source_paper: Option<SourcePaperInfo>,
    pub scholar_link: Option<String>,
    /// Terms extracted from the source title, re-tagged to a fixed display weight.
    pub key_terms: Vec<WeightedTerm>,
    pub citing_papers: Vec<CitingPaper>,
    pub citation_status: CitationStatus,
}
