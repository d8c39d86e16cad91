//! Search engine driving the keyword and citation pipelines
//!
//! All result state lives behind one mutex and is only written by the
//! most-recently-dispatched run: every run takes a ticket from a monotonic
//! sequence counter, and a response is applied only while its ticket is still
//! the latest. Stale responses are discarded, so a slow lookup can never
//! overwrite the results of a newer search.

use crate::{
    arxiv::{ArxivClient, PaperSummary, build_search_query},
    error::{Error, Result},
    resolve::resolve_arxiv_id,
    scholar::scholar_search_url,
    search::state::{
        CitationStatus, SearchMode, SearchState, SearchStatus, SourcePaperInfo,
    },
    ss::{CitingPaper, SemanticScholar},
    terms::{WeightedTerm, extract_terms},
};
use std::sync::{
    Mutex,
    atomic::{AtomicU64, Ordering},
};

/// Result cap shared by the paper search, related-paper, and citation fetches.
const RESULT_LIMIT: usize = 10;
/// How many extracted terms feed the related-paper query and the display list.
const KEY_TERM_LIMIT: usize = 5;
/// Extracted terms are re-tagged with this weight for display; the original
/// extraction weight only decides which terms make the cut.
const KEY_TERM_DISPLAY_WEIGHT: u32 = 8;

/// Paper-search backend contract (arXiv-compatible).
pub trait PaperIndex {
    /// Full-text search, newest submissions first, at most `limit` results.
    fn search(
        &self,
        query: &str,
        limit: usize,
    ) -> impl std::future::Future<Output = Result<Vec<PaperSummary>>> + Send;

    /// Metadata lookup by canonical ID; `None` when the paper is unknown.
    fn fetch_by_id(
        &self,
        id: &str,
    ) -> impl std::future::Future<Output = Result<Option<PaperSummary>>> + Send;
}

/// Citation-graph backend contract (Semantic Scholar-compatible).
pub trait CitationGraph {
    /// Recover the graph's own paper ID from a title, if it knows the paper.
    fn match_title(
        &self,
        title: &str,
    ) -> impl std::future::Future<Output = Result<Option<String>>> + Send;

    /// Papers citing the given graph ID, at most `limit` results.
    fn citations_of(
        &self,
        graph_id: &str,
        limit: usize,
    ) -> impl std::future::Future<Output = Result<Vec<CitingPaper>>> + Send;
}

/// Orchestrator owning the result state and the request sequence counter.
/// `run_keyword_search` and `run_citation_search` are the only mutators;
/// callers read through `snapshot`.
#[derive(Debug)]
pub struct SearchEngine<P = ArxivClient, G = SemanticScholar> {
    index: P,
    graph: G,
    state: Mutex<SearchState>,
    seq: AtomicU64,
}

impl SearchEngine {
    /// Engine over the live arXiv and Semantic Scholar APIs.
    pub fn new() -> Self {
        Self::with_backends(ArxivClient::default(), SemanticScholar::default())
    }
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: PaperIndex, G: CitationGraph> SearchEngine<P, G> {
    pub fn with_backends(index: P, graph: G) -> Self {
        Self {
            index,
            graph,
            state: Mutex::new(SearchState::default()),
            seq: AtomicU64::new(0),
        }
    }

    /// Clone of the current result state.
    pub fn snapshot(&self) -> SearchState {
        self.state.lock().unwrap().clone()
    }

    /// Reset the state for a new run and take its sequence ticket.
    fn begin(&self, mode: SearchMode) -> u64 {
        let mut state = self.state.lock().unwrap();
        let seq = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        *state = SearchState {
            mode,
            status: SearchStatus::Loading,
            ..SearchState::default()
        };
        seq
    }

    /// Apply a state mutation unless a newer run has been dispatched since
    /// `seq` was taken. Returns whether the mutation was applied.
    fn apply(&self, seq: u64, mutate: impl FnOnce(&mut SearchState)) -> bool {
        let mut state = self.state.lock().unwrap();
        if seq != self.seq.load(Ordering::SeqCst) {
            tracing::debug!(seq, "discarding response from superseded search");
            return false;
        }
        mutate(&mut state);
        true
    }

    /// Search the paper index for `raw` keywords and replace the result set.
    ///
    /// Comma-separated phrases are OR'd together; phrases containing spaces
    /// are quoted. An empty input is rejected before any network call.
    pub async fn run_keyword_search(&self, raw: &str) -> Result<()> {
        let terms = split_keyword_input(raw);
        if terms.is_empty() {
            return Err(Error::EmptyQuery);
        }
        let seq = self.begin(SearchMode::Keyword);

        let query = build_search_query(&terms);
        match self.index.search(&query, RESULT_LIMIT).await {
            Ok(papers) => {
                self.apply(seq, |state| {
                    state.papers = papers;
                    state.status = SearchStatus::Ready;
                });
                Ok(())
            }
            Err(err) => {
                self.apply(seq, |state| {
                    state.papers.clear();
                    state.status = SearchStatus::Failed(err.to_string());
                });
                Err(err)
            }
        }
    }

    /// Resolve `input` to an arXiv paper, then gather its citing papers, a
    /// Google Scholar link, key terms from its title, and related papers.
    ///
    /// The Semantic Scholar ID lookup is best-effort: its failure is logged
    /// and the pipeline continues without citation data. A citations-fetch
    /// failure flips only `citation_status`; the main pipeline keeps going.
    pub async fn run_citation_search(&self, input: &str) -> Result<()> {
        let arxiv_id = resolve_arxiv_id(input).ok_or(Error::InvalidArxivId)?;
        let seq = self.begin(SearchMode::Citation);

        let paper = match self.index.fetch_by_id(&arxiv_id).await {
            Ok(Some(paper)) => paper,
            Ok(None) => {
                let err = Error::PaperNotFound(arxiv_id);
                self.apply(seq, |state| {
                    state.status = SearchStatus::Failed(err.to_string());
                });
                return Err(err);
            }
            Err(err) => {
                self.apply(seq, |state| {
                    state.status = SearchStatus::Failed(err.to_string());
                });
                return Err(err);
            }
        };

        let graph_id = match self.graph.match_title(&paper.title).await {
            Ok(found) => found,
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    title = %paper.title,
                    "citation graph lookup failed, continuing without citation data"
                );
                None
            }
        };

        let key_terms: Vec<WeightedTerm> = extract_terms(&paper.title)
            .into_iter()
            .take(KEY_TERM_LIMIT)
            .collect();
        let source = SourcePaperInfo {
            title: paper.title.clone(),
            id: arxiv_id.clone(),
            authors: paper.authors.clone(),
            semantic_scholar_id: graph_id.clone(),
        };
        let scholar_link = scholar_search_url(&paper.title, &paper.authors);

        let applied = self.apply(seq, |state| {
            state.scholar_link = Some(scholar_link);
            state.key_terms = key_terms
                .iter()
                .map(|t| WeightedTerm {
                    term: t.term.clone(),
                    weight: KEY_TERM_DISPLAY_WEIGHT,
                })
                .collect();
            state.citation_status = if graph_id.is_some() {
                CitationStatus::Loading
            } else {
                CitationStatus::Unavailable
            };
            state.source_paper = Some(source);
        });
        if !applied {
            // Superseded; stop issuing network calls for this run.
            return Ok(());
        }

        if let Some(ref graph_id) = graph_id {
            match self.graph.citations_of(graph_id, RESULT_LIMIT).await {
                Ok(citing) => {
                    self.apply(seq, |state| {
                        state.citing_papers = citing;
                        state.citation_status = CitationStatus::Ready;
                    });
                }
                Err(err) => {
                    self.apply(seq, |state| {
                        state.citing_papers.clear();
                        state.citation_status = CitationStatus::Failed(err.to_string());
                    });
                }
            }
        }

        let related_terms: Vec<String> = key_terms.into_iter().map(|t| t.term).collect();
        if related_terms.is_empty() {
            self.apply(seq, |state| state.status = SearchStatus::Ready);
            return Ok(());
        }
        let query = build_search_query(&related_terms);
        match self.index.search(&query, RESULT_LIMIT).await {
            Ok(papers) => {
                // Substring containment also drops versioned variants of the
                // source paper (2303.08774 excludes 2303.08774v2).
                let related: Vec<PaperSummary> = papers
                    .into_iter()
                    .filter(|paper| !paper.id.contains(arxiv_id.as_str()))
                    .collect();
                self.apply(seq, |state| {
                    state.papers = related;
                    state.status = SearchStatus::Ready;
                });
                Ok(())
            }
            Err(err) => {
                self.apply(seq, |state| {
                    state.papers.clear();
                    state.status = SearchStatus::Failed(err.to_string());
                });
                Err(err)
            }
        }
    }
}

fn split_keyword_input(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::collections::HashMap;
    use std::sync::{
        Arc,
        atomic::{AtomicBool, AtomicUsize},
    };
    use std::time::Duration;

    fn paper(id: &str, title: &str) -> PaperSummary {
        PaperSummary {
            id: id.to_owned(),
            title: title.to_owned(),
            summary: "summary".to_owned(),
            authors: vec!["OpenAI Team".to_owned()],
            published: Utc::now(),
            link: format!("http://arxiv.org/abs/{id}"),
        }
    }

    fn citing(title: &str) -> CitingPaper {
        CitingPaper {
            paper_id: "cit1".to_owned(),
            title: title.to_owned(),
            abstract_: "No abstract available".to_owned(),
            authors: vec!["Jane Doe".to_owned()],
            year: Some(2024),
            url: String::new(),
            venue: "Unknown Venue".to_owned(),
        }
    }

    /// Keyed fake: queries containing a needle return (after an optional
    /// delay) the papers registered under it.
    #[derive(Default)]
    struct FakeIndex {
        search_results: Vec<(String, Vec<PaperSummary>)>,
        search_delays: Vec<(String, Duration)>,
        papers_by_id: HashMap<String, PaperSummary>,
        fail_search: AtomicBool,
        fail_fetch: AtomicBool,
        search_calls: AtomicUsize,
        fetch_calls: AtomicUsize,
    }

    impl FakeIndex {
        fn with_results(needle: &str, papers: Vec<PaperSummary>) -> Self {
            Self {
                search_results: vec![(needle.to_owned(), papers)],
                ..Self::default()
            }
        }

        fn network_calls(&self) -> usize {
            self.search_calls.load(Ordering::SeqCst) + self.fetch_calls.load(Ordering::SeqCst)
        }
    }

    impl PaperIndex for FakeIndex {
        async fn search(&self, query: &str, _limit: usize) -> Result<Vec<PaperSummary>> {
            self.search_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_search.load(Ordering::SeqCst) {
                return Err(Error::RequestFailed("index down".to_owned()));
            }
            for (needle, delay) in &self.search_delays {
                if query.contains(needle) {
                    tokio::time::sleep(*delay).await;
                }
            }
            for (needle, papers) in &self.search_results {
                if query.contains(needle) {
                    return Ok(papers.clone());
                }
            }
            Ok(Vec::new())
        }

        async fn fetch_by_id(&self, id: &str) -> Result<Option<PaperSummary>> {
            self.fetch_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_fetch.load(Ordering::SeqCst) {
                return Err(Error::RequestFailed("index down".to_owned()));
            }
            Ok(self.papers_by_id.get(id).cloned())
        }
    }

    #[derive(Default)]
    struct FakeGraph {
        graph_id: Option<String>,
        citations: Vec<CitingPaper>,
        fail_match: bool,
        fail_citations: bool,
    }

    impl CitationGraph for FakeGraph {
        async fn match_title(&self, _title: &str) -> Result<Option<String>> {
            if self.fail_match {
                return Err(Error::RequestFailed("graph down".to_owned()));
            }
            Ok(self.graph_id.clone())
        }

        async fn citations_of(&self, _graph_id: &str, _limit: usize) -> Result<Vec<CitingPaper>> {
            if self.fail_citations {
                return Err(Error::RequestFailed("graph down".to_owned()));
            }
            Ok(self.citations.clone())
        }
    }

    /// Index primed with the GPT-4 source paper under its arXiv ID.
    fn gpt4_index() -> FakeIndex {
        let mut index = FakeIndex::default();
        index.papers_by_id.insert(
            "2303.08774".to_owned(),
            paper("2303.08774v4", "GPT-4 Technical Report"),
        );
        index
    }

    #[tokio::test]
    async fn keyword_search_replaces_results() {
        let index = FakeIndex::with_results("rust", vec![paper("2401.00001", "Rust for ML")]);
        let engine = SearchEngine::with_backends(index, FakeGraph::default());

        engine.run_keyword_search("rust").await.unwrap();

        let state = engine.snapshot();
        assert_eq!(state.mode, SearchMode::Keyword);
        assert_eq!(state.status, SearchStatus::Ready);
        assert_eq!(state.papers.len(), 1);
        assert_eq!(state.papers[0].id, "2401.00001");
    }

    #[tokio::test]
    async fn empty_keyword_is_rejected_without_network() {
        let engine = SearchEngine::with_backends(FakeIndex::default(), FakeGraph::default());

        assert_eq!(
            engine.run_keyword_search("  , ").await,
            Err(Error::EmptyQuery)
        );
        assert_eq!(engine.index.network_calls(), 0);
        assert_eq!(engine.snapshot().status, SearchStatus::Idle);
    }

    #[tokio::test]
    async fn invalid_arxiv_id_is_rejected_without_network() {
        let engine = SearchEngine::with_backends(FakeIndex::default(), FakeGraph::default());

        assert_eq!(
            engine.run_citation_search("not a valid url").await,
            Err(Error::InvalidArxivId)
        );
        assert_eq!(engine.index.network_calls(), 0);
    }

    #[tokio::test]
    async fn citation_search_populates_subject_and_citations() {
        let graph = FakeGraph {
            graph_id: Some("s2-abc".to_owned()),
            citations: vec![citing("Sparks of AGI")],
            ..FakeGraph::default()
        };
        let engine = SearchEngine::with_backends(gpt4_index(), graph);

        engine
            .run_citation_search("https://arxiv.org/abs/2303.08774")
            .await
            .unwrap();

        let state = engine.snapshot();
        assert_eq!(state.mode, SearchMode::Citation);
        assert_eq!(state.status, SearchStatus::Ready);

        let source = state.source_paper.unwrap();
        assert_eq!(source.id, "2303.08774");
        assert_eq!(source.title, "GPT-4 Technical Report");
        assert_eq!(source.authors, vec!["OpenAI Team"]);
        assert_eq!(source.semantic_scholar_id.as_deref(), Some("s2-abc"));

        assert!(state.scholar_link.unwrap().contains("scholar.google.com"));
        assert!(!state.key_terms.is_empty());
        assert!(state.key_terms.len() <= 5);
        assert!(state.key_terms.iter().all(|t| t.weight == 8));

        assert_eq!(state.citation_status, CitationStatus::Ready);
        assert_eq!(state.citing_papers.len(), 1);
        assert_eq!(state.citing_papers[0].title, "Sparks of AGI");
    }

    #[tokio::test]
    async fn missing_graph_id_degrades_to_no_citation_data() {
        let engine = SearchEngine::with_backends(gpt4_index(), FakeGraph::default());

        engine.run_citation_search("2303.08774").await.unwrap();

        let state = engine.snapshot();
        assert_eq!(state.status, SearchStatus::Ready);
        let source = state.source_paper.unwrap();
        assert_eq!(source.semantic_scholar_id, None);
        assert_eq!(source.title, "GPT-4 Technical Report");
        assert_eq!(state.citation_status, CitationStatus::Unavailable);
        assert!(state.citing_papers.is_empty());
    }

    #[tokio::test]
    async fn failed_graph_lookup_is_swallowed() {
        let graph = FakeGraph {
            fail_match: true,
            ..FakeGraph::default()
        };
        let engine = SearchEngine::with_backends(gpt4_index(), graph);

        engine.run_citation_search("2303.08774").await.unwrap();

        let state = engine.snapshot();
        assert_eq!(state.status, SearchStatus::Ready);
        assert_eq!(state.source_paper.unwrap().semantic_scholar_id, None);
        assert_eq!(state.citation_status, CitationStatus::Unavailable);
    }

    #[tokio::test]
    async fn related_papers_exclude_source_versions() {
        let mut index = gpt4_index();
        // The related-paper query is built from terms of the source title,
        // so "gpt" appears in it.
        index.search_results.push((
            "gpt".to_owned(),
            vec![
                paper("2303.08774v2", "GPT-4 Technical Report"),
                paper("2310.00001", "GPT Variants Surveyed"),
            ],
        ));
        let engine = SearchEngine::with_backends(index, FakeGraph::default());

        engine.run_citation_search("2303.08774").await.unwrap();

        let state = engine.snapshot();
        assert_eq!(state.papers.len(), 1);
        assert_eq!(state.papers[0].id, "2310.00001");
    }

    #[tokio::test]
    async fn mode_switch_clears_citation_state() {
        let graph = FakeGraph {
            graph_id: Some("s2-abc".to_owned()),
            citations: vec![citing("Sparks of AGI")],
            ..FakeGraph::default()
        };
        let engine = SearchEngine::with_backends(gpt4_index(), graph);
        engine.run_citation_search("2303.08774").await.unwrap();
        assert!(engine.snapshot().source_paper.is_some());

        engine.run_keyword_search("rust").await.unwrap();

        let state = engine.snapshot();
        assert_eq!(state.mode, SearchMode::Keyword);
        assert_eq!(state.source_paper, None);
        assert_eq!(state.scholar_link, None);
        assert!(state.key_terms.is_empty());
        assert!(state.citing_papers.is_empty());
        assert_eq!(state.citation_status, CitationStatus::Idle);
    }

    #[tokio::test]
    async fn stale_response_is_discarded() {
        let mut index = FakeIndex::with_results("slow", vec![paper("1111.11111", "Old Result")]);
        index
            .search_results
            .push(("fast".to_owned(), vec![paper("2222.22222", "New Result")]));
        index
            .search_delays
            .push(("slow".to_owned(), Duration::from_millis(80)));
        let engine = Arc::new(SearchEngine::with_backends(index, FakeGraph::default()));

        let slow_engine = Arc::clone(&engine);
        let slow = tokio::spawn(async move { slow_engine.run_keyword_search("slow").await });
        tokio::time::sleep(Duration::from_millis(20)).await;
        engine.run_keyword_search("fast").await.unwrap();
        slow.await.unwrap().unwrap();

        let state = engine.snapshot();
        assert_eq!(state.status, SearchStatus::Ready);
        assert_eq!(state.papers.len(), 1);
        assert_eq!(state.papers[0].id, "2222.22222");
    }

    #[tokio::test]
    async fn primary_failure_clears_results_and_surfaces_error() {
        let index = FakeIndex::with_results("rust", vec![paper("2401.00001", "Rust for ML")]);
        let engine = SearchEngine::with_backends(index, FakeGraph::default());
        engine.run_keyword_search("rust").await.unwrap();
        assert_eq!(engine.snapshot().papers.len(), 1);

        engine.index.fail_search.store(true, Ordering::SeqCst);
        let err = engine.run_keyword_search("rust").await.unwrap_err();
        assert_eq!(err, Error::RequestFailed("index down".to_owned()));

        let state = engine.snapshot();
        assert!(state.papers.is_empty());
        assert!(matches!(state.status, SearchStatus::Failed(_)));
    }

    #[tokio::test]
    async fn paper_not_found_aborts_citation_pipeline() {
        let engine = SearchEngine::with_backends(FakeIndex::default(), FakeGraph::default());

        let err = engine.run_citation_search("2303.08774").await.unwrap_err();
        assert_eq!(err, Error::PaperNotFound("2303.08774".to_owned()));
        assert!(matches!(engine.snapshot().status, SearchStatus::Failed(_)));
    }

    #[tokio::test]
    async fn citation_fetch_failure_keeps_main_results() {
        let graph = FakeGraph {
            graph_id: Some("s2-abc".to_owned()),
            fail_citations: true,
            ..FakeGraph::default()
        };
        let mut index = gpt4_index();
        index
            .search_results
            .push(("gpt".to_owned(), vec![paper("2310.00001", "GPT Variants")]));
        let engine = SearchEngine::with_backends(index, graph);

        engine.run_citation_search("2303.08774").await.unwrap();

        let state = engine.snapshot();
        assert_eq!(state.status, SearchStatus::Ready);
        assert!(matches!(state.citation_status, CitationStatus::Failed(_)));
        assert!(state.citing_papers.is_empty());
        assert_eq!(state.papers.len(), 1);
        assert!(state.source_paper.is_some());
    }
}
