//! Weighted keyword extraction from paper titles and abstracts

use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

/// A keyword candidate with its extraction weight. Higher weights rank first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightedTerm {
    /// Lowercase, non-empty term.
    pub term: String,
    /// Always positive.
    pub weight: u32,
}

/// Maximum number of terms returned per extraction.
const TERM_LIMIT: usize = 8;

const DOMAIN_WEIGHT: u32 = 10;
const TECHNICAL_WEIGHT: u32 = 8;
const FREQUENT_BASE_WEIGHT: u32 = 3;
const RARE_WEIGHT: u32 = 2;

/// ML/CS phrases matched as substrings of the lowercased input.
const DOMAIN_TERMS: &[&str] = &[
    "machine learning",
    "deep learning",
    "neural network",
    "artificial intelligence",
    "natural language processing",
    "computer vision",
    "reinforcement learning",
    "large language model",
    "language model",
    "llm",
    "transformer",
    "attention mechanism",
    "diffusion model",
    "generative adversarial network",
    "gan",
    "convolutional neural network",
    "cnn",
    "recurrent neural network",
    "rnn",
    "graph neural network",
    "federated learning",
    "transfer learning",
    "self-supervised learning",
    "representation learning",
    "contrastive learning",
    "fine-tuning",
    "prompt engineering",
    "retrieval augmented generation",
    "knowledge graph",
    "speech recognition",
    "object detection",
    "semantic segmentation",
    "question answering",
    "text generation",
];

/// Common English function words dropped by the frequency passes.
const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
    "from", "as", "is", "are", "was", "were", "be", "been", "being", "this", "that", "these",
    "those", "it", "its", "we", "our", "you", "your", "they", "their", "can", "will", "has",
    "have", "had", "not", "using", "based", "via", "towards",
];

/// ALL-CAPS acronyms, CamelCase words, alphanumerics with embedded digits,
/// and words with an internal uppercase letter.
static TECHNICAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(?:[A-Z]{2,}[a-z]*|[A-Z][a-z]+(?:[A-Z][a-z]*)+|[A-Za-z]+\d[A-Za-z\d]*|\d+[A-Za-z][A-Za-z\d]*|[a-z]+[A-Z][A-Za-z]*)\b",
    )
    .expect("technical term pattern is valid")
});

/// Extract up to eight weighted keyword candidates from `text`, sorted by
/// weight descending (ties keep discovery order).
///
/// Four passes feed the ranking: domain-vocabulary substrings (weight 10),
/// technical tokens from the original-case text (weight 8), repeated tokens
/// (weight 3 + count), and longer one-off tokens (weight 2). The later passes
/// skip terms already emitted; the domain and technical passes do not
/// cross-check each other, so the same term can appear once per pass with
/// both weights.
pub fn extract_terms(text: &str) -> Vec<WeightedTerm> {
    let lowered = text.to_lowercase();
    if lowered.trim().is_empty() {
        return Vec::new();
    }

    let mut terms: Vec<WeightedTerm> = Vec::new();

    for &domain in DOMAIN_TERMS {
        if lowered.contains(domain) {
            terms.push(WeightedTerm {
                term: domain.to_owned(),
                weight: DOMAIN_WEIGHT,
            });
        }
    }

    let mut seen = HashSet::new();
    for found in TECHNICAL_RE.find_iter(text) {
        let token = found.as_str();
        if matches!(token, "I" | "A" | "The") || !seen.insert(token) {
            continue;
        }
        terms.push(WeightedTerm {
            term: token.to_lowercase(),
            weight: TECHNICAL_WEIGHT,
        });
    }

    let mut counts: HashMap<&str, u32> = HashMap::new();
    let mut discovery: Vec<&str> = Vec::new();
    for token in lowered.split_whitespace() {
        if token.len() <= 2
            || !token.chars().all(|c| c.is_ascii_alphanumeric())
            || STOP_WORDS.contains(&token)
        {
            continue;
        }
        let count = counts.entry(token).or_insert(0);
        if *count == 0 {
            discovery.push(token);
        }
        *count += 1;
    }

    for &token in &discovery {
        let count = counts[token];
        if count > 1 && !terms.iter().any(|t| t.term == token) {
            terms.push(WeightedTerm {
                term: token.to_owned(),
                weight: FREQUENT_BASE_WEIGHT + count,
            });
        }
    }

    for &token in &discovery {
        if counts[token] == 1 && token.len() > 3 && !terms.iter().any(|t| t.term == token) {
            terms.push(WeightedTerm {
                term: token.to_owned(),
                weight: RARE_WEIGHT,
            });
        }
    }

    terms.sort_by(|a, b| b.weight.cmp(&a.weight));
    terms.truncate(TERM_LIMIT);
    terms
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extraction_is_deterministic() {
        let text = "Attention Is All You Need: transformer models for NLP tasks";
        assert_eq!(extract_terms(text), extract_terms(text));
    }

    #[test]
    fn never_returns_more_than_eight_terms() {
        let text = "alpha alpha beta beta gamma gamma delta delta epsilon epsilon \
                    zeta zeta theta theta kappa kappa lambda lambda sigma sigma";
        assert!(extract_terms(text).len() <= 8);
    }

    #[test]
    fn domain_terms_get_weight_ten() {
        let terms = extract_terms("A survey of machine learning methods");
        assert!(terms.contains(&WeightedTerm {
            term: "machine learning".to_owned(),
            weight: 10,
        }));
    }

    #[test]
    fn domain_and_technical_passes_both_emit_llm() {
        // The domain pass and the technical pass do not dedupe against each
        // other; "LLM" lands once with weight 10 and once with weight 8. Kept
        // as-is rather than merged to the max weight.
        let terms = extract_terms("LLM agents in production");
        let weights: Vec<u32> = terms
            .iter()
            .filter(|t| t.term == "llm")
            .map(|t| t.weight)
            .collect();
        assert_eq!(weights, vec![10, 8]);
    }

    #[test]
    fn repeated_tokens_are_weighted_by_count() {
        let terms = extract_terms("wombat wombat wombat fox");
        assert_eq!(
            terms,
            vec![WeightedTerm {
                term: "wombat".to_owned(),
                weight: 6,
            }]
        );
    }

    #[test]
    fn technical_tokens_are_detected_and_lowercased() {
        let terms = extract_terms("Scaling GPT4 with LoRA on BERT embeddings");
        for expected in ["gpt4", "lora", "bert"] {
            assert!(
                terms
                    .iter()
                    .any(|t| t.term == expected && t.weight == 8),
                "missing technical term {expected}: {terms:?}"
            );
        }
    }

    #[test]
    fn stop_words_and_short_tokens_are_dropped() {
        let terms = extract_terms("the of to it we an is on");
        assert!(terms.is_empty());
    }

    #[test]
    fn empty_input_yields_no_terms() {
        assert!(extract_terms("").is_empty());
        assert!(extract_terms("   \t\n").is_empty());
    }

    #[test]
    fn ties_keep_discovery_order() {
        let terms = extract_terms("zebra quokka llama");
        let names: Vec<&str> = terms.iter().map(|t| t.term.as_str()).collect();
        assert_eq!(names, vec!["zebra", "quokka", "llama"]);
        assert!(terms.iter().all(|t| t.weight == 2));
    }
}
