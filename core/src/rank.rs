use crate::corpus::Collection;
use crate::idf::IdfTable;
use crate::tokenizer::Query;
use serde::Serialize;
use std::collections::HashMap;

/// A ranked document name with its TF-IDF score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ranked {
    pub name: String,
    pub score: f64,
}

/// A ranked sentence with its summed IDF score and query term density.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedSentence {
    pub text: String,
    pub score: f64,
    pub density: f64,
}

fn term_counts(tokens: &[String]) -> HashMap<&str, u32> {
    let mut counts = HashMap::new();
    for token in tokens {
        *counts.entry(token.as_str()).or_insert(0) += 1;
    }
    counts
}

/// Sum of `tf * idf` over query tokens present in the document. Empty
/// documents score zero.
fn tf_idf(query: &Query, tokens: &[String], idfs: &IdfTable) -> f64 {
    if tokens.is_empty() { return 0.0; }
    let total = tokens.len() as f64;
    let counts = term_counts(tokens);
    let mut score = 0.0;
    for term in query {
        let (Some(&count), Some(idf)) = (counts.get(term.as_str()), idfs.get(term)) else { continue };
        score += (count as f64 / total) * idf;
    }
    score
}

/// Rank documents by TF-IDF against `query` and return the best `n`.
///
/// `idfs` must have been computed over `files`. Ties keep the collection's
/// order, so results are deterministic.
pub fn top_files(query: &Query, files: &Collection, idfs: &IdfTable, n: usize) -> Vec<Ranked> {
    let mut scored: Vec<Ranked> = files
        .iter()
        .map(|(name, tokens)| Ranked { name: name.to_string(), score: tf_idf(query, tokens, idfs) })
        .collect();
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored.truncate(n);
    tracing::debug!(candidates = files.len(), returned = scored.len(), "ranked files");
    scored
}

/// Rank sentences by the summed IDF of the query tokens they contain,
/// breaking ties by query term density, and return the best `n`.
///
/// A query token counts once per sentence however often it repeats.
/// Sentences with no tokens are never scored.
pub fn top_sentences(query: &Query, sentences: &Collection, idfs: &IdfTable, n: usize) -> Vec<RankedSentence> {
    let mut scored: Vec<RankedSentence> = sentences
        .iter()
        .filter(|(_, tokens)| !tokens.is_empty())
        .map(|(text, tokens)| {
            let mut score = 0.0;
            let mut matched = 0usize;
            for term in query {
                if !tokens.contains(term) { continue; }
                matched += 1;
                score += idfs.get(term).unwrap_or(0.0);
            }
            let density = matched as f64 / tokens.len() as f64;
            RankedSentence { text: text.to_string(), score, density }
        })
        .collect();
    scored.sort_by(|a, b| b.score.total_cmp(&a.score).then(b.density.total_cmp(&a.density)));
    scored.truncate(n);
    tracing::debug!(candidates = sentences.len(), returned = scored.len(), "ranked sentences");
    scored
}
