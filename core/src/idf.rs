use crate::corpus::Collection;
use crate::error::{Error, Result};
use std::collections::{HashMap, HashSet};

/// Inverse document frequency per token, valid only for the collection it
/// was computed over.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IdfTable {
    idfs: HashMap<String, f64>,
    num_docs: usize,
}

impl IdfTable {
    pub fn get(&self, token: &str) -> Option<f64> { self.idfs.get(token).copied() }

    pub fn contains(&self, token: &str) -> bool { self.idfs.contains_key(token) }

    /// Number of documents in the collection the table was built from.
    pub fn num_docs(&self) -> usize { self.num_docs }

    /// Number of distinct tokens in the table.
    pub fn len(&self) -> usize { self.idfs.len() }

    pub fn is_empty(&self) -> bool { self.idfs.is_empty() }
}

/// Compute `idf = ln(N / df)` for every token that occurs in at least one
/// document, where `df` counts documents containing the token at least once.
pub fn compute_idfs(documents: &Collection) -> Result<IdfTable> {
    let num_docs = documents.len();
    if num_docs == 0 {
        return Err(Error::InvalidInput("cannot compute IDF over an empty collection".into()));
    }

    let mut df: HashMap<&str, u32> = HashMap::new();
    for (_, tokens) in documents.iter() {
        let seen_in_doc: HashSet<&str> = tokens.iter().map(String::as_str).collect();
        for token in seen_in_doc {
            *df.entry(token).or_insert(0) += 1;
        }
    }

    let n = num_docs as f64;
    let idfs: HashMap<String, f64> = df
        .into_iter()
        .map(|(token, df_t)| (token.to_string(), (n / df_t as f64).ln()))
        .collect();
    tracing::debug!(num_docs, num_terms = idfs.len(), "computed idf table");
    Ok(IdfTable { idfs, num_docs })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collection(docs: &[(&str, &str)]) -> Collection {
        docs.iter()
            .map(|(name, toks)| (name.to_string(), toks.split_whitespace().map(String::from).collect()))
            .collect()
    }

    #[test]
    fn idf_matches_log_ratio() {
        let docs = collection(&[
            ("a", "cat dog cat"),
            ("b", "cat fish"),
            ("c", "cat dog"),
            ("d", "bird"),
        ]);
        let idfs = compute_idfs(&docs).unwrap();
        assert_eq!(idfs.num_docs(), 4);
        assert!((idfs.get("cat").unwrap() - (4.0f64 / 3.0).ln()).abs() < 1e-12);
        assert!((idfs.get("dog").unwrap() - 2.0f64.ln()).abs() < 1e-12);
        assert!((idfs.get("fish").unwrap() - 4.0f64.ln()).abs() < 1e-12);
        assert!(idfs.get("horse").is_none());
        assert!(idfs.contains("bird") && !idfs.contains("horse"));
        assert_eq!(idfs.len(), 4);
        assert!(!idfs.is_empty());
    }

    #[test]
    fn token_in_every_document_has_zero_idf() {
        let docs = collection(&[("a", "x y"), ("b", "x")]);
        assert_eq!(compute_idfs(&docs).unwrap().get("x"), Some(0.0));

        let blank = collection(&[("a", ""), ("b", "")]);
        let idfs = compute_idfs(&blank).unwrap();
        assert!(idfs.is_empty());
        assert_eq!(idfs.num_docs(), 2);
    }

    #[test]
    fn idf_decreases_as_df_grows() {
        let docs = collection(&[
            ("a", "rare mid common"),
            ("b", "mid common"),
            ("c", "common"),
        ]);
        let idfs = compute_idfs(&docs).unwrap();
        let rare = idfs.get("rare").unwrap();
        let mid = idfs.get("mid").unwrap();
        let common = idfs.get("common").unwrap();
        assert!(rare > mid && mid > common);
    }

    #[test]
    fn empty_collection_is_invalid_input() {
        let err = compute_idfs(&Collection::new()).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn recomputing_is_idempotent() {
        let docs = collection(&[("a", "x y"), ("b", "y z")]);
        assert_eq!(compute_idfs(&docs).unwrap(), compute_idfs(&docs).unwrap());
    }
}
