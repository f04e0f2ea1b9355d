use crate::error::{Error, Result};
use crate::tokenizer::tokenize;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Raw documents keyed by file name. Iteration is in name order, which is
/// also the tie-break order when ranking files.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    docs: BTreeMap<String, String>,
}

impl Corpus {
    pub fn new() -> Self { Self::default() }

    pub fn insert(&mut self, name: impl Into<String>, text: impl Into<String>) {
        self.docs.insert(name.into(), text.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.docs.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize { self.docs.len() }

    pub fn is_empty(&self) -> bool { self.docs.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.docs.iter().map(|(name, text)| (name.as_str(), text.as_str()))
    }

    /// Tokenize every document into a collection ready for IDF computation.
    pub fn tokenized(&self) -> Collection {
        self.iter().map(|(name, text)| (name.to_string(), tokenize(text))).collect()
    }
}

impl<N: Into<String>, T: Into<String>> FromIterator<(N, T)> for Corpus {
    fn from_iter<I: IntoIterator<Item = (N, T)>>(iter: I) -> Self {
        let mut corpus = Corpus::new();
        for (name, text) in iter {
            corpus.insert(name, text);
        }
        corpus
    }
}

/// An ordered mapping from entry name to its token sequence.
///
/// Behaves like an insertion-ordered dictionary: inserting a name twice
/// replaces its tokens and keeps its original position. Ranking uses this
/// order to break ties.
#[derive(Debug, Clone, Default)]
pub struct Collection {
    entries: Vec<(String, Vec<String>)>,
    positions: HashMap<String, usize>,
}

impl Collection {
    pub fn new() -> Self { Self::default() }

    pub fn insert(&mut self, name: impl Into<String>, tokens: Vec<String>) {
        let name = name.into();
        match self.positions.get(&name) {
            Some(&pos) => self.entries[pos].1 = tokens,
            None => {
                self.positions.insert(name.clone(), self.entries.len());
                self.entries.push((name, tokens));
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.positions.get(name).map(|&pos| self.entries[pos].1.as_slice())
    }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(name, tokens)| (name.as_str(), tokens.as_slice()))
    }
}

impl FromIterator<(String, Vec<String>)> for Collection {
    fn from_iter<I: IntoIterator<Item = (String, Vec<String>)>>(iter: I) -> Self {
        let mut collection = Collection::new();
        for (name, tokens) in iter {
            collection.insert(name, tokens);
        }
        collection
    }
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| extensions.iter().any(|e| e.trim_start_matches('.').eq_ignore_ascii_case(ext)))
}

/// Read every file directly inside `dir` whose extension is in `extensions`.
/// Subdirectories are not descended into.
pub fn load_files(dir: &Path, extensions: &[String]) -> Result<Corpus> {
    if !dir.is_dir() {
        return Err(Error::NotFound(dir.to_path_buf()));
    }
    let mut corpus = Corpus::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).follow_links(true) {
        let entry = match entry {
            Ok(entry) => entry,
            // A dangling link or unreadable entry only matters if we would have read it.
            Err(err) if err.path().is_some_and(|p| !has_extension(p, extensions)) => continue,
            Err(err) => return Err(err.into()),
        };
        let path = entry.path();
        if !entry.file_type().is_file() || !has_extension(path, extensions) { continue; }
        let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let name = entry.file_name().to_string_lossy().into_owned();
        corpus.insert(name, text);
    }
    if corpus.is_empty() {
        tracing::warn!(dir = %dir.display(), ?extensions, "no matching files in corpus directory");
    } else {
        tracing::info!(dir = %dir.display(), num_docs = corpus.len(), "loaded corpus");
    }
    Ok(corpus)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn txt() -> Vec<String> { vec!["txt".to_string()] }

    #[test]
    fn loads_only_matching_extensions() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "alpha").unwrap();
        fs::write(dir.path().join("b.TXT"), "beta").unwrap();
        fs::write(dir.path().join("c.md"), "gamma").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested/d.txt"), "delta").unwrap();

        let corpus = load_files(dir.path(), &txt()).unwrap();
        let names: Vec<&str> = corpus.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["a.txt", "b.TXT"]);
        assert_eq!(corpus.get("a.txt"), Some("alpha"));
    }

    #[cfg(unix)]
    #[test]
    fn dangling_link_with_other_extension_is_skipped() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "alpha").unwrap();
        std::os::unix::fs::symlink(dir.path().join("gone"), dir.path().join("stale.lnk")).unwrap();

        let corpus = load_files(dir.path(), &txt()).unwrap();
        assert_eq!(corpus.len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn dangling_link_with_matching_extension_fails() {
        let dir = tempdir().unwrap();
        std::os::unix::fs::symlink(dir.path().join("gone.txt"), dir.path().join("b.txt")).unwrap();
        assert!(matches!(load_files(dir.path(), &txt()), Err(Error::Walk(_))));
    }

    #[test]
    fn missing_directory_is_not_found() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope");
        let err = load_files(&missing, &txt()).unwrap_err();
        assert!(matches!(err, Error::NotFound(p) if p == missing));
    }

    #[test]
    fn empty_directory_gives_empty_corpus() {
        let dir = tempdir().unwrap();
        assert!(load_files(dir.path(), &txt()).unwrap().is_empty());
    }

    #[test]
    fn collection_reinsert_keeps_position() {
        let mut c = Collection::new();
        c.insert("x", vec!["a".into()]);
        c.insert("y", vec!["b".into()]);
        c.insert("x", vec!["c".into()]);
        let names: Vec<&str> = c.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["x", "y"]);
        assert_eq!(c.get("x"), Some(&["c".to_string()][..]));
        assert_eq!(c.len(), 2);
    }
}
