use crate::corpus::{Collection, Corpus};
use crate::error::{Error, Result};
use crate::idf::{compute_idfs, IdfTable};
use crate::rank::{top_files, top_sentences, Ranked, RankedSentence};
use crate::sentences::segment;
use crate::tokenizer::{tokenize, tokenize_query, Query};
use serde::{Deserialize, Serialize};

/// Default number of files whose sentences are considered.
pub const FILE_MATCHES: usize = 1;
/// Default number of sentences returned.
pub const SENTENCE_MATCHES: usize = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub file_matches: usize,
    pub sentence_matches: usize,
    /// File extensions read from the corpus directory, without the dot.
    pub extensions: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file_matches: FILE_MATCHES,
            sentence_matches: SENTENCE_MATCHES,
            extensions: vec!["txt".to_string()],
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.file_matches == 0 {
            return Err(Error::InvalidInput("file_matches must be at least 1".into()));
        }
        if self.sentence_matches == 0 {
            return Err(Error::InvalidInput("sentence_matches must be at least 1".into()));
        }
        if self.extensions.iter().all(|e| e.trim_start_matches('.').is_empty()) {
            return Err(Error::InvalidInput("at least one file extension is required".into()));
        }
        Ok(())
    }
}

/// Result of one query: the files searched and the best sentences in them.
/// Both lists may be empty when nothing matched.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Answer {
    pub files: Vec<Ranked>,
    pub sentences: Vec<RankedSentence>,
}

impl Answer {
    pub fn best_sentence(&self) -> Option<&str> {
        self.sentences.first().map(|s| s.text.as_str())
    }

    pub fn is_empty(&self) -> bool { self.sentences.is_empty() }
}

/// Tokenized corpus with its file-level IDF table. Read-only once built, so
/// one index can answer any number of queries.
#[derive(Debug)]
pub struct Index<'c> {
    corpus: &'c Corpus,
    files: Collection,
    idfs: Option<IdfTable>,
}

impl<'c> Index<'c> {
    pub fn build(corpus: &'c Corpus) -> Result<Self> {
        let files = corpus.tokenized();
        let idfs = if files.is_empty() { None } else { Some(compute_idfs(&files)?) };
        Ok(Self { corpus, files, idfs })
    }

    pub fn files(&self) -> &Collection { &self.files }

    pub fn idfs(&self) -> Option<&IdfTable> { self.idfs.as_ref() }

    /// Collect the sentences of the given files, keyed by sentence text.
    /// Sentences without tokens are dropped.
    fn sentences_of(&self, files: &[Ranked]) -> Collection {
        let mut sentences = Collection::new();
        for file in files {
            let Some(text) = self.corpus.get(&file.name) else { continue };
            for sentence in segment(text) {
                let tokens = tokenize(sentence);
                if tokens.is_empty() { continue; }
                sentences.insert(sentence, tokens);
            }
        }
        sentences
    }

    pub fn answer(&self, query: &Query, config: &Config) -> Result<Answer> {
        config.validate()?;
        let Some(file_idfs) = &self.idfs else {
            tracing::debug!("empty corpus, nothing to rank");
            return Ok(Answer::default());
        };
        if query.is_empty() {
            tracing::debug!("query has no tokens after normalization");
            return Ok(Answer::default());
        }
        if !query.iter().any(|term| file_idfs.contains(term)) {
            tracing::debug!("no query token occurs in the corpus");
            return Ok(Answer::default());
        }

        let files = top_files(query, &self.files, file_idfs, config.file_matches);
        let sentences = self.sentences_of(&files);
        if sentences.is_empty() {
            tracing::debug!(files = files.len(), "selected files have no usable sentences");
            return Ok(Answer { files, sentences: Vec::new() });
        }

        let sentence_idfs = compute_idfs(&sentences)?;
        let mut sentences = top_sentences(query, &sentences, &sentence_idfs, config.sentence_matches);
        // Sentences sharing no token with the query sort last; they are not answers.
        sentences.retain(|s| s.density > 0.0);
        Ok(Answer { files, sentences })
    }
}

/// Answer a free-text query against `corpus` in one step.
pub fn answer(corpus: &Corpus, query: &str, config: &Config) -> Result<Answer> {
    let query = tokenize_query(query);
    tracing::debug!(?query, "tokenized query");
    Index::build(corpus)?.answer(&query, config)
}
