//! Document question answering over a directory of text files.
//!
//! Files are ranked against a query by TF-IDF, then sentences of the best
//! files are ranked by summed IDF with query term density as tie-break.

pub mod corpus;
pub mod error;
pub mod idf;
pub mod pipeline;
pub mod rank;
pub mod sentences;
pub mod tokenizer;

pub use corpus::{load_files, Collection, Corpus};
pub use error::{Error, Result};
pub use idf::{compute_idfs, IdfTable};
pub use pipeline::{answer, Answer, Config, Index, FILE_MATCHES, SENTENCE_MATCHES};
pub use rank::{top_files, top_sentences, Ranked, RankedSentence};
pub use tokenizer::{tokenize, tokenize_query, Query};
