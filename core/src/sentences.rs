//! Passage and sentence segmentation.
//!
//! Sentence boundaries follow Unicode UAX #29, with one adjustment: a break
//! directly after a known abbreviation or an initial (`Dr.`, `J.`, `U.S.`) is
//! joined with the following piece. Abbreviations that prefix a number
//! (`No.`, `Vol.`) only join when the next piece starts with a digit.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;
use std::iter::Peekable;
use unicode_segmentation::{USentenceBoundIndices, UnicodeSegmentation};

lazy_static! {
    static ref INITIALS: Regex = Regex::new(r"^(?:\p{L}\.)+$").expect("valid regex");
    static ref ABBREVIATIONS: HashSet<&'static str> = {
        let words: &[&str] = &[
            "mr","mrs","ms","dr","prof","sr","jr","st","mt","ft","rev","hon","gen","col",
            "lt","sgt","capt","cmdr","gov","sen","rep","pres","vs","cf","approx","dept",
            "eds","jan","feb","apr","jun","jul","aug","sept","oct","nov",
        ];
        words.iter().copied().collect()
    };
    static ref NUMBER_PREFIXES: HashSet<&'static str> = {
        let words: &[&str] = &["no","nos","vol","vols","fig","figs","pp","ch","art","sec"];
        words.iter().copied().collect()
    };
}

/// Whether the break after `piece` falls inside a sentence. `next` is the
/// piece that follows, if any.
fn joins_next(piece: &str, next: Option<&str>) -> bool {
    let Some(last) = piece.split_whitespace().last() else { return false };
    if !last.ends_with('.') { return false; }
    let last = last.trim_start_matches(|c: char| !c.is_alphanumeric());
    if INITIALS.is_match(last) { return true; }
    let word = last.trim_end_matches('.').to_lowercase();
    if ABBREVIATIONS.contains(word.as_str()) { return true; }
    NUMBER_PREFIXES.contains(word.as_str())
        && next.is_some_and(|n| n.trim_start().starts_with(|c: char| c.is_ascii_digit()))
}

/// Lazy iterator over the trimmed, non-empty sentences of a passage.
pub struct Sentences<'a> {
    text: &'a str,
    bounds: Peekable<USentenceBoundIndices<'a>>,
}

impl<'a> Iterator for Sentences<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let text = self.text;
        let mut start: Option<usize> = None;
        let mut end = 0;
        while let Some((idx, piece)) = self.bounds.next() {
            let from = *start.get_or_insert(idx);
            end = idx + piece.len();
            let next = self.bounds.peek().map(|&(_, p)| p);
            if joins_next(piece, next) { continue; }
            let sentence = text[from..end].trim();
            if sentence.is_empty() {
                start = None;
                continue;
            }
            return Some(sentence);
        }
        let sentence = text[start?..end].trim();
        (!sentence.is_empty()).then_some(sentence)
    }
}

/// Split a passage into sentences. Each call starts a fresh iterator.
pub fn sentences(passage: &str) -> Sentences<'_> {
    Sentences { text: passage, bounds: passage.split_sentence_bound_indices().peekable() }
}

/// Split a document into newline-separated passages.
pub fn passages(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n')
}

/// All sentences of a document, passage by passage.
pub fn segment(text: &str) -> impl Iterator<Item = &str> {
    passages(text).flat_map(sentences)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_terminal_punctuation() {
        let got: Vec<&str> = sentences("Snakes are reptiles. Are they? Yes!").collect();
        assert_eq!(got, vec!["Snakes are reptiles.", "Are they?", "Yes!"]);
    }

    #[test]
    fn keeps_abbreviations_inside_sentences() {
        let got: Vec<&str> = sentences("Dr. Smith met J. R. Tolkien. They talked.").collect();
        assert_eq!(got, vec!["Dr. Smith met J. R. Tolkien.", "They talked."]);
    }

    #[test]
    fn number_prefixes_join_only_before_digits() {
        let got: Vec<&str> = sentences("He said no. The meeting ended.").collect();
        assert_eq!(got, vec!["He said no.", "The meeting ended."]);
        let got: Vec<&str> = sentences("See No. 5 Road for details. Then leave.").collect();
        assert_eq!(got, vec!["See No. 5 Road for details.", "Then leave."]);
    }

    #[test]
    fn passages_split_on_newlines() {
        let got: Vec<&str> = segment("First line\n\nSecond one. Third.").collect();
        assert_eq!(got, vec!["First line", "Second one.", "Third."]);
    }

    #[test]
    fn restartable() {
        let passage = "One. Two.";
        let first: Vec<&str> = sentences(passage).collect();
        let second: Vec<&str> = sentences(passage).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn blank_passage_has_no_sentences() {
        assert_eq!(sentences("   ").count(), 0);
        assert_eq!(sentences("").count(), 0);
    }
}
