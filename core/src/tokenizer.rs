use lazy_static::lazy_static;
use regex::Regex;
use std::collections::{BTreeSet, HashSet};
use unicode_normalization::UnicodeNormalization;
use unicode_segmentation::UnicodeSegmentation;

/// A query is a set of normalized tokens; order and duplicates are irrelevant.
pub type Query = BTreeSet<String>;

lazy_static! {
    static ref CONTRACTION: Regex =
        Regex::new(r"^(?P<stem>.+?)(?P<suffix>n['’]t|['’](?:s|re|ve|ll|d|m))$").expect("valid regex");
    static ref STOPWORDS: HashSet<&'static str> = {
        let words: &[&str] = &[
            "i","me","my","myself","we","our","ours","ourselves",
            "you","you're","you've","you'll","you'd","your","yours","yourself","yourselves",
            "he","him","his","himself","she","she's","her","hers","herself",
            "it","it's","its","itself","they","them","their","theirs","themselves",
            "what","which","who","whom","this","that","that'll","these","those",
            "am","is","are","was","were","be","been","being","have","has","had","having",
            "do","does","did","doing","a","an","the","and","but","if","or","because","as",
            "until","while","of","at","by","for","with","about","against","between","into",
            "through","during","before","after","above","below","to","from","up","down",
            "in","out","on","off","over","under","again","further","then","once",
            "here","there","when","where","why","how","all","any","both","each","few",
            "more","most","other","some","such","no","nor","not","only","own","same",
            "so","than","too","very","s","t","can","will","just","don","don't","should",
            "should've","now","d","ll","m","o","re","ve","y","ain","aren","aren't",
            "couldn","couldn't","didn","didn't","doesn","doesn't","hadn","hadn't",
            "hasn","hasn't","haven","haven't","isn","isn't","ma","mightn","mightn't",
            "mustn","mustn't","needn","needn't","shan","shan't","shouldn","shouldn't",
            "wasn","wasn't","weren","weren't","won","won't","wouldn","wouldn't"
        ];
        words.iter().copied().collect()
    };
    static ref PUNCTUATION: HashSet<char> = {
        // ASCII punctuation plus the typographic marks that survive NFKC.
        let typographic = ['‘', '’', '“', '”', '–', '—', '…', '«', '»', '¿', '¡'];
        (0u8..=127)
            .map(char::from)
            .filter(char::is_ascii_punctuation)
            .chain(typographic)
            .collect()
    };
}

pub fn is_stopword(token: &str) -> bool { STOPWORDS.contains(token) }

/// True when every character of `token` is punctuation. A token that merely
/// contains punctuation, such as `3.14` or `o'clock`, is kept.
pub fn is_punctuation(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| PUNCTUATION.contains(&c))
}

/// Split a word unit into its stem and a trailing contraction (`do` + `n't`).
fn split_contraction(unit: &str) -> (&str, Option<&str>) {
    match CONTRACTION.captures(unit) {
        Some(caps) => {
            let stem = caps.name("stem").map_or(unit, |m| m.as_str());
            (stem, caps.name("suffix").map(|m| m.as_str()))
        }
        None => (unit, None),
    }
}

/// Tokenize text using NFKC normalization, lowercasing, Unicode word
/// boundaries, stopword removal and punctuation removal. Token order follows
/// the input.
pub fn tokenize(text: &str) -> Vec<String> {
    let normalized = text.nfkc().collect::<String>().to_lowercase();
    let mut tokens = Vec::new();
    for unit in normalized.split_word_bounds() {
        if unit.chars().all(char::is_whitespace) { continue; }
        let (stem, suffix) = split_contraction(unit);
        for part in std::iter::once(stem).chain(suffix) {
            if is_stopword(part) || is_punctuation(part) { continue; }
            tokens.push(part.to_string());
        }
    }
    tokens
}

/// Tokenize a free-text query into its set of distinct tokens.
pub fn tokenize_query(text: &str) -> Query {
    tokenize(text).into_iter().collect()
}
