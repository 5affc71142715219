//! Word-cloud normalizer: free text in, countable terms out.
//!
//! Text is split on spaces, then on hyphens. Each piece loses its punctuation and numerals and
//! is lowercased. Empty pieces, English stopwords and version tokens such as `v1.2` are dropped.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

lazy_static! {
    static ref STRIP: Regex = Regex::new(r"[\p{P}\p{N}]").expect("valid regex");
    static ref VERSION: Regex = Regex::new(r"(?i)v\d+\.\d+").expect("valid regex");
    static ref STOPWORDS: HashSet<&'static str> = {
        let words: &[&str] = &[
            "i","me","my","myself","we","our","ours","ourselves",
            "you","your","yours","yourself","yourselves",
            "he","him","his","himself","she","her","hers","herself",
            "it","its","itself","they","them","their","theirs","themselves",
            "what","which","who","whom","this","that","these","those",
            "am","is","are","was","were","be","been","being",
            "have","has","had","having","do","does","did","doing",
            "a","an","the","and","but","if","or","because","as","until","while",
            "of","at","by","for","with","about","against","between","into","through",
            "during","before","after","above","below","to","from","up","down",
            "in","out","on","off","over","under","again","further","then","once",
            "here","there","when","where","why","how",
            "all","any","both","each","few","more","most","other","some","such",
            "no","nor","not","only","own","same","so","than","too","very",
            "s","t","can","will","just","don","should","now"
        ];
        words.iter().copied().collect()
    };
}

pub fn is_stopword(token: &str) -> bool { STOPWORDS.contains(token) }

/// True for pieces containing a version like `v1.2`, `V7.2` or `dev1.2`. Checked before numerals are stripped,
/// otherwise every version would collapse to a lone `v`.
pub fn is_version(piece: &str) -> bool { VERSION.is_match(piece) }

/// Strips punctuation and numerals, then lowercases.
pub fn tidy_word(piece: &str) -> String {
    STRIP.replace_all(piece, "").to_lowercase()
}

fn keep(token: &str) -> bool {
    !token.is_empty() && !is_stopword(token)
}

/// Lazily yields normalized tokens in left-to-right order. Duplicates are kept.
pub fn tokens(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(' ')
        .flat_map(|word| word.split('-'))
        .filter(|piece| !is_version(piece))
        .map(tidy_word)
        .filter(|token| keep(token))
}
