//! Transcript fragment refinement
//!
//! Raw speech-recognition output arrives as loosely punctuated, unevenly
//! spaced text. [`refine`] cleans one fragment into sentence-like form:
//!
//! 1. Whitespace runs collapse to a single space; ends are trimmed.
//! 2. The standalone lowercase word `i` becomes `I`.
//! 3. Whitespace immediately before `, . ! ? ; :` is removed.
//! 4. A terminal `.` is appended unless the text already ends in `. ! ?`.
//! 5. A `.` directly followed by a word character gains a space after it.
//!
//! Total on any input; the empty fragment refines to `"."`.

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static LONE_I: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bi\b").unwrap());
static SPACE_BEFORE_PUNCT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s([,.!?;:])").unwrap());
static PERIOD_THEN_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.(\w)").unwrap());

/// Refine one raw recognized fragment into cleaned, sentence-like text.
pub fn refine(raw: &str) -> String {
    let s = WHITESPACE_RUN.replace_all(raw, " ");
    let s = s.trim();
    let s = LONE_I.replace_all(s, "I");
    let mut s = SPACE_BEFORE_PUNCT.replace_all(&s, "$1").into_owned();
    if !s.ends_with('.') && !s.ends_with('!') && !s.ends_with('?') {
        s.push('.');
    }
    PERIOD_THEN_WORD.replace_all(&s, ". $1").into_owned()
}
