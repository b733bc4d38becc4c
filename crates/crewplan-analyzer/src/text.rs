// SPDX-FileCopyrightText: 2026 Crewplan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Term matching and keyword extraction over lowercased text.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::patterns::STOP_WORDS;

/// Runs of Hangul syllables, Latin letters and digits.
static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[가-힣a-z0-9]+").expect("valid regex"));

/// Maximum number of keywords kept.
pub const MAX_KEYWORDS: usize = 10;

/// Whether `term` occurs in `text`.
///
/// ASCII terms must stand on word boundaries so `ai` does not match inside
/// `email`. Hangul terms match as substrings since particles attach directly.
pub fn contains_term(text: &str, term: &str) -> bool {
    if !term.is_ascii() {
        return text.contains(term);
    }
    let bytes = text.as_bytes();
    text.match_indices(term).any(|(start, _)| {
        let end = start + term.len();
        let before_ok = start == 0 || !bytes[start - 1].is_ascii_alphanumeric();
        let after_ok = end == bytes.len() || !bytes[end].is_ascii_alphanumeric();
        before_ok && after_ok
    })
}

/// Number of `terms` that occur in `text`. Each term counts once.
pub fn count_terms(text: &str, terms: &[&str]) -> usize {
    terms.iter().filter(|t| contains_term(text, t)).count()
}

/// Word tokens of `text` in order of appearance.
pub fn tokens(text: &str) -> impl Iterator<Item = &str> {
    TOKEN_RE.find_iter(text).map(|m| m.as_str())
}

/// Up to [`MAX_KEYWORDS`] keywords, most frequent first, first-seen on ties.
///
/// Stop words and single-character tokens are dropped.
pub fn extract_keywords(text: &str) -> Vec<String> {
    // token -> (count, first index)
    let mut freq: HashMap<&str, (usize, usize)> = HashMap::new();
    for (index, token) in tokens(text)
        .filter(|t| t.chars().count() >= 2 && !STOP_WORDS.contains(t))
        .enumerate()
    {
        freq.entry(token).or_insert((0, index)).0 += 1;
    }

    let mut ranked: Vec<(&str, usize, usize)> =
        freq.into_iter().map(|(t, (c, i))| (t, c, i)).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
    ranked
        .into_iter()
        .take(MAX_KEYWORDS)
        .map(|(t, _, _)| t.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_terms_need_word_boundaries() {
        assert!(contains_term("build an ai tool", "ai"));
        assert!(!contains_term("send email", "ai"));
        assert!(contains_term("ai", "ai"));
        assert!(contains_term("react로 만든 화면", "react"));
        assert!(!contains_term("reactive", "react"));
        assert!(contains_term("use react native", "react native"));
    }

    #[test]
    fn hangul_terms_match_as_substrings() {
        assert!(contains_term("간단한 웹앱 만들어줘", "앱"));
        assert!(contains_term("데이터를 분석해줘", "데이터"));
        assert!(!contains_term("블로그", "게임"));
    }

    #[test]
    fn count_terms_counts_each_term_once() {
        assert_eq!(count_terms("데이터 데이터 분석", &["데이터", "분석", "통계"]), 2);
    }

    #[test]
    fn keywords_rank_by_frequency_then_first_seen() {
        let kws = extract_keywords("beta alpha beta gamma alpha beta");
        assert_eq!(kws, vec!["beta", "alpha", "gamma"]);
    }

    #[test]
    fn keywords_drop_stop_words_and_short_tokens() {
        let kws = extract_keywords("a 에서 으로 x 웹앱 만들어줘");
        assert_eq!(kws, vec!["웹앱", "만들어줘"]);
    }

    #[test]
    fn keywords_cap_at_ten() {
        let text = (0..15).map(|i| format!("w{i:02}")).collect::<Vec<_>>().join(" ");
        let kws = extract_keywords(&text);
        assert_eq!(kws.len(), MAX_KEYWORDS);
        assert_eq!(kws[0], "w00");
        assert_eq!(kws[9], "w09");
    }

    #[test]
    fn empty_text_has_no_keywords() {
        assert!(extract_keywords("").is_empty());
        assert!(extract_keywords("!!! ??? ...").is_empty());
    }
}
