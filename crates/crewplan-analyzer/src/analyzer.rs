// SPDX-FileCopyrightText: 2026 Crewplan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Heuristic requirement classification.
//!
//! Turns free text into a [`RequirementProfile`] using table-driven term
//! matching. No model call, no network, deterministic for a given input.

use std::collections::BTreeSet;

use crewplan_core::{AnalysisDetails, Complexity, DomainTag, RequirementProfile, team_size_for};
use tracing::debug;

use crate::patterns::{
    BASE_LIBRARIES, COMPLEXITY_FACTORS, COMPLEXITY_PATTERNS, DETAILED_WORD_COUNT, DOMAIN_PATTERNS,
    FEATURE_NOUNS, LIBRARY_ALIASES, TECH_PATTERNS, domain_libraries, domain_stack,
};
use crate::text::{MAX_KEYWORDS, contains_term, count_terms, extract_keywords, tokens};

/// Score contributed by one indicator hit, relative to a keyword hit.
const INDICATOR_WEIGHT: f64 = 0.5;

/// Domain score at which domain confidence saturates.
const DOMAIN_SCORE_SATURATION: f64 = 3.0;

/// Keyword hits a non-primary domain needs to count as secondary.
const SECONDARY_MIN_HITS: usize = 2;

/// Maximum number of secondary domains.
const MAX_SECONDARY: usize = 3;

/// Vote weight of the word-count bucket.
const WORD_COUNT_VOTE: i32 = 2;

/// Vote weight of the feature-noun bucket.
const FEATURE_COUNT_VOTE: i32 = 1;

/// Confidence ceiling when no domain could be identified.
const FALLBACK_CONFIDENCE_CAP: f64 = 0.5;

const DOMAIN_CONFIDENCE_WEIGHT: f64 = 0.4;
const COMPLEXITY_CONFIDENCE_WEIGHT: f64 = 0.2;
const KEYWORD_CONFIDENCE_WEIGHT: f64 = 0.4;

/// Classifies free-text project requests.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequirementAnalyzer;

/// Per-domain hit counts for one request.
struct DomainScore {
    domain: DomainTag,
    keyword_hits: usize,
    score: f64,
}

impl RequirementAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Analyze a request. Never fails; unrecognizable input yields a
    /// low-confidence `general` profile.
    pub fn analyze(&self, text: &str) -> RequirementProfile {
        let lower = text.to_lowercase();

        let scores = Self::score_domains(&lower);
        let best = Self::best_domain(&scores);
        let keywords = extract_keywords(&lower);

        let fallback = best.is_none() || keywords.is_empty();
        let (primary, domain_score) = match best {
            Some(b) if !fallback => (b.domain, b.score),
            _ => (DomainTag::General, 0.0),
        };
        let domain_confidence = (domain_score / DOMAIN_SCORE_SATURATION).min(1.0);

        let secondary = Self::secondary_domains(&scores, primary);
        let complexity = if fallback {
            Complexity::Medium
        } else {
            Self::classify_complexity(&lower)
        };
        let (tech_stack, required_libraries) = Self::infer_stack(&lower, primary);
        let team_size = team_size_for(complexity, secondary.len());

        let mut confidence = Self::confidence(domain_confidence, complexity, keywords.len());
        if fallback {
            confidence = confidence.min(FALLBACK_CONFIDENCE_CAP);
        }

        debug!(
            primary = %primary,
            complexity = %complexity,
            team_size,
            confidence,
            fallback,
            "requirement analyzed"
        );

        RequirementProfile {
            primary_domain: primary,
            secondary_domains: secondary,
            complexity,
            tech_stack,
            required_libraries,
            team_size,
            keywords,
            confidence,
            details: AnalysisDetails {
                domain_score,
                domain_confidence,
                complexity_factors: Self::complexity_factors(&lower),
                tech_reasoning: Self::tech_reasoning(&lower, primary),
            },
        }
    }

    fn score_domains(text: &str) -> Vec<DomainScore> {
        DOMAIN_PATTERNS
            .iter()
            .map(|p| {
                let keyword_hits = count_terms(text, p.keywords);
                let indicator_hits = count_terms(text, p.indicators);
                DomainScore {
                    domain: p.domain,
                    keyword_hits,
                    score: keyword_hits as f64 + INDICATOR_WEIGHT * indicator_hits as f64,
                }
            })
            .collect()
    }

    /// Highest-scoring domain, first in declaration order on ties. `None` when
    /// nothing scored.
    fn best_domain(scores: &[DomainScore]) -> Option<&DomainScore> {
        let mut best: Option<&DomainScore> = None;
        for s in scores.iter().filter(|s| s.score > 0.0) {
            if best.is_none_or(|b| s.score > b.score) {
                best = Some(s);
            }
        }
        best
    }

    fn secondary_domains(scores: &[DomainScore], primary: DomainTag) -> Vec<DomainTag> {
        let mut candidates: Vec<&DomainScore> = scores
            .iter()
            .filter(|s| s.domain != primary && s.keyword_hits >= SECONDARY_MIN_HITS)
            .collect();
        // Stable: declaration order survives among equal hit counts.
        candidates.sort_by(|a, b| b.keyword_hits.cmp(&a.keyword_hits));
        candidates
            .into_iter()
            .take(MAX_SECONDARY)
            .map(|s| s.domain)
            .collect()
    }

    fn classify_complexity(text: &str) -> Complexity {
        let mut votes = [0i32; 4];
        let slot = |c: Complexity| Complexity::ALL.iter().position(|x| *x == c).unwrap_or(0);

        let word_count = text.split_whitespace().count();
        let by_length = match word_count {
            0..10 => Complexity::Simple,
            10..25 => Complexity::Medium,
            25..50 => Complexity::Complex,
            _ => Complexity::Advanced,
        };
        votes[slot(by_length)] += WORD_COUNT_VOTE;

        for p in COMPLEXITY_PATTERNS {
            votes[slot(p.complexity)] += count_terms(text, p.indicators) as i32;
            votes[slot(p.complexity)] -= count_terms(text, p.anti_indicators) as i32;
        }

        let features = count_terms(text, FEATURE_NOUNS);
        let by_features = match features {
            0..=2 => Complexity::Simple,
            3..=5 => Complexity::Medium,
            6..=10 => Complexity::Complex,
            _ => Complexity::Advanced,
        };
        votes[slot(by_features)] += FEATURE_COUNT_VOTE;

        let mut winner = 0;
        for (i, v) in votes.iter().enumerate() {
            if *v > votes[winner] {
                winner = i;
            }
        }
        Complexity::ALL[winner]
    }

    fn infer_stack(text: &str, primary: DomainTag) -> (BTreeSet<String>, BTreeSet<String>) {
        let mut stack: BTreeSet<String> =
            domain_stack(primary).iter().map(|s| s.to_string()).collect();
        let mut libraries: BTreeSet<String> =
            BASE_LIBRARIES.iter().map(|s| s.to_string()).collect();

        for p in TECH_PATTERNS {
            if p.triggers.iter().any(|t| contains_term(text, t)) {
                stack.insert(p.label.to_string());
                libraries.extend(p.libraries.iter().map(|s| s.to_string()));
            }
        }

        libraries.extend(domain_libraries(primary).iter().map(|s| s.to_string()));

        for token in tokens(text) {
            for alias in LIBRARY_ALIASES.iter().filter(|a| a.token == token) {
                libraries.insert(alias.library.to_string());
                if let Some(label) = alias.stack {
                    stack.insert(label.to_string());
                }
            }
        }

        (stack, libraries)
    }

    fn confidence(domain_confidence: f64, complexity: Complexity, keyword_count: usize) -> f64 {
        let complexity_base = match complexity {
            Complexity::Simple => 0.9,
            Complexity::Medium => 0.8,
            Complexity::Complex => 0.7,
            Complexity::Advanced => 0.6,
        };
        let keyword_fill = (keyword_count as f64 / MAX_KEYWORDS as f64).min(1.0);
        (DOMAIN_CONFIDENCE_WEIGHT * domain_confidence
            + COMPLEXITY_CONFIDENCE_WEIGHT * complexity_base
            + KEYWORD_CONFIDENCE_WEIGHT * keyword_fill)
            .clamp(0.0, 1.0)
    }

    fn complexity_factors(text: &str) -> Vec<String> {
        let mut factors: Vec<String> = COMPLEXITY_FACTORS
            .iter()
            .filter(|(triggers, _)| triggers.iter().any(|t| text.contains(t)))
            .map(|(_, label)| label.to_string())
            .collect();
        if text.split_whitespace().count() > DETAILED_WORD_COUNT {
            factors.push("detailed requirements".to_string());
        }
        factors
    }

    fn tech_reasoning(text: &str, primary: DomainTag) -> String {
        let mut reasons = Vec::new();
        if contains_term(text, "python") {
            reasons.push("Python explicitly requested");
        } else if matches!(
            primary,
            DomainTag::Data | DomainTag::Automation | DomainTag::Documents
        ) {
            reasons.push("Python suits the domain");
        }
        if text.contains('웹') || contains_term(text, "api") {
            reasons.push("web framework needed");
        }
        if text.contains("데이터") || text.contains("분석") {
            reasons.push("data processing libraries needed");
        }
        if reasons.is_empty() {
            "general-purpose stack".to_string()
        } else {
            reasons.join(", ")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyze(text: &str) -> RequirementProfile {
        RequirementAnalyzer::new().analyze(text)
    }

    #[test]
    fn simple_web_app_request() {
        let p = analyze("간단한 할일 목록 웹앱 만들어줘");
        assert_eq!(p.primary_domain, DomainTag::Web);
        assert!(p.secondary_domains.is_empty());
        assert_eq!(p.complexity, Complexity::Simple);
        assert_eq!(p.team_size, 3);
        assert!(p.tech_stack.contains("Flask/FastAPI"));
        assert!(p.required_libraries.contains("crewai"));
        assert!(p.required_libraries.contains("jinja2"));
    }

    #[test]
    fn web_wins_tie_with_mobile_by_declaration_order() {
        // "웹앱" hits web and its "앱" substring hits mobile.
        let p = analyze("웹앱 만들기");
        assert_eq!(p.primary_domain, DomainTag::Web);
        assert_eq!(p.details.domain_score, 1.0);
    }

    #[test]
    fn empty_text_falls_back_to_general() {
        let p = analyze("");
        assert_eq!(p.primary_domain, DomainTag::General);
        assert_eq!(p.complexity, Complexity::Medium);
        assert_eq!(p.team_size, 4);
        assert!(p.keywords.is_empty());
        assert!(p.confidence <= 0.5);
        assert_eq!(p.tech_stack, BTreeSet::from(["Python".to_string()]));
        assert_eq!(p.details.tech_reasoning, "general-purpose stack");
    }

    #[test]
    fn unrecognized_text_falls_back_to_general() {
        let p = analyze("hello there friend");
        assert_eq!(p.primary_domain, DomainTag::General);
        assert_eq!(p.details.domain_confidence, 0.0);
        assert!(p.confidence <= 0.5);
        assert_eq!(p.keywords, vec!["hello", "there", "friend"]);
    }

    #[test]
    fn secondary_domains_need_two_keyword_hits() {
        // data: 데이터, 분석, 시각화 / documents: pdf, 추출 / commerce: 주문 only
        let p = analyze("pdf 문서에서 데이터를 추출해서 분석하고 시각화, 주문 내역 포함");
        assert_eq!(p.primary_domain, DomainTag::Data);
        assert_eq!(p.secondary_domains, vec![DomainTag::Documents]);
        assert!(!p.secondary_domains.contains(&p.primary_domain));
    }

    #[test]
    fn secondary_domains_are_capped_at_three() {
        let p = analyze(
            "데이터 분석 통계 웹사이트 html css 블로그 콘텐츠 자동화 스크립트 게임 캐릭터 쇼핑몰 결제",
        );
        assert_eq!(p.secondary_domains.len(), 3);
        assert_eq!(p.team_size, team_size_for(p.complexity, 3));
    }

    #[test]
    fn long_requests_vote_for_higher_complexity() {
        let text = vec!["요구사항"; 60].join(" ") + " 데이터 분석";
        assert_eq!(analyze(&text).complexity, Complexity::Advanced);
    }

    #[test]
    fn libraries_come_from_aliases_and_categories() {
        let p = analyze("bs4 와 sklearn 으로 크롤링한 데이터를 분석");
        assert!(p.required_libraries.contains("beautifulsoup4"));
        assert!(p.required_libraries.contains("scikit-learn"));
        assert!(p.required_libraries.contains("scrapy"));
        assert!(p.tech_stack.contains("Web Scraping"));
        assert!(p.tech_stack.contains("scikit-learn"));
    }

    #[test]
    fn complexity_factors_and_reasoning_are_reported() {
        let p = analyze("여러 시스템을 연동하는 python 자동화 api");
        assert_eq!(
            p.details.complexity_factors,
            vec![
                "multiple features requested",
                "system integration required",
                "automation process"
            ]
        );
        assert_eq!(
            p.details.tech_reasoning,
            "Python explicitly requested, web framework needed"
        );
    }

    #[test]
    fn analysis_is_deterministic() {
        let text = "온라인 쇼핑몰 주문 관리 시스템을 만들어서 상품 등록, 주문 처리, 결제 연동, 재고 관리 기능 포함";
        assert_eq!(analyze(text), analyze(text));
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn profile_invariants_hold_for_any_text(text in ".{0,200}") {
                let p = analyze(&text);
                prop_assert!((0.0..=1.0).contains(&p.confidence));
                prop_assert!((3..=7).contains(&p.team_size));
                prop_assert!(p.secondary_domains.len() <= 3);
                prop_assert!(!p.secondary_domains.contains(&p.primary_domain));
                prop_assert!(p.keywords.len() <= 10);
                prop_assert_eq!(p.team_size, team_size_for(p.complexity, p.secondary_domains.len()));
            }

            #[test]
            fn korean_mixed_text_keeps_invariants(text in "[가-힣a-z0-9 ]{0,120}") {
                let p = analyze(&text);
                prop_assert!((0.0..=1.0).contains(&p.confidence));
                prop_assert!((0.0..=1.0).contains(&p.details.domain_confidence));
            }
        }
    }
}
