// SPDX-FileCopyrightText: 2026 Crewplan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Team selection over an [`AgentCatalog`].
//!
//! Selection filters the catalog by domain and complexity, scores what is
//! left against the profile keywords, builds a handful of candidate teams of
//! exactly `team_size` members and keeps the best-evaluated one.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use crewplan_core::{AgentArchetype, CrewplanError, RequirementProfile, RoleCategory, TeamSelection};
use tracing::debug;

use crate::catalog::AgentCatalog;
use crate::evaluation::TeamEvaluation;

/// Score for a keyword found in the role text.
const ROLE_TEXT_HIT: f64 = 1.0;
/// Score for a keyword found inside one capability.
const CAPABILITY_HIT: f64 = 0.5;
/// Per-step bonus for higher priority (lower number).
const PRIORITY_STEP: f64 = 0.2;
const PRIORITY_BASELINE: f64 = 5.0;

/// Candidate teams considered per selection.
const MAX_CANDIDATES: usize = 5;

/// Picks agent teams for requirement profiles.
#[derive(Debug, Clone)]
pub struct AgentMatcher {
    catalog: Arc<AgentCatalog>,
}

impl Default for AgentMatcher {
    fn default() -> Self {
        Self::new(AgentCatalog::builtin())
    }
}

impl AgentMatcher {
    pub fn new(catalog: AgentCatalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }

    pub fn catalog(&self) -> &AgentCatalog {
        &self.catalog
    }

    /// Selects a team for `profile`. Never fails.
    pub fn select(&self, profile: &RequirementProfile) -> TeamSelection {
        let size = profile.team_size;
        let domains = profile.domains();

        let mut pool: Vec<&AgentArchetype> = self
            .catalog
            .archetypes()
            .iter()
            .filter(|a| a.matches_domains(&domains))
            .collect();
        let widened = pool.is_empty();
        if widened {
            log_empty("domain filter", format!("no archetype matches {domains:?}"));
            pool = self.catalog.archetypes().iter().collect();
        }
        let in_domain: HashSet<&str> = pool.iter().map(|a| a.id.as_str()).collect();

        let fitting: Vec<&AgentArchetype> = pool
            .iter()
            .copied()
            .filter(|a| a.fits(profile.complexity))
            .collect();
        if fitting.is_empty() {
            log_empty(
                "complexity filter",
                format!("no archetype fits {} complexity", profile.complexity),
            );
        } else {
            pool = fitting;
        }

        let ranked = rank(pool, &profile.keywords);
        let candidates = self.candidates(profile, &ranked, &in_domain);

        let mut best: Option<(Vec<&AgentArchetype>, TeamEvaluation)> = None;
        for team in candidates {
            let eval = TeamEvaluation::evaluate(&team, profile);
            let better = match &best {
                Some((_, current)) => eval.score > current.score,
                None => true,
            };
            if better {
                best = Some((team, eval));
            }
        }

        let (members, eval, fallback) = match best {
            Some((team, eval)) => (team, eval, widened),
            None => {
                log_empty("candidate teams", format!("no team of size {size} could be built"));
                let team = self.fallback_team(size);
                let eval = TeamEvaluation::evaluate(&team, profile);
                (team, eval, true)
            }
        };

        let selection = TeamSelection {
            members: members.into_iter().cloned().collect(),
            rationale: eval.rationale(profile),
            confidence: eval.score,
            performance_estimate: eval.performance_estimate(),
            fallback,
        };
        debug!(
            primary = %profile.primary_domain,
            members = ?selection.member_ids(),
            score = selection.confidence,
            fallback,
            "team selected"
        );
        selection
    }

    /// Candidate teams in template, top-scored, balanced, synergy order.
    /// Every team has exactly `team_size` members.
    fn candidates<'a>(
        &'a self,
        profile: &RequirementProfile,
        ranked: &[&'a AgentArchetype],
        in_domain: &HashSet<&str>,
    ) -> Vec<Vec<&'a AgentArchetype>> {
        let size = profile.team_size;
        let mut out: Vec<Vec<&AgentArchetype>> = Vec::new();

        for template in self.catalog.templates_for(profile.primary_domain) {
            if let Some(team) = self.resolve(template, size, in_domain) {
                out.push(team);
            }
        }

        let top = &ranked[..ranked.len().min(2 * size)];
        if top.len() >= size {
            out.push(top[..size].to_vec());
            if let Some(team) = balanced(top, size) {
                out.push(team);
            }
        }

        for (_, group) in self.catalog.synergy_groups() {
            if let Some(team) = self.resolve(group, size, in_domain) {
                out.push(team);
            }
        }

        let mut seen: HashSet<BTreeSet<&str>> = HashSet::new();
        out.retain(|team| seen.insert(team.iter().map(|a| a.id.as_str()).collect()));
        out.truncate(MAX_CANDIDATES);
        out
    }

    /// Resolves a recipe of ids into a team of exactly `size` in-domain members.
    fn resolve(
        &self,
        ids: &[String],
        size: usize,
        in_domain: &HashSet<&str>,
    ) -> Option<Vec<&AgentArchetype>> {
        if ids.len() != size {
            return None;
        }
        ids.iter()
            .map(|id| {
                self.catalog
                    .get(id)
                    .filter(|a| in_domain.contains(a.id.as_str()))
            })
            .collect()
    }

    /// The fallback priority list, truncated or padded from catalog order.
    fn fallback_team(&self, size: usize) -> Vec<&AgentArchetype> {
        let mut team: Vec<&AgentArchetype> = Vec::with_capacity(size);
        let preferred = self
            .catalog
            .fallback_order()
            .iter()
            .filter_map(|id| self.catalog.get(id));
        for archetype in preferred.chain(self.catalog.archetypes()) {
            if team.len() == size {
                break;
            }
            if !team.iter().any(|m| m.id == archetype.id) {
                team.push(archetype);
            }
        }
        team
    }
}

fn log_empty(stage: &'static str, detail: String) {
    let err = CrewplanError::EmptyCandidateSet { stage, detail };
    debug!(error = %err, "widening selection");
}

/// Keyword relevance of one archetype plus its priority bonus.
fn relevance(archetype: &AgentArchetype, keywords: &[String]) -> f64 {
    let role_text = archetype.role_text();
    let capabilities: Vec<String> = archetype
        .capabilities
        .iter()
        .map(|c| c.to_lowercase())
        .collect();

    let mut score = 0.0;
    for keyword in keywords {
        if role_text.contains(keyword.as_str()) {
            score += ROLE_TEXT_HIT;
        }
        score += CAPABILITY_HIT
            * capabilities
                .iter()
                .filter(|c| c.contains(keyword.as_str()))
                .count() as f64;
    }
    score + PRIORITY_STEP * (PRIORITY_BASELINE - f64::from(archetype.priority))
}

/// Archetypes by descending relevance, catalog order on ties.
fn rank<'a>(pool: Vec<&'a AgentArchetype>, keywords: &[String]) -> Vec<&'a AgentArchetype> {
    let mut scored: Vec<(&AgentArchetype, f64)> =
        pool.into_iter().map(|a| (a, relevance(a, keywords))).collect();
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    scored.into_iter().map(|(a, _)| a).collect()
}

/// One archetype per role category in rank order, then filled by rank.
fn balanced<'a>(ranked: &[&'a AgentArchetype], size: usize) -> Option<Vec<&'a AgentArchetype>> {
    let mut team: Vec<&AgentArchetype> = Vec::with_capacity(size);
    let mut categories: HashSet<RoleCategory> = HashSet::new();
    for archetype in ranked {
        if team.len() == size {
            break;
        }
        if categories.insert(archetype.category) {
            team.push(archetype);
        }
    }
    for archetype in ranked {
        if team.len() == size {
            break;
        }
        if !team.iter().any(|m| m.id == archetype.id) {
            team.push(archetype);
        }
    }
    (team.len() == size).then_some(team)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crewplan_core::{AnalysisDetails, Complexity, DomainTag, team_size_for};
    use proptest::prelude::*;

    fn profile(
        primary: DomainTag,
        secondary: Vec<DomainTag>,
        complexity: Complexity,
        keywords: &[&str],
    ) -> RequirementProfile {
        let team_size = team_size_for(complexity, secondary.len());
        RequirementProfile {
            primary_domain: primary,
            secondary_domains: secondary,
            complexity,
            tech_stack: BTreeSet::new(),
            required_libraries: BTreeSet::new(),
            team_size,
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            confidence: 0.5,
            details: AnalysisDetails::default(),
        }
    }

    fn archetype(id: &str, domains: &[DomainTag], fit: &[Complexity]) -> AgentArchetype {
        AgentArchetype {
            id: id.to_string(),
            role_title: format!("{id} role"),
            goal: "goal".to_string(),
            backstory: "backstory".to_string(),
            category: RoleCategory::General,
            domains: domains.iter().copied().collect(),
            capabilities: vec![format!("{id}_skill")],
            complexity_fit: fit.iter().copied().collect(),
            priority: 1,
            synergy_ids: Vec::new(),
        }
    }

    #[test]
    fn simple_web_profile_gets_three_web_members() {
        let matcher = AgentMatcher::default();
        let p = profile(DomainTag::Web, vec![], Complexity::Simple, &["웹앱"]);
        let team = matcher.select(&p);
        assert_eq!(team.members.len(), 3);
        assert!(!team.fallback);
        let domains = p.domains();
        for m in &team.members {
            assert!(m.matches_domains(&domains), "{} is off-domain", m.id);
        }
    }

    #[test]
    fn complex_data_profile_uses_data_specialists() {
        let matcher = AgentMatcher::default();
        let p = profile(DomainTag::Data, vec![], Complexity::Complex, &["데이터", "분석"]);
        let team = matcher.select(&p);
        assert_eq!(team.members.len(), 5);
        assert!(team.member_ids().contains(&"data_scientist"));
        assert!(team.rationale.contains("data domain specialists"));
    }

    #[test]
    fn selection_is_deterministic() {
        let matcher = AgentMatcher::default();
        let p = profile(
            DomainTag::Content,
            vec![DomainTag::Web],
            Complexity::Medium,
            &["블로그", "seo"],
        );
        assert_eq!(matcher.select(&p), matcher.select(&p));
    }

    #[test]
    fn complexity_filter_is_skipped_when_nothing_fits() {
        let catalog = AgentCatalog::from_archetypes(vec![
            archetype("alpha", &[DomainTag::Web], &[Complexity::Advanced]),
            archetype("beta", &[DomainTag::Web], &[Complexity::Advanced]),
            archetype("gamma", &[DomainTag::Web], &[Complexity::Advanced]),
        ])
        .unwrap();
        let matcher = AgentMatcher::new(catalog);
        let p = profile(DomainTag::Web, vec![], Complexity::Simple, &["웹"]);
        let team = matcher.select(&p);
        assert_eq!(team.member_ids(), vec!["alpha", "beta", "gamma"]);
        assert!(!team.fallback);
    }

    #[test]
    fn undersized_pool_falls_back_to_priority_list() {
        // Only the five generalists fit advanced complexity for these domains.
        let matcher = AgentMatcher::default();
        let p = profile(
            DomainTag::Game,
            vec![DomainTag::Mobile, DomainTag::Documents],
            Complexity::Advanced,
            &["게임"],
        );
        assert_eq!(p.team_size, 7);
        let team = matcher.select(&p);
        assert_eq!(team.members.len(), 7);
        assert!(team.fallback);
        assert_eq!(
            &team.member_ids()[..5],
            &[
                "requirements_analyst",
                "technology_researcher",
                "implementation_engineer",
                "solution_architect",
                "quality_assurance"
            ]
        );
    }

    #[test]
    fn off_domain_catalog_widens_and_flags_fallback() {
        let catalog = AgentCatalog::from_archetypes(vec![
            archetype("a", &[DomainTag::Game], &[Complexity::Simple]),
            archetype("b", &[DomainTag::Game], &[Complexity::Simple]),
            archetype("c", &[DomainTag::Game], &[Complexity::Simple]),
        ])
        .unwrap();
        let team = AgentMatcher::new(catalog)
            .select(&profile(DomainTag::Web, vec![], Complexity::Simple, &[]));
        assert_eq!(team.members.len(), 3);
        assert!(team.fallback);
    }

    #[test]
    fn empty_catalog_yields_empty_fallback_team() {
        let catalog =
            AgentCatalog::new(Vec::new(), BTreeMap::new(), Vec::new(), Vec::new()).unwrap();
        let team = AgentMatcher::new(catalog)
            .select(&profile(DomainTag::Web, vec![], Complexity::Simple, &[]));
        assert!(team.members.is_empty());
        assert!(team.fallback);
        assert_eq!(team.confidence, 0.0);
    }

    #[test]
    fn keyword_hits_raise_relevance() {
        let catalog = AgentCatalog::builtin();
        let seo = catalog.get("seo_specialist").unwrap();
        let base = relevance(seo, &[]);
        let boosted = relevance(seo, &["seo".to_string()]);
        // "seo" appears in the role text and in one capability.
        assert!((boosted - base - 1.5).abs() < 1e-9, "{boosted} vs {base}");
    }

    #[test]
    fn balanced_team_spreads_categories_first() {
        let catalog = AgentCatalog::builtin();
        let ranked: Vec<&AgentArchetype> = ["frontend_developer", "backend_developer", "ui_ux_designer"]
            .iter()
            .map(|id| catalog.get(id).unwrap())
            .collect();
        let team = balanced(&ranked, 2).unwrap();
        let ids: Vec<&str> = team.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["frontend_developer", "ui_ux_designer"]);
        assert!(balanced(&ranked, 4).is_none());
    }

    fn any_domain() -> impl Strategy<Value = DomainTag> {
        proptest::sample::select(DomainTag::ALL.to_vec())
    }

    fn any_complexity() -> impl Strategy<Value = Complexity> {
        proptest::sample::select(Complexity::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn team_size_and_uniqueness_hold(
            primary in any_domain(),
            secondary in proptest::collection::btree_set(any_domain(), 0..4),
            complexity in any_complexity(),
        ) {
            let secondary: Vec<DomainTag> =
                secondary.into_iter().filter(|d| *d != primary).take(3).collect();
            let p = profile(primary, secondary, complexity, &[]);
            let team = AgentMatcher::default().select(&p);

            prop_assert_eq!(team.members.len(), p.team_size);
            let ids: BTreeSet<&str> = team.member_ids().into_iter().collect();
            prop_assert_eq!(ids.len(), team.members.len());
            prop_assert!((0.0..=1.0).contains(&team.confidence));
            prop_assert!(team.performance_estimate <= 0.95);
            if !team.fallback {
                let domains = p.domains();
                for m in &team.members {
                    prop_assert!(m.matches_domains(&domains));
                }
            }
        }
    }
}
