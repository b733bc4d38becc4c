// SPDX-FileCopyrightText: 2026 Crewplan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scoring of a candidate team against a profile.

use std::collections::BTreeSet;

use crewplan_core::{AgentArchetype, DomainTag, RequirementProfile};

const COVERAGE_WEIGHT: f64 = 0.4;
const DIVERSITY_WEIGHT: f64 = 0.3;
const SYNERGY_WEIGHT: f64 = 0.2;
const FIT_WEIGHT: f64 = 0.1;

/// Distinct capabilities at which diversity saturates.
const DIVERSITY_SATURATION: f64 = 10.0;

/// Synergy links per member at which density saturates.
const SYNERGY_LINKS_PER_MEMBER: f64 = 3.0;

const PERFORMANCE_BASE: f64 = 0.7;
const PERFORMANCE_PER_SPECIALIST: f64 = 0.1;
const PERFORMANCE_SPECIALIST_CAP: f64 = 0.2;
const PERFORMANCE_PER_SYNERGY: f64 = 0.05;
const PERFORMANCE_SYNERGY_CAP: f64 = 0.1;
pub const PERFORMANCE_CEILING: f64 = 0.95;

/// Signals computed for one candidate team.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamEvaluation {
    /// Weighted total in `[0, 1]`.
    pub score: f64,
    pub domain_coverage: f64,
    pub capability_diversity: f64,
    pub synergy_density: f64,
    pub complexity_fit_ratio: f64,
    /// Members whose domains include the primary domain.
    pub specialists: usize,
    /// Members suited to the profile complexity.
    pub fitting: usize,
    /// Ordered member pairs `(a, b)` where `a` lists `b` as a synergy.
    pub synergy_links: usize,
    /// Distinct capabilities across the team.
    pub capabilities: usize,
}

impl TeamEvaluation {
    pub fn evaluate(team: &[&AgentArchetype], profile: &RequirementProfile) -> Self {
        if team.is_empty() {
            return Self {
                score: 0.0,
                domain_coverage: 0.0,
                capability_diversity: 0.0,
                synergy_density: 0.0,
                complexity_fit_ratio: 0.0,
                specialists: 0,
                fitting: 0,
                synergy_links: 0,
                capabilities: 0,
            };
        }
        let n = team.len() as f64;
        let wanted = profile.domains();

        let domain_coverage = coverage(team, &wanted);

        let capabilities = team
            .iter()
            .flat_map(|m| m.capabilities.iter())
            .collect::<BTreeSet<_>>()
            .len();
        let capability_diversity = (capabilities as f64 / DIVERSITY_SATURATION).min(1.0);

        let synergy_links = synergy_links(team);
        let synergy_density =
            (synergy_links as f64 / (SYNERGY_LINKS_PER_MEMBER * n)).min(1.0);

        let fitting = team.iter().filter(|m| m.fits(profile.complexity)).count();
        let complexity_fit_ratio = fitting as f64 / n;

        let specialists = team
            .iter()
            .filter(|m| m.domains.contains(&profile.primary_domain))
            .count();

        let score = COVERAGE_WEIGHT * domain_coverage
            + DIVERSITY_WEIGHT * capability_diversity
            + SYNERGY_WEIGHT * synergy_density
            + FIT_WEIGHT * complexity_fit_ratio;

        Self {
            score: score.clamp(0.0, 1.0),
            domain_coverage,
            capability_diversity,
            synergy_density,
            complexity_fit_ratio,
            specialists,
            fitting,
            synergy_links,
            capabilities,
        }
    }

    pub fn performance_estimate(&self) -> f64 {
        let specialist_bonus =
            (PERFORMANCE_PER_SPECIALIST * self.specialists as f64).min(PERFORMANCE_SPECIALIST_CAP);
        let synergy_bonus =
            (PERFORMANCE_PER_SYNERGY * self.synergy_links as f64).min(PERFORMANCE_SYNERGY_CAP);
        (PERFORMANCE_BASE + specialist_bonus + synergy_bonus).min(PERFORMANCE_CEILING)
    }

    /// Human-readable summary, sentences joined with `" | "`.
    pub fn rationale(&self, profile: &RequirementProfile) -> String {
        let mut parts = Vec::with_capacity(4);
        if self.specialists > 0 {
            parts.push(format!(
                "{} domain specialists: {}",
                profile.primary_domain, self.specialists
            ));
        }
        if self.fitting > 0 {
            parts.push(format!(
                "{} agents fit {} complexity",
                self.fitting, profile.complexity
            ));
        }
        if self.synergy_links > 0 {
            parts.push(format!("{} synergy links", self.synergy_links));
        }
        parts.push(format!("{} core capabilities covered", self.capabilities));
        parts.join(" | ")
    }
}

/// Share of `wanted` covered by the team. A generalist covers everything.
fn coverage(team: &[&AgentArchetype], wanted: &BTreeSet<DomainTag>) -> f64 {
    if wanted.is_empty() {
        return 1.0;
    }
    if team.iter().any(|m| m.domains.contains(&DomainTag::General)) {
        return 1.0;
    }
    let covered = team
        .iter()
        .flat_map(|m| m.domains.iter())
        .filter(|d| wanted.contains(d))
        .collect::<BTreeSet<_>>()
        .len();
    covered as f64 / wanted.len() as f64
}

fn synergy_links(team: &[&AgentArchetype]) -> usize {
    team.iter()
        .map(|a| {
            team.iter()
                .filter(|b| b.id != a.id && a.synergy_ids.iter().any(|s| *s == b.id))
                .count()
        })
        .sum()
}
