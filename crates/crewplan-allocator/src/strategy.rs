// SPDX-FileCopyrightText: 2026 Crewplan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Primary model selection for each allocation strategy.
//!
//! Every function returns one model per team member, in team order. All
//! ties resolve to the earlier candidate, so catalog order is the final
//! tie-break.

use std::cmp::Ordering;

use crewplan_config::{CatalogSnapshot, ModelCatalogEntry};
use crewplan_core::{AgentArchetype, CostTier, DomainTag, RequirementProfile, Strategy};
use tracing::debug;

use crate::budget::BudgetTracker;
use crate::scoring::{base_performance, importance, performance};

const BALANCED_PERFORMANCE_WEIGHT: f64 = 0.6;
const BALANCED_COST_WEIGHT: f64 = 0.4;
/// Keeps `1 / (weight + offset)` finite for free models.
const COST_OFFSET: f64 = 0.1;

/// Domains whose demanding projects get the strongest high-tier model.
const ANALYTIC_DOMAINS: &[DomainTag] = &[DomainTag::Data, DomainTag::Documents];

/// Candidate models for `agent_id`: enabled preferred models, else every
/// enabled model, else the fallback model.
pub fn candidates<'s>(snapshot: &'s CatalogSnapshot, agent_id: &str) -> Vec<&'s ModelCatalogEntry> {
    let preferred: Vec<&ModelCatalogEntry> = snapshot
        .preferred_models(agent_id)
        .unwrap_or_default()
        .iter()
        .filter_map(|name| snapshot.entry(name))
        .filter(|m| m.enabled)
        .collect();
    if !preferred.is_empty() {
        return preferred;
    }
    let enabled: Vec<&ModelCatalogEntry> = snapshot.enabled_models().collect();
    if !enabled.is_empty() {
        return enabled;
    }
    debug!(agent = agent_id, "no enabled model, using fallback");
    vec![snapshot.fallback()]
}

/// Picks a primary model for every member of `team`.
pub fn assign<'s>(
    strategy: Strategy,
    snapshot: &'s CatalogSnapshot,
    team: &[AgentArchetype],
    profile: &RequirementProfile,
    ceiling: f64,
) -> Vec<&'s ModelCatalogEntry> {
    match strategy {
        Strategy::SingleModel => {
            let model = single_model(snapshot, profile);
            vec![model; team.len()]
        }
        Strategy::CostOptimized => team
            .iter()
            .map(|member| cheapest_of(snapshot, candidates(snapshot, &member.id)))
            .collect(),
        Strategy::PerformanceOptimized => team
            .iter()
            .map(|member| {
                first_min_by(candidates(snapshot, &member.id), |a, b| {
                    desc(
                        performance(a, member, profile.complexity),
                        performance(b, member, profile.complexity),
                    )
                })
                .unwrap_or_else(|| snapshot.fallback())
            })
            .collect(),
        Strategy::Balanced => balanced(snapshot, team, profile, ceiling),
    }
}

/// One model for the whole team, chosen by project shape.
fn single_model<'s>(snapshot: &'s CatalogSnapshot, profile: &RequirementProfile) -> &'s ModelCatalogEntry {
    let in_tier = |tier: CostTier| snapshot.enabled_models().filter(move |m| m.cost_tier == tier);

    let chosen = if profile.complexity.is_demanding() {
        if ANALYTIC_DOMAINS.contains(&profile.primary_domain) {
            first_min_by(in_tier(CostTier::High), |a, b| {
                desc(base_performance(a), base_performance(b))
            })
        } else {
            first_min_by(in_tier(CostTier::Medium), |a, b| b.speed_tier.cmp(&a.speed_tier))
        }
    } else {
        None
    };

    chosen.unwrap_or_else(|| cheapest_enabled(snapshot))
}

/// Cheapest enabled model, fastest on ties, else the fallback.
fn cheapest_enabled(snapshot: &CatalogSnapshot) -> &ModelCatalogEntry {
    first_min_by(snapshot.enabled_models(), |a, b| {
        snapshot
            .cost_weight(a.cost_tier)
            .total_cmp(&snapshot.cost_weight(b.cost_tier))
            .then(b.speed_tier.cmp(&a.speed_tier))
    })
    .unwrap_or_else(|| snapshot.fallback())
}

/// Lowest cost weight among `models`, first on ties.
fn cheapest_of<'s>(
    snapshot: &'s CatalogSnapshot,
    models: Vec<&'s ModelCatalogEntry>,
) -> &'s ModelCatalogEntry {
    first_min_by(models, |a, b| {
        snapshot
            .cost_weight(a.cost_tier)
            .total_cmp(&snapshot.cost_weight(b.cost_tier))
    })
    .unwrap_or_else(|| snapshot.fallback())
}

/// Performance/cost trade-off under the budget ceiling.
///
/// Members are served in descending importance so the most important roles
/// see the most budget. Results are returned in team order.
fn balanced<'s>(
    snapshot: &'s CatalogSnapshot,
    team: &[AgentArchetype],
    profile: &RequirementProfile,
    ceiling: f64,
) -> Vec<&'s ModelCatalogEntry> {
    let mut order: Vec<usize> = (0..team.len()).collect();
    order.sort_by(|&a, &b| {
        desc(
            importance(&team[a], profile.primary_domain),
            importance(&team[b], profile.primary_domain),
        )
    });

    let mut tracker = BudgetTracker::new(ceiling);
    let mut chosen: Vec<Option<&ModelCatalogEntry>> = vec![None; team.len()];

    for index in order {
        let member = &team[index];
        let models = candidates(snapshot, &member.id);
        let value = |m: &ModelCatalogEntry| {
            BALANCED_PERFORMANCE_WEIGHT * performance(m, member, profile.complexity)
                + BALANCED_COST_WEIGHT / (snapshot.cost_weight(m.cost_tier) + COST_OFFSET)
        };

        let affordable = models
            .iter()
            .copied()
            .filter(|m| tracker.fits(snapshot.cost_weight(m.cost_tier)));
        let model = match first_min_by(affordable, |a, b| desc(value(a), value(b))) {
            Some(m) => m,
            None => {
                let cheapest = cheapest_of(snapshot, models);
                if let Err(err) = tracker.check(snapshot.cost_weight(cheapest.cost_tier)) {
                    debug!(agent = %member.id, model = %cheapest.name, error = %err, "using cheapest candidate");
                }
                cheapest
            }
        };
        tracker.record(snapshot.cost_weight(model.cost_tier));
        chosen[index] = Some(model);
    }

    chosen
        .into_iter()
        .map(|m| m.unwrap_or_else(|| snapshot.fallback()))
        .collect()
}

/// Descending order for scores.
fn desc(a: f64, b: f64) -> Ordering {
    b.total_cmp(&a)
}

/// The first minimal element under `cmp`.
fn first_min_by<'s, I, F>(items: I, mut cmp: F) -> Option<&'s ModelCatalogEntry>
where
    I: IntoIterator<Item = &'s ModelCatalogEntry>,
    F: FnMut(&ModelCatalogEntry, &ModelCatalogEntry) -> Ordering,
{
    items.into_iter().fold(None, |best, item| match best {
        Some(current) if cmp(item, current) != Ordering::Less => Some(current),
        _ => Some(item),
    })
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crewplan_config::model::AllocationConfig;
    use crewplan_core::{AnalysisDetails, Complexity, RoleCategory};

    fn member(id: &str, category: RoleCategory) -> AgentArchetype {
        AgentArchetype {
            id: id.to_string(),
            role_title: id.to_string(),
            goal: String::new(),
            backstory: String::new(),
            category,
            domains: BTreeSet::new(),
            capabilities: Vec::new(),
            complexity_fit: BTreeSet::new(),
            priority: 1,
            synergy_ids: Vec::new(),
        }
    }

    fn profile(primary: DomainTag, complexity: Complexity) -> RequirementProfile {
        RequirementProfile {
            primary_domain: primary,
            secondary_domains: Vec::new(),
            complexity,
            tech_stack: BTreeSet::new(),
            required_libraries: BTreeSet::new(),
            team_size: 3,
            keywords: Vec::new(),
            confidence: 0.5,
            details: AnalysisDetails::default(),
        }
    }

    fn names(models: &[&ModelCatalogEntry]) -> Vec<String> {
        models.iter().map(|m| m.name.clone()).collect()
    }

    #[test]
    fn candidates_prefer_configured_models() {
        let snapshot = CatalogSnapshot::default();
        let c = candidates(&snapshot, "solution_architect");
        assert_eq!(names(&c), vec!["gpt-4", "claude-3"]);
        assert_eq!(candidates(&snapshot, "ui_ux_designer").len(), 6);
    }

    #[test]
    fn disabled_preferences_fall_through_to_enabled_pool() {
        let mut config = AllocationConfig::default();
        for m in &mut config.model_pool {
            if m.name == "gpt-4" || m.name == "claude-3" {
                m.enabled = false;
            }
        }
        let snapshot = CatalogSnapshot::build(config).unwrap();
        let c = candidates(&snapshot, "solution_architect");
        assert_eq!(
            names(&c),
            vec!["gpt-3.5-turbo", "gemini-flash", "gemini-pro", "deepseek-coder"]
        );
    }

    #[test]
    fn nothing_enabled_yields_fallback() {
        let mut config = AllocationConfig::default();
        for m in &mut config.model_pool {
            m.enabled = false;
        }
        let snapshot = CatalogSnapshot::build(config).unwrap();
        assert_eq!(names(&candidates(&snapshot, "data_scientist")), vec!["gemini-flash"]);
        let p = profile(DomainTag::Web, Complexity::Simple);
        let team = [member("frontend_developer", RoleCategory::Development)];
        for strategy in Strategy::ALL {
            let picked = assign(strategy, &snapshot, &team, &p, 100.0);
            assert_eq!(names(&picked), vec!["gemini-flash"], "{strategy}");
        }
    }

    #[test]
    fn single_model_follows_project_shape() {
        let snapshot = CatalogSnapshot::default();
        let team = [
            member("a", RoleCategory::General),
            member("b", RoleCategory::General),
        ];
        let pick = |domain, complexity| {
            names(&assign(
                Strategy::SingleModel,
                &snapshot,
                &team,
                &profile(domain, complexity),
                1000.0,
            ))
        };
        assert_eq!(pick(DomainTag::Data, Complexity::Complex), vec!["gpt-4", "gpt-4"]);
        // gpt-3.5-turbo is the only fast medium-tier model.
        assert_eq!(pick(DomainTag::Web, Complexity::Advanced), vec!["gpt-3.5-turbo"; 2]);
        // gemini-flash and deepseek-coder tie on cost and speed; pool order wins.
        assert_eq!(pick(DomainTag::Web, Complexity::Simple), vec!["gemini-flash"; 2]);
    }

    #[test]
    fn single_model_without_high_tier_uses_cheapest() {
        let mut config = AllocationConfig::default();
        config.model_pool.retain(|m| m.name != "gpt-4");
        for pref in config.agent_preferences.values_mut() {
            pref.preferred_models.retain(|m| m != "gpt-4");
        }
        for m in &mut config.model_pool {
            if m.backup_name.as_deref() == Some("gpt-4") {
                m.backup_name = None;
            }
        }
        let snapshot = CatalogSnapshot::build(config).unwrap();
        let team = [member("a", RoleCategory::General)];
        let picked = assign(
            Strategy::SingleModel,
            &snapshot,
            &team,
            &profile(DomainTag::Documents, Complexity::Advanced),
            1000.0,
        );
        assert_eq!(names(&picked), vec!["gemini-flash"]);
    }

    #[test]
    fn cost_optimized_takes_cheapest_candidate() {
        let snapshot = CatalogSnapshot::default();
        let team = [
            member("requirements_analyst", RoleCategory::Analysis),
            member("implementation_engineer", RoleCategory::Development),
            member("seo_specialist", RoleCategory::Content),
        ];
        let picked = assign(
            Strategy::CostOptimized,
            &snapshot,
            &team,
            &profile(DomainTag::Web, Complexity::Medium),
            100.0,
        );
        // requirements_analyst prefers gpt-4, claude-3, gemini-pro: claude-3 is first medium.
        assert_eq!(names(&picked), vec!["claude-3", "deepseek-coder", "gemini-flash"]);
    }

    #[test]
    fn performance_optimized_rewards_strengths() {
        let snapshot = CatalogSnapshot::default();
        let team = [
            member("implementation_engineer", RoleCategory::Development),
            member("content_creator", RoleCategory::Content),
        ];
        let picked = assign(
            Strategy::PerformanceOptimized,
            &snapshot,
            &team,
            &profile(DomainTag::Content, Complexity::Simple),
            1000.0,
        );
        // deepseek-coder 0.8 + 0.2 beats gpt-4 0.9; claude-3 0.8 + 0.15 beats gpt-4 0.9.
        assert_eq!(names(&picked), vec!["deepseek-coder", "claude-3"]);
    }

    #[test]
    fn performance_optimized_bonus_is_per_role() {
        let snapshot = CatalogSnapshot::default();
        let team = [
            member("information_extractor", RoleCategory::Document),
            member("data_validator", RoleCategory::Document),
            member("seo_specialist", RoleCategory::Content),
        ];
        let picked = assign(
            Strategy::PerformanceOptimized,
            &snapshot,
            &team,
            &profile(DomainTag::Documents, Complexity::Simple),
            1000.0,
        );
        // Only document_parser earns claude-3's document bonus, so gpt-4 at
        // 0.9 wins both document roles. seo_specialist does not prefer gpt-4.
        assert_eq!(names(&picked), vec!["gpt-4", "gpt-4", "claude-3"]);
    }

    #[test]
    fn balanced_recovers_when_ceiling_is_too_low() {
        let snapshot = CatalogSnapshot::default();
        let team = [
            member("requirements_analyst", RoleCategory::Analysis),
            member("solution_architect", RoleCategory::Architecture),
            member("quality_assurance", RoleCategory::Quality),
        ];
        let p = profile(DomainTag::Web, Complexity::Complex);
        let picked = assign(Strategy::Balanced, &snapshot, &team, &p, 4.0);
        // The analyst is served first and still fits; the others overflow and
        // get their cheapest candidate.
        assert_eq!(names(&picked), vec!["claude-3"; 3]);
    }

    #[test]
    fn balanced_skips_models_over_the_ceiling() {
        let snapshot = CatalogSnapshot::default();
        let team = [member("requirements_analyst", RoleCategory::Analysis)];
        let p = profile(DomainTag::Data, Complexity::Advanced);
        let picked = assign(Strategy::Balanced, &snapshot, &team, &p, 5.0);
        assert_ne!(picked[0].name, "gpt-4");
        assert!(snapshot.cost_weight(picked[0].cost_tier) <= 5.0);
    }

    #[test]
    fn balanced_keeps_team_order() {
        let snapshot = CatalogSnapshot::default();
        let team = [
            member("quality_assurance", RoleCategory::Quality),
            member("implementation_engineer", RoleCategory::Development),
        ];
        let picked = assign(
            Strategy::Balanced,
            &snapshot,
            &team,
            &profile(DomainTag::Web, Complexity::Simple),
            1000.0,
        );
        assert_eq!(picked[1].name, "deepseek-coder");
    }

    #[test]
    fn first_min_by_keeps_first_on_ties() {
        let snapshot = CatalogSnapshot::default();
        let low = first_min_by(snapshot.models(), |a, b| a.cost_tier.cmp(&b.cost_tier)).unwrap();
        assert_eq!(low.name, "gemini-flash");
    }
}
