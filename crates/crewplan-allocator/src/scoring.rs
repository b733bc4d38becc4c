// SPDX-FileCopyrightText: 2026 Crewplan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Model performance scores and member importance.
//!
//! Both are table-driven: named base scores, strength bonuses for the roles
//! that specialise in them, and per-domain importance adjustments.

use crewplan_config::ModelCatalogEntry;
use crewplan_core::{AgentArchetype, Complexity, DomainTag};

/// Base performance of models the tables know by name.
const BASE_PERFORMANCE: &[(&str, f64)] = &[
    ("gpt-4", 0.9),
    ("claude-3", 0.8),
    ("deepseek-coder", 0.8),
    ("gemini-pro", 0.75),
    ("gpt-3.5-turbo", 0.7),
    ("gemini-flash", 0.6),
];

const DEFAULT_PERFORMANCE: f64 = 0.5;

/// `(strength, agent ids, bonus)`: a model with the strength assigned to one
/// of the listed roles gains the bonus. Other roles get nothing, even when
/// their category matches.
const ROLE_BONUSES: &[(&str, &[&str], f64)] = &[
    ("coding", CODING_ROLES, 0.2),
    ("creative_writing", CREATIVE_ROLES, 0.15),
    ("document_analysis", &["document_parser"], 0.15),
    (
        "advanced_reasoning",
        &["requirements_analyst", "solution_architect", "data_scientist"],
        0.15,
    ),
];

/// Roles that write code.
pub(crate) const CODING_ROLES: &[&str] =
    &["implementation_engineer", "frontend_developer", "backend_developer"];

/// Roles that write prose.
pub(crate) const CREATIVE_ROLES: &[&str] = &["content_creator", "content_strategist"];

/// Strengths rewarded on complex and advanced profiles.
const REASONING_STRENGTHS: &[&str] = &["advanced_reasoning", "complex_analysis", "structured_output"];
const REASONING_BONUS: f64 = 0.1;

/// Strengths rewarded on simple and medium profiles.
const FAST_STRENGTHS: &[&str] = &["quick_response", "speed"];
const FAST_BONUS: f64 = 0.05;

const BASE_IMPORTANCE: &[(&str, f64)] = &[
    ("requirements_analyst", 0.9),
    ("solution_architect", 0.85),
    ("implementation_engineer", 0.8),
    ("data_scientist", 0.8),
    ("content_creator", 0.75),
    ("frontend_developer", 0.7),
    ("backend_developer", 0.7),
    ("technology_researcher", 0.65),
    ("quality_assurance", 0.6),
];

const DEFAULT_IMPORTANCE: f64 = 0.5;

/// Extra importance of specialists when their domain is primary.
const DOMAIN_IMPORTANCE: &[(DomainTag, &[(&str, f64)])] = &[
    (
        DomainTag::Data,
        &[
            ("data_scientist", 0.2),
            ("data_engineer", 0.15),
            ("visualization_specialist", 0.1),
        ],
    ),
    (
        DomainTag::Content,
        &[
            ("content_strategist", 0.2),
            ("content_creator", 0.15),
            ("seo_specialist", 0.1),
        ],
    ),
    (
        DomainTag::Web,
        &[
            ("frontend_developer", 0.15),
            ("backend_developer", 0.15),
            ("ui_ux_designer", 0.1),
        ],
    ),
];

fn lookup(table: &[(&str, f64)], key: &str) -> Option<f64> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

pub fn base_performance(model: &ModelCatalogEntry) -> f64 {
    lookup(BASE_PERFORMANCE, &model.name).unwrap_or(DEFAULT_PERFORMANCE)
}

fn role_bonus(model: &ModelCatalogEntry, agent_id: &str) -> f64 {
    ROLE_BONUSES
        .iter()
        .filter(|(strength, roles, _)| roles.contains(&agent_id) && model.has_strength(strength))
        .map(|(_, _, bonus)| bonus)
        .sum()
}

fn complexity_bonus(model: &ModelCatalogEntry, complexity: Complexity) -> f64 {
    let (strengths, bonus) = if complexity.is_demanding() {
        (REASONING_STRENGTHS, REASONING_BONUS)
    } else {
        (FAST_STRENGTHS, FAST_BONUS)
    };
    if strengths.iter().any(|s| model.has_strength(s)) {
        bonus
    } else {
        0.0
    }
}

/// Fitness of `model` for `member` at `complexity`, in `[0, 1]`.
pub fn performance(model: &ModelCatalogEntry, member: &AgentArchetype, complexity: Complexity) -> f64 {
    (base_performance(model) + role_bonus(model, &member.id) + complexity_bonus(model, complexity))
        .min(1.0)
}

/// Allocation order weight for `member` when `primary` is the project domain.
pub fn importance(member: &AgentArchetype, primary: DomainTag) -> f64 {
    let base = lookup(BASE_IMPORTANCE, &member.id).unwrap_or(DEFAULT_IMPORTANCE);
    let adjustment = DOMAIN_IMPORTANCE
        .iter()
        .find(|(domain, _)| *domain == primary)
        .and_then(|(_, table)| lookup(table, &member.id))
        .unwrap_or(0.0);
    base + adjustment
}
