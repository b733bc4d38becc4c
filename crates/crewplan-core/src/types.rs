// SPDX-FileCopyrightText: 2026 Crewplan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types passed between the three pipeline stages.
//!
//! Every struct here is plain data: downstream consumers only read fields.
//! Values are built once inside a stage and never mutated afterwards.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::CrewplanError;

/// Identifier under which a plan is persisted by a [`crate::PlanStore`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProjectId(pub String);

impl std::fmt::Display for ProjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Coarse project category. Declaration order is the tie-break order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DomainTag {
    Web,
    Data,
    Content,
    Automation,
    Mobile,
    Documents,
    Commerce,
    Game,
    General,
}

impl DomainTag {
    /// Every tag in declaration order.
    pub const ALL: [DomainTag; 9] = [
        DomainTag::Web,
        DomainTag::Data,
        DomainTag::Content,
        DomainTag::Automation,
        DomainTag::Mobile,
        DomainTag::Documents,
        DomainTag::Commerce,
        DomainTag::Game,
        DomainTag::General,
    ];
}

/// Project complexity tier, ordered simple < medium < complex < advanced.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Complexity {
    Simple,
    Medium,
    Complex,
    Advanced,
}

impl Complexity {
    /// Every tier in declaration order.
    pub const ALL: [Complexity; 4] = [
        Complexity::Simple,
        Complexity::Medium,
        Complexity::Complex,
        Complexity::Advanced,
    ];

    /// Team size before secondary-domain adjustments.
    pub fn base_team_size(self) -> usize {
        match self {
            Complexity::Simple => 3,
            Complexity::Medium => 4,
            Complexity::Complex => 5,
            Complexity::Advanced => 6,
        }
    }

    /// Whether this tier calls for heavyweight models and wider teams.
    pub fn is_demanding(self) -> bool {
        matches!(self, Complexity::Complex | Complexity::Advanced)
    }
}

/// Smallest team the pipeline will assemble.
pub const MIN_TEAM_SIZE: usize = 3;

/// Largest team the pipeline will assemble.
pub const MAX_TEAM_SIZE: usize = 7;

/// Team size for a profile: `base[complexity] + min(secondary, 2)`, clamped to [3, 7].
pub fn team_size_for(complexity: Complexity, secondary_domains: usize) -> usize {
    (complexity.base_team_size() + secondary_domains.min(2)).clamp(MIN_TEAM_SIZE, MAX_TEAM_SIZE)
}

/// Functional family an archetype belongs to.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RoleCategory {
    Analysis,
    Architecture,
    Development,
    Data,
    Content,
    Automation,
    Document,
    Quality,
    Design,
    General,
}

/// Spending tier chosen by the caller; each maps to a cost ceiling.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum BudgetTier {
    Low,
    #[default]
    Medium,
    High,
    Unlimited,
}

/// Model allocation policy.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Strategy {
    CostOptimized,
    PerformanceOptimized,
    #[default]
    Balanced,
    SingleModel,
}

impl Strategy {
    /// Every strategy in declaration order.
    pub const ALL: [Strategy; 4] = [
        Strategy::CostOptimized,
        Strategy::PerformanceOptimized,
        Strategy::Balanced,
        Strategy::SingleModel,
    ];

    /// Short human-readable description used in allocation rationales.
    pub fn describe(self) -> &'static str {
        match self {
            Strategy::CostOptimized => "cost-optimized strategy",
            Strategy::PerformanceOptimized => "performance-optimized strategy",
            Strategy::Balanced => "balanced strategy (cost/performance)",
            Strategy::SingleModel => "single-model strategy",
        }
    }
}

/// Relative price band of a model.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CostTier {
    Low,
    Medium,
    High,
}

/// Relative latency band of a model.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SpeedTier {
    Slow,
    Medium,
    Fast,
    VeryFast,
}

/// Supporting signals collected while classifying a request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisDetails {
    /// Raw weighted score of the primary domain.
    pub domain_score: f64,
    /// `min(domain_score / 3, 1)`.
    pub domain_confidence: f64,
    /// Human-readable reasons that pushed the complexity tier.
    pub complexity_factors: Vec<String>,
    /// Why the tech stack looks the way it does.
    pub tech_reasoning: String,
}

/// Structured classification of a free-text project request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequirementProfile {
    pub primary_domain: DomainTag,
    /// At most three tags, never containing `primary_domain`.
    pub secondary_domains: Vec<DomainTag>,
    pub complexity: Complexity,
    pub tech_stack: BTreeSet<String>,
    pub required_libraries: BTreeSet<String>,
    pub team_size: usize,
    /// Up to ten keywords, most frequent first.
    pub keywords: Vec<String>,
    pub confidence: f64,
    pub details: AnalysisDetails,
}

impl RequirementProfile {
    /// The primary domain followed by the secondary domains.
    pub fn domains(&self) -> BTreeSet<DomainTag> {
        std::iter::once(self.primary_domain)
            .chain(self.secondary_domains.iter().copied())
            .collect()
    }
}

/// Reusable agent role template from the static catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentArchetype {
    pub id: String,
    pub role_title: String,
    pub goal: String,
    pub backstory: String,
    pub category: RoleCategory,
    pub domains: BTreeSet<DomainTag>,
    pub capabilities: Vec<String>,
    pub complexity_fit: BTreeSet<Complexity>,
    /// 1 is the highest priority.
    pub priority: u8,
    /// Ids of archetypes this one works well with.
    pub synergy_ids: Vec<String>,
}

impl AgentArchetype {
    /// Whether this archetype matches any of `domains`, or is a generalist.
    pub fn matches_domains(&self, domains: &BTreeSet<DomainTag>) -> bool {
        self.domains.contains(&DomainTag::General) || !self.domains.is_disjoint(domains)
    }

    /// Whether this archetype is suited to `complexity`.
    pub fn fits(&self, complexity: Complexity) -> bool {
        self.complexity_fit.contains(&complexity)
    }

    /// Lowercased role title, goal and backstory for keyword matching.
    pub fn role_text(&self) -> String {
        format!("{} {} {}", self.role_title, self.goal, self.backstory).to_lowercase()
    }
}

/// The team chosen for a profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamSelection {
    pub members: Vec<AgentArchetype>,
    pub rationale: String,
    pub confidence: f64,
    pub performance_estimate: f64,
    /// True when no candidate team survived and the default priority list was used.
    pub fallback: bool,
}

impl TeamSelection {
    /// Member ids in team order.
    pub fn member_ids(&self) -> Vec<&str> {
        self.members.iter().map(|m| m.id.as_str()).collect()
    }
}

/// Per-member model assignment for a team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    /// Agent id to provider-qualified model name.
    pub member_to_model: BTreeMap<String, String>,
    /// Agent id to short model name.
    pub member_to_model_name: BTreeMap<String, String>,
    /// Agent id to provider-qualified backup model name.
    pub member_to_backup: BTreeMap<String, String>,
    pub estimated_cost: f64,
    pub budget_tier: BudgetTier,
    pub budget_ceiling: f64,
    pub strategy_used: Strategy,
    pub confidence: f64,
    pub required_credentials: BTreeSet<String>,
    pub missing_credentials: BTreeSet<String>,
    pub rationale: String,
}

/// The frozen output of one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub profile: RequirementProfile,
    pub team: TeamSelection,
    pub allocation: Allocation,
}

/// A request as received from an outer layer (CLI, web handler).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlanRequest {
    pub text: String,
    #[serde(default)]
    pub budget: Option<BudgetTier>,
    #[serde(default)]
    pub strategy: Option<Strategy>,
}

impl PlanRequest {
    /// A request with caller defaults for budget and strategy.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            budget: None,
            strategy: None,
        }
    }

    /// Parse a JSON request, rejecting anything structurally invalid.
    pub fn from_json(raw: &str) -> Result<Self, CrewplanError> {
        serde_json::from_str(raw).map_err(|e| CrewplanError::InvalidInput(e.to_string()))
    }
}
