// SPDX-FileCopyrightText: 2026 Crewplan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for model allocation.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys, and every field has a default so a partial file (or an
//! empty one) still yields a complete configuration.

use std::collections::BTreeMap;

use crewplan_core::{BudgetTier, CostTier, SpeedTier, Strategy};
use serde::{Deserialize, Serialize};

/// Top-level allocation configuration, stored as JSON.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AllocationConfig {
    /// Free-form configuration format version.
    #[serde(default = "default_version")]
    pub version: String,

    /// Human-readable description of this configuration.
    #[serde(default = "default_description")]
    pub description: String,

    /// Models the allocator may assign, in priority order.
    #[serde(default = "default_model_pool")]
    pub model_pool: Vec<ModelEntry>,

    /// Preferred models per agent archetype id.
    #[serde(default = "default_agent_preferences")]
    pub agent_preferences: BTreeMap<String, AgentPreference>,

    /// Budget tiers and per-cost-tier weights.
    #[serde(default)]
    pub budget_constraints: BudgetConstraints,

    /// Strategy selection.
    #[serde(default)]
    pub allocation_strategies: AllocationStrategies,

    /// Fallback model settings.
    #[serde(default)]
    pub fallback_settings: FallbackSettings,

    /// Credential slots checked at startup.
    #[serde(default)]
    pub credentials: CredentialSettings,
}

impl Default for AllocationConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            description: default_description(),
            model_pool: default_model_pool(),
            agent_preferences: default_agent_preferences(),
            budget_constraints: BudgetConstraints::default(),
            allocation_strategies: AllocationStrategies::default(),
            fallback_settings: FallbackSettings::default(),
            credentials: CredentialSettings::default(),
        }
    }
}

fn default_version() -> String {
    "1.0".to_string()
}

fn default_description() -> String {
    "crewplan model allocation settings (editable)".to_string()
}

/// One model in the allocation pool.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ModelEntry {
    /// Short model name, unique within the pool (e.g. `gpt-4`).
    pub name: String,

    /// Relative price band.
    pub cost_tier: CostTier,

    /// Relative latency band.
    pub speed_tier: SpeedTier,

    /// Free-form strength labels (e.g. `coding`, `advanced_reasoning`).
    #[serde(default)]
    pub strengths: Vec<String>,

    /// Provider name (e.g. `openai`, `google`).
    pub provider: String,

    /// Explicit provider-qualified name. Derived from the provider when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canonical_name: Option<String>,

    /// Credential slot name. Defaults to `{PROVIDER}_API_KEY`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credential_key: Option<String>,

    /// Disabled models are never assigned.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Model to fall back to when this one is unavailable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backup_name: Option<String>,
}

fn default_true() -> bool {
    true
}

/// Preferred models for one agent archetype.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentPreference {
    /// Model names, most preferred first.
    pub preferred_models: Vec<String>,

    /// Why these models suit the role.
    #[serde(default)]
    pub reasoning: String,
}

/// Budget tier ceilings and cost weights.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BudgetConstraints {
    /// Budget tier used when a request names none.
    #[serde(default)]
    pub default_budget: BudgetTier,

    /// Cost ceiling per budget tier.
    #[serde(default)]
    pub cost_limits: CostLimits,

    /// Cost contributed by one assignment, per model cost tier.
    #[serde(default)]
    pub cost_weights: CostWeights,
}

impl Default for BudgetConstraints {
    fn default() -> Self {
        Self {
            default_budget: BudgetTier::default(),
            cost_limits: CostLimits::default(),
            cost_weights: CostWeights::default(),
        }
    }
}

/// Cost ceiling per budget tier.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CostLimits {
    #[serde(default = "default_limit_low")]
    pub low: f64,
    #[serde(default = "default_limit_medium")]
    pub medium: f64,
    #[serde(default = "default_limit_high")]
    pub high: f64,
    #[serde(default = "default_limit_unlimited")]
    pub unlimited: f64,
}

impl CostLimits {
    /// Ceiling for `tier`.
    pub fn ceiling(&self, tier: BudgetTier) -> f64 {
        match tier {
            BudgetTier::Low => self.low,
            BudgetTier::Medium => self.medium,
            BudgetTier::High => self.high,
            BudgetTier::Unlimited => self.unlimited,
        }
    }
}

impl Default for CostLimits {
    fn default() -> Self {
        Self {
            low: default_limit_low(),
            medium: default_limit_medium(),
            high: default_limit_high(),
            unlimited: default_limit_unlimited(),
        }
    }
}

fn default_limit_low() -> f64 {
    100.0
}

fn default_limit_medium() -> f64 {
    500.0
}

fn default_limit_high() -> f64 {
    1000.0
}

fn default_limit_unlimited() -> f64 {
    999_999.0
}

/// Cost of one assignment per model cost tier.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CostWeights {
    #[serde(default = "default_weight_low")]
    pub low: f64,
    #[serde(default = "default_weight_medium")]
    pub medium: f64,
    #[serde(default = "default_weight_high")]
    pub high: f64,
}

impl CostWeights {
    /// Weight for `tier`.
    pub fn weight(&self, tier: CostTier) -> f64 {
        match tier {
            CostTier::Low => self.low,
            CostTier::Medium => self.medium,
            CostTier::High => self.high,
        }
    }
}

impl Default for CostWeights {
    fn default() -> Self {
        Self {
            low: default_weight_low(),
            medium: default_weight_medium(),
            high: default_weight_high(),
        }
    }
}

fn default_weight_low() -> f64 {
    1.0
}

fn default_weight_medium() -> f64 {
    3.0
}

fn default_weight_high() -> f64 {
    8.0
}

/// Allocation strategy settings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AllocationStrategies {
    /// Strategy used when a request names none.
    #[serde(default)]
    pub default: Strategy,
}

/// Fallback model settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FallbackSettings {
    /// Whether backups fall back to `fallback_model` when no configured backup applies.
    #[serde(default = "default_true")]
    pub enable_fallback: bool,

    /// Model used when no other candidate is available. Must be in the pool.
    #[serde(default = "default_fallback_model")]
    pub fallback_model: String,

    /// Retry budget handed to downstream executors.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

impl Default for FallbackSettings {
    fn default() -> Self {
        Self {
            enable_fallback: true,
            fallback_model: default_fallback_model(),
            max_retries: default_max_retries(),
        }
    }
}

fn default_fallback_model() -> String {
    "gemini-flash".to_string()
}

fn default_max_retries() -> u32 {
    3
}

/// Credential slots reported by `crewplan check`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CredentialSettings {
    /// Slots that must be present.
    #[serde(default)]
    pub required_env_keys: Vec<String>,

    /// Slots that are reported when present.
    #[serde(default)]
    pub optional_env_keys: Vec<String>,
}

fn model(
    name: &str,
    cost_tier: CostTier,
    speed_tier: SpeedTier,
    strengths: &[&str],
    provider: &str,
    backup: &str,
) -> ModelEntry {
    ModelEntry {
        name: name.to_string(),
        cost_tier,
        speed_tier,
        strengths: strengths.iter().map(|s| s.to_string()).collect(),
        provider: provider.to_string(),
        canonical_name: None,
        credential_key: None,
        enabled: true,
        backup_name: Some(backup.to_string()),
    }
}

fn default_model_pool() -> Vec<ModelEntry> {
    vec![
        model(
            "gpt-4",
            CostTier::High,
            SpeedTier::Medium,
            &["advanced_reasoning", "complex_analysis", "problem_solving"],
            "openai",
            "gpt-3.5-turbo",
        ),
        model(
            "gpt-3.5-turbo",
            CostTier::Medium,
            SpeedTier::Fast,
            &["general_purpose", "quick_response", "cost_effective"],
            "openai",
            "gemini-flash",
        ),
        model(
            "gemini-flash",
            CostTier::Low,
            SpeedTier::Fast,
            &["speed", "cost_efficiency", "general_tasks"],
            "google",
            "gpt-3.5-turbo",
        ),
        model(
            "gemini-pro",
            CostTier::Medium,
            SpeedTier::Medium,
            &["balanced_performance", "multimodal", "reasoning"],
            "google",
            "gpt-3.5-turbo",
        ),
        model(
            "claude-3",
            CostTier::Medium,
            SpeedTier::Medium,
            &["creative_writing", "document_analysis", "structured_output"],
            "anthropic",
            "gpt-3.5-turbo",
        ),
        model(
            "deepseek-coder",
            CostTier::Low,
            SpeedTier::Fast,
            &["coding", "technical_documentation", "debugging"],
            "deepseek",
            "gpt-3.5-turbo",
        ),
    ]
}

fn default_agent_preferences() -> BTreeMap<String, AgentPreference> {
    let table: &[(&str, &[&str], &str)] = &[
        (
            "requirements_analyst",
            &["gpt-4", "claude-3", "gemini-pro"],
            "complex requirement analysis needs advanced reasoning",
        ),
        (
            "technology_researcher",
            &["gpt-4", "gemini-pro", "gpt-3.5-turbo"],
            "current technology knowledge and reasoning",
        ),
        (
            "solution_architect",
            &["gpt-4", "claude-3"],
            "system design needs strong analysis",
        ),
        (
            "implementation_engineer",
            &["deepseek-coder", "gpt-4", "gpt-3.5-turbo"],
            "coding-specialised or strong programming models",
        ),
        (
            "frontend_developer",
            &["deepseek-coder", "gpt-3.5-turbo", "gemini-flash"],
            "fast responses and coding ability",
        ),
        (
            "backend_developer",
            &["deepseek-coder", "gpt-4", "gpt-3.5-turbo"],
            "complex business logic",
        ),
        (
            "data_scientist",
            &["gpt-4", "gemini-pro", "claude-3"],
            "data analysis and statistical reasoning",
        ),
        (
            "data_engineer",
            &["deepseek-coder", "gpt-4", "gemini-pro"],
            "pipeline construction needs coding and architecture",
        ),
        (
            "content_strategist",
            &["claude-3", "gpt-4", "gemini-pro"],
            "creativity and analysis",
        ),
        (
            "content_creator",
            &["claude-3", "gpt-4", "gemini-pro"],
            "creative language generation",
        ),
        (
            "seo_specialist",
            &["gpt-3.5-turbo", "gemini-flash", "claude-3"],
            "fast analysis and marketing knowledge",
        ),
        (
            "automation_specialist",
            &["deepseek-coder", "gpt-3.5-turbo", "gemini-flash"],
            "scripting and efficiency",
        ),
        (
            "web_scraper",
            &["deepseek-coder", "gpt-3.5-turbo", "gemini-flash"],
            "coding and fast processing",
        ),
        (
            "document_parser",
            &["claude-3", "gpt-4", "gemini-pro"],
            "structure analysis and text understanding",
        ),
        (
            "information_extractor",
            &["gpt-4", "claude-3", "gemini-pro"],
            "advanced natural language processing",
        ),
        (
            "quality_assurance",
            &["gpt-4", "claude-3", "gpt-3.5-turbo"],
            "careful review",
        ),
    ];

    table
        .iter()
        .map(|(id, models, reasoning)| {
            (
                id.to_string(),
                AgentPreference {
                    preferred_models: models.iter().map(|m| m.to_string()).collect(),
                    reasoning: reasoning.to_string(),
                },
            )
        })
        .collect()
}
