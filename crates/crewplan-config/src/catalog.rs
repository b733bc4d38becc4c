// SPDX-FileCopyrightText: 2026 Crewplan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Derived model catalog, rebuilt whole from each configuration value.

use std::collections::HashMap;

use crewplan_core::{BudgetTier, CostTier, SpeedTier};
use serde::Serialize;

use crate::diagnostic::ConfigError;
use crate::model::{AllocationConfig, ModelEntry};
use crate::validation::validate_config;

/// Provider name to model-name prefix.
const PROVIDER_PREFIXES: &[(&str, &str)] = &[
    ("openai", "openai/"),
    ("google", "gemini/"),
    ("anthropic", "anthropic/"),
    ("deepseek", "deepseek/"),
    ("mistral", "mistral/"),
    ("ollama", "ollama/"),
];

/// Provider-qualified name for `name` served by `provider`.
///
/// Names that already contain `/` are taken as qualified.
pub fn canonical_name(provider: &str, name: &str) -> String {
    if name.contains('/') {
        return name.to_string();
    }
    let provider = provider.to_lowercase();
    match PROVIDER_PREFIXES.iter().find(|(p, _)| *p == provider) {
        Some((_, prefix)) => format!("{prefix}{name}"),
        None => format!("{provider}/{name}"),
    }
}

/// Credential slot for `provider` when the entry names none.
pub fn default_credential_key(provider: &str) -> String {
    format!("{}_API_KEY", provider.to_uppercase())
}

/// A model pool entry with every derived field resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelCatalogEntry {
    pub name: String,
    pub canonical_name: String,
    pub cost_tier: CostTier,
    pub speed_tier: SpeedTier,
    pub strengths: Vec<String>,
    pub provider: String,
    pub credential_key: String,
    pub enabled: bool,
    pub backup_name: Option<String>,
}

impl ModelCatalogEntry {
    fn from_entry(entry: &ModelEntry) -> Self {
        Self {
            name: entry.name.clone(),
            canonical_name: entry
                .canonical_name
                .clone()
                .unwrap_or_else(|| canonical_name(&entry.provider, &entry.name)),
            cost_tier: entry.cost_tier,
            speed_tier: entry.speed_tier,
            strengths: entry.strengths.clone(),
            provider: entry.provider.clone(),
            credential_key: entry
                .credential_key
                .clone()
                .unwrap_or_else(|| default_credential_key(&entry.provider)),
            enabled: entry.enabled,
            backup_name: entry.backup_name.clone(),
        }
    }

    /// Whether the entry lists `strength`.
    pub fn has_strength(&self, strength: &str) -> bool {
        self.strengths.iter().any(|s| s == strength)
    }
}

/// An immutable, validated view of one configuration value.
///
/// A snapshot always contains its fallback model, so lookups of the
/// fallback cannot fail.
#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    config: AllocationConfig,
    models: Vec<ModelCatalogEntry>,
    by_name: HashMap<String, usize>,
    fallback: usize,
}

impl CatalogSnapshot {
    /// Validates `config` and derives the catalog from it.
    pub fn build(config: AllocationConfig) -> Result<Self, Vec<ConfigError>> {
        validate_config(&config)?;
        let (models, by_name) = derive_models(&config);

        let fallback = by_name
            .get(&config.fallback_settings.fallback_model)
            .copied()
            .ok_or_else(|| {
                vec![ConfigError::Validation {
                    message: format!(
                        "fallback_settings.fallback_model `{}` is not in model_pool",
                        config.fallback_settings.fallback_model
                    ),
                }]
            })?;

        Ok(Self {
            config,
            models,
            by_name,
            fallback,
        })
    }

    /// The configuration this snapshot was derived from.
    pub fn config(&self) -> &AllocationConfig {
        &self.config
    }

    /// Every model, in pool order.
    pub fn models(&self) -> &[ModelCatalogEntry] {
        &self.models
    }

    /// Enabled models, in pool order.
    pub fn enabled_models(&self) -> impl Iterator<Item = &ModelCatalogEntry> {
        self.models.iter().filter(|m| m.enabled)
    }

    /// Looks up a model by short name.
    pub fn entry(&self, name: &str) -> Option<&ModelCatalogEntry> {
        self.by_name.get(name).map(|&i| &self.models[i])
    }

    /// Position of `name` in the pool, used as the final tie-break.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    /// The configured fallback model.
    pub fn fallback(&self) -> &ModelCatalogEntry {
        &self.models[self.fallback]
    }

    /// Preferred model names for an agent archetype, if configured.
    pub fn preferred_models(&self, agent_id: &str) -> Option<&[String]> {
        self.config
            .agent_preferences
            .get(agent_id)
            .map(|p| p.preferred_models.as_slice())
    }

    /// Cost of one assignment to a model of `tier`.
    pub fn cost_weight(&self, tier: CostTier) -> f64 {
        self.config.budget_constraints.cost_weights.weight(tier)
    }

    /// Cost ceiling for `tier`.
    pub fn ceiling(&self, tier: BudgetTier) -> f64 {
        self.config.budget_constraints.cost_limits.ceiling(tier)
    }
}

impl Default for CatalogSnapshot {
    fn default() -> Self {
        let config = AllocationConfig::default();
        let (models, by_name) = derive_models(&config);
        let fallback = by_name
            .get(&config.fallback_settings.fallback_model)
            .copied()
            .unwrap_or(0);
        Self {
            config,
            models,
            by_name,
            fallback,
        }
    }
}

fn derive_models(config: &AllocationConfig) -> (Vec<ModelCatalogEntry>, HashMap<String, usize>) {
    let models: Vec<ModelCatalogEntry> = config
        .model_pool
        .iter()
        .map(ModelCatalogEntry::from_entry)
        .collect();
    let by_name = models
        .iter()
        .enumerate()
        .map(|(i, m)| (m.name.clone(), i))
        .collect();
    (models, by_name)
}
