// SPDX-FileCopyrightText: 2026 Crewplan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Semantic checks run after a configuration deserializes.
//!
//! Checks cross-references that serde cannot express: backups, the fallback
//! model and preferences must all name models in the pool.

use std::collections::HashSet;

use crate::diagnostic::ConfigError;
use crate::model::AllocationConfig;

/// Checks pool names, cross-references and numeric ranges.
///
/// Returns every problem found rather than stopping at the first.
pub fn validate_config(config: &AllocationConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.model_pool.is_empty() {
        errors.push(ConfigError::Validation {
            message: "model_pool must contain at least one model".to_string(),
        });
    }

    let mut names = HashSet::new();
    for (i, entry) in config.model_pool.iter().enumerate() {
        if entry.name.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("model_pool[{i}].name must not be empty"),
            });
        } else if !names.insert(entry.name.as_str()) {
            errors.push(ConfigError::Validation {
                message: format!("duplicate model name `{}` in model_pool", entry.name),
            });
        }

        if entry.provider.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("model_pool[{i}].provider must not be empty"),
            });
        }
    }

    for entry in &config.model_pool {
        if let Some(backup) = &entry.backup_name {
            if !names.contains(backup.as_str()) {
                errors.push(ConfigError::Validation {
                    message: format!(
                        "backup_name `{backup}` of model `{}` is not in model_pool",
                        entry.name
                    ),
                });
            }
        }
    }

    let fallback = &config.fallback_settings.fallback_model;
    if !names.contains(fallback.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!("fallback_settings.fallback_model `{fallback}` is not in model_pool"),
        });
    }

    for (agent, preference) in &config.agent_preferences {
        for model in &preference.preferred_models {
            if !names.contains(model.as_str()) {
                errors.push(ConfigError::Validation {
                    message: format!(
                        "agent_preferences.{agent} names unknown model `{model}`"
                    ),
                });
            }
        }
    }

    let limits = &config.budget_constraints.cost_limits;
    for (tier, value) in [
        ("low", limits.low),
        ("medium", limits.medium),
        ("high", limits.high),
        ("unlimited", limits.unlimited),
    ] {
        if !(value.is_finite() && value >= 0.0) {
            errors.push(ConfigError::Validation {
                message: format!(
                    "budget_constraints.cost_limits.{tier} must be non-negative, got {value}"
                ),
            });
        }
    }

    let weights = &config.budget_constraints.cost_weights;
    for (tier, value) in [
        ("low", weights.low),
        ("medium", weights.medium),
        ("high", weights.high),
    ] {
        if !(value.is_finite() && value >= 0.0) {
            errors.push(ConfigError::Validation {
                message: format!(
                    "budget_constraints.cost_weights.{tier} must be non-negative, got {value}"
                ),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
