// SPDX-FileCopyrightText: 2026 Crewplan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The model allocator.
//!
//! Allocation orchestrates: snapshot > primaries per strategy > backups >
//! credentials > confidence and rationale. The snapshot is taken once at
//! entry so a concurrent reload never mixes two configurations in one
//! allocation.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use crewplan_config::{CatalogSnapshot, ConfigHandle, ModelCatalogEntry};
use crewplan_core::{
    AgentArchetype, Allocation, BudgetTier, CredentialSource, RequirementProfile, Strategy,
    TeamSelection,
};
use tracing::{debug, warn};

use crate::budget::BudgetTracker;
use crate::credentials::EnvCredentials;
use crate::scoring::{CODING_ROLES, CREATIVE_ROLES};
use crate::strategy;

const PREFERENCE_CONFIDENCE_WEIGHT: f64 = 0.5;
const STRATEGY_CONFIDENCE: f64 = 0.3;
const BUDGET_CONFIDENCE: f64 = 0.2;

/// `(strength, roles, label)`: reported when one of the roles is served by a
/// model with the strength.
const SPECIALISED: &[(&str, &[&str], &str)] = &[
    ("coding", CODING_ROLES, "coding"),
    ("creative_writing", CREATIVE_ROLES, "creative"),
];

/// Assigns language models to team members.
pub struct ModelAllocator {
    config: Arc<ConfigHandle>,
    credentials: Box<dyn CredentialSource>,
}

impl ModelAllocator {
    pub fn new(config: Arc<ConfigHandle>, credentials: Box<dyn CredentialSource>) -> Self {
        Self {
            config,
            credentials,
        }
    }

    /// An allocator checking credentials against the process environment.
    pub fn with_env(config: Arc<ConfigHandle>) -> Self {
        Self::new(config, Box::new(EnvCredentials))
    }

    pub fn config(&self) -> &Arc<ConfigHandle> {
        &self.config
    }

    /// Allocate a model to every member of `team`.
    pub fn allocate(
        &self,
        team: &TeamSelection,
        profile: &RequirementProfile,
        budget: BudgetTier,
        strategy: Strategy,
    ) -> Allocation {
        let snapshot = self.config.snapshot();
        let ceiling = snapshot.ceiling(budget);
        let members = &team.members;

        let primaries = strategy::assign(strategy, &snapshot, members, profile, ceiling);

        let mut member_to_model = BTreeMap::new();
        let mut member_to_model_name = BTreeMap::new();
        let mut member_to_backup = BTreeMap::new();
        let mut required_credentials = BTreeSet::new();
        let mut budget_used = BudgetTracker::new(ceiling);

        for (member, model) in members.iter().zip(&primaries) {
            member_to_model.insert(member.id.clone(), model.canonical_name.clone());
            member_to_model_name.insert(member.id.clone(), model.name.clone());
            if let Some(backup) = backup_for(&snapshot, model) {
                member_to_backup.insert(member.id.clone(), backup.canonical_name.clone());
            }
            required_credentials.insert(model.credential_key.clone());
            budget_used.record(snapshot.cost_weight(model.cost_tier));
        }

        let missing_credentials: BTreeSet<String> = required_credentials
            .iter()
            .filter(|key| !self.credentials.is_present(key))
            .cloned()
            .collect();
        if !missing_credentials.is_empty() {
            warn!(missing = ?missing_credentials, "credentials missing for allocated models");
        }

        let confidence = confidence(&snapshot, members, &primaries);
        let rationale = rationale(strategy, members, &primaries, &budget_used);
        let estimated_cost = budget_used.spent();

        debug!(
            strategy = %strategy,
            budget = %budget,
            cost = estimated_cost,
            ceiling,
            "allocation complete"
        );

        Allocation {
            member_to_model,
            member_to_model_name,
            member_to_backup,
            estimated_cost,
            budget_tier: budget,
            budget_ceiling: budget_used.ceiling(),
            strategy_used: strategy,
            confidence,
            required_credentials,
            missing_credentials,
            rationale,
        }
    }

    /// Enabled models, in pool order.
    pub fn available_models(&self) -> Vec<ModelCatalogEntry> {
        self.config.snapshot().enabled_models().cloned().collect()
    }

    /// Catalog entry for `name`, enabled or not.
    pub fn model_info(&self, name: &str) -> Option<ModelCatalogEntry> {
        self.config.snapshot().entry(name).cloned()
    }

    /// Whether `name` is enabled and its credential is present.
    pub fn is_model_available(&self, name: &str) -> bool {
        self.config
            .snapshot()
            .entry(name)
            .is_some_and(|m| m.enabled && self.credentials.is_present(&m.credential_key))
    }
}

/// The configured backup when usable, else the global fallback if allowed.
fn backup_for<'s>(
    snapshot: &'s CatalogSnapshot,
    primary: &ModelCatalogEntry,
) -> Option<&'s ModelCatalogEntry> {
    let configured = primary
        .backup_name
        .as_deref()
        .and_then(|name| snapshot.entry(name))
        .filter(|b| b.enabled && b.name != primary.name);
    if configured.is_some() {
        return configured;
    }
    let fallback = snapshot.fallback();
    let allowed = snapshot.config().fallback_settings.enable_fallback;
    (allowed && fallback.name != primary.name).then_some(fallback)
}

/// `0.5 × preferred hit ratio + 0.3 + 0.2`, or 0 for an empty team.
fn confidence(
    snapshot: &CatalogSnapshot,
    members: &[AgentArchetype],
    primaries: &[&ModelCatalogEntry],
) -> f64 {
    if members.is_empty() {
        return 0.0;
    }
    let hits = members
        .iter()
        .zip(primaries)
        .filter(|(member, model)| {
            snapshot
                .preferred_models(&member.id)
                .is_some_and(|preferred| preferred.iter().any(|p| *p == model.name))
        })
        .count();
    let ratio = hits as f64 / members.len() as f64;
    (PREFERENCE_CONFIDENCE_WEIGHT * ratio + STRATEGY_CONFIDENCE + BUDGET_CONFIDENCE).min(1.0)
}

fn rationale(
    strategy: Strategy,
    members: &[AgentArchetype],
    primaries: &[&ModelCatalogEntry],
    budget_used: &BudgetTracker,
) -> String {
    let mut parts = vec![strategy.describe().to_string()];

    // Distribution in first-seen order.
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for model in primaries {
        match counts.iter_mut().find(|(name, _)| *name == model.name) {
            Some((_, count)) => *count += 1,
            None => counts.push((model.name.as_str(), 1)),
        }
    }
    let distribution = if counts.is_empty() {
        "none".to_string()
    } else {
        counts
            .iter()
            .map(|(name, count)| format!("{name}({count})"))
            .collect::<Vec<_>>()
            .join(", ")
    };
    parts.push(format!("model distribution: {distribution}"));

    let usage = budget_used.utilization() * 100.0;
    parts.push(format!("budget usage: {usage:.1}%"));

    let specialised: Vec<&str> = SPECIALISED
        .iter()
        .filter(|(strength, roles, _)| {
            members
                .iter()
                .zip(primaries)
                .any(|(member, model)| {
                    roles.contains(&member.id.as_str()) && model.has_strength(strength)
                })
        })
        .map(|(_, _, label)| *label)
        .collect();
    if !specialised.is_empty() {
        parts.push(format!("specialised assignments: {}", specialised.join(", ")));
    }

    parts.join(" | ")
}
