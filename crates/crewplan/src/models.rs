// SPDX-FileCopyrightText: 2026 Crewplan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `crewplan models` command implementation.

use std::fmt::Write as _;
use std::io::IsTerminal;
use std::sync::Arc;

use colored::Colorize;
use crewplan_allocator::ModelAllocator;
use crewplan_config::ConfigHandle;
use crewplan_config::diagnostic::suggest_key;
use crewplan_core::CrewplanError;

/// Runs the `crewplan models` command.
pub fn run_models(
    config: Arc<ConfigHandle>,
    name: Option<&str>,
    plain: bool,
) -> Result<(), CrewplanError> {
    let color = !plain && std::io::stdout().is_terminal();
    let allocator = ModelAllocator::with_env(config);
    let report = match name {
        Some(name) => describe_model(&allocator, name)?,
        None => list_models(&allocator, color),
    };
    println!("{report}");
    Ok(())
}

/// One line per pool entry, in configuration order.
fn list_models(allocator: &ModelAllocator, color: bool) -> String {
    let snapshot = allocator.config().snapshot();
    let fallback = &snapshot.fallback().name;

    let mut out = String::new();
    for model in snapshot.models() {
        let status = match (model.enabled, allocator.is_model_available(&model.name)) {
            (false, _) => "disabled",
            (true, true) => "ready",
            (true, false) => "no credential",
        };
        let status = if !color {
            status.to_string()
        } else if status == "ready" {
            status.green().to_string()
        } else {
            status.yellow().to_string()
        };
        let marker = if &model.name == fallback { " (fallback)" } else { "" };
        let _ = writeln!(
            out,
            "  {:<18}{:<30}{:<8}{:<10}{status}{marker}",
            model.name,
            model.canonical_name,
            model.cost_tier.to_string(),
            model.speed_tier.to_string(),
        );
    }
    out.trim_end().to_string()
}

/// Full details for `name`, including which archetypes prefer it.
fn describe_model(allocator: &ModelAllocator, name: &str) -> Result<String, CrewplanError> {
    let Some(model) = allocator.model_info(name) else {
        let snapshot = allocator.config().snapshot();
        let known: Vec<&str> = snapshot.models().iter().map(|m| m.name.as_str()).collect();
        let hint = suggest_key(name, &known)
            .map(|s| format!(", did you mean `{s}`?"))
            .unwrap_or_default();
        return Err(CrewplanError::InvalidInput(format!(
            "unknown model `{name}`{hint}"
        )));
    };

    let snapshot = allocator.config().snapshot();
    let preferred_by: Vec<&str> = snapshot
        .config()
        .agent_preferences
        .iter()
        .filter(|(_, p)| p.preferred_models.iter().any(|m| m == name))
        .map(|(id, _)| id.as_str())
        .collect();

    let mut out = String::new();
    let _ = writeln!(out, "{}", model.name);
    let _ = writeln!(out, "  {:<14}{}", "canonical", model.canonical_name);
    let _ = writeln!(out, "  {:<14}{}", "provider", model.provider);
    let _ = writeln!(out, "  {:<14}{}", "cost tier", model.cost_tier);
    let _ = writeln!(out, "  {:<14}{}", "speed tier", model.speed_tier);
    let _ = writeln!(out, "  {:<14}{}", "strengths", model.strengths.join(", "));
    let _ = writeln!(out, "  {:<14}{}", "credential", model.credential_key);
    let _ = writeln!(out, "  {:<14}{}", "enabled", model.enabled);
    let _ = writeln!(
        out,
        "  {:<14}{}",
        "available",
        allocator.is_model_available(&model.name)
    );
    let _ = writeln!(
        out,
        "  {:<14}{}",
        "backup",
        model.backup_name.as_deref().unwrap_or("-")
    );
    let preferred = if preferred_by.is_empty() {
        "-".to_string()
    } else {
        preferred_by.join(", ")
    };
    let _ = writeln!(out, "  {:<14}{preferred}", "preferred by");
    Ok(out.trim_end().to_string())
}
