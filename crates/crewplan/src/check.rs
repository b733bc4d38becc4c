// SPDX-FileCopyrightText: 2026 Crewplan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `crewplan check` command implementation.
//!
//! Validates the configuration file and reports which models can actually
//! be allocated with the credentials present in the environment.

use std::io::IsTerminal;
use std::path::Path;

use crewplan_allocator::EnvCredentials;
use crewplan_config::{CatalogSnapshot, ConfigError};
use crewplan_core::{CredentialSource, CrewplanError};

/// Status of a diagnostic check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    Pass,
    Warn,
    Fail,
}

/// Result of a single diagnostic check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub name: &'static str,
    pub status: CheckStatus,
    pub message: String,
}

impl CheckResult {
    fn new(name: &'static str, status: CheckStatus, message: impl Into<String>) -> Self {
        Self {
            name,
            status,
            message: message.into(),
        }
    }
}

/// Runs the `crewplan check` command.
///
/// Fails when any check fails; warnings alone do not.
pub fn run_check(path: &Path, plain: bool) -> Result<(), CrewplanError> {
    let use_color = !plain && std::io::stdout().is_terminal();

    let (config_result, errors) = check_config(path);
    if !errors.is_empty() {
        crewplan_config::render_errors(&errors);
    }
    let snapshot = load_snapshot(path, errors.is_empty());

    let mut results = vec![config_result];
    results.extend(check_snapshot(&snapshot, &EnvCredentials));

    println!();
    println!("  crewplan check");
    println!("  {}", "-".repeat(50));

    let mut fail_count = 0;
    let mut warn_count = 0;
    for result in &results {
        match result.status {
            CheckStatus::Pass => {}
            CheckStatus::Warn => warn_count += 1,
            CheckStatus::Fail => fail_count += 1,
        }
        println!("{}", format_line(result, use_color));
    }
    println!();

    if fail_count > 0 || warn_count > 0 {
        let issues = fail_count + warn_count;
        let issue_word = if issues == 1 { "issue" } else { "issues" };
        println!("  {issues} {issue_word} found.");
    } else {
        println!("  All checks passed.");
    }
    println!();

    if fail_count > 0 {
        return Err(CrewplanError::Config(format!("{fail_count} check(s) failed")));
    }
    Ok(())
}

fn format_line(result: &CheckResult, use_color: bool) -> String {
    if use_color {
        use colored::Colorize;
        let (symbol, message) = match result.status {
            CheckStatus::Pass => ("✓".green().to_string(), result.message.normal()),
            CheckStatus::Warn => ("!".yellow().to_string(), result.message.yellow()),
            CheckStatus::Fail => ("✗".red().to_string(), result.message.red()),
        };
        format!("    {symbol} {:<20} {message}", result.name)
    } else {
        let tag = match result.status {
            CheckStatus::Pass => "[OK]  ",
            CheckStatus::Warn => "[WARN]",
            CheckStatus::Fail => "[FAIL]",
        };
        format!("    {tag} {:<20} {}", result.name, result.message)
    }
}

/// Strict load of the file. A missing file is only a warning because the
/// default is written on first use.
fn check_config(path: &Path) -> (CheckResult, Vec<ConfigError>) {
    if !path.exists() {
        let result = CheckResult::new(
            "Configuration",
            CheckStatus::Warn,
            format!(
                "not found: {} (default will be written on first use)",
                path.display()
            ),
        );
        return (result, Vec::new());
    }
    match crewplan_config::load_and_validate_path(path) {
        Ok(config) => {
            let message = format!("valid ({} models)", config.model_pool.len());
            (CheckResult::new("Configuration", CheckStatus::Pass, message), Vec::new())
        }
        Err(errors) => {
            let message = format!("{} error(s), built-in default in use", errors.len());
            (CheckResult::new("Configuration", CheckStatus::Fail, message), errors)
        }
    }
}

fn load_snapshot(path: &Path, valid: bool) -> CatalogSnapshot {
    if !valid || !path.exists() {
        return CatalogSnapshot::default();
    }
    crewplan_config::load_and_validate_path(path)
        .ok()
        .and_then(|config| CatalogSnapshot::build(config).ok())
        .unwrap_or_default()
}

/// Checks that depend only on the effective snapshot.
fn check_snapshot(snapshot: &CatalogSnapshot, credentials: &dyn CredentialSource) -> Vec<CheckResult> {
    vec![
        check_pool(snapshot),
        check_fallback(snapshot),
        check_credentials(snapshot, credentials),
        check_preferences(snapshot),
    ]
}

fn check_pool(snapshot: &CatalogSnapshot) -> CheckResult {
    let total = snapshot.models().len();
    let enabled = snapshot.enabled_models().count();
    let status = if enabled == 0 {
        CheckStatus::Fail
    } else {
        CheckStatus::Pass
    };
    CheckResult::new("Model pool", status, format!("{enabled} of {total} enabled"))
}

fn check_fallback(snapshot: &CatalogSnapshot) -> CheckResult {
    let fallback = snapshot.fallback();
    let enabled = snapshot.config().fallback_settings.enable_fallback;
    match (fallback.enabled, enabled) {
        (true, true) => CheckResult::new("Fallback model", CheckStatus::Pass, fallback.name.clone()),
        (true, false) => CheckResult::new(
            "Fallback model",
            CheckStatus::Pass,
            format!("{} (backups disabled)", fallback.name),
        ),
        (false, _) => CheckResult::new(
            "Fallback model",
            CheckStatus::Warn,
            format!("{} is disabled in model_pool", fallback.name),
        ),
    }
}

fn check_credentials(snapshot: &CatalogSnapshot, credentials: &dyn CredentialSource) -> CheckResult {
    let required_missing: Vec<&str> = snapshot
        .config()
        .credentials
        .required_env_keys
        .iter()
        .filter(|k| !credentials.is_present(k))
        .map(String::as_str)
        .collect();
    if !required_missing.is_empty() {
        return CheckResult::new(
            "Credentials",
            CheckStatus::Fail,
            format!("missing required: {}", required_missing.join(", ")),
        );
    }

    let unusable: Vec<&str> = snapshot
        .enabled_models()
        .filter(|m| !credentials.is_present(&m.credential_key))
        .map(|m| m.name.as_str())
        .collect();
    if unusable.is_empty() {
        CheckResult::new("Credentials", CheckStatus::Pass, "all enabled models covered")
    } else {
        CheckResult::new(
            "Credentials",
            CheckStatus::Warn,
            format!("no credential for: {}", unusable.join(", ")),
        )
    }
}

fn check_preferences(snapshot: &CatalogSnapshot) -> CheckResult {
    let disabled: Vec<String> = snapshot
        .config()
        .agent_preferences
        .iter()
        .flat_map(|(agent, pref)| {
            pref.preferred_models
                .iter()
                .filter(|m| snapshot.entry(m).is_some_and(|e| !e.enabled))
                .map(move |m| format!("{agent}->{m}"))
        })
        .collect();
    let count = snapshot.config().agent_preferences.len();
    if disabled.is_empty() {
        CheckResult::new(
            "Agent preferences",
            CheckStatus::Pass,
            format!("{count} agents configured"),
        )
    } else {
        CheckResult::new(
            "Agent preferences",
            CheckStatus::Warn,
            format!("disabled preferred models: {}", disabled.join(", ")),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crewplan_allocator::StaticCredentials;
    use crewplan_config::AllocationConfig;

    const ALL_KEYS: [&str; 4] = [
        "OPENAI_API_KEY",
        "GOOGLE_API_KEY",
        "ANTHROPIC_API_KEY",
        "DEEPSEEK_API_KEY",
    ];

    fn find<'a>(results: &'a [CheckResult], name: &str) -> &'a CheckResult {
        results.iter().find(|r| r.name == name).unwrap()
    }

    #[test]
    fn default_snapshot_passes_with_every_key() {
        let results = check_snapshot(&CatalogSnapshot::default(), &StaticCredentials::new(ALL_KEYS));
        assert!(results.iter().all(|r| r.status == CheckStatus::Pass), "{results:?}");
    }

    #[test]
    fn missing_model_keys_are_warnings() {
        let results = check_snapshot(
            &CatalogSnapshot::default(),
            &StaticCredentials::new(["GOOGLE_API_KEY"]),
        );
        let creds = find(&results, "Credentials");
        assert_eq!(creds.status, CheckStatus::Warn);
        assert!(creds.message.contains("gpt-4"));
        assert!(!creds.message.contains("gemini-flash"));
    }

    #[test]
    fn missing_required_key_fails() {
        let mut config = AllocationConfig::default();
        config.credentials.required_env_keys = vec!["OPENAI_API_KEY".into()];
        let snapshot = CatalogSnapshot::build(config).unwrap();
        let results = check_snapshot(&snapshot, &StaticCredentials::new(["GOOGLE_API_KEY"]));
        let creds = find(&results, "Credentials");
        assert_eq!(creds.status, CheckStatus::Fail);
        assert_eq!(creds.message, "missing required: OPENAI_API_KEY");
    }

    #[test]
    fn disabled_fallback_and_preferences_warn() {
        let mut config = AllocationConfig::default();
        for entry in &mut config.model_pool {
            if entry.name == "gemini-flash" {
                entry.enabled = false;
            }
        }
        let snapshot = CatalogSnapshot::build(config).unwrap();
        let results = check_snapshot(&snapshot, &StaticCredentials::new(ALL_KEYS));
        assert_eq!(find(&results, "Fallback model").status, CheckStatus::Warn);
        assert_eq!(find(&results, "Model pool").message, "5 of 6 enabled");
    }

    #[test]
    fn config_file_states() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("crewplan.json");
        let (result, errors) = check_config(&path);
        assert_eq!(result.status, CheckStatus::Warn);
        assert!(errors.is_empty());

        std::fs::write(&path, r#"{"fallback_settings": {"fallback_modle": "x"}}"#).unwrap();
        let (result, errors) = check_config(&path);
        assert_eq!(result.status, CheckStatus::Fail);
        assert!(!errors.is_empty());

        std::fs::write(&path, "{}").unwrap();
        let (result, _) = check_config(&path);
        assert_eq!(result.status, CheckStatus::Pass);
        assert_eq!(result.message, "valid (6 models)");
    }

    #[test]
    fn plain_lines_use_text_tags() {
        let line = format_line(
            &CheckResult::new("Credentials", CheckStatus::Warn, "no credential for: gpt-4"),
            false,
        );
        assert_eq!(line, "    [WARN] Credentials          no credential for: gpt-4");
    }
}
