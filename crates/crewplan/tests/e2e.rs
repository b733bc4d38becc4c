// SPDX-FileCopyrightText: 2026 Crewplan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests for the planning pipeline and the `crewplan` binary.
//!
//! Each test uses its own temp configuration file. Tests are independent and
//! order-insensitive.

use std::path::Path;
use std::process::{Command, Output};

use crewplan_core::{BudgetTier, DomainTag, Plan, PlanRenderer, Strategy};
use crewplan_test_utils::{MockRenderer, TestHarness, fixtures};

fn crewplan(config: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_crewplan"))
        .arg("--config")
        .arg(config)
        .args(args)
        .env_remove("RUST_LOG")
        .env_remove("CREWPLAN_FALLBACK_MODEL")
        .env_remove("CREWPLAN_DEFAULT_STRATEGY")
        .env_remove("CREWPLAN_DEFAULT_BUDGET")
        .output()
        .unwrap()
}

// ---- Pipeline through the harness ----

#[test]
fn test_harness_plan_matches_binary_defaults() {
    let harness = TestHarness::new().unwrap();
    let plan = harness.plan(fixtures::SIMPLE_WEB);
    assert_eq!(plan.profile.primary_domain, DomainTag::Web);
    assert_eq!(plan.allocation.budget_tier, BudgetTier::Medium);
    assert_eq!(plan.allocation.strategy_used, Strategy::Balanced);
}

#[test]
fn test_renderer_receives_the_frozen_plan() {
    let harness = TestHarness::new().unwrap();
    let renderer = MockRenderer::new("README");
    let plan = harness.plan_request(&fixtures::request(
        fixtures::COMPLEX_DATA,
        BudgetTier::High,
        Strategy::PerformanceOptimized,
    ));

    assert_eq!(renderer.render(&plan).unwrap(), "README");
    assert_eq!(renderer.rendered(), vec![plan]);
}

#[test]
fn test_edited_config_is_picked_up_on_reload() {
    let harness = TestHarness::new().unwrap();
    let mut doc: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(harness.config_path()).unwrap()).unwrap();
    doc["allocation_strategies"]["default"] = "single_model".into();
    harness.rewrite_config(&doc.to_string()).unwrap();

    let plan = harness.plan(fixtures::SIMPLE_WEB);
    assert_eq!(plan.allocation.strategy_used, Strategy::SingleModel);
}

#[tokio::test]
async fn test_plans_are_stored_per_project() {
    let harness = TestHarness::new().unwrap();
    harness.plan_and_store("a", fixtures::SIMPLE_WEB).await.unwrap();
    harness.plan_and_store("b", fixtures::COMPLEX_DATA).await.unwrap();
    assert_eq!(harness.store.len().await, 2);
}

// ---- Binary ----

#[test]
fn test_binary_plan_json_is_a_plan() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("crewplan.json");
    let out = crewplan(
        &config,
        &["plan", fixtures::SIMPLE_WEB, "--budget", "low", "--strategy", "cost_optimized", "--json"],
    );
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let plan: Plan = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(plan.team.members.len(), 3);
    assert_eq!(plan.allocation.budget_tier, BudgetTier::Low);
    assert_eq!(plan.allocation.strategy_used, Strategy::CostOptimized);
    assert!(config.exists(), "default configuration should be written");
}

#[test]
fn test_binary_plan_reads_request_file() {
    let dir = tempfile::tempdir().unwrap();
    let request = dir.path().join("request.json");
    std::fs::write(&request, r#"{"text": "데이터 분석 리포트", "strategy": "single_model"}"#).unwrap();

    let out = crewplan(
        &dir.path().join("crewplan.json"),
        &["plan", "--request", request.to_str().unwrap(), "--json"],
    );
    assert!(out.status.success());
    let plan: Plan = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(plan.allocation.strategy_used, Strategy::SingleModel);
}

#[test]
fn test_binary_rejects_invalid_request() {
    let dir = tempfile::tempdir().unwrap();
    let request = dir.path().join("request.json");
    std::fs::write(&request, r#"{"text": 42}"#).unwrap();

    let out = crewplan(
        &dir.path().join("crewplan.json"),
        &["plan", "--request", request.to_str().unwrap()],
    );
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("invalid input"));
}

#[test]
fn test_binary_plain_report() {
    let dir = tempfile::tempdir().unwrap();
    let out = crewplan(
        &dir.path().join("crewplan.json"),
        &["plan", fixtures::SIMPLE_WEB, "--plain"],
    );
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Requirements"));
    assert!(stdout.contains("Allocation"));
}

#[test]
fn test_binary_models_lists_pool() {
    let dir = tempfile::tempdir().unwrap();
    let out = crewplan(&dir.path().join("crewplan.json"), &["models", "--plain"]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert_eq!(stdout.lines().count(), 6);
    assert!(stdout.contains("(fallback)"));

    let out = crewplan(&dir.path().join("crewplan.json"), &["models", "nope-model"]);
    assert!(!out.status.success());
}

#[test]
fn test_binary_check_fails_on_invalid_config() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("crewplan.json");
    std::fs::write(&config, r#"{"fallback_settings": {"fallback_model": "missing"}}"#).unwrap();

    let out = crewplan(&config, &["check", "--plain"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("[FAIL] Configuration"));
}
