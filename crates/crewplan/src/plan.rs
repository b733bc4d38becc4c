// SPDX-FileCopyrightText: 2026 Crewplan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `crewplan plan` command and the terminal/JSON plan renderers.

use std::fmt::Write as _;
use std::io::IsTerminal;
use std::sync::Arc;

use colored::Colorize;
use crewplan_config::ConfigHandle;
use crewplan_core::{CrewplanError, Plan, PlanRenderer, PlanRequest};
use crewplan_pipeline::Pipeline;

use crate::PlanArgs;

/// Runs the `crewplan plan` command.
pub fn run_plan(config: Arc<ConfigHandle>, args: &PlanArgs) -> Result<(), CrewplanError> {
    let request = build_request(args)?;
    let plan = Pipeline::with_config(config).run(&request);

    let rendered = if args.json {
        JsonRenderer.render(&plan)?
    } else {
        let color = !args.plain && std::io::stdout().is_terminal();
        TextRenderer { color }.render(&plan)?
    };
    println!("{rendered}");
    Ok(())
}

/// The request from `--request` or the positional text, with CLI overrides.
fn build_request(args: &PlanArgs) -> Result<PlanRequest, CrewplanError> {
    let mut request = match (&args.request, &args.text) {
        (Some(path), _) => {
            let raw = std::fs::read_to_string(path).map_err(|e| {
                CrewplanError::InvalidInput(format!("cannot read {}: {e}", path.display()))
            })?;
            PlanRequest::from_json(&raw)?
        }
        (None, Some(text)) => PlanRequest::new(text.as_str()),
        (None, None) => {
            return Err(CrewplanError::InvalidInput(
                "a request text or --request file is required".to_string(),
            ));
        }
    };
    if args.budget.is_some() {
        request.budget = args.budget;
    }
    if args.strategy.is_some() {
        request.strategy = args.strategy;
    }
    Ok(request)
}

/// Renders a plan as pretty JSON.
pub struct JsonRenderer;

impl PlanRenderer for JsonRenderer {
    fn render(&self, plan: &Plan) -> Result<String, CrewplanError> {
        serde_json::to_string_pretty(plan).map_err(|e| CrewplanError::Render {
            message: e.to_string(),
        })
    }
}

/// Renders a plan as an indented terminal report.
pub struct TextRenderer {
    pub color: bool,
}

impl TextRenderer {
    fn heading(&self, text: &str) -> String {
        if self.color {
            text.bold().green().to_string()
        } else {
            text.to_string()
        }
    }

    fn dim(&self, text: &str) -> String {
        if self.color {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }

    fn alert(&self, text: &str) -> String {
        if self.color {
            text.yellow().to_string()
        } else {
            text.to_string()
        }
    }
}

fn join_or_none<'a>(items: impl IntoIterator<Item = &'a String>) -> String {
    let joined = items
        .into_iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    if joined.is_empty() {
        "none".to_string()
    } else {
        joined
    }
}

impl PlanRenderer for TextRenderer {
    fn render(&self, plan: &Plan) -> Result<String, CrewplanError> {
        let Plan {
            profile,
            team,
            allocation,
        } = plan;
        let secondary: Vec<String> = profile
            .secondary_domains
            .iter()
            .map(ToString::to_string)
            .collect();

        // Writing to a String cannot fail.
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.heading("Requirements"));
        let _ = writeln!(
            out,
            "  {:<14}{} (secondary: {})",
            "domain",
            profile.primary_domain,
            join_or_none(&secondary)
        );
        let _ = writeln!(out, "  {:<14}{}", "complexity", profile.complexity);
        let _ = writeln!(out, "  {:<14}{}", "team size", profile.team_size);
        let _ = writeln!(out, "  {:<14}{}", "keywords", join_or_none(&profile.keywords));
        let _ = writeln!(out, "  {:<14}{}", "tech stack", join_or_none(&profile.tech_stack));
        let _ = writeln!(out, "  {:<14}{:.2}", "confidence", profile.confidence);

        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "{} {}",
            self.heading("Team"),
            self.dim(&format!(
                "(confidence {:.2}, performance {:.2})",
                team.confidence, team.performance_estimate
            ))
        );
        for member in &team.members {
            let model = allocation
                .member_to_model_name
                .get(&member.id)
                .map_or("-", String::as_str);
            let backup = allocation
                .member_to_backup
                .get(&member.id)
                .map(|b| self.dim(&format!(" (backup {b})")))
                .unwrap_or_default();
            let _ = writeln!(
                out,
                "  {:<24}{:<28}{model}{backup}",
                member.id, member.role_title
            );
        }
        if team.fallback {
            let _ = writeln!(out, "  {}", self.alert("default team used, no candidate fit"));
        }
        let _ = writeln!(out, "  {}", self.dim(&team.rationale));

        let _ = writeln!(out);
        let _ = writeln!(out, "{}", self.heading("Allocation"));
        let _ = writeln!(out, "  {:<14}{}", "strategy", allocation.strategy_used);
        let _ = writeln!(
            out,
            "  {:<14}{} ({:.1} of {:.1})",
            "budget", allocation.budget_tier, allocation.estimated_cost, allocation.budget_ceiling
        );
        let _ = writeln!(out, "  {:<14}{:.2}", "confidence", allocation.confidence);
        let _ = writeln!(out, "  {}", self.dim(&allocation.rationale));
        if !allocation.missing_credentials.is_empty() {
            let _ = writeln!(
                out,
                "  {}",
                self.alert(&format!(
                    "missing credentials: {}",
                    join_or_none(&allocation.missing_credentials)
                ))
            );
        }

        Ok(out.trim_end().to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crewplan_core::{BudgetTier, Strategy};
    use crewplan_test_utils::TestHarness;

    fn args(text: Option<&str>) -> PlanArgs {
        PlanArgs {
            text: text.map(String::from),
            request: None,
            budget: None,
            strategy: None,
            json: false,
            plain: true,
        }
    }

    #[test]
    fn cli_flags_override_request_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("req.json");
        std::fs::write(&path, r#"{"text": "웹앱", "budget": "high", "strategy": "balanced"}"#)
            .unwrap();

        let mut a = args(None);
        a.request = Some(path);
        a.strategy = Some(Strategy::SingleModel);
        let request = build_request(&a).unwrap();
        assert_eq!(request.text, "웹앱");
        assert_eq!(request.budget, Some(BudgetTier::High));
        assert_eq!(request.strategy, Some(Strategy::SingleModel));
    }

    #[test]
    fn malformed_request_file_is_invalid_input() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("req.json");
        std::fs::write(&path, r#"{"text": ["not", "a", "string"]}"#).unwrap();
        let mut a = args(None);
        a.request = Some(path);
        assert!(matches!(build_request(&a), Err(CrewplanError::InvalidInput(_))));

        a.request = Some(PathBuf::from("/nonexistent/req.json"));
        assert!(matches!(build_request(&a), Err(CrewplanError::InvalidInput(_))));
    }

    #[test]
    fn plain_text_report_lists_every_member() {
        let harness = TestHarness::new().unwrap();
        let plan = harness.plan("간단한 할일 목록 웹앱 만들어줘");
        let text = TextRenderer { color: false }.render(&plan).unwrap();

        assert!(text.starts_with("Requirements"));
        assert!(text.contains("web (secondary: none)"));
        for member in &plan.team.members {
            assert!(text.contains(&member.id));
            assert!(text.contains(&plan.allocation.member_to_model_name[&member.id]));
        }
        assert!(text.contains("missing credentials:"));
        assert!(!text.contains('\u{1b}'));
    }

    #[test]
    fn json_report_parses_back_into_the_plan() {
        let harness = TestHarness::new().unwrap();
        let plan = harness.plan("데이터 분석 리포트 자동화");
        let json = JsonRenderer.render(&plan).unwrap();
        let back: Plan = serde_json::from_str(&json).unwrap();
        assert_eq!(back, plan);
    }
}
