// SPDX-FileCopyrightText: 2026 Crewplan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `crewplan shell` command implementation.
//!
//! Launches an interactive REPL with a colored prompt and readline history.
//! Each line is planned and kept in an in-memory store for `/history`. The
//! configuration file is watched and reloaded when it changes on disk.

use std::sync::Arc;

use colored::Colorize;
use crewplan_config::ConfigHandle;
use crewplan_core::{BudgetTier, CrewplanError, PlanRenderer, PlanRequest, PlanStore, ProjectId, Strategy};
use crewplan_pipeline::{MemoryPlanStore, Pipeline};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::warn;

use crate::plan::TextRenderer;

/// A parsed line of shell input.
#[derive(Debug, PartialEq)]
enum ShellCommand {
    Quit,
    Help,
    Reload,
    History,
    /// `/budget` alone shows the current tier.
    Budget(Option<BudgetTier>),
    Strategy(Option<Strategy>),
    Plan(String),
    Empty,
    Unknown(String),
}

fn parse_command(line: &str) -> ShellCommand {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return ShellCommand::Empty;
    }
    if !trimmed.starts_with('/') {
        return ShellCommand::Plan(trimmed.to_string());
    }

    let mut parts = trimmed.split_whitespace();
    let command = parts.next().unwrap_or_default();
    let arg = parts.next();
    match command {
        "/quit" | "/exit" => ShellCommand::Quit,
        "/help" => ShellCommand::Help,
        "/reload" => ShellCommand::Reload,
        "/history" => ShellCommand::History,
        "/budget" => match arg.map(str::parse::<BudgetTier>) {
            None => ShellCommand::Budget(None),
            Some(Ok(tier)) => ShellCommand::Budget(Some(tier)),
            Some(Err(_)) => ShellCommand::Unknown(trimmed.to_string()),
        },
        "/strategy" => match arg.map(str::parse::<Strategy>) {
            None => ShellCommand::Strategy(None),
            Some(Ok(strategy)) => ShellCommand::Strategy(Some(strategy)),
            Some(Err(_)) => ShellCommand::Unknown(trimmed.to_string()),
        },
        _ => ShellCommand::Unknown(trimmed.to_string()),
    }
}

/// Session state carried between lines.
struct Session {
    pipeline: Pipeline,
    store: MemoryPlanStore,
    budget: Option<BudgetTier>,
    strategy: Option<Strategy>,
    history: Vec<(ProjectId, String)>,
}

impl Session {
    fn new(config: Arc<ConfigHandle>) -> Self {
        Self {
            pipeline: Pipeline::with_config(config),
            store: MemoryPlanStore::new(),
            budget: None,
            strategy: None,
            history: Vec::new(),
        }
    }

    fn request(&self, text: &str) -> PlanRequest {
        PlanRequest {
            text: text.to_string(),
            budget: self.budget,
            strategy: self.strategy,
        }
    }

    /// Plans `text`, stores it under the next history id, and returns the
    /// rendered report.
    async fn plan(&mut self, text: &str) -> Result<String, CrewplanError> {
        let project = ProjectId(format!("shell-{}", self.history.len() + 1));
        let plan = self
            .pipeline
            .run_and_store(&project, &self.request(text), &self.store)
            .await?;
        self.history.push((project, text.to_string()));
        TextRenderer { color: true }.render(&plan)
    }

    async fn history_lines(&self) -> Result<Vec<String>, CrewplanError> {
        let mut lines = Vec::with_capacity(self.history.len());
        for (project, text) in &self.history {
            let Some(plan) = self.store.get(project).await? else {
                continue;
            };
            lines.push(format!(
                "{project}  {} / {} / {} agents / {}  {text}",
                plan.profile.primary_domain,
                plan.profile.complexity,
                plan.team.members.len(),
                plan.allocation.strategy_used,
            ));
        }
        Ok(lines)
    }
}

fn print_help() {
    println!("  {}  plan a project request", "<text>".yellow());
    println!("  {}  re-read the configuration file", "/reload".yellow());
    println!("  {}  list plans made this session", "/history".yellow());
    println!("  {}  show or set the budget tier", "/budget [tier]".yellow());
    println!("  {}  show or set the strategy", "/strategy [name]".yellow());
    println!("  {}  exit", "/quit".yellow());
}

/// Runs the `crewplan shell` interactive REPL.
pub async fn run_shell(config: Arc<ConfigHandle>) -> Result<(), CrewplanError> {
    let _watcher = match crewplan_config::watch(Arc::clone(&config), |snapshot| {
        eprintln!(
            "{}",
            format!("configuration reloaded ({} models)", snapshot.models().len()).dimmed()
        );
    }) {
        Ok(w) => Some(w),
        Err(e) => {
            warn!(error = %e, "configuration file will not be watched");
            None
        }
    };

    let mut session = Session::new(Arc::clone(&config));

    let mut rl = DefaultEditor::new().map_err(|e| {
        CrewplanError::Internal(format!("failed to initialize readline: {e}"))
    })?;

    println!("{}", "crewplan shell".bold().green());
    println!("Describe a project, or type {} for commands.\n", "/help".yellow());

    let prompt = format!("{}> ", "crewplan".green());
    loop {
        let line = match rl.readline(&prompt) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("{}: {e}", "error".red());
                break;
            }
        };

        let command = parse_command(&line);
        if command != ShellCommand::Empty {
            let _ = rl.add_history_entry(line.trim());
        }

        match command {
            ShellCommand::Quit => break,
            ShellCommand::Empty => {}
            ShellCommand::Help => print_help(),
            ShellCommand::Reload => {
                let snapshot = config.reload();
                println!(
                    "{}",
                    format!("configuration reloaded ({} models)", snapshot.models().len()).dimmed()
                );
            }
            ShellCommand::History => match session.history_lines().await {
                Ok(lines) if lines.is_empty() => println!("{}", "no plans yet".dimmed()),
                Ok(lines) => lines.iter().for_each(|l| println!("{l}")),
                Err(e) => eprintln!("{}: {e}", "error".red()),
            },
            ShellCommand::Budget(Some(tier)) => {
                session.budget = Some(tier);
                println!("budget set to {}", tier.to_string().yellow());
            }
            ShellCommand::Budget(None) => {
                let (budget, _) = session.pipeline.resolve_defaults(&session.request(""));
                println!("budget: {}", budget.to_string().yellow());
            }
            ShellCommand::Strategy(Some(strategy)) => {
                session.strategy = Some(strategy);
                println!("strategy set to {}", strategy.to_string().yellow());
            }
            ShellCommand::Strategy(None) => {
                let (_, strategy) = session.pipeline.resolve_defaults(&session.request(""));
                println!("strategy: {}", strategy.to_string().yellow());
            }
            ShellCommand::Plan(text) => match session.plan(&text).await {
                Ok(report) => println!("{report}\n"),
                Err(e) => eprintln!("{}: {e}", "error".red()),
            },
            ShellCommand::Unknown(input) => {
                eprintln!("{}: {input} (try /help)", "unknown command".yellow());
            }
        }
    }

    println!("{}", "goodbye".dimmed());
    Ok(())
}
