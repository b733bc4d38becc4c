// SPDX-FileCopyrightText: 2026 Crewplan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! crewplan - plan a team of specialist agents and their models.
//!
//! This is the binary entry point.

mod check;
mod models;
mod plan;
mod shell;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use crewplan_config::ConfigHandle;
use crewplan_core::{BudgetTier, Strategy};

/// crewplan - plan a team of specialist agents and their models.
#[derive(Parser, Debug)]
#[command(name = "crewplan", version, about, long_about = None)]
struct Cli {
    /// Allocation configuration file. Defaults to ./crewplan.json, then the
    /// user config directory.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level for crewplan crates when RUST_LOG is unset.
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Plan a team for one project request.
    Plan(PlanArgs),
    /// Launch an interactive planning session.
    Shell,
    /// List the model pool, or show one model.
    Models {
        /// Short model name, e.g. gemini-flash.
        name: Option<String>,
        /// Disable colored output.
        #[arg(long)]
        plain: bool,
    },
    /// Validate the configuration and report credential gaps.
    Check {
        /// Disable colored output.
        #[arg(long)]
        plain: bool,
    },
}

#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Free-text project request.
    #[arg(required_unless_present = "request")]
    pub text: Option<String>,
    /// Read a JSON request ({"text", "budget", "strategy"}) from a file.
    #[arg(long, conflicts_with = "text")]
    pub request: Option<PathBuf>,
    /// Budget tier: low, medium, high or unlimited.
    #[arg(long)]
    pub budget: Option<BudgetTier>,
    /// Allocation strategy: cost_optimized, performance_optimized, balanced
    /// or single_model.
    #[arg(long)]
    pub strategy: Option<Strategy>,
    /// Print the plan as JSON.
    #[arg(long)]
    pub json: bool,
    /// Disable colored output.
    #[arg(long, conflicts_with = "json")]
    pub plain: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let path = cli
        .config
        .unwrap_or_else(crewplan_config::default_config_path);

    let result = match cli.command {
        Commands::Plan(args) => plan::run_plan(open(path), &args),
        Commands::Shell => shell::run_shell(open(path)).await,
        Commands::Models { name, plain } => models::run_models(open(path), name.as_deref(), plain),
        Commands::Check { plain } => check::run_check(&path, plain),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn open(path: PathBuf) -> Arc<ConfigHandle> {
    Arc::new(ConfigHandle::open(path))
}

/// Initialize the tracing subscriber. Logs go to stderr so JSON output on
/// stdout stays clean.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("crewplan={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_arguments_parse() {
        let cli = Cli::try_parse_from([
            "crewplan",
            "plan",
            "간단한 웹앱",
            "--budget",
            "low",
            "--strategy",
            "cost_optimized",
            "--json",
        ])
        .unwrap();
        let Commands::Plan(args) = cli.command else {
            panic!("expected plan");
        };
        assert_eq!(args.text.as_deref(), Some("간단한 웹앱"));
        assert_eq!(args.budget, Some(BudgetTier::Low));
        assert_eq!(args.strategy, Some(Strategy::CostOptimized));
        assert!(args.json);
    }

    #[test]
    fn plan_requires_text_or_request_file() {
        assert!(Cli::try_parse_from(["crewplan", "plan"]).is_err());
        assert!(Cli::try_parse_from(["crewplan", "plan", "--request", "req.json"]).is_ok());
        assert!(
            Cli::try_parse_from(["crewplan", "plan", "x", "--request", "req.json"]).is_err()
        );
    }

    #[test]
    fn unknown_strategy_is_rejected() {
        assert!(Cli::try_parse_from(["crewplan", "plan", "x", "--strategy", "fastest"]).is_err());
    }

    #[test]
    fn global_options_apply_after_subcommand() {
        let cli =
            Cli::try_parse_from(["crewplan", "check", "--config", "alt.json", "--log-level", "debug"])
                .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("alt.json")));
        assert_eq!(cli.log_level, "debug");
        assert!(matches!(cli.command, Commands::Check { plain: false }));
    }
}
