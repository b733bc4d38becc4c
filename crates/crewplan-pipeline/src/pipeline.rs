// SPDX-FileCopyrightText: 2026 Crewplan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Three-stage planning: text > profile > team > allocation.
//!
//! Data flows one way. No stage calls back into an earlier one, and each
//! stage is a pure function of its input and the configuration snapshot.

use std::sync::Arc;

use crewplan_allocator::ModelAllocator;
use crewplan_analyzer::RequirementAnalyzer;
use crewplan_config::ConfigHandle;
use crewplan_core::{BudgetTier, CrewplanError, Plan, PlanRequest, PlanStore, ProjectId, Strategy};
use crewplan_matcher::AgentMatcher;
use tracing::info;

/// Runs the analyzer, matcher and allocator in sequence.
pub struct Pipeline {
    analyzer: RequirementAnalyzer,
    matcher: AgentMatcher,
    allocator: ModelAllocator,
}

impl Pipeline {
    pub fn new(analyzer: RequirementAnalyzer, matcher: AgentMatcher, allocator: ModelAllocator) -> Self {
        Self {
            analyzer,
            matcher,
            allocator,
        }
    }

    /// A pipeline over the built-in catalog, checking credentials against
    /// the process environment.
    pub fn with_config(config: Arc<ConfigHandle>) -> Self {
        Self::new(
            RequirementAnalyzer::new(),
            AgentMatcher::default(),
            ModelAllocator::with_env(config),
        )
    }

    pub fn config(&self) -> &Arc<ConfigHandle> {
        self.allocator.config()
    }

    pub fn analyzer(&self) -> &RequirementAnalyzer {
        &self.analyzer
    }

    pub fn matcher(&self) -> &AgentMatcher {
        &self.matcher
    }

    pub fn allocator(&self) -> &ModelAllocator {
        &self.allocator
    }

    /// Budget tier and strategy for `request`, filling gaps from configuration.
    pub fn resolve_defaults(&self, request: &PlanRequest) -> (BudgetTier, Strategy) {
        let snapshot = self.config().snapshot();
        let config = snapshot.config();
        (
            request
                .budget
                .unwrap_or(config.budget_constraints.default_budget),
            request
                .strategy
                .unwrap_or(config.allocation_strategies.default),
        )
    }

    /// Plans `request`. Never fails.
    pub fn run(&self, request: &PlanRequest) -> Plan {
        let (budget, strategy) = self.resolve_defaults(request);

        let profile = self.analyzer.analyze(&request.text);
        let team = self.matcher.select(&profile);
        let allocation = self.allocator.allocate(&team, &profile, budget, strategy);

        info!(
            domain = %profile.primary_domain,
            complexity = %profile.complexity,
            team_size = team.members.len(),
            strategy = %strategy,
            cost = allocation.estimated_cost,
            "plan complete"
        );

        Plan {
            profile,
            team,
            allocation,
        }
    }

    /// Parses a JSON [`PlanRequest`] and plans it.
    ///
    /// Returns [`CrewplanError::InvalidInput`] for a structurally invalid
    /// request; nothing is analyzed in that case.
    pub fn run_json(&self, raw: &str) -> Result<Plan, CrewplanError> {
        let request = PlanRequest::from_json(raw)?;
        Ok(self.run(&request))
    }

    /// Plans `request` and saves the result under `project`.
    pub async fn run_and_store(
        &self,
        project: &ProjectId,
        request: &PlanRequest,
        store: &dyn PlanStore,
    ) -> Result<Plan, CrewplanError> {
        let plan = self.run(request);
        store.save(project, &plan).await?;
        info!(project = %project, "plan stored");
        Ok(plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crewplan_allocator::StaticCredentials;
    use crewplan_config::AllocationConfig;

    fn pipeline(config: AllocationConfig) -> Pipeline {
        let handle = Arc::new(ConfigHandle::from_config(config).unwrap());
        Pipeline::new(
            RequirementAnalyzer::new(),
            AgentMatcher::default(),
            ModelAllocator::new(handle, Box::new(StaticCredentials::default())),
        )
    }

    #[test]
    fn request_overrides_configured_defaults() {
        let mut config = AllocationConfig::default();
        config.budget_constraints.default_budget = BudgetTier::High;
        config.allocation_strategies.default = Strategy::SingleModel;
        let p = pipeline(config);

        let (budget, strategy) = p.resolve_defaults(&PlanRequest::new("x"));
        assert_eq!((budget, strategy), (BudgetTier::High, Strategy::SingleModel));

        let request = PlanRequest {
            text: "x".into(),
            budget: Some(BudgetTier::Low),
            strategy: Some(Strategy::CostOptimized),
        };
        assert_eq!(
            p.resolve_defaults(&request),
            (BudgetTier::Low, Strategy::CostOptimized)
        );
    }

    #[test]
    fn plan_uses_resolved_strategy() {
        let plan = pipeline(AllocationConfig::default()).run(&PlanRequest {
            text: "간단한 블로그 글 작성".into(),
            budget: None,
            strategy: Some(Strategy::SingleModel),
        });
        assert_eq!(plan.allocation.strategy_used, Strategy::SingleModel);
        assert_eq!(plan.allocation.budget_tier, BudgetTier::Medium);
        assert_eq!(plan.allocation.member_to_model.len(), plan.team.members.len());
    }

    #[test]
    fn invalid_json_request_is_rejected() {
        let p = pipeline(AllocationConfig::default());
        let err = p.run_json(r#"{"text": 42}"#).unwrap_err();
        assert!(matches!(err, CrewplanError::InvalidInput(_)));
        let err = p.run_json(r#"{"text": "웹앱", "colour": "red"}"#).unwrap_err();
        assert!(matches!(err, CrewplanError::InvalidInput(_)));
        assert!(p.run_json(r#"{"text": "웹앱", "budget": "low"}"#).is_ok());
    }

    #[test]
    #[tracing_test::traced_test]
    fn completion_is_logged() {
        pipeline(AllocationConfig::default()).run(&PlanRequest::new("간단한 웹앱"));
        assert!(logs_contain("plan complete"));
    }
}
