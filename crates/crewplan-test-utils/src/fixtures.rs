// SPDX-FileCopyrightText: 2026 Crewplan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Hand-built inputs for stage-level tests.

use std::collections::BTreeSet;

use crewplan_core::{
    AgentArchetype, AnalysisDetails, BudgetTier, Complexity, DomainTag, PlanRequest,
    RequirementProfile, RoleCategory, Strategy, team_size_for,
};

/// Small web request that classifies as simple.
pub const SIMPLE_WEB: &str = "간단한 할일 목록 웹앱 만들어줘";

/// Data request heavy enough to land on the complex tier.
pub const COMPLEX_DATA: &str = "데이터 분석 머신러닝 대용량 실시간 데이터 분석 시스템 구축, \
                                여러 데이터 소스를 통합하고 다양한 분석 모델을 만들어줘";

/// A profile with no secondary domains and the given keywords.
pub fn profile(domain: DomainTag, complexity: Complexity, keywords: &[&str]) -> RequirementProfile {
    RequirementProfile {
        primary_domain: domain,
        secondary_domains: Vec::new(),
        complexity,
        tech_stack: BTreeSet::new(),
        required_libraries: BTreeSet::new(),
        team_size: team_size_for(complexity, 0),
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
        confidence: 0.8,
        details: AnalysisDetails::default(),
    }
}

/// A development archetype for `domains` fitting every complexity tier.
pub fn archetype(id: &str, domains: &[DomainTag]) -> AgentArchetype {
    AgentArchetype {
        id: id.to_string(),
        role_title: format!("{id} specialist"),
        goal: format!("deliver {id} work"),
        backstory: String::new(),
        category: RoleCategory::Development,
        domains: domains.iter().copied().collect(),
        capabilities: vec![id.to_string()],
        complexity_fit: Complexity::ALL.into_iter().collect(),
        priority: 3,
        synergy_ids: Vec::new(),
    }
}

pub fn request(text: &str, budget: BudgetTier, strategy: Strategy) -> PlanRequest {
    PlanRequest {
        text: text.to_string(),
        budget: Some(budget),
        strategy: Some(strategy),
    }
}
