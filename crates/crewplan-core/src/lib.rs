// SPDX-FileCopyrightText: 2026 Crewplan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for crewplan.
//!
//! Holds the domain types that flow through the analyze, match, and
//! allocate stages, the shared error type, and the collaborator traits
//! used at the pipeline edges.

pub mod error;
pub mod traits;
pub mod types;

pub use error::CrewplanError;
pub use types::{
    AgentArchetype, Allocation, AnalysisDetails, BudgetTier, Complexity, CostTier, DomainTag,
    MAX_TEAM_SIZE, MIN_TEAM_SIZE, Plan, PlanRequest, ProjectId, RequirementProfile, RoleCategory,
    SpeedTier, Strategy, TeamSelection, team_size_for,
};

pub use traits::{CredentialSource, PlanRenderer, PlanStore};
