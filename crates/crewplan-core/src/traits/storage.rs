// SPDX-FileCopyrightText: 2026 Crewplan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plan persistence trait.

use async_trait::async_trait;

use crate::error::CrewplanError;
use crate::types::{Plan, ProjectId};

/// Persistence backend for finished plans, keyed by project id.
///
/// A plan is immutable once stored; saving under an existing id replaces
/// the previous plan wholesale.
#[async_trait]
pub trait PlanStore: Send + Sync {
    /// Stores `plan` under `project`.
    async fn save(&self, project: &ProjectId, plan: &Plan) -> Result<(), CrewplanError>;

    /// Returns the plan stored under `project`, if any.
    async fn get(&self, project: &ProjectId) -> Result<Option<Plan>, CrewplanError>;
}
