// SPDX-FileCopyrightText: 2026 Crewplan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory [`PlanStore`].

use std::collections::HashMap;

use async_trait::async_trait;
use crewplan_core::{CrewplanError, Plan, PlanStore, ProjectId};
use tokio::sync::RwLock;

/// Plans held in process memory, lost on drop.
#[derive(Debug, Default)]
pub struct MemoryPlanStore {
    plans: RwLock<HashMap<ProjectId, Plan>>,
}

impl MemoryPlanStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.plans.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.plans.read().await.is_empty()
    }

    /// Stored project ids, sorted.
    pub async fn projects(&self) -> Vec<ProjectId> {
        let mut ids: Vec<ProjectId> = self.plans.read().await.keys().cloned().collect();
        ids.sort();
        ids
    }
}

#[async_trait]
impl PlanStore for MemoryPlanStore {
    async fn save(&self, project: &ProjectId, plan: &Plan) -> Result<(), CrewplanError> {
        self.plans.write().await.insert(project.clone(), plan.clone());
        Ok(())
    }

    async fn get(&self, project: &ProjectId) -> Result<Option<Plan>, CrewplanError> {
        Ok(self.plans.read().await.get(project).cloned())
    }
}
