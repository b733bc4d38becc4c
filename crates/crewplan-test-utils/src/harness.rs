// SPDX-FileCopyrightText: 2026 Crewplan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end planning tests.
//!
//! `TestHarness` owns a temp directory holding a real configuration file,
//! a [`ConfigHandle`] opened on it, a [`Pipeline`] with fixed credentials,
//! and an in-memory plan store. Everything is dropped with the harness.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crewplan_allocator::{ModelAllocator, StaticCredentials};
use crewplan_analyzer::RequirementAnalyzer;
use crewplan_config::ConfigHandle;
use crewplan_core::{CrewplanError, Plan, PlanRequest, ProjectId};
use crewplan_matcher::{AgentCatalog, AgentMatcher};
use crewplan_pipeline::{MemoryPlanStore, Pipeline};

const CONFIG_FILE: &str = "crewplan.json";

/// Builder for [`TestHarness`].
#[derive(Default)]
pub struct TestHarnessBuilder {
    patch: Option<serde_json::Value>,
    credentials: Vec<String>,
    catalog: Option<AgentCatalog>,
}

impl TestHarnessBuilder {
    /// Deep-merge `patch` into the default configuration before the first plan.
    pub fn with_config_patch(mut self, patch: serde_json::Value) -> Self {
        self.patch = Some(patch);
        self
    }

    /// Credential keys reported as present.
    pub fn with_credentials<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.credentials = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the built-in archetype catalog.
    pub fn with_catalog(mut self, catalog: AgentCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    pub fn build(self) -> Result<TestHarness, CrewplanError> {
        let temp_dir =
            tempfile::TempDir::new().map_err(|e| CrewplanError::Storage { source: e.into() })?;
        let config_path = temp_dir.path().join(CONFIG_FILE);
        let config = Arc::new(ConfigHandle::open(&config_path));
        if let Some(patch) = &self.patch {
            config.update(patch)?;
        }

        let matcher = AgentMatcher::new(self.catalog.unwrap_or_default());
        let allocator = ModelAllocator::new(
            Arc::clone(&config),
            Box::new(StaticCredentials::new(self.credentials)),
        );
        let pipeline = Pipeline::new(RequirementAnalyzer::new(), matcher, allocator);

        Ok(TestHarness {
            pipeline,
            config,
            store: MemoryPlanStore::new(),
            config_path,
            _temp_dir: temp_dir,
        })
    }
}

/// A pipeline over a temp configuration file.
pub struct TestHarness {
    pub pipeline: Pipeline,
    pub config: Arc<ConfigHandle>,
    pub store: MemoryPlanStore,
    config_path: PathBuf,
    _temp_dir: tempfile::TempDir,
}

impl TestHarness {
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::default()
    }

    /// A harness over the default configuration with no credentials present.
    pub fn new() -> Result<Self, CrewplanError> {
        Self::builder().build()
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Plans `text` with the configured budget and strategy defaults.
    pub fn plan(&self, text: &str) -> Plan {
        self.pipeline.run(&PlanRequest::new(text))
    }

    pub fn plan_request(&self, request: &PlanRequest) -> Plan {
        self.pipeline.run(request)
    }

    /// Plans `text` and keeps the result in the harness store.
    pub async fn plan_and_store(&self, project: &str, text: &str) -> Result<Plan, CrewplanError> {
        self.pipeline
            .run_and_store(&ProjectId(project.to_string()), &PlanRequest::new(text), &self.store)
            .await
    }

    /// Overwrites the configuration file with `raw` and reloads it.
    pub fn rewrite_config(&self, raw: &str) -> Result<(), CrewplanError> {
        std::fs::write(&self.config_path, raw)
            .map_err(|e| CrewplanError::Storage { source: e.into() })?;
        self.config.reload();
        Ok(())
    }
}
