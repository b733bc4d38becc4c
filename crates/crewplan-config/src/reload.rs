// SPDX-FileCopyrightText: 2026 Crewplan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Hot-reloadable configuration handle.
//!
//! Readers take one [`CatalogSnapshot`] per operation via
//! [`ConfigHandle::snapshot`]; a reload builds a new snapshot and swaps it in
//! atomically, so in-flight readers keep the snapshot they started with.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use arc_swap::ArcSwap;
use crewplan_core::CrewplanError;
use tracing::{info, warn};

use crate::catalog::CatalogSnapshot;
use crate::diagnostic::ConfigError;
use crate::loader;
use crate::model::AllocationConfig;

/// Shared, swappable configuration state.
pub struct ConfigHandle {
    path: Option<PathBuf>,
    current: ArcSwap<CatalogSnapshot>,
}

impl ConfigHandle {
    /// Opens the configuration file at `path`.
    ///
    /// A missing file is created with the built-in default. A malformed or
    /// invalid file is logged and the built-in default is used instead.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        if !path.exists() {
            match loader::write_config(&path, &AllocationConfig::default()) {
                Ok(()) => info!(path = %path.display(), "wrote default configuration"),
                Err(e) => warn!(path = %path.display(), error = %e, "failed to write default configuration"),
            }
        }
        let snapshot = load_snapshot(&path);
        Self {
            path: Some(path),
            current: ArcSwap::from_pointee(snapshot),
        }
    }

    /// Wraps an in-memory configuration with no backing file.
    pub fn from_config(config: AllocationConfig) -> Result<Self, Vec<ConfigError>> {
        let snapshot = CatalogSnapshot::build(config)?;
        Ok(Self {
            path: None,
            current: ArcSwap::from_pointee(snapshot),
        })
    }

    /// The backing file, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// The current snapshot. Hold on to it for the duration of one operation.
    pub fn snapshot(&self) -> Arc<CatalogSnapshot> {
        self.current.load_full()
    }

    /// Re-reads the backing file and swaps in the result.
    ///
    /// Falls back to the built-in default when the file is unusable. Without
    /// a backing file the current snapshot is kept.
    pub fn reload(&self) -> Arc<CatalogSnapshot> {
        let Some(path) = &self.path else {
            return self.snapshot();
        };
        let snapshot = Arc::new(load_snapshot(path));
        self.current.store(Arc::clone(&snapshot));
        info!(
            path = %path.display(),
            models = snapshot.models().len(),
            "configuration reloaded"
        );
        snapshot
    }

    /// Deep-merges `patch` into the configuration, saves it, and reloads.
    ///
    /// Objects merge key by key; any other value (arrays included) replaces
    /// the old one. A patch that would produce an invalid configuration is
    /// rejected and nothing is written.
    pub fn update(&self, patch: &serde_json::Value) -> Result<Arc<CatalogSnapshot>, CrewplanError> {
        let mut base = self.base_document()?;
        deep_merge(&mut base, patch);

        let rendered = serde_json::to_string_pretty(&base)
            .map_err(|e| CrewplanError::Internal(e.to_string()))?;
        let config = crate::load_and_validate_str(&rendered).map_err(|errors| {
            CrewplanError::Config(
                errors
                    .iter()
                    .map(|e| e.to_string())
                    .collect::<Vec<_>>()
                    .join("; "),
            )
        })?;

        match &self.path {
            Some(path) => {
                loader::write_raw(path, &rendered).map_err(|e| {
                    CrewplanError::Config(format!("failed to write {}: {e}", path.display()))
                })?;
                Ok(self.reload())
            }
            None => {
                let snapshot = CatalogSnapshot::build(config).map_err(|errors| {
                    CrewplanError::Config(format!("{} validation errors", errors.len()))
                })?;
                let snapshot = Arc::new(snapshot);
                self.current.store(Arc::clone(&snapshot));
                Ok(snapshot)
            }
        }
    }

    /// The document a patch is applied to: the file as written when it
    /// parses, otherwise the effective configuration.
    fn base_document(&self) -> Result<serde_json::Value, CrewplanError> {
        let from_file = self
            .path
            .as_ref()
            .and_then(|p| std::fs::read_to_string(p).ok())
            .and_then(|raw| serde_json::from_str::<serde_json::Value>(&raw).ok())
            .filter(|v| v.is_object());
        match from_file {
            Some(doc) => Ok(doc),
            None => serde_json::to_value(self.snapshot().config())
                .map_err(|e| CrewplanError::Internal(e.to_string())),
        }
    }
}

/// Loads and validates `path`, logging every problem and falling back to
/// the built-in default.
fn load_snapshot(path: &Path) -> CatalogSnapshot {
    let errors = match crate::load_and_validate_path(path) {
        Ok(config) => match CatalogSnapshot::build(config) {
            Ok(snapshot) => return snapshot,
            Err(errors) => errors,
        },
        Err(errors) => errors,
    };
    for error in &errors {
        warn!(path = %path.display(), error = %error, "invalid configuration");
    }
    warn!(
        path = %path.display(),
        error_count = errors.len(),
        "falling back to built-in default configuration"
    );
    CatalogSnapshot::default()
}

/// Recursively merges `patch` into `base`.
pub fn deep_merge(base: &mut serde_json::Value, patch: &serde_json::Value) {
    match (base, patch) {
        (serde_json::Value::Object(base), serde_json::Value::Object(patch)) => {
            for (key, value) in patch {
                let nested = value.is_object() && base.get(key).is_some_and(|v| v.is_object());
                match base.get_mut(key) {
                    Some(existing) if nested => deep_merge(existing, value),
                    _ => {
                        base.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (base, patch) => *base = patch.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deep_merge_merges_objects_and_replaces_leaves() {
        let mut base = json!({"a": {"b": 1, "c": 2}, "d": [1, 2]});
        deep_merge(&mut base, &json!({"a": {"c": 3}, "d": [9]}));
        assert_eq!(base, json!({"a": {"b": 1, "c": 3}, "d": [9]}));
    }

    #[test]
    fn open_writes_default_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("crewplan.json");
        let handle = ConfigHandle::open(&path);
        assert!(path.exists());
        assert_eq!(handle.snapshot().fallback().name, "gemini-flash");
    }

    #[test]
    fn snapshot_survives_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("crewplan.json");
        let handle = ConfigHandle::open(&path);
        let before = handle.snapshot();
        handle
            .update(&json!({"fallback_settings": {"max_retries": 9}}))
            .unwrap();
        assert_eq!(before.config().fallback_settings.max_retries, 3);
        assert_eq!(handle.snapshot().config().fallback_settings.max_retries, 9);
    }

    #[test]
    fn invalid_update_is_rejected_and_not_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("crewplan.json");
        let handle = ConfigHandle::open(&path);
        let before = std::fs::read_to_string(&path).unwrap();
        let err = handle
            .update(&json!({"fallback_settings": {"fallback_model": "missing"}}))
            .unwrap_err();
        assert!(matches!(err, CrewplanError::Config(_)));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
    }

    #[test]
    #[tracing_test::traced_test]
    fn invalid_file_logs_fallback_warning() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("crewplan.json");
        std::fs::write(&path, r#"{"fallback_settings": {"fallback_model": "nope"}}"#).unwrap();
        let handle = ConfigHandle::open(&path);
        assert_eq!(handle.snapshot().fallback().name, "gemini-flash");
        assert!(logs_contain("falling back to built-in default configuration"));
    }

    #[test]
    fn in_memory_handle_updates_without_file() {
        let handle = ConfigHandle::from_config(AllocationConfig::default()).unwrap();
        assert!(handle.path().is_none());
        let snap = handle
            .update(&json!({"budget_constraints": {"default_budget": "low"}}))
            .unwrap();
        assert_eq!(
            snap.config().budget_constraints.default_budget,
            crewplan_core::BudgetTier::Low
        );
        assert!(Arc::ptr_eq(&snap, &handle.reload()));
    }
}
