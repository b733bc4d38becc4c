// SPDX-FileCopyrightText: 2026 Crewplan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Model allocation configuration for crewplan.
//!
//! Provides JSON configuration parsing with strict validation
//! (`deny_unknown_fields`), `CREWPLAN_*` environment overrides, Elm-style
//! diagnostic rendering with typo suggestions, and a hot-reloadable handle
//! that hands out immutable catalog snapshots.
//!
//! # Usage
//!
//! ```no_run
//! use crewplan_config::ConfigHandle;
//!
//! let handle = ConfigHandle::open("crewplan.json");
//! let snapshot = handle.snapshot();
//! println!("fallback model: {}", snapshot.fallback().name);
//! ```

pub mod catalog;
pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod reload;
pub mod validation;
pub mod watch;

use std::path::Path;

pub use catalog::{CatalogSnapshot, ModelCatalogEntry};
pub use diagnostic::{ConfigError, render_errors};
pub use loader::{default_config_path, load_config_from_path, load_config_from_str};
pub use model::AllocationConfig;
pub use reload::ConfigHandle;
pub use watch::{ConfigWatcher, watch};

/// Load configuration from a JSON file (plus env overrides) and validate it.
///
/// On a Figment error the file content is attached to the diagnostics so
/// unknown keys can be pointed at.
pub fn load_and_validate_path(path: &Path) -> Result<AllocationConfig, Vec<ConfigError>> {
    match loader::load_config_from_path(path) {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => {
            let sources = std::fs::read_to_string(path)
                .map(|content| vec![(path.display().to_string(), content)])
                .unwrap_or_default();
            Err(diagnostic::figment_to_config_errors(err, &sources))
        }
    }
}

/// Load configuration from a JSON string and validate it.
pub fn load_and_validate_str(json: &str) -> Result<AllocationConfig, Vec<ConfigError>> {
    match loader::load_config_from_str(json) {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => {
            let sources = vec![("<inline>".to_string(), json.to_string())];
            Err(diagnostic::figment_to_config_errors(err, &sources))
        }
    }
}
