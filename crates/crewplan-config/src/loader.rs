// SPDX-FileCopyrightText: 2026 Crewplan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! The JSON file is merged first, then `CREWPLAN_*` environment overrides.
//! Missing keys fall back to serde defaults on the model structs.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Json},
};

use crate::model::AllocationConfig;

/// File name looked up in the working directory and the user config dir.
pub const CONFIG_FILE_NAME: &str = "crewplan.json";

/// Default configuration path.
///
/// `./crewplan.json` when it exists, else `~/.config/crewplan/crewplan.json`,
/// else `./crewplan.json` when no config dir can be determined.
pub fn default_config_path() -> PathBuf {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return local;
    }
    dirs::config_dir()
        .map(|d| d.join("crewplan").join(CONFIG_FILE_NAME))
        .unwrap_or(local)
}

/// Load configuration from a JSON file with env var overrides.
///
/// A missing file behaves like an empty object.
pub fn load_config_from_path(path: &Path) -> Result<AllocationConfig, figment::Error> {
    build_figment(path).extract()
}

/// Load configuration from a JSON string only (no env overrides).
pub fn load_config_from_str(json: &str) -> Result<AllocationConfig, figment::Error> {
    Figment::new().merge(Json::string(json)).extract()
}

/// Build the Figment used for file loading (exposed for diagnostic use).
pub fn build_figment(path: &Path) -> Figment {
    Figment::new().merge(Json::file(path)).merge(env_provider())
}

/// Write `config` to `path` as pretty JSON, creating parent directories.
pub fn write_config(path: &Path, config: &AllocationConfig) -> std::io::Result<()> {
    let json = serde_json::to_string_pretty(config).map_err(std::io::Error::other)?;
    write_raw(path, &json)
}

/// Write an already-serialized JSON document to `path`.
pub(crate) fn write_raw(path: &Path, json: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, format!("{json}\n"))
}

/// Environment overrides for the three scalar settings worth overriding.
///
/// Uses `Env::map()` so each variable lands on its nested key:
/// `CREWPLAN_FALLBACK_MODEL` -> `fallback_settings.fallback_model`.
fn env_provider() -> Env {
    Env::prefixed("CREWPLAN_")
        .only(&["fallback_model", "default_strategy", "default_budget"])
        .map(|key| match key.as_str() {
            "fallback_model" => "fallback_settings.fallback_model".into(),
            "default_strategy" => "allocation_strategies.default".into(),
            "default_budget" => "budget_constraints.default_budget".into(),
            other => other.to_string().into(),
        })
}
