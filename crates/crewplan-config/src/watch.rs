// SPDX-FileCopyrightText: 2026 Crewplan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! File watcher that reloads a [`ConfigHandle`] when its file changes.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use notify::RecursiveMode;
use notify_debouncer_mini::{DebounceEventResult, Debouncer, new_debouncer};
use tracing::{debug, warn};

use crate::catalog::CatalogSnapshot;
use crate::reload::ConfigHandle;

/// Quiet period before a burst of file events triggers one reload.
const DEBOUNCE: Duration = Duration::from_millis(300);

/// Keeps the underlying watcher alive; dropping it stops watching.
pub struct ConfigWatcher {
    _debouncer: Debouncer<notify::RecommendedWatcher>,
}

/// Watches the file behind `handle` and reloads it on change.
///
/// The parent directory is watched (editors often replace files rather than
/// write them in place) and events for other files are ignored.
/// `on_reload` runs on the watcher thread after each swap.
pub fn watch<F>(handle: Arc<ConfigHandle>, on_reload: F) -> Result<ConfigWatcher, notify::Error>
where
    F: Fn(Arc<CatalogSnapshot>) + Send + 'static,
{
    let Some(path) = handle.path().map(PathBuf::from) else {
        return Err(notify::Error::generic("configuration has no backing file"));
    };
    let target = path.file_name().map(|n| n.to_os_string());
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let mut debouncer = new_debouncer(DEBOUNCE, move |result: DebounceEventResult| match result {
        Ok(events) => {
            let touched = events
                .iter()
                .any(|e| e.path.file_name().map(|n| n.to_os_string()) == target);
            if touched {
                debug!(path = %path.display(), "configuration file changed");
                on_reload(handle.reload());
            }
        }
        Err(e) => warn!(error = %e, "configuration watcher error"),
    })?;

    debouncer.watcher().watch(&dir, RecursiveMode::NonRecursive)?;

    Ok(ConfigWatcher {
        _debouncer: debouncer,
    })
}
