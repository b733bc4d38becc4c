// SPDX-FileCopyrightText: 2026 Crewplan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! [`CredentialSource`] implementations. Values are never read, only presence.

use std::collections::BTreeSet;

use crewplan_core::CredentialSource;

/// Reports a key as present when the environment variable is set and non-empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvCredentials;

impl CredentialSource for EnvCredentials {
    fn is_present(&self, key: &str) -> bool {
        std::env::var_os(key).is_some_and(|v| !v.is_empty())
    }
}

/// A fixed set of present keys.
#[derive(Debug, Clone, Default)]
pub struct StaticCredentials {
    present: BTreeSet<String>,
}

impl StaticCredentials {
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            present: keys.into_iter().map(Into::into).collect(),
        }
    }
}

impl CredentialSource for StaticCredentials {
    fn is_present(&self, key: &str) -> bool {
        self.present.contains(key)
    }
}
