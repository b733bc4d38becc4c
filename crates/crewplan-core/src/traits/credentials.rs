// SPDX-FileCopyrightText: 2026 Crewplan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Credential presence lookup.

/// Answers whether a named credential is available.
///
/// Implementations report presence only and never hand out secret values.
pub trait CredentialSource: Send + Sync {
    fn is_present(&self, key: &str) -> bool;
}
