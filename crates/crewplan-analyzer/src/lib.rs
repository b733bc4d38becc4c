// SPDX-FileCopyrightText: 2026 Crewplan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Requirement analysis, the first pipeline stage.
//!
//! [`RequirementAnalyzer`] classifies a free-text request into a domain,
//! complexity tier, tech stack and team size using static term tables.

pub mod analyzer;
pub mod patterns;
pub mod text;

pub use analyzer::RequirementAnalyzer;
