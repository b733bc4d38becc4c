// SPDX-FileCopyrightText: 2026 Crewplan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Stage 2 of the crewplan pipeline: picks a team of agent archetypes for a
//! [`RequirementProfile`](crewplan_core::RequirementProfile).

pub mod catalog;
pub mod evaluation;
pub mod matcher;

pub use catalog::AgentCatalog;
pub use evaluation::TeamEvaluation;
pub use matcher::AgentMatcher;
