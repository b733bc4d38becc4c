// SPDX-FileCopyrightText: 2026 Crewplan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plan presentation trait.

use crate::error::CrewplanError;
use crate::types::Plan;

/// Turns a finished plan into text for some audience (terminal, JSON, ...).
pub trait PlanRenderer {
    fn render(&self, plan: &Plan) -> Result<String, CrewplanError>;
}
