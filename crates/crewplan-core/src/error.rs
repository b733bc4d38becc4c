// SPDX-FileCopyrightText: 2026 Crewplan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the crewplan pipeline.

use thiserror::Error;

/// The error type shared by every pipeline stage and collaborator trait.
///
/// Only [`CrewplanError::InvalidInput`] is expected to reach a caller of the
/// pipeline. The soft variants (`Config`, `EmptyCandidateSet`,
/// `BudgetExceeded`) are produced inside a stage and recovered there.
#[derive(Debug, Error)]
pub enum CrewplanError {
    /// Configuration errors (unreadable file, malformed JSON, failed validation).
    #[error("configuration error: {0}")]
    Config(String),

    /// Filtering left nothing to choose from.
    #[error("no candidates left for {stage}: {detail}")]
    EmptyCandidateSet { stage: &'static str, detail: String },

    /// An assignment would push the running cost over the budget ceiling.
    #[error("budget ceiling {ceiling:.1} exceeded (projected {projected:.1})")]
    BudgetExceeded { ceiling: f64, projected: f64 },

    /// A request was structurally invalid and rejected before analysis.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Plan persistence errors raised by a [`crate::PlanStore`] implementation.
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Rendering errors raised by a [`crate::PlanRenderer`] implementation.
    #[error("render error: {message}")]
    Render { message: String },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
