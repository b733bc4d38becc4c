// SPDX-FileCopyrightText: 2026 Crewplan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collaborator traits at the edges of the pipeline.
//!
//! The pipeline itself is pure. Persistence, presentation, and credential
//! lookup are reached only through these seams.

pub mod credentials;
pub mod renderer;
pub mod storage;

pub use credentials::CredentialSource;
pub use renderer::PlanRenderer;
pub use storage::PlanStore;
