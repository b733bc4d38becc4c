// SPDX-FileCopyrightText: 2026 Crewplan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for crewplan integration tests.
//!
//! # Components
//!
//! - [`TestHarness`] - a pipeline over a throwaway configuration file
//! - [`MockRenderer`] - a [`PlanRenderer`](crewplan_core::PlanRenderer) that records what it saw
//! - [`fixtures`] - hand-built profiles, archetypes and requests

pub mod fixtures;
pub mod harness;
pub mod mock_renderer;

pub use harness::{TestHarness, TestHarnessBuilder};
pub use mock_renderer::MockRenderer;
