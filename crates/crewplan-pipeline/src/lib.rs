// SPDX-FileCopyrightText: 2026 Crewplan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The crewplan pipeline.
//!
//! [`Pipeline`] runs requirement analysis, agent matching and model
//! allocation in sequence and returns a frozen [`Plan`](crewplan_core::Plan).
//! [`MemoryPlanStore`] is an in-process [`PlanStore`](crewplan_core::PlanStore).

pub mod pipeline;
pub mod store;

pub use pipeline::Pipeline;
pub use store::MemoryPlanStore;
