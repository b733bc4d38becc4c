// SPDX-FileCopyrightText: 2026 Crewplan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Stage 3 of the crewplan pipeline: assigns a language model to every team
//! member under a cost/performance strategy.
//!
//! This crate provides:
//! - **Allocator**: [`ModelAllocator`], reading a fresh configuration snapshot per call
//! - **Strategies**: single model, cost optimized, performance optimized, balanced
//! - **Budget tracker**: running cost against the ceiling of a budget tier
//! - **Credentials**: presence checks against the environment or a fixed set

pub mod allocator;
pub mod budget;
pub mod credentials;
pub mod scoring;
pub mod strategy;

pub use allocator::ModelAllocator;
pub use budget::BudgetTracker;
pub use credentials::{EnvCredentials, StaticCredentials};
