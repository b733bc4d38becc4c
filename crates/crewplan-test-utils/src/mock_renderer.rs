// SPDX-FileCopyrightText: 2026 Crewplan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock plan renderer for deterministic testing.
//!
//! `MockRenderer` implements `PlanRenderer`, capturing every plan it is
//! handed so tests can assert on what downstream consumers would receive.

use std::sync::{Mutex, MutexGuard};

use crewplan_core::{CrewplanError, Plan, PlanRenderer};

/// A renderer that records plans and returns a fixed string.
pub struct MockRenderer {
    output: String,
    fail_with: Option<String>,
    rendered: Mutex<Vec<Plan>>,
}

impl MockRenderer {
    /// A renderer that answers every call with `output`.
    pub fn new(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            fail_with: None,
            rendered: Mutex::new(Vec::new()),
        }
    }

    /// A renderer whose every call fails with a [`CrewplanError::Render`].
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            output: String::new(),
            fail_with: Some(message.into()),
            rendered: Mutex::new(Vec::new()),
        }
    }

    /// All plans passed to `render()`, in call order.
    pub fn rendered(&self) -> Vec<Plan> {
        self.lock().clone()
    }

    pub fn render_count(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Plan>> {
        self.rendered.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for MockRenderer {
    fn default() -> Self {
        Self::new("rendered")
    }
}

impl PlanRenderer for MockRenderer {
    fn render(&self, plan: &Plan) -> Result<String, CrewplanError> {
        self.lock().push(plan.clone());
        match &self.fail_with {
            Some(message) => Err(CrewplanError::Render {
                message: message.clone(),
            }),
            None => Ok(self.output.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TestHarness;

    #[test]
    fn records_each_plan() {
        let harness = TestHarness::new().unwrap();
        let renderer = MockRenderer::default();
        let first = harness.plan("간단한 웹앱");
        let second = harness.plan("데이터 분석");

        assert_eq!(renderer.render(&first).unwrap(), "rendered");
        renderer.render(&second).unwrap();
        assert_eq!(renderer.render_count(), 2);
        assert_eq!(renderer.rendered(), vec![first, second]);
    }

    #[test]
    fn failing_renderer_still_records() {
        let harness = TestHarness::new().unwrap();
        let renderer = MockRenderer::failing("template missing");
        let err = renderer.render(&harness.plan("웹앱")).unwrap_err();
        assert!(matches!(err, CrewplanError::Render { .. }));
        assert_eq!(renderer.render_count(), 1);
    }
}
