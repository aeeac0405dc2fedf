// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Executable units of a [`TestPlan`].
//!
//! [`TestPlan`]: super::TestPlan

use std::{
    collections::BTreeMap,
    fmt,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use serde::Serialize;

use super::result::{ExecutionResult, Status};
use crate::{
    ExecutionMode,
    adapter::ScenarioSummary,
    document::{CompiledScenario, Scenario, Step},
    scope::{ScopeNode, StepDefinition},
};

/// Gherkin node an [`Execution`] was built from.
#[derive(Clone, Debug)]
pub enum GherkinSource {
    /// Plain [`Scenario`].
    Scenario(Scenario),

    /// Example row of a scenario outline.
    Example(CompiledScenario),
}

impl GherkinSource {
    /// Returns the name of the Gherkin node.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Scenario(s) => &s.name,
            Self::Example(c) => &c.name,
        }
    }
}

/// Examples table an example row comes from.
#[derive(Clone, Debug, Serialize)]
pub struct ExampleGroupInfo {
    /// Id of the examples table.
    pub id: String,

    /// Name of the examples table.
    pub name: String,

    /// Tags of the examples table.
    pub tags: Vec<String>,
}

/// Example row data attached to an outline [`Execution`].
#[derive(Clone, Debug, Serialize)]
pub struct ExamplePayload {
    /// Examples table of the row.
    pub group: ExampleGroupInfo,

    /// Index of the row across every examples table of the outline.
    pub index: usize,

    /// Cells of the row keyed by their column header.
    pub values: BTreeMap<String, String>,
}

/// Scenario, or a single example of a scenario outline, paired with its
/// registered scope and resolved steps.
pub struct Execution {
    /// Unique id within a [`TestPlan`].
    ///
    /// [`TestPlan`]: super::TestPlan
    pub id: String,

    /// Name of the Gherkin node, placeholders interpolated.
    pub name: String,

    /// Keyword of the Gherkin node.
    pub keyword: String,

    /// Unique human-readable path within a [`TestPlan`].
    ///
    /// [`TestPlan`]: super::TestPlan
    pub qualified_name: String,

    /// Gherkin and scope tags, deduplicated, order kept.
    pub tags: Vec<String>,

    /// [`ExecutionMode`] of the scope.
    pub mode: ExecutionMode,

    /// Whether the scope was marked as pending.
    pub pending: bool,

    /// Timeout of the scope, not enforced here.
    pub timeout: Option<Duration>,

    /// Arbitrary data of the scope.
    pub data: Option<serde_json::Value>,

    /// Paired scope.
    pub scope: Arc<ScopeNode>,

    /// Summary of the paired scope.
    pub summary: Arc<ScenarioSummary>,

    /// Gherkin node this [`Execution`] is built from.
    pub gherkin: GherkinSource,

    /// Background and own steps, in run order.
    pub gherkin_steps: Vec<Step>,

    /// Definition resolved for each of [`Execution::gherkin_steps`], at the
    /// same position.
    pub steps: Vec<Arc<StepDefinition>>,

    /// Enclosing scopes, root-first.
    pub ancestors: Vec<Arc<ScopeNode>>,

    /// Example row data, for an outline example.
    pub example: Option<ExamplePayload>,

    result: Mutex<ExecutionResult>,
}

impl fmt::Debug for Execution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Execution")
            .field("id", &self.id)
            .field("qualified_name", &self.qualified_name)
            .field("tags", &self.tags)
            .field("mode", &self.mode)
            .field("pending", &self.pending)
            .field("steps", &self.steps.len())
            .field("example", &self.example)
            .field("result", &*self.lock())
            .finish_non_exhaustive()
    }
}

impl Execution {
    #[expect(clippy::too_many_arguments, reason = "internal constructor")]
    pub(super) fn new(
        id: String,
        keyword: String,
        qualified_name: String,
        tags: Vec<String>,
        summary: Arc<ScenarioSummary>,
        gherkin: GherkinSource,
        gherkin_steps: Vec<Step>,
        steps: Vec<Arc<StepDefinition>>,
        example: Option<ExamplePayload>,
    ) -> Self {
        let scope = Arc::clone(&summary.scenario);
        Self {
            id,
            name: gherkin.name().to_owned(),
            keyword,
            qualified_name,
            tags,
            mode: scope.mode,
            pending: scope.pending,
            timeout: scope.timeout,
            data: scope.data.clone(),
            ancestors: summary.ancestors.clone(),
            scope,
            summary,
            gherkin,
            gherkin_steps,
            steps,
            example,
            result: Mutex::new(ExecutionResult::default()),
        }
    }

    /// Indicates whether this [`Execution`] is an outline example.
    #[must_use]
    pub const fn is_example(&self) -> bool {
        self.example.is_some()
    }

    /// Returns a snapshot of the current [`ExecutionResult`].
    #[must_use]
    pub fn result(&self) -> ExecutionResult {
        self.lock().clone()
    }

    /// Returns the current [`Status`].
    #[must_use]
    pub fn status(&self) -> Status {
        self.lock().status
    }

    /// Marks this [`Execution`] as started, clearing any previous outcome.
    pub fn mark_started(&self) {
        self.lock().start();
    }

    /// Marks this [`Execution`] as passed.
    pub fn mark_passed(&self) {
        self.lock().complete(Status::Passed, None, None);
    }

    /// Marks this [`Execution`] as failed with the given error.
    pub fn mark_failed(&self, error: impl fmt::Display) {
        self.lock().complete(Status::Failed, Some(error.to_string()), None);
    }

    /// Marks this [`Execution`] as skipped.
    pub fn mark_skipped(&self, reason: Option<String>) {
        self.lock().complete(Status::Skipped, None, reason);
    }

    /// Marks this [`Execution`] as pending.
    pub fn mark_pending(&self, reason: Option<String>) {
        self.lock().complete(Status::Pending, None, reason);
    }

    /// Resets the [`ExecutionResult`] to its initial state.
    pub fn reset(&self) {
        *self.lock() = ExecutionResult::default();
    }

    fn lock(&self) -> MutexGuard<'_, ExecutionResult> {
        self.result.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scope::{ScopeId, ScopeKind, ScopeMetadata};

    fn execution() -> Execution {
        let node = |id: &str, kind, name: &str| {
            Arc::new(ScopeNode::new(
                ScopeId::from(id),
                kind,
                name,
                ExecutionMode::Default,
                ScopeMetadata::new(),
            ))
        };
        let feature = node("feature-1", ScopeKind::Feature, "Shop");
        let scenario = Arc::new(ScopeNode::new(
            ScopeId::from("scenario-1"),
            ScopeKind::Scenario,
            "Browse",
            ExecutionMode::Concurrent,
            ScopeMetadata::new()
                .pending()
                .timeout(Duration::from_secs(3))
                .data(serde_json::json!({"user": "guest"})),
        ));
        let summary = Arc::new(ScenarioSummary {
            id: scenario.id.clone(),
            scenario: Arc::clone(&scenario),
            feature: Arc::clone(&feature),
            rule: None,
            ancestors: vec![feature],
            steps: vec![],
        });

        Execution::new(
            "scenario-1".into(),
            "Scenario".into(),
            "Feature: Shop [feature-1] > Scenario: Browse [scenario-1]".into(),
            vec![],
            summary,
            GherkinSource::Scenario(Scenario {
                keyword: "Scenario".into(),
                name: "Browse".into(),
                tags: vec![],
                steps: vec![],
                line: 3,
            }),
            vec![],
            vec![],
            None,
        )
    }

    #[test]
    fn copies_scope_metadata() {
        let exec = execution();
        assert_eq!(exec.name, "Browse");
        assert_eq!(exec.mode, ExecutionMode::Concurrent);
        assert!(exec.pending);
        assert_eq!(exec.timeout, Some(Duration::from_secs(3)));
        assert_eq!(exec.data.as_ref().unwrap()["user"], "guest");
        assert_eq!(exec.ancestors.len(), 1);
        assert!(!exec.is_example());
    }

    #[test]
    fn result_transitions() {
        let exec = execution();
        assert_eq!(exec.status(), Status::Pending);

        exec.mark_started();
        assert!(exec.result().started_at.is_some());
        assert!(exec.result().completed_at.is_none());

        exec.mark_failed("boom");
        let res = exec.result();
        assert_eq!(res.status, Status::Failed);
        assert_eq!(res.error.as_deref(), Some("boom"));
        assert!(res.completed_at.is_some());

        exec.mark_started();
        assert_eq!(exec.status(), Status::Pending);
        assert!(exec.result().error.is_none());

        exec.mark_skipped(Some("flaky".into()));
        assert_eq!(exec.status(), Status::Skipped);
        assert_eq!(exec.result().reason.as_deref(), Some("flaky"));

        exec.mark_pending(None);
        assert_eq!(exec.status(), Status::Pending);

        exec.mark_passed();
        assert_eq!(exec.status(), Status::Passed);

        exec.reset();
        let res = exec.result();
        assert_eq!(res.status, Status::Pending);
        assert!(res.started_at.is_none() && res.completed_at.is_none());
    }
}
