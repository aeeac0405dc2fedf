// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! [`TestPlan`] of a single Gherkin feature.
//!
//! - [`builder`]: reconciliation of a Gherkin [`Feature`] with registered
//!   scopes
//! - [`planner`]: [`Planner`] facade locating the feature scope of a document
//! - [`execution`]: [`Execution`]s and their [`ExecutionResult`]s
//!
//! [`Feature`]: crate::document::Feature

pub mod bucket;
pub mod builder;
pub mod execution;
pub mod planner;
pub mod qualified;
pub mod result;

use std::{collections::HashMap, sync::Arc};

use crate::scope::ScopeNode;

pub use self::{
    builder::PlanBuilder,
    execution::{ExampleGroupInfo, ExamplePayload, Execution, GherkinSource},
    planner::Planner,
    result::{ExecutionResult, Status},
};

/// Feature of a [`TestPlan`], mirroring the Gherkin document structure.
#[derive(Debug)]
pub struct FeatureNode {
    /// Gherkin keyword.
    pub keyword: String,

    /// Gherkin name.
    pub name: String,

    /// Gherkin tags.
    pub tags: Vec<String>,

    /// Paired feature scope.
    pub scope: Arc<ScopeNode>,

    /// Children in document order.
    pub children: Vec<FeatureChild>,
}

/// Child of a [`FeatureNode`].
#[derive(Debug)]
pub enum FeatureChild {
    /// Scenario directly in the feature.
    Scenario(Arc<Execution>),

    /// Scenario outline directly in the feature.
    Outline(OutlineNode),

    /// Rule of the feature.
    Rule(RuleNode),
}

/// Rule of a [`TestPlan`].
#[derive(Debug)]
pub struct RuleNode {
    /// Gherkin keyword.
    pub keyword: String,

    /// Gherkin name.
    pub name: String,

    /// Gherkin tags.
    pub tags: Vec<String>,

    /// Paired rule scope, absent for a Gherkin rule without scenarios and
    /// without a registered counterpart.
    pub scope: Option<Arc<ScopeNode>>,

    /// Children in document order.
    pub children: Vec<RuleChild>,
}

/// Child of a [`RuleNode`].
#[derive(Debug)]
pub enum RuleChild {
    /// Scenario of the rule.
    Scenario(Arc<Execution>),

    /// Scenario outline of the rule.
    Outline(OutlineNode),
}

/// Scenario outline of a [`TestPlan`].
#[derive(Debug)]
pub struct OutlineNode {
    /// Gherkin keyword.
    pub keyword: String,

    /// Gherkin name, placeholders included.
    pub name: String,

    /// Gherkin tags.
    pub tags: Vec<String>,

    /// Paired scenario outline scope.
    pub scope: Arc<ScopeNode>,

    /// One [`Execution`] per examples row.
    pub examples: Vec<Arc<Execution>>,
}

/// Ordered, uniquely addressable [`Execution`]s of a single Gherkin feature.
#[derive(Debug)]
pub struct TestPlan {
    feature: FeatureNode,
    executions: Vec<Arc<Execution>>,
    by_id: HashMap<String, Arc<Execution>>,
    by_qualified_name: HashMap<String, Arc<Execution>>,
}

impl TestPlan {
    /// Returns the root [`FeatureNode`].
    #[must_use]
    pub const fn feature(&self) -> &FeatureNode {
        &self.feature
    }

    /// Lists every [`Execution`] in document order.
    #[must_use]
    pub fn list_executables(&self) -> &[Arc<Execution>] {
        &self.executions
    }

    /// Lists the [`Execution`]s currently marked as [`Status::Failed`], in
    /// document order.
    #[must_use]
    pub fn list_failed(&self) -> Vec<&Arc<Execution>> {
        self.executions
            .iter()
            .filter(|e| e.status() == Status::Failed)
            .collect()
    }

    /// Looks up an [`Execution`] by its id.
    #[must_use]
    pub fn find_by_id(&self, id: &str) -> Option<&Arc<Execution>> {
        self.by_id.get(id)
    }

    /// Looks up an [`Execution`] by its qualified name.
    #[must_use]
    pub fn find_by_qualified_name(&self, name: &str) -> Option<&Arc<Execution>> {
        self.by_qualified_name.get(name)
    }

    /// Number of [`Execution`]s.
    #[must_use]
    pub fn len(&self) -> usize {
        self.executions.len()
    }

    /// Indicates whether there are no [`Execution`]s.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.executions.is_empty()
    }

    /// Resets the result of every [`Execution`].
    pub fn reset(&self) {
        for execution in &self.executions {
            execution.reset();
        }
    }
}
