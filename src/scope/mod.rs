// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Scope tree recorded from code registrations.
//!
//! - [`composer`]: stack-based [`Composer`] building the tree
//! - [`definition`]: [`StepDefinition`]s and [`HookDefinition`]s attached to
//!   scopes
//! - [`id`]: injectable [`IdGenerator`]s
//! - [`plan`]: the frozen [`ScopePlan`]

pub mod composer;
pub mod definition;
pub mod id;
pub mod plan;

use std::time::Duration;

use derive_more::with_trait::Display;

pub use self::{
    composer::Composer,
    definition::{
        DefinitionOptions, HookDefinition, HookType, ResolvedOptions,
        StepDefinition, StepKeyword,
    },
    id::{HookId, IdGenerator, IdKind, ScopeId, Sequential, StepId},
    plan::ScopePlan,
};

/// Kind of a [`ScopeNode`].
#[derive(
    Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd,
)]
pub enum ScopeKind {
    /// Synthetic root every tree starts from.
    #[display("root")]
    Root,

    /// [Feature](https://cucumber.io/docs/gherkin/reference#feature).
    #[display("feature")]
    Feature,

    /// [Rule](https://cucumber.io/docs/gherkin/reference#rule).
    #[display("rule")]
    Rule,

    /// [Scenario](https://cucumber.io/docs/gherkin/reference#example).
    #[display("scenario")]
    Scenario,

    /// [Scenario Outline][1].
    ///
    /// [1]: https://cucumber.io/docs/gherkin/reference#scenario-outline
    #[display("scenarioOutline")]
    ScenarioOutline,
}

impl ScopeKind {
    /// English Gherkin keyword of this kind.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Root => "Root",
            Self::Feature => "Feature",
            Self::Rule => "Rule",
            Self::Scenario => "Scenario",
            Self::ScenarioOutline => "Scenario Outline",
        }
    }

    /// Indicates whether this kind is executable, i.e. a scenario or a
    /// scenario outline.
    #[must_use]
    pub const fn is_executable(self) -> bool {
        matches!(self, Self::Scenario | Self::ScenarioOutline)
    }
}

/// Mode a scope, step or hook is run in.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Display,
    Eq,
    Hash,
    PartialEq,
    clap::ValueEnum,
    serde::Serialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    /// Runs normally.
    #[default]
    #[display("default")]
    Default,

    /// Isn't run.
    #[display("skip")]
    Skip,

    /// Runs exclusively with the other [`ExecutionMode::Only`] ones.
    #[display("only")]
    Only,

    /// Expected to fail.
    #[display("failing")]
    Failing,

    /// May run concurrently with its siblings.
    #[display("concurrent")]
    Concurrent,
}

/// Metadata passed when creating a scope.
///
/// `mode` is an explicit per-call option and beats `variant`, which is the
/// mode picked by a DSL call variant (like `.skip` or `.only`). Both fall back
/// to the [`Composer`]'s default mode.
#[derive(Clone, Debug, Default)]
pub struct ScopeMetadata {
    /// Explicit per-call [`ExecutionMode`].
    pub mode: Option<ExecutionMode>,

    /// [`ExecutionMode`] of the DSL call variant.
    pub variant: Option<ExecutionMode>,

    /// Tags of the scope.
    pub tags: Vec<String>,

    /// Timeout handed over to an executor as is.
    pub timeout: Option<Duration>,

    /// Free-form description.
    pub description: Option<String>,

    /// Opaque user data.
    pub data: Option<serde_json::Value>,

    /// Examples table registered along with a scenario outline.
    pub examples: Option<serde_json::Value>,

    /// Whether the scope is marked as pending.
    pub pending: bool,
}

impl ScopeMetadata {
    /// Creates empty [`ScopeMetadata`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the explicit [`ExecutionMode`].
    #[must_use]
    pub const fn mode(mut self, mode: ExecutionMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Sets the [`ExecutionMode`] of the DSL call variant.
    #[must_use]
    pub const fn variant(mut self, mode: ExecutionMode) -> Self {
        self.variant = Some(mode);
        self
    }

    /// Sets the tags.
    #[must_use]
    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the opaque user data.
    #[must_use]
    pub fn data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Sets the examples table.
    #[must_use]
    pub fn examples(mut self, examples: serde_json::Value) -> Self {
        self.examples = Some(examples);
        self
    }

    /// Marks the scope as pending.
    #[must_use]
    pub const fn pending(mut self) -> Self {
        self.pending = true;
        self
    }

    /// Resolves the [`ExecutionMode`] against the given default.
    #[must_use]
    pub fn resolve_mode(&self, default: ExecutionMode) -> ExecutionMode {
        self.mode.or(self.variant).unwrap_or(default)
    }
}

/// Named, kind-tagged node of a scope tree.
///
/// Steps, hooks and children are referenced by ids, resolvable through the
/// [`ScopePlan`] the node belongs to.
#[derive(Clone, Debug)]
pub struct ScopeNode {
    /// Unique id within its [`ScopePlan`].
    pub id: ScopeId,

    /// Kind of this node.
    pub kind: ScopeKind,

    /// Name of this node.
    pub name: String,

    /// Resolved [`ExecutionMode`].
    pub mode: ExecutionMode,

    /// Tags of this node.
    pub tags: Vec<String>,

    /// Timeout handed over to an executor as is.
    pub timeout: Option<Duration>,

    /// Free-form description.
    pub description: Option<String>,

    /// Opaque user data.
    pub data: Option<serde_json::Value>,

    /// Examples table registered along with a scenario outline.
    pub examples: Option<serde_json::Value>,

    /// Whether this node is marked as pending.
    pub pending: bool,

    /// Step definitions attached to this node, in registration order.
    pub steps: Vec<StepId>,

    /// Hook definitions attached to this node, in registration order.
    pub hooks: Vec<HookId>,

    /// Child scopes, in registration order.
    pub children: Vec<ScopeId>,
}

impl ScopeNode {
    /// Creates a new childless [`ScopeNode`] out of the given metadata.
    #[must_use]
    pub fn new(
        id: ScopeId,
        kind: ScopeKind,
        name: impl Into<String>,
        mode: ExecutionMode,
        metadata: ScopeMetadata,
    ) -> Self {
        Self {
            id,
            kind,
            name: name.into(),
            mode,
            tags: metadata.tags,
            timeout: metadata.timeout,
            description: metadata.description,
            data: metadata.data,
            examples: metadata.examples,
            pending: metadata.pending,
            steps: Vec::new(),
            hooks: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Human-readable description of this node used in error messages, like
    /// `scenario "adds" [scenario-1]`.
    #[must_use]
    pub fn describe(&self) -> String {
        format!("{} \"{}\" [{}]", self.kind, self.name, self.id)
    }
}

/// Normalizes a scope or Gherkin node name for pairing: trims it and
/// collapses inner whitespace runs into single spaces.
#[must_use]
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join(" ")
}
