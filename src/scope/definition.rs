// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Step and hook definitions attached to scopes.

use std::time::Duration;

use derive_more::with_trait::Display;
use gherkin::StepType;
use once_cell::sync::OnceCell;
use regex::Regex;

use super::{ExecutionMode, HookId, StepId};
use crate::{
    error::StepResult,
    step::{Location, ParameterRegistry, StepExpression},
};

/// Keyword a [`StepDefinition`] is registered with.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum StepKeyword {
    /// `Given`.
    Given,

    /// `When`.
    When,

    /// `Then`.
    Then,

    /// `And`, compatible with any step type.
    And,

    /// `But`, compatible with any step type.
    But,
}

impl StepKeyword {
    /// Indicates whether this is a conjunction (`And`/`But`) keyword.
    #[must_use]
    pub const fn is_conjunction(self) -> bool {
        matches!(self, Self::And | Self::But)
    }

    /// Returns the [`StepType`] of this keyword, if it's not a conjunction.
    #[must_use]
    pub const fn step_type(self) -> Option<StepType> {
        match self {
            Self::Given => Some(StepType::Given),
            Self::When => Some(StepType::When),
            Self::Then => Some(StepType::Then),
            Self::And | Self::But => None,
        }
    }

    /// Indicates whether a Gherkin step of the given resolved [`StepType`] may
    /// be matched by a definition with this keyword.
    ///
    /// `conjunction` tells whether the Gherkin step itself was written with an
    /// `And`/`But` keyword: either side being a conjunction makes them
    /// compatible.
    #[must_use]
    pub fn accepts(self, ty: StepType, conjunction: bool) -> bool {
        conjunction || self.step_type().map_or(true, |own| own == ty)
    }
}

impl From<StepType> for StepKeyword {
    fn from(ty: StepType) -> Self {
        match ty {
            StepType::Given => Self::Given,
            StepType::When => Self::When,
            StepType::Then => Self::Then,
        }
    }
}

/// Options of a step or hook definition, as passed at registration.
#[derive(Clone, Debug, Default)]
pub struct DefinitionOptions {
    /// Tags of the definition.
    pub tags: Vec<String>,

    /// Explicit [`ExecutionMode`]. Falls back to the [`Composer`]'s default.
    ///
    /// [`Composer`]: super::Composer
    pub mode: Option<ExecutionMode>,

    /// Timeout handed over to an executor as is.
    pub timeout: Option<Duration>,

    /// Ordering hint for hooks of the same type.
    pub order: Option<i32>,

    /// Opaque user data.
    pub data: Option<serde_json::Value>,
}

impl DefinitionOptions {
    /// Creates empty [`DefinitionOptions`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
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

    /// Sets the explicit [`ExecutionMode`].
    #[must_use]
    pub const fn mode(mut self, mode: ExecutionMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Sets the timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the ordering hint.
    #[must_use]
    pub const fn order(mut self, order: i32) -> Self {
        self.order = Some(order);
        self
    }

    /// Sets the opaque user data.
    #[must_use]
    pub fn data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }
}

/// [`DefinitionOptions`] with the [`ExecutionMode`] resolved.
#[derive(Clone, Debug)]
pub struct ResolvedOptions {
    /// Tags of the definition.
    pub tags: Vec<String>,

    /// Resolved [`ExecutionMode`].
    pub mode: ExecutionMode,

    /// Timeout handed over to an executor as is.
    pub timeout: Option<Duration>,

    /// Ordering hint for hooks of the same type.
    pub order: Option<i32>,

    /// Opaque user data.
    pub data: Option<serde_json::Value>,
}

impl DefinitionOptions {
    pub(crate) fn resolve(self, default: ExecutionMode) -> ResolvedOptions {
        ResolvedOptions {
            tags: self.tags,
            mode: self.mode.unwrap_or(default),
            timeout: self.timeout,
            order: self.order,
            data: self.data,
        }
    }
}

/// Pattern-based step definition registered against a scope.
///
/// Handlers aren't kept here: an executor keys them by [`StepDefinition::id`].
#[derive(Debug)]
pub struct StepDefinition {
    /// Unique id within its [`ScopePlan`](super::ScopePlan).
    pub id: StepId,

    /// Keyword this definition was registered with.
    pub keyword: StepKeyword,

    /// Pattern matched against step text.
    pub expression: StepExpression,

    /// Normalized options.
    pub options: ResolvedOptions,

    /// Where this definition was registered.
    pub location: Option<Location>,

    /// Lazily compiled [`StepDefinition::expression`].
    matcher: OnceCell<Regex>,
}

impl StepDefinition {
    /// Creates a new [`StepDefinition`].
    #[must_use]
    pub fn new(
        id: StepId,
        keyword: StepKeyword,
        expression: StepExpression,
        options: ResolvedOptions,
        location: Option<Location>,
    ) -> Self {
        Self {
            id,
            keyword,
            expression,
            options,
            location,
            matcher: OnceCell::new(),
        }
    }

    /// Source text of this definition's pattern.
    #[must_use]
    pub fn source(&self) -> &str {
        self.expression.source()
    }

    /// Checks whether the given step text matches this definition's pattern.
    ///
    /// The pattern is compiled on the first call and reused afterwards.
    ///
    /// # Errors
    ///
    /// If the pattern fails to compile.
    pub fn is_match(
        &self,
        text: &str,
        params: &ParameterRegistry,
    ) -> StepResult<bool> {
        let re = self
            .matcher
            .get_or_try_init(|| self.expression.compile(params))?;
        Ok(re.is_match(text))
    }
}

/// Type of a [`HookDefinition`].
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum HookType {
    /// Runs before every feature.
    BeforeFeature,

    /// Runs after every feature.
    AfterFeature,

    /// Runs before every rule.
    BeforeRule,

    /// Runs after every rule.
    AfterRule,

    /// Runs before every scenario.
    BeforeScenario,

    /// Runs after every scenario.
    AfterScenario,

    /// Runs before every step.
    BeforeStep,

    /// Runs after every step.
    AfterStep,

    /// Runs once before everything in its scope.
    Setup,

    /// Runs once after everything in its scope.
    Teardown,
}

/// Hook registered against a scope.
#[derive(Clone, Debug)]
pub struct HookDefinition {
    /// Unique id within its [`ScopePlan`](super::ScopePlan).
    pub id: HookId,

    /// Type of this hook.
    pub hook: HookType,

    /// Optional description.
    pub description: Option<String>,

    /// Normalized options.
    pub options: ResolvedOptions,
}
