// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Stack-based builder of a scope tree.

use std::collections::HashMap;

use derive_more::with_trait::Debug;

use super::{
    DefinitionOptions, ExecutionMode, HookDefinition, HookId, HookType,
    IdGenerator, IdKind, ScopeId, ScopeKind, ScopeMetadata, ScopeNode,
    ScopePlan, Sequential, StepDefinition, StepId, StepKeyword,
};
use crate::{
    error::{ScopeError, ScopeResult},
    step::{Location, ParameterRegistry, StepExpression},
};

/// Allowed parents of a [`ScopeKind::Feature`].
const FEATURE_PARENTS: &[ScopeKind] = &[ScopeKind::Root];

/// Allowed parents of a [`ScopeKind::Rule`].
const RULE_PARENTS: &[ScopeKind] = &[ScopeKind::Feature];

/// Allowed parents of a [`ScopeKind::Scenario`] and a
/// [`ScopeKind::ScenarioOutline`].
const SCENARIO_PARENTS: &[ScopeKind] = &[ScopeKind::Feature, ScopeKind::Rule];

/// Records registrations into a tree of [`ScopeNode`]s.
///
/// Every [`Composer`] starts with a synthetic [`ScopeKind::Root`] node on its
/// stack. Creating a scope pushes it, runs the given action against the
/// [`Composer`] and pops it back, so definitions registered inside the action
/// are attached to that scope.
///
/// ```rust
/// # use cucumber_plan::{Composer, ScopeMetadata};
/// #
/// # fn main() -> Result<(), cucumber_plan::error::ScopeError> {
/// let mut composer = Composer::new();
/// composer.feature("Calculator", ScopeMetadata::new(), |c| {
///     c.scenario("adds", ScopeMetadata::new(), |c| {
///         c.given("I have {int}")?;
///         c.then("I get {int}")?;
///         Ok(())
///     })?;
///     Ok(())
/// })?;
/// let plan = composer.into_plan()?;
/// assert_eq!(plan.len(), 3);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Composer {
    /// Source of ids for every node and definition.
    #[debug(ignore)]
    ids: Box<dyn IdGenerator>,

    /// [`ExecutionMode`] of nodes and definitions not specifying one.
    default_mode: ExecutionMode,

    /// Currently open scopes, the root at the bottom.
    stack: Vec<ScopeId>,

    /// Id of the synthetic root.
    root: ScopeId,

    scopes: HashMap<ScopeId, ScopeNode>,
    steps: HashMap<StepId, StepDefinition>,
    hooks: HashMap<HookId, HookDefinition>,
    parameters: ParameterRegistry,
}

impl Default for Composer {
    fn default() -> Self {
        Self::new()
    }
}

impl Composer {
    /// Creates a new [`Composer`] with [`Sequential`] ids.
    #[must_use]
    pub fn new() -> Self {
        Self::with_id_generator(Sequential::new())
    }

    /// Creates a new [`Composer`] taking ids from the given [`IdGenerator`].
    #[must_use]
    pub fn with_id_generator(ids: impl IdGenerator + 'static) -> Self {
        let mut ids: Box<dyn IdGenerator> = Box::new(ids);
        let root = ScopeId::new(ids.generate(IdKind::Scope(ScopeKind::Root)));
        let node = ScopeNode::new(
            root.clone(),
            ScopeKind::Root,
            "",
            ExecutionMode::Default,
            ScopeMetadata::default(),
        );

        Self {
            ids,
            default_mode: ExecutionMode::Default,
            stack: vec![root.clone()],
            root: root.clone(),
            scopes: HashMap::from([(root, node)]),
            steps: HashMap::new(),
            hooks: HashMap::new(),
            parameters: ParameterRegistry::new(),
        }
    }

    /// Sets the [`ExecutionMode`] used by everything registered afterwards
    /// without an explicit or variant mode.
    #[must_use]
    pub const fn default_mode(mut self, mode: ExecutionMode) -> Self {
        self.default_mode = mode;
        self
    }

    /// Returns the [`ScopeNode`] on top of the stack.
    #[must_use]
    pub fn current(&self) -> Option<&ScopeNode> {
        self.stack.last().and_then(|id| self.scopes.get(id))
    }

    /// Creates a scope of any kind under the current top of the stack.
    ///
    /// If `allowed_parents` is [`Some`], the kind of the current top must be
    /// one of them. The `action` runs with the new scope on top of the stack,
    /// which is popped afterwards even if the `action` fails.
    ///
    /// # Errors
    ///
    /// - [`ScopeError::InvalidParent`] if the current top's kind isn't
    ///   allowed, or if a [`ScopeKind::Root`] is requested;
    /// - [`ScopeError::DuplicateId`] if the [`IdGenerator`] repeats itself;
    /// - any error returned by the `action`.
    pub fn create_scope<F>(
        &mut self,
        kind: ScopeKind,
        name: impl Into<String>,
        metadata: ScopeMetadata,
        allowed_parents: Option<&[ScopeKind]>,
        action: F,
    ) -> ScopeResult<ScopeId>
    where
        F: FnOnce(&mut Self) -> ScopeResult<()>,
    {
        let name = name.into();
        let parent = self
            .current()
            .map(|p| (p.id.clone(), p.kind))
            .ok_or_else(|| ScopeError::empty_stack(format!("{kind} \"{name}\"")));
        let (parent_id, parent_kind) = parent?;

        if kind == ScopeKind::Root
            || allowed_parents.is_some_and(|allowed| !allowed.contains(&parent_kind))
        {
            return Err(ScopeError::invalid_parent(kind, name, parent_kind));
        }

        let id = ScopeId::new(self.ids.generate(IdKind::Scope(kind)));
        if self.scopes.contains_key(&id) {
            return Err(ScopeError::duplicate_id(id.as_str()));
        }

        let mode = metadata.resolve_mode(self.default_mode);
        let node = ScopeNode::new(id.clone(), kind, name, mode, metadata);
        tracing::debug!(scope = %node.describe(), parent = %parent_id, "scope created");
        drop(self.scopes.insert(id.clone(), node));
        if let Some(parent) = self.scopes.get_mut(&parent_id) {
            parent.children.push(id.clone());
        }

        self.stack.push(id.clone());
        let result = action(self);
        drop(self.stack.pop());

        result.map(|()| id)
    }

    /// Creates a [`ScopeKind::Feature`] directly under the root.
    ///
    /// # Errors
    ///
    /// See [`Composer::create_scope()`].
    pub fn feature<F>(
        &mut self,
        name: impl Into<String>,
        metadata: ScopeMetadata,
        action: F,
    ) -> ScopeResult<ScopeId>
    where
        F: FnOnce(&mut Self) -> ScopeResult<()>,
    {
        self.create_scope(
            ScopeKind::Feature,
            name,
            metadata,
            Some(FEATURE_PARENTS),
            action,
        )
    }

    /// Creates a [`ScopeKind::Rule`] directly under a feature.
    ///
    /// # Errors
    ///
    /// See [`Composer::create_scope()`].
    pub fn rule<F>(
        &mut self,
        name: impl Into<String>,
        metadata: ScopeMetadata,
        action: F,
    ) -> ScopeResult<ScopeId>
    where
        F: FnOnce(&mut Self) -> ScopeResult<()>,
    {
        self.create_scope(
            ScopeKind::Rule,
            name,
            metadata,
            Some(RULE_PARENTS),
            action,
        )
    }

    /// Creates a [`ScopeKind::Scenario`] under a feature or a rule.
    ///
    /// # Errors
    ///
    /// See [`Composer::create_scope()`].
    pub fn scenario<F>(
        &mut self,
        name: impl Into<String>,
        metadata: ScopeMetadata,
        action: F,
    ) -> ScopeResult<ScopeId>
    where
        F: FnOnce(&mut Self) -> ScopeResult<()>,
    {
        self.create_scope(
            ScopeKind::Scenario,
            name,
            metadata,
            Some(SCENARIO_PARENTS),
            action,
        )
    }

    /// Creates a [`ScopeKind::ScenarioOutline`] under a feature or a rule.
    ///
    /// # Errors
    ///
    /// See [`Composer::create_scope()`].
    pub fn scenario_outline<F>(
        &mut self,
        name: impl Into<String>,
        metadata: ScopeMetadata,
        action: F,
    ) -> ScopeResult<ScopeId>
    where
        F: FnOnce(&mut Self) -> ScopeResult<()>,
    {
        self.create_scope(
            ScopeKind::ScenarioOutline,
            name,
            metadata,
            Some(SCENARIO_PARENTS),
            action,
        )
    }

    /// Attaches a [`StepDefinition`] to the current top of the stack.
    ///
    /// Records the caller's [`Location`].
    ///
    /// # Errors
    ///
    /// - [`ScopeError::EmptyStack`] if there is no scope to attach to;
    /// - [`ScopeError::DuplicateId`] if the [`IdGenerator`] repeats itself.
    #[track_caller]
    pub fn register_step(
        &mut self,
        keyword: StepKeyword,
        expression: impl Into<StepExpression>,
        options: DefinitionOptions,
    ) -> ScopeResult<StepId> {
        let location = Location::caller();
        let expression = expression.into();
        let owner = self
            .stack
            .last()
            .cloned()
            .ok_or_else(|| ScopeError::empty_stack(format!("step `{expression}`")))?;

        let id = StepId::new(self.ids.generate(IdKind::Step));
        if self.steps.contains_key(&id) {
            return Err(ScopeError::duplicate_id(id.as_str()));
        }

        tracing::trace!(step = %id, %keyword, pattern = %expression, scope = %owner, "step registered");
        let definition = StepDefinition::new(
            id.clone(),
            keyword,
            expression,
            options.resolve(self.default_mode),
            Some(location),
        );
        drop(self.steps.insert(id.clone(), definition));
        if let Some(node) = self.scopes.get_mut(&owner) {
            node.steps.push(id.clone());
        }
        Ok(id)
    }

    /// Attaches a `Given` [`StepDefinition`] with default options.
    ///
    /// # Errors
    ///
    /// See [`Composer::register_step()`].
    #[track_caller]
    pub fn given(
        &mut self,
        expression: impl Into<StepExpression>,
    ) -> ScopeResult<StepId> {
        self.register_step(StepKeyword::Given, expression, DefinitionOptions::new())
    }

    /// Attaches a `When` [`StepDefinition`] with default options.
    ///
    /// # Errors
    ///
    /// See [`Composer::register_step()`].
    #[track_caller]
    pub fn when(
        &mut self,
        expression: impl Into<StepExpression>,
    ) -> ScopeResult<StepId> {
        self.register_step(StepKeyword::When, expression, DefinitionOptions::new())
    }

    /// Attaches a `Then` [`StepDefinition`] with default options.
    ///
    /// # Errors
    ///
    /// See [`Composer::register_step()`].
    #[track_caller]
    pub fn then(
        &mut self,
        expression: impl Into<StepExpression>,
    ) -> ScopeResult<StepId> {
        self.register_step(StepKeyword::Then, expression, DefinitionOptions::new())
    }

    /// Attaches an `And` [`StepDefinition`], matching steps of any type.
    ///
    /// # Errors
    ///
    /// See [`Composer::register_step()`].
    #[track_caller]
    pub fn and(
        &mut self,
        expression: impl Into<StepExpression>,
    ) -> ScopeResult<StepId> {
        self.register_step(StepKeyword::And, expression, DefinitionOptions::new())
    }

    /// Attaches a `But` [`StepDefinition`], matching steps of any type.
    ///
    /// # Errors
    ///
    /// See [`Composer::register_step()`].
    #[track_caller]
    pub fn but(
        &mut self,
        expression: impl Into<StepExpression>,
    ) -> ScopeResult<StepId> {
        self.register_step(StepKeyword::But, expression, DefinitionOptions::new())
    }

    /// Attaches a [`HookDefinition`] to the current top of the stack.
    ///
    /// # Errors
    ///
    /// - [`ScopeError::EmptyStack`] if there is no scope to attach to;
    /// - [`ScopeError::DuplicateId`] if the [`IdGenerator`] repeats itself.
    pub fn register_hook(
        &mut self,
        hook: HookType,
        description: Option<String>,
        options: DefinitionOptions,
    ) -> ScopeResult<HookId> {
        let owner = self
            .stack
            .last()
            .cloned()
            .ok_or_else(|| ScopeError::empty_stack(format!("{hook} hook")))?;

        let id = HookId::new(self.ids.generate(IdKind::Hook));
        if self.hooks.contains_key(&id) {
            return Err(ScopeError::duplicate_id(id.as_str()));
        }

        tracing::trace!(hook = %id, kind = %hook, scope = %owner, "hook registered");
        let definition = HookDefinition {
            id: id.clone(),
            hook,
            description,
            options: options.resolve(self.default_mode),
        };
        drop(self.hooks.insert(id.clone(), definition));
        if let Some(node) = self.scopes.get_mut(&owner) {
            node.hooks.push(id.clone());
        }
        Ok(id)
    }

    /// Attaches an undescribed [`HookDefinition`] with default options.
    ///
    /// # Errors
    ///
    /// See [`Composer::register_hook()`].
    pub fn hook(&mut self, hook: HookType) -> ScopeResult<HookId> {
        self.register_hook(hook, None, DefinitionOptions::new())
    }

    /// Defines a custom parameter type usable by every step expression of
    /// this [`Composer`].
    ///
    /// # Errors
    ///
    /// See [`ParameterRegistry::define()`].
    pub fn define_parameter(
        &mut self,
        name: impl Into<String>,
        regex: impl Into<String>,
    ) -> ScopeResult<()> {
        self.parameters.define(name, regex)
    }

    /// Freezes the recorded tree into a [`ScopePlan`].
    ///
    /// # Errors
    ///
    /// If the root node went missing, which only happens when an
    /// [`IdGenerator`] hands out the root id twice.
    pub fn into_plan(self) -> ScopeResult<ScopePlan> {
        let root = self.root.clone();
        ScopePlan::new(
            self.root,
            self.scopes,
            self.steps,
            self.hooks,
            self.parameters,
        )
        .ok_or_else(|| ScopeError::duplicate_id(root.as_str()))
    }
}
