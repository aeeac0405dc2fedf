// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Frozen scope tree.

use std::{collections::HashMap, sync::Arc};

use super::{
    HookDefinition, HookId, ScopeId, ScopeNode, StepDefinition, StepId,
};
use crate::step::ParameterRegistry;

/// Scope tree frozen out of a [`Composer`], with every node and definition
/// indexed by id.
///
/// [`Composer`]: super::Composer
#[derive(Clone, Debug)]
pub struct ScopePlan {
    root: Arc<ScopeNode>,
    scopes: HashMap<ScopeId, Arc<ScopeNode>>,
    steps: HashMap<StepId, Arc<StepDefinition>>,
    hooks: HashMap<HookId, Arc<HookDefinition>>,
    parameters: ParameterRegistry,
}

impl ScopePlan {
    pub(crate) fn new(
        root: ScopeId,
        mut scopes: HashMap<ScopeId, ScopeNode>,
        steps: HashMap<StepId, StepDefinition>,
        hooks: HashMap<HookId, HookDefinition>,
        parameters: ParameterRegistry,
    ) -> Option<Self> {
        let root = Arc::new(scopes.remove(&root)?);
        let mut scopes = scopes
            .into_iter()
            .map(|(id, node)| (id, Arc::new(node)))
            .collect::<HashMap<_, _>>();
        drop(scopes.insert(root.id.clone(), Arc::clone(&root)));

        Some(Self {
            root,
            scopes,
            steps: steps.into_iter().map(|(id, d)| (id, Arc::new(d))).collect(),
            hooks: hooks.into_iter().map(|(id, h)| (id, Arc::new(h))).collect(),
            parameters,
        })
    }

    /// Returns the synthetic root [`ScopeNode`].
    #[must_use]
    pub const fn root(&self) -> &Arc<ScopeNode> {
        &self.root
    }

    /// Looks up a [`ScopeNode`] by its id.
    #[must_use]
    pub fn scope(&self, id: &ScopeId) -> Option<&Arc<ScopeNode>> {
        self.scopes.get(id)
    }

    /// Looks up a [`StepDefinition`] by its id.
    #[must_use]
    pub fn step(&self, id: &StepId) -> Option<&Arc<StepDefinition>> {
        self.steps.get(id)
    }

    /// Looks up a [`HookDefinition`] by its id.
    #[must_use]
    pub fn hook(&self, id: &HookId) -> Option<&Arc<HookDefinition>> {
        self.hooks.get(id)
    }

    /// Returns the number of scopes, the root included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    /// Indicates whether nothing but the root was registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scopes.len() <= 1
    }

    /// Returns the custom parameter types registered along with the scopes.
    #[must_use]
    pub const fn parameters(&self) -> &ParameterRegistry {
        &self.parameters
    }

    /// Iterates over the children of the given [`ScopeNode`] in registration
    /// order.
    pub fn children<'s>(
        &'s self,
        node: &'s ScopeNode,
    ) -> impl Iterator<Item = &'s Arc<ScopeNode>> + 's {
        node.children.iter().filter_map(|id| self.scopes.get(id))
    }

    /// Iterates over the [`StepDefinition`]s attached directly to the given
    /// [`ScopeNode`] in registration order.
    pub fn steps_of<'s>(
        &'s self,
        node: &'s ScopeNode,
    ) -> impl Iterator<Item = &'s Arc<StepDefinition>> + 's {
        node.steps.iter().filter_map(|id| self.steps.get(id))
    }

    /// Iterates over the [`HookDefinition`]s attached directly to the given
    /// [`ScopeNode`] in registration order.
    pub fn hooks_of<'s>(
        &'s self,
        node: &'s ScopeNode,
    ) -> impl Iterator<Item = &'s Arc<HookDefinition>> + 's {
        node.hooks.iter().filter_map(|id| self.hooks.get(id))
    }
}
