// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Flattening of a [`ScopePlan`] into [`ScenarioSummary`]s, and world
//! creation.

use std::{collections::HashMap, fmt, sync::Arc};

use crate::{
    error::{ScopeError, ScopeResult, WorldError, WorldResult},
    scope::{ScopeId, ScopeKind, ScopeNode, ScopePlan, StepDefinition},
    world::{WorldFactory, WorldRequest},
};

/// Read-only projection of a scenario (or a scenario outline) scope along
/// with its ancestry.
#[derive(Clone, Debug)]
pub struct ScenarioSummary {
    /// Id of the scenario scope.
    pub id: ScopeId,

    /// The scenario scope itself.
    pub scenario: Arc<ScopeNode>,

    /// Nearest enclosing feature.
    pub feature: Arc<ScopeNode>,

    /// Nearest enclosing rule, if any.
    pub rule: Option<Arc<ScopeNode>>,

    /// Enclosing scopes, root-first, the synthetic root excluded.
    pub ancestors: Vec<Arc<ScopeNode>>,

    /// Step definitions visible to the scenario: its own ones first, then
    /// the ones of every enclosing scope, nearest first.
    pub steps: Vec<Arc<StepDefinition>>,
}

impl ScenarioSummary {
    /// Returns the [`ScopeKind`] of the scenario scope.
    #[must_use]
    pub fn kind(&self) -> ScopeKind {
        self.scenario.kind
    }
}

/// Walks a [`ScopePlan`] for an executor.
pub struct Adapter<'p, W = ()> {
    plan: &'p ScopePlan,
    factory: Option<Box<dyn WorldFactory<W> + 'p>>,
}

impl<W> fmt::Debug for Adapter<'_, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Adapter")
            .field("plan", &self.plan)
            .field("factory", &self.factory.as_ref().map(|_| ".."))
            .finish()
    }
}

impl<'p> Adapter<'p> {
    /// Creates a new [`Adapter`] of the given [`ScopePlan`] without any
    /// [`WorldFactory`].
    #[must_use]
    pub const fn new(plan: &'p ScopePlan) -> Self {
        Self { plan, factory: None }
    }
}

impl<'p, W: 'static> Adapter<'p, W> {
    /// Sets the [`WorldFactory`] for [`Adapter::create_world()`].
    #[must_use]
    pub fn with_world_factory<V: 'static>(
        self,
        factory: impl WorldFactory<V> + 'p,
    ) -> Adapter<'p, V> {
        Adapter { plan: self.plan, factory: Some(Box::new(factory)) }
    }

    /// Returns the walked [`ScopePlan`].
    #[must_use]
    pub const fn plan(&self) -> &'p ScopePlan {
        self.plan
    }

    /// Lists every scenario and scenario outline in pre-order.
    ///
    /// # Errors
    ///
    /// [`ScopeError::Orphaned`] if a scenario isn't enclosed by any feature.
    pub fn list_scenarios(&self) -> ScopeResult<Vec<Arc<ScenarioSummary>>> {
        let mut parents = HashMap::<&ScopeId, &Arc<ScopeNode>>::new();
        let mut order = Vec::new();
        let mut stack = vec![self.plan.root()];
        while let Some(node) = stack.pop() {
            order.push(node);
            let children = self.plan.children(node).collect::<Vec<_>>();
            for child in children.into_iter().rev() {
                let _ = parents.insert(&child.id, node);
                stack.push(child);
            }
        }

        order
            .into_iter()
            .filter(|n| n.kind.is_executable())
            .map(|node| {
                let mut ancestors = Vec::new();
                let mut cursor = parents.get(&node.id);
                while let Some(parent) = cursor {
                    if parent.kind != ScopeKind::Root {
                        ancestors.push(Arc::clone(parent));
                    }
                    cursor = parents.get(&parent.id);
                }

                let feature = ancestors
                    .iter()
                    .find(|a| a.kind == ScopeKind::Feature)
                    .cloned()
                    .ok_or_else(|| ScopeError::orphaned(node.describe()))?;
                let rule = ancestors
                    .iter()
                    .find(|a| a.kind == ScopeKind::Rule)
                    .cloned();

                let steps = std::iter::once(node)
                    .chain(&ancestors)
                    .flat_map(|scope| self.plan.steps_of(scope))
                    .chain(self.plan.steps_of(self.plan.root()))
                    .cloned()
                    .collect();

                ancestors.reverse();
                Ok(Arc::new(ScenarioSummary {
                    id: node.id.clone(),
                    scenario: Arc::clone(node),
                    feature,
                    rule,
                    ancestors,
                    steps,
                }))
            })
            .collect()
    }

    /// Creates a fresh world for the given scope through the configured
    /// [`WorldFactory`].
    ///
    /// Worlds are never cached.
    ///
    /// # Errors
    ///
    /// - [`WorldError::NoFactory`] if no [`WorldFactory`] was configured;
    /// - any error of the [`WorldFactory`].
    pub async fn create_world(
        &self,
        scope: &ScopeNode,
        parent: Option<&W>,
    ) -> WorldResult<W> {
        let factory = self
            .factory
            .as_ref()
            .ok_or_else(|| WorldError::no_factory(scope.id.as_str()))?;
        tracing::debug!(scope = %scope.describe(), "creating world");
        factory.create(WorldRequest { scope, parent }).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scope::{Composer, ScopeMetadata};

    fn meta() -> ScopeMetadata {
        ScopeMetadata::new()
    }

    #[test]
    fn lists_scenarios_with_ancestry() {
        let mut composer = Composer::new();
        composer
            .feature("Shop", meta(), |c| {
                let _ = c.given("a shop")?;
                let _ = c.scenario("Browse", meta(), |c| {
                    let _ = c.when("I browse")?;
                    Ok(())
                })?;
                let _ = c.rule("Guests", meta(), |c| {
                    let _ = c.given("a guest")?;
                    let _ = c.scenario_outline("Checkout", meta(), |c| {
                        let _ = c.then("I pay {int}")?;
                        Ok(())
                    })?;
                    Ok(())
                })?;
                Ok(())
            })
            .unwrap();
        let plan = composer.into_plan().unwrap();

        let summaries = Adapter::new(&plan).list_scenarios().unwrap();
        assert_eq!(summaries.len(), 2);

        let browse = &summaries[0];
        assert_eq!(browse.scenario.name, "Browse");
        assert_eq!(browse.feature.name, "Shop");
        assert!(browse.rule.is_none());
        assert_eq!(browse.ancestors.len(), 1);

        let checkout = &summaries[1];
        assert_eq!(checkout.kind(), ScopeKind::ScenarioOutline);
        assert_eq!(checkout.rule.as_ref().unwrap().name, "Guests");
        let names: Vec<_> =
            checkout.ancestors.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["Shop", "Guests"]);
        let steps: Vec<_> = checkout.steps.iter().map(|s| s.source()).collect();
        assert_eq!(steps, ["I pay {int}", "a guest", "a shop"]);
    }

    #[test]
    fn orphaned_scenario_is_an_error() {
        let mut composer = Composer::new();
        let _ = composer
            .create_scope(ScopeKind::Scenario, "lost", meta(), None, |_| Ok(()))
            .unwrap();
        let plan = composer.into_plan().unwrap();

        let err = Adapter::new(&plan).list_scenarios().unwrap_err();
        assert!(matches!(err, ScopeError::Orphaned { .. }));
        assert!(err.to_string().contains("\"lost\""));
    }
}
