// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Reconciliation of a Gherkin [`Feature`] with registered scopes.
//!
//! Gherkin nodes are walked in document order, each one paired with the
//! oldest not yet paired scope of the same kind, normalized name and
//! enclosing rule. Same-named siblings are therefore paired by position.

use std::{collections::HashMap, iter, sync::Arc};

use itertools::Itertools as _;

use super::{
    FeatureChild, FeatureNode, OutlineNode, RuleChild, RuleNode, TestPlan,
    bucket::{BucketKey, Buckets},
    execution::{ExampleGroupInfo, ExamplePayload, Execution, GherkinSource},
    qualified,
};
use crate::{
    adapter::ScenarioSummary,
    document::{
        Feature, FeatureElement, Rule, RuleElement, Scenario, ScenarioOutline,
        Step,
    },
    error::{
        IdentityError, ReconcileError, ReconcileResult, Result, StepResult,
    },
    scope::{ScopeKind, ScopeNode, StepDefinition, normalize_name},
    step::{DEFAULT_MAX_SUGGESTIONS, ParameterRegistry, StepContext, StepIndex},
};

/// Builder of a [`TestPlan`] out of a single Gherkin [`Feature`] and the
/// [`ScenarioSummary`]s of its feature scope.
#[derive(Debug)]
pub struct PlanBuilder<'a> {
    document: &'a Feature,
    feature_scope: Arc<ScopeNode>,
    summaries: Vec<Arc<ScenarioSummary>>,
    parameters: &'a ParameterRegistry,
    max_suggestions: usize,
}

/// Gherkin [`Rule`] along with its paired scope.
#[derive(Clone, Copy)]
struct RuleContext<'r> {
    gherkin: &'r Rule,
    scope: &'r Arc<ScopeNode>,
}

/// Mutable state of a single [`PlanBuilder::build()`].
#[derive(Default)]
struct Assembly {
    scenarios: Buckets<BucketKey, Arc<ScenarioSummary>>,
    rules: Buckets<String, Arc<ScopeNode>>,
    executions: Vec<Arc<Execution>>,
    by_id: HashMap<String, Arc<Execution>>,
    by_qualified_name: HashMap<String, Arc<Execution>>,
}

impl Assembly {
    fn new(summaries: &[Arc<ScenarioSummary>]) -> Self {
        Self {
            scenarios: Buckets::scenarios(summaries.iter().cloned()),
            rules: Buckets::rules(summaries),
            ..Self::default()
        }
    }

    fn register(
        &mut self,
        execution: Execution,
    ) -> std::result::Result<Arc<Execution>, IdentityError> {
        if self.by_id.contains_key(&execution.id) {
            return Err(IdentityError::duplicate_id(&execution.id));
        }
        if self.by_qualified_name.contains_key(&execution.qualified_name) {
            return Err(IdentityError::duplicate_qualified_name(
                &execution.qualified_name,
            ));
        }

        let execution = Arc::new(execution);
        drop(self.by_id.insert(execution.id.clone(), Arc::clone(&execution)));
        drop(self.by_qualified_name.insert(
            execution.qualified_name.clone(),
            Arc::clone(&execution),
        ));
        self.executions.push(Arc::clone(&execution));
        Ok(execution)
    }
}

impl<'a> PlanBuilder<'a> {
    /// Creates a new [`PlanBuilder`].
    ///
    /// [`ScenarioSummary`]s of other features than the given `feature_scope`
    /// are ignored.
    #[must_use]
    pub fn new(
        document: &'a Feature,
        feature_scope: Arc<ScopeNode>,
        summaries: impl IntoIterator<Item = Arc<ScenarioSummary>>,
        parameters: &'a ParameterRegistry,
    ) -> Self {
        let summaries = summaries
            .into_iter()
            .filter(|s| s.feature.id == feature_scope.id)
            .collect();
        Self {
            document,
            feature_scope,
            summaries,
            parameters,
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
        }
    }

    /// Sets the maximum number of "did you mean" suggestions of an unmatched
    /// step.
    #[must_use]
    pub fn max_suggestions(mut self, max: usize) -> Self {
        self.max_suggestions = max;
        self
    }

    /// Builds a new [`TestPlan`].
    ///
    /// Every call starts over, so building twice yields equal plans.
    ///
    /// # Errors
    ///
    /// - [`ReconcileError`] if a Gherkin node has no scope to pair with, or a
    ///   scope is left unpaired;
    /// - [`StepError`] if a Gherkin step doesn't resolve;
    /// - [`IdentityError`] if two executions share an id or a qualified name.
    ///
    /// [`StepError`]: crate::error::StepError
    pub fn build(&self) -> Result<TestPlan> {
        let doc = self.document;
        let mut asm = Assembly::new(&self.summaries);

        let mut children = Vec::with_capacity(doc.elements.len());
        for element in &doc.elements {
            children.push(match element {
                FeatureElement::Scenario(s) => {
                    FeatureChild::Scenario(self.scenario(&mut asm, s, None)?)
                }
                FeatureElement::Outline(o) => {
                    FeatureChild::Outline(self.outline(&mut asm, o, None)?)
                }
                FeatureElement::Rule(r) => {
                    FeatureChild::Rule(self.rule(&mut asm, r)?)
                }
            });
        }

        let Assembly { scenarios, executions, by_id, by_qualified_name, .. } =
            asm;
        let leftovers = scenarios.into_leftovers();
        if !leftovers.is_empty() {
            return Err(ReconcileError::unmatched(
                leftovers.iter().map(|s| s.scenario.describe()).collect(),
            )
            .into());
        }

        tracing::info!(
            feature = %doc.name,
            executions = executions.len(),
            "test plan built",
        );

        Ok(TestPlan {
            feature: FeatureNode {
                keyword: doc.keyword.clone(),
                name: doc.name.clone(),
                tags: doc.tags.clone(),
                scope: Arc::clone(&self.feature_scope),
                children,
            },
            executions,
            by_id,
            by_qualified_name,
        })
    }

    fn rule(&self, asm: &mut Assembly, rule: &Rule) -> Result<RuleNode> {
        let Some(scope) = asm.rules.take(&normalize_name(&rule.name)) else {
            if rule.elements.is_empty() {
                return Ok(RuleNode {
                    keyword: rule.keyword.clone(),
                    name: rule.name.clone(),
                    tags: rule.tags.clone(),
                    scope: None,
                    children: vec![],
                });
            }
            return Err(ReconcileError::missing_rule(
                &rule.name,
                &self.document.name,
            )
            .into());
        };
        tracing::debug!(rule = %rule.name, scope = %scope.id, "paired rule");

        let ctx = RuleContext { gherkin: rule, scope: &scope };
        let mut children = Vec::with_capacity(rule.elements.len());
        for element in &rule.elements {
            children.push(match element {
                RuleElement::Scenario(s) => {
                    RuleChild::Scenario(self.scenario(asm, s, Some(ctx))?)
                }
                RuleElement::Outline(o) => {
                    RuleChild::Outline(self.outline(asm, o, Some(ctx))?)
                }
            });
        }

        Ok(RuleNode {
            keyword: rule.keyword.clone(),
            name: rule.name.clone(),
            tags: rule.tags.clone(),
            scope: Some(scope),
            children,
        })
    }

    fn scenario(
        &self,
        asm: &mut Assembly,
        scenario: &Scenario,
        rule: Option<RuleContext<'_>>,
    ) -> Result<Arc<Execution>> {
        let summary =
            self.pair(asm, ScopeKind::Scenario, &scenario.name, rule)?;

        let gherkin_steps = self.with_backgrounds(rule, &scenario.steps);
        let steps = self.resolve(&summary, &gherkin_steps, StepContext {
            feature: &self.document.name,
            rule: rule.map(|r| r.gherkin.name.as_str()),
            outline: None,
            scenario: &scenario.name,
        })?;
        let tags = qualified::merge_tags([
            self.document.tags.as_slice(),
            rule.map_or(&[][..], |r| r.gherkin.tags.as_slice()),
            scenario.tags.as_slice(),
            summary.scenario.tags.as_slice(),
        ]);
        let id = summary.id.to_string();
        let qualified_name =
            self.qualified_name(rule, &scenario.keyword, &scenario.name, &id);

        Ok(asm.register(Execution::new(
            id,
            scenario.keyword.clone(),
            qualified_name,
            tags,
            summary,
            GherkinSource::Scenario(scenario.clone()),
            gherkin_steps,
            steps,
            None,
        ))?)
    }

    fn outline(
        &self,
        asm: &mut Assembly,
        outline: &ScenarioOutline,
        rule: Option<RuleContext<'_>>,
    ) -> Result<OutlineNode> {
        let summary =
            self.pair(asm, ScopeKind::ScenarioOutline, &outline.name, rule)?;

        let mut examples = Vec::with_capacity(outline.compiled.len());
        for group in &outline.example_groups {
            let compiled = outline
                .compiled
                .iter()
                .filter(|c| c.example_group_id == group.id)
                .sorted_by_key(|c| c.example_index);
            for (position, compiled) in compiled.enumerate() {
                let row = group.rows.get(position).map_or(&[][..], Vec::as_slice);
                let gherkin_steps =
                    self.with_backgrounds(rule, &compiled.steps);
                let steps =
                    self.resolve(&summary, &gherkin_steps, StepContext {
                        feature: &self.document.name,
                        rule: rule.map(|r| r.gherkin.name.as_str()),
                        outline: Some(&outline.name),
                        scenario: &compiled.name,
                    })?;
                let tags = qualified::merge_tags([
                    self.document.tags.as_slice(),
                    rule.map_or(&[][..], |r| r.gherkin.tags.as_slice()),
                    outline.tags.as_slice(),
                    group.tags.as_slice(),
                    compiled.tags.as_slice(),
                    summary.scenario.tags.as_slice(),
                ]);
                let id = qualified::example_id(
                    summary.id.as_str(),
                    compiled.example_index,
                );
                let qualified_name = self.qualified_name(
                    rule,
                    &outline.keyword,
                    &compiled.name,
                    &id,
                );
                let example = ExamplePayload {
                    group: ExampleGroupInfo {
                        id: group.id.clone(),
                        name: group.name.clone(),
                        tags: group.tags.clone(),
                    },
                    index: compiled.example_index,
                    values: group
                        .header
                        .iter()
                        .cloned()
                        .zip(row.iter().cloned())
                        .collect(),
                };

                examples.push(asm.register(Execution::new(
                    id,
                    outline.keyword.clone(),
                    qualified_name,
                    tags,
                    Arc::clone(&summary),
                    GherkinSource::Example(compiled.clone()),
                    gherkin_steps,
                    steps,
                    Some(example),
                ))?);
            }
        }

        Ok(OutlineNode {
            keyword: outline.keyword.clone(),
            name: outline.name.clone(),
            tags: outline.tags.clone(),
            scope: Arc::clone(&summary.scenario),
            examples,
        })
    }

    /// Dequeues the scope to pair the given Gherkin node with.
    fn pair(
        &self,
        asm: &mut Assembly,
        kind: ScopeKind,
        name: &str,
        rule: Option<RuleContext<'_>>,
    ) -> ReconcileResult<Arc<ScenarioSummary>> {
        let key = BucketKey::new(kind, name, rule.map(|r| &r.scope.id));
        let summary = asm.scenarios.take(&key).ok_or_else(|| {
            ReconcileError::missing_scope(
                kind,
                name,
                rule.map(|r| r.gherkin.name.as_str()),
                &self.document.name,
            )
        })?;
        tracing::debug!(%kind, name, scope = %summary.id, "paired scenario");
        Ok(summary)
    }

    /// Prepends the feature and rule backgrounds to the given steps.
    fn with_backgrounds(
        &self,
        rule: Option<RuleContext<'_>>,
        steps: &[Step],
    ) -> Vec<Step> {
        self.document
            .background
            .iter()
            .chain(rule.and_then(|r| r.gherkin.background.as_ref()))
            .flat_map(|bg| &bg.steps)
            .chain(steps)
            .cloned()
            .collect()
    }

    fn resolve(
        &self,
        summary: &ScenarioSummary,
        steps: &[Step],
        ctx: StepContext<'_>,
    ) -> StepResult<Vec<Arc<StepDefinition>>> {
        let index = StepIndex::new(&summary.steps, self.parameters)
            .max_suggestions(self.max_suggestions);
        steps.iter().map(|step| index.resolve(step, ctx).cloned()).collect()
    }

    fn qualified_name(
        &self,
        rule: Option<RuleContext<'_>>,
        keyword: &str,
        name: &str,
        id: &str,
    ) -> String {
        let doc = self.document;
        qualified::join(
            iter::once(qualified::segment(
                &doc.keyword,
                &doc.name,
                self.feature_scope.id.as_str(),
            ))
            .chain(rule.map(|r| {
                qualified::segment(
                    &r.gherkin.keyword,
                    &r.gherkin.name,
                    r.scope.id.as_str(),
                )
            }))
            .chain(iter::once(qualified::segment(keyword, name, id))),
        )
    }
}
