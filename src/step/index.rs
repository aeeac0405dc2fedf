// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Resolution of Gherkin steps against step definitions.

use std::sync::Arc;

use super::ParameterRegistry;
use crate::{
    document::Step,
    error::{StepError, StepResult, step::UnmatchedStep},
    fuzzy::{self, Report, Suggestions},
    scope::StepDefinition,
};

/// Default maximum number of "did you mean" suggestions.
pub const DEFAULT_MAX_SUGGESTIONS: usize = 5;

/// Names of the Gherkin nodes enclosing a resolved step, used to describe a
/// miss.
#[derive(Clone, Copy, Debug)]
pub struct StepContext<'a> {
    /// Name of the enclosing feature.
    pub feature: &'a str,

    /// Name of the enclosing rule, if any.
    pub rule: Option<&'a str>,

    /// Name of the enclosing scenario outline, if any.
    pub outline: Option<&'a str>,

    /// Name of the enclosing scenario (or compiled example).
    pub scenario: &'a str,
}

/// Ordered step definitions visible to a scenario.
#[derive(Clone, Copy, Debug)]
pub struct StepIndex<'d> {
    definitions: &'d [Arc<StepDefinition>],
    params: &'d ParameterRegistry,
    max_suggestions: usize,
}

impl<'d> StepIndex<'d> {
    /// Creates a new [`StepIndex`] over the given definitions, in declaration
    /// order.
    #[must_use]
    pub const fn new(
        definitions: &'d [Arc<StepDefinition>],
        params: &'d ParameterRegistry,
    ) -> Self {
        Self { definitions, params, max_suggestions: DEFAULT_MAX_SUGGESTIONS }
    }

    /// Sets the maximum number of suggestions of a miss.
    #[must_use]
    pub const fn max_suggestions(mut self, max: usize) -> Self {
        self.max_suggestions = max;
        self
    }

    /// Finds the first definition whose keyword is compatible with the given
    /// step and whose pattern matches its text.
    ///
    /// # Errors
    ///
    /// If a pattern checked along the way fails to compile.
    pub fn find(&self, step: &Step) -> StepResult<Option<&'d Arc<StepDefinition>>> {
        for def in self.definitions {
            if def.keyword.accepts(step.ty, step.conjunction)
                && def.is_match(&step.text, self.params)?
            {
                return Ok(Some(def));
            }
        }
        Ok(None)
    }

    /// Ranks every definition by similarity to the given step.
    #[must_use]
    pub fn suggest(&self, step: &Step) -> Suggestions {
        fuzzy::rank(&step.text, step.ty, self.definitions, self.max_suggestions)
    }

    /// Resolves the given step into its definition.
    ///
    /// # Errors
    ///
    /// - [`StepError::NoMatch`] with suggestions if nothing matches;
    /// - [`StepError::InvalidPattern`] if a pattern fails to compile.
    pub fn resolve(
        &self,
        step: &Step,
        ctx: StepContext<'_>,
    ) -> StepResult<&'d Arc<StepDefinition>> {
        if let Some(def) = self.find(step)? {
            tracing::debug!(
                step = %step.describe(),
                definition = %def.id,
                pattern = %def.source(),
                "step resolved",
            );
            return Ok(def);
        }

        let report = Report::new(format!("Step: {}", step.describe()))
            .with_suggestions(self.suggest(step));
        let report = Report::new(format!("Scenario: {}", ctx.scenario))
            .with_child(report);
        let report = match ctx.outline {
            Some(outline) => Report::new(format!("Scenario Outline: {outline}"))
                .with_child(report),
            None => report,
        };
        let report = match ctx.rule {
            Some(rule) => Report::new(format!("Rule: {rule}")).with_child(report),
            None => report,
        };
        let report =
            Report::new(format!("Feature: {}", ctx.feature)).with_child(report);

        Err(StepError::no_match(UnmatchedStep {
            step: step.describe(),
            scenario: ctx.scenario.to_owned(),
            outline: ctx.outline.map(str::to_owned),
            rule: ctx.rule.map(str::to_owned),
            feature: ctx.feature.to_owned(),
            report,
        }))
    }
}

#[cfg(test)]
mod tests {
    use gherkin::StepType;

    use super::*;
    use crate::{
        ExecutionMode,
        scope::{DefinitionOptions, StepId, StepKeyword},
        step::StepExpression,
    };

    fn def(n: usize, keyword: StepKeyword, expr: &str) -> Arc<StepDefinition> {
        Arc::new(StepDefinition::new(
            StepId::new(format!("step-{n}")),
            keyword,
            StepExpression::expression(expr),
            DefinitionOptions::new().resolve(ExecutionMode::Default),
            None,
        ))
    }

    fn step(keyword: &str, ty: StepType, text: &str) -> Step {
        Step {
            keyword: keyword.into(),
            ty,
            conjunction: matches!(keyword, "And" | "But"),
            text: text.into(),
            docstring: None,
            table: None,
            line: 1,
        }
    }

    const CTX: StepContext<'static> = StepContext {
        feature: "Fruit",
        rule: Some("Bowls"),
        outline: None,
        scenario: "eating",
    };

    #[test]
    fn first_compatible_match_wins() {
        let defs = [
            def(1, StepKeyword::When, "I have {int} grapes"),
            def(2, StepKeyword::Given, "I have {int} grapes"),
            def(3, StepKeyword::Given, "I have {word} grapes"),
        ];
        let params = ParameterRegistry::new();
        let index = StepIndex::new(&defs, &params);

        let found = index
            .resolve(&step("Given", StepType::Given, "I have 2 grapes"), CTX)
            .unwrap();
        assert_eq!(found.id.as_str(), "step-2");
    }

    #[test]
    fn conjunction_steps_accept_any_keyword() {
        let defs = [def(1, StepKeyword::Then, "it is {word}")];
        let params = ParameterRegistry::new();
        let index = StepIndex::new(&defs, &params);

        let found = index.find(&step("And", StepType::Given, "it is ripe"));
        assert!(found.unwrap().is_some());
    }

    #[test]
    fn miss_carries_nested_suggestions() {
        let defs = [def(1, StepKeyword::Given, "I have {int} blue grapes in my {word}")];
        let params = ParameterRegistry::new();
        let index = StepIndex::new(&defs, &params);

        let err = index
            .resolve(
                &step("Given", StepType::Given, "I have 2 grapes in my bowl"),
                CTX,
            )
            .unwrap_err();

        let report = err.report().unwrap();
        assert_eq!(report.heading(), "Feature: Fruit");
        let rule = &report.children()[0];
        assert_eq!(rule.heading(), "Rule: Bowls");
        let scenario = &rule.children()[0];
        let step = &scenario.children()[0];
        let suggestion = &step.suggestions().unwrap().same_type[0];
        assert_eq!(suggestion.merged, "I have 2 blue grapes in my bowl");
        assert!(suggestion.distance > 0);

        let msg = err.to_string();
        assert!(msg.contains("`Given I have 2 grapes in my bowl`"));
        assert!(msg.contains("Did you mean:"));
    }

    #[test]
    fn invalid_pattern_surfaces() {
        let defs = [def(1, StepKeyword::Given, "I have {fruit}")];
        let params = ParameterRegistry::new();
        let index = StepIndex::new(&defs, &params);

        let err = index
            .resolve(&step("Given", StepType::Given, "I have grapes"), CTX)
            .unwrap_err();
        assert!(matches!(err, StepError::InvalidPattern { .. }));
    }
}
