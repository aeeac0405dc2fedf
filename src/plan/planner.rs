// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! [`Planner`] facade.

use std::sync::Arc;

use super::{PlanBuilder, TestPlan};
use crate::{
    adapter::Adapter,
    config::PlanConfig,
    document::Feature,
    error::{PlanError, ReconcileError, Result},
    scope::{Composer, ScopeKind, ScopePlan, normalize_name},
};

/// Builds [`TestPlan`]s out of Gherkin [`Feature`]s and a [`ScopePlan`]
/// according to a [`PlanConfig`].
///
/// # Example
///
/// ```rust
/// # use cucumber_plan::{PlanConfig, Planner, ScopeMetadata, document::Feature};
/// #
/// let planner = Planner::new(PlanConfig::default());
///
/// let mut composer = planner.composer();
/// composer.feature("Greeting", ScopeMetadata::new(), |c| {
///     c.scenario("says hi", ScopeMetadata::new(), |c| {
///         c.then("it says {string}")?;
///         Ok(())
///     })?;
///     Ok(())
/// })?;
/// let scopes = composer.into_plan()?;
///
/// let doc = Feature::parse_str(
///     "Feature: Greeting\n  Scenario: says hi\n    Then it says \"hi\"\n",
/// )?;
/// let plan = planner.plan(&doc, &scopes)?;
///
/// assert_eq!(plan.len(), 1);
/// # Ok::<_, cucumber_plan::error::PlanError>(())
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct Planner {
    config: PlanConfig,
}

impl Planner {
    /// Creates a new [`Planner`] with the given [`PlanConfig`].
    #[must_use]
    pub const fn new(config: PlanConfig) -> Self {
        Self { config }
    }

    /// Returns the [`PlanConfig`] of this [`Planner`].
    #[must_use]
    pub const fn config(&self) -> &PlanConfig {
        &self.config
    }

    /// Creates a new [`Composer`] resolving unset execution modes to the
    /// configured default.
    #[must_use]
    pub fn composer(&self) -> Composer {
        Composer::new().default_mode(self.config.default_mode)
    }

    /// Builds a [`TestPlan`] of the given document against the feature scope
    /// of the same normalized name.
    ///
    /// # Errors
    ///
    /// - [`ScopeError`] if a scenario scope isn't enclosed by a feature;
    /// - [`ReconcileError::MissingFeature`] if no feature scope has the
    ///   document's name;
    /// - any error of [`PlanBuilder::build()`].
    ///
    /// [`ScopeError`]: crate::error::ScopeError
    pub fn plan(&self, document: &Feature, scopes: &ScopePlan) -> Result<TestPlan> {
        let summaries = Adapter::new(scopes).list_scenarios()?;

        let name = normalize_name(&document.name);
        let feature = scopes
            .children(scopes.root())
            .find(|s| s.kind == ScopeKind::Feature && normalize_name(&s.name) == name)
            .ok_or_else(|| ReconcileError::missing_feature(&document.name))?;
        tracing::debug!(
            feature = %document.name,
            scope = %feature.id,
            "paired feature",
        );

        PlanBuilder::new(
            document,
            Arc::clone(feature),
            summaries,
            scopes.parameters(),
        )
        .max_suggestions(self.config.max_suggestions)
        .build()
    }

    /// Renders the given [`PlanError`] for a console, step suggestions styled
    /// with the configured coloring.
    #[must_use]
    pub fn render_error(&self, err: &PlanError) -> String {
        match err {
            PlanError::Step(e) => e.render(self.config.coloring),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ExecutionMode, ScopeMetadata,
        fuzzy::Coloring,
    };

    fn scopes(planner: &Planner) -> ScopePlan {
        let mut c = planner.composer();
        let _ = c
            .feature("  Door  bell ", ScopeMetadata::new(), |c| {
                let _ = c.scenario("rings", ScopeMetadata::new(), |c| {
                    let _ = c.when("I press the button")?;
                    Ok(())
                })?;
                Ok(())
            })
            .unwrap();
        c.into_plan().unwrap()
    }

    #[test]
    fn finds_feature_by_normalized_name() {
        let planner = Planner::new(PlanConfig {
            default_mode: ExecutionMode::Concurrent,
            ..PlanConfig::default()
        });
        let scopes = scopes(&planner);
        let doc = Feature::parse_str(
            "Feature: Door bell\n  Scenario: rings\n    When I press the button\n",
        )
        .unwrap();

        let plan = planner.plan(&doc, &scopes).unwrap();
        assert_eq!(plan.len(), 1);
        assert_eq!(plan.list_executables()[0].mode, ExecutionMode::Concurrent);
    }

    #[test]
    fn missing_feature() {
        let planner = Planner::default();
        let scopes = scopes(&planner);
        let doc = Feature::parse_str("Feature: Window\n").unwrap();

        let err = planner.plan(&doc, &scopes).unwrap_err();
        assert!(matches!(
            err,
            PlanError::Reconcile(ReconcileError::MissingFeature { .. }),
        ));
    }

    #[test]
    fn renders_step_errors_with_suggestions() {
        let planner = Planner::new(PlanConfig {
            coloring: Coloring::Never,
            max_suggestions: 1,
            ..PlanConfig::default()
        });
        let scopes = scopes(&planner);
        let doc = Feature::parse_str(
            "Feature: Door bell\n  Scenario: rings\n    When I press the bell\n",
        )
        .unwrap();

        let err = planner.plan(&doc, &scopes).unwrap_err();
        assert!(err.is_step_resolution());
        let rendered = planner.render_error(&err);
        assert!(rendered.contains("`When I press the bell`"), "{rendered}");
        assert!(rendered.contains("When I press the button"), "{rendered}");
    }
}
