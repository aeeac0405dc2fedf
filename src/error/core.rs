// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Top-level [`PlanError`].

use derive_more::with_trait::{Display, Error, From};

use super::{
    DocumentError, IdentityError, ReconcileError, ScopeError, StepError,
    WorldError,
};

/// Top-level error of composing scopes and building a [`TestPlan`].
///
/// [`TestPlan`]: crate::TestPlan
#[derive(Debug, Display, Error, From)]
pub enum PlanError {
    /// Invalid scope nesting or identity while composing.
    #[display("Invalid scope structure: {_0}")]
    Scope(ScopeError),

    /// Gherkin nodes and registered scopes don't pair up.
    #[display("Reconciliation failed: {_0}")]
    Reconcile(ReconcileError),

    /// Two executions claim the same identity.
    #[display("Duplicate execution identity: {_0}")]
    Identity(IdentityError),

    /// A Gherkin step doesn't resolve to any step definition.
    #[display("Step resolution failed: {_0}")]
    Step(StepError),

    /// World creation failed.
    #[display("World creation failed: {_0}")]
    World(WorldError),

    /// Gherkin document couldn't be converted.
    #[display("Invalid Gherkin document: {_0}")]
    Document(DocumentError),
}

/// Result type alias using [`PlanError`].
pub type Result<T> = std::result::Result<T, PlanError>;

impl PlanError {
    /// Indicates whether this error was raised while resolving a step, so it
    /// carries "did you mean" suggestions.
    #[must_use]
    pub const fn is_step_resolution(&self) -> bool {
        matches!(self, Self::Step(StepError::NoMatch(_)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scope::ScopeKind;

    #[test]
    fn display_prefixes_domain() {
        let err = PlanError::from(ScopeError::invalid_parent(
            ScopeKind::Scenario,
            "adds",
            ScopeKind::Root,
        ));
        let msg = err.to_string();
        assert!(msg.starts_with("Invalid scope structure: "));
        assert!(msg.contains("scenario"));
        assert!(msg.contains("root"));
    }

    #[test]
    fn identity_error_display() {
        let err = PlanError::from(IdentityError::duplicate_qualified_name(
            "Feature: A [feature-1]",
        ));
        assert!(err.to_string().contains("Duplicate execution identity"));
        assert!(err.to_string().contains("Feature: A [feature-1]"));
        assert!(!err.is_step_resolution());
    }
}
