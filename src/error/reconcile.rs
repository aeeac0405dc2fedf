// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Errors of pairing Gherkin nodes with registered scopes.

use std::fmt;

use derive_more::with_trait::{Display, Error};

use crate::scope::ScopeKind;

/// Errors of pairing a Gherkin document with registered scopes.
#[derive(Clone, Debug, Error)]
pub enum ReconcileError {
    /// Gherkin node has no registered scope left to pair with.
    MissingScope {
        /// Kind of the scope looked up.
        kind: ScopeKind,

        /// Name of the Gherkin node.
        #[error(not(source))]
        name: String,

        /// Name of the enclosing rule, if any.
        rule: Option<String>,

        /// Name of the enclosing feature.
        feature: String,
    },

    /// Registered scopes were never paired with a Gherkin node.
    Unmatched {
        /// Describe-strings of every leftover scope.
        #[error(not(source))]
        scopes: Vec<String>,
    },

    /// Gherkin rule has no registered rule scope left to pair with.
    MissingRule {
        /// Name of the Gherkin rule.
        #[error(not(source))]
        name: String,

        /// Name of the enclosing feature.
        feature: String,
    },

    /// Gherkin feature has no registered feature scope.
    MissingFeature {
        /// Name of the Gherkin feature.
        #[error(not(source))]
        name: String,
    },
}

/// Result type alias for reconciliation operations.
pub type ReconcileResult<T> = std::result::Result<T, ReconcileError>;

impl ReconcileError {
    /// Creates a new [`ReconcileError::MissingScope`].
    #[must_use]
    pub fn missing_scope(
        kind: ScopeKind,
        name: impl Into<String>,
        rule: Option<&str>,
        feature: impl Into<String>,
    ) -> Self {
        Self::MissingScope {
            kind,
            name: name.into(),
            rule: rule.map(str::to_owned),
            feature: feature.into(),
        }
    }

    /// Creates a new [`ReconcileError::Unmatched`].
    #[must_use]
    pub fn unmatched(scopes: Vec<String>) -> Self {
        Self::Unmatched { scopes }
    }

    /// Creates a new [`ReconcileError::MissingRule`].
    #[must_use]
    pub fn missing_rule(
        name: impl Into<String>,
        feature: impl Into<String>,
    ) -> Self {
        Self::MissingRule { name: name.into(), feature: feature.into() }
    }

    /// Creates a new [`ReconcileError::MissingFeature`].
    #[must_use]
    pub fn missing_feature(name: impl Into<String>) -> Self {
        Self::MissingFeature { name: name.into() }
    }
}

impl fmt::Display for ReconcileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingScope { kind, name, rule, feature } => {
                write!(f, "No registered {kind} scope for \"{name}\"")?;
                if let Some(rule) = rule {
                    write!(f, " in rule \"{rule}\"")?;
                }
                write!(f, " of feature \"{feature}\"")
            }
            Self::Unmatched { scopes } => {
                write!(
                    f,
                    "{} registered scope(s) were not matched to any Gherkin node:",
                    scopes.len(),
                )?;
                for scope in scopes {
                    write!(f, "\n  - {scope}")?;
                }
                Ok(())
            }
            Self::MissingRule { name, feature } => write!(
                f,
                "No registered rule scope for \"{name}\" of feature \
                 \"{feature}\"",
            ),
            Self::MissingFeature { name } => {
                write!(f, "No registered feature scope for \"{name}\"")
            }
        }
    }
}

/// Two executions of one plan claim the same identity.
#[derive(Clone, Debug, Display, Error)]
pub enum IdentityError {
    /// Execution id is already taken.
    #[display("id `{id}` is already taken")]
    DuplicateId {
        /// The duplicated id.
        #[error(not(source))]
        id: String,
    },

    /// Qualified name is already taken.
    #[display("qualified name `{name}` is already taken")]
    DuplicateQualifiedName {
        /// The duplicated qualified name.
        #[error(not(source))]
        name: String,
    },
}

impl IdentityError {
    /// Creates a new [`IdentityError::DuplicateId`].
    #[must_use]
    pub fn duplicate_id(id: impl Into<String>) -> Self {
        Self::DuplicateId { id: id.into() }
    }

    /// Creates a new [`IdentityError::DuplicateQualifiedName`].
    #[must_use]
    pub fn duplicate_qualified_name(name: impl Into<String>) -> Self {
        Self::DuplicateQualifiedName { name: name.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_scope_with_rule() {
        let err = ReconcileError::missing_scope(
            ScopeKind::Scenario,
            "Checkout",
            Some("Guests"),
            "Shop",
        );
        assert_eq!(
            err.to_string(),
            "No registered scenario scope for \"Checkout\" in rule \"Guests\" \
             of feature \"Shop\"",
        );
    }

    #[test]
    fn missing_scope_without_rule() {
        let err = ReconcileError::missing_scope(
            ScopeKind::ScenarioOutline,
            "eating",
            None,
            "Shop",
        );
        assert_eq!(
            err.to_string(),
            "No registered scenarioOutline scope for \"eating\" of feature \
             \"Shop\"",
        );
    }

    #[test]
    fn unmatched_lists_every_leftover() {
        let err = ReconcileError::unmatched(vec![
            "scenario \"X\" [scenario-2]".into(),
            "scenario \"Y\" [scenario-3]".into(),
        ]);
        let msg = err.to_string();

        assert!(msg.starts_with("2 registered scope(s) were not matched"));
        assert!(msg.contains("\n  - scenario \"X\" [scenario-2]"));
        assert!(msg.contains("\n  - scenario \"Y\" [scenario-3]"));
    }
}
