// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Step resolution errors.

use std::fmt;

use derive_more::with_trait::Error;

use crate::fuzzy::{Coloring, Report};

/// Errors of resolving a Gherkin step against registered step definitions.
#[derive(Clone, Debug, Error)]
pub enum StepError {
    /// No step definition of a compatible keyword matched the step text.
    NoMatch(#[error(not(source))] Box<UnmatchedStep>),

    /// Step definition pattern failed to compile.
    InvalidPattern {
        /// Source of the pattern.
        #[error(not(source))]
        pattern: String,

        /// Why compilation failed.
        reason: String,
    },
}

/// Result type alias for step operations.
pub type StepResult<T> = std::result::Result<T, StepError>;

/// Context of a Gherkin step no step definition matched.
#[derive(Clone, Debug)]
pub struct UnmatchedStep {
    /// Keyword and text of the step, e.g. `Given I have 2 grapes`.
    pub step: String,

    /// Name of the enclosing scenario (or compiled example).
    pub scenario: String,

    /// Name of the enclosing scenario outline, if any.
    pub outline: Option<String>,

    /// Name of the enclosing rule, if any.
    pub rule: Option<String>,

    /// Name of the enclosing feature.
    pub feature: String,

    /// "Did you mean" suggestions, nested under the step's headings.
    pub report: Report,
}

impl StepError {
    /// Creates a new [`StepError::NoMatch`].
    #[must_use]
    pub fn no_match(unmatched: UnmatchedStep) -> Self {
        Self::NoMatch(Box::new(unmatched))
    }

    /// Creates a new [`StepError::InvalidPattern`].
    #[must_use]
    pub fn invalid_pattern(
        pattern: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidPattern { pattern: pattern.into(), reason: reason.into() }
    }

    /// Returns the unmatched step text, if this is a [`StepError::NoMatch`].
    #[must_use]
    pub fn step_text(&self) -> Option<&str> {
        match self {
            Self::NoMatch(unmatched) => Some(&unmatched.step),
            Self::InvalidPattern { .. } => None,
        }
    }

    /// Returns the suggestions [`Report`], if this is a
    /// [`StepError::NoMatch`].
    #[must_use]
    pub fn report(&self) -> Option<&Report> {
        match self {
            Self::NoMatch(unmatched) => Some(&unmatched.report),
            Self::InvalidPattern { .. } => None,
        }
    }

    /// Renders this error with the given [`Coloring`] applied to the
    /// suggestions.
    #[must_use]
    pub fn render(&self, coloring: Coloring) -> String {
        match self {
            Self::NoMatch(unmatched) => {
                format!("{}\n{}", unmatched.headline(), unmatched.report.render(coloring))
            }
            Self::InvalidPattern { .. } => self.to_string(),
        }
    }
}

impl UnmatchedStep {
    fn headline(&self) -> String {
        let mut out = format!(
            "No step definition matched `{}` in scenario \"{}\"",
            self.step, self.scenario,
        );
        if let Some(outline) = &self.outline {
            out.push_str(&format!(" of outline \"{outline}\""));
        }
        if let Some(rule) = &self.rule {
            out.push_str(&format!(" in rule \"{rule}\""));
        }
        out.push_str(&format!(" of feature \"{}\"", self.feature));
        out
    }
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoMatch(unmatched) => {
                write!(f, "{}", unmatched.headline())?;
                if !unmatched.report.is_empty() {
                    write!(f, "\n{}", unmatched.report)?;
                }
                Ok(())
            }
            Self::InvalidPattern { pattern, reason } => {
                write!(f, "Invalid step pattern `{pattern}`: {reason}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unmatched(outline: Option<&str>, rule: Option<&str>) -> UnmatchedStep {
        UnmatchedStep {
            step: "Given I have 2 grapes".into(),
            scenario: "eating".into(),
            outline: outline.map(Into::into),
            rule: rule.map(Into::into),
            feature: "Fruit".into(),
            report: Report::new("Feature: Fruit"),
        }
    }

    #[test]
    fn no_match_names_every_enclosing_node() {
        let err = StepError::no_match(unmatched(Some("eat <n>"), Some("Bowls")));
        let msg = err.to_string();

        assert!(msg.contains("`Given I have 2 grapes`"));
        assert!(msg.contains("scenario \"eating\""));
        assert!(msg.contains("outline \"eat <n>\""));
        assert!(msg.contains("rule \"Bowls\""));
        assert!(msg.contains("feature \"Fruit\""));
        assert_eq!(err.step_text(), Some("Given I have 2 grapes"));
    }

    #[test]
    fn no_match_omits_absent_outline_and_rule() {
        let msg = StepError::no_match(unmatched(None, None)).to_string();

        assert!(!msg.contains("outline"));
        assert!(!msg.contains("rule"));
    }

    #[test]
    fn invalid_pattern_display() {
        let err = StepError::invalid_pattern("{int", "unfinished parameter");

        assert_eq!(
            err.to_string(),
            "Invalid step pattern `{int`: unfinished parameter",
        );
        assert!(err.step_text().is_none());
        assert!(err.report().is_none());
    }
}
