// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Patterns of step definitions.

use cucumber_expressions::Expression;
use derive_more::with_trait::Display;
use regex::Regex;

use super::{HashableRegex, ParameterRegistry};
use crate::error::{StepError, StepResult};

/// Pattern a [`StepDefinition`] matches step text with.
///
/// [`StepDefinition`]: crate::StepDefinition
#[derive(Clone, Debug, Display, Eq, Hash, PartialEq)]
pub enum StepExpression {
    /// [Cucumber Expression][0], like `I have {int} cucumbers`.
    ///
    /// Compiled into a regex anchored at both ends.
    ///
    /// [0]: https://github.com/cucumber/cucumber-expressions#readme
    #[display("{_0}")]
    Expression(String),

    /// Regular expression, matched as is (unanchored unless the pattern
    /// anchors itself).
    #[display("{_0}")]
    Regex(HashableRegex),
}

impl StepExpression {
    /// Creates a new [`StepExpression::Expression`].
    ///
    /// Parsing is deferred until the first match.
    #[must_use]
    pub fn expression(source: impl Into<String>) -> Self {
        Self::Expression(source.into())
    }

    /// Creates a new [`StepExpression::Regex`].
    ///
    /// # Errors
    ///
    /// If the pattern is not a valid [`Regex`].
    pub fn regex(pattern: &str) -> StepResult<Self> {
        HashableRegex::new(pattern)
            .map(Self::Regex)
            .map_err(|e| StepError::invalid_pattern(pattern, e.to_string()))
    }

    /// Returns the source text of this pattern.
    #[must_use]
    pub fn source(&self) -> &str {
        match self {
            Self::Expression(s) => s,
            Self::Regex(re) => re.as_str(),
        }
    }

    /// Indicates whether this is a [`StepExpression::Expression`].
    #[must_use]
    pub const fn is_expression(&self) -> bool {
        matches!(self, Self::Expression(_))
    }

    /// Compiles this pattern into a [`Regex`], resolving custom parameter
    /// types through the given [`ParameterRegistry`].
    ///
    /// # Errors
    ///
    /// If the expression is malformed or refers to an unknown parameter type.
    pub fn compile(&self, params: &ParameterRegistry) -> StepResult<Regex> {
        match self {
            Self::Regex(re) => Ok(re.inner().clone()),
            Self::Expression(src) => {
                Expression::regex_with_parameters(src, params.lookup())
                    .map_err(|e| {
                        let reason = e.to_string();
                        tracing::warn!(
                            pattern = %src,
                            reason = %reason,
                            "invalid step pattern",
                        );
                        StepError::invalid_pattern(src.clone(), reason)
                    })
            }
        }
    }
}

impl From<&str> for StepExpression {
    fn from(source: &str) -> Self {
        Self::expression(source)
    }
}

impl From<String> for StepExpression {
    fn from(source: String) -> Self {
        Self::Expression(source)
    }
}

impl From<Regex> for StepExpression {
    fn from(re: Regex) -> Self {
        Self::Regex(re.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compiles_builtin_parameters() {
        let re = StepExpression::expression("I have {int} cucumbers in my {word}")
            .compile(&ParameterRegistry::new())
            .unwrap();

        assert!(re.is_match("I have 12 cucumbers in my belly"));
        assert!(!re.is_match("I have many cucumbers in my belly"));
        assert!(!re.is_match("Now I have 12 cucumbers in my belly"));
    }

    #[test]
    fn compiles_custom_parameters() {
        let mut params = ParameterRegistry::new();
        params.define("color", "red|green|blue").unwrap();

        let re = StepExpression::expression("a {color} ball")
            .compile(&params)
            .unwrap();

        assert!(re.is_match("a green ball"));
        assert!(!re.is_match("a purple ball"));
    }

    #[test]
    fn string_accepts_quoted_and_bare_words() {
        let re = StepExpression::expression("I have {int} grapes in my {string}")
            .compile(&ParameterRegistry::new())
            .unwrap();

        assert!(re.is_match("I have 2 grapes in my bowl"));
        assert!(re.is_match("I have 2 grapes in my \"big bowl\""));
        assert!(re.is_match("I have 2 grapes in my 'big bowl'"));
        assert!(!re.is_match("I have 2 grapes in my big bowl"));
    }

    #[test]
    fn unknown_parameter_is_invalid_pattern() {
        let err = StepExpression::expression("a {shape} ball")
            .compile(&ParameterRegistry::new())
            .unwrap_err();

        assert!(matches!(err, StepError::InvalidPattern { .. }));
    }

    #[test]
    fn regex_is_matched_as_is() {
        let expr = StepExpression::regex(r"(\d+) apples?").unwrap();
        let re = expr.compile(&ParameterRegistry::new()).unwrap();

        assert!(re.is_match("I eat 3 apples today"));
        assert_eq!(expr.source(), r"(\d+) apples?");
        assert!(!expr.is_expression());
    }

    #[test]
    fn malformed_regex_is_rejected_eagerly() {
        assert!(StepExpression::regex("(oops").is_err());
    }
}
