// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Custom [Cucumber Expression][0] parameter types.
//!
//! [0]: https://github.com/cucumber/cucumber-expressions#readme

use std::collections::HashMap;

use cucumber_expressions::{Spanned, expand::parameters::Provider};

use crate::error::{ScopeError, ScopeResult};

/// Parameter names the [Cucumber Expressions][0] grammar reserves.
///
/// [0]: https://github.com/cucumber/cucumber-expressions#readme
const BUILTIN: &[&str] = &["", "int", "float", "word", "string"];

/// Regex `{string}` expands to: a single- or double-quoted string, or a bare
/// word.
const STRING: &str =
    r#""(?:[^"\\]|\\.)*"|'(?:[^'\\]|\\.)*'|[^\s"']+"#;

/// Registry of custom parameter types, mapping a name (as written between
/// `{}` in an expression) onto a regular expression.
#[derive(Clone, Debug, Default)]
pub struct ParameterRegistry {
    patterns: HashMap<String, String>,
}

impl ParameterRegistry {
    /// Creates an empty [`ParameterRegistry`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Defines a new parameter type.
    ///
    /// # Errors
    ///
    /// If the name is empty, built-in, already defined or contains characters
    /// the expression grammar reserves, or if the regex doesn't compile.
    pub fn define(
        &mut self,
        name: impl Into<String>,
        regex: impl Into<String>,
    ) -> ScopeResult<()> {
        let (name, regex) = (name.into(), regex.into());

        if name.is_empty() || BUILTIN.contains(&name.as_str()) {
            return Err(ScopeError::invalid_parameter(
                name,
                "name is reserved",
            ));
        }
        if name.contains(|c: char| "{}()\\/ ".contains(c)) {
            return Err(ScopeError::invalid_parameter(
                name,
                "name contains reserved characters",
            ));
        }
        if self.patterns.contains_key(&name) {
            return Err(ScopeError::invalid_parameter(
                name,
                "already defined",
            ));
        }
        if let Err(e) = regex::Regex::new(&regex) {
            return Err(ScopeError::invalid_parameter(name, e.to_string()));
        }

        tracing::debug!(name = %name, regex = %regex, "parameter type defined");
        drop(self.patterns.insert(name, regex));
        Ok(())
    }

    /// Returns the regex source of the given parameter type, if defined.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.patterns.get(name).map(String::as_str)
    }

    /// Indicates whether no custom parameter type is defined.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Returns a [`Provider`] of this registry for expanding expressions.
    #[must_use]
    pub(crate) const fn lookup(&self) -> Lookup<'_> {
        Lookup(self)
    }
}

/// [`Provider`] resolving custom parameters out of a [`ParameterRegistry`].
///
/// Also widens the built-in `{string}` to accept unquoted words.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Lookup<'r>(&'r ParameterRegistry);

impl<'s, 'r> Provider<Spanned<'s>> for Lookup<'r> {
    type Item = char;
    type Value = &'r str;

    fn get(&self, input: &Spanned<'s>) -> Option<Self::Value> {
        let name = *input.fragment();
        self.0.get(name).or_else(|| (name == "string").then_some(STRING))
    }
}
