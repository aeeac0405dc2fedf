// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Rendering of [`Suggestions`] into "did you mean" text.

use std::{borrow::Cow, fmt, str::FromStr};

use console::Style;

use super::{Suggestion, Suggestions};

/// Possible policies of a [`console`] output coloring.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Coloring {
    /// Letting [`console::colors_enabled()`] to decide, whether output should
    /// be colored.
    #[default]
    Auto,

    /// Forcing of a colored output.
    Always,

    /// Forcing of a non-colored output.
    Never,
}

impl FromStr for Coloring {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "always" => Ok(Self::Always),
            "never" => Ok(Self::Never),
            _ => Err("possible options: auto, always, never"),
        }
    }
}

/// [`Style`]s of a rendered [`Report`].
#[derive(Debug)]
struct Styles {
    header: Style,
    ok: Style,
    hint: Style,
    err: Style,
    is_present: bool,
}

impl Styles {
    fn new(coloring: Coloring) -> Self {
        Self {
            header: Style::new().bold(),
            ok: Style::new().green(),
            hint: Style::new().cyan(),
            err: Style::new().red(),
            is_present: match coloring {
                Coloring::Auto => console::colors_enabled(),
                Coloring::Always => true,
                Coloring::Never => false,
            },
        }
    }

    fn paint<'a>(
        &self,
        style: &Style,
        input: impl Into<Cow<'a, str>>,
    ) -> Cow<'a, str> {
        if self.is_present {
            style.apply_to(input.into()).force_styling(true).to_string().into()
        } else {
            input.into()
        }
    }
}

/// Tree of headings with [`Suggestions`] attached to its leaves, like
/// `Feature: ...` > `Scenario: ...` > `Step: ...`.
#[derive(Clone, Debug)]
pub struct Report {
    heading: String,
    suggestions: Option<Suggestions>,
    children: Vec<Report>,
}

impl Report {
    /// Creates a new empty [`Report`] with the given heading.
    #[must_use]
    pub fn new(heading: impl Into<String>) -> Self {
        Self { heading: heading.into(), suggestions: None, children: vec![] }
    }

    /// Attaches [`Suggestions`] to this [`Report`].
    #[must_use]
    pub fn with_suggestions(mut self, suggestions: Suggestions) -> Self {
        self.suggestions = Some(suggestions);
        self
    }

    /// Nests the given [`Report`] under this one.
    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    /// Returns the heading of this [`Report`].
    #[must_use]
    pub fn heading(&self) -> &str {
        &self.heading
    }

    /// Returns the [`Suggestions`] attached to this [`Report`], if any.
    #[must_use]
    pub const fn suggestions(&self) -> Option<&Suggestions> {
        self.suggestions.as_ref()
    }

    /// Returns the nested [`Report`]s.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        &self.children
    }

    /// Indicates whether no [`Suggestions`] were attached anywhere in this
    /// tree.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.suggestions.is_none() && self.children.iter().all(Self::is_empty)
    }

    /// Renders this [`Report`] with the given [`Coloring`].
    #[must_use]
    pub fn render(&self, coloring: Coloring) -> String {
        let styles = Styles::new(coloring);
        let mut out = Vec::new();
        self.render_into(&styles, 0, &mut out);
        out.join("\n")
    }

    fn render_into(&self, styles: &Styles, depth: usize, out: &mut Vec<String>) {
        let indent = "  ".repeat(depth);
        out.push(format!("{indent}{}", styles.paint(&styles.header, &self.heading)));

        if let Some(suggestions) = &self.suggestions {
            let indent = "  ".repeat(depth + 1);
            if suggestions.is_empty() {
                out.push(format!(
                    "{indent}{}",
                    styles.paint(&styles.err, "No similar step definitions found."),
                ));
            }
            let tiers = [
                ("Did you mean:", &suggestions.same_type),
                ("Or maybe a step of another type:", &suggestions.other_type),
            ];
            for (title, tier) in tiers.into_iter().filter(|(_, t)| !t.is_empty()) {
                out.push(format!("{indent}{title}"));
                out.extend(tier.iter().map(|s| {
                    format!("{indent}  - {}", render_suggestion(styles, s))
                }));
            }
        }

        for child in &self.children {
            child.render_into(styles, depth + 1, out);
        }
    }
}

fn render_suggestion(styles: &Styles, suggestion: &Suggestion) -> String {
    let def = &suggestion.definition;
    let mut line = format!(
        "{} {}",
        styles.paint(&styles.ok, def.keyword.to_string()),
        styles.paint(&styles.ok, def.source()),
    );
    if let Some(loc) = &def.location {
        line.push_str(&format!(" {}", styles.paint(&styles.hint, format!("# {loc}"))));
    }
    line
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(Coloring::Never))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        ExecutionMode,
        scope::{DefinitionOptions, StepDefinition, StepId, StepKeyword},
        step::StepExpression,
    };

    fn suggestion(keyword: StepKeyword, expr: &str) -> Suggestion {
        Suggestion {
            definition: Arc::new(StepDefinition::new(
                StepId::new("step-1"),
                keyword,
                StepExpression::expression(expr),
                DefinitionOptions::new().resolve(ExecutionMode::Default),
                None,
            )),
            merged: String::new(),
            distance: 1,
        }
    }

    #[test]
    fn parses_coloring() {
        assert_eq!("AUTO".parse(), Ok(Coloring::Auto));
        assert_eq!("never".parse(), Ok(Coloring::Never));
        assert!("sometimes".parse::<Coloring>().is_err());
    }

    #[test]
    fn renders_nested_tiers() {
        let report = Report::new("Feature: Fruit").with_child(
            Report::new("Scenario: eating").with_child(
                Report::new("Step: Given I have 2 grapes").with_suggestions(
                    Suggestions {
                        same_type: vec![suggestion(
                            StepKeyword::Given,
                            "I have {int} blue grapes",
                        )],
                        other_type: vec![suggestion(
                            StepKeyword::When,
                            "I have {int} grapes",
                        )],
                    },
                ),
            ),
        );

        assert_eq!(
            report.to_string(),
            "Feature: Fruit\n\
             \x20 Scenario: eating\n\
             \x20   Step: Given I have 2 grapes\n\
             \x20     Did you mean:\n\
             \x20       - Given I have {int} blue grapes\n\
             \x20     Or maybe a step of another type:\n\
             \x20       - When I have {int} grapes",
        );
        assert!(!report.is_empty());
    }

    #[test]
    fn renders_nothing_found() {
        let report = Report::new("Step: Given x")
            .with_suggestions(Suggestions::default());

        assert_eq!(
            report.to_string(),
            "Step: Given x\n  No similar step definitions found.",
        );
        assert!(!report.is_empty());
        assert!(Report::new("Feature: F").is_empty());
    }

    #[test]
    fn colors_when_forced() {
        let report = Report::new("Feature: F");

        assert!(report.render(Coloring::Always).contains('\u{1b}'));
        assert!(!report.render(Coloring::Never).contains('\u{1b}'));
    }
}
