// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Simplified Gherkin document a [`TestPlan`] is built against.
//!
//! Elements are kept in document order, and every [Scenario Outline][1] comes
//! with its examples already compiled into concrete scenarios.
//!
//! [1]: https://cucumber.io/docs/gherkin/reference#scenario-outline
//! [`TestPlan`]: crate::TestPlan

mod convert;

use std::path::{Path, PathBuf};

use gherkin::StepType;

use crate::error::DocumentResult;

pub use self::convert::Ext;

/// [Feature](https://cucumber.io/docs/gherkin/reference#feature).
#[derive(Clone, Debug)]
pub struct Feature {
    /// Keyword, like `Feature`.
    pub keyword: String,

    /// Name of this [`Feature`].
    pub name: String,

    /// Free-form description.
    pub description: Option<String>,

    /// Tags of this [`Feature`].
    pub tags: Vec<String>,

    /// Steps prepended to every scenario.
    pub background: Option<Background>,

    /// Rules and scenarios in document order.
    pub elements: Vec<FeatureElement>,

    /// Path of the `.feature` file, if parsed from one.
    pub path: Option<PathBuf>,
}

impl Feature {
    /// Parses Gherkin text into a [`Feature`].
    ///
    /// # Errors
    ///
    /// If the text is not valid Gherkin, or an outline refers to a column its
    /// examples don't have.
    pub fn parse_str(text: &str) -> DocumentResult<Self> {
        gherkin::Feature::parse(text, gherkin::GherkinEnv::default())?
            .into_document()
    }

    /// Parses a `.feature` file into a [`Feature`].
    ///
    /// # Errors
    ///
    /// If the file can't be read or is not valid Gherkin, or an outline
    /// refers to a column its examples don't have.
    pub fn parse_path(path: impl AsRef<Path>) -> DocumentResult<Self> {
        gherkin::Feature::parse_path(path, gherkin::GherkinEnv::default())?
            .into_document()
    }

    /// Counts the scenarios of this [`Feature`], every compiled example of an
    /// outline counted as one.
    #[must_use]
    pub fn count_executables(&self) -> usize {
        self.elements
            .iter()
            .map(|el| match el {
                FeatureElement::Scenario(_) => 1,
                FeatureElement::Outline(o) => o.compiled.len(),
                FeatureElement::Rule(r) => r
                    .elements
                    .iter()
                    .map(|el| match el {
                        RuleElement::Scenario(_) => 1,
                        RuleElement::Outline(o) => o.compiled.len(),
                    })
                    .sum(),
            })
            .sum()
    }
}

/// Element of a [`Feature`].
#[derive(Clone, Debug)]
pub enum FeatureElement {
    /// [`Scenario`] directly in a [`Feature`].
    Scenario(Scenario),

    /// [`ScenarioOutline`] directly in a [`Feature`].
    Outline(ScenarioOutline),

    /// [`Rule`] of a [`Feature`].
    Rule(Rule),
}

/// [Rule](https://cucumber.io/docs/gherkin/reference#rule).
#[derive(Clone, Debug)]
pub struct Rule {
    /// Keyword, like `Rule`.
    pub keyword: String,

    /// Name of this [`Rule`].
    pub name: String,

    /// Tags of this [`Rule`].
    pub tags: Vec<String>,

    /// Steps prepended to every scenario of this [`Rule`], after the
    /// [`Feature`]'s ones.
    pub background: Option<Background>,

    /// Scenarios in document order.
    pub elements: Vec<RuleElement>,
}

/// Element of a [`Rule`].
#[derive(Clone, Debug)]
pub enum RuleElement {
    /// [`Scenario`] of a [`Rule`].
    Scenario(Scenario),

    /// [`ScenarioOutline`] of a [`Rule`].
    Outline(ScenarioOutline),
}

/// [Background](https://cucumber.io/docs/gherkin/reference#background).
#[derive(Clone, Debug)]
pub struct Background {
    /// Keyword, like `Background`.
    pub keyword: String,

    /// Steps of this [`Background`].
    pub steps: Vec<Step>,
}

/// [Scenario](https://cucumber.io/docs/gherkin/reference#example).
#[derive(Clone, Debug)]
pub struct Scenario {
    /// Keyword, like `Scenario` or `Example`.
    pub keyword: String,

    /// Name of this [`Scenario`].
    pub name: String,

    /// Tags of this [`Scenario`].
    pub tags: Vec<String>,

    /// Steps of this [`Scenario`].
    pub steps: Vec<Step>,

    /// Line this [`Scenario`] starts at.
    pub line: usize,
}

/// [Scenario Outline][1] along with its compiled examples.
///
/// [1]: https://cucumber.io/docs/gherkin/reference#scenario-outline
#[derive(Clone, Debug)]
pub struct ScenarioOutline {
    /// Keyword, like `Scenario Outline`.
    pub keyword: String,

    /// Name of this [`ScenarioOutline`], placeholders included.
    pub name: String,

    /// Tags of this [`ScenarioOutline`].
    pub tags: Vec<String>,

    /// Template steps, placeholders included.
    pub steps: Vec<Step>,

    /// Examples tables in document order.
    pub example_groups: Vec<ExampleGroup>,

    /// One [`CompiledScenario`] per examples row, ascending by
    /// [`CompiledScenario::example_index`].
    pub compiled: Vec<CompiledScenario>,

    /// Line this [`ScenarioOutline`] starts at.
    pub line: usize,
}

/// [Examples](https://cucumber.io/docs/gherkin/reference#examples) table of a
/// [`ScenarioOutline`].
#[derive(Clone, Debug)]
pub struct ExampleGroup {
    /// Id of this group, unique within its [`ScenarioOutline`].
    pub id: String,

    /// Keyword, like `Examples`.
    pub keyword: String,

    /// Name of this group.
    pub name: String,

    /// Tags of this group.
    pub tags: Vec<String>,

    /// Header row.
    pub header: Vec<String>,

    /// Data rows.
    pub rows: Vec<Vec<String>>,
}

/// Concrete scenario compiled out of a [`ScenarioOutline`] and a single
/// examples row.
#[derive(Clone, Debug)]
pub struct CompiledScenario {
    /// Index of the row across all the groups of its [`ScenarioOutline`],
    /// starting at `0`.
    pub example_index: usize,

    /// [`ExampleGroup::id`] the row belongs to.
    pub example_group_id: String,

    /// Interpolated name.
    pub name: String,

    /// Tags of the outline and of the group.
    pub tags: Vec<String>,

    /// Interpolated steps.
    pub steps: Vec<Step>,
}

/// [Step](https://cucumber.io/docs/gherkin/reference#steps).
#[derive(Clone, Debug)]
pub struct Step {
    /// Keyword as written, like `Given` or `And`.
    pub keyword: String,

    /// Resolved type: conjunctions take the type of the step before them.
    pub ty: StepType,

    /// Whether this step was written with a conjunction keyword (`And`,
    /// `But` or `*`).
    pub conjunction: bool,

    /// Text after the keyword.
    pub text: String,

    /// Attached doc string.
    pub docstring: Option<String>,

    /// Attached data table rows.
    pub table: Option<Vec<Vec<String>>>,

    /// Line of this [`Step`].
    pub line: usize,
}

impl Step {
    /// Returns the keyword and the text of this [`Step`], like
    /// `Given I have 2 grapes`.
    #[must_use]
    pub fn describe(&self) -> String {
        format!("{} {}", self.keyword, self.text)
    }
}
