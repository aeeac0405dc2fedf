// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Conversion of a [`gherkin::Feature`] into a [`Feature`].

use itertools::Itertools as _;
use lazy_regex::regex;
use once_cell::sync::Lazy;
use regex::Regex;
use sealed::sealed;

use super::{
    Background, CompiledScenario, ExampleGroup, Feature, FeatureElement, Rule,
    RuleElement, Scenario, ScenarioOutline, Step,
};
use crate::error::{DocumentError, DocumentResult};

/// [`gherkin::Feature`] extension.
#[sealed]
pub trait Ext {
    /// Converts this [`gherkin::Feature`] into a [`Feature`], compiling every
    /// [Scenario Outline][1] against its [Examples][2].
    ///
    /// # Errors
    ///
    /// If an outline refers to a column its examples don't have.
    ///
    /// [1]: https://cucumber.io/docs/gherkin/reference#scenario-outline
    /// [2]: https://cucumber.io/docs/gherkin/reference#examples
    fn into_document(self) -> DocumentResult<Feature>;
}

#[sealed]
impl Ext for gherkin::Feature {
    fn into_document(self) -> DocumentResult<Feature> {
        let scenarios = self
            .scenarios
            .into_iter()
            .map(|s| (s.position.line, convert_scenario(s)));
        let rules = self.rules.into_iter().map(|r| {
            let line = r.position.line;
            (line, convert_rule(r).map(FeatureElement::Rule))
        });
        let elements = scenarios
            .map(|(line, el)| {
                (line, el.map(|el| match el {
                    RuleElement::Scenario(s) => FeatureElement::Scenario(s),
                    RuleElement::Outline(o) => FeatureElement::Outline(o),
                }))
            })
            .chain(rules)
            .sorted_by_key(|(line, _)| *line)
            .map(|(_, el)| el)
            .collect::<DocumentResult<Vec<_>>>()?;

        Ok(Feature {
            keyword: self.keyword,
            name: self.name,
            description: self.description,
            tags: self.tags,
            background: self.background.map(convert_background),
            elements,
            path: self.path,
        })
    }
}

fn convert_rule(rule: gherkin::Rule) -> DocumentResult<Rule> {
    let elements = rule
        .scenarios
        .into_iter()
        .sorted_by_key(|s| s.position.line)
        .map(convert_scenario)
        .collect::<DocumentResult<Vec<_>>>()?;

    Ok(Rule {
        keyword: rule.keyword,
        name: rule.name,
        tags: rule.tags,
        background: rule.background.map(convert_background),
        elements,
    })
}

fn convert_background(background: gherkin::Background) -> Background {
    Background {
        keyword: background.keyword,
        steps: background.steps.into_iter().map(convert_step).collect(),
    }
}

fn convert_step(step: gherkin::Step) -> Step {
    let keyword = step.keyword.trim().to_owned();
    Step {
        conjunction: matches!(keyword.as_str(), "And" | "But" | "*"),
        keyword,
        ty: step.ty,
        text: step.value,
        docstring: step.docstring,
        table: step.table.map(|t| t.rows),
        line: step.position.line,
    }
}

fn convert_scenario(scenario: gherkin::Scenario) -> DocumentResult<RuleElement> {
    let line = scenario.position.line;
    let steps = scenario.steps.into_iter().map(convert_step).collect::<Vec<_>>();

    if scenario.examples.is_empty() {
        return Ok(RuleElement::Scenario(Scenario {
            keyword: scenario.keyword,
            name: scenario.name,
            tags: scenario.tags,
            steps,
            line,
        }));
    }

    let example_groups = scenario
        .examples
        .into_iter()
        .map(|ex| {
            let mut rows = ex.table.map(|t| t.rows).unwrap_or_default();
            let header = if rows.is_empty() { vec![] } else { rows.remove(0) };
            ExampleGroup {
                id: format!("examples-{}", ex.position.line),
                keyword: ex.keyword,
                name: ex.name.unwrap_or_default(),
                tags: ex.tags,
                header,
                rows,
            }
        })
        .collect::<Vec<_>>();

    let mut outline = ScenarioOutline {
        keyword: scenario.keyword,
        name: scenario.name,
        tags: scenario.tags,
        steps,
        example_groups,
        compiled: vec![],
        line,
    };
    outline.compiled = compile(&outline)?;
    Ok(RuleElement::Outline(outline))
}

/// Compiles every examples row of the given [`ScenarioOutline`] into a
/// [`CompiledScenario`].
fn compile(outline: &ScenarioOutline) -> DocumentResult<Vec<CompiledScenario>> {
    outline
        .example_groups
        .iter()
        .flat_map(|group| group.rows.iter().map(move |row| (group, row)))
        .enumerate()
        .map(|(example_index, (group, row))| {
            let values = group
                .header
                .iter()
                .map(String::as_str)
                .zip(row.iter().map(String::as_str))
                .collect::<Vec<_>>();
            let fill = |text: &str, line| interpolate(text, &values, line, outline);

            let steps = outline
                .steps
                .iter()
                .map(|step| {
                    Ok(Step {
                        text: fill(&step.text, step.line)?,
                        docstring: step
                            .docstring
                            .as_deref()
                            .map(|d| fill(d, step.line))
                            .transpose()?,
                        table: step
                            .table
                            .as_ref()
                            .map(|rows| {
                                rows.iter()
                                    .map(|r| {
                                        r.iter()
                                            .map(|cell| fill(cell, step.line))
                                            .collect::<DocumentResult<Vec<_>>>()
                                    })
                                    .collect::<DocumentResult<Vec<_>>>()
                            })
                            .transpose()?,
                        ..step.clone()
                    })
                })
                .collect::<DocumentResult<Vec<_>>>()?;

            Ok(CompiledScenario {
                example_index,
                example_group_id: group.id.clone(),
                name: fill(&outline.name, outline.line)?,
                tags: outline
                    .tags
                    .iter()
                    .chain(&group.tags)
                    .unique()
                    .cloned()
                    .collect(),
                steps,
            })
        })
        .collect()
}

/// Replaces every `<name>` placeholder in the given text with the value of
/// the same-named column.
fn interpolate(
    text: &str,
    values: &[(&str, &str)],
    line: usize,
    outline: &ScenarioOutline,
) -> DocumentResult<String> {
    /// [`Regex`] matching placeholders examples should expand into.
    static TEMPLATE_REGEX: &Lazy<Regex> = regex!(r"<([^>\s]+)>");

    let mut unknown = None;
    let replaced = TEMPLATE_REGEX.replace_all(text, |cap: &regex::Captures<'_>| {
        let name = cap.get(1).map_or("", |m| m.as_str());
        values
            .iter()
            .find_map(|(k, v)| (*k == name).then_some(*v))
            .unwrap_or_else(|| {
                if unknown.is_none() {
                    unknown = Some(name.to_owned());
                }
                ""
            })
    });

    match unknown {
        Some(name) => Err(DocumentError::UnknownPlaceholder {
            name,
            line,
            outline: outline.name.clone(),
        }),
        None => Ok(replaced.into_owned()),
    }
}
