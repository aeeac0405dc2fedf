// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Ranking of step definitions by similarity to a step.

use std::sync::Arc;

use gherkin::StepType;

use super::{diff, distance};
use crate::scope::StepDefinition;

/// Step definition similar to an unmatched step.
#[derive(Clone, Debug)]
pub struct Suggestion {
    /// The suggested definition.
    pub definition: Arc<StepDefinition>,

    /// Step text merged into the definition's pattern.
    pub merged: String,

    /// Edit distance between the step text and [`Suggestion::merged`].
    pub distance: usize,
}

/// Ranked [`Suggestion`]s for a single step, split into two tiers.
#[derive(Clone, Debug, Default)]
pub struct Suggestions {
    /// Suggestions of the step's own type (conjunction definitions
    /// included).
    pub same_type: Vec<Suggestion>,

    /// Suggestions of other types, each closer than the worst
    /// [`Suggestions::same_type`] one.
    pub other_type: Vec<Suggestion>,
}

impl Suggestions {
    /// Indicates whether nothing is suggested.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.same_type.is_empty() && self.other_type.is_empty()
    }

    /// Returns the total number of [`Suggestion`]s.
    #[must_use]
    pub fn len(&self) -> usize {
        self.same_type.len() + self.other_type.len()
    }

    /// Iterates over all [`Suggestion`]s, same-type ones first.
    pub fn iter(&self) -> impl Iterator<Item = &Suggestion> {
        self.same_type.iter().chain(&self.other_type)
    }
}

/// Ranks the given definitions against the step text of the given type,
/// keeping at most `limit` of them.
///
/// Never fails: malformed patterns are ranked by their source text as well.
#[must_use]
pub fn rank<'d>(
    text: &str,
    ty: StepType,
    definitions: impl IntoIterator<Item = &'d Arc<StepDefinition>>,
    limit: usize,
) -> Suggestions {
    let mut scored = definitions
        .into_iter()
        .map(|def| {
            let merged = diff::merge(text, def.source());
            let distance = distance::levenshtein(text, &merged);
            Suggestion { definition: Arc::clone(def), merged, distance }
        })
        .collect::<Vec<_>>();
    scored.sort_by_key(|s| s.distance);

    let (same, other): (Vec<_>, Vec<_>) = scored.into_iter().partition(|s| {
        s.definition.keyword.step_type().map_or(true, |own| own == ty)
    });

    let same_type = same.into_iter().take(limit).collect::<Vec<_>>();
    let worst = same_type.last().map(|s| s.distance);
    let other_type = other
        .into_iter()
        .filter(|s| worst.map_or(true, |w| s.distance < w))
        .take(limit - same_type.len())
        .collect();

    Suggestions { same_type, other_type }
}
