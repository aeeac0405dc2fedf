// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Identities of [`Execution`]s.
//!
//! [`Execution`]: super::Execution

use itertools::Itertools as _;

/// Separator of qualified name segments.
pub const SEPARATOR: &str = " > ";

/// Formats a single qualified name segment.
#[must_use]
pub fn segment(keyword: &str, name: &str, id: &str) -> String {
    format!("{}: {name} [{id}]", keyword.trim())
}

/// Joins qualified name segments, outermost first.
#[must_use]
pub fn join<I>(segments: I) -> String
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    segments.into_iter().map(|s| s.as_ref().to_owned()).join(SEPARATOR)
}

/// Id of an outline example, `index` counted across every examples table.
#[must_use]
pub fn example_id(scope: &str, index: usize) -> String {
    format!("{scope}#{}", index + 1)
}

/// Merges tag lists, dropping repeated tags and keeping first occurrences in
/// order.
#[must_use]
pub fn merge_tags<'t, I>(lists: I) -> Vec<String>
where
    I: IntoIterator<Item = &'t [String]>,
{
    lists.into_iter().flatten().unique().cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segments_and_join() {
        let name = join([
            segment("Feature", "Calculator", "feature-1"),
            segment("Scenario ", "adds", "scenario-1"),
        ]);
        assert_eq!(
            name,
            "Feature: Calculator [feature-1] > Scenario: adds [scenario-1]",
        );
    }

    #[test]
    fn example_ids_are_one_based() {
        assert_eq!(example_id("scenarioOutline-2", 0), "scenarioOutline-2#1");
        assert_eq!(example_id("scenarioOutline-2", 4), "scenarioOutline-2#5");
    }

    #[test]
    fn tags_deduplicated_in_order() {
        let feature = vec!["web".to_owned(), "slow".to_owned()];
        let scenario = vec!["fast".to_owned(), "web".to_owned()];
        let merged = merge_tags([feature.as_slice(), scenario.as_slice(), &[]]);
        assert_eq!(merged, ["web", "slow", "fast"]);
    }
}
