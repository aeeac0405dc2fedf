// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Word-level diff of step text against a pattern source.

use lazy_regex::regex_is_match;

/// Single change of a word-level diff.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Change<'a> {
    /// Word present on both sides.
    Equal(&'a str),

    /// Word present only in the old text.
    Removed(&'a str),

    /// Word present only in the new text.
    Added(&'a str),
}

/// Diffs two texts word by word along their longest common subsequence of
/// whitespace-separated words.
///
/// When both a removal and an addition are possible, the removal goes first.
#[must_use]
pub fn words<'a>(old: &'a str, new: &'a str) -> Vec<Change<'a>> {
    let old = old.split_whitespace().collect::<Vec<_>>();
    let new = new.split_whitespace().collect::<Vec<_>>();

    // `lcs[i][j]` is the LCS length of `old[i..]` and `new[j..]`.
    let mut lcs = vec![vec![0_usize; new.len() + 1]; old.len() + 1];
    for i in (0..old.len()).rev() {
        for j in (0..new.len()).rev() {
            lcs[i][j] = if old[i] == new[j] {
                lcs[i + 1][j + 1] + 1
            } else {
                lcs[i + 1][j].max(lcs[i][j + 1])
            };
        }
    }

    let (mut i, mut j) = (0, 0);
    let mut changes = Vec::with_capacity(old.len() + new.len());
    while i < old.len() && j < new.len() {
        if old[i] == new[j] {
            changes.push(Change::Equal(old[i]));
            i += 1;
            j += 1;
        } else if lcs[i + 1][j] >= lcs[i][j + 1] {
            changes.push(Change::Removed(old[i]));
            i += 1;
        } else {
            changes.push(Change::Added(new[j]));
            j += 1;
        }
    }
    changes.extend(old[i..].iter().copied().map(Change::Removed));
    changes.extend(new[j..].iter().copied().map(Change::Added));
    changes
}

/// Checks whether the given word is a Cucumber Expression placeholder like
/// `{int}` or `{}`.
#[must_use]
pub fn is_placeholder(word: &str) -> bool {
    regex_is_match!(r"^\{[^{}]*\}$", word)
}

/// Reconstructs what the step text would look like if it followed the given
/// pattern.
///
/// Within every run of changes, each added placeholder takes the next removed
/// word, the last one taking all the removed words left. Added literals are
/// kept and removed words no placeholder took are dropped.
#[must_use]
pub fn merge(text: &str, pattern: &str) -> String {
    let changes = words(text, pattern);
    let mut merged = Vec::<&str>::with_capacity(changes.len());

    let mut rest = changes.as_slice();
    while let Some((first, tail)) = rest.split_first() {
        if let Change::Equal(w) = first {
            merged.push(*w);
            rest = tail;
            continue;
        }

        let len = rest
            .iter()
            .position(|c| matches!(c, Change::Equal(_)))
            .unwrap_or(rest.len());
        let (hunk, tail) = rest.split_at(len);
        merge_hunk(hunk, &mut merged);
        rest = tail;
    }

    merged.join(" ")
}

/// Merges a single run of non-[`Change::Equal`] changes into `out`.
fn merge_hunk<'a>(hunk: &[Change<'a>], out: &mut Vec<&'a str>) {
    let removed = hunk
        .iter()
        .filter_map(|c| match c {
            Change::Removed(w) => Some(*w),
            Change::Equal(_) | Change::Added(_) => None,
        })
        .collect::<Vec<_>>();
    let added = hunk.iter().filter_map(|c| match c {
        Change::Added(w) => Some(*w),
        Change::Equal(_) | Change::Removed(_) => None,
    });
    let mut placeholders_left = hunk
        .iter()
        .filter(|c| matches!(c, Change::Added(w) if is_placeholder(w)))
        .count();

    let mut removed = removed.as_slice();
    for word in added {
        if !is_placeholder(word) || removed.is_empty() {
            out.push(word);
            continue;
        }
        placeholders_left -= 1;
        let take = if placeholders_left == 0 { removed.len() } else { 1 };
        let (taken, left) = removed.split_at(take);
        out.extend_from_slice(taken);
        removed = left;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diffs_along_common_words() {
        assert_eq!(
            words("I have 2 grapes", "I have {int} grapes"),
            [
                Change::Equal("I"),
                Change::Equal("have"),
                Change::Removed("2"),
                Change::Added("{int}"),
                Change::Equal("grapes"),
            ],
        );
    }

    #[test]
    fn trailing_changes_are_kept() {
        assert_eq!(
            words("a", "a b"),
            [Change::Equal("a"), Change::Added("b")],
        );
        assert_eq!(
            words("a b", "a"),
            [Change::Equal("a"), Change::Removed("b")],
        );
    }

    #[test]
    fn detects_placeholders() {
        assert!(is_placeholder("{int}"));
        assert!(is_placeholder("{}"));
        assert!(!is_placeholder("int"));
        assert!(!is_placeholder("{a}b"));
    }

    #[test]
    fn merges_literals_into_placeholders() {
        assert_eq!(
            merge(
                "I have 2 grapes in my bowl",
                "I have {int} blue grapes in my {string}",
            ),
            "I have 2 blue grapes in my bowl",
        );
    }

    #[test]
    fn merge_of_matching_pattern_is_the_text() {
        let text = "I have 2 grapes in my bowl";
        assert_eq!(merge(text, "I have {int} grapes in my {string}"), text);
    }

    #[test]
    fn last_placeholder_takes_the_remaining_words() {
        assert_eq!(
            merge("I say \"hello world\"", "I say {string}"),
            "I say \"hello world\"",
        );
    }

    #[test]
    fn unpaired_placeholder_is_kept() {
        assert_eq!(merge("I eat", "I eat {int} apples"), "I eat {int} apples");
    }
}
