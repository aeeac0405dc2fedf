// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Source location of step definitions.

use derive_more::with_trait::Display;

/// Location in source code where a [`StepDefinition`] was registered.
///
/// [`StepDefinition`]: crate::StepDefinition
#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[display("{path}:{line}:{column}")]
pub struct Location {
    /// Path to the file.
    pub path: &'static str,

    /// Line in the file.
    pub line: u32,

    /// Column in the file.
    pub column: u32,
}

impl Location {
    /// Creates a new [`Location`].
    #[must_use]
    pub const fn new(path: &'static str, line: u32, column: u32) -> Self {
        Self { path, line, column }
    }

    /// Captures the [`Location`] of the caller.
    ///
    /// Propagates through functions annotated with `#[track_caller]`.
    #[must_use]
    #[track_caller]
    pub fn caller() -> Self {
        let loc = std::panic::Location::caller();
        Self::new(loc.file(), loc.line(), loc.column())
    }

    /// Returns the file name of the path.
    #[must_use]
    pub fn filename(&self) -> &'static str {
        self.path.rsplit(['/', '\\']).next().unwrap_or(self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[track_caller]
    fn registered_here() -> Location {
        Location::caller()
    }

    #[test]
    fn caller_points_at_call_site() {
        let line = line!() + 1;
        let loc = registered_here();

        assert_eq!(loc.line, line);
        assert!(loc.path.ends_with("location.rs"));
    }

    #[test]
    fn filename_handles_both_separators() {
        assert_eq!(Location::new("src/step/a.rs", 1, 1).filename(), "a.rs");
        assert_eq!(Location::new("src\\step\\b.rs", 1, 1).filename(), "b.rs");
        assert_eq!(Location::new("c.rs", 1, 1).filename(), "c.rs");
    }

    #[test]
    fn displays_as_path_line_column() {
        assert_eq!(
            Location::new("src/test.rs", 42, 10).to_string(),
            "src/test.rs:42:10",
        );
    }
}
