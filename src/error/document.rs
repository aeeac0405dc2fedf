// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Errors of turning Gherkin text into a [`document::Feature`].
//!
//! [`document::Feature`]: crate::document::Feature

use derive_more::with_trait::{Display, Error, From};

/// Errors of parsing and converting a Gherkin document.
#[derive(Debug, Display, Error, From)]
pub enum DocumentError {
    /// Gherkin text is malformed.
    #[display("Failed to parse feature: {_0}")]
    Parse(gherkin::ParseError),

    /// Gherkin file is malformed or unreadable.
    #[display("Failed to parse feature file: {_0}")]
    ParseFile(gherkin::ParseFileError),

    /// Scenario outline step refers to a column its examples don't have.
    #[from(ignore)]
    #[display(
        "Failed to resolve <{name}> at line {line} of outline \"{outline}\""
    )]
    UnknownPlaceholder {
        /// Name of the placeholder.
        #[error(not(source))]
        name: String,

        /// Line of the step (or outline title) holding the placeholder.
        line: usize,

        /// Name of the scenario outline.
        outline: String,
    },
}

/// Result type alias for document operations.
pub type DocumentResult<T> = std::result::Result<T, DocumentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_placeholder_display() {
        let err = DocumentError::UnknownPlaceholder {
            name: "count".into(),
            line: 7,
            outline: "eating".into(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to resolve <count> at line 7 of outline \"eating\"",
        );
    }
}
