// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! World factory errors.

use derive_more::with_trait::{Display, Error};

/// Errors of creating a world for a scope.
#[derive(Debug, Display, Error)]
pub enum WorldError {
    /// World was requested, but no factory was configured.
    #[display("No world factory configured to create a world for {scope}")]
    NoFactory {
        /// Id of the scope the world was requested for.
        #[error(not(source))]
        scope: String,
    },

    /// Factory failed to create a world.
    #[display("Failed to create world: {source}")]
    Creation {
        /// The underlying error returned by the factory.
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
}

/// Result type alias for world operations.
pub type WorldResult<T> = std::result::Result<T, WorldError>;

impl WorldError {
    /// Creates a new [`WorldError::NoFactory`].
    #[must_use]
    pub fn no_factory(scope: impl Into<String>) -> Self {
        Self::NoFactory { scope: scope.into() }
    }

    /// Creates a new [`WorldError::Creation`] from an error.
    #[must_use]
    pub fn creation(
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Creation { source: Box::new(source) }
    }

    /// Creates a new [`WorldError::Creation`] from a plain message.
    #[must_use]
    pub fn message(message: impl Into<String>) -> Self {
        Self::Creation { source: message.into().into() }
    }

    /// Returns true if this is a creation error.
    #[must_use]
    pub const fn is_creation_error(&self) -> bool {
        matches!(self, Self::Creation { .. })
    }
}

#[cfg(test)]
mod tests {
    use std::{error::Error as _, io};

    use super::*;

    #[test]
    fn no_factory_display() {
        let err = WorldError::no_factory("scenario-1");
        assert_eq!(
            err.to_string(),
            "No world factory configured to create a world for scenario-1",
        );
        assert!(!err.is_creation_error());
    }

    #[test]
    fn creation_keeps_source() {
        let err = WorldError::creation(io::Error::new(
            io::ErrorKind::PermissionDenied,
            "access denied",
        ));

        assert!(err.is_creation_error());
        assert!(err.to_string().contains("access denied"));
        assert!(err.source().is_some());
    }

    #[test]
    fn creation_from_message() {
        let err = WorldError::message("database is down");
        assert_eq!(err.to_string(), "Failed to create world: database is down");
    }
}
