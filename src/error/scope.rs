// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Structural errors of composing a scope tree.

use derive_more::with_trait::{Display, Error};

use crate::scope::ScopeKind;

/// Errors raised by the [`Composer`] and the [`Adapter`] when a scope tree is
/// shaped wrongly.
///
/// [`Adapter`]: crate::Adapter
/// [`Composer`]: crate::Composer
#[derive(Clone, Debug, Display, Error)]
pub enum ScopeError {
    /// Scope was created directly under a parent of a disallowed kind.
    #[display("Cannot create {kind} \"{name}\" directly inside a {parent}")]
    InvalidParent {
        /// Kind of the scope being created.
        kind: ScopeKind,

        /// Name of the scope being created.
        #[error(not(source))]
        name: String,

        /// Kind of the scope currently on top of the stack.
        parent: ScopeKind,
    },

    /// Id generator produced an id which is already taken.
    #[display("Id `{id}` is already taken by another definition")]
    DuplicateId {
        /// The duplicated id.
        #[error(not(source))]
        id: String,
    },

    /// Scenario (or outline) has no enclosing feature.
    #[display("Scope {scope} is not enclosed by any feature")]
    Orphaned {
        /// Describe-string of the orphaned scope.
        #[error(not(source))]
        scope: String,
    },

    /// Scope stack has no node to attach a definition to.
    #[display("Scope stack is empty, nothing to attach {what} to")]
    EmptyStack {
        /// What was being attached.
        #[error(not(source))]
        what: String,
    },

    /// Custom parameter type is malformed.
    #[display("Invalid parameter type `{{{name}}}`: {reason}")]
    InvalidParameter {
        /// Name of the parameter type.
        #[error(not(source))]
        name: String,

        /// Why it's invalid.
        reason: String,
    },
}

/// Result type alias for composing operations.
pub type ScopeResult<T> = std::result::Result<T, ScopeError>;

impl ScopeError {
    /// Creates a new [`ScopeError::InvalidParent`].
    #[must_use]
    pub fn invalid_parent(
        kind: ScopeKind,
        name: impl Into<String>,
        parent: ScopeKind,
    ) -> Self {
        Self::InvalidParent { kind, name: name.into(), parent }
    }

    /// Creates a new [`ScopeError::DuplicateId`].
    #[must_use]
    pub fn duplicate_id(id: impl Into<String>) -> Self {
        Self::DuplicateId { id: id.into() }
    }

    /// Creates a new [`ScopeError::Orphaned`].
    #[must_use]
    pub fn orphaned(scope: impl Into<String>) -> Self {
        Self::Orphaned { scope: scope.into() }
    }

    /// Creates a new [`ScopeError::EmptyStack`].
    #[must_use]
    pub fn empty_stack(what: impl Into<String>) -> Self {
        Self::EmptyStack { what: what.into() }
    }

    /// Creates a new [`ScopeError::InvalidParameter`].
    #[must_use]
    pub fn invalid_parameter(
        name: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidParameter { name: name.into(), reason: reason.into() }
    }
}
