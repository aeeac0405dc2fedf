// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Ids of scopes, steps and hooks, and their generators.

use std::collections::HashMap;

use derive_more::with_trait::{AsRef, Deref, Display, From};

use super::ScopeKind;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            AsRef,
            Clone,
            Debug,
            Deref,
            Display,
            Eq,
            From,
            Hash,
            Ord,
            PartialEq,
            PartialOrd,
            serde::Serialize,
        )]
        #[as_ref(forward)]
        #[deref(forward)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wraps the given string.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Returns this id as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }
    };
}

define_id!(
    /// Id of a [`ScopeNode`](super::ScopeNode).
    ScopeId
);
define_id!(
    /// Id of a [`StepDefinition`](super::StepDefinition).
    StepId
);
define_id!(
    /// Id of a [`HookDefinition`](super::HookDefinition).
    HookId
);

/// What an id is being generated for.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum IdKind {
    /// Scope of the given kind.
    Scope(ScopeKind),

    /// Step definition.
    Step,

    /// Hook definition.
    Hook,
}

impl IdKind {
    /// Prefix [`Sequential`] uses for this kind.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Scope(ScopeKind::Root) => "root",
            Self::Scope(ScopeKind::Feature) => "feature",
            Self::Scope(ScopeKind::Rule) => "rule",
            Self::Scope(ScopeKind::Scenario) => "scenario",
            Self::Scope(ScopeKind::ScenarioOutline) => "scenarioOutline",
            Self::Step => "step",
            Self::Hook => "hook",
        }
    }
}

/// Source of ids for a [`Composer`].
///
/// Implemented for any `FnMut(IdKind) -> String`, so tests may inject fixed
/// or colliding ids.
///
/// [`Composer`]: super::Composer
pub trait IdGenerator {
    /// Generates the next id for the given [`IdKind`].
    fn generate(&mut self, kind: IdKind) -> String;
}

impl<F> IdGenerator for F
where
    F: FnMut(IdKind) -> String,
{
    fn generate(&mut self, kind: IdKind) -> String {
        self(kind)
    }
}

/// Default [`IdGenerator`] yielding `{prefix}-{n}` ids with a counter per
/// prefix, like `feature-1`, `scenario-2` or `step-3`.
#[derive(Clone, Debug, Default)]
pub struct Sequential {
    counters: HashMap<&'static str, usize>,
}

impl Sequential {
    /// Creates a new [`Sequential`] generator starting every counter at `1`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for Sequential {
    fn generate(&mut self, kind: IdKind) -> String {
        let prefix = kind.prefix();
        let counter = self.counters.entry(prefix).or_default();
        *counter += 1;
        format!("{prefix}-{counter}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential_counts_per_prefix() {
        let mut ids = Sequential::new();

        assert_eq!(ids.generate(IdKind::Scope(ScopeKind::Feature)), "feature-1");
        assert_eq!(ids.generate(IdKind::Scope(ScopeKind::Scenario)), "scenario-1");
        assert_eq!(ids.generate(IdKind::Scope(ScopeKind::Scenario)), "scenario-2");
        assert_eq!(ids.generate(IdKind::Step), "step-1");
        assert_eq!(ids.generate(IdKind::Hook), "hook-1");
        assert_eq!(ids.generate(IdKind::Scope(ScopeKind::Feature)), "feature-2");
    }

    #[test]
    fn closures_are_generators() {
        let mut n = 0;
        let mut ids = |_: IdKind| {
            n += 1;
            format!("fixed-{n}")
        };

        assert_eq!(ids.generate(IdKind::Step), "fixed-1");
        assert_eq!(ids.generate(IdKind::Hook), "fixed-2");
    }

    #[test]
    fn ids_deref_to_str() {
        let id = ScopeId::new("rule-4");

        assert_eq!(id.as_str(), "rule-4");
        assert!(id.starts_with("rule"));
        assert_eq!(id.to_string(), "rule-4");
    }
}
