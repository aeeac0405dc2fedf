// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Configuration of a [`Planner`].
//!
//! [`Planner`]: crate::Planner

use smart_default::SmartDefault;

use crate::{ExecutionMode, fuzzy::Coloring, step::DEFAULT_MAX_SUGGESTIONS};

/// Knobs of composing scopes and building [`TestPlan`]s.
///
/// [`TestPlan`]: crate::TestPlan
#[derive(Clone, Copy, Debug, Eq, PartialEq, SmartDefault)]
pub struct PlanConfig {
    /// [`ExecutionMode`] of scopes and step definitions not setting one.
    #[default(ExecutionMode::Default)]
    pub default_mode: ExecutionMode,

    /// Maximum number of "did you mean" suggestions of an unmatched step.
    #[default(DEFAULT_MAX_SUGGESTIONS)]
    pub max_suggestions: usize,

    /// Coloring of rendered suggestions.
    #[default(Coloring::Auto)]
    pub coloring: Coloring,
}
