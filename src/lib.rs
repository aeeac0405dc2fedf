// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Planning of [Cucumber] test runs.
//!
//! Scopes (features, rules, scenarios and outlines) along with their step and
//! hook definitions are registered in code through a [`Composer`], and
//! reconciled with parsed [Gherkin] documents into a [`TestPlan`]: a flat,
//! ordered list of [`Execution`]s, each one with every Gherkin step resolved
//! to its [`StepDefinition`].
//!
//! ```rust
//! # use cucumber_plan::{Planner, ScopeMetadata, document::Feature};
//! #
//! let planner = Planner::default();
//!
//! let mut composer = planner.composer();
//! composer.feature("Calculator", ScopeMetadata::new(), |c| {
//!     c.given("I have entered {int} into the calculator")?;
//!     c.when("I press add")?;
//!     c.then("the result should be {int} on the screen")?;
//!     c.scenario("Add two numbers", ScopeMetadata::new(), |_| Ok(()))?;
//!     Ok(())
//! })?;
//! let scopes = composer.into_plan()?;
//!
//! let doc = Feature::parse_str(
//!     "Feature: Calculator
//!        Scenario: Add two numbers
//!          Given I have entered 50 into the calculator
//!          And I have entered 70 into the calculator
//!          When I press add
//!          Then the result should be 120 on the screen
//!     ",
//! )?;
//! let plan = planner.plan(&doc, &scopes)?;
//!
//! let execution = &plan.list_executables()[0];
//! assert_eq!(execution.steps.len(), 4);
//! assert_eq!(
//!     execution.qualified_name,
//!     "Feature: Calculator [feature-1] > Scenario: Add two numbers [scenario-1]",
//! );
//! # Ok::<_, cucumber_plan::PlanError>(())
//! ```
//!
//! [Cucumber]: https://cucumber.io
//! [Gherkin]: https://cucumber.io/docs/gherkin/reference

#![deny(nonstandard_style, trivial_casts, trivial_numeric_casts)]
#![forbid(non_ascii_idents, unsafe_code)]
#![warn(
    clippy::clone_on_ref_ptr,
    clippy::dbg_macro,
    clippy::expect_used,
    clippy::missing_const_for_fn,
    clippy::pedantic,
    clippy::print_stderr,
    clippy::print_stdout,
    clippy::str_to_string,
    clippy::todo,
    clippy::unwrap_used,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_results
)]
#![cfg_attr(
    test,
    allow(clippy::unwrap_used, clippy::expect_used, unused_results)
)]

pub mod adapter;
pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod fuzzy;
pub mod plan;
pub mod scope;
pub mod step;
pub mod world;

pub use gherkin;

pub use self::{
    adapter::{Adapter, ScenarioSummary},
    config::PlanConfig,
    error::PlanError,
    plan::{
        Execution, ExecutionResult, PlanBuilder, Planner, Status, TestPlan,
    },
    scope::{
        Composer, ExecutionMode, HookDefinition, HookType, ScopeKind,
        ScopeMetadata, ScopeNode, ScopePlan, StepDefinition, StepKeyword,
    },
    step::{ParameterRegistry, StepExpression},
    world::{WorldFactory, WorldRequest},
};
