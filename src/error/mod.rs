// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Error types of building a [`TestPlan`].
//!
//! Every failure is fail-fast: the first inconsistency aborts the whole build.
//!
//! # Modules
//!
//! - [`core`] - Top-level [`PlanError`] consolidating everything below.
//! - [`scope`] - Structural errors of composing a scope tree.
//! - [`reconcile`] - Pairing errors between Gherkin nodes and scopes, and
//!   identity collisions.
//! - [`step`] - Step resolution errors.
//! - [`world`] - World factory errors.
//! - [`document`] - Gherkin document conversion errors.
//!
//! [`TestPlan`]: crate::TestPlan

pub mod core;
pub mod document;
pub mod reconcile;
pub mod scope;
pub mod step;
pub mod world;

pub use self::{
    core::{PlanError, Result},
    document::{DocumentError, DocumentResult},
    reconcile::{IdentityError, ReconcileError, ReconcileResult},
    scope::{ScopeError, ScopeResult},
    step::{StepError, StepResult},
    world::{WorldError, WorldResult},
};
