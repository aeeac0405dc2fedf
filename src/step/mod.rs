// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Step patterns and their matching.

pub mod expression;
pub mod index;
pub mod location;
pub mod parameter;
pub mod regex;

pub use self::{
    expression::StepExpression,
    index::{DEFAULT_MAX_SUGGESTIONS, StepContext, StepIndex},
    location::Location,
    parameter::ParameterRegistry,
    regex::HashableRegex,
};
