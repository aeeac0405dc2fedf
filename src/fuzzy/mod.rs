// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! "Did you mean" suggestions for steps no definition matched.
//!
//! Every candidate pattern is diffed word by word against the step text, and
//! its placeholders are filled back with the literal words they stand
//! against. The closer that merged text is to the step text, the better the
//! candidate. Nothing in here ever fails.

pub mod diff;
pub mod distance;
pub mod rank;
pub mod report;

pub use self::{
    rank::{Suggestion, Suggestions, rank},
    report::{Coloring, Report},
};
