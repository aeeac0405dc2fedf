// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Outcome of running an [`Execution`].
//!
//! [`Execution`]: super::Execution

use std::{
    fmt,
    time::{Duration, SystemTime},
};

use derive_more::with_trait::Display;
use serde::Serialize;

/// Status of an [`ExecutionResult`].
#[derive(
    Clone, Copy, Debug, Default, Display, Eq, Hash, PartialEq, Serialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Not run yet, or explicitly marked as pending.
    #[default]
    #[display("pending")]
    Pending,

    /// Ran and passed.
    #[display("passed")]
    Passed,

    /// Ran and failed.
    #[display("failed")]
    Failed,

    /// Skipped by the runner.
    #[display("skipped")]
    Skipped,
}

/// Mutable result of an [`Execution`].
///
/// [`Execution`]: super::Execution
#[derive(Clone, Debug, Default, Serialize)]
pub struct ExecutionResult {
    /// Current [`Status`].
    pub status: Status,

    /// Time the run started at.
    pub started_at: Option<SystemTime>,

    /// Time the run completed at.
    pub completed_at: Option<SystemTime>,

    /// Failure message, if [`Status::Failed`].
    pub error: Option<String>,

    /// Reason of a skip or a pending mark.
    pub reason: Option<String>,
}

impl ExecutionResult {
    /// Time taken by the run, if it both started and completed.
    #[must_use]
    pub fn elapsed(&self) -> Option<Duration> {
        let (start, end) = (self.started_at?, self.completed_at?);
        end.duration_since(start).ok()
    }

    pub(super) fn start(&mut self) {
        *self = Self { started_at: Some(SystemTime::now()), ..Self::default() };
    }

    pub(super) fn complete(
        &mut self,
        status: Status,
        error: Option<String>,
        reason: Option<String>,
    ) {
        self.status = status;
        self.completed_at = Some(SystemTime::now());
        self.error = error;
        self.reason = reason;
    }
}

impl fmt::Display for ExecutionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.status)?;
        if let Some(elapsed) = self.elapsed() {
            // Truncated to whole milliseconds.
            let millis = Duration::from_millis(
                u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            );
            write!(f, " in {}", humantime::format_duration(millis))?;
        }
        if let Some(msg) = self.error.as_ref().or(self.reason.as_ref()) {
            write!(f, ": {msg}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_pending() {
        let res = ExecutionResult::default();
        assert_eq!(res.status, Status::Pending);
        assert!(res.started_at.is_none());
        assert_eq!(res.to_string(), "pending");
    }

    #[test]
    fn displays_elapsed_time_and_error() {
        let start = SystemTime::UNIX_EPOCH;
        let res = ExecutionResult {
            status: Status::Failed,
            started_at: Some(start),
            completed_at: Some(start + Duration::from_millis(1500)),
            error: Some("boom".into()),
            reason: None,
        };
        assert_eq!(res.elapsed(), Some(Duration::from_millis(1500)));
        assert_eq!(res.to_string(), "failed in 1s 500ms: boom");
    }

    #[test]
    fn serializes_status_lowercase() {
        let res = ExecutionResult {
            status: Status::Skipped,
            reason: Some("not today".into()),
            ..ExecutionResult::default()
        };
        let json = serde_json::to_value(&res).unwrap();
        assert_eq!(json["status"], "skipped");
        assert_eq!(json["reason"], "not today");
    }
}
