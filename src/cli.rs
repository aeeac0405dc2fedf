// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! CLI options of a [`Planner`].
//!
//! [`Opts`] derive [`clap::Args`], so a host runner flattens them into its
//! own CLI:
//! ```rust
//! # use cucumber_plan::{Planner, cli};
//! #
//! #[derive(cli::Parser)] // re-export of `clap::Parser`
//! struct Cli {
//!     #[command(flatten)]
//!     plan: cli::Opts,
//! }
//!
//! let cli = <Cli as cli::Parser>::parse_from(["runner", "--suggestions", "2"]);
//! let planner = Planner::new(cli.plan.config());
//! assert_eq!(planner.config().max_suggestions, 2);
//! ```
//!
//! [`Planner`]: crate::Planner

use smart_default::SmartDefault;

use crate::{
    ExecutionMode, PlanConfig, fuzzy::Coloring, step::DEFAULT_MAX_SUGGESTIONS,
};

pub use clap::{Args, Parser};

/// CLI options mapping onto a [`PlanConfig`].
#[derive(Clone, Copy, Debug, SmartDefault, clap::Args)]
#[group(skip)]
pub struct Opts {
    /// Execution mode of scopes and step definitions not setting one.
    #[arg(
        long,
        value_name = "mode",
        value_enum,
        default_value_t = ExecutionMode::Default,
        global = true
    )]
    #[default(ExecutionMode::Default)]
    pub default_mode: ExecutionMode,

    /// Maximum number of "did you mean" suggestions of an unmatched step.
    #[arg(
        long,
        value_name = "n",
        default_value_t = DEFAULT_MAX_SUGGESTIONS,
        global = true
    )]
    #[default(DEFAULT_MAX_SUGGESTIONS)]
    pub suggestions: usize,

    /// Coloring policy of rendered suggestions.
    #[arg(
        long,
        value_name = "auto|always|never",
        default_value = "auto",
        global = true
    )]
    #[default(Coloring::Auto)]
    pub color: Coloring,
}

impl Opts {
    /// Returns the [`PlanConfig`] these [`Opts`] describe.
    #[must_use]
    pub const fn config(&self) -> PlanConfig {
        PlanConfig {
            default_mode: self.default_mode,
            max_suggestions: self.suggestions,
            coloring: self.color,
        }
    }
}

impl From<Opts> for PlanConfig {
    fn from(opts: Opts) -> Self {
        opts.config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, clap::Parser)]
    struct Cli {
        #[command(flatten)]
        opts: Opts,
    }

    fn parse(args: &[&str]) -> Result<Opts, clap::Error> {
        Cli::try_parse_from(std::iter::once("runner").chain(args.iter().copied()))
            .map(|cli| cli.opts)
    }

    #[test]
    fn defaults_match_config_defaults() {
        let opts = parse(&[]).unwrap();
        assert_eq!(opts.config(), PlanConfig::default());
        assert_eq!(Opts::default().config(), PlanConfig::default());
    }

    #[test]
    fn parses_every_flag() {
        let opts = parse(&[
            "--default-mode",
            "concurrent",
            "--suggestions",
            "2",
            "--color",
            "never",
        ])
        .unwrap();

        let config = PlanConfig::from(opts);
        assert_eq!(config.default_mode, ExecutionMode::Concurrent);
        assert_eq!(config.max_suggestions, 2);
        assert_eq!(config.coloring, Coloring::Never);
    }

    #[test]
    fn rejects_unknown_values() {
        assert!(parse(&["--color", "sometimes"]).is_err());
        assert!(parse(&["--default-mode", "later"]).is_err());
    }
}
