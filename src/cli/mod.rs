//! Command-line interface for plural-qf.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **vcm / scm / cocm**: Cluster-match formulas
//! - **om**: Offset match (optional `ADD_SINGLETONS`, default true)
//! - **pm**: Pairwise matching (optional `M`, default 100)
//! - **mechanisms**: List the available formulas
//! - **stats**: Show memberships and the friend matrix
//!
//! ## Usage
//!
//! ```text
//! # Agents 0 and 1 share a group, as do agents 1 and 2.
//! # Agent 0 gave 10, agent 1 gave 20 and agent 2 gave 0.
//! plural-qf cocm "[[0, 1], [1, 2]]" "[10, 20, 0]"
//!
//! # Offset match without singleton preprocessing
//! plural-qf om "[[0, 1], [1, 2]]" "[10, 20, 0]" False
//!
//! # Pairwise matching with M = 50, JSON output
//! plural-qf pm "[]" "[10, 20, 0]" 50 --format json
//! ```

use clap::{Parser, Subcommand};

use crate::core::types::Mechanism;
use crate::matching::engine::MatchingConfig;

pub mod compute;
pub mod mechanisms;
pub mod stats;

#[derive(Parser)]
#[command(name = "plural-qf")]
#[command(version)]
#[command(about = "Compute quadratic-funding matches that account for group connections")]
#[command(
    long_about = "plural-qf computes the matched funding for a single project from the agents' contributions and the groups they belong to.\n\n<GROUPS> is a list of lists; each inner list holds the indices of the agents in that group.\n<CONTRIBUTIONS> is a list; element i is the amount agent i contributed."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Vanilla cluster match
    #[command(alias = "vanilla-cluster-match")]
    Vcm(compute::InputArgs),

    /// Squared cluster match
    #[command(alias = "squared-cluster-match")]
    Scm(compute::InputArgs),

    /// Connection-oriented cluster match
    #[command(alias = "connection-oriented-cluster-match")]
    Cocm(compute::InputArgs),

    /// Offset match
    #[command(alias = "offset-match")]
    Om(compute::OffsetArgs),

    /// Pairwise matching
    #[command(alias = "pairwise-matching")]
    Pm(compute::PairwiseArgs),

    /// List the available mechanisms
    Mechanisms,

    /// Show membership counts and the friend matrix
    Stats(stats::StatsArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Dispatch a parsed command line
///
/// # Errors
///
/// Returns an error if the selected command fails.
pub fn dispatch(cli: Cli) -> anyhow::Result<()> {
    let defaults = MatchingConfig::default();

    match cli.command {
        Commands::Vcm(args) => {
            compute::run(Mechanism::Vcm, &args, defaults, cli.format, cli.verbose)
        }
        Commands::Scm(args) => {
            compute::run(Mechanism::Scm, &args, defaults, cli.format, cli.verbose)
        }
        Commands::Cocm(args) => {
            compute::run(Mechanism::Cocm, &args, defaults, cli.format, cli.verbose)
        }
        Commands::Om(args) => {
            let config = MatchingConfig {
                add_singletons: args.add_singletons,
                ..defaults
            };
            compute::run(Mechanism::Om, &args.input, config, cli.format, cli.verbose)
        }
        Commands::Pm(args) => {
            let config = MatchingConfig {
                pairwise_scale: args.scale,
                ..defaults
            };
            compute::run(Mechanism::Pm, &args.input, config, cli.format, cli.verbose)
        }
        Commands::Mechanisms => mechanisms::run(cli.format),
        Commands::Stats(args) => stats::run(&args, cli.format),
    }
}
