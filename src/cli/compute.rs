//! Matching commands - compute the matched funding with one formula.

use clap::Args;
use tracing::warn;

use crate::cli::OutputFormat;
use crate::core::types::Mechanism;
use crate::matching::engine::{MatchOutcome, MatchingConfig, MatchingEngine};
use crate::matching::pairwise::DEFAULT_PAIRWISE_SCALE;
use crate::parsing::literal::{parse_contributions, parse_flag, parse_groups};

/// Group and contribution literals shared by every matching command
#[derive(Args)]
pub struct InputArgs {
    /// Groups as a list of lists of agent indices, e.g. "[[0, 1], [1, 2]]"
    #[arg(required = true)]
    pub groups: String,

    /// Contributions as a list indexed by agent, e.g. "[10, 20, 0]"
    #[arg(required = true)]
    pub contributions: String,
}

/// Arguments for offset match
#[derive(Args)]
pub struct OffsetArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Give every agent a singleton group before solving (true or false).
    /// Disabling this may make the calibration system unsolvable.
    #[arg(default_value = "true", value_parser = parse_flag, action = clap::ArgAction::Set)]
    pub add_singletons: bool,
}

/// Arguments for pairwise matching
#[derive(Args)]
pub struct PairwiseArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Decay constant M; larger values match large joint contributions more fully
    #[arg(default_value_t = DEFAULT_PAIRWISE_SCALE, allow_negative_numbers = true)]
    pub scale: f64,
}

/// Execute a matching command
///
/// # Errors
///
/// Returns an error if the literals cannot be parsed or the formula rejects
/// the input.
pub fn run(
    mechanism: Mechanism,
    input: &InputArgs,
    config: MatchingConfig,
    format: OutputFormat,
    verbose: bool,
) -> anyhow::Result<()> {
    let groups = parse_groups(&input.groups)?;
    let contributions = parse_contributions(&input.contributions)?;

    if verbose {
        eprintln!(
            "Mechanism: {} ({} agents, {} groups)",
            mechanism,
            contributions.len(),
            groups.len()
        );
    }

    if mechanism == Mechanism::Om && !config.add_singletons {
        warn!("singleton preprocessing disabled; the calibration system may be singular");
    }

    let engine = MatchingEngine::with_config(config);
    let outcome = engine.compute(mechanism, &groups, &contributions)?;

    match format {
        OutputFormat::Text => print_text_result(&outcome, verbose),
        OutputFormat::Json => print_json_result(&outcome, engine.config())?,
        OutputFormat::Tsv => print_tsv_result(&outcome),
    }

    Ok(())
}

fn print_text_result(outcome: &MatchOutcome, verbose: bool) {
    if verbose {
        eprintln!(
            "Contributed: {} | Subsidy: {}",
            outcome.contributed, outcome.subsidy
        );
    }
    println!("{}", outcome.funding);
}

fn print_json_result(outcome: &MatchOutcome, config: &MatchingConfig) -> anyhow::Result<()> {
    let mut output = serde_json::to_value(outcome)?;

    let options = match outcome.mechanism {
        Mechanism::Om => serde_json::json!({ "add_singletons": config.add_singletons }),
        Mechanism::Pm => serde_json::json!({ "scale": config.pairwise_scale }),
        Mechanism::Vcm | Mechanism::Scm | Mechanism::Cocm => serde_json::json!({}),
    };
    output["options"] = options;

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv_result(outcome: &MatchOutcome) {
    println!("mechanism\tagents\tgroups\tcontributed\tsubsidy\tfunding");
    println!(
        "{}\t{}\t{}\t{}\t{}\t{}",
        outcome.mechanism.keyword(),
        outcome.agents,
        outcome.groups,
        outcome.contributed,
        outcome.subsidy,
        outcome.funding,
    );
}
