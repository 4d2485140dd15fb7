//! Stats command - show the membership counts and friend matrix for a group
//! structure without computing any match.

use clap::Args;

use crate::cli::compute::InputArgs;
use crate::cli::OutputFormat;
use crate::core::groups::GroupStructure;
use crate::parsing::literal::{parse_contributions, parse_groups};
use crate::utils::validation::{check_agent_limit, validate_contributions};

#[derive(Args)]
pub struct StatsArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

/// Execute the stats command
///
/// # Errors
///
/// Returns an error if the literals cannot be parsed or are invalid.
pub fn run(args: &StatsArgs, format: OutputFormat) -> anyhow::Result<()> {
    let groups = parse_groups(&args.input.groups)?;
    let contributions = parse_contributions(&args.input.contributions)?;
    validate_contributions(&contributions)?;
    check_agent_limit(contributions.len())?;

    let structure = GroupStructure::new(&groups, contributions.len())?;
    let memberships = structure.memberships();
    let friends = structure.friend_matrix();

    match format {
        OutputFormat::Text => {
            println!(
                "Agents: {}  Groups: {}",
                structure.num_agents(),
                structure.num_groups()
            );
            println!("\nAgent\tContribution\tMemberships\tFriends");
            for (agent, row) in friends.iter().enumerate() {
                let row: Vec<String> = row.iter().map(ToString::to_string).collect();
                println!(
                    "{agent}\t{}\t{}\t[{}]",
                    contributions[agent],
                    memberships[agent],
                    row.join(", ")
                );
            }
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "agents": structure.num_agents(),
                "groups": structure.groups(),
                "memberships": memberships,
                "friend_matrix": friends,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("agent\tcontribution\tmemberships\tgroup_indices");
            for agent in 0..structure.num_agents() {
                let indices: Vec<String> = structure
                    .groups_of(agent)
                    .iter()
                    .map(ToString::to_string)
                    .collect();
                println!(
                    "{agent}\t{}\t{}\t{}",
                    contributions[agent],
                    memberships[agent],
                    indices.join(",")
                );
            }
        }
    }

    Ok(())
}
