//! Mechanisms command - list the available formulas and their keywords.

use crate::cli::OutputFormat;
use crate::core::types::Mechanism;

fn describe(mechanism: Mechanism) -> &'static str {
    match mechanism {
        Mechanism::Vcm => "divide each contribution by the agent's group count",
        Mechanism::Scm => "divide each contribution by the squared group count",
        Mechanism::Cocm => "reward support corroborated by unconnected groups",
        Mechanism::Om => "weight agents by solving for group-overlap offsets [ADD_SINGLETONS]",
        Mechanism::Pm => "decaying bonus between every pair of agents [M]",
    }
}

/// Execute the mechanisms command
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn run(format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            println!("Mechanisms are specified by the following keywords:");
            for mechanism in Mechanism::ALL {
                println!(
                    "  {:<5} {:<36} {}",
                    mechanism.keyword(),
                    mechanism.formula_name(),
                    describe(mechanism)
                );
            }
        }
        OutputFormat::Json => {
            let entries: Vec<_> = Mechanism::ALL
                .into_iter()
                .map(|m| {
                    serde_json::json!({
                        "keyword": m.keyword(),
                        "name": m.formula_name(),
                        "uses_groups": m.uses_groups(),
                        "description": describe(m),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        OutputFormat::Tsv => {
            println!("keyword\tname\tuses_groups");
            for mechanism in Mechanism::ALL {
                println!(
                    "{}\t{}\t{}",
                    mechanism.keyword(),
                    mechanism.formula_name(),
                    mechanism.uses_groups()
                );
            }
        }
    }
    Ok(())
}
