use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::catalog::store::PrefixRegistry;
use crate::cli::OutputFormat;
use crate::core::prefix::Prefix;

#[derive(Args)]
pub struct PrefixesArgs {
    #[command(subcommand)]
    pub command: PrefixesCommands,
}

#[derive(Subcommand)]
pub enum PrefixesCommands {
    /// List all registered prefixes
    List,

    /// Show one prefix, looked up by letters (PR) or number (450)
    Show {
        /// Prefix code
        #[arg(required = true)]
        code: String,
    },

    /// Export the registry to a file
    Export {
        /// Output file path
        #[arg(required = true)]
        output: PathBuf,
    },
}

pub fn run(args: PrefixesArgs, registry: &PrefixRegistry, format: OutputFormat) -> anyhow::Result<()> {
    match args.command {
        PrefixesCommands::List => {
            let prefixes: Vec<&Prefix> = registry.iter().collect();
            print_prefixes(&prefixes, format)?;
        }
        PrefixesCommands::Show { code } => {
            let prefix = lookup(registry, &code)?;
            print_prefixes(&[&prefix], format)?;
        }
        PrefixesCommands::Export { output } => {
            std::fs::write(&output, registry.to_json()?)?;
            println!(
                "Exported {} prefixes to {}",
                registry.len(),
                output.display()
            );
        }
    }
    Ok(())
}

/// Resolve a prefix given in either form
fn lookup(registry: &PrefixRegistry, code: &str) -> anyhow::Result<Prefix> {
    let code = code.trim();
    let prefix = match code.parse::<u32>() {
        Ok(machine) => registry.from_machine(machine)?,
        Err(_) => registry.from_human(&code.to_ascii_uppercase())?,
    };
    Ok(prefix)
}

fn print_prefixes(prefixes: &[&Prefix], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            println!("{:<8} {:>8} {:>16}", "Prefix", "Code", "Scaled");
            for prefix in prefixes {
                println!(
                    "{:<8} {:>8} {:>16}",
                    prefix.human(),
                    prefix.machine_code(),
                    prefix.machine_full()
                );
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(prefixes)?),
        OutputFormat::Tsv => {
            println!("human\tmachine");
            for prefix in prefixes {
                println!("{}\t{}", prefix.human(), prefix.machine_code());
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_either_form() {
        let registry = PrefixRegistry::load_embedded().unwrap();
        assert_eq!(lookup(&registry, "PR").unwrap().machine_code(), 450);
        assert_eq!(lookup(&registry, "pr").unwrap().machine_code(), 450);
        assert_eq!(lookup(&registry, "450").unwrap().human(), "PR");
        assert!(lookup(&registry, "ZZ").is_err());
    }
}
