use clap::Args;

use crate::catalog::store::PrefixRegistry;
use crate::cli::OutputFormat;
use crate::core::barcode::SangerBarcode;

#[derive(Args)]
pub struct SplitArgs {
    /// Barcode in human (PR1234K) or machine (4500001234757) form
    #[arg(required = true)]
    pub barcode: String,
}

pub fn run(args: SplitArgs, registry: &PrefixRegistry, format: OutputFormat) -> anyhow::Result<()> {
    let barcode = SangerBarcode::parse_in(registry, &args.barcode, false)?;
    let (machine_prefix, number, machine_checksum) = barcode.split_barcode();
    let (human_prefix, _, human_checksum) = barcode.split_human_barcode();

    match format {
        OutputFormat::Text => {
            println!("Prefix: {human_prefix} ({machine_prefix})");
            println!("Number: {number}");
            println!("Checksum: {human_checksum} ({machine_checksum})");
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "human": [human_prefix, number.to_string(), human_checksum.to_string()],
                "machine": [machine_prefix, number, machine_checksum],
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("prefix\tmachine_prefix\tnumber\tchecksum\tmachine_checksum");
            println!(
                "{human_prefix}\t{machine_prefix}\t{number}\t{human_checksum}\t{machine_checksum}"
            );
        }
    }

    Ok(())
}
