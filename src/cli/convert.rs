use clap::Args;

use crate::catalog::store::PrefixRegistry;
use crate::cli::OutputFormat;
use crate::core::barcode::{BarcodeSummary, SangerBarcode};
use crate::core::error::BarcodeError;

#[derive(Args, Default)]
pub struct ConvertArgs {
    /// Two-letter prefix (use with --number)
    #[arg(long)]
    pub prefix: Option<String>,

    /// Sequence number (use with --prefix)
    #[arg(long)]
    pub number: Option<u64>,

    /// Human-readable barcode, e.g. PR1234K
    #[arg(long)]
    pub human: Option<String>,

    /// Machine barcode as read by a scanner, e.g. 4500001234757
    #[arg(long)]
    pub machine: Option<String>,

    /// Reject human barcodes missing their checksum letter
    #[arg(long)]
    pub checksum_required: bool,
}

pub fn run(
    args: ConvertArgs,
    registry: &PrefixRegistry,
    format: OutputFormat,
    verbose: bool,
) -> anyhow::Result<()> {
    let barcode = resolve_input(&args, registry)?;
    let summary = barcode.summary();

    if verbose {
        eprintln!(
            "Parsed prefix {} ({}), number {}",
            summary.prefix, summary.machine_prefix, summary.number
        );
    }

    // Surface an oversized number rather than silently omitting the machine form
    barcode.machine_barcode()?;

    match format {
        OutputFormat::Text => print_text_summary(&summary),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
        OutputFormat::Tsv => print_tsv_summary(&summary),
    }

    Ok(())
}

/// Build a barcode from exactly one of the three input forms
///
/// # Errors
///
/// Returns `BarcodeError::ConstructionError` unless exactly one form was given,
/// otherwise any error from the matching constructor.
pub fn resolve_input(
    args: &ConvertArgs,
    registry: &PrefixRegistry,
) -> Result<SangerBarcode, BarcodeError> {
    match (&args.prefix, args.number, &args.human, &args.machine) {
        (Some(prefix), Some(number), None, None) => {
            SangerBarcode::from_components_in(registry, prefix, number)
        }
        (None, None, Some(human), None) => {
            SangerBarcode::from_human_in(registry, human.trim(), args.checksum_required)
        }
        (None, None, None, Some(machine)) => SangerBarcode::from_machine_str_in(registry, machine),
        _ => Err(BarcodeError::ConstructionError),
    }
}

fn print_text_summary(summary: &BarcodeSummary) {
    println!("Barcode");
    println!("{}", "=".repeat(40));
    println!("  Prefix: {} ({})", summary.prefix, summary.machine_prefix);
    println!("  Number: {}", summary.number);
    println!(
        "  Checksum: {} ({})",
        summary.checksum, summary.machine_checksum
    );
    println!(
        "  Human barcode: {}",
        summary.human_barcode.as_deref().unwrap_or("-")
    );
    println!(
        "  Machine barcode: {}",
        summary
            .machine_barcode
            .map_or_else(|| "-".to_string(), |code| code.to_string())
    );
    println!("  Valid: {}", summary.valid);
}

fn print_tsv_summary(summary: &BarcodeSummary) {
    println!("prefix\tnumber\tchecksum\thuman_barcode\tmachine_barcode\tvalid");
    println!(
        "{}\t{}\t{}\t{}\t{}\t{}",
        summary.prefix,
        summary.number,
        summary.checksum,
        summary.human_barcode.as_deref().unwrap_or(""),
        summary
            .machine_barcode
            .map(|code| code.to_string())
            .unwrap_or_default(),
        summary.valid,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> PrefixRegistry {
        PrefixRegistry::load_embedded().unwrap()
    }

    #[test]
    fn test_resolve_each_form() {
        let registry = registry();

        let components = ConvertArgs {
            prefix: Some("PR".to_string()),
            number: Some(1234),
            ..Default::default()
        };
        let human = ConvertArgs {
            human: Some("PR1234K".to_string()),
            ..Default::default()
        };
        let machine = ConvertArgs {
            machine: Some("4500001234757".to_string()),
            ..Default::default()
        };

        for args in [components, human, machine] {
            let barcode = resolve_input(&args, &registry).unwrap();
            assert_eq!(barcode.human_barcode(), Some("PR1234K"));
        }
    }

    #[test]
    fn test_resolve_requires_exactly_one_form() {
        let registry = registry();

        let none = ConvertArgs::default();
        let two = ConvertArgs {
            human: Some("PR1234K".to_string()),
            machine: Some("4500001234757".to_string()),
            ..Default::default()
        };
        let half = ConvertArgs {
            prefix: Some("PR".to_string()),
            ..Default::default()
        };

        for args in [none, two, half] {
            assert_eq!(
                resolve_input(&args, &registry).unwrap_err(),
                BarcodeError::ConstructionError
            );
        }
    }

    #[test]
    fn test_resolve_non_numeric_machine() {
        let args = ConvertArgs {
            machine: Some("PR1234K".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            resolve_input(&args, &registry()),
            Err(BarcodeError::InvalidBarcode(_))
        ));
    }

    #[test]
    fn test_resolve_checksum_required() {
        let args = ConvertArgs {
            human: Some("PR1234".to_string()),
            checksum_required: true,
            ..Default::default()
        };
        assert_eq!(
            resolve_input(&args, &registry()).unwrap_err(),
            BarcodeError::ChecksumRequired
        );
    }
}
