use clap::Args;
use serde::Serialize;

use crate::catalog::store::PrefixRegistry;
use crate::cli::OutputFormat;
use crate::core::barcode::SangerBarcode;

#[derive(Args)]
pub struct ValidateArgs {
    /// Barcodes to check, in human (PR1234K) or machine (4500001234757) form
    #[arg(required = true)]
    pub barcodes: Vec<String>,

    /// Treat human barcodes without a checksum letter as invalid
    #[arg(long)]
    pub checksum_required: bool,
}

/// Outcome for one input barcode
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub input: String,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub human_barcode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub fn run(
    args: ValidateArgs,
    registry: &PrefixRegistry,
    format: OutputFormat,
    verbose: bool,
) -> anyhow::Result<()> {
    let reports: Vec<ValidationReport> = args
        .barcodes
        .iter()
        .map(|input| validate_one(registry, input, args.checksum_required))
        .collect();

    match format {
        OutputFormat::Text => {
            for report in &reports {
                match (&report.error, report.valid) {
                    (Some(error), _) => println!("{}\tINVALID\t{error}", report.input),
                    (None, true) => println!("{}\tOK", report.input),
                    (None, false) => println!("{}\tINVALID", report.input),
                }
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&reports)?),
        OutputFormat::Tsv => {
            println!("input\tvalid\thuman_barcode\terror");
            for report in &reports {
                println!(
                    "{}\t{}\t{}\t{}",
                    report.input,
                    report.valid,
                    report.human_barcode.as_deref().unwrap_or(""),
                    report.error.as_deref().unwrap_or("")
                );
            }
        }
    }

    let invalid = reports.iter().filter(|r| !r.valid).count();
    if verbose {
        eprintln!("{} of {} barcodes valid", reports.len() - invalid, reports.len());
    }
    if invalid > 0 {
        anyhow::bail!("{invalid} of {} barcodes are invalid", reports.len());
    }

    Ok(())
}

/// Parse and validate a single barcode; parse failures are reported, not raised
pub fn validate_one(
    registry: &PrefixRegistry,
    input: &str,
    checksum_required: bool,
) -> ValidationReport {
    match SangerBarcode::parse_in(registry, input, checksum_required) {
        Ok(barcode) => ValidationReport {
            input: input.to_string(),
            valid: barcode.is_valid(),
            human_barcode: barcode.human_barcode().map(str::to_string),
            error: None,
        },
        Err(e) => ValidationReport {
            input: input.to_string(),
            valid: false,
            human_barcode: None,
            error: Some(e.to_string()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_one() {
        let registry = PrefixRegistry::load_embedded().unwrap();

        let ok = validate_one(&registry, "4500001234757", false);
        assert!(ok.valid);
        assert_eq!(ok.human_barcode.as_deref(), Some("PR1234K"));

        let misread = validate_one(&registry, "4500001234758", false);
        assert!(!misread.valid);
        assert!(misread.error.is_none());

        let unknown = validate_one(&registry, "XX1234X", false);
        assert!(!unknown.valid);
        assert!(unknown.error.unwrap().contains("XX"));

        let missing = validate_one(&registry, "PR1234", true);
        assert!(!missing.valid);
        assert!(missing.error.is_some());
    }
}
