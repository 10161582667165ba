//! `license-warden` — detect dependency licenses and check policy compliance.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]).
//! 2. Gather a detect input from `--input` or a project scan ([`inputs`]).
//! 3. Detect licenses ([`detect::detect`]).
//! 4. For `check`: load the policy ([`config::load_config`]) and evaluate
//!    ([`policy::evaluate`]).
//! 5. Render the requested report ([`report`]) or NOTICE text ([`notice`]).
//! 6. Exit `0` (clean) or `1` (policy violations found).

use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use license_warden::cli::{Cli, Commands, ReportFormat};
use license_warden::models::{DetectionReport, LicenseInfo};
use license_warden::{config, detect, inputs, notice, policy, report};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Detect {
            path,
            input,
            format,
        } => {
            let path = path.canonicalize().unwrap_or(path);
            let detection = run_detection(&path, input.as_deref(), cli.quiet)?;

            match format {
                ReportFormat::Terminal => {
                    report::terminal::render(&detection, None, &path, cli.verbose, cli.quiet)?;
                }
                ReportFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&detection)?);
                }
            }
        }

        Commands::Check {
            path,
            input,
            policy: policy_override,
            format,
        } => {
            let path = path.canonicalize().unwrap_or(path);
            let config = config::load_config(&path, policy_override.as_deref())?;
            let detection = run_detection(&path, input.as_deref(), cli.quiet)?;

            let licenses: Vec<LicenseInfo> =
                detection.detected.iter().map(LicenseInfo::from).collect();
            let compat = policy::evaluate(&licenses, &config.to_policy())?;

            match format {
                ReportFormat::Terminal => {
                    report::terminal::render(
                        &detection,
                        Some(&compat),
                        &path,
                        cli.verbose,
                        cli.quiet,
                    )?;
                }
                ReportFormat::Json => {
                    let combined = report::check_document(&detection, &compat);
                    println!("{}", serde_json::to_string_pretty(&combined)?);
                }
            }

            if !compat.compatible {
                std::process::exit(1);
            }
        }

        Commands::Notice {
            path,
            input,
            output,
        } => {
            let path = path.canonicalize().unwrap_or(path);
            let detection = run_detection(&path, input.as_deref(), cli.quiet)?;
            let text = notice::render(&detection.detected);

            match output {
                Some(file) => {
                    std::fs::write(&file, &text)?;
                    if !cli.quiet {
                        eprintln!("  {} wrote NOTICE to {}", "→".cyan(), file.display());
                    }
                }
                None => print!("{}", text),
            }
        }
    }

    Ok(())
}

fn run_detection(
    path: &std::path::Path,
    input_override: Option<&std::path::Path>,
    quiet: bool,
) -> Result<DetectionReport> {
    let input = inputs::gather(path, input_override)?;

    let dep_count = input.dependencies.as_deref().map_or(0, |d| d.len());
    let file_count = input.files.as_deref().map_or(0, |f| f.len());
    if !quiet {
        eprintln!(
            "  {} {} dependencies, {} license files",
            "→".cyan(),
            dep_count,
            file_count
        );
    }

    Ok(detect::detect(&input)?)
}
