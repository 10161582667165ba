use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "license-warden",
    about = "Detect dependency licenses and check them against a compliance policy",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Show all detections (not just violations) in check output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print the summary line
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Detect licenses for a project's dependencies and license files
    Detect {
        /// Project path to scan
        #[arg(default_value = ".")]
        path: PathBuf,

        /// JSON input document instead of scanning the project
        #[arg(long, value_name = "FILE")]
        input: Option<PathBuf>,

        /// Report format
        #[arg(long, default_value = "terminal", value_name = "FORMAT")]
        format: ReportFormat,
    },

    /// Detect licenses and evaluate them against the policy
    Check {
        /// Project path to scan
        #[arg(default_value = ".")]
        path: PathBuf,

        /// JSON input document instead of scanning the project
        #[arg(long, value_name = "FILE")]
        input: Option<PathBuf>,

        /// Policy config file [default: ./.license-warden/config.toml, fallback ~/.config/license-warden/config.toml]
        #[arg(long, value_name = "FILE")]
        policy: Option<PathBuf>,

        /// Report format
        #[arg(long, default_value = "terminal", value_name = "FORMAT")]
        format: ReportFormat,
    },

    /// Render a NOTICE document for attribution-requiring components
    Notice {
        /// Project path to scan
        #[arg(default_value = ".")]
        path: PathBuf,

        /// JSON input document instead of scanning the project
        #[arg(long, value_name = "FILE")]
        input: Option<PathBuf>,

        /// Write the NOTICE text to a file instead of stdout
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum ReportFormat {
    Terminal,
    Json,
}
