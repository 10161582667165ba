use std::path::Path;

use anyhow::Result;
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::models::{CompatReport, Confidence, DetectionReport, UNKNOWN_LICENSE};

/// Render a colored terminal report. `compat` is present for `check` runs
/// and absent for plain `detect` runs.
pub fn render(
    detection: &DetectionReport,
    compat: Option<&CompatReport>,
    path: &Path,
    verbose: bool,
    quiet: bool,
) -> Result<()> {
    let total = detection.detected.len();
    let high = count_confidence(detection, Confidence::High);
    let medium = count_confidence(detection, Confidence::Medium);
    let low = count_confidence(detection, Confidence::Low);
    let unknown = detection
        .detected
        .iter()
        .filter(|d| d.license_id == UNKNOWN_LICENSE)
        .count();
    let violation_count = compat.map_or(0, |c| c.violations.len());

    if quiet {
        match compat {
            Some(c) => println!(
                "Total: {}  Unknown: {}  Violations: {}  {}",
                total,
                unknown,
                violation_count.to_string().red(),
                verdict_word(c),
            ),
            None => println!("Total: {}  Unknown: {}", total, unknown),
        }
        return Ok(());
    }

    println!(
        "\n {} v{}",
        "license-warden".bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!(" Scanning: {}\n", path.display());

    println!(" ┌────────────────────────────────────────────────────┐");
    println!(" │  {:<48} │", "SUMMARY".bold());
    println!(" │  {:<48} │", format!("Licenses detected  : {}", total));
    println!(
        " │  {:<48} │",
        format!("{}  High confidence : {:>4}", "✓".green(), high)
    );
    println!(
        " │  {:<48} │",
        format!("{}  Medium          : {:>4}", "~".yellow(), medium)
    );
    println!(
        " │  {:<48} │",
        format!("{}  Low / unknown   : {:>4}", "?".red(), low)
    );
    if let Some(c) = compat {
        println!(
            " │  {:<48} │",
            format!("{}  Violations      : {:>4}", "✗".red(), c.violations.len())
        );
    }
    println!(" └────────────────────────────────────────────────────┘\n");

    if let Some(c) = compat {
        if !c.violations.is_empty() {
            println!(" {} Policy violations:\n", "[VIOLATION]".red().bold());
            render_violation_table(c);
            println!();
        }
    }

    let all_warnings: Vec<&String> = detection
        .warnings
        .iter()
        .chain(compat.iter().flat_map(|c| c.warnings.iter()))
        .collect();
    if !all_warnings.is_empty() {
        println!(" {} Warnings:\n", "[WARN]".yellow().bold());
        for w in &all_warnings {
            println!("   {} {}", "⚠".yellow(), w);
        }
        println!();
    }

    // Detections table: always for detect runs, behind --verbose for check
    // runs where the violations are the point.
    if compat.is_none() || verbose {
        println!(" Detected licenses:\n");
        render_detection_table(detection);
        println!();
    }

    if let Some(c) = compat {
        if c.compatible {
            println!(" {} all licenses are compatible with policy\n", "✓".green().bold());
        } else {
            println!(
                " {} {} license(s) violate policy\n",
                "✗".red().bold(),
                c.violations.len()
            );
        }
    }

    Ok(())
}

fn render_detection_table(detection: &DetectionReport) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Name").add_attribute(Attribute::Bold),
            Cell::new("Version").add_attribute(Attribute::Bold),
            Cell::new("License").add_attribute(Attribute::Bold),
            Cell::new("Confidence").add_attribute(Attribute::Bold),
            Cell::new("Source").add_attribute(Attribute::Bold),
        ]);

    for d in &detection.detected {
        let confidence_color = match d.confidence {
            Confidence::High => Color::Green,
            Confidence::Medium => Color::Yellow,
            Confidence::Low => Color::Red,
        };
        let license_cell = if d.license_id == UNKNOWN_LICENSE {
            Cell::new(&d.license_id).fg(Color::DarkGrey)
        } else {
            Cell::new(&d.license_id)
        };

        table.add_row(vec![
            Cell::new(&d.name),
            Cell::new(d.version.as_deref().unwrap_or("-")),
            license_cell,
            Cell::new(d.confidence.to_string())
                .fg(confidence_color)
                .set_alignment(CellAlignment::Center),
            Cell::new(d.source.to_string()),
        ]);
    }

    println!("{}", table);
}

fn render_violation_table(compat: &CompatReport) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Name").add_attribute(Attribute::Bold),
            Cell::new("License").add_attribute(Attribute::Bold),
            Cell::new("Reason").add_attribute(Attribute::Bold),
        ]);

    for v in &compat.violations {
        table.add_row(vec![
            Cell::new(&v.name),
            Cell::new(&v.license_id).fg(Color::Red),
            Cell::new(&v.reason),
        ]);
    }

    println!("{}", table);
}

fn count_confidence(detection: &DetectionReport, confidence: Confidence) -> usize {
    detection
        .detected
        .iter()
        .filter(|d| d.confidence == confidence)
        .count()
}

fn verdict_word(compat: &CompatReport) -> ColoredString {
    if compat.compatible {
        "compatible".green()
    } else {
        "incompatible".red()
    }
}
