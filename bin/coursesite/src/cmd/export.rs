//! Export command - render and write the enabled course pages

use std::path::{Path, PathBuf};

use color_eyre::eyre::{Result, WrapErr, bail};
use coursesite_generator::{ExportReport, SiteExporter, WriteStatus};

use super::{load_config, open_record};

/// Run the export command.
///
/// `output` overrides `build.output_dir` from the configuration.
pub fn run(config_path: &Path, record_path: &Path, output: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let record = open_record(record_path)?;

    let target_dir = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(&config.build.output_dir));
    tracing::info!(?record_path, ?target_dir, "Starting export");

    let report = SiteExporter::new(config)
        .export(&record, &target_dir)
        .wrap_err("Export failed")?;

    print_report(&report);

    if !report.is_success() {
        bail!(
            "Export incomplete: {} page(s) could not be written",
            report.failures().count()
        );
    }

    Ok(())
}

fn print_report(report: &ExportReport) {
    println!();
    if report.nothing_selected() {
        println!("  No pages are enabled; nothing was exported.");
        println!();
        return;
    }

    for outcome in &report.outcomes {
        match &outcome.status {
            WriteStatus::Written { bytes } => {
                println!("  ✓ {} ({bytes} bytes)", outcome.path.display());
            }
            WriteStatus::Failed(err) => println!("  ✗ {err}"),
        }
    }

    println!();
    if let Some(sessions) = report.sessions {
        println!("  Lectures:   {sessions}");
    }
    println!("  Written:    {}", report.written().count());
    println!("  Duration:   {}ms", report.duration_ms);
    println!("  Output:     {}", report.target_dir.display());
    println!();
}
