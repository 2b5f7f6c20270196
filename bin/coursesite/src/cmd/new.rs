//! New command - create a course record with new-course defaults

use std::path::Path;

use chrono::Local;
use color_eyre::eyre::{Result, WrapErr, bail};
use coursesite_core::{CourseRecord, save_record};

use super::edit::EditArgs;

/// Run the new command.
///
/// Starts from the defaults for a course created today, then applies any
/// field flags given on the command line.
pub fn run(record_path: &Path, args: EditArgs, force: bool) -> Result<()> {
    tracing::info!(?record_path, force, "Creating new course record");

    if record_path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            record_path.display()
        );
    }

    let mut record = CourseRecord::new_for(Local::now().date_naive());
    record.apply_edits(args.into_edits());

    save_record(record_path, &record).wrap_err("Failed to write course record")?;

    tracing::info!(?record_path, course = %record.code(), "Created course record");
    println!("Created: {}", record_path.display());

    Ok(())
}
