//! Show command - print a summary of a course record

use std::{fmt::Write as _, path::Path};

use color_eyre::eyre::Result;
use coursesite_core::CourseRecord;

use super::open_record;

/// Run the show command.
pub fn run(record_path: &Path) -> Result<()> {
    let record = open_record(record_path)?;
    print!("{}", summary(&record));
    Ok(())
}

fn summary(record: &CourseRecord) -> String {
    let mut out = String::new();
    let title = if record.title.is_empty() {
        "(untitled)"
    } else {
        &record.title
    };
    let _ = writeln!(out, "{} - {title}", record.code());
    let _ = writeln!(out, "  Term:       {}", record.term());

    let instructor = if record.instructor.name.is_empty() {
        "(none)"
    } else {
        &record.instructor.name
    };
    let _ = writeln!(out, "  Instructor: {instructor}");
    if let Some(url) = &record.instructor.homepage_url {
        let _ = writeln!(out, "  Homepage:   {url}");
    }

    let _ = writeln!(
        out,
        "  Lectures:   {} to {}",
        record.starting_monday, record.ending_friday
    );
    let _ = writeln!(out, "  Days:       {}", join_or_none(record.lecture_days.iter().map(|d| d.name())));
    let _ = writeln!(out, "  Pages:      {}", join_or_none(record.enabled_pages.iter().map(|p| p.file_name())));
    out
}

fn join_or_none<'a>(items: impl Iterator<Item = &'a str>) -> String {
    let joined = items.collect::<Vec<_>>().join(", ");
    if joined.is_empty() {
        "(none)".to_string()
    } else {
        joined
    }
}
