//! Schedule command - print the expanded lecture sessions

use std::{fmt::Write as _, path::Path};

use color_eyre::eyre::{Result, WrapErr};
use coursesite_core::{
    Config, CourseRecord, LectureSession,
    schedule::{expand_record, group_by_week},
};

use super::{load_config, open_record};

/// Run the schedule command.
pub fn run(config_path: &Path, record_path: &Path) -> Result<()> {
    let config = load_config(config_path)?;
    let record = open_record(record_path)?;

    let sessions = expand_record(&record).wrap_err("Cannot expand lecture schedule")?;
    tracing::info!(sessions = sessions.len(), "Expanded lecture schedule");

    print!("{}", format_schedule(&config, &record, &sessions));
    Ok(())
}

fn format_schedule(config: &Config, record: &CourseRecord, sessions: &[LectureSession]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} lectures, {} to {}",
        record.code(),
        config.format_session_date(record.starting_monday),
        config.format_session_date(record.ending_friday)
    );

    if sessions.is_empty() {
        let _ = writeln!(out, "  No lectures scheduled.");
        return out;
    }

    for week in group_by_week(sessions) {
        let days = week.iter().fold(String::new(), |mut line, session| {
            if !line.is_empty() {
                line.push_str(", ");
            }
            let _ = write!(
                line,
                "{} {}",
                session.day.name(),
                config.format_session_date(session.date)
            );
            line
        });
        let number = (week[0].date - record.starting_monday).num_days() / 7 + 1;
        let _ = writeln!(out, "  Week {number:>2}: {days}");
    }
    let _ = writeln!(out, "  {} session(s)", sessions.len());
    out
}
