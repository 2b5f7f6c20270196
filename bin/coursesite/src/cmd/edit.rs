//! Edit command - change fields of an existing course record

use std::path::Path;

use chrono::NaiveDate;
use color_eyre::eyre::{Result, WrapErr};
use coursesite_core::{CourseEdit, LectureDay, PageType, Semester, Subject, save_record};

use super::open_record;

/// Field changes accepted by `new` and `edit`.
#[derive(Debug, Default, Clone, clap::Args)]
pub struct EditArgs {
    /// Subject code (e.g. CSE)
    #[arg(long)]
    pub subject: Option<Subject>,
    /// Course number
    #[arg(long)]
    pub number: Option<u32>,
    /// Course title
    #[arg(long)]
    pub title: Option<String>,
    /// Instructor name
    #[arg(long)]
    pub instructor: Option<String>,
    /// Instructor homepage URL
    #[arg(long, conflicts_with = "clear_homepage")]
    pub homepage: Option<String>,
    /// Remove the instructor homepage URL
    #[arg(long)]
    pub clear_homepage: bool,
    /// Semester (Fall, Spring, Winter, "Summer 1", "Summer 2", "Summer EXT")
    #[arg(long)]
    pub semester: Option<Semester>,
    /// Offering year
    #[arg(long)]
    pub year: Option<i32>,
    /// First Monday of lectures (YYYY-MM-DD)
    #[arg(long)]
    pub start: Option<NaiveDate>,
    /// Last Friday of lectures (YYYY-MM-DD)
    #[arg(long)]
    pub end: Option<NaiveDate>,
    /// Lecture days to select (e.g. mon,wed)
    #[arg(long = "add-day", value_delimiter = ',')]
    pub add_days: Vec<LectureDay>,
    /// Lecture days to deselect
    #[arg(long = "remove-day", value_delimiter = ',')]
    pub remove_days: Vec<LectureDay>,
    /// Pages to enable (index, syllabus, schedule, hws, projects)
    #[arg(long, value_delimiter = ',')]
    pub enable: Vec<PageType>,
    /// Pages to disable
    #[arg(long, value_delimiter = ',')]
    pub disable: Vec<PageType>,
}

impl EditArgs {
    /// Translate the flags into record edits, selections before deselections.
    pub fn into_edits(self) -> Vec<CourseEdit> {
        let homepage = if self.clear_homepage {
            Some(CourseEdit::InstructorHomepage(None))
        } else {
            self.homepage.map(|url| CourseEdit::InstructorHomepage(Some(url)))
        };

        self.subject
            .map(CourseEdit::Subject)
            .into_iter()
            .chain(self.number.map(CourseEdit::Number))
            .chain(self.title.map(CourseEdit::Title))
            .chain(self.instructor.map(CourseEdit::InstructorName))
            .chain(homepage)
            .chain(self.semester.map(CourseEdit::Semester))
            .chain(self.year.map(CourseEdit::Year))
            .chain(self.start.map(CourseEdit::StartingMonday))
            .chain(self.end.map(CourseEdit::EndingFriday))
            .chain(self.add_days.into_iter().map(|d| CourseEdit::LectureDay(d, true)))
            .chain(self.remove_days.into_iter().map(|d| CourseEdit::LectureDay(d, false)))
            .chain(self.enable.into_iter().map(|p| CourseEdit::Page(p, true)))
            .chain(self.disable.into_iter().map(|p| CourseEdit::Page(p, false)))
            .collect()
    }
}

/// Run the edit command.
///
/// The record file is only rewritten when at least one field changed.
/// Returns the number of changed fields.
pub fn run(record_path: &Path, args: EditArgs) -> Result<usize> {
    tracing::info!(?record_path, "Editing course record");

    let mut record = open_record(record_path)?;
    let changed = record.apply_edits(args.into_edits());

    if changed == 0 {
        println!("No changes to {}", record_path.display());
        return Ok(0);
    }

    save_record(record_path, &record).wrap_err("Failed to save course record")?;
    tracing::info!(changed, "Saved course record");
    println!("Updated {} ({changed} change(s))", record_path.display());

    Ok(changed)
}
