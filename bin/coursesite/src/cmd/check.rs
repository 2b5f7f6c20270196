//! Check command - validate configuration and a course record without exporting

use std::path::Path;

use chrono::{Local, NaiveDate};
use color_eyre::eyre::{Result, bail};
use coursesite_core::{
    Config, CourseRecord, PageType, load_record, schedule::validate_range,
};
use coursesite_generator::SiteExporter;

/// Validation result.
#[derive(Debug, Default)]
struct ValidationResult {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ValidationResult {
    fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Run the check command.
///
/// Reports everything that would stop or degrade an export, writing nothing.
pub fn run(config_path: &Path, record_path: &Path, strict: bool) -> Result<()> {
    tracing::info!(?config_path, ?record_path, strict, "Checking configuration and course record");

    let mut result = ValidationResult::default();

    println!("Checking configuration...");
    let config = if config_path.exists() {
        match Config::load(config_path) {
            Ok(c) => {
                println!("  ✓ Configuration valid");
                Some(c)
            }
            Err(e) => {
                result.add_error(format!("Configuration error: {e}"));
                println!("  ✗ Configuration invalid: {e}");
                None
            }
        }
    } else {
        println!("  - No configuration file, using defaults");
        Some(Config::default())
    };

    println!("\nChecking course record...");
    match load_record(record_path) {
        Ok(record) => {
            println!("  ✓ Loaded {}", record.code());
            check_record(
                &record,
                config.as_ref(),
                Local::now().date_naive(),
                &mut result,
            );
        }
        Err(e) => {
            result.add_error(format!("Course record error: {e}"));
            println!("  ✗ Course record invalid: {e}");
        }
    }

    println!();
    println!("Summary:");
    println!("  Errors:   {}", result.errors.len());
    println!("  Warnings: {}", result.warnings.len());

    if result.has_errors() {
        println!();
        println!("Errors:");
        for err in &result.errors {
            println!("  ✗ {err}");
        }
    }

    if result.has_warnings() {
        println!();
        println!("Warnings:");
        for warn in &result.warnings {
            println!("  ⚠ {warn}");
        }
    }

    if result.has_errors() {
        bail!("Validation failed with {} error(s)", result.errors.len());
    }

    if strict && result.has_warnings() {
        bail!(
            "Validation failed with {} warning(s) (strict mode)",
            result.warnings.len()
        );
    }

    println!();
    println!("✓ All checks passed");

    Ok(())
}

fn check_record(
    record: &CourseRecord,
    config: Option<&Config>,
    today: NaiveDate,
    result: &mut ValidationResult,
) {
    let years = CourseRecord::year_options(today);
    if !years.contains(&record.year) {
        result.add_warning(format!(
            "Year {} is outside the offered years {} and {}",
            record.year, years[0], years[1]
        ));
    }

    if record.enabled_pages.is_empty() {
        result.add_warning("No pages are enabled; export would write nothing");
        return;
    }

    if record.has_page(PageType::Schedule) {
        if record.lecture_days.is_empty() {
            result.add_warning("No lecture days selected; the schedule will be empty");
        }
    } else if let Err(e) = validate_range(record.starting_monday, record.ending_friday) {
        result.add_warning(format!("Lecture range is invalid: {e}"));
    }

    // Without a valid configuration there is nothing to render against.
    let Some(config) = config else {
        return;
    };
    match SiteExporter::new(config.clone()).render_all(record) {
        Ok((pages, _)) => {
            for page in &pages {
                tracing::debug!(file = page.file_name, "Page renders");
            }
        }
        Err(e) => result.add_error(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use coursesite_core::{CourseEdit, LectureDay, save_record};
    use tempfile::TempDir;

    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 3).unwrap()
    }

    fn complete_record() -> CourseRecord {
        let mut record = CourseRecord::new_for(today());
        record.apply_edits([
            CourseEdit::Number(219),
            CourseEdit::Title("Computer Science III".to_string()),
            CourseEdit::InstructorName("Ada Lovelace".to_string()),
            CourseEdit::LectureDay(LectureDay::Monday, true),
        ]);
        record
    }

    #[test]
    fn test_complete_record_passes() {
        let mut result = ValidationResult::default();
        check_record(&complete_record(), Some(&Config::default()), today(), &mut result);
        assert!(!result.has_errors(), "{:?}", result.errors);
        assert!(!result.has_warnings(), "{:?}", result.warnings);
    }

    #[test]
    fn test_invalid_range_is_an_error() {
        let mut record = complete_record();
        record.starting_monday = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();

        let mut result = ValidationResult::default();
        check_record(&record, Some(&Config::default()), today(), &mut result);
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].contains("expected a Monday"));
    }

    #[test]
    fn test_invalid_range_without_schedule_is_a_warning() {
        let mut record = complete_record();
        record.apply(CourseEdit::Page(PageType::Schedule, false));
        record.starting_monday = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();

        let mut result = ValidationResult::default();
        check_record(&record, Some(&Config::default()), today(), &mut result);
        assert!(!result.has_errors());
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_missing_title_is_an_error() {
        let mut record = complete_record();
        record.title.clear();

        let mut result = ValidationResult::default();
        check_record(&record, Some(&Config::default()), today(), &mut result);
        assert!(result.has_errors());
    }

    #[test]
    fn test_year_outside_options_warns() {
        let mut record = complete_record();
        record.apply(CourseEdit::Year(2030));

        let mut result = ValidationResult::default();
        check_record(&record, Some(&Config::default()), today(), &mut result);
        assert!(!result.has_errors());
        assert!(result.warnings[0].contains("2030"));
    }

    #[test]
    fn test_run_strict_fails_on_warnings() {
        let dir = TempDir::new().unwrap();
        let record_path = dir.path().join("course.json");
        let mut record = complete_record();
        record.enabled_pages.clear();
        save_record(&record_path, &record).unwrap();

        let config_path = dir.path().join("coursesite.toml");
        assert!(run(&config_path, &record_path, false).is_ok());
        let err = run(&config_path, &record_path, true).unwrap_err();
        assert!(err.to_string().contains("strict mode"));
    }

    #[test]
    fn test_run_reports_unreadable_record() {
        let dir = TempDir::new().unwrap();
        let err = run(
            &dir.path().join("coursesite.toml"),
            &dir.path().join("missing.json"),
            false,
        )
        .unwrap_err();
        assert!(err.to_string().contains("1 error(s)"));
    }
}
