//! Export orchestration.
//!
//! Exports run in two phases. The render phase produces every enabled page in
//! memory and aborts on the first schedule or render error, before anything
//! touches the disk. The write phase then writes each page independently and
//! records a per-page outcome.

use std::{
    fs, io,
    path::{Path, PathBuf},
    time::Instant,
};

use coursesite_core::{
    Config, CourseRecord, InvalidRangeError, PageType, schedule::expand_record,
};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::render::{PageRenderer, RenderError, RenderedPage};

/// Errors that abort an export before any page is written.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The lecture range is invalid.
    #[error("invalid lecture range: {0}")]
    InvalidRange(#[from] InvalidRangeError),

    /// A page could not be rendered.
    #[error("render error: {0}")]
    Render(#[from] RenderError),

    /// The export directory could not be created.
    #[error("failed to create export directory {}: {source}", path.display())]
    DirectoryCreate {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Result type for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;

/// A rendered page could not be written.
#[derive(Debug, Error)]
#[error("failed to write {}: {source}", path.display())]
pub struct FileWriteError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

/// Outcome of writing one page.
#[derive(Debug)]
pub enum WriteStatus {
    Written { bytes: usize },
    Failed(FileWriteError),
}

/// Write outcome for one page type.
#[derive(Debug)]
pub struct PageOutcome {
    pub page: PageType,
    pub path: PathBuf,
    pub status: WriteStatus,
}

impl PageOutcome {
    #[must_use]
    pub fn is_written(&self) -> bool {
        matches!(self.status, WriteStatus::Written { .. })
    }
}

/// Export summary.
#[derive(Debug, Default)]
pub struct ExportReport {
    /// Directory the pages were written to.
    pub target_dir: PathBuf,

    /// One entry per page the write phase attempted, in navigation order.
    pub outcomes: Vec<PageOutcome>,

    /// Number of lecture sessions, when the schedule page was exported.
    pub sessions: Option<usize>,

    /// Export duration in milliseconds.
    pub duration_ms: u64,
}

impl ExportReport {
    /// True when no page was selected for export.
    #[must_use]
    pub fn nothing_selected(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// True when every attempted page was written.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(PageOutcome::is_written)
    }

    /// Pages that were written.
    pub fn written(&self) -> impl Iterator<Item = &PageOutcome> {
        self.outcomes.iter().filter(|o| o.is_written())
    }

    /// Pages whose write failed, with the error.
    pub fn failures(&self) -> impl Iterator<Item = (PageType, &FileWriteError)> {
        self.outcomes.iter().filter_map(|o| match &o.status {
            WriteStatus::Failed(err) => Some((o.page, err)),
            WriteStatus::Written { .. } => None,
        })
    }
}

/// Exports a course record as a static site.
#[derive(Debug)]
pub struct SiteExporter {
    renderer: PageRenderer,
}

impl SiteExporter {
    /// Create an exporter with the built-in templates.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            renderer: PageRenderer::new(config),
        }
    }

    /// Create an exporter around an existing renderer.
    #[must_use]
    pub fn with_renderer(renderer: PageRenderer) -> Self {
        Self { renderer }
    }

    /// Render and write every enabled page of `record` into `target_dir`.
    ///
    /// Existing files in `target_dir` are only ever replaced by complete new
    /// versions; nothing is deleted.
    pub fn export(&self, record: &CourseRecord, target_dir: &Path) -> Result<ExportReport> {
        let start = Instant::now();
        let mut report = ExportReport {
            target_dir: target_dir.to_path_buf(),
            ..ExportReport::default()
        };

        info!(
            course = %record.code(),
            target = %target_dir.display(),
            pages = record.enabled_pages.len(),
            "starting export"
        );

        if record.enabled_pages.is_empty() {
            info!("no pages selected, nothing to export");
            return Ok(report);
        }

        // 1. Render phase
        let (pages, sessions) = self.render_all(record)?;
        report.sessions = sessions;

        // 2. Write phase
        fs::create_dir_all(target_dir).map_err(|source| ExportError::DirectoryCreate {
            path: target_dir.to_path_buf(),
            source,
        })?;
        report.outcomes = pages
            .iter()
            .map(|page| write_rendered(page, target_dir))
            .collect();

        report.duration_ms = start.elapsed().as_millis() as u64;

        if report.is_success() {
            info!(
                written = report.outcomes.len(),
                duration_ms = report.duration_ms,
                "export complete"
            );
        } else {
            warn!(
                written = report.written().count(),
                failed = report.failures().count(),
                "export finished with write failures"
            );
        }

        Ok(report)
    }

    /// Render every enabled page without writing anything.
    ///
    /// Also returns the session count when the schedule was expanded.
    pub fn render_all(&self, record: &CourseRecord) -> Result<(Vec<RenderedPage>, Option<usize>)> {
        let sessions = if record.has_page(PageType::Schedule) {
            Some(expand_record(record)?)
        } else {
            None
        };

        let pages = record
            .enabled_pages
            .iter()
            .map(|page| {
                self.renderer
                    .render(*page, record, sessions.as_deref(), &record.enabled_pages)
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;

        debug!(count = pages.len(), "rendered all pages");
        Ok((pages, sessions.map(|s| s.len())))
    }
}

fn write_rendered(page: &RenderedPage, target_dir: &Path) -> PageOutcome {
    let path = target_dir.join(page.file_name);

    let status = match write_replacing(&path, page.content.as_bytes()) {
        Ok(()) => {
            debug!(path = %path.display(), "wrote page");
            WriteStatus::Written {
                bytes: page.content.len(),
            }
        }
        Err(source) => {
            warn!(path = %path.display(), error = %source, "failed to write page");
            WriteStatus::Failed(FileWriteError {
                path: path.clone(),
                source,
            })
        }
    };

    PageOutcome {
        page: page.page,
        path,
        status,
    }
}

/// Write `contents` to a sibling temporary file, then rename it over `path`.
fn write_replacing(path: &Path, contents: &[u8]) -> io::Result<()> {
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"))?;
    let mut partial_name = std::ffi::OsString::from(".");
    partial_name.push(file_name);
    partial_name.push(".partial");
    let partial = path.with_file_name(partial_name);

    let result = fs::write(&partial, contents).and_then(|()| fs::rename(&partial, path));
    if result.is_err() {
        let _ = fs::remove_file(&partial);
    }
    result
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use coursesite_core::{CourseEdit, LectureDay};
    use tempfile::TempDir;

    use super::*;

    fn test_record(pages: &[PageType]) -> CourseRecord {
        let mut record = CourseRecord::new_for(NaiveDate::from_ymd_opt(2024, 1, 8).unwrap());
        record.enabled_pages = pages.iter().copied().collect();
        record.apply_edits([
            CourseEdit::Number(219),
            CourseEdit::Title("Computer Science III".to_string()),
            CourseEdit::InstructorName("Ada Lovelace".to_string()),
            CourseEdit::EndingFriday(NaiveDate::from_ymd_opt(2024, 1, 19).unwrap()),
            CourseEdit::LectureDay(LectureDay::Monday, true),
            CourseEdit::LectureDay(LectureDay::Wednesday, true),
        ]);
        record
    }

    fn files_in(dir: &Path) -> Vec<String> {
        let mut names: Vec<_> = fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_export_all_pages() {
        let output_dir = TempDir::new().unwrap();
        let exporter = SiteExporter::new(Config::default());

        let report = exporter
            .export(&test_record(&PageType::ALL), output_dir.path())
            .unwrap();

        assert!(report.is_success());
        assert_eq!(report.outcomes.len(), 5);
        assert_eq!(report.sessions, Some(4));
        assert_eq!(
            files_in(output_dir.path()),
            vec!["hws.html", "index.html", "projects.html", "schedule.html", "syllabus.html"]
        );
    }

    #[test]
    fn test_export_nothing_selected() {
        let parent = TempDir::new().unwrap();
        let target = parent.path().join("site");
        let exporter = SiteExporter::new(Config::default());

        let report = exporter.export(&test_record(&[]), &target).unwrap();

        assert!(report.nothing_selected());
        assert!(report.is_success());
        assert!(!target.exists());
    }

    #[test]
    fn test_export_invalid_range_writes_nothing() {
        let parent = TempDir::new().unwrap();
        let target = parent.path().join("site");
        let mut record = test_record(&[PageType::Index, PageType::Schedule]);
        record.starting_monday = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();

        let err = SiteExporter::new(Config::default())
            .export(&record, &target)
            .unwrap_err();

        assert!(matches!(
            err,
            ExportError::InvalidRange(InvalidRangeError::StartNotMonday { .. })
        ));
        assert!(!target.exists());
    }

    #[test]
    fn test_invalid_range_ignored_without_schedule_page() {
        let output_dir = TempDir::new().unwrap();
        let mut record = test_record(&[PageType::Index]);
        record.starting_monday = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();

        let report = SiteExporter::new(Config::default())
            .export(&record, output_dir.path())
            .unwrap();

        assert!(report.is_success());
        assert_eq!(report.sessions, None);
    }

    #[test]
    fn test_render_failure_keeps_previous_export() {
        let output_dir = TempDir::new().unwrap();
        let exporter = SiteExporter::new(Config::default());
        let mut record = test_record(&[PageType::Index, PageType::Syllabus, PageType::Projects]);
        exporter.export(&record, output_dir.path()).unwrap();
        let before = fs::read_to_string(output_dir.path().join("index.html")).unwrap();

        // Both pages need an instructor name.
        record.instructor.name.clear();
        record.title = "Renamed".to_string();
        let err = exporter.export(&record, output_dir.path()).unwrap_err();

        assert!(matches!(
            err,
            ExportError::Render(RenderError::Unrenderable { .. })
        ));
        let after = fs::read_to_string(output_dir.path().join("index.html")).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn test_write_failure_is_reported_per_page() {
        let output_dir = TempDir::new().unwrap();
        // A directory where index.html should go makes that one write fail.
        fs::create_dir(output_dir.path().join("index.html")).unwrap();

        let report = SiteExporter::new(Config::default())
            .export(
                &test_record(&[PageType::Index, PageType::Schedule]),
                output_dir.path(),
            )
            .unwrap();

        assert!(!report.is_success());
        let failures: Vec<_> = report.failures().map(|(page, _)| page).collect();
        assert_eq!(failures, vec![PageType::Index]);
        assert_eq!(report.written().count(), 1);
        assert!(output_dir.path().join("schedule.html").is_file());
        assert!(!output_dir.path().join(".index.html.partial").exists());
    }

    #[test]
    fn test_directory_create_failure() {
        let parent = TempDir::new().unwrap();
        let blocker = parent.path().join("not-a-dir");
        fs::write(&blocker, "file").unwrap();

        let err = SiteExporter::new(Config::default())
            .export(&test_record(&[PageType::Index]), &blocker.join("site"))
            .unwrap_err();

        assert!(matches!(err, ExportError::DirectoryCreate { .. }));
        assert!(err.to_string().contains("failed to create export directory"));
    }

    #[test]
    fn test_render_all_does_not_write() {
        let exporter = SiteExporter::new(Config::default());
        let (pages, sessions) = exporter
            .render_all(&test_record(&[PageType::Schedule, PageType::Homeworks]))
            .unwrap();

        let kinds: Vec<_> = pages.iter().map(|p| p.page).collect();
        assert_eq!(kinds, vec![PageType::Schedule, PageType::Homeworks]);
        assert_eq!(sessions, Some(4));
    }
}
