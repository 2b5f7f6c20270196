//! HTML rendering for course pages.
//!
//! A [`PageRenderer`] turns a course record into one HTML document per page
//! type. Rendering never touches the filesystem or the clock, so the same
//! record and configuration always produce the same bytes.

use std::collections::BTreeSet;

use coursesite_core::{
    Config, CourseRecord, LectureSession, PageType,
    schedule::group_by_week,
};
use thiserror::Error;
use tracing::debug;

use crate::template::{TemplateContext, TemplateError, TemplateRegistry};

/// Page rendering errors.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The record lacks data the page needs.
    #[error("cannot render {page} page: {reason}")]
    Unrenderable { page: PageType, reason: String },

    /// Template error.
    #[error("template error: {0}")]
    Template(#[from] TemplateError),
}

impl RenderError {
    fn unrenderable(page: PageType, reason: impl Into<String>) -> Self {
        Self::Unrenderable {
            page,
            reason: reason.into(),
        }
    }
}

/// Result type for page rendering.
pub type Result<T> = std::result::Result<T, RenderError>;

/// A fully rendered page, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    pub page: PageType,
    pub content: String,
    pub file_name: &'static str,
}

/// Course page renderer.
#[derive(Debug)]
pub struct PageRenderer {
    templates: TemplateRegistry,
    config: Config,
}

impl PageRenderer {
    /// Create a renderer with the built-in templates.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            templates: TemplateRegistry::new(),
            config,
        }
    }

    /// Create a renderer with custom templates.
    #[must_use]
    pub fn with_templates(config: Config, templates: TemplateRegistry) -> Self {
        Self { templates, config }
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Render one page type.
    ///
    /// `sessions` is the expanded lecture schedule, `None` when it was not
    /// computed. `enabled` decides which pages appear in the navigation.
    pub fn render(
        &self,
        page: PageType,
        record: &CourseRecord,
        sessions: Option<&[LectureSession]>,
        enabled: &BTreeSet<PageType>,
    ) -> Result<RenderedPage> {
        debug!(page = page.key(), course = %record.code(), "rendering page");

        check_required(page, record, sessions)?;

        let inner_ctx = self.page_context(page, record, sessions, enabled)?;
        let inner_html = self.templates.render(page.key(), &inner_ctx)?;

        let base_ctx = self
            .base_context(page, record, enabled)
            .with_var("content", inner_html);
        let content = self.templates.render("base", &base_ctx)?;

        Ok(RenderedPage {
            page,
            content,
            file_name: page.file_name(),
        })
    }

    /// Variables shared by every page shell.
    fn base_context(
        &self,
        page: PageType,
        record: &CourseRecord,
        enabled: &BTreeSet<PageType>,
    ) -> TemplateContext {
        let site = &self.config.site;
        let mut ctx = TemplateContext::new()
            .with_var("lang", escape_html(&site.lang))
            .with_var(
                "title",
                escape_html(&format!(
                    "{} - {} | {}",
                    record.code(),
                    record.title.trim(),
                    page.nav_label()
                )),
            )
            .with_var("style_sheet", escape_html(&site.style_sheet))
            .with_var("course_code", escape_html(&record.code()))
            .with_var("course_title", escape_html(record.title.trim()))
            .with_var("term", escape_html(&record.term()))
            .with_var("navigation", navigation_html(page, enabled))
            .with_var("page_key", page.key());

        if let Some(image) = &site.banner_image {
            ctx.insert(
                "banner",
                format!(
                    r#"<img class="banner-image" alt="{}" src="{}">"#,
                    escape_html(&site.banner_alt),
                    escape_html(image)
                ),
            );
        }

        ctx
    }

    /// Variables for the page body.
    fn page_context(
        &self,
        page: PageType,
        record: &CourseRecord,
        sessions: Option<&[LectureSession]>,
        enabled: &BTreeSet<PageType>,
    ) -> Result<TemplateContext> {
        let mut ctx = TemplateContext::new()
            .with_var("course_code", escape_html(&record.code()))
            .with_var("course_title", escape_html(record.title.trim()))
            .with_var("term", escape_html(&record.term()))
            .with_var("instructor", instructor_html(record));

        match page {
            PageType::Index => {
                if let Some(directory) = page_directory_html(enabled) {
                    ctx.insert("page_directory", directory);
                }
            }
            PageType::Schedule => {
                let sessions = sessions.ok_or_else(|| {
                    RenderError::unrenderable(page, "lecture schedule was not computed")
                })?;
                let config = &self.config;
                ctx.insert("start_iso", record.starting_monday.format("%Y-%m-%d").to_string());
                ctx.insert("end_iso", record.ending_friday.format("%Y-%m-%d").to_string());
                ctx.insert(
                    "start",
                    escape_html(&config.format_session_date(record.starting_monday)),
                );
                ctx.insert(
                    "end",
                    escape_html(&config.format_session_date(record.ending_friday)),
                );
                ctx.insert("session_count", session_count_label(sessions.len()));
                ctx.insert("rows", self.schedule_rows(record, sessions));
            }
            PageType::Syllabus | PageType::Homeworks | PageType::Projects => {}
        }

        Ok(ctx)
    }

    /// One table row per session, tagged with its course week.
    fn schedule_rows(&self, record: &CourseRecord, sessions: &[LectureSession]) -> String {
        if sessions.is_empty() {
            return r#"                    <tr class="no-lectures"><td colspan="3">No lectures scheduled.</td></tr>"#
                .to_string();
        }

        let mut rows = Vec::with_capacity(sessions.len());
        for week in group_by_week(sessions) {
            for (i, session) in week.iter().enumerate() {
                let week_number = (session.date - record.starting_monday).num_days() / 7 + 1;
                let class = if i == 0 { "session week-start" } else { "session" };
                rows.push(format!(
                    r#"                    <tr class="{class}"><td>{week_number}</td><td>{day}</td><td><time datetime="{iso}">{date}</time></td></tr>"#,
                    day = session.day,
                    iso = session.date.format("%Y-%m-%d"),
                    date = escape_html(&self.config.format_session_date(session.date)),
                ));
            }
        }
        rows.join("\n")
    }
}

/// Check the record holds what `page` needs before any template runs.
fn check_required(
    page: PageType,
    record: &CourseRecord,
    sessions: Option<&[LectureSession]>,
) -> Result<()> {
    if record.title.trim().is_empty() {
        return Err(RenderError::unrenderable(page, "course title is empty"));
    }
    if record.number == 0 {
        return Err(RenderError::unrenderable(page, "course number is not set"));
    }

    match page {
        PageType::Index | PageType::Syllabus if record.instructor.name.trim().is_empty() => {
            Err(RenderError::unrenderable(page, "instructor name is empty"))
        }
        PageType::Schedule if sessions.is_none() => Err(RenderError::unrenderable(
            page,
            "lecture schedule was not computed",
        )),
        _ => Ok(()),
    }
}

/// Navigation links to exactly the enabled pages, in navigation order.
pub fn navigation_html(current: PageType, enabled: &BTreeSet<PageType>) -> String {
    enabled
        .iter()
        .map(|page| {
            let current_attr = if *page == current {
                r#" aria-current="page""#
            } else {
                ""
            };
            format!(
                r#"        <a href="{}" class="nav"{current_attr}>{}</a>"#,
                page.file_name(),
                page.nav_label()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Index page list of the other enabled pages, if there are any.
fn page_directory_html(enabled: &BTreeSet<PageType>) -> Option<String> {
    let items: Vec<_> = enabled
        .iter()
        .filter(|page| **page != PageType::Index)
        .map(|page| {
            format!(
                r#"                <li><a href="{}">{}</a></li>"#,
                page.file_name(),
                page.nav_label()
            )
        })
        .collect();

    if items.is_empty() {
        return None;
    }

    Some(format!(
        "        <section class=\"course-pages\">\n            <h2>Course Pages</h2>\n            <ul>\n{}\n            </ul>\n        </section>\n",
        items.join("\n")
    ))
}

fn instructor_html(record: &CourseRecord) -> String {
    let name = escape_html(record.instructor.name.trim());
    match record.instructor.homepage_url.as_deref().map(str::trim) {
        Some(url) if !url.is_empty() => format!(r#"<a href="{}">{name}</a>"#, escape_html(url)),
        _ => name,
    }
}

fn session_count_label(count: usize) -> String {
    match count {
        1 => "1 lecture".to_string(),
        n => format!("{n} lectures"),
    }
}

/// Escape text for HTML element content and attribute values.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use coursesite_core::{CourseEdit, LectureDay, schedule::expand_record};

    use super::*;

    fn test_record() -> CourseRecord {
        let mut record = CourseRecord::new_for(NaiveDate::from_ymd_opt(2024, 1, 8).unwrap());
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

    fn page_set(pages: &[PageType]) -> BTreeSet<PageType> {
        pages.iter().copied().collect()
    }

    /// Targets of every link inside the navigation block.
    fn nav_links(html: &str) -> BTreeSet<String> {
        let start = html.find(r#"<nav id="navbar">"#).expect("nav start");
        let end = html[start..].find("</nav>").expect("nav end") + start;
        html[start..end]
            .split(r#"href=""#)
            .skip(1)
            .filter_map(|rest| rest.split('"').next())
            .map(str::to_string)
            .collect()
    }

    /// Targets of every `.html` link in the whole document.
    fn page_links(html: &str) -> BTreeSet<String> {
        html.split(r#"href=""#)
            .skip(1)
            .filter_map(|rest| rest.split('"').next())
            .filter(|href| href.ends_with(".html"))
            .map(str::to_string)
            .collect()
    }

    fn file_names(pages: &BTreeSet<PageType>) -> BTreeSet<String> {
        pages.iter().map(|p| p.file_name().to_string()).collect()
    }

    #[test]
    fn test_render_index_page() {
        let renderer = PageRenderer::new(Config::default());
        let record = test_record();
        let enabled = page_set(&[PageType::Index, PageType::Schedule]);

        let page = renderer
            .render(PageType::Index, &record, None, &enabled)
            .unwrap();

        assert_eq!(page.file_name, "index.html");
        assert!(page.content.contains("<!DOCTYPE html>"));
        assert!(page.content.contains("<title>CSE 219 - Computer Science III | Home</title>"));
        assert!(page.content.contains("Fall 2024"));
        assert!(page.content.contains("Instructor: Ada Lovelace"));
        assert!(page.content.contains(r#"href="course_homepage_layout.css""#));
        assert!(page.content.contains(r#"<a href="index.html" class="nav" aria-current="page">Home</a>"#));
        assert!(!page.content.contains("syllabus.html"));
    }

    #[test]
    fn test_navigation_matches_enabled_set_for_every_subset() {
        let renderer = PageRenderer::new(Config::default());
        let record = test_record();
        let sessions = expand_record(&record).unwrap();

        for mask in 1u8..32 {
            let enabled: BTreeSet<_> = PageType::ALL
                .into_iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, page)| page)
                .collect();

            for page in &enabled {
                let rendered = renderer
                    .render(*page, &record, Some(&sessions), &enabled)
                    .unwrap();
                assert_eq!(nav_links(&rendered.content), file_names(&enabled));
                assert_eq!(page_links(&rendered.content), file_names(&enabled));
            }
        }
    }

    #[test]
    fn test_single_enabled_page_has_singleton_navigation() {
        let renderer = PageRenderer::new(Config::default());
        let enabled = page_set(&[PageType::Projects]);

        let page = renderer
            .render(PageType::Projects, &test_record(), None, &enabled)
            .unwrap();

        assert_eq!(
            nav_links(&page.content),
            BTreeSet::from(["projects.html".to_string()])
        );
        assert!(page.content.contains("No projects have been posted yet."));
    }

    #[test]
    fn test_render_schedule_rows() {
        let renderer = PageRenderer::new(Config::default());
        let record = test_record();
        let sessions = expand_record(&record).unwrap();
        let enabled = page_set(&[PageType::Schedule]);

        let page = renderer
            .render(PageType::Schedule, &record, Some(&sessions), &enabled)
            .unwrap();

        assert_eq!(page.content.matches(r#"<tr class="session"#).count(), 4);
        assert_eq!(page.content.matches("week-start").count(), 2);
        assert!(page.content.contains(
            r#"<td>1</td><td>Monday</td><td><time datetime="2024-01-08">January 8</time></td>"#
        ));
        assert!(page.content.contains(
            r#"<td>2</td><td>Wednesday</td><td><time datetime="2024-01-17">January 17</time></td>"#
        ));
        assert!(page.content.contains("(4 lectures)"));

        let jan_8 = page.content.find("2024-01-08\">January 8").unwrap();
        let jan_17 = page.content.find("2024-01-17\">January 17").unwrap();
        assert!(jan_8 < jan_17);
    }

    #[test]
    fn test_render_schedule_without_lecture_days() {
        let renderer = PageRenderer::new(Config::default());
        let mut record = test_record();
        record.lecture_days.clear();
        let enabled = page_set(&[PageType::Schedule]);

        let page = renderer
            .render(PageType::Schedule, &record, Some(&[]), &enabled)
            .unwrap();

        assert!(page.content.contains("No lectures scheduled."));
        assert!(page.content.contains("(0 lectures)"));
    }

    #[test]
    fn test_schedule_requires_sessions() {
        let renderer = PageRenderer::new(Config::default());
        let enabled = page_set(&[PageType::Schedule]);

        let err = renderer
            .render(PageType::Schedule, &test_record(), None, &enabled)
            .unwrap_err();

        assert!(matches!(
            err,
            RenderError::Unrenderable {
                page: PageType::Schedule,
                ..
            }
        ));
    }

    #[test]
    fn test_missing_title_is_unrenderable() {
        let renderer = PageRenderer::new(Config::default());
        let mut record = test_record();
        record.title = "   ".to_string();

        let err = renderer
            .render(PageType::Homeworks, &record, None, &page_set(&[PageType::Homeworks]))
            .unwrap_err();
        assert!(err.to_string().contains("course title is empty"));
    }

    #[test]
    fn test_syllabus_requires_instructor() {
        let renderer = PageRenderer::new(Config::default());
        let mut record = test_record();
        record.instructor.name.clear();

        let err = renderer
            .render(PageType::Syllabus, &record, None, &page_set(&[PageType::Syllabus]))
            .unwrap_err();
        assert!(err.to_string().contains("instructor name is empty"));

        // Pages without an instructor line still render.
        assert!(
            renderer
                .render(PageType::Projects, &record, None, &page_set(&[PageType::Projects]))
                .is_ok()
        );
    }

    #[test]
    fn test_record_text_is_escaped() {
        let renderer = PageRenderer::new(Config::default());
        let mut record = test_record();
        record.title = "Data <Structures> & \"Algorithms\"".to_string();
        record.instructor.homepage_url = Some("https://example.edu/?a=1&b=2".to_string());

        let page = renderer
            .render(PageType::Syllabus, &record, None, &page_set(&[PageType::Syllabus]))
            .unwrap();

        assert!(page.content.contains("Data &lt;Structures&gt; &amp; &quot;Algorithms&quot;"));
        assert!(page.content.contains(r#"<a href="https://example.edu/?a=1&amp;b=2">Ada Lovelace</a>"#));
        assert!(!page.content.contains("<Structures>"));
    }

    #[test]
    fn test_banner_and_custom_date_format() {
        let mut config = Config::default();
        config.site.banner_image = Some("images/banner.png".to_string());
        config.schedule.date_format = "%a %d/%m".to_string();
        let renderer = PageRenderer::new(config);
        let record = test_record();
        let sessions = expand_record(&record).unwrap();

        let page = renderer
            .render(PageType::Schedule, &record, Some(&sessions), &page_set(&[PageType::Schedule]))
            .unwrap();

        assert!(page.content.contains(r#"<img class="banner-image" alt="Course banner" src="images/banner.png">"#));
        assert!(page.content.contains(">Mon 08/01</time>"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let renderer = PageRenderer::new(Config::default());
        let record = test_record();
        let sessions = expand_record(&record).unwrap();
        let enabled: BTreeSet<_> = PageType::ALL.into_iter().collect();

        for page in PageType::ALL {
            let first = renderer.render(page, &record, Some(&sessions), &enabled).unwrap();
            let second = renderer.render(page, &record, Some(&sessions), &enabled).unwrap();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a < b && c > 'd'"), "a &lt; b &amp;&amp; c &gt; &#39;d&#39;");
        assert_eq!(escape_html("plain"), "plain");
    }
}
