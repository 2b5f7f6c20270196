//! HTML template system for course pages.
//!
//! Templates use `{{ name }}` placeholders, with `{{ name? }}` for values that
//! may be absent. Values are inserted verbatim, so callers escape record text
//! before putting it into a context.

use std::collections::HashMap;

use thiserror::Error;

/// Template rendering errors.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Missing required variable.
    #[error("template {template} is missing required variable: {variable}")]
    MissingVariable { template: String, variable: String },

    /// Template not found.
    #[error("template not found: {0}")]
    NotFound(String),

    /// Invalid template syntax.
    #[error("invalid template syntax in {template}: {message}")]
    InvalidSyntax { template: String, message: String },
}

/// Result type for template operations.
pub type Result<T> = std::result::Result<T, TemplateError>;

/// Template context with variables for interpolation.
#[derive(Debug, Clone, Default)]
pub struct TemplateContext {
    variables: HashMap<String, String>,
}

impl TemplateContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.variables.insert(key.into(), value.into());
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }
}

/// A named template.
#[derive(Debug, Clone)]
pub struct Template {
    name: String,
    content: String,
}

impl Template {
    #[must_use]
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Render the template with the given context.
    ///
    /// Inserted values are never rescanned for placeholders.
    pub fn render(&self, context: &TemplateContext) -> Result<String> {
        let mut out = String::with_capacity(self.content.len());
        let mut rest = self.content.as_str();

        while let Some(open) = rest.find("{{") {
            out.push_str(&rest[..open]);
            let after_open = &rest[open + 2..];
            let close = after_open
                .find("}}")
                .ok_or_else(|| self.syntax_error("unclosed {{ delimiter"))?;

            let expr = after_open[..close].trim();
            let (var_name, optional) = match expr.strip_suffix('?') {
                Some(stripped) => (stripped.trim_end(), true),
                None => (expr, false),
            };
            if var_name.is_empty() {
                return Err(self.syntax_error("empty placeholder"));
            }

            match context.get(var_name) {
                Some(value) => out.push_str(value),
                None if optional => {}
                None => {
                    return Err(TemplateError::MissingVariable {
                        template: self.name.clone(),
                        variable: var_name.to_string(),
                    });
                }
            }

            rest = &after_open[close + 2..];
        }

        out.push_str(rest);
        Ok(out)
    }

    fn syntax_error(&self, message: &str) -> TemplateError {
        TemplateError::InvalidSyntax {
            template: self.name.clone(),
            message: message.to_string(),
        }
    }
}

/// Registry of templates.
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    templates: HashMap<String, Template>,
}

impl TemplateRegistry {
    /// Create a new registry with the built-in course templates.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self::default();
        registry.register_defaults();
        registry
    }

    fn register_defaults(&mut self) {
        self.register(Template::new("base", BASE_TEMPLATE));
        self.register(Template::new("index", INDEX_TEMPLATE));
        self.register(Template::new("syllabus", SYLLABUS_TEMPLATE));
        self.register(Template::new("schedule", SCHEDULE_TEMPLATE));
        self.register(Template::new("hws", HWS_TEMPLATE));
        self.register(Template::new("projects", PROJECTS_TEMPLATE));
    }

    /// Register a template, replacing any template with the same name.
    pub fn register(&mut self, template: Template) {
        self.templates.insert(template.name.clone(), template);
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Template> {
        self.templates.get(name)
    }

    /// Render a named template with the given context.
    pub fn render(&self, name: &str, context: &TemplateContext) -> Result<String> {
        let template = self
            .get(name)
            .ok_or_else(|| TemplateError::NotFound(name.to_string()))?;
        template.render(context)
    }
}

/// Page shell shared by every exported page.
pub const BASE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="{{ lang }}">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{ title }}</title>
    <link rel="stylesheet" type="text/css" href="{{ style_sheet }}">
</head>
<body>
    <header id="banner">
        {{ banner? }}
        <h1 id="banner_text">{{ course_code }} - {{ course_title }}<br>{{ term }}</h1>
    </header>
    <nav id="navbar">
{{ navigation }}
    </nav>
    <main id="{{ page_key }}">
{{ content }}
    </main>
    <footer>
        <p>{{ course_code }} &middot; {{ term }}</p>
    </footer>
</body>
</html>
"#;

pub const INDEX_TEMPLATE: &str = r#"        <section class="course-overview">
            <h2>Course Overview</h2>
            <p>Welcome to {{ course_code }}: {{ course_title }}, offered {{ term }}.</p>
            <p class="instructor">Instructor: {{ instructor }}</p>
        </section>
{{ page_directory? }}"#;

pub const SYLLABUS_TEMPLATE: &str = r#"        <section class="syllabus">
            <h2>Syllabus</h2>
            <p class="instructor">Instructor: {{ instructor }}</p>
            <h3>Course Description</h3>
            <p class="placeholder">The course description for {{ course_code }} will be posted here.</p>
            <h3>Prerequisites</h3>
            <p class="placeholder">Prerequisites will be posted here.</p>
            <h3>Textbooks</h3>
            <p class="placeholder">Required and recommended textbooks will be posted here.</p>
            <h3>Grading</h3>
            <p class="placeholder">The grading breakdown will be posted here.</p>
        </section>
"#;

pub const SCHEDULE_TEMPLATE: &str = r#"        <section class="schedule">
            <h2>Lecture Schedule</h2>
            <p class="schedule-range">Lectures run from <time datetime="{{ start_iso }}">{{ start }}</time> to <time datetime="{{ end_iso }}">{{ end }}</time> ({{ session_count }}).</p>
            <table class="schedule-table">
                <thead>
                    <tr><th>Week</th><th>Day</th><th>Date</th></tr>
                </thead>
                <tbody>
{{ rows }}
                </tbody>
            </table>
        </section>
"#;

pub const HWS_TEMPLATE: &str = r#"        <section class="assignments">
            <h2>Homework Assignments</h2>
            <table class="assignments-table">
                <thead>
                    <tr><th>Assignment</th><th>Topic</th><th>Due</th></tr>
                </thead>
                <tbody>
                    <tr class="placeholder"><td colspan="3">No homework assignments have been posted yet.</td></tr>
                </tbody>
            </table>
        </section>
"#;

pub const PROJECTS_TEMPLATE: &str = r#"        <section class="projects">
            <h2>Projects</h2>
            <table class="projects-table">
                <thead>
                    <tr><th>Project</th><th>Team</th><th>Due</th></tr>
                </thead>
                <tbody>
                    <tr class="placeholder"><td colspan="3">No projects have been posted yet.</td></tr>
                </tbody>
            </table>
        </section>
"#;
