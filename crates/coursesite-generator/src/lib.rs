//! Course Site Generator Library
//!
//! Renders course pages and exports them as a static site.
//!
//! # Modules
//!
//! - [`template`] - HTML template system with variable interpolation
//! - [`render`] - Per-page HTML rendering with cross-page navigation
//! - [`export`] - Render-then-write export orchestration

pub mod export;
pub mod render;
pub mod template;

pub use export::{ExportError, ExportReport, FileWriteError, PageOutcome, SiteExporter, WriteStatus};
pub use render::{PageRenderer, RenderError, RenderedPage};
pub use template::{Template, TemplateContext, TemplateError, TemplateRegistry};
