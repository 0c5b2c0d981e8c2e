//! Report rendering for confdiff.
//!
//! Reports only format what the diff engine classified; they never look at
//! the compared trees.
//!
//! - [`TextReport`] -- Terminal output with a boxed table of changed values
//! - [`HtmlReport`] -- A self-contained web page
//! - [`render_json`] -- Machine-readable output

pub mod context;
pub mod error;
pub mod format;
pub mod html;
pub mod json;
pub mod text;

pub use context::{ReportContext, Summary};
pub use error::{ReportError, ReportResult};
pub use format::{escape_html, truncate};
pub use html::HtmlReport;
pub use json::render_json;
pub use text::{TextReport, MAX_VALUE_WIDTH};
