//! Terminal report.
//!
//! Changed values are laid out as a boxed table; keys and list items that
//! exist on one side only are numbered lists.

use std::fmt;

use colored::{ColoredString, Colorize};
use confdiff_diff::{DiffEntry, DiffKind, DiffResult};
use confdiff_types::Value;

use crate::context::ReportContext;
use crate::format::truncate;

/// Widest a value column of the changed-values table may grow.
pub const MAX_VALUE_WIDTH: usize = 40;

/// A diff rendered for a terminal. Use it through [`fmt::Display`].
pub struct TextReport<'a> {
    context: &'a ReportContext,
    result: &'a DiffResult,
    color: bool,
}

impl<'a> TextReport<'a> {
    pub fn new(context: &'a ReportContext, result: &'a DiffResult) -> Self {
        Self {
            context,
            result,
            color: false,
        }
    }

    /// Emit ANSI colors.
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    fn paint(&self, text: &str, style: fn(&str) -> ColoredString) -> String {
        if self.color {
            style(text).to_string()
        } else {
            text.to_string()
        }
    }

    fn write_header(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ctx = self.context;
        writeln!(
            f,
            "Comparing: {} vs {}",
            self.paint(&ctx.left_label, |s| s.bold()),
            self.paint(&ctx.right_label, |s| s.bold())
        )?;
        if let Some(line) = ctx.section_line() {
            writeln!(f, "{line}")?;
        }
        if let Some(start) = &ctx.start_path {
            writeln!(f, "Starting from: {start}")?;
        }
        writeln!(f, "{}", "-".repeat(50))
    }

    fn write_banner(&self, f: &mut fmt::Formatter<'_>, kind: DiffKind) -> fmt::Result {
        // File labels keep their case.
        let title = match self.context.title_parts(kind) {
            (heading, Some(label)) => format!("{} {label}", heading.to_uppercase()),
            (heading, None) => heading.to_uppercase(),
        };
        writeln!(f, "{}", self.paint(&format!("═══ {title} ═══"), |s| s.cyan().bold()))
    }

    fn write_changed_table(&self, f: &mut fmt::Formatter<'_>, entries: &[DiffEntry]) -> fmt::Result {
        let rows: Vec<(String, String, String)> = entries
            .iter()
            .map(|e| {
                (
                    e.path().to_string(),
                    render_value(e.old_value()),
                    render_value(e.new_value()),
                )
            })
            .collect();

        let width = |s: &str| s.chars().count();
        let num_w = rows.len().to_string().len();
        let path_w = rows.iter().map(|r| width(&r.0)).chain([width("Path")]).max().unwrap_or(0);
        let old_w = rows
            .iter()
            .map(|r| width(&r.1))
            .chain([width(&self.context.left_label)])
            .max()
            .unwrap_or(0)
            .min(MAX_VALUE_WIDTH);
        let new_w = rows
            .iter()
            .map(|r| width(&r.2))
            .chain([width(&self.context.right_label)])
            .max()
            .unwrap_or(0)
            .min(MAX_VALUE_WIDTH);

        let rule = |left: char, mid: char, right: char| {
            format!(
                "{left}{}{mid}{}{mid}{}{mid}{}{right}",
                "─".repeat(num_w + 2),
                "─".repeat(path_w + 2),
                "─".repeat(old_w + 2),
                "─".repeat(new_w + 2),
            )
        };

        writeln!(f, "{}", rule('┌', '┬', '┐'))?;
        writeln!(
            f,
            "│ {:<num_w$} │ {:<path_w$} │ {:<old_w$} │ {:<new_w$} │",
            "#",
            "Path",
            truncate(&self.context.left_label, old_w),
            truncate(&self.context.right_label, new_w),
        )?;
        writeln!(f, "{}", rule('├', '┼', '┤'))?;

        for (i, (path, old, new)) in rows.iter().enumerate() {
            // Pad before painting so escape codes do not count toward width.
            let old = format!("{:<old_w$}", truncate(old, old_w));
            let new = format!("{:<new_w$}", truncate(new, new_w));
            writeln!(
                f,
                "│ {:<num_w$} │ {:<path_w$} │ {} │ {} │",
                i + 1,
                path,
                self.paint(&old, |s| s.red()),
                self.paint(&new, |s| s.green()),
            )?;
            if i + 1 < rows.len() {
                writeln!(f, "{}", rule('├', '┼', '┤'))?;
            }
        }

        writeln!(f, "{}", rule('└', '┴', '┘'))
    }

    fn write_list(&self, f: &mut fmt::Formatter<'_>, kind: DiffKind) -> fmt::Result {
        let entries = self.result.entries(kind);
        if entries.is_empty() {
            return Ok(());
        }

        self.write_banner(f, kind)?;
        for (i, entry) in entries.iter().enumerate() {
            match kind {
                DiffKind::RemovedListItem | DiffKind::AddedListItem => {
                    let value = render_value(entry.old_value().or(entry.new_value()));
                    writeln!(f, "  {}. {}: {}", i + 1, entry.path(), value)?;
                }
                _ => writeln!(f, "  {}. {}", i + 1, entry.path())?,
            }
        }
        writeln!(f)
    }
}

fn render_value(value: Option<&Value>) -> String {
    value.map(Value::to_string).unwrap_or_default()
}

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_header(f)?;

        if self.result.is_empty() {
            return writeln!(f, "{}", self.paint("✅ Files are semantically equal!", |s| s.green().bold()));
        }

        writeln!(f, "{}", self.paint("❌ Differences found:", |s| s.red().bold()))?;
        writeln!(f)?;

        let changed = self.result.entries(DiffKind::Changed);
        if !changed.is_empty() {
            self.write_banner(f, DiffKind::Changed)?;
            writeln!(f)?;
            self.write_changed_table(f, changed)?;
            writeln!(f)?;
        }

        for kind in [
            DiffKind::RemovedKey,
            DiffKind::AddedKey,
            DiffKind::RemovedListItem,
            DiffKind::AddedListItem,
        ] {
            self.write_list(f, kind)?;
        }
        Ok(())
    }
}
