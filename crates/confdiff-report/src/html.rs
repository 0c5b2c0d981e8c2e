//! Self-contained HTML report.
//!
//! The page carries its own styles (light, night, and high-contrast themes)
//! and a little script for collapsing sections; it has no external assets.
//! Every piece of document text is escaped before it is written.

use std::fmt;
use std::fs;
use std::path::Path as FsPath;

use confdiff_diff::{DiffEntry, DiffKind, DiffResult, Path};

use crate::context::{ReportContext, Summary};
use crate::error::{ReportError, ReportResult};
use crate::format::escape_html;

/// A diff rendered as a web page. Use it through [`fmt::Display`].
pub struct HtmlReport<'a> {
    context: &'a ReportContext,
    result: &'a DiffResult,
}

/// Per-kind presentation: element id, header class, icon, item marker class.
fn section_style(kind: DiffKind) -> (&'static str, &'static str, &'static str, &'static str) {
    match kind {
        DiffKind::Changed => ("section-changed", "changed", "🔄", ""),
        DiffKind::RemovedKey => ("section-file1", "file1-only", "➖", "remove"),
        DiffKind::AddedKey => ("section-file2", "file2-only", "➕", "add"),
        DiffKind::RemovedListItem => ("section-list-file1", "list-file1", "📋", "remove"),
        DiffKind::AddedListItem => ("section-list-file2", "list-file2", "📋", "add"),
    }
}

fn path_html(path: &Path) -> String {
    if path.is_root() {
        return format!(r#"<span class="path-segment">{}</span>"#, escape_html(&path.to_string()));
    }
    path.segments()
        .iter()
        .map(|segment| format!(r#"<span class="path-segment">{}</span>"#, escape_html(segment)))
        .collect::<Vec<_>>()
        .join(r#"<span class="path-arrow">→</span>"#)
}

fn value_html(value: Option<&confdiff_types::Value>) -> String {
    value.map(|v| escape_html(&v.to_string())).unwrap_or_default()
}

impl<'a> HtmlReport<'a> {
    pub fn new(context: &'a ReportContext, result: &'a DiffResult) -> Self {
        Self { context, result }
    }

    /// Render the page into a file, replacing it if it exists.
    pub fn write_to(&self, path: &FsPath) -> ReportResult<()> {
        fs::write(path, self.to_string()).map_err(|source| ReportError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    fn write_meta(&self, f: &mut fmt::Formatter<'_>, label: &str, value: &str, badge: bool) -> fmt::Result {
        let class = if badge { r#" class="file-badge""# } else { "" };
        writeln!(
            f,
            r#"                <div class="meta-item"><span class="meta-label">{label}:</span><span{class}>{}</span></div>"#,
            escape_html(value)
        )
    }

    fn write_header(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ctx = self.context;
        writeln!(f, "        <header>")?;
        writeln!(f, "            <h1>📊 YAML Comparison Report</h1>")?;
        writeln!(f, r#"            <div class="meta-info">"#)?;
        self.write_meta(f, "File 1", &ctx.left_label, true)?;
        self.write_meta(f, "File 2", &ctx.right_label, true)?;
        match ctx.sections() {
            Some((left, right)) if left == right => self.write_meta(f, "Config Key", left, true)?,
            Some((left, right)) => {
                self.write_meta(f, "Config Keys", &format!("{left} vs {right}"), true)?
            }
            None => {}
        }
        if let Some(start) = &ctx.start_path {
            self.write_meta(f, "Path", start, true)?;
        }
        let generated = ctx.generated_at.format("%Y-%m-%d %H:%M:%S").to_string();
        self.write_meta(f, "Generated", &generated, false)?;
        writeln!(f, "            </div>")?;
        writeln!(f, "        </header>")
    }

    fn write_summary(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ctx = self.context;
        let summary = Summary::of(self.result);
        writeln!(f, r#"        <div class="legend">"#)?;
        for (class, label) in [
            ("changed", "Values Changed".to_string()),
            ("file1", format!("Only in {}", ctx.left_label)),
            ("file2", format!("Only in {}", ctx.right_label)),
        ] {
            writeln!(
                f,
                r#"            <div class="legend-item"><div class="legend-color {class}"></div><span>{}</span></div>"#,
                escape_html(&label)
            )?;
        }
        writeln!(f, "        </div>")?;

        writeln!(f, r#"        <div class="summary">"#)?;
        for (class, count, label) in [
            ("", summary.total, "Total Differences"),
            (" changed", summary.changed, "Values Changed"),
            (" file1", summary.only_left, "Only in File 1"),
            (" file2", summary.only_right, "Only in File 2"),
        ] {
            writeln!(
                f,
                r#"            <div class="summary-card{class}"><div class="summary-number">{count}</div><div class="summary-label">{label}</div></div>"#
            )?;
        }
        writeln!(f, "        </div>")?;

        writeln!(f, r#"        <div class="controls">"#)?;
        writeln!(f, r#"            <button class="control-btn" onclick="expandAll()">▼ Expand All</button>"#)?;
        writeln!(f, r#"            <button class="control-btn" onclick="collapseAll()">▲ Collapse All</button>"#)?;
        writeln!(f, "        </div>")
    }

    fn write_section_open(&self, f: &mut fmt::Formatter<'_>, kind: DiffKind, number: usize) -> fmt::Result {
        let (id, class, icon, _) = section_style(kind);
        writeln!(f, r#"        <div class="section" id="{id}">"#)?;
        writeln!(
            f,
            r#"            <div class="section-header {class}" onclick="toggleSection('{id}')">"#
        )?;
        writeln!(f, r#"                <span class="section-number">{number}</span>"#)?;
        writeln!(f, r#"                <span class="section-icon">{icon}</span>"#)?;
        writeln!(f, "                {}", escape_html(&self.context.title(kind)))?;
        writeln!(
            f,
            r#"                <span class="count-badge">{} items</span>"#,
            self.result.count(kind)
        )?;
        writeln!(f, r#"                <span class="toggle-icon">▼</span>"#)?;
        writeln!(f, "            </div>")?;
        writeln!(f, r#"            <div class="section-content">"#)
    }

    fn write_changed(&self, f: &mut fmt::Formatter<'_>, entries: &[DiffEntry]) -> fmt::Result {
        writeln!(f, "                <table>")?;
        writeln!(f, "                    <thead><tr>")?;
        writeln!(f, "                        <th>#</th>")?;
        writeln!(f, r#"                        <th style="width: 38%;">Path</th>"#)?;
        writeln!(
            f,
            r#"                        <th style="width: 28%;">{}</th>"#,
            escape_html(&self.context.left_label)
        )?;
        writeln!(
            f,
            r#"                        <th style="width: 28%;">{}</th>"#,
            escape_html(&self.context.right_label)
        )?;
        writeln!(f, "                    </tr></thead>")?;
        writeln!(f, "                    <tbody>")?;
        for (i, entry) in entries.iter().enumerate() {
            writeln!(f, "                        <tr>")?;
            writeln!(f, r#"                            <td><span class="row-number">{}</span></td>"#, i + 1)?;
            writeln!(f, r#"                            <td class="path-cell">{}</td>"#, path_html(entry.path()))?;
            writeln!(
                f,
                r#"                            <td><div class="value-cell value-old">{}</div></td>"#,
                value_html(entry.old_value())
            )?;
            writeln!(
                f,
                r#"                            <td><div class="value-cell value-new">{}</div></td>"#,
                value_html(entry.new_value())
            )?;
            writeln!(f, "                        </tr>")?;
        }
        writeln!(f, "                    </tbody>")?;
        writeln!(f, "                </table>")
    }

    fn write_items(&self, f: &mut fmt::Formatter<'_>, kind: DiffKind, entries: &[DiffEntry]) -> fmt::Result {
        let (_, _, _, marker) = section_style(kind);
        let with_value = matches!(kind, DiffKind::RemovedListItem | DiffKind::AddedListItem);
        writeln!(f, r#"                <ul class="item-list">"#)?;
        for (i, entry) in entries.iter().enumerate() {
            writeln!(f, "                    <li>")?;
            writeln!(f, r#"                        <span class="item-number {marker}">{}</span>"#, i + 1)?;
            writeln!(
                f,
                r#"                        <span class="item-path">{}</span>"#,
                escape_html(&entry.path().to_string())
            )?;
            if with_value {
                writeln!(
                    f,
                    r#"                        <span class="item-value">{}</span>"#,
                    value_html(entry.old_value().or(entry.new_value()))
                )?;
            }
            writeln!(f, "                    </li>")?;
        }
        writeln!(f, "                </ul>")
    }

    fn write_sections(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut number = 1;
        for kind in DiffKind::ALL {
            let entries = self.result.entries(kind);
            if entries.is_empty() {
                continue;
            }
            self.write_section_open(f, kind, number)?;
            if kind == DiffKind::Changed {
                self.write_changed(f, entries)?;
            } else {
                self.write_items(f, kind, entries)?;
            }
            writeln!(f, "            </div>")?;
            writeln!(f, "        </div>")?;
            number += 1;
        }
        Ok(())
    }
}

impl fmt::Display for HtmlReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "<!DOCTYPE html>")?;
        writeln!(f, r#"<html lang="en">"#)?;
        writeln!(f, "<head>")?;
        writeln!(f, r#"    <meta charset="UTF-8">"#)?;
        writeln!(f, r#"    <meta name="viewport" content="width=device-width, initial-scale=1.0">"#)?;
        writeln!(f, "    <title>YAML Comparison Report</title>")?;
        f.write_str(STYLE)?;
        writeln!(f, "</head>")?;
        writeln!(f, "<body>")?;
        f.write_str(THEME_SWITCHER)?;
        writeln!(f, r#"    <div class="container">"#)?;

        self.write_header(f)?;
        if self.result.is_empty() {
            writeln!(f, r#"        <div class="success-banner">"#)?;
            writeln!(f, r#"            <div class="success-icon">✅</div>"#)?;
            writeln!(f, "            <h2>Files are semantically equal!</h2>")?;
            writeln!(f, "        </div>")?;
        } else {
            self.write_summary(f)?;
            self.write_sections(f)?;
        }

        writeln!(f, "        <footer>Generated by confdiff | Configuration Comparison Tool</footer>")?;
        writeln!(f, "    </div>")?;
        f.write_str(SCRIPT)?;
        writeln!(f, "</body>")?;
        writeln!(f, "</html>")
    }
}

const THEME_SWITCHER: &str = r#"    <div class="theme-switcher">
        <button class="theme-btn" id="btn-light" onclick="setTheme('light')">☀️ Light</button>
        <button class="theme-btn" id="btn-night" onclick="setTheme('night')">🌙 Night</button>
        <button class="theme-btn" id="btn-contrast" onclick="setTheme('contrast')">◐ Contrast</button>
    </div>
"#;

const STYLE: &str = r#"    <style>
        * { box-sizing: border-box; }
        :root {
            --bg-primary: #f8f9fa; --bg-secondary: #ffffff; --bg-tertiary: #e9ecef;
            --text-primary: #212529; --text-secondary: #495057; --text-muted: #6c757d;
            --border-color: #dee2e6;
            --header-bg: linear-gradient(135deg, #4a90a4 0%, #2d6a7a 100%); --header-text: #ffffff;
            --accent-changed: #e67e22; --accent-file1: #3498db; --accent-file2: #27ae60;
            --section-changed-bg: linear-gradient(135deg, #f39c12 0%, #e67e22 100%);
            --section-file1-bg: linear-gradient(135deg, #3498db 0%, #2980b9 100%);
            --section-file2-bg: linear-gradient(135deg, #27ae60 0%, #1e8449 100%);
            --section-list1-bg: linear-gradient(135deg, #9b59b6 0%, #8e44ad 100%);
            --section-list2-bg: linear-gradient(135deg, #1abc9c 0%, #16a085 100%);
            --value-old-bg: #fdecea; --value-old-border: #e74c3c; --value-old-text: #c0392b;
            --value-new-bg: #e8f8f0; --value-new-border: #27ae60; --value-new-text: #1e8449;
            --row-number-bg: #3498db; --row-number-text: #ffffff;
            --button-bg: #e9ecef; --button-text: #495057; --button-hover-bg: #dee2e6;
            --success-bg: linear-gradient(135deg, #27ae60 0%, #2ecc71 100%);
            --shadow-md: 0 4px 16px rgba(0,0,0,0.1); --shadow-lg: 0 8px 32px rgba(0,0,0,0.12);
        }
        [data-theme="night"] {
            --bg-primary: #1a1d23; --bg-secondary: #22262e; --bg-tertiary: #2a2f38;
            --text-primary: #e4e6eb; --text-secondary: #b0b3b8; --text-muted: #8a8d91;
            --border-color: #3a3f47;
            --header-bg: linear-gradient(135deg, #2d5a6a 0%, #1e3d4a 100%); --header-text: #e4e6eb;
            --accent-changed: #f5a623; --accent-file1: #5dade2; --accent-file2: #58d68d;
            --section-changed-bg: linear-gradient(135deg, #b8860b 0%, #996600 100%);
            --section-file1-bg: linear-gradient(135deg, #2874a6 0%, #1b4f72 100%);
            --section-file2-bg: linear-gradient(135deg, #1e8449 0%, #145a32 100%);
            --section-list1-bg: linear-gradient(135deg, #7d3c98 0%, #5b2c6f 100%);
            --section-list2-bg: linear-gradient(135deg, #148f77 0%, #0e6655 100%);
            --value-old-bg: #3d2a2a; --value-old-border: #c0392b; --value-old-text: #f1948a;
            --value-new-bg: #2a3d2a; --value-new-border: #27ae60; --value-new-text: #82e0aa;
            --row-number-bg: #2874a6; --row-number-text: #e4e6eb;
            --button-bg: #2a2f38; --button-text: #b0b3b8; --button-hover-bg: #3a3f47;
            --success-bg: linear-gradient(135deg, #1e8449 0%, #27ae60 100%);
            --shadow-md: 0 4px 16px rgba(0,0,0,0.4); --shadow-lg: 0 8px 32px rgba(0,0,0,0.5);
        }
        [data-theme="contrast"] {
            --bg-primary: #ffffff; --bg-secondary: #ffffff; --bg-tertiary: #f0f0f0;
            --text-primary: #000000; --text-secondary: #1a1a1a; --text-muted: #333333;
            --border-color: #000000;
            --header-bg: #000000; --header-text: #ffffff;
            --accent-changed: #b35900; --accent-file1: #0047ab; --accent-file2: #006400;
            --section-changed-bg: #b35900; --section-file1-bg: #0047ab; --section-file2-bg: #006400;
            --section-list1-bg: #4b0082; --section-list2-bg: #008080;
            --value-old-bg: #ffe6e6; --value-old-border: #cc0000; --value-old-text: #990000;
            --value-new-bg: #e6ffe6; --value-new-border: #006400; --value-new-text: #004d00;
            --row-number-bg: #000000; --row-number-text: #ffffff;
            --button-bg: #f0f0f0; --button-text: #000000; --button-hover-bg: #e0e0e0;
            --success-bg: #006400;
            --shadow-md: 0 4px 8px rgba(0,0,0,0.25); --shadow-lg: 0 6px 12px rgba(0,0,0,0.3);
        }
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Ubuntu, sans-serif;
            font-size: 18px; background: var(--bg-primary); color: var(--text-primary);
            margin: 0; padding: 28px; line-height: 1.7;
        }
        .container { max-width: 1500px; margin: 0 auto; }
        .theme-switcher {
            position: fixed; top: 20px; right: 20px; display: flex; gap: 8px;
            background: var(--bg-secondary); padding: 8px 12px; border-radius: 12px;
            box-shadow: var(--shadow-md); border: 1px solid var(--border-color); z-index: 1000;
        }
        .theme-btn {
            padding: 10px 16px; border: 2px solid var(--border-color); border-radius: 8px;
            cursor: pointer; font-weight: 700; background: var(--button-bg); color: var(--button-text);
        }
        .theme-btn:hover { background: var(--button-hover-bg); }
        .theme-btn.active { background: var(--row-number-bg); color: var(--row-number-text); }
        header {
            background: var(--header-bg); padding: 40px 52px; border-radius: 18px;
            margin-bottom: 36px; box-shadow: var(--shadow-lg);
        }
        h1 { margin: 0 0 24px 0; font-size: 2.8em; color: var(--header-text); }
        .meta-info { display: flex; flex-wrap: wrap; gap: 28px; color: var(--header-text); }
        .meta-item { display: flex; align-items: center; gap: 12px; }
        .meta-label { font-weight: 700; opacity: 0.85; }
        .file-badge {
            background: rgba(255,255,255,0.2); padding: 8px 18px; border-radius: 22px;
            font-family: 'Monaco', 'Consolas', monospace;
        }
        .success-banner {
            background: var(--success-bg); padding: 60px; border-radius: 18px;
            text-align: center; box-shadow: var(--shadow-lg); color: #ffffff;
        }
        .success-icon { font-size: 5em; margin-bottom: 24px; }
        .legend, .summary, .controls { display: flex; flex-wrap: wrap; gap: 20px; margin-bottom: 28px; }
        .legend-item { display: flex; align-items: center; gap: 10px; }
        .legend-color { width: 22px; height: 22px; border-radius: 6px; }
        .legend-color.changed { background: var(--accent-changed); }
        .legend-color.file1 { background: var(--accent-file1); }
        .legend-color.file2 { background: var(--accent-file2); }
        .summary-card {
            flex: 1; min-width: 180px; background: var(--bg-secondary); padding: 24px;
            border-radius: 14px; box-shadow: var(--shadow-md); border-top: 5px solid var(--text-muted);
        }
        .summary-card.changed { border-top-color: var(--accent-changed); }
        .summary-card.file1 { border-top-color: var(--accent-file1); }
        .summary-card.file2 { border-top-color: var(--accent-file2); }
        .summary-number { font-size: 2.6em; font-weight: 800; }
        .summary-label { color: var(--text-secondary); font-weight: 600; }
        .control-btn {
            padding: 12px 22px; border-radius: 10px; border: 2px solid var(--border-color);
            background: var(--button-bg); color: var(--button-text); cursor: pointer; font-weight: 700;
        }
        .section {
            background: var(--bg-secondary); border-radius: 18px; margin-bottom: 32px;
            overflow: hidden; box-shadow: var(--shadow-md); border: 1px solid var(--border-color);
        }
        .section-header {
            padding: 24px 32px; font-weight: 800; font-size: 1.4em; display: flex;
            align-items: center; gap: 16px; cursor: pointer; user-select: none; color: #ffffff;
        }
        .section-header.changed { background: var(--section-changed-bg); }
        .section-header.file1-only { background: var(--section-file1-bg); }
        .section-header.file2-only { background: var(--section-file2-bg); }
        .section-header.list-file1 { background: var(--section-list1-bg); }
        .section-header.list-file2 { background: var(--section-list2-bg); }
        .section-number {
            background: rgba(0,0,0,0.25); width: 42px; height: 42px; border-radius: 50%;
            display: flex; align-items: center; justify-content: center;
        }
        .count-badge { margin-left: auto; background: rgba(0,0,0,0.2); padding: 6px 16px; border-radius: 20px; }
        .section.collapsed .section-content { display: none; }
        .section.collapsed .toggle-icon { transform: rotate(-90deg); }
        .section-content { padding: 24px 32px; }
        table { width: 100%; border-collapse: collapse; }
        th { text-align: left; padding: 14px; border-bottom: 2px solid var(--border-color); }
        td { padding: 14px; border-bottom: 1px solid var(--border-color); vertical-align: top; }
        .row-number {
            background: var(--row-number-bg); color: var(--row-number-text);
            padding: 4px 12px; border-radius: 12px; font-weight: 700;
        }
        .path-cell { font-family: 'Monaco', 'Consolas', monospace; word-break: break-word; }
        .path-arrow { color: var(--text-muted); margin: 0 6px; }
        .value-cell {
            font-family: 'Monaco', 'Consolas', monospace; padding: 8px 12px;
            border-radius: 8px; word-break: break-word; white-space: pre-wrap;
        }
        .value-old { background: var(--value-old-bg); border-left: 4px solid var(--value-old-border); color: var(--value-old-text); }
        .value-new { background: var(--value-new-bg); border-left: 4px solid var(--value-new-border); color: var(--value-new-text); }
        .item-list { list-style: none; margin: 0; padding: 0; }
        .item-list li {
            display: flex; gap: 16px; align-items: baseline; padding: 12px 0;
            border-bottom: 1px solid var(--border-color);
        }
        .item-number { padding: 2px 12px; border-radius: 12px; color: #ffffff; font-weight: 700; }
        .item-number.remove { background: var(--accent-file1); }
        .item-number.add { background: var(--accent-file2); }
        .item-path { font-family: 'Monaco', 'Consolas', monospace; font-weight: 700; }
        .item-value { font-family: 'Monaco', 'Consolas', monospace; color: var(--text-secondary); word-break: break-word; }
        footer { text-align: center; color: var(--text-muted); padding: 24px; }
    </style>
"#;

const SCRIPT: &str = r#"    <script>
        function setTheme(theme) {
            if (theme === 'light') {
                document.documentElement.removeAttribute('data-theme');
            } else {
                document.documentElement.setAttribute('data-theme', theme);
            }
            document.querySelectorAll('.theme-btn').forEach(btn => btn.classList.remove('active'));
            document.getElementById('btn-' + theme).classList.add('active');
            localStorage.setItem('confdiff-theme', theme);
        }

        function toggleSection(sectionId) {
            document.getElementById(sectionId).classList.toggle('collapsed');
        }

        function expandAll() {
            document.querySelectorAll('.section').forEach(s => s.classList.remove('collapsed'));
        }

        function collapseAll() {
            document.querySelectorAll('.section').forEach(s => s.classList.add('collapsed'));
        }

        document.addEventListener('DOMContentLoaded', function() {
            setTheme(localStorage.getItem('confdiff-theme') || 'light');
        });
    </script>
"#;
