use chrono::{DateTime, Local};
use confdiff_diff::{DiffKind, DiffResult};
use serde::Serialize;

/// What was compared, as shown in report headers.
#[derive(Clone, Debug)]
pub struct ReportContext {
    pub left_label: String,
    pub right_label: String,
    pub left_section: Option<String>,
    pub right_section: Option<String>,
    pub start_path: Option<String>,
    pub generated_at: DateTime<Local>,
}

impl ReportContext {
    pub fn new(left_label: impl Into<String>, right_label: impl Into<String>) -> Self {
        Self {
            left_label: left_label.into(),
            right_label: right_label.into(),
            left_section: None,
            right_section: None,
            start_path: None,
            generated_at: Local::now(),
        }
    }

    pub fn with_sections(mut self, left: Option<String>, right: Option<String>) -> Self {
        self.left_section = left;
        self.right_section = right;
        self
    }

    pub fn with_start_path(mut self, start_path: Option<String>) -> Self {
        self.start_path = start_path;
        self
    }

    pub fn with_generated_at(mut self, generated_at: DateTime<Local>) -> Self {
        self.generated_at = generated_at;
        self
    }

    /// Both section keys, when both sides have a non-empty one.
    pub fn sections(&self) -> Option<(&str, &str)> {
        let left = self.left_section.as_deref().filter(|s| !s.is_empty())?;
        let right = self.right_section.as_deref().filter(|s| !s.is_empty())?;
        Some((left, right))
    }

    /// `Config key: x` or `Config keys: x vs y`.
    pub fn section_line(&self) -> Option<String> {
        self.sections().map(|(left, right)| {
            if left == right {
                format!("Config key: {left}")
            } else {
                format!("Config keys: {left} vs {right}")
            }
        })
    }

    /// Heading words and the file label they refer to, for entries of `kind`.
    pub fn title_parts(&self, kind: DiffKind) -> (&'static str, Option<&str>) {
        match kind {
            DiffKind::Changed => ("Values Changed", None),
            DiffKind::RemovedKey => ("Only in", Some(self.left_label.as_str())),
            DiffKind::AddedKey => ("Only in", Some(self.right_label.as_str())),
            DiffKind::RemovedListItem => ("List Items Only in", Some(self.left_label.as_str())),
            DiffKind::AddedListItem => ("List Items Only in", Some(self.right_label.as_str())),
        }
    }

    /// Heading for the section listing entries of `kind`.
    pub fn title(&self, kind: DiffKind) -> String {
        match self.title_parts(kind) {
            (heading, Some(label)) => format!("{heading} {label}"),
            (heading, None) => heading.to_string(),
        }
    }
}

/// Headline counts of a diff.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub changed: usize,
    pub only_left: usize,
    pub only_right: usize,
}

impl Summary {
    pub fn of(result: &DiffResult) -> Self {
        Self {
            total: result.len(),
            changed: result.count(DiffKind::Changed),
            only_left: result.count(DiffKind::RemovedKey) + result.count(DiffKind::RemovedListItem),
            only_right: result.count(DiffKind::AddedKey) + result.count(DiffKind::AddedListItem),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use confdiff_diff::{DiffEntry, Path};
    use confdiff_types::Value;

    #[test]
    fn section_line_variants() {
        let ctx = ReportContext::new("a.yaml", "b.yaml");
        assert_eq!(ctx.section_line(), None);

        let shared = ctx.clone().with_sections(Some("cfg".into()), Some("cfg".into()));
        assert_eq!(shared.section_line().as_deref(), Some("Config key: cfg"));

        let split = ctx.with_sections(Some("cfg".into()), Some("cfg-prod".into()));
        assert_eq!(split.section_line().as_deref(), Some("Config keys: cfg vs cfg-prod"));

        let one_sided = ReportContext::new("a.yaml", "b.yaml").with_sections(None, Some("prod".into()));
        assert_eq!(one_sided.section_line(), None);

        let blank = ReportContext::new("a.yaml", "b.yaml").with_sections(Some(String::new()), Some("prod".into()));
        assert_eq!(blank.section_line(), None);
    }

    #[test]
    fn titles_name_the_files() {
        let ctx = ReportContext::new("a.yaml", "b.yaml");
        assert_eq!(ctx.title(DiffKind::RemovedKey), "Only in a.yaml");
        assert_eq!(ctx.title(DiffKind::AddedListItem), "List Items Only in b.yaml");
    }

    #[test]
    fn summary_counts() {
        let result = DiffResult::classify(vec![
            DiffEntry::Changed { path: Path::root().child("a"), old: Value::from(1i64), new: Value::from(2i64) },
            DiffEntry::RemovedKey { path: Path::root().child("b"), value: Value::Null },
            DiffEntry::RemovedListItem { path: Path::root().child("c"), value: Value::Null },
            DiffEntry::AddedKey { path: Path::root().child("d"), value: Value::Null },
        ]);
        assert_eq!(
            Summary::of(&result),
            Summary { total: 4, changed: 1, only_left: 2, only_right: 1 }
        );
    }
}
