use confdiff_diff::DiffResult;
use serde::Serialize;

use crate::context::{ReportContext, Summary};
use crate::error::ReportResult;

#[derive(Serialize)]
struct JsonReport<'a> {
    left: &'a str,
    right: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    left_section: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    right_section: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    start_path: Option<&'a str>,
    equal: bool,
    summary: Summary,
    differences: &'a DiffResult,
}

/// Pretty-printed JSON with the five buckets under `differences`.
pub fn render_json(context: &ReportContext, result: &DiffResult) -> ReportResult<String> {
    let report = JsonReport {
        left: &context.left_label,
        right: &context.right_label,
        left_section: context.left_section.as_deref(),
        right_section: context.right_section.as_deref(),
        start_path: context.start_path.as_deref(),
        equal: result.is_empty(),
        summary: Summary::of(result),
        differences: result,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use confdiff_diff::diff_values;
    use confdiff_types::Value;
    use serde_json::json;

    fn render(old: serde_json::Value, new: serde_json::Value) -> serde_json::Value {
        let ctx = ReportContext::new("a.yaml", "b.yaml");
        let result = diff_values(&Value::from(old), &Value::from(new));
        serde_json::from_str(&render_json(&ctx, &result).unwrap()).unwrap()
    }

    #[test]
    fn equal_documents() {
        let out = render(json!({"a": true}), json!({"a": "true"}));
        assert_eq!(out["equal"], json!(true));
        assert_eq!(out["summary"]["total"], json!(0));
        assert_eq!(out["differences"]["changed"], json!([]));
        assert!(out.get("left_section").is_none());
    }

    #[test]
    fn buckets_and_summary() {
        let out = render(
            json!({"srv": {"port": 80}, "old": 1, "tags": ["a"]}),
            json!({"srv": {"port": 81}, "tags": ["b"]}),
        );
        assert_eq!(out["left"], json!("a.yaml"));
        assert_eq!(out["equal"], json!(false));
        assert_eq!(
            out["summary"],
            json!({"total": 4, "changed": 1, "only_left": 2, "only_right": 1})
        );
        assert_eq!(out["differences"]["changed"][0]["path"], json!(["srv", "port"]));
        assert_eq!(out["differences"]["changed"][0]["old"], json!(80));
        assert_eq!(out["differences"]["removed_key"][0]["path"], json!(["old"]));
        assert_eq!(out["differences"]["added_list_item"][0]["value"], json!("b"));
    }

    #[test]
    fn sections_are_included_when_set() {
        let ctx = ReportContext::new("a", "b")
            .with_sections(Some("cfg".into()), Some("cfg".into()))
            .with_start_path(Some("x.y".into()));
        let text = render_json(&ctx, &DiffResult::new()).unwrap();
        let out: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(out["left_section"], json!("cfg"));
        assert_eq!(out["start_path"], json!("x.y"));
    }
}
