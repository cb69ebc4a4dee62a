//! JSON output formatting

use super::Report;

/// Format a report as JSON
pub fn format(report: &Report) -> String {
    serde_json::to_string_pretty(report)
        .unwrap_or_else(|e| format!(r#"{{"error": "Failed to serialize report: {}"}}"#, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::Action;
    use crate::strip::ReferenceSite;

    #[test]
    fn test_json_report_fields() {
        let report = Report {
            action: Action::Remove,
            path: "app.ts".to_string(),
            removed: 2,
            written: true,
            references: vec![ReferenceSite { line: 3, column: 7 }],
            output: None,
        };
        let value: serde_json::Value = serde_json::from_str(&format(&report)).unwrap();
        assert_eq!(value["action"], "remove");
        assert_eq!(value["removed"], 2);
        assert_eq!(value["written"], true);
        assert_eq!(value["references"][0]["line"], 3);
        assert!(value.get("output").is_none());
    }
}
