//! Workflow export helpers
//!
//! `download_workflow` returns the raw remote payload; these helpers
//! turn it into a named JSON file for the presentation layer.

/// File name for an exported workflow: every whitespace run collapses
/// to a single underscore, edge runs included, and `_workflow.json` is
/// appended.
pub fn workflow_file_name(system_name: &str) -> String {
    let mut sanitized = String::with_capacity(system_name.len());
    let mut in_whitespace = false;
    for ch in system_name.chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                sanitized.push('_');
                in_whitespace = true;
            }
        } else {
            sanitized.push(ch);
            in_whitespace = false;
        }
    }
    format!("{sanitized}_workflow.json")
}

/// Pretty-printed JSON bytes for an export payload.
pub fn workflow_export_bytes(payload: &serde_json::Value) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec_pretty(payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_collapses_whitespace() {
        assert_eq!(
            workflow_file_name("Abandoned Cart Recovery"),
            "Abandoned_Cart_Recovery_workflow.json"
        );
        assert_eq!(
            workflow_file_name("spaced \t out  name"),
            "spaced_out_name_workflow.json"
        );
    }

    #[test]
    fn test_file_name_keeps_edge_whitespace_as_underscores() {
        assert_eq!(workflow_file_name("  x "), "_x__workflow.json");
    }

    #[test]
    fn test_export_bytes_are_pretty_json() {
        let payload = serde_json::json!({"id": "wf-1", "nodes": []});
        let bytes = workflow_export_bytes(&payload).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.contains('\n'));
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(&text).unwrap(),
            payload
        );
    }
}
