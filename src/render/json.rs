//! JSON rendering for document nodes.

use crate::error::{Error, Result};
use crate::model::Node;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a node sequence to a JSON array.
pub fn to_json(nodes: &[Node], format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(nodes),
        JsonFormat::Compact => serde_json::to_string(nodes),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_json_pretty() {
        let nodes = vec![Node::paragraph_with_text("Hello")];

        let json = to_json(&nodes, JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"paragraph\""));
        assert!(json.contains("Hello"));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_to_json_compact() {
        let nodes = vec![Node::paragraph_with_text("Hi")];

        let json = to_json(&nodes, JsonFormat::Compact).unwrap();
        assert_eq!(
            json,
            r#"[{"type":"paragraph","content":[{"type":"text","text":"Hi"}]}]"#
        );
    }
}
