use std::fmt;

use serde::{Deserialize, Serialize};

/// The two lookups the gateway can run against the trends service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Suggestions,
    RelatedQueries,
}

impl Operation {
    pub const ALL: [Operation; 2] = [Operation::Suggestions, Operation::RelatedQueries];

    pub fn name(&self) -> &'static str {
        match self {
            Operation::Suggestions => "suggestions",
            Operation::RelatedQueries => "related_queries",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A structured call from the agent: which operation, with raw parameters.
///
/// `parameters` stays untyped here; it is checked by
/// [`crate::ParameterValidator`] so errors can name the offending field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToolCall {
    pub operation: Operation,
    #[serde(default)]
    pub parameters: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operation_names() {
        assert_eq!(
            serde_json::to_string(&Operation::RelatedQueries).unwrap(),
            "\"related_queries\""
        );
        for op in Operation::ALL {
            let parsed: Operation = serde_json::from_str(&format!("\"{op}\"")).unwrap();
            assert_eq!(parsed, op);
        }
    }

    #[test]
    fn parse_tool_call() {
        let call: ToolCall = serde_json::from_str(
            r#"{"operation": "suggestions", "parameters": {"keywords": ["Pizza"]}}"#,
        )
        .unwrap();
        assert_eq!(call.operation, Operation::Suggestions);
        assert_eq!(call.parameters["keywords"][0], "Pizza");
    }

    #[test]
    fn tool_call_is_closed() {
        let result: Result<ToolCall, _> = serde_json::from_str(
            r#"{"operation": "suggestions", "parameters": {}, "extra": 1}"#,
        );
        assert!(result.is_err());

        let result: Result<ToolCall, _> =
            serde_json::from_str(r#"{"operation": "interest_over_time", "parameters": {}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn missing_parameters_become_null() {
        let call: ToolCall = serde_json::from_str(r#"{"operation": "related_queries"}"#).unwrap();
        assert!(call.parameters.is_null());
    }
}
