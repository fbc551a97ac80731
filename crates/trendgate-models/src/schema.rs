//! Tool definitions handed to the calling agent.
//!
//! Descriptions double as instructions to the model, so they list the exact
//! accepted formats that [`crate::ParameterValidator`] enforces.

use serde::Serialize;
use serde_json::{json, Value};

use crate::operation::Operation;
use crate::query::{Property, MAX_KEYWORDS};
use crate::validate::fields;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

/// JSON schema shared by both operations. Closed: no additional properties.
pub fn parameters_schema() -> Value {
    let scopes: Vec<&str> = Property::ALL.iter().map(Property::as_str).collect();

    let mut properties = serde_json::Map::new();
    properties.insert(
        fields::KEYWORDS.to_string(),
        json!({
            "type": "array",
            "items": {"type": "string"},
            "minItems": 1,
            "maxItems": MAX_KEYWORDS,
            "description": "Search terms or Google Trends topic IDs, 1 to 5 items. \
                Each item is a plain keyword such as 'Pizza' or a topic ID starting with '/m/' \
                such as '/m/025rw19' (Iron, the chemical element). Prefer topic IDs for \
                ambiguous terms; the suggestions operation returns them. Duplicates are dropped.",
            "examples": [["Pizza"], ["Pizza", "Italian", "Spaghetti", "Breadsticks", "Sausage"], ["/m/025rw19"]]
        }),
    );
    properties.insert(
        fields::CATEGORY.to_string(),
        json!({
            "type": ["integer", "null"],
            "minimum": 0,
            "description": "Google Trends category ID (the number after 'cat=' in a Trends URL). \
                Omit or null for no category filter.",
            "examples": [71]
        }),
    );
    properties.insert(
        fields::REGION.to_string(),
        json!({
            "type": ["string", "null"],
            "pattern": "^[A-Z]{2}(-[A-Z]{2,5})?$",
            "description": "Region code: a two-letter country ('US') or country-region ('US-AL', \
                'GB-ENG'). Omit or null for worldwide. City names and free text are rejected.",
            "examples": ["US", "US-AL", "GB-ENG"]
        }),
    );
    properties.insert(
        fields::TIMEZONE_OFFSET.to_string(),
        json!({
            "type": "integer",
            "default": 0,
            "minimum": -720,
            "maximum": 840,
            "multipleOf": 15,
            "description": "Timezone offset from UTC in minutes, a multiple of 15. \
                US Central Time is 360. Defaults to 0 (UTC).",
            "examples": [0, 360, -330]
        }),
    );
    properties.insert(
        fields::TIMEFRAME.to_string(),
        json!({
            "type": "string",
            "default": "today 5-y",
            "description": "Time range. Only these forms: 'today 5-y' (default), 'all', \
                'YYYY-MM-DD YYYY-MM-DD', 'YYYY-MM-DDTHH YYYY-MM-DDTHH', 'today #-m' with # in \
                1, 3, 12, 'now #-d' with # in 1, 7, 'now #-H' with # in 1, 4. Dates are UTC.",
            "examples": ["today 5-y", "all", "2016-12-14 2017-01-25", "now 7-d", "now 1-H"]
        }),
    );
    properties.insert(
        fields::SCOPE.to_string(),
        json!({
            "type": "string",
            "enum": scopes,
            "default": "",
            "description": "Google property to restrict results to. '' is web search (default)."
        }),
    );

    json!({
        "type": "object",
        "properties": properties,
        "required": [fields::KEYWORDS],
        "additionalProperties": false
    })
}

/// One tool definition per operation, ready for function-calling registration.
pub fn tool_definitions() -> Vec<ToolDefinition> {
    Operation::ALL
        .iter()
        .map(|op| ToolDefinition {
            name: format!("google_trends_{}", op.name()),
            description: describe(*op).to_string(),
            parameters: parameters_schema(),
        })
        .collect()
}

fn describe(op: Operation) -> &'static str {
    match op {
        Operation::Suggestions => {
            "Look up Google Trends keyword and topic suggestions for each keyword. \
             category, region, timeframe and scope are accepted but ignored. \
             Returns up to 10 suggestions per keyword plus the total count."
        }
        Operation::RelatedQueries => {
            "Fetch the top and rising related search queries for each keyword, \
             up to 10 of each. A failing keyword reports an 'error' without \
             affecting the others."
        }
    }
}
