use std::collections::HashMap;

use async_trait::async_trait;
use serde::Serialize;
use trendgate_models::{QueryParameters, Record};

use crate::error::ClientError;

/// Query sent to the explore endpoint before fetching widget data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExplorePayload {
    pub keywords: Vec<String>,
    pub timeframe: String,
    /// Region code, `""` for worldwide.
    pub geo: String,
    /// Property identifier as the service spells it (`youtube`, `froogle`, ...).
    pub gprop: String,
    /// Category ID, `0` for all categories.
    pub category: u64,
}

impl ExplorePayload {
    /// Single-keyword payload carrying the query's filters.
    pub fn for_keyword(keyword: &str, params: &QueryParameters) -> Self {
        Self {
            keywords: vec![keyword.to_string()],
            timeframe: params.timeframe().to_string(),
            geo: params
                .region()
                .map(|r| r.as_str().to_string())
                .unwrap_or_default(),
            gprop: params.property().gprop().to_string(),
            category: params.category().unwrap_or(0),
        }
    }
}

/// The two ranked lists of a related-queries widget; `None` when the
/// service returned no such list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankedLists {
    pub top: Option<Vec<Record>>,
    pub rising: Option<Vec<Record>>,
}

/// Related queries keyed by the keyword each widget reports.
pub type RelatedQueries = HashMap<String, RankedLists>;

/// Access to the trends service. Mockable for testing.
#[async_trait]
pub trait TrendsClient: Send + Sync {
    /// Keyword and topic suggestions for a bare search term.
    async fn suggestions(&self, keyword: &str) -> Result<Vec<Record>, ClientError>;

    /// Build the payload, then fetch its related-queries widgets.
    async fn related_queries(&self, payload: &ExplorePayload)
        -> Result<RelatedQueries, ClientError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use trendgate_models::ParameterValidator;

    #[test]
    fn payload_defaults_for_absent_filters() {
        let params = ParameterValidator::validate(&json!({"keywords": ["Pizza"]})).unwrap();
        let payload = ExplorePayload::for_keyword("Pizza", &params);
        assert_eq!(payload.keywords, vec!["Pizza"]);
        assert_eq!(payload.timeframe, "today 5-y");
        assert_eq!(payload.geo, "");
        assert_eq!(payload.gprop, "");
        assert_eq!(payload.category, 0);
    }

    #[test]
    fn payload_carries_filters() {
        let params = ParameterValidator::validate(&json!({
            "keywords": ["Pizza", "Pasta"],
            "category": 71,
            "region": "GB-ENG",
            "timeframe": "now 1-H",
            "scope": "shopping"
        }))
        .unwrap();
        let payload = ExplorePayload::for_keyword("Pasta", &params);
        assert_eq!(payload.keywords, vec!["Pasta"]);
        assert_eq!(payload.timeframe, "now 1-H");
        assert_eq!(payload.geo, "GB-ENG");
        assert_eq!(payload.gprop, "froogle");
        assert_eq!(payload.category, 71);
    }
}
