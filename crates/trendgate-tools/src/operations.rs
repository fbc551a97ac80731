use async_trait::async_trait;
use trendgate_client::{ClientError, ExplorePayload, TrendsClient};
use trendgate_models::{
    Operation, OperationOutput, QueryParameters, Record, RelatedQueriesOutput, SuggestionsOutput,
};

use crate::executor::MAX_RESULTS_PER_SECTION;

/// Work done for a single keyword of an invocation.
#[async_trait]
pub trait KeywordOperation: Send + Sync {
    type Output: OperationOutput + Send;

    fn operation(&self) -> Operation;

    async fn run(
        &self,
        client: &dyn TrendsClient,
        keyword: &str,
        params: &QueryParameters,
    ) -> Result<Self::Output, ClientError>;
}

fn truncate(mut records: Vec<Record>) -> Vec<Record> {
    records.truncate(MAX_RESULTS_PER_SECTION);
    records
}

/// Keyword and topic suggestions. Only the bare keyword is sent; the filter
/// fields are part of the shared schema but mean nothing to this endpoint.
pub struct SuggestionLookup;

#[async_trait]
impl KeywordOperation for SuggestionLookup {
    type Output = SuggestionsOutput;

    fn operation(&self) -> Operation {
        Operation::Suggestions
    }

    async fn run(
        &self,
        client: &dyn TrendsClient,
        keyword: &str,
        _params: &QueryParameters,
    ) -> Result<SuggestionsOutput, ClientError> {
        let suggestions = client.suggestions(keyword).await?;
        Ok(SuggestionsOutput {
            count: suggestions.len(),
            suggestions: truncate(suggestions),
        })
    }
}

/// Top and rising related queries for one keyword with the query's filters.
pub struct RelatedQueryLookup;

#[async_trait]
impl KeywordOperation for RelatedQueryLookup {
    type Output = RelatedQueriesOutput;

    fn operation(&self) -> Operation {
        Operation::RelatedQueries
    }

    async fn run(
        &self,
        client: &dyn TrendsClient,
        keyword: &str,
        params: &QueryParameters,
    ) -> Result<RelatedQueriesOutput, ClientError> {
        let payload = ExplorePayload::for_keyword(keyword, params);
        let mut related = client.related_queries(&payload).await?;

        // a keyword the service did not report on has nothing related
        let lists = related.remove(keyword).unwrap_or_default();
        Ok(RelatedQueriesOutput {
            top: lists.top.map(truncate).unwrap_or_default(),
            rising: lists.rising.map(truncate).unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{ranked_records, suggestion_records, MockCall, MockTrendsClient};
    use serde_json::json;
    use trendgate_client::RankedLists;
    use trendgate_models::ParameterValidator;

    fn params(raw: serde_json::Value) -> QueryParameters {
        ParameterValidator::validate(&raw).unwrap()
    }

    #[tokio::test]
    async fn suggestions_truncate_and_count() {
        let client = MockTrendsClient::new().with_suggestions("Pizza", suggestion_records(14));
        let output = SuggestionLookup
            .run(&client, "Pizza", &params(json!({"keywords": ["Pizza"]})))
            .await
            .unwrap();

        assert_eq!(output.count, 14);
        assert_eq!(output.suggestions.len(), MAX_RESULTS_PER_SECTION);
        assert_eq!(output.suggestions[0]["title"], "Suggestion 0");
        assert_eq!(output.suggestions[9]["title"], "Suggestion 9");
    }

    #[tokio::test]
    async fn suggestions_ignore_filters() {
        let client = MockTrendsClient::new();
        let params = params(json!({
            "keywords": ["Pizza"],
            "category": 71,
            "region": "US",
            "timeframe": "now 7-d",
            "scope": "news"
        }));
        SuggestionLookup.run(&client, "Pizza", &params).await.unwrap();

        assert_eq!(client.calls(), vec![MockCall::Suggestions("Pizza".to_string())]);
    }

    #[tokio::test]
    async fn related_queries_truncate_and_fill_missing_subsets() {
        let client = MockTrendsClient::new().with_related(
            "Pizza",
            RankedLists {
                top: Some(ranked_records("top", 15)),
                rising: None,
            },
        );
        let output = RelatedQueryLookup
            .run(&client, "Pizza", &params(json!({"keywords": ["Pizza"]})))
            .await
            .unwrap();

        assert_eq!(output.top, ranked_records("top", 10));
        assert!(output.rising.is_empty());
    }

    #[tokio::test]
    async fn related_queries_without_widget_are_empty() {
        let client = MockTrendsClient::new();
        let output = RelatedQueryLookup
            .run(&client, "Pizza", &params(json!({"keywords": ["Pizza"]})))
            .await
            .unwrap();
        assert_eq!(output, RelatedQueriesOutput::default());
    }

    #[tokio::test]
    async fn related_queries_forward_filters() {
        let client = MockTrendsClient::new();
        let params = params(json!({
            "keywords": ["Pizza", "Pasta"],
            "category": 71,
            "region": "US-AL",
            "timeframe": "today 3-m",
            "scope": "video"
        }));
        RelatedQueryLookup.run(&client, "Pasta", &params).await.unwrap();

        assert_eq!(
            client.calls(),
            vec![MockCall::RelatedQueries(ExplorePayload {
                keywords: vec!["Pasta".to_string()],
                timeframe: "today 3-m".to_string(),
                geo: "US-AL".to_string(),
                gprop: "youtube".to_string(),
                category: 71,
            })]
        );
    }
}
