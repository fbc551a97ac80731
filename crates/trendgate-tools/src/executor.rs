use std::time::Instant;

use tracing::{info, warn};
use trendgate_client::TrendsClient;
use trendgate_models::{ExecutionResult, QueryParameters};
use uuid::Uuid;

use crate::operations::KeywordOperation;

/// Cap on records per returned list, keeping payloads small for the caller.
pub const MAX_RESULTS_PER_SECTION: usize = 10;

/// Runs one operation over every keyword of a query with one owned client.
pub struct QueryExecutor {
    client: Box<dyn TrendsClient>,
    invocation_id: Uuid,
}

impl QueryExecutor {
    pub fn new(client: Box<dyn TrendsClient>) -> Self {
        Self {
            client,
            invocation_id: Uuid::new_v4(),
        }
    }

    pub fn invocation_id(&self) -> Uuid {
        self.invocation_id
    }

    /// Process keywords in order, one at a time.
    ///
    /// A failing keyword is recorded and the loop moves on, so the output has
    /// exactly one entry per keyword.
    pub async fn execute<O: KeywordOperation>(
        &self,
        op: &O,
        params: &QueryParameters,
    ) -> Vec<(String, ExecutionResult<O::Output>)> {
        let start = Instant::now();
        info!(
            invocation_id = %self.invocation_id,
            operation = %op.operation(),
            keywords = params.keywords().len(),
            "Starting invocation"
        );

        let mut results = Vec::with_capacity(params.keywords().len());
        for keyword in params.keywords() {
            let keyword_start = Instant::now();
            let result = match op.run(self.client.as_ref(), keyword, params).await {
                Ok(output) => {
                    info!(
                        invocation_id = %self.invocation_id,
                        keyword = %keyword,
                        elapsed_ms = keyword_start.elapsed().as_millis() as u64,
                        "Keyword succeeded"
                    );
                    ExecutionResult::Success(output)
                }
                Err(e) => {
                    warn!(
                        invocation_id = %self.invocation_id,
                        keyword = %keyword,
                        error = %e,
                        elapsed_ms = keyword_start.elapsed().as_millis() as u64,
                        "Keyword failed"
                    );
                    ExecutionResult::failure(e)
                }
            };
            results.push((keyword.clone(), result));
        }

        let failed = results.iter().filter(|(_, r)| !r.is_success()).count();
        info!(
            invocation_id = %self.invocation_id,
            operation = %op.operation(),
            failed,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Invocation complete"
        );

        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operations::{RelatedQueryLookup, SuggestionLookup};
    use crate::test_support::{suggestion_records, MockCall, MockTrendsClient};
    use serde_json::json;
    use trendgate_models::ParameterValidator;

    fn params(raw: serde_json::Value) -> QueryParameters {
        ParameterValidator::validate(&raw).unwrap()
    }

    #[tokio::test]
    async fn one_result_per_keyword_in_order() {
        let client = MockTrendsClient::new()
            .with_suggestions("b", suggestion_records(2))
            .with_suggestions("a", suggestion_records(1));
        let calls = client.clone();
        let executor = QueryExecutor::new(Box::new(client));

        let results = executor
            .execute(&SuggestionLookup, &params(json!({"keywords": ["b", "a", "c"]})))
            .await;

        let keywords: Vec<&str> = results.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keywords, ["b", "a", "c"]);
        assert_eq!(results[0].1.output().unwrap().count, 2);
        assert_eq!(results[1].1.output().unwrap().count, 1);
        assert_eq!(results[2].1.output().unwrap().count, 0);
        assert_eq!(
            calls.calls(),
            vec![
                MockCall::Suggestions("b".to_string()),
                MockCall::Suggestions("a".to_string()),
                MockCall::Suggestions("c".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn failures_do_not_stop_the_loop() {
        let client = MockTrendsClient::new()
            .failing_related("first", "connection reset")
            .failing_related("third", "rate limited");
        let executor = QueryExecutor::new(Box::new(client));

        let results = executor
            .execute(
                &RelatedQueryLookup,
                &params(json!({"keywords": ["first", "second", "third"]})),
            )
            .await;

        assert_eq!(results.len(), 3);
        assert!(results[0].1.error().unwrap().contains("connection reset"));
        assert!(results[1].1.is_success());
        assert!(results[2].1.error().unwrap().contains("rate limited"));
    }

    #[test]
    fn executors_get_distinct_invocation_ids() {
        let a = QueryExecutor::new(Box::new(MockTrendsClient::new()));
        let b = QueryExecutor::new(Box::new(MockTrendsClient::new()));
        assert_ne!(a.invocation_id(), b.invocation_id());
    }
}
