use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};
use trendgate_client::ClientFactory;
use trendgate_models::{
    Operation, ParameterValidator, RelatedQueriesOutput, ResponseEnvelope, SuggestionsOutput,
    ToolCall,
};

use crate::assembler::ResultAssembler;
use crate::error::ToolError;
use crate::executor::QueryExecutor;
use crate::operations::{KeywordOperation, RelatedQueryLookup, SuggestionLookup};

/// Entry point for agent calls: validate, build a client, execute, assemble.
///
/// Holds only the factory. Each call gets its own client, so a `Gateway` can
/// serve concurrent calls from many tasks.
#[derive(Clone)]
pub struct Gateway {
    factory: Arc<dyn ClientFactory>,
}

impl Gateway {
    pub fn new(factory: Arc<dyn ClientFactory>) -> Self {
        Self { factory }
    }

    pub async fn suggestions(
        &self,
        raw: &Value,
    ) -> Result<ResponseEnvelope<SuggestionsOutput>, ToolError> {
        self.run(&SuggestionLookup, raw).await
    }

    pub async fn related_queries(
        &self,
        raw: &Value,
    ) -> Result<ResponseEnvelope<RelatedQueriesOutput>, ToolError> {
        self.run(&RelatedQueryLookup, raw).await
    }

    /// Dispatch a structured call and return the serialized envelope.
    pub async fn invoke(&self, call: &ToolCall) -> Result<Value, ToolError> {
        match call.operation {
            Operation::Suggestions => {
                Ok(serde_json::to_value(self.suggestions(&call.parameters).await?)?)
            }
            Operation::RelatedQueries => Ok(serde_json::to_value(
                self.related_queries(&call.parameters).await?,
            )?),
        }
    }

    async fn run<O: KeywordOperation>(
        &self,
        op: &O,
        raw: &Value,
    ) -> Result<ResponseEnvelope<O::Output>, ToolError> {
        // nothing leaves the process until the whole request is valid
        let params = ParameterValidator::validate(raw).map_err(|e| {
            warn!(operation = %op.operation(), error = %e, "Rejected parameters");
            e
        })?;
        debug!(operation = %op.operation(), ?params, "Parameters accepted");

        let client = self.factory.create(params.timezone_offset_minutes())?;
        let executor = QueryExecutor::new(client);
        let results = executor.execute(op, &params).await;
        Ok(ResultAssembler::assemble(results))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MockClientFactory, MockTrendsClient};
    use serde_json::json;
    use trendgate_models::ValidationError;

    #[tokio::test]
    async fn invalid_parameters_never_create_a_client() {
        let factory = Arc::new(MockClientFactory::new(MockTrendsClient::new()));
        let gateway = Gateway::new(factory.clone());

        let err = gateway
            .related_queries(&json!({"keywords": ["Pizza"], "timeframe": "now 3-d"}))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ToolError::Validation(ValidationError::Rule { field: "timeframe", .. })
        ));
        assert!(factory.created().is_empty());
        assert!(factory.client().calls().is_empty());
    }

    #[tokio::test]
    async fn client_is_created_with_validated_timezone() {
        let factory = Arc::new(MockClientFactory::new(MockTrendsClient::new()));
        let gateway = Gateway::new(factory.clone());

        gateway
            .suggestions(&json!({"keywords": ["a"], "timezoneOffsetMinutes": -330}))
            .await
            .unwrap();
        gateway.suggestions(&json!({"keywords": ["b"]})).await.unwrap();

        assert_eq!(factory.created(), vec![-330, 0]);
    }

    #[tokio::test]
    async fn client_build_failure_aborts_invocation() {
        let factory = Arc::new(MockClientFactory::failing());
        let gateway = Gateway::new(factory);

        let err = gateway
            .suggestions(&json!({"keywords": ["a"]}))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::Client(_)));
    }

    #[tokio::test]
    async fn invoke_dispatches_by_operation() {
        let factory = Arc::new(MockClientFactory::new(MockTrendsClient::new()));
        let gateway = Gateway::new(factory);

        let call: ToolCall = serde_json::from_value(json!({
            "operation": "related_queries",
            "parameters": {"keywords": ["Pizza"]}
        }))
        .unwrap();
        let value = gateway.invoke(&call).await.unwrap();
        assert_eq!(
            value,
            json!({"success": true, "results": {"Pizza": {"top": [], "rising": []}}})
        );

        let call: ToolCall = serde_json::from_value(json!({
            "operation": "suggestions",
            "parameters": {"keywords": ["Pizza"]}
        }))
        .unwrap();
        let value = gateway.invoke(&call).await.unwrap();
        assert_eq!(
            value,
            json!({"success": true, "results": {"Pizza": {"count": 0, "suggestions": []}}})
        );
    }

    #[tokio::test]
    async fn invoke_keeps_request_keyword_order() {
        let factory = Arc::new(MockClientFactory::new(MockTrendsClient::new()));
        let gateway = Gateway::new(factory);

        let call: ToolCall = serde_json::from_value(json!({
            "operation": "suggestions",
            "parameters": {"keywords": ["zebra", "apple", "mango"]}
        }))
        .unwrap();
        let value = gateway.invoke(&call).await.unwrap();

        let keys: Vec<&str> = value["results"]
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, ["zebra", "apple", "mango"]);

        let top_level: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(top_level, ["success", "results"]);
        assert!(serde_json::to_string(&value)
            .unwrap()
            .starts_with(r#"{"success":true,"results":{"zebra":"#));
    }
}
