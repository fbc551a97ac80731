pub mod config;
pub mod error;
pub mod operation;
pub mod query;
pub mod result;
pub mod schema;
pub mod validate;

pub use config::{ClientConfig, GatewayConfig};
pub use error::ValidationError;
pub use operation::{Operation, ToolCall};
pub use query::{Property, QueryParameters, Region, Timeframe};
pub use result::{
    ExecutionResult, KeywordResult, OperationOutput, Record, RelatedQueriesOutput,
    ResponseEnvelope, SuggestionsOutput,
};
pub use schema::{parameters_schema, tool_definitions, ToolDefinition};
pub use validate::ParameterValidator;
