pub mod assembler;
pub mod error;
pub mod executor;
pub mod gateway;
pub mod operations;

pub mod test_support;

pub use assembler::ResultAssembler;
pub use error::ToolError;
pub use executor::{QueryExecutor, MAX_RESULTS_PER_SECTION};
pub use gateway::Gateway;
pub use operations::{KeywordOperation, RelatedQueryLookup, SuggestionLookup};
