use trendgate_models::{ExecutionResult, KeywordResult, ResponseEnvelope};

/// Folds per-keyword outcomes into the response envelope.
pub struct ResultAssembler;

impl ResultAssembler {
    /// Keeps the order the results were produced in, which is the request's
    /// keyword order. `success` is always `true`: reaching this point means
    /// validation passed and every keyword was attempted.
    pub fn assemble<T>(results: Vec<(String, ExecutionResult<T>)>) -> ResponseEnvelope<T> {
        ResponseEnvelope {
            success: true,
            results: results
                .into_iter()
                .map(|(keyword, result)| KeywordResult { keyword, result })
                .collect(),
        }
    }
}
