use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};

/// One flat row returned by the trends service.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// Success payload of an operation, plus the list sections it carries so a
/// failure can be rendered with the same keys left empty.
pub trait OperationOutput: Serialize {
    const SECTIONS: &'static [&'static str];
}

/// Suggestions for one keyword. `count` is the untruncated number of results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuggestionsOutput {
    pub count: usize,
    pub suggestions: Vec<Record>,
}

impl OperationOutput for SuggestionsOutput {
    const SECTIONS: &'static [&'static str] = &["suggestions"];
}

/// Top and rising related queries for one keyword.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RelatedQueriesOutput {
    pub top: Vec<Record>,
    pub rising: Vec<Record>,
}

impl OperationOutput for RelatedQueriesOutput {
    const SECTIONS: &'static [&'static str] = &["top", "rising"];
}

/// Outcome of processing a single keyword.
#[derive(Debug, Clone, PartialEq)]
pub enum ExecutionResult<T> {
    Success(T),
    Failure { error: String },
}

impl<T> ExecutionResult<T> {
    pub fn failure(error: impl ToString) -> Self {
        ExecutionResult::Failure {
            error: error.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ExecutionResult::Success(_))
    }

    pub fn output(&self) -> Option<&T> {
        match self {
            ExecutionResult::Success(output) => Some(output),
            ExecutionResult::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ExecutionResult::Success(_) => None,
            ExecutionResult::Failure { error } => Some(error),
        }
    }
}

impl<T: OperationOutput> Serialize for ExecutionResult<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ExecutionResult::Success(output) => output.serialize(serializer),
            ExecutionResult::Failure { error } => {
                let empty: [Record; 0] = [];
                let mut map = serializer.serialize_map(Some(1 + T::SECTIONS.len()))?;
                map.serialize_entry("error", error)?;
                for section in T::SECTIONS {
                    map.serialize_entry(section, &empty)?;
                }
                map.end()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeywordResult<T> {
    pub keyword: String,
    pub result: ExecutionResult<T>,
}

/// Everything one invocation produced, in request keyword order.
///
/// `success` only says the request passed validation and was attempted;
/// per-keyword failures live in `results`.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseEnvelope<T> {
    pub success: bool,
    pub results: Vec<KeywordResult<T>>,
}

impl<T> ResponseEnvelope<T> {
    pub fn get(&self, keyword: &str) -> Option<&ExecutionResult<T>> {
        self.results
            .iter()
            .find(|r| r.keyword == keyword)
            .map(|r| &r.result)
    }

    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.results.iter().map(|r| r.keyword.as_str())
    }

    pub fn failed_keywords(&self) -> Vec<&str> {
        self.results
            .iter()
            .filter(|r| !r.result.is_success())
            .map(|r| r.keyword.as_str())
            .collect()
    }

    pub fn all_succeeded(&self) -> bool {
        self.results.iter().all(|r| r.result.is_success())
    }
}

struct OrderedResults<'a, T>(&'a [KeywordResult<T>]);

impl<T: OperationOutput> Serialize for OrderedResults<'_, T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for entry in self.0 {
            map.serialize_entry(&entry.keyword, &entry.result)?;
        }
        map.end()
    }
}

impl<T: OperationOutput> Serialize for ResponseEnvelope<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ResponseEnvelope", 2)?;
        state.serialize_field("success", &self.success)?;
        state.serialize_field("results", &OrderedResults(&self.results))?;
        state.end()
    }
}
