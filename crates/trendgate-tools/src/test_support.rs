//! Scripted trends client and factory for exercising the gateway without
//! network access.
//!
//! Unscripted keywords succeed with empty data. Every call is recorded and
//! the log is shared between clones, so a test can keep a handle to a client
//! it has boxed and handed to an executor.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use serde_json::json;
use trendgate_client::{
    ClientError, ClientFactory, ExplorePayload, RankedLists, RelatedQueries, TrendsClient,
};
use trendgate_models::Record;

#[derive(Debug, Clone, PartialEq)]
pub enum MockCall {
    Suggestions(String),
    RelatedQueries(ExplorePayload),
}

type Scripted<T> = Result<T, String>;

#[derive(Clone, Default)]
pub struct MockTrendsClient {
    suggestions: HashMap<String, Scripted<Vec<Record>>>,
    related: HashMap<String, Scripted<RankedLists>>,
    calls: Arc<Mutex<Vec<MockCall>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockTrendsClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_suggestions(mut self, keyword: &str, records: Vec<Record>) -> Self {
        self.suggestions.insert(keyword.to_string(), Ok(records));
        self
    }

    pub fn failing_suggestions(mut self, keyword: &str, message: &str) -> Self {
        self.suggestions
            .insert(keyword.to_string(), Err(message.to_string()));
        self
    }

    pub fn with_related(mut self, keyword: &str, lists: RankedLists) -> Self {
        self.related.insert(keyword.to_string(), Ok(lists));
        self
    }

    pub fn failing_related(mut self, keyword: &str, message: &str) -> Self {
        self.related
            .insert(keyword.to_string(), Err(message.to_string()));
        self
    }

    /// Every call made through this client or any of its clones, in order.
    pub fn calls(&self) -> Vec<MockCall> {
        lock(&self.calls).clone()
    }
}

#[async_trait]
impl TrendsClient for MockTrendsClient {
    async fn suggestions(&self, keyword: &str) -> Result<Vec<Record>, ClientError> {
        lock(&self.calls).push(MockCall::Suggestions(keyword.to_string()));
        match self.suggestions.get(keyword) {
            Some(Ok(records)) => Ok(records.clone()),
            Some(Err(message)) => Err(ClientError::Parse(message.clone())),
            None => Ok(vec![]),
        }
    }

    async fn related_queries(
        &self,
        payload: &ExplorePayload,
    ) -> Result<RelatedQueries, ClientError> {
        lock(&self.calls).push(MockCall::RelatedQueries(payload.clone()));

        let mut related = RelatedQueries::new();
        for keyword in &payload.keywords {
            match self.related.get(keyword) {
                Some(Ok(lists)) => {
                    related.insert(keyword.clone(), lists.clone());
                }
                Some(Err(message)) => {
                    return Err(ClientError::Status {
                        status: 429,
                        url: format!("mock://related/{keyword}: {message}"),
                    })
                }
                None => {}
            }
        }
        Ok(related)
    }
}

/// Hands out clones of one scripted client and records every creation.
pub struct MockClientFactory {
    template: Option<MockTrendsClient>,
    created: Mutex<Vec<i32>>,
}

impl MockClientFactory {
    pub fn new(template: MockTrendsClient) -> Self {
        Self {
            template: Some(template),
            created: Mutex::new(Vec::new()),
        }
    }

    /// A factory whose clients can never be built.
    pub fn failing() -> Self {
        Self {
            template: None,
            created: Mutex::new(Vec::new()),
        }
    }

    /// Timezone offsets of every client created so far.
    pub fn created(&self) -> Vec<i32> {
        lock(&self.created).clone()
    }

    /// A handle sharing the call log of every client this factory creates.
    pub fn client(&self) -> MockTrendsClient {
        self.template.clone().unwrap_or_default()
    }
}

impl ClientFactory for MockClientFactory {
    fn create(&self, timezone_offset_minutes: i32) -> Result<Box<dyn TrendsClient>, ClientError> {
        let template = self
            .template
            .as_ref()
            .ok_or_else(|| ClientError::Build("mock factory configured to fail".to_string()))?;
        lock(&self.created).push(timezone_offset_minutes);
        Ok(Box::new(template.clone()))
    }
}

/// Build a flat record from key/value pairs.
pub fn record(pairs: &[(&str, serde_json::Value)]) -> Record {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

/// `count` suggestion rows titled `Suggestion 0..count`.
pub fn suggestion_records(count: usize) -> Vec<Record> {
    (0..count)
        .map(|i| {
            record(&[
                ("mid", json!(format!("/m/{i:05}"))),
                ("title", json!(format!("Suggestion {i}"))),
                ("type", json!("Topic")),
            ])
        })
        .collect()
}

/// `count` ranked query rows, `{prefix} query 0..count` with falling values.
pub fn ranked_records(prefix: &str, count: usize) -> Vec<Record> {
    (0..count)
        .map(|i| {
            record(&[
                ("query", json!(format!("{prefix} query {i}"))),
                ("value", json!(100 - i as i64)),
            ])
        })
        .collect()
}
