//! Decoding of trends API response bodies into flat records.

use serde::Deserialize;
use serde_json::Value;
use trendgate_models::Record;

use crate::client::RankedLists;
use crate::error::ClientError;

/// Columns kept from each ranked keyword row.
const RANKED_COLUMNS: [&str; 2] = ["query", "value"];

const RELATED_QUERIES_WIDGET: &str = "RELATED_QUERIES";

/// Drop the anti-XSSI guard (`)]}',`) the service prepends to JSON bodies.
pub fn strip_xssi(body: &str) -> Result<&str, ClientError> {
    body.find('{')
        .map(|start| &body[start..])
        .ok_or_else(|| ClientError::Parse(format!("no JSON object in body (length={})", body.len())))
}

#[derive(Deserialize)]
struct Envelope<T> {
    default: T,
}

#[derive(Deserialize)]
struct Topics {
    topics: Vec<Record>,
}

pub fn parse_suggestions(body: &str) -> Result<Vec<Record>, ClientError> {
    let envelope: Envelope<Topics> = serde_json::from_str(strip_xssi(body)?)?;
    Ok(envelope.default.topics)
}

/// A related-queries widget from the explore response.
#[derive(Debug, Clone, PartialEq)]
pub struct RelatedWidget {
    pub keyword: String,
    pub request: Value,
    pub token: String,
}

#[derive(Deserialize)]
struct Explore {
    widgets: Vec<RawWidget>,
}

#[derive(Deserialize)]
struct RawWidget {
    id: String,
    #[serde(default)]
    request: Value,
    #[serde(default)]
    token: Option<String>,
}

pub fn parse_related_widgets(body: &str) -> Result<Vec<RelatedWidget>, ClientError> {
    let explore: Explore = serde_json::from_str(strip_xssi(body)?)?;

    explore
        .widgets
        .into_iter()
        .filter(|w| w.id.starts_with(RELATED_QUERIES_WIDGET))
        .map(|w| -> Result<RelatedWidget, ClientError> {
            let keyword = w
                .request
                .pointer("/restriction/complexKeywordsRestriction/keyword/0/value")
                .and_then(Value::as_str)
                .ok_or_else(|| ClientError::Parse(format!("widget {} has no keyword", w.id)))?
                .to_string();
            let token = w
                .token
                .ok_or_else(|| ClientError::Parse(format!("widget {} has no token", w.id)))?;
            Ok(RelatedWidget {
                keyword,
                request: w.request,
                token,
            })
        })
        .collect()
}

#[derive(Deserialize)]
struct Ranked {
    #[serde(rename = "rankedList", default)]
    ranked_list: Vec<RankedList>,
}

#[derive(Deserialize)]
struct RankedList {
    #[serde(rename = "rankedKeyword", default)]
    ranked_keyword: Option<Vec<Record>>,
}

fn project(rows: Vec<Record>) -> Vec<Record> {
    rows.into_iter()
        .map(|mut row| {
            RANKED_COLUMNS
                .iter()
                .filter_map(|col| row.remove(*col).map(|v| (col.to_string(), v)))
                .collect()
        })
        .collect()
}

/// `rankedList[0]` is the top list, `rankedList[1]` the rising one.
pub fn parse_ranked_lists(body: &str) -> Result<RankedLists, ClientError> {
    let envelope: Envelope<Ranked> = serde_json::from_str(strip_xssi(body)?)?;
    let mut lists = envelope
        .default
        .ranked_list
        .into_iter()
        .map(|l| l.ranked_keyword.map(project));

    let top = lists.next().flatten();
    let rising = lists.next().flatten();
    Ok(RankedLists { top, rising })
}
