use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{COOKIE, SET_COOKIE};
use reqwest::{Client, StatusCode, Url};
use tokio::sync::OnceCell;
use tracing::{debug, warn};
use trendgate_models::{ClientConfig, Record};

use crate::client::{ExplorePayload, RelatedQueries, TrendsClient};
use crate::error::ClientError;
use crate::parse::{parse_ranked_lists, parse_related_widgets, parse_suggestions};

/// Statuses worth another attempt.
const RETRY_STATUSES: [StatusCode; 4] = [
    StatusCode::TOO_MANY_REQUESTS,
    StatusCode::INTERNAL_SERVER_ERROR,
    StatusCode::BAD_GATEWAY,
    StatusCode::GATEWAY_TIMEOUT,
];

/// HTTP client for the Google Trends web API, scoped to one invocation.
pub struct GoogleTrendsClient {
    http: Client,
    base: Url,
    locale: String,
    tz: i32,
    retries: u32,
    backoff: Duration,
    /// `NID` session cookie, fetched once per client.
    nid: OnceCell<Option<String>>,
}

impl GoogleTrendsClient {
    pub fn new(config: &ClientConfig, timezone_offset_minutes: i32) -> Result<Self, ClientError> {
        let base = Url::parse(&config.base_url)
            .map_err(|e| ClientError::Build(format!("invalid base_url {}: {e}", config.base_url)))?;
        if base.cannot_be_a_base() {
            return Err(ClientError::Build(format!(
                "base_url {} cannot carry a path",
                config.base_url
            )));
        }

        let http = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .read_timeout(Duration::from_secs(config.read_timeout_seconds))
            .build()
            .map_err(|e| ClientError::Build(e.to_string()))?;

        Ok(Self {
            http,
            base,
            locale: config.locale.clone(),
            tz: timezone_offset_minutes,
            retries: config.retries,
            backoff: Duration::from_millis(config.backoff_millis),
            nid: OnceCell::new(),
        })
    }

    pub fn timezone_offset_minutes(&self) -> i32 {
        self.tz
    }

    /// Base URL extended with percent-encoded path segments.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        // checked in new(): the base can carry a path
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn common_query(&self) -> Vec<(&'static str, String)> {
        vec![("hl", self.locale.clone()), ("tz", self.tz.to_string())]
    }

    async fn nid_cookie(&self) -> Option<&str> {
        self.nid
            .get_or_init(|| async {
                // the trends home page hands out the session cookie
                let country = self.locale.rsplit('-').next().unwrap_or("US").to_string();
                let mut url = self.base.clone();
                url.query_pairs_mut().append_pair("geo", &country);

                match self.http.get(url).send().await {
                    Ok(response) => response
                        .headers()
                        .get_all(SET_COOKIE)
                        .iter()
                        .filter_map(|v| v.to_str().ok())
                        .filter_map(|v| v.split(';').next())
                        .find(|v| v.starts_with("NID="))
                        .map(str::to_string),
                    Err(e) => {
                        warn!(error = %e, "Failed to fetch session cookie");
                        None
                    }
                }
            })
            .await
            .as_deref()
    }

    /// GET with the transport retry budget; returns the body of a 2xx response.
    async fn get_text(&self, url: Url, query: &[(&str, String)]) -> Result<String, ClientError> {
        let cookie = self.nid_cookie().await.map(str::to_string);
        let mut attempt = 0u32;

        loop {
            let mut request = self.http.get(url.clone()).query(query);
            if let Some(cookie) = &cookie {
                request = request.header(COOKIE, cookie);
            }

            let retry_reason = match request.send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return Ok(response.text().await?);
                    }
                    if !RETRY_STATUSES.contains(&status) || attempt >= self.retries {
                        return Err(ClientError::Status {
                            status: status.as_u16(),
                            url: url.to_string(),
                        });
                    }
                    status.to_string()
                }
                Err(e) if (e.is_connect() || e.is_timeout()) && attempt < self.retries => {
                    e.to_string()
                }
                Err(e) => return Err(e.into()),
            };

            attempt += 1;
            let delay = self.backoff.saturating_mul(2u32.saturating_pow(attempt - 1));
            warn!(
                url = %url,
                attempt,
                max_retries = self.retries,
                reason = %retry_reason,
                delay_ms = delay.as_millis() as u64,
                "Retrying trends request"
            );
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }
    }
}

#[async_trait]
impl TrendsClient for GoogleTrendsClient {
    async fn suggestions(&self, keyword: &str) -> Result<Vec<Record>, ClientError> {
        debug!(keyword, "Fetching suggestions");
        let url = self.endpoint(&["trends", "api", "autocomplete", keyword]);
        let body = self.get_text(url, &self.common_query()).await?;
        parse_suggestions(&body)
    }

    async fn related_queries(
        &self,
        payload: &ExplorePayload,
    ) -> Result<RelatedQueries, ClientError> {
        debug!(keywords = ?payload.keywords, timeframe = %payload.timeframe, "Building explore payload");

        let comparison: Vec<serde_json::Value> = payload
            .keywords
            .iter()
            .map(|kw| {
                serde_json::json!({
                    "keyword": kw,
                    "time": payload.timeframe,
                    "geo": payload.geo,
                })
            })
            .collect();
        let req = serde_json::json!({
            "comparisonItem": comparison,
            "category": payload.category,
            "property": payload.gprop,
        });

        let mut query = self.common_query();
        query.push(("req", serde_json::to_string(&req)?));
        let body = self
            .get_text(self.endpoint(&["trends", "api", "explore"]), &query)
            .await?;
        let widgets = parse_related_widgets(&body)?;

        let mut related = RelatedQueries::new();
        for widget in widgets {
            let mut query = self.common_query();
            query.push(("req", serde_json::to_string(&widget.request)?));
            query.push(("token", widget.token));
            let body = self
                .get_text(
                    self.endpoint(&["trends", "api", "widgetdata", "relatedsearches"]),
                    &query,
                )
                .await?;
            related.insert(widget.keyword, parse_ranked_lists(&body)?);
        }

        Ok(related)
    }
}
