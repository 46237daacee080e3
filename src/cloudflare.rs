use std::time::Instant;

use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info, warn};
use url::Url;

use crate::error::Error;
use crate::query::{build_query, QueryWindow};
use crate::stats::{DailyMetric, PeriodSummary, TrafficStats};

#[derive(Debug, Deserialize)]
struct GraphqlResponse {
    data: Option<ResponseData>,
    errors: Option<Vec<GraphqlError>>,
}

#[derive(Debug, Deserialize)]
struct GraphqlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct ResponseData {
    viewer: Option<Viewer>,
}

#[derive(Debug, Deserialize)]
struct Viewer {
    zones: Option<Vec<Zone>>,
}

#[derive(Debug, Deserialize)]
struct Zone {
    last24h: Option<Vec<DayGroup>>,
    last30d: Option<Vec<DayGroup>>,
}

#[derive(Debug, Deserialize)]
struct DayGroup {
    sum: GroupSum,
    uniq: GroupUniq,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroupSum {
    requests: u64,
    page_views: u64,
}

#[derive(Debug, Deserialize)]
struct GroupUniq {
    uniques: u64,
}

impl From<DayGroup> for DailyMetric {
    fn from(group: DayGroup) -> Self {
        DailyMetric {
            request_count: group.sum.requests,
            page_view_count: group.sum.page_views,
            unique_visitor_count: group.uniq.uniques,
        }
    }
}

/// Client for the Cloudflare GraphQL Analytics API.
pub struct CloudflareClient {
    http: reqwest::Client,
    endpoint: Url,
    api_token: String,
}

impl CloudflareClient {
    pub fn new(endpoint: Url, api_token: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint,
            api_token: api_token.into(),
        }
    }

    pub async fn fetch_stats(
        &self,
        zone_id: &str,
        window: &QueryWindow,
    ) -> Result<TrafficStats, Error> {
        let start_time = Instant::now();
        info!(action = "start", component = "stats_fetch", zone_id, day = %window.day, month_start = %window.month_start, month_end = %window.month_end, "Querying zone analytics");

        let body = json!({ "query": build_query(zone_id, window) });
        let response = self
            .http
            .post(self.endpoint.clone())
            .bearer_auth(&self.api_token)
            .json(&body)
            .send()
            .await
            .map_err(|source| Error::Transport {
                endpoint: self.endpoint.to_string(),
                source,
            })?;

        let status = response.status();
        let text = response.text().await.map_err(|source| Error::Transport {
            endpoint: self.endpoint.to_string(),
            source,
        })?;

        if !status.is_success() {
            return Err(Error::Status { status, body: text });
        }

        let raw: Value = serde_json::from_str(&text)?;
        debug!(action = "receive", component = "stats_fetch", response = %raw, "Raw analytics response");

        let stats = decode_stats(raw)?;
        info!(
            action = "complete",
            component = "stats_fetch",
            requests_24h = stats.last_24h.request_count,
            requests_30d = stats.last_30d.request_count,
            duration_ms = start_time.elapsed().as_millis(),
            "Zone analytics fetched"
        );
        Ok(stats)
    }
}

/// Decodes a GraphQL analytics response into the two reporting periods.
pub fn decode_stats(raw: Value) -> Result<TrafficStats, Error> {
    let response: GraphqlResponse = serde_json::from_value(raw)?;
    let messages: Vec<String> = response
        .errors
        .unwrap_or_default()
        .into_iter()
        .map(|e| e.message)
        .collect();

    let data = match response.data {
        Some(data) => data,
        None if !messages.is_empty() => return Err(Error::Api { messages }),
        None => return Err(Error::shape("data")),
    };
    for message in &messages {
        warn!(action = "decode", component = "stats_fetch", error = %message, "Analytics API reported an error alongside data");
    }

    let viewer = data.viewer.ok_or_else(|| Error::shape("data.viewer"))?;
    let zone = viewer
        .zones
        .and_then(|zones| zones.into_iter().next())
        .ok_or_else(|| Error::shape("data.viewer.zones[0]"))?;

    let last_24h = zone
        .last24h
        .and_then(|days| days.into_iter().next())
        .ok_or_else(|| Error::shape("data.viewer.zones[0].last24h[0]"))?;
    let last_30d = zone
        .last30d
        .ok_or_else(|| Error::shape("data.viewer.zones[0].last30d"))?;

    Ok(TrafficStats {
        last_24h: DailyMetric::from(last_24h).into(),
        last_30d: PeriodSummary::from_days(last_30d.into_iter().map(DailyMetric::from)),
    })
}
