use chrono::{DateTime, Duration, NaiveDate, Utc};

/// Rows requested for the single-day window.
pub const DAY_LIMIT: u32 = 1;
/// Rows requested for the month window; one per day.
pub const MONTH_LIMIT: u32 = 30;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Calendar dates (UTC) that bound the two reporting periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryWindow {
    pub day: NaiveDate,
    pub month_start: NaiveDate,
    pub month_end: NaiveDate,
}

impl QueryWindow {
    pub fn ending_at(now: DateTime<Utc>) -> Self {
        Self {
            day: (now - Duration::hours(24)).date_naive(),
            month_start: (now - Duration::days(MONTH_LIMIT as i64)).date_naive(),
            month_end: now.date_naive(),
        }
    }
}

pub fn build_query(zone_id: &str, window: &QueryWindow) -> String {
    format!(
        r#"
{{
  viewer {{
    zones(filter: {{ zoneTag: "{zone_id}" }}) {{
      last24h: httpRequests1dGroups(
        limit: {DAY_LIMIT},
        filter: {{ date: "{day}" }}
      ) {{
        {selection}
      }}
      last30d: httpRequests1dGroups(
        limit: {MONTH_LIMIT},
        filter: {{
          date_geq: "{start}",
          date_leq: "{end}"
        }}
      ) {{
        {selection}
      }}
    }}
  }}
}}"#,
        day = window.day.format(DATE_FORMAT),
        start = window.month_start.format(DATE_FORMAT),
        end = window.month_end.format(DATE_FORMAT),
        selection = "sum { requests pageViews } uniq { uniques }",
    )
}
