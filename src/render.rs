use std::fmt::Write;

use crate::stats::{PeriodSummary, TrafficStats};
use crate::utils::format_number;

const BADGE_BASE: &str = "https://img.shields.io/badge";
const BADGE_STYLE: &str = "for-the-badge";

/// Column of the stats table, with the badge icon and color it is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Requests,
    PageViews,
    UniqueVisitors,
}

impl Column {
    pub const ALL: [Column; 3] = [Column::Requests, Column::PageViews, Column::UniqueVisitors];

    pub fn title(self) -> &'static str {
        match self {
            Column::Requests => "Requests",
            Column::PageViews => "Page Views",
            Column::UniqueVisitors => "Unique Visitors",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Column::Requests => "🌐",
            Column::PageViews => "👀",
            Column::UniqueVisitors => "👥",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Column::Requests => "1DA1F2",
            Column::PageViews => "2ecc71",
            Column::UniqueVisitors => "f1c40f",
        }
    }

    fn value(self, summary: &PeriodSummary) -> u64 {
        match self {
            Column::Requests => summary.request_count,
            Column::PageViews => summary.page_view_count,
            Column::UniqueVisitors => summary.unique_visitor_count,
        }
    }
}

pub fn badge(column: Column, value: u64) -> String {
    format!(
        r#"<img src="{BADGE_BASE}/{} {}-{}?style={BADGE_STYLE}"/>"#,
        column.icon(),
        format_number(value),
        column.color()
    )
}

/// Renders the HTML table placed between the stats markers.
pub fn render_report(stats: &TrafficStats) -> String {
    let rows = [
        ("Last 24 hours", &stats.last_24h),
        ("Last 30 days", &stats.last_30d),
    ];

    let mut output = String::new();
    let _ = writeln!(output, "<table>");
    let _ = writeln!(output, "  <tr>");
    let _ = writeln!(output, "    <th>Period</th>");
    for column in Column::ALL {
        let _ = writeln!(output, "    <th>{}</th>", column.title());
    }
    let _ = writeln!(output, "  </tr>");

    for (label, summary) in rows {
        let _ = writeln!(output, "  <tr>");
        let _ = writeln!(output, "    <td><b>{label}</b></td>");
        for column in Column::ALL {
            let _ = writeln!(output, "    <td>{}</td>", badge(column, column.value(summary)));
        }
        let _ = writeln!(output, "  </tr>");
    }

    let _ = write!(output, "</table>");
    output
}
