/// One day of traffic as reported by the analytics API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DailyMetric {
    pub request_count: u64,
    pub page_view_count: u64,
    pub unique_visitor_count: u64,
}

/// Traffic folded over a period.
///
/// Requests and page views are summed. Unique visitors take the busiest day;
/// per-day uniques overlap and cannot be added.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PeriodSummary {
    pub request_count: u64,
    pub page_view_count: u64,
    pub unique_visitor_count: u64,
}

impl PeriodSummary {
    pub fn from_days<I>(days: I) -> Self
    where
        I: IntoIterator<Item = DailyMetric>,
    {
        days.into_iter().fold(Self::default(), Self::add_day)
    }

    pub fn add_day(mut self, day: DailyMetric) -> Self {
        self.request_count = self.request_count.saturating_add(day.request_count);
        self.page_view_count = self.page_view_count.saturating_add(day.page_view_count);
        self.unique_visitor_count = self.unique_visitor_count.max(day.unique_visitor_count);
        self
    }
}

impl From<DailyMetric> for PeriodSummary {
    fn from(day: DailyMetric) -> Self {
        Self::default().add_day(day)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrafficStats {
    pub last_24h: PeriodSummary,
    pub last_30d: PeriodSummary,
}
