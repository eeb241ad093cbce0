//! Defines the two page formats the Weather Underground history endpoint can serve.

use std::fmt;

/// Selects which representation of a day's history page to request.
///
/// Both formats share the same `DailyHistory.html` path; the hourly variant only
/// differs by a query parameter that switches the response to CSV.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HistoryFormat {
    /// The rendered HTML page, which carries the daily summary table.
    Daily,
    /// The CSV export with one row per observation (usually one or two per hour).
    Hourly,
}

impl HistoryFormat {
    pub(crate) fn query_suffix(&self) -> &'static str {
        match self {
            HistoryFormat::Daily => "",
            HistoryFormat::Hourly => "?format=1",
        }
    }

    pub(crate) fn pipeline_name(&self) -> &'static str {
        match self {
            HistoryFormat::Daily => "daily",
            HistoryFormat::Hourly => "hourly",
        }
    }
}

/// Allows formatting a `HistoryFormat` using its pipeline name.
///
/// # Examples
///
/// ```
/// use wunderground_history::HistoryFormat;
///
/// assert_eq!(format!("{}", HistoryFormat::Hourly), "hourly");
/// assert_eq!(HistoryFormat::Daily.to_string(), "daily");
/// ```
impl fmt::Display for HistoryFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.pipeline_name())
    }
}
