//! Builds the Weather Underground history URLs for a location and day.

use crate::config::DEFAULT_BASE_URL;
use crate::types::history_format::HistoryFormat;
use crate::types::observation_date::ObservationDate;

/// Produces history URLs under a fixed base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlBuilder {
    base_url: String,
}

impl Default for UrlBuilder {
    fn default() -> Self {
        Self::with_base(DEFAULT_BASE_URL)
    }
}

impl UrlBuilder {
    pub fn with_base(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// `{base}/{location}/{YYYY}/{MM}/{DD}/DailyHistory.html`, plus `?format=1` for
    /// [`HistoryFormat::Hourly`].
    ///
    /// `location` is used verbatim.
    pub fn build(&self, location: &str, date: &ObservationDate, format: HistoryFormat) -> String {
        format!(
            "{}/{}/{:04}/{:02}/{:02}/DailyHistory.html{}",
            self.base_url,
            location,
            date.year(),
            date.month(),
            date.day(),
            format.query_suffix()
        )
    }
}

/// Builds a URL against the public Weather Underground site.
///
/// # Examples
///
/// ```
/// use wunderground_history::{build_url, AnyObservationDate, HistoryFormat};
///
/// let date = "2014-01-05".resolve_observation_date().unwrap();
/// assert_eq!(
///     build_url("KBOS", &date, HistoryFormat::Hourly),
///     "http://www.wunderground.com/history/airport/KBOS/2014/01/05/DailyHistory.html?format=1"
/// );
/// ```
pub fn build_url(location: &str, date: &ObservationDate, format: HistoryFormat) -> String {
    UrlBuilder::default().build(location, date, format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::observation_date::AnyObservationDate;

    fn date(value: &str) -> ObservationDate {
        value.resolve_observation_date().unwrap()
    }

    #[test]
    fn test_daily_url_is_exact() {
        assert_eq!(
            build_url("KBOS", &date("2014-01-15"), HistoryFormat::Daily),
            "http://www.wunderground.com/history/airport/KBOS/2014/01/15/DailyHistory.html"
        );
    }

    #[test]
    fn test_format_suffix_only_for_hourly() {
        let day = date("2014-11-03 23:10:00");
        let daily = build_url("KJFK", &day, HistoryFormat::Daily);
        let hourly = build_url("KJFK", &day, HistoryFormat::Hourly);

        assert!(!daily.contains("?format=1"));
        assert_eq!(hourly, format!("{daily}?format=1"));
    }

    #[test]
    fn test_custom_base_and_verbatim_location() {
        let builder = UrlBuilder::with_base("http://127.0.0.1:8080/history/airport/");
        assert_eq!(
            builder.build("k bos", &date("2014-01-15"), HistoryFormat::Daily),
            "http://127.0.0.1:8080/history/airport/k bos/2014/01/15/DailyHistory.html"
        );
    }
}
