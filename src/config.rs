use bon::Builder;
use std::time::Duration;

/// Prefix of every history URL.
pub const DEFAULT_BASE_URL: &str = "http://www.wunderground.com/history/airport";

/// The site degrades or blocks responses for clients that don't look like a browser,
/// so the HTML page is requested with this identity.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_6_8) AppleWebKit/535.1 (KHTML, like Gecko) Chrome/13.0.782.41 Safari/535.1";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Settings for a [`crate::WeatherHistory`] client.
///
/// Every field has a default, so `FetchConfig::builder().build()` is equivalent to
/// [`FetchConfig::default()`].
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use wunderground_history::FetchConfig;
///
/// let config = FetchConfig::builder()
///     .timeout(Duration::from_secs(30))
///     .csv_user_agent("history-sync/1.0")
///     .build();
///
/// assert_eq!(config.timeout, Duration::from_secs(30));
/// assert_eq!(config.csv_user_agent.as_deref(), Some("history-sync/1.0"));
/// assert!(config.html_user_agent.starts_with("Mozilla/5.0"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
pub struct FetchConfig {
    /// Per-request timeout for both downloads.
    #[builder(default = DEFAULT_TIMEOUT)]
    pub timeout: Duration,

    /// `User-Agent` for the CSV export. `None` leaves the HTTP client's own.
    #[builder(into)]
    pub csv_user_agent: Option<String>,

    /// `User-Agent` for the HTML page.
    #[builder(into, default = BROWSER_USER_AGENT.to_string())]
    pub html_user_agent: String,

    /// Everything before `/{location}/{YYYY}/{MM}/{DD}/DailyHistory.html`.
    #[builder(into, default = DEFAULT_BASE_URL.to_string())]
    pub base_url: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}
