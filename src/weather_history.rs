//! The main entry point: fetches both representations of a day's history page
//! for an airport and hands back the parsed hourly observations and daily summary.

use crate::config::FetchConfig;
use crate::error::{PipelineError, WeatherHistoryError};
use crate::fetch::page_fetcher::{HttpPageFetcher, PageFetcher};
use crate::parsers::csv_observations::{parse_hourly_csv, HourlyObservations};
use crate::parsers::html_summary::parse_daily_html;
use crate::types::daily_summary::DailySummary;
use crate::types::history_format::HistoryFormat;
use crate::types::observation_date::{AnyObservationDate, ObservationDate};
use crate::url_builder::UrlBuilder;
use chrono::NaiveDate;
use futures_util::future::join;
use log::{info, warn};
use serde::Serialize;
use std::fmt::Debug;

/// Both halves of a successful request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryReport {
    pub location: String,
    pub date: NaiveDate,
    pub hourly: HourlyObservations,
    pub daily: DailySummary,
}

/// The result of each pipeline kept separately, so a caller can use whichever
/// half succeeded.
#[derive(Debug)]
pub struct HistoryOutcome {
    pub location: String,
    pub date: NaiveDate,
    pub hourly: Result<HourlyObservations, PipelineError>,
    pub daily: Result<DailySummary, PipelineError>,
}

impl HistoryOutcome {
    pub fn is_complete(&self) -> bool {
        self.hourly.is_ok() && self.daily.is_ok()
    }

    /// Collapses the outcome into a [`HistoryReport`], reporting the hourly failure
    /// first if both pipelines failed.
    pub fn into_report(self) -> Result<HistoryReport, WeatherHistoryError> {
        let hourly = self.hourly.map_err(WeatherHistoryError::Hourly)?;
        let daily = self.daily.map_err(WeatherHistoryError::Daily)?;
        Ok(HistoryReport {
            location: self.location,
            date: self.date,
            hourly,
            daily,
        })
    }
}

/// Client for Weather Underground airport history pages.
///
/// Each call is independent: the client holds only its configuration and a
/// [`PageFetcher`], and keeps no state between requests.
///
/// # Examples
///
/// ```no_run
/// # use wunderground_history::{WeatherHistory, WeatherHistoryError};
/// # #[tokio::main]
/// # async fn main() -> Result<(), WeatherHistoryError> {
/// let history = WeatherHistory::new()?;
/// let report = history.fetch("KBOS", "2014-01-15").await?;
///
/// if let Some(noon) = report.hourly.get("12") {
///     println!("Temperature at noon: {:?} °F", noon.temperature);
/// }
/// println!("Mean temperature: {}", report.daily.get_by_key("mean_temp").unwrap_or("?"));
/// # Ok(())
/// # }
/// ```
pub struct WeatherHistory {
    config: FetchConfig,
    urls: UrlBuilder,
    fetcher: Box<dyn PageFetcher>,
}

impl WeatherHistory {
    /// Creates a client with [`FetchConfig::default()`].
    ///
    /// # Errors
    ///
    /// Returns [`WeatherHistoryError::ClientBuild`] if the HTTP client cannot be
    /// initialised (e.g. no TLS backend available).
    pub fn new() -> Result<Self, WeatherHistoryError> {
        Self::with_config(FetchConfig::default())
    }

    pub fn with_config(config: FetchConfig) -> Result<Self, WeatherHistoryError> {
        let fetcher =
            HttpPageFetcher::new(config.timeout).map_err(WeatherHistoryError::ClientBuild)?;
        Ok(Self::with_fetcher(config, fetcher))
    }

    /// Creates a client that downloads pages through `fetcher`.
    pub fn with_fetcher(config: FetchConfig, fetcher: impl PageFetcher + 'static) -> Self {
        Self {
            urls: UrlBuilder::with_base(config.base_url.clone()),
            config,
            fetcher: Box::new(fetcher),
        }
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// The URL this client would request for `location` on `date`.
    pub fn url(&self, location: &str, date: &ObservationDate, format: HistoryFormat) -> String {
        self.urls.build(location, date, format)
    }

    /// Fetches and parses both the hourly CSV and the daily HTML page.
    ///
    /// `date` may be epoch seconds, a date string, or a chrono date/time (see
    /// [`AnyObservationDate`]). The two downloads run concurrently.
    ///
    /// # Errors
    ///
    /// * [`WeatherHistoryError::InvalidDate`] if `date` cannot be resolved.
    /// * [`WeatherHistoryError::Hourly`] / [`WeatherHistoryError::Daily`] naming the
    ///   pipeline that failed. Use [`WeatherHistory::fetch_outcome`] to keep the half
    ///   that succeeded.
    pub async fn fetch<D>(&self, location: &str, date: D) -> Result<HistoryReport, WeatherHistoryError>
    where
        D: AnyObservationDate + Debug,
    {
        self.fetch_outcome(location, date).await?.into_report()
    }

    /// Like [`WeatherHistory::fetch`], but reports each pipeline's result separately.
    ///
    /// Only an unresolvable `date` is returned as an error here.
    pub async fn fetch_outcome<D>(
        &self,
        location: &str,
        date: D,
    ) -> Result<HistoryOutcome, WeatherHistoryError>
    where
        D: AnyObservationDate + Debug,
    {
        let date = resolve_date(date)?;
        info!("Fetching history for {} on {}", location, date);

        let (hourly, daily) = join(
            self.run_hourly(location, &date),
            self.run_daily(location, &date),
        )
        .await;

        Ok(HistoryOutcome {
            location: location.to_string(),
            date: date.date(),
            hourly,
            daily,
        })
    }

    /// Runs only the CSV pipeline.
    pub async fn hourly<D>(
        &self,
        location: &str,
        date: D,
    ) -> Result<HourlyObservations, WeatherHistoryError>
    where
        D: AnyObservationDate + Debug,
    {
        let date = resolve_date(date)?;
        self.run_hourly(location, &date)
            .await
            .map_err(WeatherHistoryError::Hourly)
    }

    /// Runs only the HTML pipeline.
    pub async fn daily<D>(&self, location: &str, date: D) -> Result<DailySummary, WeatherHistoryError>
    where
        D: AnyObservationDate + Debug,
    {
        let date = resolve_date(date)?;
        self.run_daily(location, &date)
            .await
            .map_err(WeatherHistoryError::Daily)
    }

    async fn run_hourly(
        &self,
        location: &str,
        date: &ObservationDate,
    ) -> Result<HourlyObservations, PipelineError> {
        let url = self.url(location, date, HistoryFormat::Hourly);
        let body = self
            .fetcher
            .fetch_text(&url, self.config.csv_user_agent.as_deref())
            .await?;
        let observations = parse_hourly_csv(&body).inspect_err(|e| {
            warn!("Failed to parse hourly CSV from {}: {}", url, e);
        })?;
        info!(
            "Parsed {} hourly observations for {} on {}",
            observations.len(),
            location,
            date
        );
        Ok(observations)
    }

    async fn run_daily(
        &self,
        location: &str,
        date: &ObservationDate,
    ) -> Result<DailySummary, PipelineError> {
        let url = self.url(location, date, HistoryFormat::Daily);
        let body = self
            .fetcher
            .fetch_text(&url, Some(&self.config.html_user_agent))
            .await?;
        let summary = parse_daily_html(&body).inspect_err(|e| {
            warn!("Failed to parse daily summary from {}: {}", url, e);
        })?;
        Ok(summary)
    }
}

fn resolve_date<D>(date: D) -> Result<ObservationDate, WeatherHistoryError>
where
    D: AnyObservationDate + Debug,
{
    let shown = format!("{date:?}");
    date.resolve_observation_date()
        .ok_or(WeatherHistoryError::InvalidDate(shown))
}
