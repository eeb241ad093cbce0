mod config;
mod error;
mod fetch;
mod parsers;
mod types;
mod url_builder;
mod weather_history;

pub use error::{PipelineError, WeatherHistoryError};
pub use weather_history::*;

pub use config::{FetchConfig, BROWSER_USER_AGENT, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use url_builder::{build_url, UrlBuilder};

pub use fetch::error::FetchError;
pub use fetch::page_fetcher::{HttpPageFetcher, PageFetcher};

pub use parsers::csv_observations::{parse_hourly_csv, HourlyObservations};
pub use parsers::error::ParseError;
pub use parsers::field_tables::{
    AttributeQuery, DailyAttribute, HourlyField, ValueQuery, ATTRIBUTE_QUERIES, FIELD_TRANSLATIONS,
};
pub use parsers::html_summary::{parse_daily_html, SUMMARY_TABLE_ID};
pub use parsers::node_path::{ElementMatch, PathStep};

pub use types::daily_summary::{DailySummary, UNAVAILABLE};
pub use types::history_format::HistoryFormat;
pub use types::hourly_record::HourlyRecord;
pub use types::observation_date::{AnyObservationDate, ObservationDate};
