use crate::fetch::error::FetchError;
use crate::parsers::error::ParseError;
use thiserror::Error;

/// Why one of the two pipelines (hourly CSV or daily HTML) failed.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

#[derive(Debug, Error)]
pub enum WeatherHistoryError {
    #[error("Hourly observations could not be retrieved")]
    Hourly(#[source] PipelineError),

    #[error("Daily summary could not be retrieved")]
    Daily(#[source] PipelineError),

    #[error("Could not resolve '{0}' to a calendar date")]
    InvalidDate(String),

    #[error("Failed to build HTTP client")]
    ClientBuild(#[source] reqwest::Error),
}

impl WeatherHistoryError {
    /// The pipeline failure behind this error, if it came from one.
    pub fn pipeline(&self) -> Option<&PipelineError> {
        match self {
            WeatherHistoryError::Hourly(e) | WeatherHistoryError::Daily(e) => Some(e),
            _ => None,
        }
    }
}
