use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("CSV row on line {line} has {found} columns but the header has {expected}")]
    ColumnCountMismatch {
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("CSV row on line {line} has no DateUTC value")]
    MissingDate { line: u64 },

    #[error("CSV row on line {line} has an unparseable DateUTC value '{value}'")]
    InvalidDate {
        line: u64,
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Failed to read CSV payload")]
    Csv(#[from] csv::Error),

    #[error("History page is empty")]
    EmptyDocument,

    #[error("History page has no summary table (#{0})")]
    SummaryTableMissing(&'static str),
}
