//! Parses the `?format=1` CSV export of a history page into hourly records.

use crate::parsers::error::ParseError;
use crate::parsers::field_tables::{HourlyField, DATE_COLUMN, FIELD_TRANSLATIONS};
use crate::types::hourly_record::HourlyRecord;
use chrono::{NaiveDateTime, TimeZone, Utc};
use chrono_tz::America::New_York;
use csv::{ReaderBuilder, StringRecord, Trim};
use log::{debug, warn};
use std::collections::BTreeMap;

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Hourly records keyed by two-digit America/New_York hour (`"00"`..`"23"`).
pub type HourlyObservations = BTreeMap<String, HourlyRecord>;

/// Parses a raw CSV payload into one record per local hour.
///
/// The payload is cleaned first: HTML comments and `<br />` tags that the site
/// leaves in the export are removed, along with blank lines. Rows must have as
/// many columns as the header. When two rows fall in the same local hour the
/// later one wins.
///
/// A payload with no data rows yields an empty map.
///
/// # Errors
///
/// * [`ParseError::ColumnCountMismatch`] if a row and the header disagree on width.
/// * [`ParseError::MissingDate`] / [`ParseError::InvalidDate`] if a row's `DateUTC`
///   is absent or unparseable. The whole parse is aborted.
pub fn parse_hourly_csv(raw: &str) -> Result<HourlyObservations, ParseError> {
    let cleaned = clean_payload(raw);
    let mut observations = HourlyObservations::new();
    if cleaned.is_empty() {
        return Ok(observations);
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .trim(Trim::All)
        .from_reader(cleaned.as_bytes());

    let layout = ColumnLayout::from_headers(reader.headers()?);

    for result in reader.records() {
        let row = result.map_err(shape_error)?;
        let line = row.position().map_or(0, |pos| pos.line());
        let record = layout.normalize(&row, line)?;
        let hour = record.date.format("%H").to_string();
        if observations.insert(hour.clone(), record).is_some() {
            debug!("Row on line {} replaces earlier observation for hour {}", line, hour);
        }
    }

    Ok(observations)
}

/// Removes the markup the site embeds in its CSV export and drops blank lines.
fn clean_payload(raw: &str) -> String {
    let mut text = String::with_capacity(raw.len());
    let mut rest = raw;
    // Only complete comments are removed; an unterminated one stays for the row checks
    while let Some(start) = rest.find("<!--") {
        let Some(end) = rest[start..].find("-->") else {
            break;
        };
        text.push_str(&rest[..start]);
        rest = &rest[start + end + 3..];
    }
    text.push_str(rest);

    let text = text
        .replace("<br />", "")
        .replace("<br/>", "")
        .replace("<br>", "");

    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn shape_error(err: csv::Error) -> ParseError {
    if let csv::ErrorKind::UnequalLengths {
        pos,
        expected_len,
        len,
    } = err.kind()
    {
        let line = pos.as_ref().map_or(0, |pos| pos.line());
        warn!(
            "CSV row on line {} has {} columns, header has {}",
            line, len, expected_len
        );
        return ParseError::ColumnCountMismatch {
            line,
            expected: *expected_len as usize,
            found: *len as usize,
        };
    }
    ParseError::Csv(err)
}

/// Where each known field sits in the header, resolved once per payload.
struct ColumnLayout {
    fields: Vec<(usize, HourlyField)>,
    date_index: Option<usize>,
}

impl ColumnLayout {
    fn from_headers(headers: &StringRecord) -> Self {
        let mut fields = Vec::new();
        let mut date_index = None;
        for (raw_name, field) in FIELD_TRANSLATIONS.iter() {
            // Duplicate header names resolve to the last occurrence
            let Some(index) = headers
                .iter()
                .enumerate()
                .filter(|(_, header)| header == raw_name)
                .map(|(index, _)| index)
                .last()
            else {
                continue;
            };
            if *raw_name == DATE_COLUMN {
                date_index = Some(index);
            } else {
                fields.push((index, *field));
            }
        }

        for header in headers.iter() {
            if !FIELD_TRANSLATIONS.iter().any(|(raw, _)| *raw == header) {
                debug!("Dropping unknown CSV column '{}'", header);
            }
        }

        Self { fields, date_index }
    }

    fn normalize(&self, row: &StringRecord, line: u64) -> Result<HourlyRecord, ParseError> {
        let raw_date = self
            .date_index
            .and_then(|index| row.get(index))
            .map(unquote)
            .filter(|value| !value.is_empty())
            .ok_or(ParseError::MissingDate { line })?;

        let utc = NaiveDateTime::parse_from_str(raw_date, DATE_FORMAT).map_err(|source| {
            ParseError::InvalidDate {
                line,
                value: raw_date.to_string(),
                source,
            }
        })?;
        let local = Utc.from_utc_datetime(&utc).with_timezone(&New_York);

        let mut record = HourlyRecord::empty(local.fixed_offset());
        for (index, field) in &self.fields {
            if let Some(value) = row.get(*index) {
                record.apply(*field, unquote(value));
            }
        }
        Ok(record)
    }
}

/// Strips a stray pair of double quotes the CSV reader left in place.
fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(value)
}
