//! Extracts the daily summary statistics from a `DailyHistory.html` page.
//!
//! The page markup is not well formed and its layout varies between days, so the
//! document is parsed leniently (html5ever recovers from any markup error) and
//! each statistic is looked up on its own. A statistic that cannot be found is
//! recorded as [`UNAVAILABLE`](crate::UNAVAILABLE) rather than failing the parse.

use crate::parsers::error::ParseError;
use crate::parsers::field_tables::{AttributeQuery, ATTRIBUTE_QUERIES};
use crate::parsers::node_path::{has_direct_text, select_first, trimmed_text, ElementMatch};
use crate::types::daily_summary::DailySummary;
use log::{debug, warn};
use scraper::{ElementRef, Html};

/// `id` of the table holding the daily summary.
pub const SUMMARY_TABLE_ID: &str = "historyTable";

const LABEL_CELL: ElementMatch = ElementMatch::with_class("td", "indent");
const LABEL_SPAN: ElementMatch = ElementMatch::tag("span");

/// Parses a history page into a [`DailySummary`].
///
/// # Errors
///
/// * [`ParseError::EmptyDocument`] if `raw` is blank.
/// * [`ParseError::SummaryTableMissing`] if there is no `table#historyTable`,
///   which usually means the site served an error or a bot-check page.
pub fn parse_daily_html(raw: &str) -> Result<DailySummary, ParseError> {
    if raw.trim().is_empty() {
        return Err(ParseError::EmptyDocument);
    }

    let document = Html::parse_document(raw);
    let table = find_summary_table(&document).ok_or_else(|| {
        warn!("No #{} table in history page", SUMMARY_TABLE_ID);
        ParseError::SummaryTableMissing(SUMMARY_TABLE_ID)
    })?;

    let label_cells: Vec<ElementRef<'_>> = table
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|element| LABEL_CELL.matches(element))
        .collect();

    let mut summary = DailySummary::unavailable();
    for query in ATTRIBUTE_QUERIES.iter() {
        match extract_value(&label_cells, query) {
            Some(value) => summary.set(query.attribute, value),
            None => debug!(
                "'{}' not found in history page, marking {} unavailable",
                query.label,
                query.attribute.key()
            ),
        }
    }
    Ok(summary)
}

fn find_summary_table(document: &Html) -> Option<ElementRef<'_>> {
    document
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .find(|element| {
            element.value().name() == "table" && element.value().id() == Some(SUMMARY_TABLE_ID)
        })
}

fn find_label_cell<'a>(label_cells: &[ElementRef<'a>], label: &str) -> Option<ElementRef<'a>> {
    label_cells.iter().copied().find(|cell| {
        cell.children()
            .filter_map(ElementRef::wrap)
            .any(|child| LABEL_SPAN.matches(&child) && has_direct_text(child, label))
    })
}

fn extract_value(label_cells: &[ElementRef<'_>], query: &AttributeQuery) -> Option<String> {
    let cell = find_label_cell(label_cells, query.label)?;
    select_first(cell, query.query.path()).map(trimmed_text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::field_tables::DailyAttribute;
    use crate::types::daily_summary::UNAVAILABLE;

    const FIXTURE: &str = include_str!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/fixtures/KBOS-2014-01-15.html"
    ));

    #[test]
    fn test_fixture_values() {
        let summary = parse_daily_html(FIXTURE).unwrap();

        assert_eq!(summary.get(DailyAttribute::MeanTemp), "38");
        assert_eq!(summary.get(DailyAttribute::MaxTemp), "45");
        assert_eq!(summary.get(DailyAttribute::MinTemp), "30");
        assert_eq!(summary.get(DailyAttribute::DewPoint), "24");
        assert_eq!(summary.get(DailyAttribute::AvgHumidity), "72");
        assert_eq!(summary.get(DailyAttribute::MaxHumidity), "89");
        assert_eq!(summary.get(DailyAttribute::MinHumidity), "55");
        assert_eq!(summary.get(DailyAttribute::SeaLevelPressure), "30.16");
        assert_eq!(summary.get(DailyAttribute::Visibility), "8");
        assert_eq!(summary.get(DailyAttribute::MaxWindSpeed), "14");
        assert_eq!(summary.get(DailyAttribute::MaxGustSpeed), "21");
        assert_eq!(summary.get(DailyAttribute::Events), "Snow");
    }

    #[test]
    fn test_missing_row_is_unavailable() {
        // The fixture day has no precipitation row at all
        let summary = parse_daily_html(FIXTURE).unwrap();
        assert_eq!(summary.get(DailyAttribute::Precipitation), UNAVAILABLE);
        assert_eq!(summary.iter().count(), 13);
    }

    #[test]
    fn test_label_without_value_node_is_unavailable() {
        let html = r#"<table id="historyTable">
            <tr><td class="indent"><span>Precipitation</span></td><td>&nbsp;</td></tr>
            <tr><td class="indent"><span>Events</span></td><td>  Rain-Snow </td></tr>
        </table>"#;

        let summary = parse_daily_html(html).unwrap();
        assert_eq!(summary.get(DailyAttribute::Precipitation), UNAVAILABLE);
        assert_eq!(summary.get(DailyAttribute::Events), "Rain-Snow");
    }

    #[test]
    fn test_unclosed_tags_are_tolerated() {
        let html = r#"<html><body><div><table id="historyTable">
            <tr><td class="indent"><span>Max Temperature</span><td><span class="nobr"><span class="b">51</span> &deg;F
            <tr><td class="indent"><span>Average Humidity</span><td>64
            <tr><td class="indent"><span>Sea Level Pressure</span></td><td><b>29.92</td>
            <tr><td class="indent"><span>Visibility</span></td><td><span class="nobr"><span>10</span> miles"#;

        let summary = parse_daily_html(html).unwrap();
        assert_eq!(summary.get(DailyAttribute::MaxTemp), "51");
        assert_eq!(summary.get(DailyAttribute::AvgHumidity), "64");
        assert_eq!(summary.get(DailyAttribute::SeaLevelPressure), "29.92");
        // No span.b around the visibility number
        assert_eq!(summary.get(DailyAttribute::Visibility), UNAVAILABLE);
        assert_eq!(summary.get(DailyAttribute::MeanTemp), UNAVAILABLE);
    }

    #[test]
    fn test_labels_outside_summary_table_are_ignored() {
        let html = r#"<table id="historyTable"></table>
            <table><tr><td class="indent"><span>Events</span></td><td>Fog</td></tr></table>"#;

        let summary = parse_daily_html(html).unwrap();
        assert_eq!(summary.get(DailyAttribute::Events), UNAVAILABLE);
    }

    #[test]
    fn test_missing_table_and_empty_page() {
        assert!(matches!(
            parse_daily_html("<html><body><p>Access denied</p></body></html>"),
            Err(ParseError::SummaryTableMissing("historyTable"))
        ));
        assert!(matches!(
            parse_daily_html("  \n"),
            Err(ParseError::EmptyDocument)
        ));
    }
}
