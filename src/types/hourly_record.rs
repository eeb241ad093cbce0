use crate::parsers::field_tables::HourlyField;
use chrono::{DateTime, FixedOffset};
use serde::Serialize;

/// One normalized hourly observation.
///
/// Every field is always present; values the source omitted are `None` and
/// serialize as `null`. `date` is the observation instant in America/New_York.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyRecord {
    pub time: Option<String>,
    #[serde(rename = "temp")]
    pub temperature: Option<f64>,
    pub dew_point: Option<f64>,
    pub humidity: Option<f64>,
    pub sea_level_pressure: Option<f64>,
    pub visibility: Option<f64>,
    pub wind_direction_text: Option<String>,
    pub wind_speed: Option<f64>,
    pub gust_speed: Option<f64>,
    pub precipitation: Option<f64>,
    pub events: Option<String>,
    pub conditions: Option<String>,
    #[serde(rename = "wind_direction")]
    pub wind_direction_degrees: Option<i32>,
    pub date: DateTime<FixedOffset>,
}

/// Values at or below this are the site's "no reading" marker.
const MISSING_READING: f64 = -9999.0;

impl HourlyRecord {
    /// A record observed at `date` with every other field null.
    pub fn empty(date: DateTime<FixedOffset>) -> Self {
        Self {
            time: None,
            temperature: None,
            dew_point: None,
            humidity: None,
            sea_level_pressure: None,
            visibility: None,
            wind_direction_text: None,
            wind_speed: None,
            gust_speed: None,
            precipitation: None,
            events: None,
            conditions: None,
            wind_direction_degrees: None,
            date,
        }
    }

    /// Stores a raw CSV value in the slot for `field`, coercing numerics.
    ///
    /// `HourlyField::Date` is ignored here; the instant is resolved by the parser
    /// before the record exists.
    pub(crate) fn apply(&mut self, field: HourlyField, raw: &str) {
        match field {
            HourlyField::Time => self.time = text(raw),
            HourlyField::Temperature => self.temperature = number(raw),
            HourlyField::DewPoint => self.dew_point = number(raw),
            HourlyField::Humidity => self.humidity = number(raw),
            HourlyField::SeaLevelPressure => self.sea_level_pressure = number(raw),
            HourlyField::Visibility => self.visibility = number(raw),
            HourlyField::WindDirectionText => self.wind_direction_text = text(raw),
            HourlyField::WindSpeed => {
                self.wind_speed = if raw.eq_ignore_ascii_case("calm") {
                    Some(0.0)
                } else {
                    number(raw)
                }
            }
            HourlyField::GustSpeed => self.gust_speed = number(raw),
            HourlyField::Precipitation => self.precipitation = number(raw),
            HourlyField::Events => self.events = text(raw),
            HourlyField::Conditions => self.conditions = text(raw),
            HourlyField::WindDirectionDegrees => {
                self.wind_direction_degrees = number(raw).map(|degrees| degrees.round() as i32)
            }
            HourlyField::Date => {}
        }
    }
}

fn text(raw: &str) -> Option<String> {
    let value = raw.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn number(raw: &str) -> Option<f64> {
    let value = raw.trim();
    match value {
        "" | "-" | "N/A" => None,
        _ => value
            .parse::<f64>()
            .ok()
            .filter(|parsed| parsed.is_finite() && *parsed > MISSING_READING),
    }
}
