//! Static lookup tables that drive both parsers.

use crate::parsers::node_path::{ElementMatch, PathStep};

/// A normalized hourly field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HourlyField {
    Time,
    Temperature,
    DewPoint,
    Humidity,
    SeaLevelPressure,
    Visibility,
    WindDirectionText,
    WindSpeed,
    GustSpeed,
    Precipitation,
    Events,
    Conditions,
    WindDirectionDegrees,
    Date,
}

impl HourlyField {
    /// The key this field is serialized under.
    pub fn name(&self) -> &'static str {
        match self {
            HourlyField::Time => "time",
            HourlyField::Temperature => "temp",
            HourlyField::DewPoint => "dew_point",
            HourlyField::Humidity => "humidity",
            HourlyField::SeaLevelPressure => "sea_level_pressure",
            HourlyField::Visibility => "visibility",
            HourlyField::WindDirectionText => "wind_direction_text",
            HourlyField::WindSpeed => "wind_speed",
            HourlyField::GustSpeed => "gust_speed",
            HourlyField::Precipitation => "precipitation",
            HourlyField::Events => "events",
            HourlyField::Conditions => "conditions",
            HourlyField::WindDirectionDegrees => "wind_direction",
            HourlyField::Date => "date",
        }
    }
}

/// Raw CSV column name to normalized field. Columns not listed here are dropped.
pub static FIELD_TRANSLATIONS: [(&str, HourlyField); 14] = [
    ("TimeEDT", HourlyField::Time),
    ("TemperatureF", HourlyField::Temperature),
    ("Dew PointF", HourlyField::DewPoint),
    ("Humidity", HourlyField::Humidity),
    ("Sea Level PressureIn", HourlyField::SeaLevelPressure),
    ("VisibilityMPH", HourlyField::Visibility),
    ("Wind Direction", HourlyField::WindDirectionText),
    ("Wind SpeedMPH", HourlyField::WindSpeed),
    ("Gust SpeedMPH", HourlyField::GustSpeed),
    ("PrecipitationIn", HourlyField::Precipitation),
    ("Events", HourlyField::Events),
    ("Conditions", HourlyField::Conditions),
    ("WindDirDegrees", HourlyField::WindDirectionDegrees),
    ("DateUTC", HourlyField::Date),
];

/// Raw column that carries the UTC observation instant.
pub(crate) const DATE_COLUMN: &str = "DateUTC";

/// One of the thirteen statistics in the daily summary table.
///
/// Discriminants are positions in [`ATTRIBUTE_QUERIES`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DailyAttribute {
    MeanTemp = 0,
    MaxTemp,
    MinTemp,
    DewPoint,
    AvgHumidity,
    MaxHumidity,
    MinHumidity,
    SeaLevelPressure,
    Visibility,
    MaxWindSpeed,
    MaxGustSpeed,
    Events,
    Precipitation,
}

impl DailyAttribute {
    pub fn key(&self) -> &'static str {
        match self {
            DailyAttribute::MeanTemp => "mean_temp",
            DailyAttribute::MaxTemp => "max_temp",
            DailyAttribute::MinTemp => "min_temp",
            DailyAttribute::DewPoint => "dew_point",
            DailyAttribute::AvgHumidity => "avg_humidity",
            DailyAttribute::MaxHumidity => "max_humidity",
            DailyAttribute::MinHumidity => "min_humidity",
            DailyAttribute::SeaLevelPressure => "sea_level_pressure",
            DailyAttribute::Visibility => "visibility",
            DailyAttribute::MaxWindSpeed => "max_wind_speed",
            DailyAttribute::MaxGustSpeed => "max_gust_speed",
            DailyAttribute::Events => "events",
            DailyAttribute::Precipitation => "precipitation",
        }
    }

    /// The row label shown on the history page.
    pub fn label(&self) -> &'static str {
        ATTRIBUTE_QUERIES[*self as usize].label
    }
}

/// How to get from a label cell to the cell holding its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueQuery {
    /// The bold number inside the row's `span.nobr` (value with units beside it).
    BoldValue,
    /// The whole text of the next cell (percentages, events).
    SiblingText,
    /// A literal path from the label cell.
    ExplicitPath(&'static [PathStep]),
}

const BOLD_VALUE_PATH: &[PathStep] = &[
    PathStep::Parent,
    PathStep::Child(ElementMatch::tag("td")),
    PathStep::Child(ElementMatch::with_class("span", "nobr")),
    PathStep::Child(ElementMatch::with_class("span", "b")),
];

const SIBLING_TEXT_PATH: &[PathStep] = &[PathStep::FollowingSibling(ElementMatch::tag("td"))];

// Pressure is rendered as a bare <b> in the next cell rather than inside span.nobr
const SIBLING_BOLD_PATH: &[PathStep] = &[
    PathStep::FollowingSibling(ElementMatch::tag("td")),
    PathStep::Child(ElementMatch::tag("b")),
];

impl ValueQuery {
    pub fn path(&self) -> &'static [PathStep] {
        match self {
            ValueQuery::BoldValue => BOLD_VALUE_PATH,
            ValueQuery::SiblingText => SIBLING_TEXT_PATH,
            ValueQuery::ExplicitPath(path) => path,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeQuery {
    pub label: &'static str,
    pub attribute: DailyAttribute,
    pub query: ValueQuery,
}

pub const ATTRIBUTE_COUNT: usize = 13;

pub static ATTRIBUTE_QUERIES: [AttributeQuery; ATTRIBUTE_COUNT] = [
    AttributeQuery {
        label: "Mean Temperature",
        attribute: DailyAttribute::MeanTemp,
        query: ValueQuery::BoldValue,
    },
    AttributeQuery {
        label: "Max Temperature",
        attribute: DailyAttribute::MaxTemp,
        query: ValueQuery::BoldValue,
    },
    AttributeQuery {
        label: "Min Temperature",
        attribute: DailyAttribute::MinTemp,
        query: ValueQuery::BoldValue,
    },
    AttributeQuery {
        label: "Dew Point",
        attribute: DailyAttribute::DewPoint,
        query: ValueQuery::BoldValue,
    },
    AttributeQuery {
        label: "Average Humidity",
        attribute: DailyAttribute::AvgHumidity,
        query: ValueQuery::SiblingText,
    },
    AttributeQuery {
        label: "Maximum Humidity",
        attribute: DailyAttribute::MaxHumidity,
        query: ValueQuery::SiblingText,
    },
    AttributeQuery {
        label: "Minimum Humidity",
        attribute: DailyAttribute::MinHumidity,
        query: ValueQuery::SiblingText,
    },
    AttributeQuery {
        label: "Sea Level Pressure",
        attribute: DailyAttribute::SeaLevelPressure,
        query: ValueQuery::ExplicitPath(SIBLING_BOLD_PATH),
    },
    AttributeQuery {
        label: "Visibility",
        attribute: DailyAttribute::Visibility,
        query: ValueQuery::BoldValue,
    },
    AttributeQuery {
        label: "Max Wind Speed",
        attribute: DailyAttribute::MaxWindSpeed,
        query: ValueQuery::BoldValue,
    },
    AttributeQuery {
        label: "Max Gust Speed",
        attribute: DailyAttribute::MaxGustSpeed,
        query: ValueQuery::BoldValue,
    },
    AttributeQuery {
        label: "Events",
        attribute: DailyAttribute::Events,
        query: ValueQuery::SiblingText,
    },
    AttributeQuery {
        label: "Precipitation",
        attribute: DailyAttribute::Precipitation,
        query: ValueQuery::BoldValue,
    },
];
