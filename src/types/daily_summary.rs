use crate::parsers::field_tables::{DailyAttribute, ATTRIBUTE_COUNT, ATTRIBUTE_QUERIES};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Placeholder stored when a daily attribute could not be located in the page.
pub const UNAVAILABLE: &str = "Unavailable";

/// The day's aggregate statistics, exactly as the history page shows them.
///
/// All thirteen attributes are always present. Values are the trimmed text of
/// the matched node or [`UNAVAILABLE`], and nothing is converted to numbers.
/// Temperatures, pressure, visibility and wind speeds are the bare number without
/// units (`"38"`, `"30.16"`); humidity and events are the whole cell text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailySummary {
    values: [String; ATTRIBUTE_COUNT],
}

impl DailySummary {
    /// A summary with every attribute set to [`UNAVAILABLE`].
    pub fn unavailable() -> Self {
        Self {
            values: std::array::from_fn(|_| UNAVAILABLE.to_string()),
        }
    }

    pub fn get(&self, attribute: DailyAttribute) -> &str {
        &self.values[attribute as usize]
    }

    pub(crate) fn set(&mut self, attribute: DailyAttribute, value: String) {
        self.values[attribute as usize] = value;
    }

    /// Looks an attribute up by its normalized key, e.g. `"mean_temp"`.
    pub fn get_by_key(&self, key: &str) -> Option<&str> {
        ATTRIBUTE_QUERIES
            .iter()
            .find(|query| query.attribute.key() == key)
            .map(|query| self.get(query.attribute))
    }

    pub fn is_available(&self, attribute: DailyAttribute) -> bool {
        self.get(attribute) != UNAVAILABLE
    }

    /// `(key, value)` pairs in table order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        ATTRIBUTE_QUERIES
            .iter()
            .map(move |query| (query.attribute.key(), self.get(query.attribute)))
    }
}

impl Serialize for DailySummary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
