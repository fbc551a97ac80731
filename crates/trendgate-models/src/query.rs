use std::fmt;

use serde::{Serialize, Serializer};

/// Upper bound on keywords per request.
pub const MAX_KEYWORDS: usize = 5;

/// Prefix of a Google Trends topic identifier (e.g. `/m/025rw19`).
pub const TOPIC_ID_PREFIX: &str = "/m/";

/// Google property a query is restricted to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Property {
    #[default]
    Web,
    Images,
    News,
    Video,
    Shopping,
}

impl Property {
    pub const ALL: [Property; 5] = [
        Property::Web,
        Property::Images,
        Property::News,
        Property::Video,
        Property::Shopping,
    ];

    /// Parse the caller-facing scope name. Exact match only.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == value)
    }

    /// Caller-facing scope name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Property::Web => "",
            Property::Images => "images",
            Property::News => "news",
            Property::Video => "video",
            Property::Shopping => "shopping",
        }
    }

    /// Identifier the trends service expects in its `property` field.
    pub fn gprop(&self) -> &'static str {
        match self {
            Property::Web => "",
            Property::Images => "images",
            Property::News => "news",
            Property::Video => "youtube",
            Property::Shopping => "froogle",
        }
    }
}

impl Serialize for Property {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A validated geographic code: `US` or `US-AL` / `GB-ENG`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Region(pub(crate) String);

impl Region {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One of the time ranges the trends service accepts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Timeframe {
    #[default]
    TrailingFiveYears,
    All,
    /// `YYYY-MM-DD YYYY-MM-DD`
    DateRange { start: String, end: String },
    /// `YYYY-MM-DDTHH YYYY-MM-DDTHH`
    HourRange { start: String, end: String },
    /// `today N-m`, N in {1, 3, 12}
    TodayMonths(u8),
    /// `now N-d`, N in {1, 7}
    NowDays(u8),
    /// `now N-H`, N in {1, 4}
    NowHours(u8),
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Timeframe::TrailingFiveYears => f.write_str("today 5-y"),
            Timeframe::All => f.write_str("all"),
            Timeframe::DateRange { start, end } | Timeframe::HourRange { start, end } => {
                write!(f, "{start} {end}")
            }
            Timeframe::TodayMonths(n) => write!(f, "today {n}-m"),
            Timeframe::NowDays(n) => write!(f, "now {n}-d"),
            Timeframe::NowHours(n) => write!(f, "now {n}-H"),
        }
    }
}

impl Serialize for Timeframe {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Canonical, validated query. Only [`crate::ParameterValidator`] builds one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryParameters {
    pub(crate) keywords: Vec<String>,
    pub(crate) category: Option<u64>,
    pub(crate) region: Option<Region>,
    pub(crate) timezone_offset_minutes: i32,
    pub(crate) timeframe: Timeframe,
    #[serde(rename = "scope")]
    pub(crate) property: Property,
}

impl QueryParameters {
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn category(&self) -> Option<u64> {
        self.category
    }

    pub fn region(&self) -> Option<&Region> {
        self.region.as_ref()
    }

    pub fn timezone_offset_minutes(&self) -> i32 {
        self.timezone_offset_minutes
    }

    pub fn timeframe(&self) -> &Timeframe {
        &self.timeframe
    }

    pub fn property(&self) -> Property {
        self.property
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn property_wire_names() {
        assert_eq!(Property::default(), Property::Web);
        assert_eq!(Property::Web.gprop(), "");
        assert_eq!(Property::Video.gprop(), "youtube");
        assert_eq!(Property::Shopping.gprop(), "froogle");
        assert_eq!(Property::parse("news"), Some(Property::News));
        assert_eq!(Property::parse(""), Some(Property::Web));
        assert_eq!(Property::parse("youtube"), None);
        assert_eq!(Property::parse("News"), None);
    }

    #[test]
    fn timeframe_renders_canonical_form() {
        assert_eq!(Timeframe::default().to_string(), "today 5-y");
        assert_eq!(Timeframe::NowDays(7).to_string(), "now 7-d");
        assert_eq!(Timeframe::NowHours(4).to_string(), "now 4-H");
        assert_eq!(Timeframe::TodayMonths(12).to_string(), "today 12-m");
        let range = Timeframe::HourRange {
            start: "2017-02-06T10".to_string(),
            end: "2017-02-12T07".to_string(),
        };
        assert_eq!(range.to_string(), "2017-02-06T10 2017-02-12T07");
        assert_eq!(
            serde_json::to_value(Timeframe::All).unwrap(),
            serde_json::json!("all")
        );
    }
}
