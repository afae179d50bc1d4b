//! Place card shapes. Declared for clients of the card schema; the dispatcher
//! never produces them from page metadata.

use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::GenericMetadata;

const CLOCK_FORMAT: &str = "%H:%M";

/// Where to send snail mail. Usually a physical address.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostalAddress {
    pub street_address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_office_box_number: Option<String>,
    /// City, in the US.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locality: Option<String>,
    /// State, in the US.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl PostalAddress {
    /// The address on a single line, e.g. `1 Main St, Springfield, IL, 62701, US`.
    pub fn formatted(&self) -> String {
        let street = self.street_address.replace('\n', ", ");
        self.parts(&street).join(", ")
    }

    /// The address with one component per line.
    pub fn multi_line_formatted(&self) -> String {
        self.parts(&self.street_address).join("\n")
    }

    fn parts<'a>(&'a self, street: &'a str) -> Vec<&'a str> {
        let first = if street.is_empty() {
            self.post_office_box_number.as_deref().unwrap_or_default()
        } else {
            street
        };
        [
            Some(first),
            self.locality.as_deref(),
            self.region.as_deref(),
            self.postal_code.as_deref(),
            self.country.as_deref(),
        ]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoCoordinates {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevation: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    /// What this is actually rated.
    pub value: String,
    /// What a perfect score would be.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_rating: Option<String>,
    /// Minimum rating; assume 1 when missing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub worst_rating: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating_count: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_count: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// A wall-clock time of day, serialized on a 24 hour clock as `"HH:MM"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ClockTime(pub NaiveTime);

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0.format(CLOCK_FORMAT))
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, CLOCK_FORMAT)
            .map(ClockTime)
            .map_err(|_| {
                serde::de::Error::custom(format!("expected a time formatted as \"15:04\", got {raw:?}"))
            })
    }
}

/// Opening and closing time.
pub type TimeRange = [ClockTime; 2];

/// Opening hours. `open[i]` holds the ranges for `days[i]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hours {
    pub days: Vec<Weekday>,
    pub open: Vec<TimeRange>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Place {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Physical address, despite the type name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<PostalAddress>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoCoordinates>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<Rating>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours: Option<Hours>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatted_phone_number: Option<String>,
    #[serde(flatten)]
    pub metadata: GenericMetadata,
}

impl Place {
    pub fn has_location(&self) -> bool {
        self.location
            .as_ref()
            .is_some_and(|l| l.latitude.is_some() && l.longitude.is_some())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceCard {
    pub web_url: String,
    pub place: Place,
}

impl PlaceCard {
    pub fn new(web_url: &str) -> Self {
        PlaceCard {
            web_url: web_url.to_string(),
            place: Place::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Card, CardType};
    use serde_json::json;

    fn address() -> PostalAddress {
        PostalAddress {
            street_address: "1 Main St\nSuite 2".into(),
            post_office_box_number: Some("PO Box 9".into()),
            locality: Some("Springfield".into()),
            region: Some("IL".into()),
            postal_code: Some("62701".into()),
            country: Some("US".into()),
        }
    }

    #[test]
    fn formats_on_one_line() {
        assert_eq!(
            address().formatted(),
            "1 Main St, Suite 2, Springfield, IL, 62701, US"
        );
    }

    #[test]
    fn formats_on_multiple_lines() {
        assert_eq!(
            address().multi_line_formatted(),
            "1 Main St\nSuite 2\nSpringfield\nIL\n62701\nUS"
        );
    }

    #[test]
    fn falls_back_to_po_box_and_skips_gaps() {
        let addr = PostalAddress {
            street_address: String::new(),
            region: None,
            ..address()
        };
        assert_eq!(addr.formatted(), "PO Box 9, Springfield, 62701, US");
    }

    #[test]
    fn location_needs_both_coordinates() {
        let mut place = Place::default();
        assert!(!place.has_location());

        place.location = Some(GeoCoordinates {
            latitude: Some(1.0),
            ..GeoCoordinates::default()
        });
        assert!(!place.has_location());

        place.location = Some(GeoCoordinates {
            latitude: Some(1.0),
            longitude: Some(2.0),
            elevation: None,
        });
        assert!(place.has_location());
    }

    #[test]
    fn hours_use_a_24_hour_clock() {
        let nine = ClockTime(NaiveTime::from_hms_opt(9, 0, 0).unwrap());
        let late = ClockTime(NaiveTime::from_hms_opt(21, 30, 0).unwrap());
        let hours = Hours {
            days: vec![Weekday::Mon],
            open: vec![[nine, late]],
        };

        let value = serde_json::to_value(&hours).unwrap();
        assert_eq!(value["open"], json!([["09:00", "21:30"]]));

        let back: Hours = serde_json::from_value(value).unwrap();
        assert_eq!(back, hours);
    }

    #[test]
    fn rejects_malformed_clock_times() {
        assert!(serde_json::from_value::<ClockTime>(json!("9am")).is_err());
    }

    #[test]
    fn place_card_is_tagged() {
        let card = Card::Place(PlaceCard::new("https://a"));
        assert_eq!(card.card_type(), CardType::Place);
        assert_eq!(serde_json::to_value(&card).unwrap()["card_type"], "place");
    }
}
