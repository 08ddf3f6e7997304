use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;
use time::{
    format_description::well_known::Rfc3339, macros::format_description, Date, OffsetDateTime,
    PrimitiveDateTime,
};

#[derive(Debug, Error)]
pub enum ObservationError {
    #[error("Bad timestamp `{input}`: {source}")]
    Timestamp {
        input: String,
        source: time::error::Parse,
    },
    #[error("Bad {0}")]
    Field(&'static str),
}

/// A single forecast data point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    #[serde(
        alias = "date_time",
        serialize_with = "serialize_timestamp",
        deserialize_with = "deserialize_timestamp"
    )]
    pub timestamp: OffsetDateTime,
    pub average_temperature: f64,
    /// Between 0 and 1.
    pub probability_of_rain: f64,
}

impl Observation {
    pub fn new(
        timestamp: &str,
        average_temperature: f64,
        probability_of_rain: f64,
    ) -> Result<Self, ObservationError> {
        Ok(Self {
            timestamp: parse_timestamp(timestamp)?,
            average_temperature,
            probability_of_rain,
        })
    }

    /// Calendar date in the timestamp's own offset.
    pub fn date(&self) -> Date {
        self.timestamp.date()
    }

    /// Hour of day in the timestamp's own offset.
    pub fn hour(&self) -> u8 {
        self.timestamp.hour()
    }
}

/// Parses an RFC 3339 timestamp, or a naive `YYYY-MM-DDTHH:MM[:SS[.fff]]`
/// one which is then read as UTC.
pub fn parse_timestamp(input: &str) -> Result<OffsetDateTime, ObservationError> {
    let input = input.trim();
    // Timestamps without an offset keep their wall-clock reading.
    let naive = format_description!(
        "[year]-[month]-[day]T[hour]:[minute][optional [:[second][optional [.[subsecond]]]]]"
    );

    OffsetDateTime::parse(input, &Rfc3339)
        .or_else(|_| PrimitiveDateTime::parse(input, naive).map(|dt| dt.assume_utc()))
        .map_err(|source| ObservationError::Timestamp {
            input: input.to_string(),
            source,
        })
}

impl FromStr for Observation {
    type Err = ObservationError;

    /// `<timestamp> <temperature> <rain>`, whitespace separated.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut fields = s.split_whitespace();
        let timestamp = parse_timestamp(fields.next().unwrap_or_default())?;
        let average_temperature = parse_number(fields.next(), "temperature")?;
        let probability_of_rain = parse_number(fields.next(), "rain")?;
        if fields.next().is_some() {
            return Err(ObservationError::Field("trailing field"));
        }

        Ok(Self {
            timestamp,
            average_temperature,
            probability_of_rain,
        })
    }
}

fn parse_number(field: Option<&str>, name: &'static str) -> Result<f64, ObservationError> {
    field
        .and_then(|f| f.parse().ok())
        .ok_or(ObservationError::Field(name))
}

fn serialize_timestamp<S: Serializer>(ts: &OffsetDateTime, serializer: S) -> Result<S::Ok, S::Error> {
    let formatted = ts.format(&Rfc3339).map_err(serde::ser::Error::custom)?;
    serializer.serialize_str(&formatted)
}

fn deserialize_timestamp<'de, D: Deserializer<'de>>(deserializer: D) -> Result<OffsetDateTime, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use time::{macros::date, Month};

    use super::*;

    #[test]
    fn parses_utc_timestamp() {
        let obs = Observation::new("2024-02-18T06:00:00Z", 12.0, 0.35).unwrap();
        assert_eq!(obs.date(), date!(2024 - 02 - 18));
        assert_eq!(obs.hour(), 6);
    }

    #[test]
    fn keeps_the_encoded_offset() {
        let obs = Observation::new("2024-02-18T23:30:00-05:00", 3.0, 0.0).unwrap();
        assert_eq!(obs.date(), date!(2024 - 02 - 18));
        assert_eq!(obs.hour(), 23);
    }

    #[test]
    fn parses_naive_timestamp() {
        let obs = Observation::new("2024-02-19T13:00:00", 3.0, 0.0).unwrap();
        assert_eq!(obs.date().month(), Month::February);
        assert_eq!(obs.date().day(), 19);
        assert_eq!(obs.hour(), 13);
    }

    #[test]
    fn parses_naive_timestamp_precision() {
        let obs = Observation::new("2024-02-18T06:00:00.000", 3.0, 0.0).unwrap();
        assert_eq!(obs.date(), date!(2024 - 02 - 18));
        assert_eq!(obs.hour(), 6);

        let obs = Observation::new("2024-02-18T06:00", 3.0, 0.0).unwrap();
        assert_eq!(obs.date(), date!(2024 - 02 - 18));
        assert_eq!(obs.hour(), 6);

        let obs = Observation::new("2024-02-18T06:00:00.000Z", 3.0, 0.0).unwrap();
        assert_eq!(obs.hour(), 6);
    }

    #[test]
    fn rejects_garbage() {
        let err = Observation::new("yesterday", 3.0, 0.0).unwrap_err();
        assert!(err.to_string().contains("yesterday"));
        assert!(Observation::new("2024-02-30T10:00:00Z", 3.0, 0.0).is_err());
    }

    #[test]
    fn from_str() {
        let obs: Observation = "2024-02-18T10:00:00Z 11.5 0.2".parse().unwrap();
        assert_eq!(obs.hour(), 10);
        assert_eq!(obs.average_temperature, 11.5);
        assert_eq!(obs.probability_of_rain, 0.2);

        assert!(matches!(
            "2024-02-18T10:00:00Z 11.5".parse::<Observation>(),
            Err(ObservationError::Field("rain"))
        ));
        assert!(matches!(
            "2024-02-18T10:00:00Z 11.5 0.2 junk".parse::<Observation>(),
            Err(ObservationError::Field("trailing field"))
        ));
    }

    #[test]
    fn deserializes_either_key() {
        let obs: Observation = serde_json::from_str(
            r#"{"date_time": "2024-02-18T00:00:00Z", "average_temperature": 12, "probability_of_rain": 0.35}"#,
        )
        .unwrap();
        assert_eq!(obs.hour(), 0);
        assert_eq!(obs.average_temperature, 12.0);

        let obs: Observation = serde_json::from_str(
            r#"{"timestamp": "2024-02-18T14:00:00+01:00", "average_temperature": 12, "probability_of_rain": 0.35}"#,
        )
        .unwrap();
        assert_eq!(obs.hour(), 14);
    }

    #[test]
    fn serializes_as_rfc3339() {
        let obs = Observation::new("2024-02-18T06:00:00Z", 12.0, 0.35).unwrap();
        let json = serde_json::to_value(obs).unwrap();
        assert_eq!(json["timestamp"], "2024-02-18T06:00:00Z");
    }
}
