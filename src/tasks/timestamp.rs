//! Text encoding of task timestamps.
//!
//! Timestamps are local wall-clock times written as `DD.MM.YYYY HH:MM:SS`
//! (for example `14.08.2025 02:30:42`), with no zone or sub-second part.

use chrono::{Local, NaiveDateTime, Timelike};
use serde::{de, Deserialize, Deserializer, Serializer};

/// `strftime` pattern for stored timestamps.
pub const FORMAT: &str = "%d.%m.%Y %H:%M:%S";

/// Text stored for a timestamp that has not been set yet.
pub const UNSET: &str = "01.01.0001 00:00:00";

/// Render a timestamp in the stored format.
#[must_use]
pub fn format(timestamp: &NaiveDateTime) -> String {
    timestamp.format(FORMAT).to_string()
}

/// Parse a timestamp in the stored format.
///
/// # Errors
///
/// Returns an error if `text` does not match [`FORMAT`].
pub fn parse(text: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(text, FORMAT)
}

/// The current local time at full clock precision.
#[must_use]
pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Drop the sub-second part, matching what the stored format can hold.
#[must_use]
pub fn truncate(timestamp: NaiveDateTime) -> NaiveDateTime {
    timestamp.with_nanosecond(0).unwrap_or(timestamp)
}

/// Serde adapter for a required timestamp field.
pub mod required {
    use super::{de, Deserialize, Deserializer, NaiveDateTime, Serializer};

    /// Serialize a timestamp in the stored format.
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    pub fn serialize<S: Serializer>(
        value: &NaiveDateTime,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format(value))
    }

    /// Deserialize a timestamp from the stored format.
    ///
    /// # Errors
    ///
    /// Fails if the value is not a string in the stored format.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<NaiveDateTime, D::Error> {
        let text = String::deserialize(deserializer)?;
        super::parse(&text)
            .map_err(|e| de::Error::custom(format!("invalid timestamp {text:?}: {e}")))
    }
}

/// Serde adapter for a timestamp that may be unset.
///
/// `None` is written as [`UNSET`]; [`UNSET`], `null` and a missing field all
/// read back as `None`.
pub mod optional {
    use super::{de, Deserialize, Deserializer, NaiveDateTime, Serializer, UNSET};

    /// Serialize an optional timestamp.
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    pub fn serialize<S: Serializer>(
        value: &Option<NaiveDateTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(timestamp) => serializer.serialize_str(&super::format(timestamp)),
            None => serializer.serialize_str(UNSET),
        }
    }

    /// Deserialize an optional timestamp.
    ///
    /// # Errors
    ///
    /// Fails if a present value is not a string in the stored format.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDateTime>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(None),
            Some(text) if text == UNSET => Ok(None),
            Some(text) => super::parse(&text)
                .map(Some)
                .map_err(|e| de::Error::custom(format!("invalid timestamp {text:?}: {e}"))),
        }
    }
}
