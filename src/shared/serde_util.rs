//! Custom serde helpers for the exchange's wire formats.

use crate::shared::Quantity;
use serde::{Deserialize, Deserializer};

/// A `Quantity` deserialized from either a JSON string or a JSON number.
///
/// Most payloads quote amounts as strings, but order-book entries mix bare
/// numbers in. Numbers go through their shortest decimal rendering, the same
/// text `serde_json` would print back.
pub(crate) struct LaxQuantity(pub(crate) Quantity);

impl<'de> Deserialize<'de> for LaxQuantity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(serde_json::Number),
        }
        let text = match Raw::deserialize(deserializer)? {
            Raw::Text(s) => s,
            Raw::Number(n) => n.to_string(),
        };
        text.parse()
            .map(LaxQuantity)
            .map_err(serde::de::Error::custom)
    }
}

/// Deserializes a `u64` sent as either a JSON number or a quoted string.
///
/// The exchange quotes `orderNumber` and private `tradeID` values but sends
/// public trade ids bare.
pub(crate) mod lax_u64 {
    use serde::{Deserialize, Deserializer};

    pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<u64, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u64),
            Text(String),
        }
        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Ok(n),
            Raw::Text(s) => s
                .parse()
                .map_err(|_| serde::de::Error::custom(format!("invalid id: {s:?}"))),
        }
    }
}


/// (De)serializes the exchange's `"%Y-%m-%d %H:%M:%S"` UTC strings into
/// `DateTime<Utc>`.
///
/// Trade and order payloads carry timestamps as naive date strings in UTC,
/// not epoch integers or ISO 8601.
pub mod timestamp_str {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&s, FORMAT)
            .map(|naive| naive.and_utc())
            .map_err(|_| serde::de::Error::custom(format!("invalid timestamp: {s:?}")))
    }

    pub fn serialize<S>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&dt.format(FORMAT).to_string())
    }

    #[cfg(test)]
    mod tests {
        use chrono::{DateTime, Utc};
        use serde::{Deserialize, Serialize};

        #[derive(Debug, PartialEq, Serialize, Deserialize)]
        struct Stamped {
            #[serde(with = "super")]
            date: DateTime<Utc>,
        }

        #[test]
        fn test_round_trip() {
            let v: Stamped = serde_json::from_str(r#"{"date":"2017-04-01 00:13:37"}"#).unwrap();
            assert_eq!(v.date.timestamp(), 1491005617);
            assert_eq!(
                serde_json::to_string(&v).unwrap(),
                r#"{"date":"2017-04-01 00:13:37"}"#
            );
        }

        #[test]
        fn test_rejects_other_formats() {
            assert!(serde_json::from_str::<Stamped>(r#"{"date":"2017-04-01T00:13:37Z"}"#).is_err());
            assert!(serde_json::from_str::<Stamped>(r#"{"date":1491005617}"#).is_err());
        }
    }
}
