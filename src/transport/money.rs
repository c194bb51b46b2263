use serde::de::Error as DeError;
use serde::ser::Error as SerError;
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

use crate::domain::{Amount, ValidationError};

/// Money value sent by the platform as either JSON string or JSON number.
///
/// For numbers, the raw JSON token is preserved to avoid a float detour
/// (`0.070` stays `"0.070"` instead of becoming `0.07000000000000001`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportMoney(String);

impl TransportMoney {
    pub fn into_amount(self) -> Result<Amount, ValidationError> {
        Amount::parse(&self.0)
    }
}

impl From<&Amount> for TransportMoney {
    fn from(value: &Amount) -> Self {
        Self(value.to_string())
    }
}

impl<'de> Deserialize<'de> for TransportMoney {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw: Box<RawValue> = Deserialize::deserialize(deserializer)?;
        let token = raw.get();

        match token.as_bytes().first().copied() {
            Some(b'"') => {
                let parsed = serde_json::from_str::<String>(token).map_err(D::Error::custom)?;
                Ok(Self(parsed))
            }
            Some(b'-' | b'0'..=b'9') => Ok(Self(token.to_owned())),
            _ => Err(D::Error::custom(
                "expected money field to be JSON string or number",
            )),
        }
    }
}

impl Serialize for TransportMoney {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // Emit the decimal text as a JSON number token, digit for digit.
        let raw = RawValue::from_string(self.0.clone()).map_err(S::Error::custom)?;
        raw.serialize(serializer)
    }
}
