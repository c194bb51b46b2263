use serde_json::Value;

use super::{TransportError, decode_enum};
use crate::domain::{HsmCategory, WireEnum};

/// Encode any wire enumeration as its JSON string literal.
pub fn encode_wire_value<T: WireEnum>(value: &T) -> String {
    Value::String(value.as_str().to_owned()).to_string()
}

/// Decode a JSON string literal into a wire enumeration.
///
/// Unknown strings decode to the unrecognized variant; only malformed JSON
/// (or a non-string value) is an error.
pub fn decode_wire_value<T: WireEnum>(json: &str) -> Result<T, TransportError> {
    let raw: String = serde_json::from_str(json)?;
    Ok(decode_enum(&raw))
}

/// Encode an HSM category as JSON, e.g. `"MARKETING"`.
pub fn encode_hsm_category(category: &HsmCategory) -> String {
    encode_wire_value(category)
}

/// Decode an HSM category from JSON, e.g. `"MARKETING"`.
pub fn decode_hsm_category(json: &str) -> Result<HsmCategory, TransportError> {
    decode_wire_value(json)
}
