//! Transport layer: JSON wire-format details (serialization/deserialization).
//!
//! Wire structs here mirror the platform's camelCase schema and never leak out;
//! the public functions convert between them and the domain types.

mod conversation;
mod hsm;
mod message;
mod money;

pub use conversation::{decode_conversation_message_request, encode_conversation_message_request};
pub use hsm::{decode_hsm_category, decode_wire_value, encode_hsm_category, encode_wire_value};
pub use message::{decode_message_response, encode_message_response};

use crate::domain::{ConversationContentType, ValidationError, WireEnum};

#[derive(Debug, thiserror::Error)]
/// Errors returned by the encode/decode functions.
pub enum TransportError {
    /// Input was not valid JSON, or did not have the expected shape.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A field was well-formed JSON but failed domain validation.
    #[error("invalid {field}: {source}")]
    InvalidField {
        field: &'static str,
        #[source]
        source: ValidationError,
    },

    /// The `content` object lacks the member its `type` requires.
    #[error("{content_type} message has no `{content_type}` content")]
    MissingContent {
        content_type: ConversationContentType,
    },
}

impl TransportError {
    fn invalid(field: &'static str) -> impl FnOnce(ValidationError) -> Self {
        move |source| Self::InvalidField { field, source }
    }
}

/// Decode a wire string, logging values this crate does not recognize.
fn decode_enum<T: WireEnum>(raw: &str) -> T {
    let value = T::from_wire(raw);
    if !value.is_recognized() {
        tracing::debug!(field = T::FIELD, value = raw, "unrecognized wire value");
    }
    value
}
