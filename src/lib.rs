//! Typed request/response model for the MessageBird REST API.
//!
//! The crate is split in two layers: a domain layer of strong types (messages,
//! conversation requests, HSM enumerations) and a transport layer for the JSON
//! wire format. It performs no I/O; pair it with any HTTP client.
//!
//! ```rust
//! use messagebird_model::{DeliveryStatus, decode_message_response};
//!
//! # fn main() -> Result<(), messagebird_model::TransportError> {
//! let json = r#"{
//!     "id": "e8077d803532c0b5937c639b60216938",
//!     "direction": "mt",
//!     "recipients": {
//!         "totalCount": 1,
//!         "items": [{
//!             "recipient": 31612345678,
//!             "status": "delivered",
//!             "price": { "amount": 0.07, "currency": "EUR" }
//!         }]
//!     }
//! }"#;
//!
//! let message = decode_message_response(json)?;
//! let item = &message.items()[0];
//! assert_eq!(item.status, Some(DeliveryStatus::Delivered));
//! let price = item.price.as_ref().and_then(|p| p.amount);
//! assert_eq!(price.map(|amount| amount.to_string()).as_deref(), Some("0.07"));
//! # Ok(())
//! # }
//! ```
#![forbid(unsafe_code)]

pub mod domain;
pub mod transport;

pub use domain::{
    Amount, ChannelId, ConversationContent, ConversationContentType, ConversationMessageRequest,
    DataCoding, DeliveryStatus, Direction, HsmCategory, HsmComponentFormat, HsmComponentType,
    HsmContent, HsmLanguage, HsmLanguagePolicy, HsmParam, HsmStatus, Location, Media,
    MessageClass, MessageResponse, MessageTtl, MessageType, Msisdn, Price,
    RecipientItem, Recipients, TrackId, ValidationError, WireEnum,
};
pub use transport::{
    TransportError, decode_conversation_message_request, decode_hsm_category,
    decode_message_response, decode_wire_value, encode_conversation_message_request,
    encode_hsm_category, encode_message_response, encode_wire_value,
};
