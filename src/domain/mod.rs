//! Domain layer: strong types with validation and invariants (no I/O, no serde).

mod kind;
mod request;
mod response;
mod validation;
mod value;

pub use kind::{
    ConversationContentType, DataCoding, DeliveryStatus, Direction, HsmCategory,
    HsmComponentFormat, HsmComponentType, HsmLanguagePolicy, HsmStatus, MessageClass, MessageType,
    WireEnum,
};
pub use request::{
    ConversationContent, ConversationMessageRequest, HsmContent, HsmLanguage, HsmParam, Location,
    Media,
};
pub use response::{MessageResponse, Price, RecipientItem, Recipients};
pub use validation::ValidationError;
pub use value::{Amount, ChannelId, MessageTtl, Msisdn, TrackId};
