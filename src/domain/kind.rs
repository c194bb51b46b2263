//! Closed sets of wire strings.
//!
//! Every enumeration here carries an `Unrecognized` variant holding the raw
//! value, so decoding never fails and never loses what the platform sent.

use std::fmt;

/// A string-coded enumeration with a lossless fallback for unknown values.
pub trait WireEnum: Sized {
    /// Wire field name the value usually appears under.
    const FIELD: &'static str;

    /// Every recognized wire string, in declaration order.
    const KNOWN: &'static [&'static str];

    /// Decode a wire string. Unknown strings map to the unrecognized variant.
    fn from_wire(value: &str) -> Self;

    /// The exact wire string for this value.
    fn as_str(&self) -> &str;

    /// `false` for the unrecognized variant.
    fn is_recognized(&self) -> bool;
}

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident, field = $field:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
            /// A value this crate does not know, preserved verbatim.
            ///
            /// Invariant: never holds one of the recognized wire strings when
            /// produced by [`WireEnum::from_wire`].
            Unrecognized(String),
        }

        impl $name {
            /// The recognized variant, or `None` for [`Self::Unrecognized`].
            pub fn known(&self) -> Option<Self> {
                match self {
                    Self::Unrecognized(_) => None,
                    other => Some(other.clone()),
                }
            }

            /// Decode a wire string. Shorthand for [`WireEnum::from_wire`].
            pub fn from_wire(value: &str) -> Self {
                <Self as WireEnum>::from_wire(value)
            }

            /// The exact wire string. Shorthand for [`WireEnum::as_str`].
            pub fn as_str(&self) -> &str {
                <Self as WireEnum>::as_str(self)
            }
        }

        impl WireEnum for $name {
            const FIELD: &'static str = $field;
            const KNOWN: &'static [&'static str] = &[$($wire),+];

            fn from_wire(value: &str) -> Self {
                match value {
                    $( $wire => Self::$variant, )+
                    other => Self::Unrecognized(other.to_owned()),
                }
            }

            fn as_str(&self) -> &str {
                match self {
                    $( Self::$variant => $wire, )+
                    Self::Unrecognized(raw) => raw,
                }
            }

            fn is_recognized(&self) -> bool {
                !matches!(self, Self::Unrecognized(_))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(WireEnum::as_str(self))
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                <Self as WireEnum>::from_wire(value)
            }
        }
    };
}

wire_enum! {
    /// Category of a WhatsApp HSM template.
    HsmCategory, field = "category" {
        Authentication => "AUTHENTICATION",
        Utility => "UTILITY",
        Marketing => "MARKETING",
    }
}

wire_enum! {
    /// Section of an HSM template a component fills.
    HsmComponentType, field = "type" {
        Body => "BODY",
        Header => "HEADER",
        Footer => "FOOTER",
        Buttons => "BUTTONS",
    }
}

wire_enum! {
    /// Media format of an HSM header component.
    HsmComponentFormat, field = "format" {
        Text => "TEXT",
        Image => "IMAGE",
        Document => "DOCUMENT",
        Video => "VIDEO",
    }
}

wire_enum! {
    /// Review state of an HSM template.
    HsmStatus, field = "status" {
        New => "NEW",
        Pending => "PENDING",
        Approved => "APPROVED",
        Rejected => "REJECTED",
        PendingDeletion => "PENDING_DELETION",
        Deleted => "DELETED",
    }
}

wire_enum! {
    /// How the platform picks a template translation.
    HsmLanguagePolicy, field = "policy" {
        /// Use exactly the requested language.
        Deterministic => "deterministic",
        /// Fall back to the user's locale, then the requested language.
        Fallback => "fallback",
    }
}

impl Default for HsmLanguagePolicy {
    fn default() -> Self {
        Self::Deterministic
    }
}

wire_enum! {
    /// Whether a message was sent to (`mt`) or received from (`mo`) a handset.
    Direction, field = "direction" {
        /// Mobile terminated.
        MobileTerminated => "mt",
        /// Mobile originated.
        MobileOriginated => "mo",
    }
}

wire_enum! {
    /// SMS message type.
    MessageType, field = "type" {
        Sms => "sms",
        Binary => "binary",
        Premium => "premium",
        Flash => "flash",
    }
}

wire_enum! {
    /// Character encoding applied to the message body.
    DataCoding, field = "datacoding" {
        Plain => "plain",
        Unicode => "unicode",
        Auto => "auto",
    }
}

impl Default for DataCoding {
    fn default() -> Self {
        Self::Unicode
    }
}

wire_enum! {
    /// Delivery state of a message for a single recipient.
    DeliveryStatus, field = "status" {
        Scheduled => "scheduled",
        Sent => "sent",
        Buffered => "buffered",
        Delivered => "delivered",
        Expired => "expired",
        DeliveryFailed => "delivery_failed",
    }
}

impl DeliveryStatus {
    /// `true` once the platform will report no further state for this recipient.
    pub fn is_final(&self) -> bool {
        matches!(self, Self::Delivered | Self::Expired | Self::DeliveryFailed)
    }
}

wire_enum! {
    /// Content type of a conversation message.
    ConversationContentType, field = "type" {
        Text => "text",
        Image => "image",
        Video => "video",
        Audio => "audio",
        File => "file",
        Location => "location",
        Event => "event",
        Hsm => "hsm",
        Interactive => "interactive",
        WhatsAppSticker => "whatsappSticker",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// SMS message class (`mclass`), coded as an integer on the wire.
pub enum MessageClass {
    /// `0`: shown immediately and not stored.
    Flash,
    /// `1`: regular message.
    Normal,
    /// Any other code, preserved as-is.
    Unrecognized(i64),
}

impl MessageClass {
    /// Wire field name used by the messages API (`mclass`).
    pub const FIELD: &'static str = "mclass";

    /// Decode the integer code.
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => Self::Flash,
            1 => Self::Normal,
            other => Self::Unrecognized(other),
        }
    }

    /// The integer code as sent on the wire.
    pub fn code(self) -> i64 {
        match self {
            Self::Flash => 0,
            Self::Normal => 1,
            Self::Unrecognized(code) => code,
        }
    }

    /// The recognized variant, or `None` for [`Self::Unrecognized`].
    pub fn known(self) -> Option<Self> {
        match self {
            Self::Unrecognized(_) => None,
            other => Some(other),
        }
    }
}
