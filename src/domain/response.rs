use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde_json::{Map, Value};

use crate::domain::kind::{DataCoding, DeliveryStatus, Direction, MessageClass, MessageType};
use crate::domain::validation::ValidationError;
use crate::domain::value::{Amount, Msisdn};

#[derive(Debug, Clone, PartialEq, Default)]
/// A message as reported by the messages API.
///
/// Every field is optional unless the platform always sends it; absent
/// fields stay `None` and are omitted again on encode.
pub struct MessageResponse {
    /// Unique id assigned by the platform.
    pub id: Option<String>,
    /// Canonical URL of this message resource.
    pub href: Option<String>,
    pub direction: Option<Direction>,
    pub message_type: Option<MessageType>,
    /// Telephone number or alphanumeric sender (max 11 characters).
    pub originator: Option<String>,
    pub body: Option<String>,
    /// Client reference supplied when the message was created.
    pub reference: Option<String>,
    /// Seconds the message stays deliverable before it is discarded.
    pub validity: Option<u32>,
    /// SMS route used to send the message.
    pub gateway: Option<u32>,
    /// Type-specific extras (e.g. UDH for binary messages).
    pub type_details: Map<String, Value>,
    pub data_coding: DataCoding,
    pub message_class: Option<MessageClass>,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub recipients: Option<Recipients>,
}

impl MessageResponse {
    /// Parse [`MessageResponse::href`] into a URL, if present.
    pub fn href_url(&self) -> Option<Result<url::Url, ValidationError>> {
        self.href.as_deref().map(|href| {
            url::Url::parse(href).map_err(|_| ValidationError::InvalidUrl {
                field: "href",
                input: href.to_owned(),
            })
        })
    }

    /// Per-recipient records, empty when the response carries none.
    pub fn items(&self) -> &[RecipientItem] {
        self.recipients
            .as_ref()
            .map(|recipients| recipients.items.as_slice())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
/// Aggregate delivery counters plus per-recipient records.
pub struct Recipients {
    pub total_count: Option<u32>,
    /// Recipients with the message pending (`sent` or `buffered`).
    pub total_sent_count: Option<u32>,
    pub total_delivered_count: Option<u32>,
    pub total_delivery_failed_count: Option<u32>,
    pub items: Vec<RecipientItem>,
}

#[derive(Debug, Clone, PartialEq, Default)]
/// Delivery record for one recipient.
pub struct RecipientItem {
    pub recipient: Option<Msisdn>,
    pub originator: Option<Msisdn>,
    pub status: Option<DeliveryStatus>,
    /// Time of the last status change.
    pub status_at: Option<DateTime<Utc>>,
    pub recipient_country: Option<String>,
    pub recipient_country_prefix: Option<u32>,
    pub recipient_operator: Option<String>,
    pub message_length: Option<u32>,
    pub status_reason: Option<String>,
    pub price: Option<Price>,
    pub mccmnc: Option<String>,
    pub mcc: Option<String>,
    pub mnc: Option<String>,
    pub message_part_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
/// Price charged for delivering to one recipient.
///
/// The platform may omit or null either field; a partial price is kept as is.
pub struct Price {
    pub amount: Option<Amount>,
    /// ISO 4217 currency code.
    pub currency: Option<String>,
}

impl Price {
    pub fn new(amount: Amount, currency: impl Into<String>) -> Self {
        Self {
            amount: Some(amount),
            currency: Some(currency.into()),
        }
    }

    /// Exact amount.
    pub fn amount_decimal(&self) -> Option<Decimal> {
        self.amount.map(|amount| amount.as_decimal())
    }

    /// Lossy single-precision amount.
    pub fn amount_f32(&self) -> Option<f32> {
        self.amount.map(|amount| amount.to_f32())
    }

    /// Lossy double-precision amount.
    pub fn amount_f64(&self) -> Option<f64> {
        self.amount.map(|amount| amount.to_f64())
    }
}
