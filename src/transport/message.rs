use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::money::TransportMoney;
use super::{TransportError, decode_enum};
use crate::domain::{
    Amount, DataCoding, MessageClass, MessageResponse, Msisdn, Price, RecipientItem, Recipients,
    WireEnum,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MessageJson {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    href: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    direction: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    message_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    originator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    validity: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    gateway: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    type_details: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    datacoding: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    mclass: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    scheduled_datetime: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    created_datetime: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    recipients: Option<RecipientsJson>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecipientsJson {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    total_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    total_sent_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    total_delivered_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    total_delivery_failed_count: Option<u32>,
    #[serde(default)]
    items: Option<Vec<ItemJson>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemJson {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    recipient: Option<MsisdnJson>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    originator: Option<MsisdnJson>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    status_datetime: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    recipient_country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    recipient_country_prefix: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    recipient_operator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    message_length: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    status_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    price: Option<PriceJson>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    mccmnc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    mcc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    mnc: Option<String>,
    #[serde(default)]
    message_part_count: Option<u32>,
}

/// MSISDNs arrive as JSON integers; a quoted form is tolerated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum MsisdnJson {
    Number(u64),
    String(String),
}

impl MsisdnJson {
    fn into_msisdn(self) -> Result<Msisdn, TransportError> {
        match self {
            Self::Number(value) => {
                Msisdn::try_from(value).map_err(TransportError::invalid(Msisdn::FIELD))
            }
            Self::String(value) => {
                Msisdn::parse(&value).map_err(TransportError::invalid(Msisdn::FIELD))
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PriceJson {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    amount: Option<TransportMoney>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    currency: Option<String>,
}

pub fn decode_message_response(json: &str) -> Result<MessageResponse, TransportError> {
    tracing::trace!(payload = "message", "decoding");
    let parsed: MessageJson = serde_json::from_str(json)?;

    Ok(MessageResponse {
        id: parsed.id,
        href: parsed.href,
        direction: parsed.direction.as_deref().map(decode_enum),
        message_type: parsed.message_type.as_deref().map(decode_enum),
        originator: parsed.originator,
        body: parsed.body,
        reference: parsed.reference,
        validity: parsed.validity,
        gateway: parsed.gateway,
        type_details: parsed.type_details.unwrap_or_default(),
        data_coding: parsed
            .datacoding
            .as_deref()
            .map(decode_enum)
            .unwrap_or_default(),
        message_class: parsed.mclass.map(MessageClass::from_code),
        scheduled_at: parsed.scheduled_datetime,
        created_at: parsed.created_datetime,
        recipients: parsed.recipients.map(decode_recipients).transpose()?,
    })
}

fn decode_recipients(parsed: RecipientsJson) -> Result<Recipients, TransportError> {
    let items = parsed
        .items
        .unwrap_or_default()
        .into_iter()
        .map(decode_item)
        .collect::<Result<Vec<RecipientItem>, TransportError>>()?;

    Ok(Recipients {
        total_count: parsed.total_count,
        total_sent_count: parsed.total_sent_count,
        total_delivered_count: parsed.total_delivered_count,
        total_delivery_failed_count: parsed.total_delivery_failed_count,
        items,
    })
}

fn decode_item(parsed: ItemJson) -> Result<RecipientItem, TransportError> {
    let price = parsed
        .price
        .map(|price| {
            let amount = price
                .amount
                .map(TransportMoney::into_amount)
                .transpose()
                .map_err(TransportError::invalid(Amount::FIELD))?;
            Ok::<_, TransportError>(Price {
                amount,
                currency: price.currency,
            })
        })
        .transpose()?;

    Ok(RecipientItem {
        recipient: parsed.recipient.map(MsisdnJson::into_msisdn).transpose()?,
        originator: parsed
            .originator
            .map(MsisdnJson::into_msisdn)
            .transpose()?,
        status: parsed.status.as_deref().map(decode_enum),
        status_at: parsed.status_datetime,
        recipient_country: parsed.recipient_country,
        recipient_country_prefix: parsed.recipient_country_prefix,
        recipient_operator: parsed.recipient_operator,
        message_length: parsed.message_length,
        status_reason: parsed.status_reason,
        price,
        mccmnc: parsed.mccmnc,
        mcc: parsed.mcc,
        mnc: parsed.mnc,
        message_part_count: parsed.message_part_count.unwrap_or_default(),
    })
}

pub fn encode_message_response(response: &MessageResponse) -> Result<String, TransportError> {
    tracing::trace!(payload = "message", "encoding");
    let json = MessageJson {
        id: response.id.clone(),
        href: response.href.clone(),
        direction: response.direction.as_ref().map(wire_string),
        message_type: response.message_type.as_ref().map(wire_string),
        originator: response.originator.clone(),
        body: response.body.clone(),
        reference: response.reference.clone(),
        validity: response.validity,
        gateway: response.gateway,
        type_details: (!response.type_details.is_empty()).then(|| response.type_details.clone()),
        datacoding: Some(wire_string(&response.data_coding)),
        mclass: response.message_class.map(MessageClass::code),
        scheduled_datetime: response.scheduled_at,
        created_datetime: response.created_at,
        recipients: response.recipients.as_ref().map(encode_recipients),
    };

    Ok(serde_json::to_string(&json)?)
}

fn encode_recipients(recipients: &Recipients) -> RecipientsJson {
    RecipientsJson {
        total_count: recipients.total_count,
        total_sent_count: recipients.total_sent_count,
        total_delivered_count: recipients.total_delivered_count,
        total_delivery_failed_count: recipients.total_delivery_failed_count,
        items: Some(recipients.items.iter().map(encode_item).collect()),
    }
}

fn encode_item(item: &RecipientItem) -> ItemJson {
    ItemJson {
        recipient: item.recipient.map(|msisdn| MsisdnJson::Number(msisdn.value())),
        originator: item
            .originator
            .map(|msisdn| MsisdnJson::Number(msisdn.value())),
        status: item.status.as_ref().map(wire_string),
        status_datetime: item.status_at,
        recipient_country: item.recipient_country.clone(),
        recipient_country_prefix: item.recipient_country_prefix,
        recipient_operator: item.recipient_operator.clone(),
        message_length: item.message_length,
        status_reason: item.status_reason.clone(),
        price: item.price.as_ref().map(|price| PriceJson {
            amount: price.amount.as_ref().map(TransportMoney::from),
            currency: price.currency.clone(),
        }),
        mccmnc: item.mccmnc.clone(),
        mcc: item.mcc.clone(),
        mnc: item.mnc.clone(),
        message_part_count: Some(item.message_part_count),
    }
}

fn wire_string<T: WireEnum>(value: &T) -> String {
    value.as_str().to_owned()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;
    use crate::domain::{DeliveryStatus, Direction, MessageType, ValidationError};

    const SENT_MESSAGE: &str = r#"
    {
      "id": "e8077d803532c0b5937c639b60216938",
      "href": "https://rest.messagebird.com/messages/e8077d803532c0b5937c639b60216938",
      "direction": "mt",
      "type": "sms",
      "originator": "YourName",
      "body": "This is a test message",
      "reference": null,
      "validity": null,
      "gateway": 10,
      "typeDetails": {},
      "datacoding": "plain",
      "mclass": 1,
      "scheduledDatetime": null,
      "createdDatetime": "2016-05-03T14:26:57+00:00",
      "recipients": {
        "totalCount": 1,
        "totalSentCount": 1,
        "totalDeliveredCount": 0,
        "totalDeliveryFailedCount": 0,
        "items": [
          {
            "recipient": 31612345678,
            "status": "sent",
            "statusDatetime": "2016-05-03T14:26:57+00:00",
            "recipientCountry": "Netherlands",
            "recipientCountryPrefix": 31,
            "recipientOperator": "KPN",
            "messageLength": 22,
            "statusReason": "successfully delivered",
            "price": { "amount": 0.070, "currency": "EUR" },
            "mccmnc": "20408",
            "mcc": "204",
            "mnc": "08",
            "messagePartCount": 1
          }
        ]
      }
    }
    "#;

    fn full_response() -> MessageResponse {
        let at = Utc.with_ymd_and_hms(2024, 2, 29, 23, 59, 1).unwrap();
        let mut type_details = Map::new();
        type_details.insert("udh".to_owned(), json!("050003340201"));

        MessageResponse {
            id: Some("a1".to_owned()),
            href: Some("https://rest.messagebird.com/messages/a1".to_owned()),
            direction: Some(Direction::MobileOriginated),
            message_type: Some(MessageType::Binary),
            originator: Some("+31612345678".to_owned()),
            body: Some("caf\u{e9} \u{1f600}".to_owned()),
            reference: Some("ref-1".to_owned()),
            validity: Some(3600),
            gateway: Some(240),
            type_details,
            data_coding: DataCoding::Auto,
            message_class: Some(MessageClass::Flash),
            scheduled_at: Some(at),
            created_at: Some(at),
            recipients: Some(Recipients {
                total_count: Some(2),
                total_sent_count: Some(0),
                total_delivered_count: Some(1),
                total_delivery_failed_count: Some(1),
                items: vec![
                    RecipientItem {
                        recipient: Some(Msisdn::new(31_612_345_678)),
                        originator: Some(Msisdn::new(31_687_654_321)),
                        status: Some(DeliveryStatus::Delivered),
                        status_at: Some(at),
                        recipient_country: Some("Netherlands".to_owned()),
                        recipient_country_prefix: Some(31),
                        recipient_operator: Some("KPN".to_owned()),
                        message_length: Some(7),
                        status_reason: Some("successfully delivered".to_owned()),
                        price: Some(Price::new(Amount::parse("123.456").unwrap(), "EUR")),
                        mccmnc: Some("20408".to_owned()),
                        mcc: Some("204".to_owned()),
                        mnc: Some("08".to_owned()),
                        message_part_count: 1,
                    },
                    RecipientItem {
                        recipient: Some(Msisdn::new(4_915_112_345_678)),
                        status: Some(DeliveryStatus::Unrecognized("bounced".to_owned())),
                        message_part_count: 2,
                        ..Default::default()
                    },
                ],
            }),
        }
    }

    #[test]
    fn decodes_sent_message_payload() {
        let response = decode_message_response(SENT_MESSAGE).unwrap();

        assert_eq!(response.id.as_deref(), Some("e8077d803532c0b5937c639b60216938"));
        assert_eq!(response.direction, Some(Direction::MobileTerminated));
        assert_eq!(response.message_type, Some(MessageType::Sms));
        assert_eq!(response.reference, None);
        assert_eq!(response.validity, None);
        assert_eq!(response.gateway, Some(10));
        assert!(response.type_details.is_empty());
        assert_eq!(response.data_coding, DataCoding::Plain);
        assert_eq!(response.message_class, Some(MessageClass::Normal));
        assert_eq!(response.scheduled_at, None);
        assert_eq!(
            response.created_at,
            Some(Utc.with_ymd_and_hms(2016, 5, 3, 14, 26, 57).unwrap())
        );

        let recipients = response.recipients.as_ref().unwrap();
        assert_eq!(recipients.total_count, Some(1));
        assert_eq!(recipients.total_sent_count, Some(1));
        assert_eq!(recipients.items.len(), 1);

        let item = &response.items()[0];
        assert_eq!(item.recipient, Some(Msisdn::new(31_612_345_678)));
        assert_eq!(item.originator, None);
        assert_eq!(item.status, Some(DeliveryStatus::Sent));
        assert_eq!(item.recipient_country_prefix, Some(31));
        assert_eq!(item.mnc.as_deref(), Some("08"));
        assert_eq!(item.message_part_count, 1);

        let price = item.price.as_ref().unwrap();
        assert_eq!(price.amount.unwrap().to_string(), "0.070");
        assert_eq!(price.amount_f32(), Some(0.07_f32));
        assert_eq!(price.currency.as_deref(), Some("EUR"));
    }

    #[test]
    fn missing_fields_decode_as_absent() {
        let response = decode_message_response(r#"{"id": "x"}"#).unwrap();
        assert_eq!(response.id.as_deref(), Some("x"));
        assert_eq!(response.href, None);
        assert_eq!(response.direction, None);
        assert_eq!(response.data_coding, DataCoding::Unicode);
        assert_eq!(response.message_class, None);
        assert!(response.recipients.is_none());
        assert!(response.items().is_empty());
    }

    #[test]
    fn unknown_enum_values_are_preserved() {
        let json = r#"
        {
          "direction": "xx",
          "type": "rcs",
          "datacoding": "gsm7",
          "mclass": 3,
          "recipients": { "items": [ { "status": "bounced" } ] }
        }
        "#;
        let response = decode_message_response(json).unwrap();
        assert_eq!(response.direction, Some(Direction::Unrecognized("xx".to_owned())));
        assert_eq!(
            response.message_type,
            Some(MessageType::Unrecognized("rcs".to_owned()))
        );
        assert_eq!(
            response.data_coding,
            DataCoding::Unrecognized("gsm7".to_owned())
        );
        assert_eq!(response.message_class, Some(MessageClass::Unrecognized(3)));
        assert_eq!(
            response.items()[0].status,
            Some(DeliveryStatus::Unrecognized("bounced".to_owned()))
        );

        let encoded: Value = serde_json::from_str(&encode_message_response(&response).unwrap()).unwrap();
        assert_eq!(encoded["direction"], "xx");
        assert_eq!(encoded["datacoding"], "gsm7");
        assert_eq!(encoded["mclass"], 3);
    }

    #[test]
    fn full_response_round_trips() {
        let response = full_response();
        let encoded = encode_message_response(&response).unwrap();
        let decoded = decode_message_response(&encoded).unwrap();
        assert_eq!(decoded, response);
    }

    #[test]
    fn absent_price_round_trips_as_absent() {
        let response = MessageResponse {
            recipients: Some(Recipients {
                items: vec![RecipientItem {
                    recipient: Some(Msisdn::new(31_612_345_678)),
                    ..Default::default()
                }],
                ..Default::default()
            }),
            ..Default::default()
        };

        let encoded = encode_message_response(&response).unwrap();
        let value: Value = serde_json::from_str(&encoded).unwrap();
        assert!(value["recipients"]["items"][0].get("price").is_none());

        let decoded = decode_message_response(&encoded).unwrap();
        assert_eq!(decoded.items()[0].price, None);
        assert_eq!(decoded, response);
    }

    #[test]
    fn encode_uses_platform_field_names() {
        let encoded = encode_message_response(&full_response()).unwrap();
        let value: Value = serde_json::from_str(&encoded).unwrap();

        assert_eq!(value["type"], "binary");
        assert_eq!(value["direction"], "mo");
        assert_eq!(value["datacoding"], "auto");
        assert_eq!(value["mclass"], 0);
        assert_eq!(value["typeDetails"]["udh"], "050003340201");
        assert_eq!(value["createdDatetime"], "2024-02-29T23:59:01Z");

        let item = &value["recipients"]["items"][0];
        assert_eq!(item["recipient"], 31_612_345_678_u64);
        assert_eq!(item["statusDatetime"], "2024-02-29T23:59:01Z");
        assert_eq!(item["recipientCountryPrefix"], 31);
        assert_eq!(item["messagePartCount"], 1);
        assert_eq!(item["price"]["amount"].to_string(), "123.456");
        assert_eq!(value["recipients"]["totalDeliveryFailedCount"], 1);
    }

    #[test]
    fn quoted_msisdn_is_accepted_and_validated() {
        let ok = r#"{"recipients": {"items": [{"recipient": "31612345678"}]}}"#;
        let response = decode_message_response(ok).unwrap();
        assert_eq!(response.items()[0].recipient, Some(Msisdn::new(31_612_345_678)));

        let bad = r#"{"recipients": {"items": [{"recipient": "call me"}]}}"#;
        let err = decode_message_response(bad).unwrap_err();
        assert!(matches!(
            err,
            TransportError::InvalidField {
                field: Msisdn::FIELD,
                ..
            }
        ));
    }

    #[test]
    fn msisdn_length_is_checked_in_both_json_forms() {
        for json in [
            r#"{"recipients": {"items": [{"recipient": 1234567890123456}]}}"#,
            r#"{"recipients": {"items": [{"recipient": "1234567890123456"}]}}"#,
        ] {
            assert!(
                matches!(
                    decode_message_response(json).unwrap_err(),
                    TransportError::InvalidField {
                        field: Msisdn::FIELD,
                        source: ValidationError::InvalidMsisdn { .. }
                    }
                ),
                "{json}"
            );
        }
    }

    #[test]
    fn partial_price_is_kept_without_failing_the_message() {
        let no_currency = r#"{"recipients": {"items": [{"status": "sent", "price": {"amount": 0.07}}]}}"#;
        let response = decode_message_response(no_currency).unwrap();
        let price = response.items()[0].price.as_ref().unwrap();
        assert_eq!(price.amount.map(|amount| amount.to_string()).as_deref(), Some("0.07"));
        assert_eq!(price.currency, None);

        let null_amount =
            r#"{"recipients": {"items": [{"price": {"amount": null, "currency": "EUR"}}]}}"#;
        let response = decode_message_response(null_amount).unwrap();
        let price = response.items()[0].price.as_ref().unwrap();
        assert_eq!(price.amount, None);
        assert_eq!(price.currency.as_deref(), Some("EUR"));

        let encoded: Value =
            serde_json::from_str(&encode_message_response(&response).unwrap()).unwrap();
        assert_eq!(encoded["recipients"]["items"][0]["price"], json!({ "currency": "EUR" }));
    }

    #[test]
    fn malformed_json_is_a_json_error() {
        let err = decode_message_response("{ not json }").unwrap_err();
        assert!(matches!(err, TransportError::Json(_)));
    }

    #[test]
    fn malformed_amount_is_rejected() {
        let json = r#"{"recipients": {"items": [{"price": {"amount": "1,5", "currency": "EUR"}}]}}"#;
        let err = decode_message_response(json).unwrap_err();
        assert!(matches!(
            err,
            TransportError::InvalidField {
                field: Amount::FIELD,
                ..
            }
        ));
    }
}
