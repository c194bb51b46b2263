use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use url::Url;

use super::{TransportError, decode_enum};
use crate::domain::{
    ChannelId, ConversationContent, ConversationContentType, ConversationMessageRequest,
    HsmContent, HsmLanguage, HsmLanguagePolicy, HsmParam, Location, Media, MessageTtl, TrackId,
    ValidationError,
};

const REPORT_URL_FIELD: &str = "reportUrl";
const LOCATION_FIELD: &str = "location";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConversationMessageJson {
    #[serde(rename = "type")]
    content_type: String,
    content: Value,
    channel_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    report_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    track_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    ttl: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    source: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ContentJson {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    image: Option<MediaJson>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    video: Option<MediaJson>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    audio: Option<MediaJson>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    file: Option<MediaJson>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    location: Option<LocationJson>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    hsm: Option<HsmJson>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct MediaJson {
    url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    caption: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LocationJson {
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HsmJson {
    namespace: String,
    template_name: String,
    language: HsmLanguageJson,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    params: Option<Vec<HsmParamJson>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    components: Option<Vec<Value>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct HsmLanguageJson {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    policy: Option<String>,
    code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct HsmParamJson {
    default: String,
}

pub fn encode_conversation_message_request(
    request: &ConversationMessageRequest,
) -> Result<String, TransportError> {
    let content_type = request.content_type();
    tracing::trace!(payload = "conversation message", %content_type, "encoding");

    let json = ConversationMessageJson {
        content_type: content_type.as_str().to_owned(),
        content: encode_content(request.content())?,
        channel_id: request.channel_id().as_str().to_owned(),
        report_url: request.report_url().map(|url| url.as_str().to_owned()),
        track_id: request.track_id().map(|id| id.as_str().to_owned()),
        ttl: request.ttl().map(|ttl| ttl.as_str().to_owned()),
        source: (!request.source().is_empty()).then(|| request.source().clone()),
    };

    Ok(serde_json::to_string(&json)?)
}

fn encode_content(content: &ConversationContent) -> Result<Value, TransportError> {
    let json = match content {
        ConversationContent::Text(text) => ContentJson {
            text: Some(text.clone()),
            ..Default::default()
        },
        ConversationContent::Image(media) => ContentJson {
            image: Some(encode_media(media)),
            ..Default::default()
        },
        ConversationContent::Video(media) => ContentJson {
            video: Some(encode_media(media)),
            ..Default::default()
        },
        ConversationContent::Audio(media) => ContentJson {
            audio: Some(encode_media(media)),
            ..Default::default()
        },
        ConversationContent::File(media) => ContentJson {
            file: Some(encode_media(media)),
            ..Default::default()
        },
        ConversationContent::Location(location) => {
            location
                .validate()
                .map_err(TransportError::invalid(LOCATION_FIELD))?;
            ContentJson {
                location: Some(LocationJson {
                    latitude: location.latitude,
                    longitude: location.longitude,
                }),
                ..Default::default()
            }
        }
        ConversationContent::Hsm(hsm) => ContentJson {
            hsm: Some(encode_hsm(hsm)),
            ..Default::default()
        },
        // A typed content type must carry the body its decoder expects.
        ConversationContent::Other { content_type, body } if has_typed_content(content_type) => {
            let typed = decode_content(content_type.clone(), body.clone())?;
            return encode_content(&typed);
        }
        ConversationContent::Other { body, .. } => return Ok(body.clone()),
    };

    Ok(serde_json::to_value(json)?)
}

fn encode_media(media: &Media) -> MediaJson {
    MediaJson {
        url: media.url.as_str().to_owned(),
        caption: media.caption.clone(),
    }
}

fn encode_hsm(hsm: &HsmContent) -> HsmJson {
    HsmJson {
        namespace: hsm.namespace.clone(),
        template_name: hsm.template_name.clone(),
        language: HsmLanguageJson {
            policy: Some(hsm.language.policy.as_str().to_owned()),
            code: hsm.language.code.clone(),
        },
        params: (!hsm.params.is_empty()).then(|| {
            hsm.params
                .iter()
                .map(|param| HsmParamJson {
                    default: param.default.clone(),
                })
                .collect()
        }),
        components: (!hsm.components.is_empty()).then(|| hsm.components.clone()),
    }
}

pub fn decode_conversation_message_request(
    json: &str,
) -> Result<ConversationMessageRequest, TransportError> {
    let parsed: ConversationMessageJson = serde_json::from_str(json)?;
    let content_type: ConversationContentType = decode_enum(&parsed.content_type);
    tracing::trace!(payload = "conversation message", %content_type, "decoding");

    let content = decode_content(content_type, parsed.content)?;
    let channel_id =
        ChannelId::new(parsed.channel_id).map_err(TransportError::invalid(ChannelId::FIELD))?;

    let mut request = ConversationMessageRequest::new(channel_id, content);
    if let Some(report_url) = parsed.report_url {
        request.set_report_url(Some(parse_url(REPORT_URL_FIELD, &report_url)?));
    }
    if let Some(track_id) = parsed.track_id {
        request.set_track_id(Some(
            TrackId::new(track_id).map_err(TransportError::invalid(TrackId::FIELD))?,
        ));
    }
    if let Some(ttl) = parsed.ttl {
        request.set_ttl(Some(
            MessageTtl::new(ttl).map_err(TransportError::invalid(MessageTtl::FIELD))?,
        ));
    }
    if let Some(source) = parsed.source {
        request.set_source(source);
    }

    Ok(request)
}

fn decode_content(
    content_type: ConversationContentType,
    body: Value,
) -> Result<ConversationContent, TransportError> {
    use ConversationContentType as Type;

    if !has_typed_content(&content_type) {
        return Ok(ConversationContent::Other { content_type, body });
    }

    let parsed: ContentJson = serde_json::from_value(body)?;
    let content = match &content_type {
        Type::Text => parsed.text.map(ConversationContent::Text),
        Type::Image => decode_optional_media(parsed.image)?.map(ConversationContent::Image),
        Type::Video => decode_optional_media(parsed.video)?.map(ConversationContent::Video),
        Type::Audio => decode_optional_media(parsed.audio)?.map(ConversationContent::Audio),
        Type::File => decode_optional_media(parsed.file)?.map(ConversationContent::File),
        Type::Location => parsed
            .location
            .map(|location| Location::new(location.latitude, location.longitude))
            .transpose()
            .map_err(TransportError::invalid(LOCATION_FIELD))?
            .map(ConversationContent::Location),
        Type::Hsm => parsed.hsm.map(decode_hsm).map(ConversationContent::Hsm),
        _ => None,
    };

    content.ok_or(TransportError::MissingContent { content_type })
}

/// Content types with a dedicated [`ConversationContent`] variant.
fn has_typed_content(content_type: &ConversationContentType) -> bool {
    use ConversationContentType as Type;

    matches!(
        content_type,
        Type::Text
            | Type::Image
            | Type::Video
            | Type::Audio
            | Type::File
            | Type::Location
            | Type::Hsm
    )
}

fn decode_optional_media(media: Option<MediaJson>) -> Result<Option<Media>, TransportError> {
    media
        .map(|media| {
            Ok::<_, TransportError>(Media {
                url: parse_url("url", &media.url)?,
                caption: media.caption,
            })
        })
        .transpose()
}

fn decode_hsm(hsm: HsmJson) -> HsmContent {
    let policy: HsmLanguagePolicy = hsm
        .language
        .policy
        .as_deref()
        .map(decode_enum)
        .unwrap_or_default();

    HsmContent {
        namespace: hsm.namespace,
        template_name: hsm.template_name,
        language: HsmLanguage {
            policy,
            code: hsm.language.code,
        },
        params: hsm
            .params
            .unwrap_or_default()
            .into_iter()
            .map(|param| HsmParam {
                default: param.default,
            })
            .collect(),
        components: hsm.components.unwrap_or_default(),
    }
}

fn parse_url(field: &'static str, input: &str) -> Result<Url, TransportError> {
    Url::parse(input).map_err(|_| TransportError::InvalidField {
        field,
        source: ValidationError::InvalidUrl {
            field,
            input: input.to_owned(),
        },
    })
}
