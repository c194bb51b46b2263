use serde_json::{Map, Value};
use url::Url;

use crate::domain::kind::{ConversationContentType, HsmLanguagePolicy};
use crate::domain::validation::ValidationError;
use crate::domain::value::{ChannelId, MessageTtl, TrackId};

#[derive(Debug, Clone, PartialEq)]
/// A media attachment referenced by URL.
pub struct Media {
    pub url: Url,
    pub caption: Option<String>,
}

impl Media {
    pub fn new(url: Url) -> Self {
        Self { url, caption: None }
    }

    /// Parse `url` and build a [`Media`] without caption.
    pub fn parse(url: &str) -> Result<Self, ValidationError> {
        let url = Url::parse(url).map_err(|_| ValidationError::InvalidUrl {
            field: "url",
            input: url.to_owned(),
        })?;
        Ok(Self::new(url))
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
/// WGS 84 coordinates in degrees.
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub const LATITUDE_FIELD: &'static str = "latitude";
    pub const LONGITUDE_FIELD: &'static str = "longitude";

    /// Create a validated [`Location`].
    ///
    /// Latitude must lie in `-90..=90` and longitude in `-180..=180`;
    /// NaN and infinities are rejected.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, ValidationError> {
        let location = Self {
            latitude,
            longitude,
        };
        location.validate()?;
        Ok(location)
    }

    /// Check the range invariant on a value built through the public fields.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_coordinate(Self::LATITUDE_FIELD, self.latitude, 90.0)?;
        check_coordinate(Self::LONGITUDE_FIELD, self.longitude, 180.0)
    }
}

fn check_coordinate(field: &'static str, value: f64, limit: f64) -> Result<(), ValidationError> {
    // NaN fails the range check too.
    if (-limit..=limit).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::InvalidCoordinate {
            field,
            input: value.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HsmLanguage {
    pub policy: HsmLanguagePolicy,
    /// Locale such as `en` or `pt_BR`.
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Positional template parameter.
pub struct HsmParam {
    pub default: String,
}

#[derive(Debug, Clone, PartialEq)]
/// A pre-approved WhatsApp template message.
pub struct HsmContent {
    pub namespace: String,
    pub template_name: String,
    pub language: HsmLanguage,
    pub params: Vec<HsmParam>,
    /// Template components, passed through as raw JSON objects.
    pub components: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq)]
/// Body of a conversation message. The variant decides the wire `type`.
pub enum ConversationContent {
    Text(String),
    Image(Media),
    Video(Media),
    Audio(Media),
    File(Media),
    Location(Location),
    Hsm(HsmContent),
    /// Any other content type, with its `content` object kept verbatim.
    ///
    /// When `content_type` names one of the typed variants above, the body
    /// must hold the matching member or encoding fails.
    Other {
        content_type: ConversationContentType,
        body: Value,
    },
}

impl ConversationContent {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// The wire `type` this content is sent as.
    pub fn content_type(&self) -> ConversationContentType {
        match self {
            Self::Text(_) => ConversationContentType::Text,
            Self::Image(_) => ConversationContentType::Image,
            Self::Video(_) => ConversationContentType::Video,
            Self::Audio(_) => ConversationContentType::Audio,
            Self::File(_) => ConversationContentType::File,
            Self::Location(_) => ConversationContentType::Location,
            Self::Hsm(_) => ConversationContentType::Hsm,
            Self::Other { content_type, .. } => content_type.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Request to send a message over a conversations channel.
///
/// Mutable through setters until it is encoded.
pub struct ConversationMessageRequest {
    content: ConversationContent,
    channel_id: ChannelId,
    report_url: Option<Url>,
    track_id: Option<TrackId>,
    ttl: Option<MessageTtl>,
    source: Map<String, Value>,
}

impl ConversationMessageRequest {
    pub fn new(channel_id: ChannelId, content: ConversationContent) -> Self {
        Self {
            content,
            channel_id,
            report_url: None,
            track_id: None,
            ttl: None,
            source: Map::new(),
        }
    }

    pub fn content_type(&self) -> ConversationContentType {
        self.content.content_type()
    }

    pub fn content(&self) -> &ConversationContent {
        &self.content
    }

    pub fn channel_id(&self) -> &ChannelId {
        &self.channel_id
    }

    /// Where the platform posts status reports for this message.
    pub fn report_url(&self) -> Option<&Url> {
        self.report_url.as_ref()
    }

    pub fn track_id(&self) -> Option<&TrackId> {
        self.track_id.as_ref()
    }

    pub fn ttl(&self) -> Option<&MessageTtl> {
        self.ttl.as_ref()
    }

    /// Free-form metadata attached to the message and echoed in webhooks.
    pub fn source(&self) -> &Map<String, Value> {
        &self.source
    }

    pub fn set_content(&mut self, content: ConversationContent) {
        self.content = content;
    }

    pub fn set_channel_id(&mut self, channel_id: ChannelId) {
        self.channel_id = channel_id;
    }

    pub fn set_report_url(&mut self, report_url: Option<Url>) {
        self.report_url = report_url;
    }

    pub fn set_track_id(&mut self, track_id: Option<TrackId>) {
        self.track_id = track_id;
    }

    pub fn set_ttl(&mut self, ttl: Option<MessageTtl>) {
        self.ttl = ttl;
    }

    pub fn set_source(&mut self, source: Map<String, Value>) {
        self.source = source;
    }

    /// Insert one source entry, returning the previous value for `key`.
    pub fn insert_source(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.source.insert(key.into(), value)
    }

    pub fn with_report_url(mut self, report_url: Url) -> Self {
        self.report_url = Some(report_url);
        self
    }

    pub fn with_track_id(mut self, track_id: TrackId) -> Self {
        self.track_id = Some(track_id);
        self
    }

    pub fn with_ttl(mut self, ttl: MessageTtl) -> Self {
        self.ttl = Some(ttl);
        self
    }

    pub fn with_source(mut self, key: impl Into<String>, value: Value) -> Self {
        self.source.insert(key.into(), value);
        self
    }
}
