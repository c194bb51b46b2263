use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use phonenumber::country;
use rust_decimal::Decimal;

use crate::domain::validation::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Conversations channel identifier (`channelId`).
///
/// Invariant: non-empty after trimming.
pub struct ChannelId(String);

impl ChannelId {
    /// Wire field name used by the conversations API (`channelId`).
    pub const FIELD: &'static str = "channelId";

    /// Create a validated [`ChannelId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated channel id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Client-assigned identifier echoed back in delivery reports (`trackId`).
///
/// Invariant: non-empty after trimming.
pub struct TrackId(String);

impl TrackId {
    /// Wire field name used by the conversations API (`trackId`).
    pub const FIELD: &'static str = "trackId";

    /// Create a validated [`TrackId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated track id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Mobile subscriber number in international form, without the leading `+`.
///
/// The messages API reports recipients and originators as bare JSON integers
/// (`31612345678`). E.164 caps numbers at 15 digits, so `u64` holds every value.
pub struct Msisdn(u64);

impl Msisdn {
    /// Wire field name used by the messages API (`recipient`).
    pub const FIELD: &'static str = "recipient";

    /// Longest MSISDN allowed by E.164.
    pub const MAX_DIGITS: usize = 15;

    /// Wrap a numeric MSISDN without checking its length.
    ///
    /// Use `Msisdn::try_from(u64)` for untrusted input.
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Parse a textual MSISDN, accepting an optional leading `+`.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }

        let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
        if digits.is_empty()
            || digits.len() > Self::MAX_DIGITS
            || !digits.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(ValidationError::InvalidMsisdn {
                input: trimmed.to_owned(),
            });
        }

        digits
            .parse::<u64>()
            .map(Self)
            .map_err(|_| ValidationError::InvalidMsisdn {
                input: trimmed.to_owned(),
            })
    }

    /// Parse a phone number in any notation `phonenumber` understands.
    ///
    /// `default_region` is used when the input carries no country prefix,
    /// so `0612345678` in [`country::Id::NL`] becomes `31612345678`.
    pub fn from_phone_number(
        input: &str,
        default_region: Option<country::Id>,
    ) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }

        let parsed = phonenumber::parse(default_region, trimmed).map_err(|_| {
            ValidationError::InvalidPhoneNumber {
                input: trimmed.to_owned(),
            }
        })?;
        Self::try_from(&parsed)
    }

    /// Numeric value as reported on the wire.
    pub fn value(self) -> u64 {
        self.0
    }

    /// E.164 form with the leading `+`.
    pub fn e164(self) -> String {
        format!("+{}", self.0)
    }

    /// Parse this MSISDN with `phonenumber` to obtain its country and number metadata.
    pub fn to_phone_number(self) -> Result<phonenumber::PhoneNumber, ValidationError> {
        let e164 = self.e164();
        phonenumber::parse(None, &e164)
            .map_err(|_| ValidationError::InvalidPhoneNumber { input: e164 })
    }
}

impl fmt::Display for Msisdn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Msisdn {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<u64> for Msisdn {
    type Error = ValidationError;

    /// Checked counterpart of [`Msisdn::new`]: at most [`Msisdn::MAX_DIGITS`] digits.
    fn try_from(value: u64) -> Result<Self, Self::Error> {
        if value.checked_ilog10().unwrap_or(0) as usize >= Self::MAX_DIGITS {
            return Err(ValidationError::InvalidMsisdn {
                input: value.to_string(),
            });
        }
        Ok(Self(value))
    }
}

impl TryFrom<&phonenumber::PhoneNumber> for Msisdn {
    type Error = ValidationError;

    fn try_from(value: &phonenumber::PhoneNumber) -> Result<Self, Self::Error> {
        let e164 = phonenumber::format(value)
            .mode(phonenumber::Mode::E164)
            .to_string();
        Self::parse(&e164)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
/// Exact decimal monetary amount.
///
/// The scale reported by the platform is kept, so `1.00` renders back as `1.00`.
/// Equality is numeric (`1.0 == 1.00`).
pub struct Amount(Decimal);

impl Amount {
    /// Wire field name used by the messages API (`amount`).
    pub const FIELD: &'static str = "amount";

    /// Wrap an already exact decimal value.
    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Parse a decimal token such as `0.07`, `-1.5` or `1.2e-3`.
    ///
    /// Tokens with more than 28 significant digits are rounded to the
    /// nearest representable value; the integer part must still fit.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }

        let invalid = || ValidationError::InvalidAmount {
            input: trimmed.to_owned(),
        };
        if !trimmed
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'-' | b'+' | b'e' | b'E'))
        {
            return Err(invalid());
        }

        if trimmed.contains(['e', 'E']) {
            return Decimal::from_scientific(trimmed)
                .map(Self)
                .map_err(|_| invalid());
        }

        match Decimal::from_str_exact(trimmed) {
            Ok(exact) => Ok(Self(exact)),
            Err(_) => {
                let rounded = Decimal::from_str(trimmed).map_err(|_| invalid())?;
                tracing::debug!(
                    field = Self::FIELD,
                    value = trimmed,
                    %rounded,
                    "amount exceeds decimal precision, rounded"
                );
                Ok(Self(rounded))
            }
        }
    }

    /// The exact decimal value.
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// Lossy single-precision view, rounded to the nearest `f32`.
    pub fn to_f32(&self) -> f32 {
        // Going through the decimal text gives correct rounding.
        self.0.to_string().parse().unwrap_or(f32::NAN)
    }

    /// Lossy double-precision view, rounded to the nearest `f64`.
    pub fn to_f64(&self) -> f64 {
        self.0.to_string().parse().unwrap_or(f64::NAN)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for Amount {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Conversation message time-to-live (`ttl`), e.g. `10m`, `36h` or `14d`.
///
/// Invariant: a positive count followed by one of `s`, `m`, `h`, `d`.
pub struct MessageTtl {
    raw: String,
    duration: Duration,
}

impl MessageTtl {
    /// Wire field name used by the conversations API (`ttl`).
    pub const FIELD: &'static str = "ttl";

    /// Create a validated TTL from its wire form.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let raw = value.trim();
        if raw.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }

        let invalid = || ValidationError::InvalidTtl {
            input: raw.to_owned(),
        };

        let split = raw.len() - 1;
        if !raw.is_char_boundary(split) {
            return Err(invalid());
        }
        let (count, unit) = raw.split_at(split);
        let unit_secs = match unit {
            "s" => 1,
            "m" => 60,
            "h" => 60 * 60,
            "d" => 24 * 60 * 60,
            _ => return Err(invalid()),
        };
        if count.is_empty() || !count.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let count: u64 = count.parse().map_err(|_| invalid())?;
        if count == 0 {
            return Err(invalid());
        }
        let secs = count.checked_mul(unit_secs).ok_or_else(invalid)?;

        Ok(Self {
            raw: raw.to_owned(),
            duration: Duration::from_secs(secs),
        })
    }

    /// Build a TTL from a duration, using the largest unit that divides it evenly.
    ///
    /// Sub-second precision is dropped.
    pub fn from_duration(duration: Duration) -> Result<Self, ValidationError> {
        let secs = duration.as_secs();
        let raw = if secs == 0 {
            return Err(ValidationError::InvalidTtl {
                input: format!("{duration:?}"),
            });
        } else if secs % 86_400 == 0 {
            format!("{}d", secs / 86_400)
        } else if secs % 3_600 == 0 {
            format!("{}h", secs / 3_600)
        } else if secs % 60 == 0 {
            format!("{}m", secs / 60)
        } else {
            format!("{secs}s")
        };

        Ok(Self {
            raw,
            duration: Duration::from_secs(secs),
        })
    }

    /// Wire form as provided.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The TTL as a [`Duration`].
    pub fn as_duration(&self) -> Duration {
        self.duration
    }
}
