#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} must not be empty")]
    Empty { field: &'static str },

    #[error("invalid phone number: {input}")]
    InvalidPhoneNumber { input: String },

    #[error("invalid msisdn: {input}")]
    InvalidMsisdn { input: String },

    #[error("invalid decimal amount: {input}")]
    InvalidAmount { input: String },

    #[error("invalid ttl: {input} (expected a positive count followed by s, m, h or d)")]
    InvalidTtl { input: String },

    #[error("{field} is not a valid url: {input}")]
    InvalidUrl { field: &'static str, input: String },

    #[error("{field} out of range: {input}")]
    InvalidCoordinate { field: &'static str, input: String },
}

#[cfg(test)]
mod tests {
    use super::ValidationError;

    #[test]
    fn display_messages_are_human_readable() {
        let err = ValidationError::Empty { field: "channelId" };
        assert_eq!(err.to_string(), "channelId must not be empty");

        let err = ValidationError::InvalidPhoneNumber {
            input: "bad".to_owned(),
        };
        assert_eq!(err.to_string(), "invalid phone number: bad");

        let err = ValidationError::InvalidMsisdn {
            input: "+31-abc".to_owned(),
        };
        assert_eq!(err.to_string(), "invalid msisdn: +31-abc");

        let err = ValidationError::InvalidAmount {
            input: "1,5".to_owned(),
        };
        assert_eq!(err.to_string(), "invalid decimal amount: 1,5");

        let err = ValidationError::InvalidTtl {
            input: "10w".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "invalid ttl: 10w (expected a positive count followed by s, m, h or d)"
        );

        let err = ValidationError::InvalidUrl {
            field: "reportUrl",
            input: "not a url".to_owned(),
        };
        assert_eq!(err.to_string(), "reportUrl is not a valid url: not a url");

        let err = ValidationError::InvalidCoordinate {
            field: "latitude",
            input: "NaN".to_owned(),
        };
        assert_eq!(err.to_string(), "latitude out of range: NaN");
    }
}
