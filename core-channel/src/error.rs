use serde::Serialize;
use thiserror::Error;

/// Terminal failure of one channel call.
///
/// Every variant maps onto a wire code tag (see [`code`](Self::code)); the
/// `Display` form is the human-readable message carried next to the tag.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChannelError {
    /// Caller input was missing required fields; detected before any host
    /// interaction.
    #[error("{0}")]
    InvalidArguments(String),

    /// The host could not launch the requested picker at all.
    #[error("{0}")]
    Intent(String),

    /// The picker dialog was dismissed without a selection.
    #[error("{0}")]
    UserCanceled(String),

    /// The picker confirmed but supplied no reference.
    #[error("{0}")]
    NoUriReturned(String),

    /// Durably persisting an access grant failed.
    #[error("{0}")]
    PermissionDenied(String),

    #[error("{0}")]
    Read(String),

    #[error("{0}")]
    Write(String),

    #[error("{0}")]
    Create(String),

    /// The operation name is not part of the channel's surface.
    #[error("Method not implemented: {0}")]
    NotImplemented(String),

    /// Another request already holds the pending slot.
    #[error("Another storage request is already in flight: {0}")]
    RequestInFlight(String),
}

impl ChannelError {
    /// Wire code tag carried in the error reply envelope.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidArguments(_) => "INVALID_ARGUMENTS",
            Self::Intent(_) => "INTENT_ERROR",
            Self::UserCanceled(_) => "USER_CANCELED",
            Self::NoUriReturned(_) => "NO_URI",
            Self::PermissionDenied(_) => "PERMISSION_DENIED",
            Self::Read(_) => "READ_ERROR",
            Self::Write(_) => "WRITE_ERROR",
            Self::Create(_) => "CREATE_ERROR",
            Self::NotImplemented(_) => "NOT_IMPLEMENTED",
            Self::RequestInFlight(_) => "REQUEST_IN_FLIGHT",
        }
    }

    /// Shape this error into the transport envelope.
    pub fn into_reply(self) -> ErrorReply {
        ErrorReply {
            message: self.to_string(),
            code: self.code(),
            details: None,
        }
    }
}

/// Error envelope surfaced to the transport: code tag, human-readable
/// message, and a detail payload the protocol reserves but never fills.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ErrorReply {
    pub code: &'static str,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

pub type Result<T> = std::result::Result<T, ChannelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_match_wire_protocol() {
        assert_eq!(
            ChannelError::InvalidArguments(String::new()).code(),
            "INVALID_ARGUMENTS"
        );
        assert_eq!(ChannelError::Intent(String::new()).code(), "INTENT_ERROR");
        assert_eq!(
            ChannelError::UserCanceled(String::new()).code(),
            "USER_CANCELED"
        );
        assert_eq!(ChannelError::NoUriReturned(String::new()).code(), "NO_URI");
        assert_eq!(
            ChannelError::PermissionDenied(String::new()).code(),
            "PERMISSION_DENIED"
        );
        assert_eq!(ChannelError::Read(String::new()).code(), "READ_ERROR");
        assert_eq!(ChannelError::Write(String::new()).code(), "WRITE_ERROR");
        assert_eq!(ChannelError::Create(String::new()).code(), "CREATE_ERROR");
    }

    #[test]
    fn test_reply_envelope_has_no_details() {
        let reply = ChannelError::Create("Failed to create document in directory".to_string())
            .into_reply();

        assert_eq!(reply.code, "CREATE_ERROR");
        assert_eq!(reply.message, "Failed to create document in directory");
        assert!(reply.details.is_none());
    }
}
