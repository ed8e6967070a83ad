/// Routing of inbound frames to session handlers
use crate::{
    codec::{decode, Frame},
    model::{ChatMessage, Event},
    registry::ResponseKind,
    session::Session,
};

/// A server response with its payload split into fields
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub enum Response {
    InvalidMessage,
    ConnectSuccess(String),
    UsernameTaken,
    UserList(Vec<String>),
    UserJoined(String),
    UserParted(String),
    UserMessage(ChatMessage),
}

impl Response {
    /// Interprets `payload` according to `kind`
    ///
    /// Payloads that should be empty are not checked. A user message payload
    /// gets its own single split so that the body may contain the delimiter;
    /// one without any delimiter is taken as a sender with an empty body.
    pub fn parse(kind: ResponseKind, payload: &str, delimiter: char) -> Self {
        use ResponseKind::*;
        match kind {
            InvalidMessage => Self::InvalidMessage,
            ConnectSuccess => Self::ConnectSuccess(payload.into()),
            UsernameTaken => Self::UsernameTaken,
            UserList if payload.is_empty() => Self::UserList(Vec::new()),
            UserList => Self::UserList(payload.split(delimiter).map(String::from).collect()),
            UserJoined => Self::UserJoined(payload.into()),
            UserParted => Self::UserParted(payload.into()),
            UserMessage => {
                let mut fields = decode(payload, delimiter, 1).into_iter();
                let sender = fields.next().unwrap_or_default();
                let body = fields.next().unwrap_or_default();
                Self::UserMessage(ChatMessage::new(sender, body))
            }
        }
    }

    pub fn kind(&self) -> ResponseKind {
        match self {
            Self::InvalidMessage => ResponseKind::InvalidMessage,
            Self::ConnectSuccess(_) => ResponseKind::ConnectSuccess,
            Self::UsernameTaken => ResponseKind::UsernameTaken,
            Self::UserList(_) => ResponseKind::UserList,
            Self::UserJoined(_) => ResponseKind::UserJoined,
            Self::UserParted(_) => ResponseKind::UserParted,
            Self::UserMessage(_) => ResponseKind::UserMessage,
        }
    }
}

/// Applies one inbound frame to `session`
///
/// Frames with an unknown code are logged and dropped without touching the
/// session.
pub fn dispatch(session: &mut Session, frame: &Frame) -> Vec<Event> {
    let Some(kind) = ResponseKind::from_code(&frame.code) else {
        tracing::warn!(code = %frame.code, "unhandled response code");
        return Vec::new();
    };
    let response = Response::parse(kind, &frame.payload, session.delimiter());
    session.apply(response)
}
