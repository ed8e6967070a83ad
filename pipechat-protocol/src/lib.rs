/// Protocol definitions for a pipe-delimited chat service
///
/// Every frame is a single line of the form:
///
/// ```ignore
/// <code><delimiter><payload>
/// ```
///
/// Where `code` is a short numeric token from a closed registry and `payload`
/// may itself contain further delimiter-separated fields. The delimiter
/// follows the code even when the payload is empty.
///
/// The client side of the protocol is modelled as a [`Session`]: outbound
/// actions ask the session for a [`Frame`] to send, and inbound frames are
/// fed through [`dispatch`] to produce renderable [`Event`]s.
use thiserror::Error;

mod codec;
mod config;
mod dispatch;
mod model;
mod registry;
mod roster;
mod session;

pub use codec::{decode, encode, Frame, FrameCodec};
pub use config::{ProtocolConfig, DEFAULT_DELIMITER, MAX_LINE_LENGTH};
pub use dispatch::{dispatch, Response};
pub use model::{ChatMessage, Event};
pub use registry::{RequestKind, ResponseKind};
pub use roster::Roster;
pub use session::{Session, SessionState, MIN_NICKNAME_LEN};

#[derive(Debug, Error)]
pub enum Error {
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("lines parse error: {0}")]
    LinesParseError(#[from] tokio_util::codec::LinesCodecError),

    #[error("{0:?} cannot be used as a frame delimiter")]
    InvalidDelimiter(char),

    #[error("nickname must be at least {min} characters")]
    NicknameTooShort { min: usize },

    #[error("line breaks are not allowed in a frame")]
    LineBreak,

    #[error("message is empty")]
    EmptyMessage,

    #[error("not connected")]
    NotConnected,

    #[error("already connected")]
    AlreadyConnected,
}
