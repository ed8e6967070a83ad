/// Model definition for values handed to the rendering layer

/// Chat message as relayed by the server
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub struct ChatMessage {
    pub sender: String,
    pub body: String,
}

impl ChatMessage {
    pub fn new(sender: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            body: body.into(),
        }
    }
}

/// Something the user should see as a result of a received frame or a
/// closed transport
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub enum Event {
    /// Handshake accepted under the given username
    Connected(String),
    /// Handshake rejected; a different nickname may be tried
    UsernameTaken,
    /// The server didn't understand something we sent
    InvalidMessage,
    /// Full roster after a snapshot
    RosterChanged(Vec<String>),
    UserJoined(String),
    UserParted(String),
    ChatReceived(ChatMessage),
    Disconnected,
}
