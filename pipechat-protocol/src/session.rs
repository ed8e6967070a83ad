/// Client-side session state machine
use crate::{
    codec::{has_line_break, Frame},
    config::ProtocolConfig,
    dispatch::Response,
    model::Event,
    registry::RequestKind,
    roster::Roster,
    Error,
};

/// Shortest nickname accepted for a connect request
pub const MIN_NICKNAME_LEN: usize = 3;

/// Connection lifecycle of a session
///
/// ```text
///   Disconnected ──(connect)──→ AwaitingConnection ──(ConnectSuccess)──→ Connected
///        ↑                        │      ↑                                   │
///        │                        └──────┘ (UsernameTaken, connect)          │
///        └──────────────────(disconnect / transport closed)──────────────────┘
/// ```
#[derive(Clone, Copy, Debug, Default, Hash, Eq, PartialEq)]
pub enum SessionState {
    #[default]
    Disconnected,
    AwaitingConnection,
    Connected,
}

/// State of one chat connection
///
/// Outbound operations return the [`Frame`] to send and never touch the
/// transport themselves. An `Err` means nothing should be sent.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Session {
    state: SessionState,
    username: Option<String>,
    roster: Roster,
    delimiter: char,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(ProtocolConfig::default())
    }
}

impl Session {
    pub fn new(config: ProtocolConfig) -> Self {
        Self {
            state: SessionState::Disconnected,
            username: None,
            roster: Roster::new(),
            delimiter: config.delimiter(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Username confirmed by the server, once connected
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    /// Starts the handshake with `nickname`
    ///
    /// May be repeated while awaiting a reply, e.g. after the server reported
    /// the previous nickname as taken.
    pub fn connect(&mut self, nickname: &str) -> Result<Frame, Error> {
        if self.state == SessionState::Connected {
            return Err(Error::AlreadyConnected);
        }
        if nickname.chars().count() < MIN_NICKNAME_LEN {
            return Err(Error::NicknameTooShort {
                min: MIN_NICKNAME_LEN,
            });
        }
        if has_line_break(nickname) {
            return Err(Error::LineBreak);
        }
        self.transition(SessionState::AwaitingConnection);
        Ok(Frame::request(RequestKind::Connect, nickname))
    }

    /// Builds a chat message frame, only allowed once connected
    pub fn send_chat(&mut self, body: &str) -> Result<Frame, Error> {
        if self.state != SessionState::Connected {
            return Err(Error::NotConnected);
        }
        if body.is_empty() {
            return Err(Error::EmptyMessage);
        }
        if has_line_break(body) {
            return Err(Error::LineBreak);
        }
        Ok(Frame::request(RequestKind::UserMessage, body))
    }

    /// Leaves the chat, returning the close request to send
    pub fn disconnect(&mut self) -> Result<Frame, Error> {
        if self.state == SessionState::Disconnected {
            return Err(Error::NotConnected);
        }
        self.reset();
        Ok(Frame::request(RequestKind::CloseConnection, ""))
    }

    /// Transport went away; always ends in `Disconnected`
    pub fn close(&mut self) -> Vec<Event> {
        self.reset();
        vec![Event::Disconnected]
    }

    /// Applies a parsed server response
    pub fn apply(&mut self, response: Response) -> Vec<Event> {
        match response {
            Response::InvalidMessage => vec![Event::InvalidMessage],
            Response::ConnectSuccess(username) => self.on_connect_success(username),
            Response::UsernameTaken => self.on_username_taken(),
            Response::UserList(names) => self.on_user_list(names),
            Response::UserJoined(name) => self.on_user_joined(name),
            Response::UserParted(name) => self.on_user_parted(name),
            Response::UserMessage(msg) => {
                if self.in_room() {
                    vec![Event::ChatReceived(msg)]
                } else {
                    self.ignore(&Response::UserMessage(msg))
                }
            }
        }
    }

    fn on_connect_success(&mut self, username: String) -> Vec<Event> {
        if self.state != SessionState::AwaitingConnection {
            return self.ignore(&Response::ConnectSuccess(username));
        }
        self.username = Some(username.clone());
        self.transition(SessionState::Connected);
        vec![Event::Connected(username)]
    }

    fn on_username_taken(&mut self) -> Vec<Event> {
        if self.state != SessionState::AwaitingConnection {
            return self.ignore(&Response::UsernameTaken);
        }
        vec![Event::UsernameTaken]
    }

    fn on_user_list(&mut self, names: Vec<String>) -> Vec<Event> {
        if !self.in_room() {
            return self.ignore(&Response::UserList(names));
        }
        self.roster.apply_snapshot(names);
        vec![Event::RosterChanged(self.roster.as_slice().to_vec())]
    }

    fn on_user_joined(&mut self, name: String) -> Vec<Event> {
        if !self.in_room() {
            return self.ignore(&Response::UserJoined(name));
        }
        if self.roster.apply_join(name.as_str()) {
            vec![Event::UserJoined(name)]
        } else {
            tracing::debug!(%name, "join for user already in roster");
            Vec::new()
        }
    }

    fn on_user_parted(&mut self, name: String) -> Vec<Event> {
        if !self.in_room() {
            return self.ignore(&Response::UserParted(name));
        }
        if self.roster.apply_part(&name) {
            vec![Event::UserParted(name)]
        } else {
            tracing::debug!(%name, "part for user not in roster");
            Vec::new()
        }
    }

    // Membership and chat frames are meaningless before a connect attempt
    fn in_room(&self) -> bool {
        self.state != SessionState::Disconnected
    }

    fn ignore(&self, response: &Response) -> Vec<Event> {
        tracing::warn!(
            kind = ?response.kind(),
            state = ?self.state,
            "response not expected in current state"
        );
        Vec::new()
    }

    fn reset(&mut self) {
        self.username = None;
        self.roster.clear();
        self.transition(SessionState::Disconnected);
    }

    fn transition(&mut self, next: SessionState) {
        if self.state != next {
            tracing::debug!(from = ?self.state, to = ?next, "session state change");
            self.state = next;
        }
    }
}

#[cfg(test)]
mod test {
    use super::{Session, SessionState};
    use crate::{dispatch, ChatMessage, Error, Event, Frame, RequestKind};

    fn receive(session: &mut Session, raw: &str) -> Vec<Event> {
        dispatch(session, &Frame::parse(raw, '|'))
    }

    fn connected(name: &str) -> Session {
        let mut session = Session::default();
        session.connect(name).unwrap();
        receive(&mut session, &format!("20|{name}"));
        session
    }

    #[test]
    fn test_short_nickname_rejected() {
        let mut session = Session::default();
        for nickname in ["", "a", "ab"] {
            assert!(matches!(
                session.connect(nickname),
                Err(Error::NicknameTooShort { min: 3 })
            ));
            assert_eq!(session.state(), SessionState::Disconnected);
        }
    }

    #[test]
    fn test_connect_sends_request() {
        let mut session = Session::default();
        let frame = session.connect("abc").unwrap();
        assert_eq!(frame, Frame::request(RequestKind::Connect, "abc"));
        assert_eq!(frame.to_wire('|'), "1|abc");
        assert_eq!(session.state(), SessionState::AwaitingConnection);
    }

    #[test]
    fn test_nickname_length_counts_characters() {
        let mut session = Session::default();
        // two characters, four bytes
        assert!(session.connect("éé").is_err());
        assert!(session.connect("ééé").is_ok());
        // two characters, four UTF-16 code units
        let mut session = Session::default();
        assert!(session.connect("😀😀").is_err());
    }

    #[test]
    fn test_username_taken_then_retry() {
        let mut session = Session::default();
        session.connect("alice").unwrap();
        assert_eq!(receive(&mut session, "21|"), [Event::UsernameTaken]);
        assert_eq!(session.state(), SessionState::AwaitingConnection);
        assert_eq!(session.username(), None);

        assert!(session.connect("alice2").is_ok());
        assert_eq!(receive(&mut session, "20|alice2"), [Event::Connected("alice2".into())]);
        assert_eq!(session.state(), SessionState::Connected);
    }

    #[test]
    fn test_connect_success() {
        let mut session = Session::default();
        session.connect("alice").unwrap();
        assert_eq!(receive(&mut session, "20|alice"), [Event::Connected("alice".into())]);
        assert_eq!(session.state(), SessionState::Connected);
        assert_eq!(session.username(), Some("alice"));
    }

    #[test]
    fn test_connect_when_connected() {
        let mut session = connected("alice");
        assert!(matches!(session.connect("bob"), Err(Error::AlreadyConnected)));
        assert_eq!(session.username(), Some("alice"));
    }

    #[test]
    fn test_handshake_replies_out_of_state_ignored() {
        let mut session = Session::default();
        assert!(receive(&mut session, "20|alice").is_empty());
        assert!(receive(&mut session, "21|").is_empty());
        assert_eq!(session.state(), SessionState::Disconnected);

        let mut session = connected("alice");
        assert!(receive(&mut session, "20|mallory").is_empty());
        assert!(receive(&mut session, "21|").is_empty());
        assert_eq!(session.username(), Some("alice"));
    }

    #[test]
    fn test_send_chat_gating() {
        let mut session = Session::default();
        assert!(matches!(session.send_chat("hi"), Err(Error::NotConnected)));
        session.connect("alice").unwrap();
        assert!(matches!(session.send_chat("hi"), Err(Error::NotConnected)));

        receive(&mut session, "20|alice");
        assert!(matches!(session.send_chat(""), Err(Error::EmptyMessage)));
        let frame = session.send_chat("hi | there").unwrap();
        assert_eq!(frame.to_wire('|'), "40|hi | there");
        assert_eq!(session.state(), SessionState::Connected);
    }

    #[test]
    fn test_line_breaks_rejected() {
        let mut session = Session::default();
        for nickname in ["alice\n2|", "bob\r"] {
            assert!(matches!(session.connect(nickname), Err(Error::LineBreak)));
            assert_eq!(session.state(), SessionState::Disconnected);
        }

        let mut session = connected("alice");
        for body in ["hi\n2|", "hi\r\n40|again", "\n"] {
            assert!(matches!(session.send_chat(body), Err(Error::LineBreak)));
        }
        assert_eq!(session.state(), SessionState::Connected);
    }

    #[test]
    fn test_roster_events() {
        let mut session = connected("alice");
        assert_eq!(
            receive(&mut session, "30|alice|bob"),
            [Event::RosterChanged(vec!["alice".into(), "bob".into()])]
        );
        assert_eq!(receive(&mut session, "31|carol"), [Event::UserJoined("carol".into())]);
        assert_eq!(receive(&mut session, "32|bob"), [Event::UserParted("bob".into())]);
        assert!(receive(&mut session, "31|alice").is_empty());
        assert!(receive(&mut session, "32|bob").is_empty());
        assert_eq!(session.roster().as_slice(), ["alice", "carol"]);
    }

    #[test]
    fn test_room_frames_ignored_when_disconnected() {
        let mut session = Session::default();
        assert!(receive(&mut session, "30|alice|bob").is_empty());
        assert!(receive(&mut session, "31|carol").is_empty());
        assert!(receive(&mut session, "40|bob|hi").is_empty());
        assert!(session.roster().is_empty());
    }

    #[test]
    fn test_chat_received() {
        let mut session = connected("alice");
        assert_eq!(
            receive(&mut session, "40|bob|hello"),
            [Event::ChatReceived(ChatMessage::new("bob", "hello"))]
        );
    }

    #[test]
    fn test_disconnect() {
        let mut session = connected("alice");
        receive(&mut session, "30|alice|bob");
        let frame = session.disconnect().unwrap();
        assert_eq!(frame.to_wire('|'), "2|");
        assert_eq!(session.state(), SessionState::Disconnected);
        assert_eq!(session.username(), None);
        assert!(session.roster().is_empty());

        assert!(matches!(session.disconnect(), Err(Error::NotConnected)));
    }

    #[test]
    fn test_close_resets_from_any_state() {
        let mut fresh = Session::default();
        let mut awaiting = Session::default();
        awaiting.connect("alice").unwrap();
        let mut joined = connected("alice");
        receive(&mut joined, "30|alice|bob");

        for session in [&mut fresh, &mut awaiting, &mut joined] {
            assert_eq!(session.close(), [Event::Disconnected]);
            assert_eq!(*session, Session::default());
        }
    }
}
