/// Wire codes for requests and responses
///
/// Requests and responses live in separate code spaces: "40" is a user
/// message in both directions but the two are never looked up in the same
/// table.

/// Frames sent from client to server
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum RequestKind {
    Connect,
    CloseConnection,
    UserMessage,
}

const REQUEST_CODES: [(RequestKind, &str); 3] = [
    (RequestKind::Connect, "1"),
    (RequestKind::CloseConnection, "2"),
    (RequestKind::UserMessage, "40"),
];

impl RequestKind {
    pub fn code(self) -> &'static str {
        lookup_code(&REQUEST_CODES, self)
    }

    /// Resolves a wire code, or `None` if it isn't a known request
    pub fn from_code(code: &str) -> Option<Self> {
        lookup_kind(&REQUEST_CODES, code)
    }
}

/// Frames sent from server to client
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum ResponseKind {
    InvalidMessage,
    ConnectSuccess,
    UsernameTaken,
    UserList,
    UserJoined,
    UserParted,
    UserMessage,
}

const RESPONSE_CODES: [(ResponseKind, &str); 7] = [
    (ResponseKind::InvalidMessage, "10"),
    (ResponseKind::ConnectSuccess, "20"),
    (ResponseKind::UsernameTaken, "21"),
    (ResponseKind::UserList, "30"),
    (ResponseKind::UserJoined, "31"),
    (ResponseKind::UserParted, "32"),
    (ResponseKind::UserMessage, "40"),
];

impl ResponseKind {
    pub fn code(self) -> &'static str {
        lookup_code(&RESPONSE_CODES, self)
    }

    /// Resolves a wire code, or `None` if it isn't a known response
    ///
    /// Newer servers may send codes this client doesn't know about, so an
    /// unknown code is an ordinary outcome rather than an error.
    pub fn from_code(code: &str) -> Option<Self> {
        lookup_kind(&RESPONSE_CODES, code)
    }
}

// Every kind appears exactly once in its table, so the fallback is unreachable
// unless a variant is added without a code.
fn lookup_code<K: Copy + Eq>(table: &[(K, &'static str)], kind: K) -> &'static str {
    table
        .iter()
        .find(|(k, _)| *k == kind)
        .map(|(_, code)| *code)
        .unwrap_or_default()
}

fn lookup_kind<K: Copy>(table: &[(K, &'static str)], code: &str) -> Option<K> {
    table.iter().find(|(_, c)| *c == code).map(|(k, _)| *k)
}
