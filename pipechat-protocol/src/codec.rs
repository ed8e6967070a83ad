/// Codec for the delimiter-framed chat protocol
use crate::{config::ProtocolConfig, registry::RequestKind, Error};
use tokio_util::{
    bytes::BytesMut,
    codec::{Decoder, Encoder, LinesCodec},
};

/// Splits `raw` on `delimiter` at most `max_splits` times
///
/// Splitting proceeds left to right and stops early once the tail holds no
/// further delimiter. The last element is always the unconsumed remainder,
/// embedded delimiters included, which is what lets a trailing field such as
/// a chat body carry the delimiter character. A `max_splits` of zero is
/// treated as one.
///
/// ```
/// use pipechat_protocol::decode;
///
/// assert_eq!(decode("40|alice|hi|there", '|', 1), ["40", "alice|hi|there"]);
/// assert_eq!(decode("ping", '|', 1), ["ping"]);
/// ```
pub fn decode(raw: &str, delimiter: char, max_splits: usize) -> Vec<&str> {
    raw.splitn(max_splits.max(1).saturating_add(1), delimiter).collect()
}

/// Joins a code and payload into a wire frame
///
/// The delimiter is written even if `payload` is empty. Nothing in `payload`
/// is escaped.
pub fn encode(code: &str, delimiter: char, payload: &str) -> String {
    let mut frame = String::with_capacity(code.len() + delimiter.len_utf8() + payload.len());
    frame.push_str(code);
    frame.push(delimiter);
    frame.push_str(payload);
    frame
}

/// Frames travel one per line, so no field may hold a line terminator
pub(crate) fn has_line_break(field: &str) -> bool {
    field.contains(['\n', '\r'])
}

/// One protocol frame, either direction
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub struct Frame {
    pub code: String,
    pub payload: String,
}

impl Frame {
    pub fn new(code: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            payload: payload.into(),
        }
    }

    /// Builds an outbound frame for `kind`
    pub fn request(kind: RequestKind, payload: impl Into<String>) -> Self {
        Self::new(kind.code(), payload)
    }

    /// Separates the code from the payload of a raw frame
    ///
    /// Only the first delimiter is significant here; the payload is left
    /// intact for the handler of its code to split further. A frame with no
    /// delimiter at all is taken to be a bare code.
    pub fn parse(raw: &str, delimiter: char) -> Self {
        let mut fields = decode(raw, delimiter, 1).into_iter();
        let code = fields.next().unwrap_or_default();
        let payload = fields.next().unwrap_or_default();
        Self::new(code, payload)
    }

    pub fn to_wire(&self, delimiter: char) -> String {
        encode(&self.code, delimiter, &self.payload)
    }
}

/// Line codec carrying one frame per line
#[derive(Debug)]
pub struct FrameCodec {
    inner: LinesCodec,
    delimiter: char,
}

impl Default for FrameCodec {
    fn default() -> Self {
        Self::new(ProtocolConfig::default())
    }
}

impl FrameCodec {
    pub fn new(config: ProtocolConfig) -> Self {
        Self {
            inner: LinesCodec::new_with_max_length(config.max_line_length()),
            delimiter: config.delimiter(),
        }
    }
}

impl Decoder for FrameCodec {
    type Item = Frame;
    type Error = Error;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        Ok(self
            .inner
            .decode(src)?
            .map(|line| Frame::parse(&line, self.delimiter)))
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        Ok(self
            .inner
            .decode_eof(src)?
            .map(|line| Frame::parse(&line, self.delimiter)))
    }
}

impl Encoder<Frame> for FrameCodec {
    type Error = Error;

    fn encode(&mut self, frame: Frame, dst: &mut BytesMut) -> Result<(), Self::Error> {
        if has_line_break(&frame.code) || has_line_break(&frame.payload) {
            return Err(Error::LineBreak);
        }
        self.inner.encode(frame.to_wire(self.delimiter), dst)?;
        Ok(())
    }
}
