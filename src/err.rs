use std::error::Error;
use std::fmt::{self, Display, Formatter};

/// The result given after a parsing operation.
pub type ParseResult<T> = Result<T, ParseError>;

/// The error type returned when decoding ID3 tags.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ParseError {
    /// The tag identifier ("ID3" or "TAG") was not present.
    MissingIdentifier,
    /// The major/revision pair of the tag is not one that quaver decodes.
    UnsupportedVersion,
    /// The tag header or extended header set reserved flag bits or was
    /// otherwise inconsistent.
    MalformedHeader,
    /// A structural violation inside a frame body, such as an unterminated
    /// string or an illegal flag combination.
    Malformed(&'static str),
    /// A read would have moved past the end of the available data.
    Underflow,
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::MissingIdentifier => write![f, "tag identifier not found"],
            Self::UnsupportedVersion => write![f, "unsupported tag version"],
            Self::MalformedHeader => write![f, "malformed tag header"],
            Self::Malformed(what) => write![f, "malformed frame: {}", what],
            Self::Underflow => write![f, "not enough data"],
        }
    }
}

impl Error for ParseError {
    // Nothing to implement
}
