use crate::core::io::BufStream;
use crate::core::string::{self, Encoding};
use crate::err::ParseResult;
use crate::frames::encoding;
use crate::tag::Version;
use std::fmt::{self, Display, Formatter};

/// A URL link frame. The payload is always ISO-8859-1, with no encoding byte.
#[derive(Clone, Debug)]
pub struct UrlFrame {
    pub url: String,
}

impl UrlFrame {
    pub(crate) fn parse(stream: &mut BufStream) -> ParseResult<Self> {
        let url = string::read(Encoding::Latin1, stream);

        Ok(Self { url })
    }
}

impl Display for UrlFrame {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write![f, "{}", self.url]
    }
}

/// A user-defined URL frame, which unlike [`UrlFrame`] carries an encoded
/// description before the ISO-8859-1 link itself.
#[derive(Clone, Debug)]
pub struct UserUrlFrame {
    pub encoding: Encoding,
    pub desc: String,
    pub url: String,
}

impl UserUrlFrame {
    pub(crate) fn parse(stream: &mut BufStream) -> ParseResult<Self> {
        let encoding = encoding::parse(stream)?;
        let desc = string::read_terminated(encoding, stream)?;
        let url = string::read(Encoding::Latin1, stream);

        Ok(Self {
            encoding,
            desc,
            url,
        })
    }
}

impl Display for UserUrlFrame {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write![f, "{}", self.url]
    }
}

/// A linked-information frame pointing at a frame in another file.
#[derive(Clone, Debug)]
pub struct LinkedFrame {
    /// The identifier of the frame being linked, three characters in ID3v2.2
    /// and four afterwards.
    pub target: String,
    pub url: String,
    pub identifiers: Vec<String>,
}

impl LinkedFrame {
    pub(crate) fn parse(version: Version, stream: &mut BufStream) -> ParseResult<Self> {
        let len = if version == Version::V22 { 3 } else { 4 };

        let target = string::read_exact(Encoding::Latin1, stream, len)?;
        let url = string::read_terminated(Encoding::Latin1, stream)?;
        let identifiers = string::read_sequence(Encoding::Latin1, stream);

        Ok(Self {
            target,
            url,
            identifiers,
        })
    }
}

impl Display for LinkedFrame {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write![f, "{} -> {}", self.target, self.url]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::err::ParseError;

    const WOAR_DATA: &[u8] = b"https://test.com";

    const WXXX_DATA: &[u8] = b"\x00\
                               Label site\0\
                               https://test.com";

    const LINK_DATA: &[u8] = b"APIC\
                               https://test.com/cover\0\
                               front\0back";

    #[test]
    fn parse_url() {
        let frame = UrlFrame::parse(&mut BufStream::new(WOAR_DATA)).unwrap();

        assert_eq!(frame.url, "https://test.com");
    }

    #[test]
    fn parse_wxxx() {
        let frame = UserUrlFrame::parse(&mut BufStream::new(WXXX_DATA)).unwrap();

        assert_eq!(frame.encoding, Encoding::Latin1);
        assert_eq!(frame.desc, "Label site");
        assert_eq!(frame.url, "https://test.com");
    }

    #[test]
    fn parse_link() {
        let frame = LinkedFrame::parse(Version::V23, &mut BufStream::new(LINK_DATA)).unwrap();

        assert_eq!(frame.target, "APIC");
        assert_eq!(frame.url, "https://test.com/cover");
        assert_eq!(frame.identifiers, vec!["front", "back"]);
    }

    #[test]
    fn parse_link_unterminated_url() {
        let data = b"APIChttps://test.com/cover";
        let err = LinkedFrame::parse(Version::V23, &mut BufStream::new(data)).unwrap_err();

        assert_eq!(err, ParseError::Malformed("unterminated string"));
    }
}
