use crate::core::io::BufStream;
use crate::core::string::{self, Encoding};
use crate::err::{ParseError, ParseResult};
use std::fmt::{self, Display, Formatter};

/// A popularimeter frame: a rating out of 255, attributed to an email, with
/// an optional play count.
#[derive(Clone, Debug)]
pub struct PopularimeterFrame {
    pub email: String,
    pub rating: u8,
    pub plays: Option<u64>,
}

impl PopularimeterFrame {
    pub(crate) fn parse(stream: &mut BufStream) -> ParseResult<Self> {
        let email = string::read_terminated(Encoding::Latin1, stream)?;
        let rating = stream.read_u8()?;

        let plays = if stream.is_empty() {
            None
        } else {
            Some(stream.read_uint_to_end())
        };

        Ok(Self {
            email,
            rating,
            plays,
        })
    }

    /// The rating mapped onto the usual five stars.
    pub fn rating_simple(&self) -> u8 {
        match self.rating {
            0 => 0,
            1..=63 => 1,
            64..=127 => 2,
            128..=195 => 3,
            196..=254 => 4,
            255 => 5,
        }
    }
}

impl Display for PopularimeterFrame {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write![
            f,
            "{}/255 [{}, plays={}]",
            self.rating,
            self.email,
            self.plays.unwrap_or_default()
        ]
    }
}

/// A play counter frame, a single big-endian integer of whatever width the
/// tagger felt like writing that day.
#[derive(Clone, Debug)]
pub struct PlayCountFrame {
    pub plays: u64,
}

impl PlayCountFrame {
    pub(crate) fn parse(stream: &mut BufStream) -> ParseResult<Self> {
        if stream.remaining() < 4 {
            // The counter starts at four bytes and only ever grows.
            return Err(ParseError::Malformed("short play counter"));
        }

        Ok(Self {
            plays: stream.read_uint_to_end(),
        })
    }
}

impl Display for PlayCountFrame {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write![f, "{}", self.plays]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const POPM_DATA: &[u8] = b"test@test.com\0\
                               \x80\
                               \x00\x00\x16\x16";

    const PCNT_DATA: &[u8] = b"\x00\x00\x16\x16";

    #[test]
    fn parse_popm() {
        let frame = PopularimeterFrame::parse(&mut BufStream::new(POPM_DATA)).unwrap();

        assert_eq!(frame.email, "test@test.com");
        assert_eq!(frame.rating, 0x80);
        assert_eq!(frame.plays, Some(0x1616));
        assert_eq!(frame.rating_simple(), 3);
    }

    #[test]
    fn parse_popm_without_plays() {
        let frame =
            PopularimeterFrame::parse(&mut BufStream::new(b"test@test.com\0\xFF")).unwrap();

        assert_eq!(frame.rating, 0xFF);
        assert_eq!(frame.plays, None);
    }

    #[test]
    fn parse_pcnt() {
        let frame = PlayCountFrame::parse(&mut BufStream::new(PCNT_DATA)).unwrap();

        assert_eq!(frame.plays, 0x1616);
    }

    #[test]
    fn parse_pcnt_wide() {
        let frame =
            PlayCountFrame::parse(&mut BufStream::new(b"\x01\x23\x45\x67\x89\xAB\xCD")).unwrap();

        assert_eq!(frame.plays, 0x0123456789ABCD);
    }

    #[test]
    fn parse_pcnt_short() {
        let err = PlayCountFrame::parse(&mut BufStream::new(b"\x16\x16")).unwrap_err();

        assert_eq!(err, ParseError::Malformed("short play counter"));
    }
}
