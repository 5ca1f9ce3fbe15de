use crate::core::io::BufStream;
use crate::core::string::{self, Encoding};
use crate::err::ParseResult;
use crate::frames::encoding;
use crate::frames::lang::Language;
use crate::frames::time::TimestampFormat;
use std::fmt::{self, Display, Formatter};

/// A synchronised lyrics frame. The timestamped entries themselves are
/// carried undecoded.
#[derive(Clone, Debug)]
pub struct SyncedLyricsFrame {
    pub encoding: Encoding,
    pub lang: Language,
    pub format: TimestampFormat,
    pub content_type: u8,
    pub desc: String,
    pub data: Vec<u8>,
}

impl SyncedLyricsFrame {
    pub(crate) fn parse(stream: &mut BufStream) -> ParseResult<Self> {
        let encoding = encoding::parse(stream)?;
        let lang = Language::parse(stream)?;
        let format = TimestampFormat::parse(stream.read_u8()?);
        let content_type = stream.read_u8()?;
        let desc = string::read_terminated(encoding, stream)?;
        let data = stream.take_rest().to_vec();

        Ok(Self {
            encoding,
            lang,
            format,
            content_type,
            desc,
            data,
        })
    }
}

impl Display for SyncedLyricsFrame {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        if !self.desc.is_empty() {
            write![f, "{} ", self.desc]?;
        }

        write![f, "[{}, {} bytes]", self.lang, self.data.len()]
    }
}
