use crate::core::io::BufStream;
use crate::core::string::{self, Encoding};
use crate::err::ParseResult;
use crate::frames::encoding;
use crate::frames::lang::Language;
use std::fmt::{self, Display, Formatter};

/// A descriptor-plus-text frame tied to a language, the schema shared by
/// comments and unsynchronised lyrics.
#[derive(Clone, Debug)]
pub struct CommentFrame {
    pub encoding: Encoding,
    pub lang: Language,
    pub desc: String,
    pub text: String,
}

impl CommentFrame {
    pub(crate) fn parse(stream: &mut BufStream) -> ParseResult<Self> {
        let encoding = encoding::parse(stream)?;
        let lang = Language::parse(stream)?;
        let desc = string::read_terminated(encoding, stream)?;
        let text = string::read(encoding, stream);

        Ok(Self {
            encoding,
            lang,
            desc,
            text,
        })
    }
}

impl Display for CommentFrame {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        if !self.desc.is_empty() {
            write![f, "{}: ", self.desc]?;
        }

        write![f, "{}", self.text]
    }
}
