//! Frames that embed files.

use crate::core::io::BufStream;
use crate::core::string::{self, Encoding};
use crate::err::ParseResult;
use crate::frames::encoding;
use crate::tag::Version;
use std::fmt::{self, Display, Formatter};

/// An attached picture frame.
#[derive(Clone, Debug)]
pub struct PictureFrame {
    pub encoding: Encoding,
    /// The three-character image format in ID3v2.2, or the NUL-terminated
    /// MIME type in later versions. Carried as written.
    pub format: String,
    pub pic_type: PictureType,
    pub desc: String,
    pub picture: Vec<u8>,
}

impl PictureFrame {
    pub(crate) fn parse(version: Version, stream: &mut BufStream) -> ParseResult<Self> {
        let encoding = encoding::parse(stream)?;

        let format = if version == Version::V22 {
            string::read_exact(Encoding::Latin1, stream, 3)?
        } else {
            string::read_terminated(Encoding::Latin1, stream)?
        };

        let pic_type = PictureType::parse(stream.read_u8()?);
        let desc = string::read_terminated(encoding, stream)?;
        let picture = stream.take_rest().to_vec();

        Ok(Self {
            encoding,
            format,
            pic_type,
            desc,
            picture,
        })
    }
}

impl Display for PictureFrame {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write![f, "{} ", self.format]?;

        if !self.desc.is_empty() {
            write![f, "\"{}\" ", self.desc]?;
        }

        write![f, "[{:?}]", self.pic_type]
    }
}

byte_enum! {
    pub enum PictureType {
        Other = 0x00,
        FileIcon = 0x01,
        OtherFileIcon = 0x02,
        FrontCover = 0x03,
        BackCover = 0x04,
        LeafletPage = 0x05,
        Media = 0x06,
        LeadArtist = 0x07,
        Artist = 0x08,
        Conductor = 0x09,
        Band = 0x0A,
        Composer = 0x0B,
        Writer = 0x0C,
        RecordingLocation = 0x0D,
        DuringRecording = 0x0E,
        DuringPerformance = 0x0F,
        MovieScreenCapture = 0x10,
        ColoredFish = 0x11,
        Illustration = 0x12,
        BandLogo = 0x13,
        PublisherLogo = 0x14,
    };
    PictureType::Other
}

impl Default for PictureType {
    fn default() -> Self {
        PictureType::FrontCover
    }
}

/// A general encapsulated object: any file at all, wrapped in a frame.
#[derive(Clone, Debug)]
pub struct ObjectFrame {
    pub encoding: Encoding,
    pub mime: String,
    pub filename: String,
    pub desc: String,
    pub data: Vec<u8>,
}

impl ObjectFrame {
    pub(crate) fn parse(stream: &mut BufStream) -> ParseResult<Self> {
        let encoding = encoding::parse(stream)?;

        // Only the MIME type is pinned to Latin1. The filename and description
        // both follow the declared encoding, even though some taggers disagree.
        let mime = string::read_terminated(Encoding::Latin1, stream)?;
        let filename = string::read_terminated(encoding, stream)?;
        let desc = string::read_terminated(encoding, stream)?;
        let data = stream.take_rest().to_vec();

        Ok(Self {
            encoding,
            mime,
            filename,
            desc,
            data,
        })
    }
}

impl Display for ObjectFrame {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        if !self.mime.is_empty() {
            write![f, "{} ", self.mime]?;
        }

        if !self.filename.is_empty() {
            write![f, "\"{}\"", self.filename]?;
        }

        if !self.desc.is_empty() {
            write![f, " [{}]", self.desc]?;
        }

        Ok(())
    }
}
