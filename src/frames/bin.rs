use crate::core::io::BufStream;
use crate::core::string::{self, Encoding};
use crate::err::{ParseError, ParseResult};
use std::fmt::{self, Display, Formatter};

/// A unique file identifier frame: a database owner plus whatever identifier
/// that database assigned to the file.
#[derive(Clone, Debug)]
pub struct FileIdFrame {
    pub owner: String,
    pub identifier: Vec<u8>,
}

impl FileIdFrame {
    pub(crate) fn parse(stream: &mut BufStream) -> ParseResult<Self> {
        let owner = read_owner(stream)?;
        let identifier = stream.take_rest().to_vec();

        Ok(Self { owner, identifier })
    }
}

impl Display for FileIdFrame {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write![f, "{}", self.owner]
    }
}

/// The encrypted metadata frame that only ID3v2.2 defines.
#[derive(Clone, Debug)]
pub struct EncryptedMetaFrame {
    pub owner: String,
    pub explanation: String,
    pub data: Vec<u8>,
}

impl EncryptedMetaFrame {
    pub(crate) fn parse(stream: &mut BufStream) -> ParseResult<Self> {
        let owner = read_owner(stream)?;
        let explanation = string::read_terminated(Encoding::Latin1, stream)?;
        let data = stream.take_rest().to_vec();

        Ok(Self {
            owner,
            explanation,
            data,
        })
    }
}

impl Display for EncryptedMetaFrame {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write![f, "{}", self.owner]
    }
}

/// An encryption method registration, binding an owner's scheme to the symbol
/// that encrypted frames reference.
#[derive(Clone, Debug)]
pub struct EncryptionMethodFrame {
    pub owner: String,
    pub symbol: u8,
    pub data: Vec<u8>,
}

impl EncryptionMethodFrame {
    pub(crate) fn parse(stream: &mut BufStream) -> ParseResult<Self> {
        let owner = string::read_terminated(Encoding::Latin1, stream)?;
        let symbol = stream.read_u8()?;
        let data = stream.take_rest().to_vec();

        Ok(Self {
            owner,
            symbol,
            data,
        })
    }
}

impl Display for EncryptionMethodFrame {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write![f, "{} [{:#04x}]", self.owner, self.symbol]
    }
}

/// A group identification registration, the grouping counterpart of
/// [`EncryptionMethodFrame`].
#[derive(Clone, Debug)]
pub struct GroupIdFrame {
    pub owner: String,
    pub symbol: u8,
    pub data: Vec<u8>,
}

impl GroupIdFrame {
    pub(crate) fn parse(stream: &mut BufStream) -> ParseResult<Self> {
        let owner = string::read_terminated(Encoding::Latin1, stream)?;
        let symbol = stream.read_u8()?;
        let data = stream.take_rest().to_vec();

        Ok(Self {
            owner,
            symbol,
            data,
        })
    }
}

impl Display for GroupIdFrame {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write![f, "{} [{:#04x}]", self.owner, self.symbol]
    }
}

/// A private frame. The payload means whatever the owner says it means.
#[derive(Clone, Debug)]
pub struct PrivateFrame {
    pub owner: String,
    pub data: Vec<u8>,
}

impl PrivateFrame {
    pub(crate) fn parse(stream: &mut BufStream) -> ParseResult<Self> {
        let owner = string::read_terminated(Encoding::Latin1, stream)?;
        let data = stream.take_rest().to_vec();

        Ok(Self { owner, data })
    }
}

impl Display for PrivateFrame {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write![f, "{}", self.owner]
    }
}

/// An undecoded binary payload: the music CD identifier, plus any frame whose
/// body is opaque to the decoder because it was compressed or encrypted.
#[derive(Clone, Debug)]
pub struct BinaryFrame {
    pub data: Vec<u8>,
}

impl BinaryFrame {
    pub(crate) fn parse(stream: &mut BufStream) -> ParseResult<Self> {
        Ok(Self {
            data: stream.take_rest().to_vec(),
        })
    }
}

impl Display for BinaryFrame {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        // Truncate the hex dump so a cover-sized payload doesn't flood output.
        for byte in self.data.iter().take(64) {
            write![f, "{:02x}", byte]?;
        }

        Ok(())
    }
}

/// Owner strings that identify a scheme are not allowed to be empty.
fn read_owner(stream: &mut BufStream) -> ParseResult<String> {
    let owner = string::read_terminated(Encoding::Latin1, stream)?;

    if owner.is_empty() {
        return Err(ParseError::Malformed("empty owner"));
    }

    Ok(owner)
}
