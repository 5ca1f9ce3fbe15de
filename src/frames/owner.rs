use crate::core::io::BufStream;
use crate::core::string::{self, Encoding};
use crate::err::{ParseError, ParseResult};
use crate::frames::encoding;
use crate::frames::lang::Language;
use std::fmt::{self, Display, Formatter};

/// An ownership frame recording a purchase.
#[derive(Clone, Debug)]
pub struct OwnershipFrame {
    pub encoding: Encoding,
    pub price: String,
    pub purchase_date: String,
    pub seller: String,
}

impl OwnershipFrame {
    pub(crate) fn parse(stream: &mut BufStream) -> ParseResult<Self> {
        let encoding = encoding::parse(stream)?;
        let price = string::read_terminated(Encoding::Latin1, stream)?;
        let purchase_date = read_date(stream)?;
        let seller = string::read(encoding, stream);

        Ok(Self {
            encoding,
            price,
            purchase_date,
            seller,
        })
    }
}

impl Display for OwnershipFrame {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write![f, "{} [{}, {}]", self.seller, self.price, self.purchase_date]
    }
}

/// A terms-of-use frame.
#[derive(Clone, Debug)]
pub struct TermsOfUseFrame {
    pub encoding: Encoding,
    pub lang: Language,
    pub text: String,
}

impl TermsOfUseFrame {
    pub(crate) fn parse(stream: &mut BufStream) -> ParseResult<Self> {
        let encoding = encoding::parse(stream)?;
        let lang = Language::parse(stream)?;
        let text = string::read(encoding, stream);

        Ok(Self {
            encoding,
            lang,
            text,
        })
    }
}

impl Display for TermsOfUseFrame {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write![f, "{}", self.text]
    }
}

byte_enum! {
    /// How a commercially-delivered file was received.
    pub enum ReceivedAs {
        Other = 0x00,
        StandardAlbum = 0x01,
        CompressedAudio = 0x02,
        FileOverInternet = 0x03,
        StreamOverInternet = 0x04,
        NoteSheets = 0x05,
        NoteSheetsInBook = 0x06,
        MusicOnOtherMedia = 0x07,
        NonMusicalMerchandise = 0x08,
    };
    ReceivedAs::Other
}

/// A commercial frame describing an offer, optionally with a seller logo
/// attached at the end.
#[derive(Clone, Debug)]
pub struct CommercialFrame {
    pub encoding: Encoding,
    pub price: String,
    pub valid_until: String,
    pub contact_url: String,
    pub received_as: ReceivedAs,
    pub seller: String,
    pub desc: String,
    pub logo_mime: Option<String>,
    pub logo: Option<Vec<u8>>,
}

impl CommercialFrame {
    pub(crate) fn parse(stream: &mut BufStream) -> ParseResult<Self> {
        let encoding = encoding::parse(stream)?;
        let price = string::read_terminated(Encoding::Latin1, stream)?;
        let valid_until = read_date(stream)?;
        let contact_url = string::read_terminated(Encoding::Latin1, stream)?;
        let received_as = ReceivedAs::parse(stream.read_u8()?);
        let seller = string::read_terminated(encoding, stream)?;
        let desc = string::read_terminated(encoding, stream)?;

        // The logo is optional, but when present it always has a MIME type.
        let (logo_mime, logo) = if stream.is_empty() {
            (None, None)
        } else {
            let mime = string::read_terminated(Encoding::Latin1, stream)?;
            (Some(mime), Some(stream.take_rest().to_vec()))
        };

        Ok(Self {
            encoding,
            price,
            valid_until,
            contact_url,
            received_as,
            seller,
            desc,
            logo_mime,
            logo,
        })
    }
}

impl Display for CommercialFrame {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write![f, "{} [{}]", self.desc, self.price]
    }
}

/// Read the 8-character YYYYMMDD dates used by ownership and commercial
/// frames. The format is fixed, so anything non-numeric is rejected.
fn read_date(stream: &mut BufStream) -> ParseResult<String> {
    let date = string::read_exact(Encoding::Latin1, stream, 8)?;

    if !date.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(ParseError::Malformed("bad date"));
    }

    Ok(date)
}
