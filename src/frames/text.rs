use crate::core::io::BufStream;
use crate::core::string::{self, Encoding};
use crate::err::{ParseError, ParseResult};
use crate::frames::encoding;
use crate::tag::Version;
use indexmap::IndexMap;
use std::fmt::{self, Display, Formatter};

/// A text information frame.
///
/// ID3v2.4 allows several values separated by NUL terminators; older versions
/// carry a single value, with any zero padding some taggers append stripped.
#[derive(Clone, Debug)]
pub struct TextFrame {
    pub encoding: Encoding,
    pub values: Vec<String>,
}

impl TextFrame {
    pub(crate) fn parse(version: Version, stream: &mut BufStream) -> ParseResult<Self> {
        let encoding = encoding::parse(stream)?;

        let values = if version == Version::V24 {
            string::read_sequence(encoding, stream)
        } else {
            vec![string::read(encoding, stream)
                .trim_end_matches('\0')
                .to_string()]
        };

        Ok(Self { encoding, values })
    }

    /// The first value of this frame, which for most tags is the only one.
    pub fn text(&self) -> &str {
        self.values.first().map(String::as_str).unwrap_or("")
    }
}

impl Display for TextFrame {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        fmt_list(&self.values, f)
    }
}

/// A user-defined text frame, carrying a description alongside its value.
#[derive(Clone, Debug)]
pub struct UserTextFrame {
    pub encoding: Encoding,
    pub desc: String,
    pub text: String,
}

impl UserTextFrame {
    pub(crate) fn parse(stream: &mut BufStream) -> ParseResult<Self> {
        let encoding = encoding::parse(stream)?;
        let desc = string::read_terminated(encoding, stream)?;
        let text = string::read(encoding, stream);

        Ok(Self {
            encoding,
            desc,
            text,
        })
    }
}

impl Display for UserTextFrame {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write![f, "{}", self.text]
    }
}

/// An involved-people or musician-credits frame: an ordered list of pairs
/// mapping a role to the people who filled it.
#[derive(Clone, Debug)]
pub struct CreditsFrame {
    pub encoding: Encoding,
    pub people: IndexMap<String, String>,
}

impl CreditsFrame {
    pub(crate) fn parse(stream: &mut BufStream) -> ParseResult<Self> {
        let encoding = encoding::parse(stream)?;
        let mut people = IndexMap::new();

        while !stream.is_empty() {
            // Roles must always have their people attached, so a role that runs
            // to the end of the body without a terminator has no pair.
            let role = string::read_terminated(encoding, stream)
                .map_err(|_| ParseError::Malformed("unpaired involvement"))?;

            if stream.is_empty() {
                if role.is_empty() {
                    // Not a lone role, just zero padding at the end of the body.
                    break;
                }

                return Err(ParseError::Malformed("unpaired involvement"));
            }

            let role_people = match string::read_terminated(encoding, stream) {
                Ok(string) => string,
                Err(_) => string::read(encoding, stream),
            };

            people.insert(role, role_people);
        }

        Ok(Self { encoding, people })
    }
}

impl Display for CreditsFrame {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        for (i, (role, people)) in self.people.iter().enumerate() {
            if i > 0 {
                writeln![f]?;
            }

            write![f, "{}: {}", role, people]?;
        }

        Ok(())
    }
}

fn fmt_list<D: Display>(text: &[D], f: &mut Formatter) -> fmt::Result {
    for (i, string) in text.iter().enumerate() {
        if i > 0 {
            write![f, ", "]?;
        }

        write![f, "{}", string]?;
    }

    Ok(())
}
