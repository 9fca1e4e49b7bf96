//! Tokenising and decoding of RMC, VTG and GGA sentences
//!
//! Decoded sentences borrow their fields from the raw text. Every field is
//! `None` when its token is absent or empty, so a truncated sentence decodes
//! to whatever prefix it carries.

use heapless::Vec;

use crate::checksum::{self, ChecksumStatus};

/// Maximum number of comma separated tokens kept, header included
pub const MAX_FIELDS: usize = 20;

/// Sentence types the display consumes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SentenceKind {
    /// Recommended minimum navigation data
    Rmc,
    /// Course and speed over ground
    Vtg,
    /// Fix data
    Gga,
}

impl SentenceKind {
    /// Classify a header such as `GNRMC` or `$GPGGA`
    ///
    /// Matches the three-letter type after any two-letter talker ID.
    pub fn from_header(header: &str) -> Option<Self> {
        let header = header.strip_prefix('$').unwrap_or(header);
        if header.len() != 5 || !header.is_ascii() {
            return None;
        }
        match &header[2..] {
            "RMC" => Some(SentenceKind::Rmc),
            "VTG" => Some(SentenceKind::Vtg),
            "GGA" => Some(SentenceKind::Gga),
            _ => None,
        }
    }

    /// Highest token index this sentence type is read from
    pub const fn last_field(self) -> usize {
        match self {
            SentenceKind::Rmc => 8,
            SentenceKind::Vtg => 6,
            SentenceKind::Gga => 7,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            SentenceKind::Rmc => "RMC",
            SentenceKind::Vtg => "VTG",
            SentenceKind::Gga => "GGA",
        }
    }
}

/// Reasons a sentence is not decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Text does not start with `$`
    NotASentence,
    /// Header is not RMC, VTG or GGA
    Unsupported,
    /// Checksum suffix present but wrong or malformed
    BadChecksum,
    /// Checksum required but absent
    MissingChecksum,
}

/// How strictly to treat the `*XX` suffix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChecksumPolicy {
    /// Verify when present, accept when absent
    #[default]
    IfPresent,
    /// Reject sentences without a checksum
    Required,
}

/// Comma separated tokens of one sentence, header first, checksum stripped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fields<'a> {
    tokens: Vec<&'a str, MAX_FIELDS>,
}

impl<'a> Fields<'a> {
    /// Tokenise a sentence body; tokens past [`MAX_FIELDS`] are dropped
    pub fn split(body: &'a str) -> Self {
        let mut tokens = Vec::new();
        for token in body.split(',') {
            if tokens.push(token).is_err() {
                break;
            }
        }
        Self { tokens }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn header(&self) -> &'a str {
        self.tokens.first().copied().unwrap_or("")
    }

    /// Token at `index` when present and non-empty
    pub fn get(&self, index: usize) -> Option<&'a str> {
        self.tokens
            .get(index)
            .copied()
            .filter(|token| !token.is_empty())
    }
}

/// RMC fields used by the display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rmc<'a> {
    /// `A` active, `V` void
    pub status: Option<&'a str>,
    pub speed_knots: Option<&'a str>,
    pub course: Option<&'a str>,
}

/// VTG fields used by the display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Vtg<'a> {
    pub course: Option<&'a str>,
    pub speed_knots: Option<&'a str>,
}

/// GGA fields used by the display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Gga<'a> {
    pub time: Option<&'a str>,
    pub latitude: Option<&'a str>,
    pub lat_hemisphere: Option<&'a str>,
    pub longitude: Option<&'a str>,
    pub lon_hemisphere: Option<&'a str>,
    pub fix_quality: Option<&'a str>,
    pub satellites: Option<&'a str>,
}

/// A decoded sentence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Sentence<'a> {
    Rmc(Rmc<'a>),
    Vtg(Vtg<'a>),
    Gga(Gga<'a>),
}

impl Sentence<'_> {
    pub fn kind(&self) -> SentenceKind {
        match self {
            Sentence::Rmc(_) => SentenceKind::Rmc,
            Sentence::Vtg(_) => SentenceKind::Vtg,
            Sentence::Gga(_) => SentenceKind::Gga,
        }
    }
}

/// Decoding result with the header that produced it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Parsed<'a> {
    /// Header without `$`, e.g. `GNRMC`
    pub header: &'a str,
    pub sentence: Sentence<'a>,
    /// False when the sentence stopped before its last mapped token
    pub complete: bool,
}

/// Decode one framed sentence
pub fn parse(raw: &str, policy: ChecksumPolicy) -> Result<Parsed<'_>, ParseError> {
    if !raw.starts_with('$') {
        return Err(ParseError::NotASentence);
    }

    match checksum::verify(raw) {
        ChecksumStatus::Valid => {}
        ChecksumStatus::Missing => {
            if policy == ChecksumPolicy::Required {
                return Err(ParseError::MissingChecksum);
            }
        }
        ChecksumStatus::Malformed | ChecksumStatus::Mismatch { .. } => {
            return Err(ParseError::BadChecksum);
        }
    }

    let (body, _) = checksum::split(raw);
    let fields = Fields::split(body);
    let header = fields.header();
    let kind = SentenceKind::from_header(header).ok_or(ParseError::Unsupported)?;

    let sentence = match kind {
        SentenceKind::Rmc => Sentence::Rmc(Rmc {
            status: fields.get(2),
            speed_knots: fields.get(7).filter(|t| is_decimal(t)),
            course: fields.get(8),
        }),
        SentenceKind::Vtg => Sentence::Vtg(Vtg {
            course: fields.get(1),
            speed_knots: vtg_speed(&fields),
        }),
        SentenceKind::Gga => Sentence::Gga(Gga {
            time: fields.get(1),
            latitude: fields.get(2),
            lat_hemisphere: fields.get(3),
            longitude: fields.get(4),
            lon_hemisphere: fields.get(5),
            fix_quality: fields.get(6),
            satellites: fields.get(7),
        }),
    };

    Ok(Parsed {
        header,
        sentence,
        complete: fields.len() > kind.last_field(),
    })
}

/// VTG speed in knots
///
/// Token 6 carries the speed in the unlabelled legacy layout; in NMEA 2.3+
/// it is the `N` unit tag and the knots value sits in token 5.
fn vtg_speed<'a>(fields: &Fields<'a>) -> Option<&'a str> {
    match fields.get(6) {
        Some("N") => fields.get(5).filter(|t| is_decimal(t)),
        Some(token) if is_decimal(token) => Some(token),
        _ => None,
    }
}

fn is_decimal(token: &str) -> bool {
    let mut digits = 0;
    let mut dots = 0;
    for b in token.bytes() {
        match b {
            b'0'..=b'9' => digits += 1,
            b'.' => dots += 1,
            _ => return false,
        }
    }
    digits > 0 && dots <= 1
}
