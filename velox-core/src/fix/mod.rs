//! GPS fix state
//!
//! Decoded sentences are merged into a [`FixRecord`]; [`FixMonitor`]
//! classifies how trustworthy the record currently is.

pub mod monitor;
pub mod record;

pub use monitor::{FixHealth, FixMonitor, STALE_AFTER_MS};
pub use record::{FixRecord, FixStatus, Hemisphere};

use velox_nmea::{ChecksumPolicy, ParseError, SentenceKind};

/// Outcome of feeding one raw sentence into the fix record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseResult {
    /// All mapped fields were present
    Updated(SentenceKind),
    /// Sentence stopped early; present fields were applied
    Incomplete(SentenceKind),
    /// Not a sentence type the display uses; record untouched
    Ignored,
    /// Checksum wrong or required and missing; record untouched
    BadChecksum,
}

/// Decode `raw` and merge it into `fix`
pub fn parse_into(
    raw: &str,
    fix: &mut FixRecord,
    policy: ChecksumPolicy,
    now_ms: u64,
) -> ParseResult {
    match velox_nmea::parse(raw, policy) {
        Ok(parsed) => {
            fix.apply(&parsed, now_ms);
            let kind = parsed.sentence.kind();
            if parsed.complete {
                ParseResult::Updated(kind)
            } else {
                ParseResult::Incomplete(kind)
            }
        }
        Err(ParseError::NotASentence) | Err(ParseError::Unsupported) => ParseResult::Ignored,
        Err(ParseError::BadChecksum) | Err(ParseError::MissingChecksum) => {
            ParseResult::BadChecksum
        }
    }
}
