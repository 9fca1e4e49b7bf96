//! Sentence framing for the NMEA byte stream.
//!
//! Framing rules:
//! - START: `$` begins a sentence, discarding any partial one
//! - BODY: printable ASCII, up to the framer's capacity
//! - END: `\r` or `\n`; the terminator is not part of the sentence
//!
//! The emitted sentence keeps its leading `$`, so
//! `$GPGGA,...*47\r\n` frames as `$GPGGA,...*47`.

use heapless::String;

use crate::source::ByteSource;

/// Sentence start marker
pub const SENTENCE_START: u8 = b'$';

/// Default sentence buffer capacity in bytes
pub const DEFAULT_CAPACITY: usize = 256;

/// Errors that can occur while framing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Sentence exceeded the buffer capacity and was discarded
    Overflow,
}

/// One framed sentence, `$` included, terminator excluded
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawSentence<const N: usize = DEFAULT_CAPACITY> {
    text: String<N>,
}

impl<const N: usize> RawSentence<N> {
    /// Sentence text, always printable ASCII
    pub fn as_str(&self) -> &str {
        self.text.as_str()
    }
}

/// Outcome of pulling bytes from a [`ByteSource`]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameResult<const N: usize = DEFAULT_CAPACITY> {
    /// Source ran dry before a terminator; partial state is kept
    WouldBlock,
    /// A complete sentence
    Sentence(RawSentence<N>),
    /// An over-long sentence was discarded
    Overflow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FrameState {
    /// Discarding bytes until `$`
    Hunting,
    /// Accumulating a sentence body
    Collecting,
}

/// State machine that splits a byte stream into sentences
#[derive(Debug, Clone)]
pub struct SentenceFramer<const N: usize = DEFAULT_CAPACITY> {
    state: FrameState,
    buffer: String<N>,
}

impl<const N: usize> Default for SentenceFramer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> SentenceFramer<N> {
    /// Create a framer that is hunting for `$`
    pub const fn new() -> Self {
        Self {
            state: FrameState::Hunting,
            buffer: String::new(),
        }
    }

    /// Drop any partial sentence and resume hunting
    pub fn reset(&mut self) {
        self.state = FrameState::Hunting;
        self.buffer.clear();
    }

    /// True while a sentence is partially accumulated
    pub fn is_collecting(&self) -> bool {
        self.state == FrameState::Collecting
    }

    /// Feed a single byte to the framer
    ///
    /// Returns `Ok(Some(sentence))` on a terminator, `Ok(None)` when more
    /// bytes are needed, or `Err(FrameError::Overflow)` when the sentence
    /// outgrew the buffer. After an overflow the framer is hunting again.
    pub fn feed(&mut self, byte: u8) -> Result<Option<RawSentence<N>>, FrameError> {
        match (self.state, byte) {
            (_, SENTENCE_START) => {
                self.buffer.clear();
                if self.buffer.push('$').is_err() {
                    self.reset();
                    return Err(FrameError::Overflow);
                }
                self.state = FrameState::Collecting;
                Ok(None)
            }
            (FrameState::Hunting, _) => Ok(None),
            (FrameState::Collecting, b'\r' | b'\n') => {
                let text = core::mem::take(&mut self.buffer);
                self.state = FrameState::Hunting;
                Ok(Some(RawSentence { text }))
            }
            (FrameState::Collecting, 0x20..=0x7E) => {
                if self.buffer.push(byte as char).is_err() {
                    self.reset();
                    return Err(FrameError::Overflow);
                }
                Ok(None)
            }
            // Line noise inside a sentence
            (FrameState::Collecting, _) => {
                self.reset();
                Ok(None)
            }
        }
    }

    /// Pull bytes until a sentence completes or the source runs dry
    ///
    /// Never waits: when `is_data_available` is false the call returns
    /// `FrameResult::WouldBlock` and keeps any partial sentence for the
    /// next call.
    pub fn next_sentence<S: ByteSource>(
        &mut self,
        source: &mut S,
    ) -> Result<FrameResult<N>, S::Error> {
        while source.is_data_available() {
            let byte = source.read_byte()?;
            match self.feed(byte) {
                Ok(Some(sentence)) => return Ok(FrameResult::Sentence(sentence)),
                Ok(None) => {}
                Err(FrameError::Overflow) => return Ok(FrameResult::Overflow),
            }
        }
        Ok(FrameResult::WouldBlock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::ChunkSource;
    use proptest::prelude::*;

    const GGA: &str = "$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47";

    fn collect<const N: usize>(
        framer: &mut SentenceFramer<N>,
        bytes: &[u8],
    ) -> std::vec::Vec<FrameResult<N>> {
        let mut src = ChunkSource::new(bytes);
        let mut out = std::vec::Vec::new();
        loop {
            match framer.next_sentence(&mut src).unwrap() {
                FrameResult::WouldBlock => return out,
                other => out.push(other),
            }
        }
    }

    #[test]
    fn test_frame_single_sentence() {
        let mut framer: SentenceFramer = SentenceFramer::new();
        let mut src = ChunkSource::new(b"$GPGGA,123519*00\r\n");

        match framer.next_sentence(&mut src).unwrap() {
            FrameResult::Sentence(s) => assert_eq!(s.as_str(), "$GPGGA,123519*00"),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(
            framer.next_sentence(&mut src).unwrap(),
            FrameResult::WouldBlock
        );
    }

    #[test]
    fn test_frame_discards_bytes_before_start() {
        let mut framer: SentenceFramer = SentenceFramer::new();
        let results = collect(&mut framer, b"GA,1,2*33\r\n$GPVTG,1\r\n");

        assert_eq!(results.len(), 1);
        assert!(matches!(&results[0], FrameResult::Sentence(s) if s.as_str() == "$GPVTG,1"));
    }

    #[test]
    fn test_frame_split_across_chunks() {
        let mut framer: SentenceFramer = SentenceFramer::new();
        let (head, tail) = GGA.as_bytes().split_at(20);

        assert!(collect(&mut framer, head).is_empty());
        assert!(framer.is_collecting());

        let mut rest = std::vec::Vec::from(tail);
        rest.extend_from_slice(b"\r\n");
        let results = collect(&mut framer, &rest);
        assert!(matches!(&results[..], [FrameResult::Sentence(s)] if s.as_str() == GGA));
    }

    #[test]
    fn test_frame_restart_on_dollar() {
        let mut framer: SentenceFramer = SentenceFramer::new();
        let results = collect(&mut framer, b"$GPRMC,12$GPVTG,054.7\n");

        assert_eq!(results.len(), 1);
        assert!(matches!(&results[0], FrameResult::Sentence(s) if s.as_str() == "$GPVTG,054.7"));
    }

    #[test]
    fn test_frame_crlf_yields_one_sentence() {
        let mut framer: SentenceFramer = SentenceFramer::new();
        let results = collect(&mut framer, b"$A\r\n\r\n\n$B\r\n");

        assert_eq!(results.len(), 2);
    }

    #[test]
    fn test_frame_overflow_then_resume() {
        let mut framer: SentenceFramer<8> = SentenceFramer::new();
        let results = collect(&mut framer, b"$GPGGA,123519,4807\r\n$GPVTG\r\n");

        assert_eq!(results.len(), 2);
        assert_eq!(results[0], FrameResult::Overflow);
        assert!(matches!(&results[1], FrameResult::Sentence(s) if s.as_str() == "$GPVTG"));
    }

    #[test]
    fn test_frame_exact_capacity_fits() {
        let mut framer: SentenceFramer<6> = SentenceFramer::new();
        let results = collect(&mut framer, b"$GPVTG\n");

        assert!(matches!(&results[..], [FrameResult::Sentence(s)] if s.as_str() == "$GPVTG"));
    }

    #[test]
    fn test_frame_noise_drops_partial() {
        let mut framer: SentenceFramer = SentenceFramer::new();
        let results = collect(&mut framer, b"$GPRMC,1\x00\xff,2\r\n$GPGGA\r\n");

        assert_eq!(results.len(), 1);
        assert!(matches!(&results[0], FrameResult::Sentence(s) if s.as_str() == "$GPGGA"));
    }

    #[test]
    fn test_feed_reports_overflow_once() {
        let mut framer: SentenceFramer<4> = SentenceFramer::new();
        let mut errors = 0;
        for &b in b"$ABCDEFGH" {
            if framer.feed(b).is_err() {
                errors += 1;
            }
        }
        assert_eq!(errors, 1);
        assert!(!framer.is_collecting());
    }

    proptest! {
        #[test]
        fn prop_back_to_back_sentences_all_framed(
            bodies in proptest::collection::vec("[A-Z0-9,.*-]{0,80}", 0..10),
            crlf in any::<bool>(),
        ) {
            let terminator: &[u8] = if crlf { b"\r\n" } else { b"\n" };
            let mut stream = std::vec::Vec::new();
            for body in &bodies {
                stream.push(b'$');
                stream.extend_from_slice(body.as_bytes());
                stream.extend_from_slice(terminator);
            }

            let mut framer: SentenceFramer = SentenceFramer::new();
            let results = collect(&mut framer, &stream);

            prop_assert_eq!(results.len(), bodies.len());
            for (result, body) in results.iter().zip(&bodies) {
                match result {
                    FrameResult::Sentence(s) => {
                        prop_assert_eq!(&s.as_str()[1..], body.as_str());
                    }
                    other => prop_assert!(false, "unexpected {:?}", other),
                }
            }
        }

        #[test]
        fn prop_arbitrary_bytes_never_exceed_capacity(bytes in proptest::collection::vec(any::<u8>(), 0..512)) {
            let mut framer: SentenceFramer<32> = SentenceFramer::new();
            for result in collect(&mut framer, &bytes) {
                if let FrameResult::Sentence(s) = result {
                    prop_assert!(s.as_str().len() <= 32);
                    prop_assert!(s.as_str().starts_with('$'));
                    prop_assert!(s.as_str().bytes().all(|b| (0x20..=0x7E).contains(&b)));
                }
            }
        }
    }
}
