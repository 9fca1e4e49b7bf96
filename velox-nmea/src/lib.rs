//! NMEA 0183 sentence handling for the Velox GPS display
//!
//! This crate turns the raw byte stream of a GPS receiver into decoded
//! sentences. Only the three sentence types the display consumes are
//! decoded: RMC, VTG and GGA.
//!
//! # Sentence Overview
//!
//! ```text
//! $GNRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*74\r\n
//! │└┬┘└┬┘└──────────────────── fields ───────────────────────────┘└┬┘└─┬┘
//! │ │  └ type                                                      │   └ terminator
//! │ └ talker                                                checksum
//! └ start
//! ```
//!
//! The talker ID is ignored when classifying, so `$GPRMC`, `$GNRMC` and
//! `$GLRMC` all decode as RMC.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod checksum;
pub mod commands;
pub mod framer;
pub mod sentence;
pub mod source;

pub use checksum::ChecksumStatus;
pub use commands::{OutputMask, COLD_RESTART};
pub use framer::{FrameError, FrameResult, RawSentence, SentenceFramer, DEFAULT_CAPACITY};
pub use sentence::{
    parse, ChecksumPolicy, Fields, Gga, ParseError, Parsed, Rmc, Sentence, SentenceKind, Vtg,
};
pub use source::{ByteSource, ChunkSource};
