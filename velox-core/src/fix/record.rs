//! Latest known GPS fix
//!
//! Every field is kept as the receiver's own text. A field changes only when
//! a sentence carries a non-empty token for it; missing, empty or over-long
//! tokens leave the previous value in place.

use heapless::String;
use velox_nmea::{Parsed, Sentence, SentenceKind};

/// Field capacities in bytes
pub const TIME_LEN: usize = 12;
pub const LATITUDE_LEN: usize = 12;
pub const LONGITUDE_LEN: usize = 13;
pub const SPEED_LEN: usize = 8;
pub const COURSE_LEN: usize = 8;
pub const QUALITY_LEN: usize = 2;
pub const SATELLITES_LEN: usize = 3;
pub const SENTENCE_ID_LEN: usize = 6;

/// Hemisphere indicator of a coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Hemisphere {
    North,
    South,
    East,
    West,
}

impl Hemisphere {
    /// Parse a latitude indicator (`N` or `S`)
    pub fn latitude(token: &str) -> Option<Self> {
        match token {
            "N" => Some(Hemisphere::North),
            "S" => Some(Hemisphere::South),
            _ => None,
        }
    }

    /// Parse a longitude indicator (`E` or `W`)
    pub fn longitude(token: &str) -> Option<Self> {
        match token {
            "E" => Some(Hemisphere::East),
            "W" => Some(Hemisphere::West),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Hemisphere::North => "N",
            Hemisphere::South => "S",
            Hemisphere::East => "E",
            Hemisphere::West => "W",
        }
    }
}

/// RMC receiver status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FixStatus {
    /// `A`: navigation data valid
    Active,
    /// `V`: receiver warning, no valid fix
    Void,
}

impl FixStatus {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "A" => Some(FixStatus::Active),
            "V" => Some(FixStatus::Void),
            _ => None,
        }
    }
}

/// Decoded GPS state shared by the renderer and the LED animator
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FixRecord {
    time_of_fix: String<TIME_LEN>,
    latitude: String<LATITUDE_LEN>,
    lat_hemisphere: Option<Hemisphere>,
    longitude: String<LONGITUDE_LEN>,
    lon_hemisphere: Option<Hemisphere>,
    /// Knots
    ground_speed: String<SPEED_LEN>,
    /// Degrees true
    ground_course: String<COURSE_LEN>,
    fix_quality: String<QUALITY_LEN>,
    num_satellites: String<SATELLITES_LEN>,
    sentence_id: String<SENTENCE_ID_LEN>,
    status: Option<FixStatus>,
    last_rmc_ms: Option<u64>,
    last_vtg_ms: Option<u64>,
    last_gga_ms: Option<u64>,
}

impl FixRecord {
    /// An empty record, as at startup
    pub const fn new() -> Self {
        Self {
            time_of_fix: String::new(),
            latitude: String::new(),
            lat_hemisphere: None,
            longitude: String::new(),
            lon_hemisphere: None,
            ground_speed: String::new(),
            ground_course: String::new(),
            fix_quality: String::new(),
            num_satellites: String::new(),
            sentence_id: String::new(),
            status: None,
            last_rmc_ms: None,
            last_vtg_ms: None,
            last_gga_ms: None,
        }
    }

    /// Merge a decoded sentence into the record
    ///
    /// `now_ms` stamps the sentence type as seen.
    pub fn apply(&mut self, parsed: &Parsed<'_>, now_ms: u64) {
        match parsed.sentence {
            Sentence::Rmc(rmc) => {
                if let Some(status) = rmc.status.and_then(FixStatus::from_token) {
                    self.status = Some(status);
                }
                store(&mut self.ground_speed, rmc.speed_knots);
                store(&mut self.ground_course, rmc.course);
                self.last_rmc_ms = Some(now_ms);
            }
            Sentence::Vtg(vtg) => {
                store(&mut self.ground_speed, vtg.speed_knots);
                store(&mut self.ground_course, vtg.course);
                self.last_vtg_ms = Some(now_ms);
            }
            Sentence::Gga(gga) => {
                store(&mut self.time_of_fix, gga.time);
                store(&mut self.latitude, gga.latitude);
                if let Some(h) = gga.lat_hemisphere.and_then(Hemisphere::latitude) {
                    self.lat_hemisphere = Some(h);
                }
                store(&mut self.longitude, gga.longitude);
                if let Some(h) = gga.lon_hemisphere.and_then(Hemisphere::longitude) {
                    self.lon_hemisphere = Some(h);
                }
                store(&mut self.fix_quality, gga.fix_quality);
                store(&mut self.num_satellites, gga.satellites);
                self.last_gga_ms = Some(now_ms);
            }
        }
        store(&mut self.sentence_id, Some(parsed.header));
    }

    pub fn time_of_fix(&self) -> Option<&str> {
        non_empty(&self.time_of_fix)
    }

    pub fn latitude(&self) -> Option<&str> {
        non_empty(&self.latitude)
    }

    pub fn lat_hemisphere(&self) -> Option<Hemisphere> {
        self.lat_hemisphere
    }

    pub fn longitude(&self) -> Option<&str> {
        non_empty(&self.longitude)
    }

    pub fn lon_hemisphere(&self) -> Option<Hemisphere> {
        self.lon_hemisphere
    }

    /// Ground speed text in knots
    pub fn ground_speed(&self) -> Option<&str> {
        non_empty(&self.ground_speed)
    }

    /// Ground speed in knots, when the text is a finite number
    pub fn ground_speed_knots(&self) -> Option<f32> {
        self.ground_speed()
            .and_then(|s| s.parse::<f32>().ok())
            .filter(|v| v.is_finite())
    }

    pub fn ground_course(&self) -> Option<&str> {
        non_empty(&self.ground_course)
    }

    pub fn fix_quality(&self) -> Option<&str> {
        non_empty(&self.fix_quality)
    }

    pub fn num_satellites(&self) -> Option<&str> {
        non_empty(&self.num_satellites)
    }

    /// Header of the last decoded sentence
    pub fn sentence_id(&self) -> Option<&str> {
        non_empty(&self.sentence_id)
    }

    pub fn status(&self) -> Option<FixStatus> {
        self.status
    }

    /// When a sentence of `kind` was last applied
    pub fn last_update_ms(&self, kind: SentenceKind) -> Option<u64> {
        match kind {
            SentenceKind::Rmc => self.last_rmc_ms,
            SentenceKind::Vtg => self.last_vtg_ms,
            SentenceKind::Gga => self.last_gga_ms,
        }
    }

    /// Most recent update of any kind
    pub fn newest_update_ms(&self) -> Option<u64> {
        [self.last_rmc_ms, self.last_vtg_ms, self.last_gga_ms]
            .into_iter()
            .flatten()
            .max()
    }
}

/// Replace `field` with `token` if it is present and fits
fn store<const N: usize>(field: &mut String<N>, token: Option<&str>) {
    if let Some(value) = token.and_then(|t| String::try_from(t).ok()) {
        *field = value;
    }
}

fn non_empty<const N: usize>(field: &String<N>) -> Option<&str> {
    if field.is_empty() {
        None
    } else {
        Some(field.as_str())
    }
}
