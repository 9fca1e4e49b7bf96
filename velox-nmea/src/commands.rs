//! PMTK configuration commands for MediaTek based receivers
//!
//! Commands are sent once at startup: an optional cold restart followed by
//! the output-sentence selection.

use core::fmt::Write;

use heapless::String;

use crate::checksum;

/// Full cold restart, discarding almanac and time
pub const COLD_RESTART: &str = "$PMTK104*37\r\n";

/// Longest command this module builds, terminator included
pub const MAX_COMMAND_LEN: usize = 64;

/// Number of rate fields in a `PMTK314` command
pub const OUTPUT_FIELDS: usize = 19;

/// Which NMEA sentences the receiver should emit
///
/// Field positions in `PMTK314`: 0 GLL, 1 RMC, 2 VTG, 3 GGA, 4 GSA, 5 GSV.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OutputMask {
    pub gll: bool,
    pub rmc: bool,
    pub vtg: bool,
    pub gga: bool,
    pub gsa: bool,
    pub gsv: bool,
}

impl OutputMask {
    /// Everything the display decodes
    pub const DECODED: Self = Self {
        gll: false,
        rmc: true,
        vtg: true,
        gga: true,
        gsa: false,
        gsv: false,
    };

    /// Per-field output rates, 1 for every fix and 0 for off
    pub fn rates(&self) -> [u8; OUTPUT_FIELDS] {
        let mut rates = [0u8; OUTPUT_FIELDS];
        let enabled = [self.gll, self.rmc, self.vtg, self.gga, self.gsa, self.gsv];
        for (rate, on) in rates.iter_mut().zip(enabled) {
            *rate = on as u8;
        }
        rates
    }

    /// Build the `$PMTK314,...*CS\r\n` command for this mask
    pub fn command(&self) -> String<MAX_COMMAND_LEN> {
        let mut body: String<MAX_COMMAND_LEN> = String::new();
        // 7 + 2 * OUTPUT_FIELDS bytes, always within capacity
        let _ = body.push_str("PMTK314");
        for rate in self.rates() {
            let _ = write!(body, ",{}", rate);
        }

        let mut command = String::new();
        let _ = write!(
            command,
            "${}*{:02X}\r\n",
            body,
            checksum::compute(&body)
        );
        command
    }
}
