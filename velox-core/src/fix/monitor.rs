//! Fix health monitor
//!
//! Decides whether the fix record is worth showing as live data.

use velox_nmea::SentenceKind;

use super::record::{FixRecord, FixStatus};

/// Default time without any decoded sentence before the fix is stale
pub const STALE_AFTER_MS: u64 = 5000;

/// Health of the fix record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FixHealth {
    /// Nothing decoded since startup
    Waiting,
    /// Receiver reports no position solution
    NoFix,
    /// No sentence decoded within the stale window
    Stale,
    /// Live data
    Ok,
}

/// Stale-fix detection
#[derive(Debug, Clone)]
pub struct FixMonitor {
    stale_after_ms: u64,
}

impl Default for FixMonitor {
    fn default() -> Self {
        Self::new(STALE_AFTER_MS)
    }
}

impl FixMonitor {
    pub const fn new(stale_after_ms: u64) -> Self {
        Self { stale_after_ms }
    }

    /// Classify `fix` at time `now_ms`
    ///
    /// Staleness wins over the receiver's own fix flags. When both RMC and
    /// GGA carry a fix indicator the more recent sentence decides.
    pub fn check(&self, fix: &FixRecord, now_ms: u64) -> FixHealth {
        let Some(newest) = fix.newest_update_ms() else {
            return FixHealth::Waiting;
        };

        if now_ms.saturating_sub(newest) > self.stale_after_ms {
            return FixHealth::Stale;
        }

        let rmc = fix
            .status()
            .map(|s| s == FixStatus::Active)
            .zip(fix.last_update_ms(SentenceKind::Rmc));
        let gga = fix
            .fix_quality()
            .map(|q| q != "0")
            .zip(fix.last_update_ms(SentenceKind::Gga));

        let has_fix = match (rmc, gga) {
            (Some((rmc_fix, rmc_ms)), Some((gga_fix, gga_ms))) => {
                if rmc_ms >= gga_ms {
                    rmc_fix
                } else {
                    gga_fix
                }
            }
            (Some((rmc_fix, _)), None) => rmc_fix,
            (None, Some((gga_fix, _))) => gga_fix,
            // Speed-only streams (VTG) carry no fix flag
            (None, None) => true,
        };

        if has_fix {
            FixHealth::Ok
        } else {
            FixHealth::NoFix
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fix::parse_into;
    use velox_nmea::ChecksumPolicy;

    fn feed(fix: &mut FixRecord, raw: &str, now_ms: u64) {
        parse_into(raw, fix, ChecksumPolicy::IfPresent, now_ms);
    }

    #[test]
    fn test_waiting_until_first_sentence() {
        let monitor = FixMonitor::default();
        let fix = FixRecord::new();
        assert_eq!(monitor.check(&fix, 0), FixHealth::Waiting);
        assert_eq!(monitor.check(&fix, 100_000), FixHealth::Waiting);
    }

    #[test]
    fn test_ok_then_stale() {
        let monitor = FixMonitor::new(5000);
        let mut fix = FixRecord::new();
        feed(&mut fix, "$GPGGA,123519,4807.038,N,01131.000,E,1,08", 1000);

        assert_eq!(monitor.check(&fix, 1000), FixHealth::Ok);
        assert_eq!(monitor.check(&fix, 6000), FixHealth::Ok);
        assert_eq!(monitor.check(&fix, 6001), FixHealth::Stale);

        feed(&mut fix, "$GPVTG,054.7,T,034.4,M,005.5,N,010.2,K", 7000);
        assert_eq!(monitor.check(&fix, 7500), FixHealth::Ok);
    }

    #[test]
    fn test_no_fix_from_quality_zero() {
        let monitor = FixMonitor::default();
        let mut fix = FixRecord::new();
        feed(&mut fix, "$GPGGA,123519,,,,,0,00", 0);
        assert_eq!(monitor.check(&fix, 10), FixHealth::NoFix);
    }

    #[test]
    fn test_newer_sentence_decides() {
        let monitor = FixMonitor::default();
        let mut fix = FixRecord::new();
        feed(&mut fix, "$GPRMC,123519,V,,,,,,,", 0);
        feed(&mut fix, "$GPGGA,123519,4807.038,N,01131.000,E,1,08", 10);
        assert_eq!(monitor.check(&fix, 20), FixHealth::Ok);

        feed(&mut fix, "$GPRMC,123520,V,,,,,,,", 30);
        assert_eq!(monitor.check(&fix, 40), FixHealth::NoFix);
    }

    #[test]
    fn test_clock_going_backwards_is_not_stale() {
        let monitor = FixMonitor::default();
        let mut fix = FixRecord::new();
        feed(&mut fix, "$GPVTG,054.7,T,034.4,M,005.5,N,010.2,K", 10_000);
        assert_eq!(monitor.check(&fix, 0), FixHealth::Ok);
    }
}
