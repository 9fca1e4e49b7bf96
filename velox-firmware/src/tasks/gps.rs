//! GPS receive task
//!
//! Configures the receiver, then frames and decodes NMEA sentences from the
//! UART into the shared fix record.

use defmt::*;
use embassy_rp::uart::{BufferedUartRx, BufferedUartTx};
use embassy_time::{Instant, Timer};
use embedded_io_async::{Read, Write};

use velox_core::config::GpsConfig;
use velox_core::fix::{parse_into, ParseResult};
use velox_nmea::{ChecksumPolicy, ChunkSource, FrameResult, SentenceFramer, COLD_RESTART};

use crate::channels::FIX;

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

/// Time the receiver needs to come back after a cold restart
const RESTART_SETTLE_MS: u64 = 1000;

/// GPS task - owns the UART and the sentence framer
#[embassy_executor::task]
pub async fn gps_task(mut tx: BufferedUartTx, mut rx: BufferedUartRx, config: GpsConfig) {
    info!("GPS task started");

    configure_receiver(&mut tx, &config).await;

    let policy = config.checksum_policy();
    let mut framer: SentenceFramer = SentenceFramer::new();
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                trace!("RX: {} bytes", n);

                // Drain every complete sentence in this chunk
                let mut source = ChunkSource::new(&buf[..n]);
                loop {
                    match framer.next_sentence(&mut source) {
                        Ok(FrameResult::Sentence(raw)) => {
                            apply_sentence(raw.as_str(), policy).await;
                        }
                        Ok(FrameResult::Overflow) => {
                            warn!("Sentence too long, discarded");
                        }
                        Ok(FrameResult::WouldBlock) | Err(_) => break,
                    }
                }
            }
            Ok(_) => {
                // No bytes read, continue
            }
            Err(e) => {
                warn!("UART read error: {:?}", e);
            }
        }
    }
}

/// Send the startup PMTK commands
async fn configure_receiver(tx: &mut BufferedUartTx, config: &GpsConfig) {
    if config.cold_restart {
        match tx.write_all(COLD_RESTART.as_bytes()).await {
            Ok(()) => {
                info!("Cold restart sent");
                Timer::after_millis(RESTART_SETTLE_MS).await;
            }
            Err(e) => warn!("Cold restart write failed: {:?}", e),
        }
    }

    let command = config.output.mask().command();
    match tx.write_all(command.as_bytes()).await {
        Ok(()) => info!("Output selection sent: {}", command.trim_end()),
        Err(e) => warn!("Output selection write failed: {:?}", e),
    }
}

/// Merge one framed sentence into the fix record
async fn apply_sentence(raw: &str, policy: ChecksumPolicy) {
    let now_ms = Instant::now().as_millis();

    // Hold the lock for the whole multi-field write
    let result = {
        let mut fix = FIX.lock().await;
        parse_into(raw, &mut fix, policy, now_ms)
    };

    match result {
        ParseResult::Updated(kind) => trace!("{} applied", kind.as_str()),
        ParseResult::Incomplete(kind) => debug!("Truncated {}: {}", kind.as_str(), raw),
        ParseResult::Ignored => trace!("Ignored: {}", raw),
        ParseResult::BadChecksum => warn!("Checksum rejected: {}", raw),
    }
}
