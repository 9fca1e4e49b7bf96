//! Velox - Handheld GPS Display Firmware
//!
//! Main firmware binary for RP2350-based GPS displays.
//! Reads NMEA sentences from a receiver on UART0, shows speed, position and
//! time on an ILI9341 panel, and breathes two status LEDs in step with speed.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::block::ImageDef;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::peripherals::UART0;
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_rp::spi::{Config as SpiConfig, Spi};
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use embassy_time::{Delay, Timer};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use velox_core::config::{parse_config, DeviceConfig};
use velox_core::fix::FixMonitor;
use velox_core::page::{Button, PageSelector};

use crate::ili9341::Ili9341;
use crate::pwm::{PwmLeds, PWM_TOP};

mod channels;
mod ili9341;
mod pwm;
mod tasks;

/// Tell the boot ROM about our application
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = ImageDef::secure_exe();

/// Embedded configuration (compiled into firmware)
/// Edit device.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../device.toml");

/// Panel SPI clock
const SPI_FREQUENCY_HZ: u32 = 10_000_000;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 64]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Velox firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = load_config();

    // GPS receiver on UART0 (TX=GPIO0, RX=GPIO1)
    let uart_config = {
        let mut cfg = UartConfig::default();
        cfg.baudrate = config.gps.baud_rate;
        cfg
    };

    let tx_buf = TX_BUF.init([0u8; 64]);
    let rx_buf = RX_BUF.init([0u8; 256]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();

    info!("UART initialized at {} baud", config.gps.baud_rate);

    // ILI9341 panel on SPI0 (SCK=GPIO18, MOSI=GPIO19, CS=GPIO17, DC=GPIO20, RST=GPIO21)
    let mut spi_config = SpiConfig::default();
    spi_config.frequency = SPI_FREQUENCY_HZ;
    let spi = Spi::new_blocking_txonly(p.SPI0, p.PIN_18, p.PIN_19, spi_config);

    let cs = Output::new(p.PIN_17, Level::High);
    let dc = Output::new(p.PIN_20, Level::Low);
    let rst = Output::new(p.PIN_21, Level::High);

    let mut panel = Ili9341::new(spi, dc, cs, rst);
    match panel.init(&mut Delay) {
        Ok(()) => info!("Panel initialized"),
        // Keep running: the LEDs still show speed
        Err(e) => error!("Panel init failed: {:?}", e),
    }

    // Status LEDs on PWM slice 7 (A=GPIO14, B=GPIO15)
    let pwm = Pwm::new_output_ab(p.PWM_SLICE7, p.PIN_14, p.PIN_15, PwmConfig::default());
    let leds = PwmLeds::new(pwm, PWM_TOP);

    info!("PWM LEDs initialized");

    // Page buttons, active low (next=GPIO26, previous=GPIO22)
    let next = Input::new(p.PIN_26, Pull::Up);
    let previous = Input::new(p.PIN_22, Pull::Up);

    info!("Buttons initialized");

    let selector = PageSelector::from_config(&config.display, &config.buttons);
    let monitor = FixMonitor::new(config.gps.stale_after_ms as u64);

    // Spawn tasks
    spawner
        .spawn(tasks::gps_task(tx, rx, config.gps.clone()))
        .unwrap();
    spawner.spawn(tasks::page_task(selector)).unwrap();
    spawner.spawn(tasks::button_task(next, Button::Next)).unwrap();
    spawner
        .spawn(tasks::button_task(previous, Button::Previous))
        .unwrap();
    spawner
        .spawn(tasks::render_task(panel, config.display.clone(), monitor))
        .unwrap();
    spawner
        .spawn(tasks::led_task(leds, config.leds.clone()))
        .unwrap();

    info!("All tasks spawned, firmware running");

    loop {
        Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}

/// Parse the embedded device.toml, falling back to defaults
fn load_config() -> DeviceConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Configuration loaded");
            config
        }
        Err(e) => {
            error!("Invalid device.toml ({:?}), using defaults", e);
            DeviceConfig::default()
        }
    }
}
