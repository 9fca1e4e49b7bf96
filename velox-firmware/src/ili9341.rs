//! ILI9341 TFT panel driver
//!
//! Driver for 240x320 ILI9341 panels on a 4-wire SPI bus (SCK, MOSI, CS, D/C)
//! with a hardware reset line. Pixels are RGB565, sent MSB first.
//! Implements `DrawTarget` so the page renderer can draw straight to the panel.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

/// Panel dimensions (portrait)
pub const WIDTH: u16 = 240;
pub const HEIGHT: u16 = 320;

/// Pixels per SPI write when streaming a solid fill
const CHUNK_PIXELS: usize = 64;

/// ILI9341 commands
mod cmd {
    pub const SOFTWARE_RESET: u8 = 0x01;
    pub const SLEEP_OUT: u8 = 0x11;
    pub const DISPLAY_ON: u8 = 0x29;
    pub const COLUMN_ADDRESS_SET: u8 = 0x2A;
    pub const PAGE_ADDRESS_SET: u8 = 0x2B;
    pub const MEMORY_WRITE: u8 = 0x2C;
    pub const MEMORY_ACCESS_CONTROL: u8 = 0x36;
    pub const PIXEL_FORMAT_SET: u8 = 0x3A;
}

/// 16 bits per pixel
const PIXEL_FORMAT_RGB565: u8 = 0x55;
/// Mirror X, RGB order
const MADCTL_PORTRAIT: u8 = 0x48;

/// Panel errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PanelError {
    /// SPI transfer failed
    Bus,
    /// Control pin could not be driven
    Pin,
}

/// ILI9341 driver
pub struct Ili9341<SPI, DC, CS, RST> {
    spi: SPI,
    dc: DC,
    cs: CS,
    rst: RST,
}

impl<SPI, DC, CS, RST> Ili9341<SPI, DC, CS, RST>
where
    SPI: SpiBus,
    DC: OutputPin,
    CS: OutputPin,
    RST: OutputPin,
{
    pub fn new(spi: SPI, dc: DC, cs: CS, rst: RST) -> Self {
        Self { spi, dc, cs, rst }
    }

    /// Reset and configure the panel
    pub fn init<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), PanelError> {
        self.cs.set_high().map_err(|_| PanelError::Pin)?;

        // Hardware reset pulse
        self.rst.set_low().map_err(|_| PanelError::Pin)?;
        delay.delay_ms(50);
        self.rst.set_high().map_err(|_| PanelError::Pin)?;
        delay.delay_ms(120);

        self.command(cmd::SOFTWARE_RESET, &[])?;
        delay.delay_ms(120);
        self.command(cmd::SLEEP_OUT, &[])?;
        delay.delay_ms(120);

        self.command(cmd::PIXEL_FORMAT_SET, &[PIXEL_FORMAT_RGB565])?;
        self.command(cmd::MEMORY_ACCESS_CONTROL, &[MADCTL_PORTRAIT])?;
        self.command(cmd::DISPLAY_ON, &[])?;
        delay.delay_ms(20);

        Ok(())
    }

    /// Send a command byte followed by its parameters
    fn command(&mut self, command: u8, params: &[u8]) -> Result<(), PanelError> {
        self.cs.set_low().map_err(|_| PanelError::Pin)?;
        let result = self.write_command(command, params);
        self.cs.set_high().map_err(|_| PanelError::Pin)?;
        result
    }

    fn write_command(&mut self, command: u8, params: &[u8]) -> Result<(), PanelError> {
        self.dc.set_low().map_err(|_| PanelError::Pin)?;
        self.spi.write(&[command]).map_err(|_| PanelError::Bus)?;
        self.spi.flush().map_err(|_| PanelError::Bus)?;

        if !params.is_empty() {
            self.dc.set_high().map_err(|_| PanelError::Pin)?;
            self.spi.write(params).map_err(|_| PanelError::Bus)?;
            self.spi.flush().map_err(|_| PanelError::Bus)?;
        }
        Ok(())
    }

    /// Select the inclusive window `(x0, y0)..=(x1, y1)` and start a memory write
    fn set_window(&mut self, x0: u16, y0: u16, x1: u16, y1: u16) -> Result<(), PanelError> {
        let [x0h, x0l] = x0.to_be_bytes();
        let [x1h, x1l] = x1.to_be_bytes();
        let [y0h, y0l] = y0.to_be_bytes();
        let [y1h, y1l] = y1.to_be_bytes();

        self.command(cmd::COLUMN_ADDRESS_SET, &[x0h, x0l, x1h, x1l])?;
        self.command(cmd::PAGE_ADDRESS_SET, &[y0h, y0l, y1h, y1l])?;
        self.command(cmd::MEMORY_WRITE, &[])
    }

    /// Stream `count` pixels of one colour into the current window
    fn write_repeated(&mut self, color: Rgb565, count: u32) -> Result<(), PanelError> {
        let [hi, lo] = color.into_storage().to_be_bytes();
        let mut chunk = [0u8; CHUNK_PIXELS * 2];
        for pair in chunk.chunks_exact_mut(2) {
            pair[0] = hi;
            pair[1] = lo;
        }

        self.cs.set_low().map_err(|_| PanelError::Pin)?;
        self.dc.set_high().map_err(|_| PanelError::Pin)?;

        let mut remaining = count as usize;
        let mut result = Ok(());
        while remaining > 0 {
            let n = remaining.min(CHUNK_PIXELS);
            if self.spi.write(&chunk[..n * 2]).is_err() {
                result = Err(PanelError::Bus);
                break;
            }
            remaining -= n;
        }
        if result.is_ok() {
            result = self.spi.flush().map_err(|_| PanelError::Bus);
        }

        self.cs.set_high().map_err(|_| PanelError::Pin)?;
        result
    }
}

impl<SPI, DC, CS, RST> OriginDimensions for Ili9341<SPI, DC, CS, RST> {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

impl<SPI, DC, CS, RST> DrawTarget for Ili9341<SPI, DC, CS, RST>
where
    SPI: SpiBus,
    DC: OutputPin,
    CS: OutputPin,
    RST: OutputPin,
{
    type Color = Rgb565;
    type Error = PanelError;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let bounds = self.bounding_box();
        for Pixel(point, color) in pixels {
            if !bounds.contains(point) {
                continue;
            }
            let (x, y) = (point.x as u16, point.y as u16);
            self.set_window(x, y, x, y)?;
            self.write_repeated(color, 1)?;
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let area = area.intersection(&self.bounding_box());
        let Some(bottom_right) = area.bottom_right() else {
            return Ok(());
        };

        self.set_window(
            area.top_left.x as u16,
            area.top_left.y as u16,
            bottom_right.x as u16,
            bottom_right.y as u16,
        )?;
        self.write_repeated(color, area.size.width * area.size.height)
    }
}
