//! Draw surface trait
//!
//! Defines the primitives the page renderer draws with.

use embedded_graphics::pixelcolor::{Rgb565, RgbColor};
use embedded_graphics::prelude::{Point, Size};

/// Offset of a box caption from the box's top-left corner
pub const LABEL_OFFSET: Point = Point::new(10, 5);

/// Display surface errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with the panel
    Communication,
    /// Invalid coordinates or dimensions
    InvalidCoordinates,
}

/// Drawing primitives used by the page renderer
///
/// Coordinates are pixels from the top-left corner of the panel.
pub trait DrawSurface {
    /// Fill the whole surface
    fn clear(&mut self, color: Rgb565) -> Result<(), DisplayError>;

    /// Fill a rectangle
    fn fill_box(&mut self, top_left: Point, size: Size, color: Rgb565) -> Result<(), DisplayError>;

    /// Draw text with its top-left corner at `position`, over a solid background
    fn draw_text(
        &mut self,
        position: Point,
        text: &str,
        fg: Rgb565,
        bg: Rgb565,
    ) -> Result<(), DisplayError>;

    /// Draw a filled disc
    fn draw_circle(&mut self, center: Point, radius: u32, color: Rgb565)
        -> Result<(), DisplayError>;

    /// Draw a line `width` pixels wide
    fn draw_thick_line(
        &mut self,
        start: Point,
        end: Point,
        width: u32,
        color: Rgb565,
    ) -> Result<(), DisplayError>;

    /// Surface dimensions in pixels
    fn size(&self) -> Size;

    /// Filled box with a white caption
    fn draw_labeled_box(
        &mut self,
        top_left: Point,
        size: Size,
        label: &str,
        color: Rgb565,
    ) -> Result<(), DisplayError> {
        self.fill_box(top_left, size, color)?;
        self.draw_text(top_left + LABEL_OFFSET, label, Rgb565::WHITE, color)
    }
}
