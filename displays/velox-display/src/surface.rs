//! `DrawSurface` over an `embedded-graphics` draw target

use embedded_graphics::mono_font::ascii::FONT_10X20;
use embedded_graphics::mono_font::{MonoFont, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, Line, PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};

use crate::backend::{DisplayError, DrawSurface};

/// Font used for every string on the display
pub const FONT: &MonoFont<'static> = &FONT_10X20;

/// Adapter from an RGB565 draw target to [`DrawSurface`]
pub struct GraphicsSurface<D> {
    target: D,
}

impl<D> GraphicsSurface<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    pub fn new(target: D) -> Self {
        Self { target }
    }

    pub fn target_mut(&mut self) -> &mut D {
        &mut self.target
    }
}

impl<D> DrawSurface for GraphicsSurface<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    fn clear(&mut self, color: Rgb565) -> Result<(), DisplayError> {
        self.target
            .clear(color)
            .map_err(|_| DisplayError::Communication)
    }

    fn fill_box(&mut self, top_left: Point, size: Size, color: Rgb565) -> Result<(), DisplayError> {
        Rectangle::new(top_left, size)
            .into_styled(PrimitiveStyle::with_fill(color))
            .draw(&mut self.target)
            .map_err(|_| DisplayError::Communication)
    }

    fn draw_text(
        &mut self,
        position: Point,
        text: &str,
        fg: Rgb565,
        bg: Rgb565,
    ) -> Result<(), DisplayError> {
        let style = MonoTextStyleBuilder::new()
            .font(FONT)
            .text_color(fg)
            .background_color(bg)
            .build();

        Text::with_baseline(text, position, style, Baseline::Top)
            .draw(&mut self.target)
            .map(|_| ())
            .map_err(|_| DisplayError::Communication)
    }

    fn draw_circle(
        &mut self,
        center: Point,
        radius: u32,
        color: Rgb565,
    ) -> Result<(), DisplayError> {
        Circle::with_center(center, radius * 2 + 1)
            .into_styled(PrimitiveStyle::with_fill(color))
            .draw(&mut self.target)
            .map_err(|_| DisplayError::Communication)
    }

    fn draw_thick_line(
        &mut self,
        start: Point,
        end: Point,
        width: u32,
        color: Rgb565,
    ) -> Result<(), DisplayError> {
        if width == 0 {
            return Err(DisplayError::InvalidCoordinates);
        }
        Line::new(start, end)
            .into_styled(PrimitiveStyle::with_stroke(color, width))
            .draw(&mut self.target)
            .map_err(|_| DisplayError::Communication)
    }

    fn size(&self) -> Size {
        self.target.bounding_box().size
    }
}
