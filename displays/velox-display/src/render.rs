//! Page renderer
//!
//! Draws one page from a snapshot of the fix record. Every field may be
//! missing; missing values are drawn as `--`. Values are padded to a fixed
//! width so a redraw fully covers the previous text.

use core::fmt::Write;

use embedded_graphics::prelude::{Point, Size};
use heapless::String;
use velox_core::config::{DisplayConfig, SpeedUnit};
use velox_core::fix::{FixHealth, FixRecord};
use velox_core::page::Page;

use crate::backend::{DisplayError, DrawSurface};
use crate::layout::{self, ClockTime};

/// Placeholder for a missing value
pub const PLACEHOLDER: &str = "--";

/// Text buffer for one value
type Field = String<16>;

/// Renders pages onto a [`DrawSurface`]
#[derive(Debug, Clone)]
pub struct Renderer {
    unit: SpeedUnit,
    speed_max: u16,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::from_config(&DisplayConfig::default())
    }
}

impl Renderer {
    pub const fn new(unit: SpeedUnit, speed_max: u16) -> Self {
        Self { unit, speed_max }
    }

    pub fn from_config(config: &DisplayConfig) -> Self {
        Self::new(config.speed_unit, config.speed_max)
    }

    /// Draw `page` for `fix`, with the health banner for `health`
    ///
    /// Draws over whatever is on the surface; callers clear it when the page
    /// changes.
    pub fn render<S: DrawSurface>(
        &self,
        surface: &mut S,
        page: Page,
        fix: &FixRecord,
        health: FixHealth,
    ) -> Result<(), DisplayError> {
        match page {
            Page::Speed => self.speed_view(surface, layout::PAGE_ORIGIN, fix, true)?,
            Page::Location => location_view(surface, layout::PAGE_ORIGIN, fix, true)?,
            Page::Time => time_view(surface, layout::PAGE_ORIGIN, fix, true)?,
            Page::All => {
                self.speed_view(surface, layout::ALL_SPEED_ORIGIN, fix, false)?;
                location_view(surface, layout::ALL_LOCATION_ORIGIN, fix, false)?;
                time_view(surface, layout::ALL_TIME_ORIGIN, fix, false)?;
            }
        }

        health_banner(surface, health)
    }

    /// Ground speed converted to the display unit
    pub fn display_speed(&self, fix: &FixRecord) -> Option<f32> {
        fix.ground_speed_knots().map(|knots| self.unit.from_knots(knots))
    }

    fn speed_view<S: DrawSurface>(
        &self,
        surface: &mut S,
        origin: Point,
        fix: &FixRecord,
        full: bool,
    ) -> Result<(), DisplayError> {
        surface.draw_labeled_box(origin, layout::BOX_SIZE, "Speed:", layout::SPEED_BOX)?;

        let speed = self.display_speed(fix);
        let text = speed_text(speed);
        value(surface, origin + Point::new(10, layout::VALUE_ROW), &text)?;
        value(
            surface,
            origin + Point::new(150, layout::VALUE_ROW),
            self.unit.label(),
        )?;

        if !full {
            return Ok(());
        }

        let bar_origin = origin + layout::BAR_OFFSET;
        let track = Size::new(layout::BAR_WIDTH, layout::BAR_HEIGHT);
        surface.fill_box(bar_origin, track, layout::BAR_TRACK)?;

        let bar = layout::speed_bar(speed, self.speed_max);
        if bar.fill_width > 0 {
            let fill = Size::new(bar.fill_width, layout::BAR_HEIGHT);
            surface.fill_box(bar_origin, fill, bar.color)?;
        }

        let labels = bar_origin + Point::new(0, layout::BAR_LABEL_DROP);
        value(surface, labels, "0")?;

        let mut max = Field::new();
        let _ = write!(max, "{}", self.speed_max);
        let bar_end = layout::BAR_WIDTH as i32 - 1;
        value(surface, labels + Point::new(bar_end - 50, 0), &max)
    }
}

fn location_view<S: DrawSurface>(
    surface: &mut S,
    origin: Point,
    fix: &FixRecord,
    full: bool,
) -> Result<(), DisplayError> {
    surface.draw_labeled_box(origin, layout::BOX_SIZE, "Location:", layout::LOCATION_BOX)?;

    let lat_row = origin + Point::new(0, layout::VALUE_ROW);
    let lon_row = lat_row + Point::new(0, layout::ROW_PITCH);
    let lat_hemisphere = fix.lat_hemisphere();
    let lon_hemisphere = fix.lon_hemisphere();

    coordinate_row(
        surface,
        lat_row,
        "Lat:",
        fix.latitude(),
        lat_hemisphere.map(|h| h.as_str()),
    )?;
    coordinate_row(
        surface,
        lon_row,
        "Lon:",
        fix.longitude(),
        lon_hemisphere.map(|h| h.as_str()),
    )?;

    if !full {
        return Ok(());
    }

    let sats_row = lon_row + Point::new(0, layout::ROW_PITCH);
    value(surface, sats_row + Point::new(10, 0), "Sats:")?;
    value(
        surface,
        sats_row + Point::new(80, 0),
        &padded(fix.num_satellites(), 3),
    )?;

    surface.draw_circle(
        layout::COMPASS_CENTER,
        layout::COMPASS_RADIUS,
        layout::COMPASS_FACE,
    )?;
    for (label, position) in layout::COMPASS_LABELS {
        surface.draw_text(position, label, layout::TEXT, layout::COMPASS_FACE)?;
    }

    if let Some(tip) = layout::needle_end(lat_hemisphere, lon_hemisphere) {
        surface.draw_thick_line(
            layout::COMPASS_CENTER,
            tip,
            layout::NEEDLE_WIDTH,
            layout::NEEDLE,
        )?;
    }

    Ok(())
}

fn coordinate_row<S: DrawSurface>(
    surface: &mut S,
    row: Point,
    label: &str,
    coordinate: Option<&str>,
    hemisphere: Option<&str>,
) -> Result<(), DisplayError> {
    value(surface, row + Point::new(10, 0), label)?;
    value(surface, row + Point::new(80, 0), &padded(coordinate, 11))?;
    value(surface, row + Point::new(200, 0), &padded(hemisphere, 2))
}

fn time_view<S: DrawSurface>(
    surface: &mut S,
    origin: Point,
    fix: &FixRecord,
    full: bool,
) -> Result<(), DisplayError> {
    surface.draw_labeled_box(origin, layout::BOX_SIZE, "Time:", layout::TIME_BOX)?;

    let clock = fix.time_of_fix().and_then(ClockTime::parse);
    let row = origin + Point::new(0, layout::VALUE_ROW);
    let [hh, colon1, mm, colon2, ss] = layout::TIME_COLUMNS;

    let component = |n: Option<u8>| {
        let mut text = Field::new();
        match n {
            Some(n) => {
                let _ = write!(text, "{:02}", n);
            }
            None => {
                let _ = text.push_str(PLACEHOLDER);
            }
        }
        text
    };

    value(surface, row + Point::new(hh, 0), &component(clock.map(|c| c.hours)))?;
    value(surface, row + Point::new(colon1, 0), ":")?;
    value(surface, row + Point::new(mm, 0), &component(clock.map(|c| c.minutes)))?;
    value(surface, row + Point::new(colon2, 0), ":")?;
    value(surface, row + Point::new(ss, 0), &component(clock.map(|c| c.seconds)))?;

    if !full {
        return Ok(());
    }

    surface.draw_circle(layout::CLOCK_CENTER, layout::CLOCK_RADIUS, layout::TIME_BOX)?;
    for (numeral, position) in layout::NUMERALS {
        surface.draw_text(position, numeral, layout::CLOCK_HANDS, layout::TIME_BOX)?;
    }
    surface.draw_circle(
        layout::CLOCK_CENTER,
        layout::CLOCK_HUB_RADIUS,
        layout::CLOCK_HANDS,
    )?;

    let Some(clock) = clock else {
        return Ok(());
    };

    // Second hand underneath, hour hand on top
    let hands = [
        (clock.second_angle(), layout::SECOND_HAND_SIZE, layout::SECOND_HAND),
        (clock.minute_angle(), layout::MINUTE_HAND, layout::CLOCK_HANDS),
        (clock.hour_angle(), layout::HOUR_HAND, layout::CLOCK_HANDS),
    ];
    for (angle, (length, width), color) in hands {
        let tip = layout::hand_end(layout::CLOCK_CENTER, angle, length);
        surface.draw_thick_line(layout::CLOCK_CENTER, tip, width, color)?;
    }

    Ok(())
}

fn health_banner<S: DrawSurface>(surface: &mut S, health: FixHealth) -> Result<(), DisplayError> {
    let message = match health {
        FixHealth::Ok => {
            return surface.fill_box(
                layout::BANNER_ORIGIN,
                layout::BANNER_SIZE,
                layout::BACKGROUND,
            );
        }
        FixHealth::Waiting => "WAITING GPS",
        FixHealth::NoFix => "NO FIX",
        FixHealth::Stale => "STALE",
    };

    surface.fill_box(layout::BANNER_ORIGIN, layout::BANNER_SIZE, layout::LOCATION_BOX)?;
    surface.draw_text(
        layout::BANNER_ORIGIN + layout::BANNER_TEXT_OFFSET,
        message,
        layout::BACKGROUND,
        layout::LOCATION_BOX,
    )
}

/// Black-on-white text
fn value<S: DrawSurface>(surface: &mut S, position: Point, text: &str) -> Result<(), DisplayError> {
    surface.draw_text(position, text, layout::TEXT, layout::BACKGROUND)
}

/// `text` or the placeholder, left-aligned in `width` columns
/// Speed value padded to eight columns, or the placeholder when it does not fit
fn speed_text(speed: Option<f32>) -> Field {
    if let Some(v) = speed {
        let mut text = Field::new();
        if write!(text, "{:<8.1}", v).is_ok() {
            return text;
        }
    }
    padded(None, 8)
}

fn padded(text: Option<&str>, width: usize) -> Field {
    let mut out = Field::new();
    let _ = write!(out, "{:<width$}", text.unwrap_or(PLACEHOLDER), width = width);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::pixelcolor::Rgb565;
    use embedded_graphics::prelude::Size;
    use velox_core::fix::parse_into;
    use velox_nmea::ChecksumPolicy;

    #[derive(Debug, Clone, PartialEq)]
    enum Op {
        Clear,
        Box(Point, Size, Rgb565),
        Text(Point, std::string::String, Rgb565),
        Circle(Point, u32),
        Line(Point, Point, u32),
    }

    #[derive(Default)]
    struct Recorder {
        ops: Vec<Op>,
    }

    impl Recorder {
        fn texts(&self) -> Vec<(Point, &str)> {
            self.ops
                .iter()
                .filter_map(|op| match op {
                    Op::Text(p, t, _) => Some((*p, t.as_str())),
                    _ => None,
                })
                .collect()
        }

        fn text_at(&self, position: Point) -> Option<&str> {
            self.texts()
                .into_iter()
                .rev()
                .find(|(p, _)| *p == position)
                .map(|(_, t)| t)
        }

        fn lines(&self) -> Vec<(Point, Point, u32)> {
            self.ops
                .iter()
                .filter_map(|op| match op {
                    Op::Line(a, b, w) => Some((*a, *b, *w)),
                    _ => None,
                })
                .collect()
        }

        fn circles(&self) -> usize {
            self.ops
                .iter()
                .filter(|op| matches!(op, Op::Circle(..)))
                .count()
        }
    }

    impl DrawSurface for Recorder {
        fn clear(&mut self, _color: Rgb565) -> Result<(), DisplayError> {
            self.ops.push(Op::Clear);
            Ok(())
        }

        fn fill_box(&mut self, top_left: Point, size: Size, color: Rgb565) -> Result<(), DisplayError> {
            self.ops.push(Op::Box(top_left, size, color));
            Ok(())
        }

        fn draw_text(
            &mut self,
            position: Point,
            text: &str,
            fg: Rgb565,
            _bg: Rgb565,
        ) -> Result<(), DisplayError> {
            self.ops.push(Op::Text(position, text.into(), fg));
            Ok(())
        }

        fn draw_circle(
            &mut self,
            center: Point,
            radius: u32,
            _color: Rgb565,
        ) -> Result<(), DisplayError> {
            self.ops.push(Op::Circle(center, radius));
            Ok(())
        }

        fn draw_thick_line(
            &mut self,
            start: Point,
            end: Point,
            width: u32,
            _color: Rgb565,
        ) -> Result<(), DisplayError> {
            self.ops.push(Op::Line(start, end, width));
            Ok(())
        }

        fn size(&self) -> Size {
            layout::PANEL_SIZE
        }
    }

    fn fix_from(sentences: &[&str]) -> FixRecord {
        let mut fix = FixRecord::new();
        for (i, raw) in sentences.iter().enumerate() {
            parse_into(raw, &mut fix, ChecksumPolicy::IfPresent, i as u64);
        }
        fix
    }

    const GGA: &str = "$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47";
    const RMC: &str = "$GPRMC,123519,A,4807.038,N,01131.000,E,010.0,084.4,230394,003.1,W";

    #[test]
    fn test_speed_page_converts_unit() {
        let fix = fix_from(&[RMC]);
        let mut surface = Recorder::default();
        Renderer::new(SpeedUnit::Kmh, 150)
            .render(&mut surface, Page::Speed, &fix, FixHealth::Ok)
            .unwrap();

        let value = surface.text_at(Point::new(20, 50)).unwrap();
        assert_eq!(value.trim_end(), "18.5");
        assert_eq!(surface.text_at(Point::new(160, 50)), Some("km/h"));
        assert_eq!(surface.text_at(Point::new(20, 15)), Some("Speed:"));
    }

    #[test]
    fn test_speed_bar_drawn() {
        let fix = fix_from(&[RMC]);
        let mut surface = Recorder::default();
        Renderer::new(SpeedUnit::Knots, 20)
            .render(&mut surface, Page::Speed, &fix, FixHealth::Ok)
            .unwrap();

        // 10 of 20 knots fills half the track
        let bar_origin = Point::new(20, 140);
        assert!(surface.ops.contains(&Op::Box(
            bar_origin,
            Size::new(100, layout::BAR_HEIGHT),
            layout::BAR_LOW
        )));
        assert_eq!(surface.text_at(Point::new(20, 165)), Some("0"));
        assert_eq!(surface.text_at(Point::new(169, 165)), Some("20"));
    }

    #[test]
    fn test_empty_record_shows_placeholders() {
        let fix = FixRecord::new();
        let mut surface = Recorder::default();
        Renderer::default()
            .render(&mut surface, Page::All, &fix, FixHealth::Waiting)
            .unwrap();

        assert_eq!(surface.text_at(Point::new(20, 50)).map(str::trim_end), Some("--"));
        assert_eq!(surface.text_at(Point::new(90, 140)).map(str::trim_end), Some("--"));
        assert_eq!(surface.text_at(Point::new(20, 250)), Some("--"));
        assert_eq!(surface.text_at(Point::new(120, 250)), Some("--"));
        assert!(surface.lines().is_empty());
    }

    #[test]
    fn test_garbled_rmc_speed_shows_placeholder() {
        let fix = fix_from(&["$GPRMC,1,A,,,,,1e30,,"]);
        let mut surface = Recorder::default();
        Renderer::default()
            .render(&mut surface, Page::Speed, &fix, FixHealth::Ok)
            .unwrap();

        assert_eq!(surface.text_at(Point::new(20, 50)).map(str::trim_end), Some("--"));
    }

    #[test]
    fn test_speed_text_overflow_falls_back() {
        assert_eq!(speed_text(Some(1e30)).trim_end(), PLACEHOLDER);
        assert_eq!(speed_text(None).trim_end(), PLACEHOLDER);
        assert_eq!(speed_text(Some(12.34)).as_str(), "12.3    ");
    }

    #[test]
    fn test_all_page_has_no_dials() {
        let fix = fix_from(&[GGA, RMC]);
        let mut surface = Recorder::default();
        Renderer::default()
            .render(&mut surface, Page::All, &fix, FixHealth::Ok)
            .unwrap();

        assert_eq!(surface.circles(), 0);
        assert!(surface.lines().is_empty());
        assert_eq!(surface.text_at(Point::new(20, 105)), Some("Location:"));
        assert_eq!(surface.text_at(Point::new(20, 215)), Some("Time:"));
        assert_eq!(surface.text_at(Point::new(20, 250)), Some("12"));
    }

    #[test]
    fn test_location_page() {
        let fix = fix_from(&[GGA]);
        let mut surface = Recorder::default();
        Renderer::default()
            .render(&mut surface, Page::Location, &fix, FixHealth::Ok)
            .unwrap();

        assert_eq!(surface.text_at(Point::new(90, 50)).map(str::trim_end), Some("4807.038"));
        assert_eq!(surface.text_at(Point::new(210, 50)).map(str::trim_end), Some("N"));
        assert_eq!(surface.text_at(Point::new(90, 70)).map(str::trim_end), Some("01131.000"));
        assert_eq!(surface.text_at(Point::new(210, 70)).map(str::trim_end), Some("E"));
        assert_eq!(surface.text_at(Point::new(90, 90)).map(str::trim_end), Some("08"));

        assert_eq!(
            surface.lines(),
            vec![(
                layout::COMPASS_CENTER,
                layout::COMPASS_CENTER + Point::new(50, -50),
                layout::NEEDLE_WIDTH
            )]
        );
    }

    #[test]
    fn test_time_page_hands() {
        let fix = fix_from(&["$GPGGA,150000,,,,,0,00"]);
        let mut surface = Recorder::default();
        Renderer::default()
            .render(&mut surface, Page::Time, &fix, FixHealth::NoFix)
            .unwrap();

        assert_eq!(surface.text_at(Point::new(20, 50)), Some("15"));
        assert_eq!(surface.text_at(Point::new(70, 50)), Some("00"));
        assert_eq!(surface.text_at(Point::new(120, 50)), Some("00"));

        let c = layout::CLOCK_CENTER;
        assert_eq!(
            surface.lines(),
            vec![
                (c, c + Point::new(0, -85), 3),
                (c, c + Point::new(0, -70), 4),
                (c, c + Point::new(50, 0), 4),
            ]
        );
        // Face and hub
        assert_eq!(surface.circles(), 2);
        assert_eq!(
            layout::NUMERALS
                .iter()
                .filter(|(n, p)| surface.text_at(*p) == Some(*n))
                .count(),
            12
        );
    }

    #[test]
    fn test_time_page_without_time_draws_face_only() {
        let fix = FixRecord::new();
        let mut surface = Recorder::default();
        Renderer::default()
            .render(&mut surface, Page::Time, &fix, FixHealth::Waiting)
            .unwrap();

        assert_eq!(surface.circles(), 2);
        assert!(surface.lines().is_empty());
    }

    #[test]
    fn test_health_banner() {
        let fix = FixRecord::new();
        let cases = [
            (FixHealth::Waiting, Some("WAITING GPS")),
            (FixHealth::NoFix, Some("NO FIX")),
            (FixHealth::Stale, Some("STALE")),
            (FixHealth::Ok, None),
        ];

        for (health, expected) in cases {
            let mut surface = Recorder::default();
            Renderer::default()
                .render(&mut surface, Page::Speed, &fix, health)
                .unwrap();
            assert_eq!(surface.text_at(Point::new(10, 300)), expected);
        }
    }

    #[test]
    fn test_render_never_clears() {
        let fix = fix_from(&[GGA, RMC]);
        let mut surface = Recorder::default();
        for page in [Page::Speed, Page::Location, Page::Time, Page::All] {
            Renderer::default()
                .render(&mut surface, page, &fix, FixHealth::Ok)
                .unwrap();
        }
        assert!(!surface.ops.contains(&Op::Clear));
    }
}
