//! Page geometry
//!
//! Positions, colours and the arithmetic behind the speed bar, compass needle
//! and clock hands. All coordinates assume a 240x320 portrait panel.

use core::f32::consts::PI;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::{Point, Size};
use velox_core::fix::Hemisphere;

/// RGB888 to RGB565
pub const fn rgb(r: u8, g: u8, b: u8) -> Rgb565 {
    Rgb565::new(r >> 3, g >> 2, b >> 3)
}

pub const PANEL_SIZE: Size = Size::new(240, 320);

/// Caption box dimensions
pub const BOX_SIZE: Size = Size::new(220, 30);

/// Offset of the first value row from the view origin
pub const VALUE_ROW: i32 = 40;
pub const ROW_PITCH: i32 = 20;

/// Top-left corner of a single-view page
pub const PAGE_ORIGIN: Point = Point::new(10, 10);

/// View origins on the composite page
pub const ALL_SPEED_ORIGIN: Point = Point::new(10, 10);
pub const ALL_LOCATION_ORIGIN: Point = Point::new(10, 100);
pub const ALL_TIME_ORIGIN: Point = Point::new(10, 210);

pub const BACKGROUND: Rgb565 = rgb(255, 255, 255);
pub const TEXT: Rgb565 = rgb(0, 0, 0);
pub const SPEED_BOX: Rgb565 = rgb(0, 0, 255);
pub const LOCATION_BOX: Rgb565 = rgb(255, 0, 0);
pub const TIME_BOX: Rgb565 = rgb(0, 128, 0);

// Speed bar
pub const BAR_OFFSET: Point = Point::new(10, 130);
pub const BAR_HEIGHT: u32 = 15;
pub const BAR_WIDTH: u32 = BOX_SIZE.width - 20;
pub const BAR_TRACK: Rgb565 = rgb(200, 200, 200);
pub const BAR_LOW: Rgb565 = rgb(0, 255, 0);
pub const BAR_MEDIUM: Rgb565 = rgb(255, 165, 0);
pub const BAR_HIGH: Rgb565 = rgb(255, 0, 0);
/// Scale labels sit this far below the bar's top edge
pub const BAR_LABEL_DROP: i32 = BAR_HEIGHT as i32 + 10;

// Compass
pub const COMPASS_CENTER: Point = Point::new(120, 200);
pub const COMPASS_RADIUS: u32 = 80;
pub const COMPASS_FACE: Rgb565 = rgb(150, 75, 0);
pub const NEEDLE: Rgb565 = rgb(255, 0, 0);
pub const NEEDLE_WIDTH: u32 = 6;
pub const NEEDLE_REACH: i32 = 50;

pub const COMPASS_LABELS: [(&str, Point); 4] = [
    ("N", Point::new(115, 130)),
    ("E", Point::new(175, 195)),
    ("S", Point::new(115, 260)),
    ("W", Point::new(50, 195)),
];

// Clock
pub const CLOCK_CENTER: Point = Point::new(120, 200);
pub const CLOCK_RADIUS: u32 = 100;
pub const CLOCK_HUB_RADIUS: u32 = 6;
pub const CLOCK_HANDS: Rgb565 = rgb(255, 255, 255);
pub const SECOND_HAND: Rgb565 = rgb(225, 225, 255);

/// Time digit columns relative to the view origin: HH, ':', MM, ':', SS
pub const TIME_COLUMNS: [i32; 5] = [10, 45, 60, 95, 110];

pub const NUMERALS: [(&str, Point); 12] = [
    ("12", Point::new(105, 105)),
    ("1", Point::new(155, 120)),
    ("2", Point::new(185, 155)),
    ("3", Point::new(200, 192)),
    ("4", Point::new(185, 229)),
    ("5", Point::new(155, 264)),
    ("6", Point::new(110, 280)),
    ("7", Point::new(65, 264)),
    ("8", Point::new(35, 229)),
    ("9", Point::new(25, 192)),
    ("10", Point::new(35, 155)),
    ("11", Point::new(65, 120)),
];

/// Clock hand: (length, width)
pub const HOUR_HAND: (i32, u32) = (50, 4);
pub const MINUTE_HAND: (i32, u32) = (70, 4);
pub const SECOND_HAND_SIZE: (i32, u32) = (85, 3);

// Health banner
pub const BANNER_ORIGIN: Point = Point::new(0, 300);
pub const BANNER_SIZE: Size = Size::new(240, 20);
pub const BANNER_TEXT_OFFSET: Point = Point::new(10, 0);

/// Filled part of the speed bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeedBar {
    /// Pixels, `0..=BAR_WIDTH`
    pub fill_width: u32,
    pub color: Rgb565,
}

/// Speed bar fill for `speed` on a `0..=max` scale
///
/// Missing or negative speeds show an empty bar; speeds past `max` a full one.
pub fn speed_bar(speed: Option<f32>, max: u16) -> SpeedBar {
    let percent = match speed {
        Some(v) if v.is_finite() && max > 0 => (v / max as f32 * 100.0).clamp(0.0, 100.0),
        _ => 0.0,
    };

    let color = if percent > 80.0 {
        BAR_HIGH
    } else if percent > 60.0 {
        BAR_MEDIUM
    } else {
        BAR_LOW
    };

    SpeedBar {
        fill_width: ((percent / 100.0) * BAR_WIDTH as f32) as u32,
        color,
    }
}

/// Tip of the compass needle for the given hemispheres
///
/// Each known hemisphere moves the tip `NEEDLE_REACH` pixels along its axis.
/// Returns `None` when neither is known.
pub fn needle_end(lat: Option<Hemisphere>, lon: Option<Hemisphere>) -> Option<Point> {
    if lat.is_none() && lon.is_none() {
        return None;
    }

    let dy = match lat {
        Some(Hemisphere::North) => -NEEDLE_REACH,
        Some(Hemisphere::South) => NEEDLE_REACH,
        _ => 0,
    };
    let dx = match lon {
        Some(Hemisphere::East) => NEEDLE_REACH,
        Some(Hemisphere::West) => -NEEDLE_REACH,
        _ => 0,
    };

    Some(COMPASS_CENTER + Point::new(dx, dy))
}

/// Wall-clock time read from a fix's time field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockTime {
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
}

impl ClockTime {
    /// Parse `hhmmss[.sss]` or `hh:mm:ss`
    ///
    /// Missing minutes or seconds read as zero. Each component is clamped to
    /// its clock range. Returns `None` without at least two leading digits.
    pub fn parse(text: &str) -> Option<Self> {
        let mut parts = [0u8; 3];
        let mut digits = 0usize;

        for c in text.chars() {
            match c {
                '0'..='9' if digits < 6 => {
                    let part = &mut parts[digits / 2];
                    *part = *part * 10 + (c as u8 - b'0');
                    digits += 1;
                }
                ':' if digits % 2 == 0 => {}
                _ => break,
            }
        }

        if digits < 2 {
            return None;
        }

        Some(Self {
            hours: parts[0].min(23),
            minutes: parts[1].min(59),
            seconds: parts[2].min(59),
        })
    }

    /// Hour hand angle, degrees clockwise from 12
    pub fn hour_angle(&self) -> f32 {
        (self.hours % 12) as f32 * 30.0 + self.minutes as f32 * 0.5
    }

    pub fn minute_angle(&self) -> f32 {
        self.minutes as f32 * 6.0
    }

    pub fn second_angle(&self) -> f32 {
        self.seconds as f32 * 6.0
    }
}

/// End of a hand `length` pixels long at `angle_deg` clockwise from 12
pub fn hand_end(center: Point, angle_deg: f32, length: i32) -> Point {
    let radians = (angle_deg - 90.0) * (PI / 180.0);
    let length = length as f32;

    Point::new(
        center.x + libm::roundf(length * libm::cosf(radians)) as i32,
        center.y + libm::roundf(length * libm::sinf(radians)) as i32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_speed_bar_thresholds() {
        assert_eq!(speed_bar(Some(30.0), 150).color, BAR_LOW);
        assert_eq!(speed_bar(Some(85.0), 150).color, BAR_LOW);
        assert_eq!(speed_bar(Some(100.0), 150).color, BAR_MEDIUM);
        assert_eq!(speed_bar(Some(121.0), 150).color, BAR_HIGH);
    }

    #[test]
    fn test_speed_bar_width() {
        assert_eq!(speed_bar(Some(75.0), 150).fill_width, 100);
        assert_eq!(speed_bar(Some(150.0), 150).fill_width, BAR_WIDTH);
        assert_eq!(speed_bar(Some(400.0), 150).fill_width, BAR_WIDTH);
        assert_eq!(speed_bar(Some(-3.0), 150).fill_width, 0);
        assert_eq!(speed_bar(None, 150).fill_width, 0);
    }

    #[test]
    fn test_needle_quadrants() {
        use Hemisphere::*;

        let c = COMPASS_CENTER;
        assert_eq!(needle_end(Some(North), Some(East)), Some(c + Point::new(50, -50)));
        assert_eq!(needle_end(Some(North), Some(West)), Some(c + Point::new(-50, -50)));
        assert_eq!(needle_end(Some(South), Some(East)), Some(c + Point::new(50, 50)));
        assert_eq!(needle_end(Some(South), Some(West)), Some(c + Point::new(-50, 50)));
    }

    #[test]
    fn test_needle_single_axis() {
        let c = COMPASS_CENTER;
        assert_eq!(
            needle_end(Some(Hemisphere::North), None),
            Some(c + Point::new(0, -50))
        );
        assert_eq!(
            needle_end(None, Some(Hemisphere::West)),
            Some(c + Point::new(-50, 0))
        );
        assert_eq!(needle_end(None, None), None);
    }

    #[test]
    fn test_clock_parse_nmea() {
        let t = ClockTime::parse("123519.00").unwrap();
        assert_eq!((t.hours, t.minutes, t.seconds), (12, 35, 19));
    }

    #[test]
    fn test_clock_parse_colons() {
        let t = ClockTime::parse("07:05:09").unwrap();
        assert_eq!((t.hours, t.minutes, t.seconds), (7, 5, 9));
    }

    #[test]
    fn test_clock_clamps() {
        let t = ClockTime::parse("997788").unwrap();
        assert_eq!((t.hours, t.minutes, t.seconds), (23, 59, 59));
    }

    #[test]
    fn test_clock_partial() {
        let t = ClockTime::parse("08").unwrap();
        assert_eq!((t.hours, t.minutes, t.seconds), (8, 0, 0));
        assert_eq!(ClockTime::parse("8"), None);
        assert_eq!(ClockTime::parse(""), None);
        assert_eq!(ClockTime::parse("ab1234"), None);
    }

    #[test]
    fn test_hand_angles() {
        let t = ClockTime {
            hours: 15,
            minutes: 30,
            seconds: 45,
        };
        assert_eq!(t.hour_angle(), 105.0);
        assert_eq!(t.minute_angle(), 180.0);
        assert_eq!(t.second_angle(), 270.0);
    }

    #[test]
    fn test_hand_end_cardinals() {
        let c = CLOCK_CENTER;
        assert_eq!(hand_end(c, 0.0, 85), c + Point::new(0, -85));
        assert_eq!(hand_end(c, 90.0, 70), c + Point::new(70, 0));
        assert_eq!(hand_end(c, 180.0, 50), c + Point::new(0, 50));
        assert_eq!(hand_end(c, 270.0, 50), c + Point::new(-50, 0));
    }

    #[test]
    fn test_numerals_inside_panel() {
        for (_, p) in NUMERALS.iter().chain(COMPASS_LABELS.iter()) {
            assert!(p.x >= 0 && p.x < PANEL_SIZE.width as i32);
            assert!(p.y >= 0 && p.y < PANEL_SIZE.height as i32);
        }
    }

    proptest! {
        #[test]
        fn prop_clock_in_range(text in "[0-9:]{0,10}") {
            if let Some(t) = ClockTime::parse(&text) {
                prop_assert!(t.hours <= 23);
                prop_assert!(t.minutes <= 59);
                prop_assert!(t.seconds <= 59);
            }
        }

        #[test]
        fn prop_hand_stays_on_face(angle in 0.0f32..360.0, length in 1i32..=85) {
            let end = hand_end(CLOCK_CENTER, angle, length);
            let d = end - CLOCK_CENTER;
            let dist2 = d.x * d.x + d.y * d.y;
            prop_assert!(dist2 <= (length + 1) * (length + 1));
        }

        #[test]
        fn prop_bar_within_track(speed in -1000.0f32..1000.0, max in 1u16..1000) {
            prop_assert!(speed_bar(Some(speed), max).fill_width <= BAR_WIDTH);
        }
    }
}
