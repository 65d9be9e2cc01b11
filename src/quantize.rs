//! Snapping continuous measurements to small tables of supported values.
//!
//! Tables are ordered ascending. On an exact tie between two neighbors the
//! later entry wins.

use std::fmt;

/// Closest entry of `table` to `value`. An empty table returns `value`.
pub fn nearest(value: f64, table: &[f64]) -> f64 {
    table
        .iter()
        .copied()
        .reduce(|best, candidate| {
            if (candidate - value).abs() <= (best - value).abs() {
                candidate
            } else {
                best
            }
        })
        .unwrap_or(value)
}

/// A map from rem values to utility tokens
#[derive(Clone, Copy, Debug)]
pub struct Scale {
    entries: &'static [(f64, &'static str)],
}

impl Scale {
    pub const fn new(entries: &'static [(f64, &'static str)]) -> Self {
        Self { entries }
    }

    /// Token for a pixel measurement (16px to the rem)
    pub fn token(&self, px: f64) -> &'static str {
        let rem = px / 16.0;
        let mut best: Option<(f64, &'static str)> = None;
        for &(key, token) in self.entries {
            match best {
                Some((b, _)) if (key - rem).abs() > (b - rem).abs() => {}
                _ => best = Some((key, token)),
            }
        }
        best.map_or("", |(_, token)| token)
    }

    pub fn entries(&self) -> &'static [(f64, &'static str)] {
        self.entries
    }
}

pub const LETTER_SPACING: Scale = Scale::new(&[
    (-0.05, "tighter"),
    (-0.025, "tight"),
    (0.025, "wide"),
    (0.05, "wider"),
    (0.1, "widest"),
]);

pub const LINE_HEIGHT: Scale = Scale::new(&[
    (0.75, "3"),
    (1.0, "none"),
    (1.25, "tight"),
    (1.375, "snug"),
    (1.5, "normal"),
    (1.625, "relaxed"),
    (1.75, "7"),
    (2.0, "loose"),
    (2.25, "9"),
    (2.5, "10"),
]);

pub const FONT_SIZE: Scale = Scale::new(&[
    (0.75, "xs"),
    (0.875, "sm"),
    (1.0, "base"),
    (1.125, "lg"),
    (1.25, "xl"),
    (1.5, "2xl"),
    (1.875, "3xl"),
    (2.25, "4xl"),
    (3.0, "5xl"),
    (3.75, "6xl"),
    (4.5, "7xl"),
    (6.0, "8xl"),
    (8.0, "9xl"),
]);

/// Radius suffixes, appended directly after `rounded`
pub const BORDER_RADIUS: Scale = Scale::new(&[
    (0.125, "-sm"),
    (0.25, ""),
    (0.375, "-md"),
    (0.5, "-lg"),
    (0.75, "-xl"),
    (1.0, "-2xl"),
    (1.5, "-3xl"),
    (10.0, "-full"),
]);

/// Widths, heights, paddings and gaps
pub const LAYOUT_SIZE: Scale = Scale::new(&[
    (0.125, "0.5"),
    (0.25, "1"),
    (0.375, "1.5"),
    (0.5, "2"),
    (0.625, "2.5"),
    (0.75, "3"),
    (0.875, "3.5"),
    (1.0, "4"),
    (1.25, "5"),
    (1.5, "6"),
    (1.75, "7"),
    (2.0, "8"),
    (2.25, "9"),
    (2.5, "10"),
    (2.75, "11"),
    (3.0, "12"),
    (3.5, "14"),
    (4.0, "16"),
    (5.0, "20"),
    (6.0, "24"),
    (7.0, "28"),
    (8.0, "32"),
    (9.0, "36"),
    (10.0, "40"),
    (11.0, "44"),
    (12.0, "48"),
    (13.0, "52"),
    (14.0, "56"),
    (15.0, "60"),
    (16.0, "64"),
    (18.0, "72"),
    (20.0, "80"),
    (24.0, "96"),
]);

/// Opacity percentages. 100 is left out so any change stays visible.
pub const OPACITY: [f64; 14] = [
    0.0, 5.0, 10.0, 20.0, 25.0, 30.0, 40.0, 50.0, 60.0, 70.0, 75.0, 80.0, 90.0, 95.0,
];

/// Rotation angles in degrees. 0 is left out so any rotation stays visible.
pub const ROTATION: [f64; 16] = [
    -180.0, -90.0, -45.0, -12.0, -6.0, -3.0, -2.0, -1.0, 1.0, 2.0, 3.0, 6.0, 12.0, 45.0, 90.0,
    180.0,
];

pub const BORDER_WIDTH: [f64; 4] = [1.0, 2.0, 4.0, 8.0];

pub const GRADIENT_ANGLE: [f64; 9] = [
    -180.0, -135.0, -90.0, -45.0, 0.0, 45.0, 90.0, 135.0, 180.0,
];

/// Opacity bucket as a percentage; `None` for full opacity
pub fn opacity_bucket(opacity: f64) -> Option<f64> {
    (opacity != 1.0).then(|| nearest(opacity * 100.0, &OPACITY))
}

/// Rotation bucket; `None` when the rotation rounds to zero
pub fn rotation_bucket(degrees: f64) -> Option<f64> {
    (degrees.round() != 0.0).then(|| nearest(degrees, &ROTATION))
}

pub fn border_width_bucket(weight: f64) -> f64 {
    nearest(weight, &BORDER_WIDTH)
}

/// Eight-way direction of a linear gradient
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Compass {
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
    TopLeft,
}

impl Compass {
    /// Bucket a rotation in degrees, where 0 points right and 90 points down
    pub fn from_degrees(degrees: f64) -> Self {
        match nearest(degrees, &GRADIENT_ANGLE) as i32 {
            0 => Compass::Right,
            45 => Compass::BottomRight,
            90 => Compass::Bottom,
            135 => Compass::BottomLeft,
            -45 => Compass::TopRight,
            -90 => Compass::Top,
            -135 => Compass::TopLeft,
            _ => Compass::Left,
        }
    }

    pub fn abbrev(self) -> &'static str {
        match self {
            Compass::Top => "t",
            Compass::TopRight => "tr",
            Compass::Right => "r",
            Compass::BottomRight => "br",
            Compass::Bottom => "b",
            Compass::BottomLeft => "bl",
            Compass::Left => "l",
            Compass::TopLeft => "tl",
        }
    }
}

impl fmt::Display for Compass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbrev())
    }
}
