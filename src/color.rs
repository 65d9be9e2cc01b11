//! Colors: parsing, palette matching, contrast and gradient direction.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use glam::DVec2;

use crate::alt::{AltNode, Node};
use crate::errors::ColorError;
use crate::style::{Fill, UnitRgb};

/// RGB color with components in `0.0..=255.0`
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0.0, 0.0, 0.0);
    pub const WHITE: Rgb = Rgb::new(255.0, 255.0, 255.0);

    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Unpack `0xRRGGBB`
    pub const fn from_packed(rgb: u32) -> Self {
        Self::new(
            ((rgb >> 16) & 0xff) as f64,
            ((rgb >> 8) & 0xff) as f64,
            (rgb & 0xff) as f64,
        )
    }

    pub fn from_unit(c: UnitRgb) -> Self {
        Self::new(c.r * 255.0, c.g * 255.0, c.b * 255.0)
    }

    /// Lowercase `#rrggbb`, fractional channels truncated
    pub fn to_hex(self) -> String {
        let channel = |v: f64| v.clamp(0.0, 255.0) as u8;
        format!(
            "#{:02x}{:02x}{:02x}",
            channel(self.r),
            channel(self.g),
            channel(self.b)
        )
    }

    pub fn distance_sq(self, other: Rgb) -> f64 {
        let (dr, dg, db) = (self.r - other.r, self.g - other.g, self.b - other.b);
        dr * dr + dg * dg + db * db
    }

    /// WCAG relative luminance
    pub fn luminance(self) -> f64 {
        let linear = |v: f64| {
            let v = v / 255.0;
            if v <= 0.03928 {
                v / 12.92
            } else {
                ((v + 0.055) / 1.055).powf(2.4)
            }
        };
        0.2126 * linear(self.r) + 0.7152 * linear(self.g) + 0.0722 * linear(self.b)
    }

    /// WCAG contrast ratio, from 1 to 21
    pub fn contrast_ratio(self, other: Rgb) -> f64 {
        let (a, b) = (self.luminance(), other.luminance());
        (a.max(b) + 0.05) / (a.min(b) + 0.05)
    }
}

impl From<UnitRgb> for Rgb {
    fn from(c: UnitRgb) -> Self {
        Rgb::from_unit(c)
    }
}

impl FromStr for Rgb {
    type Err = ColorError;

    /// Accepts `#rgb`, `#rrggbb`, the same without `#`, and any CSS color
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        if let Some(rgb) = parse_hex(trimmed.strip_prefix('#').unwrap_or(trimmed)) {
            return Ok(rgb);
        }
        let parsed: csscolorparser::Color =
            trimmed.parse().map_err(|_| ColorError::Invalid {
                input: input.to_string(),
            })?;
        let [r, g, b, _] = parsed.to_rgba8();
        Ok(Rgb::new(f64::from(r), f64::from(g), f64::from(b)))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

fn parse_hex(digits: &str) -> Option<Rgb> {
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let packed = u32::from_str_radix(digits, 16).ok()?;
    match digits.len() {
        6 => Some(Rgb::from_packed(packed)),
        3 => {
            let (r, g, b) = ((packed >> 8) & 0xf, (packed >> 4) & 0xf, packed & 0xf);
            Some(Rgb::from_packed((r * 0x11) << 16 | (g * 0x11) << 8 | b * 0x11))
        }
        _ => None,
    }
}

// ============================================================================
// Palette
// ============================================================================

/// A named palette entry
#[derive(Clone, Debug, PartialEq)]
pub struct Swatch {
    pub token: String,
    pub rgb: Rgb,
}

/// Fixed set of named colors to snap to
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    swatches: Vec<Swatch>,
}

const UTILITY_PALETTE: &[(u32, &str)] = &[
    (0x000000, "black"),
    (0xffffff, "white"),
    (0xfdf2f8, "pink-50"),
    (0xfce7f3, "pink-100"),
    (0xfbcfe8, "pink-200"),
    (0xf9a8d4, "pink-300"),
    (0xf472b6, "pink-400"),
    (0xec4899, "pink-500"),
    (0xdb2777, "pink-600"),
    (0xbe185d, "pink-700"),
    (0x9d174d, "pink-800"),
    (0x831843, "pink-900"),
    (0xf5f3ff, "purple-50"),
    (0xede9fe, "purple-100"),
    (0xddd6fe, "purple-200"),
    (0xc4b5fd, "purple-300"),
    (0xa78bfa, "purple-400"),
    (0x8b5cf6, "purple-500"),
    (0x7c3aed, "purple-600"),
    (0x6d28d9, "purple-700"),
    (0x5b21b6, "purple-800"),
    (0x4c1d95, "purple-900"),
    (0xeef2ff, "indigo-50"),
    (0xe0e7ff, "indigo-100"),
    (0xc7d2fe, "indigo-200"),
    (0xa5b4fc, "indigo-300"),
    (0x818cf8, "indigo-400"),
    (0x6366f1, "indigo-500"),
    (0x4f46e5, "indigo-600"),
    (0x4338ca, "indigo-700"),
    (0x3730a3, "indigo-800"),
    (0x312e81, "indigo-900"),
    (0xeff6ff, "blue-50"),
    (0xdbeafe, "blue-100"),
    (0xbfdbfe, "blue-200"),
    (0x93c5fd, "blue-300"),
    (0x60a5fa, "blue-400"),
    (0x3b82f6, "blue-500"),
    (0x2563eb, "blue-600"),
    (0x1d4ed8, "blue-700"),
    (0x1e40af, "blue-800"),
    (0x1e3a8a, "blue-900"),
    (0xecfdf5, "green-50"),
    (0xd1fae5, "green-100"),
    (0xa7f3d0, "green-200"),
    (0x6ee7b7, "green-300"),
    (0x34d399, "green-400"),
    (0x10b981, "green-500"),
    (0x059669, "green-600"),
    (0x047857, "green-700"),
    (0x065f46, "green-800"),
    (0x064e3b, "green-900"),
    (0xfffbeb, "yellow-50"),
    (0xfef3c7, "yellow-100"),
    (0xfde68a, "yellow-200"),
    (0xfcd34d, "yellow-300"),
    (0xfbbf24, "yellow-400"),
    (0xf59e0b, "yellow-500"),
    (0xd97706, "yellow-600"),
    (0xb45309, "yellow-700"),
    (0x92400e, "yellow-800"),
    (0x78350f, "yellow-900"),
    (0xfef2f2, "red-50"),
    (0xfee2e2, "red-100"),
    (0xfecaca, "red-200"),
    (0xfca5a5, "red-300"),
    (0xf87171, "red-400"),
    (0xef4444, "red-500"),
    (0xdc2626, "red-600"),
    (0xb91c1c, "red-700"),
    (0x991b1b, "red-800"),
    (0x7f1d1d, "red-900"),
    (0xf9fafb, "gray-50"),
    (0xf3f4f6, "gray-100"),
    (0xe5e7eb, "gray-200"),
    (0xd1d5db, "gray-300"),
    (0x9ca3af, "gray-400"),
    (0x6b7280, "gray-500"),
    (0x4b5563, "gray-600"),
    (0x374151, "gray-700"),
    (0x1f2937, "gray-800"),
    (0x111827, "gray-900"),
];

impl Palette {
    /// The built-in utility palette: black, white and eight hues in ten shades
    pub fn utility() -> Self {
        Self {
            swatches: UTILITY_PALETTE
                .iter()
                .map(|&(rgb, token)| Swatch {
                    token: token.to_string(),
                    rgb: Rgb::from_packed(rgb),
                })
                .collect(),
        }
    }

    /// Build a palette from `(color, token)` pairs, in matching order
    pub fn from_entries<'a>(
        entries: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<Self, ColorError> {
        let swatches = entries
            .into_iter()
            .map(|(color, token)| {
                Ok(Swatch {
                    token: token.to_string(),
                    rgb: color.parse()?,
                })
            })
            .collect::<Result<Vec<_>, ColorError>>()?;
        Ok(Self { swatches })
    }

    pub fn swatches(&self) -> &[Swatch] {
        &self.swatches
    }

    /// Closest swatch by squared RGB distance; the first one wins a tie
    pub fn nearest(&self, query: Rgb) -> Result<&Swatch, ColorError> {
        let mut best: Option<(&Swatch, f64)> = None;
        for swatch in &self.swatches {
            let d = swatch.rgb.distance_sq(query);
            if best.is_none_or(|(_, b)| d < b) {
                best = Some((swatch, d));
            }
        }
        best.map(|(s, _)| s).ok_or(ColorError::EmptyPalette)
    }

    /// Parse `input` and match it
    pub fn nearest_str(&self, input: &str) -> Result<&Swatch, ColorError> {
        self.nearest(input.parse()?)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::utility()
    }
}

/// Token of the swatch closest to `color`
pub fn nearest_color(color: impl Into<Rgb>, palette: &Palette) -> Result<&str, ColorError> {
    palette.nearest(color.into()).map(|s| s.token.as_str())
}

// ============================================================================
// Gradients
// ============================================================================

/// Rotation in degrees encoded in a gradient's 2x3 transform.
/// 0 runs left to right; positive angles turn clockwise.
pub fn gradient_angle(transform: &[[f64; 3]; 2]) -> f64 {
    let axis = DVec2::new(transform[0][0], transform[0][1]);
    if axis == DVec2::ZERO {
        return 0.0;
    }
    let angle = (axis.x / axis.length()).clamp(-1.0, 1.0).acos();
    let signed = if axis.y > 0.0 { angle } else { -angle };
    signed.to_degrees()
}

// ============================================================================
// Usage summary
// ============================================================================

/// One distinct solid color used in a tree
#[derive(Clone, Debug, PartialEq)]
pub struct ColorUsage {
    pub hex: String,
    pub token: String,
    pub contrast_black: f64,
    pub contrast_white: f64,
}

/// Distinct solid fill and stroke colors under `roots`, sorted by hex
pub fn color_usage<'a>(
    roots: impl IntoIterator<Item = &'a AltNode>,
    palette: &Palette,
) -> Vec<ColorUsage> {
    let mut seen: BTreeMap<String, Rgb> = BTreeMap::new();
    for root in roots {
        root.walk(&mut |node| {
            let Some(paint) = node.paint() else {
                return;
            };
            for fill in paint.fills.iter().chain(&paint.strokes) {
                if let Fill::Solid { color, .. } = fill {
                    let rgb = Rgb::from_unit(*color);
                    seen.entry(rgb.to_hex()).or_insert(rgb);
                }
            }
        });
    }
    seen.into_iter()
        .map(|(hex, rgb)| ColorUsage {
            token: palette
                .nearest(rgb)
                .map(|s| s.token.clone())
                .unwrap_or_default(),
            contrast_black: rgb.contrast_ratio(Rgb::BLACK),
            contrast_white: rgb.contrast_ratio(Rgb::WHITE),
            hex,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alt::{ContainerNode, NodeBase, Paint, RectangleNode};
    use crate::types::Bounds;

    // ========================================================================
    // Parsing
    // ========================================================================

    #[test]
    fn parses_hex_forms() {
        let red = Rgb::new(255.0, 0.0, 0.0);
        assert_eq!("#f00".parse::<Rgb>().unwrap(), red);
        assert_eq!("f00".parse::<Rgb>().unwrap(), red);
        assert_eq!("#FF0000".parse::<Rgb>().unwrap(), red);
        assert_eq!(
            "04fbc8".parse::<Rgb>().unwrap(),
            Rgb::new(4.0, 251.0, 200.0)
        );
    }

    #[test]
    fn parses_css_colors() {
        assert_eq!("aqua".parse::<Rgb>().unwrap(), Rgb::new(0.0, 255.0, 255.0));
        assert_eq!(
            "rgb(3, 10, 100)".parse::<Rgb>().unwrap(),
            Rgb::new(3.0, 10.0, 100.0)
        );
    }

    #[test]
    fn rejects_garbage() {
        let err = "foo".parse::<Rgb>().unwrap_err();
        assert_eq!(
            err,
            ColorError::Invalid {
                input: "foo".into()
            }
        );
    }

    #[test]
    fn hex_truncates_channels() {
        assert_eq!(Rgb::from_unit(UnitRgb::new(1.0, 0.5, 0.0)).to_hex(), "#ff7f00");
        assert_eq!(Rgb::from_packed(0x0a0b0c).to_string(), "#0a0b0c");
    }

    // ========================================================================
    // Matching
    // ========================================================================

    #[test]
    fn matches_a_close_red() {
        let palette =
            Palette::from_entries([("#ef4444", "red-500"), ("#991b1b", "red-800"), ("#fecaca", "red-200")])
                .unwrap();
        assert_eq!(
            nearest_color(Rgb::new(250.0, 2.0, 2.0), &palette).unwrap(),
            "red-500"
        );
    }

    #[test]
    fn utility_palette_exact_hits() {
        let palette = Palette::utility();
        assert_eq!(palette.nearest_str("#3b82f6").unwrap().token, "blue-500");
        assert_eq!(palette.nearest_str("white").unwrap().token, "white");
        assert_eq!(nearest_color(UnitRgb::BLACK, &palette).unwrap(), "black");
    }

    #[test]
    fn first_swatch_wins_a_tie() {
        let palette = Palette::from_entries([("#000000", "a"), ("#000000", "b")]).unwrap();
        assert_eq!(palette.nearest(Rgb::BLACK).unwrap().token, "a");
    }

    #[test]
    fn empty_palette_is_an_error() {
        let palette = Palette::from_entries(Vec::<(&str, &str)>::new()).unwrap();
        assert_eq!(palette.nearest(Rgb::BLACK).unwrap_err(), ColorError::EmptyPalette);
    }

    // ========================================================================
    // Contrast and gradients
    // ========================================================================

    #[test]
    fn contrast_extremes() {
        assert!((Rgb::BLACK.contrast_ratio(Rgb::WHITE) - 21.0).abs() < 1e-9);
        assert!((Rgb::WHITE.contrast_ratio(Rgb::BLACK) - 21.0).abs() < 1e-9);
        assert_eq!(Rgb::WHITE.contrast_ratio(Rgb::WHITE), 1.0);
    }

    #[test]
    fn gradient_angles() {
        let right = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
        let down = [[0.0, 1.0, 0.0], [-1.0, 0.0, 0.0]];
        let up = [[0.0, -1.0, 0.0], [1.0, 0.0, 0.0]];
        assert_eq!(gradient_angle(&right), 0.0);
        assert!((gradient_angle(&down) - 90.0).abs() < 1e-9);
        assert!((gradient_angle(&up) + 90.0).abs() < 1e-9);
        assert_eq!(gradient_angle(&[[0.0; 3]; 2]), 0.0);
    }

    // ========================================================================
    // Usage
    // ========================================================================

    #[test]
    fn usage_is_distinct_and_sorted() {
        let filled = |id: &str, fill: Fill| -> AltNode {
            RectangleNode {
                base: NodeBase::new(id, Bounds::new(0.0, 0.0, 10.0, 10.0)),
                paint: Paint {
                    fills: vec![fill],
                    ..Paint::default()
                },
            }
            .into()
        };
        let root: AltNode = ContainerNode {
            base: NodeBase::new("root", Bounds::new(0.0, 0.0, 100.0, 100.0)),
            paint: Paint {
                fills: vec![Fill::solid(1.0, 1.0, 1.0)],
                ..Paint::default()
            },
            children: vec![
                filled("a", Fill::solid(0.0, 0.0, 0.0)),
                filled("b", Fill::solid(1.0, 1.0, 1.0)),
            ],
            ..ContainerNode::default()
        }
        .into();
        let usage = color_usage([&root], &Palette::utility());
        let hexes: Vec<_> = usage.iter().map(|u| u.hex.as_str()).collect();
        assert_eq!(hexes, ["#000000", "#ffffff"]);
        assert_eq!(usage[0].token, "black");
        assert_eq!(usage[1].contrast_white, 1.0);
        assert!(usage[1].contrast_black > 20.0);
    }
}
