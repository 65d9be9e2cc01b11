//! Paint, effect and typography values.
//!
//! These are plain data copied from the host snapshot into normalized nodes
//! unchanged, so one set of types serves both sides.

use serde::{Deserialize, Serialize};

fn one() -> f64 {
    1.0
}

fn yes() -> bool {
    true
}

/// RGB color with components in `0.0..=1.0`, as the host reports them
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct UnitRgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl UnitRgb {
    pub const BLACK: UnitRgb = UnitRgb::new(0.0, 0.0, 0.0);
    pub const WHITE: UnitRgb = UnitRgb::new(1.0, 1.0, 1.0);

    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }
}

/// A color stop in a gradient
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    pub color: UnitRgb,
    #[serde(default)]
    pub position: f64,
}

/// Image scaling in an image fill
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScaleMode {
    #[default]
    Fill,
    Fit,
    Crop,
    Tile,
}

/// One layer of a fill or stroke paint list.
///
/// The host stacks paints bottom to top, so the last visible one is on top.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Fill {
    Solid {
        color: UnitRgb,
        #[serde(default = "one")]
        opacity: f64,
        #[serde(default = "yes")]
        visible: bool,
    },
    #[serde(rename_all = "camelCase")]
    GradientLinear {
        gradient_stops: Vec<GradientStop>,
        /// 2x3 affine transform, row major
        gradient_transform: [[f64; 3]; 2],
        #[serde(default = "one")]
        opacity: f64,
        #[serde(default = "yes")]
        visible: bool,
    },
    #[serde(rename_all = "camelCase")]
    Image {
        #[serde(default)]
        scale_mode: ScaleMode,
        #[serde(default = "one")]
        opacity: f64,
        #[serde(default = "yes")]
        visible: bool,
    },
    /// Radial, angular and diamond gradients, video, and anything newer
    #[serde(other)]
    Unsupported,
}

impl Fill {
    /// Solid paint at full opacity
    pub fn solid(r: f64, g: f64, b: f64) -> Fill {
        Fill::Solid {
            color: UnitRgb::new(r, g, b),
            opacity: 1.0,
            visible: true,
        }
    }

    pub fn is_visible(&self) -> bool {
        match self {
            Fill::Solid { visible, .. }
            | Fill::GradientLinear { visible, .. }
            | Fill::Image { visible, .. } => *visible,
            Fill::Unsupported => false,
        }
    }
}

/// The paint on top of the stack: the last visible entry
pub fn top_fill(fills: &[Fill]) -> Option<&Fill> {
    fills.iter().rev().find(|f| f.is_visible())
}

/// Where a stroke sits relative to the geometry edge
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StrokeAlign {
    #[default]
    Inside,
    Center,
    Outside,
}

/// Layer blend mode
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BlendMode {
    #[default]
    PassThrough,
    Normal,
    Darken,
    Multiply,
    ColorBurn,
    Lighten,
    Screen,
    ColorDodge,
    Overlay,
    SoftLight,
    HardLight,
    Difference,
    Exclusion,
    Hue,
    Saturation,
    Color,
    Luminosity,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EffectKind {
    DropShadow,
    InnerShadow,
    LayerBlur,
    BackgroundBlur,
}

/// 2D offset of a shadow
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Offset {
    pub x: f64,
    pub y: f64,
}

/// Shadow or blur effect
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Effect {
    #[serde(rename = "type")]
    pub kind: EffectKind,
    #[serde(default = "yes")]
    pub visible: bool,
    #[serde(default)]
    pub radius: f64,
    #[serde(default)]
    pub offset: Offset,
    #[serde(default)]
    pub color: Option<UnitRgb>,
}

/// Corner rounding, either one radius or one per corner
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Corners {
    Uniform(f64),
    PerCorner {
        top_left: f64,
        top_right: f64,
        bottom_right: f64,
        bottom_left: f64,
    },
}

impl Default for Corners {
    fn default() -> Self {
        Corners::Uniform(0.0)
    }
}

impl Corners {
    /// Collapse four equal corners into a uniform radius
    pub fn from_parts(top_left: f64, top_right: f64, bottom_right: f64, bottom_left: f64) -> Self {
        if top_left == top_right && top_left == bottom_right && top_left == bottom_left {
            Corners::Uniform(top_left)
        } else {
            Corners::PerCorner {
                top_left,
                top_right,
                bottom_right,
                bottom_left,
            }
        }
    }
}

// ============================================================================
// Typography
// ============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FontName {
    pub family: String,
    pub style: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "unit", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LineHeight {
    #[default]
    Auto,
    Pixels {
        value: f64,
    },
    Percent {
        value: f64,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "unit", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LetterSpacing {
    Pixels { value: f64 },
    Percent { value: f64 },
}

impl Default for LetterSpacing {
    fn default() -> Self {
        LetterSpacing::Percent { value: 0.0 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
    Justified,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TextAlignVertical {
    #[default]
    Top,
    Center,
    Bottom,
}

/// How a text box grows with its content
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TextAutoResize {
    #[default]
    None,
    Height,
    WidthAndHeight,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TextCase {
    #[default]
    Original,
    Upper,
    Lower,
    Title,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TextDecoration {
    #[default]
    None,
    Underline,
    Strikethrough,
}

/// Everything a text node carries beyond its box and paint
#[derive(Clone, Debug, PartialEq, Default)]
pub struct TextStyle {
    pub characters: String,
    pub font_size: f64,
    pub font_name: FontName,
    pub line_height: LineHeight,
    pub letter_spacing: LetterSpacing,
    pub align: TextAlign,
    pub align_vertical: TextAlignVertical,
    pub auto_resize: TextAutoResize,
    pub case: TextCase,
    pub decoration: TextDecoration,
}

impl TextStyle {
    /// Line height in units, or `None` when automatic or rounding to zero
    pub fn line_height_px(&self) -> Option<f64> {
        let px = match self.line_height {
            LineHeight::Auto => return None,
            LineHeight::Pixels { value } if value.round() != 0.0 => value,
            LineHeight::Percent { value } if value.round() != 0.0 => self.font_size * value / 100.0,
            _ => return None,
        };
        Some(px)
    }

    /// Letter spacing in units, or `None` when it rounds to zero
    pub fn letter_spacing_px(&self) -> Option<f64> {
        match self.letter_spacing {
            LetterSpacing::Pixels { value } if value.round() != 0.0 => Some(value),
            LetterSpacing::Percent { value } if value.round() != 0.0 => {
                Some(self.font_size * value / 100.0)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_deserialize_by_tag() {
        let json = r#"[
            {"type": "SOLID", "color": {"r": 1, "g": 0, "b": 0}},
            {"type": "IMAGE", "scaleMode": "FIT", "opacity": 0.5},
            {"type": "GRADIENT_RADIAL", "visible": true},
            {"type": "GRADIENT_LINEAR",
             "gradientStops": [{"color": {"r": 0, "g": 0, "b": 0}, "position": 0}],
             "gradientTransform": [[1, 0, 0], [0, 1, 0]],
             "visible": false}
        ]"#;
        let fills: Vec<Fill> = serde_json::from_str(json).unwrap();
        assert_eq!(fills[0], Fill::solid(1.0, 0.0, 0.0));
        assert_eq!(
            fills[1],
            Fill::Image {
                scale_mode: ScaleMode::Fit,
                opacity: 0.5,
                visible: true
            }
        );
        assert_eq!(fills[2], Fill::Unsupported);
        assert!(!fills[3].is_visible());
    }

    #[test]
    fn top_fill_skips_hidden_layers() {
        let hidden = Fill::Solid {
            color: UnitRgb::WHITE,
            opacity: 1.0,
            visible: false,
        };
        let fills = vec![Fill::solid(1.0, 0.0, 0.0), hidden];
        assert_eq!(top_fill(&fills), Some(&Fill::solid(1.0, 0.0, 0.0)));
        assert_eq!(top_fill(&[]), None);
    }

    #[test]
    fn corners_collapse_when_equal() {
        assert_eq!(Corners::from_parts(4.0, 4.0, 4.0, 4.0), Corners::Uniform(4.0));
        assert!(matches!(
            Corners::from_parts(4.0, 0.0, 4.0, 4.0),
            Corners::PerCorner { top_right, .. } if top_right == 0.0
        ));
    }

    #[test]
    fn text_metrics_resolve_percentages() {
        let style = TextStyle {
            font_size: 24.0,
            line_height: LineHeight::Percent { value: 150.0 },
            letter_spacing: LetterSpacing::Percent { value: 20.0 },
            ..TextStyle::default()
        };
        assert_eq!(style.line_height_px(), Some(36.0));
        assert_eq!(style.letter_spacing_px(), Some(4.8));

        let auto = TextStyle::default();
        assert_eq!(auto.line_height_px(), None);
        assert_eq!(auto.letter_spacing_px(), None);
    }

    #[test]
    fn line_height_units_deserialize() {
        let lh: LineHeight = serde_json::from_str(r#"{"unit": "AUTO"}"#).unwrap();
        assert_eq!(lh, LineHeight::Auto);
        let lh: LineHeight = serde_json::from_str(r#"{"unit": "PIXELS", "value": 20}"#).unwrap();
        assert_eq!(lh, LineHeight::Pixels { value: 20.0 });
    }
}
