//! Paint, effect and typography facts, snapped to the supported buckets.

use crate::alt::{AltNode, Node, Paint};
use crate::color::{Palette, Rgb, gradient_angle};
use crate::quantize::{self, Compass};
use crate::style::{
    Corners, Effect, EffectKind, Fill, TextAlign, TextCase, TextDecoration, TextStyle, UnitRgb,
    top_fill,
};

/// A solid color snapped to the palette
#[derive(Clone, Debug, PartialEq)]
pub struct ColorFact {
    pub token: String,
    pub hex: String,
    /// Opacity bucket in percent; `None` when fully opaque
    pub opacity: Option<f64>,
}

impl ColorFact {
    pub fn new(color: UnitRgb, opacity: f64, palette: &Palette) -> Self {
        let rgb = Rgb::from_unit(color);
        Self {
            token: palette
                .nearest(rgb)
                .map(|s| s.token.clone())
                .unwrap_or_default(),
            hex: rgb.to_hex(),
            opacity: quantize::opacity_bucket(opacity),
        }
    }
}

/// A linear gradient reduced to a direction and up to three stops
#[derive(Clone, Debug, PartialEq)]
pub struct GradientFact {
    pub direction: Compass,
    pub from: String,
    pub via: Option<String>,
    pub to: Option<String>,
}

/// What the top fill paints
#[derive(Clone, Debug, PartialEq)]
pub enum FillFact {
    Color(ColorFact),
    Gradient(GradientFact),
    Image,
}

/// Fact for the topmost visible fill
pub fn fill_fact(fills: &[Fill], palette: &Palette) -> Option<FillFact> {
    match top_fill(fills)? {
        Fill::Solid { color, opacity, .. } => {
            Some(FillFact::Color(ColorFact::new(*color, *opacity, palette)))
        }
        Fill::GradientLinear {
            gradient_stops,
            gradient_transform,
            ..
        } => {
            let token = |c: UnitRgb| {
                palette
                    .nearest(Rgb::from_unit(c))
                    .map(|s| s.token.clone())
                    .unwrap_or_default()
            };
            let (first, rest) = gradient_stops.split_first()?;
            let (via, to) = match rest {
                [] => (None, None),
                [last] => (None, Some(token(last.color))),
                [middle, .., last] => (Some(token(middle.color)), Some(token(last.color))),
            };
            Some(FillFact::Gradient(GradientFact {
                direction: Compass::from_degrees(gradient_angle(gradient_transform)),
                from: token(first.color),
                via,
                to,
            }))
        }
        Fill::Image { .. } => Some(FillFact::Image),
        Fill::Unsupported => None,
    }
}

/// Text color, except the default of opaque black
pub fn text_color_fact(fills: &[Fill], palette: &Palette) -> Option<ColorFact> {
    match top_fill(fills)? {
        Fill::Solid { color, opacity, .. } if *color == UnitRgb::BLACK && *opacity == 1.0 => None,
        Fill::Solid { color, opacity, .. } => Some(ColorFact::new(*color, *opacity, palette)),
        _ => None,
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct StrokeFact {
    /// Border width bucket
    pub width: f64,
    pub color: Option<ColorFact>,
}

/// Border width and color; `None` when nothing is stroked
pub fn stroke_fact(paint: &Paint, palette: &Palette) -> Option<StrokeFact> {
    if paint.strokes.is_empty() || paint.stroke_weight <= 0.0 {
        return None;
    }
    let color = match top_fill(&paint.strokes) {
        Some(Fill::Solid { color, opacity, .. }) => Some(ColorFact::new(*color, *opacity, palette)),
        _ => None,
    };
    Some(StrokeFact {
        width: quantize::border_width_bucket(paint.stroke_weight),
        color,
    })
}

/// Corner rounding as radius suffixes
#[derive(Clone, Debug, PartialEq)]
pub enum RadiusFact {
    Full,
    Uniform(&'static str),
    /// Suffix per corner, `None` for square corners
    PerCorner {
        top_left: Option<&'static str>,
        top_right: Option<&'static str>,
        bottom_right: Option<&'static str>,
        bottom_left: Option<&'static str>,
    },
}

pub fn radius_fact(node: &AltNode) -> Option<RadiusFact> {
    if matches!(node, AltNode::Ellipse(_)) {
        return Some(RadiusFact::Full);
    }
    let corners = node.paint()?.corners;
    let bucket = |r: f64| (r != 0.0).then(|| quantize::BORDER_RADIUS.token(r));
    match corners {
        Corners::Uniform(r) if r == 0.0 => None,
        Corners::Uniform(r) if r >= node.bounds().height / 2.0 => Some(RadiusFact::Full),
        Corners::Uniform(r) => Some(RadiusFact::Uniform(quantize::BORDER_RADIUS.token(r))),
        Corners::PerCorner {
            top_left,
            top_right,
            bottom_right,
            bottom_left,
        } => Some(RadiusFact::PerCorner {
            top_left: bucket(top_left),
            top_right: bucket(top_right),
            bottom_right: bucket(bottom_right),
            bottom_left: bucket(bottom_left),
        }),
    }
}

/// Visibility, rotation and opacity of the whole node
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct BlendFact {
    pub hidden: bool,
    pub rotation: Option<f64>,
    pub opacity: Option<f64>,
}

pub fn blend_fact(node: &AltNode) -> BlendFact {
    let base = node.base();
    BlendFact {
        hidden: !base.visual.visible,
        rotation: quantize::rotation_bucket(base.rotation),
        opacity: quantize::opacity_bucket(base.visual.opacity),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct ShadowFact {
    pub drop: bool,
    pub inner: bool,
}

impl ShadowFact {
    pub fn is_empty(self) -> bool {
        !self.drop && !self.inner
    }
}

pub fn shadow_fact(effects: &[Effect]) -> ShadowFact {
    ShadowFact {
        drop: effects
            .iter()
            .any(|e| e.kind == EffectKind::DropShadow && e.visible),
        inner: effects.iter().any(|e| e.kind == EffectKind::InnerShadow),
    }
}

/// Typography snapped to the text scales
#[derive(Clone, Debug, PartialEq)]
pub struct TextFact {
    pub font_size: &'static str,
    pub line_height: Option<&'static str>,
    pub letter_spacing: Option<&'static str>,
    /// Numeric weight; `None` for regular or unknown styles
    pub weight: Option<u16>,
    pub italic: bool,
    /// `None` for left aligned
    pub align: Option<TextAlign>,
    pub case: TextCase,
    pub decoration: TextDecoration,
}

pub fn text_fact(text: &TextStyle) -> TextFact {
    let style = text.font_name.style.to_lowercase();
    TextFact {
        font_size: quantize::FONT_SIZE.token(text.font_size),
        line_height: text.line_height_px().map(|px| quantize::LINE_HEIGHT.token(px)),
        letter_spacing: text
            .letter_spacing_px()
            .map(|px| quantize::LETTER_SPACING.token(px)),
        weight: font_weight(&style.replace("italic", "")).filter(|&w| w != 400),
        italic: style.contains("italic"),
        align: (text.align != TextAlign::Left).then_some(text.align),
        case: text.case,
        decoration: text.decoration,
    }
}

/// Numeric weight of a named font style such as "Semi Bold"
pub fn font_weight(style: &str) -> Option<u16> {
    let name: String = style
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect::<String>()
        .to_lowercase();
    let weight = match name.as_str() {
        "thin" => 100,
        "extralight" | "ultralight" => 200,
        "light" => 300,
        "" | "regular" | "normal" => 400,
        "medium" => 500,
        "semibold" | "demibold" => 600,
        "bold" => 700,
        "extrabold" | "ultrabold" | "heavy" => 800,
        "black" => 900,
        _ => return None,
    };
    Some(weight)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alt::{EllipseNode, NodeBase, RectangleNode};
    use crate::style::{FontName, GradientStop, LetterSpacing, LineHeight, Offset};
    use crate::types::Bounds;

    fn palette() -> Palette {
        Palette::utility()
    }

    fn rect_with(paint: Paint, w: f64, h: f64) -> AltNode {
        RectangleNode {
            base: NodeBase::new("r", Bounds::new(0.0, 0.0, w, h)),
            paint,
        }
        .into()
    }

    fn stop(r: f64, g: f64, b: f64) -> GradientStop {
        GradientStop {
            color: UnitRgb::new(r, g, b),
            position: 0.0,
        }
    }

    // ========================================================================
    // Fills
    // ========================================================================

    #[test]
    fn solid_fill_is_snapped() {
        let fact = fill_fact(&[Fill::solid(1.0, 1.0, 1.0)], &palette()).unwrap();
        assert_eq!(
            fact,
            FillFact::Color(ColorFact {
                token: "white".into(),
                hex: "#ffffff".into(),
                opacity: None,
            })
        );
    }

    #[test]
    fn hidden_top_fill_falls_through() {
        let hidden = Fill::Solid {
            color: UnitRgb::WHITE,
            opacity: 1.0,
            visible: false,
        };
        let fact = fill_fact(&[Fill::solid(0.0, 0.0, 0.0), hidden], &palette()).unwrap();
        let FillFact::Color(color) = fact else {
            panic!("expected a color")
        };
        assert_eq!(color.token, "black");
    }

    #[test]
    fn translucent_fill_keeps_opacity_bucket() {
        let fill = Fill::Solid {
            color: UnitRgb::BLACK,
            opacity: 0.52,
            visible: true,
        };
        let Some(FillFact::Color(color)) = fill_fact(&[fill], &palette()) else {
            panic!("expected a color")
        };
        assert_eq!(color.opacity, Some(50.0));
    }

    #[test]
    fn gradient_stops() {
        let gradient = |stops: Vec<GradientStop>| Fill::GradientLinear {
            gradient_stops: stops,
            gradient_transform: [[0.0, 1.0, 0.0], [-1.0, 0.0, 0.0]],
            opacity: 1.0,
            visible: true,
        };
        let two = fill_fact(&[gradient(vec![stop(0.0, 0.0, 0.0), stop(1.0, 1.0, 1.0)])], &palette());
        assert_eq!(
            two,
            Some(FillFact::Gradient(GradientFact {
                direction: Compass::Bottom,
                from: "black".into(),
                via: None,
                to: Some("white".into()),
            }))
        );

        let four = fill_fact(
            &[gradient(vec![
                stop(0.0, 0.0, 0.0),
                stop(1.0, 1.0, 1.0),
                stop(0.0, 0.0, 0.0),
                stop(1.0, 1.0, 1.0),
            ])],
            &palette(),
        );
        let Some(FillFact::Gradient(g)) = four else {
            panic!("expected a gradient")
        };
        assert_eq!(g.via.as_deref(), Some("white"));
        assert_eq!(g.to.as_deref(), Some("white"));

        assert_eq!(fill_fact(&[gradient(Vec::new())], &palette()), None);
    }

    #[test]
    fn default_text_color_is_omitted() {
        assert_eq!(text_color_fact(&[Fill::solid(0.0, 0.0, 0.0)], &palette()), None);
        let fact = text_color_fact(&[Fill::solid(1.0, 1.0, 1.0)], &palette()).unwrap();
        assert_eq!(fact.token, "white");
    }

    // ========================================================================
    // Strokes and corners
    // ========================================================================

    #[test]
    fn stroke_needs_paint_and_weight() {
        let mut paint = Paint {
            stroke_weight: 3.0,
            ..Paint::default()
        };
        assert_eq!(stroke_fact(&paint, &palette()), None);
        paint.strokes.push(Fill::solid(0.0, 0.0, 0.0));
        let fact = stroke_fact(&paint, &palette()).unwrap();
        assert_eq!(fact.width, 4.0);
        assert_eq!(fact.color.unwrap().token, "black");
        paint.stroke_weight = 0.0;
        assert_eq!(stroke_fact(&paint, &palette()), None);
    }

    #[test]
    fn radius_buckets() {
        let ellipse: AltNode = EllipseNode {
            base: NodeBase::new("e", Bounds::new(0.0, 0.0, 10.0, 10.0)),
            paint: Paint::default(),
        }
        .into();
        assert_eq!(radius_fact(&ellipse), Some(RadiusFact::Full));

        let with = |corners| {
            rect_with(
                Paint {
                    corners,
                    ..Paint::default()
                },
                100.0,
                40.0,
            )
        };
        assert_eq!(radius_fact(&with(Corners::Uniform(0.0))), None);
        assert_eq!(radius_fact(&with(Corners::Uniform(20.0))), Some(RadiusFact::Full));
        assert_eq!(radius_fact(&with(Corners::Uniform(8.0))), Some(RadiusFact::Uniform("-lg")));
        assert_eq!(
            radius_fact(&with(Corners::from_parts(4.0, 0.0, 0.0, 2.0))),
            Some(RadiusFact::PerCorner {
                top_left: Some(""),
                top_right: None,
                bottom_right: None,
                bottom_left: Some("-sm"),
            })
        );
    }

    // ========================================================================
    // Blend and shadows
    // ========================================================================

    #[test]
    fn blend_reports_only_changes() {
        let mut node = rect_with(Paint::default(), 10.0, 10.0);
        assert_eq!(blend_fact(&node), BlendFact::default());
        node.base_mut().rotation = 44.0;
        node.base_mut().visual.opacity = 0.26;
        node.base_mut().visual.visible = false;
        assert_eq!(
            blend_fact(&node),
            BlendFact {
                hidden: true,
                rotation: Some(45.0),
                opacity: Some(25.0),
            }
        );
    }

    #[test]
    fn shadows() {
        let effect = |kind, visible| Effect {
            kind,
            visible,
            radius: 4.0,
            offset: Offset::default(),
            color: None,
        };
        assert!(shadow_fact(&[]).is_empty());
        assert!(shadow_fact(&[effect(EffectKind::LayerBlur, true)]).is_empty());
        let hidden_drop = shadow_fact(&[effect(EffectKind::DropShadow, false)]);
        assert!(!hidden_drop.drop);
        let both = shadow_fact(&[
            effect(EffectKind::DropShadow, true),
            effect(EffectKind::InnerShadow, false),
        ]);
        assert_eq!(
            both,
            ShadowFact {
                drop: true,
                inner: true
            }
        );
    }

    // ========================================================================
    // Typography
    // ========================================================================

    #[test]
    fn text_scales() {
        let text = TextStyle {
            font_size: 24.0,
            font_name: FontName {
                family: "Inter".into(),
                style: "Semi Bold Italic".into(),
            },
            line_height: LineHeight::Percent { value: 150.0 },
            letter_spacing: LetterSpacing::Pixels { value: 1.6 },
            align: TextAlign::Center,
            ..TextStyle::default()
        };
        let fact = text_fact(&text);
        assert_eq!(fact.font_size, "2xl");
        // 150% of 24 is 36 units, 2.25rem
        assert_eq!(fact.line_height, Some("9"));
        assert_eq!(fact.letter_spacing, Some("widest"));
        assert_eq!(fact.weight, Some(600));
        assert!(fact.italic);
        assert_eq!(fact.align, Some(TextAlign::Center));
    }

    #[test]
    fn regular_text_has_no_weight() {
        let text = TextStyle {
            font_size: 16.0,
            font_name: FontName {
                family: "Inter".into(),
                style: "Regular".into(),
            },
            ..TextStyle::default()
        };
        let fact = text_fact(&text);
        assert_eq!(fact.font_size, "base");
        assert_eq!(fact.weight, None);
        assert!(!fact.italic);
        assert_eq!(fact.line_height, None);
        assert_eq!(fact.letter_spacing, None);
        assert_eq!(fact.align, None);
    }

    #[test]
    fn font_weight_names() {
        assert_eq!(font_weight("Extra-Light"), Some(200));
        assert_eq!(font_weight("Black"), Some(900));
        assert_eq!(font_weight("Heavy"), Some(800));
        assert_eq!(font_weight("Condensed"), None);
    }
}
