//! Reference [`Format`] producing utility class lists.

use std::fmt::Write;

use crate::alt::AxisAlign;
use crate::quantize::LAYOUT_SIZE;
use crate::style::{TextAlign, TextCase, TextDecoration};
use crate::types::Axis;

use super::builder::{Decoration, Format};
use super::padding::{FlowFact, PaddingSummary, SplitPadding};
use super::paint::{ColorFact, FillFact, RadiusFact, TextFact};
use super::position::{Anchor, Position};
use super::size::SizeClass;

/// Space separated utility classes such as `w-8 h-4 bg-red-500`
#[derive(Clone, Copy, Debug, Default)]
pub struct ClassFormat;

impl Format for ClassFormat {
    fn render(&mut self, decoration: &Decoration, out: &mut String) {
        let mut classes = Classes(out);
        match decoration {
            Decoration::Size { facts, parent_axis } => {
                for axis in [Axis::X, Axis::Y] {
                    size(&mut classes, axis, facts.get(axis), *parent_axis);
                }
            }
            Decoration::Position(position) => self::position(&mut classes, *position),
            Decoration::Relative => classes.push(format_args!("relative")),
            Decoration::Flow(flow) => self::flow(&mut classes, flow),
            Decoration::Padding(padding) => self::padding(&mut classes, padding),
            Decoration::Fill(FillFact::Color(color)) => self::color(&mut classes, "bg", color),
            Decoration::Fill(FillFact::Gradient(gradient)) => {
                classes.push(format_args!("bg-gradient-to-{}", gradient.direction));
                classes.push(format_args!("from-{}", gradient.from));
                if let Some(via) = &gradient.via {
                    classes.push(format_args!("via-{via}"));
                }
                if let Some(to) = &gradient.to {
                    classes.push(format_args!("to-{to}"));
                }
            }
            Decoration::Fill(FillFact::Image) => {}
            Decoration::TextColor(color) => self::color(&mut classes, "text", color),
            Decoration::Stroke(stroke) => {
                if stroke.width == 1.0 {
                    classes.push(format_args!("border"));
                } else {
                    classes.push(format_args!("border-{}", stroke.width));
                }
                if let Some(color) = &stroke.color {
                    self::color(&mut classes, "border", color);
                }
            }
            Decoration::Radius(radius) => self::radius(&mut classes, radius),
            Decoration::Blend(blend) => {
                if let Some(opacity) = blend.opacity {
                    classes.push(format_args!("opacity-{opacity}"));
                }
                if blend.hidden {
                    classes.push(format_args!("invisible"));
                }
                if let Some(rotation) = blend.rotation {
                    let sign = if rotation < 0.0 { "-" } else { "" };
                    classes.push(format_args!("transform {sign}rotate-{}", rotation.abs()));
                }
            }
            Decoration::Shadow(shadow) => {
                if shadow.drop {
                    classes.push(format_args!("shadow"));
                }
                if shadow.inner {
                    classes.push(format_args!("shadow-inner"));
                }
            }
            Decoration::Text(text) => self::text(&mut classes, text),
        }
    }
}

/// Appends classes with single spaces between them
struct Classes<'a>(&'a mut String);

impl Classes<'_> {
    fn push(&mut self, class: std::fmt::Arguments<'_>) {
        if !self.0.is_empty() {
            self.0.push(' ');
        }
        self.0.write_fmt(class).ok();
    }
}

fn size(classes: &mut Classes<'_>, axis: Axis, class: SizeClass, parent_axis: Option<Axis>) {
    let prefix = match axis {
        Axis::X => "w",
        Axis::Y => "h",
    };
    match class {
        SizeClass::Fixed(px) => classes.push(format_args!("{prefix}-{}", LAYOUT_SIZE.token(px))),
        SizeClass::Fill if parent_axis == Some(axis) => classes.push(format_args!("flex-1")),
        SizeClass::Fill => classes.push(format_args!("{prefix}-full")),
        SizeClass::Fraction(f) if f.is_whole() => classes.push(format_args!("{prefix}-full")),
        SizeClass::Fraction(f) => classes.push(format_args!("{prefix}-{f}")),
        SizeClass::Auto => {}
    }
}

fn position(classes: &mut Classes<'_>, position: Position) {
    let anchor = match position {
        Position::Static => return,
        Position::Absolute { left, top } => {
            classes.push(format_args!("absolute left-[{left}px] top-[{top}px]"));
            return;
        }
        Position::Anchored(anchor) => anchor,
    };
    let class = match anchor {
        Anchor::TopStart => "absolute left-0 top-0",
        Anchor::TopCenter => "absolute inset-x-0 top-0 mx-auto",
        Anchor::TopEnd => "absolute right-0 top-0",
        Anchor::CenterStart => "absolute inset-y-0 left-0 my-auto",
        Anchor::Center => "absolute m-auto inset-0",
        Anchor::CenterEnd => "absolute inset-y-0 right-0 my-auto",
        Anchor::BottomStart => "absolute left-0 bottom-0",
        Anchor::BottomCenter => "absolute inset-x-0 bottom-0 mx-auto",
        Anchor::BottomEnd => "absolute right-0 bottom-0",
    };
    classes.push(format_args!("{class}"));
}

fn flow(classes: &mut Classes<'_>, flow: &FlowFact) {
    classes.push(format_args!("{}", if flow.nested { "flex" } else { "inline-flex" }));
    // rows are the default direction
    if flow.axis == Axis::Y {
        classes.push(format_args!("flex-col"));
    }
    if flow.spacing > 0.0 {
        let dir = match flow.axis {
            Axis::X => "x",
            Axis::Y => "y",
        };
        classes.push(format_args!("space-{dir}-{}", LAYOUT_SIZE.token(flow.spacing)));
    }
    let items = match flow.counter_align {
        AxisAlign::Min => "start",
        AxisAlign::Center => "center",
        AxisAlign::Max => "end",
        AxisAlign::SpaceBetween => "stretch",
    };
    classes.push(format_args!("items-{items}"));
    let justify = match flow.primary_align {
        AxisAlign::Min => "start",
        AxisAlign::Center => "center",
        AxisAlign::Max => "end",
        AxisAlign::SpaceBetween => "between",
    };
    classes.push(format_args!("justify-{justify}"));
}

fn padding(classes: &mut Classes<'_>, padding: &PaddingSummary) {
    let split = match padding {
        PaddingSummary::None => return,
        PaddingSummary::All(p) => {
            classes.push(format_args!("p-{}", LAYOUT_SIZE.token(*p)));
            return;
        }
        PaddingSummary::Split(split) => split,
    };
    let SplitPadding {
        horizontal,
        vertical,
        top,
        right,
        bottom,
        left,
    } = *split;
    let token = |px: f64| (px > 0.0).then(|| LAYOUT_SIZE.token(px));
    if let Some(t) = token(horizontal) {
        classes.push(format_args!("px-{t}"));
    }
    if let Some(t) = token(vertical) {
        classes.push(format_args!("py-{t}"));
    }
    // two sides that snap to the same token collapse into one class
    pair(classes, ("px", "pl", "pr"), token(left), token(right));
    pair(classes, ("py", "pt", "pb"), token(top), token(bottom));
}

fn pair(
    classes: &mut Classes<'_>,
    (both, low_name, high_name): (&str, &str, &str),
    low: Option<&str>,
    high: Option<&str>,
) {
    match (low, high) {
        (Some(l), Some(h)) if l == h => classes.push(format_args!("{both}-{l}")),
        (l, h) => {
            if let Some(l) = l {
                classes.push(format_args!("{low_name}-{l}"));
            }
            if let Some(h) = h {
                classes.push(format_args!("{high_name}-{h}"));
            }
        }
    }
}

fn color(classes: &mut Classes<'_>, kind: &str, color: &ColorFact) {
    classes.push(format_args!("{kind}-{}", color.token));
    if let Some(opacity) = color.opacity {
        classes.push(format_args!("{kind}-opacity-{opacity}"));
    }
}

fn radius(classes: &mut Classes<'_>, radius: &RadiusFact) {
    match radius {
        RadiusFact::Full => classes.push(format_args!("rounded-full")),
        RadiusFact::Uniform(suffix) => classes.push(format_args!("rounded{suffix}")),
        RadiusFact::PerCorner {
            top_left,
            top_right,
            bottom_right,
            bottom_left,
        } => {
            for (corner, suffix) in [
                ("tl", top_left),
                ("tr", top_right),
                ("bl", bottom_left),
                ("br", bottom_right),
            ] {
                if let Some(suffix) = suffix {
                    classes.push(format_args!("rounded-{corner}{suffix}"));
                }
            }
        }
    }
}

fn text(classes: &mut Classes<'_>, text: &TextFact) {
    classes.push(format_args!("text-{}", text.font_size));
    if text.italic {
        classes.push(format_args!("italic"));
    }
    if let Some(weight) = text.weight.and_then(weight_name) {
        classes.push(format_args!("font-{weight}"));
    }
    if let Some(tracking) = text.letter_spacing {
        classes.push(format_args!("tracking-{tracking}"));
    }
    if let Some(leading) = text.line_height {
        classes.push(format_args!("leading-{leading}"));
    }
    match text.decoration {
        TextDecoration::Underline => classes.push(format_args!("underline")),
        TextDecoration::Strikethrough => classes.push(format_args!("line-through")),
        TextDecoration::None => {}
    }
    match text.align {
        Some(TextAlign::Center) => classes.push(format_args!("text-center")),
        Some(TextAlign::Right) => classes.push(format_args!("text-right")),
        Some(TextAlign::Justified) => classes.push(format_args!("text-justify")),
        Some(TextAlign::Left) | None => {}
    }
    match text.case {
        TextCase::Upper => classes.push(format_args!("uppercase")),
        TextCase::Lower => classes.push(format_args!("lowercase")),
        TextCase::Title => classes.push(format_args!("capitalize")),
        TextCase::Original => {}
    }
}

fn weight_name(weight: u16) -> Option<&'static str> {
    let name = match weight {
        100 => "thin",
        200 => "extralight",
        300 => "light",
        500 => "medium",
        600 => "semibold",
        700 => "bold",
        800 => "extrabold",
        900 => "black",
        _ => return None,
    };
    Some(name)
}
