//! Responsive size classification.
//!
//! Decides, per axis, whether a node keeps a literal extent, fills its
//! parent, takes a simple fraction of the parent's content box, or is left
//! to intrinsic sizing.

use std::fmt;

use crate::alt::{AltNode, LayoutAlign, Node, SizingMode};
use crate::infer::Options;
use crate::style::StrokeAlign;
use crate::types::Axis;

/// A simple fraction such as 2/3
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Fraction {
    pub num: u8,
    pub den: u8,
}

impl Fraction {
    pub const fn new(num: u8, den: u8) -> Self {
        Self { num, den }
    }

    pub fn value(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    pub fn is_whole(self) -> bool {
        self.num == self.den
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.num, self.den)
    }
}

/// Candidate fractions, tried in order
pub const FRACTIONS: [Fraction; 9] = [
    Fraction::new(1, 1),
    Fraction::new(1, 2),
    Fraction::new(1, 3),
    Fraction::new(2, 3),
    Fraction::new(1, 4),
    Fraction::new(3, 4),
    Fraction::new(1, 5),
    Fraction::new(1, 6),
    Fraction::new(5, 6),
];

/// How one dimension of a node should be emitted
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SizeClass {
    /// Literal extent, strokes included
    Fixed(f64),
    /// Take all the space the parent offers
    Fill,
    /// A fraction of the parent's content box
    Fraction(Fraction),
    /// No size: left to content
    Auto,
}

impl SizeClass {
    /// Anything but `Auto`
    pub fn is_definite(self) -> bool {
        !matches!(self, SizeClass::Auto)
    }
}

/// Width and height classification of one node
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SizeFacts {
    pub width: SizeClass,
    pub height: SizeClass,
}

impl SizeFacts {
    pub fn get(&self, axis: Axis) -> SizeClass {
        match axis {
            Axis::X => self.width,
            Axis::Y => self.height,
        }
    }

    pub fn set(&mut self, axis: Axis, class: SizeClass) {
        match axis {
            Axis::X => self.width = class,
            Axis::Y => self.height = class,
        }
    }

    /// Both dimensions are definite, so the box has a known size
    pub fn is_fixed(&self) -> bool {
        self.width.is_definite() && self.height.is_definite()
    }
}

/// Classify the width and height of `node` inside `parent`.
pub fn classify_size(node: &AltNode, parent: Option<&AltNode>, options: &Options) -> SizeFacts {
    let hints = node.base().child_layout;
    if hints.align == LayoutAlign::Stretch && hints.grow {
        return SizeFacts {
            width: SizeClass::Fill,
            height: SizeClass::Fill,
        };
    }

    let (width, height) = stroked_size(node);
    let mut facts = SizeFacts {
        width: SizeClass::Fixed(width),
        height: SizeClass::Fixed(height),
    };

    let primary = parent
        .and_then(AltNode::layout)
        .and_then(|layout| layout.mode.primary_axis());
    if let Some(primary) = primary {
        if hints.align == LayoutAlign::Stretch {
            facts.set(primary.cross(), SizeClass::Fill);
        }
        if hints.grow {
            facts.set(primary, SizeClass::Fill);
        }
    }

    // children of a relative parent are positioned absolutely; fractions of
    // the parent would not hold there
    let responsive = !parent.is_some_and(AltNode::is_relative);
    for axis in [Axis::X, Axis::Y] {
        let extent = match axis {
            Axis::X => width,
            Axis::Y => height,
        };
        if extent > options.size_ceiling || child_span(node, axis) > options.size_ceiling {
            facts.set(axis, SizeClass::Auto);
            continue;
        }
        if facts.get(axis) == SizeClass::Fill || !responsive {
            continue;
        }
        let fraction = parent
            .map(|p| content_extent(p, axis))
            .and_then(|available| match_fraction(extent, available, options.ratio_tolerance));
        if let Some(fraction) = fraction {
            facts.set(axis, SizeClass::Fraction(fraction));
        }
    }

    if let Some(layout) = node.layout() {
        for axis in [Axis::X, Axis::Y] {
            if layout.sizing(axis) == SizingMode::Auto {
                facts.set(axis, SizeClass::Auto);
            }
        }
    }
    facts
}

/// First candidate fraction within `tolerance` of `extent / available`
pub fn match_fraction(extent: f64, available: f64, tolerance: f64) -> Option<Fraction> {
    if available <= 0.0 {
        return None;
    }
    let ratio = extent / available;
    FRACTIONS
        .iter()
        .copied()
        .find(|f| (ratio - f.value()).abs() < tolerance)
}

/// Space a parent offers its children on `axis`: the content box of a flow
/// container, the whole box otherwise.
fn content_extent(parent: &AltNode, axis: Axis) -> f64 {
    let extent = parent.bounds().extent(axis);
    let padding = parent
        .layout()
        .filter(|l| l.mode.primary_axis().is_some())
        .map_or(0.0, |l| l.padding.along(axis));
    extent - padding
}

/// Distance from the first child's leading edge to the last child's trailing edge
fn child_span(node: &AltNode, axis: Axis) -> f64 {
    match (node.children().first(), node.children().last()) {
        (Some(first), Some(last)) => last.bounds().trailing(axis) - first.bounds().leading(axis),
        _ => 0.0,
    }
}

fn stroke_growth(node: &AltNode) -> f64 {
    match node.paint() {
        Some(p) if !p.strokes.is_empty() => match p.stroke_align {
            StrokeAlign::Outside => p.stroke_weight * 2.0,
            StrokeAlign::Center => p.stroke_weight,
            StrokeAlign::Inside => 0.0,
        },
        _ => 0.0,
    }
}

/// Extent grown by strokes that paint outside the box, its own and any
/// child's that would overflow it.
pub fn stroked_size(node: &AltNode) -> (f64, f64) {
    let b = node.bounds();
    let grow = stroke_growth(node);
    let (mut width, mut height) = (b.width + grow, b.height + grow);
    for child in node.children() {
        let extra = stroke_growth(child);
        if extra <= 0.0 {
            continue;
        }
        let cb = child.bounds();
        if width < cb.width + extra {
            width += extra;
        }
        if height < cb.height + extra {
            height += extra;
        }
    }
    (width, height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alt::{ContainerNode, FlowLayout, LayoutMode, NodeBase, Paint, RectangleNode};
    use crate::style::Fill;
    use crate::types::{Bounds, Sides};

    fn rect(id: &str, x: f64, y: f64, w: f64, h: f64) -> AltNode {
        RectangleNode {
            base: NodeBase::new(id, Bounds::new(x, y, w, h)),
            paint: Paint::default(),
        }
        .into()
    }

    fn flow(mode: LayoutMode, w: f64, h: f64, padding: Sides) -> AltNode {
        ContainerNode {
            base: NodeBase::new("parent", Bounds::new(0.0, 0.0, w, h)),
            layout: FlowLayout {
                mode,
                padding,
                ..FlowLayout::default()
            },
            ..ContainerNode::default()
        }
        .into()
    }

    fn classify(node: &AltNode, parent: &AltNode) -> SizeFacts {
        classify_size(node, Some(parent), &Options::default())
    }

    #[test]
    fn full_width_child_is_whole_fraction() {
        let parent = flow(LayoutMode::Vertical, 100.0, 96.0, Sides::new(0.0, 0.0, 8.0, 0.0));
        let facts = classify(&rect("a", 0.0, 0.0, 100.0, 40.0), &parent);
        assert_eq!(facts.width, SizeClass::Fraction(Fraction::new(1, 1)));
    }

    #[test]
    fn half_width_child() {
        let parent = flow(LayoutMode::Horizontal, 400.0, 80.0, Sides::ZERO);
        let facts = classify(&rect("a", 0.0, 0.0, 200.0, 80.0), &parent);
        assert_eq!(facts.width, SizeClass::Fraction(Fraction::new(1, 2)));
        assert_eq!(facts.height, SizeClass::Fraction(Fraction::new(1, 1)));
    }

    #[test]
    fn padding_shrinks_the_content_box() {
        let parent = flow(LayoutMode::Horizontal, 320.0, 80.0, Sides::new(0.0, 10.0, 0.0, 10.0));
        let facts = classify(&rect("a", 10.0, 0.0, 100.0, 20.0), &parent);
        assert_eq!(facts.width, SizeClass::Fraction(Fraction::new(1, 3)));
    }

    #[test]
    fn unmatched_ratio_is_fixed() {
        let parent = flow(LayoutMode::Horizontal, 300.0, 80.0, Sides::ZERO);
        let facts = classify(&rect("a", 0.0, 0.0, 37.0, 80.0), &parent);
        assert_eq!(facts.width, SizeClass::Fixed(37.0));
    }

    #[test]
    fn stretch_and_grow_fill_both() {
        let mut node = rect("a", 0.0, 0.0, 10.0, 10.0);
        node.base_mut().child_layout.align = LayoutAlign::Stretch;
        node.base_mut().child_layout.grow = true;
        let facts = classify_size(&node, None, &Options::default());
        assert_eq!(facts.width, SizeClass::Fill);
        assert_eq!(facts.height, SizeClass::Fill);
    }

    #[test]
    fn stretch_fills_cross_axis() {
        let parent = flow(LayoutMode::Vertical, 300.0, 300.0, Sides::ZERO);
        let mut node = rect("a", 0.0, 0.0, 37.0, 41.0);
        node.base_mut().child_layout.align = LayoutAlign::Stretch;
        let facts = classify(&node, &parent);
        assert_eq!(facts.width, SizeClass::Fill);
        assert_eq!(facts.height, SizeClass::Fixed(41.0));

        let mut node = rect("a", 0.0, 0.0, 37.0, 41.0);
        node.base_mut().child_layout.grow = true;
        let facts = classify(&node, &parent);
        assert_eq!(facts.height, SizeClass::Fill);
    }

    #[test]
    fn ceiling_forces_auto() {
        let parent = flow(LayoutMode::Vertical, 1000.0, 1000.0, Sides::ZERO);
        let facts = classify(&rect("a", 0.0, 0.0, 500.0, 37.0), &parent);
        assert_eq!(facts.width, SizeClass::Auto);
        assert_eq!(facts.height, SizeClass::Fixed(37.0));
    }

    #[test]
    fn long_child_run_forces_auto() {
        let node: AltNode = ContainerNode {
            base: NodeBase::new("c", Bounds::new(0.0, 0.0, 300.0, 50.0)),
            children: vec![rect("a", 0.0, 0.0, 50.0, 50.0), rect("b", 350.0, 0.0, 50.0, 50.0)],
            ..ContainerNode::default()
        }
        .into();
        let facts = classify_size(&node, None, &Options::default());
        assert_eq!(facts.width, SizeClass::Auto);
        assert_eq!(facts.height, SizeClass::Fixed(50.0));
    }

    #[test]
    fn relative_parent_keeps_literal_sizes() {
        let mut parent = flow(LayoutMode::None, 200.0, 200.0, Sides::ZERO);
        if let AltNode::Container(c) = &mut parent {
            c.is_relative = true;
        }
        let facts = classify(&rect("a", 0.0, 0.0, 100.0, 100.0), &parent);
        assert_eq!(facts.width, SizeClass::Fixed(100.0));
    }

    #[test]
    fn unflowed_parent_uses_raw_extent() {
        let parent = flow(LayoutMode::None, 200.0, 200.0, Sides::new(50.0, 50.0, 50.0, 50.0));
        let facts = classify(&rect("a", 0.0, 0.0, 100.0, 50.0), &parent);
        assert_eq!(facts.width, SizeClass::Fraction(Fraction::new(1, 2)));
        assert_eq!(facts.height, SizeClass::Fraction(Fraction::new(1, 4)));
    }

    #[test]
    fn auto_sizing_axes_report_nothing() {
        let node: AltNode = ContainerNode {
            base: NodeBase::new("c", Bounds::new(0.0, 0.0, 100.0, 50.0)),
            layout: FlowLayout {
                mode: LayoutMode::Horizontal,
                primary_sizing: SizingMode::Auto,
                counter_sizing: SizingMode::Fixed,
                ..FlowLayout::default()
            },
            children: vec![rect("a", 0.0, 0.0, 50.0, 50.0)],
            ..ContainerNode::default()
        }
        .into();
        let facts = classify_size(&node, None, &Options::default());
        assert_eq!(facts.width, SizeClass::Auto);
        assert_eq!(facts.height, SizeClass::Fixed(50.0));
        assert!(!facts.is_fixed());
    }

    #[test]
    fn strokes_inflate_the_box() {
        let mut node = rect("a", 0.0, 0.0, 20.0, 10.0);
        if let AltNode::Rectangle(r) = &mut node {
            r.paint.strokes.push(Fill::solid(0.0, 0.0, 0.0));
            r.paint.stroke_weight = 2.0;
            r.paint.stroke_align = StrokeAlign::Outside;
        }
        assert_eq!(stroked_size(&node), (24.0, 14.0));
        if let AltNode::Rectangle(r) = &mut node {
            r.paint.stroke_align = StrokeAlign::Center;
        }
        assert_eq!(stroked_size(&node), (22.0, 12.0));
        if let AltNode::Rectangle(r) = &mut node {
            r.paint.stroke_align = StrokeAlign::Inside;
        }
        assert_eq!(stroked_size(&node), (20.0, 10.0));
    }

    #[test]
    fn overflowing_child_stroke_grows_parent() {
        let mut child = rect("a", 0.0, 0.0, 100.0, 10.0);
        if let AltNode::Rectangle(r) = &mut child {
            r.paint.strokes.push(Fill::solid(0.0, 0.0, 0.0));
            r.paint.stroke_weight = 1.0;
            r.paint.stroke_align = StrokeAlign::Outside;
        }
        let node: AltNode = ContainerNode {
            base: NodeBase::new("c", Bounds::new(0.0, 0.0, 100.0, 50.0)),
            children: vec![child],
            ..ContainerNode::default()
        }
        .into();
        assert_eq!(stroked_size(&node), (102.0, 50.0));
    }

    #[test]
    fn fraction_order_prefers_earlier() {
        assert_eq!(match_fraction(50.0, 100.0, 0.01), Some(Fraction::new(1, 2)));
        assert_eq!(match_fraction(66.0, 100.0, 0.01), Some(Fraction::new(2, 3)));
        assert_eq!(match_fraction(10.0, 0.0, 0.01), None);
        assert_eq!(Fraction::new(5, 6).to_string(), "5/6");
    }
}
