//! Flow container facts: the row or column itself and its padding.

use crate::alt::{AltNode, AxisAlign, LayoutMode, Node};
use crate::types::{Axis, Sides};

/// A flow container as an emitter sees it
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlowFact {
    pub axis: Axis,
    /// Gap between children; zero when there is nothing to separate
    pub spacing: f64,
    pub primary_align: AxisAlign,
    pub counter_align: AxisAlign,
    /// The parent flows along the same axis, so this container can take a
    /// block slot instead of an inline one
    pub nested: bool,
}

/// Row or column description of a flow container.
///
/// A container wrapping a single child of its own size adds nothing and
/// reports `None`.
pub fn flow_fact(node: &AltNode, parent: Option<&AltNode>) -> Option<FlowFact> {
    let container = node.as_container()?;
    let layout = &container.layout;
    let axis = layout.mode.primary_axis()?;
    if let [only] = container.children.as_slice() {
        let (inner, outer) = (only.bounds(), node.bounds());
        if inner.width == outer.width && inner.height == outer.height {
            return None;
        }
    }
    let spacing = if container.children.len() > 1 {
        layout.item_spacing.max(0.0)
    } else {
        0.0
    };
    Some(FlowFact {
        axis,
        spacing,
        primary_align: layout.primary_align,
        counter_align: layout.counter_align,
        nested: parent
            .and_then(AltNode::layout)
            .is_some_and(|p| p.mode == layout.mode),
    })
}

/// Padding split into the shorthands an emitter can use. Zero means "omit".
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct SplitPadding {
    pub horizontal: f64,
    pub vertical: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PaddingSummary {
    /// Not a flow container
    None,
    /// Same padding on every side
    All(f64),
    Split(SplitPadding),
}

/// Summarize the padding of a flow container, rounded to whole units
pub fn summarize_padding(node: &AltNode) -> PaddingSummary {
    match node.layout() {
        Some(layout) if layout.mode != LayoutMode::None => summarize(layout.padding.rounded()),
        _ => PaddingSummary::None,
    }
}

fn summarize(p: Sides) -> PaddingSummary {
    let positive = |v: f64| if v > 0.0 { v } else { 0.0 };
    if p.left > 0.0 && p.left == p.right && p.left == p.bottom && p.top == p.bottom {
        return PaddingSummary::All(p.left);
    }

    let mut out = SplitPadding::default();
    if p.left > 0.0 && p.left == p.right {
        out.horizontal = p.left;
        if p.top > 0.0 && p.top == p.bottom {
            out.vertical = p.top;
        } else {
            out.top = positive(p.top);
            out.bottom = positive(p.bottom);
        }
    } else if p.top > 0.0 && p.top == p.bottom {
        out.vertical = p.top;
        out.left = positive(p.left);
        out.right = positive(p.right);
    } else {
        out = SplitPadding {
            top: positive(p.top),
            right: positive(p.right),
            bottom: positive(p.bottom),
            left: positive(p.left),
            ..out
        };
    }
    PaddingSummary::Split(out)
}
