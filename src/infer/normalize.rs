//! Node normalization.
//!
//! Turns raw host nodes into [`AltNode`]s with a uniform attribute surface,
//! applying the shape simplifications the emitters rely on: lines become thin
//! rectangles, vectors and icon clusters become placeholders, childless frames
//! become rectangles and single-child groups disappear. Frames and groups are
//! structured (containment, then flow) before they are returned.

use glam::dvec2;

use crate::alt::{
    AltNode, AxisAlign, ChildLayout, ContainerNode, EllipseNode, FlowLayout, GroupNode, NodeBase,
    NodeId, Paint, RectangleNode, TextNode, Visual,
};
use crate::errors::InferError;
use crate::log::debug;
use crate::raw::{RawKind, RawNode};
use crate::style::{Corners, Fill, ScaleMode, StrokeAlign};
use crate::types::{Bounds, Sides};

use super::geometry::rotated_origin;
use super::{Options, Scope, defaults, structure};

/// Normalize a run of raw siblings attached at `scope`.
///
/// Unsupported kinds and degenerate leaves produce nothing; a degenerate
/// frame or group is replaced by its own normalized children.
pub fn normalize(
    raw: &[RawNode],
    scope: &Scope,
    options: &Options,
) -> Result<Vec<AltNode>, InferError> {
    let mut out = Vec::with_capacity(raw.len());
    for node in raw {
        out.extend(normalize_node(node, scope, options)?);
    }
    Ok(out)
}

fn normalize_node(
    raw: &RawNode,
    scope: &Scope,
    options: &Options,
) -> Result<Vec<AltNode>, InferError> {
    match raw.kind {
        RawKind::Unsupported => {
            debug!(id = %raw.id, name = %raw.name, "unsupported node dropped");
            return Ok(Vec::new());
        }
        // a visible group around one child adds nothing
        RawKind::Group if raw.children.len() == 1 && raw.visible => {
            return normalize(&raw.children, scope, options);
        }
        _ => {}
    }

    let Some(mut base) = base_of(raw, scope) else {
        return Ok(Vec::new());
    };
    let mut paint = paint_of(raw);

    if raw.kind == RawKind::Line {
        let added = (defaults::MIN_LINE_HEIGHT - base.bounds.height).max(0.0);
        base.bounds.height += added;
        paint.stroke_align = StrokeAlign::Center;
        paint.stroke_weight = (paint.stroke_weight - added).max(0.0);
    }

    if base.bounds.is_degenerate() {
        debug!(id = %raw.id, width = base.bounds.width, height = base.bounds.height, "degenerate node elided");
        return normalize(&raw.children, scope, options);
    }

    let node: AltNode = match raw.kind {
        RawKind::Rectangle | RawKind::Line => RectangleNode { base, paint }.into(),
        RawKind::Ellipse => EllipseNode { base, paint }.into(),
        RawKind::Text => TextNode {
            base,
            paint,
            text: raw.text_style(),
        }
        .into(),
        RawKind::Vector => vector_placeholder(base, paint),
        kind if kind.is_frame_like() => {
            return frame(raw, base, paint, options).map(|n| vec![n]);
        }
        RawKind::Group => return group(raw, base, scope, options),
        _ => return Ok(Vec::new()),
    };
    Ok(vec![node])
}

/// Frames own a coordinate space: children are made local to the frame.
fn frame(
    raw: &RawNode,
    base: NodeBase,
    paint: Paint,
    options: &Options,
) -> Result<AltNode, InferError> {
    if raw.children.is_empty() {
        return Ok(RectangleNode { base, paint }.into());
    }
    if is_icon(raw) {
        return Ok(icon_placeholder(base));
    }

    let inner = Scope {
        parent: Some(base.id.clone()),
        origin: dvec2(raw.x, raw.y),
    };
    let children = normalize(&raw.children, &inner, options)?;
    if children.is_empty() {
        return Ok(RectangleNode { base, paint }.into());
    }

    let container = ContainerNode {
        base,
        paint,
        layout: authored_layout(raw),
        is_relative: false,
        clips_content: raw.clips_content,
        children,
    };
    structure(container.into(), options)
}

/// Groups are transparent: their children stay in the group's parent space
/// until inference turns the group into a container.
fn group(
    raw: &RawNode,
    base: NodeBase,
    scope: &Scope,
    options: &Options,
) -> Result<Vec<AltNode>, InferError> {
    if raw.children.is_empty() {
        return Ok(Vec::new());
    }
    if is_icon(raw) {
        return Ok(vec![icon_placeholder(base)]);
    }

    let inner = Scope {
        parent: Some(base.id.clone()),
        origin: scope.origin,
    };
    let children = normalize(&raw.children, &inner, options)?;
    if children.is_empty() {
        return Ok(Vec::new());
    }
    let group = GroupNode { base, children };
    Ok(vec![structure(group.into(), options)?])
}

/// Layout the host already declared on a frame.
///
/// SPACE_BETWEEN with a single child renders as centered in every target, so
/// it is rewritten here once.
fn authored_layout(raw: &RawNode) -> FlowLayout {
    let primary_align = match raw.primary_axis_align_items {
        AxisAlign::SpaceBetween if raw.children.len() == 1 => AxisAlign::Center,
        other => other,
    };
    FlowLayout {
        mode: raw.layout_mode,
        item_spacing: raw.item_spacing,
        padding: Sides::new(
            raw.padding_top,
            raw.padding_right,
            raw.padding_bottom,
            raw.padding_left,
        ),
        primary_align,
        counter_align: raw.counter_axis_align_items,
        primary_sizing: raw.primary_axis_sizing_mode,
        counter_sizing: raw.counter_axis_sizing_mode,
    }
}

fn is_icon(raw: &RawNode) -> bool {
    !raw.children.is_empty() && raw.children.iter().all(|c| c.kind == RawKind::Vector)
}

fn vector_placeholder(base: NodeBase, mut paint: Paint) -> AltNode {
    paint.corners = Corners::Uniform(defaults::PLACEHOLDER_RADIUS);
    if paint.fills.is_empty() {
        paint.fills.push(Fill::Solid {
            color: defaults::VECTOR_PLACEHOLDER,
            opacity: defaults::PLACEHOLDER_OPACITY,
            visible: true,
        });
    }
    RectangleNode { base, paint }.into()
}

fn icon_placeholder(base: NodeBase) -> AltNode {
    let paint = Paint {
        fills: vec![Fill::Image {
            scale_mode: ScaleMode::Fit,
            opacity: defaults::PLACEHOLDER_OPACITY,
            visible: true,
        }],
        strokes: Vec::new(),
        stroke_weight: 0.0,
        stroke_align: StrokeAlign::Center,
        corners: Corners::Uniform(defaults::PLACEHOLDER_RADIUS),
    };
    RectangleNode { base, paint }.into()
}

/// Identity, local geometry and visual state. `None` for non-finite geometry.
fn base_of(raw: &RawNode, scope: &Scope) -> Option<NodeBase> {
    let size = dvec2(raw.width, raw.height);
    let origin = rotated_origin(dvec2(raw.x, raw.y), size, raw.rotation) - scope.origin;
    let bounds = match Bounds::try_new(origin.x, origin.y, raw.width, raw.height) {
        Ok(b) => b,
        Err(err) => {
            debug!(id = %raw.id, %err, "non-finite geometry dropped");
            return None;
        }
    };
    Some(NodeBase {
        id: NodeId::new(raw.id.as_str()),
        name: raw.name.clone(),
        parent: scope.parent.clone(),
        bounds,
        rotation: raw.rotation,
        visual: Visual {
            opacity: raw.opacity,
            blend_mode: raw.blend_mode,
            visible: raw.visible,
            effects: raw.effects.clone(),
        },
        child_layout: ChildLayout {
            align: raw.layout_align,
            grow: raw.layout_grow > 0.0,
        },
    })
}

fn paint_of(raw: &RawNode) -> Paint {
    Paint {
        fills: raw.fills.clone(),
        strokes: raw.strokes.clone(),
        stroke_weight: raw.stroke_weight,
        stroke_align: raw.stroke_align,
        corners: raw.corners(),
    }
}
