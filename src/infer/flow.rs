//! Auto-layout inference.
//!
//! Decides whether a run of siblings reads as a single row or column, and if
//! so rewrites their parent as a flow container: ordered children, spacing,
//! padding, per-child stretch hints and the dominant alignment on each axis.
//! Nothing here fails on ambiguous geometry; it degrades to a relative
//! container instead.

use crate::alt::{
    AltNode, AxisAlign, ContainerNode, FlowLayout, GroupNode, LayoutAlign, LayoutMode, Node,
    SizingMode,
};
use crate::errors::InferError;
use crate::log::{debug, trace, warn};
use crate::types::{Axis, Sides};

use super::Options;

/// Order `children` along a detected flow axis.
///
/// Returns the (possibly re-sorted) children, the detected mode and the mean
/// gap floored at zero. A single child is never a flow; neither is a run where
/// no axis clears the tolerance.
pub fn infer_flow(children: Vec<AltNode>, options: &Options) -> (Vec<AltNode>, LayoutMode, f64) {
    if children.len() < 2 {
        return (children, LayoutMode::None, 0.0);
    }

    let tol = options.flow_tolerance;
    let gaps_y = gap_sequence(&children, Axis::Y);
    let gaps_x = gap_sequence(&children, Axis::X);
    let (mean_y, mean_x) = (mean(&gaps_y), mean(&gaps_x));
    trace!(?gaps_x, ?gaps_y, "gap sequences");

    let axis = if gaps_y.iter().all(|&g| g >= tol) {
        Some((Axis::Y, mean_y))
    } else if gaps_x.iter().all(|&g| g >= tol) {
        Some((Axis::X, mean_x))
    } else if mean_y > tol {
        Some((Axis::Y, mean_y))
    } else if mean_x > tol {
        Some((Axis::X, mean_x))
    } else {
        None
    };

    match axis {
        Some((axis, spacing)) => {
            let mut ordered = children;
            // stable: ties keep their original order
            ordered.sort_by(|a, b| a.bounds().leading(axis).total_cmp(&b.bounds().leading(axis)));
            debug!(?axis, spacing, "flow detected");
            (ordered, LayoutMode::from_axis(axis), spacing.max(0.0))
        }
        None => {
            debug!(mean_x, mean_y, "no flow axis");
            (children, LayoutMode::None, 0.0)
        }
    }
}

/// Gaps between neighbors once sorted along `axis`
fn gap_sequence(children: &[AltNode], axis: Axis) -> Vec<f64> {
    let mut boxes: Vec<_> = children.iter().map(|c| c.bounds()).collect();
    boxes.sort_by(|a, b| a.leading(axis).total_cmp(&b.leading(axis)));
    boxes
        .windows(2)
        .map(|pair| pair[1].leading(axis) - pair[0].trailing(axis))
        .collect()
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Rewrite a frame or group as a flow container when its children line up.
///
/// Only containers without an authored layout and groups are considered;
/// anything else is returned unchanged. A run with no flow axis and several
/// children marks the container relative. A lone child gets a horizontal
/// flow so its padding can be measured.
pub fn infer_flow_layout(node: AltNode, options: &Options) -> Result<AltNode, InferError> {
    let eligible = match &node {
        AltNode::Container(c) => c.layout.mode == LayoutMode::None && !c.children.is_empty(),
        AltNode::Group(_) => true,
        _ => false,
    };
    if !eligible {
        return Ok(node);
    }
    require_ids(&node, "flow")?;

    let mut container = match node {
        AltNode::Container(c) => c,
        AltNode::Group(g) => container_from_group(g),
        other => return Ok(other),
    };

    let children = std::mem::take(&mut container.children);
    let count = children.len();
    let (ordered, mode, spacing) = infer_flow(children, options);
    container.children = ordered;

    if mode == LayoutMode::None && count != 1 {
        container.is_relative = count > 1;
        container.layout.item_spacing = 0.0;
        return Ok(container.into());
    }

    let mode = if mode == LayoutMode::None {
        LayoutMode::Horizontal
    } else {
        mode
    };
    let Some(primary) = mode.primary_axis() else {
        return Ok(container.into());
    };
    container.layout.mode = mode;
    container.layout.item_spacing = spacing;
    container.layout.padding = detect_padding(&container, primary).clamped();

    let bounds = container.base.bounds;
    let padding = container.layout.padding;
    let cross = primary.cross();
    let available = bounds.extent(cross) - padding.along(cross);
    for child in &mut container.children {
        let stretch = child.bounds().extent(cross) - options.stretch_tolerance > available;
        let hints = &mut child.base_mut().child_layout;
        hints.align = if stretch {
            LayoutAlign::Stretch
        } else {
            LayoutAlign::Inherit
        };
        hints.grow = false;
    }

    let offsets = |axis: Axis| {
        container
            .children
            .iter()
            .map(move |c| {
                let b = c.bounds();
                b.leading(axis) + b.extent(axis) / 2.0 - bounds.extent(axis) / 2.0
            })
            .map(|offset| direction(offset, options.align_threshold))
            .collect::<Vec<_>>()
    };
    let primary_align = most_frequent(&offsets(primary));
    let counter_align = most_frequent(&offsets(cross));
    container.layout.primary_align = primary_align;
    container.layout.counter_align = counter_align;
    container.layout.primary_sizing = SizingMode::Fixed;
    container.layout.counter_sizing = SizingMode::Fixed;

    Ok(container.into())
}

/// Padding read off the children's position inside the container.
///
/// Along the flow axis the first child gives the leading inset and the last
/// child the trailing one. Across it, the tightest child on each side wins.
/// A lone child is measured directly on both axes.
pub fn detect_padding(container: &ContainerNode, primary: Axis) -> Sides {
    let bounds = container.base.bounds;
    let children = &container.children;
    let mut padding = Sides::ZERO;
    let (Some(first), Some(last)) = (children.first(), children.last()) else {
        return padding;
    };

    let leading = |c: &AltNode, axis: Axis| c.bounds().leading(axis);
    let trailing = |c: &AltNode, axis: Axis| bounds.extent(axis) - c.bounds().trailing(axis);

    if children.len() == 1 {
        for axis in [Axis::X, Axis::Y] {
            padding.set_pair(axis, leading(first, axis), trailing(first, axis));
        }
        return padding;
    }

    padding.set_pair(primary, leading(first, primary), trailing(last, primary));
    let cross = primary.cross();
    let low = children
        .iter()
        .map(|c| leading(c, cross))
        .fold(f64::INFINITY, f64::min);
    let high = children
        .iter()
        .map(|c| trailing(c, cross))
        .fold(f64::INFINITY, f64::min);
    padding.set_pair(cross, low, high);
    padding
}

/// Classify a center offset as leaning toward the start, end or middle
fn direction(offset: f64, threshold: f64) -> AxisAlign {
    if offset < -threshold {
        AxisAlign::Min
    } else if offset > threshold {
        AxisAlign::Max
    } else {
        AxisAlign::Center
    }
}

/// Most common value; ties go to whichever appeared first
fn most_frequent(values: &[AxisAlign]) -> AxisAlign {
    let mut counts: Vec<(AxisAlign, usize)> = Vec::new();
    for &v in values {
        match counts.iter_mut().find(|(seen, _)| *seen == v) {
            Some((_, n)) => *n += 1,
            None => counts.push((v, 1)),
        }
    }
    counts
        .iter()
        .fold(None, |best: Option<(AxisAlign, usize)>, &(v, n)| match best {
            Some((_, m)) if m >= n => best,
            _ => Some((v, n)),
        })
        .map_or(AxisAlign::Min, |(v, _)| v)
}

/// A group becomes a container in its own space: children shift by the
/// group's origin and it loses any background it never had.
pub(crate) fn container_from_group(group: GroupNode) -> ContainerNode {
    let GroupNode { base, mut children } = group;
    let (dx, dy) = (-base.bounds.x, -base.bounds.y);
    for child in &mut children {
        child.translate(dx, dy);
    }
    ContainerNode {
        base,
        layout: FlowLayout {
            primary_align: AxisAlign::Center,
            primary_sizing: SizingMode::Auto,
            counter_sizing: SizingMode::Auto,
            ..FlowLayout::default()
        },
        children,
        ..ContainerNode::default()
    }
}

/// Identity is required before children can be regrouped or reordered
pub(crate) fn require_ids(node: &AltNode, pass: &'static str) -> Result<(), InferError> {
    let missing = std::iter::once(node)
        .chain(node.children())
        .find(|n| n.id().is_empty());
    match missing {
        Some(n) => {
            warn!(pass, name = %n.base().name, "node without id");
            Err(InferError::MissingId {
                pass,
                name: n.base().name.clone(),
            })
        }
        None => Ok(()),
    }
}
