//! Position classification for children of relative containers.

use crate::alt::{AltNode, Node, NodeId};
use crate::types::Axis;

/// Threshold for snapping to an edge or the center
const SNAP: f64 = 8.0;
/// Threshold used for nodes smaller than [`SMALL_NODE`] on either axis
const SNAP_SMALL: f64 = 1.0;
const SMALL_NODE: f64 = 16.0;

/// A corner, edge midpoint or the center of the parent box
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Anchor {
    TopStart,
    TopCenter,
    TopEnd,
    CenterStart,
    Center,
    CenterEnd,
    BottomStart,
    BottomCenter,
    BottomEnd,
}

impl Anchor {
    /// Centering needs the node's size to be known
    pub fn needs_fixed_size(self) -> bool {
        !matches!(
            self,
            Anchor::TopStart | Anchor::TopEnd | Anchor::BottomStart | Anchor::BottomEnd
        )
    }
}

/// Where an emitter should place a node
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Position {
    /// In normal flow: nothing to emit
    Static,
    /// Pinned to an anchor of the parent
    Anchored(Anchor),
    /// Absolute offset from the parent's top-left corner
    Absolute { left: f64, top: f64 },
}

/// Classify the position of `node` inside `parent`.
///
/// Only children of relative containers are positioned; top-level nodes and
/// direct children of the reference parent stay static. Anchors that center
/// the node fall back to an absolute offset unless `has_fixed_size`.
pub fn classify_position(
    node: &AltNode,
    parent: Option<&AltNode>,
    reference_parent: Option<&NodeId>,
    has_fixed_size: bool,
) -> Position {
    let Some(parent) = parent else {
        return Position::Static;
    };
    if node.base().parent.as_ref() == reference_parent || !parent.is_relative() {
        return Position::Static;
    }
    match anchor_within(node, parent) {
        None => Position::Static,
        Some(Some(anchor)) if !anchor.needs_fixed_size() || has_fixed_size => {
            Position::Anchored(anchor)
        }
        Some(_) => {
            let b = node.bounds();
            Position::Absolute {
                left: b.x,
                top: b.y,
            }
        }
    }
}

/// `None` when the node exactly fills the parent's content box, otherwise
/// the anchor it snaps to, if any.
fn anchor_within(node: &AltNode, parent: &AltNode) -> Option<Option<Anchor>> {
    let b = node.bounds();
    let pb = parent.bounds();
    let padding = parent.layout().map(|l| l.padding).unwrap_or_default();
    if b.width == pb.width - padding.along(Axis::X) && b.height == pb.height - padding.along(Axis::Y)
    {
        return None;
    }

    let t = if b.width < SMALL_NODE || b.height < SMALL_NODE {
        SNAP_SMALL
    } else {
        SNAP
    };
    let center_x = (2.0 * b.x + b.width - pb.width).abs() < t;
    let center_y = (2.0 * b.y + b.height - pb.height).abs() < t;
    let min_x = b.x < t;
    let min_y = b.y < t;
    let max_x = pb.width - b.right() < t;
    let max_y = pb.height - b.bottom() < t;

    // corners take precedence over centering
    let anchor = match (min_x, max_x, min_y, max_y) {
        (true, _, true, _) => Some(Anchor::TopStart),
        (true, _, _, true) => Some(Anchor::BottomStart),
        (_, true, true, _) => Some(Anchor::TopEnd),
        (_, true, _, true) => Some(Anchor::BottomEnd),
        _ if center_x && center_y => Some(Anchor::Center),
        _ if center_x && min_y => Some(Anchor::TopCenter),
        _ if center_x && max_y => Some(Anchor::BottomCenter),
        _ if center_x => None,
        _ if center_y && min_x => Some(Anchor::CenterStart),
        _ if center_y && max_x => Some(Anchor::CenterEnd),
        _ => None,
    };
    Some(anchor)
}
