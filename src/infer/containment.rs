//! Containment inference.
//!
//! A rectangle drawn behind other siblings is usually a card or panel that
//! visually holds them. This pass finds such rectangles and turns each into an
//! explicit container owning the siblings it encloses.

use crate::alt::{AltNode, ContainerNode, FlowLayout, Node, Paint, RectangleNode};
use crate::errors::InferError;
use crate::log::debug;

use super::Options;
use super::flow::{infer_flow_layout, require_ids};

/// Regroup the children of a container or group under the rectangles that
/// enclose them, then flow the resulting sibling list.
///
/// Nodes with fewer than two children are returned unchanged. Each new
/// container takes the enclosing rectangle's place in the sibling order.
pub fn infer_containment(node: AltNode, options: &Options) -> Result<AltNode, InferError> {
    let eligible = matches!(node, AltNode::Container(_) | AltNode::Group(_));
    if !eligible || node.children().len() < 2 {
        return Ok(node);
    }
    require_ids(&node, "containment")?;

    let mut node = node;
    let children = node.take_children();
    let groups = enclosing_groups(&children);

    let mut slots: Vec<Option<AltNode>> = children.into_iter().map(Some).collect();
    let mut siblings = Vec::with_capacity(slots.len());
    for i in 0..slots.len() {
        let Some(child) = slots[i].take() else {
            continue;
        };
        let members = groups.iter().find(|(key, _)| *key == i).map(|(_, m)| m);
        match (child, members) {
            (AltNode::Rectangle(rect), Some(members)) => {
                let captured: Vec<AltNode> =
                    members.iter().filter_map(|&j| slots[j].take()).collect();
                debug!(container = %rect.base.id, captured = captured.len(), "rectangle encloses siblings");
                let container = container_from_rectangle(rect, captured);
                siblings.push(super::structure(container, options)?);
            }
            (child, _) => siblings.push(child),
        }
    }

    node.set_children(siblings);
    infer_flow_layout(node, options)
}

/// Pair every enclosing rectangle with the later siblings it encloses.
///
/// Only rectangles are candidates, only siblings after them in paint order
/// are tested, and a sibling joins at most one group. A rectangle already
/// captured by an earlier one does not open its own group here; it is
/// regrouped when its new container is structured.
fn enclosing_groups(children: &[AltNode]) -> Vec<(usize, Vec<usize>)> {
    let mut used = vec![false; children.len()];
    let mut groups = Vec::new();
    for (i, outer) in children.iter().enumerate() {
        if used[i] || !matches!(outer, AltNode::Rectangle(_)) {
            continue;
        }
        let frame = outer.bounds();
        let members: Vec<usize> = (i + 1..children.len())
            .filter(|&j| !used[j] && frame.encloses(&children[j].bounds()))
            .collect();
        if members.is_empty() {
            continue;
        }
        for &j in &members {
            used[j] = true;
        }
        groups.push((i, members));
    }
    groups
}

/// The rectangle keeps its background, stroke and corners; captured children
/// move into its coordinate space.
fn container_from_rectangle(rect: RectangleNode, mut children: Vec<AltNode>) -> AltNode {
    let RectangleNode { mut base, paint } = rect;
    for child in &mut children {
        child.translate(-base.bounds.x, -base.bounds.y);
        child.set_parent(Some(base.id.clone()));
    }

    // a hidden rectangle keeps its slot but paints nothing
    let paint = if base.visual.visible {
        paint
    } else {
        base.visual.effects.clear();
        Paint {
            fills: Vec::new(),
            strokes: Vec::new(),
            ..paint
        }
    };
    // opacity and visibility would otherwise cascade into the captured children
    base.visual.visible = true;
    base.visual.opacity = 1.0;

    ContainerNode {
        base,
        paint,
        layout: FlowLayout::default(),
        children,
        ..ContainerNode::default()
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alt::{EllipseNode, GroupNode, LayoutMode, NodeBase, NodeKind, SizingMode};
    use crate::style::Fill;
    use crate::types::Bounds;

    fn rect(id: &str, x: f64, y: f64, w: f64, h: f64) -> AltNode {
        RectangleNode {
            base: NodeBase::new(id, Bounds::new(x, y, w, h)),
            paint: Paint {
                fills: vec![Fill::solid(1.0, 1.0, 1.0)],
                ..Paint::default()
            },
        }
        .into()
    }

    fn ellipse(id: &str, x: f64, y: f64, w: f64, h: f64) -> AltNode {
        EllipseNode {
            base: NodeBase::new(id, Bounds::new(x, y, w, h)),
            paint: Paint::default(),
        }
        .into()
    }

    fn frame(w: f64, h: f64, children: Vec<AltNode>) -> AltNode {
        ContainerNode {
            base: NodeBase::new("frame", Bounds::new(0.0, 0.0, w, h)),
            children,
            ..ContainerNode::default()
        }
        .into()
    }

    #[test]
    fn card_captures_its_contents() {
        let node = frame(
            300.0,
            300.0,
            vec![
                rect("card", 10.0, 10.0, 200.0, 100.0),
                ellipse("avatar", 20.0, 20.0, 40.0, 40.0),
                ellipse("badge", 70.0, 20.0, 40.0, 40.0),
                rect("outside", 10.0, 150.0, 200.0, 50.0),
            ],
        );
        let out = infer_containment(node, &Options::default()).unwrap();
        let kids = out.children();
        assert_eq!(kids.len(), 2);
        assert_eq!(kids[0].kind(), NodeKind::Container);
        assert_eq!(kids[0].id().as_str(), "card");
        assert_eq!(kids[1].id().as_str(), "outside");

        let card = kids[0].as_container().unwrap();
        assert_eq!(card.children.len(), 2);
        let avatar = card.children.iter().find(|c| c.id().as_str() == "avatar").unwrap();
        assert_eq!(avatar.bounds(), Bounds::new(10.0, 10.0, 40.0, 40.0));
        assert_eq!(avatar.base().parent.as_ref().map(|p| p.as_str()), Some("card"));
        // background survives
        assert_eq!(card.paint.fills.len(), 1);
        // captured children flowed: a row at y=10
        assert_eq!(card.layout.mode, LayoutMode::Horizontal);
        assert_eq!(card.layout.primary_sizing, SizingMode::Fixed);
    }

    #[test]
    fn parent_is_flowed_after_substitution() {
        let node = frame(
            220.0,
            220.0,
            vec![
                rect("card", 10.0, 10.0, 200.0, 100.0),
                ellipse("inside", 20.0, 20.0, 40.0, 40.0),
                rect("below", 10.0, 120.0, 200.0, 50.0),
            ],
        );
        let out = infer_containment(node, &Options::default()).unwrap();
        let layout = out.layout().unwrap();
        assert_eq!(layout.mode, LayoutMode::Vertical);
        assert_eq!(layout.item_spacing, 10.0);
    }

    #[test]
    fn only_rectangles_capture() {
        let node = frame(
            300.0,
            300.0,
            vec![ellipse("big", 0.0, 0.0, 200.0, 200.0), rect("small", 10.0, 10.0, 20.0, 20.0)],
        );
        let out = infer_containment(node, &Options::default()).unwrap();
        assert_eq!(out.children().len(), 2);
        assert!(out.children().iter().all(|c| c.kind() != NodeKind::Container));
    }

    #[test]
    fn earlier_siblings_are_not_captured() {
        // the rectangle is painted above the ellipse, so it is not a background
        let node = frame(
            300.0,
            300.0,
            vec![ellipse("dot", 20.0, 20.0, 10.0, 10.0), rect("panel", 0.0, 0.0, 100.0, 100.0)],
        );
        let groups = enclosing_groups(node.children());
        assert!(groups.is_empty());
    }

    #[test]
    fn nested_panels_nest() {
        let node = frame(
            400.0,
            400.0,
            vec![
                rect("outer", 0.0, 0.0, 300.0, 300.0),
                rect("inner", 50.0, 50.0, 100.0, 100.0),
                ellipse("dot", 60.0, 60.0, 20.0, 20.0),
            ],
        );
        let out = infer_containment(node, &Options::default()).unwrap();
        let outer = out.children()[0].as_container().unwrap();
        assert_eq!(outer.children.len(), 1);
        let inner = outer.children[0].as_container().unwrap();
        assert_eq!(inner.base.id.as_str(), "inner");
        assert_eq!(inner.base.bounds, Bounds::new(50.0, 50.0, 100.0, 100.0));
        assert_eq!(inner.children[0].bounds(), Bounds::new(10.0, 10.0, 20.0, 20.0));
    }

    #[test]
    fn sibling_joins_one_group() {
        let kids = vec![
            rect("a", 0.0, 0.0, 100.0, 100.0),
            rect("b", 0.0, 0.0, 100.0, 100.0),
            ellipse("c", 10.0, 10.0, 10.0, 10.0),
        ];
        let groups = enclosing_groups(&kids);
        assert_eq!(groups, vec![(0, vec![1, 2])]);
    }

    #[test]
    fn hidden_rectangle_drops_its_paint() {
        let mut card = rect("card", 0.0, 0.0, 100.0, 100.0);
        card.base_mut().visual.visible = false;
        card.base_mut().visual.opacity = 0.4;
        let AltNode::Rectangle(card) = card else {
            unreachable!()
        };
        let out = container_from_rectangle(card, vec![ellipse("e", 10.0, 10.0, 5.0, 5.0)]);
        let c = out.as_container().unwrap();
        assert!(c.paint.fills.is_empty());
        assert!(c.base.visual.visible);
        assert_eq!(c.base.visual.opacity, 1.0);
        assert_eq!(c.layout.mode, LayoutMode::None);
    }

    #[test]
    fn small_groups_pass_through() {
        let node = frame(100.0, 100.0, vec![rect("a", 0.0, 0.0, 10.0, 10.0)]);
        let out = infer_containment(node.clone(), &Options::default()).unwrap();
        assert_eq!(out, node);
    }

    #[test]
    fn group_without_id_is_rejected() {
        let group: AltNode = GroupNode {
            base: NodeBase::new("", Bounds::new(0.0, 0.0, 100.0, 100.0)),
            children: vec![rect("a", 0.0, 0.0, 10.0, 10.0), rect("b", 0.0, 20.0, 10.0, 10.0)],
        }
        .into();
        let err = infer_containment(group, &Options::default()).unwrap_err();
        assert!(matches!(err, InferError::MissingId { pass: "containment", .. }));
    }
}
