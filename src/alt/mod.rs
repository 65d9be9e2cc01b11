//! The normalized scene tree.
//!
//! An [`AltNode`] is a closed sum over the five shapes the emitters know:
//! rectangles, ellipses, containers, groups and text. Every variant shares a
//! [`NodeBase`] (identity, geometry, visual state and the hints it carries as a
//! child of a flow container); shapes that paint carry a [`Paint`].
//!
//! Ownership is strictly top-down. A parent owns its children; the `parent`
//! field is an id used to look the parent up, never a pointer.

mod tree;

pub use tree::{AltTree, NodeView};

use std::fmt;

use enum_dispatch::enum_dispatch;
use serde::{Deserialize, Serialize};

use crate::style::{BlendMode, Corners, Effect, Fill, StrokeAlign, TextStyle};
use crate::types::{Axis, Bounds, Sides};

/// Stable node identifier, as assigned by the host
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

// ============================================================================
// Layout enums
// ============================================================================

/// Flow axis of a container
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LayoutMode {
    #[default]
    None,
    Horizontal,
    Vertical,
}

impl LayoutMode {
    /// The axis children flow along, if any
    pub fn primary_axis(self) -> Option<Axis> {
        match self {
            LayoutMode::None => None,
            LayoutMode::Horizontal => Some(Axis::X),
            LayoutMode::Vertical => Some(Axis::Y),
        }
    }

    pub fn from_axis(axis: Axis) -> Self {
        match axis {
            Axis::X => LayoutMode::Horizontal,
            Axis::Y => LayoutMode::Vertical,
        }
    }
}

/// Placement of children along an axis of a flow container.
/// `SpaceBetween` only applies to the primary axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AxisAlign {
    #[default]
    Min,
    Center,
    Max,
    SpaceBetween,
}

/// Whether a flow container's axis hugs its content or keeps its size
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SizingMode {
    Fixed,
    #[default]
    Auto,
}

/// Cross-axis behavior of a child inside a flow container
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LayoutAlign {
    #[default]
    Inherit,
    Stretch,
}

// ============================================================================
// Shared node state
// ============================================================================

/// Visual state every node carries
#[derive(Clone, Debug, PartialEq)]
pub struct Visual {
    pub opacity: f64,
    pub blend_mode: BlendMode,
    pub visible: bool,
    pub effects: Vec<Effect>,
}

impl Default for Visual {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            blend_mode: BlendMode::PassThrough,
            visible: true,
            effects: Vec::new(),
        }
    }
}

/// Hints a node carries as the child of a flow container
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct ChildLayout {
    pub align: LayoutAlign,
    pub grow: bool,
}

/// Identity, geometry and visual state shared by all variants
#[derive(Clone, Debug, PartialEq, Default)]
pub struct NodeBase {
    pub id: NodeId,
    pub name: String,
    /// Id of the owning node, or of the reference parent for top-level nodes
    pub parent: Option<NodeId>,
    /// Position relative to the parent's coordinate space
    pub bounds: Bounds,
    pub rotation: f64,
    pub visual: Visual,
    pub child_layout: ChildLayout,
}

impl NodeBase {
    pub fn new(id: impl Into<String>, bounds: Bounds) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id: NodeId(id),
            bounds,
            ..Self::default()
        }
    }
}

/// Fill, stroke and corner rounding
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Paint {
    pub fills: Vec<Fill>,
    pub strokes: Vec<Fill>,
    pub stroke_weight: f64,
    pub stroke_align: StrokeAlign,
    pub corners: Corners,
}

impl Paint {
    /// Stroke weight, or zero when there is nothing to stroke
    pub fn effective_stroke(&self) -> f64 {
        if self.strokes.is_empty() {
            0.0
        } else {
            self.stroke_weight
        }
    }
}

/// Flow layout of a container
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlowLayout {
    pub mode: LayoutMode,
    pub item_spacing: f64,
    pub padding: Sides,
    pub primary_align: AxisAlign,
    pub counter_align: AxisAlign,
    pub primary_sizing: SizingMode,
    pub counter_sizing: SizingMode,
}

impl Default for FlowLayout {
    fn default() -> Self {
        Self {
            mode: LayoutMode::None,
            item_spacing: 0.0,
            padding: Sides::ZERO,
            primary_align: AxisAlign::Min,
            counter_align: AxisAlign::Min,
            primary_sizing: SizingMode::Fixed,
            counter_sizing: SizingMode::Fixed,
        }
    }
}

impl FlowLayout {
    /// Sizing mode of `axis`, mapped through the flow direction.
    /// Without a flow axis both dimensions are fixed.
    pub fn sizing(&self, axis: Axis) -> SizingMode {
        match self.mode.primary_axis() {
            None => SizingMode::Fixed,
            Some(primary) if primary == axis => self.primary_sizing,
            Some(_) => self.counter_sizing,
        }
    }
}

// ============================================================================
// Variants
// ============================================================================

/// Uniform read access across all node variants
#[enum_dispatch]
pub trait Node {
    fn base(&self) -> &NodeBase;

    fn base_mut(&mut self) -> &mut NodeBase;

    /// Paint of shapes that draw something; groups have none
    fn paint(&self) -> Option<&Paint> {
        None
    }

    fn children(&self) -> &[AltNode] {
        &[]
    }

    fn id(&self) -> &NodeId {
        &self.base().id
    }

    fn bounds(&self) -> Bounds {
        self.base().bounds
    }
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct RectangleNode {
    pub base: NodeBase,
    pub paint: Paint,
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct EllipseNode {
    pub base: NodeBase,
    pub paint: Paint,
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct ContainerNode {
    pub base: NodeBase,
    pub paint: Paint,
    pub layout: FlowLayout,
    /// Children could not be flowed and are positioned against this node
    pub is_relative: bool,
    pub clips_content: bool,
    pub children: Vec<AltNode>,
}

/// Transient: inference always turns a group into a container
#[derive(Clone, Debug, PartialEq, Default)]
pub struct GroupNode {
    pub base: NodeBase,
    pub children: Vec<AltNode>,
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct TextNode {
    pub base: NodeBase,
    pub paint: Paint,
    pub text: TextStyle,
}

macro_rules! impl_node {
    ($ty:ty, paint) => {
        impl Node for $ty {
            fn base(&self) -> &NodeBase {
                &self.base
            }
            fn base_mut(&mut self) -> &mut NodeBase {
                &mut self.base
            }
            fn paint(&self) -> Option<&Paint> {
                Some(&self.paint)
            }
        }
    };
}

impl_node!(RectangleNode, paint);
impl_node!(EllipseNode, paint);
impl_node!(TextNode, paint);

impl Node for ContainerNode {
    fn base(&self) -> &NodeBase {
        &self.base
    }
    fn base_mut(&mut self) -> &mut NodeBase {
        &mut self.base
    }
    fn paint(&self) -> Option<&Paint> {
        Some(&self.paint)
    }
    fn children(&self) -> &[AltNode] {
        &self.children
    }
}

impl Node for GroupNode {
    fn base(&self) -> &NodeBase {
        &self.base
    }
    fn base_mut(&mut self) -> &mut NodeBase {
        &mut self.base
    }
    fn children(&self) -> &[AltNode] {
        &self.children
    }
}

/// Discriminant of [`AltNode`], for logging and assertions
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Rectangle,
    Ellipse,
    Container,
    Group,
    Text,
}

/// A normalized node
#[enum_dispatch(Node)]
#[derive(Clone, Debug, PartialEq)]
pub enum AltNode {
    Rectangle(RectangleNode),
    Ellipse(EllipseNode),
    Container(ContainerNode),
    Group(GroupNode),
    Text(TextNode),
}

impl AltNode {
    pub fn kind(&self) -> NodeKind {
        match self {
            AltNode::Rectangle(_) => NodeKind::Rectangle,
            AltNode::Ellipse(_) => NodeKind::Ellipse,
            AltNode::Container(_) => NodeKind::Container,
            AltNode::Group(_) => NodeKind::Group,
            AltNode::Text(_) => NodeKind::Text,
        }
    }

    pub fn as_container(&self) -> Option<&ContainerNode> {
        match self {
            AltNode::Container(c) => Some(c),
            _ => None,
        }
    }

    /// Flow layout, for containers
    pub fn layout(&self) -> Option<&FlowLayout> {
        self.as_container().map(|c| &c.layout)
    }

    pub fn is_relative(&self) -> bool {
        self.as_container().is_some_and(|c| c.is_relative)
    }

    pub fn is_text(&self) -> bool {
        matches!(self, AltNode::Text(_))
    }

    /// Move the node's box by `(dx, dy)` in its parent's space
    pub fn translate(&mut self, dx: f64, dy: f64) {
        let base = self.base_mut();
        base.bounds = base.bounds.translated(dx, dy);
    }

    pub fn set_parent(&mut self, parent: Option<NodeId>) {
        self.base_mut().parent = parent;
    }

    /// Detach the children of a container or group, leaving it empty
    pub fn take_children(&mut self) -> Vec<AltNode> {
        match self {
            AltNode::Container(c) => std::mem::take(&mut c.children),
            AltNode::Group(g) => std::mem::take(&mut g.children),
            _ => Vec::new(),
        }
    }

    /// Attach `children` to a container or group. Leaves ignore the call.
    pub fn set_children(&mut self, children: Vec<AltNode>) {
        match self {
            AltNode::Container(c) => c.children = children,
            AltNode::Group(g) => g.children = children,
            _ => {}
        }
    }

    /// Depth-first pre-order walk
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a AltNode)) {
        visit(self);
        for child in self.children() {
            child.walk(visit);
        }
    }
}
