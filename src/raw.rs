//! The host scene snapshot.
//!
//! A [`RawNode`] mirrors one node of the host document at the time the
//! selection was taken. Positions are absolute. The core reads these and never
//! mutates them; normalization allocates a fresh [`AltNode`] tree instead.

use glam::{DVec2, dvec2};
use serde::{Deserialize, Serialize};

use crate::alt::{
    AltNode, AxisAlign, ContainerNode, FlowLayout, LayoutAlign, LayoutMode, Node, SizingMode,
};
use crate::infer::geometry::rotated_origin;
use crate::style::{
    BlendMode, Corners, Effect, Fill, FontName, LetterSpacing, LineHeight, StrokeAlign, TextAlign,
    TextAlignVertical, TextAutoResize, TextCase, TextDecoration, TextStyle,
};

/// Node kinds the host reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RawKind {
    Rectangle,
    Ellipse,
    Line,
    Frame,
    Instance,
    Component,
    Group,
    Text,
    Vector,
    /// Stars, polygons, boolean operations, slices and anything unknown
    #[default]
    #[serde(other)]
    Unsupported,
}

impl RawKind {
    /// Frames, instances and components: boxes that own a coordinate space
    pub fn is_frame_like(self) -> bool {
        matches!(self, RawKind::Frame | RawKind::Instance | RawKind::Component)
    }
}

/// One node of the host snapshot. Missing fields take host defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawNode {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: RawKind,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub rotation: f64,
    pub visible: bool,
    pub opacity: f64,
    pub blend_mode: BlendMode,

    pub fills: Vec<Fill>,
    pub strokes: Vec<Fill>,
    pub stroke_weight: f64,
    pub stroke_align: StrokeAlign,
    pub corner_radius: Option<f64>,
    pub top_left_radius: f64,
    pub top_right_radius: f64,
    pub bottom_right_radius: f64,
    pub bottom_left_radius: f64,
    pub effects: Vec<Effect>,

    pub children: Vec<RawNode>,

    // authored auto-layout on frame-like nodes
    pub layout_mode: LayoutMode,
    pub item_spacing: f64,
    pub padding_top: f64,
    pub padding_right: f64,
    pub padding_bottom: f64,
    pub padding_left: f64,
    pub primary_axis_align_items: AxisAlign,
    pub counter_axis_align_items: AxisAlign,
    pub primary_axis_sizing_mode: SizingMode,
    pub counter_axis_sizing_mode: SizingMode,
    pub clips_content: bool,

    // hints a node carries as a child of an auto-layout frame
    pub layout_align: LayoutAlign,
    pub layout_grow: f64,

    // text
    pub characters: String,
    pub font_size: f64,
    pub font_name: FontName,
    pub line_height: LineHeight,
    pub letter_spacing: LetterSpacing,
    pub text_align_horizontal: TextAlign,
    pub text_align_vertical: TextAlignVertical,
    pub text_auto_resize: TextAutoResize,
    pub text_case: TextCase,
    pub text_decoration: TextDecoration,
}

impl Default for RawNode {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            kind: RawKind::Unsupported,
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            rotation: 0.0,
            visible: true,
            opacity: 1.0,
            blend_mode: BlendMode::PassThrough,
            fills: Vec::new(),
            strokes: Vec::new(),
            stroke_weight: 0.0,
            stroke_align: StrokeAlign::Inside,
            corner_radius: None,
            top_left_radius: 0.0,
            top_right_radius: 0.0,
            bottom_right_radius: 0.0,
            bottom_left_radius: 0.0,
            effects: Vec::new(),
            children: Vec::new(),
            layout_mode: LayoutMode::None,
            item_spacing: 0.0,
            padding_top: 0.0,
            padding_right: 0.0,
            padding_bottom: 0.0,
            padding_left: 0.0,
            primary_axis_align_items: AxisAlign::Min,
            counter_axis_align_items: AxisAlign::Min,
            primary_axis_sizing_mode: SizingMode::Auto,
            counter_axis_sizing_mode: SizingMode::Auto,
            clips_content: false,
            layout_align: LayoutAlign::Inherit,
            layout_grow: 0.0,
            characters: String::new(),
            font_size: 12.0,
            font_name: FontName::default(),
            line_height: LineHeight::Auto,
            letter_spacing: LetterSpacing::default(),
            text_align_horizontal: TextAlign::Left,
            text_align_vertical: TextAlignVertical::Top,
            text_auto_resize: TextAutoResize::None,
            text_case: TextCase::Original,
            text_decoration: TextDecoration::None,
        }
    }
}

impl RawNode {
    /// A node of `kind` at an absolute position
    pub fn new(kind: RawKind, id: impl Into<String>, x: f64, y: f64, width: f64, height: f64) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            kind,
            x,
            y,
            width,
            height,
            ..Self::default()
        }
    }

    pub fn with_children(mut self, children: Vec<RawNode>) -> Self {
        self.children = children;
        self
    }

    pub fn with_fill(mut self, fill: Fill) -> Self {
        self.fills.push(fill);
        self
    }

    pub fn with_stroke(mut self, stroke: Fill, weight: f64, align: StrokeAlign) -> Self {
        self.strokes.push(stroke);
        self.stroke_weight = weight;
        self.stroke_align = align;
        self
    }

    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.rotation = degrees;
        self
    }

    /// Corner radii as the host expresses them: an explicit uniform radius
    /// wins, otherwise the four per-corner values.
    pub fn corners(&self) -> Corners {
        match self.corner_radius {
            Some(r) => Corners::Uniform(r),
            None => Corners::from_parts(
                self.top_left_radius,
                self.top_right_radius,
                self.bottom_right_radius,
                self.bottom_left_radius,
            ),
        }
    }

    pub fn text_style(&self) -> TextStyle {
        TextStyle {
            characters: self.characters.clone(),
            font_size: self.font_size,
            font_name: self.font_name.clone(),
            line_height: self.line_height,
            letter_spacing: self.letter_spacing,
            align: self.text_align_horizontal,
            align_vertical: self.text_align_vertical,
            auto_resize: self.text_auto_resize,
            case: self.text_case,
            decoration: self.text_decoration,
        }
    }

    /// Rebuild a snapshot from a normalized node so it can be fed back through
    /// the pipeline. `origin` is the absolute position of the node's
    /// coordinate space (zero for top-level nodes).
    pub fn from_alt(node: &AltNode, origin: (f64, f64)) -> RawNode {
        let base = node.base();
        let size = dvec2(base.bounds.width, base.bounds.height);
        // the host reports the rotation anchor, not the bounding box corner
        let anchor = dvec2(base.bounds.x + origin.0, base.bounds.y + origin.1)
            - rotated_origin(DVec2::ZERO, size, base.rotation);
        let mut raw = RawNode {
            id: base.id.to_string(),
            name: base.name.clone(),
            x: anchor.x,
            y: anchor.y,
            width: base.bounds.width,
            height: base.bounds.height,
            rotation: base.rotation,
            visible: base.visual.visible,
            opacity: base.visual.opacity,
            blend_mode: base.visual.blend_mode,
            effects: base.visual.effects.clone(),
            layout_align: base.child_layout.align,
            layout_grow: if base.child_layout.grow { 1.0 } else { 0.0 },
            ..RawNode::default()
        };
        if let Some(paint) = node.paint() {
            raw.fills = paint.fills.clone();
            raw.strokes = paint.strokes.clone();
            raw.stroke_weight = paint.stroke_weight;
            raw.stroke_align = paint.stroke_align;
            match paint.corners {
                Corners::Uniform(r) => raw.corner_radius = Some(r),
                Corners::PerCorner {
                    top_left,
                    top_right,
                    bottom_right,
                    bottom_left,
                } => {
                    raw.top_left_radius = top_left;
                    raw.top_right_radius = top_right;
                    raw.bottom_right_radius = bottom_right;
                    raw.bottom_left_radius = bottom_left;
                }
            }
        }
        match node {
            AltNode::Rectangle(_) => raw.kind = RawKind::Rectangle,
            AltNode::Ellipse(_) => raw.kind = RawKind::Ellipse,
            AltNode::Text(t) => {
                raw.kind = RawKind::Text;
                let s = &t.text;
                raw.characters = s.characters.clone();
                raw.font_size = s.font_size;
                raw.font_name = s.font_name.clone();
                raw.line_height = s.line_height;
                raw.letter_spacing = s.letter_spacing;
                raw.text_align_horizontal = s.align;
                raw.text_align_vertical = s.align_vertical;
                raw.text_auto_resize = s.auto_resize;
                raw.text_case = s.case;
                raw.text_decoration = s.decoration;
            }
            AltNode::Group(g) => {
                // group children already share the group's coordinate space
                raw.kind = RawKind::Group;
                raw.children = g.children.iter().map(|c| RawNode::from_alt(c, origin)).collect();
            }
            AltNode::Container(c) => {
                raw.kind = RawKind::Frame;
                apply_layout(&mut raw, c);
                let inner = (raw.x, raw.y);
                raw.children = c.children.iter().map(|ch| RawNode::from_alt(ch, inner)).collect();
            }
        }
        raw
    }
}

fn apply_layout(raw: &mut RawNode, c: &ContainerNode) {
    let FlowLayout {
        mode,
        item_spacing,
        padding,
        primary_align,
        counter_align,
        primary_sizing,
        counter_sizing,
    } = c.layout;
    raw.layout_mode = mode;
    raw.item_spacing = item_spacing;
    raw.padding_top = padding.top;
    raw.padding_right = padding.right;
    raw.padding_bottom = padding.bottom;
    raw.padding_left = padding.left;
    raw.primary_axis_align_items = primary_align;
    raw.counter_axis_align_items = counter_align;
    raw.primary_axis_sizing_mode = primary_sizing;
    raw.counter_axis_sizing_mode = counter_sizing;
    raw.clips_content = c.clips_content;
}

/// A selection snapshot: the nodes plus the id of the node they sit in.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Selection {
    pub reference_parent: Option<String>,
    pub nodes: Vec<RawNode>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_host_defaults() {
        let node: RawNode =
            serde_json::from_str(r#"{"id": "1:2", "type": "RECTANGLE", "width": 10, "height": 5}"#)
                .unwrap();
        assert_eq!(node.kind, RawKind::Rectangle);
        assert!(node.visible);
        assert_eq!(node.opacity, 1.0);
        assert_eq!(node.layout_mode, LayoutMode::None);
        assert!(node.children.is_empty());
    }

    #[test]
    fn unknown_kinds_are_unsupported() {
        let node: RawNode = serde_json::from_str(r#"{"id": "1", "type": "STAR"}"#).unwrap();
        assert_eq!(node.kind, RawKind::Unsupported);
        let node: RawNode = serde_json::from_str(r#"{"id": "1"}"#).unwrap();
        assert_eq!(node.kind, RawKind::Unsupported);
    }

    #[test]
    fn corners_prefer_uniform_radius() {
        let mut node = RawNode::new(RawKind::Rectangle, "r", 0.0, 0.0, 10.0, 10.0);
        node.top_left_radius = 2.0;
        assert!(matches!(node.corners(), Corners::PerCorner { top_left, .. } if top_left == 2.0));
        node.corner_radius = Some(6.0);
        assert_eq!(node.corners(), Corners::Uniform(6.0));
    }

    #[test]
    fn selection_reads_reference_parent() {
        let sel: Selection = serde_json::from_str(
            r#"{"referenceParent": "0:1", "nodes": [{"id": "a", "type": "TEXT", "characters": "hi"}]}"#,
        )
        .unwrap();
        assert_eq!(sel.reference_parent.as_deref(), Some("0:1"));
        assert_eq!(sel.nodes[0].characters, "hi");
        assert_eq!(sel.nodes[0].text_style().characters, "hi");
    }

    #[test]
    fn frame_like_kinds() {
        assert!(RawKind::Frame.is_frame_like());
        assert!(RawKind::Instance.is_frame_like());
        assert!(RawKind::Component.is_frame_like());
        assert!(!RawKind::Group.is_frame_like());
    }
}
