//! Order-sensitive decoration of one node.
//!
//! A [`NodeBuilder`] pulls facts from a [`NodeView`] one call at a time and
//! hands each to a [`Format`], which appends target-specific text to the
//! builder's buffer. Position depends on whether the size step pinned the box,
//! so `position` only exists after `size`:
//!
//! ```compile_fail
//! use altflow::emit::{ClassFormat, NodeBuilder};
//!
//! let tree = altflow::convert(&[], None).unwrap();
//! let view = tree.views().next().unwrap();
//! NodeBuilder::new(view, ClassFormat).position();
//! ```

use crate::alt::{AltNode, NodeView};
use crate::types::Axis;

use super::padding::{FlowFact, PaddingSummary};
use super::paint::{BlendFact, ColorFact, FillFact, RadiusFact, ShadowFact, StrokeFact, TextFact};
use super::position::Position;
use super::size::SizeFacts;

/// One fact handed to a [`Format`]
#[derive(Clone, Debug, PartialEq)]
pub enum Decoration {
    Size {
        facts: SizeFacts,
        /// Flow axis of the parent, if it flows
        parent_axis: Option<Axis>,
    },
    Position(Position),
    /// The node is the positioning context of its children
    Relative,
    Flow(FlowFact),
    Padding(PaddingSummary),
    Fill(FillFact),
    TextColor(ColorFact),
    Stroke(StrokeFact),
    Radius(RadiusFact),
    Blend(BlendFact),
    Shadow(ShadowFact),
    Text(TextFact),
}

/// Turns decorations into output for one target
pub trait Format {
    fn render(&mut self, decoration: &Decoration, out: &mut String);
}

impl<F: Format + ?Sized> Format for &mut F {
    fn render(&mut self, decoration: &Decoration, out: &mut String) {
        (**self).render(decoration, out);
    }
}

/// Size not decided yet
#[derive(Clone, Copy, Debug, Default)]
pub struct Unsized;

/// Size decided; position may follow
#[derive(Clone, Copy, Debug)]
pub struct SizeResolved {
    facts: SizeFacts,
    fixed: bool,
}

/// Chainable decoration of a single node
pub struct NodeBuilder<'a, F: Format, S = Unsized> {
    view: NodeView<'a>,
    format: F,
    out: String,
    state: S,
}

impl<'a, F: Format> NodeBuilder<'a, F, Unsized> {
    pub fn new(view: NodeView<'a>, format: F) -> Self {
        Self {
            view,
            format,
            out: String::new(),
            state: Unsized,
        }
    }

    /// Classify width and height. Must come before [`NodeBuilder::position`].
    pub fn size(mut self) -> NodeBuilder<'a, F, SizeResolved> {
        let facts = self.view.size();
        let fixed = self.view.has_fixed_size(&facts);
        let parent_axis = self
            .view
            .parent()
            .and_then(AltNode::layout)
            .and_then(|l| l.mode.primary_axis());
        self.decorate(Decoration::Size { facts, parent_axis });
        NodeBuilder {
            view: self.view,
            format: self.format,
            out: self.out,
            state: SizeResolved { facts, fixed },
        }
    }
}

impl<F: Format> NodeBuilder<'_, F, SizeResolved> {
    /// Place the node inside a relative parent
    pub fn position(mut self) -> Self {
        let position = self.view.position(self.state.fixed);
        if position != Position::Static {
            self.decorate(Decoration::Position(position));
        }
        self
    }

    pub fn size_facts(&self) -> SizeFacts {
        self.state.facts
    }

    pub fn has_fixed_size(&self) -> bool {
        self.state.fixed
    }
}

impl<'a, F: Format, S> NodeBuilder<'a, F, S> {
    fn decorate(&mut self, decoration: Decoration) {
        self.format.render(&decoration, &mut self.out);
    }

    fn decorate_some(mut self, decoration: Option<Decoration>) -> Self {
        if let Some(decoration) = decoration {
            self.decorate(decoration);
        }
        self
    }

    pub fn view(&self) -> &NodeView<'a> {
        &self.view
    }

    /// Visibility, rotation and opacity
    pub fn blend(self) -> Self {
        let blend = self.view.blend();
        self.decorate_some((blend != BlendFact::default()).then_some(Decoration::Blend(blend)))
    }

    /// Mark a container whose children are positioned against it
    pub fn relative(self) -> Self {
        let relative = self.view.node().is_relative();
        self.decorate_some(relative.then_some(Decoration::Relative))
    }

    /// Row or column, spacing and alignment of a flow container
    pub fn flow(self) -> Self {
        let flow = self.view.flow();
        self.decorate_some(flow.map(Decoration::Flow))
    }

    pub fn padding(self) -> Self {
        let padding = self.view.padding();
        self.decorate_some((padding != PaddingSummary::None).then_some(Decoration::Padding(padding)))
    }

    /// Background of shapes and containers
    pub fn fill(self) -> Self {
        let fill = self.view.fill();
        self.decorate_some(fill.map(Decoration::Fill))
    }

    pub fn text_color(self) -> Self {
        let color = self.view.text_color();
        self.decorate_some(color.map(Decoration::TextColor))
    }

    pub fn stroke(self) -> Self {
        let stroke = self.view.stroke();
        self.decorate_some(stroke.map(Decoration::Stroke))
    }

    pub fn radius(self) -> Self {
        let radius = self.view.radius();
        self.decorate_some(radius.map(Decoration::Radius))
    }

    pub fn shadow(self) -> Self {
        let shadow = self.view.shadow();
        self.decorate_some((!shadow.is_empty()).then_some(Decoration::Shadow(shadow)))
    }

    /// Typography of text nodes
    pub fn text(self) -> Self {
        let text = self.view.text();
        self.decorate_some(text.map(Decoration::Text))
    }

    /// Everything emitted so far
    pub fn finish(self) -> String {
        self.out
    }
}
