//! The converted forest and read access with parent context.

use crate::color::{self, ColorUsage, Palette};
use crate::emit::paint::{
    self, BlendFact, ColorFact, FillFact, RadiusFact, ShadowFact, StrokeFact, TextFact,
};
use crate::emit::{FlowFact, PaddingSummary, Position, SizeClass, SizeFacts};
use crate::emit::{classify_position, classify_size, flow_fact, summarize_padding};
use crate::infer::Options;
use crate::style::TextAutoResize;

use super::{AltNode, Node, NodeId};

/// Result of a conversion: the normalized roots plus the context every
/// computed fact needs
#[derive(Clone, Debug)]
pub struct AltTree {
    roots: Vec<AltNode>,
    reference_parent: Option<NodeId>,
    options: Options,
    palette: Palette,
}

impl AltTree {
    pub(crate) fn new(roots: Vec<AltNode>, reference_parent: Option<NodeId>, options: Options) -> Self {
        Self {
            roots,
            reference_parent,
            options,
            palette: Palette::default(),
        }
    }

    /// Replace the palette colors are matched against
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn roots(&self) -> &[AltNode] {
        &self.roots
    }

    pub fn into_roots(self) -> Vec<AltNode> {
        self.roots
    }

    pub fn reference_parent(&self) -> Option<&NodeId> {
        self.reference_parent.as_ref()
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Views of the top-level nodes
    pub fn views(&self) -> impl Iterator<Item = NodeView<'_>> {
        self.roots.iter().map(move |node| NodeView {
            tree: self,
            node,
            parent: None,
        })
    }

    /// Find a node by id anywhere in the forest
    pub fn get(&self, id: &str) -> Option<NodeView<'_>> {
        let mut stack: Vec<NodeView<'_>> = self.views().collect();
        while let Some(view) = stack.pop() {
            if view.node.id().as_str() == id {
                return Some(view);
            }
            stack.extend(view.children());
        }
        None
    }

    /// Number of nodes in the forest
    pub fn len(&self) -> usize {
        let mut count = 0;
        for root in &self.roots {
            root.walk(&mut |_| count += 1);
        }
        count
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Distinct solid colors used anywhere in the forest
    pub fn color_usage(&self) -> Vec<ColorUsage> {
        color::color_usage(&self.roots, &self.palette)
    }
}

/// A node together with its parent and the tree it belongs to.
///
/// Every emitter-facing fact is computed on demand from here.
#[derive(Clone, Copy, Debug)]
pub struct NodeView<'a> {
    tree: &'a AltTree,
    node: &'a AltNode,
    parent: Option<&'a AltNode>,
}

impl<'a> NodeView<'a> {
    pub fn node(&self) -> &'a AltNode {
        self.node
    }

    pub fn parent(&self) -> Option<&'a AltNode> {
        self.parent
    }

    pub fn tree(&self) -> &'a AltTree {
        self.tree
    }

    pub fn children(&self) -> impl Iterator<Item = NodeView<'a>> + use<'a> {
        let (tree, parent) = (self.tree, self.node);
        parent.children().iter().map(move |node| NodeView {
            tree,
            node,
            parent: Some(parent),
        })
    }

    /// Width and height classes. Auto-resizing text leaves the growing
    /// dimensions to its content.
    pub fn size(&self) -> SizeFacts {
        let mut facts = classify_size(self.node, self.parent, &self.tree.options);
        if let AltNode::Text(text) = self.node {
            match text.text.auto_resize {
                TextAutoResize::WidthAndHeight => {
                    facts.width = SizeClass::Auto;
                    facts.height = SizeClass::Auto;
                }
                TextAutoResize::Height => facts.height = SizeClass::Auto,
                TextAutoResize::None => {}
            }
        }
        facts
    }

    /// Whether `facts` pin the box to a known size. Text that never
    /// resizes counts as fixed.
    pub fn has_fixed_size(&self, facts: &SizeFacts) -> bool {
        match self.node {
            AltNode::Text(text) if text.text.auto_resize == TextAutoResize::None => true,
            _ => facts.is_fixed(),
        }
    }

    pub fn position(&self, has_fixed_size: bool) -> Position {
        classify_position(
            self.node,
            self.parent,
            self.tree.reference_parent.as_ref(),
            has_fixed_size,
        )
    }

    pub fn flow(&self) -> Option<FlowFact> {
        flow_fact(self.node, self.parent)
    }

    pub fn padding(&self) -> PaddingSummary {
        summarize_padding(self.node)
    }

    /// Background of shapes and containers; text uses [`Self::text_color`]
    pub fn fill(&self) -> Option<FillFact> {
        if self.node.is_text() {
            return None;
        }
        paint::fill_fact(&self.node.paint()?.fills, &self.tree.palette)
    }

    pub fn text_color(&self) -> Option<ColorFact> {
        match self.node {
            AltNode::Text(text) => paint::text_color_fact(&text.paint.fills, &self.tree.palette),
            _ => None,
        }
    }

    pub fn stroke(&self) -> Option<StrokeFact> {
        paint::stroke_fact(self.node.paint()?, &self.tree.palette)
    }

    pub fn radius(&self) -> Option<RadiusFact> {
        paint::radius_fact(self.node)
    }

    pub fn blend(&self) -> BlendFact {
        paint::blend_fact(self.node)
    }

    pub fn shadow(&self) -> ShadowFact {
        paint::shadow_fact(&self.node.base().visual.effects)
    }

    pub fn text(&self) -> Option<TextFact> {
        match self.node {
            AltNode::Text(text) => Some(paint::text_fact(&text.text)),
            _ => None,
        }
    }
}
