//! Structural inference over a host snapshot.
//!
//! The pipeline is depth first: every frame or group has its children
//! normalized, grouped under enclosing rectangles and flowed before the frame
//! itself is attached to its parent, so inner containers are always resolved
//! before outer ones.

pub mod containment;
pub mod defaults;
pub mod flow;
pub mod geometry;
pub mod normalize;

use glam::DVec2;

use crate::alt::{AltNode, Node, NodeId};
use crate::errors::InferError;
use crate::raw::RawNode;

/// Tolerances used by the inference passes and the size classifier
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Options {
    /// Gaps at or above this still count as a clean flow (negative: overlap)
    pub flow_tolerance: f64,
    /// Cross-axis overshoot beyond the content box that makes a child stretch
    pub stretch_tolerance: f64,
    /// Center offset within which a child is considered centered
    pub align_threshold: f64,
    /// Extents above this are sized intrinsically
    pub size_ceiling: f64,
    /// Tolerance when matching a size ratio to a fraction
    pub ratio_tolerance: f64,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            flow_tolerance: defaults::FLOW_TOLERANCE,
            stretch_tolerance: defaults::STRETCH_TOLERANCE,
            align_threshold: defaults::ALIGN_THRESHOLD,
            size_ceiling: defaults::SIZE_CEILING,
            ratio_tolerance: defaults::RATIO_TOLERANCE,
        }
    }
}

/// Where a run of raw siblings is being attached
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scope {
    /// Id recorded as the parent of every node produced in this scope
    pub parent: Option<NodeId>,
    /// Absolute position of the coordinate space children are made local to
    pub origin: DVec2,
}

impl Scope {
    /// Top of a selection: absolute coordinates, attached to `reference_parent`
    pub fn top(reference_parent: Option<NodeId>) -> Self {
        Self {
            parent: reference_parent,
            origin: DVec2::ZERO,
        }
    }
}

/// Run the full pipeline over a selection
pub fn run(
    selection: &[RawNode],
    reference_parent: Option<NodeId>,
    options: &Options,
) -> Result<Vec<AltNode>, InferError> {
    normalize::normalize(selection, &Scope::top(reference_parent), options)
}

/// Containment then flow inference on a container or group.
///
/// Containment needs two or more children and flows its result itself;
/// smaller nodes go straight to flow inference so groups never survive
/// this step.
pub fn structure(node: AltNode, options: &Options) -> Result<AltNode, InferError> {
    if node.children().len() >= 2 {
        containment::infer_containment(node, options)
    } else {
        flow::infer_flow_layout(node, options)
    }
}
