//! Layout inference for absolute-positioned design scene graphs.
//!
//! A host document reports every node with an absolute box. `altflow`
//! normalizes such a selection into a small closed set of node shapes, groups
//! siblings under the rectangles that visually contain them, detects rows and
//! columns with their spacing, padding and alignment, and exposes per-node
//! facts (position, responsive size, snapped colors and metrics) that code
//! emitters pull on demand.
//!
//! ```
//! use altflow::raw::{RawKind, RawNode};
//!
//! let frame = RawNode::new(RawKind::Frame, "card", 0.0, 0.0, 100.0, 96.0).with_children(vec![
//!     RawNode::new(RawKind::Rectangle, "a", 0.0, 0.0, 100.0, 40.0),
//!     RawNode::new(RawKind::Rectangle, "b", 0.0, 48.0, 100.0, 40.0),
//! ]);
//! let tree = altflow::convert(&[frame], None)?;
//! let card = tree.get("card").unwrap();
//! assert_eq!(card.node().layout().unwrap().item_spacing, 8.0);
//! # Ok::<(), altflow::errors::InferError>(())
//! ```

pub mod alt;
pub mod color;
pub mod emit;
pub mod errors;
pub mod infer;
pub mod log;
pub mod quantize;
pub mod raw;
pub mod style;
pub mod types;

pub use alt::{AltNode, AltTree, Node, NodeId, NodeView};
pub use errors::{ColorError, InferError, SnapshotError};
pub use infer::Options;
pub use raw::{RawNode, Selection};

/// Convert a selection with the default tolerances.
///
/// `reference_parent` is the id of the node the selection sits in, if any;
/// top-level nodes are linked to it and never positioned against it.
pub fn convert(selection: &[RawNode], reference_parent: Option<&str>) -> Result<AltTree, InferError> {
    convert_with(selection, reference_parent, &Options::default())
}

/// Convert a selection with explicit tolerances
pub fn convert_with(
    selection: &[RawNode],
    reference_parent: Option<&str>,
    options: &Options,
) -> Result<AltTree, InferError> {
    let reference_parent = reference_parent.map(NodeId::from);
    let roots = infer::run(selection, reference_parent.clone(), options)?;
    Ok(AltTree::new(roots, reference_parent, *options))
}

/// Parse a JSON selection snapshot and convert it.
///
/// The snapshot is `{ "referenceParent": "...", "nodes": [...] }`. Parse
/// errors point at the offending location in `source`.
pub fn convert_json(source: &str) -> Result<AltTree, miette::Report> {
    let selection: Selection = serde_json::from_str(source)
        .map_err(|err| SnapshotError::from_json("snapshot.json", source, &err))?;
    Ok(convert(&selection.nodes, selection.reference_parent.as_deref())?)
}
