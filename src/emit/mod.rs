//! Emitter-facing facts and the decoration builder.
//!
//! The core never produces target text itself. Emitters pull facts per node
//! through [`crate::alt::NodeView`] or drive a [`NodeBuilder`] with their own
//! [`Format`]; [`ClassFormat`] is the reference format.

pub mod builder;
pub mod classes;
pub mod padding;
pub mod paint;
pub mod position;
pub mod size;

pub use builder::{Decoration, Format, NodeBuilder, SizeResolved, Unsized};
pub use classes::ClassFormat;
pub use padding::{FlowFact, PaddingSummary, SplitPadding, flow_fact, summarize_padding};
pub use position::{Anchor, Position, classify_position};
pub use size::{Fraction, SizeClass, SizeFacts, classify_size, match_fraction};
