//! Default tolerances and placeholder styling (all in design units)

use crate::style::UnitRgb;

/// Smallest gap still treated as "no overlap" when testing a flow axis
pub const FLOW_TOLERANCE: f64 = -2.0;
/// A child must overshoot the content box by more than this to stretch
pub const STRETCH_TOLERANCE: f64 = 2.0;
/// Distance from the parent center within which a child counts as centered
pub const ALIGN_THRESHOLD: f64 = 4.0;
/// Extents above this are left to intrinsic sizing
pub const SIZE_CEILING: f64 = 384.0;
/// Relative tolerance for fraction matching
pub const RATIO_TOLERANCE: f64 = 0.01;

/// Corner radius given to vector and icon placeholders
pub const PLACEHOLDER_RADIUS: f64 = 8.0;
/// Opacity of vector and icon placeholder fills
pub const PLACEHOLDER_OPACITY: f64 = 0.5;
/// Fill of a vector leaf that had none
pub const VECTOR_PLACEHOLDER: UnitRgb = UnitRgb::new(0.5, 0.23, 0.27);

/// Lines become boxes at least this tall
pub const MIN_LINE_HEIGHT: f64 = 1.0;
