//! Geometry helpers for the normalizer

use glam::{DAffine2, DMat2, DVec2, dvec2};

/// Top-left corner of the axis-aligned box around a rotated node.
///
/// `anchor` is the node's transform origin (the host's x/y), `size` its
/// unrotated width and height, and `degrees` the host rotation, which is
/// counter-clockwise in a y-down space. Returns `anchor` unchanged when the
/// rotation rounds to zero.
pub fn rotated_origin(anchor: DVec2, size: DVec2, degrees: f64) -> DVec2 {
    if degrees.round() == 0.0 {
        return anchor;
    }
    let (s, c) = degrees.to_radians().sin_cos();
    // rows [c, s] and [-s, c], stored column major
    let linear = DMat2::from_cols(dvec2(c, -s), dvec2(s, c));
    let transform = DAffine2::from_mat2_translation(linear, anchor);

    let corners = [
        dvec2(0.0, 0.0),
        dvec2(size.x, 0.0),
        dvec2(0.0, size.y),
        dvec2(size.x, size.y),
    ];
    corners
        .iter()
        .map(|&p| transform.transform_point2(p))
        .fold(DVec2::splat(f64::INFINITY), DVec2::min)
}
