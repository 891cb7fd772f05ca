//! Test support library
//! Provides various helper functions & utilities for tests.
#![allow(dead_code)]

use stencil_sign::float_types::Real;
use stencil_sign::params::{Limits, SignSpec};
use stencil_sign::{Mesh, SignRequest};

/// Quick helper to compare floating-point results with an acceptable tolerance.
pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

/// A request for `text` on a `width × height` plate, auto-sized, everything
/// else at the defaults.
pub fn request(text: &str, width: Real, height: Real) -> SignRequest {
    SignRequest {
        text: text.to_string(),
        width_mm: width,
        height_mm: height,
        font_size_mm: None,
        ..SignRequest::default()
    }
}

/// Validate `request` with the default limits, panicking on violations.
pub fn spec(request: &SignRequest) -> SignSpec {
    request
        .validate(&Limits::default())
        .unwrap_or_else(|e| panic!("{request:?} should be valid: {e}"))
        .spec
}

/// Returns `[min_x, min_y, min_z, max_x, max_y, max_z]` of a mesh.
pub fn bounding_box(mesh: &Mesh) -> [Real; 6] {
    let bb = mesh.bounding_box();
    [bb.mins.x, bb.mins.y, bb.mins.z, bb.maxs.x, bb.maxs.y, bb.maxs.z]
}

/// Asserts `mesh` is closed, consistently oriented and has positive volume.
pub fn assert_solid(mesh: &Mesh, what: &str) {
    let analysis = mesh.analyze_manifold();
    assert!(analysis.is_watertight(), "{what} is not watertight: {analysis:?}");
    assert!(mesh.volume() > 0.0, "{what} has volume {}", mesh.volume());
}
