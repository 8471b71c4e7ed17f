//! Repair open triangle meshes and compare closed meshes by volume.
//!
//! This umbrella crate re-exports the mesh-* crates and exposes the two
//! operations a host application needs as plain functions:
//!
//! - [`repair()`] - Close every hole of a mesh with patch triangles
//! - [`volume_difference()`] - Enclosed volume of A minus that of B
//!
//! The host converts its polygons to triangles before calling and writes
//! the returned mesh back itself; nothing here does I/O.
//!
//! # Quick Start
//!
//! ```
//! use mesh_compare::prelude::*;
//!
//! // A unit cube with its top missing
//! let mut open = unit_cube();
//! open.faces.drain(2..4);
//!
//! // Volume refuses open meshes
//! assert!(volume_difference(&open, &unit_cube()).is_err());
//!
//! // Repair, then compare
//! let repaired = repair(&open).unwrap();
//! assert_eq!(repaired.holes_found, 1);
//!
//! let mut big = unit_cube();
//! big.scale(2.0);
//! let diff = volume_difference(&repaired.mesh, &big).unwrap();
//! assert_eq!(format_volume_difference(diff), "-7.0");
//! ```
//!
//! # Module Organization
//!
//! - [`types`] - Core data structures: `IndexedMesh`, `Vertex`, `Triangle`,
//!   `MeshAdjacency`
//! - [`repair`](mod@repair) - Validation, hole detection and hole patching
//! - [`volume`](mod@volume) - Enclosed volume and compensated summation
//!
//! # Feature Flags
//!
//! - `serde` - Serialize/deserialize meshes and parameter structs

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

// =============================================================================
// Re-exports
// =============================================================================

/// Core data structures: `IndexedMesh`, `Vertex`, `Triangle`, `MeshAdjacency`.
pub use mesh_types as types;

/// Mesh validation, hole detection and hole patching.
pub use mesh_repair as repair;

/// Enclosed volume of closed meshes.
pub use mesh_volume as volume;

use mesh_repair::{HoleRepair, RepairResult};
use mesh_types::IndexedMesh;
use mesh_volume::VolumeResult;

// =============================================================================
// Host Operations
// =============================================================================

/// Close every hole of `mesh` with default parameters.
///
/// The returned mesh keeps every input vertex and face, in order, followed
/// by the patch faces. A mesh that is already closed comes back unchanged
/// with `holes_found == 0`. Patches of different holes are not checked
/// against each other.
///
/// # Errors
///
/// - [`RepairError::DegenerateInput`](mesh_repair::RepairError::DegenerateInput)
///   if the mesh has no triangles, an out-of-range index, or a boundary
///   that cannot be split into closed loops.
/// - [`RepairError::Unrepairable`](mesh_repair::RepairError::Unrepairable)
///   listing every hole that could not be patched.
pub fn repair(mesh: &IndexedMesh) -> RepairResult<HoleRepair> {
    mesh_repair::repair(mesh)
}

/// Enclosed volume of `a` minus that of `b`.
///
/// Both meshes must be closed and consistently wound; repair them first if
/// they are not.
///
/// # Errors
///
/// Returns [`VolumeError::Operand`](mesh_volume::VolumeError::Operand)
/// naming the mesh that could not be measured. `b` is checked first.
pub fn volume_difference(a: &IndexedMesh, b: &IndexedMesh) -> VolumeResult<f64> {
    mesh_volume::volume_difference(a, b)
}

/// Render a volume difference with one decimal place, as shown to users.
///
/// ```
/// assert_eq!(mesh_compare::format_volume_difference(26.04), "26.0");
/// assert_eq!(mesh_compare::format_volume_difference(-0.26), "-0.3");
/// ```
#[must_use]
pub fn format_volume_difference(difference: f64) -> String {
    format!("{difference:.1}")
}

// =============================================================================
// Prelude
// =============================================================================

/// Common imports for mesh comparison.
///
/// # Usage
///
/// ```
/// use mesh_compare::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use mesh_types::{IndexedMesh, MeshAdjacency, Triangle, Vertex, unit_cube};

    // Repair
    pub use mesh_repair::{HoleRepair, MeshReport, RepairError, RepairParams, validate_mesh};

    // Volume
    pub use mesh_volume::{Operand, VolumeError, VolumeParams};

    // Host operations
    pub use crate::{format_volume_difference, repair, volume_difference};
}

// =============================================================================
// Tests
// =============================================================================
