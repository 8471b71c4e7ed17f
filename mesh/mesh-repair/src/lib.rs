//! Hole detection and patching for triangle meshes.
//!
//! This crate provides tools for:
//! - Mesh validation (watertight, manifold and winding checks)
//! - Boundary loop detection
//! - Hole filling by ear clipping on a best-fit plane
//! - Triangle intersection tests used to keep patches from cutting
//!   through the surrounding surface
//!
//! Repair never moves or adds vertices: every patch face is built from the
//! vertices of the loop it closes, wound to match the faces around it.
//!
//! # Example
//!
//! ```
//! use mesh_types::unit_cube;
//! use mesh_repair::{repair, validate_mesh};
//!
//! // A cube with its top missing
//! let mut mesh = unit_cube();
//! mesh.faces.drain(2..4);
//!
//! let report = validate_mesh(&mesh);
//! assert_eq!(report.hole_count, Some(1));
//!
//! let repaired = repair(&mesh).unwrap();
//! assert!(validate_mesh(&repaired.mesh).is_closed_volume());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod error;
mod fill;
pub mod holes;
pub mod intersect;
mod repair;
mod validate;

pub use error::{PatchFailure, RepairError, RepairResult, UnrepairableHole};
pub use fill::{Patch, fill_hole};
pub use holes::{BoundaryLoop, detect_holes};
pub use repair::{HoleRepair, RepairParams, repair, repair_with_params};
pub use validate::{MeshReport, validate_mesh};

// Re-export the adjacency index callers need for `detect_holes`
pub use mesh_types::MeshAdjacency;
