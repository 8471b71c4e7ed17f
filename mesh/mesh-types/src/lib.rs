//! Core mesh types shared by the repair and volume engines.
//!
//! This crate provides the foundational types:
//!
//! - [`Vertex`] - A point in 3D space
//! - [`IndexedMesh`] - A triangle mesh with indexed vertices
//! - [`Triangle`] - A concrete triangle with vertex positions
//! - [`MeshAdjacency`] - Hashed edge/vertex adjacency with directed edge uses
//!
//! # Units
//!
//! This library is **unit-agnostic**. All coordinates are `f64`.
//!
//! # Coordinate System
//!
//! Uses a **right-handed coordinate system**. Face winding is
//! **counter-clockwise (CCW) when viewed from outside**; normals point
//! outward by the right-hand rule.
//!
//! # Example
//!
//! ```
//! use mesh_types::{unit_cube, MeshAdjacency};
//!
//! let cube = unit_cube();
//! let adjacency = MeshAdjacency::build(&cube.faces);
//!
//! assert!(adjacency.is_watertight());
//! assert_eq!(adjacency.boundary_edge_count(), 0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod adjacency;
mod mesh;
mod triangle;
mod vertex;

pub use adjacency::{EdgeKey, EdgeUse, MeshAdjacency, PARALLEL_FACE_THRESHOLD};
pub use mesh::{IndexedMesh, InvalidIndex, unit_cube};
pub use triangle::Triangle;
pub use vertex::Vertex;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
