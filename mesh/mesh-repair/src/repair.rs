//! Hole repair: detect every boundary loop, patch it, merge the patches.

use mesh_types::{IndexedMesh, MeshAdjacency};
use rayon::prelude::*;
use tracing::{debug, info, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{PatchFailure, RepairError, RepairResult, UnrepairableHole};
use crate::fill::{Patch, triangulate_loop};
use crate::holes::{BoundaryLoop, detect_holes};

/// Configuration parameters for hole repair.
///
/// Tolerances are relative to the size of the geometry being compared, so
/// the defaults work for any unit.
///
/// # Example
///
/// ```
/// use mesh_repair::RepairParams;
///
/// // Use defaults
/// let params = RepairParams::default();
///
/// // Or customize for your use case
/// let params = RepairParams {
///     max_retries: 256,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RepairParams {
    /// Maximum number of rejected ear candidates per hole.
    ///
    /// Once exceeded the hole is reported as unrepairable.
    /// Default: `64`
    pub max_retries: usize,

    /// Relative tolerance for convexity and intersection tests.
    ///
    /// Default: `1e-9`
    pub epsilon: f64,

    /// Whether candidate triangles are checked against the existing
    /// surface and the rest of the patch.
    ///
    /// Default: `true`
    pub check_intersections: bool,

    /// Whether holes are filled on the rayon thread pool.
    ///
    /// Default: `true`
    pub parallel: bool,
}

impl Default for RepairParams {
    fn default() -> Self {
        Self {
            max_retries: 64,
            epsilon: 1e-9,
            check_intersections: true,
            parallel: true,
        }
    }
}

impl RepairParams {
    /// Create params for noisy scan and segmentation output.
    ///
    /// Holes on scans are ragged, so more candidates are tried and small
    /// overlaps are tolerated.
    #[must_use]
    pub fn for_scans() -> Self {
        Self {
            max_retries: 256,
            epsilon: 1e-7,
            ..Default::default()
        }
    }

    /// Create params for clean CAD geometry.
    ///
    /// Uses a tight tolerance and gives up early.
    #[must_use]
    pub fn for_cad() -> Self {
        Self {
            max_retries: 16,
            epsilon: 1e-12,
            ..Default::default()
        }
    }

    /// Set the per-hole budget of rejected ear candidates.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_repair::RepairParams;
    ///
    /// let params = RepairParams::default().with_max_retries(8);
    /// assert_eq!(params.max_retries, 8);
    /// ```
    #[must_use]
    pub fn with_max_retries(mut self, retries: usize) -> Self {
        self.max_retries = retries;
        self
    }

    /// Set the relative geometric tolerance.
    #[must_use]
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Enable or disable the intersection guard.
    #[must_use]
    pub fn with_check_intersections(mut self, check: bool) -> Self {
        self.check_intersections = check;
        self
    }

    /// Enable or disable parallel hole filling.
    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

/// A closed mesh and the patches that closed it.
#[derive(Debug, Clone)]
pub struct HoleRepair {
    /// Input vertices and faces followed by every patch face.
    pub mesh: IndexedMesh,
    /// Number of boundary loops found in the input.
    pub holes_found: usize,
    /// One patch per hole, in detection order.
    pub patches: Vec<Patch>,
}

impl HoleRepair {
    /// Total number of faces added.
    #[must_use]
    pub fn triangles_added(&self) -> usize {
        self.patches.iter().map(Patch::triangle_count).sum()
    }

    /// Check if any holes were closed.
    #[must_use]
    pub fn had_changes(&self) -> bool {
        self.holes_found > 0
    }
}

impl std::fmt::Display for HoleRepair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Hole repair: {} holes closed with {} triangles, {} faces total",
            self.holes_found,
            self.triangles_added(),
            self.mesh.face_count()
        )
    }
}

/// Close every hole of a mesh with default parameters.
///
/// # Errors
///
/// See [`repair_with_params`].
///
/// # Example
///
/// ```
/// use mesh_types::unit_cube;
/// use mesh_repair::repair;
///
/// let mut mesh = unit_cube();
/// mesh.faces.truncate(10); // drop the +X face
///
/// let repaired = repair(&mesh).unwrap();
/// assert_eq!(repaired.holes_found, 1);
/// assert_eq!(repaired.triangles_added(), 2);
/// assert_eq!(repaired.mesh.face_count(), 12);
/// ```
pub fn repair(mesh: &IndexedMesh) -> RepairResult<HoleRepair> {
    repair_with_params(mesh, &RepairParams::default())
}

/// Close every hole of a mesh.
///
/// The input is not modified. The returned mesh holds the input vertices
/// unchanged and the input faces followed by the patch faces. A closed
/// input comes back with the same faces and `holes_found == 0`.
///
/// Each patch is checked only against the faces around its own hole and
/// its own triangles. Patches of different holes are not checked against
/// each other, so two holes facing each other can get crossing patches.
///
/// # Errors
///
/// - [`RepairError::DegenerateInput`] if the mesh has no faces, a face
///   references a missing vertex or repeats a vertex, or the boundary
///   cannot be split into loops.
/// - [`RepairError::Unrepairable`] listing every hole for which no
///   acceptable triangulation was found.
pub fn repair_with_params(mesh: &IndexedMesh, params: &RepairParams) -> RepairResult<HoleRepair> {
    check_faces(mesh)?;

    let adjacency = MeshAdjacency::build_auto(&mesh.faces, params.parallel);
    let holes = detect_holes(&adjacency)?;

    if holes.is_empty() {
        debug!("Mesh is closed, nothing to repair");
        return Ok(HoleRepair {
            mesh: mesh.clone(),
            holes_found: 0,
            patches: Vec::new(),
        });
    }

    let fill = |hole: &BoundaryLoop| triangulate_loop(mesh, &adjacency, hole, params);
    let outcomes: Vec<Result<Vec<[u32; 3]>, PatchFailure>> = if params.parallel && holes.len() > 1
    {
        holes.par_iter().map(fill).collect()
    } else {
        holes.iter().map(fill).collect()
    };

    let mut patches = Vec::with_capacity(holes.len());
    let mut failed = Vec::new();
    for (index, (hole, outcome)) in holes.iter().zip(outcomes).enumerate() {
        match outcome {
            Ok(faces) => patches.push(Patch {
                boundary: hole.vertices.clone(),
                faces,
            }),
            Err(reason) => {
                warn!(
                    "Could not patch hole {} with {} edges: {}",
                    index,
                    hole.edge_count(),
                    reason
                );
                failed.push(UnrepairableHole {
                    index,
                    vertices: hole.vertices.clone(),
                    reason,
                });
            }
        }
    }

    if !failed.is_empty() {
        return Err(RepairError::Unrepairable { holes: failed });
    }

    let added: usize = patches.iter().map(Patch::triangle_count).sum();
    let mut repaired = IndexedMesh::with_capacity(mesh.vertex_count(), mesh.face_count() + added);
    repaired.vertices.extend_from_slice(&mesh.vertices);
    repaired.faces.extend_from_slice(&mesh.faces);
    for patch in &patches {
        repaired.faces.extend_from_slice(&patch.faces);
    }

    info!("Filled {} holes with {} triangles", patches.len(), added);

    Ok(HoleRepair {
        mesh: repaired,
        holes_found: holes.len(),
        patches,
    })
}

/// Reject inputs the boundary tracer cannot reason about.
fn check_faces(mesh: &IndexedMesh) -> RepairResult<()> {
    if mesh.faces.is_empty() {
        return Err(RepairError::degenerate("mesh has no triangles", None));
    }

    if let Some(bad) = mesh.find_invalid_index() {
        return Err(RepairError::degenerate(
            format!(
                "face {} references vertex {} but the mesh has {} vertices",
                bad.face, bad.index, bad.vertex_count
            ),
            Some(bad.index),
        ));
    }

    if let Some(face) = mesh
        .faces
        .iter()
        .find(|[a, b, c]| a == b || b == c || a == c)
    {
        return Err(RepairError::degenerate(
            "face repeats a vertex",
            Some(face[0]),
        ));
    }

    Ok(())
}
