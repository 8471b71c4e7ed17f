//! Enclosed volume by the divergence theorem.
//!
//! Every face contributes the signed volume of the tetrahedron it spans
//! with the origin. On a closed, consistently wound surface the
//! contributions outside the solid cancel and the sum is the enclosed
//! volume: positive when faces wind counter-clockwise seen from outside.

use mesh_types::{IndexedMesh, MeshAdjacency};
use rayon::prelude::*;
use tracing::{debug, info};

use crate::error::{Operand, VolumeError, VolumeResult};
use crate::params::VolumeParams;
use crate::sum::CompensatedSum;

/// Faces per parallel work unit. Fixed so the parallel result does not
/// depend on the thread count.
const CHUNK_SIZE: usize = 4096;

/// Enclosed volume of a closed mesh with default parameters.
///
/// # Errors
///
/// See [`volume_with_params`].
///
/// # Example
///
/// ```
/// use mesh_types::unit_cube;
/// use mesh_volume::volume;
///
/// let v = volume(&unit_cube()).unwrap();
/// assert!((v - 1.0).abs() < 1e-12);
/// ```
pub fn volume(mesh: &IndexedMesh) -> VolumeResult<f64> {
    volume_with_params(mesh, &VolumeParams::default())
}

/// Enclosed volume of a closed mesh.
///
/// The mesh is never repaired here: any boundary edge is an error. A mesh
/// without faces encloses nothing and has volume `0.0`. The result keeps
/// its sign, so an inside-out mesh has negative volume.
///
/// # Errors
///
/// - [`VolumeError::InvalidIndex`] if a face references a missing vertex.
/// - [`VolumeError::NotClosed`] if the mesh has boundary edges.
/// - [`VolumeError::InconsistentWinding`] if `params.check_winding` is set
///   and some interior edge is traversed the same way by both faces.
pub fn volume_with_params(mesh: &IndexedMesh, params: &VolumeParams) -> VolumeResult<f64> {
    check_indices(mesh)?;

    let adjacency = MeshAdjacency::build_auto(&mesh.faces, params.parallel);

    let boundary_edge_count = adjacency.boundary_edge_count();
    if boundary_edge_count > 0 {
        debug!("Refusing volume of open mesh: {} boundary edges", boundary_edge_count);
        return Err(VolumeError::NotClosed {
            boundary_edge_count,
        });
    }

    if params.check_winding {
        let edge_count = adjacency.inconsistent_edge_count();
        if edge_count > 0 {
            debug!("Refusing volume of mesh with {} inconsistent edges", edge_count);
            return Err(VolumeError::InconsistentWinding { edge_count });
        }
    }

    let total = sum_contributions(mesh, params);

    debug!(
        "Volume of {} faces: {} ({})",
        mesh.face_count(),
        total,
        if params.use_parallel(mesh.face_count()) {
            "parallel"
        } else {
            "sequential"
        }
    );

    Ok(total)
}

/// Raw divergence-theorem sum of a mesh.
///
/// Does not check closedness or winding; on an open mesh the value
/// depends on where the origin is.
///
/// # Errors
///
/// Returns [`VolumeError::InvalidIndex`] if a face references a missing
/// vertex.
pub fn signed_volume(mesh: &IndexedMesh) -> VolumeResult<f64> {
    signed_volume_with_params(mesh, &VolumeParams::default())
}

/// Raw divergence-theorem sum of a mesh, with explicit parameters.
///
/// Only `parallel` and `parallel_threshold` are used.
///
/// # Errors
///
/// Returns [`VolumeError::InvalidIndex`] if a face references a missing
/// vertex.
pub fn signed_volume_with_params(mesh: &IndexedMesh, params: &VolumeParams) -> VolumeResult<f64> {
    check_indices(mesh)?;
    Ok(sum_contributions(mesh, params))
}

/// `volume(a) - volume(b)` with default parameters.
///
/// # Errors
///
/// See [`volume_difference_with_params`].
///
/// # Example
///
/// ```
/// use mesh_types::unit_cube;
/// use mesh_volume::volume_difference;
///
/// let small = unit_cube();
/// let mut big = unit_cube();
/// big.scale(2.0);
///
/// let diff = volume_difference(&big, &small).unwrap();
/// assert!((diff - 7.0).abs() < 1e-12);
/// ```
pub fn volume_difference(a: &IndexedMesh, b: &IndexedMesh) -> VolumeResult<f64> {
    volume_difference_with_params(a, b, &VolumeParams::default())
}

/// `volume(a) - volume(b)`.
///
/// `b` is evaluated first, so when both meshes are unusable the error
/// names `B`.
///
/// # Errors
///
/// Returns [`VolumeError::Operand`] wrapping the failure of whichever mesh
/// could not be measured.
pub fn volume_difference_with_params(
    a: &IndexedMesh,
    b: &IndexedMesh,
    params: &VolumeParams,
) -> VolumeResult<f64> {
    let volume_b = volume_with_params(b, params).map_err(|e| e.for_operand(Operand::B))?;
    let volume_a = volume_with_params(a, params).map_err(|e| e.for_operand(Operand::A))?;

    let difference = volume_a - volume_b;
    info!(
        "Volume difference: {} - {} = {}",
        volume_a, volume_b, difference
    );
    Ok(difference)
}

fn check_indices(mesh: &IndexedMesh) -> VolumeResult<()> {
    match mesh.find_invalid_index() {
        Some(bad) => Err(VolumeError::InvalidIndex {
            face: bad.face,
            index: bad.index,
            vertex_count: bad.vertex_count,
        }),
        None => Ok(()),
    }
}

/// Compensated sum of per-face tetrahedron volumes. Indices must be valid.
fn sum_contributions(mesh: &IndexedMesh, params: &VolumeParams) -> f64 {
    let contribution = |face: &[u32; 3]| mesh.face_triangle(*face).signed_volume();

    if params.use_parallel(mesh.face_count()) {
        let partials: Vec<CompensatedSum> = mesh
            .faces
            .par_chunks(CHUNK_SIZE)
            .map(|chunk| chunk.iter().map(contribution).collect::<CompensatedSum>())
            .collect();

        // Combined in chunk order
        let mut total = CompensatedSum::new();
        for partial in partials {
            total.merge(partial);
        }
        total.total()
    } else {
        mesh.faces.iter().map(contribution).collect::<CompensatedSum>().total()
    }
}
