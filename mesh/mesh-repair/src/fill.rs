//! Hole triangulation.
//!
//! Each boundary loop is projected onto its least-squares plane and
//! triangulated by ear clipping. Ears are tried best-first (largest
//! minimum angle) and every candidate must pass an intersection guard
//! against the triangles already accepted for the patch and against the
//! existing faces around the hole. No vertices are added.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use mesh_types::{IndexedMesh, MeshAdjacency, Point3, Triangle, Vector3};
use nalgebra::{Matrix3, SymmetricEigen};
use tracing::debug;

use crate::error::{PatchFailure, RepairError, RepairResult, UnrepairableHole};
use crate::holes::BoundaryLoop;
use crate::intersect::{indexed_triangles_intersect, orient2d};
use crate::repair::RepairParams;

/// Faces that close one hole, wound consistently with the faces around it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch {
    /// The loop this patch closes, in boundary-edge order.
    pub boundary: Vec<u32>,
    /// New faces, built only from loop vertices.
    pub faces: Vec<[u32; 3]>,
}

impl Patch {
    /// Number of triangles in the patch.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.faces.len()
    }
}

/// Triangulate a single hole.
///
/// `adjacency` must describe `mesh`; it is used to find the existing faces
/// the patch must not cross.
///
/// # Errors
///
/// Returns [`RepairError::DegenerateInput`] if the loop references a vertex
/// the mesh does not have, and [`RepairError::Unrepairable`] (with this one
/// hole) if no acceptable triangulation is found.
///
/// # Example
///
/// ```
/// use mesh_types::{unit_cube, MeshAdjacency};
/// use mesh_repair::{detect_holes, fill_hole, RepairParams};
///
/// let mut mesh = unit_cube();
/// mesh.faces.truncate(10);
///
/// let adjacency = MeshAdjacency::build(&mesh.faces);
/// let holes = detect_holes(&adjacency).unwrap();
/// let patch = fill_hole(&mesh, &adjacency, &holes[0], &RepairParams::default()).unwrap();
///
/// assert_eq!(patch.triangle_count(), 2);
/// ```
pub fn fill_hole(
    mesh: &IndexedMesh,
    adjacency: &MeshAdjacency,
    boundary: &BoundaryLoop,
    params: &RepairParams,
) -> RepairResult<Patch> {
    if let Some(&v) = boundary
        .vertices
        .iter()
        .find(|&&v| v as usize >= mesh.vertices.len())
    {
        return Err(RepairError::degenerate(
            "boundary loop references a missing vertex",
            Some(v),
        ));
    }

    triangulate_loop(mesh, adjacency, boundary, params)
        .map(|faces| Patch {
            boundary: boundary.vertices.clone(),
            faces,
        })
        .map_err(|reason| RepairError::Unrepairable {
            holes: vec![UnrepairableHole {
                index: 0,
                vertices: boundary.vertices.clone(),
                reason,
            }],
        })
}

/// Ear-clip one loop whose vertex indices are known to be valid.
pub(crate) fn triangulate_loop(
    mesh: &IndexedMesh,
    adjacency: &MeshAdjacency,
    boundary: &BoundaryLoop,
    params: &RepairParams,
) -> Result<Vec<[u32; 3]>, PatchFailure> {
    let order = boundary.patch_order();
    let n = order.len();
    if n < 3 {
        return Err(PatchFailure::NoValidEar { remaining: n });
    }

    let positions: Vec<Point3<f64>> = order
        .iter()
        .map(|&v| mesh.vertices[v as usize].position)
        .collect();
    let projected = project_to_plane(&positions);

    let extent = projected
        .iter()
        .flat_map(|p| p.iter().map(|c| c.abs()))
        .fold(1.0_f64, f64::max);
    let area_tol = params.epsilon * extent * extent;

    let guard = PatchGuard::new(mesh, adjacency, &order, params);
    let mut clipper = EarClipper::new(&positions, &projected, area_tol);

    let mut faces: Vec<[u32; 3]> = Vec::with_capacity(n - 2);
    let mut accepted: Vec<([u32; 3], Triangle)> = Vec::with_capacity(n - 2);
    let mut rejections = 0usize;

    while clipper.remaining > 3 {
        if clipper.ears.is_empty() {
            return Err(PatchFailure::NoValidEar {
                remaining: clipper.remaining,
            });
        }

        let mut clipped = None;
        for key in &clipper.ears {
            let [a, b, c] = clipper.corners(key.vertex);
            let ids = [order[a], order[b], order[c]];
            let tri = Triangle::new(positions[a], positions[b], positions[c]);

            if guard.accepts(ids, &tri, &accepted) {
                clipped = Some((b, ids, tri));
                break;
            }

            rejections += 1;
            if rejections > params.max_retries {
                return Err(PatchFailure::RetriesExhausted {
                    retries: rejections,
                });
            }
        }

        let Some((b, ids, tri)) = clipped else {
            return Err(PatchFailure::AllCandidatesIntersect {
                candidates: clipper.ears.len(),
            });
        };

        faces.push(ids);
        accepted.push((ids, tri));
        clipper.clip(b);
    }

    // The last triangle is forced, only the guard applies
    let [a, b, c] = clipper.last_triangle();
    let ids = [order[a], order[b], order[c]];
    let tri = Triangle::new(positions[a], positions[b], positions[c]);
    if !guard.accepts(ids, &tri, &accepted) {
        rejections += 1;
        if rejections > params.max_retries {
            return Err(PatchFailure::RetriesExhausted {
                retries: rejections,
            });
        }
        return Err(PatchFailure::AllCandidatesIntersect { candidates: 1 });
    }
    faces.push(ids);

    debug!(
        "Filled hole with {} edges using {} triangles ({} rejected candidates)",
        n,
        faces.len(),
        rejections
    );

    Ok(faces)
}

/// Position of an ear in the candidate order: best quality first, ties in
/// polygon order.
#[derive(Debug, Clone, Copy)]
struct EarKey {
    quality: f64,
    vertex: usize,
}

impl Ord for EarKey {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .quality
            .total_cmp(&self.quality)
            .then(self.vertex.cmp(&other.vertex))
    }
}

impl PartialOrd for EarKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for EarKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for EarKey {}

#[derive(Debug, Clone, Copy)]
enum EarState {
    /// Not strictly convex in the projection.
    Reflex,
    /// Convex, but the named vertex lies inside or on the ear.
    Blocked(usize),
    /// Valid ear with its quality.
    Ear(f64),
}

/// Incremental ear bookkeeping for one projected polygon.
///
/// An ear is strictly convex in the projection and contains no other
/// remaining vertex, not even on its border. Quality is the smallest 3D
/// interior angle. Clipping a vertex only changes the state of its two
/// neighbours and of the ears it was blocking, so only those are
/// reclassified.
struct EarClipper<'a> {
    positions: &'a [Point3<f64>],
    projected: &'a [[f64; 2]],
    area_tol: f64,
    prev: Vec<usize>,
    next: Vec<usize>,
    alive: Vec<bool>,
    state: Vec<EarState>,
    // Vertices whose ear was last found blocked by this vertex
    blocking: Vec<Vec<usize>>,
    ears: BTreeSet<EarKey>,
    remaining: usize,
}

impl<'a> EarClipper<'a> {
    fn new(positions: &'a [Point3<f64>], projected: &'a [[f64; 2]], area_tol: f64) -> Self {
        let n = projected.len();
        let mut clipper = Self {
            positions,
            projected,
            area_tol,
            prev: (0..n).map(|i| (i + n - 1) % n).collect(),
            next: (0..n).map(|i| (i + 1) % n).collect(),
            alive: vec![true; n],
            state: vec![EarState::Reflex; n],
            blocking: vec![Vec::new(); n],
            ears: BTreeSet::new(),
            remaining: n,
        };
        if n > 3 {
            for i in 0..n {
                clipper.classify(i);
            }
        }
        clipper
    }

    fn corners(&self, b: usize) -> [usize; 3] {
        [self.prev[b], b, self.next[b]]
    }

    /// The three remaining vertices in polygon order.
    fn last_triangle(&self) -> [usize; 3] {
        let mut corners = [0; 3];
        for (slot, i) in corners
            .iter_mut()
            .zip((0..self.alive.len()).filter(|&i| self.alive[i]))
        {
            *slot = i;
        }
        corners
    }

    fn classify(&mut self, b: usize) {
        if let EarState::Ear(quality) = self.state[b] {
            self.ears.remove(&EarKey { quality, vertex: b });
        }

        let [a, _, c] = self.corners(b);
        let (pa, pb, pc) = (self.projected[a], self.projected[b], self.projected[c]);

        let state = if orient2d(pa, pb, pc) <= self.area_tol {
            EarState::Reflex
        } else if let Some(j) = self.find_blocker([a, b, c]) {
            self.blocking[j].push(b);
            EarState::Blocked(j)
        } else {
            let quality =
                Triangle::new(self.positions[a], self.positions[b], self.positions[c]).min_angle();
            self.ears.insert(EarKey { quality, vertex: b });
            EarState::Ear(quality)
        };
        self.state[b] = state;
    }

    /// First remaining vertex inside or on the triangle `corners`.
    fn find_blocker(&self, corners: [usize; 3]) -> Option<usize> {
        let [pa, pb, pc] = corners.map(|i| self.projected[i]);
        (0..self.alive.len()).find(|&j| {
            self.alive[j]
                && !corners.contains(&j)
                && inside_or_on(self.projected[j], pa, pb, pc, self.area_tol)
        })
    }

    fn clip(&mut self, b: usize) {
        if let EarState::Ear(quality) = self.state[b] {
            self.ears.remove(&EarKey { quality, vertex: b });
        }
        let [a, _, c] = self.corners(b);
        self.next[a] = c;
        self.prev[c] = a;
        self.alive[b] = false;
        self.remaining -= 1;

        let waiting = std::mem::take(&mut self.blocking[b]);
        if self.remaining <= 3 {
            return;
        }

        self.classify(a);
        self.classify(c);
        for w in waiting {
            // Skip entries left over from an earlier classification
            let still_blocked = matches!(self.state[w], EarState::Blocked(j) if j == b);
            if w != a && w != c && self.alive[w] && still_blocked {
                self.classify(w);
            }
        }
    }
}

fn inside_or_on(p: [f64; 2], a: [f64; 2], b: [f64; 2], c: [f64; 2], area_tol: f64) -> bool {
    orient2d(a, b, p) >= -area_tol && orient2d(b, c, p) >= -area_tol && orient2d(c, a, p) >= -area_tol
}

/// Project loop positions into the (u, v) basis of their best-fit plane.
///
/// The plane normal is the covariance eigenvector with the smallest
/// eigenvalue, flipped to agree with the Newell normal of the polygon so
/// the loop runs counter-clockwise in the projection.
fn project_to_plane(positions: &[Point3<f64>]) -> Vec<[f64; 2]> {
    #[allow(clippy::cast_precision_loss)]
    let inv_n = 1.0 / positions.len() as f64;
    let centroid = Point3::from(
        positions
            .iter()
            .fold(Vector3::zeros(), |acc, p| acc + p.coords)
            * inv_n,
    );

    let covariance = positions.iter().fold(Matrix3::zeros(), |acc, p| {
        let d = p - centroid;
        acc + d * d.transpose()
    });

    let eigen = SymmetricEigen::new(covariance);
    let smallest = eigen.eigenvalues.imin();
    let mut normal: Vector3<f64> = eigen.eigenvectors.column(smallest).into_owned();

    let newell = newell_normal(positions, &centroid);
    if normal.dot(&newell) < 0.0 {
        normal = -normal;
    }

    let axis = if normal.x.abs() <= normal.y.abs() && normal.x.abs() <= normal.z.abs() {
        Vector3::x()
    } else if normal.y.abs() <= normal.z.abs() {
        Vector3::y()
    } else {
        Vector3::z()
    };
    let u = normal.cross(&axis).normalize();
    let v = normal.cross(&u);

    positions
        .iter()
        .map(|p| {
            let d = p - centroid;
            [d.dot(&u), d.dot(&v)]
        })
        .collect()
}

/// Area-weighted polygon normal (not normalized).
fn newell_normal(positions: &[Point3<f64>], centroid: &Point3<f64>) -> Vector3<f64> {
    let n = positions.len();
    (0..n).fold(Vector3::zeros(), |acc, i| {
        let v0 = positions[i] - centroid;
        let v1 = positions[(i + 1) % n] - centroid;
        acc + v0.cross(&v1)
    })
}

/// Rejects patch triangles that would cut through the surrounding surface
/// or through the patch itself.
struct PatchGuard {
    enabled: bool,
    epsilon: f64,
    nearby: Vec<([u32; 3], Triangle)>,
}

impl PatchGuard {
    fn new(
        mesh: &IndexedMesh,
        adjacency: &MeshAdjacency,
        loop_vertices: &[u32],
        params: &RepairParams,
    ) -> Self {
        if !params.check_intersections {
            return Self {
                enabled: false,
                epsilon: params.epsilon,
                nearby: Vec::new(),
            };
        }

        let mut face_ids: Vec<usize> = loop_vertices
            .iter()
            .flat_map(|&v| adjacency.faces_for_vertex(v).iter().copied())
            .collect();
        face_ids.sort_unstable();
        face_ids.dedup();

        let nearby = face_ids
            .into_iter()
            .filter_map(|f| {
                let face = *mesh.faces.get(f)?;
                mesh.triangle(f).map(|tri| (face, tri))
            })
            .collect();

        Self {
            enabled: true,
            epsilon: params.epsilon,
            nearby,
        }
    }

    fn accepts(&self, ids: [u32; 3], tri: &Triangle, accepted: &[([u32; 3], Triangle)]) -> bool {
        if !self.enabled {
            return true;
        }

        // A face on the same corners duplicates the surface
        if self
            .nearby
            .iter()
            .any(|(other_ids, _)| same_vertex_set(ids, *other_ids))
        {
            return false;
        }

        !self
            .nearby
            .iter()
            .chain(accepted.iter())
            .any(|(other_ids, other)| {
                indexed_triangles_intersect(ids, tri, *other_ids, other, self.epsilon)
            })
    }
}

fn same_vertex_set(mut a: [u32; 3], mut b: [u32; 3]) -> bool {
    a.sort_unstable();
    b.sort_unstable();
    a == b
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::holes::detect_holes;
    use approx::assert_relative_eq;
    use mesh_types::{Vertex, unit_cube};

    fn fill_all(mesh: &IndexedMesh) -> Vec<Patch> {
        let adjacency = MeshAdjacency::build(&mesh.faces);
        detect_holes(&adjacency)
            .unwrap()
            .iter()
            .map(|hole| fill_hole(mesh, &adjacency, hole, &RepairParams::default()).unwrap())
            .collect()
    }

    fn patched_volume(mesh: &IndexedMesh, patches: &[Patch]) -> f64 {
        let mut closed = mesh.clone();
        for patch in patches {
            closed.faces.extend_from_slice(&patch.faces);
        }
        closed.triangles().map(|t| t.signed_volume()).sum()
    }

    #[test]
    fn square_hole_gets_two_outward_triangles() {
        let mut mesh = unit_cube();
        mesh.faces.truncate(10);

        let patches = fill_all(&mesh);
        assert_eq!(patches.len(), 1);
        assert_eq!(patches[0].triangle_count(), 2);

        for face in &patches[0].faces {
            let normal = mesh.face_triangle(*face).normal().unwrap();
            assert_relative_eq!(normal.x, 1.0, epsilon = 1e-12);
        }
        assert_relative_eq!(patched_volume(&mesh, &patches), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn patch_uses_only_loop_vertices() {
        let mut mesh = unit_cube();
        mesh.faces.drain(2..4);

        let patches = fill_all(&mesh);
        for face in &patches[0].faces {
            assert!(face.iter().all(|v| patches[0].boundary.contains(v)));
        }
    }

    /// L-shaped prism of height 1 without its top cap.
    ///
    /// The outline is concave at (1, 1).
    fn open_l_prism() -> IndexedMesh {
        let outline = [(0.0, 0.0), (2.0, 0.0), (2.0, 1.0), (1.0, 1.0), (1.0, 2.0), (0.0, 2.0)];
        let mut mesh = IndexedMesh::new();
        for z in [0.0, 1.0] {
            for (x, y) in outline {
                mesh.vertices.push(Vertex::from_coords(x, y, z));
            }
        }
        // Bottom cap as a fan around an interior point, facing -Z
        mesh.vertices.push(Vertex::from_coords(0.5, 0.5, 0.0));
        for i in 0..6u32 {
            let j = (i + 1) % 6;
            mesh.faces.push([12, j, i]);
            mesh.faces.push([i, j, j + 6]);
            mesh.faces.push([i, j + 6, i + 6]);
        }
        mesh
    }

    #[test]
    fn concave_hole_is_triangulated_inside_outline() {
        let mesh = open_l_prism();

        let patches = fill_all(&mesh);
        assert_eq!(patches.len(), 1);
        assert_eq!(patches[0].triangle_count(), 4);

        let mut area = 0.0;
        for face in &patches[0].faces {
            let tri = mesh.face_triangle(*face);
            assert!(tri.normal().unwrap().z > 0.0);
            area += tri.area();
        }
        assert_relative_eq!(area, 3.0, epsilon = 1e-12);
        assert_relative_eq!(patched_volume(&mesh, &patches), 3.0, epsilon = 1e-12);
    }

    #[test]
    fn non_planar_hole_takes_best_ear_first() {
        // Open-top box with one top corner raised: the hole is a skew quad
        let mut mesh = unit_cube();
        mesh.faces.drain(2..4);
        mesh.vertices[6] = Vertex::from_coords(1.0, 1.0, 1.5);

        let patches = fill_all(&mesh);
        assert_eq!(patches[0].triangle_count(), 2);

        // The ear at vertex 6 has the larger minimum angle, so the diagonal
        // runs 5-7 and only the triangle (5, 6, 7) rises above z = 1
        let mut sorted: Vec<[u32; 3]> = patches[0]
            .faces
            .iter()
            .map(|f| {
                let mut f = *f;
                f.sort_unstable();
                f
            })
            .collect();
        sorted.sort_unstable();
        assert_eq!(sorted, vec![[4, 5, 7], [5, 6, 7]]);
        assert_relative_eq!(patched_volume(&mesh, &patches), 13.0 / 12.0, epsilon = 1e-12);
    }

    #[test]
    fn reversed_existing_faces_are_not_reused() {
        // Two faces of a tetrahedron. Seen along the best-fit normal the
        // shared corner sits inside the opposite triangle, so the only ears
        // are the reverses of the existing faces
        let mut mesh = IndexedMesh::new();
        mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
        mesh.vertices.push(Vertex::from_coords(1.0, 0.0, 0.0));
        mesh.vertices.push(Vertex::from_coords(0.0, 1.0, 0.0));
        mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 1.0));
        mesh.faces.push([0, 2, 1]);
        mesh.faces.push([0, 1, 3]);

        let adjacency = MeshAdjacency::build(&mesh.faces);
        let holes = detect_holes(&adjacency).unwrap();
        let err = fill_hole(&mesh, &adjacency, &holes[0], &RepairParams::default()).unwrap_err();

        let failed = err.unrepairable_holes();
        assert_eq!(failed.len(), 1);
        assert!(matches!(
            failed[0].reason,
            PatchFailure::AllCandidatesIntersect { candidates: 2 }
        ));
    }

    #[test]
    fn lone_triangle_is_not_doubled() {
        let mut mesh = IndexedMesh::new();
        mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
        mesh.vertices.push(Vertex::from_coords(1.0, 0.0, 0.0));
        mesh.vertices.push(Vertex::from_coords(0.0, 1.0, 0.0));
        mesh.faces.push([0, 1, 2]);

        let adjacency = MeshAdjacency::build(&mesh.faces);
        let holes = detect_holes(&adjacency).unwrap();
        let err = fill_hole(&mesh, &adjacency, &holes[0], &RepairParams::default()).unwrap_err();

        assert_eq!(
            err.unrepairable_holes()[0].reason,
            PatchFailure::AllCandidatesIntersect { candidates: 1 }
        );
    }

    #[test]
    fn triangular_hole_is_closed() {
        let mut mesh = unit_cube();
        mesh.faces.remove(11);

        let patches = fill_all(&mesh);
        assert_eq!(patches[0].triangle_count(), 1);
        assert_relative_eq!(patched_volume(&mesh, &patches), 1.0, epsilon = 1e-12);
    }

    /// Cone over a regular `n`-gon in the z = 0 plane, apex below, with
    /// the polygon left open.
    fn open_cone(n: u32, radius: f64) -> IndexedMesh {
        let mut mesh = IndexedMesh::new();
        for i in 0..n {
            let theta = std::f64::consts::TAU * f64::from(i) / f64::from(n);
            mesh.vertices
                .push(Vertex::from_coords(radius * theta.cos(), radius * theta.sin(), 0.0));
        }
        mesh.vertices.push(Vertex::from_coords(0.0, 0.0, -1.0));
        for i in 0..n {
            mesh.faces.push([n, (i + 1) % n, i]);
        }
        mesh
    }

    #[test]
    fn blocked_ears_open_up_after_clipping() {
        // Concave outline: a comb whose teeth block each other's ears
        let outline = [
            (0.0, 0.0),
            (6.0, 0.0),
            (6.0, 3.0),
            (5.0, 3.0),
            (5.0, 1.0),
            (4.0, 1.0),
            (4.0, 3.0),
            (3.0, 3.0),
            (3.0, 1.0),
            (2.0, 1.0),
            (2.0, 3.0),
            (1.0, 3.0),
            (1.0, 1.0),
            (0.0, 1.0),
        ];
        let mut mesh = IndexedMesh::new();
        for (x, y) in outline {
            mesh.vertices.push(Vertex::from_coords(x, y, 0.0));
        }
        let apex = u32::try_from(mesh.vertices.len()).unwrap();
        mesh.vertices.push(Vertex::from_coords(3.0, 1.5, -1.0));
        let n = apex;
        for i in 0..n {
            mesh.faces.push([apex, (i + 1) % n, i]);
        }

        let params = RepairParams::default().with_check_intersections(false);
        let adjacency = MeshAdjacency::build(&mesh.faces);
        let holes = detect_holes(&adjacency).unwrap();
        let patch = fill_hole(&mesh, &adjacency, &holes[0], &params).unwrap();

        assert_eq!(patch.triangle_count(), outline.len() - 2);
        let area: f64 = patch
            .faces
            .iter()
            .map(|f| mesh.face_triangle(*f).area())
            .sum();
        // 6 x 1 base plus three 1 x 2 teeth
        assert_relative_eq!(area, 12.0, epsilon = 1e-9);
    }

    #[test]
    fn large_round_hole_is_filled() {
        let n = 400;
        let mesh = open_cone(n, 10.0);

        let patches = fill_all(&mesh);
        assert_eq!(patches[0].triangle_count(), n as usize - 2);
        for face in &patches[0].faces {
            assert!(mesh.face_triangle(*face).normal().unwrap().z > 0.0);
        }
    }

    #[test]
    fn retry_budget_is_reported() {
        // A fin hinged at loop vertex 1 cuts through the hole, so every
        // triangulation has a triangle that crosses it
        let mut mesh = unit_cube();
        mesh.faces.truncate(10);
        let base = u32::try_from(mesh.vertices.len()).unwrap();
        mesh.vertices.push(Vertex::from_coords(0.5, 1.0, 1.5));
        mesh.vertices.push(Vertex::from_coords(1.5, 1.0, 1.5));
        mesh.faces.push([1, base, base + 1]);

        let adjacency = MeshAdjacency::build(&mesh.faces);
        let holes = detect_holes(&adjacency).unwrap();
        let square = holes
            .iter()
            .find(|h| h.vertices.contains(&2) && h.vertices.contains(&6))
            .unwrap();

        let params = RepairParams::default().with_max_retries(1);
        let err = fill_hole(&mesh, &adjacency, square, &params).unwrap_err();
        assert_eq!(err.unrepairable_holes().len(), 1);
    }

    #[test]
    fn disabled_guard_accepts_everything() {
        let mut mesh = unit_cube();
        mesh.faces.truncate(10);
        let adjacency = MeshAdjacency::build(&mesh.faces);
        let holes = detect_holes(&adjacency).unwrap();

        let params = RepairParams::default().with_check_intersections(false);
        let patch = fill_hole(&mesh, &adjacency, &holes[0], &params).unwrap();
        assert_eq!(patch.triangle_count(), 2);
    }

    #[test]
    fn missing_vertex_is_degenerate() {
        let mesh = unit_cube();
        let adjacency = MeshAdjacency::build(&mesh.faces);
        let bogus = BoundaryLoop {
            vertices: vec![0, 1, 99],
        };
        let err = fill_hole(&mesh, &adjacency, &bogus, &RepairParams::default()).unwrap_err();
        assert!(matches!(err, RepairError::DegenerateInput { vertex: Some(99), .. }));
    }

    #[test]
    fn projection_is_counter_clockwise() {
        let positions = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        let projected = project_to_plane(&positions);
        let n = projected.len();
        let twice_area: f64 = (0..n)
            .map(|i| {
                let (p, q) = (projected[i], projected[(i + 1) % n]);
                p[0] * q[1] - q[0] * p[1]
            })
            .sum();
        assert_relative_eq!(twice_area, 2.0, epsilon = 1e-12);
    }
}
