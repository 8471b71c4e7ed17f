//! Mesh validation and health reporting.
//!
//! Answers the question the volume engine cares about: is this mesh closed
//! and consistently wound, and if not, what is wrong with it.

use hashbrown::HashSet;
use mesh_types::{IndexedMesh, MeshAdjacency};

use crate::holes::detect_holes;

/// Report of mesh validation results.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MeshReport {
    /// Total number of vertices.
    pub vertex_count: usize,
    /// Total number of faces.
    pub face_count: usize,
    /// Total number of distinct edges.
    pub edge_count: usize,

    /// Edges with only one adjacent face.
    pub boundary_edge_count: usize,
    /// Edges with more than two adjacent faces.
    pub non_manifold_edge_count: usize,
    /// Interior edges traversed in the same direction by their faces.
    pub inconsistent_edge_count: usize,
    /// Faces with (near) zero area.
    pub degenerate_face_count: usize,
    /// Faces with the same vertex set as an earlier face, either winding.
    pub duplicate_face_count: usize,
    /// Vertices no face references.
    pub unreferenced_vertex_count: usize,
    /// Faces with an out-of-range vertex index.
    pub invalid_face_count: usize,
    /// Number of boundary loops, `None` if the boundary branches.
    pub hole_count: Option<usize>,

    /// No boundary edges.
    pub is_watertight: bool,
    /// No non-manifold edges.
    pub is_manifold: bool,
    /// No inconsistently wound edges.
    pub is_consistently_oriented: bool,
}

impl MeshReport {
    /// Check whether the enclosed volume of the mesh is well defined.
    #[must_use]
    pub fn is_closed_volume(&self) -> bool {
        self.face_count > 0
            && self.invalid_face_count == 0
            && self.is_watertight
            && self.is_manifold
            && self.is_consistently_oriented
    }

    /// Check if the mesh has any issues.
    #[must_use]
    pub fn has_issues(&self) -> bool {
        self.issue_count() > 0
    }

    /// Total count of issues found.
    #[must_use]
    pub fn issue_count(&self) -> usize {
        self.boundary_edge_count
            + self.non_manifold_edge_count
            + self.inconsistent_edge_count
            + self.degenerate_face_count
            + self.duplicate_face_count
            + self.invalid_face_count
    }
}

impl std::fmt::Display for MeshReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let yes_no = |b: bool| if b { "Yes" } else { "No" };

        writeln!(f, "Mesh Report:")?;
        writeln!(f, "  Vertices: {}", self.vertex_count)?;
        writeln!(f, "  Faces: {}", self.face_count)?;
        writeln!(f, "  Edges: {}", self.edge_count)?;
        writeln!(f)?;
        writeln!(f, "  Status:")?;
        writeln!(f, "    Watertight: {}", yes_no(self.is_watertight))?;
        writeln!(f, "    Manifold: {}", yes_no(self.is_manifold))?;
        writeln!(
            f,
            "    Winding: {}",
            if self.is_consistently_oriented {
                "Consistent"
            } else {
                "Inconsistent"
            }
        )?;
        match self.hole_count {
            Some(holes) => writeln!(f, "    Holes: {holes}")?,
            None => writeln!(f, "    Holes: untraceable boundary")?,
        }

        if self.has_issues() || self.unreferenced_vertex_count > 0 {
            writeln!(f)?;
            writeln!(f, "  Issues:")?;
            let issues = [
                ("Boundary edges", self.boundary_edge_count),
                ("Non-manifold edges", self.non_manifold_edge_count),
                ("Inconsistent edges", self.inconsistent_edge_count),
                ("Degenerate faces", self.degenerate_face_count),
                ("Duplicate faces", self.duplicate_face_count),
                ("Invalid faces", self.invalid_face_count),
                ("Unreferenced vertices", self.unreferenced_vertex_count),
            ];
            for (label, count) in issues.into_iter().filter(|(_, c)| *c > 0) {
                writeln!(f, "    {label}: {count}")?;
            }
        }

        Ok(())
    }
}

/// Area below which a face counts as degenerate.
const DEGENERATE_AREA: f64 = 1e-12;

/// Validate a mesh and return a report of any issues.
///
/// Never fails: faces with out-of-range indices are counted and left out
/// of the geometric checks.
///
/// # Example
///
/// ```
/// use mesh_types::{IndexedMesh, Vertex};
/// use mesh_repair::validate_mesh;
///
/// let mut mesh = IndexedMesh::new();
/// mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
/// mesh.vertices.push(Vertex::from_coords(1.0, 0.0, 0.0));
/// mesh.vertices.push(Vertex::from_coords(0.0, 1.0, 0.0));
/// mesh.faces.push([0, 1, 2]);
///
/// let report = validate_mesh(&mesh);
/// assert_eq!(report.face_count, 1);
/// assert_eq!(report.boundary_edge_count, 3); // Single triangle has 3 boundary edges
/// assert_eq!(report.hole_count, Some(1));
/// ```
#[must_use]
pub fn validate_mesh(mesh: &IndexedMesh) -> MeshReport {
    let vertex_count = mesh.vertices.len();
    let (valid, invalid): (Vec<[u32; 3]>, Vec<[u32; 3]>) = mesh
        .faces
        .iter()
        .partition(|face| face.iter().all(|&v| (v as usize) < vertex_count));

    let adjacency = MeshAdjacency::build(&valid);
    let hole_count = detect_holes(&adjacency).ok().map(|holes| holes.len());

    let degenerate_face_count = valid
        .iter()
        .filter(|&&face| mesh.face_triangle(face).is_degenerate(DEGENERATE_AREA))
        .count();

    MeshReport {
        vertex_count,
        face_count: mesh.faces.len(),
        edge_count: adjacency.edge_count(),
        boundary_edge_count: adjacency.boundary_edge_count(),
        non_manifold_edge_count: adjacency.non_manifold_edge_count(),
        inconsistent_edge_count: adjacency.inconsistent_edge_count(),
        degenerate_face_count,
        duplicate_face_count: count_duplicate_faces(&valid),
        unreferenced_vertex_count: vertex_count.saturating_sub(adjacency.vertex_count()),
        invalid_face_count: invalid.len(),
        hole_count,
        is_watertight: adjacency.is_watertight(),
        is_manifold: adjacency.is_manifold(),
        is_consistently_oriented: adjacency.is_consistently_oriented(),
    }
}

/// Count faces whose vertex set was already seen.
fn count_duplicate_faces(faces: &[[u32; 3]]) -> usize {
    let mut seen: HashSet<[u32; 3]> = HashSet::with_capacity(faces.len());
    faces
        .iter()
        .filter(|face| {
            let mut key = **face;
            key.sort_unstable();
            !seen.insert(key)
        })
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mesh_types::{Vertex, unit_cube};

    fn simple_triangle() -> IndexedMesh {
        let mut mesh = IndexedMesh::new();
        mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
        mesh.vertices.push(Vertex::from_coords(10.0, 0.0, 0.0));
        mesh.vertices.push(Vertex::from_coords(0.0, 10.0, 0.0));
        mesh.faces.push([0, 1, 2]);
        mesh
    }

    #[test]
    fn validate_single_triangle() {
        let report = validate_mesh(&simple_triangle());

        assert_eq!(report.vertex_count, 3);
        assert_eq!(report.face_count, 1);
        assert_eq!(report.boundary_edge_count, 3);
        assert_eq!(report.hole_count, Some(1));
        assert!(!report.is_watertight);
        assert!(!report.is_closed_volume());
    }

    #[test]
    fn validate_closed_cube() {
        let report = validate_mesh(&unit_cube());

        assert_eq!(report.edge_count, 18);
        assert_eq!(report.hole_count, Some(0));
        assert!(report.is_closed_volume());
        assert!(!report.has_issues());
    }

    #[test]
    fn open_cube_reports_one_hole() {
        let mut mesh = unit_cube();
        mesh.faces.truncate(10);
        let report = validate_mesh(&mesh);

        assert_eq!(report.boundary_edge_count, 4);
        assert_eq!(report.hole_count, Some(1));
    }

    #[test]
    fn flipped_face_is_inconsistent() {
        let mut mesh = unit_cube();
        mesh.faces[5].swap(0, 1);
        let report = validate_mesh(&mesh);

        assert!(report.is_watertight);
        assert!(!report.is_consistently_oriented);
        assert_eq!(report.inconsistent_edge_count, 3);
        assert!(!report.is_closed_volume());
    }

    #[test]
    fn detect_degenerate_faces() {
        let mut mesh = IndexedMesh::new();
        mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
        mesh.vertices.push(Vertex::from_coords(1.0, 0.0, 0.0));
        mesh.vertices.push(Vertex::from_coords(2.0, 0.0, 0.0)); // Collinear!
        mesh.faces.push([0, 1, 2]);

        assert_eq!(validate_mesh(&mesh).degenerate_face_count, 1);
    }

    #[test]
    fn detect_duplicate_faces_either_winding() {
        let mut mesh = simple_triangle();
        mesh.faces.push([1, 2, 0]);
        mesh.faces.push([0, 2, 1]);

        assert_eq!(validate_mesh(&mesh).duplicate_face_count, 2);
    }

    #[test]
    fn invalid_and_unreferenced_are_counted() {
        let mut mesh = simple_triangle();
        mesh.vertices.push(Vertex::from_coords(5.0, 5.0, 5.0));
        mesh.faces.push([0, 1, 9]);

        let report = validate_mesh(&mesh);
        assert_eq!(report.invalid_face_count, 1);
        assert_eq!(report.unreferenced_vertex_count, 1);
        assert_eq!(report.boundary_edge_count, 3);
    }

    #[test]
    fn branching_boundary_has_no_hole_count() {
        let mut mesh = simple_triangle();
        mesh.vertices.push(Vertex::from_coords(0.0, -10.0, 0.0));
        mesh.faces.push([0, 1, 3]);

        assert_eq!(validate_mesh(&mesh).hole_count, None);
    }

    #[test]
    fn report_display() {
        let display = format!("{}", validate_mesh(&simple_triangle()));

        assert!(display.contains("Vertices: 3"));
        assert!(display.contains("Watertight: No"));
        assert!(display.contains("Holes: 1"));
        assert!(display.contains("Boundary edges: 3"));
    }

    #[test]
    fn has_issues_empty_report() {
        let report = MeshReport::default();
        assert!(!report.has_issues());
    }

    #[test]
    fn issue_count() {
        let report = MeshReport {
            boundary_edge_count: 3,
            degenerate_face_count: 2,
            ..Default::default()
        };

        assert_eq!(report.issue_count(), 5);
    }
}
