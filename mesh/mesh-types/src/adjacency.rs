//! Edge and vertex adjacency for indexed meshes.
//!
//! Provides hashed lookups for edge-to-face and vertex-to-face
//! relationships. Every face contributes three directed [`EdgeUse`]s, so
//! the index answers both "how many faces share this edge" (boundary and
//! non-manifold detection) and "in which direction do they traverse it"
//! (orientation consistency).

use hashbrown::HashMap;
use rayon::prelude::*;

/// Face count above which [`MeshAdjacency::build_auto`] builds in parallel.
pub const PARALLEL_FACE_THRESHOLD: usize = 50_000;

/// Undirected edge key, normalised so `lo <= hi`.
///
/// # Example
///
/// ```
/// use mesh_types::EdgeKey;
///
/// assert_eq!(EdgeKey::new(7, 3), EdgeKey::new(3, 7));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeKey {
    /// Smaller vertex index.
    pub lo: u32,
    /// Larger vertex index.
    pub hi: u32,
}

impl EdgeKey {
    /// Normalise an edge so the smaller index comes first.
    #[inline]
    #[must_use]
    pub const fn new(a: u32, b: u32) -> Self {
        if a < b {
            Self { lo: a, hi: b }
        } else {
            Self { lo: b, hi: a }
        }
    }
}

/// One face's traversal of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeUse {
    /// Index of the face.
    pub face: usize,
    /// Start vertex in the face's winding order.
    pub from: u32,
    /// End vertex in the face's winding order.
    pub to: u32,
}

/// Adjacency information for a mesh.
#[derive(Debug, Clone, Default)]
pub struct MeshAdjacency {
    edge_uses: HashMap<EdgeKey, Vec<EdgeUse>>,
    vertex_to_faces: HashMap<u32, Vec<usize>>,
}

impl MeshAdjacency {
    /// Build adjacency from a face list. O(T) in the number of faces.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::MeshAdjacency;
    ///
    /// let faces = vec![[0, 1, 2], [2, 1, 3]];
    /// let adj = MeshAdjacency::build(&faces);
    ///
    /// assert_eq!(adj.boundary_edge_count(), 4);
    /// assert!(adj.is_consistently_oriented());
    /// ```
    #[must_use]
    pub fn build(faces: &[[u32; 3]]) -> Self {
        let mut adjacency = Self::default();
        for (face_idx, face) in faces.iter().enumerate() {
            adjacency.insert_face(face_idx, *face);
        }
        adjacency
    }

    /// Build adjacency using rayon.
    ///
    /// Each worker counts into its own partial index and the partials are
    /// merged. The result is identical to [`MeshAdjacency::build`].
    #[must_use]
    pub fn build_parallel(faces: &[[u32; 3]]) -> Self {
        let mut adjacency = faces
            .par_iter()
            .enumerate()
            .fold(Self::default, |mut acc, (face_idx, face)| {
                acc.insert_face(face_idx, *face);
                acc
            })
            .reduce(Self::default, Self::merge);

        // Partials arrive in arbitrary order
        for uses in adjacency.edge_uses.values_mut() {
            uses.sort_unstable_by_key(|u| u.face);
        }
        for faces in adjacency.vertex_to_faces.values_mut() {
            faces.sort_unstable();
        }
        adjacency
    }

    /// Build in parallel when `parallel` is set and the mesh is large enough.
    #[must_use]
    pub fn build_auto(faces: &[[u32; 3]], parallel: bool) -> Self {
        if parallel && faces.len() > PARALLEL_FACE_THRESHOLD {
            Self::build_parallel(faces)
        } else {
            Self::build(faces)
        }
    }

    fn insert_face(&mut self, face_idx: usize, face: [u32; 3]) {
        for &v in &face {
            self.vertex_to_faces.entry(v).or_default().push(face_idx);
        }
        for i in 0..3 {
            let from = face[i];
            let to = face[(i + 1) % 3];
            self.edge_uses
                .entry(EdgeKey::new(from, to))
                .or_default()
                .push(EdgeUse {
                    face: face_idx,
                    from,
                    to,
                });
        }
    }

    fn merge(mut self, other: Self) -> Self {
        for (edge, uses) in other.edge_uses {
            self.edge_uses.entry(edge).or_default().extend(uses);
        }
        for (vertex, faces) in other.vertex_to_faces {
            self.vertex_to_faces.entry(vertex).or_default().extend(faces);
        }
        self
    }

    /// Directed uses of an edge, in face order.
    ///
    /// Returns `None` if no face contains the edge.
    #[must_use]
    pub fn uses_for_edge(&self, a: u32, b: u32) -> Option<&[EdgeUse]> {
        self.edge_uses.get(&EdgeKey::new(a, b)).map(Vec::as_slice)
    }

    /// Number of faces sharing an edge (0 if absent).
    #[must_use]
    pub fn edge_face_count(&self, a: u32, b: u32) -> usize {
        self.uses_for_edge(a, b).map_or(0, <[EdgeUse]>::len)
    }

    /// Faces incident to a vertex.
    #[must_use]
    pub fn faces_for_vertex(&self, v: u32) -> &[usize] {
        self.vertex_to_faces.get(&v).map_or(&[], Vec::as_slice)
    }

    /// Boundary edges (exactly one adjacent face), directed as in that face.
    ///
    /// Iteration order is unspecified.
    pub fn boundary_edges(&self) -> impl Iterator<Item = EdgeUse> + '_ {
        self.edge_uses
            .values()
            .filter(|uses| uses.len() == 1)
            .map(|uses| uses[0])
    }

    /// Number of boundary edges.
    #[must_use]
    pub fn boundary_edge_count(&self) -> usize {
        self.edge_uses.values().filter(|uses| uses.len() == 1).count()
    }

    /// Edges shared by more than two faces.
    pub fn non_manifold_edges(&self) -> impl Iterator<Item = EdgeKey> + '_ {
        self.edge_uses
            .iter()
            .filter(|(_, uses)| uses.len() > 2)
            .map(|(&edge, _)| edge)
    }

    /// Number of edges shared by more than two faces.
    #[must_use]
    pub fn non_manifold_edge_count(&self) -> usize {
        self.edge_uses.values().filter(|uses| uses.len() > 2).count()
    }

    /// Interior edges whose faces do not traverse them in opposite directions.
    ///
    /// On a consistently oriented surface every interior edge is walked
    /// `a→b` by as many faces as walk it `b→a`.
    pub fn inconsistent_edges(&self) -> impl Iterator<Item = EdgeKey> + '_ {
        self.edge_uses
            .iter()
            .filter(|(_, uses)| uses.len() >= 2 && !is_balanced(uses))
            .map(|(&edge, _)| edge)
    }

    /// Number of inconsistently wound interior edges.
    #[must_use]
    pub fn inconsistent_edge_count(&self) -> usize {
        self.edge_uses
            .values()
            .filter(|uses| uses.len() >= 2 && !is_balanced(uses))
            .count()
    }

    /// No edge is shared by more than two faces.
    #[must_use]
    pub fn is_manifold(&self) -> bool {
        self.edge_uses.values().all(|uses| uses.len() <= 2)
    }

    /// No boundary edges.
    #[must_use]
    pub fn is_watertight(&self) -> bool {
        self.edge_uses.values().all(|uses| uses.len() >= 2)
    }

    /// Every interior edge is traversed in both directions equally.
    #[must_use]
    pub fn is_consistently_oriented(&self) -> bool {
        self.inconsistent_edge_count() == 0
    }

    /// Total number of distinct edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edge_uses.len()
    }

    /// Number of vertices referenced by at least one face.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertex_to_faces.len()
    }
}

fn is_balanced(uses: &[EdgeUse]) -> bool {
    let Some(first) = uses.first() else {
        return true;
    };
    let forward = uses.iter().filter(|u| u.from == first.from).count();
    forward * 2 == uses.len()
}
