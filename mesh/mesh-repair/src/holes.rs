//! Hole detection: boundary extraction and loop tracing.
//!
//! A hole is a closed loop of boundary edges (edges with only one adjacent
//! face). Boundary edges are followed in the direction they have in their
//! owning face, so every traced loop runs opposite to the winding its
//! patch will need.
//!
//! # Example
//!
//! ```
//! use mesh_types::{unit_cube, MeshAdjacency};
//! use mesh_repair::holes::detect_holes;
//!
//! let mut mesh = unit_cube();
//! mesh.faces.truncate(10); // drop the +X face
//!
//! let adjacency = MeshAdjacency::build(&mesh.faces);
//! let holes = detect_holes(&adjacency).unwrap();
//!
//! assert_eq!(holes.len(), 1);
//! assert_eq!(holes[0].edge_count(), 4);
//! ```

use hashbrown::{HashMap, HashSet};
use mesh_types::MeshAdjacency;
use tracing::{debug, info};

use crate::error::{RepairError, RepairResult};

/// A boundary loop representing a hole in the mesh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundaryLoop {
    /// Ordered vertex indices. Consecutive entries (and last→first) are
    /// boundary edges, directed as in their owning faces.
    pub vertices: Vec<u32>,
}

impl BoundaryLoop {
    /// Number of edges (and vertices) in the loop.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.vertices.len()
    }

    /// A loop needs at least three vertices to be patched.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.vertices.len() >= 3
    }

    /// Directed edges of the loop.
    pub fn edges(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    /// Vertex order a patch must follow to wind consistently with the
    /// surrounding faces.
    #[must_use]
    pub fn patch_order(&self) -> Vec<u32> {
        self.vertices.iter().rev().copied().collect()
    }
}

/// Detect all boundary loops (holes) of a mesh.
///
/// Loops are returned in a deterministic order (by their smallest
/// directed edge). A vertex where two loops touch is split between them,
/// so every returned loop is simple.
///
/// # Errors
///
/// Returns [`RepairError::DegenerateInput`] if some vertex has a different
/// number of incoming and outgoing boundary edges (branching or
/// inconsistently wound boundary), or if a trace cannot be continued.
pub fn detect_holes(adjacency: &MeshAdjacency) -> RepairResult<Vec<BoundaryLoop>> {
    let mut edges: Vec<(u32, u32)> = adjacency.boundary_edges().map(|e| (e.from, e.to)).collect();

    if edges.is_empty() {
        return Ok(Vec::new());
    }

    edges.sort_unstable();
    debug!("Found {} boundary edges", edges.len());

    let mut outgoing: HashMap<u32, Vec<u32>> = HashMap::new();
    let mut incoming: HashMap<u32, usize> = HashMap::new();
    for &(from, to) in &edges {
        outgoing.entry(from).or_default().push(to);
        *incoming.entry(to).or_default() += 1;
    }

    check_boundary_degrees(&outgoing, &incoming)?;

    let mut used: HashSet<(u32, u32)> = HashSet::with_capacity(edges.len());
    let mut loops = Vec::new();

    for &(start, first) in &edges {
        if !used.insert((start, first)) {
            continue;
        }

        // Walk unused boundary edges; whenever the walk returns to a vertex
        // already on the path, the cycle since then is a loop
        let mut path: Vec<u32> = vec![start];
        let mut on_path: HashMap<u32, usize> = HashMap::from([(start, 0)]);
        let mut current = first;

        loop {
            if let Some(k) = on_path.get(&current).copied() {
                let cycle = path.split_off(k);
                for v in &cycle {
                    on_path.remove(v);
                }
                loops.push(BoundaryLoop { vertices: cycle });
                if path.is_empty() {
                    break;
                }
            }

            on_path.insert(current, path.len());
            path.push(current);

            let next = outgoing
                .get(&current)
                .and_then(|targets| targets.iter().find(|&&t| !used.contains(&(current, t))))
                .copied();

            let Some(next) = next else {
                return Err(RepairError::degenerate(
                    "boundary trace cannot be continued",
                    Some(current),
                ));
            };

            used.insert((current, next));
            current = next;
        }
    }

    info!(
        "Detected {} holes (boundary loops), sizes: {:?}",
        loops.len(),
        loops.iter().map(BoundaryLoop::edge_count).collect::<Vec<_>>()
    );

    Ok(loops)
}

/// Every boundary vertex must be entered as often as it is left.
fn check_boundary_degrees(
    outgoing: &HashMap<u32, Vec<u32>>,
    incoming: &HashMap<u32, usize>,
) -> RepairResult<()> {
    let mut vertices: Vec<u32> = outgoing.keys().chain(incoming.keys()).copied().collect();
    vertices.sort_unstable();
    vertices.dedup();

    for v in vertices {
        let out = outgoing.get(&v).map_or(0, Vec::len);
        let inc = incoming.get(&v).copied().unwrap_or(0);
        if out != inc {
            return Err(RepairError::degenerate(
                format!(
                    "boundary vertex has {out} outgoing and {inc} incoming boundary edges"
                ),
                Some(v),
            ));
        }
    }

    Ok(())
}
