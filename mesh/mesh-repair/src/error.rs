//! Error types for mesh repair operations.

use thiserror::Error;

/// Result type for repair operations.
pub type RepairResult<T> = Result<T, RepairError>;

/// Errors that can occur during mesh repair.
#[derive(Debug, Clone, Error)]
pub enum RepairError {
    /// The input cannot be resolved into clean boundary loops.
    ///
    /// Raised for meshes without triangles, out-of-range or repeated face
    /// indices, and boundary structure that branches (a vertex whose
    /// incoming and outgoing boundary edge counts differ).
    #[error("degenerate input: {reason}{}", vertex.map(|v| format!(" (vertex {v})")).unwrap_or_default())]
    DegenerateInput {
        /// What is wrong with the input.
        reason: String,
        /// The offending vertex, when one can be named.
        vertex: Option<u32>,
    },

    /// One or more holes could not be patched without intersecting geometry.
    #[error("{} hole(s) could not be patched: {}", holes.len(), describe(holes))]
    Unrepairable {
        /// Every hole that failed, in detection order.
        holes: Vec<UnrepairableHole>,
    },
}

impl RepairError {
    /// Create a degenerate input error.
    #[must_use]
    pub fn degenerate(reason: impl Into<String>, vertex: Option<u32>) -> Self {
        Self::DegenerateInput {
            reason: reason.into(),
            vertex,
        }
    }

    /// Holes that failed to patch, empty for other errors.
    #[must_use]
    pub fn unrepairable_holes(&self) -> &[UnrepairableHole] {
        match self {
            Self::Unrepairable { holes } => holes,
            Self::DegenerateInput { .. } => &[],
        }
    }
}

/// A hole that the triangulator gave up on.
#[derive(Debug, Clone, PartialEq)]
pub struct UnrepairableHole {
    /// Position of the loop among the detected holes.
    pub index: usize,
    /// Boundary loop vertices, in boundary-edge order.
    pub vertices: Vec<u32>,
    /// Why every candidate triangulation was rejected.
    pub reason: PatchFailure,
}

/// Why a single hole could not be patched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PatchFailure {
    /// The projected polygon has no clippable ear left.
    #[error("no valid ear among {remaining} remaining vertices")]
    NoValidEar {
        /// Polygon vertices still unclipped.
        remaining: usize,
    },

    /// Every ear candidate intersected existing or patch geometry.
    #[error("all {candidates} ear candidates intersect existing geometry")]
    AllCandidatesIntersect {
        /// Candidates tried at the failing step.
        candidates: usize,
    },

    /// The per-hole retry budget ran out.
    #[error("gave up after {retries} rejected ear candidates")]
    RetriesExhausted {
        /// Rejected candidates before giving up.
        retries: usize,
    },
}

fn describe(holes: &[UnrepairableHole]) -> String {
    holes
        .iter()
        .map(|h| format!("hole {} ({}-vertex loop): {}", h.index, h.vertices.len(), h.reason))
        .collect::<Vec<_>>()
        .join("; ")
}
