//! Error types for volume computation.

use thiserror::Error;

/// Result type alias for volume operations.
pub type VolumeResult<T> = Result<T, VolumeError>;

/// Which mesh of a [`volume_difference`](crate::volume_difference) failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operand {
    /// The minuend.
    A,
    /// The subtrahend.
    B,
}

impl std::fmt::Display for Operand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::A => write!(f, "A"),
            Self::B => write!(f, "B"),
        }
    }
}

/// Errors that can occur while computing a volume.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VolumeError {
    /// The mesh has boundary edges, so it encloses no well-defined volume.
    #[error("mesh is not closed: {boundary_edge_count} boundary edges")]
    NotClosed {
        /// Number of edges with a single adjacent face.
        boundary_edge_count: usize,
    },

    /// Some interior edge is traversed in the same direction by both of
    /// its faces.
    #[error("mesh winding is inconsistent on {edge_count} edges")]
    InconsistentWinding {
        /// Number of inconsistently wound edges.
        edge_count: usize,
    },

    /// A face references a vertex that does not exist.
    #[error("face {face} references vertex {index} but the mesh has {vertex_count} vertices")]
    InvalidIndex {
        /// Face holding the bad index.
        face: usize,
        /// The out-of-range index.
        index: u32,
        /// Number of vertices in the mesh.
        vertex_count: usize,
    },

    /// One operand of a volume difference failed.
    #[error("mesh {which}: {source}")]
    Operand {
        /// The failing operand.
        which: Operand,
        /// What went wrong with it.
        source: Box<VolumeError>,
    },
}

impl VolumeError {
    /// Attribute this error to an operand of a difference.
    #[must_use]
    pub fn for_operand(self, which: Operand) -> Self {
        Self::Operand {
            which,
            source: Box::new(self),
        }
    }

    /// The operand this error is attributed to, if any.
    #[must_use]
    pub fn operand(&self) -> Option<Operand> {
        match self {
            Self::Operand { which, .. } => Some(*which),
            _ => None,
        }
    }

    /// The underlying error with operand attribution stripped.
    #[must_use]
    pub fn root_cause(&self) -> &Self {
        match self {
            Self::Operand { source, .. } => source.root_cause(),
            other => other,
        }
    }
}
