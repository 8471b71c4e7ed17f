//! Configuration for volume computation.
//!
//! # Presets
//!
//! - [`VolumeParams::default()`] - Winding checked, large meshes summed in parallel
//! - [`VolumeParams::strict()`] - Winding checked, always summed sequentially
//! - [`VolumeParams::unchecked()`] - Only closedness is checked
//!
//! # Example
//!
//! ```
//! use mesh_volume::VolumeParams;
//!
//! let params = VolumeParams::default()
//!     .with_parallel_threshold(10_000)
//!     .with_check_winding(false);
//! assert!(!params.check_winding);
//! ```

use mesh_types::PARALLEL_FACE_THRESHOLD;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for volume computation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VolumeParams {
    /// Whether large meshes are summed on the rayon thread pool.
    ///
    /// The parallel sum is deterministic but may differ from the
    /// sequential one in the last bits.
    /// Default: `true`
    pub parallel: bool,

    /// Face count above which the parallel path is taken.
    ///
    /// Default: [`PARALLEL_FACE_THRESHOLD`]
    pub parallel_threshold: usize,

    /// Whether inconsistently wound meshes are rejected.
    ///
    /// A closed mesh with some faces flipped has a meaningless signed
    /// volume; with this off it is returned anyway.
    /// Default: `true`
    pub check_winding: bool,
}

impl Default for VolumeParams {
    fn default() -> Self {
        Self {
            parallel: true,
            parallel_threshold: PARALLEL_FACE_THRESHOLD,
            check_winding: true,
        }
    }
}

impl VolumeParams {
    /// Checked and strictly sequential: results are reproducible bit for bit.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            parallel: false,
            ..Default::default()
        }
    }

    /// Skip the winding check; only closedness and indices are validated.
    #[must_use]
    pub fn unchecked() -> Self {
        Self {
            check_winding: false,
            ..Default::default()
        }
    }

    /// Enable or disable parallel summation.
    #[must_use]
    pub const fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set the face count above which summation runs in parallel.
    #[must_use]
    pub const fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Enable or disable the winding consistency check.
    #[must_use]
    pub const fn with_check_winding(mut self, check: bool) -> Self {
        self.check_winding = check;
        self
    }

    /// Whether a mesh with `face_count` faces is summed in parallel.
    #[must_use]
    pub const fn use_parallel(&self, face_count: usize) -> bool {
        self.parallel && face_count > self.parallel_threshold
    }
}
