//! Enclosed volume of closed triangle meshes.
//!
//! This crate provides:
//! - [`volume`] - Volume enclosed by a closed, consistently wound mesh
//! - [`volume_difference`] - `volume(a) - volume(b)`, naming the operand
//!   that failed
//! - [`signed_volume`] - The raw divergence-theorem sum, without topology checks
//! - [`CompensatedSum`] - The accumulator used for all of the above
//!
//! Volumes are never computed on open meshes: close them first with
//! `mesh-repair`.
//!
//! # Example
//!
//! ```
//! use mesh_types::unit_cube;
//! use mesh_volume::{VolumeError, volume};
//!
//! let cube = unit_cube();
//! assert!((volume(&cube).unwrap() - 1.0).abs() < 1e-12);
//!
//! let mut open = cube.clone();
//! open.faces.pop();
//! assert!(matches!(volume(&open), Err(VolumeError::NotClosed { .. })));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod error;
mod params;
mod sum;
mod volume;

pub use error::{Operand, VolumeError, VolumeResult};
pub use params::VolumeParams;
pub use sum::CompensatedSum;
pub use volume::{
    signed_volume, signed_volume_with_params, volume, volume_difference,
    volume_difference_with_params, volume_with_params,
};
