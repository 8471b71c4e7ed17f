//! Triangle type for geometric calculations.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A triangle with resolved vertex positions.
///
/// Winding is **counter-clockwise (CCW) when viewed from the front**, so
/// the right-hand-rule normal points toward the viewer.
///
/// # Example
///
/// ```
/// use mesh_types::{Triangle, Point3};
///
/// let tri = Triangle::new(
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// );
///
/// assert!((tri.area() - 0.5).abs() < 1e-10);
/// assert!((tri.normal().unwrap().z - 1.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Triangle {
    /// First vertex.
    pub v0: Point3<f64>,
    /// Second vertex.
    pub v1: Point3<f64>,
    /// Third vertex.
    pub v2: Point3<f64>,
}

impl Triangle {
    /// Create a new triangle from three points.
    #[inline]
    #[must_use]
    pub const fn new(v0: Point3<f64>, v1: Point3<f64>, v2: Point3<f64>) -> Self {
        Self { v0, v1, v2 }
    }

    /// The three corners in winding order.
    #[inline]
    #[must_use]
    pub const fn vertices(&self) -> [Point3<f64>; 3] {
        [self.v0, self.v1, self.v2]
    }

    /// The three directed edges: v0→v1, v1→v2, v2→v0.
    #[inline]
    #[must_use]
    pub const fn edges(&self) -> [(Point3<f64>, Point3<f64>); 3] {
        [(self.v0, self.v1), (self.v1, self.v2), (self.v2, self.v0)]
    }

    /// Cross product of the two edges leaving `v0`.
    ///
    /// Its length is twice the area.
    #[inline]
    #[must_use]
    pub fn normal_unnormalized(&self) -> Vector3<f64> {
        (self.v1 - self.v0).cross(&(self.v2 - self.v0))
    }

    /// Unit face normal, or `None` for a zero-area triangle.
    #[must_use]
    pub fn normal(&self) -> Option<Vector3<f64>> {
        let n = self.normal_unnormalized();
        let len_sq = n.norm_squared();
        if len_sq > f64::EPSILON * f64::EPSILON {
            Some(n / len_sq.sqrt())
        } else {
            None
        }
    }

    /// Area of the triangle.
    #[inline]
    #[must_use]
    pub fn area(&self) -> f64 {
        self.normal_unnormalized().norm() * 0.5
    }

    /// Centroid of the three corners.
    #[inline]
    #[must_use]
    pub fn centroid(&self) -> Point3<f64> {
        Point3::from((self.v0.coords + self.v1.coords + self.v2.coords) / 3.0)
    }

    /// Smallest interior angle in radians.
    ///
    /// Returns `0.0` when any edge has zero length.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::{Triangle, Point3};
    ///
    /// let sqrt3 = 3.0_f64.sqrt();
    /// let tri = Triangle::new(
    ///     Point3::new(0.0, 0.0, 0.0),
    ///     Point3::new(2.0, 0.0, 0.0),
    ///     Point3::new(1.0, sqrt3, 0.0),
    /// );
    /// assert!((tri.min_angle() - std::f64::consts::FRAC_PI_3).abs() < 1e-10);
    /// ```
    #[must_use]
    pub fn min_angle(&self) -> f64 {
        let corners = self.vertices();
        let mut min = f64::INFINITY;
        for i in 0..3 {
            let at = corners[i];
            let a = corners[(i + 1) % 3] - at;
            let b = corners[(i + 2) % 3] - at;
            let denom = a.norm() * b.norm();
            if denom <= f64::EPSILON {
                return 0.0;
            }
            let angle = (a.dot(&b) / denom).clamp(-1.0, 1.0).acos();
            min = min.min(angle);
        }
        min
    }

    /// Check whether the area is below `epsilon`.
    #[inline]
    #[must_use]
    pub fn is_degenerate(&self, epsilon: f64) -> bool {
        self.area() < epsilon
    }

    /// Signed volume of the tetrahedron spanned by this triangle and the origin.
    ///
    /// `v0 · (v1 × v2) / 6`. Summed over a closed, outward-wound surface this
    /// gives the enclosed volume.
    #[inline]
    #[must_use]
    pub fn signed_volume(&self) -> f64 {
        let (v0, v1, v2) = (&self.v0, &self.v1, &self.v2);
        // mul_add keeps one rounding per term
        let cross = Vector3::new(
            v1.y.mul_add(v2.z, -(v1.z * v2.y)),
            v1.z.mul_add(v2.x, -(v1.x * v2.z)),
            v1.x.mul_add(v2.y, -(v1.y * v2.x)),
        );
        v0.z.mul_add(cross.z, v0.x.mul_add(cross.x, v0.y * cross.y)) / 6.0
    }

    /// Same triangle with opposite winding.
    #[inline]
    #[must_use]
    pub const fn reversed(&self) -> Self {
        Self {
            v0: self.v0,
            v1: self.v2,
            v2: self.v1,
        }
    }
}
