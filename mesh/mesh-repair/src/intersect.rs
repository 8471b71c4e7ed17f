//! Triangle intersection tests for the hole-patching guard.
//!
//! Patch triangles always touch their neighbours: they share boundary
//! vertices and edges with the faces around the hole and with each other.
//! The tests here therefore work on *indexed* triangles and do not count
//! contact at shared vertices as an intersection. Anything else does
//! count, including coplanar overlap (a patch folding back over its
//! neighbour).

// Allow this pattern - it's correct for barycentric coordinate determinant calculation
#![allow(clippy::suspicious_operation_groupings)]

use mesh_types::{Point3, Triangle, Vector3};

/// Segment-triangle intersection using Möller-Trumbore.
///
/// Returns the intersection point if the segment `e0`–`e1` crosses or
/// touches the triangle. Segments parallel to the triangle plane never
/// intersect here; coplanar contact is handled separately.
///
/// # Example
///
/// ```
/// use mesh_repair::intersect::segment_triangle_intersection;
/// use mesh_types::{Point3, Triangle};
///
/// let tri = Triangle::new(
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(2.0, 0.0, 0.0),
///     Point3::new(0.0, 2.0, 0.0),
/// );
/// let hit = segment_triangle_intersection(
///     &Point3::new(0.5, 0.5, -1.0),
///     &Point3::new(0.5, 0.5, 1.0),
///     &tri,
///     1e-12,
/// );
/// assert!(hit.is_some());
/// ```
#[must_use]
pub fn segment_triangle_intersection(
    e0: &Point3<f64>,
    e1: &Point3<f64>,
    tri: &Triangle,
    epsilon: f64,
) -> Option<Point3<f64>> {
    let direction = e1 - e0;
    let edge1 = tri.v1 - tri.v0;
    let edge2 = tri.v2 - tri.v0;
    let h = direction.cross(&edge2);
    let a = edge1.dot(&h);

    // Parallel test relative to the magnitudes involved
    let scale = direction.norm() * edge1.norm() * edge2.norm();
    if a.abs() <= epsilon * scale.max(f64::MIN_POSITIVE) {
        return None;
    }

    let f = 1.0 / a;
    let s = e0 - tri.v0;
    let u = f * s.dot(&h);
    if !(-epsilon..=1.0 + epsilon).contains(&u) {
        return None;
    }

    let q = s.cross(&edge1);
    let v = f * direction.dot(&q);
    if v < -epsilon || u + v > 1.0 + epsilon {
        return None;
    }

    let t = f * edge2.dot(&q);
    if t < -epsilon || t > 1.0 + epsilon {
        return None;
    }

    Some(e0 + direction * t.clamp(0.0, 1.0))
}

/// Test whether two indexed triangles intersect anywhere other than at
/// the vertices they share.
///
/// `ids_a`/`ids_b` are the vertex indices of `a`/`b`; positions of shared
/// indices are treated as legal contact points. Degenerate (zero-area)
/// triangles never intersect.
///
/// # Example
///
/// ```
/// use mesh_repair::intersect::indexed_triangles_intersect;
/// use mesh_types::{Point3, Triangle};
///
/// let p = [
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
///     Point3::new(0.0, 0.0, 1.0),
/// ];
/// // Two faces of a tetrahedron share an edge but do not intersect
/// let a = Triangle::new(p[0], p[1], p[2]);
/// let b = Triangle::new(p[0], p[3], p[1]);
/// assert!(!indexed_triangles_intersect([0, 1, 2], &a, [0, 3, 1], &b, 1e-9));
/// ```
#[must_use]
pub fn indexed_triangles_intersect(
    ids_a: [u32; 3],
    a: &Triangle,
    ids_b: [u32; 3],
    b: &Triangle,
    epsilon: f64,
) -> bool {
    let (Some(normal_a), Some(normal_b)) = (a.normal(), b.normal()) else {
        return false;
    };

    let size = a
        .edges()
        .iter()
        .chain(b.edges().iter())
        .map(|(p, q)| (q - p).norm())
        .fold(0.0_f64, f64::max);
    let tolerance = epsilon * size.max(1.0);

    let shared: Vec<Point3<f64>> = (0..3)
        .filter(|&i| ids_b.contains(&ids_a[i]))
        .map(|i| a.vertices()[i])
        .collect();

    if shared.len() == 3 {
        // Same vertex set: either the same face or its reverse
        return false;
    }

    let coplanar = normal_a.cross(&normal_b).norm() <= epsilon.sqrt()
        && b
            .vertices()
            .iter()
            .all(|p| (p - a.v0).dot(&normal_a).abs() <= tolerance);

    if coplanar {
        return coplanar_overlap(ids_a, a, ids_b, b, &normal_a, tolerance);
    }

    let is_shared_contact =
        |p: &Point3<f64>| shared.iter().any(|s| (p - s).norm() <= tolerance);

    let crosses = |from: &Triangle, into: &Triangle| {
        from.edges().iter().any(|(e0, e1)| {
            segment_triangle_intersection(e0, e1, into, epsilon)
                .is_some_and(|hit| !is_shared_contact(&hit))
        })
    };

    crosses(a, b) || crosses(b, a)
}

/// Overlap test for two triangles lying in the same plane.
fn coplanar_overlap(
    ids_a: [u32; 3],
    a: &Triangle,
    ids_b: [u32; 3],
    b: &Triangle,
    normal: &Vector3<f64>,
    tolerance: f64,
) -> bool {
    let project = drop_axis(normal);
    let pa = a.vertices().map(&project);
    let pb = b.vertices().map(&project);
    let area_tol = tolerance * tolerance;

    // A vertex not shared with the other triangle lying inside it
    for i in 0..3 {
        if !ids_b.contains(&ids_a[i]) && strictly_inside(pa[i], &pb, area_tol) {
            return true;
        }
        if !ids_a.contains(&ids_b[i]) && strictly_inside(pb[i], &pa, area_tol) {
            return true;
        }
    }

    // Edges crossing properly, skipping pairs that meet at a shared vertex
    for i in 0..3 {
        let (a0, a1) = (ids_a[i], ids_a[(i + 1) % 3]);
        for j in 0..3 {
            let (b0, b1) = (ids_b[j], ids_b[(j + 1) % 3]);
            if a0 == b0 || a0 == b1 || a1 == b0 || a1 == b1 {
                continue;
            }
            if segments_cross(pa[i], pa[(i + 1) % 3], pb[j], pb[(j + 1) % 3], area_tol) {
                return true;
            }
        }
    }

    false
}

/// Projection to 2-D dropping the axis most aligned with `normal`.
fn drop_axis(normal: &Vector3<f64>) -> impl Fn(Point3<f64>) -> [f64; 2] {
    let (x, y, z) = (normal.x.abs(), normal.y.abs(), normal.z.abs());
    let axis = if z >= x && z >= y {
        2
    } else if y >= x {
        1
    } else {
        0
    };
    move |p: Point3<f64>| match axis {
        2 => [p.x, p.y],
        1 => [p.x, p.z],
        _ => [p.y, p.z],
    }
}

/// Twice the signed area of (a, b, c).
#[inline]
pub(crate) fn orient2d(a: [f64; 2], b: [f64; 2], c: [f64; 2]) -> f64 {
    (b[0] - a[0]).mul_add(c[1] - a[1], -((b[1] - a[1]) * (c[0] - a[0])))
}

fn strictly_inside(p: [f64; 2], tri: &[[f64; 2]; 3], area_tol: f64) -> bool {
    let d1 = orient2d(tri[0], tri[1], p);
    let d2 = orient2d(tri[1], tri[2], p);
    let d3 = orient2d(tri[2], tri[0], p);
    (d1 > area_tol && d2 > area_tol && d3 > area_tol)
        || (d1 < -area_tol && d2 < -area_tol && d3 < -area_tol)
}

fn segments_cross(p1: [f64; 2], p2: [f64; 2], q1: [f64; 2], q2: [f64; 2], area_tol: f64) -> bool {
    let d1 = orient2d(p1, p2, q1);
    let d2 = orient2d(p1, p2, q2);
    let d3 = orient2d(q1, q2, p1);
    let d4 = orient2d(q1, q2, p2);
    ((d1 > area_tol && d2 < -area_tol) || (d1 < -area_tol && d2 > area_tol))
        && ((d3 > area_tol && d4 < -area_tol) || (d3 < -area_tol && d4 > area_tol))
}
