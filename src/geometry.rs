//! Geometry primitives (C1): vector helpers, distance, and the line-of-sight
//! occlusion test against Earth plus an atmospheric margin.

use nalgebra::Vector3;

use crate::constants::LOS_OCCLUSION_RADIUS_KM;

/// Position or velocity in an Earth-centered inertial frame, kilometers
/// (or km/s for velocities).
pub type Vec3 = Vector3<f64>;

/// Euclidean distance between two points, in kilometers.
pub fn distance_km(a: &Vec3, b: &Vec3) -> f64 {
    (b - a).norm()
}

/// Tests whether the straight-line segment from `a` to `b` clears the Earth
/// plus its atmospheric margin (`LOS_OCCLUSION_RADIUS_KM`).
///
/// The segment is parameterized as `a + t * (b - a)` for `t in [0, 1]`.
/// LOS is blocked iff the sphere centered at the origin intersects the
/// segment, i.e. the quadratic `|a + t*d|^2 = R^2` has a real root in
/// `[0, 1]`. A negative discriminant means the line never reaches the
/// sphere at all, so LOS is unconditionally clear.
pub fn los_clear(a: &Vec3, b: &Vec3) -> bool {
    let d = b - a;
    let r = LOS_OCCLUSION_RADIUS_KM;

    let aa = d.dot(&d);
    if aa < f64::EPSILON {
        return a.norm() >= r;
    }

    let bb = 2.0 * a.dot(&d);
    let cc = a.dot(a) - r * r;

    let discriminant = bb * bb - 4.0 * aa * cc;
    if discriminant < 0.0 {
        return true;
    }

    let sqrt_disc = discriminant.sqrt();
    let t1 = (-bb - sqrt_disc) / (2.0 * aa);
    let t2 = (-bb + sqrt_disc) / (2.0 * aa);

    let root_in_range = |t: f64| (0.0..=1.0).contains(&t);
    !(root_in_range(t1) || root_in_range(t2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn los_clear_is_symmetric() {
        let a = Vector3::new(10000.0, 0.0, 0.0);
        let b = Vector3::new(0.0, 10000.0, 0.0);
        assert_eq!(los_clear(&a, &b), los_clear(&b, &a));
    }

    #[test]
    fn los_blocked_through_earth_center() {
        let a = Vector3::new(10000.0, 0.0, 0.0);
        let b = Vector3::new(-10000.0, 0.0, 0.0);
        assert!(!los_clear(&a, &b));
    }

    #[test]
    fn los_clear_above_horizon() {
        let a = Vector3::new(0.0, 0.0, 8000.0);
        let b = Vector3::new(0.0, 0.0, 9000.0);
        assert!(los_clear(&a, &b));
    }

    #[test]
    fn los_blocked_when_grazing_inside_margin() {
        // Two points on opposite sides of Earth at an altitude below the
        // atmospheric margin: the straight line dips well inside the
        // occlusion sphere.
        let a = Vector3::new(6390.0, 0.0, 0.0);
        let b = Vector3::new(-6390.0, 0.0, 0.0);
        assert!(!los_clear(&a, &b));
    }

    #[test]
    fn distance_is_euclidean() {
        let a = Vector3::new(0.0, 0.0, 0.0);
        let b = Vector3::new(3.0, 4.0, 0.0);
        assert!((distance_km(&a, &b) - 5.0).abs() < 1e-12);
    }
}
