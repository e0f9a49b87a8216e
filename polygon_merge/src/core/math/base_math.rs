use super::Vector2;
use crate::core::traits::Real;

/// Normalize radians to be between `0` and `2PI`, e.g. `-PI/4` becomes `7PI/4` and `5PI` becomes
/// `PI`.
///
/// # Examples
///
/// ```
/// # use polygon_merge::core::math::*;
/// # use polygon_merge::core::traits::*;
/// use std::f64::consts::PI;
/// assert!(normalize_radians(5.0 * PI).fuzzy_eq(PI));
/// assert!(normalize_radians(-PI / 4.0).fuzzy_eq(7.0 * PI / 4.0));
/// // anything between 0 and 2PI inclusive is left unchanged
/// assert!(normalize_radians(0.0).fuzzy_eq(0.0));
/// assert!(normalize_radians(2.0 * PI).fuzzy_eq(2.0 * PI));
/// ```
#[inline]
pub fn normalize_radians<T>(angle: T) -> T
where
    T: Real,
{
    if angle >= T::zero() && angle <= T::tau() {
        return angle;
    }

    angle - (angle / T::tau()).floor() * T::tau()
}

/// Angle of the direction vector described by `p0` to `p1`.
#[inline]
pub fn angle<T>(p0: Vector2<T>, p1: Vector2<T>) -> T
where
    T: Real,
{
    T::atan2(p1.y - p0.y, p1.x - p0.x)
}

/// Counter clockwise sweep in radians (`0` to `2PI`) going from the direction `origin -> from` to
/// the direction `origin -> to`.
///
/// # Examples
///
/// ```
/// # use polygon_merge::core::math::*;
/// # use polygon_merge::core::traits::*;
/// use std::f64::consts::PI;
/// let origin = Vector2::new(0.0, 0.0);
/// let sweep = ccw_sweep(origin, Vector2::new(1.0, 0.0), Vector2::new(0.0, 1.0));
/// assert!(sweep.fuzzy_eq(PI / 2.0));
/// let sweep = ccw_sweep(origin, Vector2::new(0.0, 1.0), Vector2::new(1.0, 0.0));
/// assert!(sweep.fuzzy_eq(3.0 * PI / 2.0));
/// ```
#[inline]
pub fn ccw_sweep<T>(origin: Vector2<T>, from: Vector2<T>, to: Vector2<T>) -> T
where
    T: Real,
{
    normalize_radians(angle(origin, to) - angle(origin, from))
}

/// Returns the closest point on the line segment from `p0` to `p1` to the `point` given.
///
/// The projection is done in coordinate space. A zero length segment returns `p0`.
///
/// # Examples
///
/// ```
/// # use polygon_merge::core::math::*;
/// let p0 = Vector2::new(0.0, 0.0);
/// let p1 = Vector2::new(2.0, 0.0);
/// assert_eq!(line_seg_closest_point(p0, p1, Vector2::new(1.0, 3.0)), Vector2::new(1.0, 0.0));
/// assert_eq!(line_seg_closest_point(p0, p1, Vector2::new(-1.0, 1.0)), p0);
/// assert_eq!(line_seg_closest_point(p0, p1, Vector2::new(5.0, 1.0)), p1);
/// ```
#[inline]
pub fn line_seg_closest_point<T>(p0: Vector2<T>, p1: Vector2<T>, point: Vector2<T>) -> Vector2<T>
where
    T: Real,
{
    // Dot product used to find angles
    // See: http://geomalgorithms.com/a02-_lines.html
    let v = p1 - p0;
    let w = point - p0;
    let c1 = w.dot(v);
    if c1 <= T::zero() {
        return p0;
    }

    let c2 = v.length_squared();
    if c2 <= c1 {
        return p1;
    }

    let b = c1 / c2;
    p0 + v.scale(b)
}

/// Returns twice the signed area enclosed by the closed sequence of `points` (shoelace formula).
///
/// Positive for counter clockwise, negative for clockwise. The sequence is treated as closed
/// whether or not the last point repeats the first.
#[inline]
pub fn double_signed_area<T>(points: &[Vector2<T>]) -> T
where
    T: Real,
{
    let n = points.len();
    if n < 3 {
        return T::zero();
    }

    let mut total = T::zero();
    for i in 0..n {
        let v1 = points[i];
        let v2 = points[(i + 1) % n];
        total = total + v1.perp_dot(v2);
    }

    total
}
