//! Ring, polygon and multi-polygon types plus the boundary line view used for distance queries.
use static_aabb2d_index::AABB;

use crate::{
    core::{
        math::{Vector2, double_signed_area, line_seg_closest_point},
        traits::Real,
    },
    error::GeometryError,
    measure::Metric,
};

/// Closed sequence of points, the last point repeats the first.
#[derive(Debug, Clone, PartialEq)]
pub struct Ring<T = f64> {
    pub points: Vec<Vector2<T>>,
}

impl<T> Ring<T>
where
    T: Real,
{
    #[inline]
    pub fn new(points: Vec<Vector2<T>>) -> Self {
        Ring { points }
    }

    /// Create a ring from an open point sequence, appending the first point to close it.
    pub fn from_open(mut points: Vec<Vector2<T>>) -> Self {
        if let Some(&first) = points.first() {
            if points.last() != Some(&first) || points.len() == 1 {
                points.push(first);
            }
        }
        Ring { points }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points of the ring without the repeated closing point.
    pub fn open_points(&self) -> &[Vector2<T>] {
        match self.points.split_last() {
            Some((last, rest)) if rest.first() == Some(last) => rest,
            _ => &self.points,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.points.len() > 1 && self.points.first() == self.points.last()
    }

    /// Signed area (positive if counter clockwise).
    pub fn area(&self) -> T {
        double_signed_area(self.open_points()) / T::two()
    }

    /// Bounding box of all points, `None` if the ring is empty.
    pub fn extents(&self) -> Option<AABB<T>> {
        let first = self.points.first()?;
        let mut result = AABB::new(first.x, first.y, first.x, first.y);
        for p in self.points.iter().skip(1) {
            result.min_x = num_traits::real::Real::min(result.min_x, p.x);
            result.min_y = num_traits::real::Real::min(result.min_y, p.y);
            result.max_x = num_traits::real::Real::max(result.max_x, p.x);
            result.max_y = num_traits::real::Real::max(result.max_y, p.y);
        }

        Some(result)
    }

    /// Checks the ring is closed, has at least 4 points and only finite coordinates. `polygon`
    /// and `ring` are used to identify the ring in the error returned.
    pub fn validate(&self, polygon: usize, ring: usize) -> Result<(), GeometryError> {
        if self.points.len() < 4 {
            return Err(GeometryError::RingTooShort {
                polygon,
                ring,
                point_count: self.points.len(),
            });
        }

        if !self.points.iter().all(|p| p.is_finite()) {
            return Err(GeometryError::NonFiniteCoordinate { polygon, ring });
        }

        if !self.is_closed() {
            return Err(GeometryError::RingNotClosed { polygon, ring });
        }

        Ok(())
    }

    /// View of the ring as a line string for point distance queries.
    #[inline]
    pub fn boundary(&self) -> BoundaryLine<'_, T> {
        BoundaryLine {
            points: &self.points,
        }
    }
}

/// Polygon as an outer ring followed by zero or more hole rings.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon<T = f64> {
    pub rings: Vec<Ring<T>>,
}

impl<T> Polygon<T>
where
    T: Real,
{
    #[inline]
    pub fn new(rings: Vec<Ring<T>>) -> Self {
        Polygon { rings }
    }

    #[inline]
    pub fn from_outer(outer: Ring<T>) -> Self {
        Polygon { rings: vec![outer] }
    }

    #[inline]
    pub fn outer_ring(&self) -> Option<&Ring<T>> {
        self.rings.first()
    }

    #[inline]
    pub fn holes(&self) -> &[Ring<T>] {
        self.rings.get(1..).unwrap_or(&[])
    }

    /// Consumes the polygon keeping only the outer ring.
    pub fn without_holes(mut self) -> Self {
        self.rings.truncate(1);
        self
    }

    /// Outer ring boundary line, `None` if the polygon has no rings.
    #[inline]
    pub fn boundary(&self) -> Option<BoundaryLine<'_, T>> {
        self.outer_ring().map(Ring::boundary)
    }

    /// Validates every ring, `index` identifies the polygon in the error returned.
    pub fn validate(&self, index: usize) -> Result<(), GeometryError> {
        if self.rings.is_empty() {
            return Err(GeometryError::EmptyPolygon { polygon: index });
        }

        for (ring_idx, ring) in self.rings.iter().enumerate() {
            ring.validate(index, ring_idx)?;
        }

        Ok(())
    }
}

/// Ordered collection of polygons.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiPolygon<T = f64> {
    pub polygons: Vec<Polygon<T>>,
}

impl<T> Default for MultiPolygon<T> {
    #[inline]
    fn default() -> Self {
        MultiPolygon {
            polygons: Vec::new(),
        }
    }
}

impl<T> MultiPolygon<T>
where
    T: Real,
{
    #[inline]
    pub fn new(polygons: Vec<Polygon<T>>) -> Self {
        MultiPolygon { polygons }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    /// Validates all polygons in order, failing on the first invalid ring.
    pub fn validate(&self) -> Result<(), GeometryError> {
        self.polygons
            .iter()
            .enumerate()
            .try_for_each(|(i, p)| p.validate(i))
    }

    /// Consumes the multi-polygon dropping every hole ring.
    pub fn without_holes(self) -> Self {
        MultiPolygon {
            polygons: self
                .polygons
                .into_iter()
                .map(Polygon::without_holes)
                .collect(),
        }
    }
}

impl<T> FromIterator<Polygon<T>> for MultiPolygon<T> {
    fn from_iter<I: IntoIterator<Item = Polygon<T>>>(iter: I) -> Self {
        MultiPolygon {
            polygons: iter.into_iter().collect(),
        }
    }
}

/// Borrowed line string view over a ring's points.
#[derive(Debug, Copy, Clone)]
pub struct BoundaryLine<'a, T> {
    points: &'a [Vector2<T>],
}

impl<'a, T> BoundaryLine<'a, T>
where
    T: Real,
{
    #[inline]
    pub fn points(&self) -> &'a [Vector2<T>] {
        self.points
    }

    /// Iterate over the line segments as `(start, end)` point pairs.
    #[inline]
    pub fn iter_segments(&self) -> impl Iterator<Item = (Vector2<T>, Vector2<T>)> + 'a {
        self.points.windows(2).map(|w| (w[0], w[1]))
    }

    /// Same as [point_to_line_distance].
    #[inline]
    pub fn distance_to_point(&self, point: Vector2<T>, metric: &Metric) -> T {
        point_to_line_distance(point, self, metric)
    }
}

/// Minimum distance from `point` to any segment of `line`.
///
/// For each segment the closest point is found in coordinate space and then measured with
/// `metric`. Returns `Real::max_value()` if the line has no points. A line with a single point
/// measures to that point.
///
/// # Examples
///
/// ```
/// # use polygon_merge::{ring, Metric, Units, point_to_line_distance};
/// # use polygon_merge::core::{math::Vector2, traits::*};
/// let square = ring![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)];
/// let metric = Metric::planar(Units::Kilometers);
/// let d = point_to_line_distance(Vector2::new(3.0, 0.5), &square.boundary(), &metric);
/// assert!(d.fuzzy_eq(2.0));
/// ```
pub fn point_to_line_distance<T>(point: Vector2<T>, line: &BoundaryLine<'_, T>, metric: &Metric) -> T
where
    T: Real,
{
    match line.points {
        [] => Real::max_value(),
        [single] => metric.distance(point, *single),
        _ => line
            .iter_segments()
            .map(|(p0, p1)| metric.distance(point, line_seg_closest_point(p0, p1, point)))
            .fold(Real::max_value(), |acc, d| if d < acc { d } else { acc }),
    }
}

/// Every outer ring point of `polygons`, in polygon then ring order (closing points included).
pub fn collect_points<'a, T, I>(polygons: I) -> Vec<Vector2<T>>
where
    T: Real,
    I: IntoIterator<Item = &'a Polygon<T>>,
{
    polygons
        .into_iter()
        .filter_map(Polygon::outer_ring)
        .flat_map(|r| r.points.iter().copied())
        .collect()
}
