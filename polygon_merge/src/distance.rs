//! Approximate polygon to polygon distance.
use crate::{core::traits::Real, geometry::Polygon, measure::Metric};

/// Approximate minimum distance from polygon `a` to polygon `b`.
///
/// Every outer ring vertex of `a` is measured against the outer ring boundary of `b` and the
/// smallest value is returned. Holes of both polygons are ignored. Edges of `a` are never measured
/// against vertexes of `b`, so the result is not symmetric: `polygon_distance(a, b)` may be larger
/// than `polygon_distance(b, a)` when a long edge of `a` passes close to a vertex of `b`. Grouping
/// always measures from the polygon being expanded to the candidate polygon.
///
/// Returns `Real::max_value()` if either polygon has no rings.
///
/// # Examples
///
/// ```
/// # use polygon_merge::{polygon, polygon_distance, Metric, Units};
/// # use polygon_merge::core::traits::*;
/// let a = polygon![[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]];
/// let b = polygon![[(2.0, 0.0), (3.0, 0.0), (3.0, 1.0), (2.0, 1.0)]];
/// let metric = Metric::planar(Units::Kilometers);
/// assert!(polygon_distance(&a, &b, &metric).fuzzy_eq(1.0));
/// ```
pub fn polygon_distance<T>(a: &Polygon<T>, b: &Polygon<T>, metric: &Metric) -> T
where
    T: Real,
{
    let (Some(outer_a), Some(line_b)) = (a.outer_ring(), b.boundary()) else {
        return Real::max_value();
    };

    outer_a
        .points
        .iter()
        .map(|&p| line_b.distance_to_point(p, metric))
        .fold(Real::max_value(), |acc, d| if d < acc { d } else { acc })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{core::traits::FuzzyEq, measure::Units, polygon};

    #[test]
    fn asymmetric_vertex_to_edge() {
        // long thin bar below a small triangle whose apex points down at the bar's middle
        let bar = polygon![[(0.0, 0.0), (10.0, 0.0), (10.0, 1.0), (0.0, 1.0)]];
        let tri = polygon![[(5.0, 2.0), (6.0, 4.0), (4.0, 4.0)]];
        let metric = Metric::planar(Units::Kilometers);

        // triangle apex to bar top edge
        assert!(polygon_distance(&tri, &bar, &metric).fuzzy_eq(1.0));
        // bar corners to the triangle edges are much farther away
        let bar_to_tri = polygon_distance(&bar, &tri, &metric);
        assert!(bar_to_tri > 4.0);
    }

    #[test]
    fn overlapping_measures_to_boundary() {
        let big = polygon![[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]];
        let small = polygon![[(4.0, 4.0), (6.0, 4.0), (6.0, 6.0), (4.0, 6.0)]];
        let metric = Metric::planar(Units::Kilometers);
        // vertexes of small are 4 away from the boundary of big even though small is inside
        assert!(polygon_distance(&small, &big, &metric).fuzzy_eq(4.0));
    }

    #[test]
    fn holes_are_ignored() {
        let with_hole = polygon![
            [(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)],
            [(4.0, 4.0), (4.0, 6.0), (6.0, 6.0), (6.0, 4.0)],
        ];
        let inside = polygon![[(4.5, 4.5), (5.5, 4.5), (5.5, 5.5), (4.5, 5.5)]];
        let metric = Metric::planar(Units::Kilometers);
        assert!(polygon_distance(&inside, &with_hole, &metric).fuzzy_eq(4.5));
    }

    #[test]
    fn empty_polygon_is_infinitely_far() {
        let a = polygon![[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]];
        let empty = Polygon::new(Vec::new());
        let metric = Metric::default();
        assert_eq!(polygon_distance(&a, &empty, &metric), f64::MAX);
        assert_eq!(polygon_distance(&empty, &a, &metric), f64::MAX);
    }
}
