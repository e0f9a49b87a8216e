//! Concave hull construction for clusters of polygons.
mod concave;

pub use concave::concave_hull;

use log::debug;

use crate::{
    core::traits::Real,
    error::HullError,
    geometry::{Polygon, Ring, collect_points},
    grouping::Cluster,
    measure::Metric,
};

/// Max edge length actually used for hull construction.
///
/// A hull cannot bridge a gap wider than its max edge, while polygons of one cluster may lie up to
/// `max_distance` apart. So `max_edge` is used only if it is greater than `max_distance`, otherwise
/// (or if not given) `max_distance + 1` is used. This correction is not an error.
///
/// # Examples
///
/// ```
/// # use polygon_merge::effective_max_edge;
/// assert_eq!(effective_max_edge(Some(5.0), 4.0), 5.0);
/// assert_eq!(effective_max_edge(Some(4.0), 4.0), 5.0);
/// assert_eq!(effective_max_edge(Some(1.0), 4.0), 5.0);
/// assert_eq!(effective_max_edge(None, 2.5), 3.5);
/// ```
#[inline]
pub fn effective_max_edge<T>(max_edge: Option<T>, max_distance: T) -> T
where
    T: Real,
{
    match max_edge {
        Some(edge) if edge > max_distance => edge,
        _ => max_distance + T::one(),
    }
}

/// Concave hull enclosing every outer ring vertex of the polygons in `cluster`.
///
/// `polygons` must be the set the cluster was formed from. Holes do not contribute points. The
/// max edge is corrected with [effective_max_edge] before the hull is built.
pub fn cluster_hull<T>(
    polygons: &[Polygon<T>],
    cluster: &Cluster,
    max_edge: Option<T>,
    max_distance: T,
    metric: &Metric,
) -> Result<Ring<T>, HullError>
where
    T: Real,
{
    let edge = effective_max_edge(max_edge, max_distance);
    if let Some(requested) = max_edge {
        if requested != edge {
            debug!("max edge {requested:?} raised to {edge:?} for max distance {max_distance:?}");
        }
    }

    let points = collect_points(cluster.polygons(polygons));
    let hull = concave_hull(&points, edge, metric)?;
    debug!(
        "hull for cluster seeded by {} built from {} points ({} polygons), {} vertexes",
        cluster.seed(),
        points.len(),
        cluster.len(),
        hull.len() - 1
    );

    Ok(hull)
}
