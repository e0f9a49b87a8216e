//! Output assembly and the full merge pipeline.
use log::debug;
use rayon::prelude::*;

use crate::{
    core::traits::Real,
    error::MergeError,
    geometry::{MultiPolygon, Polygon, Ring},
    grouping::group_polygons,
    hull::cluster_hull,
    options::MergeOptions,
};

/// Multi-polygon geometry paired with a property bag that is carried along without being
/// inspected.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiPolygonFeature<T = f64, P = ()> {
    pub geometry: MultiPolygon<T>,
    pub properties: P,
}

impl<T, P> MultiPolygonFeature<T, P>
where
    T: Real,
{
    #[inline]
    pub fn new(geometry: MultiPolygon<T>, properties: P) -> Self {
        Self {
            geometry,
            properties,
        }
    }
}

/// Builds the output feature: one single ring polygon per hull, in the order given.
#[inline]
pub fn compose<T, P>(hulls: Vec<Ring<T>>, properties: P) -> MultiPolygonFeature<T, P>
where
    T: Real,
{
    MultiPolygonFeature {
        geometry: hulls.into_iter().map(Polygon::from_outer).collect(),
        properties,
    }
}

/// Merges the polygons of `feature` that lie within `options.max_distance` of each other
/// (directly or through a chain of polygons) into one concave hull per group.
///
/// Input holes are discarded and never reappear in the output. Output polygons are in cluster
/// order: the cluster containing input polygon 0 comes first, followed by the cluster containing
/// the first polygon not yet covered, and so on. Properties are passed through unchanged.
///
/// # Errors
///
/// * [MergeError::Configuration] if `options` fails [MergeOptions::validate].
/// * [MergeError::InvalidInputGeometry] if any ring is malformed, checked before grouping.
/// * [MergeError::DegenerateHull] naming the first cluster (in output order) whose hull could not
///   be built.
///
/// # Examples
///
/// ```
/// # use polygon_merge::{merge_polygons_by_distance, polygon, MergeOptions, MultiPolygon,
/// #     MultiPolygonFeature};
/// let input = MultiPolygonFeature::new(
///     MultiPolygon::new(vec![
///         polygon![[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]],
///         polygon![[(2.0, 0.0), (3.0, 0.0), (3.0, 1.0), (2.0, 1.0)]],
///         polygon![[(20.0, 0.0), (21.0, 0.0), (21.0, 1.0), (20.0, 1.0)]],
///     ]),
///     "tag",
/// );
/// let merged = merge_polygons_by_distance(input, &MergeOptions::new(4.0)).unwrap();
/// assert_eq!(merged.geometry.len(), 2);
/// assert_eq!(merged.properties, "tag");
/// ```
pub fn merge_polygons_by_distance<T, P>(
    feature: MultiPolygonFeature<T, P>,
    options: &MergeOptions<T>,
) -> Result<MultiPolygonFeature<T, P>, MergeError>
where
    T: Real,
{
    options.validate()?;
    feature.geometry.validate()?;

    let MultiPolygonFeature {
        geometry,
        properties,
    } = feature;
    let polygons = geometry.without_holes().polygons;
    let metric = options.metric();

    let clustering = group_polygons(&polygons, options.max_distance, &metric);
    debug!(
        "{} polygons grouped into {} clusters (max distance {:?} {})",
        polygons.len(),
        clustering.len(),
        options.max_distance,
        options.units
    );

    // all hulls are collected in cluster order first, the lowest failing cluster is reported
    let hulls = clustering
        .clusters()
        .par_iter()
        .enumerate()
        .map(|(i, cluster)| {
            cluster_hull(
                &polygons,
                cluster,
                options.max_edge,
                options.max_distance,
                &metric,
            )
            .map_err(|source| MergeError::DegenerateHull {
                cluster: i,
                members: cluster.members().to_vec(),
                source,
            })
        })
        .collect::<Vec<_>>()
        .into_iter()
        .collect::<Result<Vec<_>, _>>()?;

    Ok(compose(hulls, properties))
}
