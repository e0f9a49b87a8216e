//! Error types for configuration, input geometry, hull construction and the merge pipeline.
use thiserror::Error;

/// Input geometry rejected before clustering begins.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// Document geometry had a type other than `MultiPolygon`.
    #[error("expected a MultiPolygon geometry, found {found}")]
    NotMultiPolygon { found: String },
    /// Polygon had no rings at all.
    #[error("polygon {polygon} has no rings")]
    EmptyPolygon { polygon: usize },
    /// First and last positions of a ring differ.
    #[error("ring {ring} of polygon {polygon} is not closed (first and last positions differ)")]
    RingNotClosed { polygon: usize, ring: usize },
    /// Ring had fewer than the 4 positions a closed ring needs.
    #[error("ring {ring} of polygon {polygon} has {point_count} positions, at least 4 are required")]
    RingTooShort {
        polygon: usize,
        ring: usize,
        point_count: usize,
    },
    #[error("ring {ring} of polygon {polygon} has a non-finite coordinate")]
    NonFiniteCoordinate { polygon: usize, ring: usize },
    /// Document position with fewer than two values.
    #[error("ring {ring} of polygon {polygon} has a position with {len} values, at least 2 are required")]
    MalformedPosition {
        polygon: usize,
        ring: usize,
        len: usize,
    },
}

/// Concave hull construction failure for one point set.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HullError {
    #[error("{count} distinct points given, at least 3 are required for a hull")]
    TooFewPoints { count: usize },
    #[error("all {count} distinct points are collinear")]
    Collinear { count: usize },
    /// Every triangle had an edge longer than the max edge.
    #[error("no triangle has all edges within max edge {max_edge}")]
    EdgeStarvation { max_edge: f64 },
    #[error("triangulation rejected a point: {0}")]
    Triangulation(String),
}

/// Invalid merge configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("maxDistance is required")]
    MissingMaxDistance,
    #[error("maxDistance must be a positive finite number, got {value}")]
    InvalidMaxDistance { value: f64 },
    #[error("unknown units '{0}', expected one of degrees, radians, miles, kilometers")]
    UnknownUnits(String),
    #[error("unknown coordinate frame '{0}', expected planar or geographic")]
    UnknownFrame(String),
}

/// Error returned by [merge_polygons_by_distance](crate::merge_polygons_by_distance).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MergeError {
    #[error("invalid input geometry: {0}")]
    InvalidInputGeometry(#[from] GeometryError),
    /// Hull could not be built for the cluster at emission index `cluster`.
    #[error("degenerate hull for cluster {cluster} (polygons {members:?}): {source}")]
    DegenerateHull {
        cluster: usize,
        members: Vec<usize>,
        #[source]
        source: HullError,
    },
    #[error("invalid configuration: {0}")]
    Configuration(#[from] ConfigError),
}

/// Error reading or writing a GeoJSON document.
#[cfg(feature = "serde")]
#[derive(Debug, Error)]
pub enum GeoJsonError {
    #[error("invalid GeoJSON document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected a Feature document, found {found}")]
    NotAFeature { found: String },
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}
