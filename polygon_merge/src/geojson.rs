//! Reading and writing [MultiPolygonFeature] as a GeoJSON `Feature` document.
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    compose::MultiPolygonFeature,
    core::math::Vector2,
    error::{GeoJsonError, GeometryError},
    geometry::{MultiPolygon, Polygon, Ring},
};

const FEATURE: &str = "Feature";
const MULTI_POLYGON: &str = "MultiPolygon";

type Coordinates = Vec<Vec<Vec<Vec<f64>>>>;

#[derive(Debug, Deserialize)]
struct FeatureIn {
    #[serde(rename = "type")]
    type_: String,
    #[serde(default)]
    properties: Value,
    geometry: Option<GeometryIn>,
}

#[derive(Debug, Deserialize)]
struct GeometryIn {
    #[serde(rename = "type")]
    type_: String,
    #[serde(default)]
    coordinates: Value,
}

#[derive(Debug, Serialize)]
struct FeatureOut<'a, P> {
    #[serde(rename = "type")]
    type_: &'static str,
    properties: &'a P,
    geometry: GeometryOut,
}

#[derive(Debug, Serialize)]
struct GeometryOut {
    #[serde(rename = "type")]
    type_: &'static str,
    coordinates: Vec<Vec<Vec<[f64; 2]>>>,
}

/// Parses a GeoJSON `Feature` with a `MultiPolygon` geometry.
///
/// Positions with more than 2 values keep x and y only. Missing properties read as `null`. Rings
/// are not validated here, see [MultiPolygon::validate].
///
/// # Examples
///
/// ```
/// # use polygon_merge::geojson::read_feature;
/// let doc = r#"{
///   "type": "Feature",
///   "properties": { "name": "parcels" },
///   "geometry": {
///     "type": "MultiPolygon",
///     "coordinates": [[[[0, 0], [1, 0], [1, 1], [0, 1], [0, 0]]]]
///   }
/// }"#;
/// let feature = read_feature(doc).unwrap();
/// assert_eq!(feature.geometry.len(), 1);
/// assert_eq!(feature.properties["name"], "parcels");
/// ```
pub fn read_feature(json: &str) -> Result<MultiPolygonFeature<f64, Value>, GeoJsonError> {
    let doc: FeatureIn = serde_json::from_str(json)?;
    if doc.type_ != FEATURE {
        return Err(GeoJsonError::NotAFeature { found: doc.type_ });
    }

    let geometry = doc.geometry.ok_or_else(|| GeometryError::NotMultiPolygon {
        found: "null".to_string(),
    })?;
    if geometry.type_ != MULTI_POLYGON {
        return Err(GeometryError::NotMultiPolygon {
            found: geometry.type_,
        }
        .into());
    }

    let coordinates: Coordinates = serde_json::from_value(geometry.coordinates)?;
    let polygons = coordinates
        .into_iter()
        .enumerate()
        .map(|(polygon_idx, rings)| read_polygon(polygon_idx, rings))
        .collect::<Result<MultiPolygon<f64>, _>>()?;

    Ok(MultiPolygonFeature::new(polygons, doc.properties))
}

fn read_polygon(polygon: usize, rings: Vec<Vec<Vec<f64>>>) -> Result<Polygon<f64>, GeometryError> {
    let rings = rings
        .into_iter()
        .enumerate()
        .map(|(ring, positions)| {
            positions
                .into_iter()
                .map(|pos| match pos.as_slice() {
                    [x, y, ..] => Ok(Vector2::new(*x, *y)),
                    _ => Err(GeometryError::MalformedPosition {
                        polygon,
                        ring,
                        len: pos.len(),
                    }),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Ring::new)
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Polygon::new(rings))
}

/// Writes `feature` as a compact GeoJSON `Feature` document.
pub fn write_feature<P>(feature: &MultiPolygonFeature<f64, P>) -> Result<String, GeoJsonError>
where
    P: Serialize,
{
    let coordinates = feature
        .geometry
        .polygons
        .iter()
        .map(|p| {
            p.rings
                .iter()
                .map(|r| r.points.iter().map(|v| [v.x, v.y]).collect())
                .collect()
        })
        .collect();

    let doc = FeatureOut {
        type_: FEATURE,
        properties: &feature.properties,
        geometry: GeometryOut {
            type_: MULTI_POLYGON,
            coordinates,
        },
    };

    Ok(serde_json::to_string(&doc)?)
}
