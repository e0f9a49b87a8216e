//! Units, coordinate frames and the [Metric] used to measure every distance and hull edge.
use std::{fmt, str::FromStr};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    core::{math::Vector2, traits::Real},
    error::ConfigError,
};

/// Mean earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0088;
/// Mean earth radius in miles.
pub const EARTH_RADIUS_MILES: f64 = EARTH_RADIUS_KM / 1.609344;

/// Unit of every distance and edge length value (threshold, max edge and computed distances).
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "lowercase")
)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum Units {
    Degrees,
    Radians,
    Miles,
    #[default]
    Kilometers,
}

impl Units {
    pub const ALL: [Units; 4] = [
        Units::Degrees,
        Units::Radians,
        Units::Miles,
        Units::Kilometers,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Units::Degrees => "degrees",
            Units::Radians => "radians",
            Units::Miles => "miles",
            Units::Kilometers => "kilometers",
        }
    }

    /// Converts an arc length on the earth's surface given in radians to this unit.
    pub fn from_radians<T>(self, radians: T) -> T
    where
        T: Real,
    {
        let factor = match self {
            Units::Degrees => 180.0 / std::f64::consts::PI,
            Units::Radians => 1.0,
            Units::Miles => EARTH_RADIUS_MILES,
            Units::Kilometers => EARTH_RADIUS_KM,
        };

        radians * T::constant(factor)
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Units {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Units::ALL
            .into_iter()
            .find(|u| u.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ConfigError::UnknownUnits(s.to_string()))
    }
}

/// How input coordinates relate to [Units].
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "lowercase")
)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum CoordinateFrame {
    /// Coordinates are already expressed in the configured units, distance is Euclidean.
    #[default]
    Planar,
    /// Coordinates are `[longitude, latitude]` in degrees, distance is great-circle (haversine)
    /// distance converted to the configured units.
    Geographic,
}

impl CoordinateFrame {
    pub fn name(self) -> &'static str {
        match self {
            CoordinateFrame::Planar => "planar",
            CoordinateFrame::Geographic => "geographic",
        }
    }
}

impl fmt::Display for CoordinateFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CoordinateFrame {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [CoordinateFrame::Planar, CoordinateFrame::Geographic]
            .into_iter()
            .find(|f| f.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ConfigError::UnknownFrame(s.to_string()))
    }
}

/// Measures the distance between two points in a [CoordinateFrame], returning [Units].
///
/// # Examples
///
/// ```
/// # use polygon_merge::{CoordinateFrame, Metric, Units};
/// # use polygon_merge::core::{math::Vector2, traits::*};
/// let planar = Metric::new(CoordinateFrame::Planar, Units::Kilometers);
/// let d = planar.distance(Vector2::new(0.0, 0.0), Vector2::new(3.0, 4.0));
/// assert!(d.fuzzy_eq(5.0));
///
/// // one degree of latitude along a meridian
/// let geographic = Metric::new(CoordinateFrame::Geographic, Units::Degrees);
/// let d = geographic.distance(Vector2::new(10.0, 0.0), Vector2::new(10.0, 1.0));
/// assert!(d.fuzzy_eq_eps(1.0, 1e-9));
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Metric {
    pub frame: CoordinateFrame,
    pub units: Units,
}

impl Metric {
    pub fn new(frame: CoordinateFrame, units: Units) -> Self {
        Self { frame, units }
    }

    pub fn planar(units: Units) -> Self {
        Self::new(CoordinateFrame::Planar, units)
    }

    /// Distance between `p0` and `p1`.
    #[inline]
    pub fn distance<T>(&self, p0: Vector2<T>, p1: Vector2<T>) -> T
    where
        T: Real,
    {
        match self.frame {
            CoordinateFrame::Planar => (p1 - p0).length(),
            CoordinateFrame::Geographic => self.units.from_radians(haversine_radians(p0, p1)),
        }
    }
}

/// Central angle in radians between two `[longitude, latitude]` degree positions.
#[inline]
pub fn haversine_radians<T>(p0: Vector2<T>, p1: Vector2<T>) -> T
where
    T: Real,
{
    let d_lat = (p1.y - p0.y).to_radians();
    let d_lon = (p1.x - p0.x).to_radians();
    let lat0 = p0.y.to_radians();
    let lat1 = p1.y.to_radians();

    let half_lat = (d_lat / T::two()).sin();
    let half_lon = (d_lon / T::two()).sin();
    let a = half_lat * half_lat + half_lon * half_lon * lat0.cos() * lat1.cos();

    T::two() * T::atan2(a.sqrt(), (T::one() - a).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::traits::FuzzyEq;

    #[test]
    fn units_parse() {
        assert_eq!("kilometers".parse::<Units>().unwrap(), Units::Kilometers);
        assert_eq!("Miles".parse::<Units>().unwrap(), Units::Miles);
        assert!(matches!(
            "furlongs".parse::<Units>(),
            Err(ConfigError::UnknownUnits(s)) if s == "furlongs"
        ));
        assert_eq!(Units::default(), Units::Kilometers);
    }

    #[test]
    fn frame_parse() {
        assert_eq!(
            "geographic".parse::<CoordinateFrame>().unwrap(),
            CoordinateFrame::Geographic
        );
        assert!("mercator".parse::<CoordinateFrame>().is_err());
    }

    #[test]
    fn radians_conversion() {
        let half_turn = std::f64::consts::PI;
        assert!(Units::Degrees.from_radians(half_turn).fuzzy_eq(180.0));
        assert!(Units::Radians.from_radians(half_turn).fuzzy_eq(half_turn));
        assert!(Units::Kilometers.from_radians(1.0).fuzzy_eq(EARTH_RADIUS_KM));
        assert!(Units::Miles.from_radians(1.0).fuzzy_eq_eps(3958.7613, 1e-3));
        let half_turn = std::f32::consts::PI;
        assert!(Units::Degrees.from_radians(half_turn).fuzzy_eq_eps(180.0, 1e-3));
    }

    #[test]
    fn geographic_equator_degree() {
        let metric = Metric::new(CoordinateFrame::Geographic, Units::Kilometers);
        let d = metric.distance(Vector2::new(0.0, 0.0), Vector2::new(1.0, 0.0));
        // 1 degree of arc at the mean radius
        assert!(d.fuzzy_eq_eps(EARTH_RADIUS_KM.to_radians(), 1e-6));
    }
}
