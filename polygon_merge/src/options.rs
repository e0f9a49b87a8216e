//! Merge options and their document form.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    core::traits::Real,
    error::ConfigError,
    hull::effective_max_edge,
    measure::{CoordinateFrame, Metric, Units},
};

/// Struct to hold options parameters when merging polygons by distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MergeOptions<T = f64>
where
    T: Real,
{
    /// Polygons within this distance of each other are merged (inclusive). Must be finite and
    /// greater than zero.
    pub max_distance: T,
    /// Max edge length of the concave hull built for each cluster. Raised to `max_distance + 1`
    /// when not greater than `max_distance`, `None` uses `max_distance + 1`.
    pub max_edge: Option<T>,
    /// Unit of `max_distance`, `max_edge` and all measured distances.
    pub units: Units,
    /// How input coordinates are measured.
    pub frame: CoordinateFrame,
}

impl<T> MergeOptions<T>
where
    T: Real,
{
    #[inline]
    pub fn new(max_distance: T) -> Self {
        Self {
            max_distance,
            max_edge: None,
            units: Units::default(),
            frame: CoordinateFrame::default(),
        }
    }

    #[inline]
    pub fn with_units(mut self, units: Units) -> Self {
        self.units = units;
        self
    }

    #[inline]
    pub fn with_max_edge(mut self, max_edge: T) -> Self {
        self.max_edge = Some(max_edge);
        self
    }

    #[inline]
    pub fn with_frame(mut self, frame: CoordinateFrame) -> Self {
        self.frame = frame;
        self
    }

    /// Checks `max_distance` is a positive finite number. `max_edge` is never rejected.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.max_distance.is_finite() || self.max_distance <= T::zero() {
            return Err(ConfigError::InvalidMaxDistance {
                value: self.max_distance.as_f64(),
            });
        }

        Ok(())
    }

    /// See [effective_max_edge].
    #[inline]
    pub fn effective_max_edge(&self) -> T {
        effective_max_edge(self.max_edge, self.max_distance)
    }

    #[inline]
    pub fn metric(&self) -> Metric {
        Metric::new(self.frame, self.units)
    }
}

/// Document form of [MergeOptions], every field is optional so configs can be layered.
///
/// # Examples
///
/// ```
/// # use polygon_merge::{MergeConfig, Units};
/// let file = MergeConfig {
///     max_distance: Some(2.0),
///     units: Some(Units::Miles),
///     ..Default::default()
/// };
/// let flags = MergeConfig {
///     max_distance: Some(3.0),
///     ..Default::default()
/// };
/// let options = file.overlay(flags).into_options().unwrap();
/// assert_eq!(options.max_distance, 3.0);
/// assert_eq!(options.units, Units::Miles);
/// assert_eq!(options.max_edge, None);
/// ```
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase", deny_unknown_fields)
)]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MergeConfig {
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub max_distance: Option<f64>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub units: Option<Units>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub max_edge: Option<f64>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub frame: Option<CoordinateFrame>,
}

impl MergeConfig {
    /// Values set in `other` replace the values of `self`.
    pub fn overlay(self, other: MergeConfig) -> MergeConfig {
        MergeConfig {
            max_distance: other.max_distance.or(self.max_distance),
            units: other.units.or(self.units),
            max_edge: other.max_edge.or(self.max_edge),
            frame: other.frame.or(self.frame),
        }
    }

    /// Validated options, unset units and frame take their defaults.
    pub fn into_options(self) -> Result<MergeOptions<f64>, ConfigError> {
        let max_distance = self.max_distance.ok_or(ConfigError::MissingMaxDistance)?;
        let options = MergeOptions {
            max_distance,
            max_edge: self.max_edge,
            units: self.units.unwrap_or_default(),
            frame: self.frame.unwrap_or_default(),
        };
        options.validate()?;
        Ok(options)
    }
}

impl<T> From<MergeOptions<T>> for MergeConfig
where
    T: Real,
{
    fn from(options: MergeOptions<T>) -> Self {
        MergeConfig {
            max_distance: Some(options.max_distance.as_f64()),
            units: Some(options.units),
            max_edge: options.max_edge.map(Real::as_f64),
            frame: Some(options.frame),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults() {
        let options = MergeOptions::new(4.0);
        assert_eq!(options.units, Units::Kilometers);
        assert_eq!(options.frame, CoordinateFrame::Planar);
        assert_eq!(options.max_edge, None);
        assert_eq!(options.effective_max_edge(), 5.0);

        let options = options
            .with_units(Units::Miles)
            .with_max_edge(10.0)
            .with_frame(CoordinateFrame::Geographic);
        assert_eq!(options.effective_max_edge(), 10.0);
        assert_eq!(
            options.metric(),
            Metric::new(CoordinateFrame::Geographic, Units::Miles)
        );
    }

    #[test]
    fn max_distance_must_be_positive_finite() {
        assert!(MergeOptions::new(0.5).validate().is_ok());
        for bad in [0.0, -1.0, f64::INFINITY] {
            assert_eq!(
                MergeOptions::new(bad).validate(),
                Err(ConfigError::InvalidMaxDistance { value: bad })
            );
        }
        assert!(matches!(
            MergeOptions::new(f64::NAN).validate(),
            Err(ConfigError::InvalidMaxDistance { value }) if value.is_nan()
        ));
    }

    #[test]
    fn max_edge_below_distance_is_not_an_error() {
        let options = MergeOptions::new(4.0).with_max_edge(1.0);
        assert!(options.validate().is_ok());
        assert_eq!(options.effective_max_edge(), 5.0);
    }

    #[test]
    fn config_requires_max_distance() {
        assert_eq!(
            MergeConfig::default().into_options(),
            Err(ConfigError::MissingMaxDistance)
        );
        assert_eq!(
            MergeConfig {
                max_distance: Some(-2.0),
                ..Default::default()
            }
            .into_options(),
            Err(ConfigError::InvalidMaxDistance { value: -2.0 })
        );
    }

    #[test]
    fn options_round_trip_through_config() {
        let options = MergeOptions::new(2.5)
            .with_max_edge(3.0)
            .with_units(Units::Degrees);
        assert_eq!(MergeConfig::from(options).into_options(), Ok(options));
    }
}
