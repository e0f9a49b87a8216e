//! Merges the polygons of a multi-polygon that lie within a distance threshold of each other into
//! one concave hull per group.
//!
//! Grouping is single-linkage: two polygons end up in the same group if a chain of polygons
//! connects them where every step is within the threshold. Holes are discarded before grouping
//! and never reappear in the output.
extern crate static_aabb2d_index;

#[macro_use]
mod macros;
pub mod core;

mod compose;
mod distance;
mod error;
mod geometry;
mod grouping;
mod hull;
mod measure;
mod options;

#[cfg(feature = "serde")]
pub mod geojson;

pub use static_aabb2d_index::AABB;

pub use crate::compose::*;
pub use crate::distance::*;
pub use crate::error::*;
pub use crate::geometry::*;
pub use crate::grouping::*;
pub use crate::hull::*;
pub use crate::measure::*;
pub use crate::options::*;
