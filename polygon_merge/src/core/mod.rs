//! Core module has common/shared math and numeric traits used by the geometry, distance,
//! grouping and hull modules.
pub mod math;
pub mod traits;
