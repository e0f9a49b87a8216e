#![allow(dead_code)]

pub mod layouts;
pub mod ring_properties;

pub use layouts::*;
pub use ring_properties::*;
