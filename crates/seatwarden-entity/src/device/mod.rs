//! Seat directory entities.

pub mod model;

pub use model::Device;
