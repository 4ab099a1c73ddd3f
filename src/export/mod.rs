//! Geometry export and parameter persistence.

pub mod buffers;
pub mod persistence;

pub use buffers::{matrices_as_bytes, points_as_bytes, GeometryBuffers, MatrixInstance, PointInstance};
pub use persistence::{load_parameters, save_parameters};
