//! Sarcomere Lattice - procedural muscle sarcomere geometry engine
//!
//! Generates the full instanced geometry of a striated-muscle sarcomere:
//! the hexagonal myosin/actin filament lattice, the actin double helix
//! with tropomyosin and troponin, the myosin LMM/HMM coiled coils and
//! head placements, plus flattened buffers ready for GPU upload.
//!
//! All generation is CPU-side and deterministic; rendering and UI live
//! in downstream crates.

pub mod config;
pub mod export;
pub mod geometry;

pub use config::{
    Colors, DisplayFlags, FreeVariable, LatticeType, SarcomereParameters, SarcomereRecord,
};
pub use export::{GeometryBuffers, MatrixInstance, PointInstance};
pub use geometry::{
    ActinSubstructure, DerivedConstants, MyosinLattice, MyosinSubstructure, RegenerationReport,
    Sarcomere,
};
