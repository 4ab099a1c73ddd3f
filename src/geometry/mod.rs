//! Procedural sarcomere geometry.
//!
//! The pipeline runs in fixed stages: derived constants, myosin rod
//! lattice, actin rod lattice, actin substructure templates, myosin
//! substructure templates, and the [`Sarcomere`] aggregate that owns
//! them all and regenerates the affected stages on parameter changes.

pub mod constants;
pub mod helix;
pub mod lattice;
pub mod myosin;
pub mod sarcomere;

pub use constants::{DerivedConstants, HMM_LENGTH, LMM_AXIAL_STEP, LMM_LENGTH};
pub use helix::ActinSubstructure;
pub use lattice::{generate_actin_rods, generate_myosin_rods, MyosinLattice};
pub use myosin::MyosinSubstructure;
pub use sarcomere::{RegenerationReport, Sarcomere};
