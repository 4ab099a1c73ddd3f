//! Configuration module for sarcomere lattice parameters.
//!
//! Holds the primary scalar inputs, display flags and colors, and the
//! persisted JSON record. Derived geometry is never part of the record;
//! it is always regenerated from these scalars.

mod parameters;
mod record;

pub use parameters::{Colors, DisplayFlags, FreeVariable, LatticeType, SarcomereParameters};
pub use record::SarcomereRecord;
