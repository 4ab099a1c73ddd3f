//! Primary scalar parameters of the sarcomere model.
//!
//! All lengths are in μm. Default filament dimensions follow the X-ray
//! diffraction literature for vertebrate striated muscle.

use glam::Vec4;
use serde::{Deserialize, Serialize};

/// Actin radius as a fraction of d10.
/// Reference: ~3.5 nm, Matsubara & Elliott 1972; Millman 1998
pub const ACTIN_RADIUS_SCALE: f32 = 0.095;

/// Myosin radius as a fraction of d10.
/// Reference: ~7.8 nm, Matsubara & Elliott 1972; Millman 1998
pub const MYOSIN_RADIUS_SCALE: f32 = 0.212;

/// Myosin filament length as a fraction of sarcomere length.
pub const MYOSIN_LENGTH_SCALE: f32 = 0.8;

/// Actin : myosin filament packing ratio of the lattice.
///
/// Vertebrate skeletal muscle is 2:1; insect flight muscle is 3:1;
/// the denser 5:1 and 6:1 packings occur in invertebrate muscle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum LatticeType {
    TwoToOne,
    ThreeToOne,
    FiveToOne,
    SixToOne,
}

impl From<LatticeType> for u8 {
    fn from(t: LatticeType) -> u8 {
        match t {
            LatticeType::TwoToOne => 0,
            LatticeType::ThreeToOne => 1,
            LatticeType::FiveToOne => 2,
            LatticeType::SixToOne => 3,
        }
    }
}

impl TryFrom<u8> for LatticeType {
    type Error = String;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(LatticeType::TwoToOne),
            1 => Ok(LatticeType::ThreeToOne),
            2 => Ok(LatticeType::FiveToOne),
            3 => Ok(LatticeType::SixToOne),
            other => Err(format!("unknown lattice type ordinal {other}")),
        }
    }
}

/// Which scalar is solved from the fixed volume when the
/// conserve-volume policy is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FreeVariable {
    /// Edits to sarcomere length re-solve d10 from the volume.
    D10,
    /// Edits to d10 re-solve sarcomere length from the volume.
    Length,
}

/// Per-substructure display toggles, driven by the UI collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayFlags {
    pub conserve_volume: bool,
    pub high_res_actin: bool,
    pub high_res_myosin: bool,
    pub actin: bool,
    pub actin_monomers: bool,
    pub tropomyosin: bool,
    pub troponin: bool,
    pub myosin: bool,
    pub myosin_trunk: bool,
    pub lmm: bool,
    pub hmm: bool,
    pub myosin_heads: bool,
    pub half_helix: bool,
}

impl Default for DisplayFlags {
    fn default() -> Self {
        Self {
            conserve_volume: true,
            high_res_actin: false,
            high_res_myosin: false,
            actin: true,
            actin_monomers: false,
            tropomyosin: false,
            troponin: false,
            myosin: true,
            myosin_trunk: true,
            lmm: false,
            hmm: false,
            myosin_heads: false,
            half_helix: false,
        }
    }
}

/// RGB colors for each rendered substructure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Colors {
    pub actin: [f32; 3],
    pub tropomyosin: [f32; 3],
    pub troponin: [f32; 3],
    pub myosin: [f32; 3],
    pub lmm: [f32; 3],
    pub hmm: [f32; 3],
    pub myosin_head: [f32; 3],
}

impl Default for Colors {
    fn default() -> Self {
        Self {
            actin: [0.0, 0.4, 0.0],
            tropomyosin: [1.0, 0.4, 0.0],
            troponin: [0.0, 0.0, 0.5],
            myosin: [1.0, 0.0, 0.0],
            lmm: [0.2, 0.5, 0.5],
            hmm: [0.5, 0.0, 0.5],
            myosin_head: [0.6, 0.2, 0.2],
        }
    }
}

/// Primary scalar inputs of the sarcomere model.
///
/// Every derived quantity (d11, inter-filament spacings, helix pitches,
/// splay angles) is a pure function of these fields; see
/// [`crate::geometry::DerivedConstants`].
#[derive(Debug, Clone, PartialEq)]
pub struct SarcomereParameters {
    pub lattice_type: LatticeType,
    /// Myosin-myosin lattice spacing proxy (μm).
    /// Reference: 36-38 nm in frog muscle, Mijailovich et al. 2016
    pub d10: f32,
    /// Thin filament length (μm), half the sarcomere.
    pub actin_length: f32,
    /// Full sarcomere length (μm).
    pub sarcomere_length: f32,
    pub actin_radius: f32,
    pub myosin_length: f32,
    pub myosin_radius: f32,
    /// Requested myosin rod count; the achieved count rounds up to
    /// complete the outer hexagonal ring.
    pub num_myosin_rods: usize,
    /// Sarcomere midpoint as a homogeneous point.
    pub midpoint: Vec4,
    pub flags: DisplayFlags,
    pub colors: Colors,
}

impl SarcomereParameters {
    /// Build a parameter set from the primary inputs, deriving the
    /// secondary scalars from their literature scale factors.
    pub fn new(
        lattice_type: LatticeType,
        d10: f32,
        actin_length: f32,
        num_myosin_rods: usize,
        midpoint: Vec4,
    ) -> Self {
        let sarcomere_length = 2.0 * actin_length;
        Self {
            lattice_type,
            d10,
            actin_length,
            sarcomere_length,
            actin_radius: ACTIN_RADIUS_SCALE * d10,
            myosin_length: MYOSIN_LENGTH_SCALE * sarcomere_length,
            myosin_radius: MYOSIN_RADIUS_SCALE * d10,
            num_myosin_rods,
            midpoint,
            flags: DisplayFlags::default(),
            colors: Colors::default(),
        }
    }

    /// Check the preconditions the generators assume.
    ///
    /// The generators themselves are total and silently produce empty or
    /// degenerate geometry on bad input; callers feeding user input should
    /// validate here first.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.d10 > 0.0) {
            return Err(format!("d10 must be positive, got {}", self.d10));
        }
        if !(self.actin_length > 0.0) {
            return Err(format!(
                "actin length must be positive, got {}",
                self.actin_length
            ));
        }
        if self.num_myosin_rods == 0 {
            return Err("at least one myosin rod is required".into());
        }
        Ok(())
    }

    /// True when an edit to `other` changes any scalar that feeds the
    /// geometry generators (colors and display flags do not).
    pub fn geometry_differs(&self, other: &Self) -> bool {
        self.lattice_type != other.lattice_type
            || self.d10 != other.d10
            || self.actin_length != other.actin_length
            || self.sarcomere_length != other.sarcomere_length
            || self.actin_radius != other.actin_radius
            || self.myosin_length != other.myosin_length
            || self.myosin_radius != other.myosin_radius
            || self.num_myosin_rods != other.num_myosin_rods
            || self.midpoint != other.midpoint
    }
}

impl Default for SarcomereParameters {
    fn default() -> Self {
        Self::new(LatticeType::TwoToOne, 0.037, 1.0, 500, Vec4::new(0.0, 0.0, 0.0, 1.0))
    }
}
