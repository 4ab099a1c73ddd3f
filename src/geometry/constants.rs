//! Derived lattice constants.
//!
//! Everything here is a closed-form function of the primary scalars in
//! [`SarcomereParameters`]; there is no independent lifecycle. The d10/d11
//! relationship and the filament spacings follow the hexagonal lattice
//! geometry of the A-band (Millman, Physiol Rev 1998).

use crate::config::{LatticeType, SarcomereParameters};

/// Length of one light meromyosin segment (μm).
pub const LMM_LENGTH: f32 = 0.09;

/// Length of one heavy meromyosin segment (μm).
pub const HMM_LENGTH: f32 = 0.06;

/// Axial step between successive LMM/HMM crowns along a myosin rod (μm).
pub const LMM_AXIAL_STEP: f32 = 0.0145;

/// Rest length the HMM shortening correction is measured against (μm).
const REST_SARCOMERE_LENGTH: f32 = 2.0;

/// Secondary constants derived from a parameter set.
///
/// `length_under_hmm` and `hmm_neck_length` come in three flavors because
/// the perpendicular actin-myosin clearance differs between the 2:1
/// geometry (nearest actin across the long diagonal), the 3:1 geometry
/// (nearest actin at d11) and the 6:1 geometry (actin 15° off the d11
/// axis). Which flavor applies to which lattice type is decided in the
/// myosin substructure generator.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedConstants {
    /// d11 = d10 / √3.
    pub d11: f32,
    /// Myosin-myosin center distance, 2·d11.
    pub d_myosin: f32,
    /// Actin-actin spacing along a 2:1 lattice edge; halved for the
    /// denser 5:1 and 6:1 packings.
    pub d_actin: f32,
    /// Myosin backbone radius, one third of the full filament radius.
    pub myosin_trunk_radius: f32,
    /// Myosin head radius, one sixth of the full filament radius.
    pub myosin_head_radius: f32,
    /// LMM/HMM coil radius, one tenth of the trunk radius.
    pub lmm_radius: f32,
    /// Splay angle of a resting (unengaged) myosin head.
    pub hmm_rest_angle: f32,
    /// Perpendicular actin-myosin surface clearance per flavor.
    pub clearance: [f32; 3],
    /// Axial extent covered by a fully stretched HMM neck per flavor.
    pub length_under_hmm: [f32; 3],
    /// Effective HMM neck length per flavor after the shortening
    /// correction; capped at 110% of the nominal HMM length.
    pub hmm_neck_length: [f32; 3],
    /// Set when sarcomere shortening pushes the neck past vertical.
    pub invert_angle: [bool; 3],
}

impl DerivedConstants {
    /// Derive all secondary constants from the primary scalars.
    ///
    /// Pure and total; a non-positive `d10` or `actin_length` yields
    /// degenerate values rather than an error (validation is the input
    /// boundary's job).
    pub fn derive(params: &SarcomereParameters) -> Self {
        let d11 = params.d10 / 3.0_f32.sqrt();
        let d_myosin = 2.0 * d11;
        let mut d_actin = (4.0 * d_myosin * d_myosin - 4.0 * d11 * d11).sqrt() / 3.0;
        if matches!(
            params.lattice_type,
            LatticeType::FiveToOne | LatticeType::SixToOne
        ) {
            d_actin /= 2.0;
        }

        let myosin_trunk_radius = params.myosin_radius / 3.0;
        let myosin_head_radius = params.myosin_radius / 6.0;
        let lmm_radius = myosin_trunk_radius / 10.0;
        let hmm_rest_angle = ((myosin_trunk_radius * 2.0 - myosin_head_radius * 2.0)
            / (HMM_LENGTH + myosin_head_radius))
            .asin();

        let clearance = [
            (2.0 * d11) / 3.0_f32.sqrt() - params.myosin_radius / 3.0 - params.actin_radius,
            d11 - params.myosin_radius / 3.0 - params.actin_radius,
            d11 / 15.0_f32.to_radians().cos() - params.myosin_radius / 3.0 - params.actin_radius,
        ];
        let length_under_hmm = clearance.map(|c| (HMM_LENGTH * HMM_LENGTH - c * c).sqrt());

        let mut constants = Self {
            d11,
            d_myosin,
            d_actin,
            myosin_trunk_radius,
            myosin_head_radius,
            lmm_radius,
            hmm_rest_angle,
            clearance,
            length_under_hmm,
            hmm_neck_length: [HMM_LENGTH; 3],
            invert_angle: [false; 3],
        };
        constants.update_hmm_neck_lengths(params.sarcomere_length);
        constants
    }

    /// Recompute the effective HMM neck lengths for the current sarcomere
    /// length. Shortening below rest length folds the neck sideways; the
    /// effective length is the hypotenuse of the perpendicular clearance
    /// and the remaining axial reach, capped at 110% of nominal.
    pub fn update_hmm_neck_lengths(&mut self, sarcomere_length: f32) {
        let shortening = REST_SARCOMERE_LENGTH - sarcomere_length;
        let cap = HMM_LENGTH + HMM_LENGTH / 10.0;

        for flavor in 0..3 {
            let axial = if flavor == 0 {
                (self.length_under_hmm[0] - shortening / 2.0).abs()
            } else {
                (self.length_under_hmm[flavor] - shortening / 2.0).max(1e-6)
            };
            let c = self.clearance[flavor];
            self.hmm_neck_length[flavor] = (c * c + axial * axial).sqrt().min(cap);
            self.invert_angle[flavor] = self.length_under_hmm[flavor] - shortening < 0.0;
        }
    }

    /// Splay angle of a fully engaged head per clearance flavor.
    ///
    /// The sine argument is clamped to 1 so an over-wide lattice saturates
    /// at 90° instead of producing NaN.
    pub fn full_engagement_angles(&self) -> [f32; 3] {
        let mut angles = [0.0; 3];
        for flavor in 0..3 {
            let ratio = self.clearance[flavor]
                / (self.hmm_neck_length[flavor] + self.myosin_head_radius);
            angles[flavor] = ratio.min(1.0).asin();
        }
        angles
    }
}

/// Sarcomere volume for a hexagonal lattice of the given ring radius:
/// `√3 · 2 · cycle² · d10² · length`.
pub fn lattice_volume(cycle_count: usize, d10: f32, sarcomere_length: f32) -> f32 {
    3.0_f32.sqrt() * 2.0 * (cycle_count as f32).powi(2) * d10.powi(2) * sarcomere_length
}

/// Solve d10 from a fixed volume (conserve-volume policy, length edited).
pub fn d10_from_volume(volume: f32, cycle_count: usize, sarcomere_length: f32) -> f32 {
    ((2.0 * volume) / (3.0_f32.sqrt() * sarcomere_length)).sqrt() / (2.0 * cycle_count as f32)
}

/// Solve sarcomere length from a fixed volume (conserve-volume policy,
/// d10 edited).
pub fn length_from_volume(volume: f32, cycle_count: usize, d10: f32) -> f32 {
    volume / (3.0_f32.sqrt() * 2.0 * (cycle_count as f32).powi(2) * d10.powi(2))
}
