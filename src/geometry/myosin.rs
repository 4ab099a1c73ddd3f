//! Myosin substructure templates.
//!
//! Generates the coiled-coil light meromyosin (LMM) helix pair, the
//! head-bearing heavy meromyosin (HMM) helix pair with its straight
//! splayed tip, the per-rod crown offsets (three angular slots 120° apart,
//! advancing 40° per axial step), the per-crown rotation matrices, and the
//! final myosin head positions. Like the actin templates these are local
//! to a single rod and reused for every rod instance.

use glam::{Mat4, Quat, Vec3, Vec4};

use super::constants::{DerivedConstants, HMM_LENGTH, LMM_AXIAL_STEP, LMM_LENGTH};
use crate::config::{LatticeType, SarcomereParameters};

/// Points forming the straight, outward-diverging tip of each HMM helix.
const HMM_TIP_POINTS: i32 = 15;

/// Crown rotation step as the offsets walk outward along the rod.
const CROWN_STEP_DEG: f32 = 40.0;

/// The three crown start angles around the rod, 120° apart.
const CROWN_START_DEG: [f32; 3] = [30.0, 150.0, 270.0];

/// Local-frame templates and per-crown transforms for one myosin rod.
#[derive(Debug, Clone, PartialEq)]
pub struct MyosinSubstructure {
    /// LMM coil anchor points, first strand (first point doubled).
    pub lmm_helix_1: Vec<Vec4>,
    /// LMM coil anchor points, second strand, 180° offset.
    pub lmm_helix_2: Vec<Vec4>,
    /// HMM coil anchor points, first strand, with splayed tip.
    pub hmm_helix_1: Vec<Vec4>,
    /// HMM coil anchor points, second strand, tip diverging the other way.
    pub hmm_helix_2: Vec<Vec4>,
    /// LMM crown offsets along the rod, both halves, three per step.
    pub lmm_offsets: Vec<Vec4>,
    /// HMM crown offsets along the rod, both halves, three per step.
    pub hmm_offsets: Vec<Vec4>,
    /// Per-crown rotation around the rod axis (one half's worth; the
    /// second half reuses them modulo the length).
    pub hmm_yaw_matrices: Vec<Mat4>,
    /// Per-slot engagement yaw correction toward the nearest actin.
    pub hmm_yaw_correction_matrices: Vec<Mat4>,
    /// Per-crown splay rotation away from the rod (z-axis).
    pub hmm_splay_matrices: Vec<Mat4>,
    /// Final myosin head offset positions, two heads per crown slot.
    pub head_offsets: Vec<Vec4>,
}

fn rotate_y(v: Vec4, angle: f32) -> Vec4 {
    let r = Quat::from_rotation_y(angle) * v.truncate();
    Vec4::new(r.x, r.y, r.z, v.w)
}

fn rotate_x(v: Vec4, angle: f32) -> Vec4 {
    let r = Quat::from_rotation_x(angle) * v.truncate();
    Vec4::new(r.x, r.y, r.z, v.w)
}

/// Which perpendicular-clearance flavor a lattice type engages against.
///
/// 2:1 heads reach across the long diagonal; 3:1 heads reach the nearest
/// actin at d11; 6:1 heads reach actin 15° off the d11 axis. The 5:1
/// lattice mixes flavors per slot, so it is handled in the slot table.
fn neck_flavor(lattice_type: LatticeType) -> usize {
    match lattice_type {
        LatticeType::TwoToOne => 0,
        LatticeType::ThreeToOne => 1,
        LatticeType::FiveToOne => 0,
        LatticeType::SixToOne => 2,
    }
}

/// Engagement correction for one crown slot: the extra yaw (degrees,
/// before engagement scaling) steering the head toward its nearest actin,
/// and the clearance flavor its full-engagement splay derives from.
///
/// The slot index is the crown angle bucketed into the nine 40° sectors of
/// `(angle + 90°) mod 360°`; computed modulo nine it is total over all
/// inputs, so no slot can fall through to a stale value.
fn slot_correction(lattice_type: LatticeType, slot: usize) -> (f32, usize) {
    debug_assert!(slot < 9);
    match lattice_type {
        LatticeType::TwoToOne => {
            let yaw = [0.0, 20.0, -20.0][slot % 3];
            (yaw, 0)
        }
        LatticeType::ThreeToOne => {
            // The 160° slot carries a -1° correction where the symmetric
            // value would be -10°; the nearest actin sits slightly off the
            // symmetric position there.
            let yaw = [30.0, -10.0, 10.0, 30.0, -1.0, 10.0, 30.0, -10.0, 10.0][slot];
            (yaw, 1)
        }
        LatticeType::FiveToOne => {
            let yaw = [0.0, -10.0, 10.0][slot % 3];
            let flavor = if slot % 3 == 0 { 0 } else { 1 };
            (yaw, flavor)
        }
        LatticeType::SixToOne => {
            let yaw = [15.0, 5.0, -5.0][slot % 3];
            (yaw, 2)
        }
    }
}

fn slot_index(crown_angle_deg: f32) -> usize {
    (((crown_angle_deg as i32 + 90).rem_euclid(360)) / 40) as usize % 9
}

/// Anchor point of a coil helix: radius `r` rotated `i` pitch steps around
/// the rod axis, raised `i` axial steps.
fn coil_point(radius: f32, i: i32, pitch: f32, y_step: f32) -> Vec4 {
    let turned = rotate_y(Vec4::new(radius, 0.0, 0.0, 0.0), i as f32 * pitch);
    Vec4::new(0.0, i as f32 * y_step, 0.0, 1.0) + turned
}

impl MyosinSubstructure {
    /// Generate all myosin-rod templates.
    ///
    /// `engagement` in [0, 1] interpolates every head between its resting
    /// splay and the fully engaged angle for the lattice type. Any change
    /// to it or to the geometry parameters regenerates the whole template
    /// set from scratch; there is no incremental patching.
    pub fn generate(
        params: &SarcomereParameters,
        constants: &DerivedConstants,
        engagement: f32,
    ) -> Self {
        let mut sub = Self {
            lmm_helix_1: Vec::new(),
            lmm_helix_2: Vec::new(),
            hmm_helix_1: Vec::new(),
            hmm_helix_2: Vec::new(),
            lmm_offsets: Vec::new(),
            hmm_offsets: Vec::new(),
            hmm_yaw_matrices: Vec::new(),
            hmm_yaw_correction_matrices: Vec::new(),
            hmm_splay_matrices: Vec::new(),
            head_offsets: Vec::new(),
        };
        sub.generate_lmm_helices(constants);
        sub.generate_hmm_helices(params.lattice_type, constants);
        sub.generate_lmm_offsets(params, constants);
        sub.generate_hmm_offsets(params, constants, engagement);
        sub.generate_heads();
        sub
    }

    /// Two mirrored coiled-coil strands, 60° pitch, axial step of three
    /// coil radii, first point doubled for line-strip rendering.
    fn generate_lmm_helices(&mut self, constants: &DerivedConstants) {
        let pitch = (180.0_f32 / 3.0).to_radians();
        let y_step = constants.lmm_radius * 3.0;
        let num_points = (LMM_LENGTH / y_step) as i32;

        for (radius, strand) in [
            (constants.lmm_radius, &mut self.lmm_helix_1),
            (-constants.lmm_radius, &mut self.lmm_helix_2),
        ] {
            for i in 0..=num_points {
                let point = coil_point(radius, i, pitch, y_step);
                strand.push(point);
                if i == 0 {
                    strand.push(point);
                }
            }
        }
    }

    /// HMM strands: coiled like the LMM over most of their length, then
    /// straightening and diverging in ±z over the final tip points. The
    /// axial step is stretched so the strand spans the effective neck
    /// length for the lattice type.
    fn generate_hmm_helices(&mut self, lattice_type: LatticeType, constants: &DerivedConstants) {
        let pitch = (180.0_f32 / 3.0).to_radians();
        let nominal_step = constants.lmm_radius * 3.0;
        let num_points = ((HMM_LENGTH / nominal_step) as i32).max(1);
        let neck = constants.hmm_neck_length[neck_flavor(lattice_type)];
        let y_step = neck / num_points as f32;

        for (radius, tip_sign, strand) in [
            (constants.lmm_radius, 1.0_f32, &mut self.hmm_helix_1),
            (-constants.lmm_radius, -1.0, &mut self.hmm_helix_2),
        ] {
            for i in 0..=num_points {
                let point = if i <= num_points - HMM_TIP_POINTS {
                    coil_point(radius, i, pitch, y_step)
                } else {
                    let z = tip_sign * (i + HMM_TIP_POINTS - num_points) as f32 * y_step / 4.0;
                    Vec4::new(radius, i as f32 * y_step, z, 1.0)
                };
                strand.push(point);
                if i == 0 {
                    strand.push(point);
                }
            }
        }
    }

    /// Number of crown steps per myosin half: the rod half length divided
    /// by the axial step, minus the steps covered by the segment itself.
    fn crowns_per_half(myosin_length: f32) -> i32 {
        let per_half = ((myosin_length / 2.0) / LMM_AXIAL_STEP) as i32;
        let overlap = (LMM_LENGTH / LMM_AXIAL_STEP) as i32;
        per_half - overlap
    }

    fn generate_lmm_offsets(&mut self, params: &SarcomereParameters, constants: &DerivedConstants) {
        let crowns = Self::crowns_per_half(params.myosin_length);
        let radius = constants.myosin_trunk_radius + constants.lmm_radius;

        for half_sign in [-1.0_f32, 1.0] {
            let mut angles = CROWN_START_DEG;
            for i in 0..=crowns {
                let axial = Vec4::new(0.0, half_sign * i as f32 * LMM_AXIAL_STEP, 0.0, 0.0);
                for angle in angles {
                    let slot = rotate_y(Vec4::new(radius, 0.0, 0.0, 0.0), angle.to_radians());
                    self.lmm_offsets.push(axial + slot);
                }
                for angle in &mut angles {
                    *angle += CROWN_STEP_DEG;
                }
            }
        }
    }

    /// HMM crown offsets plus the per-crown rotation matrix sequences.
    ///
    /// The matrices are emitted for the first half only; the head
    /// generator reuses them modulo their length for the second half,
    /// whose crowns sit at the mirrored angles anyway.
    fn generate_hmm_offsets(
        &mut self,
        params: &SarcomereParameters,
        constants: &DerivedConstants,
        engagement: f32,
    ) {
        let crowns = Self::crowns_per_half(params.myosin_length);
        let radius = constants.myosin_trunk_radius + constants.lmm_radius;
        // Shift so the HMM continues where the LMM segment ends.
        let stem = LMM_LENGTH - 6.0 * constants.lmm_radius;
        let full_angles = constants.full_engagement_angles();

        for half_sign in [-1.0_f32, 1.0] {
            let mut angles = CROWN_START_DEG;
            for i in 0..=crowns {
                let y = half_sign * (stem + i as f32 * LMM_AXIAL_STEP);
                let axial = Vec4::new(0.0, y, 0.0, 0.0);
                for angle in angles {
                    let slot = rotate_y(Vec4::new(radius, 0.0, 0.0, 0.0), angle.to_radians());
                    self.hmm_offsets.push(axial + slot);
                }
                if half_sign < 0.0 {
                    let (yaw_deg, flavor) =
                        slot_correction(params.lattice_type, slot_index(angles[0]));
                    let scaled_splay = constants.hmm_rest_angle
                        + engagement * (full_angles[flavor] - constants.hmm_rest_angle);
                    let splay = Mat4::from_axis_angle(Vec3::NEG_Z, scaled_splay);
                    let correction = Mat4::from_rotation_y((engagement * yaw_deg).to_radians());
                    for angle in angles {
                        self.hmm_yaw_matrices
                            .push(Mat4::from_rotation_y(angle.to_radians()));
                        self.hmm_splay_matrices.push(splay);
                        self.hmm_yaw_correction_matrices.push(correction);
                    }
                }
                for angle in &mut angles {
                    *angle += CROWN_STEP_DEG;
                }
            }
        }
    }

    /// Compose the final head positions: terminal HMM strand point, splay
    /// rotation, a 180° flip about the rod x-axis for the first half set,
    /// the crown yaw and engagement correction, then the crown offset.
    fn generate_heads(&mut self) {
        self.head_offsets.clear();
        let tip_1 = match self.hmm_helix_1.last() {
            Some(p) => *p,
            None => return,
        };
        let tip_2 = match self.hmm_helix_2.last() {
            Some(p) => *p,
            None => return,
        };
        let matrix_count = self.hmm_splay_matrices.len();
        if matrix_count == 0 {
            return;
        }

        for (i, offset) in self.hmm_offsets.iter().enumerate() {
            let splay = self.hmm_splay_matrices[i % matrix_count];
            let mut head_1 = splay * tip_1;
            let mut head_2 = splay * tip_2;

            if i < self.hmm_offsets.len() / 2 {
                head_1 = rotate_x(head_1, 180.0_f32.to_radians());
                head_2 = rotate_x(head_2, 180.0_f32.to_radians());
            }

            let yaw = self.hmm_yaw_matrices[i % matrix_count];
            let correction = self.hmm_yaw_correction_matrices[i % matrix_count];
            head_1 = yaw * correction * head_1;
            head_2 = yaw * correction * head_2;

            self.head_offsets.push(head_1 + *offset);
            self.head_offsets.push(head_2 + *offset);
        }
    }
}
