//! Rod enumeration on the hexagonal filament lattice.
//!
//! Myosin rods are generated first as concentric hexagonal rings around a
//! center rod; they define the lattice skeleton. Actin rods are then packed
//! relative to the myosin lattice with the ratio selected by the lattice
//! type. Every actin variant emits two structurally identical sets, one per
//! half-sarcomere direction; downstream instancing relies on that layout.

use glam::{Quat, Vec3, Vec4};

use super::DerivedConstants;
use crate::config::LatticeType;

/// Myosin rod centerlines plus per-rod azimuths and the achieved ring
/// radius of the lattice.
#[derive(Debug, Clone)]
pub struct MyosinLattice {
    /// Homogeneous rod centerline points, center rod first.
    pub rods: Vec<Vec4>,
    /// Azimuth of each non-center rod around the midpoint, degrees in
    /// [0, 360) measured from +x toward -z.
    pub azimuths_deg: Vec<f32>,
    /// Number of the first ring that was *not* generated; grows until the
    /// accumulated rod count reaches the requested count.
    pub cycle_count: usize,
}

fn rotate_y(v: Vec3, angle: f32) -> Vec3 {
    Quat::from_rotation_y(angle) * v
}

/// Planar azimuth of an offset from the lattice midpoint, degrees in
/// [0, 360), measured via atan2 against the +x reference axis.
fn azimuth_deg(offset: Vec3) -> f32 {
    let up = Vec3::new(1.0, 0.0, 0.0);
    let dot = offset.x * up.x + offset.z * up.z;
    let det = offset.x * up.z - offset.z * up.x;
    let mut alpha = det.atan2(dot);
    if alpha < 0.0 {
        alpha += 2.0 * std::f32::consts::PI;
    }
    alpha.to_degrees()
}

/// Enumerate myosin rods in concentric hexagonal rings around `midpoint`.
///
/// Ring k holds 6 corner rods at radius `d_myosin·k` plus k-1 interpolated
/// rods per edge so the spacing along the ring stays uniform as the radius
/// grows. Generation stops once the accumulated count reaches `requested`;
/// the terminal ring is always emitted whole, so the achieved count rounds
/// up to a complete ring.
pub fn generate_myosin_rods(midpoint: Vec4, d_myosin: f32, requested: usize) -> MyosinLattice {
    let mut rods = vec![midpoint];
    let mut azimuths_deg = Vec::new();
    let rod_per_cycle = 6usize;
    let mut cycle_count = 1usize;
    let mut middle_count = 0usize;

    while rods.len() < requested {
        // Ring corners.
        for i in 0..rod_per_cycle {
            let angle = (360.0 / rod_per_cycle as f32).to_radians();
            let offset = rotate_y(
                Vec3::new(d_myosin * cycle_count as f32, 0.0, 0.0),
                angle * i as f32,
            );
            rods.push(midpoint + Vec4::new(offset.x, offset.y, offset.z, 0.0));
            azimuths_deg.push(azimuth_deg(offset));
        }
        // Interpolated mid-ring rods between successive corners.
        if cycle_count >= 2 {
            let size = rods.len() as isize - 1;
            let k = (rods.len() - rod_per_cycle) as isize;
            let n = rod_per_cycle as isize;
            for i in 0..n {
                let a = rods[((size - i - k + n).rem_euclid(n) + k) as usize];
                let b = rods[((size - i - 1 - k + n).rem_euclid(n) + k) as usize];
                for j in 1..=middle_count {
                    let t = (1.0 / (middle_count + 1) as f32) * j as f32;
                    let new_point = a.lerp(b, t);
                    rods.push(new_point);
                    azimuths_deg.push(azimuth_deg((new_point - midpoint).truncate()));
                }
            }
        }
        cycle_count += 1;
        middle_count += 1;
    }

    MyosinLattice {
        rods,
        azimuths_deg,
        cycle_count,
    }
}

/// Enumerate actin rods for the configured packing ratio.
///
/// The output is the single-set sequence emitted twice back to back, one
/// copy per half-sarcomere direction (both interpenetrating actin arrays).
pub fn generate_actin_rods(
    lattice_type: LatticeType,
    midpoint: Vec4,
    constants: &DerivedConstants,
    cycle_count: usize,
) -> Vec<Vec4> {
    let single = generate_actin_rods_single_set(lattice_type, midpoint, constants, cycle_count);
    let mut rods = single.clone();
    rods.extend(single);
    rods
}

/// One actin set for the configured packing ratio.
///
/// Each variant walks outward from the lattice middle, mirroring every
/// emitted position across the x and z axes; the count is therefore always
/// even. The full lattice is this sequence duplicated.
pub fn generate_actin_rods_single_set(
    lattice_type: LatticeType,
    midpoint: Vec4,
    constants: &DerivedConstants,
    cycle_count: usize,
) -> Vec<Vec4> {
    match lattice_type {
        LatticeType::TwoToOne => actin_two_to_one(midpoint, constants, cycle_count),
        LatticeType::ThreeToOne => actin_three_to_one(midpoint, constants, cycle_count),
        LatticeType::FiveToOne => actin_five_to_one(midpoint, constants, cycle_count),
        LatticeType::SixToOne => actin_six_to_one(midpoint, constants, cycle_count),
    }
}

/// 2:1 packing: actin interpolated at `d_actin` spacing along the three
/// principal edge directions between myosin ring corners, skipping every
/// third position (those coincide with myosin lattice points).
fn actin_two_to_one(midpoint: Vec4, constants: &DerivedConstants, cycle_count: usize) -> Vec<Vec4> {
    let mut rods = Vec::new();
    let angle = (360.0 / 3.0_f32).to_radians();
    let mut offset = 0i32;

    for j in 0..(2 * cycle_count as i32 - 1) {
        if j >= cycle_count as i32 {
            offset += 3;
        }
        for i in 0..3 {
            let p1 = Vec3::new(constants.d_myosin * (j + 1) as f32, 0.0, 0.0);
            let p2 = rotate_y(p1, angle * i as f32);
            let p3 = rotate_y(p1, angle * (i + 1) as f32);
            let dir = (p3 - p2).normalize();
            for k in (1 + offset)..(4 + 3 * j - 1 - offset) {
                if k % 3 == 0 {
                    continue;
                }
                let p = p2 + dir * k as f32 * constants.d_actin;
                rods.push(midpoint + Vec4::new(p.x, p.y, p.z, 0.0));
            }
        }
    }
    rods
}

/// 3:1 packing: staggered rows walked outward from the middle, alternating
/// an offset row cadence every fourth row. Rows are mirrored in ±x and ±z.
fn actin_three_to_one(
    midpoint: Vec4,
    constants: &DerivedConstants,
    cycle_count: usize,
) -> Vec<Vec4> {
    let d11 = constants.d11;
    let row_spacing = (d11 / 2.0) * 3.0_f32.sqrt();
    let mut rods = Vec::new();
    let quad = |rods: &mut Vec<Vec4>, x: f32, z: f32| {
        rods.push(Vec4::new(midpoint.x + x, midpoint.y, midpoint.z + z, 1.0));
        rods.push(Vec4::new(midpoint.x - x, midpoint.y, midpoint.z + z, 1.0));
        rods.push(Vec4::new(midpoint.x + x, midpoint.y, midpoint.z - z, 1.0));
        rods.push(Vec4::new(midpoint.x - x, midpoint.y, midpoint.z - z, 1.0));
    };

    for j in 0..(2 * cycle_count) {
        let z = j as f32 * row_spacing;
        if j % 2 == 0 {
            if (j + 2) % 4 == 0 {
                // Unshifted even rows, columns at 2·d11.
                for i in 0..(cycle_count - j / 4) {
                    quad(&mut rods, i as f32 * 2.0 * d11, z);
                }
            } else {
                // Even rows shifted by d11.
                for i in 0..(cycle_count - j / 4) {
                    quad(&mut rods, i as f32 * 2.0 * d11 + d11, z);
                }
            }
        } else {
            // Odd rows: dense columns at d11, half-column shift.
            for i in 0..(2 * cycle_count - j / 2 - 1) {
                quad(&mut rods, i as f32 * d11 + 0.5 * d11, z);
            }
        }
    }
    rods
}

/// 5:1 packing: denser alternating rows with an offset cycle of period 4
/// and row spacing alternating between two analytic constants.
fn actin_five_to_one(
    midpoint: Vec4,
    constants: &DerivedConstants,
    cycle_count: usize,
) -> Vec<Vec4> {
    let d11 = constants.d11;
    let row_step = (3.0_f32.sqrt() / 3.0) * d11;
    let mut rods = Vec::new();
    // Mirror order is -z first for this variant.
    let quad = |rods: &mut Vec<Vec4>, x: f32, z: f32| {
        rods.push(Vec4::new(midpoint.x + x, midpoint.y, midpoint.z - z, 1.0));
        rods.push(Vec4::new(midpoint.x - x, midpoint.y, midpoint.z - z, 1.0));
        rods.push(Vec4::new(midpoint.x + x, midpoint.y, midpoint.z + z, 1.0));
        rods.push(Vec4::new(midpoint.x - x, midpoint.y, midpoint.z + z, 1.0));
    };

    // Middle row.
    for i in 0..cycle_count {
        rods.push(Vec4::new(
            midpoint.x + 2.0 * i as f32 * d11 + d11,
            midpoint.y,
            midpoint.z,
            1.0,
        ));
        rods.push(Vec4::new(
            midpoint.x - 2.0 * i as f32 * d11 - d11,
            midpoint.y,
            midpoint.z,
            1.0,
        ));
    }

    let mut offset = row_step;
    // Row-offset toggle, flips every 4 rows.
    let mut a = true;
    // Row-spacing toggle, flips every 2 rows.
    let mut b = true;

    for j in 1..(4 * cycle_count) {
        if (j + 1) % 4 == 0 {
            a = !a;
        }
        if (j + 1) % 2 == 0 {
            b = !b;
        }

        if (j + 2) % 4 == 0 {
            // Every fourth row: dense columns at d11 with a half shift.
            for i in 0..(2 * cycle_count - j / 4 - 1) {
                quad(&mut rods, i as f32 * d11 + 0.5 * d11, offset);
            }
        } else if a {
            // Columns at 2·d11, shifted by d11; the fractional bound
            // trims the outermost column as the rows climb.
            let limit = cycle_count as f32 - j as f32 / 8.0 - 0.5;
            let mut i = 0usize;
            while (i as f32) < limit {
                quad(&mut rods, 2.0 * i as f32 * d11 + d11, offset);
                i += 1;
            }
        } else {
            // Columns at 2·d11, unshifted; the -x mirror of the center
            // column would duplicate the +x one, so it only appears once
            // the walk has left the innermost rows.
            for i in 0..(cycle_count - j / 8) {
                let x = 2.0 * i as f32 * d11;
                rods.push(Vec4::new(midpoint.x + x, midpoint.y, midpoint.z - offset, 1.0));
                rods.push(Vec4::new(midpoint.x + x, midpoint.y, midpoint.z + offset, 1.0));
                if j > 2 {
                    rods.push(Vec4::new(midpoint.x - x, midpoint.y, midpoint.z - offset, 1.0));
                    rods.push(Vec4::new(midpoint.x - x, midpoint.y, midpoint.z + offset, 1.0));
                }
            }
        }

        offset += if b { row_step } else { row_step / 2.0 };
    }
    rods
}

/// 6:1 packing: three interleaved row cadences with analytically derived
/// spacings and a long/short column-offset state machine every fourth row.
fn actin_six_to_one(midpoint: Vec4, constants: &DerivedConstants, cycle_count: usize) -> Vec<Vec4> {
    let d11 = constants.d11;
    let offset_case1 = (3.0_f32.sqrt() / 3.0) * d11;
    let offset_case2 = ((-6.0 + 5.0 * 3.0_f32.sqrt()) / 6.0) * d11;
    let offset_case3 = (2.0 - 3.0_f32.sqrt()) * d11;
    let long_step = (2.0 - 3.0_f32.sqrt() / 3.0) * d11;
    let short_step = (3.0_f32.sqrt() / 3.0) * d11;

    let mut rods = Vec::new();
    let quad = |rods: &mut Vec<Vec4>, x: f32, z: f32| {
        rods.push(Vec4::new(midpoint.x + x, midpoint.y, midpoint.z + z, 1.0));
        rods.push(Vec4::new(midpoint.x - x, midpoint.y, midpoint.z + z, 1.0));
        rods.push(Vec4::new(midpoint.x + x, midpoint.y, midpoint.z - z, 1.0));
        rods.push(Vec4::new(midpoint.x - x, midpoint.y, midpoint.z - z, 1.0));
    };

    // First row pair sits half a case-1 step off the middle.
    let mut offset = offset_case1 / 2.0;
    for i in 0..cycle_count {
        quad(&mut rods, 2.0 * i as f32 * d11 + d11, offset);
    }

    // Long/short start alternator for the case-3 rows; `b` counts case-3
    // rows so the start flips after every two of them.
    let mut a = true;
    let mut b = 0usize;

    for j in 2..(4 * cycle_count) {
        // Row spacing cadence.
        if (j + 3) % 4 == 0 {
            offset += offset_case1;
        } else if j % 2 == 0 {
            offset += offset_case2;
        } else if (j + 1) % 4 == 0 {
            offset += offset_case3;
        }

        if j % 8 == 0 || j % 8 == 1 {
            // Columns at 2·d11 shifted by d11.
            for i in 0..(cycle_count - j / 8) {
                quad(&mut rods, 2.0 * i as f32 * d11 + d11, offset);
            }
        } else if (j + 4) % 8 == 0 || (j + 4) % 8 == 1 {
            // Columns at 2·d11, unshifted.
            for i in 0..(cycle_count - j / 8) {
                quad(&mut rods, 2.0 * i as f32 * d11, offset);
            }
        } else {
            // Alternating long/short column offsets; the first column off
            // the middle takes half its step.
            let (first, second) = if a {
                (long_step, short_step)
            } else {
                (short_step, long_step)
            };
            let mut x_offset = first / 2.0;
            for i in 1..(2 * cycle_count - j / 4) {
                quad(&mut rods, x_offset, offset);
                x_offset += if i % 2 == 0 { first } else { second };
            }
            if b % 2 == 0 {
                a = !a;
            }
            b += 1;
        }
    }
    rods
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LatticeType, SarcomereParameters};

    fn constants(lattice_type: LatticeType) -> DerivedConstants {
        let params = SarcomereParameters::new(
            lattice_type,
            0.037,
            1.0,
            500,
            Vec4::new(0.0, 0.0, 0.0, 1.0),
        );
        DerivedConstants::derive(&params)
    }

    /// Smallest complete-ring count that is >= requested: center rod plus
    /// rings of 6 corners and 6·(k-1) interpolated rods each.
    fn achieved_count(requested: usize) -> usize {
        let mut count = 1;
        let mut ring = 1;
        while count < requested {
            count += 6 + 6 * (ring - 1);
            ring += 1;
        }
        count
    }

    #[test]
    fn test_seven_rod_scenario() {
        let c = constants(LatticeType::TwoToOne);
        let midpoint = Vec4::new(0.0, 0.0, 0.0, 1.0);
        let lattice = generate_myosin_rods(midpoint, c.d_myosin, 7);

        assert_eq!(lattice.rods.len(), 7, "center + one full ring of 6");
        assert_eq!(lattice.cycle_count, 2);
        assert_eq!(lattice.rods[0], midpoint);

        for (idx, rod) in lattice.rods.iter().skip(1).enumerate() {
            let r = (*rod - midpoint).truncate().length();
            assert!(
                (r - c.d_myosin).abs() < 1e-6,
                "ring rod {idx} at radius {r}, expected {}",
                c.d_myosin
            );
            let azimuth = lattice.azimuths_deg[idx];
            let remainder = (azimuth / 60.0).round() * 60.0 - azimuth;
            assert!(
                remainder.abs() < 1e-3,
                "azimuth {azimuth} not a multiple of 60 degrees"
            );
        }
    }

    #[test]
    fn test_rod_count_rounds_up_to_complete_ring() {
        let c = constants(LatticeType::TwoToOne);
        let midpoint = Vec4::new(0.0, 0.0, 0.0, 1.0);
        for requested in [1, 2, 7, 8, 19, 20, 37, 50, 100, 500] {
            let lattice = generate_myosin_rods(midpoint, c.d_myosin, requested);
            assert_eq!(
                lattice.rods.len(),
                achieved_count(requested),
                "requested {requested}"
            );
            assert!(lattice.rods.len() >= requested);
        }
    }

    #[test]
    fn test_azimuths_normalized() {
        let c = constants(LatticeType::TwoToOne);
        let lattice = generate_myosin_rods(Vec4::new(0.0, 0.0, 0.0, 1.0), c.d_myosin, 61);
        assert_eq!(lattice.azimuths_deg.len(), lattice.rods.len() - 1);
        for azimuth in &lattice.azimuths_deg {
            assert!((0.0..360.0).contains(azimuth), "azimuth {azimuth}");
        }
    }

    #[test]
    fn test_ring_rotation_centers_on_midpoint() {
        let c = constants(LatticeType::TwoToOne);
        let midpoint = Vec4::new(1.0, 2.0, -3.0, 1.0);
        let lattice = generate_myosin_rods(midpoint, c.d_myosin, 7);
        for rod in lattice.rods.iter().skip(1) {
            let r = (*rod - midpoint).truncate().length();
            assert!((r - c.d_myosin).abs() < 1e-5);
        }
    }

    #[test]
    fn test_single_set_is_even_and_full_set_doubles_it() {
        let midpoint = Vec4::new(0.0, 0.0, 0.0, 1.0);
        for lattice_type in [
            LatticeType::TwoToOne,
            LatticeType::ThreeToOne,
            LatticeType::FiveToOne,
            LatticeType::SixToOne,
        ] {
            let c = constants(lattice_type);
            for cycle_count in [2usize, 3, 5] {
                let single =
                    generate_actin_rods_single_set(lattice_type, midpoint, &c, cycle_count);
                let full = generate_actin_rods(lattice_type, midpoint, &c, cycle_count);
                assert_eq!(
                    single.len() % 2,
                    0,
                    "{lattice_type:?} cycle {cycle_count}: single set not even"
                );
                assert_eq!(full.len(), 2 * single.len());
                assert_eq!(&full[..single.len()], &single[..]);
                assert_eq!(&full[single.len()..], &single[..]);
            }
        }
    }

    #[test]
    fn test_two_to_one_skips_myosin_positions() {
        let c = constants(LatticeType::TwoToOne);
        let midpoint = Vec4::new(0.0, 0.0, 0.0, 1.0);
        let myosin = generate_myosin_rods(midpoint, c.d_myosin, 7);
        let actin = generate_actin_rods_single_set(LatticeType::TwoToOne, midpoint, &c, 2);
        // No actin rod may coincide with a myosin rod.
        for a in &actin {
            for m in &myosin.rods {
                let dist = (*a - *m).truncate().length();
                assert!(dist > 1e-4, "actin rod {a:?} coincides with myosin rod {m:?}");
            }
        }
    }

    #[test]
    fn test_degenerate_config_yields_empty_or_degenerate_sets() {
        // Zero-size lattice collapses to points at the midpoint rather
        // than erroring; validation is the caller's job.
        let params = SarcomereParameters::new(
            LatticeType::ThreeToOne,
            0.0,
            0.0,
            1,
            Vec4::new(0.0, 0.0, 0.0, 1.0),
        );
        let c = DerivedConstants::derive(&params);
        let lattice = generate_myosin_rods(params.midpoint, c.d_myosin, 1);
        assert_eq!(lattice.rods.len(), 1);
        let actin =
            generate_actin_rods(LatticeType::ThreeToOne, params.midpoint, &c, lattice.cycle_count);
        for rod in actin {
            assert!(rod.truncate().length() < 1e-6 || rod.truncate().length().is_nan());
        }
    }
}
