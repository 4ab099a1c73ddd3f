//! End-to-end tests of the generation pipeline
//!
//! Tests verify that:
//! - A small requested rod count produces the expected lattice layout
//! - Every lattice type generates a complete, consistent geometry set
//! - Parameter edits cascade to exactly the affected stages
//! - Save/load reproduces the same geometry bit for bit

use glam::Vec4;
use sarcomere_lattice::{
    config::{FreeVariable, LatticeType, SarcomereParameters},
    export::{self, GeometryBuffers},
    geometry::Sarcomere,
};

const ALL_TYPES: [LatticeType; 4] = [
    LatticeType::TwoToOne,
    LatticeType::ThreeToOne,
    LatticeType::FiveToOne,
    LatticeType::SixToOne,
];

fn build(lattice_type: LatticeType, num_rods: usize) -> Sarcomere {
    Sarcomere::new(SarcomereParameters::new(
        lattice_type,
        0.037,
        1.0,
        num_rods,
        Vec4::new(0.0, 0.0, 0.0, 1.0),
    ))
}

/// Seven requested rods give the center rod plus one complete ring at the
/// myosin spacing, each ring rod 60° from its neighbors.
#[test]
fn test_seven_rod_lattice_layout() {
    let s = build(LatticeType::TwoToOne, 7);
    assert_eq!(s.num_myosin(), 7);
    assert_eq!(s.cycle_count(), 2);

    let midpoint = s.midpoint();
    assert_eq!(s.myosin_rods()[0], midpoint);
    for rod in s.myosin_rods().iter().skip(1) {
        let r = (*rod - midpoint).truncate().length();
        assert!(
            (r - s.constants().d_myosin).abs() < 1e-6,
            "ring rod at radius {r}"
        );
    }
}

/// Every lattice type produces a non-empty, structurally consistent
/// geometry set end to end.
#[test]
fn test_all_lattice_types_generate_complete_geometry() {
    for lattice_type in ALL_TYPES {
        let s = build(lattice_type, 61);
        assert!(s.num_myosin() >= 61, "{lattice_type:?}");
        assert!(s.num_actin() > 0, "{lattice_type:?}");
        assert_eq!(s.num_actin() % 2, 0, "{lattice_type:?} actin set not doubled");
        assert_eq!(s.num_z_discs(), 2);
        assert!(s.num_actin_monomers() > 0);
        assert_eq!(s.num_troponin() % 2, 0);
        assert!(s.num_myosin_heads() > 0);
        assert_eq!(
            s.num_myosin_heads(),
            2 * s.num_hmm_offsets_per_rod(),
            "{lattice_type:?} heads per crown slot"
        );

        let buffers = GeometryBuffers::snapshot(&s);
        assert_eq!(buffers.myosin_rods.len(), s.num_myosin());
        assert_eq!(buffers.actin_rods.len(), s.num_actin());
        assert!(buffers.point_bytes() > 0);
    }
}

/// The dense 5:1 and 6:1 packings halve the actin spacing relative to the
/// 2:1 and 3:1 geometries.
#[test]
fn test_dense_packings_halve_actin_spacing() {
    let sparse = build(LatticeType::ThreeToOne, 61);
    let five = build(LatticeType::FiveToOne, 61);
    let six = build(LatticeType::SixToOne, 61);
    assert!(
        (five.constants().d_actin - sparse.constants().d_actin / 2.0).abs() < 1e-7
    );
    assert!(
        (six.constants().d_actin - sparse.constants().d_actin / 2.0).abs() < 1e-7
    );
}

/// Conserve-volume policy: editing the sarcomere length with d10 free
/// keeps the lattice volume fixed, and restoring the length restores d10.
#[test]
fn test_volume_conservation_round_trip() {
    let mut s = build(LatticeType::TwoToOne, 61);
    s.set_free_variable(FreeVariable::D10);
    let volume = s.volume();
    let d10 = s.params().d10;
    let length = s.params().sarcomere_length;

    s.set_sarcomere_length(1.6);
    assert!((s.volume() - volume).abs() < volume * 1e-5);
    assert!((s.params().d10 - d10).abs() > 1e-5, "d10 should move");

    s.set_sarcomere_length(length);
    assert!((s.volume() - volume).abs() < volume * 1e-4);
    assert!(
        (s.params().d10 - d10).abs() < d10 * 1e-3,
        "d10 did not return: {} vs {}",
        s.params().d10,
        d10
    );
}

/// A failed load leaves the live sarcomere untouched.
#[test]
fn test_corrupt_file_leaves_state_unchanged() {
    let path = std::env::temp_dir().join(format!(
        "sarcomere-lattice-corrupt-{}.json",
        std::process::id()
    ));
    std::fs::write(&path, "{\"sarcomereType\": 1, \"d10\": oops").unwrap();

    let mut s = build(LatticeType::TwoToOne, 19);
    let params_before = s.params().clone();
    let rods_before = s.myosin_rods().to_vec();

    let result = export::load_parameters(&path);
    std::fs::remove_file(&path).ok();
    assert!(result.is_err(), "corrupt file should not parse");

    assert_eq!(s.params(), &params_before);
    assert_eq!(s.myosin_rods(), &rods_before[..]);
}

/// Save, load, rebuild: the rehydrated sarcomere is bit-identical.
#[test]
fn test_save_load_rebuild_is_identical() {
    let path = std::env::temp_dir().join(format!(
        "sarcomere-lattice-rebuild-{}.json",
        std::process::id()
    ));

    let mut original = build(LatticeType::SixToOne, 37);
    original.set_sarcomere_length(1.9);
    export::save_parameters(original.params(), &path).unwrap();

    let restored = Sarcomere::new(export::load_parameters(&path).unwrap());
    std::fs::remove_file(&path).ok();

    assert_eq!(original.params(), restored.params());
    assert_eq!(original.myosin_rods(), restored.myosin_rods());
    assert_eq!(original.actin_rods(), restored.actin_rods());
    assert_eq!(original.actin_templates(), restored.actin_templates());
    assert_eq!(original.myosin_templates(), restored.myosin_templates());
}

/// Engagement sweeps regenerate the head set without disturbing the rod
/// lattices.
#[test]
fn test_engagement_sweep_keeps_lattice_stable() {
    let mut s = build(LatticeType::ThreeToOne, 19);
    let myosin_before = s.myosin_rods().to_vec();
    let actin_before = s.actin_rods().to_vec();
    let heads_resting = s.myosin_templates().head_offsets.clone();

    for engagement in [0.25_f32, 0.5, 0.75, 1.0] {
        let report = s.set_engagement(engagement);
        assert!(report.myosin_templates);
        assert!(!report.myosin_rods && !report.actin_rods && !report.actin_templates);
    }

    assert_eq!(s.myosin_rods(), &myosin_before[..]);
    assert_eq!(s.actin_rods(), &actin_before[..]);
    assert_eq!(
        s.myosin_templates().head_offsets.len(),
        heads_resting.len(),
        "head count is engagement-invariant"
    );
    assert_ne!(
        s.myosin_templates().head_offsets,
        heads_resting,
        "head positions must move with engagement"
    );
}

/// A midpoint translation shifts every rod by the same delta.
#[test]
fn test_midpoint_translation_shifts_lattice() {
    let s_origin = build(LatticeType::TwoToOne, 19);
    let delta = Vec4::new(2.0, -1.0, 0.5, 0.0);
    let s_shifted = Sarcomere::new(SarcomereParameters::new(
        LatticeType::TwoToOne,
        0.037,
        1.0,
        19,
        Vec4::new(0.0, 0.0, 0.0, 1.0) + delta,
    ));

    assert_eq!(s_origin.num_myosin(), s_shifted.num_myosin());
    for (a, b) in s_origin
        .myosin_rods()
        .iter()
        .zip(s_shifted.myosin_rods().iter())
    {
        assert!((*a + delta - *b).truncate().length() < 1e-5);
    }
}
