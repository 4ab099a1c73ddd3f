//! The sarcomere aggregate.
//!
//! Owns the parameter set, the derived constants and every generated
//! buffer, and runs the regeneration cascade when parameters change:
//! d10/d11 → myosin spacing → actin spacing → rod enumeration → helix
//! templates → head placement. All generation is synchronous and pure
//! recomputation; nothing is patched incrementally.

use glam::Vec4;

use super::constants::{self, DerivedConstants};
use super::helix::ActinSubstructure;
use super::lattice::{self, MyosinLattice};
use super::myosin::MyosinSubstructure;
use crate::config::{FreeVariable, LatticeType, SarcomereParameters, SarcomereRecord};

/// Which exported buffers a parameter edit invalidated.
///
/// The caller re-uploads exactly the buffers flagged here; a pure
/// color/flag edit flags nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegenerationReport {
    pub myosin_rods: bool,
    pub actin_rods: bool,
    pub actin_templates: bool,
    pub myosin_templates: bool,
}

impl RegenerationReport {
    pub fn any(&self) -> bool {
        self.myosin_rods || self.actin_rods || self.actin_templates || self.myosin_templates
    }

    fn all() -> Self {
        Self {
            myosin_rods: true,
            actin_rods: true,
            actin_templates: true,
            myosin_templates: true,
        }
    }
}

/// Complete geometric model of one sarcomere.
pub struct Sarcomere {
    params: SarcomereParameters,
    constants: DerivedConstants,
    /// Which of {d10, length} is re-solved from the fixed volume when
    /// the conserve-volume flag is on.
    free_variable: FreeVariable,
    /// Myosin head engagement in [0, 1].
    engagement: f32,
    volume: f32,
    myosin_lattice: MyosinLattice,
    actin_rods: Vec<Vec4>,
    z_disc_offsets: [Vec4; 2],
    actin_templates: ActinSubstructure,
    myosin_templates: MyosinSubstructure,
}

impl Sarcomere {
    /// Build the full model from a fresh parameter set.
    pub fn new(params: SarcomereParameters) -> Self {
        let constants = DerivedConstants::derive(&params);
        let myosin_lattice =
            lattice::generate_myosin_rods(params.midpoint, constants.d_myosin, params.num_myosin_rods);
        let volume = constants::lattice_volume(
            myosin_lattice.cycle_count,
            params.d10,
            params.sarcomere_length,
        );
        let actin_rods = lattice::generate_actin_rods(
            params.lattice_type,
            params.midpoint,
            &constants,
            myosin_lattice.cycle_count,
        );
        let actin_templates = ActinSubstructure::generate(&params);
        let engagement = 0.0;
        let myosin_templates = MyosinSubstructure::generate(&params, &constants, engagement);

        log::info!(
            "sarcomere generated: {} myosin rods ({} rings), {} actin rods, type {:?}",
            myosin_lattice.rods.len(),
            myosin_lattice.cycle_count - 1,
            actin_rods.len(),
            params.lattice_type,
        );

        Self {
            params,
            constants,
            free_variable: FreeVariable::Length,
            engagement,
            volume,
            myosin_lattice,
            actin_rods,
            z_disc_offsets: [
                Vec4::new(0.0, -0.001, 0.0, 0.0),
                Vec4::new(0.0, 0.001, 0.0, 0.0),
            ],
            actin_templates,
            myosin_templates,
        }
    }

    /// Rehydrate from a persisted record; converges to the same derived
    /// state as the fresh-parameter path.
    pub fn from_record(record: &SarcomereRecord) -> Self {
        Self::new(SarcomereParameters::from(record))
    }

    pub fn params(&self) -> &SarcomereParameters {
        &self.params
    }

    pub fn constants(&self) -> &DerivedConstants {
        &self.constants
    }

    pub fn lattice_type(&self) -> LatticeType {
        self.params.lattice_type
    }

    pub fn midpoint(&self) -> Vec4 {
        self.params.midpoint
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Lattice radius: the outermost generated ring sits inside this.
    pub fn radius(&self) -> f32 {
        self.myosin_lattice.cycle_count as f32 * 2.0 * self.constants.d11
    }

    pub fn cycle_count(&self) -> usize {
        self.myosin_lattice.cycle_count
    }

    pub fn engagement(&self) -> f32 {
        self.engagement
    }

    pub fn free_variable(&self) -> FreeVariable {
        self.free_variable
    }

    pub fn set_free_variable(&mut self, free_variable: FreeVariable) {
        self.free_variable = free_variable;
    }

    pub fn myosin_rods(&self) -> &[Vec4] {
        &self.myosin_lattice.rods
    }

    pub fn myosin_azimuths_deg(&self) -> &[f32] {
        &self.myosin_lattice.azimuths_deg
    }

    pub fn actin_rods(&self) -> &[Vec4] {
        &self.actin_rods
    }

    pub fn z_disc_offsets(&self) -> &[Vec4] {
        &self.z_disc_offsets
    }

    pub fn actin_templates(&self) -> &ActinSubstructure {
        &self.actin_templates
    }

    pub fn myosin_templates(&self) -> &MyosinSubstructure {
        &self.myosin_templates
    }

    pub fn num_myosin(&self) -> usize {
        self.myosin_lattice.rods.len()
    }

    pub fn num_actin(&self) -> usize {
        self.actin_rods.len()
    }

    pub fn num_z_discs(&self) -> usize {
        self.z_disc_offsets.len()
    }

    pub fn num_actin_monomers(&self) -> usize {
        self.actin_templates.monomer_offsets.len()
    }

    pub fn num_troponin(&self) -> usize {
        self.actin_templates.troponin_offsets.len()
    }

    pub fn num_line_segments(&self) -> usize {
        self.actin_templates.tropomyosin_rotations.len()
    }

    pub fn num_points_per_lmm_helix(&self) -> usize {
        self.myosin_templates.lmm_helix_1.len()
    }

    pub fn num_points_per_hmm_helix(&self) -> usize {
        self.myosin_templates.hmm_helix_1.len()
    }

    pub fn num_lmm_offsets_per_rod(&self) -> usize {
        self.myosin_templates.lmm_offsets.len()
    }

    pub fn num_hmm_offsets_per_rod(&self) -> usize {
        self.myosin_templates.hmm_offsets.len()
    }

    pub fn num_myosin_heads(&self) -> usize {
        self.myosin_templates.head_offsets.len()
    }

    /// Apply a new parameter set, regenerating exactly the stages whose
    /// inputs changed. Color and display-flag edits regenerate nothing.
    pub fn update_parameters(&mut self, new: SarcomereParameters) -> RegenerationReport {
        let old = std::mem::replace(&mut self.params, new);
        if !old.geometry_differs(&self.params) {
            return RegenerationReport::default();
        }

        let lattice_inputs_changed = old.d10 != self.params.d10
            || old.num_myosin_rods != self.params.num_myosin_rods
            || old.midpoint != self.params.midpoint;
        let type_changed = old.lattice_type != self.params.lattice_type;
        let actin_template_inputs_changed = old.d10 != self.params.d10
            || old.actin_length != self.params.actin_length
            || old.sarcomere_length != self.params.sarcomere_length
            || old.actin_radius != self.params.actin_radius;
        let myosin_template_inputs_changed = type_changed
            || old.d10 != self.params.d10
            || old.myosin_radius != self.params.myosin_radius
            || old.myosin_length != self.params.myosin_length
            || old.sarcomere_length != self.params.sarcomere_length
            || old.actin_radius != self.params.actin_radius;

        self.constants = DerivedConstants::derive(&self.params);

        let report = RegenerationReport {
            myosin_rods: lattice_inputs_changed,
            actin_rods: lattice_inputs_changed || type_changed,
            actin_templates: actin_template_inputs_changed,
            myosin_templates: myosin_template_inputs_changed,
        };

        if report.myosin_rods {
            self.myosin_lattice = lattice::generate_myosin_rods(
                self.params.midpoint,
                self.constants.d_myosin,
                self.params.num_myosin_rods,
            );
        }
        if report.actin_rods {
            self.actin_rods = lattice::generate_actin_rods(
                self.params.lattice_type,
                self.params.midpoint,
                &self.constants,
                self.myosin_lattice.cycle_count,
            );
        }
        if report.actin_templates {
            self.actin_templates = ActinSubstructure::generate(&self.params);
        }
        if report.myosin_templates {
            self.myosin_templates =
                MyosinSubstructure::generate(&self.params, &self.constants, self.engagement);
        }

        self.volume = constants::lattice_volume(
            self.myosin_lattice.cycle_count,
            self.params.d10,
            self.params.sarcomere_length,
        );
        report
    }

    /// Set the head engagement scale and regenerate the myosin templates
    /// from scratch.
    pub fn set_engagement(&mut self, engagement: f32) -> RegenerationReport {
        self.engagement = engagement.clamp(0.0, 1.0);
        self.myosin_templates =
            MyosinSubstructure::generate(&self.params, &self.constants, self.engagement);
        RegenerationReport {
            myosin_templates: true,
            ..Default::default()
        }
    }

    /// Edit d10, keeping the filament radii at their current fraction of
    /// it. With the conserve-volume flag on and `Length` free, the
    /// sarcomere length is re-solved so the volume is unchanged.
    pub fn set_d10(&mut self, d10: f32) -> RegenerationReport {
        let mut p = self.params.clone();
        let actin_ratio = p.actin_radius / p.d10;
        let myosin_ratio = p.myosin_radius / p.d10;
        p.d10 = d10;
        p.actin_radius = actin_ratio * d10;
        p.myosin_radius = myosin_ratio * d10;

        if p.flags.conserve_volume && self.free_variable == FreeVariable::Length {
            let length_ratio = p.myosin_length / p.sarcomere_length;
            p.sarcomere_length =
                constants::length_from_volume(self.volume, self.myosin_lattice.cycle_count, d10);
            p.myosin_length = length_ratio * p.sarcomere_length;
        }
        self.update_parameters(p)
    }

    /// Edit the sarcomere length. With the conserve-volume flag on and
    /// `D10` free, d10 (and the radii scaled from it) is re-solved so the
    /// volume is unchanged.
    pub fn set_sarcomere_length(&mut self, length: f32) -> RegenerationReport {
        let mut p = self.params.clone();
        let length_ratio = p.myosin_length / p.sarcomere_length;
        p.sarcomere_length = length;
        p.myosin_length = length_ratio * length;

        if p.flags.conserve_volume && self.free_variable == FreeVariable::D10 {
            let actin_ratio = p.actin_radius / p.d10;
            let myosin_ratio = p.myosin_radius / p.d10;
            p.d10 =
                constants::d10_from_volume(self.volume, self.myosin_lattice.cycle_count, length);
            p.actin_radius = actin_ratio * p.d10;
            p.myosin_radius = myosin_ratio * p.d10;
        }
        self.update_parameters(p)
    }

    /// Edit the actin (thin filament) length; the sarcomere length stays
    /// at twice the actin length and the myosin length keeps its fraction
    /// of the sarcomere length.
    pub fn set_actin_length(&mut self, actin_length: f32) -> RegenerationReport {
        let mut p = self.params.clone();
        let length_ratio = p.myosin_length / p.sarcomere_length;
        p.actin_length = actin_length;
        p.sarcomere_length = 2.0 * actin_length;
        p.myosin_length = length_ratio * p.sarcomere_length;

        if p.flags.conserve_volume && self.free_variable == FreeVariable::D10 {
            let actin_ratio = p.actin_radius / p.d10;
            let myosin_ratio = p.myosin_radius / p.d10;
            p.d10 = constants::d10_from_volume(
                self.volume,
                self.myosin_lattice.cycle_count,
                p.sarcomere_length,
            );
            p.actin_radius = actin_ratio * p.d10;
            p.myosin_radius = myosin_ratio * p.d10;
        }
        self.update_parameters(p)
    }

    /// Switch the lattice packing ratio, regenerating the actin lattice
    /// and the myosin templates.
    pub fn set_lattice_type(&mut self, lattice_type: LatticeType) -> RegenerationReport {
        let mut p = self.params.clone();
        p.lattice_type = lattice_type;
        self.update_parameters(p)
    }

    /// Snapshot the scalar state for persistence; derived geometry is
    /// intentionally absent from the record.
    pub fn to_record(&self) -> SarcomereRecord {
        SarcomereRecord::from(&self.params)
    }

    /// Force a full regeneration of every stage from the current
    /// parameters.
    pub fn regenerate_all(&mut self) -> RegenerationReport {
        self.constants = DerivedConstants::derive(&self.params);
        self.myosin_lattice = lattice::generate_myosin_rods(
            self.params.midpoint,
            self.constants.d_myosin,
            self.params.num_myosin_rods,
        );
        self.actin_rods = lattice::generate_actin_rods(
            self.params.lattice_type,
            self.params.midpoint,
            &self.constants,
            self.myosin_lattice.cycle_count,
        );
        self.actin_templates = ActinSubstructure::generate(&self.params);
        self.myosin_templates =
            MyosinSubstructure::generate(&self.params, &self.constants, self.engagement);
        self.volume = constants::lattice_volume(
            self.myosin_lattice.cycle_count,
            self.params.d10,
            self.params.sarcomere_length,
        );
        RegenerationReport::all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_sarcomere() -> Sarcomere {
        let params = SarcomereParameters::new(
            LatticeType::TwoToOne,
            0.037,
            1.0,
            7,
            Vec4::new(0.0, 0.0, 0.0, 1.0),
        );
        Sarcomere::new(params)
    }

    #[test]
    fn test_constructor_paths_converge() {
        let fresh = default_sarcomere();
        let rehydrated = Sarcomere::from_record(&fresh.to_record());

        assert_eq!(fresh.params(), rehydrated.params());
        assert_eq!(fresh.constants(), rehydrated.constants());
        assert_eq!(fresh.myosin_rods(), rehydrated.myosin_rods());
        assert_eq!(fresh.actin_rods(), rehydrated.actin_rods());
        assert_eq!(fresh.actin_templates(), rehydrated.actin_templates());
        assert_eq!(fresh.myosin_templates(), rehydrated.myosin_templates());
    }

    #[test]
    fn test_color_edit_regenerates_nothing() {
        let mut s = default_sarcomere();
        let mut p = s.params().clone();
        p.colors.actin = [1.0, 1.0, 0.0];
        p.flags.troponin = true;
        let report = s.update_parameters(p);
        assert!(!report.any());
    }

    #[test]
    fn test_d10_edit_regenerates_everything() {
        let mut s = default_sarcomere();
        let mut p = s.params().clone();
        p.d10 = 0.040;
        let report = s.update_parameters(p);
        assert!(report.myosin_rods);
        assert!(report.actin_rods);
        assert!(report.actin_templates);
        assert!(report.myosin_templates);
    }

    #[test]
    fn test_type_switch_leaves_myosin_rods_alone() {
        let mut s = default_sarcomere();
        let before = s.myosin_rods().to_vec();
        let report = s.set_lattice_type(LatticeType::ThreeToOne);
        assert!(!report.myosin_rods);
        assert!(report.actin_rods);
        assert!(report.myosin_templates);
        assert_eq!(s.myosin_rods(), &before[..]);
    }

    #[test]
    fn test_volume_conserved_across_length_edit() {
        let mut s = default_sarcomere();
        s.set_free_variable(FreeVariable::D10);
        let volume_before = s.volume();
        let d10_before = s.params().d10;

        s.set_sarcomere_length(1.8);
        assert!(
            (s.volume() - volume_before).abs() < volume_before * 1e-5,
            "volume drifted: {} -> {}",
            volume_before,
            s.volume()
        );
        assert!(s.params().d10 != d10_before, "d10 should have been re-solved");
    }

    #[test]
    fn test_volume_conserved_across_d10_edit() {
        let mut s = default_sarcomere();
        s.set_free_variable(FreeVariable::Length);
        let volume_before = s.volume();
        let length_before = s.params().sarcomere_length;

        s.set_d10(0.045);
        assert!((s.volume() - volume_before).abs() < volume_before * 1e-5);
        assert!(s.params().sarcomere_length != length_before);
        // Radii keep their fraction of d10.
        assert!((s.params().actin_radius - 0.095 * 0.045).abs() < 1e-6);
        assert!((s.params().myosin_radius - 0.212 * 0.045).abs() < 1e-6);
    }

    #[test]
    fn test_volume_tracks_length_when_not_conserving() {
        let mut s = default_sarcomere();
        let mut p = s.params().clone();
        p.flags.conserve_volume = false;
        s.update_parameters(p);

        let volume_before = s.volume();
        s.set_sarcomere_length(1.5);
        assert!(s.volume() < volume_before);
    }

    #[test]
    fn test_engagement_only_touches_myosin_templates() {
        let mut s = default_sarcomere();
        let report = s.set_engagement(0.7);
        assert_eq!(
            report,
            RegenerationReport {
                myosin_templates: true,
                ..Default::default()
            }
        );
        assert!((s.engagement() - 0.7).abs() < 1e-6);
        // Out-of-range values clamp.
        s.set_engagement(3.0);
        assert_eq!(s.engagement(), 1.0);
    }

    #[test]
    fn test_radius_follows_cycle_count() {
        let s = default_sarcomere();
        let expected = s.cycle_count() as f32 * 2.0 * s.constants().d11;
        assert!((s.radius() - expected).abs() < 1e-7);
    }

    #[test]
    fn test_z_disc_offsets_are_fixed_pair() {
        let s = default_sarcomere();
        assert_eq!(s.num_z_discs(), 2);
        assert_eq!(s.z_disc_offsets()[0], Vec4::new(0.0, -0.001, 0.0, 0.0));
        assert_eq!(s.z_disc_offsets()[1], Vec4::new(0.0, 0.001, 0.0, 0.0));
    }
}
