//! Actin substructure templates.
//!
//! Generates the double helix of actin monomers plus the troponin anchor
//! points and the tropomyosin line-strip template, all in the local frame
//! of a single actin rod. The templates are generated once and reused for
//! every rod instance; the renderer applies them at each rod's transform.
//!
//! The helix pitch follows the 13/6 actin repeat: one crossover every
//! 37.5 nm (Squire, The Structural Basis of Muscular Contraction).

use glam::{Mat4, Quat, Vec4};

use crate::config::SarcomereParameters;

/// Monomers per tropomyosin segment (one tropomyosin molecule spans
/// seven actin monomers).
const MONOMERS_PER_SEGMENT: i32 = 7;

/// Local-frame offsets and rotations for one actin rod template.
#[derive(Debug, Clone, PartialEq)]
pub struct ActinSubstructure {
    /// Double-helix monomer offsets, both half-filaments, both strands.
    pub monomer_offsets: Vec<Vec4>,
    /// Sparse troponin anchor offsets (every 7th and 7th±1 monomer);
    /// always an even count, a trailing odd entry is dropped.
    pub troponin_offsets: Vec<Vec4>,
    /// One reusable tropomyosin line-strip template (8 points, first
    /// doubled for strip adjacency).
    pub tropomyosin_template: Vec<Vec4>,
    /// Per-segment rotation matrices applied to the template at instancing
    /// time; first half winds clockwise, second half counter-clockwise.
    pub tropomyosin_rotations: Vec<Mat4>,
}

fn rotate_y(v: Vec4, angle: f32) -> Vec4 {
    let r = Quat::from_rotation_y(angle) * v.truncate();
    Vec4::new(r.x, r.y, r.z, v.w)
}

impl ActinSubstructure {
    /// Generate all actin-rod templates for the current parameters.
    ///
    /// Deterministic and idempotent: the same parameters always produce
    /// bit-identical output.
    pub fn generate(params: &SarcomereParameters) -> Self {
        let mut monomer_offsets = Vec::new();
        let mut troponin_offsets = Vec::new();
        let mut tropomyosin_template = Vec::new();
        let mut tropomyosin_rotations = Vec::new();

        // One crossover per 37.5 nm gives the per-monomer twist; the line
        // pitch is the leftover twist of a whole 7-monomer segment.
        let helix_pitch = 180.0 / (37.5 / (params.actin_radius * 1000.0));
        let line_pitch = 7.0 * helix_pitch - 180.0;
        let alpha = helix_pitch.to_radians();
        let y_offset = params.actin_radius;
        let strand_radius = params.actin_radius / 2.0;
        let num_monomers = (params.actin_length / y_offset) as i32;
        let half_length = params.sarcomere_length / 2.0;

        // First half-filament, strands wind clockwise. Troponin anchors
        // share the helix rotation but sit at the tropomyosin radius and
        // pick up their segment's line pitch.
        for i in 0..=num_monomers {
            let strand = rotate_y(Vec4::new(strand_radius, 0.0, 0.0, 0.0), i as f32 * alpha);
            monomer_offsets.push(Vec4::new(0.0, i as f32 * y_offset - half_length, 0.0, 1.0) + strand);

            let mut anchor = rotate_y(
                Vec4::new(0.0, 0.0, strand_radius, 0.0),
                (i % MONOMERS_PER_SEGMENT) as f32 * alpha,
            );
            anchor = rotate_y(
                anchor,
                ((i / MONOMERS_PER_SEGMENT) as f32 * line_pitch).to_radians(),
            );
            // Anchors at monomers 0,6,7,13,14,20,21,...
            if i % MONOMERS_PER_SEGMENT == 0 || (i + 1) % MONOMERS_PER_SEGMENT == 0 {
                troponin_offsets
                    .push(Vec4::new(0.0, i as f32 * y_offset - half_length, 0.0, 1.0) + anchor);
            }
        }
        if troponin_offsets.len() % 2 == 1 {
            troponin_offsets.pop();
        }
        for i in 0..=num_monomers {
            let strand = rotate_y(Vec4::new(-strand_radius, 0.0, 0.0, 0.0), i as f32 * alpha);
            monomer_offsets.push(Vec4::new(0.0, i as f32 * y_offset - half_length, 0.0, 1.0) + strand);
        }

        // Second half-filament, mirrored from the far Z-disc, strands wind
        // counter-clockwise.
        for i in 0..=num_monomers {
            let strand = rotate_y(Vec4::new(strand_radius, 0.0, 0.0, 0.0), i as f32 * -alpha);
            monomer_offsets.push(Vec4::new(0.0, half_length - i as f32 * y_offset, 0.0, 1.0) + strand);

            let mut anchor = rotate_y(
                Vec4::new(0.0, 0.0, -strand_radius, 0.0),
                (i % MONOMERS_PER_SEGMENT) as f32 * -alpha,
            );
            anchor = rotate_y(
                anchor,
                -((i / MONOMERS_PER_SEGMENT) as f32 * line_pitch).to_radians(),
            );
            if i % MONOMERS_PER_SEGMENT == 0 || (i + 1) % MONOMERS_PER_SEGMENT == 0 {
                troponin_offsets
                    .push(Vec4::new(0.0, half_length - i as f32 * y_offset, 0.0, 1.0) + anchor);
            }
        }
        if troponin_offsets.len() % 2 == 1 {
            troponin_offsets.pop();
        }
        for i in 0..=num_monomers {
            let strand = rotate_y(Vec4::new(-strand_radius, 0.0, 0.0, 0.0), i as f32 * -alpha);
            monomer_offsets.push(Vec4::new(0.0, half_length - i as f32 * y_offset, 0.0, 1.0) + strand);
        }

        // One tropomyosin segment spans 7 monomers, so the line strip has
        // 8 points; the first is doubled for GL_LINE_STRIP_ADJACENCY-style
        // rendering.
        for i in 0..8 {
            let anchor = rotate_y(Vec4::new(0.0, 0.0, strand_radius, 0.0), i as f32 * alpha);
            let point = Vec4::new(0.0, i as f32 * y_offset - half_length, 0.0, 1.0) + anchor;
            tropomyosin_template.push(point);
            if i == 0 {
                tropomyosin_template.push(point);
            }
        }

        // One rotation per 7-monomer segment and half-filament; the two
        // halves wind in opposite senses.
        let segments_per_half =
            (monomer_offsets.len() as i32 / 2 / MONOMERS_PER_SEGMENT) / 2;
        for i in 0..segments_per_half {
            tropomyosin_rotations
                .push(Mat4::from_rotation_y((i as f32 * line_pitch).to_radians()));
        }
        for i in 0..segments_per_half {
            tropomyosin_rotations
                .push(Mat4::from_rotation_y(-(i as f32 * line_pitch).to_radians()));
        }

        Self {
            monomer_offsets,
            troponin_offsets,
            tropomyosin_template,
            tropomyosin_rotations,
        }
    }
}
