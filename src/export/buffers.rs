//! Flattened instance buffers for rendering.
//!
//! Snapshots the generated geometry into plain `[f32; 4]` point arrays
//! and column-major `[[f32; 4]; 4]` matrix arrays, ready to hand to any
//! GPU upload path. The snapshot owns copies; the sarcomere can be
//! regenerated freely while a previous snapshot is still in flight.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec4};

use crate::geometry::Sarcomere;

/// One instanced point, position in xyz and the homogeneous w.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct PointInstance {
    pub position: [f32; 4],
}

/// One instanced transform, column-major.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct MatrixInstance {
    pub columns: [[f32; 4]; 4],
}

fn flatten_points(points: &[Vec4]) -> Vec<PointInstance> {
    points
        .iter()
        .map(|p| PointInstance {
            position: p.to_array(),
        })
        .collect()
}

fn flatten_matrices(matrices: &[Mat4]) -> Vec<MatrixInstance> {
    matrices
        .iter()
        .map(|m| MatrixInstance {
            columns: m.to_cols_array_2d(),
        })
        .collect()
}

/// Owned snapshot of every renderable buffer of one sarcomere.
#[derive(Debug, Clone)]
pub struct GeometryBuffers {
    pub myosin_rods: Vec<PointInstance>,
    pub actin_rods: Vec<PointInstance>,
    pub z_disc_offsets: Vec<PointInstance>,
    pub actin_monomers: Vec<PointInstance>,
    pub troponin: Vec<PointInstance>,
    pub tropomyosin_template: Vec<PointInstance>,
    pub tropomyosin_rotations: Vec<MatrixInstance>,
    pub lmm_helix_1: Vec<PointInstance>,
    pub lmm_helix_2: Vec<PointInstance>,
    pub hmm_helix_1: Vec<PointInstance>,
    pub hmm_helix_2: Vec<PointInstance>,
    pub lmm_offsets: Vec<PointInstance>,
    pub hmm_offsets: Vec<PointInstance>,
    pub hmm_yaw_matrices: Vec<MatrixInstance>,
    pub hmm_yaw_correction_matrices: Vec<MatrixInstance>,
    pub hmm_splay_matrices: Vec<MatrixInstance>,
    pub myosin_heads: Vec<PointInstance>,
}

impl GeometryBuffers {
    /// Copy every generated buffer out of the sarcomere.
    pub fn snapshot(sarcomere: &Sarcomere) -> Self {
        let actin = sarcomere.actin_templates();
        let myosin = sarcomere.myosin_templates();
        Self {
            myosin_rods: flatten_points(sarcomere.myosin_rods()),
            actin_rods: flatten_points(sarcomere.actin_rods()),
            z_disc_offsets: flatten_points(sarcomere.z_disc_offsets()),
            actin_monomers: flatten_points(&actin.monomer_offsets),
            troponin: flatten_points(&actin.troponin_offsets),
            tropomyosin_template: flatten_points(&actin.tropomyosin_template),
            tropomyosin_rotations: flatten_matrices(&actin.tropomyosin_rotations),
            lmm_helix_1: flatten_points(&myosin.lmm_helix_1),
            lmm_helix_2: flatten_points(&myosin.lmm_helix_2),
            hmm_helix_1: flatten_points(&myosin.hmm_helix_1),
            hmm_helix_2: flatten_points(&myosin.hmm_helix_2),
            lmm_offsets: flatten_points(&myosin.lmm_offsets),
            hmm_offsets: flatten_points(&myosin.hmm_offsets),
            hmm_yaw_matrices: flatten_matrices(&myosin.hmm_yaw_matrices),
            hmm_yaw_correction_matrices: flatten_matrices(&myosin.hmm_yaw_correction_matrices),
            hmm_splay_matrices: flatten_matrices(&myosin.hmm_splay_matrices),
            myosin_heads: flatten_points(&myosin.head_offsets),
        }
    }

    /// Total bytes across all point buffers, for upload budgeting.
    pub fn point_bytes(&self) -> usize {
        [
            &self.myosin_rods,
            &self.actin_rods,
            &self.z_disc_offsets,
            &self.actin_monomers,
            &self.troponin,
            &self.tropomyosin_template,
            &self.lmm_helix_1,
            &self.lmm_helix_2,
            &self.hmm_helix_1,
            &self.hmm_helix_2,
            &self.lmm_offsets,
            &self.hmm_offsets,
            &self.myosin_heads,
        ]
        .iter()
        .map(|b| std::mem::size_of_val(b.as_slice()))
        .sum()
    }
}

/// Raw byte view of a point buffer for GPU upload.
pub fn points_as_bytes(points: &[PointInstance]) -> &[u8] {
    bytemuck::cast_slice(points)
}

/// Raw byte view of a matrix buffer for GPU upload.
pub fn matrices_as_bytes(matrices: &[MatrixInstance]) -> &[u8] {
    bytemuck::cast_slice(matrices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LatticeType, SarcomereParameters};

    fn small_sarcomere() -> Sarcomere {
        Sarcomere::new(SarcomereParameters::new(
            LatticeType::TwoToOne,
            0.037,
            1.0,
            7,
            Vec4::new(0.0, 0.0, 0.0, 1.0),
        ))
    }

    #[test]
    fn test_snapshot_counts_match_sarcomere() {
        let s = small_sarcomere();
        let buffers = GeometryBuffers::snapshot(&s);
        assert_eq!(buffers.myosin_rods.len(), s.num_myosin());
        assert_eq!(buffers.actin_rods.len(), s.num_actin());
        assert_eq!(buffers.z_disc_offsets.len(), s.num_z_discs());
        assert_eq!(buffers.actin_monomers.len(), s.num_actin_monomers());
        assert_eq!(buffers.myosin_heads.len(), s.num_myosin_heads());
    }

    #[test]
    fn test_snapshot_outlives_regeneration() {
        let mut s = small_sarcomere();
        let buffers = GeometryBuffers::snapshot(&s);
        let rods_before = buffers.myosin_rods.clone();

        let mut p = s.params().clone();
        p.d10 = 0.05;
        s.update_parameters(p);

        // The snapshot is a copy; mutating the sarcomere leaves it intact.
        assert_eq!(buffers.myosin_rods.len(), rods_before.len());
        for (a, b) in buffers.myosin_rods.iter().zip(rods_before.iter()) {
            assert_eq!(a.position, b.position);
        }
    }

    #[test]
    fn test_byte_views_have_expected_stride() {
        let s = small_sarcomere();
        let buffers = GeometryBuffers::snapshot(&s);
        let bytes = points_as_bytes(&buffers.myosin_rods);
        assert_eq!(bytes.len(), buffers.myosin_rods.len() * 16);
        let matrix_bytes = matrices_as_bytes(&buffers.hmm_splay_matrices);
        assert_eq!(matrix_bytes.len(), buffers.hmm_splay_matrices.len() * 64);
    }
}
