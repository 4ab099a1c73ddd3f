//! Persisted parameter record.
//!
//! The on-disk schema keeps the historical key names (`sarcomereType`,
//! `checkActin`, ...) so existing session files stay loadable. Only the
//! scalar configuration, display flags and colors are persisted; derived
//! geometry is regenerated from the scalars on load.

use glam::Vec4;
use serde::{Deserialize, Serialize};

use super::{Colors, DisplayFlags, LatticeType, SarcomereParameters};

/// JSON-serializable snapshot of a [`SarcomereParameters`] set.
///
/// Loading parses the whole record into this staging structure before any
/// live state is touched, so a malformed file never leaves a partial write.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SarcomereRecord {
    #[serde(rename = "sarcomereType")]
    pub sarcomere_type: LatticeType,
    #[serde(rename = "sarcomereLength")]
    pub sarcomere_length: f32,
    pub d10: f32,
    #[serde(rename = "actinLength")]
    pub actin_length: f32,
    #[serde(rename = "actinRadius")]
    pub actin_radius: f32,
    #[serde(rename = "myosinLength")]
    pub myosin_length: f32,
    #[serde(rename = "myosinRadius")]
    pub myosin_radius: f32,
    #[serde(rename = "numMyosinFilaments")]
    pub num_myosin_filaments: usize,
    #[serde(rename = "checkKonserveVolume")]
    pub check_conserve_volume: bool,
    #[serde(rename = "checkHighResActin")]
    pub check_high_res_actin: bool,
    #[serde(rename = "checkHighResMyosin")]
    pub check_high_res_myosin: bool,
    #[serde(rename = "checkActin")]
    pub check_actin: bool,
    #[serde(rename = "checkActinMonomers")]
    pub check_actin_monomers: bool,
    #[serde(rename = "checkTropomyosin")]
    pub check_tropomyosin: bool,
    #[serde(rename = "checkTroponin")]
    pub check_troponin: bool,
    #[serde(rename = "checkMyosin")]
    pub check_myosin: bool,
    #[serde(rename = "checkMyosinTrunk")]
    pub check_myosin_trunk: bool,
    #[serde(rename = "checkLMM")]
    pub check_lmm: bool,
    #[serde(rename = "checkHMM")]
    pub check_hmm: bool,
    #[serde(rename = "checkMyosinHeads")]
    pub check_myosin_heads: bool,
    #[serde(rename = "checkHalfHelix")]
    pub check_half_helix: bool,
    #[serde(rename = "sarcomereMidPoint")]
    pub sarcomere_midpoint: [f32; 4],
    #[serde(rename = "actinColor")]
    pub actin_color: [f32; 3],
    #[serde(rename = "tropomyosinColor")]
    pub tropomyosin_color: [f32; 3],
    #[serde(rename = "troponinColor")]
    pub troponin_color: [f32; 3],
    #[serde(rename = "myosinColor")]
    pub myosin_color: [f32; 3],
    #[serde(rename = "LMMColor")]
    pub lmm_color: [f32; 3],
    #[serde(rename = "HMMColor")]
    pub hmm_color: [f32; 3],
    #[serde(rename = "myosinHeadColor")]
    pub myosin_head_color: [f32; 3],
}

impl From<&SarcomereParameters> for SarcomereRecord {
    fn from(p: &SarcomereParameters) -> Self {
        Self {
            sarcomere_type: p.lattice_type,
            sarcomere_length: p.sarcomere_length,
            d10: p.d10,
            actin_length: p.actin_length,
            actin_radius: p.actin_radius,
            myosin_length: p.myosin_length,
            myosin_radius: p.myosin_radius,
            num_myosin_filaments: p.num_myosin_rods,
            check_conserve_volume: p.flags.conserve_volume,
            check_high_res_actin: p.flags.high_res_actin,
            check_high_res_myosin: p.flags.high_res_myosin,
            check_actin: p.flags.actin,
            check_actin_monomers: p.flags.actin_monomers,
            check_tropomyosin: p.flags.tropomyosin,
            check_troponin: p.flags.troponin,
            check_myosin: p.flags.myosin,
            check_myosin_trunk: p.flags.myosin_trunk,
            check_lmm: p.flags.lmm,
            check_hmm: p.flags.hmm,
            check_myosin_heads: p.flags.myosin_heads,
            check_half_helix: p.flags.half_helix,
            sarcomere_midpoint: p.midpoint.to_array(),
            actin_color: p.colors.actin,
            tropomyosin_color: p.colors.tropomyosin,
            troponin_color: p.colors.troponin,
            myosin_color: p.colors.myosin,
            lmm_color: p.colors.lmm,
            hmm_color: p.colors.hmm,
            myosin_head_color: p.colors.myosin_head,
        }
    }
}

impl From<&SarcomereRecord> for SarcomereParameters {
    fn from(r: &SarcomereRecord) -> Self {
        Self {
            lattice_type: r.sarcomere_type,
            d10: r.d10,
            actin_length: r.actin_length,
            sarcomere_length: r.sarcomere_length,
            actin_radius: r.actin_radius,
            myosin_length: r.myosin_length,
            myosin_radius: r.myosin_radius,
            num_myosin_rods: r.num_myosin_filaments,
            midpoint: Vec4::from_array(r.sarcomere_midpoint),
            flags: DisplayFlags {
                conserve_volume: r.check_conserve_volume,
                high_res_actin: r.check_high_res_actin,
                high_res_myosin: r.check_high_res_myosin,
                actin: r.check_actin,
                actin_monomers: r.check_actin_monomers,
                tropomyosin: r.check_tropomyosin,
                troponin: r.check_troponin,
                myosin: r.check_myosin,
                myosin_trunk: r.check_myosin_trunk,
                lmm: r.check_lmm,
                hmm: r.check_hmm,
                myosin_heads: r.check_myosin_heads,
                half_helix: r.check_half_helix,
            },
            colors: Colors {
                actin: r.actin_color,
                tropomyosin: r.tropomyosin_color,
                troponin: r.troponin_color,
                myosin: r.myosin_color,
                lmm: r.lmm_color,
                hmm: r.hmm_color,
                myosin_head: r.myosin_head_color,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_round_trip() {
        let params = SarcomereParameters::default();
        let record = SarcomereRecord::from(&params);
        let json = serde_json::to_string_pretty(&record).unwrap();
        let parsed: SarcomereRecord = serde_json::from_str(&json).unwrap();
        let restored = SarcomereParameters::from(&parsed);
        assert_eq!(restored, params);
    }

    #[test]
    fn test_record_uses_historical_keys() {
        let record = SarcomereRecord::from(&SarcomereParameters::default());
        let json = serde_json::to_string(&record).unwrap();
        for key in [
            "sarcomereType",
            "numMyosinFilaments",
            "checkKonserveVolume",
            "sarcomereMidPoint",
            "LMMColor",
        ] {
            assert!(json.contains(key), "missing key {key} in {json}");
        }
    }

    #[test]
    fn test_malformed_record_is_an_error() {
        let garbage = r#"{"sarcomereType": 99, "d10": "not a number"}"#;
        assert!(serde_json::from_str::<SarcomereRecord>(garbage).is_err());
    }
}
