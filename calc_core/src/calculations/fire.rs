//! # Fire Resistance (CSA O86 5.6 and Annex B)
//!
//! Effective cross-section of a member after a standard fire exposure, by
//! the reduced cross-section method:
//!
//! 1. Char depths (B.4): one-dimensional `xc,o = 0.65·t` and notional
//!    `xc,n = βn·t`
//! 2. Zero-strength layer (B.5): `xt = 7 mm`, ramping from 0 over the first
//!    20 minutes
//! 3. Each exposed face loses `xt + xc` (B.6.2)
//!
//! Protection is counted in faces: a member with both wide faces against a
//! wall assembly is `TwoSides` on the wide faces. The wide faces carry the
//! width `b` and the narrow faces carry the depth `d`.
//!
//! ## Example
//!
//! ```rust
//! use o86_core::calculations::fire::{effective_section, FaceProtection, FireProduct, FireSectionInput};
//!
//! let section = effective_section(&FireSectionInput {
//!     duration_min: 60.0,
//!     width_mm: 184.0,
//!     depth_mm: 362.0,
//!     wide_faces: FaceProtection::Unprotected,
//!     narrow_faces: FaceProtection::OneSide,
//!     product: FireProduct::Glulam,
//! })
//! .unwrap();
//!
//! // 184 - 2 × (7 + 42), 362 - (7 + 42)
//! assert!((section.width_mm - 86.0).abs() < 1e-9);
//! assert!((section.depth_mm - 313.0).abs() < 1e-9);
//! assert_eq!(section.kfi, 1.35);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::factors::o86_ref;

/// Smallest effective dimension for which the reduced section method holds (mm)
pub const MIN_EFFECTIVE_DIMENSION_MM: f64 = 70.0;

/// One-dimensional charring rate βo (mm/min)
const BETA_ONE_DIM: f64 = 0.65;

/// Full zero-strength layer (mm)
const ZERO_STRENGTH_LAYER_MM: f64 = 7.0;

/// Exposure time over which the zero-strength layer develops (min)
const ZERO_STRENGTH_RAMP_MIN: f64 = 20.0;

/// CLT one-dimensional char depth beyond which the notional rate applies (mm)
const CLT_FALL_OFF_DEPTH_MM: f64 = 38.0;

// ============================================================================
// Input Types
// ============================================================================

/// Number of protected faces in a pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum FaceProtection {
    /// Both faces exposed
    #[default]
    Unprotected,
    /// One face protected, one exposed
    OneSide,
    /// Both faces protected
    TwoSides,
}

impl FaceProtection {
    pub const ALL: [FaceProtection; 3] = [
        FaceProtection::Unprotected,
        FaceProtection::OneSide,
        FaceProtection::TwoSides,
    ];

    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.trim().to_lowercase().replace([' ', '-'], "_").as_str() {
            "unprotected" | "none" | "aucune" | "0" => Ok(FaceProtection::Unprotected),
            "one_side" | "one" | "1_face" | "1" => Ok(FaceProtection::OneSide),
            "two_sides" | "two" | "2_faces" | "2" => Ok(FaceProtection::TwoSides),
            _ => Err(CalcError::unknown_selection("face protection", s)),
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            FaceProtection::Unprotected => "Unprotected",
            FaceProtection::OneSide => "One side protected",
            FaceProtection::TwoSides => "Two sides protected",
        }
    }
}

impl std::fmt::Display for FaceProtection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Product type, which sets the charring rate and Kfi
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum FireProduct {
    SawnLumber,
    Glulam,
    /// CLT with V1 or V2 layers
    CltV,
    /// CLT with E1, E2 or E3 layers
    CltE,
    #[default]
    Other,
}

impl FireProduct {
    pub const ALL: [FireProduct; 5] = [
        FireProduct::SawnLumber,
        FireProduct::Glulam,
        FireProduct::CltV,
        FireProduct::CltE,
        FireProduct::Other,
    ];

    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.trim().to_lowercase().replace([' ', '-'], "_").as_str() {
            "sawn" | "sawn_lumber" | "lumber" | "sciage" => Ok(FireProduct::SawnLumber),
            "glulam" | "glt" => Ok(FireProduct::Glulam),
            "clt_v" | "clt_v1_v2" => Ok(FireProduct::CltV),
            "clt_e" | "clt_e1_e2_e3" => Ok(FireProduct::CltE),
            "other" | "autre" => Ok(FireProduct::Other),
            _ => Err(CalcError::unknown_selection("fire product", s)),
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            FireProduct::SawnLumber => "Sawn lumber",
            FireProduct::Glulam => "Glued-laminated timber",
            FireProduct::CltV => "CLT (V1, V2)",
            FireProduct::CltE => "CLT (E1, E2, E3)",
            FireProduct::Other => "Other",
        }
    }

    pub fn is_clt(&self) -> bool {
        matches!(self, FireProduct::CltV | FireProduct::CltE)
    }

    /// Notional charring rate βn (mm/min), B.4
    pub fn notional_char_rate(&self) -> f64 {
        match self {
            FireProduct::SawnLumber | FireProduct::CltV | FireProduct::CltE => 0.8,
            FireProduct::Glulam | FireProduct::Other => 0.7,
        }
    }

    /// Fire resistance adjustment factor Kfi, B.3
    pub fn kfi(&self) -> f64 {
        match self {
            FireProduct::SawnLumber | FireProduct::CltV => 1.5,
            FireProduct::Glulam => 1.35,
            FireProduct::CltE | FireProduct::Other => 1.25,
        }
    }
}

impl std::fmt::Display for FireProduct {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Input for the effective section calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FireSectionInput {
    /// Fire exposure (min)
    pub duration_min: f64,
    /// Member width b (mm)
    pub width_mm: f64,
    /// Member depth d (mm)
    pub depth_mm: f64,
    #[serde(default)]
    pub wide_faces: FaceProtection,
    #[serde(default)]
    pub narrow_faces: FaceProtection,
    #[serde(default)]
    pub product: FireProduct,
}

impl FireSectionInput {
    pub fn validate(&self) -> CalcResult<()> {
        if self.duration_min < 0.0 || !self.duration_min.is_finite() {
            return Err(CalcError::invalid_input(
                "duration_min",
                self.duration_min.to_string(),
                "Fire duration cannot be negative",
            ));
        }
        positive("width_mm", self.width_mm, "Width must be positive")?;
        positive("depth_mm", self.depth_mm, "Depth must be positive")
    }
}

fn positive(field: &str, value: f64, reason: &str) -> CalcResult<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(CalcError::invalid_input(field, value.to_string(), reason))
    }
}

// ============================================================================
// Result Types
// ============================================================================

/// Effective section and resistance factors for fire design (B.6.3)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectiveSection {
    /// Effective width (mm)
    pub width_mm: f64,
    /// Effective depth (mm)
    pub depth_mm: f64,
    pub phi: f64,
    pub kh: f64,
    pub kfi: f64,
    /// xc,o (mm)
    pub char_depth_one_dim_mm: f64,
    /// xc,n (mm)
    pub char_depth_notional_mm: f64,
    /// xt (mm)
    pub zero_strength_layer_mm: f64,
}

impl std::fmt::Display for EffectiveSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "b = {:.1} mm", self.width_mm)?;
        writeln!(f, "d = {:.1} mm", self.depth_mm)?;
        writeln!(f, "phi = {}", self.phi)?;
        writeln!(f, "Kh = {}", self.kh)?;
        write!(f, "Kfi = {}", self.kfi)
    }
}

// ============================================================================
// Calculation
// ============================================================================

/// Char depths (xc,o, xc,n) after `duration_min` of exposure
pub fn char_depths(duration_min: f64, product: FireProduct) -> (f64, f64) {
    let one_dim = BETA_ONE_DIM * duration_min;
    let notional = product.notional_char_rate() * duration_min;
    if product.is_clt() && one_dim > CLT_FALL_OFF_DEPTH_MM {
        (notional, notional)
    } else {
        (one_dim, notional)
    }
}

/// Zero-strength layer depth xt (mm)
pub fn zero_strength_layer(duration_min: f64) -> f64 {
    if duration_min < ZERO_STRENGTH_RAMP_MIN {
        duration_min / ZERO_STRENGTH_RAMP_MIN * ZERO_STRENGTH_LAYER_MM
    } else {
        ZERO_STRENGTH_LAYER_MM
    }
}

/// Reduce a section for fire exposure (B.6.2).
///
/// Fails with `CodeLimitExceeded` when either effective dimension falls
/// below 70 mm, where heat transfer through the residual section governs and
/// the reduced section method no longer applies.
pub fn effective_section(input: &FireSectionInput) -> CalcResult<EffectiveSection> {
    use FaceProtection::*;

    input.validate()?;

    let (xco, xcn) = char_depths(input.duration_min, input.product);
    let xt = zero_strength_layer(input.duration_min);

    // Loss per exposed face: one-dimensional charring when only one pair of
    // faces is exposed, notional (corner rounding) otherwise
    let one_dim = xt + xco;
    let notional = xt + xcn;

    let (b_loss, d_loss) = match (input.wide_faces, input.narrow_faces) {
        (TwoSides, TwoSides) => (0.0, 0.0),
        (TwoSides, OneSide) => (0.0, one_dim),
        (TwoSides, Unprotected) => (0.0, 2.0 * one_dim),
        (OneSide, TwoSides) => (one_dim, 0.0),
        (OneSide, OneSide) => (notional, notional),
        (OneSide, Unprotected) => (notional, 2.0 * notional),
        (Unprotected, TwoSides) => (2.0 * one_dim, 0.0),
        (Unprotected, OneSide) => (2.0 * notional, notional),
        (Unprotected, Unprotected) => (2.0 * notional, 2.0 * notional),
    };

    let width_mm = input.width_mm - b_loss;
    let depth_mm = input.depth_mm - d_loss;

    tracing::debug!(xco, xcn, xt, width_mm, depth_mm, "fire effective section");

    if width_mm.min(depth_mm) < MIN_EFFECTIVE_DIMENSION_MM {
        return Err(CalcError::code_limit(
            o86_ref::FIRE_SECTION,
            format!(
                "Effective section {width_mm:.1} x {depth_mm:.1} mm has a dimension under \
                 {MIN_EFFECTIVE_DIMENSION_MM} mm; a heat transfer analysis is required"
            ),
        ));
    }

    Ok(EffectiveSection {
        width_mm,
        depth_mm,
        phi: 1.0,
        kh: 1.0,
        kfi: input.product.kfi(),
        char_depth_one_dim_mm: xco,
        char_depth_notional_mm: xcn,
        zero_strength_layer_mm: xt,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn input(
        duration_min: f64,
        width_mm: f64,
        depth_mm: f64,
        wide_faces: FaceProtection,
        narrow_faces: FaceProtection,
        product: FireProduct,
    ) -> FireSectionInput {
        FireSectionInput {
            duration_min,
            width_mm,
            depth_mm,
            wide_faces,
            narrow_faces,
            product,
        }
    }

    #[test]
    fn test_fully_protected_section_is_unchanged() {
        let s = effective_section(&input(
            30.0,
            140.0,
            350.0,
            FaceProtection::TwoSides,
            FaceProtection::TwoSides,
            FireProduct::SawnLumber,
        ))
        .unwrap();
        assert_eq!((s.width_mm, s.depth_mm, s.phi, s.kh, s.kfi), (140.0, 350.0, 1.0, 1.0, 1.5));
    }

    #[test]
    fn test_one_side_each_uses_notional_rate() {
        // Sawn, 60 min: xcn = 48, xt = 7
        let s = effective_section(&input(
            60.0,
            140.0,
            350.0,
            FaceProtection::OneSide,
            FaceProtection::OneSide,
            FireProduct::SawnLumber,
        ))
        .unwrap();
        assert_relative_eq!(s.width_mm, 85.0, max_relative = 1e-12);
        assert_relative_eq!(s.depth_mm, 295.0, max_relative = 1e-12);
    }

    #[test]
    fn test_wide_faces_protected_uses_one_dimensional_rate() {
        // 30 min: xco = 19.5, xt = 7, both narrow faces exposed
        let s = effective_section(&input(
            30.0,
            140.0,
            350.0,
            FaceProtection::TwoSides,
            FaceProtection::Unprotected,
            FireProduct::Glulam,
        ))
        .unwrap();
        assert_eq!(s.width_mm, 140.0);
        assert_relative_eq!(s.depth_mm, 297.0, max_relative = 1e-12);
        assert_eq!(s.kfi, 1.35);
    }

    #[test]
    fn test_fully_exposed_reduces_both_dimensions() {
        // Glulam 30 min: xcn = 21, xt = 7
        let s = effective_section(&input(
            30.0,
            175.0,
            380.0,
            FaceProtection::Unprotected,
            FaceProtection::Unprotected,
            FireProduct::Glulam,
        ))
        .unwrap();
        assert_relative_eq!(s.width_mm, 119.0, max_relative = 1e-12);
        assert_relative_eq!(s.depth_mm, 324.0, max_relative = 1e-12);
    }

    #[test]
    fn test_short_exposure_ramps_zero_strength_layer() {
        assert_relative_eq!(zero_strength_layer(10.0), 3.5);
        assert_eq!(zero_strength_layer(20.0), 7.0);
        assert_eq!(zero_strength_layer(90.0), 7.0);
    }

    #[test]
    fn test_clt_char_depth_switches_to_notional() {
        // 0.65 × 60 = 39 > 38
        let (xco, xcn) = char_depths(60.0, FireProduct::CltE);
        assert_relative_eq!(xco, 48.0);
        assert_eq!(xco, xcn);
        let (xco, xcn) = char_depths(30.0, FireProduct::CltV);
        assert_relative_eq!(xco, 19.5);
        assert_relative_eq!(xcn, 24.0);
        // Not CLT: no switch
        let (xco, _) = char_depths(60.0, FireProduct::SawnLumber);
        assert_relative_eq!(xco, 39.0);
    }

    #[test]
    fn test_small_section_long_exposure_fails() {
        let err = effective_section(&input(
            60.0,
            89.0,
            140.0,
            FaceProtection::Unprotected,
            FaceProtection::Unprotected,
            FireProduct::SawnLumber,
        ))
        .unwrap_err();
        match err {
            CalcError::CodeLimitExceeded { clause, .. } => assert_eq!(clause, o86_ref::FIRE_SECTION),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_kfi_per_product() {
        assert_eq!(FireProduct::SawnLumber.kfi(), 1.5);
        assert_eq!(FireProduct::CltV.kfi(), 1.5);
        assert_eq!(FireProduct::Glulam.kfi(), 1.35);
        assert_eq!(FireProduct::CltE.kfi(), 1.25);
        assert_eq!(FireProduct::Other.kfi(), 1.25);
    }

    #[test]
    fn test_rejects_negative_dimensions() {
        let bad = input(30.0, -1.0, 200.0, FaceProtection::TwoSides, FaceProtection::TwoSides, FireProduct::Other);
        assert!(effective_section(&bad).unwrap_err().is_input_error());
    }

    #[test]
    fn test_rejects_non_finite_dimensions() {
        for (b, d) in [(f64::NAN, 350.0), (140.0, f64::NAN), (f64::INFINITY, 350.0), (140.0, f64::NEG_INFINITY)] {
            let bad = input(60.0, b, d, FaceProtection::Unprotected, FaceProtection::Unprotected, FireProduct::SawnLumber);
            assert!(effective_section(&bad).unwrap_err().is_input_error(), "{b} x {d}");
        }
        let bad = input(f64::NAN, 140.0, 350.0, FaceProtection::TwoSides, FaceProtection::TwoSides, FireProduct::Other);
        assert!(effective_section(&bad).unwrap_err().is_input_error());
    }

    #[test]
    fn test_reduction_table() {
        use FaceProtection::*;

        // Sawn, 60 min: xt + xco = 7 + 39 = 46, xt + xcn = 7 + 48 = 55
        let sawn = [
            (TwoSides, TwoSides, 300.0, 400.0),
            (TwoSides, OneSide, 300.0, 354.0),
            (TwoSides, Unprotected, 300.0, 308.0),
            (OneSide, TwoSides, 254.0, 400.0),
            (OneSide, OneSide, 245.0, 345.0),
            (OneSide, Unprotected, 245.0, 290.0),
            (Unprotected, TwoSides, 208.0, 400.0),
            (Unprotected, OneSide, 190.0, 345.0),
            (Unprotected, Unprotected, 190.0, 290.0),
        ];
        // CLT E, 60 min: xco = 39 > 38 becomes xcn = 48, so every loss is 55
        let clt = [
            (TwoSides, TwoSides, 300.0, 400.0),
            (TwoSides, OneSide, 300.0, 345.0),
            (TwoSides, Unprotected, 300.0, 290.0),
            (OneSide, TwoSides, 245.0, 400.0),
            (OneSide, OneSide, 245.0, 345.0),
            (OneSide, Unprotected, 245.0, 290.0),
            (Unprotected, TwoSides, 190.0, 400.0),
            (Unprotected, OneSide, 190.0, 345.0),
            (Unprotected, Unprotected, 190.0, 290.0),
        ];

        for (product, table) in [(FireProduct::SawnLumber, sawn), (FireProduct::CltE, clt)] {
            let mut seen = 0;
            for wide in FaceProtection::ALL {
                for narrow in FaceProtection::ALL {
                    let (_, _, b, d) = table
                        .iter()
                        .copied()
                        .find(|(w, n, _, _)| *w == wide && *n == narrow)
                        .unwrap();
                    let s = effective_section(&input(60.0, 300.0, 400.0, wide, narrow, product)).unwrap();
                    assert_relative_eq!(s.width_mm, b, max_relative = 1e-12);
                    assert_relative_eq!(s.depth_mm, d, max_relative = 1e-12);
                    seen += 1;
                }
            }
            assert_eq!(seen, 9);
        }
    }

    #[test]
    fn test_from_str_flexible() {
        assert_eq!(FaceProtection::from_str_flexible("2_faces").unwrap(), FaceProtection::TwoSides);
        assert_eq!(FaceProtection::from_str_flexible("one side").unwrap(), FaceProtection::OneSide);
        assert_eq!(FireProduct::from_str_flexible("GLT").unwrap(), FireProduct::Glulam);
        assert_eq!(FireProduct::from_str_flexible("clt_e1_e2_e3").unwrap(), FireProduct::CltE);
        assert!(FireProduct::from_str_flexible("steel").is_err());
    }
}
