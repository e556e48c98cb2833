//! Sawn Lumber Materials (CSA O86 6.2 and 6.3)
//!
//! Category classification from member dimensions and specified strengths
//! from Tables 6.3 to 6.9. Strength rows come from a [`PropertyStore`];
//! the only adjustment applied here is the wide-face reduction for beams
//! and stringers (Table 6.5 notes).

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::materials::PropertyStore;

/// Smallest dimension accepted by 6.2 (mm)
pub const MIN_DIMENSION_MM: f64 = 38.0;

/// Above this large-face dimension, supply should be confirmed (mm)
pub const AVAILABILITY_LIMIT_MM: f64 = 412.0;

/// Lumber category per 6.2, selecting the strength table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LumberCategory {
    /// Structural joists and planks (Table 6.3)
    Lumber,
    /// Light framing (Table 6.4)
    Light,
    /// Beams and stringers (Table 6.5)
    Beam,
    /// Posts and timbers (Table 6.6)
    Post,
    /// Machine stress-rated lumber (Table 6.8)
    #[serde(rename = "MSR")]
    Msr,
    /// Machine-evaluated lumber (Table 6.9)
    #[serde(rename = "MEL")]
    Mel,
}

impl LumberCategory {
    /// All categories for menu selection
    pub const ALL: [LumberCategory; 6] = [
        LumberCategory::Lumber,
        LumberCategory::Light,
        LumberCategory::Beam,
        LumberCategory::Post,
        LumberCategory::Msr,
        LumberCategory::Mel,
    ];

    /// Table key for this category
    pub fn code(&self) -> &'static str {
        match self {
            LumberCategory::Lumber => "Lumber",
            LumberCategory::Light => "Light",
            LumberCategory::Beam => "Beam",
            LumberCategory::Post => "Post",
            LumberCategory::Msr => "MSR",
            LumberCategory::Mel => "MEL",
        }
    }

    /// MSR and MEL values do not depend on the species group
    pub fn is_machine_graded(&self) -> bool {
        matches!(self, LumberCategory::Msr | LumberCategory::Mel)
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "lumber" | "joist" | "plank" => Ok(LumberCategory::Lumber),
            "light" | "light framing" => Ok(LumberCategory::Light),
            "beam" | "stringer" => Ok(LumberCategory::Beam),
            "post" | "timber" => Ok(LumberCategory::Post),
            "msr" => Ok(LumberCategory::Msr),
            "mel" => Ok(LumberCategory::Mel),
            _ => Err(CalcError::unknown_selection("lumber category", s)),
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            LumberCategory::Lumber => "Structural joists and planks",
            LumberCategory::Light => "Light framing",
            LumberCategory::Beam => "Beams and stringers",
            LumberCategory::Post => "Posts and timbers",
            LumberCategory::Msr => "Machine stress-rated",
            LumberCategory::Mel => "Machine-evaluated",
        }
    }
}

impl std::fmt::Display for LumberCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Species combinations of the visually graded tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpeciesGroup {
    /// Douglas fir-larch
    #[serde(rename = "df")]
    DouglasFirLarch,
    /// Hem-fir
    #[serde(rename = "hf")]
    HemFir,
    /// Spruce-pine-fir
    #[serde(rename = "spf")]
    SprucePineFir,
    /// Northern species
    #[serde(rename = "ns")]
    Northern,
}

impl SpeciesGroup {
    /// All species groups for menu selection
    pub const ALL: [SpeciesGroup; 4] = [
        SpeciesGroup::DouglasFirLarch,
        SpeciesGroup::HemFir,
        SpeciesGroup::SprucePineFir,
        SpeciesGroup::Northern,
    ];

    /// Table key
    pub fn code(&self) -> &'static str {
        match self {
            SpeciesGroup::DouglasFirLarch => "df",
            SpeciesGroup::HemFir => "hf",
            SpeciesGroup::SprucePineFir => "spf",
            SpeciesGroup::Northern => "ns",
        }
    }

    /// Key of the strength row for a category. Machine-graded rows are
    /// shared by every species group.
    pub fn table_key(&self, category: LumberCategory) -> &'static str {
        if category.is_machine_graded() {
            "normal"
        } else {
            self.code()
        }
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.trim().to_lowercase().replace([' ', '_'], "-").as_str() {
            "df" | "d-fir-l" | "douglas-fir-larch" | "dfl" | "df-l" => Ok(SpeciesGroup::DouglasFirLarch),
            "hf" | "hem-fir" | "h-f" => Ok(SpeciesGroup::HemFir),
            "spf" | "s-p-f" | "spruce-pine-fir" => Ok(SpeciesGroup::SprucePineFir),
            "ns" | "northern" | "northern-species" => Ok(SpeciesGroup::Northern),
            _ => Err(CalcError::unknown_selection("species group", s)),
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            SpeciesGroup::DouglasFirLarch => "D.Fir-L",
            SpeciesGroup::HemFir => "Hem-Fir",
            SpeciesGroup::SprucePineFir => "S-P-F",
            SpeciesGroup::Northern => "Northern",
        }
    }
}

impl std::fmt::Display for SpeciesGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Specified strengths and moduli (MPa)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LumberStrengths {
    /// Bending at extreme fibre fb
    pub fb: f64,
    /// Longitudinal shear fv
    pub fv: f64,
    /// Compression parallel to grain fc
    pub fc: f64,
    /// Compression perpendicular to grain fcp
    pub fcp: f64,
    /// Tension parallel to grain ft
    pub ft: f64,
    /// Modulus of elasticity E
    pub e: f64,
    /// Modulus of elasticity for compression members E05
    pub e05: f64,
}

/// Classify a member by its dimensions (6.2).
///
/// # Example
///
/// ```rust
/// use o86_core::materials::sawn_lumber::{lumber_category, LumberCategory};
///
/// assert_eq!(lumber_category(38.0, 140.0, false, false).unwrap(), LumberCategory::Lumber);
/// assert_eq!(lumber_category(140.0, 241.0, false, false).unwrap(), LumberCategory::Beam);
/// ```
pub fn lumber_category(width_mm: f64, depth_mm: f64, msr: bool, mel: bool) -> CalcResult<LumberCategory> {
    let small = width_mm.min(depth_mm);
    let large = width_mm.max(depth_mm);

    if small < MIN_DIMENSION_MM {
        return Err(CalcError::invalid_input(
            "width_mm",
            small.to_string(),
            "Sawn lumber dimensions cannot be smaller than 38 mm",
        ));
    }

    if large > AVAILABILITY_LIMIT_MM {
        tracing::warn!(large_mm = large, "confirm availability of lumber this size with suppliers");
    }

    let category = if msr {
        LumberCategory::Msr
    } else if mel {
        LumberCategory::Mel
    } else if small < 89.0 && large < 89.0 {
        LumberCategory::Light
    } else if small >= 114.0 {
        if large - small >= 51.0 {
            LumberCategory::Beam
        } else {
            LumberCategory::Post
        }
    } else {
        LumberCategory::Lumber
    };

    Ok(category)
}

/// Specified strengths for a category, species group and grade (6.3).
///
/// When a beam or stringer is loaded on its wide face, fb is reduced
/// (0.88 for select structural, 0.77 otherwise) and for grades other than
/// select structural both moduli are reduced by 0.9.
pub fn specified_strengths(
    store: &dyn PropertyStore,
    category: LumberCategory,
    species: SpeciesGroup,
    grade: &str,
    wide_face_loading: bool,
) -> CalcResult<LumberStrengths> {
    let grade = grade.trim().to_lowercase();
    let mut strengths = store.lumber_strength(category, species.table_key(category), &grade)?;

    if wide_face_loading && category == LumberCategory::Beam {
        if grade == "ss" {
            strengths.fb *= 0.88;
        } else {
            strengths.fb *= 0.77;
            strengths.e *= 0.9;
            strengths.e05 *= 0.9;
        }
    }

    tracing::debug!(%category, %species, grade = %grade, ?strengths, "specified strengths");
    Ok(strengths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::fixtures::FixtureStore;
    use approx::assert_relative_eq;

    fn beam_store() -> FixtureStore {
        let ss = LumberStrengths { fb: 13.6, fv: 1.2, fc: 9.5, fcp: 5.3, ft: 7.0, e: 8500.0, e05: 6000.0 };
        let n1 = LumberStrengths { fb: 11.0, fv: 1.2, fc: 7.9, fcp: 5.3, ft: 5.2, e: 8500.0, e05: 6000.0 };
        let msr = LumberStrengths { fb: 17.4, fv: 1.5, fc: 15.3, fcp: 5.3, ft: 6.7, e: 8300.0, e05: 7100.0 };
        FixtureStore::default()
            .with_strength(LumberCategory::Beam, "spf", "ss", ss)
            .with_strength(LumberCategory::Beam, "spf", "n1", n1)
            .with_strength(LumberCategory::Msr, "normal", "1200-1.2", msr)
    }

    #[test]
    fn test_category_boundaries() {
        assert_eq!(lumber_category(38.0, 140.0, false, false).unwrap(), LumberCategory::Lumber);
        assert_eq!(lumber_category(38.0, 64.0, false, false).unwrap(), LumberCategory::Light);
        assert_eq!(lumber_category(89.0, 89.0, false, false).unwrap(), LumberCategory::Lumber);
        assert_eq!(lumber_category(140.0, 191.0, false, false).unwrap(), LumberCategory::Beam);
        assert_eq!(lumber_category(140.0, 190.0, false, false).unwrap(), LumberCategory::Post);
        assert_eq!(lumber_category(191.0, 191.0, false, false).unwrap(), LumberCategory::Post);
    }

    #[test]
    fn test_machine_grading_overrides_dimensions() {
        assert_eq!(lumber_category(140.0, 241.0, false, true).unwrap(), LumberCategory::Mel);
        assert_eq!(lumber_category(140.0, 241.0, true, true).unwrap(), LumberCategory::Msr);
    }

    #[test]
    fn test_too_small_is_rejected() {
        let err = lumber_category(19.0, 140.0, false, false).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_strength_lookup_narrow_face() {
        let store = beam_store();
        let s = specified_strengths(&store, LumberCategory::Beam, SpeciesGroup::SprucePineFir, "SS", false).unwrap();
        assert_eq!(s.fb, 13.6);
        assert_eq!(s.e, 8500.0);
    }

    #[test]
    fn test_wide_face_reduction() {
        let store = beam_store();
        let ss = specified_strengths(&store, LumberCategory::Beam, SpeciesGroup::SprucePineFir, "ss", true).unwrap();
        assert_relative_eq!(ss.fb, 13.6 * 0.88);
        assert_eq!(ss.e05, 6000.0);

        let n1 = specified_strengths(&store, LumberCategory::Beam, SpeciesGroup::SprucePineFir, "n1", true).unwrap();
        assert_relative_eq!(n1.fb, 11.0 * 0.77);
        assert_relative_eq!(n1.e, 8500.0 * 0.9);
        assert_relative_eq!(n1.e05, 6000.0 * 0.9);
    }

    #[test]
    fn test_machine_graded_ignores_species() {
        let store = beam_store();
        let s = specified_strengths(&store, LumberCategory::Msr, SpeciesGroup::HemFir, "1200-1.2", false).unwrap();
        assert_eq!(s.fb, 17.4);
    }

    #[test]
    fn test_unknown_grade_is_not_found() {
        let store = beam_store();
        let err = specified_strengths(&store, LumberCategory::Beam, SpeciesGroup::SprucePineFir, "n7", false)
            .unwrap_err();
        assert_eq!(err.error_code(), "PROPERTY_NOT_FOUND");
    }

    #[test]
    fn test_species_parsing() {
        assert_eq!(SpeciesGroup::from_str_flexible("S-P-F").unwrap(), SpeciesGroup::SprucePineFir);
        assert_eq!(SpeciesGroup::from_str_flexible("Douglas Fir Larch").unwrap(), SpeciesGroup::DouglasFirLarch);
        assert!(SpeciesGroup::from_str_flexible("balsa").is_err());
    }

    #[test]
    fn test_category_serialization() {
        assert_eq!(serde_json::to_string(&LumberCategory::Msr).unwrap(), "\"MSR\"");
        let c: LumberCategory = serde_json::from_str("\"Beam\"").unwrap();
        assert_eq!(c, LumberCategory::Beam);
    }
}
