//! # Design Checks
//!
//! Every check follows the same pattern:
//!
//! - `*Input` - input parameters (JSON-serializable)
//! - `*Result` - results (JSON-serializable, `Display` for terminal output)
//! - a pure function taking the input, and a `&dyn PropertyStore` when
//!   reference tables are needed
//!
//! ## Available Checks
//!
//! - [`general`] - limit states (5.1) and net section (5.3.8)
//! - [`serviceability`] - modulus, deflection, ponding, moisture (5.4), bracing (5.5)
//! - [`vibration`] - floor vibration span limit (5.4.5)
//! - [`fire`] - effective section after fire exposure (5.6, Annex B)
//! - [`sawn_lumber`] - sawn lumber resistances (6.5)
//!
//! [`CalculationItem`] wraps any of them so a project can store a mixed,
//! ordered list and evaluate it in one pass.

pub mod fire;
pub mod general;
pub mod sawn_lumber;
pub mod serviceability;
pub mod vibration;

use serde::{Deserialize, Serialize};

use crate::errors::CalcResult;
use crate::factors::{self, o86_ref, DurationLoads, FactorConditions, LoadDuration, ModificationFactors, StrengthProperty};
use crate::materials::sawn_lumber::{lumber_category, specified_strengths};
use crate::materials::{LumberCategory, LumberStrengths, PropertyStore, SpeciesGroup};

pub use fire::{EffectiveSection, FireSectionInput};
pub use general::{CrossSectionInput, CrossSectionResult, LimitStateInput, LimitStateResult};
pub use sawn_lumber::{MemberInput, MemberResult, Resistances};
pub use serviceability::{
    DeflectionInput, DeflectionResult, ElasticityInput, LateralBraceInput, MoistureInput, PondingInput,
    PondingResult,
};
pub use vibration::{FloorVibrationInput, VibrationResult};

// ============================================================================
// Clause 6 Lookups
// ============================================================================

/// Load duration factor request (5.3.2)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct LoadDurationInput {
    #[serde(default)]
    pub duration: LoadDuration,
    #[serde(default)]
    pub loads: DurationLoads,
}

/// Lumber category request (6.2)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryInput {
    pub width_mm: f64,
    pub depth_mm: f64,
    #[serde(default)]
    pub msr: bool,
    #[serde(default)]
    pub mel: bool,
}

/// Specified strengths request (6.3)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrengthsInput {
    pub category: LumberCategory,
    pub species: SpeciesGroup,
    pub grade: String,
    /// Beam or stringer loaded on its wide face
    #[serde(default)]
    pub wide_face_loading: bool,
}

/// Modification factors request (6.4)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactorsInput {
    pub width_mm: f64,
    pub depth_mm: f64,
    pub property: StrengthProperty,
    pub category: LumberCategory,
    #[serde(default)]
    pub conditions: FactorConditions,
}

// ============================================================================
// Calculation Item
// ============================================================================

/// Enum wrapper for all check types.
///
/// This allows storing heterogeneous checks in a single collection while
/// keeping clean, tagged serialization.
///
/// ## JSON Example
///
/// ```json
/// { "type": "CrossSection", "net": 7200.0, "gross": 9000.0 }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationItem {
    LimitStates(LimitStateInput),
    LoadDuration(LoadDurationInput),
    CrossSection(CrossSectionInput),
    Elasticity(ElasticityInput),
    Deflection(DeflectionInput),
    Ponding(PondingInput),
    Vibration(FloorVibrationInput),
    Moisture(MoistureInput),
    LateralBrace(LateralBraceInput),
    FireSection(FireSectionInput),
    LumberCategory(CategoryInput),
    SpecifiedStrengths(StrengthsInput),
    ModificationFactors(FactorsInput),
    SawnLumber(MemberInput),
}

impl CalculationItem {
    /// Get the check type as a string
    pub fn calc_type(&self) -> &'static str {
        match self {
            CalculationItem::LimitStates(_) => "LimitStates",
            CalculationItem::LoadDuration(_) => "LoadDuration",
            CalculationItem::CrossSection(_) => "CrossSection",
            CalculationItem::Elasticity(_) => "Elasticity",
            CalculationItem::Deflection(_) => "Deflection",
            CalculationItem::Ponding(_) => "Ponding",
            CalculationItem::Vibration(_) => "Vibration",
            CalculationItem::Moisture(_) => "Moisture",
            CalculationItem::LateralBrace(_) => "LateralBrace",
            CalculationItem::FireSection(_) => "FireSection",
            CalculationItem::LumberCategory(_) => "LumberCategory",
            CalculationItem::SpecifiedStrengths(_) => "SpecifiedStrengths",
            CalculationItem::ModificationFactors(_) => "ModificationFactors",
            CalculationItem::SawnLumber(_) => "SawnLumber",
        }
    }

    /// Code clause the check implements
    pub fn clause(&self) -> &'static str {
        use serviceability::DeflectionKind;
        use vibration::FloorSystem;

        match self {
            CalculationItem::LimitStates(_) => o86_ref::LIMIT_STATES,
            CalculationItem::LoadDuration(_) => o86_ref::K_D,
            CalculationItem::CrossSection(_) => o86_ref::CROSS_SECTION,
            CalculationItem::Elasticity(_) => o86_ref::ELASTICITY,
            CalculationItem::Deflection(d) => match d.kind {
                DeflectionKind::Elastic => o86_ref::DEFLECTION,
                DeflectionKind::Permanent => o86_ref::PERMANENT_DEFORMATION,
            },
            CalculationItem::Ponding(_) => o86_ref::PONDING,
            CalculationItem::Vibration(v) => match v.system {
                FloorSystem::Joist(_) => o86_ref::VIBRATION_JOIST,
                FloorSystem::CrossLaminated(_) => o86_ref::VIBRATION_CLT,
            },
            CalculationItem::Moisture(_) => o86_ref::MOISTURE,
            CalculationItem::LateralBrace(_) => o86_ref::LATERAL_BRACE,
            CalculationItem::FireSection(_) => o86_ref::FIRE_SECTION,
            CalculationItem::LumberCategory(_) => o86_ref::LUMBER_CATEGORY,
            CalculationItem::SpecifiedStrengths(_) => o86_ref::SPECIFIED_STRENGTHS,
            CalculationItem::ModificationFactors(_) => o86_ref::MODIFICATION_FACTORS,
            CalculationItem::SawnLumber(m) => m.check.clause(),
        }
    }

    /// Run the check.
    pub fn evaluate(&self, store: &dyn PropertyStore) -> CalcResult<CalculationOutcome> {
        let outcome = match self {
            CalculationItem::LimitStates(i) => {
                CalculationOutcome::LimitStates(general::limit_states(i.load, i.resistance))
            }
            CalculationItem::LoadDuration(i) => CalculationOutcome::LoadDuration {
                kd: factors::load_duration(i.duration, i.loads),
            },
            CalculationItem::CrossSection(i) => {
                CalculationOutcome::CrossSection(general::cross_section(i.net, i.gross)?)
            }
            CalculationItem::Elasticity(i) => CalculationOutcome::Elasticity {
                es: serviceability::elasticity(i.modulus, i.service, i.treatment),
            },
            CalculationItem::Deflection(i) => CalculationOutcome::Deflection(serviceability::deflection(i)?),
            CalculationItem::Ponding(i) => CalculationOutcome::Ponding(serviceability::ponding(i)?),
            CalculationItem::Vibration(i) => CalculationOutcome::Vibration(vibration::evaluate(i, store)?),
            CalculationItem::Moisture(i) => CalculationOutcome::Moisture {
                movement_mm: serviceability::moisture(i),
            },
            CalculationItem::LateralBrace(i) => CalculationOutcome::LateralBrace {
                force_kn: serviceability::lateral_brace(i.force_kn),
            },
            CalculationItem::FireSection(i) => CalculationOutcome::FireSection(fire::effective_section(i)?),
            CalculationItem::LumberCategory(i) => CalculationOutcome::LumberCategory {
                category: lumber_category(i.width_mm, i.depth_mm, i.msr, i.mel)?,
            },
            CalculationItem::SpecifiedStrengths(i) => CalculationOutcome::SpecifiedStrengths(specified_strengths(
                store,
                i.category,
                i.species,
                &i.grade,
                i.wide_face_loading,
            )?),
            CalculationItem::ModificationFactors(i) => {
                CalculationOutcome::ModificationFactors(factors::modification_factors(
                    i.width_mm,
                    i.depth_mm,
                    i.property,
                    i.category,
                    &i.conditions,
                ))
            }
            CalculationItem::SawnLumber(i) => CalculationOutcome::SawnLumber(sawn_lumber::calculate(i)?),
        };
        Ok(outcome)
    }
}

// ============================================================================
// Outcome
// ============================================================================

/// Result of any [`CalculationItem`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationOutcome {
    LimitStates(LimitStateResult),
    LoadDuration { kd: f64 },
    CrossSection(CrossSectionResult),
    Elasticity { es: f64 },
    Deflection(DeflectionResult),
    Ponding(PondingResult),
    Vibration(VibrationResult),
    Moisture { movement_mm: f64 },
    LateralBrace { force_kn: f64 },
    FireSection(EffectiveSection),
    LumberCategory { category: LumberCategory },
    SpecifiedStrengths(LumberStrengths),
    ModificationFactors(ModificationFactors),
    SawnLumber(MemberResult),
}

impl CalculationOutcome {
    /// Pass/fail verdict, `None` for checks that only compute a value
    pub fn passes(&self) -> Option<bool> {
        match self {
            CalculationOutcome::LimitStates(r) => r.passes(),
            CalculationOutcome::CrossSection(r) => Some(r.passes),
            CalculationOutcome::Deflection(r) => Some(r.passes),
            CalculationOutcome::Ponding(r) => Some(r.passes),
            CalculationOutcome::Vibration(r) => Some(r.passes),
            CalculationOutcome::SawnLumber(r) => r.passes(),
            _ => None,
        }
    }
}

impl std::fmt::Display for CalculationOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CalculationOutcome::LimitStates(r) => write!(f, "{r}"),
            CalculationOutcome::LoadDuration { kd } => write!(f, "Kd = {kd:.3}"),
            CalculationOutcome::CrossSection(r) => write!(f, "{r}"),
            CalculationOutcome::Elasticity { es } => write!(f, "Es = {es:.0} MPa"),
            CalculationOutcome::Deflection(r) => write!(f, "{r}"),
            CalculationOutcome::Ponding(r) => write!(f, "{r}"),
            CalculationOutcome::Vibration(r) => write!(f, "{r}"),
            CalculationOutcome::Moisture { movement_mm } => {
                if *movement_mm >= 0.0 {
                    write!(f, "Shrinkage = {movement_mm:.2} mm")
                } else {
                    write!(f, "Swelling = {:.2} mm", -movement_mm)
                }
            }
            CalculationOutcome::LateralBrace { force_kn } => write!(f, "Bracing force = {force_kn:.3} kN"),
            CalculationOutcome::FireSection(r) => write!(f, "{r}"),
            CalculationOutcome::LumberCategory { category } => {
                write!(f, "Category: {} ({category})", category.display_name())
            }
            CalculationOutcome::SpecifiedStrengths(s) => write!(
                f,
                "fb = {} MPa, fv = {} MPa, fc = {} MPa, fcp = {} MPa, ft = {} MPa, E = {} MPa, E05 = {} MPa",
                s.fb, s.fv, s.fc, s.fcp, s.ft, s.e, s.e05
            ),
            CalculationOutcome::ModificationFactors(m) => write!(
                f,
                "Kd = {}, Ks = {}, Kt = {}, Kh = {}, Kz = {}",
                m.kd, m.ks, m.kt, m.kh, m.kz
            ),
            CalculationOutcome::SawnLumber(r) => write!(f, "{r}"),
        }
    }
}
