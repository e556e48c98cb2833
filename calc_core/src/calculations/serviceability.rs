//! # Serviceability (CSA O86 5.4 and 5.5)
//!
//! Deflection ratios, ponding, moisture movement and the lateral bracing
//! force for compression webs of trusses. Floor vibration (5.4.5) has its
//! own module, [`super::vibration`].
//!
//! Spans and deflections are in millimeters, ponding load in kPa, forces in kN.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Elastic deflection limit, L/180 (5.4.2)
pub const ELASTIC_DEFLECTION_LIMIT: f64 = 180.0;

/// Permanent deformation limit, L/360 (5.4.3)
pub const PERMANENT_DEFORMATION_LIMIT: f64 = 360.0;

/// Ponding criterion on Σδ / w (mm/kPa) (5.4.4)
pub const PONDING_LIMIT: f64 = 65.0;

/// Moisture content above which no further swelling occurs (%)
pub const FIBRE_SATURATION: f64 = 28.0;

// ============================================================================
// 5.4.1 Modulus of Elasticity
// ============================================================================

/// Input for the serviceability modulus.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElasticityInput {
    /// Specified modulus E (MPa)
    pub modulus: f64,
    /// Service condition factor KSE
    pub service: f64,
    /// Treatment factor KT
    pub treatment: f64,
}

/// Modulus of elasticity for serviceability, Es = E × (Ks × Kt)
pub fn elasticity(modulus: f64, service: f64, treatment: f64) -> f64 {
    modulus * (service * treatment)
}

// ============================================================================
// 5.4.2 / 5.4.3 Deflection
// ============================================================================

/// Which deflection criterion is checked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DeflectionKind {
    /// Elastic deflection under specified loads, L/180
    #[default]
    Elastic,
    /// Permanent deformation under long-term loads, L/360
    Permanent,
}

impl DeflectionKind {
    pub fn limit(&self) -> f64 {
        match self {
            DeflectionKind::Elastic => ELASTIC_DEFLECTION_LIMIT,
            DeflectionKind::Permanent => PERMANENT_DEFORMATION_LIMIT,
        }
    }
}

/// Input for a deflection ratio check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeflectionInput {
    #[serde(default)]
    pub kind: DeflectionKind,
    /// Span (mm)
    pub span_mm: f64,
    /// Computed deflection (mm)
    pub deflection_mm: f64,
}

impl DeflectionInput {
    pub fn validate(&self) -> CalcResult<()> {
        if self.span_mm <= 0.0 {
            return Err(CalcError::invalid_input("span_mm", self.span_mm.to_string(), "Span must be positive"));
        }
        if self.deflection_mm <= 0.0 {
            return Err(CalcError::invalid_input(
                "deflection_mm",
                self.deflection_mm.to_string(),
                "Deflection must be positive",
            ));
        }
        Ok(())
    }
}

/// Result of a deflection ratio check
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeflectionResult {
    pub kind: DeflectionKind,
    /// L/Δ
    pub ratio: f64,
    /// Required L/Δ
    pub limit: f64,
    pub passes: bool,
}

impl std::fmt::Display for DeflectionResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let what = match self.kind {
            DeflectionKind::Elastic => "Deflection",
            DeflectionKind::Permanent => "Permanent deformation",
        };
        let verdict = if self.passes { "valid" } else { "not valid" };
        write!(f, "{what} criterion {verdict}: L/{} (limit L/{})", self.ratio.trunc(), self.limit)
    }
}

/// Check L/Δ against the limit for the given kind.
pub fn deflection(input: &DeflectionInput) -> CalcResult<DeflectionResult> {
    input.validate()?;
    let ratio = input.span_mm / input.deflection_mm;
    let limit = input.kind.limit();
    Ok(DeflectionResult {
        kind: input.kind,
        ratio,
        limit,
        passes: ratio >= limit,
    })
}

/// Elastic deflection check, L/180 (5.4.2)
pub fn elastic_deflection(span_mm: f64, deflection_mm: f64) -> CalcResult<DeflectionResult> {
    deflection(&DeflectionInput {
        kind: DeflectionKind::Elastic,
        span_mm,
        deflection_mm,
    })
}

/// Permanent deformation check, L/360 (5.4.3)
pub fn permanent_deformation(span_mm: f64, deflection_mm: f64) -> CalcResult<DeflectionResult> {
    deflection(&DeflectionInput {
        kind: DeflectionKind::Permanent,
        span_mm,
        deflection_mm,
    })
}

// ============================================================================
// 5.4.4 Ponding
// ============================================================================

/// Input for the ponding check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PondingInput {
    /// Total specified uniformly distributed load (kPa)
    pub load_kpa: f64,
    /// Deflection of each member of the roof system under that load (mm)
    pub deflections_mm: Vec<f64>,
}

/// Result of the ponding check
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PondingResult {
    /// Σδ / w (mm/kPa)
    pub ratio: f64,
    /// When false a rational analysis of ponding is required
    pub passes: bool,
}

impl std::fmt::Display for PondingResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.passes {
            write!(f, "Ponding condition satisfied: {:.2} < {PONDING_LIMIT}", self.ratio)
        } else {
            write!(
                f,
                "Rational analysis for ponding required: {:.2} >= {PONDING_LIMIT}",
                self.ratio
            )
        }
    }
}

/// Ponding is not a concern when Σδ / w < 65 (5.4.4).
pub fn ponding(input: &PondingInput) -> CalcResult<PondingResult> {
    if input.load_kpa <= 0.0 {
        return Err(CalcError::invalid_input("load_kpa", input.load_kpa.to_string(), "Load must be positive"));
    }
    if input.deflections_mm.is_empty() {
        return Err(CalcError::missing_field("deflections_mm"));
    }
    if let Some(d) = input.deflections_mm.iter().find(|d| **d < 0.0) {
        return Err(CalcError::invalid_input("deflections_mm", d.to_string(), "Deflections cannot be negative"));
    }
    let total: f64 = input.deflections_mm.iter().sum();
    let ratio = total / input.load_kpa;
    Ok(PondingResult {
        ratio,
        passes: ratio < PONDING_LIMIT,
    })
}

// ============================================================================
// 5.4.6 Moisture Movement
// ============================================================================

/// Direction of the dimension relative to grain, with its shrinkage coefficient
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "direction", content = "coefficient", rename_all = "snake_case")]
pub enum GrainDirection {
    /// Across the grain: 0.002 per % moisture content
    #[default]
    Perpendicular,
    /// Along the grain: 0.00005 per % moisture content
    Parallel,
    /// Any other product with a known coefficient
    Custom(f64),
}

impl GrainDirection {
    pub fn coefficient(&self) -> f64 {
        match self {
            GrainDirection::Perpendicular => 0.002,
            GrainDirection::Parallel => 0.00005,
            GrainDirection::Custom(c) => *c,
        }
    }
}

/// Input for the moisture movement estimate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoistureInput {
    /// Actual dimension (mm)
    pub dimension_mm: f64,
    /// Initial moisture content (%)
    pub initial_mc: f64,
    /// Final moisture content (%)
    pub final_mc: f64,
    #[serde(default)]
    pub direction: GrainDirection,
}

/// Shrinkage (positive) or swelling (negative) of a dimension (mm), 5.4.6.
///
/// Moisture contents above fibre saturation are capped at 28 %.
///
/// # Example
///
/// ```rust
/// use o86_core::calculations::serviceability::{moisture, GrainDirection, MoistureInput};
///
/// let s = moisture(&MoistureInput {
///     dimension_mm: 235.0,
///     initial_mc: 19.0,
///     final_mc: 9.0,
///     direction: GrainDirection::Perpendicular,
/// });
/// assert!((s - 4.7).abs() < 1e-9);
/// ```
pub fn moisture(input: &MoistureInput) -> f64 {
    let mi = input.initial_mc.min(FIBRE_SATURATION);
    let mf = input.final_mc.min(FIBRE_SATURATION);
    input.dimension_mm * (mi - mf) * input.direction.coefficient()
}

// ============================================================================
// 5.5 Lateral Bracing of Truss Compression Webs
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LateralBraceInput {
    /// Factored axial force in the braced web (kN)
    pub force_kn: f64,
}

/// Bracing force for a compression web member (kN): 1.25 % of the axial force
pub fn lateral_brace(force_kn: f64) -> f64 {
    0.0125 * force_kn
}
