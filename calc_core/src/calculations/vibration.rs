//! # Floor Vibration (CSA O86 5.4.5, A.5.4.5 and A.8.5.3)
//!
//! Vibration-controlled span limit for two floor systems:
//!
//! - **Joist floors**: sawn, I-joist or truss joists under a subfloor panel,
//!   optionally with a concrete or panel topping. The composite stiffness
//!   EIeff accounts for partial composite action through the subfloor
//!   connection (A.5.4.5).
//! - **Cross-laminated timber**: the empirical CLT span formula (A.8.5.3).
//!
//! The engine works in SI: meters, newtons, kilograms. Table A.1 panel
//! thickness is stored in millimeters and converted on the way in. CLT
//! stiffness is the only exception and is given in N·mm², as it is tabulated
//! by manufacturers.
//!
//! ## Example
//!
//! ```rust
//! use o86_core::calculations::vibration::{evaluate, CltPanel, FloorSystem, FloorVibrationInput};
//! use o86_core::materials::{TableStore, Topping};
//!
//! let input = FloorVibrationInput {
//!     span_m: 5.0,
//!     multiple_span: true,
//!     topping: Topping::None,
//!     system: FloorSystem::CrossLaminated(CltPanel {
//!         bending_stiffness: 6.5e12,
//!         linear_mass: 1000.0,
//!     }),
//! };
//!
//! let result = evaluate(&input, TableStore::builtin().unwrap()).unwrap();
//! assert!((result.max_span_m - 5.449).abs() < 1e-3);
//! assert!(result.passes);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::materials::panels::CONCRETE_DENSITY;
use crate::materials::{PropertyStore, SubfloorPanel, Topping, ToppingProperties};

/// Default joist spacing, 16" on center (m)
pub const DEFAULT_JOIST_SPACING_M: f64 = 0.4064;

/// Fastener slip modulus for nailed subfloors (N/m/m)
const SLIP_MODULUS_NAILED: f64 = 5e6;

/// Fastener slip modulus for glued subfloors without topping (N/m/m)
const SLIP_MODULUS_GLUED: f64 = 1e8;

/// Distance between panel joints perpendicular to the joists (m), used when
/// there is no topping
const PANEL_JOINT_SPACING_M: f64 = 1.2192;

/// Span increase for continuous floors
const CONTINUITY_FACTOR: f64 = 1.2;

/// Span increase for bracing or a gypsum ceiling
const DETAILING_BONUS: f64 = 1.05;

/// Upper bound on the CLT span for multiple-span floors (m)
const CLT_MULTI_SPAN_CAP_M: f64 = 8.0;

// ============================================================================
// Input Types
// ============================================================================

/// Joist floor construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoistSystem {
    /// Table A.1 panel identifier, e.g. "CSP 5/8"
    pub subfloor: String,
    /// Subfloor glued and nailed to the joists
    #[serde(default)]
    pub glued: bool,
    /// Cross bracing or blocking at mid-span
    #[serde(default)]
    pub bracing: bool,
    /// Gypsum ceiling attached directly to the joists
    #[serde(default)]
    pub gypsum: bool,
    /// Joist bending stiffness EIj (N·m²)
    pub bending_stiffness: f64,
    /// Joist axial stiffness EAj (N)
    pub axial_stiffness: f64,
    /// Joist depth (m)
    pub depth_m: f64,
    /// Joist linear mass (kg/m)
    pub mass: f64,
    /// Joist spacing b1 (m)
    #[serde(default = "default_spacing")]
    pub spacing_m: f64,
}

fn default_spacing() -> f64 {
    DEFAULT_JOIST_SPACING_M
}

/// CLT floor panel properties, per meter of width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CltPanel {
    /// Effective bending stiffness (EI)eff,f (N·mm²)
    pub bending_stiffness: f64,
    /// Linear mass of the panel (kg/m)
    pub linear_mass: f64,
}

/// Floor construction type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method")]
pub enum FloorSystem {
    Joist(JoistSystem),
    CrossLaminated(CltPanel),
}

/// Flat parameter set as collected by a prompt or a loose JSON object.
///
/// [`FloorSystem::from_parameters`] picks the CLT path when a CLT stiffness
/// or mass is given, and the joist path otherwise.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FloorParameters {
    pub subfloor: String,
    pub glued: bool,
    pub bracing: bool,
    pub gypsum: bool,
    pub joist_bending_stiffness: f64,
    pub joist_axial_stiffness: f64,
    pub joist_depth_m: f64,
    pub joist_mass: f64,
    pub joist_spacing_m: Option<f64>,
    pub clt_bending_stiffness: f64,
    pub clt_mass: f64,
}

impl FloorSystem {
    /// Apply the joist/CLT dispatch rule to a flat parameter set.
    pub fn from_parameters(params: &FloorParameters) -> Self {
        if params.clt_bending_stiffness > 0.0 || params.clt_mass > 0.0 {
            FloorSystem::CrossLaminated(CltPanel {
                bending_stiffness: params.clt_bending_stiffness,
                linear_mass: params.clt_mass,
            })
        } else {
            FloorSystem::Joist(JoistSystem {
                subfloor: params.subfloor.clone(),
                glued: params.glued,
                bracing: params.bracing,
                gypsum: params.gypsum,
                bending_stiffness: params.joist_bending_stiffness,
                axial_stiffness: params.joist_axial_stiffness,
                depth_m: params.joist_depth_m,
                mass: params.joist_mass,
                spacing_m: params.joist_spacing_m.unwrap_or(DEFAULT_JOIST_SPACING_M),
            })
        }
    }

    pub fn method(&self) -> VibrationMethod {
        match self {
            FloorSystem::Joist(_) => VibrationMethod::Joist,
            FloorSystem::CrossLaminated(_) => VibrationMethod::CrossLaminated,
        }
    }
}

/// Input for the floor vibration check.
///
/// ## JSON Example
///
/// ```json
/// {
///   "span_m": 4.2,
///   "multiple_span": false,
///   "topping": { "kind": "none" },
///   "system": {
///     "method": "Joist",
///     "subfloor": "CSP 5/8",
///     "bracing": true,
///     "bending_stiffness": 390417.7,
///     "axial_stiffness": 84835000.0,
///     "depth_m": 0.235,
///     "mass": 4.0185
///   }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorVibrationInput {
    /// Actual span (m)
    pub span_m: f64,
    /// Floor is continuous over one or more supports
    #[serde(default)]
    pub multiple_span: bool,
    #[serde(default)]
    pub topping: Topping,
    pub system: FloorSystem,
}

impl FloorVibrationInput {
    /// Check that every quantity raised to a power is positive.
    pub fn validate(&self) -> CalcResult<()> {
        positive("span_m", self.span_m)?;
        if let Topping::Concrete { thickness_m } = self.topping {
            positive("topping.thickness_m", thickness_m)?;
        }
        match &self.system {
            FloorSystem::Joist(joist) => {
                if joist.subfloor.trim().is_empty() {
                    return Err(CalcError::missing_field("subfloor"));
                }
                positive("bending_stiffness", joist.bending_stiffness)?;
                positive("axial_stiffness", joist.axial_stiffness)?;
                positive("depth_m", joist.depth_m)?;
                positive("mass", joist.mass)?;
                positive("spacing_m", joist.spacing_m)?;
            }
            FloorSystem::CrossLaminated(clt) => {
                positive("bending_stiffness", clt.bending_stiffness)?;
                positive("linear_mass", clt.linear_mass)?;
            }
        }
        Ok(())
    }
}

fn positive(field: &str, value: f64) -> CalcResult<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(CalcError::invalid_input(field, value.to_string(), "Must be a positive number"))
    }
}

// ============================================================================
// Result Types
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VibrationMethod {
    Joist,
    CrossLaminated,
}

impl std::fmt::Display for VibrationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VibrationMethod::Joist => write!(f, "joist floor (A.5.4.5)"),
            VibrationMethod::CrossLaminated => write!(f, "CLT floor (A.8.5.3)"),
        }
    }
}

/// Result of the floor vibration check
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VibrationResult {
    pub method: VibrationMethod,
    /// Vibration-controlled span limit lv (m)
    pub max_span_m: f64,
    pub actual_span_m: f64,
    /// Actual span does not exceed the limit
    pub passes: bool,
    /// Composite stiffness EIeff (N·m²), joist floors only
    pub ei_eff: Option<f64>,
    /// Linear mass ml (kg/m), joist floors only
    pub linear_mass: Option<f64>,
    /// Transverse stiffness factor Ktss, joist floors only
    pub ktss: Option<f64>,
}

impl std::fmt::Display for VibrationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.passes {
            write!(
                f,
                "Vibration criterion satisfied: {:.3} m <= {:.3} m ({})",
                self.actual_span_m, self.max_span_m, self.method
            )
        } else {
            write!(
                f,
                "Vibration criterion not satisfied: {:.3} m > {:.3} m ({})",
                self.actual_span_m, self.max_span_m, self.method
            )
        }
    }
}

// ============================================================================
// Engine
// ============================================================================

/// Evaluate the vibration-controlled span of a floor.
pub fn evaluate(input: &FloorVibrationInput, store: &dyn PropertyStore) -> CalcResult<VibrationResult> {
    input.validate()?;

    let result = match &input.system {
        FloorSystem::Joist(joist) => {
            let subfloor = store.subfloor_panel(&joist.subfloor)?;
            let topping = input.topping.properties(store)?;
            let joist_floor = joist_floor(input, joist, &subfloor, &topping);
            VibrationResult {
                method: VibrationMethod::Joist,
                max_span_m: joist_floor.max_span_m,
                actual_span_m: input.span_m,
                passes: input.span_m <= joist_floor.max_span_m,
                ei_eff: Some(joist_floor.ei_eff),
                linear_mass: Some(joist_floor.linear_mass),
                ktss: Some(joist_floor.ktss),
            }
        }
        FloorSystem::CrossLaminated(clt) => {
            let max_span_m = clt_span(clt, &input.topping, input.multiple_span);
            VibrationResult {
                method: VibrationMethod::CrossLaminated,
                max_span_m,
                actual_span_m: input.span_m,
                passes: input.span_m <= max_span_m,
                ei_eff: None,
                linear_mass: None,
                ktss: None,
            }
        }
    };

    tracing::debug!(
        method = ?result.method,
        max_span_m = result.max_span_m,
        actual_span_m = result.actual_span_m,
        passes = result.passes,
        "floor vibration evaluated"
    );
    Ok(result)
}

struct JoistFloor {
    ei_eff: f64,
    linear_mass: f64,
    ktss: f64,
    max_span_m: f64,
}

fn joist_floor(
    input: &FloorVibrationInput,
    joist: &JoistSystem,
    subfloor: &SubfloorPanel,
    topping: &ToppingProperties,
) -> JoistFloor {
    let span = input.span_m;
    let b1 = joist.spacing_m;
    let ts = subfloor.thickness_m();
    let tc = topping.thickness_m;
    let ea_s = subfloor.axial_stiffness_perpendicular;
    let ea_c = topping.axial_stiffness;
    let ei_c = topping.bending_stiffness();
    let no_topping = input.topping.is_none();
    let concrete = input.topping.is_concrete();

    // Composite stiffness
    let ei_u = joist.bending_stiffness + b1 * (subfloor.bending_stiffness_perpendicular + ei_c);
    let ea_1 = ea_s + ea_c;
    let s1 = if joist.glued && no_topping {
        SLIP_MODULUS_GLUED
    } else {
        SLIP_MODULUS_NAILED
    };
    let l1 = if no_topping { PANEL_JOINT_SPACING_M } else { span };
    let ea_1_bar = b1 * ea_1 / (1.0 + 10.0 * b1 * ea_1 / (s1 * l1.powi(2)));
    let a_bar = joist.axial_stiffness + ea_1_bar;
    let h1 = joist.depth_m / 2.0 + (ea_s * ts / 2.0 + ea_c * (ts + tc / 2.0)) / (ea_s + ea_c);
    let y_bar = h1 * ea_1_bar / a_bar;
    let ei_eff = ei_u + ea_1_bar * h1.powi(2) - a_bar * y_bar.powi(2);

    let linear_mass = joist.mass + subfloor.density * ts * b1 + topping.density * tc * b1;

    // Transverse stiffness, from the single-span EIeff
    let kj = ei_eff / span.powi(3);
    let kl = if no_topping {
        0.585 * span * subfloor.bending_stiffness_parallel / b1.powi(3)
    } else {
        let h3 = (ts + tc) / 2.0;
        let ea_s_par = subfloor.axial_stiffness_parallel;
        0.585 * span * (subfloor.bending_stiffness_parallel + ei_c + ea_c * ea_s_par / (ea_c + ea_s_par) * h3.powi(2))
            / b1.powi(3)
    };
    let k1 = kj / (kj + kl);
    let ktss = 0.0294 + 0.536 * k1.powf(0.25) + 0.516 * k1.powf(0.5) + 0.31 * k1.powf(0.75);

    let ei_span = if input.multiple_span && !concrete {
        ei_eff * CONTINUITY_FACTOR
    } else {
        ei_eff
    };
    let mut max_span_m = 0.122 * ei_span.powf(0.284) / (ktss.powf(0.14) * linear_mass.powf(0.15));
    if (joist.bracing && !concrete) || (joist.gypsum && no_topping) {
        max_span_m *= DETAILING_BONUS;
    }

    tracing::debug!(ei_eff, linear_mass, ktss, max_span_m, "joist floor intermediates");

    JoistFloor {
        ei_eff,
        linear_mass,
        ktss,
        max_span_m,
    }
}

fn clt_span(clt: &CltPanel, topping: &Topping, multiple_span: bool) -> f64 {
    let mut mass = clt.linear_mass;
    if let Topping::Concrete { thickness_m } = topping {
        let added = CONCRETE_DENSITY * thickness_m;
        if added <= 2.0 * clt.linear_mass {
            mass += added;
        } else {
            tracing::debug!(added, "concrete topping heavier than twice the panel, ignored");
        }
    }

    let mut span = 0.11 * (clt.bending_stiffness / 1e6).powf(0.29) / mass.powf(0.12);
    if multiple_span && span < CLT_MULTI_SPAN_CAP_M {
        span = (span * CONTINUITY_FACTOR).min(CLT_MULTI_SPAN_CAP_M);
    }
    span
}
