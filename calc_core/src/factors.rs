//! # CSA O86 Modification Factors
//!
//! Factors applied to specified strengths to obtain factored resistances.
//!
//! ## Overview
//!
//! ```text
//! Fb = fb × (Kd × Kh × Ksb × Kt)
//! Fv = fv × (Kd × Kh × Ksv × Kt)
//! E  = E  × (Kse × Kt)
//! ```
//!
//! ## Factor Summary
//!
//! | Factor | Description        | Clause / Table |
//! |--------|--------------------|----------------|
//! | Kd     | Load duration      | 5.3.2, 6.4.1   |
//! | Ks     | Service condition  | Table 6.10     |
//! | Kt     | Treatment          | Table 6.11     |
//! | Kh     | System             | Table 6.12     |
//! | Kz     | Size               | Table 6.13     |

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::materials::LumberCategory;

// ============================================================================
// Code Clause References
// ============================================================================

/// CSA O86:19 clause references reported alongside results and errors.
pub mod o86_ref {
    /// Limit states design
    pub const LIMIT_STATES: &str = "O86 5.1";
    /// Load duration factor Kd
    pub const K_D: &str = "O86 5.3.2";
    /// Cross-section reduction
    pub const CROSS_SECTION: &str = "O86 5.3.8";
    /// Modulus of elasticity for serviceability
    pub const ELASTICITY: &str = "O86 5.4.1";
    /// Elastic deflection
    pub const DEFLECTION: &str = "O86 5.4.2";
    /// Permanent deformation
    pub const PERMANENT_DEFORMATION: &str = "O86 5.4.3";
    /// Ponding
    pub const PONDING: &str = "O86 5.4.4";
    /// Floor vibration, joist floors
    pub const VIBRATION_JOIST: &str = "O86 5.4.5 / A.5.4.5";
    /// Floor vibration, CLT floors
    pub const VIBRATION_CLT: &str = "O86 5.4.5 / A.8.5.3";
    /// Moisture movement
    pub const MOISTURE: &str = "O86 5.4.6";
    /// Lateral bracing of truss web members
    pub const LATERAL_BRACE: &str = "O86 5.5";
    /// Effective cross-section in fire
    pub const FIRE_SECTION: &str = "O86 B.6.2 / Table B.2 note";
    /// Sawn lumber categories
    pub const LUMBER_CATEGORY: &str = "O86 6.2";
    /// Specified strengths
    pub const SPECIFIED_STRENGTHS: &str = "O86 6.3";
    /// Modification factors
    pub const MODIFICATION_FACTORS: &str = "O86 6.4";
    /// Bending moment resistance
    pub const BENDING: &str = "O86 6.5.3";
    /// Lateral stability factor KL
    pub const K_L: &str = "O86 7.5.6.4";
    /// Shear resistance
    pub const SHEAR: &str = "O86 6.5.4";
    /// Notched members
    pub const NOTCH: &str = "O86 6.5.4.2";
    /// Compression parallel to grain
    pub const COMPRESSION_PARALLEL: &str = "O86 6.5.5";
    /// Effective length factor Ke
    pub const K_E: &str = "O86 A.6.5.5.1";
    /// Spaced compression members
    pub const SPACED_COMPRESSION: &str = "O86 A.6.5.5.3";
    /// Compression perpendicular to grain
    pub const COMPRESSION_PERPENDICULAR: &str = "O86 6.5.6";
    /// Compression at an angle to grain
    pub const COMPRESSION_ANGLE: &str = "O86 6.5.7";
    /// Tension parallel to grain
    pub const TENSION: &str = "O86 6.5.8";
    /// Combined bending and axial load
    pub const COMBINED: &str = "O86 6.5.9";
}

// ============================================================================
// Load Duration
// ============================================================================

/// Load duration class (5.3.2)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum LoadDuration {
    /// Short term: Kd = 1.15
    Short,
    /// Standard term: Kd = 1.00
    #[default]
    Normal,
    /// Permanent: Kd from the ratio of sustained to standard-term load
    Continuous,
}

impl LoadDuration {
    /// All load duration variants for menu selection
    pub const ALL: [LoadDuration; 3] = [LoadDuration::Short, LoadDuration::Normal, LoadDuration::Continuous];

    /// Parse from common string representations, English or French
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "short" | "s" | "courte" => Ok(LoadDuration::Short),
            "normal" | "standard" | "n" | "normale" => Ok(LoadDuration::Normal),
            "continuous" | "permanent" | "c" | "continue" => Ok(LoadDuration::Continuous),
            _ => Err(CalcError::unknown_selection("load duration", s)),
        }
    }

    /// Display name for menus
    pub fn display_name(&self) -> &'static str {
        match self {
            LoadDuration::Short => "Short term (1.15)",
            LoadDuration::Normal => "Standard term (1.00)",
            LoadDuration::Continuous => "Continuous (0.65 - 1.00)",
        }
    }
}

impl std::fmt::Display for LoadDuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Specified loads used to derive Kd for continuous loading
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DurationLoads {
    /// Continuous (dead) load PL
    #[serde(default)]
    pub dead: f64,
    /// Standard-term live load
    #[serde(default)]
    pub live: f64,
    /// Snow load
    #[serde(default)]
    pub snow: f64,
}

/// Load duration factor Kd (5.3.2).
///
/// For continuous loading, Kd = 1 − 0.5 log(PL/PS) ≥ 0.65 where PS is the
/// governing standard-term load combination. The result never exceeds 1.15.
///
/// # Example
///
/// ```rust
/// use o86_core::factors::{load_duration, DurationLoads, LoadDuration};
///
/// assert_eq!(load_duration(LoadDuration::Short, DurationLoads::default()), 1.15);
/// let kd = load_duration(
///     LoadDuration::Continuous,
///     DurationLoads { dead: 1.0, live: 0.5, snow: 0.1 },
/// );
/// assert!((kd - 0.8701813447471219).abs() < 1e-12);
/// ```
pub fn load_duration(duration: LoadDuration, loads: DurationLoads) -> f64 {
    let kd: f64 = match duration {
        LoadDuration::Short => 1.15,
        LoadDuration::Normal => 1.0,
        LoadDuration::Continuous => {
            let (s, l) = (loads.snow, loads.live);
            let ps = s.max(l).max(s + 0.5 * l).max(0.5 * s + l);
            if ps > 0.0 {
                let pl = loads.dead;
                if pl > ps {
                    (1.0 - 0.5 * (pl / ps).log(10.0)).max(0.65)
                } else {
                    1.0
                }
            } else {
                0.65
            }
        }
    };
    kd.min(1.15)
}

// ============================================================================
// Strength Properties
// ============================================================================

/// Property a factor is being evaluated for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StrengthProperty {
    /// Bending at extreme fibre (b)
    Bending,
    /// Notch shear fracture (f)
    ShearFracture,
    /// Longitudinal shear (v)
    Shear,
    /// Compression parallel to grain (c)
    CompressionParallel,
    /// Compression perpendicular to grain (cp)
    CompressionPerpendicular,
    /// Tension parallel to grain (t)
    Tension,
    /// Modulus of elasticity (E)
    ModulusOfElasticity,
}

impl StrengthProperty {
    pub const ALL: [StrengthProperty; 7] = [
        StrengthProperty::Bending,
        StrengthProperty::ShearFracture,
        StrengthProperty::Shear,
        StrengthProperty::CompressionParallel,
        StrengthProperty::CompressionPerpendicular,
        StrengthProperty::Tension,
        StrengthProperty::ModulusOfElasticity,
    ];

    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.trim().to_lowercase().replace([' ', '-'], "_").as_str() {
            "bending" | "flex" | "b" => Ok(StrengthProperty::Bending),
            "shear_fracture" | "cis_f" | "f" => Ok(StrengthProperty::ShearFracture),
            "shear" | "cis_v" | "v" => Ok(StrengthProperty::Shear),
            "compression_parallel" | "comp_para" | "c" => Ok(StrengthProperty::CompressionParallel),
            "compression_perpendicular" | "comp_perp" | "cp" => Ok(StrengthProperty::CompressionPerpendicular),
            "tension" | "trac" | "t" => Ok(StrengthProperty::Tension),
            "modulus_of_elasticity" | "moe" | "e" => Ok(StrengthProperty::ModulusOfElasticity),
            _ => Err(CalcError::unknown_selection("strength property", s)),
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            StrengthProperty::Bending => "Bending",
            StrengthProperty::ShearFracture => "Shear fracture",
            StrengthProperty::Shear => "Shear",
            StrengthProperty::CompressionParallel => "Compression parallel",
            StrengthProperty::CompressionPerpendicular => "Compression perpendicular",
            StrengthProperty::Tension => "Tension",
            StrengthProperty::ModulusOfElasticity => "Modulus of elasticity",
        }
    }
}

impl std::fmt::Display for StrengthProperty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Per-property coefficients in the order
/// [b, f, v, c, cp, t, E].
type PropertyRow = [f64; 7];

fn pick(row: &PropertyRow, prop: StrengthProperty) -> f64 {
    let index = match prop {
        StrengthProperty::Bending => 0,
        StrengthProperty::ShearFracture => 1,
        StrengthProperty::Shear => 2,
        StrengthProperty::CompressionParallel => 3,
        StrengthProperty::CompressionPerpendicular => 4,
        StrengthProperty::Tension => 5,
        StrengthProperty::ModulusOfElasticity => 6,
    };
    row[index]
}

// ============================================================================
// Service Conditions
// ============================================================================

/// Service and system conditions that drive Ks, Kt and Kh.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FactorConditions {
    /// Load duration class
    pub duration: LoadDuration,
    /// Loads for continuous Kd
    #[serde(default)]
    pub loads: DurationLoads,
    /// Wet service conditions
    #[serde(default)]
    pub wet_service: bool,
    /// Preservative or fire-retardant treated
    #[serde(default)]
    pub treated: bool,
    /// Incised before treatment
    #[serde(default)]
    pub incised: bool,
    /// Three or more members at a spacing not over 610 mm
    #[serde(default)]
    pub spacing_610: bool,
    /// Members connected by a load-sharing subfloor
    #[serde(default)]
    pub connected_subfloor: bool,
    /// Built-up beam of laminations fastened together
    #[serde(default)]
    pub built_up_beam: bool,
}

impl FactorConditions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set load duration class and loads
    pub fn with_duration(mut self, duration: LoadDuration, loads: DurationLoads) -> Self {
        self.duration = duration;
        self.loads = loads;
        self
    }

    /// Set wet service
    pub fn with_wet_service(mut self, wet: bool) -> Self {
        self.wet_service = wet;
        self
    }

    /// Set treatment and incising
    pub fn with_treatment(mut self, treated: bool, incised: bool) -> Self {
        self.treated = treated;
        self.incised = incised;
        self
    }

    /// Set load-sharing system conditions
    pub fn with_system(mut self, spacing_610: bool, connected_subfloor: bool, built_up_beam: bool) -> Self {
        self.spacing_610 = spacing_610;
        self.connected_subfloor = connected_subfloor;
        self.built_up_beam = built_up_beam;
        self
    }
}

/// Modification factors for one property of one member
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModificationFactors {
    pub kd: f64,
    pub ks: f64,
    pub kt: f64,
    pub kh: f64,
    pub kz: f64,
}

impl ModificationFactors {
    /// Product of all factors
    pub fn product(&self) -> f64 {
        self.kd * self.ks * self.kt * self.kh * self.kz
    }
}

/// Service condition factor Ks (Table 6.10)
pub fn service_factor(prop: StrengthProperty, small_mm: f64, wet_service: bool) -> f64 {
    if !wet_service {
        return 1.0;
    }
    let row: PropertyRow = if small_mm > 89.0 {
        [1.0, 0.7, 1.0, 0.91, 0.67, 1.0, 1.0]
    } else {
        [0.84, 0.7, 0.96, 0.69, 0.67, 0.84, 0.94]
    };
    pick(&row, prop)
}

/// Treatment factor Kt (Table 6.11). Only incised members 89 mm or less
/// in thickness are reduced.
pub fn treatment_factor(prop: StrengthProperty, small_mm: f64, conditions: &FactorConditions) -> f64 {
    if !(conditions.treated && conditions.incised && small_mm <= 89.0) {
        return 1.0;
    }
    let moe = prop == StrengthProperty::ModulusOfElasticity;
    match (conditions.wet_service, moe) {
        (true, true) => 0.95,
        (true, false) => 0.85,
        (false, true) => 0.90,
        (false, false) => 0.75,
    }
}

/// System factor Kh (Table 6.12)
pub fn system_factor(prop: StrengthProperty, category: LumberCategory, conditions: &FactorConditions) -> f64 {
    let row: PropertyRow = if conditions.spacing_610 {
        if conditions.connected_subfloor {
            if category == LumberCategory::Msr {
                // Case 2, MSR
                [1.2, 1.0, 1.2, 1.1, 1.0, 1.0, 1.0]
            } else {
                // Case 2
                [1.4, 1.0, 1.4, 1.1, 1.0, 1.0, 1.0]
            }
        } else {
            // Case 1
            [1.1, 1.0, 1.1, 1.1, 1.0, 1.1, 1.0]
        }
    } else if conditions.built_up_beam {
        [1.1, 1.0, 1.1, 1.0, 1.0, 1.0, 1.0]
    } else {
        return 1.0;
    };
    pick(&row, prop)
}

/// Size factor Kz (Table 6.13) from the larger and smaller faces (mm)
pub fn size_factor(prop: StrengthProperty, category: LumberCategory, large_mm: f64, small_mm: f64) -> f64 {
    if matches!(category, LumberCategory::Light | LumberCategory::Msr | LumberCategory::Mel) {
        return 1.0;
    }

    // (bending and shear, tension) for narrow faces [>= 114, 89 to 102, 38 to 64]
    let columns: [(f64, f64); 3] = if large_mm < 114.0 {
        [(1.7, 1.5), (1.7, 1.5), (1.7, 1.5)]
    } else if large_mm < 140.0 {
        [(1.3, 1.4), (1.6, 1.4), (1.5, 1.4)]
    } else if large_mm < 159.0 {
        [(1.3, 1.3), (1.5, 1.3), (1.4, 1.3)]
    } else if large_mm < 210.0 {
        [(1.3, 1.2), (1.3, 1.2), (1.2, 1.2)]
    } else if large_mm < 286.0 {
        [(1.2, 1.1), (1.2, 1.1), (1.1, 1.1)]
    } else if large_mm < 337.0 {
        [(1.1, 1.0), (1.1, 1.0), (1.0, 1.0)]
    } else if large_mm < 362.0 {
        [(1.0, 0.9), (1.0, 0.9), (0.9, 0.9)]
    } else {
        [(0.9, 0.8), (0.9, 0.8), (0.8, 0.8)]
    };

    let (flexural, tension) = if small_mm >= 114.0 {
        columns[0]
    } else if small_mm >= 89.0 {
        columns[1]
    } else {
        columns[2]
    };

    match prop {
        StrengthProperty::Bending | StrengthProperty::ShearFracture | StrengthProperty::Shear => flexural,
        StrengthProperty::Tension => tension,
        StrengthProperty::CompressionParallel
        | StrengthProperty::CompressionPerpendicular
        | StrengthProperty::ModulusOfElasticity => 1.0,
    }
}

/// All modification factors for a member of the given section (6.4).
///
/// # Example
///
/// ```rust
/// use o86_core::factors::{modification_factors, FactorConditions, StrengthProperty};
/// use o86_core::materials::LumberCategory;
///
/// let f = modification_factors(38.0, 235.0, StrengthProperty::Bending, LumberCategory::Lumber, &FactorConditions::new());
/// assert_eq!(f.kz, 1.1);
/// ```
pub fn modification_factors(
    width_mm: f64,
    depth_mm: f64,
    prop: StrengthProperty,
    category: LumberCategory,
    conditions: &FactorConditions,
) -> ModificationFactors {
    let small = width_mm.min(depth_mm);
    let large = width_mm.max(depth_mm);

    let factors = ModificationFactors {
        kd: load_duration(conditions.duration, conditions.loads),
        ks: service_factor(prop, small, conditions.wet_service),
        kt: treatment_factor(prop, small, conditions),
        kh: system_factor(prop, category, conditions),
        kz: size_factor(prop, category, large, small),
    };
    tracing::debug!(%prop, %category, ?factors, "modification factors");
    factors
}
