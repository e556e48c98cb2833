//! # Sawn Lumber Resistances (CSA O86 6.5)
//!
//! Factored resistances of a rectangular sawn lumber member, single or
//! built-up from several plies:
//!
//! | Check                      | Clause      | Result            |
//! |----------------------------|-------------|-------------------|
//! | Bending moment             | 6.5.3       | Mr (N·mm)         |
//! | Shear and notch fracture   | 6.5.4       | Vr, Fr (N)        |
//! | Compression parallel       | 6.5.5       | Pr (N)            |
//! | Compression perpendicular  | 6.5.6       | Qr, Qr' (N)       |
//! | Compression at an angle    | 6.5.7       | Nr (N)            |
//! | Tension parallel           | 6.5.8       | Tr (N)            |
//! | Combined loads             | 6.5.9       | interaction ratio |
//!
//! Dimensions are net sizes in millimeters and strengths in MPa. Specified
//! strengths come from [`crate::materials::sawn_lumber::specified_strengths`]
//! and the service, size and treatment factors from [`crate::factors`]; the
//! member carries Kd, Kh and Kt, each check takes its own Ks and Kz.
//!
//! ## Example
//!
//! ```rust
//! use o86_core::calculations::sawn_lumber::{BendingInput, LateralSupport, Resistances};
//!
//! let member = Resistances::new(38.0, 140.0);
//! let bending = member
//!     .bending_moment(&BendingInput {
//!         fb: 6.0,
//!         support: LateralSupport::BothEdges,
//!         ..Default::default()
//!     })
//!     .unwrap();
//! assert!((bending.mr - 670_320.0).abs() < 1e-6);
//! ```

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::factors::o86_ref;
use crate::materials::lumber_sizes::{self, Seasoning, Surfacing};
use crate::materials::PropertyStore;

/// Largest number of plies in a built-up compression member (6.5.5.3)
pub const MAX_PLIES: u32 = 5;

/// Slenderness limit for solid compression members (6.5.5.2.2)
const MAX_SLENDERNESS: f64 = 50.0;

/// Slenderness limit for spaced compression members (A.6.5.5.3)
const MAX_SLENDERNESS_SPACED: f64 = 80.0;

/// Bearing lengths (mm) and KB values of Table 6.5
const BEARING_FACTORS: [(f64, f64); 7] = [
    (12.5, 1.75),
    (25.0, 1.38),
    (38.0, 1.25),
    (50.0, 1.19),
    (75.0, 1.13),
    (100.0, 1.10),
    (150.0, 1.00),
];

/// Minimum clear distance between a bearing and the member end for KB > 1 (mm)
const BEARING_END_DISTANCE_MM: f64 = 75.0;

fn default_factor() -> f64 {
    1.0
}

fn default_ply() -> u32 {
    1
}

// ============================================================================
// Member
// ============================================================================

/// A sawn lumber member and the factors shared by every check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Resistances {
    /// Net width of one ply (mm)
    pub b: f64,
    /// Net depth (mm)
    pub d: f64,
    /// Load duration factor
    #[serde(default = "default_factor")]
    pub kd: f64,
    /// System factor
    #[serde(default = "default_factor")]
    pub kh: f64,
    /// Treatment factor
    #[serde(default = "default_factor")]
    pub kt: f64,
    /// Number of plies for built-up members
    #[serde(default = "default_ply")]
    pub ply: u32,
}

impl Resistances {
    /// Single-ply member with all member factors at 1.0
    pub fn new(b: f64, d: f64) -> Self {
        Self {
            b,
            d,
            kd: 1.0,
            kh: 1.0,
            kt: 1.0,
            ply: 1,
        }
    }

    pub fn with_factors(mut self, kd: f64, kh: f64, kt: f64) -> Self {
        self.kd = kd;
        self.kh = kh;
        self.kt = kt;
        self
    }

    pub fn with_ply(mut self, ply: u32) -> Self {
        self.ply = ply;
        self
    }

    pub fn validate(&self) -> CalcResult<()> {
        if self.b <= 0.0 {
            return Err(CalcError::invalid_input("b", self.b.to_string(), "Width must be positive"));
        }
        if self.d <= 0.0 {
            return Err(CalcError::invalid_input("d", self.d.to_string(), "Depth must be positive"));
        }
        if self.ply == 0 {
            return Err(CalcError::invalid_input("ply", "0", "A member has at least one ply"));
        }
        for (field, value) in [("kd", self.kd), ("kh", self.kh), ("kt", self.kt)] {
            if value <= 0.0 {
                return Err(CalcError::invalid_input(field, value.to_string(), "Factor must be positive"));
            }
        }
        Ok(())
    }

    /// Total width of all plies (mm)
    pub fn total_width(&self) -> f64 {
        self.b * self.ply as f64
    }

    /// Net dimension for a nominal size (6.5.2)
    pub fn net_size(
        store: &dyn PropertyStore,
        nominal: u32,
        seasoning: Seasoning,
        surfacing: Surfacing,
    ) -> f64 {
        lumber_sizes::net_size(store, nominal, seasoning, surfacing)
    }
}

// ============================================================================
// 6.5.3 Bending Moment
// ============================================================================

/// Lateral support condition of a bending member (6.5.3.2.2).
///
/// Each condition allows a maximum depth-to-width ratio below which the
/// lateral stability factor KL is 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LateralSupport {
    /// No lateral support
    #[default]
    None,
    /// Ends held in position
    Ends,
    /// Ends held, compression edge held by purlins or tie rods
    TieRods,
    /// Ends held, compression edge held in line
    CompressionEdge,
    /// Compression edge held in line, bridging or blocking at intervals
    CompressionEdgeBlocking,
    /// Both edges held in line
    BothEdges,
}

impl LateralSupport {
    pub const ALL: [LateralSupport; 6] = [
        LateralSupport::None,
        LateralSupport::Ends,
        LateralSupport::TieRods,
        LateralSupport::CompressionEdge,
        LateralSupport::CompressionEdgeBlocking,
        LateralSupport::BothEdges,
    ];

    /// Maximum d/b for KL = 1
    pub fn depth_ratio_limit(&self) -> f64 {
        match self {
            LateralSupport::None => 2.5,
            LateralSupport::Ends => 4.0,
            LateralSupport::TieRods => 5.0,
            LateralSupport::CompressionEdge => 6.5,
            LateralSupport::CompressionEdgeBlocking => 7.5,
            LateralSupport::BothEdges => 9.0,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            LateralSupport::None => "No lateral support",
            LateralSupport::Ends => "Supported at ends",
            LateralSupport::TieRods => "Ends and purlins or tie rods",
            LateralSupport::CompressionEdge => "Compression edge held in line",
            LateralSupport::CompressionEdgeBlocking => "Compression edge held, with blocking",
            LateralSupport::BothEdges => "Both edges held in line",
        }
    }
}

/// Input for the bending moment resistance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BendingInput {
    /// Specified bending strength fb (MPa)
    pub fb: f64,
    #[serde(default = "default_factor")]
    pub ksb: f64,
    #[serde(default = "default_factor")]
    pub kzb: f64,
    #[serde(default)]
    pub support: LateralSupport,
    /// Lateral stability factor from a 7.5.6.4 analysis, needed when d/b
    /// exceeds the support limit
    #[serde(default)]
    pub kl: Option<f64>,
}

impl Default for BendingInput {
    fn default() -> Self {
        Self {
            fb: 0.0,
            ksb: 1.0,
            kzb: 1.0,
            support: LateralSupport::None,
            kl: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BendingResult {
    /// Factored bending moment resistance Mr (N·mm)
    pub mr: f64,
    /// Section modulus S (mm³)
    pub section_modulus: f64,
    pub kl: f64,
    /// Actual d/b
    pub depth_ratio: f64,
    /// d/b limit for the support condition
    pub depth_ratio_limit: f64,
}

impl std::fmt::Display for BendingResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Mr = {:.0} N·mm (KL = {})", self.mr, self.kl)
    }
}

impl Resistances {
    /// Factored bending moment resistance, Mr = φ·Fb·S·Kzb·KL (6.5.3).
    pub fn bending_moment(&self, input: &BendingInput) -> CalcResult<BendingResult> {
        self.validate()?;
        let phi = 0.9;
        let fb = input.fb * (self.kd * self.kh * input.ksb * self.kt);

        let b = self.total_width();
        let s = b * self.d.powi(2) / 6.0;

        let depth_ratio = self.d / b;
        let limit = input.support.depth_ratio_limit();
        let kl = if depth_ratio <= limit {
            1.0
        } else {
            match input.kl {
                Some(kl) if kl > 0.0 && kl <= 1.0 => kl,
                Some(kl) => {
                    return Err(CalcError::invalid_input("kl", kl.to_string(), "KL must be in (0, 1]"));
                }
                None => {
                    return Err(CalcError::code_limit(
                        o86_ref::K_L,
                        format!(
                            "d/b = {depth_ratio:.2} exceeds {limit} for the lateral support provided; \
                             KL must be determined by stability analysis"
                        ),
                    ));
                }
            }
        };

        let mr = phi * fb * s * input.kzb * kl;
        tracing::debug!(fb, s, depth_ratio, kl, mr, "bending moment resistance");

        Ok(BendingResult {
            mr,
            section_modulus: s,
            kl,
            depth_ratio,
            depth_ratio_limit: limit,
        })
    }
}

// ============================================================================
// 6.5.4 Shear
// ============================================================================

/// Input for the shear and notch fracture resistances.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShearInput {
    /// Specified shear strength fv (MPa)
    pub fv: f64,
    #[serde(default = "default_factor")]
    pub ksv: f64,
    /// Service factor for notch fracture shear
    #[serde(default = "default_factor")]
    pub ksf: f64,
    #[serde(default = "default_factor")]
    pub kzv: f64,
    /// Notch depth dn on the tension side at a support (mm)
    #[serde(default)]
    pub notch_depth: f64,
    /// Length of notch e from the inside edge of the support (mm)
    #[serde(default)]
    pub notch_length: f64,
}

impl Default for ShearInput {
    fn default() -> Self {
        Self {
            fv: 0.0,
            ksv: 1.0,
            ksf: 1.0,
            kzv: 1.0,
            notch_depth: 0.0,
            notch_length: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShearResult {
    /// Factored shear resistance Vr (N)
    pub vr: f64,
    /// Factored notch shear force resistance Fr (N), zero without a notch
    pub fr: f64,
    /// Notch factor KN
    pub kn: f64,
}

impl std::fmt::Display for ShearResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Vr = {:.0} N, Fr = {:.0} N", self.vr, self.fr)
    }
}

impl Resistances {
    /// Factored shear resistance Vr and notch fracture resistance Fr (6.5.4).
    pub fn shear(&self, input: &ShearInput) -> CalcResult<ShearResult> {
        self.validate()?;
        let phi = 0.9;
        let fv = input.fv * (self.kd * self.kh * input.ksv * self.kt);
        let ff = 0.5 * (self.kd * self.kh * input.ksf * self.kt);

        let b = self.total_width();
        let d = self.d;
        let ag = b * d;
        let mut an = ag;

        let kn = if input.notch_depth > 0.0 && input.notch_length > 0.0 {
            let dn = input.notch_depth;
            if dn > 0.25 * d {
                return Err(CalcError::code_limit(
                    o86_ref::NOTCH,
                    format!("Notch depth {dn} mm exceeds 0.25d = {} mm", 0.25 * d),
                ));
            }
            an = b * (d - dn);
            let alpha = 1.0 - dn / d;
            let eta = input.notch_length / d;
            (0.006 * d * (1.6 * (1.0 / alpha - 1.0) + eta.powi(2) * (1.0 / alpha.powi(3) - 1.0))).powf(-0.5)
        } else {
            0.0
        };

        let vr = phi * fv * (2.0 * an / 3.0) * input.kzv;
        let fr = phi * ff * ag * kn;

        Ok(ShearResult { vr, fr, kn })
    }
}

// ============================================================================
// 6.5.5 Compression Parallel to Grain
// ============================================================================

/// End fixity of a compression member (A.6.5.5.1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EndConditions {
    /// One end is free to translate (sway)
    pub sway: bool,
    /// Number of ends free to rotate, 0 to 2
    pub free_rotations: u8,
}

impl Default for EndConditions {
    fn default() -> Self {
        Self {
            sway: false,
            free_rotations: 2,
        }
    }
}

impl EndConditions {
    /// Effective length factor Ke
    pub fn ke(&self) -> CalcResult<f64> {
        match (self.sway, self.free_rotations) {
            (false, 0) => Ok(0.65),
            (false, 1) => Ok(0.8),
            (false, 2) => Ok(1.0),
            (true, 0) => Ok(1.5),
            (true, 1) => Ok(2.0),
            (true, 2) => Err(CalcError::code_limit(
                o86_ref::K_E,
                "Both ends free to rotate with sway is unstable",
            )),
            (_, n) => Err(CalcError::invalid_input(
                "free_rotations",
                n.to_string(),
                "A member has at most two ends free to rotate",
            )),
        }
    }
}

/// Fasteners joining the plies of a built-up column (6.5.5.3)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Connectors {
    #[default]
    Nails,
    Bolts,
    SplitRings,
    /// Plies act independently
    None,
}

impl Connectors {
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.trim().to_lowercase().replace([' ', '-'], "_").as_str() {
            "nails" | "clous" => Ok(Connectors::Nails),
            "bolts" | "boulons" => Ok(Connectors::Bolts),
            "split_rings" | "rings" | "anneaux" => Ok(Connectors::SplitRings),
            "none" | "aucun" => Ok(Connectors::None),
            _ => Err(CalcError::unknown_selection("connectors", s)),
        }
    }

    /// Weak-axis resistance factor for a fastened built-up member
    fn built_up_factor(&self) -> Option<f64> {
        match self {
            Connectors::Nails => Some(0.6),
            Connectors::Bolts => Some(0.75),
            Connectors::SplitRings => Some(0.8),
            Connectors::None => None,
        }
    }
}

/// Input for the compression parallel to grain resistance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompParallelInput {
    /// Unsupported length for the weak axis (mm)
    pub length_b: f64,
    /// Unsupported length for the strong axis (mm)
    pub length_d: f64,
    /// Specified compressive strength fc (MPa)
    pub fc: f64,
    /// Modulus of elasticity for compression members E05 (MPa)
    pub e05: f64,
    #[serde(default = "default_factor")]
    pub ksc: f64,
    #[serde(default = "default_factor")]
    pub kse: f64,
    #[serde(default)]
    pub ends: EndConditions,
    #[serde(default)]
    pub connectors: Connectors,
    /// Plies separated by spacer blocks (A.6.5.5.3)
    #[serde(default)]
    pub spacers: bool,
    /// Spaced member made of glued-laminated timber
    #[serde(default)]
    pub glulam: bool,
}

impl Default for CompParallelInput {
    fn default() -> Self {
        Self {
            length_b: 0.0,
            length_d: 0.0,
            fc: 0.0,
            e05: 0.0,
            ksc: 1.0,
            kse: 1.0,
            ends: EndConditions::default(),
            connectors: Connectors::default(),
            spacers: false,
            glulam: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompParallelResult {
    /// Factored compressive resistance Pr (N)
    pub pr: f64,
    /// Weak-axis resistance (N)
    pub pr_b: f64,
    /// Strong-axis resistance (N)
    pub pr_d: f64,
    /// Spaced member resistance (N), when spacers apply
    pub pr_spaced: Option<f64>,
    pub ke: f64,
    /// Weak-axis slenderness Cc
    pub cc_b: f64,
    /// Strong-axis slenderness Cc
    pub cc_d: f64,
}

impl std::fmt::Display for CompParallelResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Pr = {:.0} N (Cc = {:.1} / {:.1})", self.pr, self.cc_b, self.cc_d)
    }
}

/// Size factor for compression, Kzc = 6.3(dL)^-0.13 ≤ 1.3
fn kzc(dimension: f64, length: f64) -> f64 {
    (6.3 * (dimension * length).powf(-0.13)).min(1.3)
}

impl Resistances {
    /// Factored compressive resistance parallel to grain (6.5.5).
    pub fn comp_parallel(&self, input: &CompParallelInput) -> CalcResult<CompParallelResult> {
        self.validate()?;
        if self.ply > MAX_PLIES {
            return Err(CalcError::code_limit(
                o86_ref::COMPRESSION_PARALLEL,
                format!("A built-up compression member cannot have more than {MAX_PLIES} plies"),
            ));
        }
        if input.fc <= 0.0 || input.e05 <= 0.0 {
            return Err(CalcError::invalid_input("fc", input.fc.to_string(), "fc and E05 must be positive"));
        }
        if input.length_b <= 0.0 || input.length_d <= 0.0 {
            return Err(CalcError::invalid_input(
                "length_b",
                input.length_b.to_string(),
                "Unsupported lengths must be positive",
            ));
        }

        let ke = input.ends.ke()?;
        let fastened = input.connectors.built_up_factor();

        let b = if fastened.is_some() { self.total_width() } else { self.b };
        let d = self.d;

        let cc_b = ke * input.length_b / b;
        let cc_d = ke * input.length_d / d;
        for (axis, cc) in [("weak", cc_b), ("strong", cc_d)] {
            if cc > MAX_SLENDERNESS {
                return Err(CalcError::code_limit(
                    o86_ref::COMPRESSION_PARALLEL,
                    format!("Slenderness about the {axis} axis Cc = {cc:.1} exceeds {MAX_SLENDERNESS}"),
                ));
            }
        }

        let phi = 0.8;
        let fc = input.fc * (self.kd * self.kh * input.ksc * self.kt);
        let area = b * d;
        let stiffness = 35.0 * input.e05 * input.kse * self.kt;

        let kzc_b = kzc(b, input.length_b);
        let kzc_d = kzc(d, input.length_d);
        let kc_b = 1.0 / (1.0 + fc * kzc_b * cc_b.powi(3) / stiffness);
        let kc_d = 1.0 / (1.0 + fc * kzc_d * cc_d.powi(3) / stiffness);

        let mut pr_b = phi * fc * area * kzc_b * kc_b;
        let mut pr_d = phi * fc * area * kzc_d * kc_d;
        if self.ply > 1 {
            match fastened {
                Some(factor) => pr_b *= factor,
                None => {
                    pr_b *= self.ply as f64;
                    pr_d *= self.ply as f64;
                }
            }
        }

        let pr_spaced = if self.ply > 1 && input.spacers {
            Some(self.spaced_column(input)?)
        } else {
            None
        };

        let pr = match pr_spaced {
            Some(spaced) => spaced.min(pr_d),
            None => pr_b.min(pr_d),
        };

        tracing::debug!(ke, cc_b, cc_d, kc_b, kc_d, pr_b, pr_d, ?pr_spaced, "compression parallel");

        Ok(CompParallelResult {
            pr,
            pr_b,
            pr_d,
            pr_spaced,
            ke,
            cc_b,
            cc_d,
        })
    }

    /// Weak-axis resistance of a spaced column (A.6.5.5.3)
    fn spaced_column(&self, input: &CompParallelInput) -> CalcResult<f64> {
        let fc = input.fc * (self.kd * input.ksc * self.kt);
        let b = self.b * (2 * self.ply - 1) as f64;
        let area = b * self.d;
        let length = input.length_b.max(input.length_d);

        let (phi, kzc, k) = if input.glulam {
            (0.9, 1.0, 2.0)
        } else {
            (0.8, kzc(b.max(self.d), length), 1.8)
        };

        let cc = length / self.b;
        let ke = 2.5;
        let ck = (0.76 * input.e05 * input.kse * ke * self.kt / fc).sqrt();
        let kc = if cc <= 10.0 {
            1.0
        } else if cc < ck {
            1.0 - (cc / ck).powi(4) / 3.0
        } else if cc <= MAX_SLENDERNESS_SPACED {
            input.e05 * input.kse * ke * self.kt / (k * cc.powi(2) * fc)
        } else {
            return Err(CalcError::code_limit(
                o86_ref::SPACED_COMPRESSION,
                format!("Spaced member slenderness Cc = {cc:.1} exceeds {MAX_SLENDERNESS_SPACED}"),
            ));
        };

        Ok(phi * fc * area * kc * kzc)
    }
}

// ============================================================================
// 6.5.6 Compression Perpendicular to Grain
// ============================================================================

/// Input for bearing resistance.
///
/// Bearing positions are measured from the member end to the bearing
/// centre. A second bearing on the opposite face is described by
/// `opposite_length` and its centre-to-centre `opposite_offset`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompPerpInput {
    /// Specified strength fcp (MPa), ignored when `relative_density` is given
    #[serde(default)]
    pub fcp: f64,
    #[serde(default = "default_factor")]
    pub kscp: f64,
    /// Bearing length lb (mm)
    pub bearing_length: f64,
    /// Distance from the member end to the bearing centre (mm)
    #[serde(default)]
    pub end_distance: f64,
    /// Bearing length on the opposite face (mm), zero when absent
    #[serde(default)]
    pub opposite_length: f64,
    /// Offset between the two bearing centres (mm)
    #[serde(default)]
    pub opposite_offset: f64,
    /// Relative density G for products without a tabulated fcp (A.6.5.6)
    #[serde(default)]
    pub relative_density: Option<f64>,
}

impl Default for CompPerpInput {
    fn default() -> Self {
        Self {
            fcp: 0.0,
            kscp: 1.0,
            bearing_length: 0.0,
            end_distance: 0.0,
            opposite_length: 0.0,
            opposite_offset: 0.0,
            relative_density: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompPerpResult {
    /// Factored bearing resistance Qr (N)
    pub qr: f64,
    /// Resistance with a bearing on the opposite face, Qr' (N)
    pub qr_opposite: Option<f64>,
    /// Specified strength used (MPa)
    pub fcp: f64,
    pub kb: f64,
    pub kzcp: f64,
}

impl std::fmt::Display for CompPerpResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Qr = {:.0} N", self.qr)?;
        if let Some(q) = self.qr_opposite {
            write!(f, ", Qr' = {q:.0} N")?;
        }
        Ok(())
    }
}

/// Specified fcp from relative density (A.6.5.6)
pub fn fcp_from_density(g: f64) -> f64 {
    0.9 * 1.8125 * (2243.8 * g - 473.8) / 145.038
}

/// Length of bearing factor KB (Table 6.5), interpolated between rows
pub fn bearing_factor(length_mm: f64) -> f64 {
    let (first_len, first_kb) = BEARING_FACTORS[0];
    if length_mm <= first_len {
        return first_kb;
    }
    for pair in BEARING_FACTORS.windows(2) {
        let (l0, k0) = pair[0];
        let (l1, k1) = pair[1];
        if length_mm == l1 {
            return k1;
        }
        if length_mm < l1 {
            return k0 + (k1 - k0) * (length_mm - l0) / (l1 - l0);
        }
    }
    1.0
}

/// Size factor for bearing Kzcp (6.5.6.4)
pub fn kzcp(width: f64, depth: f64) -> f64 {
    let ratio = width / depth;
    if ratio <= 1.0 {
        1.0
    } else if ratio < 2.0 {
        0.15 * ratio + 0.85
    } else {
        1.15
    }
}

impl Resistances {
    /// Factored compressive resistance perpendicular to grain (6.5.6).
    pub fn comp_perpendicular(&self, input: &CompPerpInput) -> CalcResult<CompPerpResult> {
        self.validate()?;
        if input.bearing_length <= 0.0 {
            return Err(CalcError::invalid_input(
                "bearing_length",
                input.bearing_length.to_string(),
                "Bearing length must be positive",
            ));
        }

        let fcp = match input.relative_density {
            Some(g) if g > 0.0 => fcp_from_density(g),
            Some(g) => {
                return Err(CalcError::invalid_input(
                    "relative_density",
                    g.to_string(),
                    "Relative density must be positive",
                ));
            }
            None => input.fcp,
        };
        if fcp <= 0.0 {
            return Err(CalcError::invalid_input("fcp", fcp.to_string(), "fcp must be positive"));
        }

        let phi = 0.8;
        let f_cp = fcp * (self.kd * input.kscp * self.kt);
        let b = self.total_width();
        let kzcp = kzcp(b, self.d);

        let kb_for = |length: f64, end_distance: f64| {
            if end_distance - length / 2.0 >= BEARING_END_DISTANCE_MM {
                bearing_factor(length)
            } else {
                1.0
            }
        };

        let kb = kb_for(input.bearing_length, input.end_distance);
        let qr = phi * f_cp * b * input.bearing_length * kb * kzcp;

        let qr_opposite = if input.opposite_length > 0.0 {
            let kb1 = kb_for(input.opposite_length, input.end_distance + input.opposite_offset);
            if input.opposite_offset <= self.d {
                let shorter = input.bearing_length.min(input.opposite_length);
                let longer = input.bearing_length.max(input.opposite_length);
                let area = (b * (shorter + longer) / 2.0).min(1.5 * b * shorter);
                Some(2.0 / 3.0 * phi * f_cp * area * kb.min(kb1) * kzcp)
            } else {
                Some(phi * f_cp * b * input.opposite_length * kb1 * kzcp)
            }
        } else {
            None
        };

        Ok(CompPerpResult {
            qr,
            qr_opposite,
            fcp,
            kb,
            kzcp,
        })
    }
}

// ============================================================================
// 6.5.7 Compression at an Angle to Grain
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompAngleInput {
    /// Resistance parallel to grain Pr (N)
    pub pr: f64,
    /// Resistance perpendicular to grain Qr (N)
    pub qr: f64,
    /// Angle between the load and the grain (degrees)
    pub angle_deg: f64,
}

/// Hankinson formula, Nr = Pr·Qr / (Pr·sin²θ + Qr·cos²θ) (6.5.7)
pub fn comp_angle(input: &CompAngleInput) -> CalcResult<f64> {
    if input.pr <= 0.0 || input.qr <= 0.0 {
        return Err(CalcError::invalid_input(
            "pr",
            format!("{} / {}", input.pr, input.qr),
            "Pr and Qr must be positive",
        ));
    }
    if !(0.0..=90.0).contains(&input.angle_deg) {
        return Err(CalcError::invalid_input(
            "angle_deg",
            input.angle_deg.to_string(),
            "Angle must be between 0 and 90 degrees",
        ));
    }
    let theta = input.angle_deg.to_radians();
    Ok(input.pr * input.qr / (input.pr * theta.sin().powi(2) + input.qr * theta.cos().powi(2)))
}

// ============================================================================
// 6.5.8 Tension Parallel to Grain
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TensionInput {
    /// Specified tensile strength ft (MPa)
    pub ft: f64,
    #[serde(default = "default_factor")]
    pub kst: f64,
    #[serde(default = "default_factor")]
    pub kzt: f64,
    /// Net area An (mm²), defaults to the gross section
    #[serde(default)]
    pub net_area: Option<f64>,
}

impl Resistances {
    /// Factored tensile resistance, Tr = φ·Ft·An·Kzt (6.5.8)
    pub fn tension_parallel(&self, input: &TensionInput) -> CalcResult<f64> {
        self.validate()?;
        let gross = self.total_width() * self.d;
        let an = input.net_area.unwrap_or(gross);
        if an <= 0.0 || an > gross {
            return Err(CalcError::invalid_input(
                "net_area",
                an.to_string(),
                "Net area must be positive and not exceed the gross section",
            ));
        }
        let phi = 0.9;
        let ft = input.ft * (self.kd * self.kh * input.kst * self.kt);
        Ok(phi * ft * an * input.kzt)
    }
}

// ============================================================================
// 6.5.9 Combined Bending and Axial Load
// ============================================================================

/// Axial force acting with bending
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "axial", rename_all = "snake_case")]
pub enum AxialLoad {
    /// Compression, with the data needed for the Euler load PE
    Compression {
        pf: f64,
        pr: f64,
        e05: f64,
        #[serde(default = "default_factor")]
        kse: f64,
        /// Effective length Le about the bending axis (mm)
        effective_length: f64,
    },
    Tension { tf: f64, tr: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CombinedInput {
    /// Factored bending moment Mf (N·mm)
    pub mf: f64,
    /// Bending resistance Mr (N·mm)
    pub mr: f64,
    pub axial: AxialLoad,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CombinedResult {
    /// Interaction value, at most 1.0 to pass
    pub interaction: f64,
    /// Euler buckling load PE (N), compression only
    pub euler_load: Option<f64>,
    pub passes: bool,
}

impl std::fmt::Display for CombinedResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let verdict = if self.passes { "satisfied" } else { "exceeded" };
        write!(f, "Combined loading {verdict}: {:.3} (limit 1.0)", self.interaction)
    }
}

impl Resistances {
    /// Interaction of bending with axial load (6.5.9).
    ///
    /// Compression: (Pf/Pr)² + Mf/Mr · 1/(1 − Pf/PE) ≤ 1.
    /// Tension: Tf/Tr + Mf/Mr ≤ 1.
    pub fn combined(&self, input: &CombinedInput) -> CalcResult<CombinedResult> {
        self.validate()?;
        if input.mr <= 0.0 {
            return Err(CalcError::invalid_input("mr", input.mr.to_string(), "Mr must be positive"));
        }
        let bending = input.mf / input.mr;

        let (interaction, euler_load) = match input.axial {
            AxialLoad::Compression {
                pf,
                pr,
                e05,
                kse,
                effective_length,
            } => {
                if pr <= 0.0 || e05 <= 0.0 || effective_length <= 0.0 {
                    return Err(CalcError::invalid_input(
                        "axial",
                        format!("Pr = {pr}, E05 = {e05}, Le = {effective_length}"),
                        "Pr, E05 and Le must be positive",
                    ));
                }
                let inertia = self.total_width() * self.d.powi(3) / 12.0;
                let pe = PI.powi(2) * e05 * kse * self.kt * inertia / effective_length.powi(2);
                if pf >= pe {
                    return Err(CalcError::code_limit(
                        o86_ref::COMBINED,
                        format!("Pf = {pf:.0} N reaches the Euler load PE = {pe:.0} N"),
                    ));
                }
                ((pf / pr).powi(2) + bending / (1.0 - pf / pe), Some(pe))
            }
            AxialLoad::Tension { tf, tr } => {
                if tr <= 0.0 {
                    return Err(CalcError::invalid_input("tr", tr.to_string(), "Tr must be positive"));
                }
                (tf / tr + bending, None)
            }
        };

        Ok(CombinedResult {
            interaction,
            euler_load,
            passes: interaction <= 1.0,
        })
    }
}

// ============================================================================
// Dispatch
// ============================================================================

/// One resistance check on a member.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "check", rename_all = "snake_case")]
pub enum MemberCheck {
    Bending(BendingInput),
    Shear(ShearInput),
    CompressionParallel(CompParallelInput),
    CompressionPerpendicular(CompPerpInput),
    CompressionAngle(CompAngleInput),
    Tension(TensionInput),
    Combined(CombinedInput),
}

impl MemberCheck {
    pub fn clause(&self) -> &'static str {
        match self {
            MemberCheck::Bending(_) => o86_ref::BENDING,
            MemberCheck::Shear(_) => o86_ref::SHEAR,
            MemberCheck::CompressionParallel(_) => o86_ref::COMPRESSION_PARALLEL,
            MemberCheck::CompressionPerpendicular(_) => o86_ref::COMPRESSION_PERPENDICULAR,
            MemberCheck::CompressionAngle(_) => o86_ref::COMPRESSION_ANGLE,
            MemberCheck::Tension(_) => o86_ref::TENSION,
            MemberCheck::Combined(_) => o86_ref::COMBINED,
        }
    }
}

/// A member and the check to run on it.
///
/// ## JSON Example
///
/// ```json
/// {
///   "member": { "b": 38.0, "d": 140.0, "ply": 3 },
///   "check": { "check": "shear", "fv": 1.5 }
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MemberInput {
    pub member: Resistances,
    pub check: MemberCheck,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "check", rename_all = "snake_case")]
pub enum MemberResult {
    Bending(BendingResult),
    Shear(ShearResult),
    CompressionParallel(CompParallelResult),
    CompressionPerpendicular(CompPerpResult),
    CompressionAngle { nr: f64 },
    Tension { tr: f64 },
    Combined(CombinedResult),
}

impl MemberResult {
    /// Only combined loading is a pass/fail check; the rest are resistances.
    pub fn passes(&self) -> Option<bool> {
        match self {
            MemberResult::Combined(c) => Some(c.passes),
            _ => None,
        }
    }
}

impl std::fmt::Display for MemberResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MemberResult::Bending(r) => write!(f, "{r}"),
            MemberResult::Shear(r) => write!(f, "{r}"),
            MemberResult::CompressionParallel(r) => write!(f, "{r}"),
            MemberResult::CompressionPerpendicular(r) => write!(f, "{r}"),
            MemberResult::CompressionAngle { nr } => write!(f, "Nr = {nr:.0} N"),
            MemberResult::Tension { tr } => write!(f, "Tr = {tr:.0} N"),
            MemberResult::Combined(r) => write!(f, "{r}"),
        }
    }
}

/// Run one check on a member.
pub fn calculate(input: &MemberInput) -> CalcResult<MemberResult> {
    let member = &input.member;
    Ok(match &input.check {
        MemberCheck::Bending(i) => MemberResult::Bending(member.bending_moment(i)?),
        MemberCheck::Shear(i) => MemberResult::Shear(member.shear(i)?),
        MemberCheck::CompressionParallel(i) => MemberResult::CompressionParallel(member.comp_parallel(i)?),
        MemberCheck::CompressionPerpendicular(i) => {
            MemberResult::CompressionPerpendicular(member.comp_perpendicular(i)?)
        }
        MemberCheck::CompressionAngle(i) => MemberResult::CompressionAngle { nr: comp_angle(i)? },
        MemberCheck::Tension(i) => MemberResult::Tension {
            tr: member.tension_parallel(i)?,
        },
        MemberCheck::Combined(i) => MemberResult::Combined(member.combined(i)?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn comp(length_b: f64, length_d: f64, connectors: Connectors) -> CompParallelInput {
        CompParallelInput {
            length_b,
            length_d,
            fc: 10.0,
            e05: 10000.0,
            connectors,
            ..Default::default()
        }
    }

    #[test]
    fn test_bending_moment_regression() {
        let result = Resistances::new(38.0, 140.0)
            .bending_moment(&BendingInput {
                fb: 6.0,
                support: LateralSupport::BothEdges,
                ..Default::default()
            })
            .unwrap();
        assert_relative_eq!(result.mr, 670320.0, max_relative = 1e-12);
        assert_eq!(result.kl, 1.0);
    }

    #[test]
    fn test_bending_beyond_support_limit_needs_kl() {
        // d/b = 3.68 > 2.5 without lateral support
        let member = Resistances::new(38.0, 140.0);
        let err = member.bending_moment(&BendingInput { fb: 6.0, ..Default::default() }).unwrap_err();
        match err {
            CalcError::CodeLimitExceeded { clause, .. } => assert_eq!(clause, o86_ref::K_L),
            other => panic!("unexpected {other:?}"),
        }

        let with_kl = member
            .bending_moment(&BendingInput { fb: 6.0, kl: Some(0.8), ..Default::default() })
            .unwrap();
        assert_relative_eq!(with_kl.mr, 670320.0 * 0.8, max_relative = 1e-12);
    }

    #[test]
    fn test_bending_built_up_uses_all_plies() {
        let single = Resistances::new(38.0, 235.0);
        let triple = single.with_ply(3);
        let input = BendingInput { fb: 11.8, support: LateralSupport::Ends, ..Default::default() };
        // 235 / 114 = 2.06 <= 4
        let mr3 = triple.bending_moment(&input).unwrap().mr;
        let mr1 = single
            .bending_moment(&BendingInput { kl: Some(1.0), ..input })
            .unwrap()
            .mr;
        assert_relative_eq!(mr3, 3.0 * mr1, max_relative = 1e-12);
    }

    #[test]
    fn test_shear_regression() {
        let result = Resistances::new(38.0, 140.0)
            .shear(&ShearInput { fv: 1.2, ksv: 1.0, ksf: 1.0, kzv: 1.0, ..Default::default() })
            .unwrap();
        assert_relative_eq!(result.vr, 3830.4, max_relative = 1e-12);
        assert_eq!(result.fr, 0.0);
    }

    #[test]
    fn test_shear_notch() {
        let member = Resistances::new(38.0, 235.0);
        let notched = member
            .shear(&ShearInput {
                fv: 1.5,
                ksv: 1.0,
                ksf: 1.0,
                kzv: 1.0,
                notch_depth: 50.0,
                notch_length: 100.0,
            })
            .unwrap();
        let alpha: f64 = 1.0 - 50.0 / 235.0;
        let eta: f64 = 100.0 / 235.0;
        let kn = (0.006 * 235.0 * (1.6 * (1.0 / alpha - 1.0) + eta.powi(2) * (1.0 / alpha.powi(3) - 1.0))).powf(-0.5);
        assert_relative_eq!(notched.kn, kn, max_relative = 1e-12);
        assert_relative_eq!(notched.fr, 0.9 * 0.5 * 38.0 * 235.0 * kn, max_relative = 1e-12);
        assert_relative_eq!(notched.vr, 0.9 * 1.5 * 2.0 * 38.0 * 185.0 / 3.0, max_relative = 1e-12);
    }

    #[test]
    fn test_deep_notch_rejected() {
        let err = Resistances::new(38.0, 140.0)
            .shear(&ShearInput { fv: 1.2, notch_depth: 40.0, notch_length: 50.0, ..Default::default() })
            .unwrap_err();
        assert!(matches!(err, CalcError::CodeLimitExceeded { .. }));
    }

    #[test]
    fn test_comp_parallel_independent_plies() {
        let result = Resistances::new(38.0, 140.0)
            .with_ply(4)
            .comp_parallel(&comp(100.0, 1000.0, Connectors::None))
            .unwrap();
        assert_relative_eq!(result.pr, 218356.32299157593, max_relative = 1e-9);
        assert_relative_eq!(result.pr, result.pr_d);
        assert_eq!(result.ke, 1.0);
    }

    #[test]
    fn test_comp_parallel_nailed_plies() {
        let result = Resistances::new(38.0, 140.0)
            .with_ply(2)
            .comp_parallel(&comp(100.0, 1000.0, Connectors::Nails))
            .unwrap();
        assert_relative_eq!(result.pr_b, 66387.98274675799, max_relative = 1e-9);
        assert_relative_eq!(result.pr_d, 109178.16149578796, max_relative = 1e-9);
        assert_relative_eq!(result.pr, result.pr_b);
    }

    #[test]
    fn test_comp_parallel_spaced_member() {
        let input = CompParallelInput { spacers: true, ..comp(1200.0, 1200.0, Connectors::Nails) };
        let result = Resistances::new(38.0, 140.0).with_ply(2).comp_parallel(&input).unwrap();
        assert_relative_eq!(result.pr_spaced.unwrap(), 150742.47694296553, max_relative = 1e-9);
        assert_relative_eq!(result.pr_d, 108126.88469615328, max_relative = 1e-9);
        assert_relative_eq!(result.pr, result.pr_d);
    }

    #[test]
    fn test_comp_parallel_limits() {
        let member = Resistances::new(38.0, 140.0);
        assert!(member.with_ply(6).comp_parallel(&comp(100.0, 100.0, Connectors::Nails)).is_err());
        // 2000 / 38 = 52.6
        assert!(matches!(
            member.comp_parallel(&comp(2000.0, 2000.0, Connectors::Nails)),
            Err(CalcError::CodeLimitExceeded { .. })
        ));
        let unstable = CompParallelInput {
            ends: EndConditions { sway: true, free_rotations: 2 },
            ..comp(100.0, 100.0, Connectors::Nails)
        };
        assert!(matches!(member.comp_parallel(&unstable), Err(CalcError::CodeLimitExceeded { .. })));
    }

    #[test]
    fn test_effective_length_factors() {
        let ke = |sway, free_rotations| EndConditions { sway, free_rotations }.ke().unwrap();
        assert_eq!(ke(false, 0), 0.65);
        assert_eq!(ke(false, 1), 0.8);
        assert_eq!(ke(false, 2), 1.0);
        assert_eq!(ke(true, 0), 1.5);
        assert_eq!(ke(true, 1), 2.0);
        assert!(EndConditions { sway: false, free_rotations: 3 }.ke().is_err());
    }

    #[test]
    fn test_bearing_factor_table() {
        assert_eq!(bearing_factor(10.0), 1.75);
        assert_eq!(bearing_factor(38.0), 1.25);
        assert_relative_eq!(bearing_factor(62.5), 1.16, max_relative = 1e-12);
        assert_eq!(bearing_factor(150.0), 1.0);
        assert_eq!(bearing_factor(300.0), 1.0);
    }

    #[test]
    fn test_kzcp() {
        assert_eq!(kzcp(38.0, 140.0), 1.0);
        assert_relative_eq!(kzcp(140.0, 89.0), 0.15 * 140.0 / 89.0 + 0.85);
        assert_eq!(kzcp(235.0, 89.0), 1.15);
    }

    #[test]
    fn test_comp_perpendicular_end_bearing() {
        // Bearing at the member end: KB = 1
        let result = Resistances::new(38.0, 235.0)
            .comp_perpendicular(&CompPerpInput {
                fcp: 5.3,
                kscp: 1.0,
                bearing_length: 89.0,
                end_distance: 44.5,
                ..Default::default()
            })
            .unwrap();
        assert_eq!(result.kb, 1.0);
        assert_relative_eq!(result.qr, 0.8 * 5.3 * 38.0 * 89.0, max_relative = 1e-12);
        assert!(result.qr_opposite.is_none());
    }

    #[test]
    fn test_comp_perpendicular_interior_bearing() {
        let result = Resistances::new(38.0, 235.0)
            .comp_perpendicular(&CompPerpInput {
                fcp: 5.3,
                kscp: 1.0,
                bearing_length: 50.0,
                end_distance: 1000.0,
                opposite_length: 100.0,
                opposite_offset: 0.0,
                ..Default::default()
            })
            .unwrap();
        assert_eq!(result.kb, 1.19);
        assert_relative_eq!(result.qr, 0.8 * 5.3 * 38.0 * 50.0 * 1.19, max_relative = 1e-12);
        // A'b = min(38 × 75, 1.5 × 38 × 50) = 2850, KB = min(1.19, 1.10)
        let expected = 2.0 / 3.0 * 0.8 * 5.3 * 2850.0 * 1.10;
        assert_relative_eq!(result.qr_opposite.unwrap(), expected, max_relative = 1e-12);
    }

    #[test]
    fn test_comp_perpendicular_from_relative_density() {
        let result = Resistances::new(38.0, 140.0)
            .comp_perpendicular(&CompPerpInput {
                kscp: 1.0,
                bearing_length: 38.0,
                relative_density: Some(0.42),
                ..Default::default()
            })
            .unwrap();
        assert_relative_eq!(result.fcp, fcp_from_density(0.42));
        assert!(result.fcp > 0.0);
    }

    #[test]
    fn test_comp_angle_hankinson() {
        let parallel = comp_angle(&CompAngleInput { pr: 50000.0, qr: 20000.0, angle_deg: 0.0 }).unwrap();
        let perpendicular = comp_angle(&CompAngleInput { pr: 50000.0, qr: 20000.0, angle_deg: 90.0 }).unwrap();
        assert_relative_eq!(parallel, 50000.0, max_relative = 1e-12);
        assert_relative_eq!(perpendicular, 20000.0, max_relative = 1e-12);
        let mid = comp_angle(&CompAngleInput { pr: 50000.0, qr: 20000.0, angle_deg: 45.0 }).unwrap();
        assert_relative_eq!(mid, 50000.0 * 20000.0 / 35000.0, max_relative = 1e-12);
    }

    #[test]
    fn test_tension_parallel() {
        let member = Resistances::new(38.0, 140.0).with_factors(1.0, 1.1, 1.0);
        let tr = member
            .tension_parallel(&TensionInput { ft: 5.5, kst: 1.0, kzt: 1.3, net_area: None })
            .unwrap();
        assert_relative_eq!(tr, 0.9 * 5.5 * 1.1 * 5320.0 * 1.3, max_relative = 1e-12);

        let too_big = TensionInput { ft: 5.5, kst: 1.0, kzt: 1.0, net_area: Some(6000.0) };
        assert!(member.tension_parallel(&too_big).is_err());
    }

    #[test]
    fn test_combined_tension_and_bending() {
        let result = Resistances::new(38.0, 140.0)
            .combined(&CombinedInput {
                mf: 300000.0,
                mr: 600000.0,
                axial: AxialLoad::Tension { tf: 10000.0, tr: 25000.0 },
            })
            .unwrap();
        assert_relative_eq!(result.interaction, 0.9, max_relative = 1e-12);
        assert!(result.passes);
    }

    #[test]
    fn test_combined_compression_amplifies_moment() {
        let member = Resistances::new(89.0, 140.0);
        let result = member
            .combined(&CombinedInput {
                mf: 2.0e6,
                mr: 5.0e6,
                axial: AxialLoad::Compression {
                    pf: 20000.0,
                    pr: 60000.0,
                    e05: 6500.0,
                    kse: 1.0,
                    effective_length: 3000.0,
                },
            })
            .unwrap();
        let inertia = 89.0 * 140.0_f64.powi(3) / 12.0;
        let pe = PI * PI * 6500.0 * inertia / 3000.0_f64.powi(2);
        assert_relative_eq!(result.euler_load.unwrap(), pe, max_relative = 1e-12);
        let expected = (20000.0_f64 / 60000.0).powi(2) + 0.4 / (1.0 - 20000.0 / pe);
        assert_relative_eq!(result.interaction, expected, max_relative = 1e-12);
        assert!(result.passes);
    }

    #[test]
    fn test_calculate_dispatch_from_json() {
        let json = r#"{
            "member": { "b": 38.0, "d": 140.0 },
            "check": { "check": "shear", "fv": 1.2 }
        }"#;
        let input: MemberInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.member.ply, 1);
        assert_eq!(input.check.clause(), o86_ref::SHEAR);
        match calculate(&input).unwrap() {
            MemberResult::Shear(r) => assert_relative_eq!(r.vr, 3830.4, max_relative = 1e-12),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_invalid_member_rejected() {
        let member = Resistances::new(0.0, 140.0);
        assert!(member.shear(&ShearInput { fv: 1.2, ..Default::default() }).is_err());
    }
}
