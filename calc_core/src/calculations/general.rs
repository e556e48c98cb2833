//! # General Design Checks (CSA O86 5.1 and 5.3.8)
//!
//! Limit-states utilization and the net cross-section check.
//!
//! ## Example
//!
//! ```rust
//! use o86_core::calculations::general::{cross_section, limit_states, LimitStateResult};
//!
//! let check = cross_section(7500.0, 10000.0).unwrap();
//! assert!(check.passes);
//!
//! match limit_states(45.0, 50.0) {
//!     LimitStateResult::Checked { ratio_percent, passes } => {
//!         assert_eq!(ratio_percent, 90.0);
//!         assert!(passes);
//!     }
//!     LimitStateResult::NotChecked => unreachable!(),
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Minimum net-to-gross ratio before a section must be designed on its net area
pub const NET_SECTION_RATIO: f64 = 0.75;

// ============================================================================
// 5.1 Limit States
// ============================================================================

/// Input for a limit-states utilization check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitStateInput {
    /// Factored or specified load effect
    pub load: f64,
    /// Corresponding resistance, same units as `load`
    pub resistance: f64,
}

/// Outcome of a limit-states check
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum LimitStateResult {
    /// Load or resistance was zero, nothing to check
    NotChecked,
    /// Utilization, rounded to the nearest percent
    Checked { ratio_percent: f64, passes: bool },
}

impl LimitStateResult {
    pub fn passes(&self) -> Option<bool> {
        match self {
            LimitStateResult::NotChecked => None,
            LimitStateResult::Checked { passes, .. } => Some(*passes),
        }
    }
}

impl std::fmt::Display for LimitStateResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LimitStateResult::NotChecked => write!(f, "Specify a load to check the limit state"),
            LimitStateResult::Checked { ratio_percent, passes: true } => {
                write!(f, "Limit state satisfied: {ratio_percent}%")
            }
            LimitStateResult::Checked { ratio_percent, passes: false } => {
                write!(f, "Limit state exceeded: {ratio_percent}%")
            }
        }
    }
}

/// Utilization of a resistance (5.1). The check passes below 100 %.
pub fn limit_states(load: f64, resistance: f64) -> LimitStateResult {
    if load == 0.0 || resistance == 0.0 {
        return LimitStateResult::NotChecked;
    }
    let ratio_percent = (load / resistance * 100.0).round();
    LimitStateResult::Checked {
        ratio_percent,
        passes: ratio_percent < 100.0,
    }
}

// ============================================================================
// 5.3.8 Cross-Section Reduction
// ============================================================================

/// Input for the net cross-section check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrossSectionInput {
    /// Net section area
    pub net: f64,
    /// Gross section area
    pub gross: f64,
}

/// Result of the net cross-section check
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CrossSectionResult {
    pub net: f64,
    /// 75 % of the gross section
    pub minimum: f64,
    pub passes: bool,
}

impl std::fmt::Display for CrossSectionResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.passes {
            write!(f, "Net section valid: {} >= {} (75% of gross section)", self.net, self.minimum)
        } else {
            write!(f, "Net section not valid: {} < {} (75% of gross section)", self.net, self.minimum)
        }
    }
}

/// The net section must be at least 75 % of the gross section (5.3.8).
pub fn cross_section(net: f64, gross: f64) -> CalcResult<CrossSectionResult> {
    if gross <= 0.0 {
        return Err(CalcError::invalid_input("gross", gross.to_string(), "Gross section must be positive"));
    }
    if net < 0.0 || net > gross {
        return Err(CalcError::invalid_input(
            "net",
            net.to_string(),
            "Net section must be between zero and the gross section",
        ));
    }
    let minimum = NET_SECTION_RATIO * gross;
    Ok(CrossSectionResult {
        net,
        minimum,
        passes: net >= minimum,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_state_rounding() {
        // 99.6 % rounds to 100 and fails
        assert_eq!(
            limit_states(99.6, 100.0),
            LimitStateResult::Checked { ratio_percent: 100.0, passes: false }
        );
        assert_eq!(limit_states(99.4, 100.0).passes(), Some(true));
    }

    #[test]
    fn test_limit_state_without_load() {
        assert_eq!(limit_states(0.0, 12.0), LimitStateResult::NotChecked);
        assert_eq!(limit_states(0.0, 12.0).passes(), None);
    }

    #[test]
    fn test_limit_state_messages() {
        assert_eq!(limit_states(120.0, 100.0).to_string(), "Limit state exceeded: 120%");
        assert_eq!(limit_states(50.0, 100.0).to_string(), "Limit state satisfied: 50%");
    }

    #[test]
    fn test_cross_section_boundary_passes() {
        let result = cross_section(75.0, 100.0).unwrap();
        assert!(result.passes);
        assert_eq!(result.minimum, 75.0);
    }

    #[test]
    fn test_cross_section_below_threshold_fails() {
        assert!(!cross_section(74.9, 100.0).unwrap().passes);
    }

    #[test]
    fn test_cross_section_rejects_bad_areas() {
        assert!(cross_section(10.0, 0.0).is_err());
        assert!(cross_section(120.0, 100.0).is_err());
    }

    #[test]
    fn test_result_json_shape() {
        let json = serde_json::to_string(&limit_states(45.0, 50.0)).unwrap();
        assert!(json.contains("\"status\":\"Checked\""));
    }
}
