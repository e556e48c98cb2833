//! Subfloor panels (Table A.1) and floor toppings (Table A.2).
//!
//! Panel stiffness values are per metre of floor width: bending stiffness in
//! N·m²/m and axial stiffness in N/m. Thickness is stored in millimeters as
//! printed in the table; [`SubfloorPanel::thickness_m`] gives the value the
//! vibration formulas use.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::materials::PropertyStore;
use crate::units::{Meters, Millimeters};

/// Elastic modulus of a concrete topping (N/m²)
pub const CONCRETE_MODULUS: f64 = 22e9;

/// Density of a concrete topping (kg/m³)
pub const CONCRETE_DENSITY: f64 = 2300.0;

/// One row of Table A.1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubfloorPanel {
    /// Panel identifier, e.g. "CSP 5/8"
    pub panel: String,
    /// Panel thickness ts (mm)
    pub thickness_mm: f64,
    /// (EI)s parallel to the joists (N·m²/m)
    pub bending_stiffness_parallel: f64,
    /// (EI)s perpendicular to the joists (N·m²/m)
    pub bending_stiffness_perpendicular: f64,
    /// (EA)s parallel to the joists (N/m)
    pub axial_stiffness_parallel: f64,
    /// (EA)s perpendicular to the joists (N/m)
    pub axial_stiffness_perpendicular: f64,
    /// Density ρs (kg/m³)
    pub density: f64,
}

impl SubfloorPanel {
    /// Thickness in meters
    pub fn thickness_m(&self) -> f64 {
        Meters::from(Millimeters(self.thickness_mm)).0
    }
}

/// Floor topping over the subfloor.
///
/// ## JSON Example
///
/// ```json
/// { "kind": "concrete", "thickness_m": 0.038 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Topping {
    /// No topping (or one that is not structural)
    #[default]
    None,
    /// Cast concrete topping of the given thickness
    Concrete { thickness_m: f64 },
    /// A second layer of Table A.1 panel
    Panel { panel: String },
}

/// Derived properties of a topping (Table A.2), per metre of width.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ToppingProperties {
    /// Thickness tc (m)
    pub thickness_m: f64,
    /// Elastic modulus Ec (N/m²)
    pub modulus: f64,
    /// Density ρc (kg/m³)
    pub density: f64,
    /// Axial stiffness (EA)c (N/m)
    pub axial_stiffness: f64,
}

impl ToppingProperties {
    /// Bending stiffness of the topping layer, (EI)c = Ec·tc³/12
    pub fn bending_stiffness(&self) -> f64 {
        self.modulus * self.thickness_m.powi(3) / 12.0
    }
}

impl Topping {
    /// Parse from a menu or config string.
    ///
    /// Accepts "none"/"aucun", "concrete"/"béton" (which needs a thickness)
    /// or any panel identifier, which is validated later against the store.
    pub fn from_str_flexible(s: &str, thickness_m: f64) -> CalcResult<Self> {
        let key = s.trim();
        match key.to_lowercase().as_str() {
            "" => Err(CalcError::missing_field("topping")),
            "none" | "aucun" | "aucun/autre" | "other" | "autre" => Ok(Topping::None),
            "concrete" | "béton" | "beton" => Ok(Topping::Concrete { thickness_m }),
            _ => Ok(Topping::Panel {
                panel: key.to_string(),
            }),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Topping::None)
    }

    pub fn is_concrete(&self) -> bool {
        matches!(self, Topping::Concrete { .. })
    }

    /// Resolve the Table A.2 properties for this topping.
    pub fn properties(&self, store: &dyn PropertyStore) -> CalcResult<ToppingProperties> {
        match self {
            Topping::None => Ok(ToppingProperties::default()),
            Topping::Concrete { thickness_m } => {
                if *thickness_m <= 0.0 {
                    return Err(CalcError::invalid_input(
                        "topping.thickness_m",
                        thickness_m.to_string(),
                        "Concrete topping thickness must be positive",
                    ));
                }
                Ok(ToppingProperties {
                    thickness_m: *thickness_m,
                    modulus: CONCRETE_MODULUS,
                    density: CONCRETE_DENSITY,
                    axial_stiffness: CONCRETE_MODULUS * thickness_m,
                })
            }
            Topping::Panel { panel } => {
                let row = store.subfloor_panel(panel)?;
                let tc = row.thickness_m();
                Ok(ToppingProperties {
                    thickness_m: tc,
                    modulus: 12.0 * row.bending_stiffness_perpendicular / tc.powi(3),
                    density: row.density,
                    axial_stiffness: row.axial_stiffness_perpendicular,
                })
            }
        }
    }

    pub fn display_name(&self) -> String {
        match self {
            Topping::None => "None".to_string(),
            Topping::Concrete { thickness_m } => format!("Concrete {:.0} mm", thickness_m * 1000.0),
            Topping::Panel { panel } => panel.clone(),
        }
    }
}

impl std::fmt::Display for Topping {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::fixtures;
    use approx::assert_relative_eq;

    #[test]
    fn test_no_topping_is_all_zero() {
        let store = fixtures::store();
        let props = Topping::None.properties(&store).unwrap();
        assert_eq!(props, ToppingProperties::default());
        assert_eq!(props.bending_stiffness(), 0.0);
    }

    #[test]
    fn test_concrete_topping() {
        let store = fixtures::store();
        let props = Topping::Concrete { thickness_m: 0.038 }.properties(&store).unwrap();
        assert_eq!(props.modulus, 22e9);
        assert_eq!(props.density, 2300.0);
        assert_relative_eq!(props.axial_stiffness, 22e9 * 0.038);
    }

    #[test]
    fn test_panel_topping_recovers_bending_stiffness() {
        let store = fixtures::store();
        let props = Topping::Panel { panel: "DFP 1/2".into() }.properties(&store).unwrap();
        assert_relative_eq!(props.thickness_m, 0.0125);
        assert_relative_eq!(props.bending_stiffness(), 277.0, max_relative = 1e-12);
        assert_eq!(props.axial_stiffness, 56.2e6);
    }

    #[test]
    fn test_unknown_panel_topping_is_not_found() {
        let store = fixtures::store();
        let err = Topping::Panel { panel: "OSB 9/16".into() }
            .properties(&store)
            .unwrap_err();
        assert_eq!(err.error_code(), "PROPERTY_NOT_FOUND");
    }

    #[test]
    fn test_from_str_flexible() {
        assert_eq!(Topping::from_str_flexible("aucun", 0.0).unwrap(), Topping::None);
        assert_eq!(
            Topping::from_str_flexible("Béton", 0.05).unwrap(),
            Topping::Concrete { thickness_m: 0.05 }
        );
        assert_eq!(
            Topping::from_str_flexible("OSB 3/4", 0.0).unwrap(),
            Topping::Panel { panel: "OSB 3/4".into() }
        );
    }

    #[test]
    fn test_topping_json_shape() {
        let json = serde_json::to_string(&Topping::Concrete { thickness_m: 0.038 }).unwrap();
        assert_eq!(json, r#"{"kind":"concrete","thickness_m":0.038}"#);
    }
}
