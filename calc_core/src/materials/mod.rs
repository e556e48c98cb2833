//! # Materials Database
//!
//! Reference property tables used by the design checks, and the
//! [`PropertyStore`] seam through which every engine reads them.
//!
//! ## Tables
//!
//! - **Subfloor panels** (Table A.1): stiffness and density of OSB, DFP and
//!   CSP sheathing, also used for panel toppings (Table A.2)
//! - **Lumber strengths** (Tables 6.3 to 6.9): specified strengths per
//!   category, species group and grade
//! - **Lumber sizes** (6.5.2): net dimensions for each nominal size
//!
//! Engines never reach for a global table. They take `&dyn PropertyStore`,
//! normally the built-in [`TableStore`], so a fixture or a user-supplied
//! table file can stand in.
//!
//! ## Example
//!
//! ```rust
//! use o86_core::materials::{PropertyStore, TableStore};
//!
//! let store = TableStore::builtin().unwrap();
//! let panel = store.subfloor_panel("CSP 5/8").unwrap();
//! assert_eq!(panel.thickness_mm, 15.5);
//!
//! // A miss is an error, never a zero-valued record
//! assert!(store.subfloor_panel("CSP 9/16").is_err());
//! ```

pub mod lumber_sizes;
pub mod panels;
pub mod sawn_lumber;
pub mod store;

pub use lumber_sizes::NominalSize;
pub use panels::{SubfloorPanel, Topping, ToppingProperties};
pub use sawn_lumber::{LumberCategory, LumberStrengths, SpeciesGroup};
pub use store::TableStore;

use crate::errors::CalcResult;

/// Table names reported in `PropertyNotFound` errors
pub mod tables {
    pub const SUBFLOOR_PANELS: &str = "subfloor_panels";
    pub const LUMBER_STRENGTHS: &str = "lumber_strengths";
    pub const LUMBER_SIZES: &str = "lumber_sizes";
}

/// Read-only lookup of reference property records.
///
/// Implementations must return `PropertyNotFound` for unknown keys rather
/// than a default record: a zero stiffness or mass would silently pass
/// through the vibration formulas.
pub trait PropertyStore {
    /// Subfloor or topping panel by identifier (e.g. "OSB 5/8")
    fn subfloor_panel(&self, id: &str) -> CalcResult<SubfloorPanel>;

    /// Specified strengths for a category, species group and grade
    fn lumber_strength(&self, category: LumberCategory, species: &str, grade: &str)
        -> CalcResult<LumberStrengths>;

    /// Net sizes for a nominal dimension in inches.
    ///
    /// `None` is not an error: callers fall back to a direct inch conversion.
    fn nominal_size(&self, nominal: u32) -> Option<NominalSize>;
}

/// Normalize a lookup key: trimmed, lowercase, single spaces.
pub(crate) fn normalize_key(key: &str) -> String {
    key.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
pub(crate) mod fixtures {
    //! In-memory store used by engine tests.

    use std::collections::HashMap;

    use super::*;
    use crate::errors::CalcError;

    #[derive(Default)]
    pub struct FixtureStore {
        pub panels: HashMap<String, SubfloorPanel>,
        pub strengths: Vec<(LumberCategory, String, String, LumberStrengths)>,
        pub sizes: Vec<NominalSize>,
    }

    impl FixtureStore {
        pub fn with_panel(mut self, panel: SubfloorPanel) -> Self {
            self.panels.insert(normalize_key(&panel.panel), panel);
            self
        }

        pub fn with_strength(
            mut self,
            category: LumberCategory,
            species: &str,
            grade: &str,
            strengths: LumberStrengths,
        ) -> Self {
            self.strengths
                .push((category, species.to_string(), grade.to_string(), strengths));
            self
        }

        pub fn with_size(mut self, size: NominalSize) -> Self {
            self.sizes.push(size);
            self
        }
    }

    impl PropertyStore for FixtureStore {
        fn subfloor_panel(&self, id: &str) -> CalcResult<SubfloorPanel> {
            self.panels
                .get(&normalize_key(id))
                .cloned()
                .ok_or_else(|| CalcError::property_not_found(tables::SUBFLOOR_PANELS, id))
        }

        fn lumber_strength(
            &self,
            category: LumberCategory,
            species: &str,
            grade: &str,
        ) -> CalcResult<LumberStrengths> {
            self.strengths
                .iter()
                .find(|(c, s, g, _)| *c == category && s == species && g == grade)
                .map(|(_, _, _, strengths)| *strengths)
                .ok_or_else(|| {
                    CalcError::property_not_found(
                        tables::LUMBER_STRENGTHS,
                        format!("{category}/{species}/{grade}"),
                    )
                })
        }

        fn nominal_size(&self, nominal: u32) -> Option<NominalSize> {
            self.sizes.iter().find(|s| s.nominal == nominal).copied()
        }
    }

    /// CSP 5/8 (Table A.1)
    pub fn csp_5_8() -> SubfloorPanel {
        SubfloorPanel {
            panel: "CSP 5/8".to_string(),
            thickness_mm: 15.5,
            bending_stiffness_parallel: 2483.0,
            bending_stiffness_perpendicular: 465.0,
            axial_stiffness_parallel: 80.6e6,
            axial_stiffness_perpendicular: 60.4e6,
            density: 450.0,
        }
    }

    /// OSB 3/4 (Table A.1)
    pub fn osb_3_4() -> SubfloorPanel {
        SubfloorPanel {
            panel: "OSB 3/4".to_string(),
            thickness_mm: 18.5,
            bending_stiffness_parallel: 3219.0,
            bending_stiffness_perpendicular: 1319.0,
            axial_stiffness_parallel: 74.0e6,
            axial_stiffness_perpendicular: 55.5e6,
            density: 640.0,
        }
    }

    /// DFP 1/2 (Table A.1)
    pub fn dfp_1_2() -> SubfloorPanel {
        SubfloorPanel {
            panel: "DFP 1/2".to_string(),
            thickness_mm: 12.5,
            bending_stiffness_parallel: 1546.0,
            bending_stiffness_perpendicular: 277.0,
            axial_stiffness_parallel: 75.0e6,
            axial_stiffness_perpendicular: 56.2e6,
            density: 500.0,
        }
    }

    pub fn store() -> FixtureStore {
        FixtureStore::default()
            .with_panel(csp_5_8())
            .with_panel(osb_3_4())
            .with_panel(dfp_1_2())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_key() {
        assert_eq!(normalize_key("  CSP   5/8 "), "csp 5/8");
        assert_eq!(normalize_key("N1-N2"), "n1-n2");
    }
}
