//! Lumber Sizes (CSA O86 6.5.2)
//!
//! Net dimensions for nominal sizes, dressed or rough, dry or green.
//! Nominal sizes without a table row fall back to a straight inch-to-mm
//! conversion, rounded to the nearest millimeter.
//!
//! ## Example
//!
//! ```rust
//! use o86_core::materials::{lumber_sizes::{net_size, Seasoning, Surfacing}, TableStore};
//!
//! let store = TableStore::builtin().unwrap();
//! assert_eq!(net_size(store, 2, Seasoning::Dry, Surfacing::Dressed), 38.0);
//! assert_eq!(net_size(store, 5, Seasoning::Green, Surfacing::Dressed), 117.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::materials::PropertyStore;
use crate::units::{Inches, Millimeters};

/// One row of the lumber size table (mm)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NominalSize {
    /// Nominal dimension (in)
    pub nominal: u32,
    /// Dressed, dry (moisture content ≤ 19%)
    pub dry: f64,
    /// Dressed, green
    pub green: f64,
    /// Rough sawn, dry
    pub dry_rough: f64,
    /// Rough sawn, green
    pub green_rough: f64,
}

/// Moisture condition at manufacture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Seasoning {
    #[default]
    Dry,
    Green,
}

/// Surface finish
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Surfacing {
    #[default]
    Dressed,
    Rough,
}

impl NominalSize {
    /// Net dimension for the given condition
    pub fn net(&self, seasoning: Seasoning, surfacing: Surfacing) -> f64 {
        match (seasoning, surfacing) {
            (Seasoning::Dry, Surfacing::Dressed) => self.dry,
            (Seasoning::Green, Surfacing::Dressed) => self.green,
            (Seasoning::Dry, Surfacing::Rough) => self.dry_rough,
            (Seasoning::Green, Surfacing::Rough) => self.green_rough,
        }
    }
}

/// Net dimension (mm) for a nominal size in inches.
pub fn net_size(store: &dyn PropertyStore, nominal: u32, seasoning: Seasoning, surfacing: Surfacing) -> f64 {
    match store.nominal_size(nominal) {
        Some(row) => row.net(seasoning, surfacing),
        None => {
            let mm = Millimeters::from(Inches(nominal as f64)).rounded();
            tracing::debug!(nominal, mm, "nominal size not tabulated, converting directly");
            mm
        }
    }
}

/// Parse a nominal designation such as "2x10" or "4 X 6" into (width, depth).
pub fn parse_nominal(designation: &str) -> CalcResult<(u32, u32)> {
    let lower = designation.to_lowercase();
    let mut parts = lower.split('x').map(str::trim);
    let parsed = match (parts.next(), parts.next(), parts.next()) {
        (Some(b), Some(d), None) => b.parse::<u32>().ok().zip(d.parse::<u32>().ok()),
        _ => None,
    };
    parsed.ok_or_else(|| {
        CalcError::invalid_input(
            "nominal_size",
            designation,
            "Expected format: 'BxD' in inches (e.g., '2x10')",
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::fixtures::FixtureStore;

    fn store() -> FixtureStore {
        FixtureStore::default()
            .with_size(NominalSize { nominal: 2, dry: 38.0, green: 40.0, dry_rough: 41.0, green_rough: 43.0 })
            .with_size(NominalSize { nominal: 5, dry: 114.0, green: 117.0, dry_rough: 117.0, green_rough: 120.0 })
    }

    #[test]
    fn test_table_lookup() {
        let store = store();
        assert_eq!(net_size(&store, 2, Seasoning::Dry, Surfacing::Dressed), 38.0);
        assert_eq!(net_size(&store, 5, Seasoning::Green, Surfacing::Dressed), 117.0);
        assert_eq!(net_size(&store, 5, Seasoning::Green, Surfacing::Rough), 120.0);
    }

    #[test]
    fn test_fallback_conversion() {
        let store = store();
        // 9" is not tabulated: round(9 * 25.4) = 229
        assert_eq!(net_size(&store, 9, Seasoning::Dry, Surfacing::Dressed), 229.0);
    }

    #[test]
    fn test_parse_nominal() {
        assert_eq!(parse_nominal("2x10").unwrap(), (2, 10));
        assert_eq!(parse_nominal("4 X 6").unwrap(), (4, 6));
        assert!(parse_nominal("2by4").is_err());
        assert!(parse_nominal("2x4x8").is_err());
    }
}
