//! TOML-backed property store.
//!
//! The built-in tables are compiled into the binary from
//! `data/csa_o86_19.toml` and parsed once on first use. A table file with
//! the same layout can be loaded at runtime with [`TableStore::from_path`].
//!
//! ## File Layout
//!
//! ```toml
//! [[subfloor_panels]]
//! panel = "CSP 5/8"
//! thickness_mm = 15.5
//! bending_stiffness_parallel = 2483.0
//! bending_stiffness_perpendicular = 465.0
//! axial_stiffness_parallel = 80600000.0
//! axial_stiffness_perpendicular = 60400000.0
//! density = 450.0
//!
//! [[lumber_strengths]]
//! category = "Beam"
//! species = "spf"
//! grade = "ss"
//! fb = 13.6
//! fv = 1.2
//! fc = 9.5
//! fcp = 5.3
//! ft = 7.0
//! e = 8500.0
//! e05 = 6000.0
//!
//! [[lumber_sizes]]
//! nominal = 2
//! dry = 38
//! green = 40
//! dry_rough = 41
//! green_rough = 43
//! ```

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use once_cell::sync::Lazy;
use serde::Deserialize;

use crate::errors::{CalcError, CalcResult};
use crate::materials::{
    normalize_key, tables, LumberCategory, LumberStrengths, NominalSize, PropertyStore, SubfloorPanel,
};

const BUILTIN_TABLES: &str = include_str!("../../data/csa_o86_19.toml");

static BUILTIN: Lazy<CalcResult<TableStore>> = Lazy::new(|| TableStore::from_toml_str(BUILTIN_TABLES));

#[derive(Debug, Deserialize)]
struct TableFile {
    #[serde(default)]
    subfloor_panels: Vec<SubfloorPanel>,
    #[serde(default)]
    lumber_strengths: Vec<StrengthRow>,
    #[serde(default)]
    lumber_sizes: Vec<NominalSize>,
}

#[derive(Debug, Deserialize)]
struct StrengthRow {
    category: LumberCategory,
    species: String,
    grade: String,
    fb: f64,
    fv: f64,
    fc: f64,
    fcp: f64,
    ft: f64,
    e: f64,
    e05: f64,
}

type StrengthKey = (LumberCategory, String, String);

/// In-memory property tables.
#[derive(Debug, Clone, Default)]
pub struct TableStore {
    panels: BTreeMap<String, SubfloorPanel>,
    strengths: HashMap<StrengthKey, LumberStrengths>,
    sizes: BTreeMap<u32, NominalSize>,
}

impl TableStore {
    /// The tables shipped with the crate.
    pub fn builtin() -> CalcResult<&'static TableStore> {
        BUILTIN.as_ref().map_err(Clone::clone)
    }

    /// Parse tables from TOML text.
    pub fn from_toml_str(text: &str) -> CalcResult<Self> {
        let file: TableFile = toml::from_str(text)
            .map_err(|e| CalcError::serialization(format!("Invalid property table: {e}")))?;

        let mut store = TableStore::default();

        for panel in file.subfloor_panels {
            let key = normalize_key(&panel.panel);
            if store.panels.insert(key, panel.clone()).is_some() {
                return Err(duplicate(tables::SUBFLOOR_PANELS, &panel.panel));
            }
        }

        for row in file.lumber_strengths {
            let key = (row.category, normalize_key(&row.species), normalize_key(&row.grade));
            let strengths = LumberStrengths {
                fb: row.fb,
                fv: row.fv,
                fc: row.fc,
                fcp: row.fcp,
                ft: row.ft,
                e: row.e,
                e05: row.e05,
            };
            if store.strengths.insert(key, strengths).is_some() {
                return Err(duplicate(
                    tables::LUMBER_STRENGTHS,
                    &format!("{}/{}/{}", row.category, row.species, row.grade),
                ));
            }
        }

        for size in file.lumber_sizes {
            if store.sizes.insert(size.nominal, size).is_some() {
                return Err(duplicate(tables::LUMBER_SIZES, &size.nominal.to_string()));
            }
        }

        tracing::debug!(
            panels = store.panels.len(),
            strengths = store.strengths.len(),
            sizes = store.sizes.len(),
            "loaded property tables"
        );
        Ok(store)
    }

    /// Load tables from a TOML file.
    pub fn from_path(path: &Path) -> CalcResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| CalcError::file_error("read tables", path.display().to_string(), e.to_string()))?;
        Self::from_toml_str(&text)
    }

    /// Panels in identifier order
    pub fn panels(&self) -> impl Iterator<Item = &SubfloorPanel> {
        self.panels.values()
    }

    /// Strength rows sorted by category, species and grade
    pub fn strengths(&self) -> Vec<(LumberCategory, &str, &str, LumberStrengths)> {
        let mut rows: Vec<_> = self
            .strengths
            .iter()
            .map(|((c, s, g), v)| (*c, s.as_str(), g.as_str(), *v))
            .collect();
        rows.sort_by(|a, b| {
            (a.0.code(), a.1, a.2).cmp(&(b.0.code(), b.1, b.2))
        });
        rows
    }

    /// Size rows in nominal order
    pub fn sizes(&self) -> impl Iterator<Item = &NominalSize> {
        self.sizes.values()
    }
}

fn duplicate(table: &str, key: &str) -> CalcError {
    CalcError::serialization(format!("Duplicate key '{key}' in {table}"))
}

impl PropertyStore for TableStore {
    fn subfloor_panel(&self, id: &str) -> CalcResult<SubfloorPanel> {
        self.panels
            .get(&normalize_key(id))
            .cloned()
            .ok_or_else(|| CalcError::property_not_found(tables::SUBFLOOR_PANELS, id))
    }

    fn lumber_strength(&self, category: LumberCategory, species: &str, grade: &str) -> CalcResult<LumberStrengths> {
        let key = (category, normalize_key(species), normalize_key(grade));
        self.strengths.get(&key).copied().ok_or_else(|| {
            CalcError::property_not_found(tables::LUMBER_STRENGTHS, format!("{category}/{species}/{grade}"))
        })
    }

    fn nominal_size(&self, nominal: u32) -> Option<NominalSize> {
        self.sizes.get(&nominal).copied()
    }
}
