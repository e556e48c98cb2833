//! # Project Data Structures
//!
//! A `Project` is an ordered list of labelled design checks plus the
//! metadata of who ran them. Projects serialize to `.o86` files as
//! human-readable JSON.
//!
//! ## Structure
//!
//! ```text
//! Project
//! ├── meta: ProjectMetadata (version, engineer, job info, timestamps)
//! ├── settings: GlobalSettings (code edition, floor defaults)
//! └── items: Vec<ProjectItem> (id, label, check)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use o86_core::calculations::{CalculationItem, LateralBraceInput};
//! use o86_core::project::Project;
//!
//! let mut project = Project::new("Jane Engineer", "25-042", "ACME Corp");
//! project.add_item("Brace B-1", CalculationItem::LateralBrace(LateralBraceInput { force_kn: 80.0 }));
//!
//! let json = serde_json::to_string_pretty(&project).unwrap();
//! assert!(json.contains("Brace B-1"));
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculations::{CalculationItem, CalculationOutcome};
use crate::calculations::vibration::DEFAULT_JOIST_SPACING_M;
use crate::errors::CalcResult;
use crate::materials::PropertyStore;

/// Current schema version for .o86 files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// File extension used for saved projects
pub const FILE_EXTENSION: &str = "o86";

/// Root project container.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Project metadata (version, engineer, job info)
    pub meta: ProjectMetadata,

    /// Global settings
    #[serde(default)]
    pub settings: GlobalSettings,

    /// Checks in the order they were added
    #[serde(default)]
    pub items: Vec<ProjectItem>,
}

/// A labelled check stored in a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectItem {
    pub id: Uuid,
    #[serde(default)]
    pub label: String,
    pub item: CalculationItem,
}

/// Outcome of one project item after evaluation.
#[derive(Debug, Clone)]
pub struct ItemReport<'a> {
    pub item: &'a ProjectItem,
    pub outcome: CalcResult<CalculationOutcome>,
}

impl Project {
    /// Create a new empty project.
    ///
    /// # Example
    ///
    /// ```rust
    /// use o86_core::project::Project;
    ///
    /// let project = Project::new("John Doe", "25-001", "Client Corp");
    /// assert_eq!(project.meta.engineer, "John Doe");
    /// assert!(project.items.is_empty());
    /// ```
    pub fn new(engineer: impl Into<String>, job_id: impl Into<String>, client: impl Into<String>) -> Self {
        let now = Utc::now();
        Project {
            meta: ProjectMetadata {
                version: SCHEMA_VERSION.to_string(),
                engineer: engineer.into(),
                job_id: job_id.into(),
                client: client.into(),
                created: now,
                modified: now,
            },
            settings: GlobalSettings::default(),
            items: Vec::new(),
        }
    }

    /// Append a check and return the id assigned to it.
    pub fn add_item(&mut self, label: impl Into<String>, item: CalculationItem) -> Uuid {
        let id = Uuid::new_v4();
        self.items.push(ProjectItem {
            id,
            label: label.into(),
            item,
        });
        self.touch();
        id
    }

    /// Remove a check by id, keeping the order of the others.
    pub fn remove_item(&mut self, id: &Uuid) -> Option<ProjectItem> {
        let index = self.items.iter().position(|p| p.id == *id)?;
        let removed = self.items.remove(index);
        self.touch();
        Some(removed)
    }

    pub fn get_item(&self, id: &Uuid) -> Option<&ProjectItem> {
        self.items.iter().find(|p| p.id == *id)
    }

    /// Mutable access marks the project as modified.
    pub fn get_item_mut(&mut self, id: &Uuid) -> Option<&mut ProjectItem> {
        let index = self.items.iter().position(|p| p.id == *id)?;
        self.meta.modified = Utc::now();
        self.items.get_mut(index)
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Evaluate every check in order.
    ///
    /// A failing item does not stop the others; each report carries its
    /// own result.
    pub fn evaluate_all<'a>(&'a self, store: &dyn PropertyStore) -> Vec<ItemReport<'a>> {
        self.items
            .iter()
            .map(|item| {
                let outcome = item.item.evaluate(store);
                if let Err(e) = &outcome {
                    tracing::debug!(label = %item.label, error = %e, "project item rejected");
                }
                ItemReport { item, outcome }
            })
            .collect()
    }
}

impl Default for Project {
    fn default() -> Self {
        Project::new("", "", "")
    }
}

/// Project metadata stored in the file header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// Name of the responsible engineer
    pub engineer: String,

    /// Job/project number
    pub job_id: String,

    pub client: String,

    pub created: DateTime<Utc>,

    pub modified: DateTime<Utc>,
}

/// Global project settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalSettings {
    /// Design standard edition
    pub code: String,

    /// Subfloor used when a floor check does not name one
    pub default_subfloor: String,

    /// Joist spacing in metres for new floor checks
    pub default_joist_spacing_m: f64,
}

impl Default for GlobalSettings {
    fn default() -> Self {
        GlobalSettings {
            code: "CSA O86:19".to_string(),
            default_subfloor: "CSP 5/8".to_string(),
            default_joist_spacing_m: DEFAULT_JOIST_SPACING_M,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::{CrossSectionInput, LateralBraceInput};
    use crate::materials::fixtures;

    fn brace(force_kn: f64) -> CalculationItem {
        CalculationItem::LateralBrace(LateralBraceInput { force_kn })
    }

    #[test]
    fn test_project_creation() {
        let project = Project::new("John Doe", "25-001", "Acme Corp");
        assert_eq!(project.meta.engineer, "John Doe");
        assert_eq!(project.meta.job_id, "25-001");
        assert_eq!(project.meta.client, "Acme Corp");
        assert_eq!(project.meta.version, SCHEMA_VERSION);
        assert_eq!(project.settings.code, "CSA O86:19");
    }

    #[test]
    fn test_project_serialization() {
        let mut project = Project::new("Jane Engineer", "25-042", "Test Client");
        project.add_item("B-1", brace(40.0));
        let json = serde_json::to_string_pretty(&project).unwrap();

        assert!(json.contains("Jane Engineer"));
        assert!(json.contains("CSA O86:19"));
        assert!(json.contains("\"type\": \"LateralBrace\""));

        let roundtrip: Project = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.meta.engineer, "Jane Engineer");
        assert_eq!(roundtrip.items.len(), 1);
        assert_eq!(roundtrip.items[0].label, "B-1");
    }

    #[test]
    fn test_add_remove_keeps_order() {
        let mut project = Project::new("Engineer", "25-001", "Client");
        let a = project.add_item("A", brace(10.0));
        let b = project.add_item("B", brace(20.0));
        let c = project.add_item("C", brace(30.0));
        assert_eq!(project.item_count(), 3);

        let removed = project.remove_item(&b).unwrap();
        assert_eq!(removed.label, "B");
        let labels: Vec<_> = project.items.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, ["A", "C"]);
        assert!(project.get_item(&a).is_some());
        assert!(project.get_item(&c).is_some());
        assert!(project.remove_item(&b).is_none());
    }

    #[test]
    fn test_get_item_mut_touches() {
        let mut project = Project::new("Engineer", "25-001", "Client");
        let id = project.add_item("A", brace(10.0));
        let before = project.meta.modified;
        project.get_item_mut(&id).unwrap().label = "A-2".to_string();
        assert!(project.meta.modified >= before);
        assert_eq!(project.get_item(&id).unwrap().label, "A-2");
    }

    #[test]
    fn test_evaluate_all_reports_each_item() {
        let store = fixtures::store();
        let mut project = Project::new("Engineer", "25-001", "Client");
        project.add_item("brace", brace(80.0));
        project.add_item(
            "bad section",
            CalculationItem::CrossSection(CrossSectionInput { net: 10.0, gross: 0.0 }),
        );
        project.add_item("section", CalculationItem::CrossSection(CrossSectionInput { net: 7500.0, gross: 10000.0 }));

        let reports = project.evaluate_all(&store);
        assert_eq!(reports.len(), 3);
        assert!(reports[0].outcome.is_ok());
        assert!(reports[1].outcome.is_err());
        assert_eq!(reports[2].outcome.as_ref().unwrap().passes(), Some(true));
    }

    #[test]
    fn test_missing_settings_use_defaults() {
        let json = r#"{
            "meta": {
                "version": "0.1.0",
                "engineer": "E",
                "job_id": "J",
                "client": "C",
                "created": "2025-01-01T00:00:00Z",
                "modified": "2025-01-01T00:00:00Z"
            }
        }"#;
        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.settings, GlobalSettings::default());
        assert!(project.items.is_empty());
    }
}
