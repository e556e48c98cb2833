//! # o86_core - CSA O86:19 Timber Design Checks
//!
//! `o86_core` implements the design checks of clauses 5 and 6 of CSA O86:19
//! (general design and sawn lumber) together with the floor vibration and
//! fire resistance procedures of Annexes A and B. All inputs and outputs are
//! JSON-serializable so a check can be stored in a project file, replayed, or
//! sent to another tool unchanged.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: pure functions that take input and return results
//! - **Injected tables**: reference data comes through a [`PropertyStore`]
//! - **Loud failures**: code rejections are [`CalcError`] values, never a zero
//!
//! ## Quick Start
//!
//! ```rust
//! use o86_core::calculations::fire::{effective_section, FaceProtection, FireProduct, FireSectionInput};
//!
//! let section = effective_section(&FireSectionInput {
//!     duration_min: 30.0,
//!     width_mm: 140.0,
//!     depth_mm: 350.0,
//!     wide_faces: FaceProtection::TwoSides,
//!     narrow_faces: FaceProtection::TwoSides,
//!     product: FireProduct::SawnLumber,
//! })
//! .unwrap();
//! assert_eq!(section.width_mm, 140.0);
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - clause 5 and 6 checks, vibration and fire engines
//! - [`factors`] - load duration and other modification factors
//! - [`materials`] - property tables and the [`PropertyStore`] trait
//! - [`project`] - project container, metadata, and settings
//! - [`file_io`] - atomic project saves and loads
//! - [`config`] - TOML application settings
//! - [`units`] - unit wrappers
//! - [`errors`] - structured error types

pub mod calculations;
pub mod config;
pub mod errors;
pub mod factors;
pub mod file_io;
pub mod materials;
pub mod project;
pub mod units;

pub use calculations::{CalculationItem, CalculationOutcome};
pub use config::AppConfig;
pub use errors::{CalcError, CalcResult};
pub use file_io::{load_project, save_project};
pub use materials::{PropertyStore, TableStore};
pub use project::{GlobalSettings, Project, ProjectItem, ProjectMetadata};
