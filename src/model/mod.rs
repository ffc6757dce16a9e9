//! Model layer - centralized state management
//!
//! This module contains all state-related types:
//! - `DomainState` - Business/data state (records, profile)
//! - `Record`, `ColumnDef`, `Pagination` - the table data model
//! - The declarative validation engine and per-category schemas
//! - `ModalStack` - Modal overlay management

pub mod column;
pub mod domain;
pub mod modal;
pub mod pagination;
pub mod profile;
pub mod record;
pub mod schema;
pub mod ui;
pub mod validation;

// Re-export commonly used types
pub use column::{ColumnDef, CELL_PLACEHOLDER};
pub use domain::DomainState;
pub use modal::{Modal, ModalStack};
pub use pagination::Pagination;
pub use profile::FacultyProfile;
pub use record::Record;
pub use schema::{Category, FormSchema, ProfileStep};
pub use ui::AppMode;
pub use validation::{validate_field, FormErrors, RuleSet};
