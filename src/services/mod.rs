//! External service interactions
//!
//! This module contains services that touch the filesystem:
//! - Record and profile persistence (JSON)
//! - CSV export

pub mod export;
pub mod store;

pub use export::export_csv;
pub use store::RecordStore;
