//! IntelliClaim Repository - rule storage and bulk import
//!
//! The engine itself holds no persistent state; rules live behind the
//! [`RuleRepository`] trait. This crate ships the trait, an in-memory
//! implementation, and the bulk import loader for tabular (CSV) and
//! line-oriented plain-text rule files.

pub mod error;
pub mod loader;
pub mod memory;
pub mod traits;

pub use error::{RepositoryError, RepositoryResult};
pub use loader::{ImportReport, RowError, RulePreview, RuleImporter, PREVIEW_ROWS};
pub use memory::InMemoryRepository;
pub use traits::RuleRepository;
