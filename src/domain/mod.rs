//! Domain layer: entities and business logic
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod database;
pub mod entities;
pub mod error;
pub mod sequence;

pub use arena::{ProfileTree, TreeIterator, TreeNode};
pub use database::{DomainResult, ForensicDatabase};
pub use entities::*;
pub use error::DomainError;
pub use sequence::{occurrences, ReferenceSequences};
