//! Domain layer: tree model and the independent-set DP
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod builder;
pub mod error;
pub mod evaluator;
pub mod traversal;
pub mod tree;

pub use builder::TreeBuilder;
pub use error::{DomainError, DomainResult, MalformedTreeError};
pub use evaluator::{max_weight_independent_set, DpTable, Evaluator, Recurrence, Solution};
pub use traversal::{PostOrder, Step};
pub use tree::{IndexBase, Tree};
