//! Maximum-weight independent set on weighted trees.
//!
//! The [`domain`] layer holds the tree model and the post-order DP; the
//! remaining layers read the token-stream input format, load settings and
//! drive the `tree-mwis` binary.
//!
//! ```
//! use tree_mwis::domain::{max_weight_independent_set, TreeBuilder};
//!
//! let tree = TreeBuilder::new(vec![5, 1, 1, 5])
//!     .edges([(1, 2), (2, 3), (3, 4)])
//!     .build()?;
//! assert_eq!(max_weight_independent_set(&tree)?, 10);
//! # Ok::<(), tree_mwis::domain::DomainError>(())
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
