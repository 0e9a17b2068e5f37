//! Weighted tree stored as flat adjacency lists.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::traversal::PostOrder;

/// Numbering scheme of vertex ids at the input boundary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IndexBase {
    /// Vertices are numbered `1..=N`
    #[default]
    One,
    /// Vertices are numbered `0..N`
    Zero,
}

impl IndexBase {
    pub fn offset(self) -> i64 {
        match self {
            IndexBase::One => 1,
            IndexBase::Zero => 0,
        }
    }

    /// Map an external id onto `0..vertices`, `None` if it falls outside.
    pub fn normalize(self, id: i64, vertices: usize) -> Option<usize> {
        let internal = id.checked_sub(self.offset())?;
        usize::try_from(internal).ok().filter(|&v| v < vertices)
    }

    /// Map an internal id back to the external numbering.
    pub fn externalize(self, vertex: usize) -> usize {
        match self {
            IndexBase::One => vertex + 1,
            IndexBase::Zero => vertex,
        }
    }
}

impl fmt::Display for IndexBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexBase::One => write!(f, "one"),
            IndexBase::Zero => write!(f, "zero"),
        }
    }
}

impl FromStr for IndexBase {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "one" | "1" => Ok(IndexBase::One),
            "zero" | "0" => Ok(IndexBase::Zero),
            other => Err(format!("unknown index base {:?}, expected one or zero", other)),
        }
    }
}

/// Immutable weighted tree with vertices `0..N`.
///
/// Each undirected edge is recorded in the neighbor lists of both endpoints.
/// Built through [`TreeBuilder`](crate::domain::TreeBuilder).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree {
    weights: Vec<i64>,
    adjacency: Vec<Vec<usize>>,
}

impl Tree {
    pub(crate) fn from_parts(weights: Vec<i64>, adjacency: Vec<Vec<usize>>) -> Self {
        debug_assert_eq!(weights.len(), adjacency.len());
        Self { weights, adjacency }
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn weight(&self, vertex: usize) -> i64 {
        self.weights[vertex]
    }

    pub fn weights(&self) -> &[i64] {
        &self.weights
    }

    pub fn neighbors(&self, vertex: usize) -> &[usize] {
        &self.adjacency[vertex]
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum::<usize>() / 2
    }

    pub fn check_root(&self, root: usize) -> DomainResult<()> {
        if root < self.len() {
            Ok(())
        } else {
            Err(DomainError::RootOutOfRange {
                root,
                vertices: self.len(),
            })
        }
    }

    /// Post-order walk starting at `root`, see [`PostOrder`].
    pub fn post_order(&self, root: usize) -> DomainResult<PostOrder<'_>> {
        if self.is_empty() {
            return Ok(PostOrder::empty(self));
        }
        self.check_root(root)?;
        Ok(PostOrder::new(self, root))
    }

    /// Vertices on the longest path from `root` down to a leaf.
    ///
    /// Only the component containing `root` is measured. Empty trees have height 0.
    #[instrument(level = "debug", skip(self))]
    pub fn height(&self, root: usize) -> DomainResult<usize> {
        let mut heights = vec![0usize; self.len()];
        let mut max_height = 0;
        for step in self.post_order(root)? {
            if step.component_root != root {
                break;
            }
            let h = heights[step.vertex] + 1;
            heights[step.vertex] = h;
            match step.parent {
                Some(parent) => heights[parent] = heights[parent].max(h),
                None => max_height = h,
            }
        }
        Ok(max_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TreeBuilder;

    #[test]
    fn given_one_based_ids_when_normalizing_then_shifts_down() {
        assert_eq!(IndexBase::One.normalize(1, 3), Some(0));
        assert_eq!(IndexBase::One.normalize(3, 3), Some(2));
        assert_eq!(IndexBase::One.normalize(0, 3), None);
        assert_eq!(IndexBase::One.normalize(4, 3), None);
    }

    #[test]
    fn given_zero_based_ids_when_normalizing_then_keeps_value() {
        assert_eq!(IndexBase::Zero.normalize(0, 3), Some(0));
        assert_eq!(IndexBase::Zero.normalize(-1, 3), None);
        assert_eq!(IndexBase::Zero.normalize(3, 3), None);
    }

    #[test]
    fn given_extreme_id_when_normalizing_then_does_not_overflow() {
        assert_eq!(IndexBase::One.normalize(i64::MIN, 3), None);
    }

    #[test]
    fn given_config_spelling_when_parsing_index_base_then_accepts_names_and_digits() {
        assert_eq!("zero".parse::<IndexBase>(), Ok(IndexBase::Zero));
        assert_eq!(" One ".parse::<IndexBase>(), Ok(IndexBase::One));
        assert_eq!("0".parse::<IndexBase>(), Ok(IndexBase::Zero));
        assert!("two".parse::<IndexBase>().is_err());
    }

    #[test]
    fn given_path_when_measuring_height_from_end_then_counts_all_vertices() {
        let tree = TreeBuilder::new(vec![1, 2, 3, 4])
            .edges([(1, 2), (2, 3), (3, 4)])
            .build()
            .unwrap();

        assert_eq!(tree.height(0).unwrap(), 4);
        assert_eq!(tree.height(1).unwrap(), 3);
        assert_eq!(tree.edge_count(), 3);
    }

    #[test]
    fn given_empty_tree_when_measuring_height_then_zero() {
        let tree = TreeBuilder::new(vec![]).build().unwrap();
        assert_eq!(tree.height(0).unwrap(), 0);
    }

    #[test]
    fn given_root_out_of_range_when_walking_then_errors() {
        let tree = TreeBuilder::new(vec![1, 1]).edge(1, 2).build().unwrap();
        assert_eq!(
            tree.post_order(2).err(),
            Some(DomainError::RootOutOfRange {
                root: 2,
                vertices: 2
            })
        );
    }
}
