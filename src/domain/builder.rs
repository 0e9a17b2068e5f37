//! Tree builder: turns weights and an undirected edge list into a [`Tree`].

use std::collections::HashMap;

use tracing::{debug, instrument};

use crate::domain::error::{DomainResult, MalformedTreeError};
use crate::domain::tree::{IndexBase, Tree};

/// Collects vertex weights and edges, then assembles a [`Tree`].
///
/// Edge endpoints are given in the external numbering selected by
/// [`IndexBase`] (1-based unless told otherwise). Endpoints outside the vertex
/// range are always rejected. The remaining structural checks (edge count,
/// self-loops, duplicates, cycles) run only while validation is enabled.
#[derive(Debug, Clone)]
pub struct TreeBuilder {
    weights: Vec<i64>,
    edges: Vec<(i64, i64)>,
    index_base: IndexBase,
    validate: bool,
}

impl TreeBuilder {
    pub fn new(weights: Vec<i64>) -> Self {
        Self {
            weights,
            edges: Vec::new(),
            index_base: IndexBase::One,
            validate: true,
        }
    }

    pub fn with_index_base(mut self, index_base: IndexBase) -> Self {
        self.index_base = index_base;
        self
    }

    pub fn with_validation(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }

    pub fn edge(mut self, a: i64, b: i64) -> Self {
        self.edges.push((a, b));
        self
    }

    pub fn edges(mut self, edges: impl IntoIterator<Item = (i64, i64)>) -> Self {
        self.edges.extend(edges);
        self
    }

    #[instrument(level = "debug", skip(self), fields(vertices = self.weights.len(), edges = self.edges.len()))]
    pub fn build(self) -> DomainResult<Tree> {
        let vertices = self.weights.len();

        if self.validate {
            let expected = vertices.saturating_sub(1);
            if self.edges.len() != expected {
                return Err(MalformedTreeError::EdgeCount {
                    vertices,
                    expected,
                    actual: self.edges.len(),
                }
                .into());
            }
        }

        let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); vertices];
        let mut checker = self.validate.then(|| StructureCheck::new(vertices));

        for (edge, &(a, b)) in self.edges.iter().enumerate() {
            let a = self.normalize(edge, a)?;
            let b = self.normalize(edge, b)?;
            if let Some(checker) = checker.as_mut() {
                checker.admit(edge, a, b)?;
            }
            adjacency[a].push(b);
            adjacency[b].push(a);
        }

        debug!(
            "built tree: vertices={}, edges={}, validated={}",
            vertices,
            self.edges.len(),
            self.validate
        );
        Ok(Tree::from_parts(self.weights, adjacency))
    }

    fn normalize(&self, edge: usize, id: i64) -> DomainResult<usize> {
        let vertices = self.weights.len();
        self.index_base.normalize(id, vertices).ok_or_else(|| {
            MalformedTreeError::VertexOutOfRange {
                edge,
                vertex: id.saturating_sub(self.index_base.offset()),
                vertices,
            }
            .into()
        })
    }
}

/// Incremental self-loop, duplicate and cycle detection over a union-find.
struct StructureCheck {
    parent: Vec<usize>,
    rank: Vec<u8>,
    // Normalized (smaller, larger) endpoints -> first edge index
    seen: HashMap<(usize, usize), usize>,
}

impl StructureCheck {
    fn new(vertices: usize) -> Self {
        Self {
            parent: (0..vertices).collect(),
            rank: vec![0; vertices],
            seen: HashMap::with_capacity(vertices),
        }
    }

    fn admit(&mut self, edge: usize, a: usize, b: usize) -> Result<(), MalformedTreeError> {
        if a == b {
            return Err(MalformedTreeError::SelfLoop { edge, vertex: a });
        }
        let key = (a.min(b), a.max(b));
        if let Some(&first) = self.seen.get(&key) {
            return Err(MalformedTreeError::DuplicateEdge {
                edge,
                first,
                a: key.0,
                b: key.1,
            });
        }
        self.seen.insert(key, edge);
        if !self.union(a, b) {
            return Err(MalformedTreeError::Cycle { edge, a, b });
        }
        Ok(())
    }

    fn find(&mut self, mut v: usize) -> usize {
        while self.parent[v] != v {
            self.parent[v] = self.parent[self.parent[v]];
            v = self.parent[v];
        }
        v
    }

    /// Returns false when both endpoints already share a component.
    fn union(&mut self, a: usize, b: usize) -> bool {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra == rb {
            return false;
        }
        match self.rank[ra].cmp(&self.rank[rb]) {
            std::cmp::Ordering::Less => self.parent[ra] = rb,
            std::cmp::Ordering::Greater => self.parent[rb] = ra,
            std::cmp::Ordering::Equal => {
                self.parent[rb] = ra;
                self.rank[ra] += 1;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;

    fn malformed(result: DomainResult<Tree>) -> MalformedTreeError {
        match result {
            Err(DomainError::MalformedTree(e)) => e,
            other => panic!("expected malformed tree, got {:?}", other),
        }
    }

    #[test]
    fn given_one_based_edges_when_building_then_records_both_directions() {
        let tree = TreeBuilder::new(vec![10, 1, 10])
            .edges([(1, 2), (2, 3)])
            .build()
            .unwrap();

        assert_eq!(tree.len(), 3);
        assert_eq!(tree.neighbors(0), &[1]);
        assert_eq!(tree.neighbors(1), &[0, 2]);
        assert_eq!(tree.neighbors(2), &[1]);
        assert_eq!(tree.weight(2), 10);
    }

    #[test]
    fn given_zero_based_edges_when_building_then_uses_ids_as_is() {
        let tree = TreeBuilder::new(vec![1, 2])
            .with_index_base(IndexBase::Zero)
            .edge(0, 1)
            .build()
            .unwrap();

        assert_eq!(tree.neighbors(0), &[1]);
    }

    #[test]
    fn given_missing_edge_when_building_then_reports_edge_count() {
        let err = malformed(TreeBuilder::new(vec![1, 2, 3]).edge(1, 2).build());
        assert_eq!(
            err,
            MalformedTreeError::EdgeCount {
                vertices: 3,
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn given_zero_vertex_in_one_based_input_when_building_then_out_of_range() {
        let err = malformed(TreeBuilder::new(vec![1, 2]).edge(0, 1).build());
        assert_eq!(
            err,
            MalformedTreeError::VertexOutOfRange {
                edge: 0,
                vertex: -1,
                vertices: 2
            }
        );
    }

    #[test]
    fn given_out_of_range_vertex_without_validation_when_building_then_still_errors() {
        let err = malformed(
            TreeBuilder::new(vec![1, 2])
                .with_validation(false)
                .edge(1, 3)
                .build(),
        );
        assert!(matches!(err, MalformedTreeError::VertexOutOfRange { vertex: 2, .. }));
    }

    #[test]
    fn given_self_loop_when_building_then_errors() {
        let err = malformed(TreeBuilder::new(vec![1, 2]).edge(2, 2).build());
        assert_eq!(err, MalformedTreeError::SelfLoop { edge: 0, vertex: 1 });
    }

    #[test]
    fn given_reversed_duplicate_when_building_then_errors() {
        let err = malformed(
            TreeBuilder::new(vec![1, 2, 3])
                .edges([(1, 2), (2, 1)])
                .build(),
        );
        assert_eq!(
            err,
            MalformedTreeError::DuplicateEdge {
                edge: 1,
                first: 0,
                a: 0,
                b: 1
            }
        );
    }

    #[test]
    fn given_disconnected_graph_with_enough_edges_when_building_then_reports_cycle() {
        let err = malformed(
            TreeBuilder::new(vec![0; 4])
                .edges([(1, 2), (2, 3), (3, 1)])
                .build(),
        );
        assert_eq!(err, MalformedTreeError::Cycle { edge: 2, a: 2, b: 0 });
    }

    #[test]
    fn given_malformed_graph_without_validation_when_building_then_accepts() {
        let tree = TreeBuilder::new(vec![0; 3])
            .with_validation(false)
            .edges([(1, 2), (1, 2), (3, 3)])
            .build()
            .unwrap();

        assert_eq!(tree.neighbors(0), &[1, 1]);
        assert_eq!(tree.neighbors(2), &[2, 2]);
    }

    #[test]
    fn given_no_vertices_when_building_then_empty_tree() {
        let tree = TreeBuilder::new(vec![]).build().unwrap();
        assert!(tree.is_empty());
        assert_eq!(tree.edge_count(), 0);
    }
}
