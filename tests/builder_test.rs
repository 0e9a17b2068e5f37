//! Tests for TreeBuilder

use rstest::rstest;

use tree_mwis::domain::{DomainError, IndexBase, MalformedTreeError, TreeBuilder};

fn malformed(weights: Vec<i64>, edges: &[(i64, i64)]) -> MalformedTreeError {
    match TreeBuilder::new(weights)
        .edges(edges.iter().copied())
        .build()
    {
        Err(DomainError::MalformedTree(e)) => e,
        other => panic!("expected malformed tree, got {other:?}"),
    }
}

#[test]
fn given_path_edges_when_building_then_adjacency_is_symmetric() {
    // Arrange
    let builder = TreeBuilder::new(vec![10, 1, 10]).edge(1, 2).edge(2, 3);

    // Act
    let tree = builder.build().unwrap();

    // Assert
    assert_eq!(tree.len(), 3);
    assert_eq!(tree.edge_count(), 2);
    assert_eq!(tree.neighbors(0), &[1]);
    assert_eq!(tree.neighbors(1), &[0, 2]);
    assert_eq!(tree.neighbors(2), &[1]);
    assert_eq!(tree.weights(), &[10, 1, 10]);
}

#[test]
fn given_zero_based_ids_when_building_then_same_tree_as_one_based() {
    let one = TreeBuilder::new(vec![4, 2, 7])
        .edges([(1, 2), (1, 3)])
        .build()
        .unwrap();
    let zero = TreeBuilder::new(vec![4, 2, 7])
        .with_index_base(IndexBase::Zero)
        .edges([(0, 1), (0, 2)])
        .build()
        .unwrap();

    assert_eq!(one, zero);
}

#[rstest]
#[case::too_few(vec![1, 2, 3], &[(1, 2)], MalformedTreeError::EdgeCount { vertices: 3, expected: 2, actual: 1 })]
#[case::too_many(vec![1, 2], &[(1, 2), (2, 1)], MalformedTreeError::EdgeCount { vertices: 2, expected: 1, actual: 2 })]
#[case::edges_without_vertices(vec![], &[(1, 2)], MalformedTreeError::EdgeCount { vertices: 0, expected: 0, actual: 1 })]
#[case::id_above_range(vec![1, 2, 3], &[(1, 2), (2, 4)], MalformedTreeError::VertexOutOfRange { edge: 1, vertex: 3, vertices: 3 })]
#[case::id_below_range(vec![1, 2], &[(0, 1)], MalformedTreeError::VertexOutOfRange { edge: 0, vertex: -1, vertices: 2 })]
#[case::self_loop(vec![1, 2, 3], &[(1, 2), (3, 3)], MalformedTreeError::SelfLoop { edge: 1, vertex: 2 })]
#[case::duplicate(vec![1, 2, 3], &[(1, 2), (2, 1)], MalformedTreeError::DuplicateEdge { edge: 1, first: 0, a: 0, b: 1 })]
#[case::cycle_and_disconnected(vec![1, 2, 3, 4], &[(1, 2), (2, 3), (3, 1)], MalformedTreeError::Cycle { edge: 2, a: 2, b: 0 })]
fn given_malformed_edges_when_building_then_reports_first_problem(
    #[case] weights: Vec<i64>,
    #[case] edges: &[(i64, i64)],
    #[case] expected: MalformedTreeError,
) {
    assert_eq!(malformed(weights, edges), expected);
}

#[test]
fn given_validation_off_when_building_forest_then_accepts_it() {
    let tree = TreeBuilder::new(vec![1, 2, 3, 4])
        .with_validation(false)
        .edge(1, 2)
        .build()
        .unwrap();

    assert_eq!(tree.edge_count(), 1);
    assert!(tree.neighbors(2).is_empty());
}

#[test]
fn given_validation_off_when_id_out_of_range_then_still_rejected() {
    let result = TreeBuilder::new(vec![1, 2])
        .with_validation(false)
        .edge(1, 9)
        .build();

    assert!(matches!(
        result,
        Err(DomainError::MalformedTree(MalformedTreeError::VertexOutOfRange { .. }))
    ));
}

#[test]
fn given_no_vertices_when_building_then_empty_tree() {
    let tree = TreeBuilder::new(vec![]).build().unwrap();

    assert!(tree.is_empty());
    assert_eq!(tree.height(0).unwrap(), 0);
}
