//! Token-stream input format.
//!
//! Whitespace-separated integers: the vertex count `N`, then `N` weights in
//! vertex order, then `N-1` edge endpoint pairs.

use itertools::Itertools;
use tracing::{instrument, warn};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{IndexBase, TreeBuilder};

/// Raw tree description as read from input, ids still in external numbering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeInput {
    pub weights: Vec<i64>,
    pub edges: Vec<(i64, i64)>,
}

impl TreeInput {
    pub fn into_builder(self, index_base: IndexBase) -> TreeBuilder {
        TreeBuilder::new(self.weights)
            .with_index_base(index_base)
            .edges(self.edges)
    }
}

struct Tokens<'a> {
    inner: std::str::SplitWhitespace<'a>,
    position: usize,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            inner: text.split_whitespace(),
            position: 0,
        }
    }

    /// `expected` only runs when the input is exhausted.
    fn next_raw(
        &mut self,
        expected: impl FnOnce() -> String,
    ) -> ApplicationResult<(usize, &'a str)> {
        let position = self.position;
        let token = self.inner.next().ok_or_else(|| ApplicationError::MissingToken {
            expected: expected(),
            position,
        })?;
        self.position += 1;
        Ok((position, token))
    }

    fn next_i64(&mut self, expected: impl FnOnce() -> String) -> ApplicationResult<i64> {
        let (position, token) = self.next_raw(expected)?;
        token.parse().map_err(|e: std::num::ParseIntError| ApplicationError::InvalidToken {
            position,
            token: token.to_string(),
            reason: e.to_string(),
        })
    }

    fn next_count(&mut self) -> ApplicationResult<usize> {
        let (position, token) = self.next_raw(|| "vertex count".to_string())?;
        token.parse().map_err(|e: std::num::ParseIntError| ApplicationError::InvalidToken {
            position,
            token: token.to_string(),
            reason: format!("vertex count must be a non-negative integer ({})", e),
        })
    }

    fn remaining(self) -> usize {
        self.inner.count()
    }
}

/// Parse `N`, the weights and the `N-1` edges.
///
/// Tokens left over after the last edge are ignored with a warning.
#[instrument(level = "debug", skip(text), fields(bytes = text.len()))]
pub fn parse_tree_input(text: &str) -> ApplicationResult<TreeInput> {
    let mut tokens = Tokens::new(text);

    let vertices = tokens.next_count()?;
    let mut weights = Vec::new();
    for v in 0..vertices {
        weights.push(tokens.next_i64(|| format!("weight of vertex {}", v + 1))?);
    }

    let edge_count = vertices.saturating_sub(1);
    let mut endpoints = Vec::new();
    for e in 0..edge_count {
        endpoints.push(tokens.next_i64(|| format!("first endpoint of edge {}", e + 1))?);
        endpoints.push(tokens.next_i64(|| format!("second endpoint of edge {}", e + 1))?);
    }
    let edges: Vec<(i64, i64)> = endpoints.into_iter().tuples().collect();

    let trailing = tokens.remaining();
    if trailing > 0 {
        warn!("ignoring {} trailing tokens after the last edge", trailing);
    }

    Ok(TreeInput { weights, edges })
}
