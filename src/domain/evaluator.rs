//! Maximum-weight independent set by post-order tree DP.
//!
//! For every vertex `v` the table keeps two subtree optima:
//! `incl[v]` with `v` taken and `excl[v]` with `v` left out.
//!
//! ```text
//! excl[v] = Σ_c max(incl[c], excl[c])
//! incl[v] = weight[v] + Σ_c excl[c]
//! ```
//!
//! The answer is `max(incl[root], excl[root])`, summed over components when
//! unvalidated input turns out to be a forest.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::traversal::Step;
use crate::domain::tree::Tree;

/// Which recurrence fills the DP table. Both produce identical tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Recurrence {
    /// Each child pushes `max(incl, excl)` and `excl` into its parent.
    #[default]
    IncludeExclude,
    /// Each vertex pulls `Σ dp[child]` and `Σ dp[grandchild]`, where
    /// `dp = max(incl, excl)`.
    Grandchildren,
}

impl FromStr for Recurrence {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "include-exclude" | "include_exclude" => Ok(Recurrence::IncludeExclude),
            "grandchildren" => Ok(Recurrence::Grandchildren),
            other => Err(format!(
                "unknown recurrence {:?}, expected include-exclude or grandchildren",
                other
            )),
        }
    }
}

impl fmt::Display for Recurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recurrence::IncludeExclude => write!(f, "include-exclude"),
            Recurrence::Grandchildren => write!(f, "grandchildren"),
        }
    }
}

/// Populated DP table for one evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DpTable {
    incl: Vec<i64>,
    excl: Vec<i64>,
    order: Vec<Step>,
    value: i64,
}

impl DpTable {
    /// Best subtree weight with `vertex` in the set.
    pub fn incl(&self, vertex: usize) -> i64 {
        self.incl[vertex]
    }

    /// Best subtree weight with `vertex` left out.
    pub fn excl(&self, vertex: usize) -> i64 {
        self.excl[vertex]
    }

    pub fn best(&self, vertex: usize) -> i64 {
        self.incl[vertex].max(self.excl[vertex])
    }

    /// Post-order in which the table was filled.
    pub fn order(&self) -> &[Step] {
        &self.order
    }

    /// Maximum weight of an independent set of the whole tree.
    pub fn value(&self) -> i64 {
        self.value
    }

    pub fn len(&self) -> usize {
        self.incl.len()
    }

    pub fn is_empty(&self) -> bool {
        self.incl.is_empty()
    }
}

/// One optimal independent set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    pub weight: i64,
    /// Chosen vertices, 0-based and ascending
    pub vertices: Vec<usize>,
}

/// Runs the DP over a borrowed [`Tree`].
///
/// The tree is never mutated, so one tree can back any number of evaluations.
#[derive(Debug, Clone, Copy)]
pub struct Evaluator<'a> {
    tree: &'a Tree,
    root: usize,
    recurrence: Recurrence,
}

impl<'a> Evaluator<'a> {
    pub fn new(tree: &'a Tree) -> Self {
        Self {
            tree,
            root: 0,
            recurrence: Recurrence::default(),
        }
    }

    /// Start the traversal at `root` (0-based). Checked when evaluating.
    pub fn with_root(mut self, root: usize) -> Self {
        self.root = root;
        self
    }

    pub fn with_recurrence(mut self, recurrence: Recurrence) -> Self {
        self.recurrence = recurrence;
        self
    }

    #[instrument(level = "debug", skip(self), fields(vertices = self.tree.len(), root = self.root, recurrence = %self.recurrence))]
    pub fn table(&self) -> DomainResult<DpTable> {
        let order: Vec<Step> = self.tree.post_order(self.root)?.collect();

        let (incl, excl) = match self.recurrence {
            Recurrence::IncludeExclude => self.fill_include_exclude(&order)?,
            Recurrence::Grandchildren => self.fill_grandchildren(&order)?,
        };

        let mut value = 0i64;
        for step in order.iter().filter(|s| s.parent.is_none()) {
            let best = incl[step.vertex].max(excl[step.vertex]);
            value = checked_sum(value, best, step.vertex)?;
        }
        debug!("dp table filled: value={}", value);

        Ok(DpTable {
            incl,
            excl,
            order,
            value,
        })
    }

    pub fn max_weight(&self) -> DomainResult<i64> {
        Ok(self.table()?.value())
    }

    /// Reconstructs one optimal set top-down from the table.
    ///
    /// A vertex is taken when its parent is not and taking it is strictly
    /// better than leaving it out, so ties leave vertices out.
    #[instrument(level = "debug", skip(self))]
    pub fn solve(&self) -> DomainResult<Solution> {
        let table = self.table()?;
        let mut taken = vec![false; table.len()];

        for step in table.order().iter().rev() {
            let parent_taken = step.parent.is_some_and(|p| taken[p]);
            taken[step.vertex] = !parent_taken && table.incl(step.vertex) > table.excl(step.vertex);
        }

        let vertices: Vec<usize> = taken
            .iter()
            .enumerate()
            .filter_map(|(v, &t)| t.then_some(v))
            .collect();
        debug!("solution: {} vertices", vertices.len());

        Ok(Solution {
            weight: table.value(),
            vertices,
        })
    }

    fn fill_include_exclude(&self, order: &[Step]) -> DomainResult<(Vec<i64>, Vec<i64>)> {
        let mut incl = self.tree.weights().to_vec();
        let mut excl = vec![0i64; self.tree.len()];

        for step in order {
            let Some(parent) = step.parent else {
                continue;
            };
            let v = step.vertex;
            excl[parent] = checked_sum(excl[parent], incl[v].max(excl[v]), parent)?;
            incl[parent] = checked_sum(incl[parent], excl[v], parent)?;
        }
        Ok((incl, excl))
    }

    fn fill_grandchildren(&self, order: &[Step]) -> DomainResult<(Vec<i64>, Vec<i64>)> {
        let n = self.tree.len();
        let mut dp = vec![0i64; n];
        let mut incl = vec![0i64; n];
        let mut excl = vec![0i64; n];
        let mut children: Vec<Vec<usize>> = vec![Vec::new(); n];

        for step in order {
            let v = step.vertex;
            let mut with_children = 0i64;
            let mut with_grandchildren = self.tree.weight(v);
            for &child in &children[v] {
                with_children = checked_sum(with_children, dp[child], v)?;
                for &grandchild in &children[child] {
                    with_grandchildren = checked_sum(with_grandchildren, dp[grandchild], v)?;
                }
            }
            excl[v] = with_children;
            incl[v] = with_grandchildren;
            dp[v] = with_children.max(with_grandchildren);

            if let Some(parent) = step.parent {
                children[parent].push(v);
            }
        }
        Ok((incl, excl))
    }
}

/// Maximum weight of an independent set, rooted at vertex 0.
pub fn max_weight_independent_set(tree: &Tree) -> DomainResult<i64> {
    Evaluator::new(tree).max_weight()
}

fn checked_sum(acc: i64, value: i64, vertex: usize) -> DomainResult<i64> {
    acc.checked_add(value)
        .ok_or(DomainError::WeightOverflow { vertex })
}
