//! Text rendering of a rooted tree annotated with its DP values.

use termtree::Tree as TermTree;
use tracing::instrument;

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{DpTable, IndexBase, Tree};

/// Build one `termtree` per component, in traversal order.
///
/// Each node reads `id (w=.., incl=.., excl=..)`, ids in `index_base`
/// numbering. `termtree` prints recursively, so trees deeper than `limit`
/// are refused before anything is built.
#[instrument(level = "debug", skip(tree, table))]
pub fn render_forest(
    tree: &Tree,
    table: &DpTable,
    index_base: IndexBase,
    limit: usize,
) -> ApplicationResult<Vec<TermTree<String>>> {
    let height = forest_height(table);
    if height > limit {
        return Err(ApplicationError::RenderTooDeep { height, limit });
    }

    let mut pending: Vec<Vec<TermTree<String>>> = vec![Vec::new(); tree.len()];
    let mut roots = Vec::new();

    for step in table.order() {
        let v = step.vertex;
        let label = format!(
            "{} (w={}, incl={}, excl={})",
            index_base.externalize(v),
            tree.weight(v),
            table.incl(v),
            table.excl(v)
        );
        let node = TermTree::new(label).with_leaves(std::mem::take(&mut pending[v]));
        match step.parent {
            Some(parent) => pending[parent].push(node),
            None => roots.push(node),
        }
    }
    Ok(roots)
}

fn forest_height(table: &DpTable) -> usize {
    let mut heights = vec![0usize; table.len()];
    let mut max_height = 0;
    for step in table.order() {
        let h = heights[step.vertex] + 1;
        if let Some(parent) = step.parent {
            heights[parent] = heights[parent].max(h);
        }
        max_height = max_height.max(h);
    }
    max_height
}
