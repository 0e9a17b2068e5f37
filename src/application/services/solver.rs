//! Solver service
//!
//! Reads a token stream, builds the tree according to the settings and runs
//! the evaluator.

use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::application::parser::parse_tree_input;
use crate::application::render::render_forest;
use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::config::Settings;
use crate::domain::{Evaluator, Tree};
use crate::infrastructure::traits::InputSource;

/// Outcome of one evaluation, vertex ids in the configured input numbering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// Maximum total weight of an independent set
    pub value: i64,
    pub vertices: usize,
    /// Vertices on the longest root-to-leaf path
    pub height: usize,
    /// Chosen vertices, present when `show_set` is on
    pub selection: Option<Vec<usize>>,
}

/// Service turning input text into independent-set results.
pub struct SolverService {
    settings: Arc<Settings>,
}

impl SolverService {
    /// Create a new solver service.
    pub fn new(settings: Arc<Settings>) -> Self {
        Self { settings }
    }

    /// Read `source` and solve the tree it describes.
    #[instrument(level = "debug", skip(self, source), fields(source = %source.describe()))]
    pub fn solve(&self, source: &dyn InputSource) -> ApplicationResult<Report> {
        let text = source
            .read_to_string()
            .with_source_context("read tree", &source.describe())?;
        self.solve_text(&text)
    }

    pub fn solve_text(&self, text: &str) -> ApplicationResult<Report> {
        let tree = self.build_tree(text)?;
        let root = self.root_for(&tree)?;
        let evaluator = Evaluator::new(&tree)
            .with_root(root)
            .with_recurrence(self.settings.recurrence);

        let (value, selection) = if self.settings.show_set {
            let solution = evaluator.solve()?;
            let ids = solution
                .vertices
                .iter()
                .map(|&v| self.settings.index_base.externalize(v))
                .collect();
            (solution.weight, Some(ids))
        } else {
            (evaluator.max_weight()?, None)
        };
        let height = tree.height(root)?;

        info!(
            "solved: vertices={}, height={}, value={}",
            tree.len(),
            height,
            value
        );
        Ok(Report {
            value,
            vertices: tree.len(),
            height,
            selection,
        })
    }

    /// Draw the rooted tree with per-vertex weights and DP values.
    #[instrument(level = "debug", skip(self, source), fields(source = %source.describe()))]
    pub fn render(&self, source: &dyn InputSource) -> ApplicationResult<String> {
        let text = source
            .read_to_string()
            .with_source_context("read tree", &source.describe())?;
        let tree = self.build_tree(&text)?;
        let root = self.root_for(&tree)?;
        let table = Evaluator::new(&tree)
            .with_root(root)
            .with_recurrence(self.settings.recurrence)
            .table()?;

        let forest = render_forest(
            &tree,
            &table,
            self.settings.index_base,
            self.settings.max_render_height,
        )?;
        Ok(forest.iter().map(ToString::to_string).collect())
    }

    /// Parse `text` and build the tree with the configured numbering and checks.
    pub fn build_tree(&self, text: &str) -> ApplicationResult<Tree> {
        let input = parse_tree_input(text)?;
        debug!(
            "parsed input: vertices={}, edges={}",
            input.weights.len(),
            input.edges.len()
        );
        let tree = input
            .into_builder(self.settings.index_base)
            .with_validation(self.settings.validate)
            .build()?;
        Ok(tree)
    }

    /// Internal id of the configured root; the first vertex when unset.
    fn root_for(&self, tree: &Tree) -> ApplicationResult<usize> {
        let Some(root) = self.settings.root else {
            return Ok(0);
        };
        if tree.is_empty() {
            return Ok(0);
        }
        i64::try_from(root)
            .ok()
            .and_then(|id| self.settings.index_base.normalize(id, tree.len()))
            .ok_or(ApplicationError::RootOutOfRange {
                root,
                vertices: tree.len(),
            })
    }
}
