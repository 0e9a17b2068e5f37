//! Explicit-stack post-order traversal.
//!
//! Tree height can reach N-1 for path-shaped inputs, so the walk keeps its
//! frames on the heap instead of the call stack.

use crate::domain::tree::Tree;

/// One vertex emitted by [`PostOrder`], after all of its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub vertex: usize,
    /// Vertex the walk arrived from, `None` for a component root
    pub parent: Option<usize>,
    /// Root of the component this vertex was reached from
    pub component_root: usize,
}

#[derive(Debug, Clone, Copy)]
struct Frame {
    vertex: usize,
    parent: Option<usize>,
    expanded: bool,
}

/// Post-order iterator over every vertex of a [`Tree`].
///
/// Starts at the requested root. Vertices not reachable from it (only possible
/// for unvalidated input) are walked afterwards, each remaining component
/// rooted at its lowest unvisited id. A visited bitmap keeps cyclic input from
/// being walked twice.
pub struct PostOrder<'a> {
    tree: &'a Tree,
    stack: Vec<Frame>,
    visited: Vec<bool>,
    component_root: usize,
    next_start: usize,
}

impl<'a> PostOrder<'a> {
    pub(crate) fn new(tree: &'a Tree, root: usize) -> Self {
        let mut walk = Self {
            tree,
            stack: Vec::with_capacity(tree.len()),
            visited: vec![false; tree.len()],
            component_root: root,
            next_start: 0,
        };
        walk.start_component(root);
        walk
    }

    pub(crate) fn empty(tree: &'a Tree) -> Self {
        Self {
            tree,
            stack: Vec::new(),
            visited: Vec::new(),
            component_root: 0,
            next_start: 0,
        }
    }

    fn start_component(&mut self, root: usize) {
        self.component_root = root;
        self.stack.push(Frame {
            vertex: root,
            parent: None,
            expanded: false,
        });
    }

    /// Move the walk on to the next component that has not been visited yet.
    fn advance_component(&mut self) -> bool {
        while self.next_start < self.visited.len() {
            let candidate = self.next_start;
            self.next_start += 1;
            if !self.visited[candidate] {
                self.start_component(candidate);
                return true;
            }
        }
        false
    }
}

impl Iterator for PostOrder<'_> {
    type Item = Step;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            while let Some(frame) = self.stack.pop() {
                if frame.expanded {
                    return Some(Step {
                        vertex: frame.vertex,
                        parent: frame.parent,
                        component_root: self.component_root,
                    });
                }
                if self.visited[frame.vertex] {
                    continue;
                }
                self.visited[frame.vertex] = true;
                self.stack.push(Frame {
                    expanded: true,
                    ..frame
                });
                // Reverse so children come out in neighbor order
                for &child in self.tree.neighbors(frame.vertex).iter().rev() {
                    if Some(child) != frame.parent && !self.visited[child] {
                        self.stack.push(Frame {
                            vertex: child,
                            parent: Some(frame.vertex),
                            expanded: false,
                        });
                    }
                }
            }
            if !self.advance_component() {
                return None;
            }
        }
    }
}
