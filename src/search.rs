use log::{debug, warn};
use std::collections::VecDeque;
use std::ops::Range;

use crate::syntax::SyntaxTree;

pub const DEFAULT_MAX_HINTS: usize = 300;
pub const DEFAULT_DEPTH_LIMIT: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    pub max_hints: usize,
    pub depth_limit: usize,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            max_hints: DEFAULT_MAX_HINTS,
            depth_limit: DEFAULT_DEPTH_LIMIT,
        }
    }
}

/// Hint targets of one search, indexed densely from zero in discovery order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registry<N> {
    nodes: Vec<N>,
    dropped: usize,
}

impl<N: Copy> Registry<N> {
    pub fn empty() -> Self {
        Self {
            nodes: Vec::new(),
            dropped: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<N> {
        self.nodes.get(index).copied()
    }

    pub fn nodes(&self) -> &[N] {
        &self.nodes
    }

    /// Eligible nodes left out because the registry was full.
    pub fn dropped(&self) -> usize {
        self.dropped
    }
}

/// Breadth-first search below `focus` for hintable nodes.
///
/// A node is eligible when it lies strictly inside `viewport`, occupies a named
/// field of its parent and has no named children. Nodes with named children are
/// only walked through, and only when they overlap the viewport. Once
/// `limits.max_hints` nodes are registered, later eligible nodes are dropped.
pub fn search<S: SyntaxTree>(
    syntax: &S,
    focus: S::Node,
    viewport: Range<usize>,
    limits: SearchLimits,
) -> Registry<S::Node> {
    let mut registry = Registry::empty();
    let mut queue = VecDeque::new();
    queue.push_back((focus, 0usize));

    while let Some((node, depth)) = queue.pop_front() {
        if depth >= limits.depth_limit {
            continue;
        }
        for (child, in_field) in syntax.named_children_with_fields(node) {
            let start = syntax.start(child);
            let end = syntax.end(child);
            if syntax.named_child_count(child) > 0 {
                if start < viewport.end && end > viewport.start {
                    queue.push_back((child, depth + 1));
                }
                continue;
            }
            if !in_field || start <= viewport.start || end >= viewport.end {
                continue;
            }
            if registry.nodes.len() < limits.max_hints {
                registry.nodes.push(child);
            } else {
                registry.dropped += 1;
            }
        }
    }

    if registry.dropped > 0 {
        warn!(
            "hint capacity reached (max_hints={}, dropped={})",
            limits.max_hints, registry.dropped
        );
    }
    debug!(
        "search done (viewport={}..{}, hints={})",
        viewport.start,
        viewport.end,
        registry.len()
    );
    registry
}
