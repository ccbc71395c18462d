use log::info;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::ops::Range;
use std::path::{Path, PathBuf};
use tree_sitter::{Node, Parser, Tree};

use crate::error::HintError;

/// Read-only view of an externally owned syntax tree.
///
/// Node handles are cheap copies; the hint engine never keeps one past the tree
/// it came from.
pub trait SyntaxTree {
    type Node: Copy + Eq + Debug;

    fn root(&self) -> Self::Node;
    fn named_children(&self, node: Self::Node) -> Vec<Self::Node>;
    fn parent(&self, node: Self::Node) -> Option<Self::Node>;
    fn start(&self, node: Self::Node) -> usize;
    fn end(&self, node: Self::Node) -> usize;
    /// Name of the field `node` occupies in its parent, if any.
    fn field_name(&self, node: Self::Node) -> Option<&str>;
    fn named_child_count(&self, node: Self::Node) -> usize;
    fn kind(&self, node: Self::Node) -> &str;

    /// Named children paired with whether each one sits in a named field.
    fn named_children_with_fields(&self, node: Self::Node) -> Vec<(Self::Node, bool)> {
        self.named_children(node)
            .into_iter()
            .map(|child| (child, self.field_name(child).is_some()))
            .collect()
    }
}

impl<T: SyntaxTree + ?Sized> SyntaxTree for &T {
    type Node = T::Node;

    fn root(&self) -> Self::Node {
        (**self).root()
    }

    fn named_children(&self, node: Self::Node) -> Vec<Self::Node> {
        (**self).named_children(node)
    }

    fn parent(&self, node: Self::Node) -> Option<Self::Node> {
        (**self).parent(node)
    }

    fn start(&self, node: Self::Node) -> usize {
        (**self).start(node)
    }

    fn end(&self, node: Self::Node) -> usize {
        (**self).end(node)
    }

    fn field_name(&self, node: Self::Node) -> Option<&str> {
        (**self).field_name(node)
    }

    fn named_child_count(&self, node: Self::Node) -> usize {
        (**self).named_child_count(node)
    }

    fn kind(&self, node: Self::Node) -> &str {
        (**self).kind(node)
    }

    fn named_children_with_fields(&self, node: Self::Node) -> Vec<(Self::Node, bool)> {
        (**self).named_children_with_fields(node)
    }
}

/// Smallest named node that contains all of `range`, starting the descent at the root.
pub fn covering_node<T: SyntaxTree + ?Sized>(syntax: &T, range: Range<usize>) -> T::Node {
    let mut node = syntax.root();
    while let Some(child) = syntax
        .named_children(node)
        .into_iter()
        .find(|child| syntax.start(*child) <= range.start && range.end <= syntax.end(*child))
    {
        node = child;
    }
    node
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Language {
    Rust,
    JavaScript,
    TypeScript,
    Python,
    Shell,
}

impl Language {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension().and_then(|s| s.to_str())?;
        match ext {
            "rs" => Some(Language::Rust),
            "js" | "mjs" | "cjs" => Some(Language::JavaScript),
            "ts" => Some(Language::TypeScript),
            "py" => Some(Language::Python),
            "sh" | "bash" => Some(Language::Shell),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Language::Rust => "rust",
            Language::JavaScript => "javascript",
            Language::TypeScript => "typescript",
            Language::Python => "python",
            Language::Shell => "shell",
        }
    }

    fn grammar(&self) -> tree_sitter::Language {
        match self {
            Language::Rust => tree_sitter_rust::LANGUAGE.into(),
            Language::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
            Language::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Language::Python => tree_sitter_python::LANGUAGE.into(),
            Language::Shell => tree_sitter_bash::LANGUAGE.into(),
        }
    }
}

/// Source text together with its parse tree, when a grammar exists for it.
pub struct ParsedSource {
    pub path: Option<PathBuf>,
    pub language: Option<Language>,
    pub text: String,
    tree: Option<Tree>,
}

impl ParsedSource {
    pub fn load(path: &Path) -> Result<Self, HintError> {
        let text = std::fs::read_to_string(path).map_err(|source| HintError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut parsed = Self::from_text(text, Language::from_path(path))?;
        parsed.path = Some(path.to_path_buf());
        Ok(parsed)
    }

    pub fn from_text(text: String, language: Option<Language>) -> Result<Self, HintError> {
        let tree = match language {
            Some(language) => Some(parse(&text, language)?),
            None => {
                info!("no grammar for source, hints unavailable");
                None
            }
        };
        Ok(Self {
            path: None,
            language,
            text,
            tree,
        })
    }

    /// The syntax view of this source, or `None` when no parser handled it.
    pub fn syntax(&self) -> Option<TsSyntax<'_>> {
        self.tree.as_ref().map(TsSyntax::new)
    }
}

fn parse(text: &str, language: Language) -> Result<Tree, HintError> {
    let mut parser = Parser::new();
    parser
        .set_language(&language.grammar())
        .map_err(|source| HintError::Grammar {
            language: language.name(),
            source,
        })?;
    let tree = parser.parse(text, None).ok_or(HintError::Parse {
        language: language.name(),
    })?;
    info!(
        "parsed source (lang={}, bytes={}, has_error={})",
        language.name(),
        text.len(),
        tree.root_node().has_error()
    );
    Ok(tree)
}

#[derive(Clone, Copy)]
pub struct TsSyntax<'tree> {
    tree: &'tree Tree,
}

impl<'tree> TsSyntax<'tree> {
    pub fn new(tree: &'tree Tree) -> Self {
        Self { tree }
    }
}

impl<'tree> SyntaxTree for TsSyntax<'tree> {
    type Node = Node<'tree>;

    fn root(&self) -> Self::Node {
        self.tree.root_node()
    }

    fn named_children(&self, node: Self::Node) -> Vec<Self::Node> {
        let mut cursor = node.walk();
        node.named_children(&mut cursor).collect()
    }

    fn parent(&self, node: Self::Node) -> Option<Self::Node> {
        node.parent()
    }

    fn start(&self, node: Self::Node) -> usize {
        node.start_byte()
    }

    fn end(&self, node: Self::Node) -> usize {
        node.end_byte()
    }

    fn field_name(&self, node: Self::Node) -> Option<&str> {
        let parent = node.parent()?;
        let mut cursor = parent.walk();
        if !cursor.goto_first_child() {
            return None;
        }
        loop {
            if cursor.node() == node {
                return cursor.field_name();
            }
            if !cursor.goto_next_sibling() {
                return None;
            }
        }
    }

    fn named_child_count(&self, node: Self::Node) -> usize {
        node.named_child_count()
    }

    fn kind(&self, node: Self::Node) -> &str {
        node.kind()
    }

    // One cursor pass instead of a sibling scan per child.
    fn named_children_with_fields(&self, node: Self::Node) -> Vec<(Self::Node, bool)> {
        let mut children = Vec::with_capacity(node.named_child_count());
        let mut cursor = node.walk();
        if !cursor.goto_first_child() {
            return children;
        }
        loop {
            let child = cursor.node();
            if child.is_named() {
                children.push((child, cursor.field_name().is_some()));
            }
            if !cursor.goto_next_sibling() {
                return children;
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::SyntaxTree;

    struct FakeNode {
        kind: String,
        field: Option<String>,
        start: usize,
        end: usize,
        parent: Option<usize>,
        children: Vec<usize>,
    }

    /// In-memory tree where every node is named; node handles are arena indices.
    pub(crate) struct FakeTree {
        nodes: Vec<FakeNode>,
    }

    impl FakeTree {
        pub(crate) fn new(start: usize, end: usize) -> Self {
            Self {
                nodes: vec![FakeNode {
                    kind: "root".to_string(),
                    field: None,
                    start,
                    end,
                    parent: None,
                    children: Vec::new(),
                }],
            }
        }

        pub(crate) fn add(
            &mut self,
            parent: usize,
            kind: &str,
            field: Option<&str>,
            start: usize,
            end: usize,
        ) -> usize {
            let id = self.nodes.len();
            self.nodes.push(FakeNode {
                kind: kind.to_string(),
                field: field.map(str::to_string),
                start,
                end,
                parent: Some(parent),
                children: Vec::new(),
            });
            self.nodes[parent].children.push(id);
            id
        }
    }

    impl SyntaxTree for FakeTree {
        type Node = usize;

        fn root(&self) -> usize {
            0
        }

        fn named_children(&self, node: usize) -> Vec<usize> {
            self.nodes[node].children.clone()
        }

        fn parent(&self, node: usize) -> Option<usize> {
            self.nodes[node].parent
        }

        fn start(&self, node: usize) -> usize {
            self.nodes[node].start
        }

        fn end(&self, node: usize) -> usize {
            self.nodes[node].end
        }

        fn field_name(&self, node: usize) -> Option<&str> {
            self.nodes[node].field.as_deref()
        }

        fn named_child_count(&self, node: usize) -> usize {
            self.nodes[node].children.len()
        }

        fn kind(&self, node: usize) -> &str {
            &self.nodes[node].kind
        }
    }
}
