//! Resolution of field paths to source positions.

use crate::tree::{NodeId, NodeKind, Position, Tree};
use crate::{FieldPath, ParseError, PathError, ResolveError, Segment};

/// A parsed document which can be queried for any number of field paths.
#[derive(Debug, Clone)]
pub struct Resolver {
    tree: Tree,
}

impl Resolver {
    pub fn parse(source: &[u8]) -> Result<Self, ParseError> {
        Ok(Self {
            tree: Tree::parse(source)?,
        })
    }

    pub fn from_tree(tree: Tree) -> Self {
        Self { tree }
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Parse `raw` as a field path and find the position of the node it addresses.
    pub fn resolve(&self, raw: &str) -> Result<Position, PathError> {
        let path = FieldPath::parse(raw)?;
        self.resolve_path(&path)
    }

    /// Find the position of the node addressed by `path`.
    ///
    /// Documents are searched in order and the first one containing the path wins.
    /// A path ending on a mapping entry points to the entry's key, any other path points
    /// to the node itself.
    pub fn resolve_path(&self, path: &FieldPath) -> Result<Position, PathError> {
        self.tree
            .documents()
            .iter()
            .find_map(|doc| self.walk(*doc, path.segments()))
            .map(|id| self.tree.node(id).position)
            .ok_or_else(|| PathError::NotFound(path.to_string()))
    }

    /// Walk from `root` through every segment, returning the node whose position
    /// should be reported.
    fn walk(&self, root: NodeId, segments: &[Segment]) -> Option<NodeId> {
        let mut current = root;
        let mut anchor = root;
        for segment in segments {
            let (located, value) = self.step(current, segment)?;
            anchor = located;
            current = value;
        }
        Some(anchor)
    }

    /// Take a single step, returning the node to report and the node to continue from.
    fn step(&self, node: NodeId, segment: &Segment) -> Option<(NodeId, NodeId)> {
        let tree = &self.tree;
        match (&tree.node(tree.deref(node)).kind, segment) {
            (NodeKind::Mapping(entries), Segment::Key(name)) => entries
                .iter()
                .find(|(key, _)| tree.scalar(*key) == Some(name.as_str()))
                .map(|(key, value)| (*key, *value)),
            (NodeKind::Mapping(entries), Segment::Index(idx)) => {
                let name = idx.to_string();
                entries
                    .iter()
                    .find(|(key, _)| tree.scalar(*key) == Some(name.as_str()))
                    .map(|(key, value)| (*key, *value))
            }
            (NodeKind::Sequence(items), Segment::Index(idx)) => {
                items.get(*idx).map(|item| (*item, *item))
            }
            (NodeKind::Sequence(items), Segment::Key(name)) => {
                let idx: usize = name.parse().ok()?;
                items.get(idx).map(|item| (*item, *item))
            }
            _ => None,
        }
    }
}

/// Parse `source` and resolve a single field path in it.
///
/// This parses the document on every call, use a [`Resolver`] when resolving more
/// than one path in the same document.
pub fn resolve(field_path: &str, source: &[u8]) -> Result<Position, ResolveError> {
    let path = FieldPath::parse(field_path)?;
    let resolver = Resolver::parse(source)?;
    Ok(resolver.resolve_path(&path)?)
}
