//! A YAML syntax tree which keeps the source position of every node.
//!
//! Nodes are stored in a flat arena owned by the [`Tree`] and refer to each other
//! through [`NodeId`]s. The tree is built from the event stream of the `yaml-rust`
//! parser, every event carries the marker of its leading token which becomes the
//! node's [`Position`]. Block mappings are the exception, their start event is
//! marked at the first `:` so they take the position of their first key instead.

use crate::ParseError;
use std::collections::HashMap;
use std::fmt;
use yaml_rust::parser::{Event, MarkedEventReceiver, Parser};
use yaml_rust::scanner::Marker;

/// A 1-based line and column in a document's source text.
///
/// Positions order by line first, then by column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl From<Marker> for Position {
    fn from(marker: Marker) -> Self {
        // the scanner counts lines from 1 but columns from 0
        Self {
            line: marker.line(),
            column: marker.col() + 1,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// An index of a node inside of its [`Tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Scalar(String),
    Sequence(Vec<NodeId>),
    /// Key and value pairs in source order.
    Mapping(Vec<(NodeId, NodeId)>),
    /// A reference to the node declared with the anchor id.
    Alias(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    pub position: Position,
}

/// A parsed YAML stream, possibly holding more than one document.
#[derive(Debug, Clone, Default)]
pub struct Tree {
    nodes: Vec<Node>,
    documents: Vec<NodeId>,
    anchors: HashMap<usize, NodeId>,
}

impl Tree {
    /// Parse a YAML stream. The source must be valid UTF-8.
    pub fn parse(source: &[u8]) -> Result<Self, ParseError> {
        let text = std::str::from_utf8(source)?;
        Self::parse_str(text)
    }

    pub fn parse_str(text: &str) -> Result<Self, ParseError> {
        // the scanner would make the byte order mark part of the first token
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let mut builder = TreeBuilder::default();
        Parser::new(text.chars()).load(&mut builder, true)?;
        Ok(builder.tree)
    }

    /// The root node of every document in the stream, in source order.
    pub fn documents(&self) -> &[NodeId] {
        &self.documents
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Follow aliases until a concrete node is reached.
    ///
    /// Unknown anchors and alias cycles leave the alias itself in place.
    pub fn deref(&self, mut id: NodeId) -> NodeId {
        for _ in 0..=self.anchors.len() {
            match self.node(id).kind {
                NodeKind::Alias(anchor) => match self.anchors.get(&anchor) {
                    Some(target) => id = *target,
                    None => return id,
                },
                _ => return id,
            }
        }
        id
    }

    /// The text of a scalar node, following aliases.
    pub fn scalar(&self, id: NodeId) -> Option<&str> {
        match &self.node(self.deref(id)).kind {
            NodeKind::Scalar(value) => Some(value),
            _ => None,
        }
    }

    fn alloc(&mut self, kind: NodeKind, position: Position) -> NodeId {
        self.nodes.push(Node { kind, position });
        NodeId(self.nodes.len() - 1)
    }
}

/// A collection which was started but has not seen its end event yet.
#[derive(Debug)]
enum Frame {
    Sequence {
        id: NodeId,
        items: Vec<NodeId>,
    },
    Mapping {
        id: NodeId,
        entries: Vec<(NodeId, NodeId)>,
        key: Option<NodeId>,
    },
}

#[derive(Debug, Default)]
struct TreeBuilder {
    tree: Tree,
    stack: Vec<Frame>,
}

impl TreeBuilder {
    fn start(&mut self, kind: NodeKind, anchor: usize, position: Position) -> NodeId {
        let id = self.tree.alloc(kind, position);
        if anchor != 0 {
            self.tree.anchors.insert(anchor, id);
        }
        id
    }

    /// Attach a finished node to whatever collection is currently open.
    fn attach(&mut self, node: NodeId) {
        match self.stack.last_mut() {
            None => self.tree.documents.push(node),
            Some(Frame::Sequence { items, .. }) => items.push(node),
            Some(Frame::Mapping { entries, key, .. }) => match key.take() {
                Some(k) => entries.push((k, node)),
                None => *key = Some(node),
            },
        }
    }

    fn finish(&mut self) {
        let (id, kind) = match self.stack.pop() {
            Some(Frame::Sequence { id, items }) => (id, NodeKind::Sequence(items)),
            Some(Frame::Mapping { id, entries, .. }) => (id, NodeKind::Mapping(entries)),
            None => return,
        };
        if let NodeKind::Mapping(entries) = &kind {
            if let Some((key, _)) = entries.first() {
                let key = self.tree.nodes[key.0].position;
                let node = &mut self.tree.nodes[id.0];
                node.position = node.position.min(key);
            }
        }
        self.tree.nodes[id.0].kind = kind;
        self.attach(id);
    }
}

impl MarkedEventReceiver for TreeBuilder {
    fn on_event(&mut self, event: Event, marker: Marker) {
        let position = Position::from(marker);
        match event {
            Event::Scalar(value, _, anchor, _) => {
                let id = self.start(NodeKind::Scalar(value), anchor, position);
                self.attach(id);
            }
            Event::Alias(anchor) => {
                let id = self.start(NodeKind::Alias(anchor), 0, position);
                self.attach(id);
            }
            Event::SequenceStart(anchor) => {
                let id = self.start(NodeKind::Sequence(vec![]), anchor, position);
                self.stack.push(Frame::Sequence { id, items: vec![] });
            }
            Event::MappingStart(anchor) => {
                let id = self.start(NodeKind::Mapping(vec![]), anchor, position);
                self.stack.push(Frame::Mapping {
                    id,
                    entries: vec![],
                    key: None,
                });
            }
            Event::SequenceEnd | Event::MappingEnd => self.finish(),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use expect_test::expect;

    fn outline(tree: &Tree, id: NodeId, depth: usize, out: &mut String) {
        let node = tree.node(id);
        let indent = "  ".repeat(depth);
        match &node.kind {
            NodeKind::Scalar(value) => {
                out.push_str(&format!("{}{} scalar {:?}\n", indent, node.position, value))
            }
            NodeKind::Alias(anchor) => {
                out.push_str(&format!("{}{} alias {}\n", indent, node.position, anchor))
            }
            NodeKind::Sequence(items) => {
                out.push_str(&format!("{}{} sequence\n", indent, node.position));
                for item in items {
                    outline(tree, *item, depth + 1, out);
                }
            }
            NodeKind::Mapping(entries) => {
                out.push_str(&format!("{}{} mapping\n", indent, node.position));
                for (key, value) in entries {
                    outline(tree, *key, depth + 1, out);
                    outline(tree, *value, depth + 2, out);
                }
            }
        }
    }

    fn dump(src: &str) -> String {
        let tree = Tree::parse_str(src).unwrap();
        let mut out = String::new();
        for doc in tree.documents() {
            outline(&tree, *doc, 0, &mut out);
        }
        out
    }

    #[test]
    fn block_mapping_positions() {
        let actual = dump("spec:\n  image: \"\"\n  replicas: 3\n");
        expect![[r#"
            1:1 mapping
              1:1 scalar "spec"
                2:3 mapping
                  2:3 scalar "image"
                    2:10 scalar ""
                  3:3 scalar "replicas"
                    3:13 scalar "3"
        "#]]
        .assert_eq(&actual);
    }

    #[test]
    fn block_sequence_positions() {
        let actual = dump("containers:\n  - name: a\n  - name: b\n");
        expect![[r#"
            1:1 mapping
              1:1 scalar "containers"
                2:3 sequence
                  2:5 mapping
                    2:5 scalar "name"
                      2:11 scalar "a"
                  3:5 mapping
                    3:5 scalar "name"
                      3:11 scalar "b"
        "#]]
        .assert_eq(&actual);
    }

    #[test]
    fn flow_mappings_keep_their_brace() {
        let actual = dump("env: {A: 1}\nports: [{port: 80}]\n");
        expect![[r#"
            1:1 mapping
              1:1 scalar "env"
                1:6 mapping
                  1:7 scalar "A"
                    1:10 scalar "1"
              2:1 scalar "ports"
                2:8 sequence
                  2:9 mapping
                    2:10 scalar "port"
                      2:16 scalar "80"
        "#]]
        .assert_eq(&actual);
    }

    #[test]
    fn byte_order_mark_is_skipped() {
        let tree = Tree::parse(b"\xef\xbb\xbfkind: Pod\n").unwrap();
        let root = tree.documents()[0];
        assert_eq!(tree.node(root).position, Position::new(1, 1));
        let key = match &tree.node(root).kind {
            NodeKind::Mapping(entries) => entries[0].0,
            kind => panic!("expected a mapping, found {:?}", kind),
        };
        assert_eq!(tree.scalar(key), Some("kind"));
    }

    #[test]
    fn multiple_documents() {
        let tree = Tree::parse_str("a: 1\n---\nb: 2\n").unwrap();
        assert_eq!(tree.documents().len(), 2);
        let second = tree.node(tree.documents()[1]);
        assert_eq!(second.position, Position::new(3, 1));
    }

    #[test]
    fn empty_stream_has_no_documents() {
        let tree = Tree::parse_str("").unwrap();
        assert!(tree.documents().is_empty());
    }

    #[test]
    fn aliases_resolve_to_anchors() {
        let tree = Tree::parse_str("base: &b hello\ncopy: *b\n").unwrap();
        let root = tree.documents()[0];
        let value = match &tree.node(root).kind {
            NodeKind::Mapping(entries) => entries[1].1,
            kind => panic!("expected a mapping, found {:?}", kind),
        };
        assert!(matches!(tree.node(value).kind, NodeKind::Alias(_)));
        assert_eq!(tree.scalar(value), Some("hello"));
    }

    #[test]
    fn invalid_utf8_is_a_parse_error() {
        let err = Tree::parse(&[b'a', b':', b' ', 0xff, 0xfe]).unwrap_err();
        assert!(matches!(err, ParseError::Utf8(_)));
    }

    #[test]
    fn invalid_yaml_is_a_parse_error() {
        let err = Tree::parse(b"image: \"unterminated\n").unwrap_err();
        assert!(matches!(err, ParseError::Syntax(_)));
    }
}
