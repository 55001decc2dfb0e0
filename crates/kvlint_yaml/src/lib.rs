//! Locating logical field paths inside of YAML documents.
//!
//! Validation engines describe problems using field paths like `spec.containers[0].image`,
//! editors want a line and a column. This crate parses a YAML stream into a [`Tree`]
//! which keeps the source [`Position`] of every node, and resolves [`FieldPath`]s
//! against it.
//!
//! ```
//! use kvlint_yaml::{resolve, Position};
//!
//! let pos = resolve("spec.image", b"spec:\n  image: \"\"").unwrap();
//! assert_eq!(pos, Position::new(2, 3));
//! ```
//!
//! [`resolve`] parses the document on every call, a [`Resolver`] parses it once
//! and can then be queried for as many paths as needed.

mod error;
mod path;
mod resolve;
mod tree;

pub use self::{
    error::{ParseError, PathError, ResolveError},
    path::{FieldPath, Segment},
    resolve::{resolve, Resolver},
    tree::{Node, NodeId, NodeKind, Position, Tree},
};
