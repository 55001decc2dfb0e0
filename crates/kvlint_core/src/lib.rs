//! The core runner for kvlint responsible for turning validation results into lint lines.
//!
//! Validation engines report problems against logical field paths (`spec.containers[0].image`)
//! rather than source positions. The runner takes those results keyed by file, resolves every
//! addressable cause to a line and column in the file using [`kvlint_yaml`], groups causes
//! which land on the same position and renders one `file:line:column: message` line per
//! position.
//!
//! The runner never does anything CLI specific, it only needs a [`Sources`] implementation to
//! read the documents the results refer to.
//!
//! ## Using the runner
//!
//! [`lint`] reads files straight from disk with the default options. For anything else build
//! a [`Linter`]:
//!
//! ```
//! use kvlint_core::{Cause, FieldOrder, Linter, MemorySources, Status};
//! use std::collections::HashMap;
//!
//! let mut sources = MemorySources::new();
//! sources.add("a.yaml", "spec:\n  image: \"\"");
//!
//! let mut details = HashMap::new();
//! details.insert(
//!     "a.yaml".to_string(),
//!     vec![Status::failure(vec![Cause::new("spec.image", "FieldValueInvalid", "must not be empty")])],
//! );
//!
//! let report = Linter::new(sources).field_order(FieldOrder::Lexical).run(&details).unwrap();
//! assert_eq!(
//!     String::from_utf8(report).unwrap(),
//!     r#"a.yaml:2:3: field "spec.image": (reason: "FieldValueInvalid"; must not be empty)"#
//! );
//! ```

mod error;
mod model;
mod sources;

pub mod format;
pub mod group;

pub use self::{
    error::Error,
    format::{render, FieldOrder, LintError},
    group::{addressable_causes, group, group_causes, FieldCause, GroupedCauses},
    model::{Cause, Status, StatusDetails, StatusKind, NIL_FIELD},
    sources::{FileSystem, MemorySources, Sources},
};
pub use kvlint_yaml::{ParseError, PathError, Position, ResolveError, Resolver};

use log::debug;
use std::collections::HashMap;

/// Validation results keyed by the file they were produced for.
pub type Details = HashMap<String, Vec<Status>>;

/// Produce the report for `details`, reading files from disk with the default options.
pub fn lint(details: &Details) -> Result<Vec<u8>, Error> {
    Linter::new(FileSystem::new()).run(details)
}

/// A configured report generator.
#[derive(Debug, Clone)]
pub struct Linter<S> {
    sources: S,
    field_order: FieldOrder,
}

impl<S: Sources> Linter<S> {
    pub fn new(sources: S) -> Self {
        Self {
            sources,
            field_order: FieldOrder::default(),
        }
    }

    pub fn field_order(mut self, order: FieldOrder) -> Self {
        self.field_order = order;
        self
    }

    /// Produce the full report, one line per diagnostic separated by `\n`.
    ///
    /// Any error aborts the whole report, no partial output is produced.
    pub fn run(&self, details: &Details) -> Result<Vec<u8>, Error> {
        let lines = self
            .lint_errors(details)?
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>();
        Ok(lines.join("\n").into_bytes())
    }

    /// Produce every diagnostic, files in lexicographic order and positions ascending
    /// within each file.
    pub fn lint_errors(&self, details: &Details) -> Result<Vec<LintError>, Error> {
        let mut files: Vec<&String> = details.keys().collect();
        files.sort();

        let mut errors = vec![];
        for file in files {
            errors.extend(self.lint_file(file, &details[file])?);
        }
        Ok(errors)
    }

    /// Produce the diagnostics of a single file.
    ///
    /// The file is only read if at least one of its causes can be reported.
    pub fn lint_file(&self, file: &str, statuses: &[Status]) -> Result<Vec<LintError>, Error> {
        let causes = addressable_causes(statuses);
        if causes.is_empty() {
            debug!("skipping `{}`, no reportable causes", file);
            return Ok(vec![]);
        }

        let source = self.sources.read(file).map_err(|source| Error::Io {
            file: file.to_string(),
            source,
        })?;
        let resolver = Resolver::parse(&source).map_err(|source| Error::Parse {
            file: file.to_string(),
            source,
        })?;
        let grouped =
            group_causes(&causes, &resolver).map_err(|err| Error::resolve(file, err))?;

        debug!(
            "`{}`: {} causes at {} positions",
            file,
            causes.len(),
            grouped.len()
        );
        Ok(render(file, &grouped, self.field_order))
    }
}
