//! Access to the raw bytes of the documents being reported on.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Something which can produce the source bytes of a file by its name.
///
/// The name is the key the validation results were recorded under.
pub trait Sources {
    fn read(&self, file: &str) -> io::Result<Vec<u8>>;
}

/// Reads files from disk, relative names are resolved against an optional base directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSystem {
    base: Option<PathBuf>,
}

impl FileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base(base: impl Into<PathBuf>) -> Self {
        Self {
            base: Some(base.into()),
        }
    }

    pub fn path_of(&self, file: &str) -> PathBuf {
        let path = Path::new(file);
        match &self.base {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }
}

impl Sources for FileSystem {
    fn read(&self, file: &str) -> io::Result<Vec<u8>> {
        fs::read(self.path_of(file))
    }
}

/// An in-memory set of files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySources {
    files: HashMap<String, Vec<u8>>,
}

impl MemorySources {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, name: impl Into<String>, source: impl Into<Vec<u8>>) -> &mut Self {
        self.files.insert(name.into(), source.into());
        self
    }
}

impl Sources for MemorySources {
    fn read(&self, file: &str) -> io::Result<Vec<u8>> {
        self.files.get(file).cloned().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("no source for `{}`", file))
        })
    }
}

impl<S: Sources + ?Sized> Sources for &S {
    fn read(&self, file: &str) -> io::Result<Vec<u8>> {
        (**self).read(file)
    }
}
