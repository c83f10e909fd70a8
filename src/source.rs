//! In-memory source file storage.
//!
//! This module provides [`SourceMap`], the owner of every piece of source
//! text seen during a compilation. The root file is loaded by the driver;
//! the preprocessor loads further files when it encounters `#include`.
//! Every [`Span`](crate::token::Span) carries an index into this map so
//! diagnostics can recover the file name and text for any token.

use std::io;
use std::path::{Path, PathBuf};

/// One loaded source file: its display name and full text.
#[derive(Debug)]
pub struct SourceFile {
    /// The path the file was loaded from, as given (used in diagnostics
    /// and to resolve relative `#include` paths).
    pub name: String,
    /// The complete file contents.
    pub text: String,
}

impl SourceFile {
    /// Returns the directory containing this file.
    ///
    /// Used to resolve `#include "path"` relative to the including file.
    /// A bare filename resolves against the current directory.
    pub fn dir(&self) -> PathBuf {
        match Path::new(&self.name).parent() {
            Some(parent) if parent != Path::new("") => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }
}

/// Owner of all source text for one compilation.
#[derive(Debug, Default)]
pub struct SourceMap {
    files: Vec<SourceFile>,
}

impl SourceMap {
    /// Creates an empty source map.
    pub fn new() -> Self {
        SourceMap { files: Vec::new() }
    }

    /// Reads a file from disk and returns its index in the map.
    pub fn load(&mut self, path: &Path) -> io::Result<usize> {
        let text = std::fs::read_to_string(path)?;
        Ok(self.add(path.display().to_string(), text))
    }

    /// Adds an in-memory file (used by tests and alternate drivers) and
    /// returns its index.
    pub fn add(&mut self, name: impl Into<String>, text: impl Into<String>) -> usize {
        self.files.push(SourceFile {
            name: name.into(),
            text: text.into(),
        });
        self.files.len() - 1
    }

    /// Returns the file at the given index.
    ///
    /// # Panics
    /// Panics if the index was not produced by this map. Spans are only
    /// created by the lexer from valid indices, so this indicates a bug.
    pub fn file(&self, id: usize) -> &SourceFile {
        &self.files[id]
    }

    /// Returns the number of files in the map.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Returns `true` if no files have been loaded.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
