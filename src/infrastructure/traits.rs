//! I/O boundary traits for testability
//!
//! The solver reads its token stream through [`InputSource`], so services can
//! be exercised with in-memory text instead of stdin or files.

use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// Where the tree description comes from.
pub trait InputSource: Send + Sync {
    /// Read the complete input.
    fn read_to_string(&self) -> io::Result<String>;

    /// Human readable name for log and error messages.
    fn describe(&self) -> String;
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Standard input.
#[derive(Debug, Default)]
pub struct StdinInput;

impl InputSource for StdinInput {
    fn read_to_string(&self) -> io::Result<String> {
        let mut buf = String::new();
        io::stdin().lock().read_to_string(&mut buf)?;
        Ok(buf)
    }

    fn describe(&self) -> String {
        "<stdin>".to_string()
    }
}

/// A file on disk.
#[derive(Debug, Clone)]
pub struct FileInput {
    path: PathBuf,
}

impl FileInput {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl InputSource for FileInput {
    fn read_to_string(&self) -> io::Result<String> {
        std::fs::read_to_string(&self.path)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Text already held in memory.
#[derive(Debug, Clone)]
pub struct TextInput {
    text: String,
}

impl TextInput {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl InputSource for TextInput {
    fn read_to_string(&self) -> io::Result<String> {
        Ok(self.text.clone())
    }

    fn describe(&self) -> String {
        "<memory>".to_string()
    }
}

/// Pick the source for an optional path argument; `None` and `-` mean stdin.
pub fn input_for(path: Option<&Path>) -> Box<dyn InputSource> {
    match path {
        Some(p) if p != Path::new("-") => Box::new(FileInput::new(p)),
        _ => Box::new(StdinInput),
    }
}
