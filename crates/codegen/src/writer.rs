use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::Path;
use yamavel_core::{Result, YamavelError};

/// What happened to a generated file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    /// The destination already existed and was left untouched.
    Skipped,
    /// A create-new write found the destination already taken.
    Collision,
}

pub struct CodeWriter;

impl CodeWriter {
    pub fn new() -> Self {
        Self
    }

    /// Create `path` with create-new semantics. An existing file is
    /// reported as [`WriteOutcome::Collision`] and never overwritten.
    pub fn write_new(&self, path: &Path, content: &str) -> Result<WriteOutcome> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| YamavelError::write(path, e))?;
        }

        let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => return Ok(WriteOutcome::Collision),
            Err(e) => return Err(YamavelError::write(path, e)),
        };

        file.write_all(content.as_bytes())
            .and_then(|()| file.flush())
            .map_err(|e| YamavelError::write(path, e))?;

        Ok(WriteOutcome::Written)
    }

    /// Write `path` only if nothing is there yet, so hand-edited files
    /// survive regeneration.
    pub fn write_if_absent(&self, path: &Path, content: &str) -> Result<WriteOutcome> {
        if path.exists() {
            return Ok(WriteOutcome::Skipped);
        }

        match self.write_new(path, content)? {
            WriteOutcome::Collision => Ok(WriteOutcome::Skipped),
            outcome => Ok(outcome),
        }
    }
}

impl Default for CodeWriter {
    fn default() -> Self {
        Self::new()
    }
}
