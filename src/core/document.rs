#![allow(clippy::result_large_err)]

use crate::core::error::AppError;
use std::fs;
use std::path::Path;

/// Whole-file text content, before or after substitution.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    text: String,
}

impl Document {
    pub fn new<T: Into<String>>(text: T) -> Self {
        Document { text: text.into() }
    }

    /// Read the entire file at `path` into memory.
    ///
    /// Line endings are kept as read: CRLF input stays CRLF in the output.
    pub fn load(path: &Path) -> Result<Document, AppError> {
        let text = fs::read_to_string(path)
            .map_err(|e| AppError::from_io("Failed to read input file", path, e))?;
        tracing::debug!(path = %path.display(), bytes = text.len(), "loaded document");
        Ok(Document { text })
    }

    /// Create or truncate `path` and write the document to it.
    ///
    /// Missing parent directories are not created.
    pub fn save(&self, path: &Path) -> Result<(), AppError> {
        fs::write(path, &self.text)
            .map_err(|e| AppError::from_io("Failed to write output file", path, e))?;
        tracing::debug!(path = %path.display(), bytes = self.text.len(), "saved document");
        Ok(())
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }

    /// Number of `\n` characters; substitutions must leave it unchanged.
    pub fn newline_count(&self) -> usize {
        self.text.bytes().filter(|b| *b == b'\n').count()
    }
}

impl From<String> for Document {
    fn from(text: String) -> Self {
        Document { text }
    }
}
