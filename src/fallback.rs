//! Re-extraction sources.
//!
//! When the gate rejects the primary extraction, the caller runs the
//! document through a more expensive extractor (usually OCR) and analyzes
//! the result again. The engine does not talk to OCR services itself; it
//! only asks a [`FallbackExtractor`] for the re-extracted pages.

use crate::error::{Error, Result};
use crate::input::load_pages;
use crate::model::PageInput;
use std::path::PathBuf;

/// Source of re-extracted page text.
pub trait FallbackExtractor {
    /// Name of the extractor, for logging and reports.
    fn name(&self) -> &str;

    /// Produce re-extracted pages for the document.
    fn extract(&self) -> Result<Vec<PageInput>>;
}

/// Re-extracted pages stored in a JSON file.
#[derive(Debug, Clone)]
pub struct FileExtractor {
    path: PathBuf,
    name: String,
}

impl FileExtractor {
    /// Create an extractor reading pages from `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = format!("file:{}", path.display());
        Self { path, name }
    }
}

impl FallbackExtractor for FileExtractor {
    fn name(&self) -> &str {
        &self.name
    }

    fn extract(&self) -> Result<Vec<PageInput>> {
        load_pages(&self.path).map_err(|e| match e {
            Error::Io(err) => Error::Reextraction(format!("{}: {}", self.path.display(), err)),
            other => other,
        })
    }
}

/// Re-extracted pages already held in memory.
#[derive(Debug, Clone)]
pub struct StaticExtractor {
    name: String,
    pages: Vec<PageInput>,
}

impl StaticExtractor {
    /// Create an extractor returning `pages`.
    pub fn new(name: impl Into<String>, pages: Vec<PageInput>) -> Self {
        Self {
            name: name.into(),
            pages,
        }
    }
}

impl FallbackExtractor for StaticExtractor {
    fn name(&self) -> &str {
        &self.name
    }

    fn extract(&self) -> Result<Vec<PageInput>> {
        Ok(self.pages.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_extractor() {
        let extractor = StaticExtractor::new("ocr", vec![PageInput::new(1, "text")]);
        assert_eq!(extractor.name(), "ocr");
        assert_eq!(extractor.extract().unwrap().len(), 1);
    }

    #[test]
    fn test_file_extractor_missing_file() {
        let extractor = FileExtractor::new("/nonexistent/resultpage/pages.json");
        assert_eq!(extractor.name(), "file:/nonexistent/resultpage/pages.json");
        assert!(matches!(extractor.extract(), Err(Error::Reextraction(_))));
    }
}
