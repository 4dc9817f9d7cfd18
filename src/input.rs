//! Loading page text from JSON.
//!
//! The extraction layer hands pages over as a JSON array:
//!
//! ```json
//! [
//!   { "page_number": 1, "text": "..." },
//!   { "page_number": 2, "text": "...", "is_extraction_source": true }
//! ]
//! ```

use crate::error::{Error, Result};
use crate::model::PageInput;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Parse pages from a JSON string.
pub fn parse_pages(json: &str) -> Result<Vec<PageInput>> {
    let pages: Vec<PageInput> = serde_json::from_str(json)?;
    validate_pages(&pages)?;
    Ok(pages)
}

/// Parse pages from a reader.
pub fn read_pages<R: Read>(reader: R) -> Result<Vec<PageInput>> {
    let pages: Vec<PageInput> = serde_json::from_reader(reader)?;
    validate_pages(&pages)?;
    Ok(pages)
}

/// Load pages from a JSON file.
///
/// # Example
///
/// ```no_run
/// use resultpage::load_pages;
///
/// let pages = load_pages("pages.json").unwrap();
/// println!("{} pages", pages.len());
/// ```
pub fn load_pages<P: AsRef<Path>>(path: P) -> Result<Vec<PageInput>> {
    let file = File::open(path)?;
    read_pages(BufReader::new(file))
}

/// Check that every page number is 1-based.
pub fn validate_pages(pages: &[PageInput]) -> Result<()> {
    match pages.iter().position(|p| p.page_number == 0) {
        Some(index) => Err(Error::InvalidPageNumber { index, number: 0 }),
        None => Ok(()),
    }
}
