//! Statement text acquisition: PDF through pdf-extract, or pre-extracted text.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Form feed; pdf-extract separates pages with it.
const PAGE_BREAK: char = '\u{c}';

/// Page texts of one statement. `.txt` files and `force_text` skip PDF decoding.
pub fn read_statement(path: &Path, force_text: bool) -> Result<Vec<String>> {
    let text = if force_text || is_text_file(path) {
        fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?
    } else {
        let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
        pdf_extract::extract_text_from_mem(&bytes)
            .with_context(|| format!("Failed to extract text from PDF: {}", path.display()))?
    };
    tracing::debug!(path = %path.display(), chars = text.len(), "statement text loaded");
    Ok(split_pages(&text))
}

fn is_text_file(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("txt"))
}

pub fn split_pages(text: &str) -> Vec<String> {
    text.split(PAGE_BREAK).map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_file_is_read_verbatim() {
        let tmp = tempfile::tempdir().unwrap();
        let p = tmp.path().join("feb.txt");
        fs::write(&p, "Opening Balance 1.00\u{c}Closing Balance 1.00").unwrap();
        let pages = read_statement(&p, false).unwrap();
        assert_eq!(pages, vec!["Opening Balance 1.00", "Closing Balance 1.00"]);
    }

    #[test]
    fn test_forced_text_ignores_extension() {
        let tmp = tempfile::tempdir().unwrap();
        let p = tmp.path().join("feb.pdf");
        fs::write(&p, "plain text").unwrap();
        assert_eq!(read_statement(&p, true).unwrap(), vec!["plain text"]);
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = read_statement(Path::new("/nonexistent/feb.txt"), false).unwrap_err();
        assert!(err.to_string().contains("feb.txt"));
    }
}
