//! Input resolution: turn the user-supplied path into a list of PDF files.
//!
//! A single file is taken as-is; a directory contributes its `*.pdf` files
//! (case-insensitive, not recursive), sorted by name so runs are repeatable.
//! Each file's `%PDF` magic bytes are checked per document by
//! [`validate_pdf`], so one stray non-PDF only fails itself.

use crate::error::{DocumentError, Pdf2TxtError};
use crate::pipeline::extract::document_id;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

/// List the PDF files to convert.
pub fn discover_inputs(input: &Path) -> Result<Vec<PathBuf>, Pdf2TxtError> {
    if !input.exists() {
        return Err(Pdf2TxtError::InputNotFound {
            path: input.to_path_buf(),
        });
    }

    if input.is_file() {
        debug!("Single input file: {}", input.display());
        return Ok(vec![input.to_path_buf()]);
    }

    let entries = std::fs::read_dir(input).map_err(|e| Pdf2TxtError::InputReadFailed {
        path: input.to_path_buf(),
        source: e,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Pdf2TxtError::InputReadFailed {
            path: input.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();
        if path.is_file() && has_pdf_extension(&path) {
            files.push(path);
        }
    }

    if files.is_empty() {
        return Err(Pdf2TxtError::NoInputFiles {
            path: input.to_path_buf(),
        });
    }

    files.sort();
    debug!("Found {} PDF files in {}", files.len(), input.display());
    Ok(files)
}

/// `true` for a `.pdf` extension in any case.
pub fn has_pdf_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}

/// Check that `path` is readable and starts with the PDF magic bytes.
pub fn validate_pdf(path: &Path) -> Result<(), DocumentError> {
    let file = std::fs::File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::PermissionDenied {
            DocumentError::PermissionDenied {
                document: document_id(path),
            }
        } else {
            DocumentError::ExtractionFailed {
                document: document_id(path),
                detail: e.to_string(),
            }
        }
    })?;

    let mut magic = Vec::with_capacity(4);
    file.take(4)
        .read_to_end(&mut magic)
        .map_err(|e| DocumentError::ExtractionFailed {
            document: document_id(path),
            detail: e.to_string(),
        })?;

    // Files shorter than the magic are rejected here too.
    if magic != b"%PDF" {
        return Err(DocumentError::NotAPdf {
            document: document_id(path),
            magic,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_has_pdf_extension() {
        assert!(has_pdf_extension(Path::new("a.pdf")));
        assert!(has_pdf_extension(Path::new("B.PDF")));
        assert!(!has_pdf_extension(Path::new("c.txt")));
        assert!(!has_pdf_extension(Path::new("pdf")));
    }

    #[test]
    fn test_discover_directory_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.pdf"), b"%PDF-1.7").unwrap();
        fs::write(dir.path().join("a.PDF"), b"%PDF-1.7").unwrap();
        fs::write(dir.path().join("notes.txt"), b"hello").unwrap();
        fs::create_dir(dir.path().join("nested.pdf")).unwrap();

        let found = discover_inputs(dir.path()).unwrap();
        let names: Vec<_> = found.iter().map(|p| document_id(p)).collect();
        assert_eq!(names, vec!["a.PDF", "b.pdf"]);
    }

    #[test]
    fn test_discover_single_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("only.pdf");
        fs::write(&file, b"%PDF-1.4").unwrap();
        assert_eq!(discover_inputs(&file).unwrap(), vec![file]);
    }

    #[test]
    fn test_discover_missing_and_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            discover_inputs(&dir.path().join("nope")),
            Err(Pdf2TxtError::InputNotFound { .. })
        ));
        assert!(matches!(
            discover_inputs(dir.path()),
            Err(Pdf2TxtError::NoInputFiles { .. })
        ));
    }

    #[test]
    fn test_validate_pdf_magic() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.pdf");
        let bad = dir.path().join("bad.pdf");
        fs::write(&good, b"%PDF-1.7\n").unwrap();
        fs::write(&bad, b"PK\x03\x04zip").unwrap();

        assert!(validate_pdf(&good).is_ok());
        match validate_pdf(&bad) {
            Err(DocumentError::NotAPdf { document, magic }) => {
                assert_eq!(document, "bad.pdf");
                assert_eq!(&magic, b"PK\x03\x04");
            }
            other => panic!("expected NotAPdf, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_pdf_short_file() {
        let dir = tempfile::tempdir().unwrap();
        let empty = dir.path().join("empty.pdf");
        let stub = dir.path().join("stub.pdf");
        fs::write(&empty, b"").unwrap();
        fs::write(&stub, b"%P").unwrap();

        match validate_pdf(&empty) {
            Err(DocumentError::NotAPdf { magic, .. }) => assert!(magic.is_empty()),
            other => panic!("expected NotAPdf, got {other:?}"),
        }
        match validate_pdf(&stub) {
            Err(DocumentError::NotAPdf { magic, .. }) => assert_eq!(magic, b"%P"),
            other => panic!("expected NotAPdf, got {other:?}"),
        }
    }
}
