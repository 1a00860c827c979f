//! Reading the books directory.

use crate::error::{CliError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// One book loaded from disk.
#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    /// File stem, used as the book title
    pub name: String,

    /// Full text
    pub text: String,
}

/// Load every regular file in `dir`, in file-name order.
///
/// The book title is the file name without its extension. Bytes that are
/// not valid UTF-8 are replaced rather than rejected.
pub fn read_books(dir: &Path) -> Result<Vec<Book>> {
    if !dir.is_dir() {
        return Err(CliError::Corpus(format!(
            "{} is not a directory",
            dir.display()
        )));
    }

    let mut paths: Vec<PathBuf> = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            paths.push(entry.path());
        }
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    let mut books = Vec::with_capacity(paths.len());
    for path in paths {
        let Some(name) = path.file_stem().map(|s| s.to_string_lossy().into_owned()) else {
            continue;
        };
        let bytes = fs::read(&path)?;
        books.push(Book {
            name,
            text: String::from_utf8_lossy(&bytes).into_owned(),
        });
    }

    if books.is_empty() {
        return Err(CliError::Corpus(format!(
            "no books found in {}",
            dir.display()
        )));
    }
    Ok(books)
}
