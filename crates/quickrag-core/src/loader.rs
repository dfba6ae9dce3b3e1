//! Filesystem document loading for the CLI.
//!
//! Walks a directory for `.txt` files and turns each into an
//! `add_documents` entry: file stem as id, full path as source. Files are
//! visited in name order so the corpus insertion order is deterministic.

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::types::DocumentInput;

pub fn load_documents(data_dir: &Path) -> Result<Vec<DocumentInput>> {
    let mut entries = Vec::new();
    for entry in walkdir::WalkDir::new(data_dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) != Some("txt") {
            continue;
        }
        let text = read_file_content(path)?;
        let id = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .filter(|s| !s.is_empty());
        entries.push(DocumentInput {
            text: Some(text),
            id,
            source: Some(path.to_string_lossy().to_string()),
        });
    }
    Ok(entries)
}

fn read_file_content(file_path: &Path) -> Result<String> {
    match fs::read_to_string(file_path) {
        Ok(content) => Ok(content),
        Err(_) => match fs::read(file_path) {
            Ok(bytes) => Ok(String::from_utf8_lossy(&bytes).to_string()),
            Err(e) => Err(Error::UnreadableDocument(format!(
                "{}: {e}",
                file_path.display()
            ))),
        },
    }
}
