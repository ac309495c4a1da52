use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::DetectError;

pub use crate::utils::string::contains_ci;

pub fn file_exists(dir: &Path, name: &str) -> bool {
    dir.join(name).exists()
}

/// Reads a file as lossy UTF-8. A missing file is `Ok(None)`.
pub fn read_optional(path: &Path) -> Result<Option<String>, DetectError> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(String::from_utf8_lossy(&bytes).into_owned())),
        Err(e) if is_absent(&e) => Ok(None),
        Err(e) => Err(DetectError::read(path, e)),
    }
}

/// Names of the entries directly inside `dir`, sorted. Hidden entries are
/// included only when `include_hidden` is set. A missing directory is empty.
pub fn list_dir(dir: &Path, include_hidden: bool) -> Result<Vec<String>, DetectError> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if is_absent(&e) => return Ok(Vec::new()),
        Err(e) => return Err(DetectError::read(dir, e)),
    };

    let mut names: Vec<String> = entries
        .flatten()
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .filter(|name| include_hidden || !name.starts_with('.'))
        .collect();
    names.sort();
    Ok(names)
}

pub fn has_extension(name: &str, extension: &str) -> bool {
    Path::new(name)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
}

fn is_absent(e: &std::io::Error) -> bool {
    matches!(e.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory)
}
