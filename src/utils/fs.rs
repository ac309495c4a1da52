use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::IoError;

/// Writes `data` to `path` through a uniquely named sibling temporary file and
/// a rename, so readers never see a partially written file and concurrent
/// writers never share a temp file. Creates the parent directory.
pub fn atomic_write(path: &Path, data: &[u8]) -> Result<(), IoError> {
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    fs::create_dir_all(parent).map_err(|e| IoError::write_error(parent, e))?;

    let mut file = NamedTempFile::new_in(parent).map_err(|e| IoError::write_error(parent, e))?;
    file.write_all(data)
        .map_err(|e| IoError::write_error(file.path(), e))?;
    file.as_file()
        .sync_all()
        .map_err(|e| IoError::write_error(file.path(), e))?;

    file.persist(path)
        .map_err(|e| IoError::write_error(path, e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use tempfile::TempDir;

    #[test]
    fn test_atomic_write_creates_parent_and_replaces() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested/dir/data.json");

        atomic_write(&path, b"first").unwrap();
        atomic_write(&path, b"second").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
        let entries: Vec<_> = fs::read_dir(path.parent().unwrap())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec!["data.json"]);
    }

    #[test]
    fn test_atomic_write_unwritable_target() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, "file, not dir").unwrap();

        let err = atomic_write(&blocker.join("data.json"), b"x").unwrap_err();
        assert!(matches!(err, IoError::WriteError { .. }));
    }

    #[test]
    fn test_concurrent_writers_both_succeed() {
        let temp_dir = TempDir::new().unwrap();
        let path = Arc::new(temp_dir.path().join("projects.json"));
        let payloads = [vec![b'a'; 1 << 20], vec![b'b'; 1 << 20]];

        for _ in 0..10 {
            let handles: Vec<_> = payloads
                .iter()
                .cloned()
                .map(|payload| {
                    let path = Arc::clone(&path);
                    thread::spawn(move || atomic_write(&path, &payload))
                })
                .collect();
            for handle in handles {
                assert!(handle.join().unwrap().is_ok());
            }

            let written = fs::read(path.as_ref()).unwrap();
            assert!(payloads.contains(&written));
        }
        assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 1);
    }
}
