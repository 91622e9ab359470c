use std::fs;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

/// Checks if a file exists at the given path
pub fn file_exists(path: &Path) -> bool {
    path.is_file()
}

/// Reads a text file as trimmed, non-empty lines.
///
/// A missing file yields `Ok(None)` so callers can treat it as empty input.
pub fn read_lines(path: &Path) -> io::Result<Option<Vec<String>>> {
    let file = match fs::File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e),
    };

    let mut lines = Vec::new();
    for line in BufReader::new(file).lines() {
        let line = line?;
        let line = line.trim();
        if !line.is_empty() {
            lines.push(line.to_string());
        }
    }
    Ok(Some(lines))
}

/// Writes `content` to a sibling temporary file, then renames it over `path`.
pub fn write_atomic(path: &Path, content: &[u8]) -> io::Result<()> {
    let file_name = path.file_name().ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "output path has no file name")
    })?;
    let tmp_path = path.with_file_name(format!(".{}.tmp", file_name.to_string_lossy()));

    let result = (|| {
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(content)?;
        file.sync_all()?;
        fs::rename(&tmp_path, path)
    })();

    if result.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_read_lines_trims_and_skips_blank() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("new_list.txt");
        fs::write(&path, "  a.com \n\n\t\nhttps://b.org/x\n").unwrap();
        assert_eq!(
            read_lines(&path).unwrap().unwrap(),
            vec!["a.com", "https://b.org/x"]
        );
    }

    #[test]
    fn test_read_lines_missing() {
        let dir = tempdir().unwrap();
        assert!(read_lines(&dir.path().join("absent.txt")).unwrap().is_none());
    }

    #[test]
    fn test_write_atomic_replaces() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.json");
        fs::write(&path, "old").unwrap();
        write_atomic(&path, b"new").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
        assert!(file_exists(&path));
        assert!(!dir.path().join(".out.json.tmp").exists());
    }
}
