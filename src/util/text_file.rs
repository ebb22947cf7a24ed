//! Text file discovery.
//!
//! Files are classified by sniffing their first block: a NUL byte or more
//! than 30% of bytes outside printable ASCII and common whitespace marks a
//! file as binary. An empty file is text.

use std::fs::{self, File, ReadDir};
use std::io::Read;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::error::Result;

/// Number of leading bytes inspected by [`is_text_file`].
pub const SNIFF_BLOCK_SIZE: usize = 512;

/// Share of non-text bytes above which a block is binary.
const MAX_NON_TEXT_RATIO: f64 = 0.30;

fn is_text_byte(byte: u8) -> bool {
    matches!(byte, 32..=126 | b'\n' | b'\r' | b'\t' | 0x0c | 0x08)
}

/// Classify a block of bytes as text.
pub fn is_text_block(block: &[u8]) -> bool {
    if block.contains(&0) {
        return false;
    }
    if block.is_empty() {
        return true;
    }

    let non_text = block.iter().filter(|b| !is_text_byte(**b)).count();
    non_text as f64 / block.len() as f64 <= MAX_NON_TEXT_RATIO
}

/// Check whether the file at `path` looks like plain text.
pub fn is_text_file<P: AsRef<Path>>(path: P) -> Result<bool> {
    let file = File::open(path)?;
    let mut block = Vec::with_capacity(SNIFF_BLOCK_SIZE);
    file.take(SNIFF_BLOCK_SIZE as u64).read_to_end(&mut block)?;
    Ok(is_text_block(&block))
}

/// Whether `path` ends with one of `extensions`; no filter matches all.
pub fn has_extension(path: &Path, extensions: &[String]) -> bool {
    if extensions.is_empty() {
        return true;
    }

    let name = path.to_string_lossy();
    extensions.iter().any(|ext| name.ends_with(ext.as_str()))
}

/// Recursively find the text files under `directory`.
///
/// Only files whose name ends with one of `extensions` are kept; an empty
/// filter keeps all. Paths are absolute and sorted. Only an unreadable
/// `directory` is an error; unreadable files and subdirectories below it are
/// skipped with a warning.
pub fn find_text_files<P: AsRef<Path>>(directory: P, extensions: &[String]) -> Result<Vec<PathBuf>> {
    let root = fs::canonicalize(directory.as_ref())?;
    let entries = fs::read_dir(&root)?;
    let mut paths = Vec::new();
    collect_text_files(entries, extensions, &mut paths);
    paths.sort();
    debug!("Found {} text file(s) in '{}'", paths.len(), root.display());
    Ok(paths)
}

fn collect_text_files(entries: ReadDir, extensions: &[String], paths: &mut Vec<PathBuf>) {
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable directory entry: {e}");
                continue;
            }
        };
        let path = entry.path();
        let file_type = match entry.file_type() {
            Ok(file_type) => file_type,
            Err(e) => {
                warn!("Skipping '{}': {e}", path.display());
                continue;
            }
        };

        if file_type.is_dir() {
            match fs::read_dir(&path) {
                Ok(children) => collect_text_files(children, extensions, paths),
                Err(e) => warn!("Skipping unreadable directory '{}': {e}", path.display()),
            }
        } else if path.is_file() && has_extension(&path, extensions) {
            match is_text_file(&path) {
                Ok(true) => paths.push(path),
                Ok(false) => debug!("Skipping binary file: '{}'", path.display()),
                Err(e) => warn!("Skipping unreadable file '{}': {e}", path.display()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_text_block_classification() {
        assert!(is_text_block(b""));
        assert!(is_text_block(b"plain text\r\n\twith whitespace\x0c"));
        assert!(!is_text_block(b"nul\x00byte"));

        // 3 of 10 bytes non-text is still text, 4 of 10 is binary
        assert!(is_text_block(b"abcdefg\xff\xfe\xfd"));
        assert!(!is_text_block(b"abcdef\xff\xfe\xfd\xfc"));
    }

    #[test]
    fn test_is_text_file() {
        let dir = TempDir::new().unwrap();
        let text = dir.path().join("a.txt");
        let binary = dir.path().join("b.bin");
        let empty = dir.path().join("c.txt");
        fs::write(&text, "hello world\n").unwrap();
        fs::write(&binary, [0u8, 159, 146, 150]).unwrap();
        fs::write(&empty, "").unwrap();

        assert!(is_text_file(&text).unwrap());
        assert!(!is_text_file(&binary).unwrap());
        assert!(is_text_file(&empty).unwrap());
    }

    #[test]
    fn test_only_first_block_is_sniffed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("long.txt");
        let mut content = vec![b'a'; SNIFF_BLOCK_SIZE];
        content.extend_from_slice(&[0u8; 64]);
        fs::write(&path, content).unwrap();

        assert!(is_text_file(&path).unwrap());
    }

    #[test]
    fn test_has_extension() {
        let path = Path::new("/docs/guide.tex");
        assert!(has_extension(path, &[]));
        assert!(has_extension(path, &[".tex".to_string()]));
        assert!(has_extension(path, &[".adoc".to_string(), "tex".to_string()]));
        assert!(!has_extension(path, &[".txt".to_string()]));
        assert!(has_extension(path, &[String::new()]));
    }

    #[test]
    fn test_find_text_files() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("nested/deeper")).unwrap();
        fs::write(dir.path().join("readme.txt"), "top").unwrap();
        fs::write(dir.path().join("nested/guide.tex"), "nested").unwrap();
        fs::write(dir.path().join("nested/deeper/notes.txt"), "deep").unwrap();
        fs::write(dir.path().join("nested/image.txt"), [0u8, 1, 2]).unwrap();

        let all = find_text_files(dir.path(), &[]).unwrap();
        assert_eq!(all.len(), 3);
        assert!(all.iter().all(|p| p.is_absolute()));

        let txt = find_text_files(dir.path(), &[".txt".to_string()]).unwrap();
        let names: Vec<String> = txt
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["notes.txt", "readme.txt"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_subdirectory_is_skipped() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let locked = dir.path().join("locked");
        fs::create_dir_all(&locked).unwrap();
        fs::write(dir.path().join("readme.txt"), "top").unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        let found = find_text_files(dir.path(), &[]);
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        let found = found.unwrap();
        assert_eq!(found.len(), 1);
        assert!(found[0].ends_with("readme.txt"));
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(find_text_files(dir.path().join("missing"), &[]).is_err());
    }
}
