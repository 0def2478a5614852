use std::{fs, path::{Path, PathBuf}};

use tracing::debug;

use crate::error::{Error, Result};

/// Where document text comes from.
pub trait TextSource: Send + Sync {
    /// Identifiers of all text documents under `root`.
    /// If `root` already names a text document, just that one.
    fn discover(&self, root: &Path) -> Result<Vec<PathBuf>>;

    /// Full text of one document
    fn read(&self, path: &Path) -> Result<String>;
}

/// Text files on the local file system, selected by extension.
#[derive(Debug, Clone)]
pub struct FsTextSource {
    extension: String,
}

impl FsTextSource {
    pub fn new() -> Self {
        Self::with_extension("txt")
    }

    pub fn with_extension(extension: &str) -> Self {
        Self {
            extension: extension.trim_start_matches('.').to_string(),
        }
    }

    fn is_text_file(&self, path: &Path) -> bool {
        path.extension().is_some_and(|ext| ext == self.extension.as_str())
    }

    fn walk(&self, dir: &Path, out: &mut Vec<PathBuf>) -> Result<()> {
        for entry in fs::read_dir(dir).map_err(|e| Error::input(dir, e))? {
            let path = entry.map_err(|e| Error::input(dir, e))?.path();
            if path.is_dir() {
                self.walk(&path, out)?;
            } else if self.is_text_file(&path) {
                out.push(path);
            }
        }
        Ok(())
    }
}

impl Default for FsTextSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TextSource for FsTextSource {
    /// Directory walks are sorted so runs are reproducible.
    fn discover(&self, root: &Path) -> Result<Vec<PathBuf>> {
        if self.is_text_file(root) {
            // a named file must exist, same as a named directory
            fs::metadata(root).map_err(|e| Error::input(root, e))?;
            return Ok(vec![root.to_path_buf()]);
        }
        let mut files = Vec::new();
        self.walk(root, &mut files)?;
        files.sort();
        debug!(root = %root.display(), files = files.len(), "discovered text files");
        Ok(files)
    }

    fn read(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).map_err(|e| Error::input(path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walks_directories_recursively_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("b").join("deeper");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join("z.txt"), "z").unwrap();
        fs::write(dir.path().join("a.txt"), "a").unwrap();
        fs::write(dir.path().join("notes.md"), "skip").unwrap();
        fs::write(nested.join("m.txt"), "m").unwrap();

        let files = FsTextSource::new().discover(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            names,
            vec![
                PathBuf::from("a.txt"),
                PathBuf::from("b").join("deeper").join("m.txt"),
                PathBuf::from("z.txt"),
            ]
        );
    }

    #[test]
    fn single_file_root_is_returned_as_is() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("one.txt");
        fs::write(&file, "ἓν").unwrap();
        let source = FsTextSource::new();
        assert_eq!(source.discover(&file).unwrap(), vec![file.clone()]);
        assert_eq!(source.read(&file).unwrap(), "ἓν");
    }

    #[test]
    fn missing_paths_are_input_errors() {
        let dir = tempfile::tempdir().unwrap();
        let source = FsTextSource::new();
        assert!(matches!(source.discover(&dir.path().join("gone")), Err(Error::Input { .. })));
        assert!(matches!(source.discover(&dir.path().join("gone.txt")), Err(Error::Input { .. })));
        assert!(matches!(source.read(&dir.path().join("gone.txt")), Err(Error::Input { .. })));
    }

    #[test]
    fn custom_extension() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.grc"), "x").unwrap();
        fs::write(dir.path().join("b.txt"), "y").unwrap();
        let files = FsTextSource::with_extension(".grc").discover(dir.path()).unwrap();
        assert_eq!(files, vec![dir.path().join("a.grc")]);
    }
}
