use super::{AccessError, PackageAccess};
use std::fs::{self, File};
use std::io::Read;
use std::path::{Component, Path, PathBuf};

/// Package access backed by an unpacked directory tree.
#[derive(Debug)]
pub struct DirectoryAccess {
    root: PathBuf,
}

impl DirectoryAccess {
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, AccessError> {
        let root = root.into();
        if !root.is_dir() {
            return Err(AccessError::InvalidPath(root.display().to_string()));
        }
        Ok(DirectoryAccess { root })
    }

    /// Maps a relative `/`-separated package path onto the filesystem,
    /// rejecting absolute paths and parent traversal.
    fn resolve(&self, path: &str) -> Result<PathBuf, AccessError> {
        let relative = Path::new(path);
        let mut resolved = self.root.clone();
        for component in relative.components() {
            match component {
                Component::Normal(part) => resolved.push(part),
                Component::CurDir => {}
                _ => return Err(AccessError::InvalidPath(path.to_string())),
            }
        }
        Ok(resolved)
    }

    fn walk(&self, directory: &Path, found: &mut Vec<String>) -> Result<(), AccessError> {
        for entry in fs::read_dir(directory)? {
            let entry = entry?;
            let file_type = entry.file_type()?;
            if file_type.is_dir() {
                self.walk(&entry.path(), found)?;
            } else if file_type.is_file() {
                let relative = entry
                    .path()
                    .strip_prefix(&self.root)
                    .map(|p| {
                        p.components()
                            .filter_map(|c| c.as_os_str().to_str())
                            .collect::<Vec<_>>()
                            .join("/")
                    })
                    .unwrap_or_default();
                if !relative.is_empty() {
                    found.push(relative);
                }
            }
        }
        Ok(())
    }
}

impl PackageAccess for DirectoryAccess {
    fn exists(&self, path: &str) -> Result<bool, AccessError> {
        Ok(self.resolve(path)?.exists())
    }

    fn read(&self, path: &str) -> Result<Box<dyn Read + Send>, AccessError> {
        let resolved = self.resolve(path)?;
        match File::open(&resolved) {
            Ok(file) => Ok(Box::new(file)),
            Err(cause) if cause.kind() == std::io::ErrorKind::NotFound => {
                Err(AccessError::NotFound(path.to_string()))
            }
            Err(cause) => Err(cause.into()),
        }
    }

    fn list(&self, prefix: &str) -> Result<Vec<String>, AccessError> {
        let start = self.resolve(prefix)?;
        if !start.is_dir() {
            return Ok(Vec::new());
        }
        let mut found = Vec::new();
        self.walk(&start, &mut found)?;
        found.sort();
        Ok(found)
    }

    fn total_size(&self) -> Result<u64, AccessError> {
        let mut total = 0u64;
        for path in self.list("")? {
            total += fs::metadata(self.resolve(&path)?)?.len();
        }
        Ok(total)
    }

    fn root_path(&self) -> String {
        self.root.display().to_string()
    }
}
