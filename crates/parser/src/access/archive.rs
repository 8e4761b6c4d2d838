use super::{AccessError, PackageAccess};
use indexmap::IndexMap;
use std::fs::File;
use std::io::{self, Cursor, Read, Seek};
use std::path::Path;
use std::sync::Mutex;
use zip::result::ZipError;
use zip::ZipArchive;

/// Package access backed by a ZIP archive.
///
/// The entry index (name → uncompressed size, in archive order) is computed
/// once at construction, so `exists`, `list` and `total_size` never touch
/// the underlying reader. `read` inflates the whole entry under a
/// short-lived lock; the returned stream owns its bytes and can be consumed
/// concurrently with any other stream.
pub struct ArchiveAccess<R: Read + Seek + Send = File> {
    archive: Mutex<ZipArchive<R>>,
    entries: IndexMap<String, u64>,
    description: String,
}

impl ArchiveAccess<File> {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, AccessError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        Self::new(file, path.display().to_string())
    }
}

impl<R: Read + Seek + Send> ArchiveAccess<R> {
    pub fn new(reader: R, description: String) -> Result<Self, AccessError> {
        let mut archive = ZipArchive::new(reader)?;
        let mut entries = IndexMap::with_capacity(archive.len());
        for position in 0..archive.len() {
            let entry = archive.by_index(position)?;
            let name = entry.name().to_string();
            if name.ends_with('/') {
                continue;
            }
            entries.insert(name, entry.size());
        }
        Ok(ArchiveAccess {
            archive: Mutex::new(archive),
            entries,
            description,
        })
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, ZipArchive<R>>, AccessError> {
        self.archive
            .lock()
            .map_err(|_| AccessError::Io(io::Error::other("archive lock poisoned")))
    }
}

impl<R: Read + Seek + Send> PackageAccess for ArchiveAccess<R> {
    fn exists(&self, path: &str) -> Result<bool, AccessError> {
        Ok(self.entries.contains_key(path))
    }

    fn exists_batch(&self, paths: &[String]) -> Result<IndexMap<String, bool>, AccessError> {
        Ok(paths
            .iter()
            .map(|path| (path.clone(), self.entries.contains_key(path)))
            .collect())
    }

    fn read(&self, path: &str) -> Result<Box<dyn Read + Send>, AccessError> {
        if !self.entries.contains_key(path) {
            return Err(AccessError::NotFound(path.to_string()));
        }
        let mut archive = self.lock()?;
        let mut entry = match archive.by_name(path) {
            Ok(entry) => entry,
            Err(ZipError::FileNotFound) => return Err(AccessError::NotFound(path.to_string())),
            Err(cause) => return Err(cause.into()),
        };
        let mut bytes = Vec::with_capacity(entry.size() as usize);
        entry.read_to_end(&mut bytes)?;
        Ok(Box::new(Cursor::new(bytes)))
    }

    fn list(&self, prefix: &str) -> Result<Vec<String>, AccessError> {
        Ok(self
            .entries
            .keys()
            .filter(|name| {
                prefix.is_empty()
                    || name.strip_prefix(prefix).is_some_and(|rest| {
                        rest.starts_with('/') || prefix.ends_with('/') || rest.is_empty()
                    })
            })
            .cloned()
            .collect())
    }

    fn total_size(&self) -> Result<u64, AccessError> {
        Ok(self.entries.values().sum())
    }

    fn root_path(&self) -> String {
        self.description.clone()
    }
}
