//! Uniform byte and metadata access over the two package sources: an
//! unpacked directory tree and an opened ZIP archive.
//!
//! Parsers only ever see the [`PackageAccess`] capability. Every byte stream
//! returned by `read` is a scoped acquisition: whatever handle the
//! implementation opened is released when the stream drops, on success and
//! failure alike.

mod archive;
mod directory;

pub use self::archive::ArchiveAccess;
pub use self::directory::DirectoryAccess;

use indexmap::IndexMap;
use std::io::{self, Read};

/// Basenames whose presence anywhere in a package marks it as shipping an
/// xAPI runtime wrapper. Matched case-sensitively.
const XAPI_SENTINELS: [&str; 2] = ["xAPI.js", "sendStatement.js"];

/// Error type for all access-layer operations.
#[derive(Debug, thiserror::Error)]
pub enum AccessError {
    #[error("file not found: '{0}'")]
    NotFound(String),

    #[error("invalid package path: '{0}'")]
    InvalidPath(String),

    #[error("i/o failure in package access: {0}")]
    Io(#[from] io::Error),

    #[error("invalid archive: {0}")]
    Archive(#[from] zip::result::ZipError),
}

/// Capability interface for reading a content package.
///
/// Paths are relative, `/`-separated, and compared case-sensitively;
/// case-insensitive lookups are layered on top via listings (see
/// [`crate::deserialize::find_file_ignore_case`]). Implementations must
/// support `exists` and `list` from any thread, and concurrent reads from
/// independently returned streams.
pub trait PackageAccess: Send + Sync {
    /// Whether `path` exists in the package.
    fn exists(&self, path: &str) -> Result<bool, AccessError>;

    /// Batched existence check. The result maps each input path to its
    /// verdict in the input's iteration order.
    fn exists_batch(&self, paths: &[String]) -> Result<IndexMap<String, bool>, AccessError> {
        let mut verdicts = IndexMap::with_capacity(paths.len());
        for path in paths {
            let exists = self.exists(path)?;
            verdicts.insert(path.clone(), exists);
        }
        Ok(verdicts)
    }

    /// Opens `path` for reading.
    fn read(&self, path: &str) -> Result<Box<dyn Read + Send>, AccessError>;

    /// All file paths under `prefix` (`""` for the whole package), relative
    /// to the package root.
    fn list(&self, prefix: &str) -> Result<Vec<String>, AccessError>;

    /// Sum of uncompressed file sizes in bytes.
    fn total_size(&self) -> Result<u64, AccessError>;

    /// A human-readable description of the package source, for diagnostics.
    fn root_path(&self) -> String;

    /// True when an xAPI sentinel script is present at any depth.
    fn has_xapi_support(&self) -> Result<bool, AccessError> {
        let listing = self.list("")?;
        Ok(listing.iter().any(|path| {
            let basename = path.rsplit('/').next().unwrap_or(path);
            XAPI_SENTINELS.contains(&basename)
        }))
    }
}

/// Reads the whole file at `path`.
pub fn read_all(access: &dyn PackageAccess, path: &str) -> Result<Vec<u8>, AccessError> {
    let mut stream = access.read(path)?;
    let mut bytes = Vec::new();
    stream.read_to_end(&mut bytes)?;
    Ok(bytes)
}

/// Reads at most `limit` bytes from the start of the file at `path`,
/// without consuming the rest.
pub fn peek(access: &dyn PackageAccess, path: &str, limit: usize) -> Result<Vec<u8>, AccessError> {
    let stream = access.read(path)?;
    let mut bytes = Vec::with_capacity(limit.min(1 << 16));
    let mut taken = stream.take(limit as u64);
    taken.read_to_end(&mut bytes)?;
    Ok(bytes)
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Cursor;

    struct FixedAccess(Vec<String>);

    impl PackageAccess for FixedAccess {
        fn exists(&self, path: &str) -> Result<bool, AccessError> {
            Ok(self.0.iter().any(|p| p == path))
        }

        fn read(&self, _path: &str) -> Result<Box<dyn Read + Send>, AccessError> {
            Ok(Box::new(Cursor::new(Vec::new())))
        }

        fn list(&self, prefix: &str) -> Result<Vec<String>, AccessError> {
            Ok(self
                .0
                .iter()
                .filter(|p| p.starts_with(prefix))
                .cloned()
                .collect())
        }

        fn total_size(&self) -> Result<u64, AccessError> {
            Ok(0)
        }

        fn root_path(&self) -> String {
            "fixed".to_string()
        }
    }

    #[test]
    fn exists_batch_preserves_input_order() {
        let access = FixedAccess(vec!["b.html".to_string(), "a.html".to_string()]);
        let paths = vec![
            "a.html".to_string(),
            "missing.html".to_string(),
            "b.html".to_string(),
        ];
        let verdicts = access.exists_batch(&paths).unwrap();
        let keys: Vec<&String> = verdicts.keys().collect();
        assert_eq!(vec!["a.html", "missing.html", "b.html"], keys);
        assert_eq!(Some(&true), verdicts.get("a.html"));
        assert_eq!(Some(&false), verdicts.get("missing.html"));
    }

    #[test]
    fn xapi_sentinels_match_at_any_depth_case_sensitively() {
        let access = FixedAccess(vec!["deep/nested/xAPI.js".to_string()]);
        assert!(access.has_xapi_support().unwrap());

        let access = FixedAccess(vec!["xapi.js".to_string()]);
        assert!(!access.has_xapi_support().unwrap());

        let access = FixedAccess(vec!["scripts/sendStatement.js".to_string()]);
        assert!(access.has_xapi_support().unwrap());
    }
}
