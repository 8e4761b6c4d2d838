//! Parser for e-learning content packages.
//!
//! Takes a [`PackageAccess`] over an unpacked directory or a ZIP archive,
//! detects which packaging standard the content implements (SCORM 1.2,
//! SCORM 2004, AICC, cmi5, or xAPI/TinCan), runs the matching parser, and
//! projects a uniform [`models::ModuleMetadata`] view that downstream LMS
//! pipelines consume.
//!
//! ```no_run
//! use parser::{DirectoryAccess, ParserOptions};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let access = DirectoryAccess::new("./course")?;
//! let metadata = parser::parse(&access, &ParserOptions::default())?;
//! println!("{} ({})", metadata.title, metadata.kind);
//! # Ok(())
//! # }
//! ```

pub mod access;
pub mod deserialize;
pub mod detect;
pub mod format;
pub mod warnings;

pub use self::access::{AccessError, ArchiveAccess, DirectoryAccess, PackageAccess};
pub use self::detect::{detect, DetectionError};
pub use self::format::{parse, parse_detailed, ParseError, Parsed, Parser, ParserOptions};
pub use self::warnings::{Warning, Warnings};
