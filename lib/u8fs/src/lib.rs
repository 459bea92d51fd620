//! Filesystem primitives addressed by UTF-8 narrow strings.
//!
//! Paths and text cross this API as plain UTF-8 [`str`] values and are
//! converted to the platform's native representation immediately before each
//! native call. The conversion always runs in two passes, measuring the exact
//! number of destination units before allocating, because byte length is not
//! a usable proxy for native-unit length once the input leaves ASCII.
//!
//! The [`FileSystem`] trait carries the capability set; [`host_fs`] provides
//! the variant backed by the host operating system. Every operation is a
//! direct, synchronous native call and reports failure through [`FsError`].

use std::fmt;
use std::io::{self, Read, Write};

use thiserror::Error;

mod codec;
pub mod host_fs;
mod mode;

pub use mode::OpenMode;

/// Path separator of the host platform, for callers building paths.
pub const PATH_SEPARATOR: char = std::path::MAIN_SEPARATOR;

pub type Result<T> = std::result::Result<T, FsError>;

/// Error type for external users
#[derive(Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum FsError {
    /// A path or text argument was empty
    #[error("path is empty")]
    PathNullOrEmpty,
    /// Conversion to or from the native encoding rejected the input
    #[error("conversion to the native encoding failed")]
    ConversionFailed,
    /// A native call failed; `code` is the raw platform status for diagnosis
    #[error("native call failed (status {code})")]
    Unknown { code: i32 },
}

impl FsError {
    /// Raw platform status of the failed native call. `0` when the failure
    /// was detected before any native call was made.
    pub const fn raw_code(&self) -> i32 {
        match self {
            FsError::Unknown { code } => *code,
            _ => 0,
        }
    }
}

impl From<io::Error> for FsError {
    fn from(io_error: io::Error) -> Self {
        FsError::Unknown {
            code: io_error.raw_os_error().unwrap_or(0),
        }
    }
}

/// The capability set shared by every filesystem variant.
///
/// Boolean queries keep absence and failure apart: `Ok(false)` means the
/// entry legitimately does not exist, `Err(_)` means the query itself failed.
pub trait FileSystem {
    /// Checks whether any entry exists at `path`, directories included.
    fn path_exists(&self, path: &str) -> Result<bool>;
    /// Checks whether `path` is an existing directory.
    fn is_directory(&self, path: &str) -> Result<bool>;
    /// Checks whether `path` exists and is not a directory. Special files
    /// count as plain.
    fn is_plain_file(&self, path: &str) -> Result<bool>;
    /// Creates a single directory level. Any native refusal, "already
    /// exists" included, surfaces as [`FsError::Unknown`] with the raw
    /// status code.
    fn create_directory(&self, path: &str) -> Result<()>;
    /// Opens a file with the conventional `[b]r|w|a[+]` mode vocabulary.
    ///
    /// Without `b` in the mode, text written through the handle is forced to
    /// UTF-8 via the native wide representation; see [`TextFile`].
    fn open_file(&self, path: &str, mode: &str) -> Result<Box<dyn TextFile>>;
    /// Reads the entries of one directory, non-recursively, with names
    /// converted back to UTF-8 and sorted.
    fn read_dir(&self, path: &str) -> Result<ReadDir>;
}

/// An open file that closes when it goes out of scope via `Drop`.
pub trait TextFile: fmt::Debug + Read + Write {
    /// Writes UTF-8 `text`. On a text-mode handle the input runs through the
    /// native wide representation before it reaches the stream.
    fn write_text(&mut self, text: &str) -> Result<()>;
    /// Reads the remainder of the file as UTF-8 text through the same
    /// transcoding path that [`TextFile::write_text`] uses.
    fn read_text(&mut self) -> Result<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileType {
    pub dir: bool,
    pub file: bool,
    pub symlink: bool,
}

/// One directory entry, name already converted to UTF-8.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub file_type: FileType,
}

#[derive(Debug, Clone, Default)]
pub struct ReadDir {
    data: Vec<DirEntry>,
    index: usize,
}

impl ReadDir {
    pub fn new(data: Vec<DirEntry>) -> Self {
        Self { data, index: 0 }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl Iterator for ReadDir {
    type Item = DirEntry;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.data.get(self.index)?.clone();
        self.index += 1;
        Some(entry)
    }
}
