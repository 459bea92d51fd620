//! Host-OS implementation of the [`crate::FileSystem`] capability set.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::{codec, DirEntry, FileType, FsError, OpenMode, ReadDir, Result, TextFile};

/// Filesystem variant backed by the host operating system.
///
/// Stateless. Every operation converts its UTF-8 arguments to the native
/// path representation and issues one direct, synchronous native call;
/// nothing is retained across calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSystem;

impl FileSystem {
    pub fn new() -> Self {
        FileSystem
    }

    /// Opens a file, returning the concrete handle type. The
    /// [`crate::FileSystem`] impl boxes the same handle.
    pub fn open(&self, path: &str, mode: &str) -> Result<File> {
        let native = codec::to_native_path(path)?;
        let mode = OpenMode::parse(mode)?;
        trace!(path, ?mode, "open_file");
        let file = fs::OpenOptions::new()
            .read(mode.read())
            .write(mode.write())
            .append(mode.append())
            .truncate(mode.truncate())
            .create(mode.create())
            .open(&native)
            .map_err(|err| {
                debug!(path, %err, "open_file failed");
                FsError::from(err)
            })?;
        Ok(File::new(file, native, mode.text()))
    }

    /// Shared attribute query. Absence is a normal `None`; any other native
    /// refusal is a failure of the query itself.
    fn query_attrs(&self, path: &str) -> Result<Option<fs::Metadata>> {
        let native = codec::to_native_path(path)?;
        match fs::metadata(&native) {
            Ok(metadata) => Ok(Some(metadata)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => {
                debug!(path, %err, "attribute query failed");
                Err(err.into())
            }
        }
    }
}

impl crate::FileSystem for FileSystem {
    fn path_exists(&self, path: &str) -> Result<bool> {
        Ok(self.query_attrs(path)?.is_some())
    }

    fn is_directory(&self, path: &str) -> Result<bool> {
        Ok(self
            .query_attrs(path)?
            .map(|metadata| metadata.is_dir())
            .unwrap_or(false))
    }

    fn is_plain_file(&self, path: &str) -> Result<bool> {
        // Everything that exists and is not a directory counts as plain,
        // special files included.
        Ok(self
            .query_attrs(path)?
            .map(|metadata| !metadata.is_dir())
            .unwrap_or(false))
    }

    fn create_directory(&self, path: &str) -> Result<()> {
        let native = codec::to_native_path(path)?;
        trace!(path, "create_directory");
        fs::create_dir(&native).map_err(|err| {
            debug!(path, %err, "create_directory failed");
            FsError::from(err)
        })
    }

    fn open_file(&self, path: &str, mode: &str) -> Result<Box<dyn TextFile>> {
        Ok(Box::new(self.open(path, mode)?))
    }

    fn read_dir(&self, path: &str) -> Result<ReadDir> {
        let native = codec::to_native_path(path)?;
        let mut data = Vec::new();
        for entry in fs::read_dir(&native).map_err(FsError::from)? {
            let entry = entry.map_err(FsError::from)?;
            let name = codec::utf8_from_os(&entry.file_name())?;
            let file_type = entry.file_type().map_err(FsError::from)?;
            data.push(DirEntry {
                name,
                file_type: FileType {
                    dir: file_type.is_dir(),
                    file: file_type.is_file(),
                    symlink: file_type.is_symlink(),
                },
            });
        }
        data.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(ReadDir::new(data))
    }
}

/// A thin wrapper around [`std::fs::File`]. Closes on drop.
///
/// A handle opened without `b` in the mode is a text handle: text written
/// through it detours over the native wide representation, so the stream
/// always carries UTF-8 regardless of the platform's default narrow
/// encoding. A binary handle leaves bytes untouched.
#[derive(Debug)]
pub struct File {
    inner: fs::File,
    host_path: PathBuf,
    text_mode: bool,
}

impl File {
    fn new(inner: fs::File, host_path: PathBuf, text_mode: bool) -> Self {
        Self {
            inner,
            host_path,
            text_mode,
        }
    }

    pub fn host_path(&self) -> &Path {
        &self.host_path
    }

    pub fn is_text(&self) -> bool {
        self.text_mode
    }
}

impl Read for File {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl Write for File {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

impl TextFile for File {
    fn write_text(&mut self, text: &str) -> Result<()> {
        let transcoded;
        let bytes: &[u8] = if self.text_mode {
            transcoded = codec::transcode_text_out(text)?;
            &transcoded
        } else {
            if text.is_empty() {
                return Err(FsError::PathNullOrEmpty);
            }
            text.as_bytes()
        };
        self.inner.write_all(bytes).map_err(FsError::from)
    }

    fn read_text(&mut self) -> Result<String> {
        let mut bytes = Vec::new();
        self.inner.read_to_end(&mut bytes).map_err(FsError::from)?;
        if self.text_mode {
            codec::transcode_text_in(&bytes)
        } else {
            String::from_utf8(bytes).map_err(|_| FsError::ConversionFailed)
        }
    }
}
