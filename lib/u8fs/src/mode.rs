//! Parser for the conventional `[b]r|w|a[+]` open-mode vocabulary.

use cfg_if::cfg_if;

use crate::{FsError, Result};

cfg_if! {
    if #[cfg(windows)] {
        // What the wide open call reports for a malformed mode string.
        const BAD_MODE: i32 = windows_sys::Win32::Foundation::ERROR_INVALID_PARAMETER as i32;
    } else {
        const BAD_MODE: i32 = libc::EINVAL;
    }
}

/// Parsed open mode. Exactly one of `r`/`w`/`a` is required; `+` and `b`
/// may appear in any position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenMode {
    read: bool,
    write: bool,
    append: bool,
    truncate: bool,
    create: bool,
    binary: bool,
}

impl OpenMode {
    /// Parses `mode`. An empty string violates the same non-empty contract
    /// paths are held to; anything outside the vocabulary reports the
    /// platform's invalid-parameter status, as the native open would.
    pub fn parse(mode: &str) -> Result<Self> {
        if mode.is_empty() {
            return Err(FsError::PathNullOrEmpty);
        }

        let mut primary = None;
        let mut update = false;
        let mut binary = false;
        for c in mode.chars() {
            match c {
                'r' | 'w' | 'a' if primary.is_none() => primary = Some(c),
                '+' if !update => update = true,
                'b' if !binary => binary = true,
                _ => return Err(FsError::Unknown { code: BAD_MODE }),
            }
        }

        let mode = match primary {
            Some('r') => OpenMode {
                read: true,
                write: update,
                append: false,
                truncate: false,
                create: false,
                binary,
            },
            Some('w') => OpenMode {
                read: update,
                write: true,
                append: false,
                truncate: true,
                create: true,
                binary,
            },
            Some('a') => OpenMode {
                read: update,
                write: true,
                append: true,
                truncate: false,
                create: true,
                binary,
            },
            _ => return Err(FsError::Unknown { code: BAD_MODE }),
        };
        Ok(mode)
    }

    pub const fn read(&self) -> bool {
        self.read
    }

    pub const fn write(&self) -> bool {
        self.write
    }

    pub const fn append(&self) -> bool {
        self.append
    }

    pub const fn truncate(&self) -> bool {
        self.truncate
    }

    pub const fn create(&self) -> bool {
        self.create
    }

    pub const fn binary(&self) -> bool {
        self.binary
    }

    /// Text handles force UTF-8 transcoding on the stream.
    pub const fn text(&self) -> bool {
        !self.binary
    }
}
