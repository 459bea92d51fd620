//! Byte-path converters for POSIX file APIs.
//!
//! The native unit is the byte, so conversion is a checked copy. The
//! two-pass shape is kept anyway so both platform halves read alike and
//! sizing bugs cannot creep in behind the narrower units.

use std::ffi::{OsStr, OsString};
use std::os::unix::ffi::{OsStrExt, OsStringExt};

use crate::{FsError, Result};

pub(crate) type NativeUnit = u8;

pub(crate) fn to_native(text: &str) -> Result<Vec<u8>> {
    // Pass 1: measure.
    let size_needed = text.len() + 1;

    // Pass 2: convert into exactly the measured capacity.
    let mut units = Vec::with_capacity(size_needed);
    units.extend_from_slice(text.as_bytes());
    units.push(0);
    debug_assert_eq!(units.len(), size_needed);
    Ok(units)
}

pub(crate) fn to_utf8(units: &[u8]) -> Result<String> {
    // Pass 1: validate and measure in one scan.
    let text = std::str::from_utf8(units).map_err(|_| FsError::ConversionFailed)?;

    // Pass 2: copy into exactly the measured capacity.
    let mut out = String::with_capacity(text.len());
    out.push_str(text);
    Ok(out)
}

pub(crate) fn os_from_units(units: &[u8]) -> OsString {
    OsString::from_vec(units.to_vec())
}

pub(crate) fn utf8_from_os(name: &OsStr) -> Result<String> {
    to_utf8(name.as_bytes())
}
