//! Wide (UTF-16) converters for the Windows file APIs.

use std::ffi::{OsStr, OsString};
use std::os::windows::ffi::{OsStrExt, OsStringExt};

use crate::{FsError, Result};

pub(crate) type NativeUnit = u16;

pub(crate) fn to_native(text: &str) -> Result<Vec<u16>> {
    // Pass 1: measure. UTF-16 length diverges from byte length outside
    // ASCII, so the size has to come from the code points themselves.
    let size_needed = text.chars().map(char::len_utf16).sum::<usize>() + 1;

    // Pass 2: convert into exactly the measured capacity.
    let mut units = Vec::with_capacity(size_needed);
    units.extend(text.encode_utf16());
    units.push(0);
    debug_assert_eq!(units.len(), size_needed);
    Ok(units)
}

pub(crate) fn to_utf8(units: &[u16]) -> Result<String> {
    // Pass 1: measure, refusing unpaired surrogates.
    let mut size_needed = 0usize;
    for decoded in char::decode_utf16(units.iter().copied()) {
        match decoded {
            Ok(c) => size_needed += c.len_utf8(),
            Err(_) => return Err(FsError::ConversionFailed),
        }
    }

    // Pass 2: convert into exactly the measured capacity.
    let mut out = String::with_capacity(size_needed);
    for decoded in char::decode_utf16(units.iter().copied()) {
        out.push(decoded.map_err(|_| FsError::ConversionFailed)?);
    }
    debug_assert_eq!(out.len(), size_needed);
    Ok(out)
}

pub(crate) fn os_from_units(units: &[u16]) -> OsString {
    OsString::from_wide(units)
}

pub(crate) fn utf8_from_os(name: &OsStr) -> Result<String> {
    let units: Vec<u16> = name.encode_wide().collect();
    to_utf8(&units)
}
