//! Conversion between UTF-8 strings and the native path encoding.
//!
//! Both directions run in two passes: first measure the exact number of
//! destination units (terminator included), then convert into a buffer of
//! exactly that size. The destination encoding is variable-width, so the
//! sizing pass is a correctness requirement, not an optimization.
//!
//! Converted unit buffers never leave the crate; the public currency stays
//! UTF-8 throughout.

use std::ffi::OsStr;
use std::path::PathBuf;

use cfg_if::cfg_if;

use crate::{FsError, Result};

cfg_if! {
    if #[cfg(windows)] {
        mod windows;
        use windows as platform;
    } else {
        mod unix;
        use unix as platform;
    }
}

pub(crate) use platform::NativeUnit;

/// Converts UTF-8 `text` to native units, NUL terminated.
///
/// Empty input is a contract violation; an embedded NUL cannot be
/// represented in the native form and is refused before any allocation.
pub(crate) fn to_native(text: &str) -> Result<Vec<NativeUnit>> {
    if text.is_empty() {
        return Err(FsError::PathNullOrEmpty);
    }
    if text.bytes().any(|byte| byte == 0) {
        return Err(FsError::ConversionFailed);
    }
    platform::to_native(text)
}

/// Converts native units (without terminator) back to UTF-8.
pub(crate) fn to_utf8(units: &[NativeUnit]) -> Result<String> {
    platform::to_utf8(units)
}

/// Converts a UTF-8 path into the form the native calls take.
pub(crate) fn to_native_path(path: &str) -> Result<PathBuf> {
    let units = to_native(path)?;
    Ok(platform::os_from_units(&units[..units.len() - 1]).into())
}

/// Converts an OS-provided name (directory entries) back to UTF-8.
pub(crate) fn utf8_from_os(name: &OsStr) -> Result<String> {
    platform::utf8_from_os(name)
}

/// Text-mode write path: UTF-8 through the native wide form and back to the
/// UTF-8 byte stream. The detour forces the stream encoding regardless of
/// the platform's default narrow encoding.
pub(crate) fn transcode_text_out(text: &str) -> Result<Vec<u8>> {
    let units = to_native(text)?;
    let round = to_utf8(&units[..units.len() - 1])?;
    Ok(round.into_bytes())
}

/// Text-mode read path, mirror of [`transcode_text_out`].
pub(crate) fn transcode_text_in(bytes: &[u8]) -> Result<String> {
    let text = std::str::from_utf8(bytes).map_err(|_| FsError::ConversionFailed)?;
    if text.is_empty() {
        return Ok(String::new());
    }
    let units = to_native(text)?;
    to_utf8(&units[..units.len() - 1])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    const PANGRAM: &str = "Příšerně žluťoučký kůň úpěl ďábelské ódy";

    #[test]
    fn round_trip_is_identity() {
        for text in ["ascii only", PANGRAM, "crab 🦀 and friends", "ř"] {
            let units = to_native(text).unwrap();
            assert_eq!(*units.last().unwrap(), 0, "missing terminator");
            assert_eq!(to_utf8(&units[..units.len() - 1]).unwrap(), text);
        }
    }

    #[test]
    fn measured_size_is_exact() {
        // 8 BMP code points, one native unit each on the wide platform,
        // 12 bytes on the narrow one (four of them are two-byte sequences).
        let units = to_native("Příšerně").unwrap();
        #[cfg(windows)]
        assert_eq!(units.len(), 8 + 1);
        #[cfg(not(windows))]
        assert_eq!(units.len(), 12 + 1);

        // Astral code point: a surrogate pair wide, four bytes narrow.
        let units = to_native("🦀").unwrap();
        #[cfg(windows)]
        assert_eq!(units.len(), 2 + 1);
        #[cfg(not(windows))]
        assert_eq!(units.len(), 4 + 1);
    }

    #[test]
    fn empty_input_is_a_contract_violation() {
        assert_eq!(to_native(""), Err(FsError::PathNullOrEmpty));
        assert_eq!(to_native_path(""), Err(FsError::PathNullOrEmpty));
    }

    #[test]
    fn embedded_nul_is_refused() {
        assert_eq!(to_native("a\0b"), Err(FsError::ConversionFailed));
    }

    #[test]
    fn native_path_matches_the_input() {
        assert_eq!(to_native_path(PANGRAM).unwrap(), Path::new(PANGRAM));
    }

    #[test]
    fn text_transcoding_round_trips() {
        let bytes = transcode_text_out(PANGRAM).unwrap();
        assert_eq!(transcode_text_in(&bytes).unwrap(), PANGRAM);
        assert_eq!(transcode_text_in(b"").unwrap(), "");
        assert_eq!(transcode_text_out(""), Err(FsError::PathNullOrEmpty));
    }

    #[test]
    fn invalid_stream_bytes_are_refused() {
        assert_eq!(transcode_text_in(&[0xff, 0xfe]), Err(FsError::ConversionFailed));
    }

    #[cfg(windows)]
    #[test]
    fn unpaired_surrogate_is_refused() {
        assert_eq!(to_utf8(&[0xD800]), Err(FsError::ConversionFailed));
        assert_eq!(to_utf8(&[0x0041, 0xDC00, 0x0042]), Err(FsError::ConversionFailed));
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_entry_name_is_refused() {
        use std::os::unix::ffi::OsStrExt;

        let name = std::ffi::OsStr::from_bytes(&[b'f', 0xff, b'o']);
        assert_eq!(utf8_from_os(name), Err(FsError::ConversionFailed));
    }
}
