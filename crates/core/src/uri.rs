//! Conversion of `Thumb::URI` values back into filesystem paths.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

const FILE_SCHEME: &str = "file://";

/// Decodes a `file://` URI into the path it names.
///
/// Only the `file` scheme is accepted; anything else is rejected instead of
/// having its first seven characters stripped.
pub fn uri_to_path(uri: &[u8]) -> Result<PathBuf> {
    let Some(encoded) = strip_file_scheme(uri) else {
        let scheme = uri
            .iter()
            .position(|&b| b == b':')
            .map_or(uri, |end| &uri[..end]);
        return Err(Error::UnsupportedScheme(
            String::from_utf8_lossy(scheme).into_owned(),
        ));
    };
    Ok(path_from_bytes(percent_decode(encoded)))
}

fn strip_file_scheme(uri: &[u8]) -> Option<&[u8]> {
    let head = uri.get(..FILE_SCHEME.len())?;
    if head.eq_ignore_ascii_case(FILE_SCHEME.as_bytes()) {
        Some(&uri[FILE_SCHEME.len()..])
    } else {
        None
    }
}

/// Best-effort percent decoding. Never fails: bad hex digits count as 0 and
/// a truncated escape at the end is copied through as-is.
pub fn percent_decode(input: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(input.len());
    let mut i = 0;
    while i < input.len() {
        match input[i] {
            b'%' if i + 2 < input.len() => {
                out.push(hex_value(input[i + 1]) * 16 + hex_value(input[i + 2]));
                i += 3;
            }
            b'%' => {
                out.extend_from_slice(&input[i..]);
                break;
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    out
}

fn hex_value(c: u8) -> u8 {
    match c {
        b'0'..=b'9' => c - b'0',
        b'A'..=b'F' => c - b'A' + 10,
        b'a'..=b'f' => c - b'a' + 10,
        _ => 0,
    }
}

#[cfg(unix)]
pub fn path_from_bytes(bytes: Vec<u8>) -> PathBuf {
    use std::ffi::OsString;
    use std::os::unix::ffi::OsStringExt;
    PathBuf::from(OsString::from_vec(bytes))
}

#[cfg(not(unix))]
pub fn path_from_bytes(bytes: Vec<u8>) -> PathBuf {
    PathBuf::from(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(unix)]
pub fn path_bytes(path: &Path) -> Cow<'_, [u8]> {
    use std::os::unix::ffi::OsStrExt;
    Cow::Borrowed(path.as_os_str().as_bytes())
}

#[cfg(not(unix))]
pub fn path_bytes(path: &Path) -> Cow<'_, [u8]> {
    match path.to_string_lossy() {
        Cow::Borrowed(s) => Cow::Borrowed(s.as_bytes()),
        Cow::Owned(s) => Cow::Owned(s.into_bytes()),
    }
}
