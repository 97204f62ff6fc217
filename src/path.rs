//! # Path Abstraction
//!
//! Host applications hand the engine paths in whatever form their platform
//! uses: a native [`Path`], a narrow byte string, or a wide (UTF-16) string.
//! [`EnginePath::from_host`] converts once, at the boundary, into a single
//! owned [`PathBuf`]. Nothing past this module ever sees two representations.
//!
//! Conversions are lossless or fail with [`FileError::InvalidPath`]; code
//! points are never truncated to bytes.

use std::ffi::OsString;
use std::fs::{File, OpenOptions};
use std::io;
use std::ops::Deref;
use std::path::{Path, PathBuf};

use crate::error::FileError;

/// A path as supplied by host glue, before normalization.
#[derive(Debug, Clone, Copy)]
pub enum HostPath<'a> {
    Native(&'a Path),
    /// Narrow string: raw bytes on Unix, UTF-8 elsewhere.
    Narrow(&'a [u8]),
    /// Wide string: UTF-16 code units.
    Wide(&'a [u16]),
}

impl<'a> From<&'a Path> for HostPath<'a> {
    fn from(path: &'a Path) -> Self {
        HostPath::Native(path)
    }
}

impl<'a> From<&'a PathBuf> for HostPath<'a> {
    fn from(path: &'a PathBuf) -> Self {
        HostPath::Native(path.as_path())
    }
}

impl<'a> From<&'a str> for HostPath<'a> {
    fn from(path: &'a str) -> Self {
        HostPath::Native(Path::new(path))
    }
}

impl<'a> From<&'a String> for HostPath<'a> {
    fn from(path: &'a String) -> Self {
        HostPath::Native(Path::new(path.as_str()))
    }
}

impl<'a> From<&'a [u16]> for HostPath<'a> {
    fn from(units: &'a [u16]) -> Self {
        HostPath::Wide(units)
    }
}

/// The engine's single canonical path type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnginePath(PathBuf);

impl EnginePath {
    pub fn from_host(host: HostPath<'_>) -> Result<Self, FileError> {
        let path = match host {
            HostPath::Native(p) => p.to_path_buf(),
            HostPath::Narrow(bytes) => PathBuf::from(narrow_to_os(bytes)?),
            HostPath::Wide(units) => PathBuf::from(wide_to_os(units)?),
        };
        if path.as_os_str().is_empty() {
            return Err(FileError::InvalidPath("empty path".into()));
        }
        Ok(Self(path))
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }
}

impl Deref for EnginePath {
    type Target = Path;

    fn deref(&self) -> &Path {
        &self.0
    }
}

impl AsRef<Path> for EnginePath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

#[cfg(unix)]
fn narrow_to_os(bytes: &[u8]) -> Result<OsString, FileError> {
    use std::os::unix::ffi::OsStrExt;
    Ok(std::ffi::OsStr::from_bytes(bytes).to_os_string())
}

#[cfg(not(unix))]
fn narrow_to_os(bytes: &[u8]) -> Result<OsString, FileError> {
    std::str::from_utf8(bytes)
        .map(OsString::from)
        .map_err(|e| FileError::InvalidPath(format!("narrow path is not UTF-8: {e}")))
}

#[cfg(windows)]
fn wide_to_os(units: &[u16]) -> Result<OsString, FileError> {
    use std::os::windows::ffi::OsStringExt;
    Ok(OsString::from_wide(units))
}

#[cfg(not(windows))]
fn wide_to_os(units: &[u16]) -> Result<OsString, FileError> {
    String::from_utf16(units)
        .map(OsString::from)
        .map_err(|e| FileError::InvalidPath(format!("wide path is not valid UTF-16: {e}")))
}

/// How [`open`] should open a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenMode {
    Read,
    /// Create for writing, failing if the path exists. Used for staged output.
    CreateNew,
}

impl OpenMode {
    pub fn options(self) -> OpenOptions {
        let mut options = OpenOptions::new();
        match self {
            OpenMode::Read => options.read(true),
            OpenMode::CreateNew => options.write(true).create_new(true),
        };
        options
    }
}

/// Open `path` with uniform error classification on every host.
pub fn open(path: &Path, mode: OpenMode) -> Result<File, FileError> {
    mode.options().open(path).map_err(|e| FileError::from_io(path, e))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStat {
    pub exists: bool,
    pub is_file: bool,
    pub size: u64,
}

/// Stat `path`. A missing path is `exists: false`, not an error.
pub fn stat(path: &Path) -> Result<FileStat, FileError> {
    match std::fs::metadata(path) {
        Ok(meta) => Ok(FileStat {
            exists: true,
            is_file: meta.is_file(),
            size: meta.len(),
        }),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(FileStat {
            exists: false,
            is_file: false,
            size: 0,
        }),
        Err(e) => Err(FileError::from_io(path, e)),
    }
}
