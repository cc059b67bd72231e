//! Directory enumeration and per-entry metadata.

use crate::catalog::Column;
use crate::error::{SqlError, SqlResult};
use crate::format::{format_permissions, format_size, format_timestamp, permission_digits};
use std::ffi::CStr;
use std::fmt;
use std::fs::{self, FileType, Metadata};
use std::os::unix::fs::MetadataExt;
use std::path::Path;

/// Display sentinel for metadata that could not be read.
pub const UNKNOWN: &str = "Unknown";

/// A metadata value that may be unavailable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attr<T> {
    Known(T),
    Unknown,
}

impl<T> Attr<T> {
    pub fn map_or_unknown<F>(&self, f: F) -> String
    where
        F: FnOnce(&T) -> String,
    {
        match self {
            Self::Known(value) => f(value),
            Self::Unknown => UNKNOWN.to_string(),
        }
    }
}

impl<T> From<Option<T>> for Attr<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Unknown, Self::Known)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryType {
    File,
    Directory,
    Unknown,
}

impl EntryType {
    /// Classifies without following symlinks; links, devices, sockets and
    /// fifos are all `Unknown`.
    pub fn from_file_type(file_type: FileType) -> Self {
        if file_type.is_dir() {
            Self::Directory
        } else if file_type.is_file() {
            Self::File
        } else {
            Self::Unknown
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Directory => "directory",
            Self::Unknown => UNKNOWN,
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of a directory listing. Raw values are kept; formatting
/// happens in [`FileRecord::display`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub name: String,
    pub entry_type: EntryType,
    pub created_at: Attr<i64>,
    pub modified_at: Attr<i64>,
    pub accessed_at: Attr<i64>,
    pub size: Attr<u64>,
    pub mode: Attr<u32>,
    pub owner: Attr<String>,
    pub group: Attr<String>,
}

impl FileRecord {
    /// Builds a record from the outcome of a stat call. A failed stat keeps
    /// `name` and `entry_type` and marks everything else unknown.
    pub fn from_stat(name: String, entry_type: EntryType, stat: std::io::Result<Metadata>) -> Self {
        match stat {
            Ok(meta) => Self {
                name,
                entry_type,
                created_at: Attr::Known(meta.ctime()),
                modified_at: Attr::Known(meta.mtime()),
                accessed_at: Attr::Known(meta.atime()),
                size: Attr::Known(meta.size()),
                mode: Attr::Known(meta.mode()),
                owner: user_name(meta.uid()).into(),
                group: group_name(meta.gid()).into(),
            },
            Err(e) => {
                tracing::debug!(name = %name, error = %e, "stat failed, degrading entry");
                Self::unknown(name, entry_type)
            }
        }
    }

    pub fn unknown(name: String, entry_type: EntryType) -> Self {
        Self {
            name,
            entry_type,
            created_at: Attr::Unknown,
            modified_at: Attr::Unknown,
            accessed_at: Attr::Unknown,
            size: Attr::Unknown,
            mode: Attr::Unknown,
            owner: Attr::Unknown,
            group: Attr::Unknown,
        }
    }

    /// The display string for `column`, with unavailable values rendered as
    /// [`UNKNOWN`].
    pub fn display(&self, column: Column) -> String {
        match column {
            Column::Name => self.name.clone(),
            Column::Type => self.entry_type.to_string(),
            Column::CreatedOn => self.created_at.map_or_unknown(|t| format_timestamp(*t)),
            Column::LastModified => self.modified_at.map_or_unknown(|t| format_timestamp(*t)),
            Column::LastAccessed => self.accessed_at.map_or_unknown(|t| format_timestamp(*t)),
            Column::FileSize => self.size.map_or_unknown(|s| format_size(*s)),
            Column::Permissions => self.mode.map_or_unknown(|m| {
                format_permissions(&permission_digits(*m)).unwrap_or_else(|_| UNKNOWN.to_string())
            }),
            Column::Owner => self.owner.map_or_unknown(Clone::clone),
            Column::Group => self.group.map_or_unknown(Clone::clone),
        }
    }
}

/// Lists the immediate children of `directory` in iteration order.
pub fn list(directory: &str) -> SqlResult<Vec<FileRecord>> {
    let path = Path::new(directory);
    if !path.exists() {
        return Err(SqlError::PathNotFound(directory.to_string()));
    }

    let mut records = Vec::new();
    for entry in fs::read_dir(path)? {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(directory = %directory, error = %e, "skipping unreadable entry");
                continue;
            }
        };

        let name = entry.file_name().to_string_lossy().into_owned();
        let entry_type = entry
            .file_type()
            .map_or(EntryType::Unknown, EntryType::from_file_type);
        records.push(FileRecord::from_stat(name, entry_type, fs::metadata(entry.path())));
    }

    tracing::debug!(directory = %directory, count = records.len(), "listed directory");
    Ok(records)
}

const NAME_BUF_LEN: usize = 4096;

/// Resolves a uid to a user name, `None` if no passwd entry exists.
#[allow(unsafe_code)]
fn user_name(uid: u32) -> Option<String> {
    let mut buf = vec![0 as libc::c_char; NAME_BUF_LEN];
    // SAFETY: zeroed passwd is a valid out-parameter for getpwuid_r.
    let mut pwd: libc::passwd = unsafe { std::mem::zeroed() };
    let mut result: *mut libc::passwd = std::ptr::null_mut();

    // SAFETY: every pointer refers to live, correctly sized storage.
    let rc = unsafe { libc::getpwuid_r(uid, &mut pwd, buf.as_mut_ptr(), buf.len(), &mut result) };
    if rc != 0 || result.is_null() || pwd.pw_name.is_null() {
        return None;
    }

    // SAFETY: on success pw_name points to a NUL-terminated string inside `buf`.
    Some(unsafe { CStr::from_ptr(pwd.pw_name) }.to_string_lossy().into_owned())
}

/// Resolves a gid to a group name, `None` if no group entry exists.
#[allow(unsafe_code)]
fn group_name(gid: u32) -> Option<String> {
    let mut buf = vec![0 as libc::c_char; NAME_BUF_LEN];
    // SAFETY: zeroed group is a valid out-parameter for getgrgid_r.
    let mut grp: libc::group = unsafe { std::mem::zeroed() };
    let mut result: *mut libc::group = std::ptr::null_mut();

    // SAFETY: every pointer refers to live, correctly sized storage.
    let rc = unsafe { libc::getgrgid_r(gid, &mut grp, buf.as_mut_ptr(), buf.len(), &mut result) };
    if rc != 0 || result.is_null() || grp.gr_name.is_null() {
        return None;
    }

    // SAFETY: on success gr_name points to a NUL-terminated string inside `buf`.
    Some(unsafe { CStr::from_ptr(grp.gr_name) }.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_failed_stat_degrades_to_unknown() {
        let err = io::Error::new(io::ErrorKind::NotFound, "vanished");
        let record = FileRecord::from_stat("gone.txt".to_string(), EntryType::File, Err(err));

        assert_eq!(record.display(Column::Name), "gone.txt");
        assert_eq!(record.display(Column::Type), "file");
        for column in &Column::ALL[2..] {
            assert_eq!(record.display(*column), UNKNOWN, "column {column}");
        }
    }

    #[test]
    fn test_unknown_owner_only_affects_owner() {
        let mut record = FileRecord::unknown("a".to_string(), EntryType::File);
        record.size = Attr::Known(1536);
        record.group = Attr::Known("staff".to_string());

        assert_eq!(record.display(Column::Owner), UNKNOWN);
        assert_eq!(record.display(Column::Group), "staff");
        assert_eq!(record.display(Column::FileSize), "1.5 KB");
    }

    #[test]
    fn test_permissions_use_low_mode_bits() {
        let mut record = FileRecord::unknown("run.sh".to_string(), EntryType::File);
        record.mode = Attr::Known(0o100_755);
        assert_eq!(record.display(Column::Permissions), "rwxr-xr-x");
    }

    #[test]
    fn test_missing_directory() {
        let err = list("/definitely/not/a/real/dir").unwrap_err();
        assert!(matches!(err, SqlError::PathNotFound(ref p) if p == "/definitely/not/a/real/dir"));
    }

    #[test]
    fn test_list_reads_children() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("file.txt"), b"hello").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();

        let mut records = list(dir.path().to_str().unwrap()).unwrap();
        records.sort_by(|a, b| a.name.cmp(&b.name));

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "file.txt");
        assert_eq!(records[0].entry_type, EntryType::File);
        assert_eq!(records[0].size, Attr::Known(5));
        assert_eq!(records[1].name, "sub");
        assert_eq!(records[1].entry_type, EntryType::Directory);
    }

    #[test]
    fn test_dangling_symlink_is_unknown() {
        let dir = tempfile::tempdir().unwrap();
        std::os::unix::fs::symlink(dir.path().join("nowhere"), dir.path().join("link")).unwrap();

        let records = list(dir.path().to_str().unwrap()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].entry_type, EntryType::Unknown);
        assert_eq!(records[0].display(Column::FileSize), UNKNOWN);
    }

    #[test]
    fn test_list_on_regular_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("plain");
        fs::write(&file, b"x").unwrap();

        let err = list(file.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, SqlError::Io(_)));
    }

    #[test]
    fn test_current_user_resolves() {
        // SAFETY: getuid has no preconditions.
        #[allow(unsafe_code)]
        let uid = unsafe { libc::getuid() };
        // root always has a passwd entry; other uids usually do
        if uid == 0 {
            assert_eq!(user_name(uid).as_deref(), Some("root"));
        }
        assert_eq!(user_name(u32::MAX - 7), None);
    }
}
