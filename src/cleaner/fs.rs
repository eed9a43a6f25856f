//! Filesystem access for the cleaner.
//!
//! The tree walk only needs three capabilities: list a directory, read a text
//! file and replace a text file. [`LocalFs`] does this against the real disk;
//! [`MemoryFs`] keeps a whole tree in memory so traversal can be exercised
//! without touching disk.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::error::CleanError;

/// Kind of a directory entry. Symlinks and special files are `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Dir,
    Other,
}

/// One immediate child of a directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// Raw name, used as-is to build the child path
    pub name: OsString,
    pub kind: EntryKind,
}

impl DirEntry {
    /// Name as UTF-8, or `None` if it is not valid UTF-8
    pub fn name_str(&self) -> Option<&str> {
        self.name.to_str()
    }
}

/// Filesystem operations used by the tree cleaner
pub trait FileSystem {
    /// Kind of the entry at `path`, or `None` if nothing exists there
    fn kind(&self, path: &Path) -> Result<Option<EntryKind>, CleanError>;

    /// List the immediate entries of a directory
    fn list_entries(&self, dir: &Path) -> Result<Vec<DirEntry>, CleanError>;

    /// Read a whole file as UTF-8 text
    fn read_text(&self, file: &Path) -> Result<String, CleanError>;

    /// Replace the whole content of a file
    fn write_text(&self, file: &Path, text: &str) -> Result<(), CleanError>;
}

impl<T: FileSystem + ?Sized> FileSystem for &T {
    fn kind(&self, path: &Path) -> Result<Option<EntryKind>, CleanError> {
        (**self).kind(path)
    }

    fn list_entries(&self, dir: &Path) -> Result<Vec<DirEntry>, CleanError> {
        (**self).list_entries(dir)
    }

    fn read_text(&self, file: &Path) -> Result<String, CleanError> {
        (**self).read_text(file)
    }

    fn write_text(&self, file: &Path, text: &str) -> Result<(), CleanError> {
        (**self).write_text(file, text)
    }
}

/// Real disk
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl LocalFs {
    fn classify(file_type: fs::FileType) -> EntryKind {
        if file_type.is_dir() {
            EntryKind::Dir
        } else if file_type.is_file() {
            EntryKind::File
        } else {
            EntryKind::Other
        }
    }
}

impl FileSystem for LocalFs {
    // Follows symlinks so a linked project root is still a directory
    fn kind(&self, path: &Path) -> Result<Option<EntryKind>, CleanError> {
        match fs::metadata(path) {
            Ok(meta) => Ok(Some(Self::classify(meta.file_type()))),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(CleanError::from_io_error(
                e,
                "inspecting directory",
                Some(path.to_path_buf()),
            )),
        }
    }

    fn list_entries(&self, dir: &Path) -> Result<Vec<DirEntry>, CleanError> {
        let read_dir = fs::read_dir(dir).map_err(|e| {
            CleanError::from_io_error(e, "reading directory", Some(dir.to_path_buf()))
        })?;

        let mut entries = Vec::new();
        for entry in read_dir {
            let entry = entry.map_err(|e| {
                CleanError::from_io_error(e, "reading directory", Some(dir.to_path_buf()))
            })?;
            // file_type() does not follow symlinks
            let file_type = entry.file_type().map_err(|e| {
                CleanError::from_io_error(e, "inspecting", Some(entry.path()))
            })?;

            entries.push(DirEntry {
                name: entry.file_name(),
                kind: Self::classify(file_type),
            });
        }

        // read_dir order is platform dependent
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(entries)
    }

    fn read_text(&self, file: &Path) -> Result<String, CleanError> {
        fs::read_to_string(file)
            .map_err(|e| CleanError::from_io_error(e, "reading file", Some(file.to_path_buf())))
    }

    fn write_text(&self, file: &Path, text: &str) -> Result<(), CleanError> {
        fs::write(file, text)
            .map_err(|e| CleanError::from_io_error(e, "writing file", Some(file.to_path_buf())))
    }
}

#[derive(Debug, Clone)]
enum Node {
    Dir,
    File(Vec<u8>),
    Other,
}

/// In-memory tree keyed by absolute-looking paths such as `/project/src/app.js`.
///
/// Parent directories are created implicitly. Any access to a path passed to
/// [`MemoryFs::deny`] fails with `PermissionDenied`; paths passed to
/// [`MemoryFs::deny_write`] can be read but not written.
#[derive(Debug, Default)]
pub struct MemoryFs {
    nodes: RefCell<BTreeMap<PathBuf, Node>>,
    denied: RefCell<BTreeSet<PathBuf>>,
    read_only: RefCell<BTreeSet<PathBuf>>,
    writes: RefCell<Vec<PathBuf>>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    fn add_parents(&self, path: &Path) {
        let mut nodes = self.nodes.borrow_mut();
        for ancestor in path.ancestors().skip(1) {
            if ancestor.as_os_str().is_empty() {
                break;
            }
            nodes.entry(ancestor.to_path_buf()).or_insert(Node::Dir);
        }
    }

    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        self.add_parents(path);
        self.nodes.borrow_mut().insert(path.to_path_buf(), Node::Dir);
    }

    pub fn add_file(&self, path: impl AsRef<Path>, content: &str) {
        self.add_bytes(path, content.as_bytes());
    }

    pub fn add_bytes(&self, path: impl AsRef<Path>, content: &[u8]) {
        let path = path.as_ref();
        self.add_parents(path);
        self.nodes
            .borrow_mut()
            .insert(path.to_path_buf(), Node::File(content.to_vec()));
    }

    /// Add an entry that is neither a file nor a directory (a symlink, say)
    pub fn add_other(&self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        self.add_parents(path);
        self.nodes.borrow_mut().insert(path.to_path_buf(), Node::Other);
    }

    pub fn deny(&self, path: impl AsRef<Path>) {
        self.denied.borrow_mut().insert(path.as_ref().to_path_buf());
    }

    pub fn deny_write(&self, path: impl AsRef<Path>) {
        self.read_only.borrow_mut().insert(path.as_ref().to_path_buf());
    }

    /// Current text of a file, if it exists and is UTF-8
    pub fn text(&self, path: impl AsRef<Path>) -> Option<String> {
        match self.nodes.borrow().get(path.as_ref()) {
            Some(Node::File(bytes)) => String::from_utf8(bytes.clone()).ok(),
            _ => None,
        }
    }

    /// Every path passed to `write_text`, in call order
    pub fn writes(&self) -> Vec<PathBuf> {
        self.writes.borrow().clone()
    }

    fn check_access(&self, path: &Path, operation: &str) -> Result<(), CleanError> {
        if self.denied.borrow().contains(path) {
            return Err(Self::permission_denied(path, operation));
        }
        Ok(())
    }

    fn check_write(&self, path: &Path) -> Result<(), CleanError> {
        self.check_access(path, "writing file")?;
        if self.read_only.borrow().contains(path) {
            return Err(Self::permission_denied(path, "writing file"));
        }
        Ok(())
    }

    fn permission_denied(path: &Path, operation: &str) -> CleanError {
        CleanError::from_io_error(
            io::Error::from(io::ErrorKind::PermissionDenied),
            operation,
            Some(path.to_path_buf()),
        )
    }
}

impl FileSystem for MemoryFs {
    fn kind(&self, path: &Path) -> Result<Option<EntryKind>, CleanError> {
        self.check_access(path, "inspecting directory")?;

        Ok(self.nodes.borrow().get(path).map(|node| match node {
            Node::Dir => EntryKind::Dir,
            Node::File(_) => EntryKind::File,
            Node::Other => EntryKind::Other,
        }))
    }

    fn list_entries(&self, dir: &Path) -> Result<Vec<DirEntry>, CleanError> {
        self.check_access(dir, "reading directory")?;

        match self.kind(dir)? {
            Some(EntryKind::Dir) => {}
            Some(_) => return Err(CleanError::NotADirectory { path: dir.to_path_buf() }),
            None => return Err(CleanError::DirectoryNotFound { path: dir.to_path_buf() }),
        }

        let entries = self
            .nodes
            .borrow()
            .iter()
            .filter(|(path, _)| path.parent() == Some(dir))
            .filter_map(|(path, node)| {
                let name = path.file_name()?.to_os_string();
                let kind = match node {
                    Node::Dir => EntryKind::Dir,
                    Node::File(_) => EntryKind::File,
                    Node::Other => EntryKind::Other,
                };
                Some(DirEntry { name, kind })
            })
            .collect();

        Ok(entries)
    }

    fn read_text(&self, file: &Path) -> Result<String, CleanError> {
        self.check_access(file, "reading file")?;

        match self.nodes.borrow().get(file) {
            Some(Node::File(bytes)) => String::from_utf8(bytes.clone())
                .map_err(|_| CleanError::InvalidEncoding { path: file.to_path_buf() }),
            _ => Err(CleanError::FileNotFound { path: file.to_path_buf() }),
        }
    }

    fn write_text(&self, file: &Path, text: &str) -> Result<(), CleanError> {
        self.check_write(file)?;

        let mut nodes = self.nodes.borrow_mut();
        match nodes.get_mut(file) {
            Some(Node::File(bytes)) => {
                *bytes = text.as_bytes().to_vec();
                self.writes.borrow_mut().push(file.to_path_buf());
                Ok(())
            }
            _ => Err(CleanError::FileNotFound { path: file.to_path_buf() }),
        }
    }
}
