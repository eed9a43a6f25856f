// Recursive tree cleaning
// Depth-first walk that rewrites recognized source files as it goes

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::error::CleanError;
use super::exclude::ExclusionSet;
use super::fs::{EntryKind, FileSystem, LocalFs};
use super::patterns::{is_source_file, strip_console_logs};

/// Counters collected during a clean
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanReport {
    pub dirs_visited: usize,
    pub dirs_excluded: usize,
    pub files_scanned: usize,
    pub files_modified: usize,
    pub statements_removed: usize,
    pub bytes_removed: u64,
    /// Files whose content changed, in visit order
    pub modified: Vec<PathBuf>,
}

impl CleanReport {
    pub fn is_clean(&self) -> bool {
        self.statements_removed == 0
    }
}

/// Walks a directory tree and strips `console.log` statements from source files.
///
/// The walk is single-threaded and depth-first. Files are rewritten as soon as
/// they are reached, so an error partway through leaves earlier files cleaned
/// and later ones untouched.
pub struct TreeCleaner<F: FileSystem> {
    fs: F,
    dry_run: bool,
}

impl TreeCleaner<LocalFs> {
    /// Cleaner for the real filesystem
    pub fn local() -> Self {
        Self::new(LocalFs)
    }
}

impl<F: FileSystem> TreeCleaner<F> {
    pub fn new(fs: F) -> Self {
        Self { fs, dry_run: false }
    }

    /// Compute the report without writing anything back
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Clean every recognized file under `root`, skipping directories named in `excluded`.
    ///
    /// Aborts on the first I/O error.
    pub fn clean(&self, root: &Path, excluded: &ExclusionSet) -> Result<CleanReport, CleanError> {
        match self.fs.kind(root)? {
            Some(EntryKind::Dir) => {}
            Some(_) => return Err(CleanError::NotADirectory { path: root.to_path_buf() }),
            None => return Err(CleanError::DirectoryNotFound { path: root.to_path_buf() }),
        }

        let mut report = CleanReport::default();
        self.clean_dir(root, excluded, &mut report)?;

        info!(
            root = %root.display(),
            dirs = report.dirs_visited,
            scanned = report.files_scanned,
            modified = report.files_modified,
            removed = report.statements_removed,
            dry_run = self.dry_run,
            "clean finished"
        );

        Ok(report)
    }

    fn clean_dir(
        &self,
        dir: &Path,
        excluded: &ExclusionSet,
        report: &mut CleanReport,
    ) -> Result<(), CleanError> {
        debug!(dir = %dir.display(), "entering directory");
        report.dirs_visited += 1;

        for entry in self.fs.list_entries(dir)? {
            let path = dir.join(&entry.name);
            // Names that are not UTF-8 are never excluded and never source files
            let name = entry.name_str();
            match entry.kind {
                EntryKind::Dir if name.is_some_and(|n| excluded.contains(n)) => {
                    debug!(dir = %path.display(), "skipping excluded directory");
                    report.dirs_excluded += 1;
                }
                EntryKind::Dir => self.clean_dir(&path, excluded, report)?,
                EntryKind::File if name.is_some_and(is_source_file) => {
                    self.clean_file(&path, report)?;
                }
                EntryKind::File | EntryKind::Other => {}
            }
        }

        Ok(())
    }

    fn clean_file(&self, file: &Path, report: &mut CleanReport) -> Result<(), CleanError> {
        let original = self.fs.read_text(file)?;
        let removal = strip_console_logs(&original);
        report.files_scanned += 1;

        if !self.dry_run {
            self.fs.write_text(file, &removal.text)?;
        }

        if removal.is_changed() {
            debug!(file = %file.display(), removed = removal.removed, "stripped console.log");
            report.files_modified += 1;
            report.statements_removed += removal.removed;
            report.bytes_removed += (original.len() - removal.text.len()) as u64;
            report.modified.push(file.to_path_buf());
        }

        Ok(())
    }
}

/// Clean `root` on the real filesystem.
pub fn clean(root: &Path, excluded: &ExclusionSet) -> Result<CleanReport, CleanError> {
    TreeCleaner::local().clean(root, excluded)
}
