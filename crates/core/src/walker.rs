use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

const LOCK_FILE_MARKER: &str = "~$";
const PDF_SUFFIX: &str = ".pdf";

/// Case-sensitive `.pdf` suffix, no office lock-file marker.
pub fn is_candidate_name(name: &str) -> bool {
    !name.contains(LOCK_FILE_MARKER) && name.ends_with(PDF_SUFFIX)
}

pub fn is_candidate(entry: &DirEntry) -> bool {
    if entry.file_type().is_dir() {
        return false;
    }

    is_candidate_name(&entry.file_name().to_string_lossy())
}

/// Lazily walks `root` depth-first in file-name order, yielding candidate PDFs
/// and any traversal error as it is met.
pub fn candidate_files(root: &Path) -> impl Iterator<Item = Result<PathBuf, walkdir::Error>> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) if is_candidate(&entry) => Some(Ok(entry.into_path())),
            Ok(_) => None,
            Err(error) => Some(Err(error)),
        })
}
