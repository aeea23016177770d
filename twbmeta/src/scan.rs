//! Discovery of workbook files under a directory tree

use anyhow::Result;
use std::path::{MAIN_SEPARATOR, Path, PathBuf};
use walkdir::WalkDir;

/// A workbook file found by the scanner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkbookFile {
    pub path: PathBuf,
    /// Containing directory as walked, with a trailing separator
    pub folder_path: String,
}

impl WorkbookFile {
    fn from_path(path: &Path) -> Self {
        let folder = path.parent().unwrap_or_else(|| Path::new(""));
        Self {
            path: path.to_path_buf(),
            folder_path: format!("{}{}", folder.display(), MAIN_SEPARATOR),
        }
    }
}

/// Walk `root` recursively and yield files whose name ends with `suffix`.
///
/// Entries are visited in file name order within each directory. Unreadable
/// entries are yielded as errors so the caller can report them and go on.
pub fn scan_workbooks(
    root: &Path,
    suffix: &str,
) -> Result<impl Iterator<Item = Result<WorkbookFile, walkdir::Error>>> {
    if !root.is_dir() {
        anyhow::bail!("Input path is not a directory: {}", root.display());
    }

    let files = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_map(move |entry| match entry {
            Ok(entry) => {
                let is_match = !entry.file_type().is_dir()
                    && entry.file_name().to_string_lossy().ends_with(suffix)
                    && entry.path().is_file();
                is_match.then(|| Ok(WorkbookFile::from_path(entry.path())))
            }
            Err(e) => Some(Err(e)),
        });

    Ok(files)
}
