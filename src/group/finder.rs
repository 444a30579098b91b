use std::{
    io,
    path::{Path, PathBuf},
};

use glob::{MatchOptions, Pattern};
use walkdir::{DirEntry, WalkDir};

/// Directory enumeration used to expand wildcard groups.
///
/// Implementations return the paths of all files below `dir` (recursively)
/// whose file name matches `name`, relative to `dir` and sorted by name.
/// A missing `dir` must be reported as [`io::ErrorKind::NotFound`].
pub trait FileFinder {
    fn find(&self, dir: &Path, name: &Pattern) -> io::Result<Vec<PathBuf>>;
}

impl<F> FileFinder for F
where
    F: Fn(&Path, &Pattern) -> io::Result<Vec<PathBuf>>,
{
    fn find(&self, dir: &Path, name: &Pattern) -> io::Result<Vec<PathBuf>> {
        self(dir, name)
    }
}

/// The default [`FileFinder`], walking the file system with `walkdir`.
#[derive(Debug, Default, Clone, Copy)]
pub struct WalkDirFinder {
    follow_links: bool,
}

impl WalkDirFinder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_follow_links(self, follow_links: bool) -> Self {
        Self { follow_links }
    }
}

impl FileFinder for WalkDirFinder {
    fn find(&self, dir: &Path, name: &Pattern) -> io::Result<Vec<PathBuf>> {
        if !dir.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} is not a directory", dir.display()),
            ));
        }

        let options = MatchOptions {
            case_sensitive: true,
            require_literal_separator: true,
            require_literal_leading_dot: true,
        };

        let mut found = Vec::new();
        let walker = WalkDir::new(dir)
            .min_depth(1)
            .follow_links(self.follow_links)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry));
        for entry in walker {
            let entry = entry.map_err(io::Error::from)?;
            if !entry.file_type().is_file() {
                continue;
            }

            let file_name = entry.file_name().to_string_lossy();
            if !name.matches_with(&file_name, options) {
                continue;
            }

            if let Ok(relative) = entry.path().strip_prefix(dir) {
                found.push(relative.to_path_buf());
            }
        }

        found.sort();
        Ok(found)
    }
}

// Dotfiles and VCS directories like `.git` never take part.
fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}
