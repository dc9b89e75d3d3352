//! DOT file discovery for directory mode
//!
//! Lists the files directly inside a directory whose names end in `.dot`
//! or `.DOT`. Subdirectories are not descended into, and hidden or
//! git-ignored files are not filtered out.

use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// File name patterns picked up in directory mode
pub const DOT_PATTERNS: &[&str] = &["*.dot", "*.DOT"];

/// Discover files matching glob patterns directly inside `dir`
///
/// # Arguments
/// * `dir` - Directory to list
/// * `patterns` - Glob patterns matched against the file name
///
/// # Returns
/// Matching paths (prefixed with `dir`), sorted. An unreadable `dir` or an
/// invalid pattern yields an empty list.
pub fn discover_files(dir: &Path, patterns: &[&str]) -> Vec<PathBuf> {
    let matcher = match build_glob_matcher(patterns) {
        Ok(matcher) => matcher,
        Err(err) => {
            tracing::warn!(%err, "invalid discovery pattern");
            return Vec::new();
        }
    };

    let mut files = Vec::new();
    for result in build_walker(dir) {
        match result {
            Ok(entry) => {
                let is_file = entry.file_type().is_some_and(|ft| ft.is_file());
                if is_file && matcher.is_match(entry.file_name()) {
                    files.push(entry.into_path());
                }
            }
            Err(err) => {
                // Log walk errors but keep listing the other entries
                tracing::warn!(%err, "error listing directory");
            }
        }
    }

    files.sort();
    files
}

/// Discover `.dot`/`.DOT` files directly inside `dir`
///
/// # Example
/// ```no_run
/// use dotprune_core::discovery;
///
/// let files = discovery::discover_dot_files(std::path::Path::new("graphs"));
/// println!("Found {} DOT files", files.len());
/// ```
pub fn discover_dot_files(dir: &Path) -> Vec<PathBuf> {
    discover_files(dir, DOT_PATTERNS)
}

fn build_glob_matcher(patterns: &[&str]) -> Result<GlobSet, globset::Error> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    builder.build()
}

/// Single-level walk with every ignore filter switched off
fn build_walker(dir: &Path) -> ignore::Walk {
    WalkBuilder::new(dir)
        .standard_filters(false)
        .max_depth(Some(1))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use tempfile::TempDir;

    fn names(files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .filter_map(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_discover_both_extensions() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        File::create(root.join("b.dot")).unwrap();
        File::create(root.join("A.DOT")).unwrap();
        File::create(root.join("notes.txt")).unwrap();
        File::create(root.join("mixed.Dot")).unwrap();

        let files = discover_dot_files(root);

        assert_eq!(names(&files), vec!["A.DOT", "b.dot"]);
    }

    #[test]
    fn test_not_recursive() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        fs::create_dir_all(root.join("nested")).unwrap();
        File::create(root.join("nested/inner.dot")).unwrap();
        File::create(root.join("top.dot")).unwrap();

        assert_eq!(names(&discover_dot_files(root)), vec!["top.dot"]);
    }

    #[test]
    fn test_directory_named_like_dot_file_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        fs::create_dir_all(root.join("folder.dot")).unwrap();

        assert!(discover_dot_files(root).is_empty());
    }

    #[test]
    fn test_hidden_and_ignored_files_included() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        fs::write(root.join(".gitignore"), "*.dot\n").unwrap();
        File::create(root.join(".hidden.dot")).unwrap();
        File::create(root.join("plain.dot")).unwrap();

        assert_eq!(
            names(&discover_dot_files(root)),
            vec![".hidden.dot", "plain.dot"]
        );
    }

    #[test]
    fn test_missing_directory() {
        let temp_dir = TempDir::new().unwrap();

        assert!(discover_dot_files(&temp_dir.path().join("absent")).is_empty());
    }
}
