//! Recursive file discovery with exclusions and deterministic ordering.

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

/// Directory names that are never descended into.
const EXCLUDED_DIRS: &[&str] = &["node_modules", ".git", "dist"];

/// Outcome of one directory walk.
///
/// Traversal failures never abort the walk; they are counted in `errors`
/// and the list stays partial.
#[derive(Debug, Default)]
pub struct WalkList {
    /// Matched files, stable-sorted by lowercased extension.
    pub files: Vec<PathBuf>,
    /// Directories descended into (the root itself is not counted).
    pub directories_scanned: usize,
    /// Unreadable directories or entries encountered along the way.
    pub errors: usize,
}

/// Recursively collects files under `root` whose paths end with one of
/// `extensions`, pruning the fixed exclusion set and any user-supplied
/// glob patterns.
///
/// Matching is substring-suffix, not dot-delimited: with extension `html`,
/// both `foo.html` and `xfoo.html` qualify.
#[must_use]
pub fn collect(root: &Path, extensions: &[&str], excludes: &[glob::Pattern]) -> WalkList {
    let mut list = WalkList::default();

    let walker = WalkDir::new(root)
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_pruned(entry.path(), excludes));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!("Failed to read entry: {err}");
                list.errors += 1;
                continue;
            }
        };

        if entry.file_type().is_dir() {
            if entry.depth() > 0 {
                list.directories_scanned += 1;
            }
            continue;
        }

        let path = entry.path();
        if matches_extension(path, extensions) {
            list.files.push(path.to_path_buf());
        }
    }

    debug!(
        "Walk of {} found {} candidate file(s) in {} director(ies)",
        root.display(),
        list.files.len(),
        list.directories_scanned
    );

    list.files.sort_by(|a, b| compare_by_extension(a, b));
    list
}

/// Whether a directory entry is pruned without descending.
fn is_pruned(path: &Path, excludes: &[glob::Pattern]) -> bool {
    if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
        if EXCLUDED_DIRS.contains(&name) {
            debug!("Skipping excluded directory: {name}");
            return true;
        }
    }

    let path_str = path.to_string_lossy();
    excludes.iter().any(|pattern| pattern.matches(&path_str))
}

/// Suffix match against the requested extensions.
fn matches_extension(path: &Path, extensions: &[&str]) -> bool {
    let path_str = path.to_string_lossy();
    extensions.iter().any(|ext| path_str.ends_with(ext))
}

/// Lowercased substring after the last `.` in the whole path; paths
/// without a dot have no extension for ordering purposes.
fn extension_key(path: &Path) -> Option<String> {
    let path_str = path.to_string_lossy();
    path_str
        .rfind('.')
        .map(|idx| path_str[idx + 1..].to_lowercase())
}

/// Stable comparison by extension key; incomparable pairs keep their
/// relative walk order.
fn compare_by_extension(a: &Path, b: &Path) -> Ordering {
    match (extension_key(a), extension_key(b)) {
        (Some(ext_a), Some(ext_b)) => ext_a.cmp(&ext_b),
        _ => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(dir: &Path, rel: &str) {
        let path = dir.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, "content").unwrap();
    }

    #[test]
    fn collects_only_matching_suffixes() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "src/list.html");
        touch(tmp.path(), "src/app.ts");
        touch(tmp.path(), "src/xfoo.html");

        let list = collect(tmp.path(), &["html"], &[]);
        assert_eq!(list.files.len(), 2);
        assert!(list.files.iter().all(|f| f.to_string_lossy().ends_with("html")));
    }

    #[test]
    fn prunes_fixed_exclusion_set() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "node_modules/pkg/tpl.html");
        touch(tmp.path(), "dist/out.html");
        touch(tmp.path(), ".git/objects/x.html");
        touch(tmp.path(), "src/list.html");

        let list = collect(tmp.path(), &["html"], &[]);
        assert_eq!(list.files.len(), 1);
        assert!(list.files[0].ends_with("src/list.html"));
        // Pruned directories are not counted as scanned.
        assert_eq!(list.directories_scanned, 1);
    }

    #[test]
    fn user_glob_excludes_prune_directories() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "coverage/report.html");
        touch(tmp.path(), "src/list.html");

        let pattern = glob::Pattern::new(&format!("{}/coverage", tmp.path().display())).unwrap();
        let list = collect(tmp.path(), &["html"], &[pattern]);
        assert_eq!(list.files.len(), 1);
        assert!(list.files[0].ends_with("src/list.html"));
    }

    #[test]
    fn files_sorted_by_lowercased_extension() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "b.TS");
        touch(tmp.path(), "a.html");
        touch(tmp.path(), "c.css");

        let list = collect(tmp.path(), &["html", "ts", "TS", "css"], &[]);
        let exts: Vec<_> = list
            .files
            .iter()
            .map(|f| extension_key(f).unwrap())
            .collect();
        assert_eq!(exts, vec!["css", "html", "ts"]);
    }

    #[test]
    fn missing_root_counts_one_error() {
        let tmp = TempDir::new().unwrap();
        let gone = tmp.path().join("gone");
        let list = collect(&gone, &["html"], &[]);
        assert!(list.files.is_empty());
        assert_eq!(list.errors, 1);
    }

    #[test]
    fn extension_key_ignores_dotless_paths() {
        assert_eq!(extension_key(Path::new("Makefile")), None);
        assert_eq!(
            extension_key(Path::new("a/b/list.HTML")),
            Some("html".to_string())
        );
    }
}
