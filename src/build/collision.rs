use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

/// Whether anything, including a dangling symlink, exists at `path`.
pub fn is_occupied(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

/// `dir/stem_N.ext`, or `dir/stem_N` when there is no extension.
pub fn numbered_path(path: &Path, n: usize) -> PathBuf {
    let mut name = path
        .file_stem()
        .map(OsStr::to_os_string)
        .unwrap_or_default();
    name.push(format!("_{n}"));
    if let Some(ext) = path.extension() {
        name.push(".");
        name.push(ext);
    }
    path.with_file_name(name)
}

/// Find a free path for `path`.
///
/// Returns `path` itself if nothing is there, otherwise the first free
/// `stem_N.ext` counting from 1. The flag reports whether a new name was
/// chosen.
pub fn resolve_collision(path: &Path) -> (PathBuf, bool) {
    if !is_occupied(path) {
        return (path.to_path_buf(), false);
    }
    let mut n = 1;
    loop {
        let candidate = numbered_path(path, n);
        if !is_occupied(&candidate) {
            return (candidate, true);
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn free_path_is_returned_unchanged() {
        let tmp = TempDir::new().unwrap();
        let target = tmp.path().join("report.txt");
        assert_eq!(resolve_collision(&target), (target, false));
    }

    #[test]
    fn numbering_is_sequential() {
        let tmp = TempDir::new().unwrap();
        let target = tmp.path().join("report.txt");
        fs::write(&target, "0").unwrap();
        for n in 1..=3 {
            fs::write(tmp.path().join(format!("report_{n}.txt")), "").unwrap();
        }
        let (path, renamed) = resolve_collision(&target);
        assert!(renamed);
        assert_eq!(path, tmp.path().join("report_4.txt"));
    }

    #[test]
    fn numbered_path_variants() {
        let dir = Path::new("/x");
        assert_eq!(numbered_path(&dir.join("a.tar.gz"), 2), dir.join("a.tar_2.gz"));
        assert_eq!(numbered_path(&dir.join("Makefile"), 1), dir.join("Makefile_1"));
        assert_eq!(numbered_path(&dir.join(".env"), 1), dir.join(".env_1"));
    }

    #[test]
    #[cfg(unix)]
    fn dangling_symlink_counts_as_occupied() {
        let tmp = TempDir::new().unwrap();
        let link = tmp.path().join("gone.txt");
        std::os::unix::fs::symlink(tmp.path().join("missing"), &link).unwrap();
        assert!(is_occupied(&link));
        assert_eq!(resolve_collision(&link).0, tmp.path().join("gone_1.txt"));
    }
}
