use std::io;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// One visited filesystem entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub path: PathBuf,
    /// raw `st_mode` as returned by lstat
    pub mode: u32,
    pub is_dir: bool,
}

/// Source of the entities under a root path, root included.
pub trait Traverse {
    type Entries: Iterator<Item = io::Result<Entry>>;

    fn entries(&self, root: &Path) -> Self::Entries;
}

/// Recursive walk of the real filesystem. Links are reported, never followed.
#[derive(Debug, Default, Clone, Copy)]
pub struct Tree;

pub struct TreeEntries {
    inner: walkdir::IntoIter,
}

impl Traverse for Tree {
    type Entries = TreeEntries;

    fn entries(&self, root: &Path) -> TreeEntries {
        TreeEntries {
            inner: WalkDir::new(root)
                .follow_root_links(false)
                .sort_by_file_name()
                .into_iter(),
        }
    }
}

impl Iterator for TreeEntries {
    type Item = io::Result<Entry>;

    fn next(&mut self) -> Option<io::Result<Entry>> {
        let entry = match self.inner.next()? {
            Ok(entry) => entry,
            Err(why) => return Some(Err(io::Error::from(why))),
        };

        // walkdir hands out lstat metadata when links are not followed
        let meta = match entry.metadata() {
            Ok(meta) => meta,
            Err(why) => return Some(Err(io::Error::from(why))),
        };

        Some(Ok(Entry {
            path: entry.into_path(),
            mode: meta.permissions().mode(),
            is_dir: meta.is_dir(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn root_first_then_sorted_children() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("root");
        fs::create_dir_all(root.join("b")).unwrap();
        fs::write(root.join("a"), "").unwrap();
        fs::write(root.join("b").join("c"), "").unwrap();

        let paths: Vec<PathBuf> = Tree.entries(&root).map(|e| e.unwrap().path).collect();

        assert_eq!(
            paths,
            vec![
                root.clone(),
                root.join("a"),
                root.join("b"),
                root.join("b").join("c"),
            ]
        );
    }

    #[test]
    fn reports_mode_and_kind() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("file");
        fs::write(&file, "").unwrap();
        fs::set_permissions(&file, fs::Permissions::from_mode(0o640)).unwrap();

        let entries: Vec<Entry> = Tree.entries(&file).map(|e| e.unwrap()).collect();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].mode & 0o777, 0o640);
        assert!(!entries[0].is_dir);

        let dir: Vec<Entry> = Tree.entries(tmp.path()).map(|e| e.unwrap()).collect();
        assert!(dir[0].is_dir);
    }

    #[test]
    fn symlinked_root_is_not_descended() {
        let tmp = tempfile::tempdir().unwrap();
        let real = tmp.path().join("real");
        let link = tmp.path().join("link");
        fs::create_dir(&real).unwrap();
        fs::write(real.join("f"), "").unwrap();
        std::os::unix::fs::symlink(&real, &link).unwrap();

        let entries: Vec<Entry> = Tree.entries(&link).map(|e| e.unwrap()).collect();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].path, link);
        assert!(!entries[0].is_dir);
    }

    #[test]
    fn missing_root_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let mut entries = Tree.entries(&tmp.path().join("gone"));

        assert!(entries.next().unwrap().is_err());
        assert!(entries.next().is_none());
    }
}
