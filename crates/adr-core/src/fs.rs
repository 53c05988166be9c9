//! Filesystem boundary
//!
//! Every component that touches storage receives a [`FileSystem`] explicitly.
//! [`OsFileSystem`] talks to the real disk, [`MemoryFileSystem`] keeps a tree
//! in memory for tests.

use std::collections::BTreeMap;
use std::io;
use std::path::{Component, Path, PathBuf};

use parking_lot::RwLock;

pub trait FileSystem: Send + Sync {
    fn exists(&self, path: &Path) -> bool;

    /// Create `path` and any missing ancestors
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    fn read_lines(&self, path: &Path) -> io::Result<Vec<String>> {
        Ok(self
            .read_to_string(path)?
            .lines()
            .map(str::to_string)
            .collect())
    }

    /// Create or truncate `path` with `contents`. The parent must exist.
    fn write(&self, path: &Path, contents: &str) -> io::Result<()>;

    /// Direct children of a directory, sorted by path
    fn list_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>>;
}

/// The host filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        std::fs::write(path, contents)
    }

    fn list_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        let mut children = std::fs::read_dir(path)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<io::Result<Vec<_>>>()?;
        children.sort();
        Ok(children)
    }
}

#[derive(Debug, Clone)]
enum Node {
    Dir,
    File(String),
}

/// In-memory filesystem rooted at `/`
///
/// Relative paths are taken relative to `/`; `.` and `..` are folded away.
#[derive(Debug)]
pub struct MemoryFileSystem {
    nodes: RwLock<BTreeMap<PathBuf, Node>>,
}

impl Default for MemoryFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        let mut nodes = BTreeMap::new();
        nodes.insert(PathBuf::from("/"), Node::Dir);
        Self {
            nodes: RwLock::new(nodes),
        }
    }

    fn normalize(path: &Path) -> PathBuf {
        let mut out = PathBuf::from("/");
        for component in path.components() {
            match component {
                Component::Normal(part) => out.push(part),
                Component::ParentDir => {
                    out.pop();
                }
                Component::RootDir | Component::CurDir | Component::Prefix(_) => {}
            }
        }
        out
    }

    fn not_found(path: &Path) -> io::Error {
        io::Error::new(
            io::ErrorKind::NotFound,
            format!("{} does not exist", path.display()),
        )
    }
}

impl FileSystem for MemoryFileSystem {
    fn exists(&self, path: &Path) -> bool {
        self.nodes.read().contains_key(&Self::normalize(path))
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        let path = Self::normalize(path);
        let mut nodes = self.nodes.write();
        for ancestor in path.ancestors() {
            match nodes.get(ancestor) {
                Some(Node::Dir) => {}
                Some(Node::File(_)) => {
                    return Err(io::Error::new(
                        io::ErrorKind::AlreadyExists,
                        format!("{} is a file", ancestor.display()),
                    ))
                }
                None => {
                    nodes.insert(ancestor.to_path_buf(), Node::Dir);
                }
            }
        }
        Ok(())
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        let path = Self::normalize(path);
        match self.nodes.read().get(&path) {
            Some(Node::File(contents)) => Ok(contents.clone()),
            Some(Node::Dir) => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} is a directory", path.display()),
            )),
            None => Err(Self::not_found(&path)),
        }
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        let path = Self::normalize(path);
        let mut nodes = self.nodes.write();
        let parent = path.parent().ok_or_else(|| Self::not_found(&path))?;
        if !matches!(nodes.get(parent), Some(Node::Dir)) {
            return Err(Self::not_found(parent));
        }
        if matches!(nodes.get(&path), Some(Node::Dir)) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} is a directory", path.display()),
            ));
        }
        nodes.insert(path, Node::File(contents.to_string()));
        Ok(())
    }

    fn list_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        let path = Self::normalize(path);
        let nodes = self.nodes.read();
        if !matches!(nodes.get(&path), Some(Node::Dir)) {
            return Err(Self::not_found(&path));
        }
        Ok(nodes
            .keys()
            .filter(|candidate| candidate.parent() == Some(path.as_path()))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn memory_fs_creates_ancestors() {
        let fs = MemoryFileSystem::new();
        fs.create_dir_all(Path::new("/project/doc/adr")).unwrap();
        assert!(fs.exists(Path::new("/project")));
        assert!(fs.exists(Path::new("/project/doc")));
        assert!(fs.exists(Path::new("/project/./doc/../doc/adr")));
    }

    #[test]
    fn memory_fs_write_requires_parent() {
        let fs = MemoryFileSystem::new();
        let err = fs.write(Path::new("/missing/file.md"), "x").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);

        fs.create_dir_all(Path::new("/present")).unwrap();
        fs.write(Path::new("/present/file.md"), "a\nb\n").unwrap();
        assert_eq!(
            fs.read_lines(Path::new("/present/file.md")).unwrap(),
            vec!["a", "b"]
        );
    }

    #[test]
    fn memory_fs_lists_direct_children_only() {
        let fs = MemoryFileSystem::new();
        fs.create_dir_all(Path::new("/d/sub/deeper")).unwrap();
        fs.write(Path::new("/d/b.md"), "").unwrap();
        fs.write(Path::new("/d/a.md"), "").unwrap();

        let children = fs.list_dir(Path::new("/d")).unwrap();
        assert_eq!(
            children,
            vec![
                PathBuf::from("/d/a.md"),
                PathBuf::from("/d/b.md"),
                PathBuf::from("/d/sub"),
            ]
        );
        assert!(fs.list_dir(Path::new("/nope")).is_err());
    }

    #[test]
    fn memory_fs_refuses_directory_through_file() {
        let fs = MemoryFileSystem::new();
        fs.write(Path::new("/file"), "x").unwrap();
        assert!(fs.create_dir_all(Path::new("/file/below")).is_err());
    }

    #[test]
    fn os_fs_round_trips_through_disk() {
        let temp = tempdir().unwrap();
        let fs = OsFileSystem;
        let dir = temp.path().join("doc/adr");
        fs.create_dir_all(&dir).unwrap();
        fs.write(&dir.join("0001-x.md"), "# 1. X\n").unwrap();

        assert!(fs.exists(&dir.join("0001-x.md")));
        assert_eq!(fs.read_lines(&dir.join("0001-x.md")).unwrap(), vec!["# 1. X"]);
        assert_eq!(fs.list_dir(&dir).unwrap(), vec![dir.join("0001-x.md")]);
    }
}
