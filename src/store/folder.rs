// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::fs;
use std::io;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::model::{BookmarkTree, IdError, NodeId, TreeError};

const TREE_FILENAME: &str = "proteus-bookmarks.json";
const PREFS_FILENAME: &str = "proteus-panes.meta.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    Io {
        path: PathBuf,
        kind: io::ErrorKind,
        detail: String,
    },
    Json {
        path: PathBuf,
        detail: String,
    },
    InvalidId {
        field: &'static str,
        value: String,
        source: IdError,
    },
    SymlinkRefused {
        path: PathBuf,
    },
    Tree(TreeError),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            kind: source.kind(),
            detail: source.to_string(),
        }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            detail: source.to_string(),
        }
    }

    /// The recoverable "directory still has children" kind, which the trash
    /// command retries with a force flag after user confirmation.
    pub fn is_non_empty_directory(&self) -> bool {
        matches!(self, Self::Tree(TreeError::NonEmptyDirectory { .. }))
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, detail, .. } => {
                write!(f, "io error at {}: {detail}", path.display())
            }
            Self::Json { path, detail } => {
                write!(f, "invalid JSON at {}: {detail}", path.display())
            }
            Self::InvalidId { field, value, source } => {
                write!(f, "invalid {field} id {value:?}: {source}")
            }
            Self::SymlinkRefused { path } => {
                write!(f, "refusing to write through symlink: {}", path.display())
            }
            Self::Tree(source) => source.fmt(f),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<TreeError> for StoreError {
    fn from(source: TreeError) -> Self {
        Self::Tree(source)
    }
}

/// Write durability for store folder files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteDurability {
    /// Fast writes (default):
    /// - Writes a temp file and renames atomically into place.
    /// - Does not perform per-file fsync/sync.
    #[default]
    Fast,
    /// Attempts to flush written file contents and rename operations to
    /// stable storage where the platform supports it. Slower, best-effort.
    Durable,
}

/// Last-displayed parent id per pane, persisted across sessions.
///
/// `None` is the synthetic root and round-trips as the empty string, which
/// is also what a missing prefs file decodes to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PanePrefs {
    pub left: Option<NodeId>,
    pub right: Option<NodeId>,
}

/// On-disk layout: one JSON tree file plus one prefs file inside a store
/// directory. All writes go through a temp file and an atomic rename.
#[derive(Debug, Clone)]
pub struct BookmarkFolder {
    root: PathBuf,
    durability: WriteDurability,
}

impl BookmarkFolder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            durability: WriteDurability::default(),
        }
    }

    pub fn with_durability(mut self, durability: WriteDurability) -> Self {
        self.durability = durability;
        self
    }

    pub fn durability(&self) -> WriteDurability {
        self.durability
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn tree_path(&self) -> PathBuf {
        self.root.join(TREE_FILENAME)
    }

    pub fn prefs_path(&self) -> PathBuf {
        self.root.join(PREFS_FILENAME)
    }

    /// Loads the tree file, seeding (and persisting) the default roots when
    /// the folder has no tree yet.
    pub fn load_or_init_tree(&self) -> Result<BookmarkTree, StoreError> {
        let path = self.tree_path();
        match fs::metadata(&path) {
            Ok(_) => self.load_tree(),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                let tree = BookmarkTree::seeded();
                self.save_tree(&tree)?;
                Ok(tree)
            }
            Err(source) => Err(StoreError::io(path, source)),
        }
    }

    pub fn load_tree(&self) -> Result<BookmarkTree, StoreError> {
        let path = self.tree_path();
        let raw = fs::read_to_string(&path).map_err(|source| StoreError::io(&path, source))?;
        let file: TreeFile =
            serde_json::from_str(&raw).map_err(|source| StoreError::json(&path, source))?;

        let mut tree = BookmarkTree::new();
        for stored in &file.roots {
            insert_stored(&mut tree, None, stored)?;
        }
        tree.set_next_id(file.next_id);
        Ok(tree)
    }

    pub fn save_tree(&self, tree: &BookmarkTree) -> Result<(), StoreError> {
        let file = TreeFile {
            next_id: tree.next_id(),
            roots: tree
                .root_ids()
                .iter()
                .map(|id| stored_from_tree(tree, id))
                .collect::<Result<Vec<_>, _>>()?,
        };
        let json = serde_json::to_string_pretty(&file)
            .map_err(|source| StoreError::json(self.tree_path(), source))?;
        self.write_atomic(&self.tree_path(), json.as_bytes())
    }

    /// Reads the prefs file; a missing file or an id that no longer parses
    /// decodes to the default (both panes at the synthetic root).
    pub fn load_prefs(&self) -> Result<PanePrefs, StoreError> {
        let path = self.prefs_path();
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(PanePrefs::default()),
            Err(source) => return Err(StoreError::io(path, source)),
        };
        let file: PrefsFile =
            serde_json::from_str(&raw).map_err(|source| StoreError::json(&path, source))?;
        Ok(PanePrefs {
            left: NodeId::new(file.left).ok(),
            right: NodeId::new(file.right).ok(),
        })
    }

    pub fn save_prefs(&self, prefs: &PanePrefs) -> Result<(), StoreError> {
        let file = PrefsFile {
            left: prefs.left.as_ref().map(ToString::to_string).unwrap_or_default(),
            right: prefs.right.as_ref().map(ToString::to_string).unwrap_or_default(),
        };
        let json = serde_json::to_string_pretty(&file)
            .map_err(|source| StoreError::json(self.prefs_path(), source))?;
        self.write_atomic(&self.prefs_path(), json.as_bytes())
    }

    fn write_atomic(&self, path: &Path, contents: &[u8]) -> Result<(), StoreError> {
        fs::create_dir_all(&self.root).map_err(|source| StoreError::io(&self.root, source))?;

        match fs::symlink_metadata(path) {
            Ok(md) if md.file_type().is_symlink() => {
                return Err(StoreError::SymlinkRefused { path: path.to_path_buf() });
            }
            Ok(_) => {}
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(source) => return Err(StoreError::io(path, source)),
        }

        let parent = path.parent().unwrap_or(&self.root);
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "file".to_owned());
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        let tmp_path = parent.join(format!(".proteus.tmp.{file_name}.{nanos}"));

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&tmp_path)
            .map_err(|source| StoreError::io(&tmp_path, source))?;
        file.write_all(contents).map_err(|source| StoreError::io(&tmp_path, source))?;
        if self.durability == WriteDurability::Durable {
            file.sync_all().map_err(|source| StoreError::io(&tmp_path, source))?;
        }
        drop(file);

        if let Err(source) = rename_overwrite(&tmp_path, path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(StoreError::io(path, source));
        }

        if self.durability == WriteDurability::Durable {
            #[cfg(unix)]
            {
                let dir = fs::File::open(parent).map_err(|source| StoreError::io(parent, source))?;
                dir.sync_all().map_err(|source| StoreError::io(parent, source))?;
            }
        }

        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct TreeFile {
    next_id: u64,
    roots: Vec<StoredNode>,
}

#[derive(Debug, Serialize, Deserialize)]
struct PrefsFile {
    left: String,
    right: String,
}

/// Nested on-disk node shape; `children` present (possibly empty) for
/// directories and absent for files, which is also how kind is derived in
/// the model.
#[derive(Debug, Serialize, Deserialize)]
struct StoredNode {
    id: String,
    title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    date_added: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    date_group_modified: Option<u64>,
    #[serde(default, skip_serializing_if = "is_false")]
    readonly: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    children: Option<Vec<StoredNode>>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

fn insert_stored(
    tree: &mut BookmarkTree,
    parent: Option<&NodeId>,
    stored: &StoredNode,
) -> Result<(), StoreError> {
    let id = NodeId::new(stored.id.clone()).map_err(|source| StoreError::InvalidId {
        field: "node",
        value: stored.id.clone(),
        source,
    })?;
    tree.insert_loaded(
        id.clone(),
        parent.cloned(),
        stored.title.clone(),
        stored.url.clone(),
        stored.date_added,
        stored.date_group_modified,
        stored.readonly,
    )?;
    if let Some(children) = &stored.children {
        for child in children {
            insert_stored(tree, Some(&id), child)?;
        }
    }
    Ok(())
}

fn stored_from_tree(tree: &BookmarkTree, id: &NodeId) -> Result<StoredNode, StoreError> {
    let node = tree.node(id)?;
    let children = if node.url.is_none() {
        Some(
            tree.children(Some(id))?
                .iter()
                .map(|child| stored_from_tree(tree, &child.id))
                .collect::<Result<Vec<_>, _>>()?,
        )
    } else {
        None
    };
    Ok(StoredNode {
        id: node.id.into_string(),
        title: node.title,
        url: node.url,
        date_added: node.date_added,
        date_group_modified: node.date_group_modified,
        readonly: node.readonly,
        children,
    })
}

fn rename_overwrite(from: &Path, to: &Path) -> io::Result<()> {
    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(err) => {
            if to.exists() {
                fs::remove_file(to)?;
                fs::rename(from, to)
            } else {
                Err(err)
            }
        }
    }
}
