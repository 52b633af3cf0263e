// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::model::{BookmarkNode, BookmarkTree, Crumb, NewNode, NodeId, NodePatch};

use super::folder::{BookmarkFolder, StoreError};

/// The bookmark-store contract the panes and commands run against.
///
/// Every call is asynchronous and the dispatcher awaits each one to
/// completion before issuing the next, so batch operations are strictly
/// sequential. `remove` without `force` fails with a non-empty-directory
/// error kind when a directory still has children.
#[async_trait]
pub trait Bookmarks: Send + Sync {
    async fn children(&self, parent: Option<&NodeId>) -> Result<Vec<BookmarkNode>, StoreError>;

    async fn node(&self, id: &NodeId) -> Result<BookmarkNode, StoreError>;

    async fn breadcrumbs(&self, parent: Option<&NodeId>) -> Result<Vec<Crumb>, StoreError>;

    async fn create(&self, new: NewNode) -> Result<BookmarkNode, StoreError>;

    async fn update(&self, id: &NodeId, patch: NodePatch) -> Result<BookmarkNode, StoreError>;

    async fn move_node(
        &self,
        id: &NodeId,
        parent: &NodeId,
        index: usize,
    ) -> Result<BookmarkNode, StoreError>;

    async fn remove(&self, id: &NodeId, force: bool) -> Result<(), StoreError>;
}

/// [`Bookmarks`] over an in-memory [`BookmarkTree`], persisting every
/// mutation through an optional [`BookmarkFolder`] (absent in demo mode).
///
/// The tree is the single source of truth for a running process; panes keep
/// no cache between builds.
#[derive(Debug)]
pub struct BookmarkStore {
    tree: Mutex<BookmarkTree>,
    folder: Option<BookmarkFolder>,
}

impl BookmarkStore {
    /// Opens (or initializes) the store folder and loads the tree.
    pub fn open(folder: BookmarkFolder) -> Result<Self, StoreError> {
        let tree = folder.load_or_init_tree()?;
        Ok(Self {
            tree: Mutex::new(tree),
            folder: Some(folder),
        })
    }

    /// A store with no persistence; mutations live only for the process.
    pub fn in_memory(tree: BookmarkTree) -> Self {
        Self {
            tree: Mutex::new(tree),
            folder: None,
        }
    }

    fn persist(&self, tree: &BookmarkTree) -> Result<(), StoreError> {
        match &self.folder {
            Some(folder) => folder.save_tree(tree),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl Bookmarks for BookmarkStore {
    async fn children(&self, parent: Option<&NodeId>) -> Result<Vec<BookmarkNode>, StoreError> {
        let tree = self.tree.lock().await;
        Ok(tree.children(parent)?)
    }

    async fn node(&self, id: &NodeId) -> Result<BookmarkNode, StoreError> {
        let tree = self.tree.lock().await;
        Ok(tree.node(id)?)
    }

    async fn breadcrumbs(&self, parent: Option<&NodeId>) -> Result<Vec<Crumb>, StoreError> {
        let tree = self.tree.lock().await;
        Ok(tree.breadcrumbs(parent)?)
    }

    async fn create(&self, new: NewNode) -> Result<BookmarkNode, StoreError> {
        let mut tree = self.tree.lock().await;
        let node = tree.create(new)?;
        self.persist(&tree)?;
        Ok(node)
    }

    async fn update(&self, id: &NodeId, patch: NodePatch) -> Result<BookmarkNode, StoreError> {
        let mut tree = self.tree.lock().await;
        let node = tree.update(id, patch)?;
        self.persist(&tree)?;
        Ok(node)
    }

    async fn move_node(
        &self,
        id: &NodeId,
        parent: &NodeId,
        index: usize,
    ) -> Result<BookmarkNode, StoreError> {
        let mut tree = self.tree.lock().await;
        let node = tree.move_node(id, parent, index)?;
        self.persist(&tree)?;
        Ok(node)
    }

    async fn remove(&self, id: &NodeId, force: bool) -> Result<(), StoreError> {
        let mut tree = self.tree.lock().await;
        tree.remove(id, force)?;
        self.persist(&tree)?;
        Ok(())
    }
}
